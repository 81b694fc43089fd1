use crate::ID_STACK_SIZE;

/// Stable 32-bit widget identifier derived from an FNV-1a hash chain.
///
/// Two calls made with the same id-stack contents and the same label bytes
/// always produce the same `Id`; this is the sole key used to associate a
/// widget call with retained state and with hover/focus ownership.
#[derive(Default, Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Id(u32);

impl Id {
    /// Returns the raw hash value wrapped by this identifier.
    pub fn raw(self) -> u32 { self.0 }
}

const HASH_INITIAL: u32 = 2166136261;

pub(crate) struct IdManager {
    last_id: Option<Id>,
    id_stack: Vec<Id>,
}

impl IdManager {
    pub fn new() -> Self {
        Self {
            last_id: None,
            id_stack: Vec::with_capacity(ID_STACK_SIZE),
        }
    }

    pub fn len(&self) -> usize {
        self.id_stack.len()
    }

    pub fn last_id(&self) -> Option<Id> {
        self.last_id
    }

    fn hash_step(h: u32, b: u8) -> u32 {
        (h ^ b as u32).wrapping_mul(16777619)
    }

    fn hash_bytes(hash: &mut Id, bytes: &[u8]) {
        for b in bytes {
            *hash = Id(Self::hash_step(hash.0, *b));
        }
    }

    fn seed(&self) -> Id {
        match self.id_stack.last() {
            Some(id) => *id,
            None => Id(HASH_INITIAL),
        }
    }

    pub fn get_id_from_bytes(&mut self, bytes: &[u8]) -> Id {
        let mut res = self.seed();
        Self::hash_bytes(&mut res, bytes);
        self.last_id = Some(res);
        res
    }

    pub fn get_id_from_str(&mut self, s: &str) -> Id {
        self.get_id_from_bytes(s.as_bytes())
    }

    pub fn get_id_u32(&mut self, orig_id: u32) -> Id {
        let bytes = orig_id.to_be_bytes();
        self.get_id_from_bytes(&bytes)
    }

    pub fn get_id_from_ptr<T: ?Sized>(&mut self, orig_id: &T) -> Id {
        let ptr = orig_id as *const T as *const u8 as usize;
        let bytes = ptr.to_le_bytes();
        self.get_id_from_bytes(&bytes)
    }

    pub fn push_id(&mut self, id: Id) {
        assert!(self.id_stack.len() < ID_STACK_SIZE, "id stack overflow");
        self.id_stack.push(id)
    }

    pub fn push_id_from_str(&mut self, s: &str) {
        let id = self.get_id_from_str(s);
        self.push_id(id);
    }

    pub fn pop_id(&mut self) {
        self.id_stack.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matched_push_pop_restores_stack_depth() {
        let mut mngr = IdManager::new();
        let before = mngr.len();
        mngr.push_id_from_str("window");
        mngr.push_id_from_str("node");
        mngr.pop_id();
        mngr.pop_id();
        assert_eq!(mngr.len(), before);
    }

    #[test]
    fn same_scope_and_label_hash_identically() {
        let mut mngr = IdManager::new();
        mngr.push_id_from_str("window");
        let a = mngr.get_id_from_str("button");
        let b = mngr.get_id_from_str("button");
        assert_eq!(a, b);
        mngr.pop_id();
    }

    #[test]
    fn scope_changes_the_id() {
        let mut mngr = IdManager::new();
        let bare = mngr.get_id_from_str("button");
        mngr.push_id_from_str("window");
        let scoped = mngr.get_id_from_str("button");
        mngr.pop_id();
        assert_ne!(bare, scoped);
    }

    #[test]
    fn get_id_does_not_touch_the_stack() {
        let mut mngr = IdManager::new();
        let _ = mngr.get_id_from_str("a");
        let _ = mngr.get_id_u32(42);
        assert_eq!(mngr.len(), 0);
    }

    #[test]
    fn last_id_tracks_most_recent_hash() {
        let mut mngr = IdManager::new();
        assert_eq!(mngr.last_id(), None);
        let id = mngr.get_id_from_str("slider");
        assert_eq!(mngr.last_id(), Some(id));
    }
}
