//
// Copyright 2022-Present (c) Raja Lehtihet & Wael El Oraiby
//
// Redistribution and use in source and binary forms, with or without
// modification, are permitted provided that the following conditions are met:
//
// 1. Redistributions of source code must retain the above copyright notice,
// this list of conditions and the following disclaimer.
//
// 2. Redistributions in binary form must reproduce the above copyright notice,
// this list of conditions and the following disclaimer in the documentation
// and/or other materials provided with the distribution.
//
// 3. Neither the name of the copyright holder nor the names of its contributors
// may be used to endorse or promote products derived from this software without
// specific prior written permission.
//
// THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
// AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
// IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE
// ARE DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE
// LIABLE FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR
// CONSEQUENTIAL DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF
// SUBSTITUTE GOODS OR SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS
// INTERRUPTION) HOWEVER CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN
// CONTRACT, STRICT LIABILITY, OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE)
// ARISING IN ANY WAY OUT OF THE USE OF THIS SOFTWARE, EVEN IF ADVISED OF THE
// POSSIBILITY OF SUCH DAMAGE.
//
// -----------------------------------------------------------------------------
// Ported to rust from https://github.com/rxi/microui/ and the original license
//
// Copyright (c) 2020 rxi
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to
// deal in the Software without restriction, including without limitation the
// rights to use, copy, modify, merge, publish, distribute, sublicense, and/or
// sell copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING
// FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS
// IN THE SOFTWARE.
//
use crate::Id;

#[derive(Copy, Clone)]
struct PoolItem {
    id: Option<Id>,
    last_update: usize,
}

/// Fixed-capacity id-keyed slot pool with least-recently-updated eviction.
///
/// Slot indices are stable for the lifetime of an entry, which lets callers
/// keep a parallel payload array addressed by the same index. Capacities are
/// small (tens of entries), so lookups are linear scans.
pub(crate) struct Pool {
    items: Box<[PoolItem]>,
}

impl Pool {
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "pool capacity must be non-zero");
        Self {
            items: vec![PoolItem { id: None, last_update: 0 }; capacity].into_boxed_slice(),
        }
    }

    /// Finds the slot holding `id`, if any.
    pub fn get(&self, id: Id) -> Option<usize> {
        self.items.iter().position(|item| item.id == Some(id))
    }

    /// Claims a slot for `id`, evicting the least-recently-updated entry
    /// when no free slot remains. Ties keep the lowest slot index.
    pub fn init(&mut self, id: Id, frame: usize) -> usize {
        let mut candidate = None;
        let mut oldest = usize::MAX;
        for (i, item) in self.items.iter().enumerate() {
            let age = match item.id {
                None => 0,
                Some(_) => item.last_update,
            };
            if age < oldest {
                oldest = age;
                candidate = Some(i);
            }
        }
        // Unreachable for a non-empty pool; kept as a contract check.
        let idx = candidate.expect("pool eviction found no candidate");
        self.items[idx] = PoolItem { id: Some(id), last_update: frame };
        idx
    }

    /// Stamps the slot as touched during `frame`.
    pub fn update(&mut self, idx: usize, frame: usize) {
        self.items[idx].last_update = frame;
    }

    /// Releases the slot so it reads as free for the next `init`.
    pub fn clear(&mut self, idx: usize) {
        self.items[idx] = PoolItem { id: None, last_update: 0 };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::IdManager;

    fn ids(n: usize) -> Vec<Id> {
        let mut mngr = IdManager::new();
        (0..n).map(|i| mngr.get_id_u32(i as u32)).collect()
    }

    #[test]
    fn get_finds_initialized_slot() {
        let ids = ids(2);
        let mut pool = Pool::new(4);
        let idx = pool.init(ids[0], 1);
        assert_eq!(pool.get(ids[0]), Some(idx));
        assert_eq!(pool.get(ids[1]), None);
    }

    #[test]
    fn untouched_entry_loses_the_lru_race() {
        let ids = ids(4);
        let mut pool = Pool::new(3);
        for (i, id) in ids[..3].iter().enumerate() {
            pool.init(*id, 1 + i);
        }
        // Touch every entry except ids[0] on later frames.
        for frame in 4..8 {
            for id in &ids[1..3] {
                let idx = pool.get(*id).unwrap();
                pool.update(idx, frame);
            }
        }
        let evicted_slot = pool.init(ids[3], 9);
        assert_eq!(pool.get(ids[0]), None);
        assert_eq!(pool.get(ids[3]), Some(evicted_slot));
        assert!(pool.get(ids[1]).is_some());
        assert!(pool.get(ids[2]).is_some());
    }

    #[test]
    fn cleared_slot_is_preferred_over_eviction() {
        let ids = ids(3);
        let mut pool = Pool::new(2);
        let a = pool.init(ids[0], 5);
        let _b = pool.init(ids[1], 6);
        pool.clear(a);
        let c = pool.init(ids[2], 7);
        assert_eq!(c, a);
        assert!(pool.get(ids[1]).is_some());
    }

    #[test]
    fn at_most_one_slot_per_id() {
        let ids = ids(1);
        let mut pool = Pool::new(4);
        let first = pool.init(ids[0], 1);
        // Callers re-touch via update; a second init for the same id must not
        // leave two live slots behind.
        pool.clear(first);
        let second = pool.init(ids[0], 2);
        assert_eq!(pool.get(ids[0]), Some(second));
    }
}
