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
use crate::{Color, FontId, Icon, Recti, Vec2i, COMMAND_LIST_SIZE};

/// Placeholder destination for a jump that has not been patched yet.
const UNRESOLVED_JUMP: usize = usize::MAX;

/// Draw commands recorded during a frame.
///
/// The buffer is append-only while widgets run; the only mutation applied
/// afterwards is patching [`Command::Jump`] destinations so that reading the
/// buffer through [`CommandList::iter`] visits root containers back-to-front.
pub enum Command {
    /// Redirects iteration to another index in the buffer. Emitted in
    /// head/tail pairs around each root container and resolved at frame end;
    /// never yielded to the renderer.
    Jump {
        /// Index of the next command to visit.
        dst: usize,
    },
    /// Sets the scissor rectangle for subsequent commands.
    Clip {
        /// Rect to clip against.
        rect: Recti,
    },
    /// Draws a solid rectangle.
    Rect {
        /// Target rectangle.
        rect: Recti,
        /// Fill color.
        color: Color,
    },
    /// Draws text.
    Text {
        /// Font to measure and render with.
        font: FontId,
        /// Top-left text position.
        pos: Vec2i,
        /// Text color.
        color: Color,
        /// UTF-8 string to render.
        text: String,
    },
    /// Draws a built-in icon glyph.
    Icon {
        /// Target rectangle.
        rect: Recti,
        /// Icon identifier.
        id: Icon,
        /// Tint color.
        color: Color,
    },
}

/// Flat arena of draw commands addressed by integer index.
///
/// Indices rather than references identify commands, so jump patching is a
/// plain array write and recorded commands never move.
pub struct CommandList {
    commands: Vec<Command>,
}

impl CommandList {
    pub(crate) fn new() -> Self {
        Self { commands: Vec::with_capacity(1024) }
    }

    pub(crate) fn clear(&mut self) {
        self.commands.clear();
    }

    /// Number of commands recorded this frame, jumps included.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Returns `true` when no command has been recorded.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Returns the command stored at `idx`.
    pub fn get(&self, idx: usize) -> &Command {
        &self.commands[idx]
    }

    pub(crate) fn push(&mut self, cmd: Command) -> usize {
        assert!(self.commands.len() < COMMAND_LIST_SIZE, "command list overflow");
        self.commands.push(cmd);
        self.commands.len() - 1
    }

    pub(crate) fn push_jump(&mut self) -> usize {
        self.push(Command::Jump { dst: UNRESOLVED_JUMP })
    }

    pub(crate) fn set_jump_dst(&mut self, idx: usize, dst: usize) {
        match &mut self.commands[idx] {
            Command::Jump { dst: d } => *d = dst,
            _ => panic!("command {} is not a jump", idx),
        }
    }

    /// Iterates the buffer from its head, following jump destinations so the
    /// caller sees primitives in resolved z-order. Jump commands themselves
    /// are consumed by the walk and never yielded.
    pub fn iter(&self) -> CommandIter<'_> {
        CommandIter { commands: &self.commands, cursor: 0 }
    }
}

/// Iterator over a [`CommandList`] that resolves jump indirections.
pub struct CommandIter<'a> {
    commands: &'a [Command],
    cursor: usize,
}

impl<'a> Iterator for CommandIter<'a> {
    type Item = &'a Command;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.cursor >= self.commands.len() {
                return None;
            }
            match &self.commands[self.cursor] {
                Command::Jump { dst } => {
                    assert!(*dst != UNRESOLVED_JUMP, "unresolved jump in command list");
                    self.cursor = *dst;
                }
                cmd => {
                    self.cursor += 1;
                    return Some(cmd);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{color, rect};

    fn rect_cmd(x: i32) -> Command {
        Command::Rect {
            rect: rect(x, 0, 1, 1),
            color: color(255, 255, 255, 255),
        }
    }

    fn drain_xs(list: &CommandList) -> Vec<i32> {
        list.iter()
            .filter_map(|cmd| match cmd {
                Command::Rect { rect, .. } => Some(rect.x),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn iteration_follows_patched_jumps() {
        let mut list = CommandList::new();
        // Two "containers": [jump, rect(1), jump] and [jump, rect(2), jump],
        // spliced so the second renders before the first.
        let head_a = list.push_jump();
        list.push(rect_cmd(1));
        let tail_a = list.push_jump();
        let head_b = list.push_jump();
        list.push(rect_cmd(2));
        let tail_b = list.push_jump();

        list.set_jump_dst(head_a, head_b + 1);
        list.set_jump_dst(tail_b, head_a + 1);
        list.set_jump_dst(tail_a, list.len());
        let _ = head_b;

        assert_eq!(drain_xs(&list), vec![2, 1]);
    }

    #[test]
    fn jumps_are_never_yielded() {
        let mut list = CommandList::new();
        let head = list.push_jump();
        list.push(rect_cmd(7));
        list.set_jump_dst(head, head + 1);
        assert_eq!(list.iter().count(), 1);
    }

    #[test]
    fn empty_list_yields_nothing() {
        let list = CommandList::new();
        assert!(list.iter().next().is_none());
        assert!(list.is_empty());
    }

    #[test]
    #[should_panic(expected = "not a jump")]
    fn patching_a_non_jump_is_fatal() {
        let mut list = CommandList::new();
        let idx = list.push(rect_cmd(0));
        list.set_jump_dst(idx, 0);
    }
}
