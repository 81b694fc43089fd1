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
use crate::{rect, vec2, Recti, Style, Vec2i, LAYOUT_STACK_SIZE, MAX_WIDTHS};
use std::cmp::max;

/// Describes how a layout dimension should be resolved.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SizePolicy {
    /// Fall back to the style default (`style.size + 2 * padding`).
    Auto,
    /// The cell is always this many pixels.
    Fixed(i32),
    /// Fill the remaining row/body extent, keeping `margin` pixels free.
    Remainder(i32),
}

impl SizePolicy {
    fn resolve(self, default_size: i32, available_space: i32) -> i32 {
        match self {
            SizePolicy::Auto => default_size,
            SizePolicy::Fixed(value) => value,
            SizePolicy::Remainder(margin) => available_space - margin,
        }
    }
}

impl Default for SizePolicy {
    fn default() -> Self {
        SizePolicy::Auto
    }
}

/// Pending placement override consumed by the next [`LayoutManager::next`].
#[derive(Copy, Clone, Debug)]
pub enum NextCell {
    /// No override; pull the next rect from the row cursor.
    None,
    /// Rect relative to the layout body; still advances the cursor.
    Relative(Recti),
    /// Rect in absolute coordinates; bypasses cursor advancement entirely.
    Absolute(Recti),
}

impl Default for NextCell {
    fn default() -> Self {
        NextCell::None
    }
}

#[derive(Clone, Default)]
struct Layout {
    body: Recti,
    position: Vec2i,
    max: Option<Vec2i>,
    next_row: i32,
    indent: i32,
    widths: Vec<SizePolicy>,
    // Fallback cell size used when `widths` is empty / for row height.
    size: (SizePolicy, SizePolicy),
    item_index: usize,
    next: NextCell,
}

/// Stack of transient per-container layout frames. A frame never survives
/// `end()`; retained geometry lives in the container pool instead.
#[derive(Default)]
pub(crate) struct LayoutManager {
    stack: Vec<Layout>,
    last_rect: Recti,
}

impl LayoutManager {
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    pub fn last_rect(&self) -> Recti {
        self.last_rect
    }

    fn top(&self) -> &Layout {
        self.stack.last().expect("layout stack is empty")
    }

    fn top_mut(&mut self) -> &mut Layout {
        self.stack.last_mut().expect("layout stack is empty")
    }

    pub fn current_body(&self) -> Recti {
        self.top().body
    }

    pub fn current_max(&self) -> Option<Vec2i> {
        self.top().max
    }

    pub fn push_layout(&mut self, body: Recti, scroll: Vec2i) {
        assert!(self.stack.len() < LAYOUT_STACK_SIZE, "layout stack overflow");
        let layout = Layout {
            body: rect(body.x - scroll.x, body.y - scroll.y, body.width, body.height),
            ..Layout::default()
        };
        self.stack.push(layout);
        self.row(&[SizePolicy::Auto], SizePolicy::Auto);
    }

    pub fn pop(&mut self) {
        self.stack.pop();
    }

    pub fn adjust_indent(&mut self, delta: i32) {
        self.top_mut().indent += delta;
    }

    /// Starts a new row with explicit column width policies.
    pub fn row(&mut self, widths: &[SizePolicy], height: SizePolicy) {
        assert!(widths.len() <= MAX_WIDTHS, "too many row widths");
        let layout = self.top_mut();
        layout.widths.clear();
        layout.widths.extend_from_slice(widths);
        layout.size.1 = height;
        layout.item_index = 0;
        layout.position = vec2(layout.indent, layout.next_row);
    }

    // Row wrap: keep the width list, reset the cursor below the tallest cell.
    fn begin_row(&mut self) {
        let layout = self.top_mut();
        layout.item_index = 0;
        layout.position = vec2(layout.indent, layout.next_row);
    }

    /// Sets the fallback cell width used when no row widths are configured.
    pub fn width(&mut self, width: SizePolicy) {
        self.top_mut().size.0 = width;
    }

    /// Sets the row height used for subsequent cells.
    pub fn height(&mut self, height: SizePolicy) {
        self.top_mut().size.1 = height;
    }

    /// Overrides the rect returned by the next [`LayoutManager::next`] call.
    pub fn set_next(&mut self, next: NextCell) {
        self.top_mut().next = next;
    }

    /// Computes the next widget cell.
    pub fn next(&mut self, style: &Style) -> Recti {
        let default_width = style.size.width + style.padding * 2;
        let default_height = style.size.height + style.padding * 2;
        let spacing = style.spacing;

        let res = match std::mem::take(&mut self.top_mut().next) {
            NextCell::Absolute(r) => {
                self.last_rect = r;
                return r;
            }
            NextCell::Relative(r) => r,
            NextCell::None => {
                if self.top().item_index == self.top().widths.len() {
                    self.begin_row();
                }
                let layout = self.top();
                let width_policy = if layout.widths.is_empty() {
                    layout.size.0
                } else {
                    layout.widths[layout.item_index]
                };
                let height_policy = layout.size.1;

                let mut r = rect(layout.position.x, layout.position.y, 0, 0);
                r.width = width_policy.resolve(default_width, layout.body.width - r.x);
                r.height = height_policy.resolve(default_height, layout.body.height - r.y);

                let layout = self.top_mut();
                if layout.item_index < layout.widths.len() {
                    layout.item_index += 1;
                }
                r
            }
        };

        // Advance the cursor past the cell and remember the tallest cell so
        // the next row starts below it.
        {
            let layout = self.top_mut();
            layout.position.x += res.width + spacing;
            layout.next_row = max(layout.next_row, res.y + res.height + spacing);
        }

        // Translate from body-local to absolute coordinates.
        let mut res = res;
        res.x += self.top().body.x;
        res.y += self.top().body.y;

        // Max extent feeds content-size (scrollbars, auto-sized windows).
        {
            let layout = self.top_mut();
            layout.max = Some(match layout.max {
                None => vec2(res.x + res.width, res.y + res.height),
                Some(m) => vec2(max(m.x, res.x + res.width), max(m.y, res.y + res.height)),
            });
        }

        self.last_rect = res;
        res
    }

    /// Opens a nested layout frame anchored at the next computed cell.
    pub fn begin_column(&mut self, style: &Style) {
        let body = self.next(style);
        self.push_layout(body, vec2(0, 0));
    }

    /// Closes the current column, merging its cursor and max extent back
    /// into the parent so the column contributes to the parent's row flow.
    pub fn end_column(&mut self) {
        let child = self.stack.pop().expect("cannot end a column without an active child layout");
        let parent = self.top_mut();

        parent.position.x = max(parent.position.x, child.position.x + child.body.x - parent.body.x);
        parent.next_row = max(parent.next_row, child.next_row + child.body.y - parent.body.y);

        match (&mut parent.max, child.max) {
            (_, None) => (),
            (None, Some(m)) => parent.max = Some(m),
            (Some(pm), Some(cm)) => {
                parent.max = Some(vec2(max(pm.x, cm.x), max(pm.y, cm.y)));
            }
        }
    }
}
