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
use crate::*;
use std::cmp::{max, min};

/// Central immediate-mode UI state machine.
///
/// Owns the frame command buffer, the retained container/treenode pools and
/// all transient per-frame stacks. The UI is described between [`Context::begin`]
/// and [`Context::end`]; afterwards [`Context::commands`] replays the frame's
/// draw commands in resolved z-order.
pub struct Context<T: TextMetrics> {
    pub(crate) metrics: T,
    /// Visual constants used by layout and drawing.
    pub style: Style,
    /// Raw input feed; fill it between frames via its mutators.
    pub input: Input,
    pub(crate) commands: CommandList,
    pub(crate) clip_stack: Vec<Recti>,
    pub(crate) idmngr: IdManager,
    pub(crate) layout: LayoutManager,
    pub(crate) hover: Option<Id>,
    pub(crate) focus: Option<Id>,
    pub(crate) updated_focus: bool,
    pub(crate) last_zindex: i32,
    pub(crate) frame: usize,
    pub(crate) hover_root: Option<usize>,
    pub(crate) next_hover_root: Option<usize>,
    pub(crate) scroll_target: Option<usize>,
    pub(crate) number_edit: Option<Id>,
    pub(crate) number_edit_buf: String,
    pub(crate) containers: Vec<Container>,
    pub(crate) container_pool: Pool,
    pub(crate) container_stack: Vec<usize>,
    pub(crate) root_list: Vec<usize>,
    pub(crate) treenode_pool: Pool,
}

impl<T: TextMetrics> Context<T> {
    /// Creates a context backed by the given text measurement hooks.
    pub fn new(metrics: T) -> Self {
        Self {
            metrics,
            style: Style::default(),
            input: Input::default(),
            commands: CommandList::new(),
            clip_stack: Vec::with_capacity(CLIP_STACK_SIZE),
            idmngr: IdManager::new(),
            layout: LayoutManager::default(),
            hover: None,
            focus: None,
            updated_focus: false,
            last_zindex: 0,
            frame: 0,
            hover_root: None,
            next_hover_root: None,
            scroll_target: None,
            number_edit: None,
            number_edit_buf: String::new(),
            containers: vec![Container::default(); CONTAINER_POOL_SIZE],
            container_pool: Pool::new(CONTAINER_POOL_SIZE),
            container_stack: Vec::with_capacity(CONTAINER_STACK_SIZE),
            root_list: Vec::with_capacity(ROOT_LIST_SIZE),
            treenode_pool: Pool::new(TREENODE_POOL_SIZE),
        }
    }

    pub(crate) fn clamp(x: i32, a: i32, b: i32) -> i32 { min(b, max(a, x)) }

    //
    // frame lifecycle
    //

    /// Starts a new frame, resetting the command buffer and promoting the
    /// hover root computed during the previous frame.
    pub fn begin(&mut self) {
        self.commands.clear();
        self.root_list.clear();
        self.scroll_target = None;
        self.hover_root = self.next_hover_root.take();
        self.input.prelude();
        self.frame += 1;
    }

    /// Finishes the frame: checks stack balance, applies wheel scrolling,
    /// garbage-collects focus, raises the clicked root and patches the
    /// command buffer jumps into ascending z-order.
    pub fn end(&mut self) {
        assert!(self.container_stack.is_empty(), "container stack not balanced at frame end");
        assert!(self.clip_stack.is_empty(), "clip stack not balanced at frame end");
        assert_eq!(self.idmngr.len(), 0, "id stack not balanced at frame end");
        assert!(self.layout.is_empty(), "layout stack not balanced at frame end");

        if let Some(idx) = self.scroll_target {
            let delta = self.input.scroll_delta();
            self.containers[idx].scroll.x += delta.x;
            self.containers[idx].scroll.y += delta.y;
        }

        // A focused widget that was not described this frame loses focus.
        if !self.updated_focus {
            self.focus = None;
        }
        self.updated_focus = false;

        if !self.input.mouse_pressed().is_none() {
            if let Some(idx) = self.next_hover_root {
                if self.containers[idx].zindex < self.last_zindex && self.containers[idx].zindex >= 0 {
                    self.bring_to_front(idx);
                }
            }
        }

        self.input.epilogue();

        // Splice the per-root command spans into ascending z-order by
        // patching the head/tail jumps recorded while the roots were open.
        let mut roots = std::mem::take(&mut self.root_list);
        roots.sort_by_key(|&idx| self.containers[idx].zindex);
        let buffer_end = self.commands.len();
        for (i, &idx) in roots.iter().enumerate() {
            let head = self.containers[idx].head.expect("root container has no head jump");
            if i == 0 {
                // The first recorded command is the first root's head jump.
                self.commands.set_jump_dst(0, head + 1);
            } else {
                let prev_tail = self.containers[roots[i - 1]].tail.expect("root container has no tail jump");
                self.commands.set_jump_dst(prev_tail, head + 1);
            }
            if i == roots.len() - 1 {
                let tail = self.containers[idx].tail.expect("root container has no tail jump");
                self.commands.set_jump_dst(tail, buffer_end);
            }
        }
        self.root_list = roots;
    }

    /// Runs `f` between [`Context::begin`] and [`Context::end`].
    pub fn frame<F: FnOnce(&mut Self)>(&mut self, f: F) {
        self.begin();
        f(self);
        self.end();
    }

    /// Returns the commands recorded by the last frame.
    pub fn commands(&self) -> &CommandList {
        &self.commands
    }

    //
    // id scoping
    //

    /// Hashes `name` against the current id scope.
    pub fn get_id(&mut self, name: &str) -> Id {
        self.idmngr.get_id_from_str(name)
    }

    /// Returns the most recently hashed id.
    pub fn last_id(&self) -> Option<Id> {
        self.idmngr.last_id()
    }

    /// Opens an id scope named `name`; ids hashed inside differ from the
    /// same labels hashed outside.
    pub fn push_id(&mut self, name: &str) {
        self.idmngr.push_id_from_str(name);
    }

    /// Closes the innermost id scope.
    pub fn pop_id(&mut self) {
        self.idmngr.pop_id();
    }

    //
    // hover / focus
    //

    /// Forces keyboard focus to `id` (or clears it with `None`).
    pub fn set_focus(&mut self, id: Option<Id>) {
        self.focus = id;
        self.updated_focus = true;
    }

    // Walk the container stack top-down: the pointer only reaches widgets
    // whose enclosing root is the hover root. Only roots set `head`.
    fn in_hover_root(&self) -> bool {
        for &idx in self.container_stack.iter().rev() {
            if Some(idx) == self.hover_root {
                return true;
            }
            if self.containers[idx].head.is_some() {
                break;
            }
        }
        false
    }

    /// Whether the pointer is over `rect`, unobstructed by the scissor and
    /// by higher root containers.
    pub fn mouse_over(&self, rect: Recti) -> bool {
        rect.contains(&self.input.mouse_pos())
            && self.get_clip_rect().contains(&self.input.mouse_pos())
            && self.in_hover_root()
    }

    /// Advances the hover/focus state machine for the widget `id` occupying
    /// `rect`. Every interactive widget calls this once per frame.
    pub fn update_control(&mut self, id: Id, rect: Recti, opt: WidgetOption) {
        let mouseover = self.mouse_over(rect);
        if self.focus == Some(id) {
            self.updated_focus = true;
        }
        if opt.is_not_interactive() {
            return;
        }
        if mouseover && self.input.mouse_down().is_none() {
            self.hover = Some(id);
        }
        if self.focus == Some(id) {
            if !self.input.mouse_pressed().is_none() && !mouseover {
                self.set_focus(None);
            }
            if self.input.mouse_down().is_none() && !opt.is_holding_focus() {
                self.set_focus(None);
            }
        }
        if self.hover == Some(id) {
            if !self.input.mouse_pressed().is_none() {
                self.set_focus(Some(id));
            } else if !mouseover {
                self.hover = None;
            }
        }
    }

    //
    // drawing
    //

    pub(crate) fn draw_ctx(&mut self) -> DrawCtx<'_> {
        DrawCtx::new(&mut self.commands, &mut self.clip_stack, &self.style, &self.metrics)
    }

    /// Pushes a clip rect intersected with the current one.
    pub fn push_clip_rect(&mut self, rect: Recti) {
        self.draw_ctx().push_clip_rect(rect);
    }

    /// Pops the last pushed clip rect.
    pub fn pop_clip_rect(&mut self) {
        self.draw_ctx().pop_clip_rect();
    }

    /// Returns the current clip rect.
    pub fn get_clip_rect(&self) -> Recti {
        self.clip_stack.last().copied().unwrap_or(UNCLIPPED_RECT)
    }

    /// Classifies `r` against the current clip rect.
    pub fn check_clip(&mut self, r: Recti) -> Clip {
        self.draw_ctx().check_clip(r)
    }

    /// Draws a filled rectangle, pre-clipped against the scissor.
    pub fn draw_rect(&mut self, rect: Recti, color: Color) {
        self.draw_ctx().draw_rect(rect, color);
    }

    /// Draws a one-pixel outline.
    pub fn draw_box(&mut self, r: Recti, color: Color) {
        self.draw_ctx().draw_box(r, color);
    }

    /// Draws a run of text at `pos`.
    pub fn draw_text(&mut self, font: FontId, text: &str, pos: Vec2i, color: Color) {
        self.draw_ctx().draw_text(font, text, pos, color);
    }

    /// Draws a built-in icon centered in `rect`.
    pub fn draw_icon(&mut self, id: Icon, rect: Recti, color: Color) {
        self.draw_ctx().draw_icon(id, rect, color);
    }

    /// Draws a themed frame rectangle with its border.
    pub fn draw_frame(&mut self, rect: Recti, colorid: ControlColor) {
        self.draw_ctx().draw_frame(rect, colorid);
    }

    /// Draws a widget frame, promoting `colorid` by the hover/focus state of `id`.
    pub fn draw_widget_frame(&mut self, id: Id, rect: Recti, colorid: ControlColor, opt: WidgetOption) {
        let focused = self.focus == Some(id);
        let hovered = self.hover == Some(id);
        self.draw_ctx().draw_widget_frame(focused, hovered, rect, colorid, opt);
    }

    /// Draws text aligned inside `rect` and clipped to it.
    pub fn draw_control_text(&mut self, text: &str, rect: Recti, colorid: ControlColor, opt: WidgetOption) {
        self.draw_ctx().draw_control_text(text, rect, colorid, opt);
    }

    //
    // layout
    //

    /// Starts a row with the given column width policies and row height.
    pub fn layout_row(&mut self, widths: &[SizePolicy], height: SizePolicy) {
        self.layout.row(widths, height);
    }

    /// Sets the fallback cell width for rows without explicit widths.
    pub fn layout_width(&mut self, width: SizePolicy) {
        self.layout.width(width);
    }

    /// Sets the height of subsequent cells.
    pub fn layout_height(&mut self, height: SizePolicy) {
        self.layout.height(height);
    }

    /// Computes the next layout cell in absolute coordinates.
    pub fn layout_next(&mut self) -> Recti {
        self.layout.next(&self.style)
    }

    /// Overrides the rect returned by the next [`Context::layout_next`] call.
    pub fn set_next_cell(&mut self, next: NextCell) {
        self.layout.set_next(next);
    }

    /// Returns the rect most recently produced by the layout.
    pub fn last_rect(&self) -> Recti {
        self.layout.last_rect()
    }

    /// Runs `f` inside a row with the given widths and height.
    pub fn with_row<F: FnOnce(&mut Self)>(&mut self, widths: &[SizePolicy], height: SizePolicy, f: F) {
        self.layout.row(widths, height);
        f(self);
    }

    /// Runs `f` inside a nested column anchored at the next cell.
    pub fn column<F: FnOnce(&mut Self)>(&mut self, f: F) {
        self.layout.begin_column(&self.style);
        f(self);
        self.layout.end_column();
    }

    //
    // containers
    //

    /// Raises the container above everything drawn so far.
    pub fn bring_to_front(&mut self, cnt_idx: usize) {
        self.last_zindex += 1;
        self.containers[cnt_idx].zindex = self.last_zindex;
    }

    fn get_container_index(&mut self, id: Id, opt: ContainerOption) -> Option<usize> {
        if let Some(idx) = self.container_pool.get(id) {
            if self.containers[idx].open || !opt.is_closed() {
                self.container_pool.update(idx, self.frame);
            }
            return Some(idx);
        }
        if opt.is_closed() {
            return None;
        }
        let idx = self.container_pool.init(id, self.frame);
        self.containers[idx] = Container::default();
        self.containers[idx].open = true;
        self.bring_to_front(idx);
        Some(idx)
    }

    /// Returns the pooled container slot for `name`, claiming one if needed.
    pub fn get_container(&mut self, name: &str) -> usize {
        let id = self.idmngr.get_id_from_str(name);
        self.get_container_index(id, ContainerOption::NONE)
            .expect("container lookup without CLOSED cannot fail")
    }

    /// Returns the container slot currently being described.
    pub fn get_current_container(&self) -> usize {
        *self.container_stack.last().expect("no container is open")
    }

    /// Borrows the container stored in `idx`.
    pub fn container(&self, idx: usize) -> &Container {
        &self.containers[idx]
    }

    /// Mutably borrows the container stored in `idx`.
    pub fn container_mut(&mut self, idx: usize) -> &mut Container {
        &mut self.containers[idx]
    }

    fn begin_root_container(&mut self, cnt_idx: usize) {
        assert!(self.container_stack.len() < CONTAINER_STACK_SIZE, "container stack overflow");
        self.container_stack.push(cnt_idx);
        assert!(self.root_list.len() < ROOT_LIST_SIZE, "too many root containers");
        self.root_list.push(cnt_idx);
        self.containers[cnt_idx].head = Some(self.commands.push_jump());

        // The topmost root under the pointer becomes next frame's hover root.
        if self.containers[cnt_idx].rect.contains(&self.input.mouse_pos())
            && self
                .next_hover_root
                .map_or(true, |h| self.containers[cnt_idx].zindex > self.containers[h].zindex)
        {
            self.next_hover_root = Some(cnt_idx);
        }

        // Root containers start unclipped; the window body clip comes later.
        assert!(self.clip_stack.len() < CLIP_STACK_SIZE, "clip stack overflow");
        self.clip_stack.push(UNCLIPPED_RECT);
    }

    fn end_root_container(&mut self) {
        let cnt_idx = self.get_current_container();
        self.containers[cnt_idx].tail = Some(self.commands.push_jump());
        self.pop_clip_rect();
        self.pop_container();
    }

    fn pop_container(&mut self) {
        let cnt_idx = self.get_current_container();
        let body = self.layout.current_body();
        self.containers[cnt_idx].content_size = match self.layout.current_max() {
            Some(m) => vec2(m.x - body.x, m.y - body.y),
            None => vec2(0, 0),
        };
        self.container_stack.pop();
        self.layout.pop();
        self.idmngr.pop_id();
    }

    fn scrollbars(&mut self, cnt_idx: usize, body: &mut Recti) {
        let sz = self.style.scrollbar_size;
        let thumb_size = self.style.thumb_size;
        let mut cs = self.containers[cnt_idx].content_size;
        cs.x += self.style.padding * 2;
        cs.y += self.style.padding * 2;
        self.push_clip_rect(*body);

        // Reserve space against last frame's body so both bars agree.
        if cs.y > self.containers[cnt_idx].body.height {
            body.width -= sz;
        }
        if cs.x > self.containers[cnt_idx].body.width {
            body.height -= sz;
        }
        let body = *body;

        let maxscroll_y = cs.y - body.height;
        if maxscroll_y > 0 && body.height > 0 {
            let id = self.idmngr.get_id_from_str("!scrollbary");
            let mut base = body;
            base.x = body.x + body.width;
            base.width = sz;
            self.update_control(id, base, WidgetOption::NONE);
            if self.focus == Some(id) && self.input.mouse_down().is_left() {
                self.containers[cnt_idx].scroll.y += self.input.mouse_delta().y * cs.y / base.height;
            }
            let scroll_y = Self::clamp(self.containers[cnt_idx].scroll.y, 0, maxscroll_y);
            self.containers[cnt_idx].scroll.y = scroll_y;

            self.draw_frame(base, ControlColor::ScrollBase);
            let mut thumb = base;
            thumb.height = max(thumb_size, base.height * body.height / cs.y);
            thumb.y += scroll_y * (base.height - thumb.height) / maxscroll_y;
            self.draw_frame(thumb, ControlColor::ScrollThumb);

            // Wheel deltas route to the container hovered at this point.
            if self.mouse_over(body) {
                self.scroll_target = Some(cnt_idx);
            }
        } else {
            self.containers[cnt_idx].scroll.y = 0;
        }

        let maxscroll_x = cs.x - body.width;
        if maxscroll_x > 0 && body.width > 0 {
            let id = self.idmngr.get_id_from_str("!scrollbarx");
            let mut base = body;
            base.y = body.y + body.height;
            base.height = sz;
            self.update_control(id, base, WidgetOption::NONE);
            if self.focus == Some(id) && self.input.mouse_down().is_left() {
                self.containers[cnt_idx].scroll.x += self.input.mouse_delta().x * cs.x / base.width;
            }
            let scroll_x = Self::clamp(self.containers[cnt_idx].scroll.x, 0, maxscroll_x);
            self.containers[cnt_idx].scroll.x = scroll_x;

            self.draw_frame(base, ControlColor::ScrollBase);
            let mut thumb = base;
            thumb.width = max(thumb_size, base.width * body.width / cs.x);
            thumb.x += scroll_x * (base.width - thumb.width) / maxscroll_x;
            self.draw_frame(thumb, ControlColor::ScrollThumb);

            if self.mouse_over(body) {
                self.scroll_target = Some(cnt_idx);
            }
        } else {
            self.containers[cnt_idx].scroll.x = 0;
        }

        self.pop_clip_rect();
    }

    fn push_container_body(&mut self, cnt_idx: usize, body: Recti, opt: ContainerOption) {
        let mut body = body;
        if !opt.has_no_scroll() {
            self.scrollbars(cnt_idx, &mut body);
        }
        let padding = self.style.padding;
        let scroll = self.containers[cnt_idx].scroll;
        self.layout.push_layout(expand_rect(body, -padding), scroll);
        self.containers[cnt_idx].body = body;
    }

    //
    // windows
    //

    /// Opens a window. Returns `false` when the window is closed, in which
    /// case the matching [`Context::end_window`] must be skipped.
    pub fn begin_window(&mut self, title: &str, initial_rect: Recti, opt: ContainerOption) -> bool {
        let id = self.idmngr.get_id_from_str(title);
        let cnt_idx = match self.get_container_index(id, opt) {
            Some(idx) => idx,
            None => return false,
        };
        if !self.containers[cnt_idx].open {
            return false;
        }
        self.idmngr.push_id(id);

        if self.containers[cnt_idx].rect.width == 0 {
            self.containers[cnt_idx].rect = initial_rect;
        }
        self.begin_root_container(cnt_idx);
        let outer = self.containers[cnt_idx].rect;
        let mut body = outer;

        if !opt.has_no_frame() {
            self.draw_frame(outer, ControlColor::WindowBG);
        }

        if !opt.has_no_title() {
            let mut tr = outer;
            tr.height = self.style.title_height;
            self.draw_frame(tr, ControlColor::TitleBG);

            // The title text doubles as the drag handle.
            {
                let id = self.idmngr.get_id_from_str("!title");
                self.update_control(id, tr, WidgetOption::NONE);
                self.draw_control_text(title, tr, ControlColor::TitleText, WidgetOption::NONE);
                if self.focus == Some(id) && self.input.mouse_down().is_left() {
                    let delta = self.input.mouse_delta();
                    self.containers[cnt_idx].rect.x += delta.x;
                    self.containers[cnt_idx].rect.y += delta.y;
                }
                body.y += tr.height;
                body.height -= tr.height;
            }

            if !opt.has_no_close() {
                let id = self.idmngr.get_id_from_str("!close");
                let r = rect(tr.x + tr.width - tr.height, tr.y, tr.height, tr.height);
                let color = self.style.colors[ControlColor::TitleText as usize];
                self.draw_icon(Icon::Close, r, color);
                self.update_control(id, r, WidgetOption::NONE);
                if self.input.mouse_pressed().is_left() && self.focus == Some(id) {
                    self.containers[cnt_idx].open = false;
                }
            }
        }

        self.push_container_body(cnt_idx, body, opt);

        if !opt.is_fixed() {
            let sz = self.style.title_height;
            let id = self.idmngr.get_id_from_str("!resize");
            let r = rect(outer.x + outer.width - sz, outer.y + outer.height - sz, sz, sz);
            self.update_control(id, r, WidgetOption::NONE);
            if self.focus == Some(id) && self.input.mouse_down().is_left() {
                let delta = self.input.mouse_delta();
                let cnt = &mut self.containers[cnt_idx];
                cnt.rect.width = max(96, cnt.rect.width + delta.x);
                cnt.rect.height = max(64, cnt.rect.height + delta.y);
            }
        }

        if opt.is_auto_sizing() {
            let layout_body = self.layout.current_body();
            let cnt = &mut self.containers[cnt_idx];
            cnt.rect.width = cnt.content_size.x + (cnt.rect.width - layout_body.width);
            cnt.rect.height = cnt.content_size.y + (cnt.rect.height - layout_body.height);
        }

        // A popup closes as soon as the pointer presses somewhere else.
        if opt.is_popup() && !self.input.mouse_pressed().is_none() && self.hover_root != Some(cnt_idx) {
            self.containers[cnt_idx].open = false;
        }

        let clip = self.containers[cnt_idx].body;
        self.push_clip_rect(clip);
        true
    }

    /// Closes the window opened by the last successful [`Context::begin_window`].
    pub fn end_window(&mut self) {
        self.pop_clip_rect();
        self.end_root_container();
    }

    /// Runs `f` inside the window when it is open.
    pub fn window<F: FnOnce(&mut Self)>(&mut self, title: &str, initial_rect: Recti, opt: ContainerOption, f: F) {
        if self.begin_window(title, initial_rect, opt) {
            f(self);
            self.end_window();
        }
    }

    //
    // popups
    //

    /// Opens the popup `name` at the current pointer position.
    pub fn open_popup(&mut self, name: &str) {
        let id = self.idmngr.get_id_from_str(name);
        let cnt_idx = self
            .get_container_index(id, ContainerOption::NONE)
            .expect("container lookup without CLOSED cannot fail");
        // Hovering the popup immediately keeps the first click from closing it.
        self.hover_root = Some(cnt_idx);
        self.next_hover_root = Some(cnt_idx);
        let pos = self.input.mouse_pos();
        self.containers[cnt_idx].rect = rect(pos.x, pos.y, 1, 1);
        self.containers[cnt_idx].open = true;
        self.bring_to_front(cnt_idx);
    }

    /// Opens the popup container `name` for this frame. Returns `false`
    /// until [`Context::open_popup`] has been called.
    pub fn begin_popup(&mut self, name: &str) -> bool {
        let opt = ContainerOption::POPUP
            | ContainerOption::AUTO_SIZE
            | ContainerOption::NO_RESIZE
            | ContainerOption::NO_SCROLL
            | ContainerOption::NO_TITLE
            | ContainerOption::CLOSED;
        self.begin_window(name, rect(0, 0, 0, 0), opt)
    }

    /// Closes the popup opened by the last successful [`Context::begin_popup`].
    pub fn end_popup(&mut self) {
        self.end_window();
    }

    /// Runs `f` inside the popup while it is open.
    pub fn popup<F: FnOnce(&mut Self)>(&mut self, name: &str, f: F) {
        if self.begin_popup(name) {
            f(self);
            self.end_popup();
        }
    }

    //
    // panels
    //

    /// Opens an embedded panel occupying the next layout cell.
    pub fn begin_panel(&mut self, name: &str, opt: ContainerOption) {
        self.idmngr.push_id_from_str(name);
        let id = self.idmngr.last_id().expect("panel name was just hashed");
        let cnt_idx = self
            .get_container_index(id, opt)
            .expect("panels never pass CLOSED");
        let r = self.layout.next(&self.style);
        self.containers[cnt_idx].rect = r;
        if !opt.has_no_frame() {
            self.draw_frame(r, ControlColor::PanelBG);
        }
        assert!(self.container_stack.len() < CONTAINER_STACK_SIZE, "container stack overflow");
        self.container_stack.push(cnt_idx);
        self.push_container_body(cnt_idx, r, opt);
        let clip = self.containers[cnt_idx].body;
        self.push_clip_rect(clip);
    }

    /// Closes the innermost panel.
    pub fn end_panel(&mut self) {
        self.pop_clip_rect();
        self.pop_container();
    }

    /// Runs `f` inside a panel occupying the next layout cell.
    pub fn panel<F: FnOnce(&mut Self)>(&mut self, name: &str, opt: ContainerOption, f: F) {
        self.begin_panel(name, opt);
        f(self);
        self.end_panel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestMetrics;

    impl TextMetrics for TestMetrics {
        fn text_width(&self, _font: FontId, text: &str) -> i32 {
            text.chars().count() as i32 * 8
        }
        fn text_height(&self, _font: FontId) -> i32 {
            10
        }
    }

    fn test_ctx() -> Context<TestMetrics> {
        Context::new(TestMetrics)
    }

    fn window_bg_xs(ctx: &Context<TestMetrics>) -> Vec<i32> {
        let bg = ctx.style.colors[ControlColor::WindowBG as usize];
        ctx.commands()
            .iter()
            .filter_map(|cmd| match cmd {
                Command::Rect { rect, color } if *color == bg => Some(rect.x),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn window_emits_frame_title_and_close_icon() {
        let mut ctx = test_ctx();
        ctx.frame(|ctx| {
            ctx.window("Demo", rect(10, 10, 200, 150), ContainerOption::NONE, |_| {});
        });

        let mut saw_title = false;
        let mut saw_close = false;
        let mut first_rect = None;
        for cmd in ctx.commands().iter() {
            match cmd {
                Command::Rect { rect, color } => {
                    if first_rect.is_none() {
                        first_rect = Some((rect.x, rect.y, rect.width, rect.height, *color));
                    }
                }
                Command::Text { text, .. } if text.as_str() == "Demo" => saw_title = true,
                Command::Icon { id: Icon::Close, .. } => saw_close = true,
                _ => (),
            }
        }
        let bg = ctx.style.colors[ControlColor::WindowBG as usize];
        assert_eq!(first_rect, Some((10, 10, 200, 150, bg)));
        assert!(saw_title);
        assert!(saw_close);
    }

    fn replayed(ctx: &Context<TestMetrics>) -> Vec<(u32, i32, i32)> {
        ctx.commands()
            .iter()
            .map(|cmd| match cmd {
                Command::Clip { rect } => (0, rect.x, rect.y),
                Command::Rect { rect, .. } => (1, rect.x, rect.y),
                Command::Text { pos, .. } => (2, pos.x, pos.y),
                Command::Icon { rect, .. } => (3, rect.x, rect.y),
                Command::Jump { .. } => unreachable!("jumps are consumed by iteration"),
            })
            .collect()
    }

    #[test]
    fn repeated_end_leaves_order_and_commands_unchanged() {
        let mut ctx = test_ctx();
        ctx.frame(|ctx| {
            ctx.window("A", rect(0, 0, 100, 100), ContainerOption::NONE, |_| {});
            ctx.window("B", rect(50, 50, 100, 100), ContainerOption::NONE, |_| {});
        });
        let stream = replayed(&ctx);
        let a = ctx.get_container("A");
        let b = ctx.get_container("B");
        let zindexes = (ctx.container(a).zindex, ctx.container(b).zindex);

        // The stacks are already empty, so a stray second end() must resort
        // and re-patch over unchanged state without moving anything.
        ctx.end();
        assert_eq!(replayed(&ctx), stream);
        assert_eq!((ctx.container(a).zindex, ctx.container(b).zindex), zindexes);
    }

    #[test]
    #[should_panic(expected = "container stack")]
    fn unbalanced_window_is_fatal() {
        let mut ctx = test_ctx();
        ctx.begin();
        assert!(ctx.begin_window("w", rect(0, 0, 100, 100), ContainerOption::NONE));
        ctx.end();
    }

    #[test]
    fn click_raises_window_and_reorders_draws() {
        let mut ctx = test_ctx();
        let build = |ctx: &mut Context<TestMetrics>| {
            ctx.window("A", rect(0, 0, 100, 100), ContainerOption::NONE, |_| {});
            ctx.window("B", rect(50, 50, 100, 100), ContainerOption::NONE, |_| {});
        };

        ctx.frame(build);
        let a = ctx.get_container("A");
        let b = ctx.get_container("B");
        assert!(ctx.container(b).zindex > ctx.container(a).zindex);
        assert_eq!(window_bg_xs(&ctx), vec![0, 50]);

        // Hover A, then press; the raise happens at frame end.
        ctx.input.mousemove(25, 25);
        ctx.frame(build);
        ctx.input.mousedown(25, 25, MouseButton::LEFT);
        ctx.frame(build);
        assert!(ctx.container(a).zindex > ctx.container(b).zindex);

        ctx.input.mouseup(25, 25, MouseButton::LEFT);
        ctx.frame(build);
        assert_eq!(window_bg_xs(&ctx), vec![50, 0]);
    }

    #[test]
    fn popup_closes_on_outside_press() {
        let mut ctx = test_ctx();
        let build = |ctx: &mut Context<TestMetrics>| {
            ctx.window("main", rect(0, 0, 200, 200), ContainerOption::NONE, |_| {});
            ctx.popup("pop", |ctx| {
                let _ = ctx.layout_next();
            });
        };

        ctx.input.mousemove(150, 150);
        ctx.frame(|ctx| {
            ctx.window("main", rect(0, 0, 200, 200), ContainerOption::NONE, |_| {});
            ctx.open_popup("pop");
            ctx.popup("pop", |ctx| {
                let _ = ctx.layout_next();
            });
        });
        let pop = ctx.get_container("pop");
        assert!(ctx.container(pop).open);
        assert_eq!(ctx.container(pop).rect.x, 150);

        // Move away so the hover root shifts to the main window, then press.
        ctx.input.mousemove(10, 10);
        ctx.frame(build);
        ctx.input.mousedown(10, 10, MouseButton::LEFT);
        ctx.frame(build);
        assert!(!ctx.container(pop).open);
    }

    #[test]
    fn close_button_closes_the_window() {
        let mut ctx = test_ctx();
        let build = |ctx: &mut Context<TestMetrics>| {
            ctx.window("w", rect(0, 0, 100, 100), ContainerOption::NONE, |_| {});
        };
        ctx.frame(build);
        // Close box sits at the right end of the 24px title bar.
        ctx.input.mousemove(90, 10);
        ctx.frame(build);
        ctx.input.mousedown(90, 10, MouseButton::LEFT);
        ctx.frame(build);
        let w = ctx.get_container("w");
        assert!(!ctx.container(w).open);
    }

    #[test]
    fn wheel_scrolls_hovered_container() {
        let mut ctx = test_ctx();
        let build = |ctx: &mut Context<TestMetrics>| {
            ctx.window("w", rect(0, 0, 100, 100), ContainerOption::NONE, |ctx| {
                for _ in 0..10 {
                    ctx.with_row(&[SizePolicy::Remainder(0)], SizePolicy::Fixed(30), |ctx| {
                        let _ = ctx.layout_next();
                    });
                }
            });
        };

        // First frame records content size; second frame grows scrollbars.
        ctx.frame(build);
        ctx.input.mousemove(50, 50);
        ctx.frame(build);
        ctx.input.scroll(0, 20);
        ctx.frame(build);
        let w = ctx.get_container("w");
        assert_eq!(ctx.container(w).scroll.y, 20);
        assert!(ctx.container(w).content_size.y > ctx.container(w).body.height);
    }

    #[test]
    fn title_drag_moves_the_window() {
        let mut ctx = test_ctx();
        let build = |ctx: &mut Context<TestMetrics>| {
            ctx.window("w", rect(0, 0, 100, 100), ContainerOption::NONE, |_| {});
        };
        ctx.frame(build);
        ctx.input.mousemove(30, 10);
        ctx.frame(build);
        ctx.input.mousedown(30, 10, MouseButton::LEFT);
        ctx.frame(build);
        ctx.input.mousemove(50, 25);
        ctx.frame(build);
        let w = ctx.get_container("w");
        assert_eq!((ctx.container(w).rect.x, ctx.container(w).rect.y), (20, 15));
    }

    #[test]
    fn auto_size_window_adopts_content_extent() {
        let mut ctx = test_ctx();
        let opt = ContainerOption::AUTO_SIZE | ContainerOption::NO_SCROLL | ContainerOption::NO_RESIZE;
        let build = |ctx: &mut Context<TestMetrics>| {
            ctx.window("auto", rect(0, 0, 300, 300), opt, |ctx| {
                ctx.with_row(&[SizePolicy::Fixed(80)], SizePolicy::Fixed(40), |ctx| {
                    let _ = ctx.layout_next();
                });
            });
        };
        ctx.frame(build);
        ctx.frame(build);
        let w = ctx.get_container("auto");
        // Body padding and the title bar wrap the lone 80x40 cell.
        let pad = ctx.style.padding * 2;
        assert_eq!(ctx.container(w).rect.width, 80 + pad);
        assert_eq!(ctx.container(w).rect.height, 40 + pad + ctx.style.title_height);
    }

    #[test]
    fn container_pool_recycles_least_recently_used_slot() {
        let mut ctx = test_ctx();
        let names_a: Vec<String> = (0..24).map(|i| format!("a{}", i)).collect();
        let names_b: Vec<String> = (0..24).map(|i| format!("b{}", i)).collect();

        ctx.frame(|ctx| {
            for name in &names_a {
                ctx.window(name, rect(0, 0, 50, 50), ContainerOption::NONE, |_| {});
            }
        });
        ctx.frame(|ctx| {
            for name in &names_b {
                ctx.window(name, rect(0, 0, 50, 50), ContainerOption::NONE, |_| {});
            }
        });
        // Pool is full; touching the b-windows again and adding one more
        // window must evict one of the stale a-windows.
        ctx.frame(|ctx| {
            for name in &names_b {
                ctx.window(name, rect(0, 0, 50, 50), ContainerOption::NONE, |_| {});
            }
            ctx.window("extra", rect(0, 0, 50, 50), ContainerOption::NONE, |_| {});
        });

        let evicted = names_a
            .iter()
            .filter(|name| {
                let id = ctx.idmngr.get_id_from_str(name);
                ctx.container_pool.get(id).is_none()
            })
            .count();
        assert_eq!(evicted, 1);
        let extra = ctx.idmngr.get_id_from_str("extra");
        assert!(ctx.container_pool.get(extra).is_some());
    }

    #[test]
    fn panel_clips_content_to_its_body() {
        let mut ctx = test_ctx();
        ctx.frame(|ctx| {
            ctx.window("w", rect(0, 0, 200, 200), ContainerOption::NONE, |ctx| {
                ctx.with_row(&[SizePolicy::Fixed(100)], SizePolicy::Fixed(60), |ctx| {
                    ctx.panel("p", ContainerOption::NO_SCROLL, |ctx| {
                        // A cell wider than the panel must be cut by the clip.
                        ctx.set_next_cell(NextCell::Relative(rect(0, 0, 500, 20)));
                        let r = ctx.layout_next();
                        let color = ctx.style.colors[ControlColor::Text as usize];
                        ctx.draw_rect(r, color);
                    });
                });
            });
        });

        let text_color = ctx.style.colors[ControlColor::Text as usize];
        for cmd in ctx.commands().iter() {
            if let Command::Rect { rect, color } = cmd {
                if *color == text_color {
                    assert!(rect.x + rect.width <= 105, "rect leaked outside the panel body");
                }
            }
        }
    }
}
