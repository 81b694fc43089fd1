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
use std::cmp::min;

impl<T: TextMetrics> Context<T> {
    /// Draws a word-wrapped block of text occupying its own column.
    pub fn text(&mut self, text: &str) {
        let font = self.style.font;
        let color = self.style.colors[ControlColor::Text as usize];
        let height = self.metrics.text_height(font);
        self.layout.begin_column(&self.style);
        self.layout.row(&[SizePolicy::Remainder(0)], SizePolicy::Fixed(height));
        for paragraph in text.lines() {
            let mut r = self.layout.next(&self.style);
            let mut line = String::new();
            for word in paragraph.split_inclusive(' ') {
                let joined = self.metrics.text_width(font, &line) + self.metrics.text_width(font, word);
                if joined > r.width && !line.is_empty() {
                    self.draw_text(font, line.trim_end(), vec2(r.x, r.y), color);
                    r = self.layout.next(&self.style);
                    line.clear();
                }
                line.push_str(word);
            }
            self.draw_text(font, line.trim_end(), vec2(r.x, r.y), color);
        }
        self.layout.end_column();
    }

    /// Draws a single line of text in the next layout cell.
    pub fn label(&mut self, text: &str) {
        let r = self.layout_next();
        self.draw_control_text(text, r, ControlColor::Text, WidgetOption::NONE);
    }

    /// Button with an optional icon; reports `SUBMIT` on click.
    pub fn button_ex(&mut self, label: &str, icon: Option<Icon>, opt: WidgetOption) -> ResourceState {
        let mut res = ResourceState::NONE;
        let id = if !label.is_empty() {
            self.idmngr.get_id_from_str(label)
        } else {
            match icon {
                Some(icon) => self.idmngr.get_id_u32(icon as u32),
                None => self.idmngr.get_id_u32(0),
            }
        };
        let r = self.layout_next();
        self.update_control(id, r, opt);
        if self.input.mouse_pressed().is_left() && self.focus == Some(id) {
            res |= ResourceState::SUBMIT;
        }
        self.draw_widget_frame(id, r, ControlColor::Button, opt);
        if !label.is_empty() {
            self.draw_control_text(label, r, ControlColor::Text, opt);
        }
        if let Some(icon) = icon {
            let color = self.style.colors[ControlColor::Text as usize];
            self.draw_icon(icon, r, color);
        }
        res
    }

    /// Centered text button.
    pub fn button(&mut self, label: &str) -> ResourceState {
        self.button_ex(label, None, WidgetOption::ALIGN_CENTER)
    }

    /// Checkbox bound to `state`; reports `CHANGE` on toggle.
    pub fn checkbox(&mut self, label: &str, state: &mut bool) -> ResourceState {
        let mut res = ResourceState::NONE;
        let id = self.idmngr.get_id_from_ptr(state);
        let r = self.layout_next();
        let box_r = rect(r.x, r.y, r.height, r.height);
        self.update_control(id, r, WidgetOption::NONE);
        if self.input.mouse_pressed().is_left() && self.focus == Some(id) {
            res |= ResourceState::CHANGE;
            *state = !*state;
        }
        self.draw_widget_frame(id, box_r, ControlColor::Base, WidgetOption::NONE);
        if *state {
            let color = self.style.colors[ControlColor::Text as usize];
            self.draw_icon(Icon::Check, box_r, color);
        }
        let text_r = rect(r.x + box_r.width, r.y, r.width - box_r.width, r.height);
        self.draw_control_text(label, text_r, ControlColor::Text, WidgetOption::NONE);
        res
    }

    /// Text editing core shared by [`Context::textbox_ex`] and number editing.
    ///
    /// Holds focus while active; appends frame text input, handles backspace
    /// on whole characters and submits on Return.
    pub fn textbox_raw(&mut self, buf: &mut String, id: Id, r: Recti, opt: WidgetOption) -> ResourceState {
        let mut res = ResourceState::NONE;
        self.update_control(id, r, opt | WidgetOption::HOLD_FOCUS);

        if self.focus == Some(id) {
            if !self.input.text_input().is_empty() {
                buf.push_str(self.input.text_input());
                res |= ResourceState::CHANGE;
            }
            if self.input.key_pressed().is_backspace() && buf.pop().is_some() {
                res |= ResourceState::CHANGE;
            }
            if self.input.key_pressed().is_return() {
                self.set_focus(None);
                res |= ResourceState::SUBMIT;
            }
        }

        self.draw_widget_frame(id, r, ControlColor::Base, opt);
        if self.focus == Some(id) {
            let color = self.style.colors[ControlColor::Text as usize];
            let font = self.style.font;
            let textw = self.metrics.text_width(font, buf);
            let texth = self.metrics.text_height(font);
            let padding = self.style.padding;
            // Keep the caret end of the text visible when it overflows.
            let ofx = r.width - padding - textw - 1;
            let textx = r.x + min(ofx, padding);
            let texty = r.y + (r.height - texth) / 2;
            self.push_clip_rect(r);
            self.draw_text(font, buf, vec2(textx, texty), color);
            self.draw_rect(rect(textx + textw, texty, 1, texth), color);
            self.pop_clip_rect();
        } else {
            self.draw_control_text(buf, r, ControlColor::Text, opt);
        }
        res
    }

    /// Single-line text box bound to `buf`.
    pub fn textbox_ex(&mut self, buf: &mut String, opt: WidgetOption) -> ResourceState {
        let id = self.idmngr.get_id_from_ptr(buf);
        let r = self.layout_next();
        self.textbox_raw(buf, id, r, opt)
    }

    /// Single-line text box with default options.
    pub fn textbox(&mut self, buf: &mut String) -> ResourceState {
        self.textbox_ex(buf, WidgetOption::NONE)
    }

    // Shift-click turns a slider/number into a temporary textbox. Returns
    // true while the textbox owns the widget for this frame.
    fn number_textbox(&mut self, precision: usize, value: &mut Real, r: Recti, id: Id) -> bool {
        if self.input.mouse_pressed().is_left() && self.input.key_state().is_shift() && self.hover == Some(id) {
            self.number_edit = Some(id);
            self.number_edit_buf = format!("{:.*}", precision, value);
        }
        if self.number_edit == Some(id) {
            let mut buf = std::mem::take(&mut self.number_edit_buf);
            let res = self.textbox_raw(&mut buf, id, r, WidgetOption::NONE);
            self.number_edit_buf = buf;
            if res.is_submitted() || self.focus != Some(id) {
                // Malformed input leaves the previous value untouched.
                if let Ok(parsed) = self.number_edit_buf.parse::<Real>() {
                    *value = parsed;
                }
                self.number_edit = None;
            } else {
                return true;
            }
        }
        false
    }

    /// Horizontal slider over `[low, high]`; reports `CHANGE` when dragged.
    pub fn slider_ex(
        &mut self,
        value: &mut Real,
        low: Real,
        high: Real,
        step: Real,
        precision: usize,
        opt: WidgetOption,
    ) -> ResourceState {
        let mut res = ResourceState::NONE;
        let last = *value;
        let mut v = last;
        let id = self.idmngr.get_id_from_ptr(value);
        let base = self.layout_next();

        if self.number_textbox(precision, &mut v, base, id) {
            *value = v;
            return res;
        }

        self.update_control(id, base, opt);
        if self.focus == Some(id) && (self.input.mouse_down().is_left() || self.input.mouse_pressed().is_left()) {
            let range = high - low;
            // Degenerate range pins the slider to its lower bound.
            v = if base.width > 0 && range != 0.0 {
                low + (self.input.mouse_pos().x - base.x) as Real * range / base.width as Real
            } else {
                low
            };
            if step != 0.0 {
                v = (((v + step / 2.0) / step) as i64) as Real * step;
            }
        }
        v = v.clamp(low, high);
        *value = v;
        if last != v {
            res |= ResourceState::CHANGE;
        }

        self.draw_widget_frame(id, base, ControlColor::Base, opt);
        let range = high - low;
        let w = self.style.thumb_size;
        let x = if range != 0.0 {
            ((v - low) * (base.width - w) as Real / range) as i32
        } else {
            0
        };
        let thumb = rect(base.x + x, base.y, w, base.height);
        self.draw_widget_frame(id, thumb, ControlColor::Button, opt);
        let text = format!("{:.*}", precision, v);
        self.draw_control_text(&text, base, ControlColor::Text, opt);
        res
    }

    /// Slider with free movement and two decimals.
    pub fn slider(&mut self, value: &mut Real, low: Real, high: Real) -> ResourceState {
        self.slider_ex(value, low, high, 0.0, 2, WidgetOption::ALIGN_CENTER)
    }

    /// Number field changed by horizontal dragging; `step` scales the drag.
    pub fn number_ex(&mut self, value: &mut Real, step: Real, precision: usize, opt: WidgetOption) -> ResourceState {
        let mut res = ResourceState::NONE;
        let id = self.idmngr.get_id_from_ptr(value);
        let base = self.layout_next();
        let last = *value;

        if self.number_textbox(precision, value, base, id) {
            return res;
        }

        self.update_control(id, base, opt);
        if self.focus == Some(id) && self.input.mouse_down().is_left() {
            *value += self.input.mouse_delta().x as Real * step;
        }
        if *value != last {
            res |= ResourceState::CHANGE;
        }

        self.draw_widget_frame(id, base, ControlColor::Base, opt);
        let text = format!("{:.*}", precision, value);
        self.draw_control_text(&text, base, ControlColor::Text, opt);
        res
    }

    /// Number field with two decimals.
    pub fn number(&mut self, value: &mut Real, step: Real) -> ResourceState {
        self.number_ex(value, step, 2, WidgetOption::ALIGN_CENTER)
    }

    fn header_internal(&mut self, label: &str, is_treenode: bool, opt: WidgetOption) -> ResourceState {
        let id = self.idmngr.get_id_from_str(label);
        let idx = self.treenode_pool.get(id);
        self.layout.row(&[SizePolicy::Remainder(0)], SizePolicy::Auto);

        // A pool entry marks deviation from the default state, so EXPANDED
        // headers stay open until clicked shut.
        let mut active = idx.is_some();
        let expanded = if opt.is_expanded() { !active } else { active };
        let mut r = self.layout_next();
        self.update_control(id, r, WidgetOption::NONE);

        active ^= self.input.mouse_pressed().is_left() && self.focus == Some(id);
        match idx {
            Some(slot) => {
                if active {
                    self.treenode_pool.update(slot, self.frame);
                } else {
                    self.treenode_pool.clear(slot);
                }
            }
            None => {
                if active {
                    self.treenode_pool.init(id, self.frame);
                }
            }
        }

        if is_treenode {
            if self.hover == Some(id) {
                self.draw_frame(r, ControlColor::ButtonHover);
            }
        } else {
            self.draw_widget_frame(id, r, ControlColor::Button, WidgetOption::NONE);
        }
        let color = self.style.colors[ControlColor::Text as usize];
        self.draw_icon(
            if expanded { Icon::Expanded } else { Icon::Collapsed },
            rect(r.x, r.y, r.height, r.height),
            color,
        );
        r.x += r.height - self.style.padding;
        r.width -= r.height - self.style.padding;
        self.draw_control_text(label, r, ControlColor::Text, WidgetOption::NONE);

        if expanded { ResourceState::ACTIVE } else { ResourceState::NONE }
    }

    /// Collapsible full-width header; reports `ACTIVE` while expanded.
    pub fn header(&mut self, label: &str, opt: WidgetOption) -> ResourceState {
        self.header_internal(label, false, opt)
    }

    /// Opens a tree node row. While expanded, content is indented and the
    /// node's label scopes child ids.
    pub fn begin_treenode(&mut self, label: &str, opt: WidgetOption) -> ResourceState {
        let res = self.header_internal(label, true, opt);
        if res.is_active() {
            self.layout.adjust_indent(self.style.indent);
            let id = self.idmngr.last_id().expect("header always hashes an id");
            self.idmngr.push_id(id);
        }
        res
    }

    /// Closes an expanded tree node.
    pub fn end_treenode(&mut self) {
        self.layout.adjust_indent(-self.style.indent);
        self.idmngr.pop_id();
    }

    /// Runs `f` inside the tree node while it is expanded.
    pub fn treenode<F: FnOnce(&mut Self)>(&mut self, label: &str, opt: WidgetOption, f: F) -> ResourceState {
        let res = self.begin_treenode(label, opt);
        if res.is_active() {
            f(self);
            self.end_treenode();
        }
        res
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

    // The first default cell of a window at (0, 0): body starts below the
    // 24px title bar with a 5px padding ring.
    const CELL: Recti = Recti { x: 5, y: 29, width: 78, height: 20 };

    fn button_frame(ctx: &mut Context<TestMetrics>) -> ResourceState {
        let mut res = ResourceState::NONE;
        ctx.frame(|ctx| {
            ctx.window("w", rect(0, 0, 300, 200), ContainerOption::NONE, |ctx| {
                res = ctx.button("Ok");
            });
        });
        res
    }

    #[test]
    fn button_submits_on_press() {
        let mut ctx = test_ctx();
        assert!(button_frame(&mut ctx).is_none());

        ctx.input.mousemove(CELL.x + 5, CELL.y + 5);
        assert!(button_frame(&mut ctx).is_none());

        ctx.input.mousedown(CELL.x + 5, CELL.y + 5, MouseButton::LEFT);
        assert!(button_frame(&mut ctx).is_submitted());

        ctx.input.mouseup(CELL.x + 5, CELL.y + 5, MouseButton::LEFT);
        assert!(button_frame(&mut ctx).is_none());
    }

    #[test]
    fn press_outside_the_button_does_not_submit() {
        let mut ctx = test_ctx();
        let _ = button_frame(&mut ctx);
        ctx.input.mousemove(250, 150);
        let _ = button_frame(&mut ctx);
        ctx.input.mousedown(250, 150, MouseButton::LEFT);
        assert!(button_frame(&mut ctx).is_none());
    }

    #[test]
    fn checkbox_toggles_on_click() {
        let mut ctx = test_ctx();
        let mut checked = false;
        let drive = |ctx: &mut Context<TestMetrics>, checked: &mut bool| {
            let mut res = ResourceState::NONE;
            ctx.frame(|ctx| {
                ctx.window("w", rect(0, 0, 300, 200), ContainerOption::NONE, |ctx| {
                    res = ctx.checkbox("opt", checked);
                });
            });
            res
        };

        let _ = drive(&mut ctx, &mut checked);
        ctx.input.mousemove(CELL.x + 5, CELL.y + 5);
        let _ = drive(&mut ctx, &mut checked);
        ctx.input.mousedown(CELL.x + 5, CELL.y + 5, MouseButton::LEFT);
        let res = drive(&mut ctx, &mut checked);
        assert!(res.is_changed());
        assert!(checked);

        ctx.input.mouseup(CELL.x + 5, CELL.y + 5, MouseButton::LEFT);
        let res = drive(&mut ctx, &mut checked);
        assert!(res.is_none());
        assert!(checked);
    }

    #[test]
    fn slider_follows_the_pointer() {
        let mut ctx = test_ctx();
        let mut v: Real = 2.0;
        let drive = |ctx: &mut Context<TestMetrics>, v: &mut Real| {
            let mut res = ResourceState::NONE;
            ctx.frame(|ctx| {
                ctx.window("w", rect(0, 0, 300, 200), ContainerOption::NONE, |ctx| {
                    res = ctx.slider(v, 0.0, 10.0);
                });
            });
            res
        };

        let _ = drive(&mut ctx, &mut v);
        // x = 44 is 39px into the 78px track: exactly the midpoint value.
        ctx.input.mousemove(44, CELL.y + 5);
        let _ = drive(&mut ctx, &mut v);
        ctx.input.mousedown(44, CELL.y + 5, MouseButton::LEFT);
        let res = drive(&mut ctx, &mut v);
        assert!(res.is_changed());
        assert!((v - 5.0).abs() < 1e-4);
    }

    #[test]
    fn zero_range_slider_stays_at_its_bound() {
        let mut ctx = test_ctx();
        let mut v: Real = 3.0;
        let drive = |ctx: &mut Context<TestMetrics>, v: &mut Real| {
            let mut res = ResourceState::NONE;
            ctx.frame(|ctx| {
                ctx.window("w", rect(0, 0, 300, 200), ContainerOption::NONE, |ctx| {
                    res = ctx.slider(v, 3.0, 3.0);
                });
            });
            res
        };

        let _ = drive(&mut ctx, &mut v);
        ctx.input.mousemove(CELL.x + 30, CELL.y + 5);
        let _ = drive(&mut ctx, &mut v);
        ctx.input.mousedown(CELL.x + 30, CELL.y + 5, MouseButton::LEFT);
        let res = drive(&mut ctx, &mut v);
        assert!(res.is_none());
        assert_eq!(v, 3.0);
    }

    #[test]
    fn textbox_edits_and_submits() {
        let mut ctx = test_ctx();
        let mut buf = String::new();
        let drive = |ctx: &mut Context<TestMetrics>, buf: &mut String| {
            let mut res = ResourceState::NONE;
            ctx.frame(|ctx| {
                ctx.window("w", rect(0, 0, 300, 200), ContainerOption::NONE, |ctx| {
                    res = ctx.textbox(buf);
                });
            });
            res
        };

        let _ = drive(&mut ctx, &mut buf);
        ctx.input.mousemove(CELL.x + 5, CELL.y + 5);
        let _ = drive(&mut ctx, &mut buf);
        ctx.input.mousedown(CELL.x + 5, CELL.y + 5, MouseButton::LEFT);
        let _ = drive(&mut ctx, &mut buf);
        ctx.input.mouseup(CELL.x + 5, CELL.y + 5, MouseButton::LEFT);

        ctx.input.text("héllo");
        let res = drive(&mut ctx, &mut buf);
        assert!(res.is_changed());
        assert_eq!(buf, "héllo");

        // Backspace removes one character, not one byte.
        ctx.input.keydown(KeyMode::BACKSPACE);
        let res = drive(&mut ctx, &mut buf);
        assert!(res.is_changed());
        assert_eq!(buf, "héll");
        ctx.input.keyup(KeyMode::BACKSPACE);

        ctx.input.keydown(KeyMode::RETURN);
        let res = drive(&mut ctx, &mut buf);
        assert!(res.is_submitted());
        ctx.input.keyup(KeyMode::RETURN);

        // Focus was released; further typing is ignored.
        ctx.input.text("x");
        let res = drive(&mut ctx, &mut buf);
        assert!(res.is_none());
        assert_eq!(buf, "héll");
    }

    #[test]
    fn shift_click_switches_slider_to_number_edit() {
        let mut ctx = test_ctx();
        let mut v: Real = 2.0;
        let drive = |ctx: &mut Context<TestMetrics>, v: &mut Real| {
            ctx.frame(|ctx| {
                ctx.window("w", rect(0, 0, 300, 200), ContainerOption::NONE, |ctx| {
                    let _ = ctx.slider(v, 0.0, 10.0);
                });
            });
        };

        drive(&mut ctx, &mut v);
        ctx.input.mousemove(44, CELL.y + 5);
        drive(&mut ctx, &mut v);
        ctx.input.keydown(KeyMode::SHIFT);
        ctx.input.mousedown(44, CELL.y + 5, MouseButton::LEFT);
        drive(&mut ctx, &mut v);
        assert!(ctx.number_edit.is_some());
        // The click edits instead of dragging the thumb.
        assert_eq!(v, 2.0);

        ctx.input.mouseup(44, CELL.y + 5, MouseButton::LEFT);
        ctx.input.keyup(KeyMode::SHIFT);
        ctx.input.keydown(KeyMode::RETURN);
        drive(&mut ctx, &mut v);
        assert!(ctx.number_edit.is_none());
        assert_eq!(v, 2.0);
        ctx.input.keyup(KeyMode::RETURN);
    }

    #[test]
    fn header_expands_after_click() {
        let mut ctx = test_ctx();
        let drive = |ctx: &mut Context<TestMetrics>| {
            let mut res = ResourceState::NONE;
            ctx.frame(|ctx| {
                ctx.window("w", rect(0, 0, 300, 200), ContainerOption::NONE, |ctx| {
                    res = ctx.header("Options", WidgetOption::NONE);
                });
            });
            res
        };

        assert!(drive(&mut ctx).is_none());
        ctx.input.mousemove(CELL.x + 5, CELL.y + 5);
        assert!(drive(&mut ctx).is_none());
        // The toggling click reports the pre-toggle state; the expansion
        // shows up on the following frame.
        ctx.input.mousedown(CELL.x + 5, CELL.y + 5, MouseButton::LEFT);
        assert!(drive(&mut ctx).is_none());
        ctx.input.mouseup(CELL.x + 5, CELL.y + 5, MouseButton::LEFT);
        assert!(drive(&mut ctx).is_active());

        // A second click collapses it again.
        ctx.input.mousedown(CELL.x + 5, CELL.y + 5, MouseButton::LEFT);
        assert!(drive(&mut ctx).is_active());
        ctx.input.mouseup(CELL.x + 5, CELL.y + 5, MouseButton::LEFT);
        assert!(drive(&mut ctx).is_none());
    }

    #[test]
    fn expanded_treenode_indents_children() {
        let mut ctx = test_ctx();
        let mut child = Recti::default();
        ctx.frame(|ctx| {
            ctx.window("w", rect(0, 0, 300, 200), ContainerOption::NONE, |ctx| {
                let res = ctx.treenode("node", WidgetOption::EXPANDED, |ctx| {
                    child = ctx.layout_next();
                });
                assert!(res.is_active());
            });
        });
        let body_x = 5;
        assert_eq!(child.x, body_x + ctx.style.indent);
    }

    #[test]
    fn long_text_wraps_into_multiple_lines() {
        let mut ctx = test_ctx();
        ctx.frame(|ctx| {
            // No title bar, so the only text commands come from the wrap.
            ctx.window("w", rect(0, 0, 300, 200), ContainerOption::NO_TITLE, |ctx| {
                // Four 5-char words at 8px each cannot share a 78px cell.
                ctx.text("aaaa bbbb cccc dddd");
            });
        });
        let lines: Vec<String> = ctx
            .commands()
            .iter()
            .filter_map(|cmd| match cmd {
                Command::Text { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(lines, vec!["aaaa", "bbbb", "cccc", "dddd"]);
    }
}
