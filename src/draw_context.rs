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
use crate::{
    expand_rect, rect, Clip, Color, Command, CommandList, ControlColor, FontId, Icon, Recti, Style,
    TextMetrics, Vec2i, WidgetOption, CLIP_STACK_SIZE, UNCLIPPED_RECT,
};

pub(crate) struct DrawCtx<'a> {
    commands: &'a mut CommandList,
    clip_stack: &'a mut Vec<Recti>,
    style: &'a Style,
    metrics: &'a dyn TextMetrics,
}

impl<'a> DrawCtx<'a> {
    pub(crate) fn new(
        commands: &'a mut CommandList,
        clip_stack: &'a mut Vec<Recti>,
        style: &'a Style,
        metrics: &'a dyn TextMetrics,
    ) -> Self {
        Self { commands, clip_stack, style, metrics }
    }

    pub(crate) fn current_clip_rect(&self) -> Recti {
        self.clip_stack.last().copied().unwrap_or(UNCLIPPED_RECT)
    }

    pub(crate) fn push_clip_rect(&mut self, rect: Recti) {
        assert!(self.clip_stack.len() < CLIP_STACK_SIZE, "clip stack overflow");
        let last = self.current_clip_rect();
        self.clip_stack.push(rect.intersect(&last).unwrap_or_default());
    }

    pub(crate) fn pop_clip_rect(&mut self) {
        self.clip_stack.pop();
    }

    pub(crate) fn set_clip(&mut self, rect: Recti) {
        self.commands.push(Command::Clip { rect });
    }

    pub(crate) fn check_clip(&self, r: Recti) -> Clip {
        let cr = self.current_clip_rect();
        if r.x > cr.x + cr.width || r.x + r.width < cr.x || r.y > cr.y + cr.height || r.y + r.height < cr.y {
            return Clip::All;
        }
        if r.x >= cr.x && r.x + r.width <= cr.x + cr.width && r.y >= cr.y && r.y + r.height <= cr.y + cr.height {
            return Clip::None;
        }
        Clip::Part
    }

    pub(crate) fn draw_rect(&mut self, rect: Recti, color: Color) {
        // Rects are cheap to pre-clip, so no Clip command bracketing here.
        let rect = rect.intersect(&self.current_clip_rect()).unwrap_or_default();
        if rect.width > 0 && rect.height > 0 {
            self.commands.push(Command::Rect { rect, color });
        }
    }

    pub(crate) fn draw_box(&mut self, r: Recti, color: Color) {
        self.draw_rect(rect(r.x + 1, r.y, r.width - 2, 1), color);
        self.draw_rect(rect(r.x + 1, r.y + r.height - 1, r.width - 2, 1), color);
        self.draw_rect(rect(r.x, r.y, 1, r.height), color);
        self.draw_rect(rect(r.x + r.width - 1, r.y, 1, r.height), color);
    }

    pub(crate) fn draw_text(&mut self, font: FontId, text: &str, pos: Vec2i, color: Color) {
        let width = self.metrics.text_width(font, text);
        let height = self.metrics.text_height(font);
        let rect = rect(pos.x, pos.y, width, height);
        let clipped = self.check_clip(rect);
        match clipped {
            Clip::All => return,
            Clip::Part => {
                let clip = self.current_clip_rect();
                self.set_clip(clip)
            }
            _ => (),
        }

        self.commands.push(Command::Text {
            text: String::from(text),
            pos,
            color,
            font,
        });
        if clipped != Clip::None {
            self.set_clip(UNCLIPPED_RECT);
        }
    }

    pub(crate) fn draw_icon(&mut self, id: Icon, rect: Recti, color: Color) {
        let clipped = self.check_clip(rect);
        match clipped {
            Clip::All => return,
            Clip::Part => {
                let clip = self.current_clip_rect();
                self.set_clip(clip)
            }
            _ => (),
        }
        self.commands.push(Command::Icon { id, rect, color });
        if clipped != Clip::None {
            self.set_clip(UNCLIPPED_RECT);
        }
    }

    pub(crate) fn draw_frame(&mut self, rect: Recti, colorid: ControlColor) {
        let color = self.style.colors[colorid as usize];
        self.draw_rect(rect, color);
        if colorid == ControlColor::ScrollBase || colorid == ControlColor::ScrollThumb || colorid == ControlColor::TitleBG {
            return;
        }
        let border_color = self.style.colors[ControlColor::Border as usize];
        if border_color.a != 0 {
            self.draw_box(expand_rect(rect, 1), border_color);
        }
    }

    pub(crate) fn draw_widget_frame(&mut self, focused: bool, hovered: bool, rect: Recti, mut colorid: ControlColor, opt: WidgetOption) {
        if opt.has_no_frame() {
            return;
        }
        if focused {
            colorid.focus()
        } else if hovered {
            colorid.hover()
        }
        self.draw_frame(rect, colorid);
    }

    pub(crate) fn draw_control_text(&mut self, text: &str, rect: Recti, colorid: ControlColor, opt: WidgetOption) {
        let mut pos = Vec2i { x: 0, y: 0 };
        let font = self.style.font;
        let text_width = self.metrics.text_width(font, text);
        let text_height = self.metrics.text_height(font);
        let padding = self.style.padding;
        let color = self.style.colors[colorid as usize];

        self.push_clip_rect(rect);
        pos.y = rect.y + (rect.height - text_height) / 2;
        if opt.is_aligned_center() {
            pos.x = rect.x + (rect.width - text_width) / 2;
        } else if opt.is_aligned_right() {
            pos.x = rect.x + rect.width - text_width - padding;
        } else {
            pos.x = rect.x + padding;
        }
        self.draw_text(font, text, pos, color);
        self.pop_clip_rect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color;

    fn assert_rect_eq(actual: Recti, expected: Recti) {
        assert_eq!(
            (actual.x, actual.y, actual.width, actual.height),
            (expected.x, expected.y, expected.width, expected.height)
        );
    }

    struct FixedMetrics;

    impl TextMetrics for FixedMetrics {
        fn text_width(&self, _font: FontId, text: &str) -> i32 {
            text.chars().count() as i32 * 8
        }
        fn text_height(&self, _font: FontId) -> i32 {
            10
        }
    }

    fn with_ctx<R>(f: impl FnOnce(&mut DrawCtx<'_>) -> R) -> (R, CommandList) {
        let mut commands = CommandList::new();
        let mut clip_stack = Vec::new();
        let style = Style::default();
        let metrics = FixedMetrics;
        let res = {
            let mut ctx = DrawCtx::new(&mut commands, &mut clip_stack, &style, &metrics);
            f(&mut ctx)
        };
        (res, commands)
    }

    #[test]
    fn nested_clips_intersect() {
        let ((), _) = with_ctx(|ctx| {
            ctx.push_clip_rect(rect(0, 0, 100, 100));
            ctx.push_clip_rect(rect(50, 50, 100, 100));
            assert_rect_eq(ctx.current_clip_rect(), rect(50, 50, 50, 50));
            ctx.pop_clip_rect();
            assert_rect_eq(ctx.current_clip_rect(), rect(0, 0, 100, 100));
            ctx.pop_clip_rect();
        });
    }

    #[test]
    fn check_clip_tristate() {
        let ((), _) = with_ctx(|ctx| {
            ctx.push_clip_rect(rect(0, 0, 100, 100));
            assert_eq!(ctx.check_clip(rect(10, 10, 20, 20)), Clip::None);
            assert_eq!(ctx.check_clip(rect(200, 200, 20, 20)), Clip::All);
            assert_eq!(ctx.check_clip(rect(90, 90, 20, 20)), Clip::Part);
            ctx.pop_clip_rect();
        });
    }

    #[test]
    fn fully_clipped_rect_is_dropped() {
        let ((), commands) = with_ctx(|ctx| {
            ctx.push_clip_rect(rect(0, 0, 10, 10));
            ctx.draw_rect(rect(100, 100, 5, 5), color(255, 0, 0, 255));
            ctx.pop_clip_rect();
        });
        assert!(commands.is_empty());
    }

    #[test]
    fn partially_clipped_text_is_bracketed() {
        let ((), commands) = with_ctx(|ctx| {
            ctx.push_clip_rect(rect(0, 0, 30, 30));
            // 10 chars * 8px overflows the 30px clip.
            ctx.draw_text(FontId::default(), "aaaaaaaaaa", crate::vec2(0, 0), color(255, 255, 255, 255));
            ctx.pop_clip_rect();
        });
        let kinds: Vec<&str> = commands
            .iter()
            .map(|cmd| match cmd {
                Command::Clip { .. } => "clip",
                Command::Text { .. } => "text",
                _ => "other",
            })
            .collect();
        assert_eq!(kinds, vec!["clip", "text", "clip"]);
        // The trailing clip restores the unclipped sentinel.
        match commands.get(commands.len() - 1) {
            Command::Clip { rect } => assert_rect_eq(*rect, UNCLIPPED_RECT),
            _ => panic!("expected trailing clip command"),
        }
    }

    #[test]
    fn unclipped_text_emits_no_clip_commands() {
        let ((), commands) = with_ctx(|ctx| {
            ctx.push_clip_rect(rect(0, 0, 500, 500));
            ctx.draw_text(FontId::default(), "ab", crate::vec2(5, 5), color(255, 255, 255, 255));
            ctx.pop_clip_rect();
        });
        assert_eq!(commands.len(), 1);
    }
}
