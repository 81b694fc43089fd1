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
#![deny(missing_docs)]
//! `nanoui` is an immediate-mode GUI core inspired by [rxi/microui](https://github.com/rxi/microui).
//! The UI is re-described from scratch every frame; the library retains only
//! small id-keyed pools of container and treenode state, and records each
//! frame's output into a flat draw command buffer that the caller replays with
//! whatever render backend it likes.

mod command;
mod container;
mod context;
mod draw_context;
mod idmngr;
mod layout;
mod pool;
mod widgets;

pub use command::*;
pub use container::Container;
pub use context::Context;
pub use idmngr::Id;
pub use layout::{NextCell, SizePolicy};
pub use rs_math3d::*;

pub(crate) use draw_context::DrawCtx;
pub(crate) use idmngr::IdManager;
pub(crate) use layout::LayoutManager;
pub(crate) use pool::Pool;

use bitflags::*;

pub(crate) const COMMAND_LIST_SIZE: usize = 256 * 1024;
pub(crate) const ROOT_LIST_SIZE: usize = 32;
pub(crate) const CONTAINER_STACK_SIZE: usize = 32;
pub(crate) const CLIP_STACK_SIZE: usize = 32;
pub(crate) const ID_STACK_SIZE: usize = 32;
pub(crate) const LAYOUT_STACK_SIZE: usize = 16;
pub(crate) const CONTAINER_POOL_SIZE: usize = 48;
pub(crate) const TREENODE_POOL_SIZE: usize = 48;
pub(crate) const MAX_WIDTHS: usize = 16;

pub(crate) static UNCLIPPED_RECT: Recti = Recti {
    x: 0,
    y: 0,
    width: 0x1000000,
    height: 0x1000000,
};

#[derive(PartialEq, Copy, Clone, Debug)]
#[repr(u32)]
/// Describes whether a rectangle is clipped by the current scissor.
pub enum Clip {
    /// Rectangle is fully visible.
    None = 0,
    /// Rectangle is partially visible.
    Part = 1,
    /// Rectangle is fully clipped away.
    All = 2,
}

#[derive(PartialEq, Copy, Clone)]
#[repr(u32)]
/// Identifiers for each of the built-in style colors.
pub enum ControlColor {
    /// Number of color entries in [`Style::colors`].
    Max = 14,
    /// Thumb of scrollbars.
    ScrollThumb = 13,
    /// Base frame of scrollbars.
    ScrollBase = 12,
    /// Base color for focused widgets.
    BaseFocus = 11,
    /// Base color while the pointer hovers the widget.
    BaseHover = 10,
    /// Default base color.
    Base = 9,
    /// Button color while the widget is focused.
    ButtonFocus = 8,
    /// Button color while the pointer hovers the widget.
    ButtonHover = 7,
    /// Default button color.
    Button = 6,
    /// Panel background color.
    PanelBG = 5,
    /// Window title text color.
    TitleText = 4,
    /// Window title background color.
    TitleBG = 3,
    /// Window background color.
    WindowBG = 2,
    /// Outline/border color.
    Border = 1,
    /// Default text color.
    Text = 0,
}

impl ControlColor {
    /// Promotes the enum to the hover variant when relevant.
    pub fn hover(&mut self) {
        *self = match self {
            Self::Base => Self::BaseHover,
            Self::Button => Self::ButtonHover,
            _ => *self,
        }
    }

    /// Promotes the enum to the focused variant when relevant.
    pub fn focus(&mut self) {
        *self = match self {
            Self::Base => Self::BaseFocus,
            Self::Button => Self::ButtonFocus,
            Self::BaseHover => Self::BaseFocus,
            Self::ButtonHover => Self::ButtonFocus,
            _ => *self,
        }
    }
}

#[derive(PartialEq, Eq, Copy, Clone, Debug, Hash)]
#[repr(u32)]
/// Built-in icon glyphs drawn by the render backend.
pub enum Icon {
    /// Close button of window title bars.
    Close = 1,
    /// Checkmark of checked checkboxes.
    Check = 2,
    /// Marker of collapsed headers and treenodes.
    Collapsed = 3,
    /// Marker of expanded headers and treenodes.
    Expanded = 4,
}

bitflags! {
    /// State bits returned by widgets to describe their interaction outcome.
    #[derive(Copy, Clone, PartialEq, Eq, Debug)]
    pub struct ResourceState : u32 {
        /// Indicates that the widget's data changed.
        const CHANGE = 4;
        /// Indicates that the widget was submitted (e.g. button clicked).
        const SUBMIT = 2;
        /// Indicates that the widget is currently active.
        const ACTIVE = 1;
        /// Indicates no interaction.
        const NONE = 0;
    }
}

impl ResourceState {
    /// Whether the widget's data changed.
    pub fn is_changed(&self) -> bool { self.intersects(Self::CHANGE) }
    /// Whether the widget was submitted.
    pub fn is_submitted(&self) -> bool { self.intersects(Self::SUBMIT) }
    /// Whether the widget is active.
    pub fn is_active(&self) -> bool { self.intersects(Self::ACTIVE) }
    /// Whether no interaction happened.
    pub fn is_none(&self) -> bool { self.bits() == 0 }
}

bitflags! {
    #[derive(Copy, Clone)]
    /// Options that control how a container behaves.
    pub struct ContainerOption : u32 {
        /// Starts closed; `open_popup` re-opens it.
        const CLOSED = 2048;
        /// Closes the container when the pointer presses outside of it.
        const POPUP = 1024;
        /// Automatically adapts the container size to its content.
        const AUTO_SIZE = 512;
        /// Hides the title bar.
        const NO_TITLE = 128;
        /// Hides the close button.
        const NO_CLOSE = 64;
        /// Disables scrollbars even when content overflows the body.
        const NO_SCROLL = 32;
        /// Prevents the user from resizing the window.
        const NO_RESIZE = 16;
        /// Hides the outer frame.
        const NO_FRAME = 8;
        /// Disables interaction with the container.
        const NO_INTERACT = 4;
        /// No special options.
        const NONE = 0;
    }

    #[derive(Copy, Clone)]
    /// Options that control how a widget draws and reacts to input.
    pub struct WidgetOption : u32 {
        /// Starts headers/treenodes in the expanded state.
        const EXPANDED = 4096;
        /// Keeps keyboard focus while the widget is held.
        const HOLD_FOCUS = 256;
        /// Draws the widget without its frame/background.
        const NO_FRAME = 128;
        /// Disables interaction for the widget.
        const NO_INTERACT = 4;
        /// Aligns the widget to the right side of the cell.
        const ALIGN_RIGHT = 2;
        /// Centers the widget inside the cell.
        const ALIGN_CENTER = 1;
        /// No special options.
        const NONE = 0;
    }
}

impl ContainerOption {
    /// Whether the container starts closed.
    pub fn is_closed(&self) -> bool { self.intersects(Self::CLOSED) }
    /// Whether the container closes on an outside press.
    pub fn is_popup(&self) -> bool { self.intersects(Self::POPUP) }
    /// Whether the container adapts its size to its content.
    pub fn is_auto_sizing(&self) -> bool { self.intersects(Self::AUTO_SIZE) }
    /// Whether the title bar is hidden.
    pub fn has_no_title(&self) -> bool { self.intersects(Self::NO_TITLE) }
    /// Whether the close button is hidden.
    pub fn has_no_close(&self) -> bool { self.intersects(Self::NO_CLOSE) }
    /// Whether scrollbars are disabled.
    pub fn has_no_scroll(&self) -> bool { self.intersects(Self::NO_SCROLL) }
    /// Whether the resize handle is disabled.
    pub fn is_fixed(&self) -> bool { self.intersects(Self::NO_RESIZE) }
    /// Whether the outer frame is hidden.
    pub fn has_no_frame(&self) -> bool { self.intersects(Self::NO_FRAME) }
    /// Whether the container ignores pointer interaction.
    pub fn is_not_interactive(&self) -> bool { self.intersects(Self::NO_INTERACT) }
}

impl WidgetOption {
    /// Whether the widget starts expanded.
    pub fn is_expanded(&self) -> bool { self.intersects(Self::EXPANDED) }
    /// Whether the widget keeps focus while held.
    pub fn is_holding_focus(&self) -> bool { self.intersects(Self::HOLD_FOCUS) }
    /// Whether the widget frame is hidden.
    pub fn has_no_frame(&self) -> bool { self.intersects(Self::NO_FRAME) }
    /// Whether the widget ignores pointer interaction.
    pub fn is_not_interactive(&self) -> bool { self.intersects(Self::NO_INTERACT) }
    /// Whether text is right-aligned.
    pub fn is_aligned_right(&self) -> bool { self.intersects(Self::ALIGN_RIGHT) }
    /// Whether text is centered.
    pub fn is_aligned_center(&self) -> bool { self.intersects(Self::ALIGN_CENTER) }
    /// Whether no option is set.
    pub fn is_none(&self) -> bool { self.bits() == 0 }
}

bitflags! {
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    /// Mouse button state as reported by the input system.
    pub struct MouseButton : u32 {
        /// Middle mouse button.
        const MIDDLE = 4;
        /// Right mouse button.
        const RIGHT = 2;
        /// Left mouse button.
        const LEFT = 1;
        /// No buttons pressed.
        const NONE = 0;
    }
}

impl MouseButton {
    /// Whether the middle button is set.
    pub fn is_middle(&self) -> bool { self.intersects(Self::MIDDLE) }
    /// Whether the right button is set.
    pub fn is_right(&self) -> bool { self.intersects(Self::RIGHT) }
    /// Whether the left button is set.
    pub fn is_left(&self) -> bool { self.intersects(Self::LEFT) }
    /// Whether no button is set.
    pub fn is_none(&self) -> bool { self.bits() == 0 }
}

bitflags! {
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    /// Modifier and editing key state tracked by the input system.
    pub struct KeyMode : u32 {
        /// Delete key held.
        const DELETE = 32;
        /// Return/Enter key held.
        const RETURN = 16;
        /// Backspace key held.
        const BACKSPACE = 8;
        /// Alt key held.
        const ALT = 4;
        /// Control key held.
        const CTRL = 2;
        /// Shift key held.
        const SHIFT = 1;
        /// No modifiers active.
        const NONE = 0;
    }
}

impl KeyMode {
    /// Whether no key is set.
    pub fn is_none(&self) -> bool { self.bits() == 0 }
    /// Whether Delete is set.
    pub fn is_delete(&self) -> bool { self.intersects(Self::DELETE) }
    /// Whether Return is set.
    pub fn is_return(&self) -> bool { self.intersects(Self::RETURN) }
    /// Whether Backspace is set.
    pub fn is_backspace(&self) -> bool { self.intersects(Self::BACKSPACE) }
    /// Whether Alt is set.
    pub fn is_alt(&self) -> bool { self.intersects(Self::ALT) }
    /// Whether Ctrl is set.
    pub fn is_ctrl(&self) -> bool { self.intersects(Self::CTRL) }
    /// Whether Shift is set.
    pub fn is_shift(&self) -> bool { self.intersects(Self::SHIFT) }
}

#[derive(Clone, Debug)]
/// Aggregates raw input collected during the current frame.
pub struct Input {
    mouse_pos: Vec2i,
    last_mouse_pos: Vec2i,
    mouse_delta: Vec2i,
    scroll_delta: Vec2i,
    mouse_down: MouseButton,
    mouse_pressed: MouseButton,
    key_down: KeyMode,
    key_pressed: KeyMode,
    input_text: String,
}

impl Default for Input {
    fn default() -> Self {
        Self {
            mouse_pos: Vec2i::default(),
            last_mouse_pos: Vec2i::default(),
            mouse_delta: Vec2i::default(),
            scroll_delta: Vec2i::default(),
            mouse_down: MouseButton::NONE,
            mouse_pressed: MouseButton::NONE,
            key_down: KeyMode::NONE,
            key_pressed: KeyMode::NONE,
            input_text: String::default(),
        }
    }
}

impl Input {
    /// Returns the current mouse position.
    pub fn mouse_pos(&self) -> Vec2i { self.mouse_pos }

    /// Returns the pointer movement since the previous frame.
    pub fn mouse_delta(&self) -> Vec2i { self.mouse_delta }

    /// Returns the scroll wheel movement accumulated this frame.
    pub fn scroll_delta(&self) -> Vec2i { self.scroll_delta }

    /// Returns the currently held mouse buttons.
    pub fn mouse_down(&self) -> MouseButton { self.mouse_down }

    /// Returns the mouse buttons pressed since the previous frame.
    pub fn mouse_pressed(&self) -> MouseButton { self.mouse_pressed }

    /// Returns the state of all modifier keys.
    pub fn key_state(&self) -> KeyMode { self.key_down }

    /// Returns the keys pressed since the previous frame.
    pub fn key_pressed(&self) -> KeyMode { self.key_pressed }

    /// Returns the accumulated UTF-8 text entered this frame.
    pub fn text_input(&self) -> &str { &self.input_text }

    /// Updates the current mouse pointer position.
    pub fn mousemove(&mut self, x: i32, y: i32) { self.mouse_pos = vec2(x, y); }

    /// Records that the specified mouse button was pressed.
    pub fn mousedown(&mut self, x: i32, y: i32, btn: MouseButton) {
        self.mousemove(x, y);
        self.mouse_down |= btn;
        self.mouse_pressed |= btn;
    }

    /// Records that the specified mouse button was released.
    pub fn mouseup(&mut self, x: i32, y: i32, btn: MouseButton) {
        self.mousemove(x, y);
        self.mouse_down &= !btn;
    }

    /// Accumulates scroll wheel movement.
    pub fn scroll(&mut self, x: i32, y: i32) {
        self.scroll_delta.x += x;
        self.scroll_delta.y += y;
    }

    /// Records that a key was pressed.
    pub fn keydown(&mut self, key: KeyMode) {
        self.key_pressed |= key;
        self.key_down |= key;
    }

    /// Records that a key was released.
    pub fn keyup(&mut self, key: KeyMode) { self.key_down &= !key; }

    /// Appends UTF-8 text to the input buffer.
    pub fn text(&mut self, text: &str) { self.input_text.push_str(text); }

    pub(crate) fn prelude(&mut self) {
        self.mouse_delta.x = self.mouse_pos.x - self.last_mouse_pos.x;
        self.mouse_delta.y = self.mouse_pos.y - self.last_mouse_pos.y;
    }

    pub(crate) fn epilogue(&mut self) {
        self.key_pressed = KeyMode::NONE;
        self.input_text.clear();
        self.mouse_pressed = MouseButton::NONE;
        self.scroll_delta = vec2(0, 0);
        self.last_mouse_pos = self.mouse_pos;
    }
}

#[derive(Default, Copy, Clone, Debug, PartialEq, Eq)]
#[repr(C)]
/// Simple RGBA color stored with 8-bit components.
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

#[derive(Default, Copy, Clone, Debug, PartialEq, Eq, Hash)]
/// Handle referencing a caller-owned font.
pub struct FontId(u32);

impl FontId {
    /// Wraps a caller-chosen font identifier.
    pub fn new(id: u32) -> Self { Self(id) }

    /// Returns the raw numeric identifier stored inside the handle.
    pub fn raw(self) -> u32 { self.0 }
}

/// Floating-point type used by sliders and number widgets.
pub type Real = f32;

/// Text measurement hooks the layout and draw passes rely on.
///
/// Implemented by the embedding render backend; the context cannot be built
/// without one, so text always has a well-defined size.
pub trait TextMetrics {
    /// Returns the pixel width of `text` rendered with `font`.
    fn text_width(&self, font: FontId, text: &str) -> i32;
    /// Returns the line height of `font` in pixels.
    fn text_height(&self, font: FontId) -> i32;
}

#[derive(Copy, Clone)]
/// Collection of visual constants that drive widget appearance.
pub struct Style {
    /// Font used for all text rendering.
    pub font: FontId,
    /// Default cell size used by layouts when no size policy overrides it.
    pub size: Dimensioni,
    /// Inner padding applied to most widgets.
    pub padding: i32,
    /// Spacing between cells in a layout.
    pub spacing: i32,
    /// Indentation applied to nested content.
    pub indent: i32,
    /// Height of window title bars.
    pub title_height: i32,
    /// Width of scrollbars.
    pub scrollbar_size: i32,
    /// Size of slider thumbs.
    pub thumb_size: i32,
    /// Palette of [`ControlColor`] entries.
    pub colors: [Color; 14],
}

impl Default for Style {
    fn default() -> Self {
        Self {
            font: FontId::default(),
            size: Dimensioni::new(68, 10),
            padding: 5,
            spacing: 4,
            indent: 24,
            title_height: 24,
            scrollbar_size: 12,
            thumb_size: 8,
            colors: [
                Color { r: 230, g: 230, b: 230, a: 255 },
                Color { r: 25, g: 25, b: 25, a: 255 },
                Color { r: 50, g: 50, b: 50, a: 255 },
                Color { r: 25, g: 25, b: 25, a: 255 },
                Color { r: 240, g: 240, b: 240, a: 255 },
                Color { r: 0, g: 0, b: 0, a: 0 },
                Color { r: 75, g: 75, b: 75, a: 255 },
                Color { r: 95, g: 95, b: 95, a: 255 },
                Color { r: 115, g: 115, b: 115, a: 255 },
                Color { r: 30, g: 30, b: 30, a: 255 },
                Color { r: 35, g: 35, b: 35, a: 255 },
                Color { r: 40, g: 40, b: 40, a: 255 },
                Color { r: 43, g: 43, b: 43, a: 255 },
                Color { r: 30, g: 30, b: 30, a: 255 },
            ],
        }
    }
}

/// Convenience constructor for [`Vec2i`].
pub fn vec2(x: i32, y: i32) -> Vec2i { Vec2i { x, y } }

/// Convenience constructor for [`Recti`].
pub fn rect(x: i32, y: i32, w: i32, h: i32) -> Recti { Recti { x, y, width: w, height: h } }

/// Convenience constructor for [`Color`].
pub fn color(r: u8, g: u8, b: u8, a: u8) -> Color { Color { r, g, b, a } }

/// Expands (or shrinks) a rectangle uniformly on all sides.
pub fn expand_rect(r: Recti, n: i32) -> Recti { rect(r.x - n, r.y - n, r.width + n * 2, r.height + n * 2) }
