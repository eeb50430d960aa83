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
#![deny(missing_docs)]
//! `imgui-redux` is the core of an immediate-mode GUI: hashed widget identity, persistent window state,
//! the hover/active input-capture protocol, popup and menu stacks, and a draw list that batches triangles
//! per clip rect and texture. Rendering is left to the host, which consumes the [`DrawData`] produced by
//! [`Context::render`].
//!
//! A [`Context`] is an explicitly owned, single-threaded value (`!Send`, `!Sync`). A frame looks like:
//!
//! ```no_run
//! # use imgui_redux::*;
//! # fn run(ctx: &mut Context) {
//! ctx.io_mut().mouse_move(10.0, 10.0);
//! let draw_data = ctx.frame(|ui| {
//!     ui.window("Hello", WindowFlags::NONE, |ui| {
//!         if ui.button("OK") {
//!             // ...
//!         }
//!     });
//! });
//! # let _ = draw_data;
//! # }
//! ```

mod config;
mod context;
mod drag_drop;
mod draw_list;
mod error;
mod font;
mod id;
mod input;
mod layout;
mod menu;
mod nav;
mod pool;
mod popup;
mod settings;
mod style;
mod widgets;
mod window;

#[cfg(feature = "builder")]
mod font_atlas;

#[cfg(test)]
mod testing;

pub use config::Config;
pub use context::{Context, InputSource, NextWindowData};
pub use drag_drop::{DragDropFlags, DragDropPayload};
pub use draw_list::*;
pub use error::{Error, Result};
pub use font::*;
pub use id::{find_rendered_text_end, Id, IdStack};
pub use input::{InputState, Io, Key, KeyMods, MouseButton, calc_typematic_repeat_amount};
pub use layout::LayoutType;
pub use menu::MenuColumns;
pub use popup::{find_best_window_pos_for_popup_ex, PopupPositionPolicy, PopupRef, PopupState};
pub use rs_math3d::*;
pub use settings::{SettingsBlob, WindowSettings};
pub use style::*;
pub use widgets::*;
pub use window::{ItemFlags, ItemStatusFlags, LastItem, Window, WindowDc, WindowFlags};

#[cfg(feature = "builder")]
pub use font_atlas::*;

use bitflags::*;

/// Floating point rectangle used for layout, clipping and hit testing.
pub type Rectf = Rect<f32>;

#[derive(Default, Copy, Clone, Debug, PartialEq, Eq, Hash)]
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

impl Color {
    /// Fully transparent black.
    pub const TRANSPARENT: Color = Color { r: 0, g: 0, b: 0, a: 0 };
    /// Opaque white.
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255, a: 255 };
    /// Opaque black.
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0, a: 255 };

    /// Builds a color from normalized float channels, clamping each to `[0, 1]`.
    pub fn from_f32(r: f32, g: f32, b: f32, a: f32) -> Self {
        fn channel(v: f32) -> u8 { (v.clamp(0.0, 1.0) * 255.0 + 0.5) as u8 }
        Self { r: channel(r), g: channel(g), b: channel(b), a: channel(a) }
    }

    /// Returns the color with its alpha multiplied by `alpha`.
    pub fn scale_alpha(self, alpha: f32) -> Self {
        let a = (self.a as f32 * alpha.clamp(0.0, 1.0) + 0.5) as u8;
        Self { a, ..self }
    }

    /// Returns `true` when the color is fully transparent.
    pub fn is_transparent(&self) -> bool { self.a == 0 }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
/// Handle referencing a renderer-owned texture.
pub struct TextureId(u32);

impl TextureId {
    /// Wraps a renderer specific texture handle.
    pub fn new(raw: u32) -> Self { Self(raw) }

    /// Returns the raw numeric identifier stored inside the handle.
    pub fn raw(self) -> u32 { self.0 }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
/// Condition attached to the `set_next_window_*` family of calls.
pub enum Cond {
    /// Apply the value every frame.
    #[default]
    Always,
    /// Apply the value once per runtime session.
    Once,
    /// Apply the value if the window has no saved settings yet.
    FirstUseEver,
    /// Apply the value when the window appears after being hidden.
    Appearing,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
/// Cardinal direction.
pub enum Dir {
    /// Towards negative x.
    Left,
    /// Towards positive x.
    Right,
    /// Towards negative y.
    Up,
    /// Towards positive y.
    Down,
}

bitflags! {
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
    /// Options for [`Context::is_item_hovered`] and [`Context::is_window_hovered`].
    pub struct HoveredFlags : u32 {
        /// Also match the children of the current window.
        const CHILD_WINDOWS = 1 << 0;
        /// Match any window.
        const ANY_WINDOW = 1 << 1;
        /// Return true even if a popup is blocking access to this item or window.
        const ALLOW_WHEN_BLOCKED_BY_POPUP = 1 << 2;
        /// Return true even if an active item is blocking access to this item or window.
        const ALLOW_WHEN_BLOCKED_BY_ACTIVE_ITEM = 1 << 3;
        /// Test against the root of the current window hierarchy.
        const ROOT_WINDOW = 1 << 5;
        /// Return true even if the position is overlapped by another window.
        const ALLOW_WHEN_OVERLAPPED = 1 << 4;
        /// Strict hover test.
        const NONE = 0;
    }
}

impl HoveredFlags {
    /// Returns `true` if popups may not block the query.
    pub fn allows_blocked_by_popup(&self) -> bool { self.intersects(Self::ALLOW_WHEN_BLOCKED_BY_POPUP) }
    /// Returns `true` if the active item may not block the query.
    pub fn allows_blocked_by_active_item(&self) -> bool { self.intersects(Self::ALLOW_WHEN_BLOCKED_BY_ACTIVE_ITEM) }
    /// Returns `true` if overlapping windows may not block the query.
    pub fn allows_overlapped(&self) -> bool { self.intersects(Self::ALLOW_WHEN_OVERLAPPED) }
}

bitflags! {
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
    /// Options for [`Context::is_window_focused`].
    pub struct FocusedFlags : u32 {
        /// Also match the children of the current window.
        const CHILD_WINDOWS = 1 << 0;
        /// Test from the root window of the current hierarchy.
        const ROOT_WINDOW = 1 << 1;
        /// Match any window.
        const ANY_WINDOW = 1 << 2;
        /// Strict focus test.
        const NONE = 0;
    }
}

/// Convenience constructor for [`Vec2f`].
pub fn vec2(x: f32, y: f32) -> Vec2f { Vec2f { x, y } }

/// Convenience constructor for [`Rectf`].
pub fn rect(x: f32, y: f32, w: f32, h: f32) -> Rectf { Rectf { x, y, width: w, height: h } }

/// Builds a rectangle from its top-left and bottom-right corners.
pub fn rect_min_max(min: Vec2f, max: Vec2f) -> Rectf { rect(min.x, min.y, max.x - min.x, max.y - min.y) }

/// Convenience constructor for [`Color`].
pub fn color(r: u8, g: u8, b: u8, a: u8) -> Color { Color { r, g, b, a } }

pub(crate) fn lerp(a: f32, b: f32, t: f32) -> f32 { a + (b - a) * t }

pub(crate) fn lerp_vec2(a: Vec2f, b: Vec2f, t: f32) -> Vec2f { vec2(lerp(a.x, b.x, t), lerp(a.y, b.y, t)) }

pub(crate) fn saturate(v: f32) -> f32 { v.clamp(0.0, 1.0) }

pub(crate) fn add2(a: Vec2f, b: Vec2f) -> Vec2f { vec2(a.x + b.x, a.y + b.y) }

pub(crate) fn sub2(a: Vec2f, b: Vec2f) -> Vec2f { vec2(a.x - b.x, a.y - b.y) }

pub(crate) fn mul2(a: Vec2f, s: f32) -> Vec2f { vec2(a.x * s, a.y * s) }

pub(crate) fn min2(a: Vec2f, b: Vec2f) -> Vec2f { vec2(a.x.min(b.x), a.y.min(b.y)) }

pub(crate) fn max2(a: Vec2f, b: Vec2f) -> Vec2f { vec2(a.x.max(b.x), a.y.max(b.y)) }

pub(crate) fn floor2(a: Vec2f) -> Vec2f { vec2(a.x.floor(), a.y.floor()) }

/// Geometry queries over [`Rectf`] expressed in min/max terms.
pub trait RectExt {
    /// Top-left corner.
    fn min_pt(&self) -> Vec2f;
    /// Bottom-right corner.
    fn max_pt(&self) -> Vec2f;
    /// Center point.
    fn center(&self) -> Vec2f;
    /// Half-open point containment: `min <= p < max` on both axes.
    fn contains_pt(&self, p: Vec2f) -> bool;
    /// Returns `true` when `other` lies fully inside.
    fn contains_rect(&self, other: &Rectf) -> bool;
    /// Returns `true` when the two rectangles share any area.
    fn overlaps(&self, other: &Rectf) -> bool;
    /// Intersection of the two rectangles, empty (zero sized) when they are disjoint.
    fn clip_with(&self, other: &Rectf) -> Rectf;
    /// Grows the rectangle by `x` on the left/right and `y` on the top/bottom.
    fn expand(&self, x: f32, y: f32) -> Rectf;
    /// Moves the rectangle by `d`.
    fn translate(&self, d: Vec2f) -> Rectf;
    /// Returns `true` when the rectangle has no area.
    fn is_empty(&self) -> bool;
}

impl RectExt for Rectf {
    fn min_pt(&self) -> Vec2f { vec2(self.x, self.y) }

    fn max_pt(&self) -> Vec2f { vec2(self.x + self.width, self.y + self.height) }

    fn center(&self) -> Vec2f { vec2(self.x + self.width * 0.5, self.y + self.height * 0.5) }

    fn contains_pt(&self, p: Vec2f) -> bool { p.x >= self.x && p.y >= self.y && p.x < self.x + self.width && p.y < self.y + self.height }

    fn contains_rect(&self, other: &Rectf) -> bool {
        other.x >= self.x && other.y >= self.y && other.x + other.width <= self.x + self.width && other.y + other.height <= self.y + self.height
    }

    fn overlaps(&self, other: &Rectf) -> bool {
        other.y < self.y + self.height && other.y + other.height > self.y && other.x < self.x + self.width && other.x + other.width > self.x
    }

    fn clip_with(&self, other: &Rectf) -> Rectf {
        let min_x = self.x.max(other.x);
        let min_y = self.y.max(other.y);
        let max_x = (self.x + self.width).min(other.x + other.width);
        let max_y = (self.y + self.height).min(other.y + other.height);
        rect(min_x, min_y, (max_x - min_x).max(0.0), (max_y - min_y).max(0.0))
    }

    fn expand(&self, x: f32, y: f32) -> Rectf { rect(self.x - x, self.y - y, self.width + x * 2.0, self.height + y * 2.0) }

    fn translate(&self, d: Vec2f) -> Rectf { rect(self.x + d.x, self.y + d.y, self.width, self.height) }

    fn is_empty(&self) -> bool { self.width <= 0.0 || self.height <= 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_contains_is_half_open() {
        let r = rect(10.0, 10.0, 20.0, 10.0);
        assert!(r.contains_pt(vec2(10.0, 10.0)));
        assert!(r.contains_pt(vec2(29.9, 19.9)));
        assert!(!r.contains_pt(vec2(30.0, 15.0)));
        assert!(!r.contains_pt(vec2(15.0, 20.0)));
    }

    #[test]
    fn disjoint_clip_is_empty() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        let b = rect(20.0, 20.0, 5.0, 5.0);
        assert!(!a.overlaps(&b));
        assert!(a.clip_with(&b).is_empty());
        let c = a.clip_with(&rect(5.0, -5.0, 10.0, 10.0));
        assert_eq!((c.x, c.y, c.width, c.height), (5.0, 0.0, 5.0, 5.0));
    }

    #[test]
    fn color_from_f32_rounds() {
        assert_eq!(Color::from_f32(1.0, 0.5, 0.0, 2.0), color(255, 128, 0, 255));
        assert_eq!(color(10, 10, 10, 200).scale_alpha(0.5).a, 100);
    }
}
