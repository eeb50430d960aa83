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
//! Color editors, pickers and swatches.
//!
//! Colors are edited in place as [`Color`]. The editors are made of integer or float drags, a swatch that
//! opens a picker popup, and a right-click popup changing the user options stored in the context.

use std::f32::consts::PI;

use bitflags::bitflags;

use super::Painter;
use crate::{
    add2, find_rendered_text_end, lerp, rect, saturate, sub2, vec2, ButtonFlags, Color, Cond, Context, DragDropFlags, DrawCornerFlags,
    DrawList, ItemFlags, ItemStatusFlags, MouseButton, RectExt, SelectableFlags, StyleColor, Vec2f, WindowFlags,
};

bitflags! {
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
    /// Options of the color editors, pickers and swatches. Each group of the user options (inputs, data type,
    /// picker mode) holds one bit; an empty group takes the value set with [`Context::set_color_edit_options`].
    pub struct ColorEditFlags : u32 {
        /// Ignore the alpha channel.
        const NO_ALPHA = 1 << 1;
        /// Clicking the swatch of an editor does not open a picker.
        const NO_PICKER = 1 << 2;
        /// No right-click options popup.
        const NO_OPTIONS = 1 << 3;
        /// No swatch next to the inputs.
        const NO_SMALL_PREVIEW = 1 << 4;
        /// No drags, only the swatch.
        const NO_INPUTS = 1 << 5;
        /// No tooltip when hovering a swatch.
        const NO_TOOLTIP = 1 << 6;
        /// Do not draw the label (it still goes to the tooltip and the picker).
        const NO_LABEL = 1 << 7;
        /// Picker: no large preview on the right side.
        const NO_SIDE_PREVIEW = 1 << 8;
        /// Picker: vertical alpha bar.
        const ALPHA_BAR = 1 << 9;
        /// Swatches show the color over a checkerboard.
        const ALPHA_PREVIEW = 1 << 10;
        /// Swatches show half opaque, half over a checkerboard.
        const ALPHA_PREVIEW_HALF = 1 << 11;
        /// Float inputs are not limited to `0..1`.
        const HDR = 1 << 12;
        /// Inputs edit red, green and blue.
        const RGB = 1 << 13;
        /// Inputs edit hue, saturation and value.
        const HSV = 1 << 14;
        /// Input shows `#RRGGBB[AA]`.
        const HEX = 1 << 15;
        /// Values display as `0..255`.
        const UINT8 = 1 << 16;
        /// Values display as `0.0..1.0`.
        const FLOAT = 1 << 17;
        /// Picker: hue bar beside a saturation/value square.
        const PICKER_HUE_BAR = 1 << 18;
        /// Picker: hue ring around a saturation/value triangle.
        const PICKER_HUE_WHEEL = 1 << 19;

        /// Input group.
        const INPUTS_MASK = Self::RGB.bits() | Self::HSV.bits() | Self::HEX.bits();
        /// Data type group.
        const DATA_TYPE_MASK = Self::UINT8.bits() | Self::FLOAT.bits();
        /// Picker mode group.
        const PICKER_MASK = Self::PICKER_HUE_BAR.bits() | Self::PICKER_HUE_WHEEL.bits();
        /// User options of a new context.
        const OPTIONS_DEFAULT = Self::UINT8.bits() | Self::RGB.bits() | Self::PICKER_HUE_BAR.bits();
        /// No flags.
        const NONE = 0;
    }
}

impl ColorEditFlags {
    const GROUPS: [ColorEditFlags; 3] = [Self::INPUTS_MASK, Self::DATA_TYPE_MASK, Self::PICKER_MASK];
    const ALPHA_PREVIEW_MASK: ColorEditFlags =
        Self::NO_ALPHA.union(Self::ALPHA_PREVIEW).union(Self::ALPHA_PREVIEW_HALF);
}

/// Drag and drop type of an opaque color; the payload is the `r, g, b` bytes.
pub const PAYLOAD_TYPE_COLOR_3: &str = "_COL3B";
/// Drag and drop type of a color with alpha; the payload is the `r, g, b, a` bytes.
pub const PAYLOAD_TYPE_COLOR_4: &str = "_COL4B";

const CHECKER_LIGHT: Color = Color { r: 204, g: 204, b: 204, a: 255 };
const CHECKER_DARK: Color = Color { r: 128, g: 128, b: 128, a: 255 };
const MID_GREY: Color = Color { r: 128, g: 128, b: 128, a: 255 };

/// Converts `[0, 1]` RGB to hue, saturation and value, all in `[0, 1]`.
pub fn color_convert_rgb_to_hsv(r: f32, g: f32, b: f32) -> (f32, f32, f32) {
    let (mut r, mut g, mut b) = (r, g, b);
    let mut k = 0.0;
    if g < b {
        std::mem::swap(&mut g, &mut b);
        k = -1.0;
    }
    if r < g {
        std::mem::swap(&mut r, &mut g);
        k = -2.0 / 6.0 - k;
    }
    let chroma = r - g.min(b);
    let h = (k + (g - b) / (6.0 * chroma + 1e-20)).abs();
    let s = chroma / (r + 1e-20);
    (h, s, r)
}

/// Converts hue, saturation and value to `[0, 1]` RGB. The hue wraps around.
pub fn color_convert_hsv_to_rgb(h: f32, s: f32, v: f32) -> (f32, f32, f32) {
    if s == 0.0 {
        return (v, v, v);
    }
    let h = h.rem_euclid(1.0) * 6.0;
    let i = (h as i32).min(5);
    let f = h - i as f32;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));
    match i {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    }
}

impl Color {
    /// Channels as `[0, 1]` floats.
    pub fn to_f32(self) -> [f32; 4] { [self.r, self.g, self.b, self.a].map(|c| c as f32 / 255.0) }

    /// Color from hue, saturation and value in `[0, 1]` and an 8-bit alpha.
    pub fn from_hsv(h: f32, s: f32, v: f32, a: u8) -> Self {
        let (r, g, b) = color_convert_hsv_to_rgb(h, s, v);
        Self { a, ..Self::from_f32(r, g, b, 1.0) }
    }
}

fn f32_to_int8_unbound(v: f32) -> i32 { (v * 255.0 + if v >= 0.0 { 0.5 } else { -0.5 }) as i32 }

/// `fg` composited over an opaque `bg`.
fn alpha_blend(bg: Color, fg: Color) -> Color {
    let t = fg.a as f32 / 255.0;
    let mix = |a: u8, b: u8| (lerp(a as f32, b as f32, t) + 0.5) as u8;
    Color { r: mix(bg.r, fg.r), g: mix(bg.g, fg.g), b: mix(bg.b, fg.b), a: 255 }
}

fn hex_string(col: Color, alpha: bool) -> String {
    if alpha {
        format!("#{:02X}{:02X}{:02X}{:02X}", col.r, col.g, col.b, col.a)
    } else {
        format!("#{:02X}{:02X}{:02X}", col.r, col.g, col.b)
    }
}

/// The float, integer and hex renderings offered by the "Copy as.." menu.
pub(crate) fn color_copy_forms(col: Color, no_alpha: bool) -> [String; 3] {
    let col = if no_alpha { Color { a: 255, ..col } } else { col };
    let [r, g, b, a] = col.to_f32();
    let hex = if no_alpha {
        format!("0x{:02X}{:02X}{:02X}", col.r, col.g, col.b)
    } else {
        format!("0x{:02X}{:02X}{:02X}{:02X}", col.r, col.g, col.b, col.a)
    };
    [format!("({r:.3}f, {g:.3}f, {b:.3}f, {a:.3}f)"), format!("({},{},{},{})", col.r, col.g, col.b, col.a), hex]
}

fn triangle_contains_point(a: Vec2f, b: Vec2f, c: Vec2f, p: Vec2f) -> bool {
    let b1 = (p.x - b.x) * (a.y - b.y) - (p.y - b.y) * (a.x - b.x) < 0.0;
    let b2 = (p.x - c.x) * (b.y - c.y) - (p.y - c.y) * (b.x - c.x) < 0.0;
    let b3 = (p.x - a.x) * (c.y - a.y) - (p.y - a.y) * (c.x - a.x) < 0.0;
    b1 == b2 && b2 == b3
}

/// Barycentric weights `(u, v, w)` of `p` against `a`, `b`, `c`.
fn triangle_barycentric_coords(a: Vec2f, b: Vec2f, c: Vec2f, p: Vec2f) -> (f32, f32, f32) {
    let (v0, v1, v2) = (sub2(b, a), sub2(c, a), sub2(p, a));
    let denom = v0.x * v1.y - v1.x * v0.y;
    let v = (v2.x * v1.y - v1.x * v2.y) / denom;
    let w = (v0.x * v2.y - v2.x * v0.y) / denom;
    (1.0 - v - w, v, w)
}

fn line_closest_point(a: Vec2f, b: Vec2f, p: Vec2f) -> Vec2f {
    let (ap, ab) = (sub2(p, a), sub2(b, a));
    let dot = ap.x * ab.x + ap.y * ab.y;
    if dot < 0.0 {
        return a;
    }
    let len_sqr = ab.x * ab.x + ab.y * ab.y;
    if dot > len_sqr {
        return b;
    }
    add2(a, crate::mul2(ab, dot / len_sqr))
}

fn length_sqr(v: Vec2f) -> f32 { v.x * v.x + v.y * v.y }

fn triangle_closest_point(a: Vec2f, b: Vec2f, c: Vec2f, p: Vec2f) -> Vec2f {
    [line_closest_point(a, b, p), line_closest_point(b, c, p), line_closest_point(c, a, p)]
        .into_iter()
        .min_by(|x, y| length_sqr(sub2(p, *x)).total_cmp(&length_sqr(sub2(p, *y))))
        .unwrap_or(a)
}

fn rotate(v: Vec2f, cos_a: f32, sin_a: f32) -> Vec2f { vec2(v.x * cos_a - v.y * sin_a, v.x * sin_a + v.y * cos_a) }

/// White-bordered arrows on both sides of a vertical bar, pointing at `pos.y`.
fn render_bar_arrows(dl: &mut DrawList, pos: Vec2f, half: Vec2f, bar_w: f32) {
    fn arrow(dl: &mut DrawList, tip: Vec2f, half: Vec2f, dir: f32, col: Color) {
        dl.add_triangle_filled(
            vec2(tip.x + half.x * dir, tip.y),
            vec2(tip.x - half.x * dir, tip.y + half.y),
            vec2(tip.x - half.x * dir, tip.y - half.y),
            col,
        );
    }
    let outline = vec2(half.x + 2.0, half.y + 1.0);
    arrow(dl, vec2(pos.x + half.x + 1.0, pos.y), outline, 1.0, Color::BLACK);
    arrow(dl, vec2(pos.x + half.x, pos.y), half, 1.0, Color::WHITE);
    arrow(dl, vec2(pos.x + bar_w - half.x - 1.0, pos.y), outline, -1.0, Color::BLACK);
    arrow(dl, vec2(pos.x + bar_w - half.x, pos.y), half, -1.0, Color::WHITE);
}

impl Painter<'_> {
    /// Fills `min..max` with `col`; a translucent color is composited over a checkerboard of `grid_step` cells.
    pub(crate) fn render_color_rect_with_alpha_checkerboard(
        &mut self,
        min: Vec2f,
        max: Vec2f,
        col: Color,
        grid_step: f32,
        grid_off: Vec2f,
        rounding: f32,
        corners: DrawCornerFlags,
    ) {
        if col.a == 255 || grid_step <= 0.0 {
            self.dl.add_rect_filled(min, max, col, rounding, corners);
            return;
        }
        let (light, dark) = (alpha_blend(CHECKER_LIGHT, col), alpha_blend(CHECKER_DARK, col));
        self.dl.add_rect_filled(min, max, light, rounding, corners);
        let mut y = min.y + grid_off.y;
        let mut row = 0;
        while y < max.y {
            let (y1, y2) = (y.clamp(min.y, max.y), (y + grid_step).min(max.y));
            if y2 > y1 {
                let mut x = min.x + grid_off.x + (row & 1) as f32 * grid_step;
                while x < max.x {
                    let (x1, x2) = (x.clamp(min.x, max.x), (x + grid_step).min(max.x));
                    if x2 > x1 {
                        self.dl.add_rect_filled(vec2(x1, y1), vec2(x2, y2), dark, 0.0, DrawCornerFlags::NONE);
                    }
                    x += grid_step * 2.0;
                }
            }
            y += grid_step;
            row += 1;
        }
    }
}

/// Color options, swatches and tooltips.
impl Context {
    /// Sets the user options that color widgets fall back to. Groups left empty take [`ColorEditFlags::OPTIONS_DEFAULT`];
    /// each group must end up with exactly one bit.
    pub fn set_color_edit_options(&mut self, flags: ColorEditFlags) {
        let mut flags = flags;
        for mask in ColorEditFlags::GROUPS {
            if !flags.intersects(mask) {
                flags |= ColorEditFlags::OPTIONS_DEFAULT & mask;
            }
            debug_assert!((flags & mask).bits().is_power_of_two(), "one color option per group, got {:?}", flags & mask);
        }
        self.color_edit_options = flags;
    }

    /// `flags` with its empty groups and the non-group bits taken from the user options.
    fn with_color_edit_options(&self, flags: ColorEditFlags) -> ColorEditFlags {
        let opts = self.color_edit_options;
        let mut flags = flags;
        for mask in ColorEditFlags::GROUPS {
            if !flags.intersects(mask) {
                flags |= opts & mask;
            }
        }
        flags | (opts - (ColorEditFlags::INPUTS_MASK | ColorEditFlags::DATA_TYPE_MASK | ColorEditFlags::PICKER_MASK))
    }

    /// Color swatch, frame-height square when `size` is zero. Dragging it carries the color; hovering shows a
    /// [`Context::color_tooltip`] unless `NO_TOOLTIP`. Returns true when pressed.
    pub fn color_button(&mut self, desc_id: &str, col: Color, flags: ColorEditFlags, size: Vec2f) -> bool {
        if self.cw().skip_items {
            return false;
        }
        let id = self.get_id(desc_id);
        let default_size = self.get_frame_height();
        let size = vec2(if size.x == 0.0 { default_size } else { size.x }, if size.y == 0.0 { default_size } else { size.y });
        let pos = self.cw().dc.cursor_pos;
        let bb = rect(pos.x, pos.y, size.x, size.y);
        let pad_y = if size.y >= default_size { self.style.frame_padding.y } else { 0.0 };
        self.item_size(size, pad_y);
        if !self.item_add(bb, id) {
            return false;
        }
        let (mut hovered, _, pressed) = self.button_behavior(bb, id, ButtonFlags::NONE);

        let mut flags = flags;
        if flags.contains(ColorEditFlags::NO_ALPHA) {
            flags.remove(ColorEditFlags::ALPHA_PREVIEW | ColorEditFlags::ALPHA_PREVIEW_HALF);
        }
        let opaque = Color { a: 255, ..col };
        let grid_step = size.x.min(size.y) / 2.99;
        let rounding = self.style.frame_rounding.min(grid_step * 0.5);
        let inner = bb.expand(-0.75, -0.75);
        let (min, max) = (inner.min_pt(), inner.max_pt());

        self.render_nav_highlight(bb, id);
        let border = self.style.frame_border_size > 0.0;
        let mut p = self.painter();
        if flags.contains(ColorEditFlags::ALPHA_PREVIEW_HALF) && col.a < 255 {
            let mid_x = ((min.x + max.x) * 0.5).round();
            p.render_color_rect_with_alpha_checkerboard(vec2(mid_x, min.y), max, col, grid_step, vec2(-grid_step, 0.0), rounding, DrawCornerFlags::RIGHT);
            p.dl.add_rect_filled(min, vec2(mid_x, max.y), opaque, rounding, DrawCornerFlags::LEFT);
        } else {
            let shown = if flags.contains(ColorEditFlags::ALPHA_PREVIEW) { col } else { opaque };
            p.render_color_rect_with_alpha_checkerboard(min, max, shown, grid_step, vec2(0.0, 0.0), rounding, DrawCornerFlags::ALL);
        }
        if border {
            p.render_frame_border(bb.min_pt(), bb.max_pt(), rounding);
        } else {
            let frame = p.col(StyleColor::FrameBg);
            p.dl.add_rect(min, max, frame, rounding, DrawCornerFlags::ALL, 1.0);
        }

        if self.active_id == id && self.begin_drag_drop_source(DragDropFlags::NONE) {
            if flags.contains(ColorEditFlags::NO_ALPHA) {
                self.set_drag_drop_payload(PAYLOAD_TYPE_COLOR_3, &[col.r, col.g, col.b]);
            } else {
                self.set_drag_drop_payload(PAYLOAD_TYPE_COLOR_4, &[col.r, col.g, col.b, col.a]);
            }
            self.color_button(desc_id, col, flags, vec2(0.0, 0.0));
            self.same_line(0.0, -1.0);
            self.text("Color");
            self.end_drag_drop_source();
            hovered = false;
        }
        if hovered && !flags.contains(ColorEditFlags::NO_TOOLTIP) {
            self.color_tooltip(desc_id, col, flags & ColorEditFlags::ALPHA_PREVIEW_MASK);
        }
        pressed
    }

    /// Tooltip with the visible part of `text`, a large swatch and the hex, 8-bit and float values of `col`.
    pub fn color_tooltip(&mut self, text: &str, col: Color, flags: ColorEditFlags) {
        self.begin_tooltip_ex(WindowFlags::NONE, true);
        let text = find_rendered_text_end(text);
        if !text.is_empty() {
            self.text(text);
            self.separator();
        }
        let side = self.font_size * 3.0 + self.style.frame_padding.y * 2.0;
        self.color_button("##preview", col, (flags & ColorEditFlags::ALPHA_PREVIEW_MASK) | ColorEditFlags::NO_TOOLTIP, vec2(side, side));
        self.same_line(0.0, -1.0);
        let [r, g, b, a] = col.to_f32();
        let info = if flags.contains(ColorEditFlags::NO_ALPHA) {
            format!("{}\nR: {}, G: {}, B: {}\n({r:.3}, {g:.3}, {b:.3})", hex_string(col, false), col.r, col.g, col.b)
        } else {
            format!("{}\nR:{}, G:{}, B:{}, A:{}\n({r:.3}, {g:.3}, {b:.3}, {a:.3})", hex_string(col, true), col.r, col.g, col.b, col.a)
        };
        self.text(&info);
        self.end_tooltip();
    }

    /// Right-click popup of an editor: radio buttons for the option groups `flags` leaves open, and a
    /// "Copy as.." menu that writes the color to the clipboard text.
    pub fn color_edit_options_popup(&mut self, col: Color, flags: ColorEditFlags) {
        let allow_inputs = !flags.intersects(ColorEditFlags::INPUTS_MASK);
        let allow_data_type = !flags.intersects(ColorEditFlags::DATA_TYPE_MASK);
        if (!allow_inputs && !allow_data_type) || !self.begin_popup("context", WindowFlags::NONE) {
            return;
        }
        let mut opts = self.color_edit_options;
        if allow_inputs {
            for (name, bit) in [("RGB", ColorEditFlags::RGB), ("HSV", ColorEditFlags::HSV), ("HEX", ColorEditFlags::HEX)] {
                if self.radio_button(name, opts.contains(bit)) {
                    opts = (opts - ColorEditFlags::INPUTS_MASK) | bit;
                }
            }
        }
        if allow_data_type {
            if allow_inputs {
                self.separator();
            }
            for (name, bit) in [("0..255", ColorEditFlags::UINT8), ("0.00..1.00", ColorEditFlags::FLOAT)] {
                if self.radio_button(name, opts.contains(bit)) {
                    opts = (opts - ColorEditFlags::DATA_TYPE_MASK) | bit;
                }
            }
        }
        self.separator();
        if self.button_ex("Copy as..", vec2(-1.0, 0.0), ButtonFlags::NONE) {
            self.open_popup("Copy");
        }
        if self.begin_popup("Copy", WindowFlags::NONE) {
            for form in color_copy_forms(col, flags.contains(ColorEditFlags::NO_ALPHA)) {
                if self.selectable(&form, false, SelectableFlags::NONE, vec2(0.0, 0.0)) {
                    self.set_clipboard_text(&form);
                }
            }
            self.end_popup();
        }
        self.color_edit_options = opts;
        self.end_popup();
    }

    fn color_picker_options_popup(&mut self, flags: ColorEditFlags) {
        let allow_picker = !flags.intersects(ColorEditFlags::PICKER_MASK);
        let allow_alpha_bar = !flags.intersects(ColorEditFlags::NO_ALPHA | ColorEditFlags::ALPHA_BAR);
        if (!allow_picker && !allow_alpha_bar) || !self.begin_popup("context", WindowFlags::NONE) {
            return;
        }
        let mut opts = self.color_edit_options;
        if allow_picker {
            for (name, bit) in [("Hue bar", ColorEditFlags::PICKER_HUE_BAR), ("Hue wheel", ColorEditFlags::PICKER_HUE_WHEEL)] {
                if self.radio_button(name, opts.contains(bit)) {
                    opts = (opts - ColorEditFlags::PICKER_MASK) | bit;
                }
            }
        }
        if allow_alpha_bar {
            if allow_picker {
                self.separator();
            }
            let mut on = opts.contains(ColorEditFlags::ALPHA_BAR);
            if self.checkbox("Alpha Bar", &mut on) {
                opts.set(ColorEditFlags::ALPHA_BAR, on);
            }
        }
        self.color_edit_options = opts;
        self.end_popup();
    }

    /// Read-only framed text standing in for the hex input.
    fn color_hex_field(&mut self, str_id: &str, text: &str, width: f32) {
        let id = self.get_id(str_id);
        let pad = self.style.frame_padding;
        let pos = self.cw().dc.cursor_pos;
        let bb = rect(pos.x, pos.y, width, self.get_frame_height());
        self.item_size(vec2(bb.width, bb.height), pad.y);
        if !self.item_add(bb, id) {
            return;
        }
        self.item_hoverable(bb, id);
        let rounding = self.style.frame_rounding;
        let mut p = self.painter();
        let bg = p.col(StyleColor::FrameBg);
        p.render_frame(bb.min_pt(), bb.max_pt(), bg, true, rounding);
        p.render_text_clipped(add2(bb.min_pt(), pad), sub2(bb.max_pt(), pad), text, None, vec2(0.0, 0.0), Some(bb));
    }
}

/// Color editors.
impl Context {
    /// RGB editor; the alpha of `col` is left alone.
    pub fn color_edit3(&mut self, label: &str, col: &mut Color) -> bool { self.color_edit4_ex(label, col, ColorEditFlags::NO_ALPHA) }

    /// RGB editor with options.
    pub fn color_edit3_ex(&mut self, label: &str, col: &mut Color, flags: ColorEditFlags) -> bool {
        self.color_edit4_ex(label, col, flags | ColorEditFlags::NO_ALPHA)
    }

    /// RGBA editor.
    pub fn color_edit4(&mut self, label: &str, col: &mut Color) -> bool { self.color_edit4_ex(label, col, ColorEditFlags::NONE) }

    /// Color editor: one drag per component (or the hex text), a swatch opening a picker, and the label.
    /// Right-click opens the options popup. Accepts dropped colors. Returns true when `col` changed.
    pub fn color_edit4_ex(&mut self, label: &str, col: &mut Color, flags: ColorEditFlags) -> bool {
        if self.cw().skip_items {
            return false;
        }
        let square_sz = self.get_frame_height();
        let inner_x = self.style.item_inner_spacing.x;
        let w_extra = if flags.contains(ColorEditFlags::NO_SMALL_PREVIEW) { 0.0 } else { square_sz + inner_x };
        let w_items_all = self.calc_item_width() - w_extra;
        let alpha = !flags.contains(ColorEditFlags::NO_ALPHA);
        let hdr = flags.contains(ColorEditFlags::HDR);
        let components = if alpha { 4 } else { 3 };
        let flags_untouched = flags;
        let label_display = find_rendered_text_end(label);

        self.begin_group();
        self.push_id(label);

        let mut flags = flags;
        if flags.contains(ColorEditFlags::NO_INPUTS) {
            flags = (flags - ColorEditFlags::INPUTS_MASK) | ColorEditFlags::RGB | ColorEditFlags::NO_OPTIONS;
        }
        if !flags.contains(ColorEditFlags::NO_OPTIONS) {
            self.color_edit_options_popup(*col, flags);
        }
        let flags = self.with_color_edit_options(flags);

        let mut f = col.to_f32();
        if !alpha {
            f[3] = 1.0;
        }
        if flags.contains(ColorEditFlags::HSV) {
            let (h, s, v) = color_convert_rgb_to_hsv(f[0], f[1], f[2]);
            f[..3].copy_from_slice(&[h, s, v]);
        }
        let mut i = f.map(f32_to_int8_unbound);

        let mut value_changed = false;
        let mut value_changed_as_float = false;
        let show_inputs = !flags.contains(ColorEditFlags::NO_INPUTS);

        if show_inputs && flags.intersects(ColorEditFlags::RGB | ColorEditFlags::HSV) {
            let n_gaps = (components - 1) as f32;
            let w_item_one = ((w_items_all - inner_x * n_gaps) / components as f32).trunc().max(1.0);
            let w_item_last = (w_items_all - (w_item_one + inner_x) * n_gaps).trunc().max(1.0);
            let as_float = flags.contains(ColorEditFlags::FLOAT);
            let widest = self.calc_text_size(if as_float { "M:0.000" } else { "M:000" }, false, -1.0);
            let prefixes = if w_item_one <= widest.x {
                ["", "", "", ""]
            } else if flags.contains(ColorEditFlags::HSV) {
                ["H:", "S:", "V:", "A:"]
            } else {
                ["R:", "G:", "B:", "A:"]
            };
            const IDS: [&str; 4] = ["##X", "##Y", "##Z", "##W"];

            self.push_item_width(w_item_one);
            for n in 0..components {
                if n > 0 {
                    self.same_line(0.0, inner_x);
                }
                if n + 1 == components {
                    self.push_item_width(w_item_last);
                }
                if as_float {
                    let fmt = format!("{}%0.3f", prefixes[n]);
                    let v_max = if hdr { 0.0 } else { 1.0 };
                    if self.drag_float_ex(IDS[n], &mut f[n], 1.0 / 255.0, 0.0, v_max, &fmt, 1.0) {
                        value_changed = true;
                        value_changed_as_float = true;
                    }
                } else {
                    let fmt = format!("{}%3d", prefixes[n]);
                    let v_max = if hdr { 0 } else { 255 };
                    value_changed |= self.drag_int_ex(IDS[n], &mut i[n], 1.0, 0, v_max, &fmt);
                }
                if !flags.contains(ColorEditFlags::NO_OPTIONS) {
                    self.open_popup_on_item_click(Some("context"), MouseButton::Right);
                }
            }
            self.pop_item_width();
            self.pop_item_width();
        } else if show_inputs && flags.contains(ColorEditFlags::HEX) {
            let shown = Color { r: i[0].clamp(0, 255) as u8, g: i[1].clamp(0, 255) as u8, b: i[2].clamp(0, 255) as u8, a: i[3].clamp(0, 255) as u8 };
            self.color_hex_field("##Text", &hex_string(shown, alpha), w_items_all);
            if !flags.contains(ColorEditFlags::NO_OPTIONS) {
                self.open_popup_on_item_click(Some("context"), MouseButton::Right);
            }
        }

        let mut picker_active_window = None;
        if !flags.contains(ColorEditFlags::NO_SMALL_PREVIEW) {
            if show_inputs {
                self.same_line(0.0, inner_x);
            }
            if self.color_button("##ColorButton", *col, flags, vec2(0.0, 0.0)) && !flags.contains(ColorEditFlags::NO_PICKER) {
                self.color_picker_ref = *col;
                self.open_popup("picker");
                let r = self.last_item_rect();
                let below = vec2(r.x - 1.0, r.max_pt().y + self.style.item_spacing.y);
                self.set_next_window_pos(below, Cond::Always, vec2(0.0, 0.0));
            }
            if !flags.contains(ColorEditFlags::NO_OPTIONS) {
                self.open_popup_on_item_click(Some("context"), MouseButton::Right);
            }
            if self.begin_popup("picker", WindowFlags::NONE) {
                picker_active_window = Some(self.cw_id());
                if !label_display.is_empty() {
                    self.text(label_display);
                    self.separator();
                }
                let forwarded = ColorEditFlags::DATA_TYPE_MASK
                    | ColorEditFlags::PICKER_MASK
                    | ColorEditFlags::HDR
                    | ColorEditFlags::NO_ALPHA
                    | ColorEditFlags::ALPHA_BAR;
                let picker_flags =
                    (flags_untouched & forwarded) | ColorEditFlags::INPUTS_MASK | ColorEditFlags::NO_LABEL | ColorEditFlags::ALPHA_PREVIEW_HALF;
                self.push_item_width(square_sz * 12.0);
                let reference = self.color_picker_ref;
                value_changed |= self.color_picker4("##picker", col, picker_flags, Some(reference));
                self.pop_item_width();
                self.end_popup();
            }
        }

        if !label_display.is_empty() && !flags.contains(ColorEditFlags::NO_LABEL) {
            self.same_line(0.0, inner_x);
            self.text(label_display);
        }

        if picker_active_window.is_none() && value_changed {
            if !value_changed_as_float {
                f = i.map(|c| c as f32 / 255.0);
            }
            if flags.contains(ColorEditFlags::HSV) {
                let (r, g, b) = color_convert_hsv_to_rgb(f[0], f[1], f[2]);
                f[..3].copy_from_slice(&[r, g, b]);
            }
            let edited = Color::from_f32(f[0], f[1], f[2], f[3]);
            *col = if alpha { edited } else { Color { a: col.a, ..edited } };
        }

        self.pop_id();
        self.end_group();

        if self.cw().dc.last_item.status.contains(ItemStatusFlags::HOVERED_RECT) && self.begin_drag_drop_target() {
            if let Some(p) = self.accept_drag_drop_payload(PAYLOAD_TYPE_COLOR_3, DragDropFlags::NONE).filter(|p| p.data.len() >= 3) {
                let d = &p.data;
                *col = Color { r: d[0], g: d[1], b: d[2], a: col.a };
                value_changed = true;
            }
            if let Some(p) = self.accept_drag_drop_payload(PAYLOAD_TYPE_COLOR_4, DragDropFlags::NONE).filter(|p| p.data.len() >= 4) {
                let d = &p.data;
                *col = Color { r: d[0], g: d[1], b: d[2], a: if alpha { d[3] } else { col.a } };
                value_changed = true;
            }
            self.end_drag_drop_target();
        }

        // an active picker reports through the editor so is_item_active() covers both
        if let Some(pw) = picker_active_window {
            let active = self.active_id;
            if active.is_some() && self.active_id_window == Some(pw) {
                self.cw_mut().dc.last_item.id = active;
            }
        }
        value_changed
    }
}

/// Color pickers.
impl Context {
    /// Picker without alpha; the alpha of `col` is left alone.
    pub fn color_picker3(&mut self, label: &str, col: &mut Color, flags: ColorEditFlags) -> bool {
        let mut picked = Color { a: 255, ..*col };
        if !self.color_picker4(label, &mut picked, flags | ColorEditFlags::NO_ALPHA, None) {
            return false;
        }
        *col = Color { a: col.a, ..picked };
        true
    }

    /// Picker: a saturation/value square with a hue bar, or a saturation/value triangle inside a hue ring,
    /// an optional alpha bar, a side preview with the `ref_col` swatch (clicking it restores `ref_col`), and
    /// the requested inputs. Returns true when `col` changed.
    pub fn color_picker4(&mut self, label: &str, col: &mut Color, flags: ColorEditFlags, ref_col: Option<Color>) -> bool {
        if self.cw().skip_items {
            return false;
        }
        self.push_id(label);
        self.begin_group();

        let mut flags = flags;
        if !flags.contains(ColorEditFlags::NO_SIDE_PREVIEW) {
            flags |= ColorEditFlags::NO_SMALL_PREVIEW;
        }
        if !flags.contains(ColorEditFlags::NO_OPTIONS) {
            self.color_picker_options_popup(flags);
        }
        if !flags.intersects(ColorEditFlags::PICKER_MASK) {
            let user = self.color_edit_options & ColorEditFlags::PICKER_MASK;
            flags |= if user.is_empty() { ColorEditFlags::OPTIONS_DEFAULT & ColorEditFlags::PICKER_MASK } else { user };
        }
        debug_assert!((flags & ColorEditFlags::PICKER_MASK).bits().is_power_of_two(), "one picker mode, got {:?}", flags);
        if !flags.contains(ColorEditFlags::NO_OPTIONS) {
            flags |= self.color_edit_options & ColorEditFlags::ALPHA_BAR;
        }

        let alpha_bar = flags.contains(ColorEditFlags::ALPHA_BAR) && !flags.contains(ColorEditFlags::NO_ALPHA);
        let wheel = flags.contains(ColorEditFlags::PICKER_HUE_WHEEL);
        let picker_pos = self.cw().dc.cursor_pos;
        let square_sz = self.get_frame_height();
        let bars_width = square_sz;
        let inner_x = self.style.item_inner_spacing.x;
        let bar_count = if alpha_bar { 2.0 } else { 1.0 };
        let sv_picker_size = bars_width.max(self.calc_item_width() - bar_count * (bars_width + inner_x));
        let bar0_pos_x = picker_pos.x + sv_picker_size + inner_x;
        let bar1_pos_x = bar0_pos_x + bars_width + inner_x;
        let bars_triangles_half_sz = (bars_width * 0.20).trunc();

        let wheel_thickness = sv_picker_size * 0.08;
        let wheel_r_outer = sv_picker_size * 0.50;
        let wheel_r_inner = wheel_r_outer - wheel_thickness;
        let wheel_center = vec2(picker_pos.x + (sv_picker_size + bars_width) * 0.5, picker_pos.y + sv_picker_size * 0.5);
        let triangle_r = wheel_r_inner - (sv_picker_size * 0.027).trunc();
        let triangle_pa = vec2(triangle_r, 0.0);
        let triangle_pb = vec2(triangle_r * -0.5, triangle_r * -0.866025);
        let triangle_pc = vec2(triangle_r * -0.5, triangle_r * 0.866025);

        let backup = *col;
        let [r0, g0, b0, a0] = col.to_f32();
        let (mut h, mut s, mut v) = color_convert_rgb_to_hsv(r0, g0, b0);
        let mut a = a0;
        let mut value_changed = false;
        let mut value_changed_h = false;
        let mut value_changed_sv = false;
        let mouse = self.input.mouse_pos.unwrap_or(picker_pos);
        let unit = |p: f32| saturate(p / (sv_picker_size - 1.0));

        self.push_item_flag(ItemFlags::NO_NAV, true);
        if wheel {
            self.invisible_button("hsv", vec2(sv_picker_size + inner_x + bars_width, sv_picker_size));
            if self.is_item_active() {
                let initial_off = sub2(self.input.mouse_clicked_pos[MouseButton::Left.index()], wheel_center);
                let current_off = sub2(mouse, wheel_center);
                let initial_dist2 = length_sqr(initial_off);
                if initial_dist2 >= (wheel_r_inner - 1.0).powi(2) && initial_dist2 <= (wheel_r_outer + 1.0).powi(2) {
                    h = current_off.y.atan2(current_off.x) / PI * 0.5;
                    if h < 0.0 {
                        h += 1.0;
                    }
                    value_changed = true;
                    value_changed_h = true;
                }
                let (cos_h, sin_h) = ((-h * 2.0 * PI).cos(), (-h * 2.0 * PI).sin());
                if triangle_contains_point(triangle_pa, triangle_pb, triangle_pc, rotate(initial_off, cos_h, sin_h)) {
                    let mut unrotated = rotate(current_off, cos_h, sin_h);
                    if !triangle_contains_point(triangle_pa, triangle_pb, triangle_pc, unrotated) {
                        unrotated = triangle_closest_point(triangle_pa, triangle_pb, triangle_pc, unrotated);
                    }
                    let (uu, vv, _) = triangle_barycentric_coords(triangle_pa, triangle_pb, triangle_pc, unrotated);
                    v = (1.0 - vv).clamp(0.0001, 1.0);
                    s = (uu / v).clamp(0.0001, 1.0);
                    value_changed = true;
                    value_changed_sv = true;
                }
            }
            if !flags.contains(ColorEditFlags::NO_OPTIONS) {
                self.open_popup_on_item_click(Some("context"), MouseButton::Right);
            }
        } else {
            self.invisible_button("sv", vec2(sv_picker_size, sv_picker_size));
            if self.is_item_active() {
                s = unit(mouse.x - picker_pos.x);
                v = 1.0 - unit(mouse.y - picker_pos.y);
                value_changed = true;
                value_changed_sv = true;
            }
            if !flags.contains(ColorEditFlags::NO_OPTIONS) {
                self.open_popup_on_item_click(Some("context"), MouseButton::Right);
            }
            self.set_cursor_screen_pos(vec2(bar0_pos_x, picker_pos.y));
            self.invisible_button("hue", vec2(bars_width, sv_picker_size));
            if self.is_item_active() {
                h = unit(mouse.y - picker_pos.y);
                value_changed = true;
                value_changed_h = true;
            }
        }
        if alpha_bar {
            self.set_cursor_screen_pos(vec2(bar1_pos_x, picker_pos.y));
            self.invisible_button("alpha", vec2(bars_width, sv_picker_size));
            if self.is_item_active() {
                a = 1.0 - unit(mouse.y - picker_pos.y);
                value_changed = true;
            }
        }
        self.pop_item_flag();

        let mut restored = false;
        if !flags.contains(ColorEditFlags::NO_SIDE_PREVIEW) {
            self.same_line(0.0, inner_x);
            self.begin_group();
        }
        if !flags.contains(ColorEditFlags::NO_LABEL) {
            let label_display = find_rendered_text_end(label);
            if !label_display.is_empty() {
                if flags.contains(ColorEditFlags::NO_SIDE_PREVIEW) {
                    self.same_line(0.0, inner_x);
                }
                self.text(label_display);
            }
        }
        if !flags.contains(ColorEditFlags::NO_SIDE_PREVIEW) {
            let forwarded = flags
                & (ColorEditFlags::INPUTS_MASK
                    | ColorEditFlags::HDR
                    | ColorEditFlags::ALPHA_PREVIEW
                    | ColorEditFlags::ALPHA_PREVIEW_HALF
                    | ColorEditFlags::NO_TOOLTIP);
            let preview_size = vec2(square_sz * 3.0, square_sz * 2.0);
            let shown = |c: Color| if flags.contains(ColorEditFlags::NO_ALPHA) { Color { a: 255, ..c } } else { c };
            if flags.contains(ColorEditFlags::NO_LABEL) {
                self.text("Current");
            }
            self.color_button("##current", shown(*col), forwarded, preview_size);
            if let Some(reference) = ref_col {
                self.text("Original");
                if self.color_button("##original", shown(reference), forwarded, preview_size) {
                    *col = if flags.contains(ColorEditFlags::NO_ALPHA) { Color { a: col.a, ..reference } } else { reference };
                    value_changed = true;
                    restored = true;
                }
            }
            self.end_group();
        }

        if !restored && (value_changed_h || value_changed_sv) {
            let hue = if h >= 1.0 { h - 1e-5 } else { h };
            *col = Color::from_hsv(hue, s, v, col.a);
        }
        if !restored && alpha_bar {
            col.a = Color::from_f32(0.0, 0.0, 0.0, a).a;
        }

        if !flags.contains(ColorEditFlags::NO_INPUTS) {
            let right = if alpha_bar { bar1_pos_x } else { bar0_pos_x };
            self.push_item_width(right + bars_width - picker_pos.x);
            let sub_flags = (flags
                & (ColorEditFlags::DATA_TYPE_MASK
                    | ColorEditFlags::HDR
                    | ColorEditFlags::NO_ALPHA
                    | ColorEditFlags::NO_OPTIONS
                    | ColorEditFlags::NO_SMALL_PREVIEW
                    | ColorEditFlags::ALPHA_PREVIEW
                    | ColorEditFlags::ALPHA_PREVIEW_HALF))
                | ColorEditFlags::NO_PICKER;
            let mut edited = false;
            if flags.contains(ColorEditFlags::RGB) || !flags.intersects(ColorEditFlags::INPUTS_MASK) {
                edited |= self.color_edit4_ex("##rgb", col, sub_flags | ColorEditFlags::RGB);
            }
            if flags.contains(ColorEditFlags::HSV) {
                edited |= self.color_edit4_ex("##hsv", col, sub_flags | ColorEditFlags::HSV);
            }
            if flags.contains(ColorEditFlags::HEX) {
                edited |= self.color_edit4_ex("##hex", col, sub_flags | ColorEditFlags::HEX);
            }
            self.pop_item_width();
            if edited {
                value_changed = true;
                let [r, g, b, _] = col.to_f32();
                let (nh, ns, nv) = color_convert_rgb_to_hsv(r, g, b);
                // hue is undefined on greys, keep the one shown
                if ns > 0.0 {
                    h = nh;
                }
                s = ns;
                v = nv;
            }
        }

        if value_changed_h || value_changed_sv || restored {
            let [r, g, b, _] = col.to_f32();
            let (nh, ns, nv) = color_convert_rgb_to_hsv(r, g, b);
            if restored || ns > 0.0 {
                h = nh;
            }
            if restored {
                s = ns;
                v = nv;
            }
        }

        let hue_color = Color::from_hsv(h, 1.0, 1.0, 255);
        let opaque = Color { a: 255, ..*col };
        let sv_cursor_rad = if wheel { wheel_thickness * 0.40 } else { 6.0 };
        let mut p = self.painter();
        let sv_cursor_pos = if wheel {
            let segments = 6 * ((wheel_r_outer / 12.0) as usize).max(4);
            for k in 0..segments {
                let (t0, t1) = (k as f32 / segments as f32, (k + 1) as f32 / segments as f32);
                let (a0, a1) = (t0 * 2.0 * PI, t1 * 2.0 * PI);
                let at = |angle: f32, r: f32| add2(wheel_center, vec2(angle.cos() * r, angle.sin() * r));
                let (c0, c1) = (Color::from_hsv(t0, 1.0, 1.0, 255), Color::from_hsv(t1, 1.0, 1.0, 255));
                p.dl.add_quad_filled_multi_color(
                    [at(a0, wheel_r_inner), at(a0, wheel_r_outer), at(a1, wheel_r_outer), at(a1, wheel_r_inner)],
                    [c0, c0, c1, c1],
                );
            }
            let (cos_h, sin_h) = ((h * 2.0 * PI).cos(), (h * 2.0 * PI).sin());
            let ring_r = (wheel_r_inner + wheel_r_outer) * 0.5;
            let hue_cursor = add2(wheel_center, vec2(cos_h * ring_r, sin_h * ring_r));
            let hue_cursor_rad = if value_changed_h { wheel_thickness * 0.65 } else { wheel_thickness * 0.55 };
            let hue_segments = ((hue_cursor_rad / 1.4) as usize).clamp(9, 32);
            p.dl.add_circle_filled(hue_cursor, hue_cursor_rad, hue_color, hue_segments);
            p.dl.add_circle(hue_cursor, hue_cursor_rad + 1.0, MID_GREY, hue_segments, 1.0);
            p.dl.add_circle(hue_cursor, hue_cursor_rad, Color::WHITE, hue_segments, 1.0);

            let tra = add2(wheel_center, rotate(triangle_pa, cos_h, sin_h));
            let trb = add2(wheel_center, rotate(triangle_pb, cos_h, sin_h));
            let trc = add2(wheel_center, rotate(triangle_pc, cos_h, sin_h));
            p.dl.add_triangle_filled_multi_color(tra, trb, trc, hue_color, Color::BLACK, Color::WHITE);
            p.dl.add_triangle(tra, trb, trc, MID_GREY, 1.5);
            crate::lerp_vec2(crate::lerp_vec2(trc, tra, s), trb, 1.0 - v)
        } else {
            let sv_max = add2(picker_pos, vec2(sv_picker_size, sv_picker_size));
            let clear_black = Color { a: 0, ..Color::BLACK };
            p.dl.add_rect_filled_multi_color(picker_pos, sv_max, Color::WHITE, hue_color, hue_color, Color::WHITE);
            p.dl.add_rect_filled_multi_color(picker_pos, sv_max, clear_black, clear_black, Color::BLACK, Color::BLACK);
            p.render_frame_border(picker_pos, sv_max, 0.0);

            let step = sv_picker_size / 6.0;
            for k in 0..6 {
                let (c0, c1) = (Color::from_hsv(k as f32 / 6.0, 1.0, 1.0, 255), Color::from_hsv((k + 1) as f32 / 6.0, 1.0, 1.0, 255));
                let top = vec2(bar0_pos_x, picker_pos.y + k as f32 * step);
                let bottom = vec2(bar0_pos_x + bars_width, picker_pos.y + (k + 1) as f32 * step);
                p.dl.add_rect_filled_multi_color(top, bottom, c0, c0, c1, c1);
            }
            let bar0_line_y = (picker_pos.y + h * sv_picker_size).round();
            p.render_frame_border(vec2(bar0_pos_x, picker_pos.y), vec2(bar0_pos_x + bars_width, picker_pos.y + sv_picker_size), 0.0);
            let half = vec2(bars_triangles_half_sz + 1.0, bars_triangles_half_sz);
            render_bar_arrows(p.dl, vec2(bar0_pos_x - 1.0, bar0_line_y), half, bars_width + 2.0);

            vec2(
                (picker_pos.x + s * sv_picker_size).round().clamp(picker_pos.x + 2.0, picker_pos.x + sv_picker_size - 2.0),
                (picker_pos.y + (1.0 - v) * sv_picker_size).round().clamp(picker_pos.y + 2.0, picker_pos.y + sv_picker_size - 2.0),
            )
        };
        p.dl.add_circle_filled(sv_cursor_pos, sv_cursor_rad, opaque, 12);
        p.dl.add_circle(sv_cursor_pos, sv_cursor_rad + 1.0, MID_GREY, 12, 1.0);
        p.dl.add_circle(sv_cursor_pos, sv_cursor_rad, Color::WHITE, 12, 1.0);

        if alpha_bar {
            let min = vec2(bar1_pos_x, picker_pos.y);
            let max = vec2(bar1_pos_x + bars_width, picker_pos.y + sv_picker_size);
            p.render_color_rect_with_alpha_checkerboard(min, max, Color::TRANSPARENT, bars_width / 2.0, vec2(0.0, 0.0), 0.0, DrawCornerFlags::NONE);
            p.dl.add_rect_filled_multi_color(min, max, opaque, opaque, Color { a: 0, ..opaque }, Color { a: 0, ..opaque });
            let bar1_line_y = (picker_pos.y + (1.0 - a) * sv_picker_size).round();
            p.render_frame_border(min, max, 0.0);
            let half = vec2(bars_triangles_half_sz + 1.0, bars_triangles_half_sz);
            render_bar_arrows(p.dl, vec2(bar1_pos_x - 1.0, bar1_line_y), half, bars_width + 2.0);
        }

        self.end_group();
        self.pop_id();

        let unchanged = if flags.contains(ColorEditFlags::NO_ALPHA) {
            (col.r, col.g, col.b) == (backup.r, backup.g, backup.b)
        } else {
            *col == backup
        };
        value_changed && !unchanged
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{context, run_frame};

    fn in_window<R>(ctx: &mut Context, f: impl FnOnce(&mut Context) -> R) -> R {
        let mut out = None;
        run_frame(ctx, |ui| {
            ui.set_next_window_pos(vec2(0.0, 0.0), Cond::Always, vec2(0.0, 0.0));
            ui.set_next_window_size(vec2(300.0, 200.0), Cond::Always);
            ui.window("Colors", WindowFlags::NO_TITLE_BAR, |ui| out = Some(f(ui)));
        });
        out.expect("window content ran")
    }

    fn close(a: (f32, f32, f32), b: (f32, f32, f32)) -> bool { (a.0 - b.0).abs() < 1e-4 && (a.1 - b.1).abs() < 1e-4 && (a.2 - b.2).abs() < 1e-4 }

    const RED: Color = Color { r: 255, g: 0, b: 0, a: 255 };

    #[test]
    fn hsv_of_primaries_and_greys() {
        assert!(close(color_convert_rgb_to_hsv(1.0, 0.0, 0.0), (0.0, 1.0, 1.0)));
        assert!(close(color_convert_rgb_to_hsv(0.0, 1.0, 0.0), (1.0 / 3.0, 1.0, 1.0)));
        assert!(close(color_convert_rgb_to_hsv(0.0, 0.0, 0.5), (2.0 / 3.0, 1.0, 0.5)));
        assert!(close(color_convert_rgb_to_hsv(0.25, 0.25, 0.25), (0.0, 0.0, 0.25)));
        assert!(close(color_convert_hsv_to_rgb(0.5, 0.0, 0.75), (0.75, 0.75, 0.75)));
        assert!(close(color_convert_hsv_to_rgb(1.0 / 6.0, 1.0, 1.0), (1.0, 1.0, 0.0)));
    }

    #[test]
    fn hue_wraps_around() {
        assert!(close(color_convert_hsv_to_rgb(1.0, 1.0, 1.0), (1.0, 0.0, 0.0)));
        assert!(close(color_convert_hsv_to_rgb(-2.0 / 3.0, 1.0, 1.0), (0.0, 1.0, 0.0)));
    }

    #[test]
    fn user_options_fill_empty_groups() {
        let mut ctx = context();
        ctx.set_color_edit_options(ColorEditFlags::HSV);
        assert_eq!(ctx.color_edit_options, ColorEditFlags::HSV | ColorEditFlags::UINT8 | ColorEditFlags::PICKER_HUE_BAR);

        ctx.set_color_edit_options(ColorEditFlags::HEX | ColorEditFlags::FLOAT | ColorEditFlags::ALPHA_BAR);
        let explicit = ctx.with_color_edit_options(ColorEditFlags::RGB | ColorEditFlags::UINT8);
        assert!(explicit.contains(ColorEditFlags::RGB | ColorEditFlags::UINT8 | ColorEditFlags::ALPHA_BAR));
        assert!(!explicit.intersects(ColorEditFlags::HEX | ColorEditFlags::FLOAT));
        assert!(explicit.contains(ColorEditFlags::PICKER_HUE_BAR));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "one color option per group")]
    fn two_input_modes_are_rejected() {
        let mut ctx = context();
        ctx.set_color_edit_options(ColorEditFlags::RGB | ColorEditFlags::HSV);
    }

    #[test]
    fn copy_forms() {
        let col = Color { r: 255, g: 128, b: 0, a: 255 };
        assert_eq!(color_copy_forms(col, false), ["(1.000f, 0.502f, 0.000f, 1.000f)".to_string(), "(255,128,0,255)".into(), "0xFF8000FF".into()]);
        assert_eq!(color_copy_forms(Color { a: 7, ..col }, true)[2], "0xFF8000");
        assert_eq!(hex_string(col, false), "#FF8000");
    }

    #[test]
    fn checkerboard_blend() {
        assert_eq!(alpha_blend(CHECKER_LIGHT, Color::TRANSPARENT), CHECKER_LIGHT);
        assert_eq!(alpha_blend(CHECKER_DARK, Color::WHITE), Color::WHITE);
        assert_eq!(alpha_blend(Color::BLACK, Color { r: 255, g: 255, b: 255, a: 128 }).r, 128);
    }

    #[test]
    fn dragging_a_component_edits_the_channel() {
        let mut ctx = context();
        let mut col = Color::BLACK;
        in_window(&mut ctx, |ui| ui.color_edit4("c", &mut col));
        ctx.io_mut().mouse_down(20.0, 15.0, MouseButton::Left);
        in_window(&mut ctx, |ui| ui.color_edit4("c", &mut col));
        ctx.io_mut().mouse_move(30.0, 15.0);
        assert!(in_window(&mut ctx, |ui| ui.color_edit4("c", &mut col)));
        assert_eq!(col, Color { r: 10, g: 0, b: 0, a: 255 });
        assert!(ctx.active_id().is_some());
    }

    #[test]
    fn hsv_inputs_edit_value_and_keep_alpha() {
        let mut ctx = context();
        let mut col = Color { a: 40, ..RED };
        let flags = ColorEditFlags::HSV;
        in_window(&mut ctx, |ui| ui.color_edit3_ex("c", &mut col, flags));
        ctx.io_mut().mouse_down(130.0, 15.0, MouseButton::Left);
        in_window(&mut ctx, |ui| ui.color_edit3_ex("c", &mut col, flags));
        ctx.io_mut().mouse_move(75.0, 15.0);
        assert!(in_window(&mut ctx, |ui| ui.color_edit3_ex("c", &mut col, flags)));
        assert_eq!(col, Color { r: 200, g: 0, b: 0, a: 40 });
    }

    #[test]
    fn clicking_the_swatch_opens_the_picker() {
        let mut ctx = context();
        let mut col = RED;
        in_window(&mut ctx, |ui| ui.color_edit4("c", &mut col));
        ctx.io_mut().mouse_down(190.0, 15.0, MouseButton::Left);
        in_window(&mut ctx, |ui| ui.color_edit4("c", &mut col));
        ctx.io_mut().mouse_up(190.0, 15.0, MouseButton::Left);
        in_window(&mut ctx, |ui| ui.color_edit4("c", &mut col));
        assert_eq!(ctx.open_popup_stack.len(), 1);
        assert_eq!(ctx.color_picker_ref, RED);
        assert_eq!(col, RED);
    }

    #[test]
    fn no_picker_keeps_the_swatch_inert() {
        let mut ctx = context();
        let mut col = RED;
        let flags = ColorEditFlags::NO_PICKER;
        in_window(&mut ctx, |ui| ui.color_edit4_ex("c", &mut col, flags));
        ctx.io_mut().mouse_down(190.0, 15.0, MouseButton::Left);
        in_window(&mut ctx, |ui| ui.color_edit4_ex("c", &mut col, flags));
        ctx.io_mut().mouse_up(190.0, 15.0, MouseButton::Left);
        in_window(&mut ctx, |ui| ui.color_edit4_ex("c", &mut col, flags));
        assert!(ctx.open_popup_stack.is_empty());
    }

    #[test]
    fn sv_square_sets_saturation_and_value() {
        let mut ctx = context();
        let mut col = RED;
        let pick = |ui: &mut Context, col: &mut Color| ui.color_picker4("##p", col, ColorEditFlags::NONE, None);
        in_window(&mut ctx, |ui| pick(ui, &mut col));
        ctx.io_mut().mouse_down(8.0, 8.0, MouseButton::Left);
        assert!(in_window(&mut ctx, |ui| pick(ui, &mut col)));
        assert_eq!(col, Color::WHITE);

        ctx.io_mut().mouse_move(8.0, 179.0);
        assert!(in_window(&mut ctx, |ui| pick(ui, &mut col)));
        assert_eq!(col, Color::BLACK);
    }

    #[test]
    fn hue_bar_rotates_the_hue() {
        let mut ctx = context();
        let mut col = RED;
        in_window(&mut ctx, |ui| ui.color_picker4("##p", &mut col, ColorEditFlags::NONE, None));
        ctx.io_mut().mouse_down(190.0, 65.0, MouseButton::Left);
        assert!(in_window(&mut ctx, |ui| ui.color_picker4("##p", &mut col, ColorEditFlags::NONE, None)));
        assert_eq!(col, Color { r: 0, g: 255, b: 0, a: 255 });
    }

    #[test]
    fn picker3_leaves_alpha_alone() {
        let mut ctx = context();
        let mut col = Color { a: 99, ..RED };
        in_window(&mut ctx, |ui| ui.color_picker3("##p", &mut col, ColorEditFlags::NONE));
        ctx.io_mut().mouse_down(8.0, 8.0, MouseButton::Left);
        assert!(in_window(&mut ctx, |ui| ui.color_picker3("##p", &mut col, ColorEditFlags::NONE)));
        assert_eq!(col, Color { a: 99, ..Color::WHITE });
    }

    #[test]
    fn dropping_a_swatch_sets_the_editor() {
        let mut ctx = context();
        let src = Color { r: 1, g: 2, b: 3, a: 4 };
        let mut dst = Color::BLACK;
        let mut frame = |ctx: &mut Context| {
            in_window(ctx, |ui| {
                ui.color_button("src", src, ColorEditFlags::NONE, vec2(0.0, 0.0));
                ui.color_edit4("dst", &mut dst)
            })
        };
        frame(&mut ctx);
        ctx.io_mut().mouse_down(12.0, 12.0, MouseButton::Left);
        frame(&mut ctx);
        ctx.io_mut().mouse_move(12.0, 40.0);
        assert!(!frame(&mut ctx));
        assert!(ctx.is_drag_drop_active());
        ctx.io_mut().mouse_up(12.0, 40.0, MouseButton::Left);
        assert!(frame(&mut ctx));
        assert_eq!(dst, src);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn hsv_round_trip(r in 0.0f32..=1.0, g in 0.0f32..=1.0, b in 0.0f32..=1.0) {
            let (h, s, v) = color_convert_rgb_to_hsv(r, g, b);
            prop_assert!((0.0..=1.0).contains(&h) && (0.0..=1.0).contains(&s));
            let back = color_convert_hsv_to_rgb(h, s, v);
            prop_assert!((back.0 - r).abs() < 1e-4 && (back.1 - g).abs() < 1e-4 && (back.2 - b).abs() < 1e-4, "{:?} -> {:?}", (r, g, b), back);
        }
    }
}
