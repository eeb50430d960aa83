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
use bitflags::bitflags;

use crate::{
    add2, calc_typematic_repeat_amount, rect_min_max, sub2, vec2, Color, Context, Dir, DragDropFlags, DrawCornerFlags, HoveredFlags, Id, InputSource,
    ItemFlags, Key, MouseButton, RectExt, Rectf, StyleColor, TextureId, Vec2f,
};

bitflags! {
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
    /// Press policy and behavior of [`Context::button_behavior`].
    pub struct ButtonFlags : u32 {
        /// Press on click then release over the item. The default.
        const PRESSED_ON_CLICK_RELEASE = 1 << 0;
        /// Press as soon as the button goes down.
        const PRESSED_ON_CLICK = 1 << 1;
        /// Press on release without requiring a prior click on the item.
        const PRESSED_ON_RELEASE = 1 << 2;
        /// Press on double-click.
        const PRESSED_ON_DOUBLE_CLICK = 1 << 3;
        /// Press when hovered long enough while a drag and drop is in progress.
        const PRESSED_ON_DRAG_DROP_HOLD = 1 << 4;
        /// Fire repeatedly while held.
        const REPEAT = 1 << 5;
        /// Hit test against the root window hierarchy instead of the current window only.
        const FLATTEN_CHILDREN = 1 << 6;
        /// Let items submitted later take the hover.
        const ALLOW_ITEM_OVERLAP = 1 << 7;
        /// Pressing inside a popup does not close it.
        const DONT_CLOSE_POPUPS = 1 << 8;
        /// Inert.
        const DISABLED = 1 << 9;
        /// Align the text baseline with the current line.
        const ALIGN_TEXT_BASE_LINE = 1 << 10;
        /// Ignore presses while Ctrl, Shift or Alt is held.
        const NO_KEY_MODIFIERS = 1 << 11;
        /// Press without claiming the active id.
        const NO_HOLDING_ACTIVE_ID = 1 << 12;
        /// Do not move keyboard focus to the item on click.
        const NO_NAV_FOCUS = 1 << 13;
        /// No flags.
        const NONE = 0;
    }
}

impl ButtonFlags {
    fn press_policy() -> Self { Self::PRESSED_ON_CLICK_RELEASE | Self::PRESSED_ON_CLICK | Self::PRESSED_ON_RELEASE | Self::PRESSED_ON_DOUBLE_CLICK }
}

/// Interaction core.
impl Context {
    /// Runs the hover/press/hold state machine for an item already placed with [`Context::item_add`] and returns
    /// `(hovered, held, pressed)`.
    pub fn button_behavior(&mut self, bb: Rectf, id: Id, flags: ButtonFlags) -> (bool, bool, bool) {
        let wid = self.cw_id();
        let mut flags = flags;
        if flags.contains(ButtonFlags::DISABLED) {
            if self.active_id == id {
                self.clear_active_id();
            }
            return (false, false, false);
        }
        if !flags.intersects(ButtonFlags::press_policy()) {
            flags |= ButtonFlags::PRESSED_ON_CLICK_RELEASE;
        }

        let backup_hovered_window = self.hovered_window;
        if flags.contains(ButtonFlags::FLATTEN_CHILDREN) && self.hovered_root_window == Some(self.cw().root_window) {
            self.hovered_window = Some(wid);
        }

        let mut pressed = false;
        let mut hovered = self.item_hoverable(bb, id);

        if self.drag_drop.active && self.drag_drop.payload.source_id == id && !self.drag_drop.source_flags.contains(DragDropFlags::SOURCE_NO_DISABLE_HOVER) {
            hovered = false;
        }

        if self.drag_drop.active
            && flags.contains(ButtonFlags::PRESSED_ON_DRAG_DROP_HOLD)
            && !self.drag_drop.source_flags.contains(DragDropFlags::SOURCE_NO_HOLD_TO_OPEN_OTHERS)
            && self.is_item_hovered(HoveredFlags::ALLOW_WHEN_BLOCKED_BY_ACTIVE_ITEM)
        {
            hovered = true;
            self.set_hovered_id(id);
            let t = self.hovered_id_timer + 0.0001;
            if calc_typematic_repeat_amount(t, t - self.input.delta_time, 0.01, 0.70) > 0 {
                pressed = true;
                self.focus_window(Some(wid));
            }
        }

        if flags.contains(ButtonFlags::FLATTEN_CHILDREN) {
            self.hovered_window = backup_hovered_window;
        }

        // a later submitted item that was hovered last frame wins
        if hovered && flags.contains(ButtonFlags::ALLOW_ITEM_OVERLAP) && self.hovered_id_previous_frame != id && self.hovered_id_previous_frame.is_some() {
            hovered = false;
        }

        let button = MouseButton::Left;
        if hovered {
            let mods = self.input.key_mods;
            if !flags.contains(ButtonFlags::NO_KEY_MODIFIERS) || !(mods.is_ctrl() || mods.is_shift() || mods.is_alt()) {
                if flags.contains(ButtonFlags::PRESSED_ON_CLICK_RELEASE) && self.input.is_mouse_clicked(button, false) {
                    self.set_active_id(id, Some(wid));
                    if !flags.contains(ButtonFlags::NO_NAV_FOCUS) {
                        self.set_focus_id(id, wid);
                    }
                    self.focus_window(Some(wid));
                }
                if (flags.contains(ButtonFlags::PRESSED_ON_CLICK) && self.input.is_mouse_clicked(button, false))
                    || (flags.contains(ButtonFlags::PRESSED_ON_DOUBLE_CLICK) && self.input.is_mouse_double_clicked(button))
                {
                    pressed = true;
                    if flags.contains(ButtonFlags::NO_HOLDING_ACTIVE_ID) {
                        self.clear_active_id();
                    } else {
                        self.set_active_id(id, Some(wid));
                    }
                    self.focus_window(Some(wid));
                }
                if flags.contains(ButtonFlags::PRESSED_ON_RELEASE) && self.input.is_mouse_released(button) {
                    if !self.repeat_was_firing(flags) {
                        pressed = true;
                    }
                    self.clear_active_id();
                }
                if flags.contains(ButtonFlags::REPEAT)
                    && self.active_id == id
                    && self.input.mouse_down_duration[button.index()] > 0.0
                    && self.input.is_mouse_clicked(button, true)
                {
                    pressed = true;
                }
            }
            if pressed {
                self.nav_disable_highlight = true;
            }
        }

        if self.nav_id == id && !self.nav_disable_highlight && self.nav_disable_mouse_hover && (self.active_id.is_none() || self.active_id == id) {
            hovered = true;
        }
        if self.nav_activate_down_id == id {
            let by_code = self.nav_activate_id == id;
            let by_inputs = if flags.contains(ButtonFlags::REPEAT) {
                self.input.is_key_pressed(Key::Space, true) || self.input.is_key_pressed(Key::Enter, true)
            } else {
                self.nav_activate_pressed_id == id
            };
            if by_code || by_inputs {
                pressed = true;
            }
            if by_code || by_inputs || self.active_id == id {
                self.nav_activate_id = id;
                self.set_active_id(id, Some(wid));
                if !flags.contains(ButtonFlags::NO_NAV_FOCUS) {
                    self.set_focus_id(id, wid);
                }
            }
        }

        let mut held = false;
        if self.active_id == id {
            match self.active_id_source {
                InputSource::Mouse => {
                    if self.active_id_is_just_activated {
                        if let Some(m) = self.input.mouse_pos {
                            self.active_id_click_offset = sub2(m, bb.min_pt());
                        }
                    }
                    if self.input.is_mouse_down(button) {
                        held = true;
                    } else {
                        if hovered && flags.contains(ButtonFlags::PRESSED_ON_CLICK_RELEASE) && !self.repeat_was_firing(flags) && !self.drag_drop.active {
                            pressed = true;
                        }
                        self.clear_active_id();
                    }
                    if !flags.contains(ButtonFlags::NO_NAV_FOCUS) {
                        self.nav_disable_highlight = true;
                    }
                }
                InputSource::Nav => {
                    if self.nav_activate_down_id != id {
                        self.clear_active_id();
                    }
                }
                InputSource::None => {}
            }
        }
        (hovered, held, pressed)
    }

    // repeat mode already fired while held, so the release does not press again
    fn repeat_was_firing(&self, flags: ButtonFlags) -> bool {
        let (delay, _) = self.input.key_repeat();
        flags.contains(ButtonFlags::REPEAT) && self.input.mouse_down_duration_prev[MouseButton::Left.index()] >= delay
    }

    fn button_colors(held: bool, hovered: bool) -> StyleColor {
        if held && hovered {
            StyleColor::ButtonActive
        } else if hovered {
            StyleColor::ButtonHovered
        } else {
            StyleColor::Button
        }
    }
}

/// Buttons, check boxes, radio buttons and images.
impl Context {
    /// Framed text button sized by `size` (zero fits the label, negative aligns to the right edge).
    pub fn button_ex(&mut self, label: &str, size: Vec2f, flags: ButtonFlags) -> bool {
        if self.cw().skip_items {
            return false;
        }
        let id = self.get_id(label);
        let label_size = self.calc_text_size(label, true, -1.0);
        let pad = self.style.frame_padding;

        let (mut pos, base_offset, item_flags) = {
            let dc = &self.cw().dc;
            (dc.cursor_pos, dc.current_line_text_base_offset, dc.item_flags)
        };
        if flags.contains(ButtonFlags::ALIGN_TEXT_BASE_LINE) && pad.y < base_offset {
            pos.y += base_offset - pad.y;
        }
        let size = self.calc_item_size(size, label_size.x + pad.x * 2.0, label_size.y + pad.y * 2.0);
        let bb = crate::rect(pos.x, pos.y, size.x, size.y);
        self.item_size(size, pad.y);
        if !self.item_add(bb, id) {
            return false;
        }

        let mut flags = flags;
        if item_flags.contains(ItemFlags::BUTTON_REPEAT) {
            flags |= ButtonFlags::REPEAT;
        }
        let (hovered, held, pressed) = self.button_behavior(bb, id, flags);

        self.render_nav_highlight(bb, id);
        let (rounding, align) = (self.style.frame_rounding, self.style.button_text_align);
        let mut p = self.painter();
        let col = p.col(Self::button_colors(held, hovered));
        p.render_frame(bb.min_pt(), bb.max_pt(), col, true, rounding);
        p.render_text_clipped(add2(bb.min_pt(), pad), sub2(bb.max_pt(), pad), label, Some(label_size), align, Some(bb));
        pressed
    }

    /// Framed text button fitting its label.
    pub fn button(&mut self, label: &str) -> bool { self.button_ex(label, vec2(0.0, 0.0), ButtonFlags::NONE) }

    /// Button with no vertical padding, for use inside text.
    pub fn small_button(&mut self, label: &str) -> bool {
        let backup = self.style.frame_padding.y;
        self.style.frame_padding.y = 0.0;
        let pressed = self.button_ex(label, vec2(0.0, 0.0), ButtonFlags::ALIGN_TEXT_BASE_LINE);
        self.style.frame_padding.y = backup;
        pressed
    }

    /// Behaves like a button but draws nothing.
    pub fn invisible_button(&mut self, str_id: &str, size: Vec2f) -> bool {
        if self.cw().skip_items {
            return false;
        }
        let id = self.get_id(str_id);
        let size = self.calc_item_size(size, 0.0, 0.0);
        let pos = self.cw().dc.cursor_pos;
        let bb = crate::rect(pos.x, pos.y, size.x, size.y);
        self.item_size(size, 0.0);
        if !self.item_add(bb, id) {
            return false;
        }
        let (_, _, pressed) = self.button_behavior(bb, id, ButtonFlags::NONE);
        pressed
    }

    /// Square button showing an arrow.
    pub fn arrow_button(&mut self, str_id: &str, dir: Dir) -> bool {
        let sz = self.get_frame_height();
        self.arrow_button_ex(str_id, dir, vec2(sz, sz), ButtonFlags::NONE)
    }

    pub(crate) fn arrow_button_ex(&mut self, str_id: &str, dir: Dir, size: Vec2f, flags: ButtonFlags) -> bool {
        if self.cw().skip_items {
            return false;
        }
        let id = self.get_id(str_id);
        let pos = self.cw().dc.cursor_pos;
        let bb = crate::rect(pos.x, pos.y, size.x, size.y);
        let default_size = self.get_frame_height();
        self.item_size(size, if size.y >= default_size { self.style.frame_padding.y } else { 0.0 });
        if !self.item_add(bb, id) {
            return false;
        }
        let mut flags = flags;
        if self.cw().dc.item_flags.contains(ItemFlags::BUTTON_REPEAT) {
            flags |= ButtonFlags::REPEAT;
        }
        let (hovered, held, pressed) = self.button_behavior(bb, id, flags);

        self.render_nav_highlight(bb, id);
        let rounding = self.style.frame_rounding;
        let mut p = self.painter();
        let col = p.col(Self::button_colors(held, hovered));
        p.render_frame(bb.min_pt(), bb.max_pt(), col, true, rounding);
        let font_size = p.font_size();
        p.render_arrow(add2(bb.min_pt(), vec2((size.x - font_size) * 0.5, (size.y - font_size) * 0.5)), dir, 1.0);
        pressed
    }

    /// Round cross button centered at `center`; window close boxes use it.
    pub(crate) fn close_button(&mut self, id: Id, center: Vec2f, radius: f32) -> bool {
        let bb = rect_min_max(sub2(center, vec2(radius, radius)), add2(center, vec2(radius, radius)));
        let visible = self.item_add(bb, id);
        let (hovered, held, pressed) = self.button_behavior(bb, id, ButtonFlags::NONE);
        if !visible {
            return pressed;
        }
        let center = bb.center();
        let mut p = self.painter();
        if hovered {
            let col = p.col(if held { StyleColor::CloseButtonActive } else { StyleColor::CloseButtonHovered });
            p.dl.add_circle_filled(center, radius.max(2.0), col, 9);
        }
        let extent = radius * 0.7071 - 1.0;
        let center = sub2(center, vec2(0.5, 0.5));
        let col = p.col(StyleColor::Text);
        p.dl.add_line(add2(center, vec2(extent, extent)), add2(center, vec2(-extent, -extent)), col, 1.0);
        p.dl.add_line(add2(center, vec2(extent, -extent)), add2(center, vec2(-extent, extent)), col, 1.0);
        pressed
    }

    /// Collapse arrow of a title bar at `pos`; returns true when clicked.
    pub(crate) fn collapse_button(&mut self, id: Id, pos: Vec2f, collapsed: bool) -> bool {
        let sz = self.font_size;
        let bb = rect_min_max(add2(pos, vec2(1.0, 1.0)), sub2(add2(pos, vec2(sz, sz)), vec2(1.0, 1.0)));
        self.item_add(bb, id);
        let (hovered, held, pressed) = self.button_behavior(bb, id, ButtonFlags::NONE);
        let mut p = self.painter();
        if hovered {
            let col = p.col(Self::button_colors(held, hovered));
            p.dl.add_circle_filled(bb.center(), (sz * 0.5).max(2.0), col, 9);
        }
        p.render_arrow(pos, if collapsed { Dir::Right } else { Dir::Down }, 1.0);
        pressed
    }

    /// Check box bound to `v`; returns true when toggled.
    pub fn checkbox(&mut self, label: &str, v: &mut bool) -> bool {
        if self.cw().skip_items {
            return false;
        }
        let id = self.get_id(label);
        let label_size = self.calc_text_size(label, true, -1.0);
        let (pad, inner, rounding) = (self.style.frame_padding, self.style.item_inner_spacing, self.style.frame_rounding);
        let square = self.get_frame_height();
        let pos = self.cw().dc.cursor_pos;
        let check_bb = crate::rect(pos.x, pos.y, square, square);
        let label_w = if label_size.x > 0.0 { inner.x + label_size.x } else { 0.0 };
        let total_bb = rect_min_max(pos, add2(pos, vec2(square + label_w, label_size.y + pad.y * 2.0)));
        self.item_size(vec2(total_bb.width, total_bb.height), pad.y);
        if !self.item_add(total_bb, id) {
            return false;
        }
        let (hovered, held, pressed) = self.button_behavior(total_bb, id, ButtonFlags::NONE);
        if pressed {
            *v = !*v;
        }

        self.render_nav_highlight(total_bb, id);
        let mut p = self.painter();
        let frame = p.col(Self::frame_colors(held, hovered));
        p.render_frame(check_bb.min_pt(), check_bb.max_pt(), frame, true, rounding);
        if *v {
            let check_pad = (square / 6.0).trunc().max(1.0);
            let col = p.col(StyleColor::CheckMark);
            p.render_check(add2(check_bb.min_pt(), vec2(check_pad, check_pad)), col, square - check_pad * 2.0);
        }
        if label_size.x > 0.0 {
            p.render_text(vec2(check_bb.max_pt().x + inner.x, check_bb.y + pad.y), label, true);
        }
        pressed
    }

    /// Check box over the bits `flags_value` of `flags`.
    pub fn checkbox_flags(&mut self, label: &str, flags: &mut u32, flags_value: u32) -> bool {
        let mut v = (*flags & flags_value) == flags_value;
        let pressed = self.checkbox(label, &mut v);
        if pressed {
            if v {
                *flags |= flags_value;
            } else {
                *flags &= !flags_value;
            }
        }
        pressed
    }

    /// Radio button drawn selected when `active`; returns true when clicked.
    pub fn radio_button(&mut self, label: &str, active: bool) -> bool {
        if self.cw().skip_items {
            return false;
        }
        let id = self.get_id(label);
        let label_size = self.calc_text_size(label, true, -1.0);
        let (pad, inner, border) = (self.style.frame_padding, self.style.item_inner_spacing, self.style.frame_border_size);
        let square = self.get_frame_height();
        let pos = self.cw().dc.cursor_pos;
        let check_bb = crate::rect(pos.x, pos.y, square, square);
        let label_w = if label_size.x > 0.0 { inner.x + label_size.x } else { 0.0 };
        let total_bb = rect_min_max(pos, add2(pos, vec2(square + label_w, label_size.y + pad.y * 2.0)));
        self.item_size(vec2(total_bb.width, total_bb.height), pad.y);
        if !self.item_add(total_bb, id) {
            return false;
        }
        let center = check_bb.center();
        let center = vec2((center.x + 0.5).trunc(), (center.y + 0.5).trunc());
        let radius = square * 0.5;
        let (hovered, held, pressed) = self.button_behavior(total_bb, id, ButtonFlags::NONE);

        self.render_nav_highlight(total_bb, id);
        let mut p = self.painter();
        let frame = p.col(Self::frame_colors(held, hovered));
        p.dl.add_circle_filled(center, radius, frame, 16);
        if active {
            let check_pad = (square / 6.0).trunc().max(1.0);
            let col = p.col(StyleColor::CheckMark);
            p.dl.add_circle_filled(center, radius - check_pad, col, 16);
        }
        if border > 0.0 {
            let (shadow, line) = (p.col(StyleColor::BorderShadow), p.col(StyleColor::Border));
            p.dl.add_circle(add2(center, vec2(1.0, 1.0)), radius, shadow, 16, border);
            p.dl.add_circle(center, radius, line, 16, border);
        }
        if label_size.x > 0.0 {
            p.render_text(vec2(check_bb.max_pt().x + inner.x, check_bb.y + pad.y), label, true);
        }
        pressed
    }

    /// Radio button writing `v_button` into `v` when clicked.
    pub fn radio_button_int(&mut self, label: &str, v: &mut i32, v_button: i32) -> bool {
        let pressed = self.radio_button(label, *v == v_button);
        if pressed {
            *v = v_button;
        }
        pressed
    }

    /// Textured rectangle with an optional one pixel border.
    pub fn image(&mut self, texture: TextureId, size: Vec2f, uv0: Vec2f, uv1: Vec2f, tint: Color, border: Color) {
        if self.cw().skip_items {
            return;
        }
        let pos = self.cw().dc.cursor_pos;
        let mut bb = crate::rect(pos.x, pos.y, size.x, size.y);
        if !border.is_transparent() {
            bb.width += 2.0;
            bb.height += 2.0;
        }
        self.item_size(vec2(bb.width, bb.height), 0.0);
        if !self.item_add(bb, Id::NONE) {
            return;
        }
        let mut p = self.painter();
        if border.is_transparent() {
            p.dl.add_image(texture, bb.min_pt(), bb.max_pt(), uv0, uv1, tint);
        } else {
            p.dl.add_rect(bb.min_pt(), bb.max_pt(), border, 0.0, DrawCornerFlags::ALL, 1.0);
            p.dl.add_image(texture, add2(bb.min_pt(), vec2(1.0, 1.0)), sub2(bb.max_pt(), vec2(1.0, 1.0)), uv0, uv1, tint);
        }
    }

    /// Framed image acting as a button. A negative `frame_padding` uses the style padding.
    #[allow(clippy::too_many_arguments)]
    pub fn image_button(&mut self, texture: TextureId, size: Vec2f, uv0: Vec2f, uv1: Vec2f, frame_padding: i32, bg: Color, tint: Color) -> bool {
        if self.cw().skip_items {
            return false;
        }
        self.push_id_int(texture.raw() as i32);
        let id = self.get_id("#image");
        self.pop_id();

        let padding = if frame_padding >= 0 { vec2(frame_padding as f32, frame_padding as f32) } else { self.style.frame_padding };
        let pos = self.cw().dc.cursor_pos;
        let bb = rect_min_max(pos, add2(pos, add2(size, vec2(padding.x * 2.0, padding.y * 2.0))));
        let image_min = add2(pos, padding);
        let image_max = add2(image_min, size);
        self.item_size(vec2(bb.width, bb.height), 0.0);
        if !self.item_add(bb, id) {
            return false;
        }
        let (hovered, held, pressed) = self.button_behavior(bb, id, ButtonFlags::NONE);

        self.render_nav_highlight(bb, id);
        let rounding = padding.x.min(padding.y).clamp(0.0, self.style.frame_rounding);
        let mut p = self.painter();
        let col = p.col(Self::button_colors(held, hovered));
        p.render_frame(bb.min_pt(), bb.max_pt(), col, true, rounding);
        if !bg.is_transparent() {
            p.dl.add_rect_filled(image_min, image_max, bg, 0.0, DrawCornerFlags::ALL);
        }
        p.dl.add_image(texture, image_min, image_max, uv0, uv1, tint);
        pressed
    }

    /// Bullet point; the following item goes on the same line.
    pub fn bullet(&mut self) {
        if self.cw().skip_items {
            return;
        }
        let (font_size, pad) = (self.font_size, self.style.frame_padding);
        let (pos, line) = {
            let dc = &self.cw().dc;
            (dc.cursor_pos, dc.current_line_height.min(font_size + pad.y * 2.0).max(font_size))
        };
        let bb = crate::rect(pos.x, pos.y, font_size, line);
        self.item_size(vec2(bb.width, bb.height), 0.0);
        if self.item_add(bb, Id::NONE) {
            self.painter().render_bullet(add2(pos, vec2(pad.x + font_size * 0.5, line * 0.5)));
        }
        self.same_line(0.0, pad.x * 2.0);
    }

    pub(crate) fn frame_colors(held: bool, hovered: bool) -> StyleColor {
        if held && hovered {
            StyleColor::FrameBgActive
        } else if hovered {
            StyleColor::FrameBgHovered
        } else {
            StyleColor::FrameBg
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{context, run_frame};
    use crate::{Cond, WindowFlags};

    fn in_window<R>(ctx: &mut Context, f: impl FnOnce(&mut Context) -> R) -> R {
        let mut out = None;
        run_frame(ctx, |ui| {
            ui.set_next_window_pos(vec2(0.0, 0.0), Cond::Always, vec2(0.0, 0.0));
            ui.set_next_window_size(vec2(300.0, 200.0), Cond::Always);
            ui.window("Buttons", WindowFlags::NO_TITLE_BAR, |ui| out = Some(f(ui)));
        });
        out.expect("window content ran")
    }

    #[test]
    fn click_release_presses_once() {
        let mut ctx = context();
        in_window(&mut ctx, |ui| ui.button("OK"));
        ctx.io_mut().mouse_down(12.0, 12.0, MouseButton::Left);
        assert!(!in_window(&mut ctx, |ui| ui.button("OK")));
        assert!(ctx.active_id().is_some());
        ctx.io_mut().mouse_up(12.0, 12.0, MouseButton::Left);
        assert!(in_window(&mut ctx, |ui| ui.button("OK")));
        assert!(ctx.active_id().is_none());
        assert!(!in_window(&mut ctx, |ui| ui.button("OK")));
    }

    #[test]
    fn release_outside_does_not_press() {
        let mut ctx = context();
        in_window(&mut ctx, |ui| ui.button("OK"));
        ctx.io_mut().mouse_down(12.0, 12.0, MouseButton::Left);
        in_window(&mut ctx, |ui| ui.button("OK"));
        ctx.io_mut().mouse_move(150.0, 150.0);
        let (pressed, held) = in_window(&mut ctx, |ui| {
            let p = ui.button("OK");
            (p, ui.is_item_active())
        });
        assert!(!pressed && held);
        ctx.io_mut().mouse_up(150.0, 150.0, MouseButton::Left);
        assert!(!in_window(&mut ctx, |ui| ui.button("OK")));
    }

    #[test]
    fn press_on_click_fires_immediately() {
        let mut ctx = context();
        let bb = crate::rect(8.0, 8.0, 50.0, 20.0);
        let go = |ui: &mut Context| {
            let id = ui.get_id("raw");
            ui.item_add(bb, id);
            ui.button_behavior(bb, id, ButtonFlags::PRESSED_ON_CLICK)
        };
        in_window(&mut ctx, go);
        ctx.io_mut().mouse_down(20.0, 20.0, MouseButton::Left);
        assert_eq!(in_window(&mut ctx, go), (true, true, true));
        assert_eq!(in_window(&mut ctx, go), (true, true, false));
    }

    #[test]
    fn disabled_never_interacts() {
        let mut ctx = context();
        let bb = crate::rect(8.0, 8.0, 50.0, 20.0);
        let go = |ui: &mut Context| {
            let id = ui.get_id("raw");
            ui.item_add(bb, id);
            ui.button_behavior(bb, id, ButtonFlags::DISABLED | ButtonFlags::PRESSED_ON_CLICK)
        };
        in_window(&mut ctx, go);
        ctx.io_mut().mouse_down(20.0, 20.0, MouseButton::Left);
        assert_eq!(in_window(&mut ctx, go), (false, false, false));
        assert!(ctx.active_id().is_none());
    }

    #[test]
    fn checkbox_and_flags_toggle() {
        let mut ctx = context();
        let mut v = false;
        let mut flags = 0b100u32;
        let show = |ctx: &mut Context, v: &mut bool, flags: &mut u32| {
            in_window(ctx, |ui| {
                let a = ui.checkbox("check", v);
                let b = ui.checkbox_flags("bits", flags, 0b011);
                (a, b)
            })
        };
        show(&mut ctx, &mut v, &mut flags);
        ctx.io_mut().mouse_down(12.0, 12.0, MouseButton::Left);
        show(&mut ctx, &mut v, &mut flags);
        ctx.io_mut().mouse_up(12.0, 12.0, MouseButton::Left);
        assert_eq!(show(&mut ctx, &mut v, &mut flags), (true, false));
        assert!(v);

        // second row: frame height 19 plus spacing 4
        ctx.io_mut().mouse_down(12.0, 33.0, MouseButton::Left);
        show(&mut ctx, &mut v, &mut flags);
        ctx.io_mut().mouse_up(12.0, 33.0, MouseButton::Left);
        assert_eq!(show(&mut ctx, &mut v, &mut flags), (false, true));
        assert_eq!(flags, 0b111);
    }

    #[test]
    fn radio_buttons_write_their_value() {
        let mut ctx = context();
        let mut v = 0;
        let show = |ctx: &mut Context, v: &mut i32| {
            in_window(ctx, |ui| {
                ui.radio_button_int("a", v, 0);
                ui.same_line(0.0, -1.0);
                ui.radio_button_int("b", v, 1);
            })
        };
        show(&mut ctx, &mut v);
        // "a" spans 19 + 4 + 7, then 8 spacing
        ctx.io_mut().mouse_down(50.0, 12.0, MouseButton::Left);
        show(&mut ctx, &mut v);
        ctx.io_mut().mouse_up(50.0, 12.0, MouseButton::Left);
        show(&mut ctx, &mut v);
        assert_eq!(v, 1);
    }

    #[test]
    fn skipped_window_draws_nothing() {
        let mut ctx = context();
        run_frame(&mut ctx, |ui| {
            ui.set_next_window_size(vec2(200.0, 100.0), Cond::Always);
            ui.set_next_window_collapsed(true, Cond::Always);
            ui.begin("Collapsed", None, WindowFlags::NONE);
            let before = ui.window_draw_list().vtx_buffer.len();
            assert!(!ui.button("x"));
            let mut v = false;
            assert!(!ui.checkbox("c", &mut v));
            ui.bullet();
            assert_eq!(ui.window_draw_list().vtx_buffer.len(), before);
            ui.end();
        });
    }
}
