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
//! Combo boxes: a framed preview that opens a popup list below itself.

use bitflags::bitflags;

use crate::window::{apply_size_constraint, calc_size_auto_fit};
use crate::{
    find_best_window_pos_for_popup_ex, rect, vec2, ButtonFlags, Cond, Context, Dir, DrawCornerFlags, PopupPositionPolicy, RectExt, SelectableFlags, StyleColor,
    WindowFlags,
};

bitflags! {
    /// Combo options.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
    pub struct ComboFlags: u32 {
        /// Opens the list flush with the left edge of the frame, flipping only when it must.
        const POPUP_ALIGN_LEFT = 1 << 0;
        /// List shows at most 4 items.
        const HEIGHT_SMALL = 1 << 1;
        /// List shows at most 8 items (the default).
        const HEIGHT_REGULAR = 1 << 2;
        /// List shows at most 20 items.
        const HEIGHT_LARGE = 1 << 3;
        /// List grows as tall as the display allows.
        const HEIGHT_LARGEST = 1 << 4;
        /// No square arrow button on the right.
        const NO_ARROW_BUTTON = 1 << 5;
        /// Only the arrow button is shown.
        const NO_PREVIEW = 1 << 6;
        /// No option.
        const NONE = 0;
        /// Every height option.
        const HEIGHT_MASK = Self::HEIGHT_SMALL.bits() | Self::HEIGHT_REGULAR.bits() | Self::HEIGHT_LARGE.bits() | Self::HEIGHT_LARGEST.bits();
    }
}

impl Context {
    /// Height of a popup list showing `items` rows; non-positive means unbounded.
    pub(crate) fn calc_max_popup_height_from_item_count(&self, items: i32) -> f32 {
        if items <= 0 {
            return f32::MAX;
        }
        (self.font_size + self.style.item_spacing.y) * items as f32 - self.style.item_spacing.y + self.style.window_padding.y * 2.0
    }

    /// Draws the combo frame and, when its popup is open, begins the popup list. Returns true when the list is
    /// open; submit its items and call [`Context::end_combo`].
    pub fn begin_combo(&mut self, label: &str, preview: Option<&str>, flags: ComboFlags) -> bool {
        if self.cw().skip_items {
            return false;
        }
        debug_assert!(
            !flags.contains(ComboFlags::NO_ARROW_BUTTON | ComboFlags::NO_PREVIEW),
            "NO_ARROW_BUTTON and NO_PREVIEW are mutually exclusive"
        );
        debug_assert!((flags & ComboFlags::HEIGHT_MASK).bits().count_ones() <= 1, "at most one HEIGHT_* flag");

        let id = self.get_id(label);
        let w = self.calc_item_width();
        let label_size = self.calc_text_size(label, true, -1.0);
        let (pad, inner, rounding) = (self.style.frame_padding, self.style.item_inner_spacing, self.style.frame_rounding);
        let arrow_size = if flags.contains(ComboFlags::NO_ARROW_BUTTON) { 0.0 } else { self.get_frame_height() };
        let pos = self.cw().dc.cursor_pos;
        let frame_bb = rect(pos.x, pos.y, w, label_size.y + pad.y * 2.0);
        let label_w = if label_size.x > 0.0 { inner.x + label_size.x } else { 0.0 };
        let total_bb = rect(pos.x, pos.y, w + label_w, frame_bb.height);
        self.item_size(vec2(total_bb.width, total_bb.height), pad.y);
        if !self.item_add(total_bb, id) {
            return false;
        }

        let (hovered, _, pressed) = self.button_behavior(frame_bb, id, ButtonFlags::NONE);
        let mut popup_open = self.is_popup_open_id(id);

        self.render_nav_highlight(frame_bb, id);
        let (fmin, fmax) = (frame_bb.min_pt(), frame_bb.max_pt());
        {
            let mut p = self.painter();
            if !flags.contains(ComboFlags::NO_PREVIEW) {
                let col = p.col(if hovered { StyleColor::FrameBgHovered } else { StyleColor::FrameBg });
                p.dl.add_rect_filled(fmin, vec2(fmax.x - arrow_size, fmax.y), col, rounding, DrawCornerFlags::LEFT);
            }
            if !flags.contains(ComboFlags::NO_ARROW_BUTTON) {
                let col = p.col(if popup_open || hovered { StyleColor::ButtonHovered } else { StyleColor::Button });
                let corners = if w <= arrow_size { DrawCornerFlags::ALL } else { DrawCornerFlags::RIGHT };
                p.dl.add_rect_filled(vec2(fmax.x - arrow_size, fmin.y), fmax, col, rounding, corners);
                p.render_arrow(vec2(fmax.x - arrow_size + pad.y, fmin.y + pad.y), Dir::Down, 1.0);
            }
            p.render_frame_border(fmin, fmax, rounding);
            if let Some(preview) = preview.filter(|_| !flags.contains(ComboFlags::NO_PREVIEW)) {
                p.render_text_clipped(vec2(fmin.x + pad.x, fmin.y + pad.y), vec2(fmax.x - arrow_size, fmax.y), preview, None, vec2(0.0, 0.0), None);
            }
            if label_size.x > 0.0 {
                p.render_text(vec2(fmax.x + inner.x, fmin.y + pad.y), label, true);
            }
        }

        if (pressed || self.nav_activate_id == id) && !popup_open {
            self.open_popup_ex(id);
            popup_open = true;
        }
        if !popup_open {
            return false;
        }

        let items = if flags.contains(ComboFlags::HEIGHT_SMALL) {
            4
        } else if flags.contains(ComboFlags::HEIGHT_LARGE) {
            20
        } else if flags.contains(ComboFlags::HEIGHT_LARGEST) {
            -1
        } else {
            8
        };
        if self.next_window_data.size_constraint.is_none() {
            let max_h = self.calc_max_popup_height_from_item_count(items);
            self.set_next_window_size_constraints(vec2(w, 0.0), vec2(f32::MAX, max_h));
        }

        // combo windows are recycled per popup depth
        let name = format!("##Combo_{:02}", self.current_popup_stack.len());
        let (min, max) = self.next_window_data.size_constraint.unwrap_or((vec2(-1.0, -1.0), vec2(-1.0, -1.0)));
        let display = self.display_size();
        let outer = self.popup_allowed_rect();
        if let Some(popup) = self.windows.get_mut(crate::Id::from_name(&name)).filter(|p| p.was_active) {
            let expected = apply_size_constraint(calc_size_auto_fit(popup, &self.style, display), min, max);
            if flags.contains(ComboFlags::POPUP_ALIGN_LEFT) {
                popup.auto_pos_last_direction = Some(Dir::Left);
            }
            let mut last_dir = popup.auto_pos_last_direction;
            let pos = find_best_window_pos_for_popup_ex(vec2(fmin.x, fmax.y), expected, &mut last_dir, outer, frame_bb, PopupPositionPolicy::ComboBox);
            popup.auto_pos_last_direction = last_dir;
            self.set_next_window_pos(pos, Cond::Always, vec2(0.0, 0.0));
        }

        let window_flags = WindowFlags::ALWAYS_AUTO_RESIZE | WindowFlags::POPUP | WindowFlags::NO_TITLE_BAR | WindowFlags::NO_RESIZE | WindowFlags::NO_SAVED_SETTINGS;
        if !self.begin(&name, None, window_flags) {
            self.end_popup();
            return false;
        }
        // line the list text up with the preview text
        let indent = self.style.frame_padding.x - self.style.window_padding.x;
        if indent != 0.0 {
            self.indent(indent);
        }
        true
    }

    /// Closes the list opened by a successful [`Context::begin_combo`].
    pub fn end_combo(&mut self) {
        let indent = self.style.frame_padding.x - self.style.window_padding.x;
        if indent != 0.0 {
            self.unindent(indent);
        }
        self.end_popup();
    }

    /// Combo over `items` storing the chosen index in `current`; an out-of-range index shows no preview.
    /// `max_height_in_items` of -1 keeps the regular height.
    pub fn combo(&mut self, label: &str, current: &mut usize, items: &[&str], max_height_in_items: i32) -> bool {
        let preview = items.get(*current).copied();
        if max_height_in_items != -1 && self.next_window_data.size_constraint.is_none() {
            let max_h = self.calc_max_popup_height_from_item_count(max_height_in_items);
            self.set_next_window_size_constraints(vec2(0.0, 0.0), vec2(f32::MAX, max_h));
        }
        if !self.begin_combo(label, preview, ComboFlags::NONE) {
            return false;
        }
        let mut changed = false;
        for (i, item) in items.iter().enumerate() {
            self.push_id_int(i as i32);
            if self.selectable(item, i == *current, SelectableFlags::NONE, vec2(0.0, 0.0)) {
                changed = true;
                *current = i;
            }
            self.pop_id();
        }
        self.end_combo();
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{context, run_frame};
    use crate::MouseButton;

    const ITEMS: [&str; 3] = ["alpha", "beta", "gamma"];

    fn show(ctx: &mut Context, current: &mut usize) -> (bool, Option<crate::Rectf>) {
        let mut changed = false;
        let mut popup_rect = None;
        run_frame(ctx, |ui| {
            ui.set_next_window_pos(vec2(0.0, 0.0), Cond::Always, vec2(0.0, 0.0));
            ui.set_next_window_size(vec2(300.0, 200.0), Cond::Always);
            ui.window("Combo", WindowFlags::NO_TITLE_BAR, |ui| {
                changed = ui.combo("pick", current, &ITEMS, -1);
            });
            popup_rect = ui.find_window_by_name("##Combo_00").filter(|w| w.is_active()).map(|w| w.rect());
        });
        (changed, popup_rect)
    }

    #[test]
    fn clicking_opens_the_list_below_and_picks_an_item() {
        let mut ctx = context();
        let mut current = 0;
        show(&mut ctx, &mut current);
        ctx.io_mut().mouse_down(20.0, 12.0, MouseButton::Left);
        show(&mut ctx, &mut current);
        ctx.io_mut().mouse_up(20.0, 12.0, MouseButton::Left);
        show(&mut ctx, &mut current);
        show(&mut ctx, &mut current);
        let (_, r) = show(&mut ctx, &mut current);
        let r = r.expect("list stays open");
        assert_eq!(r.y, 8.0 + 19.0);
        assert_eq!(r.x, 8.0);

        // third row of the list
        let y = r.y + 8.0 + 2.0 * 17.0 + 5.0;
        ctx.io_mut().mouse_down(r.x + 20.0, y, MouseButton::Left);
        show(&mut ctx, &mut current);
        ctx.io_mut().mouse_up(r.x + 20.0, y, MouseButton::Left);
        let (changed, _) = show(&mut ctx, &mut current);
        assert!(changed);
        assert_eq!(current, 2);
        let (_, r) = show(&mut ctx, &mut current);
        assert!(r.is_none());
    }

    #[test]
    fn popup_height_counts_items() {
        let ctx = context();
        assert_eq!(ctx.calc_max_popup_height_from_item_count(-1), f32::MAX);
        assert_eq!(ctx.calc_max_popup_height_from_item_count(4), (13.0 + 4.0) * 4.0 - 4.0 + 16.0);
    }
}
