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
//! Selectable rows: full-width highlighted labels used by lists, combos and menus.

use bitflags::bitflags;

use crate::{rect_min_max, vec2, ButtonFlags, Context, ItemFlags, RectExt, StyleColor, Vec2f};

bitflags! {
    /// Selectable options. `MENU`, `MENU_ITEM`, `DRAW_FILLED` and `DISABLED` are set by menus.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
    pub struct SelectableFlags: u32 {
        /// Pressing does not close the parent popup.
        const DONT_CLOSE_POPUPS = 1 << 0;
        /// Extends the hit box over every column.
        const SPAN_ALL_COLUMNS = 1 << 1;
        /// Also reports a press on double-click.
        const ALLOW_DOUBLE_CLICK = 1 << 2;
        /// Presses on click without holding the active id (menu headers).
        const MENU = 1 << 3;
        /// Presses on release (menu items).
        const MENU_ITEM = 1 << 4;
        /// Grayed out and never selected.
        const DISABLED = 1 << 5;
        /// Highlight fills the available width even with an explicit size.
        const DRAW_FILLED = 1 << 6;
        /// No option.
        const NONE = 0;
    }
}

impl Context {
    /// A row that highlights on hover and when `selected`; returns true when pressed. A zero `size` axis takes
    /// the label size, and the highlight spans to the content edge.
    pub fn selectable(&mut self, label: &str, selected: bool, flags: SelectableFlags, size: Vec2f) -> bool {
        if self.cw().skip_items {
            return false;
        }
        let id = self.get_id(label);
        let label_size = self.calc_text_size(label, true, -1.0);
        let item_size = vec2(if size.x != 0.0 { size.x } else { label_size.x }, if size.y != 0.0 { size.y } else { label_size.y });

        let (spacing, win_flags) = (self.style.item_spacing, self.cw().flags);
        let w = self.cw();
        let (win_pos, window_padding, cursor) = (w.pos, w.window_padding, w.dc.cursor_pos);
        let pos = vec2(cursor.x, cursor.y + w.dc.current_line_text_base_offset);
        let dont_close_item = w.dc.item_flags.contains(ItemFlags::SELECTABLE_DONT_CLOSE_POPUP);
        let bb = rect_min_max(pos, vec2(pos.x + item_size.x, pos.y + item_size.y));
        self.item_size(item_size, 0.0);

        let max_x = if flags.contains(SelectableFlags::SPAN_ALL_COLUMNS) { self.get_window_content_region_max().x } else { self.get_content_region_max().x };
        let w_draw = label_size.x.max(win_pos.x + max_x - window_padding.x - pos.x);
        let fill = size.x == 0.0 || flags.contains(SelectableFlags::DRAW_FILLED);
        let draw_size = vec2(if fill { w_draw } else { size.x }, if size.y != 0.0 { size.y } else { item_size.y });
        let mut max = vec2(pos.x + draw_size.x, pos.y + draw_size.y);
        if fill {
            max.x += window_padding.x;
        }
        // rows pack tightly: the hit box covers the item spacing around them
        let (sl, su) = ((spacing.x * 0.5).trunc(), (spacing.y * 0.5).trunc());
        let bb_spacing = rect_min_max(vec2(pos.x - sl, pos.y - su), vec2(max.x + spacing.x - sl, max.y + spacing.y - su));
        if !self.item_add(bb_spacing, id) {
            return false;
        }

        let mut button_flags = ButtonFlags::NONE;
        if flags.contains(SelectableFlags::MENU) {
            button_flags |= ButtonFlags::PRESSED_ON_CLICK | ButtonFlags::NO_HOLDING_ACTIVE_ID;
        }
        if flags.contains(SelectableFlags::MENU_ITEM) || (win_flags.is_popup() && !flags.contains(SelectableFlags::MENU)) {
            button_flags |= ButtonFlags::PRESSED_ON_RELEASE;
        }
        if flags.contains(SelectableFlags::DISABLED) {
            button_flags |= ButtonFlags::DISABLED;
        }
        if flags.contains(SelectableFlags::ALLOW_DOUBLE_CLICK) {
            button_flags |= ButtonFlags::PRESSED_ON_CLICK_RELEASE | ButtonFlags::PRESSED_ON_DOUBLE_CLICK;
        }
        let (hovered, held, pressed) = self.button_behavior(bb_spacing, id, button_flags);
        let selected = selected && !flags.contains(SelectableFlags::DISABLED);

        // mouse hover moves the keyboard focus so navigation resumes from here
        if (pressed || hovered) && !self.nav_disable_mouse_hover && self.nav_window == Some(self.cw_id()) {
            self.nav_disable_highlight = true;
            self.nav_id = id;
        }

        if hovered || selected {
            let idx = if held && hovered {
                StyleColor::HeaderActive
            } else if hovered {
                StyleColor::HeaderHovered
            } else {
                StyleColor::Header
            };
            {
                let mut p = self.painter();
                let col = p.col(idx);
                p.render_frame(bb_spacing.min_pt(), bb_spacing.max_pt(), col, false, 0.0);
            }
            self.render_nav_highlight(bb_spacing, id);
        }

        let disabled = flags.contains(SelectableFlags::DISABLED);
        if disabled {
            let col = self.style.color(StyleColor::TextDisabled, 1.0);
            self.push_style_color(StyleColor::Text, col);
        }
        self.painter().render_text_clipped(bb.min_pt(), bb_spacing.max_pt(), label, Some(label_size), vec2(0.0, 0.0), None);
        if disabled {
            self.pop_style_color(1);
        }

        if pressed && win_flags.is_popup() && !flags.contains(SelectableFlags::DONT_CLOSE_POPUPS) && !dont_close_item {
            self.close_current_popup();
        }
        pressed
    }

    /// [`Context::selectable`] toggling `selected` when pressed.
    pub fn selectable_toggle(&mut self, label: &str, selected: &mut bool, flags: SelectableFlags, size: Vec2f) -> bool {
        if self.selectable(label, *selected, flags, size) {
            *selected = !*selected;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{context, run_frame};
    use crate::{Cond, MouseButton, WindowFlags};

    fn rows(ctx: &mut Context, sel: &mut [bool; 3]) {
        run_frame(ctx, |ui| {
            ui.set_next_window_pos(vec2(0.0, 0.0), Cond::Always, vec2(0.0, 0.0));
            ui.set_next_window_size(vec2(200.0, 200.0), Cond::Always);
            ui.window("List", WindowFlags::NO_TITLE_BAR, |ui| {
                for (i, s) in sel.iter_mut().enumerate() {
                    ui.selectable_toggle(&format!("row {}", i), s, SelectableFlags::NONE, vec2(0.0, 0.0));
                }
            });
        });
    }

    #[test]
    fn clicking_a_row_toggles_it() {
        let mut ctx = context();
        let mut sel = [false; 3];
        rows(&mut ctx, &mut sel);
        // rows are 13 px apart plus 4 px spacing: the second row spans y 25..38
        ctx.io_mut().mouse_down(150.0, 30.0, MouseButton::Left);
        rows(&mut ctx, &mut sel);
        ctx.io_mut().mouse_up(150.0, 30.0, MouseButton::Left);
        rows(&mut ctx, &mut sel);
        assert_eq!(sel, [false, true, false]);
    }

    #[test]
    fn highlight_spans_the_window() {
        let mut ctx = context();
        let mut r = None;
        run_frame(&mut ctx, |ui| {
            ui.set_next_window_pos(vec2(0.0, 0.0), Cond::Always, vec2(0.0, 0.0));
            ui.set_next_window_size(vec2(200.0, 200.0), Cond::Always);
            ui.window("List", WindowFlags::NO_TITLE_BAR, |ui| {
                ui.selectable("x", false, SelectableFlags::NONE, vec2(0.0, 0.0));
                r = Some(ui.last_item_rect());
            });
        });
        let r = r.expect("row submitted");
        assert_eq!(r.x, 4.0);
        assert_eq!(r.max_pt().x, 200.0 - 4.0);
    }
}
