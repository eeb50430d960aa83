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
//! Static text items and separators.

use crate::{add2, rect, rect_min_max, vec2, Color, Context, LayoutType, RectExt, StyleColor};

impl Context {
    /// Plain text, wrapped at the pushed wrap position when one is set.
    pub fn text(&mut self, text: &str) {
        if self.cw().skip_items {
            return;
        }
        let dc = &self.cw().dc;
        let (cursor, wrap_pos_x) = (dc.cursor_pos, dc.text_wrap_pos);
        let text_pos = vec2(cursor.x, cursor.y + dc.current_line_text_base_offset);
        let wrap_width = if wrap_pos_x >= 0.0 { self.calc_wrap_width_for_pos(cursor, wrap_pos_x) } else { 0.0 };
        let size = self.calc_text_size(text, false, wrap_width);
        let bb = rect(text_pos.x, text_pos.y, size.x, size.y);
        self.item_size(size, 0.0);
        if !self.item_add(bb, crate::Id::NONE) {
            return;
        }
        self.painter().render_text_wrapped(text_pos, text, wrap_width);
    }

    /// Text in `col`.
    pub fn text_colored(&mut self, col: Color, text: &str) {
        self.push_style_color(StyleColor::Text, col);
        self.text(text);
        self.pop_style_color(1);
    }

    /// Text in the disabled text color.
    pub fn text_disabled(&mut self, text: &str) {
        let col = self.style.color(StyleColor::TextDisabled, 1.0);
        self.text_colored(col, text);
    }

    /// Text wrapped at the window content edge unless a wrap position is already pushed.
    pub fn text_wrapped(&mut self, text: &str) {
        let need_wrap = self.cw().dc.text_wrap_pos < 0.0;
        if need_wrap {
            self.push_text_wrap_pos(0.0);
        }
        self.text(text);
        if need_wrap {
            self.pop_text_wrap_pos();
        }
    }

    /// Value text in a widget-sized frame followed by `label`, aligned like the other labelled widgets.
    pub fn label_text(&mut self, label: &str, text: &str) {
        if self.cw().skip_items {
            return;
        }
        let (pad, inner) = (self.style.frame_padding, self.style.item_inner_spacing);
        let w = self.calc_item_width();
        let label_size = self.calc_text_size(label, true, -1.0);
        let pos = self.cw().dc.cursor_pos;
        let value_bb = rect(pos.x, pos.y, w, label_size.y + pad.y * 2.0);
        let label_w = if label_size.x > 0.0 { inner.x + label_size.x } else { 0.0 };
        let total_bb = rect(pos.x, pos.y, w + label_w, label_size.y + pad.y * 2.0);
        self.item_size(vec2(total_bb.width, total_bb.height), pad.y);
        if !self.item_add(total_bb, crate::Id::NONE) {
            return;
        }
        let mut p = self.painter();
        p.render_text_clipped(value_bb.min_pt(), value_bb.max_pt(), text, None, vec2(0.0, 0.5), None);
        if label_size.x > 0.0 {
            p.render_text(vec2(value_bb.max_pt().x + inner.x, value_bb.y + pad.y), label, true);
        }
    }

    /// Text preceded by a bullet.
    pub fn bullet_text(&mut self, text: &str) {
        if self.cw().skip_items {
            return;
        }
        let (pad, font_size) = (self.style.frame_padding, self.font_size);
        let label_size = self.calc_text_size(text, false, -1.0);
        let dc = &self.cw().dc;
        let text_base_offset_y = dc.current_line_text_base_offset.max(0.0);
        let line_height = dc.current_line_height.min(font_size + pad.y * 2.0).max(font_size);
        let pos = dc.cursor_pos;
        let w = font_size + if label_size.x > 0.0 { label_size.x + pad.x * 2.0 } else { 0.0 };
        let bb = rect(pos.x, pos.y, w, line_height.max(label_size.y));
        self.item_size(vec2(bb.width, bb.height), 0.0);
        if !self.item_add(bb, crate::Id::NONE) {
            return;
        }
        let mut p = self.painter();
        p.render_bullet(add2(pos, vec2(pad.x + font_size * 0.5, line_height * 0.5)));
        p.render_text(add2(pos, vec2(font_size + pad.x * 2.0, text_base_offset_y)), text, false);
    }

    /// Horizontal rule across the window, or a vertical one inside a horizontal layout.
    pub fn separator(&mut self) {
        if self.cw().skip_items {
            return;
        }
        let w = self.cw();
        let cursor = w.dc.cursor_pos;
        if w.dc.layout_type == LayoutType::Horizontal {
            let bb = rect_min_max(cursor, vec2(cursor.x + 1.0, cursor.y + w.dc.current_line_height));
            self.item_size(vec2(bb.width, 0.0), 0.0);
            if !self.item_add(bb, crate::Id::NONE) {
                return;
            }
            let mut p = self.painter();
            let col = p.col(StyleColor::Separator);
            p.dl.add_line(bb.min_pt(), vec2(bb.x, bb.max_pt().y), col, 1.0);
            return;
        }

        let mut x1 = w.pos.x;
        if !w.dc.group_stack.is_empty() {
            x1 += w.dc.indent_x;
        }
        let bb = rect_min_max(vec2(x1, cursor.y), vec2(w.pos.x + w.size.x, cursor.y + 1.0));
        // zero size so the rule never feeds back into auto-fit
        self.item_size(vec2(0.0, 0.0), 0.0);
        if !self.item_add(bb, crate::Id::NONE) {
            return;
        }
        let mut p = self.painter();
        let col = p.col(StyleColor::Separator);
        p.dl.add_line(bb.min_pt(), vec2(bb.max_pt().x, bb.y), col, 1.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{context, run_frame};
    use crate::{Cond, WindowFlags};

    fn in_window<R>(f: impl FnOnce(&mut Context) -> R) -> R {
        let mut ctx = context();
        let mut out = None;
        run_frame(&mut ctx, |ui| {
            ui.set_next_window_pos(vec2(0.0, 0.0), Cond::Always, vec2(0.0, 0.0));
            ui.set_next_window_size(vec2(100.0, 200.0), Cond::Always);
            ui.window("Text", WindowFlags::NO_TITLE_BAR, |ui| out = Some(f(ui)));
        });
        out.expect("window content ran")
    }

    #[test]
    fn text_advances_one_line() {
        let (r, next) = in_window(|ui| {
            ui.text("abc");
            (ui.last_item_rect(), ui.get_cursor_screen_pos())
        });
        assert_eq!((r.x, r.y, r.width, r.height), (8.0, 8.0, 21.0, 13.0));
        assert_eq!(next.y, 8.0 + 13.0 + 4.0);
    }

    #[test]
    fn wrapped_text_stays_inside_the_window() {
        let r = in_window(|ui| {
            ui.text_wrapped("aaaa bbbb cccc dddd eeee ffff");
            ui.last_item_rect()
        });
        assert!(r.x + r.width <= 100.0 - 8.0);
        assert!(r.height > 13.0);
    }

    #[test]
    fn separator_does_not_widen_contents() {
        let (r, max) = in_window(|ui| {
            ui.separator();
            (ui.last_item_rect(), ui.cw().dc.cursor_max_pos)
        });
        assert_eq!(r.width, 100.0);
        assert!(max.x <= 8.0);
    }

    #[test]
    fn label_text_matches_frame_height() {
        let r = in_window(|ui| {
            ui.label_text("name", "value");
            ui.last_item_rect()
        });
        assert_eq!(r.height, 13.0 + 6.0);
    }
}
