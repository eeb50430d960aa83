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
//! Cursor based layout: items advance a per-window cursor line by line, optionally on the same line, inside
//! groups, indents and pushed item widths.

use crate::window::GroupData;
use crate::{add2, floor2, max2, rect_min_max, sub2, vec2, Context, ItemFlags, ItemStatusFlags, LastItem, RectExt, Rectf, Vec2f};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
/// Direction the cursor advances after an item.
pub enum LayoutType {
    /// One item per line.
    #[default]
    Vertical,
    /// Items on one line; menu bars use this.
    Horizontal,
}

/// Item placement.
impl Context {
    /// Reserves `size` at the cursor and moves it to the next line (or along the line in horizontal layouts).
    /// `text_offset_y` aligns the baseline of text placed on the same line.
    pub fn item_size(&mut self, size: Vec2f, text_offset_y: f32) {
        let spacing = self.style.item_spacing;
        let w = self.cw_mut();
        if w.skip_items {
            return;
        }
        let (pos, horizontal) = (w.pos, w.dc.layout_type == LayoutType::Horizontal);
        let dc = &mut w.dc;
        let line_height = dc.current_line_height.max(size.y);
        let text_base_offset = dc.current_line_text_base_offset.max(text_offset_y);
        dc.cursor_pos_prev_line = vec2(dc.cursor_pos.x + size.x, dc.cursor_pos.y);
        dc.cursor_pos = vec2((pos.x + dc.indent_x).trunc(), (dc.cursor_pos.y + line_height + spacing.y).trunc());
        dc.cursor_max_pos.x = dc.cursor_max_pos.x.max(dc.cursor_pos_prev_line.x);
        dc.cursor_max_pos.y = dc.cursor_max_pos.y.max(dc.cursor_pos.y - spacing.y);
        dc.prev_line_height = line_height;
        dc.prev_line_text_base_offset = text_base_offset;
        dc.current_line_height = 0.0;
        dc.current_line_text_base_offset = 0.0;
        if horizontal {
            self.same_line(0.0, -1.0);
        }
    }

    /// Records `bb` as the last item, keeps it alive when active and registers it for keyboard navigation.
    /// Returns false when the item is clipped; the caller then skips drawing and interaction.
    pub fn item_add(&mut self, bb: Rectf, id: crate::Id) -> bool {
        if id.is_some() {
            self.keep_alive_id(id);
            self.nav_register_item(id);
            if id == self.nav_just_moved_to_id {
                self.scroll_to_bring_rect_into_view(bb);
            }
        }
        let w = self.cw_mut();
        w.dc.last_item = LastItem { id, rect: bb, status: ItemStatusFlags::NONE };
        if self.is_clipped(bb, id) {
            return false;
        }
        if self.is_mouse_hovering_rect(bb.min_pt(), bb.max_pt(), true) {
            self.cw_mut().dc.last_item.status |= ItemStatusFlags::HOVERED_RECT;
        }
        true
    }

    /// Outside the clip rect of the current window; the active item is never clipped.
    pub(crate) fn is_clipped(&self, bb: Rectf, id: crate::Id) -> bool {
        // zero sized items sitting on the clip edge still count as visible
        let clip = self.cw().clip_rect;
        let outside = bb.x > clip.max_pt().x || bb.y > clip.max_pt().y || bb.max_pt().x < clip.x || bb.max_pt().y < clip.y;
        outside && (id.is_none() || id != self.active_id)
    }

    fn scroll_to_bring_rect_into_view(&mut self, bb: Rectf) {
        let spacing = self.style.item_spacing.y;
        let w = self.cw_mut();
        let inner = w.inner_rect;
        if bb.y < inner.y {
            w.scroll_target.y = bb.y - w.pos.y + w.scroll.y - spacing;
            w.scroll_target_center_ratio.y = 0.0;
        } else if bb.max_pt().y >= inner.max_pt().y {
            w.scroll_target.y = bb.max_pt().y - w.pos.y + w.scroll.y + spacing;
            w.scroll_target_center_ratio.y = 1.0;
        }
    }

    /// Places the next item on the line of the previous one. `pos_x` is relative to the window (0 follows the
    /// previous item); a negative `spacing_w` uses the style spacing.
    pub fn same_line(&mut self, pos_x: f32, spacing_w: f32) {
        let spacing = self.style.item_spacing.x;
        let w = self.cw_mut();
        if w.skip_items {
            return;
        }
        let dc = &mut w.dc;
        if pos_x != 0.0 {
            dc.cursor_pos.x = w.pos.x - w.scroll.x + pos_x + spacing_w.max(0.0) + dc.group_offset_x;
        } else {
            dc.cursor_pos.x = dc.cursor_pos_prev_line.x + if spacing_w < 0.0 { spacing } else { spacing_w };
        }
        dc.cursor_pos.y = dc.cursor_pos_prev_line.y;
        dc.current_line_height = dc.prev_line_height;
        dc.current_line_text_base_offset = dc.prev_line_text_base_offset;
    }

    /// Ends the current line, or adds an empty line of text height when the line is empty.
    pub fn new_line(&mut self) {
        if self.cw().skip_items {
            return;
        }
        let font_size = self.font_size;
        let w = self.cw_mut();
        let backup = w.dc.layout_type;
        w.dc.layout_type = LayoutType::Vertical;
        let height = if w.dc.current_line_height > 0.0 { 0.0 } else { font_size };
        self.item_size(vec2(0.0, height), 0.0);
        self.cw_mut().dc.layout_type = backup;
    }

    /// Vertical gap of one item spacing.
    pub fn spacing(&mut self) {
        if self.cw().skip_items {
            return;
        }
        self.item_size(vec2(0.0, 0.0), 0.0);
    }

    /// Empty item of `size`.
    pub fn dummy(&mut self, size: Vec2f) {
        if self.cw().skip_items {
            return;
        }
        let cursor = self.cw().dc.cursor_pos;
        let bb = rect_min_max(cursor, add2(cursor, size));
        self.item_size(size, 0.0);
        self.item_add(bb, crate::Id::NONE);
    }

    /// Moves the left margin right by `indent_w`, or by `indent_spacing` when zero.
    pub fn indent(&mut self, indent_w: f32) {
        let step = if indent_w != 0.0 { indent_w } else { self.style.indent_spacing };
        let w = self.cw_mut();
        w.dc.indent_x += step;
        w.dc.cursor_pos.x = w.pos.x + w.dc.indent_x;
    }

    /// Undoes [`Context::indent`].
    pub fn unindent(&mut self, indent_w: f32) {
        let step = if indent_w != 0.0 { indent_w } else { self.style.indent_spacing };
        let w = self.cw_mut();
        w.dc.indent_x -= step;
        w.dc.cursor_pos.x = w.pos.x + w.dc.indent_x;
    }

    /// Starts a group: the items until [`Context::end_group`] become a single item for layout and queries.
    pub fn begin_group(&mut self) {
        let alive = self.active_id_is_alive;
        let w = self.cw_mut();
        let dc = &mut w.dc;
        dc.group_stack.push(GroupData {
            backup_cursor_pos: dc.cursor_pos,
            backup_cursor_max_pos: dc.cursor_max_pos,
            backup_indent_x: dc.indent_x,
            backup_group_offset_x: dc.group_offset_x,
            backup_current_line_height: dc.current_line_height,
            backup_current_line_text_base_offset: dc.current_line_text_base_offset,
            backup_active_id_is_alive: alive,
            advance_cursor: true,
        });
        dc.group_offset_x = dc.cursor_pos.x - w.pos.x;
        dc.indent_x = dc.group_offset_x;
        dc.cursor_max_pos = dc.cursor_pos;
        dc.current_line_height = 0.0;
    }

    /// Ends a group.
    pub fn end_group(&mut self) {
        let (active_id, alive) = (self.active_id, self.active_id_is_alive);
        let active_root = self.active_id_window.and_then(|a| self.windows.get(a)).map(|a| a.root_window);
        let w = self.cw_mut();
        let Some(g) = w.dc.group_stack.pop() else {
            debug_assert!(false, "end_group() without begin_group()");
            log::warn!("end_group() without begin_group() ignored");
            return;
        };
        let root = w.root_window;
        let dc = &mut w.dc;
        let group_bb = rect_min_max(g.backup_cursor_pos, max2(g.backup_cursor_pos, dc.cursor_max_pos));
        dc.cursor_pos = g.backup_cursor_pos;
        dc.cursor_max_pos = max2(g.backup_cursor_max_pos, dc.cursor_max_pos);
        dc.current_line_height = g.backup_current_line_height;
        dc.current_line_text_base_offset = g.backup_current_line_text_base_offset;
        dc.indent_x = g.backup_indent_x;
        dc.group_offset_x = g.backup_group_offset_x;
        if g.advance_cursor {
            dc.current_line_text_base_offset = dc.prev_line_text_base_offset.max(g.backup_current_line_text_base_offset);
            self.item_size(vec2(group_bb.width, group_bb.height), g.backup_current_line_text_base_offset);
            self.item_add(group_bb, crate::Id::NONE);
        }
        // an item activated inside the group makes the whole group report active
        let within = !g.backup_active_id_is_alive && alive && active_id.is_some() && active_root == Some(root);
        let last = &mut self.cw_mut().dc.last_item;
        if within {
            last.id = active_id;
        }
        last.rect = group_bb;
    }

    /// Runs `f` inside a group.
    pub fn group<F: FnOnce(&mut Self)>(&mut self, f: F) {
        self.begin_group();
        f(self);
        self.end_group();
    }

    /// Width of the following items: positive is pixels, negative aligns to the right edge, zero restores the
    /// window default.
    pub fn push_item_width(&mut self, item_width: f32) {
        let w = self.cw_mut();
        w.dc.item_width = if item_width == 0.0 { w.item_width_default } else { item_width };
        w.dc.item_width_stack.push(w.dc.item_width);
    }

    /// Undoes [`Context::push_item_width`].
    pub fn pop_item_width(&mut self) {
        let w = self.cw_mut();
        if w.dc.item_width_stack.pop().is_none() {
            debug_assert!(false, "pop_item_width() without push");
        }
        w.dc.item_width = w.dc.item_width_stack.last().copied().unwrap_or(w.item_width_default);
    }

    /// Splits `w_full` (the current item width when not positive) among `components` items. The widths are
    /// popped one per item with [`Context::pop_item_width`].
    pub fn push_multi_items_widths(&mut self, components: usize, w_full: f32) {
        let components = components.max(1);
        let w_full = if w_full <= 0.0 { self.calc_item_width() } else { w_full };
        let inner = self.style.item_inner_spacing.x;
        let n = components as f32;
        let w_one = ((w_full - inner * (n - 1.0)) / n).trunc().max(1.0);
        let w_last = (w_full - (w_one + inner) * (n - 1.0)).trunc().max(1.0);
        let w = self.cw_mut();
        w.dc.item_width_stack.push(w_last);
        for _ in 1..components {
            w.dc.item_width_stack.push(w_one);
        }
        w.dc.item_width = w_one.min(w_last).max(if components == 1 { w_last } else { w_one });
    }

    /// Width of the next item after resolving negative (right aligned) widths.
    pub fn calc_item_width(&self) -> f32 {
        let mut w = self.cw().dc.item_width;
        if w < 0.0 {
            w = (self.get_content_region_avail().x + w).max(1.0);
        }
        w.trunc()
    }

    /// Resolves a requested item size: zero takes the default, negative is relative to the content edge.
    pub fn calc_item_size(&self, size: Vec2f, default_x: f32, default_y: f32) -> Vec2f {
        let w = self.cw();
        let content_max = add2(w.pos, self.get_content_region_max());
        let cursor = w.dc.cursor_pos;
        let mut size = size;
        if size.x <= 0.0 {
            size.x = if size.x == 0.0 { default_x } else { (content_max.x - cursor.x).max(4.0) + size.x };
        }
        if size.y <= 0.0 {
            size.y = if size.y == 0.0 { default_y } else { (content_max.y - cursor.y).max(4.0) + size.y };
        }
        size
    }

    /// Wrap width for text starting at `pos` given a wrap position (window relative, 0 for the content edge,
    /// negative for none).
    pub(crate) fn calc_wrap_width_for_pos(&self, pos: Vec2f, wrap_pos_x: f32) -> f32 {
        if wrap_pos_x < 0.0 {
            return 0.0;
        }
        let w = self.cw();
        let wrap_pos_x = if wrap_pos_x == 0.0 { self.get_content_region_max().x + w.pos.x } else { wrap_pos_x + w.pos.x - w.scroll.x };
        (wrap_pos_x - pos.x).max(1.0)
    }

    /// Wraps following text at `wrap_pos_x` (window relative; 0 is the content edge, negative disables).
    pub fn push_text_wrap_pos(&mut self, wrap_pos_x: f32) {
        let w = self.cw_mut();
        w.dc.text_wrap_pos = wrap_pos_x;
        w.dc.text_wrap_pos_stack.push(wrap_pos_x);
    }

    /// Undoes [`Context::push_text_wrap_pos`].
    pub fn pop_text_wrap_pos(&mut self) {
        let w = self.cw_mut();
        w.dc.text_wrap_pos_stack.pop();
        w.dc.text_wrap_pos = w.dc.text_wrap_pos_stack.last().copied().unwrap_or(-1.0);
    }

    /// Sets or clears `flag` on the following items.
    pub fn push_item_flag(&mut self, flag: ItemFlags, enabled: bool) {
        let w = self.cw_mut();
        w.dc.item_flags.set(flag, enabled);
        w.dc.item_flags_stack.push(w.dc.item_flags);
    }

    /// Undoes [`Context::push_item_flag`].
    pub fn pop_item_flag(&mut self) {
        let w = self.cw_mut();
        w.dc.item_flags_stack.pop();
        w.dc.item_flags = w.dc.item_flags_stack.last().copied().unwrap_or(ItemFlags::ALLOW_KEYBOARD_FOCUS);
    }

    /// Whether the following items take part in Tab navigation.
    pub fn push_allow_keyboard_focus(&mut self, allow: bool) { self.push_item_flag(ItemFlags::ALLOW_KEYBOARD_FOCUS, allow); }

    /// Undoes [`Context::push_allow_keyboard_focus`].
    pub fn pop_allow_keyboard_focus(&mut self) { self.pop_item_flag(); }

    /// Makes the following buttons fire repeatedly while held.
    pub fn push_button_repeat(&mut self, repeat: bool) { self.push_item_flag(ItemFlags::BUTTON_REPEAT, repeat); }

    /// Undoes [`Context::push_button_repeat`].
    pub fn pop_button_repeat(&mut self) { self.pop_item_flag(); }

    /// Lowers the baseline of the current line so plain text lines up with framed widgets.
    pub fn align_text_to_frame_padding(&mut self) {
        let (h, pad) = (self.font_size + self.style.frame_padding.y * 2.0, self.style.frame_padding.y);
        let dc = &mut self.cw_mut().dc;
        dc.current_line_height = dc.current_line_height.max(h);
        dc.current_line_text_base_offset = dc.current_line_text_base_offset.max(pad);
    }

    /// Font size.
    pub fn get_text_line_height(&self) -> f32 { self.font_size }

    /// Font size plus vertical item spacing.
    pub fn get_text_line_height_with_spacing(&self) -> f32 { self.font_size + self.style.item_spacing.y }

    /// Height of a framed widget.
    pub fn get_frame_height(&self) -> f32 { self.font_size + self.style.frame_padding.y * 2.0 }

    /// Height of a framed widget plus vertical item spacing.
    pub fn get_frame_height_with_spacing(&self) -> f32 { self.get_frame_height() + self.style.item_spacing.y }

    /// Cursor in window coordinates, scroll included.
    pub fn get_cursor_pos(&self) -> Vec2f {
        let w = self.cw();
        add2(sub2(w.dc.cursor_pos, w.pos), w.scroll)
    }

    /// Moves the cursor to `local_pos` in window coordinates.
    pub fn set_cursor_pos(&mut self, local_pos: Vec2f) {
        let w = self.cw_mut();
        w.dc.cursor_pos = add2(sub2(w.pos, w.scroll), local_pos);
        w.dc.cursor_max_pos = max2(w.dc.cursor_max_pos, w.dc.cursor_pos);
    }

    /// Sets the horizontal cursor position in window coordinates.
    pub fn set_cursor_pos_x(&mut self, x: f32) {
        let y = self.get_cursor_pos().y;
        self.set_cursor_pos(vec2(x, y));
    }

    /// Sets the vertical cursor position in window coordinates.
    pub fn set_cursor_pos_y(&mut self, y: f32) {
        let x = self.get_cursor_pos().x;
        self.set_cursor_pos(vec2(x, y));
    }

    /// Initial cursor position in window coordinates.
    pub fn get_cursor_start_pos(&self) -> Vec2f {
        let w = self.cw();
        sub2(w.dc.cursor_start_pos, w.pos)
    }

    /// Cursor in screen coordinates.
    pub fn get_cursor_screen_pos(&self) -> Vec2f { self.cw().dc.cursor_pos }

    /// Moves the cursor to a screen position.
    pub fn set_cursor_screen_pos(&mut self, pos: Vec2f) {
        let w = self.cw_mut();
        w.dc.cursor_pos = floor2(pos);
        w.dc.cursor_max_pos = max2(w.dc.cursor_max_pos, w.dc.cursor_pos);
    }

    /// Bottom-right of the content region in window coordinates.
    pub fn get_content_region_max(&self) -> Vec2f { self.cw().contents_region_max }

    /// Space left from the cursor to the content region edge.
    pub fn get_content_region_avail(&self) -> Vec2f {
        let w = self.cw();
        sub2(self.get_content_region_max(), sub2(w.dc.cursor_pos, w.pos))
    }

    /// Available width from the cursor.
    pub fn get_content_region_avail_width(&self) -> f32 { self.get_content_region_avail().x }

    /// Top-left of the window content region in window coordinates.
    pub fn get_window_content_region_min(&self) -> Vec2f { self.cw().contents_region_min }

    /// Bottom-right of the window content region in window coordinates.
    pub fn get_window_content_region_max(&self) -> Vec2f { self.cw().contents_region_max }

    /// Width of the window content region.
    pub fn get_window_content_region_width(&self) -> f32 {
        let w = self.cw();
        w.contents_region_max.x - w.contents_region_min.x
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{context, run_frame};
    use crate::{Cond, WindowFlags};

    fn in_window<F: FnOnce(&mut Context)>(ctx: &mut Context, f: F) {
        run_frame(ctx, |ui| {
            ui.set_next_window_pos(vec2(0.0, 0.0), Cond::Always, vec2(0.0, 0.0));
            ui.set_next_window_size(vec2(300.0, 200.0), Cond::Always);
            ui.window("Layout", WindowFlags::NO_TITLE_BAR, f);
        });
    }

    #[test]
    fn items_stack_vertically_with_spacing() {
        let mut ctx = context();
        in_window(&mut ctx, |ui| {
            let pad = ui.style().window_padding;
            let sp = ui.style().item_spacing;
            let p = ui.get_cursor_screen_pos();
            assert_eq!((p.x, p.y), (pad.x, pad.y));
            ui.dummy(vec2(50.0, 20.0));
            let p = ui.get_cursor_screen_pos();
            assert_eq!((p.x, p.y), (pad.x, pad.y + 20.0 + sp.y));
            ui.same_line(0.0, -1.0);
            let p = ui.get_cursor_screen_pos();
            assert_eq!((p.x, p.y), (pad.x + 50.0 + sp.x, pad.y));
            ui.dummy(vec2(10.0, 30.0));
            assert_eq!(ui.get_cursor_screen_pos().y, pad.y + 30.0 + sp.y);
        });
    }

    #[test]
    fn group_reports_its_bounding_box() {
        let mut ctx = context();
        in_window(&mut ctx, |ui| {
            let start = ui.get_cursor_screen_pos();
            ui.group(|ui| {
                ui.dummy(vec2(40.0, 10.0));
                ui.dummy(vec2(70.0, 10.0));
            });
            let r = ui.last_item_rect();
            let sp = ui.style().item_spacing.y;
            assert_eq!((r.x, r.y), (start.x, start.y));
            assert_eq!((r.max_pt().x, r.max_pt().y), (start.x + 70.0, start.y + 20.0 + sp));
        });
    }

    #[test]
    fn indent_moves_the_left_margin() {
        let mut ctx = context();
        in_window(&mut ctx, |ui| {
            let x = ui.get_cursor_screen_pos().x;
            ui.indent(0.0);
            assert_eq!(ui.get_cursor_screen_pos().x, x + ui.style().indent_spacing);
            ui.dummy(vec2(1.0, 1.0));
            assert_eq!(ui.get_cursor_screen_pos().x, x + ui.style().indent_spacing);
            ui.unindent(0.0);
            assert_eq!(ui.get_cursor_screen_pos().x, x);
        });
    }

    #[test]
    fn multi_item_widths_add_up() {
        let mut ctx = context();
        in_window(&mut ctx, |ui| {
            ui.push_item_width(100.0);
            ui.push_multi_items_widths(3, 0.0);
            let inner = ui.style().item_inner_spacing.x;
            let mut total = 0.0;
            for _ in 0..3 {
                total += ui.calc_item_width();
                ui.pop_item_width();
            }
            assert_eq!(total + 2.0 * inner, 100.0);
            assert_eq!(ui.calc_item_width(), 100.0);
            ui.pop_item_width();
        });
    }

    #[test]
    fn negative_item_width_aligns_right() {
        let mut ctx = context();
        in_window(&mut ctx, |ui| {
            ui.push_item_width(-20.0);
            let avail = ui.get_content_region_avail().x;
            assert_eq!(ui.calc_item_width(), (avail - 20.0).trunc());
            ui.pop_item_width();
        });
    }

    #[test]
    fn clipped_items_are_reported() {
        let mut ctx = context();
        in_window(&mut ctx, |ui| {
            assert!(ui.item_add(crate::rect(10.0, 10.0, 5.0, 5.0), crate::Id::NONE));
            assert!(!ui.item_add(crate::rect(10.0, 500.0, 5.0, 5.0), crate::Id::NONE));
        });
    }
}
