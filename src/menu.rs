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
//! Menu bars, menus and menu items, plus the column layout shared by the items of one menu window.

use crate::{
    add2, mul2, rect_min_max, sub2, vec2, Cond, Context, Dir, LayoutType, RectExt, SelectableFlags, StyleColor, StyleValue, StyleVar, Vec2f,
    WindowFlags,
};

/// Label, shortcut and arrow/check columns of a menu window. Widths declared during a frame are applied on
/// the next one, so every item lines up after the first frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MenuColumns {
    /// Number of columns in use.
    pub count: usize,
    /// Gap between two non-empty columns.
    pub spacing: f32,
    /// Total width laid out this frame.
    pub width: f32,
    /// Width declared so far for the next frame.
    pub next_width: f32,
    /// Column offsets for this frame.
    pub pos: [f32; 4],
    /// Widest declaration per column, for the next frame.
    pub next_widths: [f32; 4],
}

impl MenuColumns {
    /// Starts a frame: lays out the widths declared last frame. `clear` drops them instead.
    pub fn update(&mut self, count: usize, spacing: f32, clear: bool) {
        debug_assert!(count <= self.pos.len());
        self.count = count;
        self.width = 0.0;
        self.next_width = 0.0;
        self.spacing = spacing;
        if clear {
            self.next_widths = [0.0; 4];
        }
        for i in 0..count {
            if i > 0 && self.next_widths[i] > 0.0 {
                self.width += self.spacing;
            }
            self.pos[i] = self.width.trunc();
            self.width += self.next_widths[i];
            self.next_widths[i] = 0.0;
        }
    }

    /// Declares an item's three column widths and returns the width the item should take.
    pub fn decl_columns(&mut self, w0: f32, w1: f32, w2: f32) -> f32 {
        self.next_width = 0.0;
        for (i, w) in [w0, w1, w2].into_iter().enumerate() {
            self.next_widths[i] = self.next_widths[i].max(w);
        }
        for i in 0..3 {
            self.next_width += self.next_widths[i] + if i > 0 && self.next_widths[i] > 0.0 { self.spacing } else { 0.0 };
        }
        self.width.max(self.next_width)
    }

    /// Room left over when the menu is `avail_w` wide.
    pub fn calc_extra_space(&self, avail_w: f32) -> f32 { (avail_w - self.width).max(0.0) }
}

fn triangle_contains_point(a: Vec2f, b: Vec2f, c: Vec2f, p: Vec2f) -> bool {
    let side = |p1: Vec2f, p2: Vec2f| (p.x - p2.x) * (p1.y - p2.y) - (p1.x - p2.x) * (p.y - p2.y) < 0.0;
    let (b1, b2, b3) = (side(a, b), side(b, c), side(c, a));
    b1 == b2 && b2 == b3
}

impl Context {
    /// Full-width bar along the top of the display. Returns true when submitting menus is allowed; call
    /// [`Context::end_main_menu_bar`] then.
    pub fn begin_main_menu_bar(&mut self) -> bool {
        let display_w = self.display_size().x;
        let h = self.font_size + self.style.frame_padding.y * 2.0;
        self.set_next_window_pos(vec2(0.0, 0.0), Cond::Always, vec2(0.0, 0.0));
        self.set_next_window_size(vec2(display_w, h), Cond::Always);
        self.push_style_var(StyleVar::WindowRounding, StyleValue::Float(0.0));
        self.push_style_var(StyleVar::WindowMinSize, StyleValue::Vec2(vec2(0.0, 0.0)));
        let flags = WindowFlags::NO_TITLE_BAR
            | WindowFlags::NO_RESIZE
            | WindowFlags::NO_MOVE
            | WindowFlags::NO_SCROLLBAR
            | WindowFlags::NO_SAVED_SETTINGS
            | WindowFlags::MENU_BAR;
        if !self.begin("##MainMenuBar", None, flags) || !self.begin_menu_bar() {
            self.end();
            self.pop_style_var(2);
            return false;
        }
        let safe_x = self.style.display_safe_area_padding.x;
        self.cw_mut().dc.menu_bar_offset_x += safe_x;
        true
    }

    /// Closes the main menu bar.
    pub fn end_main_menu_bar(&mut self) {
        self.end_menu_bar();
        self.end();
        self.pop_style_var(2);
    }

    /// Starts laying out menus in the current window's menu bar. Requires [`WindowFlags::MENU_BAR`].
    pub fn begin_menu_bar(&mut self) -> bool {
        let w = self.cw();
        if w.skip_items || !w.flags.has_menu_bar() {
            return false;
        }
        debug_assert!(!w.dc.menu_bar_applied, "begin_menu_bar() called twice");
        let bar = w.menu_bar_rect();
        let (bmin, bmax) = (bar.min_pt(), bar.max_pt());
        // clipped to the bar itself, not to the content area below it
        let clip_min = vec2((bmin.x + 0.5).floor(), (bmin.y + w.window_border_size + 0.5).floor());
        let clip_max = vec2((bmin.x.max(bmax.x - w.window_rounding) + 0.5).floor(), (bmax.y + 0.5).floor());
        let outer = w.rect();
        let clip = rect_min_max(clip_min, clip_max).clip_with(&outer);
        let offset_x = w.dc.menu_bar_offset_x;

        self.begin_group();
        self.push_id("##menubar");
        self.push_clip_rect(clip.min_pt(), clip.max_pt(), false);
        let dc = &mut self.cw_mut().dc;
        dc.cursor_pos = vec2(bmin.x + offset_x, bmin.y);
        dc.layout_type = LayoutType::Horizontal;
        dc.menu_bar_applied = true;
        self.align_text_to_frame_padding();
        true
    }

    /// Closes the menu bar opened by [`Context::begin_menu_bar`].
    pub fn end_menu_bar(&mut self) {
        if self.cw().skip_items {
            return;
        }
        debug_assert!(self.cw().flags.has_menu_bar() && self.cw().dc.menu_bar_applied, "end_menu_bar() without begin_menu_bar()");
        self.pop_clip_rect();
        self.pop_id();
        let w = self.cw_mut();
        w.dc.menu_bar_offset_x = w.dc.cursor_pos.x - w.menu_bar_rect().x;
        if let Some(g) = w.dc.group_stack.last_mut() {
            g.advance_cursor = false;
        }
        self.end_group();
        let dc = &mut self.cw_mut().dc;
        dc.layout_type = LayoutType::Vertical;
        dc.menu_bar_applied = false;
    }

    /// Menu entry `label`. Returns true while its child menu is open; submit the items and call
    /// [`Context::end_menu`] then. Inside a menu bar it opens on click, or on hover once a sibling is open;
    /// inside a menu it opens on hover.
    pub fn begin_menu(&mut self, label: &str, enabled: bool) -> bool {
        if self.cw().skip_items {
            return false;
        }
        let wid = self.cw_id();
        let id = self.get_id(label);
        let label_size = self.calc_text_size(label, true, -1.0);
        let mut menu_is_open = self.is_popup_open_id(id);
        let level = self.current_popup_stack.len();
        let w = self.cw();
        let (win_flags, horizontal) = (w.flags, w.dc.layout_type == LayoutType::Horizontal);
        let menuset_is_open = !win_flags.is_popup() && self.open_popup_stack.get(level).is_some_and(|p| p.open_parent_id == w.id_stack.top());
        // hovering across the menus of one bar needs the bar to look focused
        let backed_nav_window = self.nav_window;
        if menuset_is_open {
            self.nav_window = Some(wid);
        }

        let (pad, wpad, font_size) = (self.style.frame_padding, self.style.window_padding, self.font_size);
        let disabled = if enabled { SelectableFlags::NONE } else { SelectableFlags::DISABLED };
        let pos = self.cw().dc.cursor_pos;
        let popup_pos;
        let pressed;
        if horizontal {
            let w = self.cw();
            popup_pos = vec2(pos.x - w.window_padding.x, pos.y - pad.y + w.menu_bar_height);
            pressed = self.menu_bar_selectable(label, menu_is_open, SelectableFlags::MENU | SelectableFlags::DONT_CLOSE_POPUPS | disabled, label_size.x);
        } else {
            popup_pos = vec2(pos.x, pos.y - wpad.y);
            let width = self.cw_mut().dc.menu_columns.decl_columns(label_size.x, 0.0, (font_size * 1.20).trunc());
            let extra_w = (self.get_content_region_avail().x - width).max(0.0);
            let flags = SelectableFlags::MENU | SelectableFlags::DONT_CLOSE_POPUPS | SelectableFlags::DRAW_FILLED | disabled;
            pressed = self.selectable(label, menu_is_open, flags, vec2(width, 0.0));
            let arrow_x = self.cw().dc.menu_columns.pos[2] + extra_w + font_size * 0.30;
            if !enabled {
                let col = self.style.color(StyleColor::TextDisabled, 1.0);
                self.push_style_color(StyleColor::Text, col);
            }
            self.painter().render_arrow(add2(pos, vec2(arrow_x, 0.0)), Dir::Right, 1.0);
            if !enabled {
                self.pop_style_color(1);
            }
        }

        let last_rect = self.cw().dc.last_item.rect;
        let hovered = enabled && self.item_hoverable(last_rect, id);
        if menuset_is_open {
            self.nav_window = backed_nav_window;
        }

        let mut want_open = false;
        let mut want_close = false;
        if !horizontal {
            let moving_within_opened_triangle = self.moving_toward_child_menu(wid, level);
            want_close = menu_is_open
                && !hovered
                && self.hovered_window == Some(wid)
                && self.hovered_id_previous_frame.is_some()
                && self.hovered_id_previous_frame != id
                && !moving_within_opened_triangle;
            want_open = !menu_is_open && hovered && (!moving_within_opened_triangle || pressed);
            if self.nav_activate_id == id {
                want_close = menu_is_open;
                want_open = !menu_is_open;
            }
            if self.nav_id == id && self.active_id.is_none() && self.nav_input_amount > 0.0 {
                want_open = true;
            }
        } else if menu_is_open && pressed && menuset_is_open {
            want_close = true;
            menu_is_open = false;
        } else if pressed || (hovered && menuset_is_open && !menu_is_open) {
            want_open = true;
        }

        if !enabled {
            want_close = true;
        }
        if want_close && self.is_popup_open_id(id) {
            self.close_popup_to_level(level);
        }

        if !menu_is_open && want_open && self.open_popup_stack.len() > level {
            // a sibling menu holds this level: close it first and open next frame
            self.open_popup_ex(id);
            return false;
        }

        menu_is_open |= want_open;
        if want_open {
            self.open_popup_ex(id);
        }
        if menu_is_open {
            self.set_next_window_pos(popup_pos, Cond::Always, vec2(0.0, 0.0));
            let mut flags = WindowFlags::CHILD_MENU | WindowFlags::ALWAYS_AUTO_RESIZE | WindowFlags::NO_MOVE | WindowFlags::NO_TITLE_BAR | WindowFlags::NO_SAVED_SETTINGS;
            if win_flags.intersects(WindowFlags::POPUP | WindowFlags::CHILD_MENU) {
                flags |= WindowFlags::CHILD_WINDOW;
            }
            menu_is_open = self.begin_popup_ex(id, flags);
        }
        menu_is_open
    }

    /// True while the mouse travels from the current menu toward its open child menu, so the child stays open.
    fn moving_toward_child_menu(&self, wid: crate::Id, level: usize) -> bool {
        if self.hovered_window != Some(wid) || self.win(wid).flags.has_menu_bar() {
            return false;
        }
        let Some(next) = self.open_popup_stack.get(level).filter(|p| p.parent_window == Some(wid)).and_then(|p| p.window).and_then(|w| self.windows.get(w)) else {
            return false;
        };
        let Some(mouse) = self.input.mouse_pos else { return false };
        let r = next.rect();
        let right = self.win(wid).pos.x < next.pos.x;
        let mut ta = sub2(mouse, self.input.mouse_delta);
        let mut tb = if right { r.min_pt() } else { vec2(r.max_pt().x, r.y) };
        let mut tc = if right { vec2(r.x, r.max_pt().y) } else { r.max_pt() };
        let extra = ((ta.x - tb.x).abs() * 0.30).clamp(5.0, 30.0);
        ta.x += if right { -0.5 } else { 0.5 };
        tb.y = ta.y + ((tb.y - extra) - ta.y).max(-100.0);
        tc.y = ta.y + ((tc.y + extra) - ta.y).min(100.0);
        triangle_contains_point(ta, tb, tc, mouse)
    }

    /// Selectable laid out the way menu bar entries are: wider spacing, half a spacing of margin each side.
    fn menu_bar_selectable(&mut self, label: &str, selected: bool, flags: SelectableFlags, width: f32) -> bool {
        let spacing = self.style.item_spacing;
        self.cw_mut().dc.cursor_pos.x += (spacing.x * 0.5).trunc();
        self.push_style_var(StyleVar::ItemSpacing, StyleValue::Vec2(mul2(spacing, 2.0)));
        let pressed = self.selectable(label, selected, flags, vec2(width, 0.0));
        self.pop_style_var(1);
        // the selectable's same_line added a full spacing
        self.cw_mut().dc.cursor_pos.x += (spacing.x * -0.5).trunc();
        pressed
    }

    /// Closes the menu opened by a successful [`Context::begin_menu`].
    pub fn end_menu(&mut self) { self.end_popup(); }

    /// Menu entry that returns true when activated. `shortcut` is only displayed; `selected` draws a check
    /// mark.
    pub fn menu_item(&mut self, label: &str, shortcut: Option<&str>, selected: bool, enabled: bool) -> bool {
        if self.cw().skip_items {
            return false;
        }
        let label_size = self.calc_text_size(label, true, -1.0);
        let flags = SelectableFlags::MENU_ITEM | if enabled { SelectableFlags::NONE } else { SelectableFlags::DISABLED };
        if self.cw().dc.layout_type == LayoutType::Horizontal {
            return self.menu_bar_selectable(label, false, flags, label_size.x);
        }

        let font_size = self.font_size;
        let pos = self.cw().dc.cursor_pos;
        let shortcut_w = shortcut.map(|s| self.calc_text_size(s, false, -1.0).x).unwrap_or(0.0);
        let width = self.cw_mut().dc.menu_columns.decl_columns(label_size.x, shortcut_w, (font_size * 1.20).trunc());
        let extra_w = (self.get_content_region_avail().x - width).max(0.0);
        let pressed = self.selectable(label, false, flags | SelectableFlags::DRAW_FILLED, vec2(width, 0.0));

        let cols = self.cw().dc.menu_columns.pos;
        let mut p = self.painter();
        if let Some(s) = shortcut.filter(|_| shortcut_w > 0.0) {
            let col = p.col(StyleColor::TextDisabled);
            p.render_text_col(add2(pos, vec2(cols[1] + extra_w, 0.0)), s, col);
        }
        if selected {
            let col = p.col(if enabled { StyleColor::Text } else { StyleColor::TextDisabled });
            p.render_check(add2(pos, vec2(cols[2] + extra_w + font_size * 0.40, font_size * 0.134 * 0.5)), col, font_size * 0.866);
        }
        pressed
    }

    /// [`Context::menu_item`] that flips `selected` when activated.
    pub fn menu_item_toggle(&mut self, label: &str, shortcut: Option<&str>, selected: &mut bool, enabled: bool) -> bool {
        if self.menu_item(label, shortcut, *selected, enabled) {
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
    use crate::MouseButton;

    #[test]
    fn columns_take_effect_next_frame() {
        let mut m = MenuColumns::default();
        m.update(3, 8.0, true);
        assert_eq!(m.decl_columns(40.0, 0.0, 15.0), 40.0 + 8.0 + 15.0);
        assert_eq!(m.decl_columns(30.0, 20.0, 15.0), 40.0 + 8.0 + 20.0 + 8.0 + 15.0);
        assert_eq!(m.width, 0.0);
        m.update(3, 8.0, false);
        assert_eq!(m.pos, [0.0, 48.0, 76.0, 0.0]);
        assert_eq!(m.width, 91.0);
        assert_eq!(m.calc_extra_space(100.0), 9.0);
        assert_eq!(m.calc_extra_space(50.0), 0.0);
        m.update(3, 8.0, false);
        assert_eq!(m.width, 0.0);
    }

    #[test]
    fn triangle_test() {
        let (a, b, c) = (vec2(0.0, 0.0), vec2(10.0, -10.0), vec2(10.0, 10.0));
        assert!(triangle_contains_point(a, b, c, vec2(5.0, 0.0)));
        assert!(!triangle_contains_point(a, b, c, vec2(-1.0, 0.0)));
    }

    fn menu_frame(ctx: &mut Context, quit: &mut bool) -> Option<crate::Rectf> {
        let mut r = None;
        run_frame(ctx, |ui| {
            if ui.begin_main_menu_bar() {
                if ui.begin_menu("File", true) {
                    r = Some(ui.cw().rect());
                    if ui.menu_item("Quit", Some("Ctrl+Q"), false, true) {
                        *quit = true;
                    }
                    ui.end_menu();
                }
                ui.end_main_menu_bar();
            }
        });
        r
    }

    #[test]
    fn menu_opens_from_the_bar_and_items_activate() {
        let mut ctx = context();
        let mut quit = false;
        assert!(menu_frame(&mut ctx, &mut quit).is_none());
        ctx.io_mut().mouse_down(20.0, 8.0, MouseButton::Left);
        assert!(menu_frame(&mut ctx, &mut quit).is_some());
        ctx.io_mut().mouse_up(20.0, 8.0, MouseButton::Left);
        menu_frame(&mut ctx, &mut quit);
        let r = menu_frame(&mut ctx, &mut quit).expect("menu stays open");
        assert!(r.y >= 19.0);

        let item = (r.x + 12.0, r.y + 12.0);
        ctx.io_mut().mouse_down(item.0, item.1, MouseButton::Left);
        menu_frame(&mut ctx, &mut quit);
        assert!(!quit);
        ctx.io_mut().mouse_up(item.0, item.1, MouseButton::Left);
        menu_frame(&mut ctx, &mut quit);
        assert!(quit);
        assert!(menu_frame(&mut ctx, &mut quit).is_none());
    }
}
