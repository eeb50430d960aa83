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
//! Popup stack: popups, context menus, modals and tooltips, and the placement of auto-positioned windows.
//!
//! `open_popup_stack` holds what the user opened, one entry per nesting level. `current_popup_stack` mirrors
//! the popups begun so far this frame, so its length is the level a new `open_popup` lands on.

use log::debug;

use crate::window::display_bounds;
use crate::{rect_min_max, vec2, Cond, Context, Dir, HoveredFlags, Id, MouseButton, RectExt, Rectf, Vec2f, WindowFlags};

#[derive(Clone, Debug)]
/// One level of the popup stack.
pub struct PopupRef {
    /// Id the popup was opened with.
    pub popup_id: Id,
    /// Popup window, resolved when it is first begun.
    pub window: Option<Id>,
    /// Window that opened the popup.
    pub parent_window: Option<Id>,
    /// Frame of the last `open_popup` call.
    pub open_frame_count: u64,
    /// Id scope of the opener.
    pub open_parent_id: Id,
    /// Mouse position at opening; the popup appears there.
    pub open_mouse_pos: Vec2f,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
/// What [`Context::popup_state`] reports about a popup.
pub enum PopupState {
    /// Not in the open stack at the current level.
    Closed,
    /// Open.
    Open,
    /// Open and owning keyboard focus.
    OpenAndFocused,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
/// Direction preferences of [`find_best_window_pos_for_popup_ex`].
pub enum PopupPositionPolicy {
    /// Right, down, up, left; the popup may slide along the avoided rect.
    #[default]
    Default,
    /// Keeps an edge shared with the avoided rect: below, above, then flipped to the left.
    ComboBox,
}

const DEFAULT_ORDER: [Dir; 4] = [Dir::Right, Dir::Down, Dir::Up, Dir::Left];
const COMBO_ORDER: [Dir; 4] = [Dir::Down, Dir::Right, Dir::Left, Dir::Up];

/// Places a window of `size` near `ref_pos` inside `outer` without overlapping `avoid`. The direction that
/// worked last time (`last_dir`) is tried first and updated; `None` means the fallback clamp was used.
pub fn find_best_window_pos_for_popup_ex(
    ref_pos: Vec2f,
    size: Vec2f,
    last_dir: &mut Option<Dir>,
    outer: Rectf,
    avoid: Rectf,
    policy: PopupPositionPolicy,
) -> Vec2f {
    let (omin, omax) = (outer.min_pt(), outer.max_pt());
    let (amin, amax) = (avoid.min_pt(), avoid.max_pt());
    let candidates = |order: [Dir; 4], last: Option<Dir>| last.into_iter().chain(order.into_iter().filter(move |d| Some(*d) != last));

    if policy == PopupPositionPolicy::ComboBox {
        for dir in candidates(COMBO_ORDER, *last_dir) {
            let pos = match dir {
                Dir::Down => vec2(amin.x, amax.y),
                Dir::Right => vec2(amin.x, amin.y - size.y),
                Dir::Left => vec2(amax.x - size.x, amax.y),
                Dir::Up => vec2(amax.x - size.x, amin.y - size.y),
            };
            if !outer.contains_rect(&crate::rect(pos.x, pos.y, size.x, size.y)) {
                continue;
            }
            *last_dir = Some(dir);
            return pos;
        }
    }

    let clamped = vec2(ref_pos.x.clamp(omin.x, (omax.x - size.x).max(omin.x)), ref_pos.y.clamp(omin.y, (omax.y - size.y).max(omin.y)));
    for dir in candidates(DEFAULT_ORDER, *last_dir) {
        let avail_w = (if dir == Dir::Left { amin.x } else { omax.x }) - (if dir == Dir::Right { amax.x } else { omin.x });
        let avail_h = (if dir == Dir::Up { amin.y } else { omax.y }) - (if dir == Dir::Down { amax.y } else { omin.y });
        if avail_w < size.x || avail_h < size.y {
            continue;
        }
        let x = match dir {
            Dir::Left => amin.x - size.x,
            Dir::Right => amax.x,
            _ => clamped.x,
        };
        let y = match dir {
            Dir::Up => amin.y - size.y,
            Dir::Down => amax.y,
            _ => clamped.y,
        };
        *last_dir = Some(dir);
        return vec2(x, y);
    }

    *last_dir = None;
    vec2(((ref_pos.x + size.x).min(omax.x) - size.x).max(omin.x), ((ref_pos.y + size.y).min(omax.y) - size.y).max(omin.y))
}

impl Context {
    /// Region auto-positioned windows must stay in: the display minus the safe area padding.
    pub(crate) fn popup_allowed_rect(&self) -> Rectf {
        let (min, max) = display_bounds(self.display_size(), self.style.display_safe_area_padding);
        rect_min_max(min, max)
    }

    /// Position for a child menu, popup or tooltip window about to be shown.
    pub(crate) fn find_best_window_pos_for_popup(&mut self, id: Id) -> Vec2f {
        let outer = self.popup_allowed_rect();
        let spacing = self.style.item_spacing.x;
        let w = self.win(id);
        let (flags, pos, size, mut last_dir) = (w.flags, w.pos, w.size, w.auto_pos_last_direction);
        let (ref_pos, avoid) = if flags.is_child_menu() {
            let parent = self.win(w.parent_window.unwrap_or(id));
            let avoid = if parent.dc.menu_bar_applied {
                let y = parent.pos.y + parent.title_bar_height;
                rect_min_max(vec2(-f32::MAX, y), vec2(f32::MAX, y + parent.menu_bar_height))
            } else {
                rect_min_max(
                    vec2(parent.pos.x + spacing, -f32::MAX),
                    vec2(parent.pos.x + parent.size.x - spacing - parent.scrollbar_sizes.x, f32::MAX),
                )
            };
            (pos, avoid)
        } else if flags.is_popup() {
            (pos, rect_min_max(vec2(pos.x - 1.0, pos.y - 1.0), vec2(pos.x + 1.0, pos.y + 1.0)))
        } else if flags.is_tooltip() {
            let m = self.input.mouse_pos.unwrap_or(pos);
            let avoid = if !self.nav_disable_highlight && self.nav_disable_mouse_hover {
                rect_min_max(vec2(m.x - 16.0, m.y - 8.0), vec2(m.x + 16.0, m.y + 8.0))
            } else {
                rect_min_max(vec2(m.x - 16.0, m.y - 8.0), vec2(m.x + 24.0, m.y + 24.0))
            };
            let p = find_best_window_pos_for_popup_ex(m, size, &mut last_dir, outer, avoid, PopupPositionPolicy::Default);
            self.win_mut(id).auto_pos_last_direction = last_dir;
            // no room anywhere: cover part of the tooltip rather than the cursor
            return if last_dir.is_none() { vec2(m.x + 2.0, m.y + 2.0) } else { p };
        } else {
            return pos;
        };
        let p = find_best_window_pos_for_popup_ex(ref_pos, size, &mut last_dir, outer, avoid, PopupPositionPolicy::Default);
        self.win_mut(id).auto_pos_last_direction = last_dir;
        p
    }

    /// Opens the popup `str_id` at the current popup level. Call it on the frame the popup should open, then
    /// `begin_popup(str_id)` every frame.
    pub fn open_popup(&mut self, str_id: &str) {
        let id = self.cw().get_id(str_id);
        self.open_popup_ex(id);
    }

    /// [`Context::open_popup`] with a precomputed id.
    pub fn open_popup_ex(&mut self, id: Id) {
        let parent = self.cw_id();
        let level = self.current_popup_stack.len();
        let r = PopupRef {
            popup_id: id,
            window: None,
            parent_window: Some(parent),
            open_frame_count: self.frame_count,
            open_parent_id: self.win(parent).id_stack.top(),
            open_mouse_pos: self.input.mouse_pos.unwrap_or(self.win(parent).dc.cursor_pos),
        };
        if self.open_popup_stack.len() < level + 1 {
            debug!("popup {:?} opened at level {}", id, level);
            self.open_popup_stack.push(r);
        } else {
            self.open_popup_stack.truncate(level + 1);
            let cur = &mut self.open_popup_stack[level];
            if cur.popup_id == id && cur.open_frame_count + 1 == self.frame_count {
                // reopened every frame: keep the window and its position
                cur.open_frame_count = r.open_frame_count;
            } else {
                debug!("popup {:?} replaces {:?} at level {}", id, cur.popup_id, level);
                *cur = r;
            }
        }
    }

    /// Opens `str_id` (the last item id when `None`) when the last item is released with `button`. Returns
    /// true when it opened.
    pub fn open_popup_on_item_click(&mut self, str_id: Option<&str>, button: MouseButton) -> bool {
        if self.input.is_mouse_released(button) && self.is_item_hovered(HoveredFlags::ALLOW_WHEN_BLOCKED_BY_POPUP) {
            let id = match str_id {
                Some(s) => self.cw().get_id(s),
                None => self.cw().dc.last_item.id,
            };
            debug_assert!(id.is_some(), "the last item has no id, pass a str_id");
            self.open_popup_ex(id);
            return true;
        }
        false
    }

    pub(crate) fn is_popup_open_id(&self, id: Id) -> bool {
        let level = self.current_popup_stack.len();
        self.open_popup_stack.get(level).is_some_and(|r| r.popup_id == id)
    }

    /// Whether the popup `str_id` is open at the current level.
    pub fn is_popup_open(&self, str_id: &str) -> bool { self.is_popup_open_id(self.cw().get_id(str_id)) }

    /// Open state of `str_id`, noting whether its window holds focus.
    pub fn popup_state(&self, str_id: &str) -> PopupState {
        let id = self.cw().get_id(str_id);
        if !self.is_popup_open_id(id) {
            return PopupState::Closed;
        }
        let window = self.open_popup_stack[self.current_popup_stack.len()].window;
        let focused = match (window, self.nav_window) {
            (Some(w), Some(nav)) => self.windows.get(nav).is_some_and(|n| n.root_window == w),
            _ => false,
        };
        if focused { PopupState::OpenAndFocused } else { PopupState::Open }
    }

    /// Modal popup at the top of the open stack, if any is still shown.
    pub(crate) fn front_most_modal(&self) -> Option<Id> {
        self.open_popup_stack
            .iter()
            .rev()
            .filter_map(|r| r.window)
            .find(|w| self.windows.get(*w).is_some_and(|w| w.flags.is_modal() && (w.active || w.was_active)))
    }

    /// Truncates the open stack to `remaining` entries and focuses the window that ends up on top.
    pub fn close_popup_to_level(&mut self, remaining: usize) {
        if remaining >= self.open_popup_stack.len() {
            return;
        }
        let focus = if remaining > 0 { self.open_popup_stack[remaining - 1].window } else { self.open_popup_stack[0].parent_window };
        debug!("popup stack closed to level {}", remaining);
        self.open_popup_stack.truncate(remaining);
        self.focus_window(focus.filter(|w| self.windows.contains(*w)));
    }

    /// Closes every popup not in the hierarchy of `ref_window`; with `None`, closes all of them.
    pub(crate) fn close_popups_over_window(&mut self, ref_window: Option<Id>) {
        if self.open_popup_stack.is_empty() {
            return;
        }
        let ref_root = ref_window.and_then(|r| self.windows.get(r)).map(|w| w.root_window);
        let mut n = 0;
        if let Some(ref_root) = ref_root {
            while n < self.open_popup_stack.len() {
                let Some(w) = self.open_popup_stack[n].window.and_then(|w| self.windows.get(w)) else {
                    n += 1;
                    continue;
                };
                if w.flags.is_child() {
                    n += 1;
                    continue;
                }
                let has_focus = self.open_popup_stack[n..]
                    .iter()
                    .any(|r| r.window.and_then(|w| self.windows.get(w)).is_some_and(|w| w.root_window == ref_root));
                if !has_focus {
                    break;
                }
                n += 1;
            }
        }
        self.close_popup_to_level(n);
    }

    fn close_popup_id(&mut self, id: Id) {
        if self.is_popup_open_id(id) {
            self.close_popup_to_level(self.current_popup_stack.len());
        }
    }

    /// Closes the popup being appended to, and the menus it was opened from.
    pub fn close_current_popup(&mut self) {
        let Some(mut idx) = self.current_popup_stack.len().checked_sub(1) else { return };
        if self.open_popup_stack.get(idx).map(|r| r.popup_id) != Some(self.current_popup_stack[idx].popup_id) {
            return;
        }
        while idx > 0 && self.open_popup_stack[idx].window.and_then(|w| self.windows.get(w)).is_some_and(|w| w.flags.is_child_menu()) {
            idx -= 1;
        }
        self.close_popup_to_level(idx);
    }

    /// Begins the popup `id` when it is open. Child menus recycle one window per depth; other popups get one
    /// window per id.
    pub(crate) fn begin_popup_ex(&mut self, id: Id, extra_flags: WindowFlags) -> bool {
        if !self.is_popup_open_id(id) {
            self.next_window_data = Default::default();
            return false;
        }
        let name = if extra_flags.is_child_menu() {
            format!("##Menu_{:02}", self.current_popup_stack.len())
        } else {
            format!("##Popup_{:08x}", id.0)
        };
        let open = self.begin(&name, None, extra_flags | WindowFlags::POPUP);
        if !open {
            self.end_popup();
        }
        open
    }

    fn popup_flags() -> WindowFlags { WindowFlags::ALWAYS_AUTO_RESIZE | WindowFlags::NO_TITLE_BAR | WindowFlags::NO_SAVED_SETTINGS }

    /// Begins the popup `str_id` if it is open. Returns true when open; call [`Context::end_popup`] then.
    pub fn begin_popup(&mut self, str_id: &str, flags: WindowFlags) -> bool {
        if self.open_popup_stack.len() <= self.current_popup_stack.len() {
            self.next_window_data = Default::default();
            return false;
        }
        let id = self.cw().get_id(str_id);
        self.begin_popup_ex(id, flags | Self::popup_flags())
    }

    /// Begins a modal popup: it darkens and blocks the windows behind it and is centered on the display unless
    /// positioned. With `open`, a close button is shown and closes the popup.
    pub fn begin_popup_modal(&mut self, name: &str, mut open: Option<&mut bool>, flags: WindowFlags) -> bool {
        let id = self.cw().get_id(name);
        if !self.is_popup_open_id(id) {
            self.next_window_data = Default::default();
            return false;
        }
        if self.next_window_data.pos.is_none() {
            let center = crate::mul2(self.display_size(), 0.5);
            self.set_next_window_pos(center, Cond::Appearing, vec2(0.5, 0.5));
        }
        let flags = flags | WindowFlags::POPUP | WindowFlags::MODAL | WindowFlags::NO_COLLAPSE | WindowFlags::NO_SAVED_SETTINGS;
        let visible = self.begin(name, open.as_deref_mut(), flags);
        if !visible || open.is_some_and(|o| !*o) {
            self.end_popup();
            if visible {
                self.close_popup_id(id);
            }
            return false;
        }
        true
    }

    /// Opens on release of `button` over the last item and begins the popup. `None` uses the last item id.
    pub fn begin_popup_context_item(&mut self, str_id: Option<&str>, button: MouseButton) -> bool {
        let id = match str_id {
            Some(s) => self.cw().get_id(s),
            None => self.cw().dc.last_item.id,
        };
        debug_assert!(id.is_some(), "the last item has no id, pass a str_id");
        if self.input.is_mouse_released(button) && self.is_item_hovered(HoveredFlags::ALLOW_WHEN_BLOCKED_BY_POPUP) {
            self.open_popup_ex(id);
        }
        self.begin_popup_ex(id, Self::popup_flags())
    }

    /// Opens on release of `button` over the current window, optionally also over its items.
    pub fn begin_popup_context_window(&mut self, str_id: Option<&str>, button: MouseButton, also_over_items: bool) -> bool {
        let id = self.cw().get_id(str_id.unwrap_or("window_context"));
        if self.input.is_mouse_released(button)
            && self.is_window_hovered(HoveredFlags::ALLOW_WHEN_BLOCKED_BY_POPUP)
            && (also_over_items || !self.is_any_item_hovered())
        {
            self.open_popup_ex(id);
        }
        self.begin_popup_ex(id, Self::popup_flags())
    }

    /// Opens on release of `button` where no window is hovered.
    pub fn begin_popup_context_void(&mut self, str_id: Option<&str>, button: MouseButton) -> bool {
        let id = self.cw().get_id(str_id.unwrap_or("void_context"));
        if self.input.is_mouse_released(button) && !self.is_window_hovered(HoveredFlags::ANY_WINDOW) {
            self.open_popup_ex(id);
        }
        self.begin_popup_ex(id, Self::popup_flags())
    }

    /// Ends a popup whose `begin_popup*` returned true.
    pub fn end_popup(&mut self) {
        debug_assert!(self.cw().flags.is_popup(), "end_popup() on a window that is not a popup");
        debug_assert!(!self.current_popup_stack.is_empty());
        self.end();
    }

    /// Runs `f` inside the popup `str_id` while it is open.
    pub fn popup<F: FnOnce(&mut Self)>(&mut self, str_id: &str, f: F) -> bool {
        if !self.begin_popup(str_id, WindowFlags::NONE) {
            return false;
        }
        f(self);
        self.end_popup();
        true
    }

    pub(crate) fn begin_tooltip_ex(&mut self, extra_flags: WindowFlags, override_previous: bool) {
        let mut name = format!("##Tooltip_{:02}", self.tooltip_override_count);
        if override_previous {
            if let Some(w) = self.windows.get_mut(Id::from_name(&name)).filter(|w| w.active) {
                // the previous tooltip cannot be reset, hide it and start a fresh window
                w.hidden_frames = 1;
                self.tooltip_override_count += 1;
                name = format!("##Tooltip_{:02}", self.tooltip_override_count);
            }
        }
        let flags = WindowFlags::TOOLTIP
            | WindowFlags::NO_INPUTS
            | WindowFlags::NO_TITLE_BAR
            | WindowFlags::NO_MOVE
            | WindowFlags::NO_RESIZE
            | WindowFlags::NO_SAVED_SETTINGS
            | WindowFlags::ALWAYS_AUTO_RESIZE
            | WindowFlags::NO_NAV_INPUTS
            | WindowFlags::NO_NAV_FOCUS;
        self.begin(&name, None, flags | extra_flags);
    }

    /// Begins a tooltip window next to the mouse. Submit items, then call [`Context::end_tooltip`].
    pub fn begin_tooltip(&mut self) { self.begin_tooltip_ex(WindowFlags::NONE, false); }

    /// Ends a tooltip.
    pub fn end_tooltip(&mut self) {
        debug_assert!(self.cw().flags.is_tooltip(), "end_tooltip() on a window that is not a tooltip");
        self.end();
    }

    /// Shows `text` as the tooltip, replacing a tooltip submitted earlier this frame.
    pub fn set_tooltip(&mut self, text: &str) {
        self.begin_tooltip_ex(WindowFlags::NONE, true);
        self.text(text);
        self.end_tooltip();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{context, run_frame};
    use crate::rect;

    #[test]
    fn default_policy_prefers_the_right_side() {
        let outer = rect(0.0, 0.0, 800.0, 600.0);
        let avoid = rect(99.0, 99.0, 2.0, 2.0);
        let mut dir = None;
        let p = find_best_window_pos_for_popup_ex(vec2(100.0, 100.0), vec2(50.0, 40.0), &mut dir, outer, avoid, PopupPositionPolicy::Default);
        assert_eq!((p.x, p.y), (101.0, 100.0));
        assert_eq!(dir, Some(Dir::Right));
    }

    #[test]
    fn default_policy_flips_left_near_the_edge() {
        let outer = rect(0.0, 0.0, 800.0, 600.0);
        let avoid = rect(700.0, 0.0, 80.0, 600.0);
        let mut dir = None;
        let p = find_best_window_pos_for_popup_ex(vec2(700.0, 20.0), vec2(200.0, 100.0), &mut dir, outer, avoid, PopupPositionPolicy::Default);
        assert_eq!(dir, Some(Dir::Left));
        assert_eq!((p.x, p.y), (500.0, 20.0));
    }

    #[test]
    fn oversized_window_falls_back_to_a_clamp() {
        let outer = rect(0.0, 0.0, 100.0, 100.0);
        let avoid = rect(40.0, 40.0, 20.0, 20.0);
        let mut dir = Some(Dir::Down);
        let p = find_best_window_pos_for_popup_ex(vec2(50.0, 50.0), vec2(150.0, 80.0), &mut dir, outer, avoid, PopupPositionPolicy::Default);
        assert_eq!(dir, None);
        assert_eq!((p.x, p.y), (0.0, 20.0));
    }

    #[test]
    fn combo_policy_opens_below_then_above() {
        let outer = rect(0.0, 0.0, 800.0, 600.0);
        let frame = rect(10.0, 100.0, 120.0, 20.0);
        let mut dir = None;
        let below = find_best_window_pos_for_popup_ex(vec2(10.0, 120.0), vec2(120.0, 200.0), &mut dir, outer, frame, PopupPositionPolicy::ComboBox);
        assert_eq!((below.x, below.y, dir), (10.0, 120.0, Some(Dir::Down)));

        let frame = rect(10.0, 560.0, 120.0, 20.0);
        let mut dir = None;
        let above = find_best_window_pos_for_popup_ex(vec2(10.0, 580.0), vec2(120.0, 200.0), &mut dir, outer, frame, PopupPositionPolicy::ComboBox);
        assert_eq!((above.x, above.y, dir), (10.0, 360.0, Some(Dir::Right)));
    }

    #[test]
    fn reopening_every_frame_keeps_one_entry() {
        let mut ctx = context();
        for _ in 0..3 {
            run_frame(&mut ctx, |ui| {
                ui.window("Host", WindowFlags::NONE, |ui| {
                    ui.open_popup("menu");
                    if ui.begin_popup("menu", WindowFlags::NONE) {
                        ui.end_popup();
                    }
                });
            });
        }
        assert_eq!(ctx.open_popup_stack.len(), 1);
        assert!(ctx.open_popup_stack[0].window.is_some());
    }

    #[test]
    fn closed_popup_does_not_begin() {
        let mut ctx = context();
        run_frame(&mut ctx, |ui| {
            ui.window("Host", WindowFlags::NONE, |ui| {
                assert_eq!(ui.popup_state("nope"), PopupState::Closed);
                assert!(!ui.begin_popup("nope", WindowFlags::NONE));
            });
        });
    }

    #[test]
    fn close_to_level_is_idempotent() {
        let mut ctx = context();
        run_frame(&mut ctx, |ui| {
            ui.window("Host", WindowFlags::NONE, |ui| {
                ui.open_popup("a");
                assert!(ui.begin_popup("a", WindowFlags::NONE));
                ui.open_popup("b");
                ui.end_popup();
            });
            assert_eq!(ui.open_popup_stack.len(), 2);
            ui.close_popup_to_level(1);
            assert_eq!(ui.open_popup_stack.len(), 1);
            ui.close_popup_to_level(1);
            assert_eq!(ui.open_popup_stack.len(), 1);
        });
    }

    #[test]
    fn clicking_the_void_closes_popups() {
        let mut ctx = context();
        let show = |ui: &mut Context| {
            ui.set_next_window_pos(vec2(0.0, 0.0), Cond::Always, vec2(0.0, 0.0));
            ui.set_next_window_size(vec2(100.0, 100.0), Cond::Always);
            ui.window("Host", WindowFlags::NONE, |ui| {
                if ui.frame_count() == 1 {
                    ui.open_popup("p");
                }
                if ui.begin_popup("p", WindowFlags::NONE) {
                    ui.text("inside");
                    ui.end_popup();
                }
            });
        };
        run_frame(&mut ctx, show);
        run_frame(&mut ctx, show);
        assert_eq!(ctx.open_popup_stack.len(), 1);
        ctx.io_mut().mouse_down(700.0, 500.0, MouseButton::Left);
        run_frame(&mut ctx, show);
        run_frame(&mut ctx, show);
        assert!(ctx.open_popup_stack.is_empty());
    }

    #[test]
    fn modal_without_a_position_is_centred_on_the_display() {
        let mut ctx = context();
        let show = |ui: &mut Context| {
            ui.window("Owner", WindowFlags::NONE, |ui| {
                if ui.frame_count() == 1 {
                    ui.open_popup("Centred");
                }
                ui.set_next_window_size(vec2(200.0, 100.0), Cond::Always);
                if ui.begin_popup_modal("Centred", None, WindowFlags::NONE) {
                    ui.end_popup();
                }
            });
        };
        for _ in 0..3 {
            run_frame(&mut ctx, show);
        }
        let modal = ctx.front_most_modal().expect("modal is shown");
        let (pos, size) = (ctx.win(modal).pos(), ctx.win(modal).size());
        assert_eq!((size.x, size.y), (200.0, 100.0));
        assert_eq!((pos.x + size.x * 0.5, pos.y + size.y * 0.5), (400.0, 300.0));
    }

    #[test]
    fn modal_blocks_hovering_other_windows() {
        let mut ctx = context();
        let show = |ui: &mut Context| {
            ui.set_next_window_pos(vec2(0.0, 0.0), Cond::Always, vec2(0.0, 0.0));
            ui.set_next_window_size(vec2(200.0, 200.0), Cond::Always);
            ui.window("Back", WindowFlags::NONE, |ui| {
                if ui.frame_count() == 1 {
                    ui.open_popup("Modal");
                }
                ui.set_next_window_pos(vec2(500.0, 400.0), Cond::Always, vec2(0.0, 0.0));
                if ui.begin_popup_modal("Modal", None, WindowFlags::NONE) {
                    ui.text("blocking");
                    ui.end_popup();
                }
            });
        };
        for _ in 0..3 {
            run_frame(&mut ctx, show);
        }
        let modal = ctx.front_most_modal().expect("modal is shown");
        assert_eq!(ctx.win(modal).name(), "Modal");
        ctx.io_mut().mouse_move(50.0, 50.0);
        run_frame(&mut ctx, show);
        assert_eq!(ctx.hovered_window(), None);
    }

    #[test]
    fn tooltip_shows_from_the_second_frame_on_top() {
        let mut ctx = context();
        ctx.io_mut().mouse_move(300.0, 300.0);
        let show = |ui: &mut Context| {
            ui.window("Host", WindowFlags::NONE, |ui| ui.set_tooltip("tip"));
        };
        let first = ctx.frame(show).cmd_lists.len();
        let dd = ctx.frame(show);
        assert_eq!(dd.cmd_lists.len(), first + 1);
        assert_eq!(dd.cmd_lists.last().map(|l| l.owner()), Some("##Tooltip_00"));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn popup_stack_stays_bounded(ops in prop::collection::vec((any::<bool>(), 1u32..4, 0usize..3), 1..24)) {
                let mut ctx = context();
                for (open, id, level) in ops {
                    let mut seen = (0, 0, None);
                    run_frame(&mut ctx, |ui| {
                        let before = ui.open_popup_stack.len();
                        if open {
                            ui.open_popup_ex(Id(id));
                            seen = (1, ui.open_popup_stack.len(), ui.open_popup_stack.first().map(|r| r.popup_id));
                        } else {
                            ui.close_popup_to_level(level);
                            ui.close_popup_to_level(level);
                            seen = (before.min(level), ui.open_popup_stack.len(), None);
                        }
                    });
                    prop_assert_eq!(seen.0, seen.1);
                    if open {
                        prop_assert_eq!(seen.2, Some(Id(id)));
                    }
                }
            }
        }
    }
}
