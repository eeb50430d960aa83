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
//! Keyboard navigation in submission order: Tab and the arrows move the focused item of the focused window,
//! Space/Enter activate it and Escape backs out.

use log::trace;

use crate::{Context, Id, ItemFlags, Key, WindowFlags};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum NavMove {
    Next,
    Prev,
}

fn cycle(items: &[Id], current: Id, dir: NavMove) -> Option<Id> {
    if items.is_empty() {
        return None;
    }
    let last = items.len() - 1;
    let idx = match (items.iter().position(|i| *i == current), dir) {
        (None, NavMove::Next) => 0,
        (None, NavMove::Prev) => last,
        (Some(i), NavMove::Next) => if i == last { 0 } else { i + 1 },
        (Some(i), NavMove::Prev) => if i == 0 { last } else { i - 1 },
    };
    Some(items[idx])
}

impl Context {
    /// Per-frame navigation update, run in `new_frame` after the input state is derived.
    pub(crate) fn nav_update(&mut self) {
        self.nav_activate_id = Id::NONE;
        self.nav_activate_pressed_id = Id::NONE;
        self.nav_activate_down_id = Id::NONE;
        self.nav_input_id = Id::NONE;
        self.nav_just_moved_to_id = Id::NONE;
        self.nav_input_amount = 0.0;
        self.nav_items_prev = std::mem::take(&mut self.nav_items);

        if self.input.mouse_delta.x != 0.0 || self.input.mouse_delta.y != 0.0 || self.input.mouse_clicked.iter().any(|c| *c) {
            self.nav_disable_mouse_hover = false;
        }

        let Some(nav) = self.nav_window.filter(|w| self.windows.get(*w).is_some_and(|w| !w.flags.contains(WindowFlags::NO_NAV_INPUTS))) else {
            return;
        };

        if self.input.is_key_pressed(Key::Escape, false) {
            self.nav_cancel(nav);
            return;
        }

        let shift = self.input.key_mods.is_shift();
        let mut mv = None;
        if self.input.is_key_pressed(Key::Tab, true) {
            mv = Some(if shift { NavMove::Prev } else { NavMove::Next });
        } else if self.active_id.is_none() {
            if self.input.is_key_pressed(Key::DownArrow, true) {
                mv = Some(NavMove::Next);
            } else if self.input.is_key_pressed(Key::UpArrow, true) {
                mv = Some(NavMove::Prev);
            }
        }
        if let Some(mv) = mv {
            if let Some(target) = cycle(&self.nav_items_prev, self.nav_id, mv) {
                trace!("nav {:?} from {:?} to {:?}", mv, self.nav_id, target);
                if self.active_id.is_some() && self.active_id != target {
                    self.clear_active_id();
                }
                self.nav_id = target;
                self.nav_just_moved_to_id = target;
                self.nav_disable_highlight = false;
                self.nav_disable_mouse_hover = true;
            }
        }

        if self.nav_id.is_some() && !self.nav_disable_highlight {
            let down = self.input.is_key_down(Key::Space) || self.input.is_key_down(Key::Enter);
            let pressed = self.input.is_key_pressed(Key::Space, false) || self.input.is_key_pressed(Key::Enter, false);
            if down {
                self.nav_activate_down_id = self.nav_id;
            }
            if pressed {
                self.nav_activate_pressed_id = self.nav_id;
                if self.active_id.is_none() {
                    self.nav_activate_id = self.nav_id;
                }
            }
        }

        let (delay, rate) = self.input.key_repeat();
        let right = self.input.key_pressed_amount(Key::RightArrow, delay, rate);
        let left = self.input.key_pressed_amount(Key::LeftArrow, delay, rate);
        self.nav_input_amount = (right - left) as f32;
    }

    fn nav_cancel(&mut self, nav: Id) {
        let flags = self.win(nav).flags;
        if self.active_id.is_some() {
            self.clear_active_id();
        } else if flags.is_popup() && !flags.is_modal() && !self.open_popup_stack.is_empty() {
            self.close_popup_to_level(self.open_popup_stack.len() - 1);
        } else if self.nav_id.is_some() {
            self.nav_id = Id::NONE;
            self.nav_disable_highlight = true;
        }
    }

    /// Registers the item just added to the current window as a navigation stop.
    pub(crate) fn nav_register_item(&mut self, id: Id) {
        if id.is_none() || self.nav_window != Some(self.cw_id()) {
            return;
        }
        let flags = self.cw().dc.item_flags;
        if flags.contains(ItemFlags::ALLOW_KEYBOARD_FOCUS) && !flags.intersects(ItemFlags::NO_NAV | ItemFlags::DISABLED) {
            self.nav_items.push(id);
        }
    }

    /// Whether the item `id` carries the keyboard focus highlight.
    pub(crate) fn is_nav_highlighted(&self, id: Id) -> bool { id.is_some() && self.nav_id == id && !self.nav_disable_highlight }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{context, run_frame};
    use crate::{vec2, Cond, KeyMods};

    fn ids(n: u32) -> Vec<Id> { (1..=n).map(Id).collect() }

    #[test]
    fn cycling_wraps_both_ways() {
        let items = ids(3);
        assert_eq!(cycle(&items, Id::NONE, NavMove::Next), Some(Id(1)));
        assert_eq!(cycle(&items, Id::NONE, NavMove::Prev), Some(Id(3)));
        assert_eq!(cycle(&items, Id(3), NavMove::Next), Some(Id(1)));
        assert_eq!(cycle(&items, Id(1), NavMove::Prev), Some(Id(3)));
        assert_eq!(cycle(&[], Id(1), NavMove::Next), None);
    }

    fn show(ui: &mut Context, pressed: &mut [bool; 3]) {
        ui.set_next_window_pos(vec2(10.0, 10.0), Cond::Always, vec2(0.0, 0.0));
        ui.window("Nav", WindowFlags::NONE, |ui| {
            for (i, label) in ["one", "two", "three"].iter().enumerate() {
                pressed[i] |= ui.button(label);
            }
        });
    }

    fn tap(ctx: &mut Context, key: Key, pressed: &mut [bool; 3]) {
        ctx.io_mut().key_down(key);
        run_frame(ctx, |ui| show(ui, pressed));
        ctx.io_mut().key_up(key);
        run_frame(ctx, |ui| show(ui, pressed));
    }

    #[test]
    fn tab_moves_focus_and_space_activates() {
        let mut ctx = context();
        let mut pressed = [false; 3];
        run_frame(&mut ctx, |ui| show(ui, &mut pressed));
        let nav = Id::from_name("Nav");
        assert_eq!(ctx.focused_window(), Some(nav));
        let id = |ctx: &Context, label: &str| ctx.window_by_id(nav).unwrap().get_id(label);

        tap(&mut ctx, Key::Tab, &mut pressed);
        assert_eq!(ctx.nav_id, id(&ctx, "one"));
        tap(&mut ctx, Key::Tab, &mut pressed);
        assert_eq!(ctx.nav_id, id(&ctx, "two"));
        ctx.io_mut().key_mods = KeyMods::SHIFT;
        tap(&mut ctx, Key::Tab, &mut pressed);
        ctx.io_mut().key_mods = KeyMods::NONE;
        assert_eq!(ctx.nav_id, id(&ctx, "one"));

        assert_eq!(pressed, [false; 3]);
        tap(&mut ctx, Key::Space, &mut pressed);
        assert_eq!(pressed, [true, false, false]);
        assert!(ctx.active_id().is_none());
    }

    #[test]
    fn escape_drops_keyboard_focus() {
        let mut ctx = context();
        let mut pressed = [false; 3];
        run_frame(&mut ctx, |ui| show(ui, &mut pressed));
        tap(&mut ctx, Key::DownArrow, &mut pressed);
        assert!(ctx.nav_id.is_some());
        tap(&mut ctx, Key::Escape, &mut pressed);
        assert!(ctx.nav_id.is_none());
        assert!(ctx.nav_disable_highlight);
    }

    #[test]
    fn arrows_feed_the_input_amount() {
        let mut ctx = context();
        let mut pressed = [false; 3];
        run_frame(&mut ctx, |ui| show(ui, &mut pressed));
        ctx.io_mut().key_down(Key::LeftArrow);
        run_frame(&mut ctx, |ui| show(ui, &mut pressed));
        assert_eq!(ctx.nav_input_amount, -1.0);
        run_frame(&mut ctx, |ui| show(ui, &mut pressed));
        assert_eq!(ctx.nav_input_amount, 0.0);
    }
}
