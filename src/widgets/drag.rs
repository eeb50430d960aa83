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
//! Drag widgets: the value follows horizontal mouse motion (or the arrow keys) while the item is held.

use super::format::round_to_precision_f64;
use crate::{format_value, minimum_step_at_decimal_precision, parse_format_precision, vec2, Context, Id, InputSource, MouseButton, RectExt, Rectf};

/// Sign that treats zero as positive.
fn sign_nz(v: f64) -> f64 { if v < 0.0 { -1.0 } else { 1.0 } }

/// Drag behaviors.
impl Context {
    /// Frame and value update of a drag widget over `frame_bb`. The item must be active to change `v`; the
    /// value is clamped when `v_min < v_max`, rounded to `precision` decimals, and only a change of the rounded
    /// value is reported.
    #[allow(clippy::too_many_arguments)]
    pub fn drag_behavior(&mut self, frame_bb: Rectf, id: Id, v: &mut f32, v_speed: f32, v_min: f32, v_max: f32, precision: i32, power: f32) -> bool {
        let mut wide = *v as f64;
        let changed = self.drag_behavior_f64(frame_bb, id, &mut wide, v_speed as f64, v_min as f64, v_max as f64, precision, power as f64);
        if changed && wide as f32 != *v {
            *v = wide as f32;
            return true;
        }
        false
    }

    /// [`Context::drag_behavior`] on a double, so integers past 2^24 still move by single steps.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn drag_behavior_f64(&mut self, frame_bb: Rectf, id: Id, v: &mut f64, v_speed: f64, v_min: f64, v_max: f64, precision: i32, power: f64) -> bool {
        let frame_idx = Self::frame_colors(self.active_id == id, self.active_id == id || self.hovered_id == id);
        self.render_nav_highlight(frame_bb, id);
        let rounding = self.style.frame_rounding;
        {
            let mut p = self.painter();
            let col = p.col(frame_idx);
            p.render_frame(frame_bb.min_pt(), frame_bb.max_pt(), col, true, rounding);
        }

        if self.active_id == id {
            let release = match self.active_id_source {
                InputSource::Mouse => !self.input.is_mouse_down(MouseButton::Left),
                InputSource::Nav => self.nav_activate_pressed_id == id && !self.active_id_is_just_activated,
                InputSource::None => false,
            };
            if release {
                self.clear_active_id();
            }
        }
        if self.active_id != id {
            return false;
        }

        if self.active_id_is_just_activated {
            self.drag_current_value = *v;
            self.drag_last_mouse_delta = vec2(0.0, 0.0);
        }

        let mut v_speed = v_speed;
        if v_speed == 0.0 {
            let range = v_max - v_min;
            let ratio = self.config.drag_speed_default_ratio as f64;
            v_speed = if range != 0.0 && range.is_finite() && range < f32::MAX as f64 { range * ratio } else { ratio };
        }

        let mut v_cur = self.drag_current_value;
        let mods = self.input.key_mods;
        let mut adjust = 0.0;
        match self.active_id_source {
            InputSource::Mouse if self.input.mouse_pos.is_some() => {
                let delta = self.input.mouse_drag_delta(MouseButton::Left, 1.0);
                adjust = (delta.x - self.drag_last_mouse_delta.x) as f64;
                if mods.is_shift() && self.config.drag_speed_scale_fast >= 0.0 {
                    adjust *= self.config.drag_speed_scale_fast as f64;
                }
                if mods.is_alt() && self.config.drag_speed_scale_slow >= 0.0 {
                    adjust *= self.config.drag_speed_scale_slow as f64;
                }
                self.drag_last_mouse_delta.x = delta.x;
            }
            InputSource::Nav => {
                adjust = self.nav_input_amount as f64;
                if mods.is_shift() {
                    adjust *= 10.0;
                }
                if mods.is_alt() {
                    adjust /= 10.0;
                }
                // no push past a bound the value already sits on
                if v_min < v_max && ((v_cur >= v_max && adjust > 0.0) || (v_cur <= v_min && adjust < 0.0)) {
                    adjust = 0.0;
                }
                v_speed = v_speed.max(minimum_step_at_decimal_precision(precision) as f64);
            }
            _ => {}
        }
        adjust *= v_speed;

        if adjust.abs() > 0.0 {
            if (power - 1.0).abs() > 0.001 {
                let v0_sign = sign_nz(v_cur);
                let v1 = v_cur.abs().powf(1.0 / power) + adjust * v0_sign;
                v_cur = v1.abs().powf(power) * v0_sign * sign_nz(v1);
            } else {
                v_cur += adjust;
            }
            if v_min < v_max {
                v_cur = v_cur.clamp(v_min, v_max);
            }
            self.drag_current_value = v_cur;
        }

        let mut v_cur = round_to_precision_f64(v_cur, precision);
        if v_min < v_max {
            v_cur = v_cur.clamp(v_min, v_max);
        }
        if *v != v_cur {
            *v = v_cur;
            return true;
        }
        false
    }

    pub(crate) fn drag_scalar(&mut self, label: &str, v: &mut f32, v_speed: f32, v_min: f32, v_max: f32, format: &str, power: f32) -> bool {
        let mut wide = *v as f64;
        let changed = self.drag_scalar_f64(label, &mut wide, v_speed as f64, v_min as f64, v_max as f64, format, power as f64);
        if changed && wide as f32 != *v {
            *v = wide as f32;
            return true;
        }
        false
    }

    #[allow(clippy::too_many_arguments)]
    pub(crate) fn drag_scalar_f64(&mut self, label: &str, v: &mut f64, v_speed: f64, v_min: f64, v_max: f64, format: &str, power: f64) -> bool {
        if self.cw().skip_items {
            return false;
        }
        let id = self.get_id(label);
        let w = self.calc_item_width();
        let label_size = self.calc_text_size(label, true, -1.0);
        let (pad, inner) = (self.style.frame_padding, self.style.item_inner_spacing);
        let pos = self.cw().dc.cursor_pos;
        let frame_bb = crate::rect(pos.x, pos.y, w, label_size.y + pad.y * 2.0);
        let label_w = if label_size.x > 0.0 { inner.x + label_size.x } else { 0.0 };
        let total_bb = crate::rect(pos.x, pos.y, w + label_w, frame_bb.height);

        self.item_size(vec2(total_bb.width, total_bb.height), pad.y);
        if !self.item_add(total_bb, id) {
            return false;
        }
        let hovered = self.item_hoverable(frame_bb, id);
        let precision = parse_format_precision(format, 3);

        let clicked = self.input.is_mouse_clicked(MouseButton::Left, false) || self.input.is_mouse_double_clicked(MouseButton::Left);
        if (hovered && clicked) || self.nav_activate_id == id {
            let wid = self.cw_id();
            self.set_active_id(id, Some(wid));
            self.set_focus_id(id, wid);
            self.focus_window(Some(wid));
        }

        let changed = self.drag_behavior_f64(frame_bb, id, v, v_speed, v_min, v_max, precision, power);

        let value = format_value(format, *v);
        let mut p = self.painter();
        p.render_text_clipped(frame_bb.min_pt(), frame_bb.max_pt(), &value, None, vec2(0.5, 0.5), None);
        if label_size.x > 0.0 {
            p.render_text(vec2(frame_bb.max_pt().x + inner.x, frame_bb.y + pad.y), label, true);
        }
        changed
    }

    pub(crate) fn scalar_components<T>(&mut self, label: &str, values: &mut [T], mut each: impl FnMut(&mut Self, &mut T) -> bool) -> bool {
        if self.cw().skip_items {
            return false;
        }
        let inner = self.style.item_inner_spacing.x;
        let mut changed = false;
        self.begin_group();
        self.push_id(label);
        self.push_multi_items_widths(values.len(), 0.0);
        for (i, v) in values.iter_mut().enumerate() {
            self.push_id_int(i as i32);
            changed |= each(self, v);
            self.same_line(0.0, inner);
            self.pop_id();
            self.pop_item_width();
        }
        self.pop_id();
        self.text(crate::find_rendered_text_end(label));
        self.end_group();
        changed
    }

    /// Float drag at one unit per pixel with no bounds.
    pub fn drag_float(&mut self, label: &str, v: &mut f32) -> bool { self.drag_float_ex(label, v, 1.0, 0.0, 0.0, "%.3f", 1.0) }

    /// Float drag. `v_min >= v_max` means unbounded; `power` other than 1 makes the response non linear.
    #[allow(clippy::too_many_arguments)]
    pub fn drag_float_ex(&mut self, label: &str, v: &mut f32, v_speed: f32, v_min: f32, v_max: f32, format: &str, power: f32) -> bool {
        self.drag_scalar(label, v, v_speed, v_min, v_max, format, power)
    }

    /// One drag per element of `v`, on one line.
    #[allow(clippy::too_many_arguments)]
    pub fn drag_float_n(&mut self, label: &str, v: &mut [f32], v_speed: f32, v_min: f32, v_max: f32, format: &str, power: f32) -> bool {
        self.scalar_components(label, v, |ui, x| ui.drag_scalar("##v", x, v_speed, v_min, v_max, format, power))
    }

    /// Two float drags.
    pub fn drag_float2(&mut self, label: &str, v: &mut [f32; 2], v_speed: f32, v_min: f32, v_max: f32, format: &str) -> bool {
        self.drag_float_n(label, v, v_speed, v_min, v_max, format, 1.0)
    }

    /// Three float drags.
    pub fn drag_float3(&mut self, label: &str, v: &mut [f32; 3], v_speed: f32, v_min: f32, v_max: f32, format: &str) -> bool {
        self.drag_float_n(label, v, v_speed, v_min, v_max, format, 1.0)
    }

    /// Four float drags.
    pub fn drag_float4(&mut self, label: &str, v: &mut [f32; 4], v_speed: f32, v_min: f32, v_max: f32, format: &str) -> bool {
        self.drag_float_n(label, v, v_speed, v_min, v_max, format, 1.0)
    }

    /// Pair of drags editing a `[min, max]` range; each end is bounded by the other.
    #[allow(clippy::too_many_arguments)]
    pub fn drag_float_range2(
        &mut self,
        label: &str,
        v_current_min: &mut f32,
        v_current_max: &mut f32,
        v_speed: f32,
        v_min: f32,
        v_max: f32,
        format: &str,
        format_max: Option<&str>,
    ) -> bool {
        if self.cw().skip_items {
            return false;
        }
        let inner = self.style.item_inner_spacing.x;
        let unbounded = v_min >= v_max;
        self.push_id(label);
        self.begin_group();
        self.push_multi_items_widths(2, 0.0);

        let (lo, hi) = if unbounded { (-f32::MAX, *v_current_max) } else { (v_min, v_max.min(*v_current_max)) };
        let mut changed = self.drag_scalar("##min", v_current_min, v_speed, lo, hi, format, 1.0);
        self.pop_item_width();
        self.same_line(0.0, inner);

        let (lo, hi) = if unbounded { (*v_current_min, f32::MAX) } else { (v_min.max(*v_current_min), v_max) };
        changed |= self.drag_scalar("##max", v_current_max, v_speed, lo, hi, format_max.unwrap_or(format), 1.0);
        self.pop_item_width();
        self.same_line(0.0, inner);

        self.text(crate::find_rendered_text_end(label));
        self.end_group();
        self.pop_id();
        changed
    }

    /// Integer drag at one unit per pixel with no bounds.
    pub fn drag_int(&mut self, label: &str, v: &mut i32) -> bool { self.drag_int_ex(label, v, 1.0, 0, 0, "%d") }

    /// Integer drag; `v_speed` stays fractional for fine control.
    pub fn drag_int_ex(&mut self, label: &str, v: &mut i32, v_speed: f32, v_min: i32, v_max: i32, format: &str) -> bool {
        let mut wide = *v as f64;
        let changed = self.drag_scalar_f64(label, &mut wide, v_speed as f64, v_min as f64, v_max as f64, format, 1.0);
        if changed {
            *v = wide.round().clamp(i32::MIN as f64, i32::MAX as f64) as i32;
        }
        changed
    }

    /// One integer drag per element of `v`, on one line.
    pub fn drag_int_n(&mut self, label: &str, v: &mut [i32], v_speed: f32, v_min: i32, v_max: i32, format: &str) -> bool {
        self.scalar_components(label, v, |ui, x| ui.drag_int_ex("##v", x, v_speed, v_min, v_max, format))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{context, run_frame};
    use crate::{Cond, KeyMods, WindowFlags};

    fn in_window<R>(ctx: &mut Context, f: impl FnOnce(&mut Context) -> R) -> R {
        let mut out = None;
        run_frame(ctx, |ui| {
            ui.set_next_window_pos(vec2(0.0, 0.0), Cond::Always, vec2(0.0, 0.0));
            ui.set_next_window_size(vec2(300.0, 200.0), Cond::Always);
            ui.window("Drags", WindowFlags::NO_TITLE_BAR, |ui| out = Some(f(ui)));
        });
        out.expect("window content ran")
    }

    #[test]
    fn dragging_follows_the_mouse() {
        let mut ctx = context();
        let mut v = 0.0f32;
        in_window(&mut ctx, |ui| ui.drag_float("d", &mut v));
        ctx.io_mut().mouse_down(20.0, 12.0, MouseButton::Left);
        assert!(!in_window(&mut ctx, |ui| ui.drag_float("d", &mut v)));
        ctx.io_mut().mouse_move(40.0, 12.0);
        assert!(in_window(&mut ctx, |ui| ui.drag_float("d", &mut v)));
        assert_eq!(v, 20.0);

        ctx.io_mut().key_mods = KeyMods::SHIFT;
        ctx.io_mut().mouse_move(41.0, 12.0);
        in_window(&mut ctx, |ui| ui.drag_float("d", &mut v));
        assert_eq!(v, 30.0);

        ctx.io_mut().key_mods = KeyMods::NONE;
        ctx.io_mut().mouse_up(41.0, 12.0, MouseButton::Left);
        in_window(&mut ctx, |ui| ui.drag_float("d", &mut v));
        assert!(ctx.active_id().is_none());
    }

    #[test]
    fn bounded_integer_drag_clamps() {
        let mut ctx = context();
        let mut v = 5;
        in_window(&mut ctx, |ui| ui.drag_int_ex("i", &mut v, 1.0, 0, 10, "%d"));
        ctx.io_mut().mouse_down(20.0, 12.0, MouseButton::Left);
        in_window(&mut ctx, |ui| ui.drag_int_ex("i", &mut v, 1.0, 0, 10, "%d"));
        ctx.io_mut().mouse_move(120.0, 12.0);
        assert!(in_window(&mut ctx, |ui| ui.drag_int_ex("i", &mut v, 1.0, 0, 10, "%d")));
        assert_eq!(v, 10);
        ctx.io_mut().mouse_move(-200.0, 12.0);
        in_window(&mut ctx, |ui| ui.drag_int_ex("i", &mut v, 1.0, 0, 10, "%d"));
        assert_eq!(v, 0);
    }

    #[test]
    fn zero_speed_scales_with_the_range() {
        let mut ctx = context();
        let mut v = 0.0f32;
        let show = |ui: &mut Context, v: &mut f32| ui.drag_float_ex("r", v, 0.0, 0.0, 1000.0, "%.1f", 1.0);
        in_window(&mut ctx, |ui| show(ui, &mut v));
        ctx.io_mut().mouse_down(20.0, 12.0, MouseButton::Left);
        in_window(&mut ctx, |ui| show(ui, &mut v));
        ctx.io_mut().mouse_move(30.0, 12.0);
        in_window(&mut ctx, |ui| show(ui, &mut v));
        assert_eq!(v, 100.0);
    }

    #[test]
    fn unit_range_at_zero_speed_saturates_at_one() {
        let mut ctx = context();
        let mut v = 0.0f32;
        let show = |ui: &mut Context, v: &mut f32| ui.drag_float_ex("u", v, 0.0, 0.0, 1.0, "%.3f", 1.0);
        in_window(&mut ctx, |ui| show(ui, &mut v));
        ctx.io_mut().mouse_down(20.0, 12.0, MouseButton::Left);
        in_window(&mut ctx, |ui| show(ui, &mut v));
        ctx.io_mut().mouse_move(120.0, 12.0);
        assert!(in_window(&mut ctx, |ui| show(ui, &mut v)));
        assert_eq!(v, 1.0);
        ctx.io_mut().mouse_move(220.0, 12.0);
        assert!(!in_window(&mut ctx, |ui| show(ui, &mut v)));
        assert_eq!(v, 1.0);
    }

    #[test]
    fn large_integers_move_by_single_steps() {
        let mut ctx = context();
        let mut v = 2_000_000_001;
        in_window(&mut ctx, |ui| ui.drag_int("big", &mut v));
        ctx.io_mut().mouse_down(20.0, 12.0, MouseButton::Left);
        in_window(&mut ctx, |ui| ui.drag_int("big", &mut v));
        ctx.io_mut().mouse_move(23.0, 12.0);
        assert!(in_window(&mut ctx, |ui| ui.drag_int("big", &mut v)));
        assert_eq!(v, 2_000_000_004);
    }

    #[test]
    fn integer_drag_reaches_i32_max_exactly() {
        let mut ctx = context();
        let mut v = i32::MAX - 5;
        let show = |ui: &mut Context, v: &mut i32| ui.drag_int_ex("top", v, 1.0, i32::MAX - 10, i32::MAX, "%d");
        in_window(&mut ctx, |ui| show(ui, &mut v));
        ctx.io_mut().mouse_down(20.0, 12.0, MouseButton::Left);
        in_window(&mut ctx, |ui| show(ui, &mut v));
        ctx.io_mut().mouse_move(23.0, 12.0);
        assert!(in_window(&mut ctx, |ui| show(ui, &mut v)));
        assert_eq!(v, i32::MAX - 2);
        ctx.io_mut().mouse_move(60.0, 12.0);
        assert!(in_window(&mut ctx, |ui| show(ui, &mut v)));
        assert_eq!(v, i32::MAX);
    }

    #[test]
    fn components_share_the_line() {
        let mut ctx = context();
        let mut v = [1.0f32, 2.0, 3.0];
        let rect = in_window(&mut ctx, |ui| {
            ui.drag_float3("pos", &mut v, 1.0, 0.0, 0.0, "%.1f");
            ui.last_item_rect()
        });
        assert_eq!(rect.height, 13.0 + 6.0);
        assert_eq!(v, [1.0, 2.0, 3.0]);
    }
}
