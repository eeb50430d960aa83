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
//! Sliders: the value maps to a grab position inside the frame, optionally through a power curve.

use bitflags::bitflags;

use super::format::round_to_precision_f64;
use crate::{format_value, lerp, parse_format_precision, rect, rect_min_max, vec2, Context, DrawCornerFlags, Id, InputSource, Key, MouseButton, RectExt, Rectf, StyleColor, Vec2f};

const GRAB_PADDING: f32 = 2.0;

bitflags! {
    /// Slider options.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
    pub struct SliderFlags: u32 {
        /// Grab moves along the y axis; the maximum sits at the top.
        const VERTICAL = 1;
        /// No option.
        const NONE = 0;
    }
}

fn is_non_linear(power: f64) -> bool { !(1.0 - 0.00001..=1.0 + 0.00001).contains(&power) }

fn lerp_f64(a: f64, b: f64, t: f64) -> f64 { a + (b - a) * t }

/// Ratio at which zero sits when `[v_min, v_max]` crosses it, so a power curve grows symmetrically away from
/// zero. Ranges on one side of zero put it at the matching end.
pub fn slider_linear_zero_pos(v_min: f32, v_max: f32, power: f32) -> f32 { linear_zero_pos(v_min as f64, v_max as f64, power as f64) as f32 }

/// Grab ratio in `[0, 1]` of `v` (clamped to the range). A degenerate range answers 0.
pub fn slider_calc_ratio_from_value(v: f32, v_min: f32, v_max: f32, power: f32, linear_zero_pos: f32) -> f32 {
    ratio_from_value(v as f64, v_min as f64, v_max as f64, power as f64, linear_zero_pos as f64) as f32
}

/// Inverse of [`slider_calc_ratio_from_value`]: the value shown at ratio `t`.
pub fn slider_calc_value_from_ratio(t: f32, v_min: f32, v_max: f32, power: f32, linear_zero_pos: f32) -> f32 {
    value_from_ratio(t as f64, v_min as f64, v_max as f64, power as f64, linear_zero_pos as f64) as f32
}

fn linear_zero_pos(v_min: f64, v_max: f64, power: f64) -> f64 {
    if v_min * v_max < 0.0 {
        let to_min = v_min.abs().powf(1.0 / power);
        let to_max = v_max.abs().powf(1.0 / power);
        to_min / (to_min + to_max)
    } else if v_min < 0.0 {
        1.0
    } else {
        0.0
    }
}

fn ratio_from_value(v: f64, v_min: f64, v_max: f64, power: f64, linear_zero_pos: f64) -> f64 {
    if v_min == v_max {
        return 0.0;
    }
    let v = if v_min < v_max { v.clamp(v_min, v_max) } else { v.clamp(v_max, v_min) };
    if !is_non_linear(power) {
        return (v - v_min) / (v_max - v_min);
    }
    if v < 0.0 {
        let f = 1.0 - (v - v_min) / (v_max.min(0.0) - v_min);
        (1.0 - f.powf(1.0 / power)) * linear_zero_pos
    } else {
        let lo = v_min.max(0.0);
        let f = (v - lo) / (v_max - lo);
        linear_zero_pos + f.powf(1.0 / power) * (1.0 - linear_zero_pos)
    }
}

fn value_from_ratio(t: f64, v_min: f64, v_max: f64, power: f64, linear_zero_pos: f64) -> f64 {
    if !is_non_linear(power) {
        return lerp_f64(v_min, v_max, t);
    }
    if t < linear_zero_pos {
        let a = (1.0 - t / linear_zero_pos).powf(power);
        lerp_f64(v_max.min(0.0), v_min, a)
    } else {
        let a = if (linear_zero_pos - 1.0).abs() > 1.0e-6 { (t - linear_zero_pos) / (1.0 - linear_zero_pos) } else { t };
        lerp_f64(v_min.max(0.0), v_max, a.powf(power))
    }
}

/// Slider behaviors and widgets.
impl Context {
    /// Frame, grab and value update of a slider over `frame_bb`. Integer precision (`precision == 0`) sizes the
    /// grab to one step and moves it by whole units from the keyboard.
    #[allow(clippy::too_many_arguments)]
    pub fn slider_behavior(&mut self, frame_bb: Rectf, id: Id, v: &mut f32, v_min: f32, v_max: f32, power: f32, precision: i32, flags: SliderFlags) -> bool {
        let mut wide = *v as f64;
        let changed = self.slider_behavior_f64(frame_bb, id, &mut wide, v_min as f64, v_max as f64, power as f64, precision, flags);
        if changed && wide as f32 != *v {
            *v = wide as f32;
            return true;
        }
        false
    }

    #[allow(clippy::too_many_arguments)]
    pub(crate) fn slider_behavior_f64(&mut self, frame_bb: Rectf, id: Id, v: &mut f64, v_min: f64, v_max: f64, power: f64, precision: i32, flags: SliderFlags) -> bool {
        let active = self.active_id == id;
        let frame_idx = Self::frame_colors(active, active || self.hovered_id == id);
        self.render_nav_highlight(frame_bb, id);

        let horizontal = !flags.contains(SliderFlags::VERTICAL);
        let non_linear = is_non_linear(power);
        let (grab_min, grab_rounding, frame_rounding) = (self.style.grab_min_size, self.style.grab_rounding, self.style.frame_rounding);

        let slider_sz = if horizontal { frame_bb.width } else { frame_bb.height } - GRAB_PADDING * 2.0;
        let grab_sz = if precision != 0 {
            grab_min.min(slider_sz)
        } else {
            (slider_sz / ((v_max - v_min).abs() + 1.0) as f32).max(grab_min).min(slider_sz)
        };
        let usable_sz = slider_sz - grab_sz;
        let (lo, hi) = if horizontal { (frame_bb.x, frame_bb.max_pt().x) } else { (frame_bb.y, frame_bb.max_pt().y) };
        let usable_min = lo + GRAB_PADDING + grab_sz * 0.5;
        let usable_max = hi - GRAB_PADDING - grab_sz * 0.5;
        let zero_pos = linear_zero_pos(v_min, v_max, power);

        let mut changed = false;
        if self.active_id == id {
            let mut new_t = None;
            match self.active_id_source {
                InputSource::Mouse => {
                    if !self.input.is_mouse_down(MouseButton::Left) {
                        self.clear_active_id();
                    } else if let Some(mouse) = self.input.mouse_pos {
                        let m = if horizontal { mouse.x } else { mouse.y };
                        let t = if usable_sz > 0.0 { ((m - usable_min) / usable_sz).clamp(0.0, 1.0) } else { 0.0 };
                        let t = if horizontal { t } else { 1.0 - t };
                        new_t = Some(t as f64);
                    }
                }
                InputSource::Nav => {
                    let mut delta = if horizontal {
                        self.nav_input_amount as f64
                    } else {
                        let (delay, rate) = self.input.key_repeat();
                        (self.input.key_pressed_amount(Key::UpArrow, delay, rate) - self.input.key_pressed_amount(Key::DownArrow, delay, rate)) as f64
                    };
                    let (slow, fast) = (self.input.key_mods.is_alt(), self.input.key_mods.is_shift());
                    if self.nav_activate_pressed_id == id && !self.active_id_is_just_activated {
                        self.clear_active_id();
                    } else if delta != 0.0 {
                        let t = ratio_from_value(*v, v_min, v_max, power, zero_pos);
                        if precision == 0 && !non_linear {
                            if (v_max - v_min).abs() <= 100.0 || slow {
                                delta = delta.signum() / (v_max - v_min);
                            } else {
                                delta /= 100.0;
                            }
                        } else {
                            delta /= 100.0;
                            if slow {
                                delta /= 10.0;
                            }
                        }
                        if fast {
                            delta *= 10.0;
                        }
                        // already at the end being pushed against
                        if !((t >= 1.0 && delta > 0.0) || (t <= 0.0 && delta < 0.0)) {
                            new_t = Some((t + delta).clamp(0.0, 1.0));
                        }
                    }
                }
                InputSource::None => {}
            }

            if let Some(t) = new_t {
                let nv = round_to_precision_f64(value_from_ratio(t, v_min, v_max, power, zero_pos), precision);
                if *v != nv {
                    *v = nv;
                    changed = true;
                }
            }
        }

        let mut grab_t = ratio_from_value(*v, v_min, v_max, power, zero_pos) as f32;
        if !horizontal {
            grab_t = 1.0 - grab_t;
        }
        let grab_pos = lerp(usable_min, usable_max, grab_t);
        let (fmin, fmax) = (frame_bb.min_pt(), frame_bb.max_pt());
        let grab_bb = if horizontal {
            rect_min_max(vec2(grab_pos - grab_sz * 0.5, fmin.y + GRAB_PADDING), vec2(grab_pos + grab_sz * 0.5, fmax.y - GRAB_PADDING))
        } else {
            rect_min_max(vec2(fmin.x + GRAB_PADDING, grab_pos - grab_sz * 0.5), vec2(fmax.x - GRAB_PADDING, grab_pos + grab_sz * 0.5))
        };
        let grab_idx = if self.active_id == id { StyleColor::SliderGrabActive } else { StyleColor::SliderGrab };

        let mut p = self.painter();
        let frame_col = p.col(frame_idx);
        p.render_frame(fmin, fmax, frame_col, true, frame_rounding);
        let grab_col = p.col(grab_idx);
        p.dl.add_rect_filled(grab_bb.min_pt(), grab_bb.max_pt(), grab_col, grab_rounding, DrawCornerFlags::ALL);
        changed
    }

    fn slider_activate(&mut self, hovered: bool, id: Id) {
        if (hovered && self.input.is_mouse_clicked(MouseButton::Left, false)) || self.nav_activate_id == id {
            let wid = self.cw_id();
            self.set_active_id(id, Some(wid));
            self.set_focus_id(id, wid);
            self.focus_window(Some(wid));
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn slider_scalar(&mut self, label: &str, frame_size: Option<Vec2f>, v: &mut f32, v_min: f32, v_max: f32, format: &str, power: f32) -> bool {
        let mut wide = *v as f64;
        let changed = self.slider_scalar_f64(label, frame_size, &mut wide, v_min as f64, v_max as f64, format, power as f64);
        if changed && wide as f32 != *v {
            *v = wide as f32;
            return true;
        }
        false
    }

    #[allow(clippy::too_many_arguments)]
    fn slider_scalar_f64(&mut self, label: &str, frame_size: Option<Vec2f>, v: &mut f64, v_min: f64, v_max: f64, format: &str, power: f64) -> bool {
        if self.cw().skip_items {
            return false;
        }
        let id = self.get_id(label);
        let label_size = self.calc_text_size(label, true, -1.0);
        let (pad, inner) = (self.style.frame_padding, self.style.item_inner_spacing);
        let pos = self.cw().dc.cursor_pos;
        let size = frame_size.unwrap_or_else(|| vec2(self.calc_item_width(), label_size.y + pad.y * 2.0));
        let frame_bb = rect(pos.x, pos.y, size.x, size.y);
        let label_w = if label_size.x > 0.0 { inner.x + label_size.x } else { 0.0 };
        let total_bb = rect(pos.x, pos.y, size.x + label_w, size.y);

        self.item_size(vec2(total_bb.width, total_bb.height), pad.y);
        if !self.item_add(total_bb, id) {
            return false;
        }
        let hovered = self.item_hoverable(frame_bb, id);
        self.slider_activate(hovered, id);

        let vertical = frame_size.is_some();
        let flags = if vertical { SliderFlags::VERTICAL } else { SliderFlags::NONE };
        let precision = parse_format_precision(format, 3);
        let changed = self.slider_behavior_f64(frame_bb, id, v, v_min, v_max, power, precision, flags);

        let value = format_value(format, *v);
        let align = if vertical { vec2(0.5, 0.0) } else { vec2(0.5, 0.5) };
        let mut p = self.painter();
        p.render_text_clipped(frame_bb.min_pt(), frame_bb.max_pt(), &value, None, align, None);
        if label_size.x > 0.0 {
            p.render_text(vec2(frame_bb.max_pt().x + inner.x, frame_bb.y + pad.y), label, true);
        }
        changed
    }

    /// Float slider over `[v_min, v_max]` showing three decimals.
    pub fn slider_float(&mut self, label: &str, v: &mut f32, v_min: f32, v_max: f32) -> bool { self.slider_float_ex(label, v, v_min, v_max, "%.3f", 1.0) }

    /// Float slider. The value is rounded to the precision of `format`; `power` above 1 gives finer control near
    /// zero.
    pub fn slider_float_ex(&mut self, label: &str, v: &mut f32, v_min: f32, v_max: f32, format: &str, power: f32) -> bool {
        self.slider_scalar(label, None, v, v_min, v_max, format, power)
    }

    /// One slider per element of `v`, on one line.
    pub fn slider_float_n(&mut self, label: &str, v: &mut [f32], v_min: f32, v_max: f32, format: &str, power: f32) -> bool {
        self.scalar_components(label, v, |ui, x| ui.slider_scalar("##v", None, x, v_min, v_max, format, power))
    }

    /// Integer slider showing the value with `%d`.
    pub fn slider_int(&mut self, label: &str, v: &mut i32, v_min: i32, v_max: i32) -> bool { self.slider_int_ex(label, v, v_min, v_max, "%d") }

    /// Integer slider with a custom format.
    pub fn slider_int_ex(&mut self, label: &str, v: &mut i32, v_min: i32, v_max: i32, format: &str) -> bool {
        let mut wide = *v as f64;
        let changed = self.slider_scalar_f64(label, None, &mut wide, v_min as f64, v_max as f64, format, 1.0);
        if changed {
            *v = wide.round().clamp(i32::MIN as f64, i32::MAX as f64) as i32;
        }
        changed
    }

    /// Vertical float slider of the given frame `size`; the value is printed at the top of the frame.
    #[allow(clippy::too_many_arguments)]
    pub fn v_slider_float(&mut self, label: &str, size: Vec2f, v: &mut f32, v_min: f32, v_max: f32, format: &str, power: f32) -> bool {
        self.slider_scalar(label, Some(size), v, v_min, v_max, format, power)
    }

    /// Edits an angle stored in radians through a slider in degrees.
    pub fn slider_angle(&mut self, label: &str, v_rad: &mut f32, v_degrees_min: f32, v_degrees_max: f32) -> bool {
        let mut deg = v_rad.to_degrees();
        let changed = self.slider_float_ex(label, &mut deg, v_degrees_min, v_degrees_max, "%.0f deg", 1.0);
        if changed {
            *v_rad = deg.to_radians();
        }
        changed
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
            ui.window("Sliders", WindowFlags::NO_TITLE_BAR, |ui| out = Some(f(ui)));
        });
        out.expect("window content ran")
    }

    #[test]
    fn zero_sits_where_the_range_crosses_it() {
        assert_eq!(slider_linear_zero_pos(-10.0, 10.0, 1.0), 0.5);
        assert_eq!(slider_linear_zero_pos(-5.0, -1.0, 2.0), 1.0);
        assert_eq!(slider_linear_zero_pos(1.0, 5.0, 2.0), 0.0);
        assert_eq!(slider_calc_ratio_from_value(3.0, 2.0, 2.0, 1.0, 0.0), 0.0);
        assert_eq!(slider_calc_ratio_from_value(50.0, 0.0, 10.0, 1.0, 0.0), 1.0);
    }

    #[test]
    fn power_curve_favours_small_values() {
        let z = slider_linear_zero_pos(0.0, 100.0, 2.0);
        assert_eq!(slider_calc_value_from_ratio(0.5, 0.0, 100.0, 2.0, z), 25.0);
        assert_eq!(slider_calc_ratio_from_value(25.0, 0.0, 100.0, 2.0, z), 0.5);
    }

    #[test]
    fn mouse_drags_the_grab_across_the_range() {
        let mut ctx = context();
        let mut v = 50.0f32;
        in_window(&mut ctx, |ui| ui.slider_float("s", &mut v, 0.0, 100.0));
        ctx.io_mut().mouse_down(9.0, 12.0, MouseButton::Left);
        assert!(in_window(&mut ctx, |ui| ui.slider_float("s", &mut v, 0.0, 100.0)));
        assert_eq!(v, 0.0);
        ctx.io_mut().mouse_move(290.0, 12.0);
        assert!(in_window(&mut ctx, |ui| ui.slider_float("s", &mut v, 0.0, 100.0)));
        assert_eq!(v, 100.0);
        ctx.io_mut().mouse_up(290.0, 12.0, MouseButton::Left);
        assert!(!in_window(&mut ctx, |ui| ui.slider_float("s", &mut v, 0.0, 100.0)));
        assert!(ctx.active_id().is_none());
    }

    #[test]
    fn keyboard_steps_integer_sliders_by_one() {
        let mut ctx = context();
        let mut v = 3;
        in_window(&mut ctx, |ui| ui.slider_int("n", &mut v, 0, 10));
        ctx.io_mut().key_down(Key::Tab);
        in_window(&mut ctx, |ui| ui.slider_int("n", &mut v, 0, 10));
        ctx.io_mut().key_up(Key::Tab);
        ctx.io_mut().key_down(Key::Space);
        in_window(&mut ctx, |ui| ui.slider_int("n", &mut v, 0, 10));
        ctx.io_mut().key_up(Key::Space);
        in_window(&mut ctx, |ui| ui.slider_int("n", &mut v, 0, 10));
        ctx.io_mut().key_down(Key::RightArrow);
        assert!(in_window(&mut ctx, |ui| ui.slider_int("n", &mut v, 0, 10)));
        assert_eq!(v, 4);
    }

    #[test]
    fn keyboard_steps_large_integers_by_one() {
        let mut ctx = context();
        let (lo, hi) = (i32::MAX - 100, i32::MAX);
        let mut v = i32::MAX - 50;
        in_window(&mut ctx, |ui| ui.slider_int("n", &mut v, lo, hi));
        ctx.io_mut().key_down(Key::Tab);
        in_window(&mut ctx, |ui| ui.slider_int("n", &mut v, lo, hi));
        ctx.io_mut().key_up(Key::Tab);
        ctx.io_mut().key_down(Key::Space);
        in_window(&mut ctx, |ui| ui.slider_int("n", &mut v, lo, hi));
        ctx.io_mut().key_up(Key::Space);
        in_window(&mut ctx, |ui| ui.slider_int("n", &mut v, lo, hi));
        ctx.io_mut().key_down(Key::RightArrow);
        assert!(in_window(&mut ctx, |ui| ui.slider_int("n", &mut v, lo, hi)));
        assert_eq!(v, i32::MAX - 49);
    }

    #[test]
    fn angle_is_left_alone_without_a_change() {
        let mut ctx = context();
        let mut a = 0.5f32;
        assert!(!in_window(&mut ctx, |ui| ui.slider_angle("a", &mut a, -360.0, 360.0)));
        assert_eq!(a, 0.5);
    }

    #[test]
    fn vertical_slider_puts_the_maximum_on_top() {
        let mut ctx = context();
        let mut v = 0.0f32;
        let show = |ui: &mut Context, v: &mut f32| ui.v_slider_float("##v", vec2(20.0, 100.0), v, 0.0, 10.0, "%.1f", 1.0);
        in_window(&mut ctx, |ui| show(ui, &mut v));
        ctx.io_mut().mouse_down(18.0, 9.0, MouseButton::Left);
        in_window(&mut ctx, |ui| show(ui, &mut v));
        assert_eq!(v, 10.0);
    }

    #[test]
    fn angle_round_trips_through_degrees() {
        let mut ctx = context();
        let mut a = std::f32::consts::FRAC_PI_2;
        assert!(!in_window(&mut ctx, |ui| ui.slider_angle("a", &mut a, -360.0, 360.0)));
        assert!((a - std::f32::consts::FRAC_PI_2).abs() < 1.0e-6);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn ratio_inverts_value(t in 0.0f32..=1.0, v_min in -100.0f32..0.0, span in 1.0f32..200.0, power in prop_oneof![Just(1.0f32), Just(2.0f32), Just(3.0f32)]) {
            let v_max = v_min + span;
            let z = slider_linear_zero_pos(v_min, v_max, power);
            let v = slider_calc_value_from_ratio(t, v_min, v_max, power, z);
            let back = slider_calc_ratio_from_value(v, v_min, v_max, power, z);
            prop_assert!((back - t).abs() < 1.0e-3, "t {} -> v {} -> {}", t, v, back);
        }

        #[test]
        fn rounded_value_stays_within_one_step(t in 0.0f32..=1.0, v_min in -100.0f32..0.0, span in 1.0f32..200.0, precision in 0i32..4) {
            let v_max = v_min + span;
            let v = crate::round_to_precision(slider_calc_value_from_ratio(t, v_min, v_max, 1.0, 0.0), precision);
            let back = slider_calc_ratio_from_value(v, v_min, v_max, 1.0, 0.0);
            let step = crate::minimum_step_at_decimal_precision(precision);
            prop_assert!((back - t).abs() <= (0.5 * step + 1.0e-4) / span + 1.0e-4, "t {} -> v {} -> {} at precision {}", t, v, back, precision);
        }
    }
}
