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
//! Platform input snapshot filled by the host, and the per-frame state derived from it.

use bitflags::*;

use crate::{vec2, Config, Vec2f};

/// Number of tracked mouse buttons.
pub const MOUSE_BUTTON_COUNT: usize = 5;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
/// Mouse buttons tracked by [`Io`].
pub enum MouseButton {
    /// Primary button.
    Left = 0,
    /// Secondary button.
    Right = 1,
    /// Wheel button.
    Middle = 2,
    /// First extra button.
    Extra1 = 3,
    /// Second extra button.
    Extra2 = 4,
}

impl MouseButton {
    /// Index into the per-button arrays.
    pub fn index(self) -> usize { self as usize }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
/// Keys the UI reacts to. The host maps its own key codes onto these.
pub enum Key {
    /// Tab.
    Tab,
    /// Left arrow.
    LeftArrow,
    /// Right arrow.
    RightArrow,
    /// Up arrow.
    UpArrow,
    /// Down arrow.
    DownArrow,
    /// Page up.
    PageUp,
    /// Page down.
    PageDown,
    /// Home.
    Home,
    /// End.
    End,
    /// Insert.
    Insert,
    /// Delete.
    Delete,
    /// Backspace.
    Backspace,
    /// Space bar.
    Space,
    /// Enter or Return.
    Enter,
    /// Escape.
    Escape,
    /// Letter A.
    A,
    /// Letter C.
    C,
    /// Letter V.
    V,
    /// Letter X.
    X,
    /// Letter Y.
    Y,
    /// Letter Z.
    Z,
}

impl Key {
    /// Number of keys.
    pub const COUNT: usize = 21;

    /// Index into the per-key arrays.
    pub fn index(self) -> usize { self as usize }
}

bitflags! {
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
    /// Modifier key state.
    pub struct KeyMods : u32 {
        /// Super/Windows/Command key held.
        const SUPER = 8;
        /// Alt key held.
        const ALT = 4;
        /// Control key held.
        const CTRL = 2;
        /// Shift key held.
        const SHIFT = 1;
        /// No modifiers active.
        const NONE = 0;
    }
}

impl KeyMods {
    /// Returns `true` if no modifiers are active.
    pub fn is_none(&self) -> bool { self.bits() == 0 }
    /// Returns `true` if Alt is held.
    pub fn is_alt(&self) -> bool { self.intersects(Self::ALT) }
    /// Returns `true` if Control is held.
    pub fn is_ctrl(&self) -> bool { self.intersects(Self::CTRL) }
    /// Returns `true` if Shift is held.
    pub fn is_shift(&self) -> bool { self.intersects(Self::SHIFT) }
    /// Returns `true` if Super is held.
    pub fn is_super(&self) -> bool { self.intersects(Self::SUPER) }
}

#[derive(Clone, Debug)]
/// Raw input written by the host before each frame.
pub struct Io {
    /// Mouse position in display coordinates, `None` when the mouse is unavailable.
    pub mouse_pos: Option<Vec2f>,
    /// Held state of the mouse buttons (left, right, middle, extra1, extra2).
    pub mouse_down: [bool; MOUSE_BUTTON_COUNT],
    /// Vertical wheel movement accumulated this frame, one unit per text line.
    pub mouse_wheel: f32,
    /// Horizontal wheel movement accumulated this frame.
    pub mouse_wheel_h: f32,
    /// Held state of every [`Key`].
    pub keys_down: [bool; Key::COUNT],
    /// Modifier keys held this frame.
    pub key_mods: KeyMods,
    /// Seconds elapsed since the last frame.
    pub delta_time: f32,
    /// Display size in pixels.
    pub display_size: Vec2f,
    /// Framebuffer to display scale.
    pub display_framebuffer_scale: Vec2f,
    /// Text typed this frame.
    pub input_chars: String,
}

impl Default for Io {
    fn default() -> Self {
        Self {
            mouse_pos: None,
            mouse_down: [false; MOUSE_BUTTON_COUNT],
            mouse_wheel: 0.0,
            mouse_wheel_h: 0.0,
            keys_down: [false; Key::COUNT],
            key_mods: KeyMods::NONE,
            delta_time: 1.0 / 60.0,
            display_size: vec2(0.0, 0.0),
            display_framebuffer_scale: vec2(1.0, 1.0),
            input_chars: String::new(),
        }
    }
}

impl Io {
    /// Updates the current mouse pointer position.
    pub fn mouse_move(&mut self, x: f32, y: f32) { self.mouse_pos = Some(vec2(x, y)); }

    /// Records that `btn` was pressed at `(x, y)`.
    pub fn mouse_down(&mut self, x: f32, y: f32, btn: MouseButton) {
        self.mouse_move(x, y);
        self.mouse_down[btn.index()] = true;
    }

    /// Records that `btn` was released at `(x, y)`.
    pub fn mouse_up(&mut self, x: f32, y: f32, btn: MouseButton) {
        self.mouse_move(x, y);
        self.mouse_down[btn.index()] = false;
    }

    /// Accumulates scroll wheel movement.
    pub fn scroll(&mut self, x: f32, y: f32) {
        self.mouse_wheel_h += x;
        self.mouse_wheel += y;
    }

    /// Records that `key` was pressed.
    pub fn key_down(&mut self, key: Key) { self.keys_down[key.index()] = true; }

    /// Records that `key` was released.
    pub fn key_up(&mut self, key: Key) { self.keys_down[key.index()] = false; }

    /// Appends UTF-8 text typed this frame.
    pub fn text(&mut self, text: &str) { self.input_chars.push_str(text); }

    pub(crate) fn epilogue(&mut self) {
        self.mouse_wheel = 0.0;
        self.mouse_wheel_h = 0.0;
        self.input_chars.clear();
    }
}

/// Number of repeats a held input produced between `t_prev` and `t`.
///
/// Returns 1 on the first frame of the press, then nothing until `delay` has elapsed, then one count per
/// `rate` seconds.
pub fn calc_typematic_repeat_amount(t: f32, t_prev: f32, delay: f32, rate: f32) -> i32 {
    if t == 0.0 {
        return 1;
    }
    if t <= delay || rate <= 0.0 {
        return 0;
    }
    let count = ((t - delay) / rate).floor() as i32 - ((t_prev - delay) / rate).floor() as i32;
    count.max(0)
}

#[derive(Clone, Debug)]
/// Input state derived once per frame from [`Io`].
pub struct InputState {
    /// Mouse position this frame.
    pub mouse_pos: Option<Vec2f>,
    /// Mouse position last frame.
    pub mouse_pos_prev: Option<Vec2f>,
    /// Mouse movement since last frame, zero when either position is unknown.
    pub mouse_delta: Vec2f,
    /// Held state of each button.
    pub mouse_down: [bool; MOUSE_BUTTON_COUNT],
    /// Button went down this frame.
    pub mouse_clicked: [bool; MOUSE_BUTTON_COUNT],
    /// Button went down this frame close in time and space to the previous click.
    pub mouse_double_clicked: [bool; MOUSE_BUTTON_COUNT],
    /// Button went up this frame.
    pub mouse_released: [bool; MOUSE_BUTTON_COUNT],
    /// Position of the last click of each button.
    pub mouse_clicked_pos: [Vec2f; MOUSE_BUTTON_COUNT],
    /// Time of the last click of each button.
    pub mouse_clicked_time: [f64; MOUSE_BUTTON_COUNT],
    /// Seconds each button has been held, -1 when up.
    pub mouse_down_duration: [f32; MOUSE_BUTTON_COUNT],
    /// Previous frame's `mouse_down_duration`.
    pub mouse_down_duration_prev: [f32; MOUSE_BUTTON_COUNT],
    /// Squared maximum distance travelled from the click position while held.
    pub mouse_drag_max_distance_sqr: [f32; MOUSE_BUTTON_COUNT],
    /// Vertical wheel movement this frame.
    pub mouse_wheel: f32,
    /// Horizontal wheel movement this frame.
    pub mouse_wheel_h: f32,
    /// Held state of each key.
    pub keys_down: [bool; Key::COUNT],
    /// Seconds each key has been held, -1 when up.
    pub keys_down_duration: [f32; Key::COUNT],
    /// Previous frame's `keys_down_duration`.
    pub keys_down_duration_prev: [f32; Key::COUNT],
    /// Modifier keys held this frame.
    pub key_mods: KeyMods,
    /// Seconds elapsed since the last frame.
    pub delta_time: f32,
    drag_threshold: f32,
    key_repeat_delay: f32,
    key_repeat_rate: f32,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            mouse_pos: None,
            mouse_pos_prev: None,
            mouse_delta: vec2(0.0, 0.0),
            mouse_down: [false; MOUSE_BUTTON_COUNT],
            mouse_clicked: [false; MOUSE_BUTTON_COUNT],
            mouse_double_clicked: [false; MOUSE_BUTTON_COUNT],
            mouse_released: [false; MOUSE_BUTTON_COUNT],
            mouse_clicked_pos: [vec2(0.0, 0.0); MOUSE_BUTTON_COUNT],
            mouse_clicked_time: [f64::MIN; MOUSE_BUTTON_COUNT],
            mouse_down_duration: [-1.0; MOUSE_BUTTON_COUNT],
            mouse_down_duration_prev: [-1.0; MOUSE_BUTTON_COUNT],
            mouse_drag_max_distance_sqr: [0.0; MOUSE_BUTTON_COUNT],
            mouse_wheel: 0.0,
            mouse_wheel_h: 0.0,
            keys_down: [false; Key::COUNT],
            keys_down_duration: [-1.0; Key::COUNT],
            keys_down_duration_prev: [-1.0; Key::COUNT],
            key_mods: KeyMods::NONE,
            delta_time: 0.0,
            drag_threshold: 6.0,
            key_repeat_delay: 0.25,
            key_repeat_rate: 0.05,
        }
    }
}

fn dist_sqr(a: Vec2f, b: Vec2f) -> f32 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    dx * dx + dy * dy
}

impl InputState {
    /// Derives this frame's state from the host snapshot. `time` is the context clock after advancing it.
    pub fn update(&mut self, io: &Io, config: &Config, time: f64) {
        self.drag_threshold = config.mouse_drag_threshold;
        self.key_repeat_delay = config.key_repeat_delay;
        self.key_repeat_rate = config.key_repeat_rate;
        self.delta_time = io.delta_time;
        self.key_mods = io.key_mods;
        self.mouse_wheel = io.mouse_wheel;
        self.mouse_wheel_h = io.mouse_wheel_h;

        self.mouse_delta = match (io.mouse_pos, self.mouse_pos_prev) {
            (Some(p), Some(q)) => vec2(p.x - q.x, p.y - q.y),
            _ => vec2(0.0, 0.0),
        };
        self.mouse_pos = io.mouse_pos;
        self.mouse_pos_prev = io.mouse_pos;

        let max_dist_sqr = config.mouse_double_click_max_dist * config.mouse_double_click_max_dist;
        for i in 0..MOUSE_BUTTON_COUNT {
            let down = io.mouse_down[i];
            let duration = self.mouse_down_duration[i];
            self.mouse_down[i] = down;
            self.mouse_clicked[i] = down && duration < 0.0;
            self.mouse_released[i] = !down && duration >= 0.0;
            self.mouse_down_duration_prev[i] = duration;
            self.mouse_down_duration[i] = if down {
                if duration < 0.0 { 0.0 } else { duration + io.delta_time }
            } else {
                -1.0
            };
            self.mouse_double_clicked[i] = false;
            let pos = self.mouse_pos.unwrap_or(self.mouse_clicked_pos[i]);
            if self.mouse_clicked[i] {
                if time - self.mouse_clicked_time[i] < config.mouse_double_click_time as f64 {
                    if dist_sqr(pos, self.mouse_clicked_pos[i]) < max_dist_sqr {
                        self.mouse_double_clicked[i] = true;
                    }
                    // a third click starts a new sequence
                    self.mouse_clicked_time[i] = f64::MIN;
                } else {
                    self.mouse_clicked_time[i] = time;
                }
                self.mouse_clicked_pos[i] = pos;
                self.mouse_drag_max_distance_sqr[i] = 0.0;
            } else if down {
                let d = dist_sqr(pos, self.mouse_clicked_pos[i]);
                self.mouse_drag_max_distance_sqr[i] = self.mouse_drag_max_distance_sqr[i].max(d);
            }
        }

        for k in 0..Key::COUNT {
            let duration = self.keys_down_duration[k];
            self.keys_down[k] = io.keys_down[k];
            self.keys_down_duration_prev[k] = duration;
            self.keys_down_duration[k] = if io.keys_down[k] {
                if duration < 0.0 { 0.0 } else { duration + io.delta_time }
            } else {
                -1.0
            };
        }
    }

    /// Returns `true` while `btn` is held.
    pub fn is_mouse_down(&self, btn: MouseButton) -> bool { self.mouse_down[btn.index()] }

    /// Returns `true` on the frame `btn` went down, and on repeats when `repeat` is set.
    pub fn is_mouse_clicked(&self, btn: MouseButton, repeat: bool) -> bool {
        let t = self.mouse_down_duration[btn.index()];
        if t == 0.0 {
            return true;
        }
        if repeat && t > self.key_repeat_delay {
            return calc_typematic_repeat_amount(t, t - self.delta_time, self.key_repeat_delay, self.key_repeat_rate) > 0;
        }
        false
    }

    /// Returns `true` on the frame `btn` went up.
    pub fn is_mouse_released(&self, btn: MouseButton) -> bool { self.mouse_released[btn.index()] }

    /// Returns `true` on the second click of a double-click.
    pub fn is_mouse_double_clicked(&self, btn: MouseButton) -> bool { self.mouse_double_clicked[btn.index()] }

    /// Returns `true` while `btn` is held and the mouse travelled at least `threshold` pixels (negative uses the default).
    pub fn is_mouse_dragging(&self, btn: MouseButton, threshold: f32) -> bool {
        let i = btn.index();
        if !self.mouse_down[i] {
            return false;
        }
        let threshold = if threshold < 0.0 { self.drag_threshold } else { threshold };
        self.mouse_drag_max_distance_sqr[i] >= threshold * threshold
    }

    /// Current position minus the click position, once the drag passed `lock_threshold` (negative uses the default).
    pub fn mouse_drag_delta(&self, btn: MouseButton, lock_threshold: f32) -> Vec2f {
        let i = btn.index();
        let lock_threshold = if lock_threshold < 0.0 { self.drag_threshold } else { lock_threshold };
        match self.mouse_pos {
            Some(p) if self.mouse_down[i] && self.mouse_drag_max_distance_sqr[i] >= lock_threshold * lock_threshold => {
                vec2(p.x - self.mouse_clicked_pos[i].x, p.y - self.mouse_clicked_pos[i].y)
            }
            _ => vec2(0.0, 0.0),
        }
    }

    /// Returns `true` while `key` is held.
    pub fn is_key_down(&self, key: Key) -> bool { self.keys_down[key.index()] }

    /// Returns `true` on the frame `key` went down, and on typematic repeats when `repeat` is set.
    pub fn is_key_pressed(&self, key: Key, repeat: bool) -> bool {
        let t = self.keys_down_duration[key.index()];
        if t == 0.0 {
            return true;
        }
        if repeat && t > self.key_repeat_delay {
            return self.key_pressed_amount(key, self.key_repeat_delay, self.key_repeat_rate) > 0;
        }
        false
    }

    /// Returns `true` on the frame `key` went up.
    pub fn is_key_released(&self, key: Key) -> bool {
        let i = key.index();
        self.keys_down_duration_prev[i] >= 0.0 && !self.keys_down[i]
    }

    /// Number of typematic repeats `key` produced this frame.
    pub fn key_pressed_amount(&self, key: Key, delay: f32, rate: f32) -> i32 {
        let t = self.keys_down_duration[key.index()];
        calc_typematic_repeat_amount(t, t - self.delta_time, delay, rate)
    }

    pub(crate) fn key_repeat(&self) -> (f32, f32) { (self.key_repeat_delay, self.key_repeat_rate) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(state: &mut InputState, io: &Io, time: &mut f64) {
        *time += io.delta_time as f64;
        state.update(io, &Config::default(), *time);
    }

    #[test]
    fn typematic_counts() {
        assert_eq!(calc_typematic_repeat_amount(0.0, -0.1, 0.5, 0.25), 1);
        assert_eq!(calc_typematic_repeat_amount(0.25, 0.125, 0.5, 0.25), 0);
        assert_eq!(calc_typematic_repeat_amount(1.0, 0.75, 0.5, 0.25), 1);
        assert_eq!(calc_typematic_repeat_amount(1.0, 0.0, 0.5, 0.25), 3);
        assert_eq!(calc_typematic_repeat_amount(1.0, 0.75, 0.5, 0.0), 0);
    }

    #[test]
    fn click_and_release_edges() {
        let mut io = Io::default();
        let mut st = InputState::default();
        let mut time = 0.0;
        io.mouse_down(5.0, 5.0, MouseButton::Left);
        step(&mut st, &io, &mut time);
        assert!(st.mouse_clicked[0]);
        assert!(st.is_mouse_clicked(MouseButton::Left, false));
        step(&mut st, &io, &mut time);
        assert!(!st.mouse_clicked[0]);
        assert!(st.is_mouse_down(MouseButton::Left));
        io.mouse_up(5.0, 5.0, MouseButton::Left);
        step(&mut st, &io, &mut time);
        assert!(st.is_mouse_released(MouseButton::Left));
        assert_eq!(st.mouse_down_duration[0], -1.0);
    }

    #[test]
    fn double_click_needs_time_and_proximity() {
        let mut io = Io::default();
        let mut st = InputState::default();
        let mut time = 0.0;
        io.delta_time = 0.05;
        io.mouse_down(10.0, 10.0, MouseButton::Left);
        step(&mut st, &io, &mut time);
        io.mouse_up(10.0, 10.0, MouseButton::Left);
        step(&mut st, &io, &mut time);
        io.mouse_down(12.0, 11.0, MouseButton::Left);
        step(&mut st, &io, &mut time);
        assert!(st.is_mouse_double_clicked(MouseButton::Left));

        // third click is a fresh sequence
        io.mouse_up(12.0, 11.0, MouseButton::Left);
        step(&mut st, &io, &mut time);
        io.mouse_down(12.0, 11.0, MouseButton::Left);
        step(&mut st, &io, &mut time);
        assert!(!st.is_mouse_double_clicked(MouseButton::Left));
    }

    #[test]
    fn drag_delta_locks_on_threshold() {
        let mut io = Io::default();
        let mut st = InputState::default();
        let mut time = 0.0;
        io.mouse_down(0.0, 0.0, MouseButton::Left);
        step(&mut st, &io, &mut time);
        io.mouse_move(3.0, 0.0);
        step(&mut st, &io, &mut time);
        assert!(!st.is_mouse_dragging(MouseButton::Left, -1.0));
        assert_eq!(st.mouse_drag_delta(MouseButton::Left, -1.0).x, 0.0);
        io.mouse_move(8.0, 0.0);
        step(&mut st, &io, &mut time);
        assert!(st.is_mouse_dragging(MouseButton::Left, -1.0));
        assert_eq!(st.mouse_drag_delta(MouseButton::Left, -1.0).x, 8.0);
        assert_eq!(st.mouse_delta.x, 5.0);
    }

    #[test]
    fn key_repeat_after_delay() {
        let mut io = Io::default();
        let mut st = InputState::default();
        let mut time = 0.0;
        io.delta_time = 0.125;
        io.key_down(Key::Tab);
        step(&mut st, &io, &mut time);
        assert!(st.is_key_pressed(Key::Tab, true));
        step(&mut st, &io, &mut time);
        assert!(!st.is_key_pressed(Key::Tab, true));
        step(&mut st, &io, &mut time);
        step(&mut st, &io, &mut time);
        // 0.375 s held, past the 0.25 s delay
        assert!(st.is_key_pressed(Key::Tab, true));
        assert!(!st.is_key_pressed(Key::Tab, false));
        io.key_up(Key::Tab);
        step(&mut st, &io, &mut time);
        assert!(st.is_key_released(Key::Tab));
    }
}
