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
//! Host tunable constants. Everything here can be loaded from JSON so applications can ship their own defaults.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::Result;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
/// Timing, threshold and persistence settings read by the [`crate::Context`].
pub struct Config {
    /// Display size in pixels used until the host sets [`crate::Io::display_size`].
    pub display_size: [f32; 2],
    /// Maximum delay between two clicks to register a double-click, in seconds.
    pub mouse_double_click_time: f32,
    /// Maximum distance between two clicks to register a double-click, in pixels.
    pub mouse_double_click_max_dist: f32,
    /// Distance the mouse must travel before a drag starts, in pixels.
    pub mouse_drag_threshold: f32,
    /// Delay before a held key starts repeating, in seconds.
    pub key_repeat_delay: f32,
    /// Interval between key repeats, in seconds.
    pub key_repeat_rate: f32,
    /// Drag speed used by drag widgets when the caller passes a speed of zero.
    pub drag_speed_default_ratio: f32,
    /// Speed multiplier applied while Shift is held during a drag.
    pub drag_speed_scale_fast: f32,
    /// Speed multiplier applied while Alt is held during a drag.
    pub drag_speed_scale_slow: f32,
    /// Delay between a window change and the settings flush, in seconds.
    pub settings_saving_rate: f32,
    /// Settings file written on flush. `None` leaves persistence to the host.
    pub settings_path: Option<PathBuf>,
    /// Number of frames a window may stay unused before it is discarded.
    pub window_gc_frames: u64,
    /// Global font scale.
    pub font_global_scale: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            display_size: [0.0, 0.0],
            mouse_double_click_time: 0.30,
            mouse_double_click_max_dist: 6.0,
            mouse_drag_threshold: 6.0,
            key_repeat_delay: 0.25,
            key_repeat_rate: 0.05,
            drag_speed_default_ratio: 1.0 / 100.0,
            drag_speed_scale_fast: 10.0,
            drag_speed_scale_slow: 1.0 / 10.0,
            settings_saving_rate: 5.0,
            settings_path: None,
            window_gc_frames: 120,
            font_global_scale: 1.0,
        }
    }
}

impl Config {
    /// Parses a configuration, filling absent fields with their defaults.
    pub fn from_json(text: &str) -> Result<Self> { Ok(serde_json::from_str(text)?) }

    /// Serialises the configuration as pretty printed JSON.
    pub fn to_json(&self) -> Result<String> { Ok(serde_json::to_string_pretty(self)?) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = Config::from_json(r#"{ "mouse_drag_threshold": 2.0, "settings_path": "ui.json" }"#).unwrap();
        assert_eq!(cfg.mouse_drag_threshold, 2.0);
        assert_eq!(cfg.key_repeat_delay, 0.25);
        assert_eq!(cfg.window_gc_frames, 120);
        assert_eq!(cfg.settings_path, Some(PathBuf::from("ui.json")));
    }

    #[test]
    fn json_survives_a_save() {
        let mut cfg = Config::default();
        cfg.drag_speed_scale_fast = 4.0;
        let back = Config::from_json(&cfg.to_json().unwrap()).unwrap();
        assert_eq!(back.drag_speed_scale_fast, 4.0);
        assert!(back.settings_path.is_none());
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(Config::from_json("{ nope"), Err(crate::Error::Json(_))));
    }
}
