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
//! Persistence of window placement: a JSON blob of per-window position, size and collapsed state.

use std::fs;
use std::path::Path;

use log::{debug, error};
use serde::{Deserialize, Serialize};

use crate::{vec2, Context, Id, Result, Window, WindowFlags};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
/// Saved state of one window.
pub struct WindowSettings {
    /// Window name, including any `##` suffix.
    pub name: String,
    /// Screen position.
    pub pos: [f32; 2],
    /// Full (uncollapsed) size.
    pub size: [f32; 2],
    /// Collapsed to its title bar.
    pub collapsed: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
/// Saved state of every window, keyed by name.
pub struct SettingsBlob {
    /// One entry per window.
    pub windows: Vec<WindowSettings>,
}

impl SettingsBlob {
    /// Entry for the window called `name`.
    pub fn find(&self, name: &str) -> Option<&WindowSettings> {
        let id = Id::from_name(name);
        self.windows.iter().find(|s| Id::from_name(&s.name) == id)
    }

    /// Records the current placement of `w`, replacing any older entry.
    pub(crate) fn store(&mut self, w: &Window) {
        let entry = WindowSettings {
            name: w.name().to_string(),
            pos: [w.pos.x, w.pos.y],
            size: [w.size_full.x, w.size_full.y],
            collapsed: w.collapsed,
        };
        match self.windows.iter_mut().find(|s| Id::from_name(&s.name) == w.id) {
            Some(s) => *s = entry,
            None => self.windows.push(entry),
        }
    }

    /// Parses a blob written by [`SettingsBlob::to_json`].
    pub fn from_json(text: &str) -> Result<Self> { Ok(serde_json::from_str(text)?) }

    /// Serialises the blob.
    pub fn to_json(&self) -> Result<String> { Ok(serde_json::to_string_pretty(self)?) }
}

impl Context {
    /// Starts the save countdown after a window moved, resized or collapsed.
    pub(crate) fn mark_settings_dirty(&mut self, id: Id) {
        if self.windows.get(id).is_some_and(|w| w.flags.contains(WindowFlags::NO_SAVED_SETTINGS)) {
            return;
        }
        if self.settings_dirty_timer <= 0.0 {
            self.settings_dirty_timer = self.config.settings_saving_rate;
        }
    }

    pub(crate) fn update_settings_timer(&mut self) {
        if self.settings_dirty_timer <= 0.0 {
            return;
        }
        self.settings_dirty_timer -= self.io.delta_time;
        if self.settings_dirty_timer > 0.0 {
            return;
        }
        self.refresh_settings();
        self.want_save_settings = true;
        if let Some(path) = self.config.settings_path.clone() {
            match self.save_settings_to_path(&path) {
                Ok(()) => debug!("settings saved to '{}'", path.display()),
                Err(e) => error!("cannot save settings to '{}': {}", path.display(), e),
            }
        }
    }

    fn refresh_settings(&mut self) {
        for w in self.windows.values() {
            if !w.flags.contains(WindowFlags::NO_SAVED_SETTINGS) {
                self.settings.store(w);
            }
        }
    }

    /// True once settings changed and were not saved since. Cleared by the `save_settings_*` calls.
    pub fn want_save_settings(&self) -> bool { self.want_save_settings }

    /// Replaces the settings blob and applies it to windows that already exist.
    pub fn load_settings_from_str(&mut self, text: &str) -> Result<()> {
        self.settings = SettingsBlob::from_json(text)?;
        for s in &self.settings.windows {
            if let Some(w) = self.windows.get_mut(Id::from_name(&s.name)) {
                if w.flags.contains(WindowFlags::NO_SAVED_SETTINGS) {
                    continue;
                }
                w.pos = crate::floor2(vec2(s.pos[0], s.pos[1]));
                if s.size[0] > 0.0 && s.size[1] > 0.0 {
                    w.size_full = crate::floor2(vec2(s.size[0], s.size[1]));
                }
                w.collapsed = s.collapsed;
            }
        }
        debug!("loaded settings for {} windows", self.settings.windows.len());
        Ok(())
    }

    /// Serialises the placement of every persisted window.
    pub fn save_settings_to_string(&mut self) -> Result<String> {
        self.refresh_settings();
        self.want_save_settings = false;
        self.settings.to_json()
    }

    /// Reads settings from a JSON file.
    pub fn load_settings_from_path<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let text = fs::read_to_string(path)?;
        self.load_settings_from_str(&text)
    }

    /// Writes settings to a JSON file.
    pub fn save_settings_to_path<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let text = self.save_settings_to_string()?;
        fs::write(path, text)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{context, run_frame};
    use crate::{Cond, Error};

    #[test]
    fn saved_placement_is_applied_on_creation() {
        let mut ctx = context();
        ctx.load_settings_from_str(r#"{"windows":[{"name":"Tools","pos":[120.5,80.0],"size":[300.0,200.0],"collapsed":false}]}"#).unwrap();
        run_frame(&mut ctx, |ui| {
            // first-use values lose against saved ones
            ui.set_next_window_pos(vec2(5.0, 5.0), Cond::FirstUseEver, vec2(0.0, 0.0));
            ui.window("Tools", WindowFlags::NONE, |_| {});
        });
        let w = ctx.window_by_id(Id::from_name("Tools")).unwrap();
        assert_eq!((w.pos().x, w.pos().y), (120.0, 80.0));
        assert_eq!((w.size().x, w.size().y), (300.0, 200.0));
    }

    #[test]
    fn unsaved_windows_are_left_out() {
        let mut ctx = context();
        run_frame(&mut ctx, |ui| {
            ui.window("Kept", WindowFlags::NONE, |_| {});
            ui.window("Skipped", WindowFlags::NO_SAVED_SETTINGS, |_| {});
        });
        let blob = SettingsBlob::from_json(&ctx.save_settings_to_string().unwrap()).unwrap();
        assert!(blob.find("Kept").is_some());
        assert!(blob.find("Skipped").is_none());
        assert!(!ctx.want_save_settings());
    }

    #[test]
    fn dirty_timer_writes_the_file() {
        let path = std::env::temp_dir().join(format!("imgui-redux-settings-{}.json", std::process::id()));
        let _ = fs::remove_file(&path);
        let mut ctx = context();
        ctx.config_mut().settings_saving_rate = 0.01;
        ctx.config_mut().settings_path = Some(path.clone());
        // an auto-fitting window dirties the settings while it measures itself
        for _ in 0..3 {
            run_frame(&mut ctx, |ui| {
                ui.window("Fit", WindowFlags::NONE, |ui| ui.text("hello"));
            });
        }
        let blob = SettingsBlob::from_json(&fs::read_to_string(&path).unwrap()).unwrap();
        assert!(blob.find("Fit").is_some());
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let mut ctx = context();
        let err = ctx.load_settings_from_path("/nonexistent/imgui-redux/settings.json").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
