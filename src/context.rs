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
//! The [`Context`]: every piece of state shared across windows, and the frame lifecycle.

use std::marker::PhantomData;
use std::rc::Rc;

use log::{debug, error, warn};

use crate::drag_drop::DragDropState;
use crate::pool::Pool;
use crate::widgets::calc_text_size;
use crate::{
    add2, sub2, vec2, Color, ColorEditFlags, Cond, Config, DrawData, DrawList, DrawListFlags, FocusedFlags, Font, GlyphProvider, HoveredFlags, Id, InputState,
    Io, ItemFlags, ItemStatusFlags, MouseButton, PopupRef, RectExt, Rectf, SettingsBlob, Style, StyleColor, StyleStack, StyleValue, StyleVar,
    Vec2f, Window, WindowFlags,
};

const IMPLICIT_WINDOW: &str = "Debug##Default";

#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
/// What claimed the active id.
pub enum InputSource {
    /// Nothing is active.
    #[default]
    None,
    /// A mouse click.
    Mouse,
    /// Keyboard navigation.
    Nav,
}

#[derive(Clone, Debug, Default)]
/// Values queued by `set_next_window_*`, consumed by the next `begin`.
pub struct NextWindowData {
    /// Position, condition and pivot.
    pub pos: Option<(Vec2f, Cond, Vec2f)>,
    /// Size and condition.
    pub size: Option<(Vec2f, Cond)>,
    /// Minimum and maximum size; a negative component leaves that axis free.
    pub size_constraint: Option<(Vec2f, Vec2f)>,
    /// Explicit content size.
    pub content_size: Option<Vec2f>,
    /// Collapsed state and condition.
    pub collapsed: Option<(bool, Cond)>,
    /// Focus the window.
    pub focus: bool,
    /// Background alpha override.
    pub bg_alpha: Option<f32>,
}

/// Owns all UI state: windows, input routing, popups, style and the draw data of the last frame.
///
/// A context is single-threaded and may not cross threads; several may coexist.
pub struct Context {
    _marker: PhantomData<Rc<()>>,
    pub(crate) config: Config,
    pub(crate) io: Io,
    pub(crate) input: InputState,
    pub(crate) style: Style,
    pub(crate) style_stack: StyleStack,
    pub(crate) font: Rc<Font>,
    pub(crate) font_size: f32,

    pub(crate) time: f64,
    pub(crate) frame_count: u64,
    pub(crate) frame_count_ended: Option<u64>,
    pub(crate) frame_count_rendered: Option<u64>,
    pub(crate) within_frame: bool,

    pub(crate) windows: Pool<Id, Window>,
    pub(crate) display_order: Vec<Id>,
    pub(crate) current_window_stack: Vec<Id>,
    pub(crate) next_zindex: i32,
    pub(crate) moving_window: Option<Id>,

    pub(crate) hovered_window: Option<Id>,
    pub(crate) hovered_root_window: Option<Id>,
    pub(crate) hovered_id: Id,
    pub(crate) hovered_id_allow_overlap: bool,
    pub(crate) hovered_id_timer: f32,
    pub(crate) hovered_id_previous_frame: Id,

    pub(crate) active_id: Id,
    pub(crate) active_id_window: Option<Id>,
    pub(crate) active_id_timer: f32,
    pub(crate) active_id_is_alive: bool,
    pub(crate) active_id_is_just_activated: bool,
    pub(crate) active_id_allow_overlap: bool,
    pub(crate) active_id_source: InputSource,
    pub(crate) active_id_click_offset: Vec2f,
    pub(crate) active_id_previous_frame: Id,

    pub(crate) nav_window: Option<Id>,
    pub(crate) nav_id: Id,
    pub(crate) nav_activate_id: Id,
    pub(crate) nav_activate_down_id: Id,
    pub(crate) nav_activate_pressed_id: Id,
    pub(crate) nav_input_id: Id,
    pub(crate) nav_just_moved_to_id: Id,
    pub(crate) nav_disable_highlight: bool,
    pub(crate) nav_disable_mouse_hover: bool,
    pub(crate) nav_items: Vec<Id>,
    pub(crate) nav_items_prev: Vec<Id>,
    pub(crate) nav_input_amount: f32,

    pub(crate) next_window_data: NextWindowData,
    pub(crate) next_tree_node_open: Option<(bool, Cond)>,
    pub(crate) open_popup_stack: Vec<PopupRef>,
    pub(crate) current_popup_stack: Vec<PopupRef>,
    pub(crate) tooltip_override_count: usize,

    pub(crate) overlay_draw_list: DrawList,
    pub(crate) draw_data: DrawData,

    pub(crate) scrollbar_click_delta_to_grab_center: Vec2f,
    pub(crate) drag_current_value: f64,
    pub(crate) drag_last_mouse_delta: Vec2f,
    pub(crate) drag_drop: DragDropState,
    pub(crate) color_edit_options: ColorEditFlags,
    pub(crate) color_picker_ref: Color,
    pub(crate) clipboard_text: String,

    pub(crate) settings: SettingsBlob,
    pub(crate) settings_dirty_timer: f32,
    pub(crate) want_save_settings: bool,
}

impl Context {
    /// Creates a context drawing text with `font`.
    pub fn new(font: Rc<Font>, config: Config) -> Self {
        let mut io = Io::default();
        io.display_size = vec2(config.display_size[0], config.display_size[1]);
        let font_size = font.font_size() * config.font_global_scale;
        Self {
            _marker: PhantomData,
            config,
            io,
            input: InputState::default(),
            style: Style::default(),
            style_stack: StyleStack::default(),
            font,
            font_size,
            time: 0.0,
            frame_count: 0,
            frame_count_ended: None,
            frame_count_rendered: None,
            within_frame: false,
            windows: Pool::default(),
            display_order: Vec::new(),
            current_window_stack: Vec::new(),
            next_zindex: 0,
            moving_window: None,
            hovered_window: None,
            hovered_root_window: None,
            hovered_id: Id::NONE,
            hovered_id_allow_overlap: false,
            hovered_id_timer: 0.0,
            hovered_id_previous_frame: Id::NONE,
            active_id: Id::NONE,
            active_id_window: None,
            active_id_timer: 0.0,
            active_id_is_alive: false,
            active_id_is_just_activated: false,
            active_id_allow_overlap: false,
            active_id_source: InputSource::None,
            active_id_click_offset: Vec2f::default(),
            active_id_previous_frame: Id::NONE,
            nav_window: None,
            nav_id: Id::NONE,
            nav_activate_id: Id::NONE,
            nav_activate_down_id: Id::NONE,
            nav_activate_pressed_id: Id::NONE,
            nav_input_id: Id::NONE,
            nav_just_moved_to_id: Id::NONE,
            nav_disable_highlight: true,
            nav_disable_mouse_hover: false,
            nav_items: Vec::new(),
            nav_items_prev: Vec::new(),
            nav_input_amount: 0.0,
            next_window_data: NextWindowData::default(),
            next_tree_node_open: None,
            open_popup_stack: Vec::new(),
            current_popup_stack: Vec::new(),
            tooltip_override_count: 0,
            overlay_draw_list: DrawList::new("##Overlay"),
            draw_data: DrawData::default(),
            scrollbar_click_delta_to_grab_center: Vec2f::default(),
            drag_current_value: 0.0,
            drag_last_mouse_delta: Vec2f::default(),
            drag_drop: DragDropState::default(),
            color_edit_options: ColorEditFlags::OPTIONS_DEFAULT,
            color_picker_ref: Color::default(),
            clipboard_text: String::new(),
            settings: SettingsBlob::default(),
            settings_dirty_timer: 0.0,
            want_save_settings: false,
        }
    }

    /// Host input for the coming frame.
    pub fn io(&self) -> &Io { &self.io }

    /// Mutable host input, filled before [`Context::new_frame`].
    pub fn io_mut(&mut self) -> &mut Io { &mut self.io }

    /// Input state derived at the start of the current frame.
    pub fn input(&self) -> &InputState { &self.input }

    /// Current style.
    pub fn style(&self) -> &Style { &self.style }

    /// Mutable style. Prefer [`Context::push_style_color`]/[`Context::push_style_var`] inside a frame.
    pub fn style_mut(&mut self) -> &mut Style { &mut self.style }

    /// Runtime configuration.
    pub fn config(&self) -> &Config { &self.config }

    /// Mutable runtime configuration.
    pub fn config_mut(&mut self) -> &mut Config { &mut self.config }

    /// Font used for all text.
    pub fn font(&self) -> &Rc<Font> { &self.font }

    /// Current font size in pixels.
    pub fn font_size(&self) -> f32 { self.font_size }

    /// Number of frames started so far.
    pub fn frame_count(&self) -> u64 { self.frame_count }

    /// Seconds accumulated from [`Io::delta_time`].
    pub fn time(&self) -> f64 { self.time }

    /// Draw data built by the last [`Context::render`].
    pub fn draw_data(&self) -> &DrawData { &self.draw_data }

    /// Draw list rendered above every window.
    pub fn overlay_draw_list(&mut self) -> &mut DrawList { &mut self.overlay_draw_list }

    pub(crate) fn display_size(&self) -> Vec2f { self.io.display_size }

    /// Id of the item currently being interacted with, if any.
    pub fn active_id(&self) -> Id { self.active_id }

    /// Id of the item under the mouse this frame, if any.
    pub fn hovered_id(&self) -> Id { self.hovered_id }

    /// Window receiving keyboard input.
    pub fn focused_window(&self) -> Option<Id> { self.nav_window }

    /// Window under the mouse.
    pub fn hovered_window(&self) -> Option<Id> { self.hovered_window }

    /// Looks a window up by id.
    pub fn window_by_id(&self, id: Id) -> Option<&Window> { self.windows.get(id) }

    /// Number of windows currently alive.
    pub fn window_count(&self) -> usize { self.windows.len() }

    /// Text last copied by a widget, for the host to put on the system clipboard.
    pub fn clipboard_text(&self) -> &str { &self.clipboard_text }

    /// Replaces the clipboard text.
    pub fn set_clipboard_text(&mut self, text: &str) {
        self.clipboard_text.clear();
        self.clipboard_text.push_str(text);
    }
}

/// Frame lifecycle.
impl Context {
    /// Starts a frame: derives input state, updates hover/active bookkeeping and focus, and begins the
    /// implicit fallback window.
    pub fn new_frame(&mut self) {
        if self.within_frame {
            debug_assert!(false, "new_frame() called twice without end_frame()/render()");
            warn!("new_frame() called twice without end_frame(), ending the previous frame");
            self.end_frame();
        }
        if self.io.delta_time < 0.0 {
            error!("negative delta time {}, clamped to 0", self.io.delta_time);
            self.io.delta_time = 0.0;
        }
        let dt = self.io.delta_time;
        self.time += dt as f64;
        self.frame_count += 1;
        self.within_frame = true;
        self.tooltip_override_count = 0;
        self.font_size = self.font.font_size() * self.config.font_global_scale;
        self.input.update(&self.io, &self.config, self.time);

        self.overlay_draw_list.clear();
        self.overlay_draw_list.set_white_uv(self.font.white_pixel_uv());
        self.overlay_draw_list.push_texture_id(self.font.texture_id());
        self.overlay_draw_list.push_clip_rect(vec2(0.0, 0.0), self.io.display_size, false);
        self.overlay_draw_list.flags = self.draw_list_flags();
        self.draw_data.clear();

        if self.drag_drop.active && self.drag_drop.payload.source_id == self.active_id {
            self.keep_alive_id(self.active_id);
        }

        if self.hovered_id_previous_frame.is_none() {
            self.hovered_id_timer = 0.0;
        }
        if self.hovered_id.is_some() {
            self.hovered_id_timer += dt;
        }
        self.hovered_id_previous_frame = self.hovered_id;
        self.hovered_id = Id::NONE;
        self.hovered_id_allow_overlap = false;
        if !self.active_id_is_alive && self.active_id_previous_frame == self.active_id && self.active_id.is_some() {
            debug!("active id {:?} was not kept alive, cleared", self.active_id);
            self.clear_active_id();
        }
        if self.active_id.is_some() {
            self.active_id_timer += dt;
        }
        self.active_id_previous_frame = self.active_id;
        self.active_id_is_alive = false;
        self.active_id_is_just_activated = false;

        self.update_drag_drop_frame();
        self.nav_update();
        self.update_moving_window();

        self.hovered_window = match self.moving_window {
            Some(m) if !self.win(m).flags.contains(WindowFlags::NO_INPUTS) => Some(m),
            _ => self.find_hovered_window(),
        };
        self.hovered_root_window = self.hovered_window.map(|h| self.win(h).root_window);
        if let (Some(modal), Some(hovered_root)) = (self.front_most_modal(), self.hovered_root_window) {
            if !self.is_window_child_of(hovered_root, modal) {
                self.hovered_window = None;
                self.hovered_root_window = None;
            }
        }

        self.update_mouse_wheel();

        for w in self.windows.values_mut() {
            w.was_active = w.active;
            w.active = false;
            w.write_accessed = false;
        }
        if let Some(nav) = self.nav_window {
            if !self.windows.get(nav).is_some_and(|w| w.was_active) {
                self.focus_front_most_active_window(None);
            }
        }

        self.current_window_stack.clear();
        self.current_popup_stack.clear();
        self.close_popups_over_window(self.nav_window);

        self.set_next_window_size(vec2(400.0, 400.0), Cond::FirstUseEver);
        self.begin(IMPLICIT_WINDOW, None, WindowFlags::NONE);
    }

    /// Ends the frame: checks stack balance, handles click-to-focus and window moving, saves settings and
    /// collects stale windows. Called by [`Context::render`] when omitted.
    pub fn end_frame(&mut self) {
        if self.frame_count_ended == Some(self.frame_count) || !self.within_frame {
            return;
        }

        if self.current_window_stack.len() != 1 {
            debug_assert!(false, "mismatched begin()/end() calls: {} windows still open", self.current_window_stack.len().saturating_sub(1));
            warn!("{} windows left open at end of frame, closed", self.current_window_stack.len().saturating_sub(1));
            while self.current_window_stack.len() > 1 {
                self.end_current_window();
            }
        }
        if let Some(&implicit) = self.current_window_stack.first() {
            if !self.win(implicit).write_accessed {
                self.win_mut(implicit).active = false;
            }
            self.end_current_window();
        }
        if self.style_stack.color_depth() != 0 || self.style_stack.var_depth() != 0 {
            debug_assert!(false, "mismatched style push/pop: {} colors, {} vars", self.style_stack.color_depth(), self.style_stack.var_depth());
            warn!("{} style colors and {} style vars left pushed, restored", self.style_stack.color_depth(), self.style_stack.var_depth());
            self.style_stack.unwind(&mut self.style);
        }

        self.update_click_focus();
        self.update_settings_timer();
        self.collect_stale_windows();

        let windows = &self.windows;
        self.display_order.sort_by_key(|id| windows.get(*id).map(|w| w.zindex).unwrap_or(i32::MIN));

        self.io.epilogue();
        self.frame_count_ended = Some(self.frame_count);
        self.within_frame = false;
    }

    /// Ends the frame if needed and gathers the draw lists of every visible window, back to front.
    pub fn render(&mut self) -> &DrawData {
        if self.frame_count_ended != Some(self.frame_count) {
            self.end_frame();
        }
        self.frame_count_rendered = Some(self.frame_count);
        self.draw_data.clear();
        self.draw_data.display_pos = vec2(0.0, 0.0);
        self.draw_data.display_size = self.io.display_size;
        self.draw_data.framebuffer_scale = self.io.display_framebuffer_scale;
        if self.style.alpha <= 0.0 {
            return &self.draw_data;
        }

        let mut layers: [Vec<Id>; 2] = [Vec::new(), Vec::new()];
        for &id in &self.display_order {
            if let Some(w) = self.windows.get(id) {
                if w.is_active_and_visible() && !w.flags.is_child() {
                    layers[usize::from(w.flags.is_tooltip())].push(id);
                }
            }
        }
        for id in layers.iter().flatten() {
            self.add_window_to_draw_data(*id);
        }
        if !self.overlay_draw_list.vtx_buffer.is_empty() {
            self.draw_data.push_list(self.overlay_draw_list.clone());
        }
        &self.draw_data
    }

    fn add_window_to_draw_data(&mut self, id: Id) {
        let children = match self.windows.get(id) {
            Some(w) => {
                self.draw_data.push_list(w.draw_list.clone());
                w.dc.child_windows.clone()
            }
            None => return,
        };
        for child in children {
            if self.windows.get(child).is_some_and(|c| c.is_active_and_visible()) {
                self.add_window_to_draw_data(child);
            }
        }
    }

    /// Runs one whole frame around `f` and returns its draw data.
    pub fn frame<F: FnOnce(&mut Self)>(&mut self, f: F) -> &DrawData {
        self.new_frame();
        f(self);
        self.render()
    }

    pub(crate) fn draw_list_flags(&self) -> DrawListFlags {
        let mut flags = DrawListFlags::NONE;
        if self.style.anti_aliased_lines {
            flags |= DrawListFlags::ANTI_ALIASED_LINES;
        }
        if self.style.anti_aliased_fill {
            flags |= DrawListFlags::ANTI_ALIASED_FILL;
        }
        flags
    }

    fn update_moving_window(&mut self) {
        if let Some(moving) = self.moving_window {
            self.keep_alive_id(self.active_id);
            let root = self.win(moving).root_window;
            match self.input.mouse_pos.filter(|_| self.input.mouse_down[0]) {
                Some(mouse) => {
                    let pos = sub2(mouse, self.active_id_click_offset);
                    let w = self.win_mut(root);
                    if w.pos.x != pos.x || w.pos.y != pos.y {
                        w.set_pos(pos, Cond::Always);
                        self.mark_settings_dirty(root);
                    }
                    self.focus_window(Some(moving));
                }
                None => {
                    self.clear_active_id();
                    self.moving_window = None;
                }
            }
        } else if let Some(aw) = self.active_id_window {
            // dragging from a NO_MOVE window still holds its move id so that other windows stay unhovered
            if self.windows.get(aw).is_some_and(|w| w.move_id == self.active_id) {
                self.keep_alive_id(self.active_id);
                if !self.input.mouse_down[0] {
                    self.clear_active_id();
                }
            }
        }
    }

    fn update_mouse_wheel(&mut self) {
        let (wheel, wheel_h) = (self.input.mouse_wheel, self.input.mouse_wheel_h);
        let Some(hovered) = self.hovered_window else { return };
        if (wheel == 0.0 && wheel_h == 0.0) || self.win(hovered).collapsed {
            return;
        }
        let mut target = hovered;
        loop {
            let w = self.win(target);
            let passes = w.flags.is_child()
                && w.flags.contains(WindowFlags::NO_SCROLL_WITH_MOUSE)
                && !w.flags.intersects(WindowFlags::NO_SCROLLBAR | WindowFlags::NO_INPUTS);
            match w.parent_window {
                Some(p) if passes => target = p,
                _ => break,
            }
        }
        let font_size = self.font_size;
        let w = self.win_mut(target);
        if w.flags.intersects(WindowFlags::NO_SCROLL_WITH_MOUSE | WindowFlags::NO_INPUTS) {
            return;
        }
        if wheel != 0.0 {
            let visible = w.contents_region_max.y - w.contents_region_min.y + w.window_padding.y * 2.0;
            let amount = (5.0 * font_size).min(visible * 0.67).trunc();
            w.scroll.y = (w.scroll.y - wheel * amount).clamp(0.0, w.scroll_max_y());
        }
        if wheel_h != 0.0 {
            let visible = w.contents_region_max.x - w.contents_region_min.x + w.window_padding.x * 2.0;
            let amount = (2.0 * font_size).min(visible * 0.67).trunc();
            w.scroll.x = (w.scroll.x - wheel_h * amount).clamp(0.0, w.scroll_max_x());
        }
    }

    fn update_click_focus(&mut self) {
        if self.active_id.is_some() || self.hovered_id.is_some() {
            return;
        }
        if self.nav_window.is_some_and(|n| self.win(n).appearing) {
            return;
        }
        if self.input.mouse_clicked[0] {
            if let (Some(hovered), Some(root)) = (self.hovered_window, self.hovered_root_window) {
                self.focus_window(Some(hovered));
                let move_id = self.win(hovered).move_id;
                self.set_active_id(move_id, Some(hovered));
                self.nav_disable_highlight = true;
                let mouse = self.input.mouse_pos.unwrap_or_default();
                self.active_id_click_offset = sub2(mouse, self.win(root).pos);
                if !self.win(hovered).flags.contains(WindowFlags::NO_MOVE) && !self.win(root).flags.contains(WindowFlags::NO_MOVE) {
                    self.moving_window = Some(hovered);
                }
            } else if self.nav_window.is_some() && self.front_most_modal().is_none() {
                self.focus_window(None);
            }
        }
        if self.input.mouse_clicked[1] {
            // right click trims the popup stack to the hovered window, but never below a modal
            let modal = self.front_most_modal();
            let mut above_modal = modal.is_none();
            for id in self.z_order_front_to_back() {
                if above_modal || Some(id) == modal {
                    break;
                }
                if Some(id) == self.hovered_window {
                    above_modal = true;
                }
            }
            self.close_popups_over_window(if above_modal { self.hovered_window } else { modal });
        }
    }

    fn collect_stale_windows(&mut self) {
        let frame = self.frame_count;
        let stale = self.windows.gc(frame, self.config.window_gc_frames);
        for (id, w) in stale {
            debug!("window '{}' unused for {} frames, collected", w.name, self.config.window_gc_frames);
            if !w.flags.contains(WindowFlags::NO_SAVED_SETTINGS) {
                self.settings.store(&w);
            }
            self.display_order.retain(|d| *d != id);
            for slot in [&mut self.nav_window, &mut self.hovered_window, &mut self.hovered_root_window, &mut self.moving_window, &mut self.active_id_window] {
                if *slot == Some(id) {
                    *slot = None;
                }
            }
        }
    }
}

/// Window ordering and focus.
impl Context {
    /// Raises `id` above every other window.
    pub fn bring_to_front(&mut self, id: Id) {
        self.next_zindex += 1;
        let z = self.next_zindex;
        if let Some(w) = self.windows.get_mut(id) {
            w.zindex = z;
        }
    }

    /// Gives keyboard focus to `id` and raises its root window. `None` removes focus.
    pub fn focus_window(&mut self, id: Option<Id>) {
        if self.nav_window != id {
            self.nav_window = id;
            self.nav_id = Id::NONE;
            self.nav_items.clear();
        }
        let Some(id) = id else { return };
        let root = self.win(id).root_window;
        if self.active_id.is_some() {
            let active_root = self.active_id_window.and_then(|aw| self.windows.get(aw)).map(|w| w.root_window);
            if active_root.is_some_and(|r| r != root) {
                self.clear_active_id();
            }
        }
        if !self.win(root).flags.contains(WindowFlags::NO_BRING_TO_FRONT_ON_FOCUS) {
            self.bring_to_front(root);
        }
    }

    pub(crate) fn focus_front_most_active_window(&mut self, ignore: Option<Id>) {
        let next = self.z_order_front_to_back().into_iter().find(|id| {
            Some(*id) != ignore && self.windows.get(*id).is_some_and(|w| w.was_active && !w.flags.is_child())
        });
        self.focus_window(next);
    }

    /// Root windows by descending z, each followed by its children.
    pub(crate) fn z_order_front_to_back(&self) -> Vec<Id> {
        let mut order = self.z_order_back_to_front();
        order.reverse();
        order
    }

    fn z_order_back_to_front(&self) -> Vec<Id> {
        let mut roots: Vec<&Window> = self.windows.values().filter(|w| !w.flags.is_child() || w.parent_window.is_none()).collect();
        roots.sort_by_key(|w| w.zindex);
        let mut out = Vec::with_capacity(self.windows.len());
        for w in roots {
            self.push_with_children(w.id, &mut out);
        }
        out
    }

    fn push_with_children(&self, id: Id, out: &mut Vec<Id>) {
        out.push(id);
        if let Some(w) = self.windows.get(id) {
            for &c in &w.dc.child_windows {
                if c != id && !out.contains(&c) {
                    self.push_with_children(c, out);
                }
            }
        }
    }

    /// Front-most window under the mouse, ignoring inactive and `NO_INPUTS` windows.
    pub(crate) fn find_hovered_window(&self) -> Option<Id> {
        let mouse = self.input.mouse_pos?;
        let pad = self.style.touch_extra_padding;
        self.z_order_front_to_back().into_iter().find(|id| {
            let w = self.win(*id);
            w.active && !w.flags.contains(WindowFlags::NO_INPUTS) && w.rect_clipped.expand(pad.x, pad.y).contains_pt(mouse)
        })
    }

    /// Whether `window` is `parent` or one of its descendants.
    pub fn is_window_child_of(&self, window: Id, parent: Id) -> bool {
        let mut cur = Some(window);
        if self.windows.get(window).is_some_and(|w| w.root_window == parent) {
            return true;
        }
        while let Some(c) = cur {
            if c == parent {
                return true;
            }
            cur = self.windows.get(c).and_then(|w| w.parent_window);
        }
        false
    }

    /// Whether the content of `id` may be hovered, i.e. no focused modal or popup from another hierarchy blocks it.
    pub(crate) fn is_window_content_hoverable(&self, id: Id, flags: HoveredFlags) -> bool {
        let Some(nav) = self.nav_window else { return true };
        let Some(focused_root) = self.windows.get(nav).map(|w| w.root_window) else { return true };
        let Some(fr) = self.windows.get(focused_root) else { return true };
        if fr.was_active && focused_root != self.win(id).root_window {
            if fr.flags.is_modal() {
                return false;
            }
            if fr.flags.is_popup() && !flags.allows_blocked_by_popup() {
                return false;
            }
        }
        true
    }

    /// Whether the current window (or per `flags`, its hierarchy or any window) is under the mouse.
    pub fn is_window_hovered(&self, flags: HoveredFlags) -> bool {
        let Some(hovered) = self.hovered_window else { return false };
        if !flags.contains(HoveredFlags::ANY_WINDOW) {
            let cur = self.cw();
            let hit = match (flags.contains(HoveredFlags::ROOT_WINDOW), flags.contains(HoveredFlags::CHILD_WINDOWS)) {
                (true, true) => self.hovered_root_window == Some(cur.root_window),
                (true, false) => hovered == cur.root_window,
                (false, true) => self.is_window_child_of(hovered, cur.id),
                (false, false) => hovered == cur.id,
            };
            if !hit {
                return false;
            }
        }
        if let Some(root) = self.hovered_root_window {
            if !self.is_window_content_hoverable(root, flags) {
                return false;
            }
        }
        if !flags.allows_blocked_by_active_item() && self.active_id.is_some() && !self.active_id_allow_overlap && self.active_id != self.win(hovered).move_id {
            return false;
        }
        true
    }

    /// Whether the current window (or per `flags`, its hierarchy or any window) has keyboard focus.
    pub fn is_window_focused(&self, flags: FocusedFlags) -> bool {
        let Some(nav) = self.nav_window else { return false };
        if flags.contains(FocusedFlags::ANY_WINDOW) {
            return true;
        }
        let cur = self.cw();
        match (flags.contains(FocusedFlags::ROOT_WINDOW), flags.contains(FocusedFlags::CHILD_WINDOWS)) {
            (true, true) => self.win(nav).root_window == cur.root_window,
            (true, false) => nav == cur.root_window,
            (false, true) => self.is_window_child_of(nav, cur.id),
            (false, false) => nav == cur.id,
        }
    }
}

/// Hover, active and focus ids.
impl Context {
    /// Makes `id` the single active item, owned by `window`.
    pub fn set_active_id(&mut self, id: Id, window: Option<Id>) {
        self.active_id_is_just_activated = self.active_id != id;
        if self.active_id_is_just_activated {
            self.active_id_timer = 0.0;
        }
        self.active_id = id;
        self.active_id_allow_overlap = false;
        self.active_id_window = window;
        if id.is_some() {
            self.active_id_is_alive = true;
            let from_nav = id == self.nav_activate_id || id == self.nav_input_id || id == self.nav_just_moved_to_id;
            self.active_id_source = if from_nav { InputSource::Nav } else { InputSource::Mouse };
        }
    }

    /// Releases the active item.
    pub fn clear_active_id(&mut self) { self.set_active_id(Id::NONE, None); }

    /// Keeps `id` active through the next frame.
    pub fn keep_alive_id(&mut self, id: Id) {
        if self.active_id == id {
            self.active_id_is_alive = true;
        }
    }

    /// Marks `id` hovered this frame.
    pub fn set_hovered_id(&mut self, id: Id) {
        self.hovered_id = id;
        self.hovered_id_allow_overlap = false;
        if id.is_some() && self.hovered_id_previous_frame != id {
            self.hovered_id_timer = 0.0;
        }
    }

    /// Gives keyboard focus to item `id` in `window`.
    pub fn set_focus_id(&mut self, id: Id, window: Id) {
        self.nav_id = id;
        self.nav_window = Some(window);
        if self.active_id_source == InputSource::Nav {
            self.nav_disable_mouse_hover = true;
        } else {
            self.nav_disable_highlight = true;
        }
    }

    /// Whether the mouse lies in `[min, max)` (clipped by the current window when `clip`), padded by
    /// `touch_extra_padding`.
    pub fn is_mouse_hovering_rect(&self, min: Vec2f, max: Vec2f, clip: bool) -> bool {
        let Some(mouse) = self.input.mouse_pos else { return false };
        let mut r = crate::rect_min_max(min, max);
        if clip {
            r = r.clip_with(&self.cw().clip_rect);
        }
        let pad = self.style.touch_extra_padding;
        r.expand(pad.x, pad.y).contains_pt(mouse)
    }

    /// Hit test for an item of the current window; on success the item becomes the hovered id.
    pub(crate) fn item_hoverable(&mut self, bb: Rectf, id: Id) -> bool {
        if self.hovered_id.is_some() && self.hovered_id != id && !self.hovered_id_allow_overlap {
            return false;
        }
        let wid = self.cw_id();
        if self.hovered_window != Some(wid) {
            return false;
        }
        if self.active_id.is_some() && self.active_id != id && !self.active_id_allow_overlap {
            return false;
        }
        if !self.is_mouse_hovering_rect(bb.min_pt(), bb.max_pt(), true) {
            return false;
        }
        if self.nav_disable_mouse_hover || !self.is_window_content_hoverable(wid, HoveredFlags::NONE) {
            return false;
        }
        if self.cw().dc.item_flags.contains(ItemFlags::DISABLED) {
            return false;
        }
        self.set_hovered_id(id);
        true
    }

    /// Whether the last item is hovered, subject to `flags`.
    pub fn is_item_hovered(&self, flags: HoveredFlags) -> bool {
        let w = self.cw();
        if self.nav_disable_mouse_hover && !self.nav_disable_highlight {
            return self.is_item_focused();
        }
        if !w.dc.last_item.status.contains(ItemStatusFlags::HOVERED_RECT) {
            return false;
        }
        if self.hovered_root_window != Some(w.root_window) && !flags.allows_overlapped() {
            return false;
        }
        if !flags.allows_blocked_by_active_item()
            && self.active_id.is_some()
            && self.active_id != w.dc.last_item.id
            && !self.active_id_allow_overlap
            && self.active_id != w.move_id
        {
            return false;
        }
        if !self.is_window_content_hoverable(w.id, flags) || w.dc.item_flags.contains(ItemFlags::DISABLED) {
            return false;
        }
        // the title bar stands in as last item of a collapsed window
        !(w.dc.last_item.id == w.move_id && w.write_accessed)
    }

    /// Whether the last item is held.
    pub fn is_item_active(&self) -> bool { self.active_id.is_some() && self.active_id == self.cw().dc.last_item.id }

    /// Whether the last item has keyboard focus.
    pub fn is_item_focused(&self) -> bool { self.nav_id.is_some() && !self.nav_disable_highlight && self.nav_id == self.cw().dc.last_item.id }

    /// Whether the last item was clicked with `button` this frame.
    pub fn is_item_clicked(&self, button: MouseButton) -> bool { self.input.is_mouse_clicked(button, false) && self.is_item_hovered(HoveredFlags::NONE) }

    /// Whether the last item intersects the clip rect.
    pub fn is_item_visible(&self) -> bool {
        let w = self.cw();
        w.clip_rect.overlaps(&w.dc.last_item.rect)
    }

    /// Whether any item is hovered, this frame or the last.
    pub fn is_any_item_hovered(&self) -> bool { self.hovered_id.is_some() || self.hovered_id_previous_frame.is_some() }

    /// Whether any item is held.
    pub fn is_any_item_active(&self) -> bool { self.active_id.is_some() }

    /// Whether any item has keyboard focus.
    pub fn is_any_item_focused(&self) -> bool { self.nav_id.is_some() && !self.nav_disable_highlight }

    /// Lets items submitted later overlap the last item.
    pub fn set_item_allow_overlap(&mut self) {
        let last = self.cw().dc.last_item.id;
        if self.hovered_id == last {
            self.hovered_id_allow_overlap = true;
        }
        if self.active_id == last {
            self.active_id_allow_overlap = true;
        }
    }

    /// Bounding box of the last item.
    pub fn last_item_rect(&self) -> Rectf { self.cw().dc.last_item.rect }

    /// Runs `f`, then restores the last-item record it may have overwritten.
    pub(crate) fn with_last_item_preserved<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        let saved = self.cw().dc.last_item;
        let r = f(self);
        self.cw_mut().dc.last_item = saved;
        r
    }
}

/// Style and id stacks.
impl Context {
    /// Overrides a style color until the matching [`Context::pop_style_color`].
    pub fn push_style_color(&mut self, idx: StyleColor, col: Color) { self.style_stack.push_color(&mut self.style, idx, col); }

    /// Restores the last `count` pushed colors.
    pub fn pop_style_color(&mut self, count: usize) { self.style_stack.pop_colors(&mut self.style, count); }

    /// Overrides a style variable until the matching [`Context::pop_style_var`].
    pub fn push_style_var(&mut self, var: StyleVar, value: StyleValue) { self.style_stack.push_var(&mut self.style, var, value); }

    /// Restores the last `count` pushed variables.
    pub fn pop_style_var(&mut self, count: usize) { self.style_stack.pop_vars(&mut self.style, count); }

    /// Style color `idx` with the global alpha and `alpha_mul` applied.
    pub fn get_color_u32(&self, idx: StyleColor, alpha_mul: f32) -> Color { self.style.color(idx, alpha_mul) }

    /// Pushes a string onto the current window's id stack.
    pub fn push_id(&mut self, str_id: &str) { self.cw_mut().id_stack.push_id_str(str_id); }

    /// Pushes an integer onto the current window's id stack.
    pub fn push_id_int(&mut self, n: i32) { self.cw_mut().id_stack.push_id_int(n); }

    /// Pushes the address of `ptr` onto the current window's id stack.
    pub fn push_id_ptr<T: ?Sized>(&mut self, ptr: &T) { self.cw_mut().id_stack.push_id_ptr(ptr); }

    /// Pops the current window's id stack.
    pub fn pop_id(&mut self) { self.cw_mut().id_stack.pop_id(); }

    /// Id of `str_id` in the current scope.
    pub fn get_id(&self, str_id: &str) -> Id { self.cw().get_id(str_id) }

    /// Size of `text` in the current font; the part after `##` is dropped when `hide_text_after_double_hash`.
    /// A negative `wrap_width` disables wrapping.
    pub fn calc_text_size(&self, text: &str, hide_text_after_double_hash: bool, wrap_width: f32) -> Vec2f {
        let text = if hide_text_after_double_hash { crate::find_rendered_text_end(text) } else { text };
        calc_text_size(self.font.as_ref(), self.font_size, text, wrap_width)
    }

    /// Whether `min..max` is visible in the current window.
    pub fn is_rect_visible(&self, min: Vec2f, max: Vec2f) -> bool { self.cw().clip_rect.overlaps(&crate::rect_min_max(min, max)) }

    /// Whether a `size` rect at the cursor is visible.
    pub fn is_rect_visible_size(&self, size: Vec2f) -> bool {
        let p = self.cw().dc.cursor_pos;
        self.is_rect_visible(p, add2(p, size))
    }
}

impl Window {
    pub(crate) fn is_active_and_visible(&self) -> bool { self.active && self.hidden_frames <= 0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{context, run_frame};

    #[test]
    fn implicit_window_is_hidden_when_unused() {
        let mut ctx = context();
        let dd = ctx.frame(|_| {});
        assert!(dd.cmd_lists.is_empty());
        assert_eq!(ctx.window_count(), 1);
    }

    #[test]
    fn click_on_window_focuses_and_moves_it() {
        let mut ctx = context();
        let show = |ui: &mut Context| {
            ui.set_next_window_pos(vec2(10.0, 10.0), Cond::FirstUseEver, vec2(0.0, 0.0));
            ui.set_next_window_size(vec2(200.0, 100.0), Cond::FirstUseEver);
            ui.window("A", WindowFlags::NONE, |_| {});
        };
        run_frame(&mut ctx, show);
        ctx.io_mut().mouse_down(100.0, 80.0, MouseButton::Left);
        run_frame(&mut ctx, show);
        let a = Id::from_name("A");
        assert_eq!(ctx.focused_window(), Some(a));
        assert_eq!(ctx.moving_window, Some(a));
        assert_eq!(ctx.active_id(), ctx.window_by_id(a).unwrap().move_id);

        ctx.io_mut().mouse_move(130.0, 95.0);
        run_frame(&mut ctx, show);
        ctx.io_mut().mouse_up(130.0, 95.0, MouseButton::Left);
        run_frame(&mut ctx, show);
        let pos = ctx.window_by_id(a).unwrap().pos();
        assert_eq!((pos.x, pos.y), (40.0, 25.0));
        assert!(ctx.active_id().is_none());
    }

    #[test]
    fn second_set_active_id_supersedes_the_first() {
        let mut ctx = context();
        let (a, b) = (Id::from_name("a"), Id::from_name("b"));
        run_frame(&mut ctx, |ui| {
            ui.set_active_id(a, None);
            assert_eq!(ui.active_id(), a);
            assert!(ui.active_id_is_just_activated);
            ui.set_active_id(b, None);
            assert_eq!(ui.active_id(), b);
            assert!(ui.active_id_is_just_activated);
            ui.set_active_id(b, None);
            assert!(!ui.active_id_is_just_activated);
        });
        assert_eq!(ctx.active_id(), b);
    }

    #[test]
    fn active_id_not_kept_alive_is_cleared() {
        let mut ctx = context();
        run_frame(&mut ctx, |_| {});
        let id = Id::from_name("ghost");
        ctx.set_active_id(id, None);
        run_frame(&mut ctx, |_| {});
        assert_eq!(ctx.active_id(), id);
        run_frame(&mut ctx, |_| {});
        assert_eq!(ctx.active_id(), Id::NONE);
    }

    #[test]
    fn front_window_wins_the_hover_test() {
        let mut ctx = context();
        let show = |ui: &mut Context| {
            for name in ["Back", "Front"] {
                ui.set_next_window_pos(vec2(0.0, 0.0), Cond::Always, vec2(0.0, 0.0));
                ui.set_next_window_size(vec2(100.0, 100.0), Cond::Always);
                ui.window(name, WindowFlags::NONE, |_| {});
            }
        };
        run_frame(&mut ctx, show);
        ctx.io_mut().mouse_move(50.0, 50.0);
        run_frame(&mut ctx, show);
        assert_eq!(ctx.hovered_window(), Some(Id::from_name("Front")));

        ctx.bring_to_front(Id::from_name("Back"));
        run_frame(&mut ctx, show);
        run_frame(&mut ctx, show);
        assert_eq!(ctx.hovered_window(), Some(Id::from_name("Back")));
    }

    #[test]
    fn stale_windows_are_collected_and_remembered() {
        let mut ctx = context();
        ctx.config_mut().window_gc_frames = 2;
        run_frame(&mut ctx, |ui| {
            ui.set_next_window_pos(vec2(33.0, 44.0), Cond::Always, vec2(0.0, 0.0));
            ui.window("Gone", WindowFlags::NONE, |_| {});
        });
        for _ in 0..4 {
            run_frame(&mut ctx, |_| {});
        }
        assert!(ctx.window_by_id(Id::from_name("Gone")).is_none());
        let s = ctx.settings.find("Gone").expect("settings kept");
        assert_eq!(s.pos, [33.0, 44.0]);
    }

    #[test]
    fn style_imbalance_is_restored_at_frame_end() {
        let mut ctx = context();
        let before = ctx.style().alpha;
        ctx.new_frame();
        ctx.push_style_var(StyleVar::Alpha, StyleValue::Float(0.5));
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| ctx.end_frame()));
        if cfg!(debug_assertions) {
            assert!(result.is_err());
        } else {
            assert_eq!(ctx.style().alpha, before);
        }
    }
}
