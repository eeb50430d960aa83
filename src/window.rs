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
//! Persistent per-window state, the per-frame drawing context, and the begin/end machinery that lays out
//! window chrome and decides where windows go.

use std::collections::HashMap;

use bitflags::*;
use log::{debug, warn};

use crate::layout::LayoutType;
use crate::menu::MenuColumns;
use crate::widgets::ButtonFlags;
use crate::{
    add2, floor2, max2, min2, rect_min_max, sub2, vec2, Cond, Context, Dir, DrawCornerFlags, DrawList, DrawListFlags, GlyphProvider, Id, IdStack,
    RectExt, Rectf, StyleColor, StyleValue, StyleVar, Vec2f,
};

bitflags! {
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
    /// Options for [`Context::begin`] and friends.
    pub struct WindowFlags : u32 {
        /// Disable the title bar.
        const NO_TITLE_BAR = 1 << 0;
        /// Disable the bottom-right resize grip.
        const NO_RESIZE = 1 << 1;
        /// Disable moving the window with the mouse.
        const NO_MOVE = 1 << 2;
        /// Disable scrollbars. The window can still scroll through the API.
        const NO_SCROLLBAR = 1 << 3;
        /// Disable wheel scrolling; child windows forward the wheel to their parent.
        const NO_SCROLL_WITH_MOUSE = 1 << 4;
        /// Disable collapsing by double-clicking the title bar.
        const NO_COLLAPSE = 1 << 5;
        /// Resize the window to its content every frame.
        const ALWAYS_AUTO_RESIZE = 1 << 6;
        /// Never load or save settings for this window.
        const NO_SAVED_SETTINGS = 1 << 8;
        /// Disable mouse input; implies no move and no resize.
        const NO_INPUTS = 1 << 9;
        /// The window has a menu bar.
        const MENU_BAR = 1 << 10;
        /// Allow a horizontal scrollbar.
        const HORIZONTAL_SCROLLBAR = 1 << 11;
        /// Do not take focus when appearing.
        const NO_FOCUS_ON_APPEARING = 1 << 12;
        /// Do not move to the front when focused.
        const NO_BRING_TO_FRONT_ON_FOCUS = 1 << 13;
        /// Always show the vertical scrollbar.
        const ALWAYS_VERTICAL_SCROLLBAR = 1 << 14;
        /// Always show the horizontal scrollbar.
        const ALWAYS_HORIZONTAL_SCROLLBAR = 1 << 15;
        /// Borderless child windows keep the window padding.
        const ALWAYS_USE_WINDOW_PADDING = 1 << 16;
        /// Ignore keyboard navigation inside the window.
        const NO_NAV_INPUTS = 1 << 18;
        /// Never focus the window through keyboard navigation.
        const NO_NAV_FOCUS = 1 << 19;
        /// Internal: child window.
        const CHILD_WINDOW = 1 << 24;
        /// Internal: tooltip window.
        const TOOLTIP = 1 << 25;
        /// Internal: popup window.
        const POPUP = 1 << 26;
        /// Internal: modal popup window.
        const MODAL = 1 << 27;
        /// Internal: menu opened from another menu.
        const CHILD_MENU = 1 << 28;
        /// No option.
        const NONE = 0;
    }
}

impl WindowFlags {
    /// Returns `true` for child windows.
    pub fn is_child(&self) -> bool { self.intersects(Self::CHILD_WINDOW) }
    /// Returns `true` for popups, menus and modals.
    pub fn is_popup(&self) -> bool { self.intersects(Self::POPUP) }
    /// Returns `true` for modal popups.
    pub fn is_modal(&self) -> bool { self.intersects(Self::MODAL) }
    /// Returns `true` for tooltips.
    pub fn is_tooltip(&self) -> bool { self.intersects(Self::TOOLTIP) }
    /// Returns `true` for menus opened from a menu.
    pub fn is_child_menu(&self) -> bool { self.intersects(Self::CHILD_MENU) }
    /// Returns `true` when the window draws a title bar.
    pub fn has_title_bar(&self) -> bool { !self.intersects(Self::NO_TITLE_BAR) }
    /// Returns `true` when the window has a menu bar.
    pub fn has_menu_bar(&self) -> bool { self.intersects(Self::MENU_BAR) }
}

bitflags! {
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
    /// Per-item behaviour pushed with [`Context::push_item_flag`].
    pub struct ItemFlags : u32 {
        /// The item takes part in Tab navigation.
        const ALLOW_KEYBOARD_FOCUS = 1 << 0;
        /// Buttons fire repeatedly while held.
        const BUTTON_REPEAT = 1 << 1;
        /// The item ignores input and draws dimmed.
        const DISABLED = 1 << 2;
        /// The item is skipped by keyboard navigation.
        const NO_NAV = 1 << 3;
        /// Selectables do not close the popup they live in.
        const SELECTABLE_DONT_CLOSE_POPUP = 1 << 4;
        /// No option.
        const NONE = 0;
    }
}

bitflags! {
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
    /// Facts recorded about the last submitted item.
    pub struct ItemStatusFlags : u32 {
        /// The mouse was inside the item rect when it was added.
        const HOVERED_RECT = 1 << 0;
        /// The item rect differs from its display rect.
        const HAS_DISPLAY_RECT = 1 << 1;
        /// Nothing recorded.
        const NONE = 0;
    }
}

bitflags! {
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
    pub(crate) struct CondFlags : u32 {
        const ALWAYS = 1 << 0;
        const ONCE = 1 << 1;
        const FIRST_USE_EVER = 1 << 2;
        const APPEARING = 1 << 3;
    }
}

impl CondFlags {
    pub(crate) fn all_conds() -> Self { Self::ALWAYS | Self::ONCE | Self::FIRST_USE_EVER | Self::APPEARING }

    pub(crate) fn allows(&self, cond: Cond) -> bool {
        match cond {
            Cond::Always => true,
            Cond::Once => self.contains(Self::ONCE),
            Cond::FirstUseEver => self.contains(Self::FIRST_USE_EVER),
            Cond::Appearing => self.contains(Self::APPEARING),
        }
    }

    /// Consumes the one-shot conditions after a value was applied.
    pub(crate) fn consume(&mut self) { self.remove(Self::ONCE | Self::FIRST_USE_EVER | Self::APPEARING) }
}

#[derive(Copy, Clone, Debug, Default)]
/// Identity, rect and status of the most recently submitted item.
pub struct LastItem {
    /// Item id, zero for items without interaction.
    pub id: Id,
    /// Item bounding box in screen space.
    pub rect: Rectf,
    /// Recorded status.
    pub status: ItemStatusFlags,
}

#[derive(Clone, Debug, Default)]
pub(crate) struct GroupData {
    pub backup_cursor_pos: Vec2f,
    pub backup_cursor_max_pos: Vec2f,
    pub backup_indent_x: f32,
    pub backup_group_offset_x: f32,
    pub backup_current_line_height: f32,
    pub backup_current_line_text_base_offset: f32,
    pub backup_active_id_is_alive: bool,
    pub advance_cursor: bool,
}

#[derive(Clone, Debug)]
/// Per-frame drawing context of a window: layout cursor, line metrics and the pushed item state.
pub struct WindowDc {
    pub(crate) cursor_pos: Vec2f,
    pub(crate) cursor_pos_prev_line: Vec2f,
    pub(crate) cursor_start_pos: Vec2f,
    pub(crate) cursor_max_pos: Vec2f,
    pub(crate) current_line_height: f32,
    pub(crate) current_line_text_base_offset: f32,
    pub(crate) prev_line_height: f32,
    pub(crate) prev_line_text_base_offset: f32,
    pub(crate) indent_x: f32,
    pub(crate) group_offset_x: f32,
    pub(crate) layout_type: LayoutType,
    pub(crate) last_item: LastItem,
    pub(crate) item_flags: ItemFlags,
    pub(crate) item_flags_stack: Vec<ItemFlags>,
    pub(crate) item_width: f32,
    pub(crate) item_width_stack: Vec<f32>,
    pub(crate) text_wrap_pos: f32,
    pub(crate) text_wrap_pos_stack: Vec<f32>,
    pub(crate) group_stack: Vec<GroupData>,
    pub(crate) child_windows: Vec<Id>,
    pub(crate) tree_depth: usize,
    pub(crate) menu_bar_offset_x: f32,
    pub(crate) menu_bar_applied: bool,
    pub(crate) menu_columns: MenuColumns,
}

impl Default for WindowDc {
    fn default() -> Self {
        Self {
            cursor_pos: Vec2f::default(),
            cursor_pos_prev_line: Vec2f::default(),
            cursor_start_pos: Vec2f::default(),
            cursor_max_pos: Vec2f::default(),
            current_line_height: 0.0,
            current_line_text_base_offset: 0.0,
            prev_line_height: 0.0,
            prev_line_text_base_offset: 0.0,
            indent_x: 0.0,
            group_offset_x: 0.0,
            layout_type: LayoutType::Vertical,
            last_item: LastItem::default(),
            item_flags: ItemFlags::ALLOW_KEYBOARD_FOCUS,
            item_flags_stack: Vec::new(),
            item_width: 0.0,
            item_width_stack: Vec::new(),
            text_wrap_pos: -1.0,
            text_wrap_pos_stack: Vec::new(),
            group_stack: Vec::new(),
            child_windows: Vec::new(),
            tree_depth: 0,
            menu_bar_offset_x: 0.0,
            menu_bar_applied: false,
            menu_columns: MenuColumns::default(),
        }
    }
}

impl WindowDc {
    /// Current layout cursor in screen space.
    pub fn cursor_pos(&self) -> Vec2f { self.cursor_pos }

    /// Furthest point reached by the layout this frame.
    pub fn cursor_max_pos(&self) -> Vec2f { self.cursor_max_pos }

    /// Last submitted item.
    pub fn last_item(&self) -> LastItem { self.last_item }

    /// Number of nested tree nodes currently open.
    pub fn tree_depth(&self) -> usize { self.tree_depth }
}

#[derive(Debug)]
/// Everything a window remembers between frames.
pub struct Window {
    pub(crate) name: String,
    pub(crate) id: Id,
    pub(crate) flags: WindowFlags,
    pub(crate) pos: Vec2f,
    pub(crate) size: Vec2f,
    pub(crate) size_full: Vec2f,
    pub(crate) size_contents: Vec2f,
    pub(crate) size_contents_explicit: Vec2f,
    pub(crate) window_padding: Vec2f,
    pub(crate) window_rounding: f32,
    pub(crate) window_border_size: f32,
    pub(crate) scroll: Vec2f,
    pub(crate) scroll_target: Vec2f,
    pub(crate) scroll_target_center_ratio: Vec2f,
    pub(crate) scrollbar_x: bool,
    pub(crate) scrollbar_y: bool,
    pub(crate) scrollbar_sizes: Vec2f,
    pub(crate) collapsed: bool,
    pub(crate) collapse_toggle_wanted: bool,
    pub(crate) active: bool,
    pub(crate) was_active: bool,
    pub(crate) write_accessed: bool,
    pub(crate) skip_items: bool,
    pub(crate) appearing: bool,
    pub(crate) hidden_frames: i32,
    pub(crate) last_frame_active: Option<u64>,
    pub(crate) begin_count: usize,
    pub(crate) zindex: i32,
    pub(crate) set_pos_allow: CondFlags,
    pub(crate) set_size_allow: CondFlags,
    pub(crate) set_collapsed_allow: CondFlags,
    pub(crate) set_pos_pivot: Option<(Vec2f, Vec2f)>,
    pub(crate) draw_list: DrawList,
    pub(crate) id_stack: IdStack,
    pub(crate) dc: WindowDc,
    pub(crate) inner_rect: Rectf,
    pub(crate) clip_rect: Rectf,
    pub(crate) rect_clipped: Rectf,
    pub(crate) contents_region_min: Vec2f,
    pub(crate) contents_region_max: Vec2f,
    pub(crate) title_bar_height: f32,
    pub(crate) menu_bar_height: f32,
    pub(crate) parent_window: Option<Id>,
    pub(crate) root_window: Id,
    pub(crate) root_non_popup_window: Id,
    pub(crate) popup_id: Id,
    pub(crate) state_storage: HashMap<Id, i32>,
    pub(crate) move_id: Id,
    pub(crate) auto_fit_frames: [i32; 2],
    pub(crate) auto_fit_only_grows: bool,
    pub(crate) auto_fit_child_axes: [bool; 2],
    pub(crate) auto_pos_last_direction: Option<Dir>,
    pub(crate) settings_dirty: bool,
    pub(crate) child_id: Id,
    pub(crate) item_width_default: f32,
}

impl Window {
    pub(crate) fn new(name: &str) -> Self {
        let id = Id::from_name(name);
        Self {
            name: name.to_string(),
            id,
            flags: WindowFlags::NONE,
            pos: vec2(60.0, 60.0),
            size: Vec2f::default(),
            size_full: Vec2f::default(),
            size_contents: Vec2f::default(),
            size_contents_explicit: Vec2f::default(),
            window_padding: Vec2f::default(),
            window_rounding: 0.0,
            window_border_size: 0.0,
            scroll: Vec2f::default(),
            scroll_target: vec2(f32::MAX, f32::MAX),
            scroll_target_center_ratio: vec2(0.5, 0.5),
            scrollbar_x: false,
            scrollbar_y: false,
            scrollbar_sizes: Vec2f::default(),
            collapsed: false,
            collapse_toggle_wanted: false,
            active: false,
            was_active: false,
            write_accessed: false,
            skip_items: false,
            appearing: false,
            hidden_frames: 0,
            last_frame_active: None,
            begin_count: 0,
            zindex: 0,
            set_pos_allow: CondFlags::all_conds(),
            set_size_allow: CondFlags::all_conds(),
            set_collapsed_allow: CondFlags::all_conds(),
            set_pos_pivot: None,
            draw_list: DrawList::new(name),
            id_stack: IdStack::new(id),
            dc: WindowDc::default(),
            inner_rect: Rectf::default(),
            clip_rect: Rectf::default(),
            rect_clipped: Rectf::default(),
            contents_region_min: Vec2f::default(),
            contents_region_max: Vec2f::default(),
            title_bar_height: 0.0,
            menu_bar_height: 0.0,
            parent_window: None,
            root_window: id,
            root_non_popup_window: id,
            popup_id: Id::NONE,
            state_storage: HashMap::new(),
            move_id: id.hash_bytes(b"#MOVE"),
            auto_fit_frames: [-1, -1],
            auto_fit_only_grows: false,
            auto_fit_child_axes: [false, false],
            auto_pos_last_direction: None,
            settings_dirty: false,
            child_id: Id::NONE,
            item_width_default: 0.0,
        }
    }

    /// Window name as passed to `begin`, including any `##` suffix.
    pub fn name(&self) -> &str { &self.name }

    /// Hashed name.
    pub fn id(&self) -> Id { self.id }

    /// Flags of the latest `begin`.
    pub fn flags(&self) -> WindowFlags { self.flags }

    /// Top-left corner in screen space.
    pub fn pos(&self) -> Vec2f { self.pos }

    /// Current size; the title bar only when collapsed.
    pub fn size(&self) -> Vec2f { self.size }

    /// Size when expanded.
    pub fn size_full(&self) -> Vec2f { self.size_full }

    /// Size of the content measured last frame, padding included.
    pub fn size_contents(&self) -> Vec2f { self.size_contents }

    /// Scroll offset.
    pub fn scroll(&self) -> Vec2f { self.scroll }

    /// Returns `true` when only the title bar is shown.
    pub fn is_collapsed(&self) -> bool { self.collapsed }

    /// Returns `true` when the window was begun this frame.
    pub fn is_active(&self) -> bool { self.active }

    /// Returns `true` when items submitted to the window are skipped.
    pub fn skip_items(&self) -> bool { self.skip_items }

    /// Z order; higher is drawn later.
    pub fn zindex(&self) -> i32 { self.zindex }

    /// Outer rectangle in screen space.
    pub fn rect(&self) -> Rectf { crate::rect(self.pos.x, self.pos.y, self.size.x, self.size.y) }

    /// Rectangle inside the decorations, where content is clipped.
    pub fn inner_rect(&self) -> Rectf { self.inner_rect }

    /// Draw list filled this frame.
    pub fn draw_list(&self) -> &DrawList { &self.draw_list }

    /// Drawing context.
    pub fn dc(&self) -> &WindowDc { &self.dc }

    /// Parent window of a child, popup or tooltip.
    pub fn parent(&self) -> Option<Id> { self.parent_window }

    /// Top of the window hierarchy this window belongs to.
    pub fn root(&self) -> Id { self.root_window }

    pub(crate) fn title_bar_rect(&self) -> Rectf { crate::rect(self.pos.x, self.pos.y, self.size_full.x, self.title_bar_height) }

    pub(crate) fn menu_bar_rect(&self) -> Rectf {
        let y1 = self.pos.y + self.title_bar_height;
        crate::rect(self.pos.x, y1, self.size_full.x, self.menu_bar_height)
    }

    pub(crate) fn scroll_max_x(&self) -> f32 { (self.size_contents.x - (self.size_full.x - self.scrollbar_sizes.x)).max(0.0) }

    pub(crate) fn scroll_max_y(&self) -> f32 { (self.size_contents.y - (self.size_full.y - self.scrollbar_sizes.y)).max(0.0) }

    pub(crate) fn get_id(&self, label: &str) -> Id { self.id_stack.get_id_str(label) }

    /// Stores `v` in the window's int storage.
    pub(crate) fn set_int(&mut self, key: Id, v: i32) { self.state_storage.insert(key, v); }

    pub(crate) fn get_int(&self, key: Id, default: i32) -> i32 { self.state_storage.get(&key).copied().unwrap_or(default) }

    pub(crate) fn set_pos(&mut self, pos: Vec2f, cond: Cond) {
        if !self.set_pos_allow.allows(cond) {
            return;
        }
        self.set_pos_allow.consume();
        self.set_pos_pivot = None;
        let old = self.pos;
        self.pos = floor2(pos);
        // keep the cursor where the content is
        let d = sub2(self.pos, old);
        self.dc.cursor_pos = add2(self.dc.cursor_pos, d);
        self.dc.cursor_max_pos = add2(self.dc.cursor_max_pos, d);
    }

    pub(crate) fn set_size(&mut self, size: Vec2f, cond: Cond) {
        if !self.set_size_allow.allows(cond) {
            return;
        }
        self.set_size_allow.consume();
        if size.x > 0.0 {
            self.auto_fit_frames[0] = 0;
            self.size_full.x = size.x.floor();
        } else {
            self.auto_fit_frames[0] = 2;
            self.auto_fit_only_grows = false;
        }
        if size.y > 0.0 {
            self.auto_fit_frames[1] = 0;
            self.size_full.y = size.y.floor();
        } else {
            self.auto_fit_frames[1] = 2;
            self.auto_fit_only_grows = false;
        }
    }

    pub(crate) fn set_collapsed(&mut self, collapsed: bool, cond: Cond) {
        if !self.set_collapsed_allow.allows(cond) {
            return;
        }
        self.set_collapsed_allow.consume();
        self.collapsed = collapsed;
    }

    pub(crate) fn auto_fit_pending(&self) -> bool { self.auto_fit_frames[0] > 0 || self.auto_fit_frames[1] > 0 }
}

/// Lowest point and highest point a window may occupy once `padding` is kept clear on every display edge.
pub(crate) fn display_bounds(display: Vec2f, padding: Vec2f) -> (Vec2f, Vec2f) {
    let px = if display.x > padding.x * 2.0 { padding.x } else { 0.0 };
    let py = if display.y > padding.y * 2.0 { padding.y } else { 0.0 };
    (vec2(px, py), vec2(display.x - px, display.y - py))
}

fn constrain_size(w: &Window, style: &crate::Style, size: Vec2f) -> Vec2f {
    if w.flags.intersects(WindowFlags::CHILD_WINDOW | WindowFlags::ALWAYS_AUTO_RESIZE) {
        return size;
    }
    let mut size = max2(size, style.window_min_size);
    size.y = size.y.max(w.title_bar_height + w.menu_bar_height + (style.window_rounding - 1.0).max(0.0));
    size
}

/// Clamps `size` between `min` and `max`, leaving an axis alone when either bound is negative.
pub(crate) fn apply_size_constraint(size: Vec2f, min: Vec2f, max: Vec2f) -> Vec2f {
    let axis = |v: f32, lo: f32, hi: f32| if lo >= 0.0 && hi >= 0.0 { v.clamp(lo, hi.max(lo)) } else { v };
    floor2(vec2(axis(size.x, min.x, max.x), axis(size.y, min.y, max.y)))
}

fn calc_size_contents(w: &Window) -> Vec2f {
    let x = if w.size_contents_explicit.x != 0.0 { w.size_contents_explicit.x } else { w.dc.cursor_max_pos.x - w.pos.x + w.scroll.x };
    let y = if w.size_contents_explicit.y != 0.0 { w.size_contents_explicit.y } else { w.dc.cursor_max_pos.y - w.pos.y + w.scroll.y };
    add2(floor2(vec2(x, y)), w.window_padding)
}

pub(crate) fn calc_size_auto_fit(w: &Window, style: &crate::Style, display: Vec2f) -> Vec2f {
    let contents = w.size_contents;
    if w.flags.is_tooltip() {
        return contents;
    }
    let max = max2(style.window_min_size, sub2(display, style.display_window_padding));
    let mut fit = vec2(contents.x.clamp(style.window_min_size.x, max.x.max(style.window_min_size.x)), contents.y.clamp(style.window_min_size.y, max.y));
    let constrained = constrain_size(w, style, fit);
    let no_scrollbar = w.flags.contains(WindowFlags::NO_SCROLLBAR);
    if constrained.x < contents.x && !no_scrollbar && w.flags.contains(WindowFlags::HORIZONTAL_SCROLLBAR) {
        fit.y += style.scrollbar_size;
    }
    if constrained.y < contents.y && !no_scrollbar {
        fit.x += style.scrollbar_size;
    }
    fit
}

fn calc_next_scroll(w: &Window) -> Vec2f {
    let mut scroll = w.scroll;
    let cr = w.scroll_target_center_ratio;
    if w.scroll_target.x < f32::MAX {
        scroll.x = w.scroll_target.x - cr.x * (w.size_full.x - w.scrollbar_sizes.x);
    }
    if w.scroll_target.y < f32::MAX {
        scroll.y = w.scroll_target.y - (1.0 - cr.y) * (w.title_bar_height + w.menu_bar_height) - cr.y * (w.size_full.y - w.scrollbar_sizes.y);
    }
    scroll = max2(scroll, vec2(0.0, 0.0));
    if !w.collapsed && !w.skip_items {
        scroll.x = scroll.x.min(w.scroll_max_x());
        scroll.y = scroll.y.min(w.scroll_max_y());
    }
    scroll
}

struct BeginState {
    id: Id,
    parent: Option<Id>,
    just_activated: bool,
    after_hidden: bool,
    pos_set_by_api: bool,
    size_set_by_api: [bool; 2],
    size_constraint: Option<(Vec2f, Vec2f)>,
    bg_alpha: Option<f32>,
}

impl Context {
    pub(crate) fn win(&self, id: Id) -> &Window { self.windows.get(id).expect("window id refers to a live window") }

    pub(crate) fn win_mut(&mut self, id: Id) -> &mut Window { self.windows.get_mut(id).expect("window id refers to a live window") }

    /// Id of the window items are currently submitted to.
    pub(crate) fn cw_id(&self) -> Id { *self.current_window_stack.last().expect("no current window, call begin() first") }

    pub(crate) fn cw(&self) -> &Window { self.win(self.cw_id()) }

    /// Current window, marked as written to.
    pub(crate) fn cw_mut(&mut self) -> &mut Window {
        let w = self.win_mut(self.cw_id());
        w.write_accessed = true;
        w
    }

    /// Looks a window up by name.
    pub fn find_window_by_name(&self, name: &str) -> Option<&Window> { self.windows.get(Id::from_name(name)) }

    /// The window items are currently submitted to.
    pub fn current_window(&self) -> Option<&Window> { self.current_window_stack.last().and_then(|id| self.windows.get(*id)) }

    fn create_window(&mut self, name: &str, flags: WindowFlags) -> Id {
        let mut w = Window::new(name);
        w.flags = flags;
        if !flags.contains(WindowFlags::NO_SAVED_SETTINGS) {
            if let Some(s) = self.settings.find(name) {
                w.set_pos_allow.remove(CondFlags::FIRST_USE_EVER);
                w.set_size_allow.remove(CondFlags::FIRST_USE_EVER);
                w.set_collapsed_allow.remove(CondFlags::FIRST_USE_EVER);
                w.pos = floor2(vec2(s.pos[0], s.pos[1]));
                w.collapsed = s.collapsed;
                if s.size[0] > 0.0 && s.size[1] > 0.0 {
                    w.size = floor2(vec2(s.size[0], s.size[1]));
                }
            }
        }
        w.size_full = w.size;
        if flags.contains(WindowFlags::ALWAYS_AUTO_RESIZE) {
            w.auto_fit_frames = [2, 2];
            w.auto_fit_only_grows = false;
        } else {
            if w.size.x <= 0.0 {
                w.auto_fit_frames[0] = 2;
            }
            if w.size.y <= 0.0 {
                w.auto_fit_frames[1] = 2;
            }
            w.auto_fit_only_grows = w.auto_fit_pending();
        }
        if flags.contains(WindowFlags::NO_BRING_TO_FRONT_ON_FOCUS) {
            w.zindex = self.windows.values().map(|w| w.zindex).min().unwrap_or(0) - 1;
        } else {
            self.next_zindex += 1;
            w.zindex = self.next_zindex;
        }
        debug!("window '{}' created at z {}", name, w.zindex);
        let id = w.id;
        self.windows.insert(id, w, self.frame_count);
        self.display_order.push(id);
        id
    }

    /// Pushes a window and starts appending to it. Returns `false` when the window is collapsed or clipped, in
    /// which case items may be skipped; [`Context::end`] must be called either way. When `open` is given a close
    /// button is shown and sets it to `false`.
    pub fn begin(&mut self, name: &str, open: Option<&mut bool>, flags: WindowFlags) -> bool {
        debug_assert!(!name.is_empty(), "window name must not be empty");
        let mut flags = flags;
        let id = Id::from_name(name);
        if !self.windows.contains(id) {
            self.create_window(name, flags);
        }
        let frame = self.frame_count;
        self.windows.touch(id, frame);
        if flags.contains(WindowFlags::NO_INPUTS) {
            flags |= WindowFlags::NO_MOVE | WindowFlags::NO_RESIZE;
        }

        let parent_in_stack = self.current_window_stack.last().copied();
        let next = std::mem::take(&mut self.next_window_data);

        let popup_level = self.current_popup_stack.len();
        let popup_ref = if flags.is_popup() {
            let r = self.open_popup_stack.get(popup_level).cloned();
            if r.is_none() {
                debug_assert!(false, "popup window '{}' begun without an open popup", name);
                warn!("popup window '{}' begun without an open popup", name);
            }
            r
        } else {
            None
        };

        let (first_begin, just_activated, parent, after_hidden) = {
            let w = self.win_mut(id);
            let first_begin = w.last_frame_active != Some(frame);
            if first_begin {
                w.flags = flags;
            } else {
                flags = w.flags;
            }
            let parent = if first_begin {
                if flags.intersects(WindowFlags::CHILD_WINDOW | WindowFlags::POPUP) { parent_in_stack } else { None }
            } else {
                w.parent_window
            };
            let mut just_activated = match w.last_frame_active {
                None => true,
                Some(last) => last + 1 < frame,
            };
            if let Some(r) = &popup_ref {
                just_activated |= w.popup_id != r.popup_id;
                just_activated |= r.window != Some(id);
            }
            let after_hidden = w.hidden_frames == 1;
            w.appearing = just_activated || after_hidden;
            if w.appearing {
                w.set_pos_allow.insert(CondFlags::APPEARING);
                w.set_size_allow.insert(CondFlags::APPEARING);
                w.set_collapsed_allow.insert(CondFlags::APPEARING);
            }
            (first_begin, just_activated, parent, after_hidden)
        };

        self.current_window_stack.push(id);
        if let Some(mut r) = popup_ref {
            r.window = Some(id);
            self.open_popup_stack[popup_level].window = Some(id);
            self.current_popup_stack.push(r);
        }

        let mut pos_set_by_api = false;
        let mut size_set_by_api = [false, false];
        {
            let w = self.win_mut(id);
            if let Some((pos, cond, pivot)) = next.pos {
                pos_set_by_api = w.set_pos_allow.allows(cond);
                if pos_set_by_api && pivot.x * pivot.x + pivot.y * pivot.y > 0.00001 {
                    w.set_pos_pivot = Some((pos, pivot));
                    w.set_pos_allow.consume();
                } else {
                    w.set_pos(pos, cond);
                }
            }
            if let Some((size, cond)) = next.size {
                let allowed = w.set_size_allow.allows(cond);
                size_set_by_api = [allowed && size.x > 0.0, allowed && size.y > 0.0];
                w.set_size(size, cond);
            }
            match next.content_size {
                Some(cs) => w.size_contents_explicit = cs,
                None if first_begin => w.size_contents_explicit = Vec2f::default(),
                None => (),
            }
            if let Some((collapsed, cond)) = next.collapsed {
                w.set_collapsed(collapsed, cond);
            }
            if w.appearing {
                w.set_pos_allow.remove(CondFlags::APPEARING);
                w.set_size_allow.remove(CondFlags::APPEARING);
                w.set_collapsed_allow.remove(CondFlags::APPEARING);
            }
        }
        if next.focus {
            self.focus_window(Some(id));
        }

        if first_begin {
            let st = BeginState { id, parent, just_activated, after_hidden, pos_set_by_api, size_set_by_api, size_constraint: next.size_constraint, bg_alpha: next.bg_alpha };
            self.begin_first_of_frame(name, &st, open);
        }

        let clip = {
            let w = self.win(id);
            let border = w.window_border_size;
            let pad_x = (w.window_padding.x * 0.5 - border).floor().max(0.0);
            let r = w.inner_rect;
            let min = vec2((0.5 + r.x + pad_x).floor(), (0.5 + r.y).floor());
            let max = vec2((0.5 + r.x + r.width - pad_x).floor(), (0.5 + r.y + r.height).floor());
            (min, max)
        };
        self.push_clip_rect(clip.0, clip.1, true);

        let parent_collapsed = parent.map(|p| self.win(p).collapsed).unwrap_or(false);
        let alpha = self.style.alpha;
        let w = self.win_mut(id);
        if first_begin {
            w.write_accessed = false;
        }
        w.begin_count += 1;

        if flags.is_child() {
            debug_assert!(flags.contains(WindowFlags::NO_TITLE_BAR));
            w.collapsed = parent_collapsed;
            if !flags.contains(WindowFlags::ALWAYS_AUTO_RESIZE) && !w.auto_fit_pending() {
                w.collapsed |= w.rect_clipped.is_empty();
            }
            if w.collapsed {
                w.active = false;
            }
        }
        if alpha <= 0.0 {
            w.active = false;
        }

        w.skip_items = (w.collapsed || !w.active) && !w.auto_fit_pending();
        !w.skip_items
    }

    fn begin_first_of_frame(&mut self, name: &str, st: &BeginState, open: Option<&mut bool>) {
        let id = st.id;
        let frame = self.frame_count;
        let display = self.display_size();
        let font_size = self.font_size;
        let mouse = self.input.mouse_pos;
        let double_clicked = self.input.mouse_double_clicked[0];
        let hovered_here = self.hovered_window == Some(id);
        let white_uv = self.font.white_pixel_uv();
        let texture = self.font.texture_id();
        let popup_open_pos = self.current_popup_stack.last().map(|r| r.open_mouse_pos);

        let parent_info = st.parent.map(|p| {
            let pw = self.win(p);
            (pw.root_window, pw.root_non_popup_window, pw.clip_rect, pw.dc.cursor_pos, pw.dc.item_flags)
        });
        let flags = self.win(id).flags;
        let child_tooltip = flags.is_child() && flags.is_tooltip();

        let mut collapse_toggled = false;
        {
            let style = &self.style;
            let w = self.windows.get_mut(id).expect("window id refers to a live window");
            w.parent_window = st.parent;
            w.root_window = id;
            w.root_non_popup_window = id;
            if let Some((root, root_np, ..)) = parent_info {
                if flags.is_child() && !child_tooltip {
                    w.root_window = root;
                }
                if !flags.is_modal() && flags.intersects(WindowFlags::CHILD_WINDOW | WindowFlags::POPUP) {
                    w.root_non_popup_window = root_np;
                }
            }
            w.active = true;
            w.begin_count = 0;
            w.clip_rect = huge_rect();
            w.last_frame_active = Some(frame);
            w.id_stack.reset(id);
            if let Some(r) = self.current_popup_stack.last().filter(|_| flags.is_popup()) {
                w.popup_id = r.popup_id;
            }

            w.draw_list.clear();
            w.draw_list.set_white_uv(white_uv);
            w.draw_list.flags = DrawListFlags::NONE;
            if style.anti_aliased_lines {
                w.draw_list.flags |= DrawListFlags::ANTI_ALIASED_LINES;
            }
            if style.anti_aliased_fill {
                w.draw_list.flags |= DrawListFlags::ANTI_ALIASED_FILL;
            }
            w.draw_list.push_texture_id(texture);
            match parent_info {
                Some((.., parent_clip, _, _)) if flags.is_child() && !flags.is_popup() && !child_tooltip => {
                    w.draw_list.push_clip_rect(parent_clip.min_pt(), parent_clip.max_pt(), true)
                }
                _ if display.x > 0.0 && display.y > 0.0 => w.draw_list.push_clip_rect(vec2(0.0, 0.0), display, true),
                _ => w.draw_list.push_clip_rect_full_screen(),
            }

            w.size_contents = calc_size_contents(w);
            if w.hidden_frames > 0 {
                w.hidden_frames -= 1;
            }
            if flags.intersects(WindowFlags::POPUP | WindowFlags::TOOLTIP) && st.just_activated {
                w.hidden_frames = 1;
                if flags.contains(WindowFlags::ALWAYS_AUTO_RESIZE) {
                    if !st.size_set_by_api[0] {
                        w.size.x = 0.0;
                        w.size_full.x = 0.0;
                    }
                    if !st.size_set_by_api[1] {
                        w.size.y = 0.0;
                        w.size_full.y = 0.0;
                    }
                    w.size_contents = Vec2f::default();
                }
            }

            let plain_popup = flags.is_popup() && !flags.is_modal();
            w.window_rounding = if flags.is_child() {
                style.child_rounding
            } else if plain_popup {
                style.popup_rounding
            } else {
                style.window_rounding
            };
            w.window_border_size = if flags.is_child() {
                style.child_border_size
            } else if plain_popup {
                style.popup_border_size
            } else {
                style.window_border_size
            };
            w.window_padding = style.window_padding;
            if flags.is_child() && !flags.intersects(WindowFlags::ALWAYS_USE_WINDOW_PADDING | WindowFlags::POPUP) && w.window_border_size == 0.0 {
                w.window_padding = vec2(0.0, if flags.has_menu_bar() { style.window_padding.y } else { 0.0 });
            }
            let bar_height = font_size + style.frame_padding.y * 2.0;
            w.title_bar_height = if flags.has_title_bar() { bar_height } else { 0.0 };
            w.menu_bar_height = if flags.has_menu_bar() { bar_height } else { 0.0 };

            if flags.has_title_bar() && !flags.contains(WindowFlags::NO_COLLAPSE) {
                let title_bar = w.title_bar_rect();
                let double_clicked_title = hovered_here && double_clicked && mouse.is_some_and(|m| title_bar.contains_pt(m));
                if w.collapse_toggle_wanted || double_clicked_title {
                    w.collapsed = !w.collapsed;
                    collapse_toggled = true;
                }
            } else {
                w.collapsed = false;
            }
            w.collapse_toggle_wanted = false;
        }
        if collapse_toggled {
            self.mark_settings_dirty(id);
            self.focus_window(Some(id));
        }

        let size_auto_fit = {
            let style = &self.style;
            let w = self.windows.get_mut(id).expect("window id refers to a live window");
            let fit = calc_size_auto_fit(w, style, display);
            let mut dirty = false;
            if flags.contains(WindowFlags::ALWAYS_AUTO_RESIZE) && !w.collapsed {
                if !st.size_set_by_api[0] {
                    w.size_full.x = fit.x;
                }
                if !st.size_set_by_api[1] {
                    w.size_full.y = fit.y;
                }
            } else if w.auto_fit_pending() {
                if !st.size_set_by_api[0] && w.auto_fit_frames[0] > 0 {
                    w.size_full.x = if w.auto_fit_only_grows { w.size_full.x.max(fit.x) } else { fit.x };
                }
                if !st.size_set_by_api[1] && w.auto_fit_frames[1] > 0 {
                    w.size_full.y = if w.auto_fit_only_grows { w.size_full.y.max(fit.y) } else { fit.y };
                }
                dirty = !w.collapsed;
            }
            w.size_full = constrain_size(w, style, w.size_full);
            if let Some((min, max)) = st.size_constraint {
                w.size_full = apply_size_constraint(w.size_full, min, max);
            }
            w.size = if w.collapsed && !flags.is_child() { vec2(w.size_full.x, w.title_bar_height) } else { w.size_full };

            if !w.collapsed {
                let no_scrollbar = flags.contains(WindowFlags::NO_SCROLLBAR);
                w.scrollbar_y = flags.contains(WindowFlags::ALWAYS_VERTICAL_SCROLLBAR)
                    || (w.size_contents.y > w.size_full.y + style.item_spacing.y && !no_scrollbar);
                w.scrollbar_x = flags.contains(WindowFlags::ALWAYS_HORIZONTAL_SCROLLBAR)
                    || (w.size_contents.x > w.size_full.x - if w.scrollbar_y { style.scrollbar_size } else { 0.0 }
                        && !no_scrollbar
                        && flags.contains(WindowFlags::HORIZONTAL_SCROLLBAR));
                if w.scrollbar_x && !w.scrollbar_y {
                    w.scrollbar_y = w.size_contents.y > w.size_full.y + style.item_spacing.y - style.scrollbar_size && !no_scrollbar;
                }
                w.scrollbar_sizes = vec2(
                    if w.scrollbar_y { style.scrollbar_size } else { 0.0 },
                    if w.scrollbar_x { style.scrollbar_size } else { 0.0 },
                );
            }
            (fit, dirty)
        };
        let (size_auto_fit, size_dirty) = size_auto_fit;
        if size_dirty {
            self.mark_settings_dirty(id);
        }

        // position
        {
            let style = &self.style;
            let w = self.windows.get_mut(id).expect("window id refers to a live window");
            if st.just_activated {
                w.auto_pos_last_direction = None;
                if flags.is_popup() && !st.pos_set_by_api {
                    if let Some(p) = popup_open_pos {
                        w.pos = p;
                    }
                }
            }
            if let Some((.., cursor, _)) = parent_info {
                if flags.is_child() && !flags.is_popup() && !st.pos_set_by_api && !child_tooltip {
                    w.pos = cursor;
                }
            }
            if w.hidden_frames == 0 {
                if let Some((target, pivot)) = w.set_pos_pivot.take() {
                    let p = sub2(target, vec2(w.size_full.x * pivot.x, w.size_full.y * pivot.y));
                    w.pos = floor2(max2(style.display_safe_area_padding, p));
                }
            }
        }
        if let Some(p) = st.parent.filter(|_| flags.is_child()) {
            self.win_mut(p).dc.child_windows.push(id);
        }
        let auto_pos = flags.is_child_menu()
            || (flags.is_popup() && !st.pos_set_by_api && st.after_hidden)
            || (flags.is_tooltip() && !st.pos_set_by_api && !child_tooltip);
        if auto_pos && self.win(id).set_pos_pivot.is_none() {
            let pos = self.find_best_window_pos_for_popup(id);
            self.win_mut(id).pos = pos;
        }
        {
            let style = &self.style;
            let w = self.windows.get_mut(id).expect("window id refers to a live window");
            if !flags.is_child() && !flags.is_tooltip() && !st.pos_set_by_api && !w.auto_fit_pending() && display.x > 0.0 && display.y > 0.0 {
                let padding = max2(style.display_window_padding, style.display_safe_area_padding);
                w.pos = sub2(max2(add2(w.pos, w.size), padding), w.size);
                w.pos = min2(w.pos, sub2(display, padding));
            }
            w.pos = floor2(w.pos);

            w.item_width_default = if w.size.x > 0.0 && !flags.is_tooltip() && !flags.contains(WindowFlags::ALWAYS_AUTO_RESIZE) {
                (w.size.x * 0.65).floor()
            } else {
                (font_size * 16.0).floor()
            };

            w.scroll = calc_next_scroll(w);
            w.scroll_target = vec2(f32::MAX, f32::MAX);
        }

        let want_focus = st.just_activated
            && !flags.contains(WindowFlags::NO_FOCUS_ON_APPEARING)
            && (!flags.intersects(WindowFlags::CHILD_WINDOW | WindowFlags::TOOLTIP) || flags.is_popup());

        if flags.is_modal() && self.front_most_modal() == Some(id) {
            let col = self.style.color(StyleColor::ModalWindowDarkening, 1.0);
            let mut p = self.painter_for(id);
            p.dl.add_rect_filled(vec2(0.0, 0.0), display, col, 0.0, DrawCornerFlags::ALL);
        }

        {
            let w = self.win_mut(id);
            let outer = w.draw_list.current_clip_rect();
            w.rect_clipped = w.rect().clip_with(&rect_min_max(vec2(outer.x1, outer.y1), vec2(outer.x2, outer.y2)));
            w.clip_rect = huge_rect();
        }

        let grip_col = if self.win(id).collapsed { None } else { self.update_manual_resize(id, size_auto_fit) };
        self.render_window_decorations(id, grip_col, st.bg_alpha, want_focus);

        {
            let style = &self.style;
            let w = self.windows.get_mut(id).expect("window id refers to a live window");
            let bars = w.title_bar_height + w.menu_bar_height;
            w.contents_region_min = vec2(-w.scroll.x + w.window_padding.x, -w.scroll.y + w.window_padding.y + bars);
            w.contents_region_max = vec2(
                -w.scroll.x - w.window_padding.x + if w.size_contents_explicit.x != 0.0 { w.size_contents_explicit.x } else { w.size.x - w.scrollbar_sizes.x },
                -w.scroll.y - w.window_padding.y + if w.size_contents_explicit.y != 0.0 { w.size_contents_explicit.y } else { w.size.y - w.scrollbar_sizes.y },
            );

            let dc = &mut w.dc;
            dc.indent_x = w.window_padding.x - w.scroll.x;
            dc.group_offset_x = 0.0;
            dc.cursor_start_pos = add2(w.pos, vec2(dc.indent_x, bars + w.window_padding.y - w.scroll.y));
            dc.cursor_pos = dc.cursor_start_pos;
            dc.cursor_pos_prev_line = dc.cursor_pos;
            dc.cursor_max_pos = dc.cursor_start_pos;
            dc.current_line_height = 0.0;
            dc.prev_line_height = 0.0;
            dc.current_line_text_base_offset = 0.0;
            dc.prev_line_text_base_offset = 0.0;
            dc.menu_bar_applied = false;
            dc.menu_bar_offset_x = w.window_padding.x.max(style.item_spacing.x);
            dc.child_windows.clear();
            dc.layout_type = LayoutType::Vertical;
            dc.item_flags = ItemFlags::ALLOW_KEYBOARD_FOCUS;
            dc.item_width = w.item_width_default;
            dc.text_wrap_pos = -1.0;
            dc.item_flags_stack.clear();
            dc.item_width_stack.clear();
            dc.text_wrap_pos_stack.clear();
            dc.tree_depth = 0;
            dc.group_stack.clear();
            dc.menu_columns.update(3, style.item_spacing.x, st.just_activated);
            if let Some((.., parent_item_flags)) = parent_info {
                if flags.is_child() && dc.item_flags != parent_item_flags {
                    dc.item_flags = parent_item_flags;
                    dc.item_flags_stack.push(parent_item_flags);
                }
            }
            for axis in 0..2 {
                if w.auto_fit_frames[axis] > 0 {
                    w.auto_fit_frames[axis] -= 1;
                }
            }
        }

        if want_focus {
            self.focus_window(Some(id));
        }

        if flags.has_title_bar() {
            self.render_title_bar(id, name, open);
        }

        let frame_border = self.style.frame_border_size;
        let w = self.win_mut(id);
        let title_bar = w.title_bar_rect();
        let top_border = if flags.has_menu_bar() || flags.has_title_bar() { frame_border } else { w.window_border_size };
        w.inner_rect = rect_min_max(
            vec2(title_bar.x + w.window_border_size, title_bar.y + title_bar.height + w.menu_bar_height + top_border),
            vec2(w.pos.x + w.size.x - w.scrollbar_sizes.x - w.window_border_size, w.pos.y + w.size.y - w.scrollbar_sizes.y - w.window_border_size),
        );
        w.dc.last_item = LastItem {
            id: w.move_id,
            rect: title_bar,
            status: if mouse.is_some_and(|m| title_bar.contains_pt(m)) { ItemStatusFlags::HOVERED_RECT } else { ItemStatusFlags::NONE },
        };
    }

    fn update_manual_resize(&mut self, id: Id, size_auto_fit: Vec2f) -> Option<crate::Color> {
        let (flags, pos, size, rounding, auto_fit_pending) = {
            let w = self.win(id);
            (w.flags, w.pos, w.size, w.window_rounding, w.auto_fit_pending())
        };
        if flags.intersects(WindowFlags::NO_RESIZE | WindowFlags::ALWAYS_AUTO_RESIZE) || auto_fit_pending {
            return None;
        }
        let grip_draw = (self.font_size * 1.35).max(rounding + 1.0 + self.font_size * 0.2).floor();
        let grip_hover = (grip_draw * 0.75).floor();
        let corner = add2(pos, size);
        let bb = rect_min_max(sub2(corner, vec2(grip_hover, grip_hover)), corner);
        let grip_id = id.hash_bytes(b"#RESIZE");
        let (hovered, held, _) = self.button_behavior(bb, grip_id, ButtonFlags::FLATTEN_CHILDREN | ButtonFlags::NO_NAV_FOCUS);

        let mut size_target = None;
        if held && self.input.mouse_double_clicked[0] {
            size_target = Some(constrain_size(self.win(id), &self.style, size_auto_fit));
            self.clear_active_id();
        } else if held {
            if let Some(m) = self.input.mouse_pos {
                let corner_target = add2(sub2(m, self.active_id_click_offset), vec2(grip_hover, grip_hover));
                let w = self.win(id);
                size_target = Some(constrain_size(w, &self.style, sub2(corner_target, w.pos)));
            }
        }
        if let Some(target) = size_target {
            self.win_mut(id).size_full = target;
            self.mark_settings_dirty(id);
        }
        let w = self.win_mut(id);
        w.size = w.size_full;

        let idx = if held {
            StyleColor::ResizeGripActive
        } else if hovered {
            StyleColor::ResizeGripHovered
        } else {
            StyleColor::ResizeGrip
        };
        Some(self.style.color(idx, 1.0))
    }

    fn render_window_decorations(&mut self, id: Id, grip_col: Option<crate::Color>, bg_alpha: Option<f32>, want_focus: bool) {
        let (flags, pos, size, rounding, border, collapsed, title_bar, menu_bar, root_np, scrollbars) = {
            let w = self.win(id);
            let menu_bar = w.menu_bar_rect().clip_with(&w.rect());
            (w.flags, w.pos, w.size, w.window_rounding, w.window_border_size, w.collapsed, w.title_bar_rect(), menu_bar, w.root_non_popup_window, (w.scrollbar_x, w.scrollbar_y))
        };
        let highlight = want_focus || self.nav_window.map(|n| self.win(n).root_non_popup_window) == Some(root_np);
        let nav_disable_highlight = self.nav_disable_highlight;
        let frame_border = self.style.frame_border_size;

        if collapsed {
            let idx = if highlight && !nav_disable_highlight { StyleColor::TitleBgActive } else { StyleColor::TitleBgCollapsed };
            let mut p = self.painter_for(id);
            let col = p.col(idx);
            p.render_frame_ex(title_bar.min_pt(), title_bar.max_pt(), col, rounding, border);
            return;
        }

        let bg_idx = if flags.intersects(WindowFlags::POPUP | WindowFlags::TOOLTIP) {
            StyleColor::PopupBg
        } else if flags.is_child() {
            StyleColor::ChildBg
        } else {
            StyleColor::WindowBg
        };
        {
            let mut p = self.painter_for(id);
            let mut bg = p.col(bg_idx);
            if let Some(a) = bg_alpha {
                bg.a = (crate::saturate(a) * 255.0 + 0.5) as u8;
            }
            let bg_corners = if flags.has_title_bar() { DrawCornerFlags::BOT } else { DrawCornerFlags::ALL };
            p.dl.add_rect_filled(add2(pos, vec2(0.0, title_bar.height)), add2(pos, size), bg, rounding, bg_corners);
            if flags.has_title_bar() {
                let col = p.col(if highlight { StyleColor::TitleBgActive } else { StyleColor::TitleBg });
                p.dl.add_rect_filled(title_bar.min_pt(), title_bar.max_pt(), col, rounding, DrawCornerFlags::TOP);
            }
            if flags.has_menu_bar() {
                let col = p.col(StyleColor::MenuBarBg);
                let r = if flags.has_title_bar() { 0.0 } else { rounding };
                p.dl.add_rect_filled(menu_bar.min_pt(), menu_bar.max_pt(), col, r, DrawCornerFlags::TOP);
                if frame_border > 0.0 && menu_bar.max_pt().y < pos.y + size.y {
                    let line = p.col(StyleColor::Border);
                    p.dl.add_line(vec2(menu_bar.x, menu_bar.max_pt().y), menu_bar.max_pt(), line, frame_border);
                }
            }
        }
        if scrollbars.0 {
            self.scrollbar(id, true);
        }
        if scrollbars.1 {
            self.scrollbar(id, false);
        }

        let font_size = self.font_size;
        let mut p = self.painter_for(id);
        if let Some(col) = grip_col {
            let grip_draw = (font_size * 1.35).max(rounding + 1.0 + font_size * 0.2).floor();
            let corner = add2(pos, size);
            p.dl.path_line_to(sub2(corner, vec2(grip_draw, border)));
            p.dl.path_line_to(sub2(corner, vec2(border, grip_draw)));
            p.dl.path_arc_to_fast(sub2(corner, vec2(rounding + border, rounding + border)), rounding, 0, 3);
            p.dl.path_fill_convex(col);
        }
        if border > 0.0 {
            let col = p.col(StyleColor::Border);
            p.dl.add_rect(pos, add2(pos, size), col, rounding, DrawCornerFlags::ALL, border);
        }
        if frame_border > 0.0 && flags.has_title_bar() {
            let col = p.col(StyleColor::Border);
            let y = title_bar.max_pt().y - 1.0;
            p.dl.add_line(vec2(title_bar.x + border, y), vec2(title_bar.max_pt().x - border, y), col, frame_border);
        }
    }

    fn scrollbar(&mut self, id: Id, horizontal: bool) {
        let style_size = self.style.scrollbar_size;
        let (bar_id, mut bb, window_rect, rounding, corners, scroll_v, win_size_avail_v, win_size_contents_v) = {
            let w = self.win(id);
            let bar_id = w.get_id(if horizontal { "#SCROLLX" } else { "#SCROLLY" });
            let other = if horizontal { w.scrollbar_y } else { w.scrollbar_x };
            let other_w = if other { style_size } else { 0.0 };
            let wr = w.rect();
            let b = w.window_border_size;
            let (min, max) = (wr.min_pt(), wr.max_pt());
            let mut bb = if horizontal {
                rect_min_max(vec2(min.x + b, max.y - style_size), vec2(max.x - other_w - b, max.y - b))
            } else {
                rect_min_max(vec2(max.x - style_size, min.y + b), vec2(max.x - b, max.y - other_w - b))
            };
            if !horizontal {
                let dy = w.title_bar_height + w.menu_bar_height;
                bb.y += dy;
                bb.height -= dy;
            }
            let corners = if horizontal {
                DrawCornerFlags::BOT_LEFT | if other { DrawCornerFlags::NONE } else { DrawCornerFlags::BOT_RIGHT }
            } else {
                let top = if !w.flags.has_title_bar() && !w.flags.has_menu_bar() { DrawCornerFlags::TOP_RIGHT } else { DrawCornerFlags::NONE };
                top | if other { DrawCornerFlags::NONE } else { DrawCornerFlags::BOT_RIGHT }
            };
            let (scroll_v, avail, contents) = if horizontal {
                (w.scroll.x, w.size_full.x - other_w, w.size_contents.x)
            } else {
                (w.scroll.y, w.size_full.y - other_w, w.size_contents.y)
            };
            (bar_id, bb, wr, w.window_rounding, corners, scroll_v, avail, contents)
        };
        if bb.width <= 0.0 || bb.height <= 0.0 {
            return;
        }
        {
            let mut p = self.painter_for(id);
            let col = p.col(StyleColor::ScrollbarBg);
            p.dl.add_rect_filled(bb.min_pt(), bb.max_pt(), col, rounding, corners);
        }
        let shrink_x = ((bb.width - 2.0) * 0.5).floor().clamp(0.0, 3.0);
        let shrink_y = ((bb.height - 2.0) * 0.5).floor().clamp(0.0, 3.0);
        bb = bb.expand(-shrink_x, -shrink_y);

        let scrollbar_size_v = if horizontal { bb.width } else { bb.height };
        let win_size_v = win_size_contents_v.max(win_size_avail_v).max(1.0);
        let grab_h_pixels = (scrollbar_size_v * (win_size_avail_v / win_size_v)).clamp(self.style.grab_min_size.min(scrollbar_size_v), scrollbar_size_v);
        let grab_h_norm = grab_h_pixels / scrollbar_size_v;

        let previously_held = self.active_id == bar_id;
        let (hovered, held, _) = self.button_behavior(bb, bar_id, ButtonFlags::NO_NAV_FOCUS);

        let scroll_max = (win_size_contents_v - win_size_avail_v).max(1.0);
        let mut scroll_ratio = crate::saturate(scroll_v / scroll_max);
        let mut grab_v_norm = scroll_ratio * (scrollbar_size_v - grab_h_pixels) / scrollbar_size_v;
        if held && grab_h_norm < 1.0 {
            let scrollbar_pos_v = if horizontal { bb.x } else { bb.y };
            let mouse = self.input.mouse_pos.unwrap_or_default();
            let mouse_pos_v = if horizontal { mouse.x } else { mouse.y };
            let clicked_v_norm = crate::saturate((mouse_pos_v - scrollbar_pos_v) / scrollbar_size_v);
            self.set_hovered_id(bar_id);

            let mut delta = if horizontal { self.scrollbar_click_delta_to_grab_center.x } else { self.scrollbar_click_delta_to_grab_center.y };
            let mut seek_absolute = false;
            if !previously_held {
                if clicked_v_norm >= grab_v_norm && clicked_v_norm <= grab_v_norm + grab_h_norm {
                    delta = clicked_v_norm - grab_v_norm - grab_h_norm * 0.5;
                } else {
                    seek_absolute = true;
                    delta = 0.0;
                }
            }
            let scroll_v_norm = crate::saturate((clicked_v_norm - delta - grab_h_norm * 0.5) / (1.0 - grab_h_norm));
            let new_scroll = (0.5 + scroll_v_norm * scroll_max).floor();
            {
                let w = self.win_mut(id);
                if horizontal {
                    w.scroll.x = new_scroll;
                } else {
                    w.scroll.y = new_scroll;
                }
            }
            scroll_ratio = crate::saturate(new_scroll / scroll_max);
            grab_v_norm = scroll_ratio * (scrollbar_size_v - grab_h_pixels) / scrollbar_size_v;
            if seek_absolute {
                delta = clicked_v_norm - grab_v_norm - grab_h_norm * 0.5;
            }
            if horizontal {
                self.scrollbar_click_delta_to_grab_center.x = delta;
            } else {
                self.scrollbar_click_delta_to_grab_center.y = delta;
            }
        }

        let grab_rounding = self.style.scrollbar_rounding;
        let mut p = self.painter_for(id);
        let col = p.col(if held {
            StyleColor::ScrollbarGrabActive
        } else if hovered {
            StyleColor::ScrollbarGrabHovered
        } else {
            StyleColor::ScrollbarGrab
        });
        let (min, max) = if horizontal {
            let x = crate::lerp(bb.x, bb.max_pt().x, grab_v_norm);
            (vec2(x, bb.y), vec2((x + grab_h_pixels).min(window_rect.max_pt().x), bb.max_pt().y))
        } else {
            let y = crate::lerp(bb.y, bb.max_pt().y, grab_v_norm);
            (vec2(bb.x, y), vec2(bb.max_pt().x, (y + grab_h_pixels).min(window_rect.max_pt().y)))
        };
        p.dl.add_rect_filled(min, max, col, grab_rounding, DrawCornerFlags::ALL);
    }

    fn render_title_bar(&mut self, id: Id, name: &str, open: Option<&mut bool>) {
        let (flags, pos, size, collapsed, title_bar, move_flags_backup) = {
            let w = self.win(id);
            (w.flags, w.pos, w.size, w.collapsed, w.title_bar_rect(), w.dc.item_flags)
        };
        let font_size = self.font_size;
        let fp = self.style.frame_padding;
        let inner_x = self.style.item_inner_spacing.x;
        let title_align = self.style.window_title_align;

        self.win_mut(id).dc.item_flags |= ItemFlags::NO_NAV;
        if !flags.contains(WindowFlags::NO_COLLAPSE) {
            let collapse_id = self.win(id).get_id("#COLLAPSE");
            if self.collapse_button(collapse_id, add2(pos, fp), collapsed) {
                // applied by the next begin
                self.win_mut(id).collapse_toggle_wanted = true;
            }
        }
        let has_close = open.is_some();
        if let Some(open) = open {
            let rad = font_size * 0.5;
            let close_id = self.win(id).get_id("#CLOSE");
            if self.close_button(close_id, vec2(pos.x + size.x - fp.y - rad, pos.y + fp.y + rad), rad + 1.0) {
                *open = false;
            }
        }
        self.win_mut(id).dc.item_flags = move_flags_backup;

        let label = crate::find_rendered_text_end(name);
        let text_size = self.calc_text_size(label, false, -1.0);
        let pad_left = if flags.contains(WindowFlags::NO_COLLAPSE) { fp.x } else { fp.x + font_size + inner_x };
        let mut pad_right = if has_close { fp.x + font_size + inner_x } else { fp.x };
        if title_align.x > 0.0 {
            pad_right = crate::lerp(pad_right, pad_left, title_align.x);
        }
        let text_min = vec2(title_bar.x + pad_left, title_bar.y);
        let text_max = vec2(title_bar.max_pt().x - pad_right, title_bar.max_pt().y);
        let clip_max_x = pos.x + size.x - if has_close { title_bar.height - 3.0 } else { fp.x };
        let clip = rect_min_max(text_min, vec2(clip_max_x, text_max.y));
        let mut p = self.painter_for(id);
        p.render_text_clipped(text_min, text_max, label, Some(text_size), title_align, Some(clip));
    }

    /// Pops the current window. Must match every [`Context::begin`], whatever it returned.
    pub fn end(&mut self) {
        if self.current_window_stack.len() <= 1 {
            debug_assert!(false, "end() called more times than begin(), or on the implicit window");
            warn!("unbalanced end() ignored");
            return;
        }
        self.end_current_window();
    }

    pub(crate) fn end_current_window(&mut self) {
        self.pop_clip_rect();
        let id = self.cw_id();
        let flags = self.win(id).flags;
        self.current_window_stack.pop();
        if flags.is_popup() {
            self.current_popup_stack.pop();
        }
        self.check_window_stacks(id);
    }

    /// Asserts balanced id and group stacks in a window being ended, resetting them in release builds.
    pub(crate) fn check_window_stacks(&mut self, id: Id) {
        let w = self.win_mut(id);
        if w.id_stack.depth() != 1 {
            debug_assert!(false, "window '{}': push_id()/pop_id() mismatch", w.name);
            warn!("window '{}': id stack left at depth {}, reset", w.name, w.id_stack.depth());
            w.id_stack.reset(w.id);
        }
        if !w.dc.group_stack.is_empty() {
            debug_assert!(false, "window '{}': begin_group()/end_group() mismatch", w.name);
            warn!("window '{}': {} groups left open, dropped", w.name, w.dc.group_stack.len());
            w.dc.group_stack.clear();
        }
    }

    /// Runs `f` inside a window and always ends it. `f` is skipped when the window is collapsed or clipped.
    pub fn window<F: FnOnce(&mut Self)>(&mut self, name: &str, flags: WindowFlags, f: F) -> bool {
        let visible = self.begin(name, None, flags);
        if visible {
            f(self);
        }
        self.end();
        visible
    }

    /// Like [`Context::window`], with a close button wired to `open`.
    pub fn window_closable<F: FnOnce(&mut Self)>(&mut self, name: &str, open: &mut bool, flags: WindowFlags, f: F) -> bool {
        let visible = self.begin(name, Some(open), flags);
        if visible {
            f(self);
        }
        self.end();
        visible
    }

    /// Pushes a clip rect on the current window's draw list and records it as the window clip rect.
    pub fn push_clip_rect(&mut self, min: Vec2f, max: Vec2f, intersect_with_current: bool) {
        let w = self.win_mut(self.cw_id());
        w.draw_list.push_clip_rect(min, max, intersect_with_current);
        let c = w.draw_list.current_clip_rect();
        w.clip_rect = rect_min_max(vec2(c.x1, c.y1), vec2(c.x2, c.y2));
    }

    /// Pops the clip rect pushed by [`Context::push_clip_rect`].
    pub fn pop_clip_rect(&mut self) {
        let w = self.win_mut(self.cw_id());
        w.draw_list.pop_clip_rect();
        let c = w.draw_list.current_clip_rect();
        w.clip_rect = rect_min_max(vec2(c.x1, c.y1), vec2(c.x2, c.y2));
    }
}

pub(crate) fn huge_rect() -> Rectf { Rectf { x: -f32::MAX, y: -f32::MAX, width: f32::INFINITY, height: f32::INFINITY } }

/// Window creation options for children, popups and the next `begin`.
impl Context {
    /// Begins a scrolling child region inside the current window. A zero size axis fits the
    /// content, a negative one leaves that many pixels to the parent's right/bottom edge.
    /// Call [`Context::end_child`] whatever this returns.
    pub fn begin_child(&mut self, str_id: &str, size: Vec2f, border: bool, flags: WindowFlags) -> bool {
        let id = self.cw().get_id(str_id);
        self.begin_child_ex(Some(str_id), id, size, border, flags)
    }

    /// [`Context::begin_child`] keyed by an explicit id.
    pub fn begin_child_id(&mut self, id: Id, size: Vec2f, border: bool, flags: WindowFlags) -> bool { self.begin_child_ex(None, id, size, border, flags) }

    pub(crate) fn begin_child_ex(&mut self, name: Option<&str>, id: Id, size: Vec2f, border: bool, extra_flags: WindowFlags) -> bool {
        let (parent_name, parent_flags) = {
            let p = self.cw();
            (p.name.clone(), p.flags)
        };
        let flags = WindowFlags::NO_TITLE_BAR | WindowFlags::NO_RESIZE | WindowFlags::NO_SAVED_SETTINGS | WindowFlags::CHILD_WINDOW | (parent_flags & WindowFlags::NO_MOVE) | extra_flags;

        let avail = self.get_content_region_avail();
        let mut size = floor2(size);
        let auto_fit_axes = [size.x == 0.0, size.y == 0.0];
        if size.x <= 0.0 {
            size.x = (avail.x + size.x).max(4.0);
        }
        if size.y <= 0.0 {
            size.y = (avail.y + size.y).max(4.0);
        }

        let backup_border = self.style.child_border_size;
        if !border {
            self.style.child_border_size = 0.0;
        }
        let title = match name {
            Some(name) => format!("{}/{}_{:08X}", parent_name, name, id.0),
            None => format!("{}/{:08X}", parent_name, id.0),
        };
        self.set_next_window_size(size, Cond::Always);
        let ret = self.begin(&title, None, flags);
        self.style.child_border_size = backup_border;

        let w = self.cw_mut();
        w.child_id = id;
        w.auto_fit_child_axes = auto_fit_axes;
        ret
    }

    /// Ends a child region and reserves its footprint in the parent layout.
    pub fn end_child(&mut self) {
        let id = self.cw_id();
        let (flags, begin_count, size, axes, child_id, scrolls) = {
            let w = self.win(id);
            (w.flags, w.begin_count, w.size, w.auto_fit_child_axes, w.child_id, w.scroll_max_y() > 0.0 || w.scroll_max_x() > 0.0)
        };
        debug_assert!(flags.is_child(), "end_child() called on a non-child window");
        if !flags.is_child() {
            warn!("end_child() called on a non-child window, treated as end()");
        }
        if begin_count > 1 || !flags.is_child() {
            self.end();
            return;
        }
        let mut sz = size;
        if axes[0] {
            sz.x = sz.x.max(4.0);
        }
        if axes[1] {
            sz.y = sz.y.max(4.0);
        }
        self.end();
        let cursor = self.cw().dc.cursor_pos;
        let bb = rect_min_max(cursor, add2(cursor, sz));
        self.item_size(sz, 0.0);
        self.item_add(bb, if scrolls { child_id } else { Id::NONE });
    }

    /// Runs `f` in a child region, always closing it.
    pub fn child<F: FnOnce(&mut Self)>(&mut self, str_id: &str, size: Vec2f, border: bool, flags: WindowFlags, f: F) {
        if self.begin_child(str_id, size, border, flags) {
            f(self);
        }
        self.end_child();
    }

    /// A child region styled like a widget frame.
    pub fn begin_child_frame(&mut self, id: Id, size: Vec2f, flags: WindowFlags) -> bool {
        let frame_bg = self.style.colors[StyleColor::FrameBg as usize];
        let (rounding, border, padding) = (self.style.frame_rounding, self.style.frame_border_size, self.style.frame_padding);
        self.push_style_color(StyleColor::ChildBg, frame_bg);
        self.push_style_var(StyleVar::ChildRounding, StyleValue::Float(rounding));
        self.push_style_var(StyleVar::ChildBorderSize, StyleValue::Float(border));
        self.push_style_var(StyleVar::WindowPadding, StyleValue::Vec2(padding));
        let ret = self.begin_child_id(id, size, true, WindowFlags::NO_MOVE | WindowFlags::ALWAYS_USE_WINDOW_PADDING | flags);
        self.pop_style_var(3);
        self.pop_style_color(1);
        ret
    }

    /// Ends a [`Context::begin_child_frame`] region.
    pub fn end_child_frame(&mut self) { self.end_child(); }

    /// Position for the next `begin`; `pivot` (0,0)=top-left .. (1,1)=bottom-right anchors it.
    pub fn set_next_window_pos(&mut self, pos: Vec2f, cond: Cond, pivot: Vec2f) { self.next_window_data.pos = Some((pos, cond, pivot)); }

    /// Size for the next `begin`; a zero axis auto-fits.
    pub fn set_next_window_size(&mut self, size: Vec2f, cond: Cond) { self.next_window_data.size = Some((size, cond)); }

    /// Size bounds for the next `begin`, applied after auto-fit. Use -1 on both bounds of an axis to leave it free.
    pub fn set_next_window_size_constraints(&mut self, min: Vec2f, max: Vec2f) { self.next_window_data.size_constraint = Some((min, max)); }

    /// Content size for the next `begin`, excluding window padding. Zero axes are measured.
    pub fn set_next_window_content_size(&mut self, size: Vec2f) { self.next_window_data.content_size = Some(size); }

    /// Collapsed state for the next `begin`.
    pub fn set_next_window_collapsed(&mut self, collapsed: bool, cond: Cond) { self.next_window_data.collapsed = Some((collapsed, cond)); }

    /// Focuses and brings to front the next window begun.
    pub fn set_next_window_focus(&mut self) { self.next_window_data.focus = true; }

    /// Background alpha override for the next window.
    pub fn set_next_window_bg_alpha(&mut self, alpha: f32) { self.next_window_data.bg_alpha = Some(alpha); }

    /// Screen position of the current window.
    pub fn get_window_pos(&self) -> Vec2f { self.cw().pos }

    /// Size of the current window.
    pub fn get_window_size(&self) -> Vec2f { self.cw().size }

    /// Width of the current window.
    pub fn get_window_width(&self) -> f32 { self.cw().size.x }

    /// Height of the current window.
    pub fn get_window_height(&self) -> f32 { self.cw().size.y }

    /// Whether the current window is collapsed.
    pub fn is_window_collapsed(&self) -> bool { self.cw().collapsed }

    /// True on the frame a window is (re)shown.
    pub fn is_window_appearing(&self) -> bool { self.cw().appearing }

    /// Moves the current window.
    pub fn set_window_pos(&mut self, pos: Vec2f, cond: Cond) { self.cw_mut().set_pos(pos, cond); }

    /// Resizes the current window; a zero axis auto-fits.
    pub fn set_window_size(&mut self, size: Vec2f, cond: Cond) { self.cw_mut().set_size(size, cond); }

    /// Collapses or expands the current window.
    pub fn set_window_collapsed(&mut self, collapsed: bool, cond: Cond) { self.cw_mut().set_collapsed(collapsed, cond); }

    /// Sets the position of a window by name, if it exists.
    pub fn set_window_pos_by_name(&mut self, name: &str, pos: Vec2f, cond: Cond) {
        if let Some(w) = self.windows.get_mut(Id::from_name(name)) {
            w.set_pos(pos, cond);
        }
    }

    /// Resizes a window by name, if it exists.
    pub fn set_window_size_by_name(&mut self, name: &str, size: Vec2f, cond: Cond) {
        if let Some(w) = self.windows.get_mut(Id::from_name(name)) {
            w.set_size(size, cond);
        }
    }

    /// Collapses or expands a window by name, if it exists.
    pub fn set_window_collapsed_by_name(&mut self, name: &str, collapsed: bool, cond: Cond) {
        if let Some(w) = self.windows.get_mut(Id::from_name(name)) {
            w.set_collapsed(collapsed, cond);
        }
    }

    /// Focuses the current window.
    pub fn set_window_focus(&mut self) {
        let id = self.cw_id();
        self.focus_window(Some(id));
    }

    /// Draw list of the current window, for custom rendering.
    pub fn window_draw_list(&mut self) -> &mut DrawList { &mut self.cw_mut().draw_list }

    /// Horizontal scroll of the current window.
    pub fn get_scroll_x(&self) -> f32 { self.cw().scroll.x }

    /// Vertical scroll of the current window.
    pub fn get_scroll_y(&self) -> f32 { self.cw().scroll.y }

    /// Largest horizontal scroll the current content allows.
    pub fn get_scroll_max_x(&self) -> f32 { self.cw().scroll_max_x() }

    /// Largest vertical scroll the current content allows.
    pub fn get_scroll_max_y(&self) -> f32 { self.cw().scroll_max_y() }

    /// Requests a horizontal scroll, applied next frame.
    pub fn set_scroll_x(&mut self, scroll_x: f32) {
        let w = self.cw_mut();
        w.scroll_target.x = scroll_x;
        w.scroll_target_center_ratio.x = 0.0;
    }

    /// Requests a vertical scroll, applied next frame. The title and menu bars are not part of the scroll space.
    pub fn set_scroll_y(&mut self, scroll_y: f32) {
        let w = self.cw_mut();
        w.scroll_target.y = scroll_y + w.title_bar_height + w.menu_bar_height;
        w.scroll_target_center_ratio.y = 0.0;
    }

    /// Scrolls so that local y `pos_y` lands at `center_ratio` of the visible height (0 top, 0.5 center, 1 bottom).
    pub fn set_scroll_from_pos_y(&mut self, pos_y: f32, center_ratio: f32) {
        debug_assert!((0.0..=1.0).contains(&center_ratio));
        let w = self.cw_mut();
        let mut target = (pos_y + w.scroll.y).floor();
        if center_ratio <= 0.0 && target <= w.window_padding.y {
            target = 0.0;
        }
        w.scroll_target.y = target;
        w.scroll_target_center_ratio.y = center_ratio;
    }

    /// Scrolls to bring the current cursor line to `center_ratio` of the visible height.
    pub fn set_scroll_here(&mut self, center_ratio: f32) {
        let w = self.cw();
        let spacing_y = self.style.item_spacing.y;
        let target_y = w.dc.cursor_pos_prev_line.y - w.pos.y;
        let y = crate::lerp(target_y - spacing_y, target_y + w.dc.prev_line_height + spacing_y, center_ratio);
        self.set_scroll_from_pos_y(y, center_ratio);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{context, run_frame};

    #[test]
    fn balanced_begin_end_leaves_only_the_implicit_window() {
        let mut ctx = context();
        run_frame(&mut ctx, |ui| {
            ui.begin("Outer", None, WindowFlags::NONE);
            ui.begin("Inner", None, WindowFlags::NONE);
            assert_eq!(ui.current_window_stack.len(), 3);
            ui.end();
            ui.end();
            assert_eq!(ui.current_window_stack.len(), 1);
        });
        assert!(ctx.window_by_id(Id::from_name("Inner")).is_some());
    }

    #[test]
    #[cfg_attr(debug_assertions, should_panic(expected = "mismatched begin()/end()"))]
    fn begin_without_end_is_caught_at_frame_end() {
        let mut ctx = context();
        run_frame(&mut ctx, |ui| {
            ui.begin("Leaky", None, WindowFlags::NONE);
        });
        // release builds close the window and keep going
        assert_eq!(ctx.current_window_stack.len(), 0);
    }
}
