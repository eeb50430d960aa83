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
//! Drag and drop between items: a source item publishes a typed byte payload while the mouse drags it, and
//! target items may accept it, the smallest hovered target winning.

use bitflags::*;
use log::debug;

use crate::{Color, Context, DrawCornerFlags, Id, ItemStatusFlags, MouseButton, RectExt, Rectf, StyleColor, Window};

bitflags! {
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
    /// Options for the drag and drop calls.
    pub struct DragDropFlags : u32 {
        /// Do not show the preview tooltip while dragging.
        const SOURCE_NO_PREVIEW_TOOLTIP = 1 << 0;
        /// Keep reporting the source item as hovered while it is dragged.
        const SOURCE_NO_DISABLE_HOVER = 1 << 1;
        /// Hovering other items while dragging does not press them.
        const SOURCE_NO_HOLD_TO_OPEN_OTHERS = 1 << 2;
        /// Allow items without id (text, images) to be sources; their id is derived from their rect.
        const SOURCE_ALLOW_NULL_ID = 1 << 3;
        /// The payload comes from outside: no item, always dragging.
        const SOURCE_EXTERN = 1 << 4;
        /// Return the payload every frame it hovers the target, before the mouse is released.
        const ACCEPT_BEFORE_DELIVERY = 1 << 10;
        /// Do not outline the target.
        const ACCEPT_NO_DRAW_DEFAULT_RECT = 1 << 11;
        /// Preview-only acceptance.
        const ACCEPT_PEEK_ONLY = Self::ACCEPT_BEFORE_DELIVERY.bits() | Self::ACCEPT_NO_DRAW_DEFAULT_RECT.bits();
        /// No option.
        const NONE = 0;
    }
}

#[derive(Clone, Debug, Default)]
/// Data carried by a drag.
pub struct DragDropPayload {
    /// User type tag, compared by [`Context::accept_drag_drop_payload`].
    pub data_type: String,
    /// Payload bytes.
    pub data: Vec<u8>,
    /// Item the drag started from.
    pub source_id: Id,
    /// Id scope of the source item.
    pub source_parent_id: Id,
    /// Frame the payload was last set.
    pub data_frame_count: Option<u64>,
    /// The target accepted the payload last frame and is drawing its preview.
    pub preview: bool,
    /// The mouse was released over an accepting target.
    pub delivery: bool,
}

impl DragDropPayload {
    /// Whether the payload carries `data_type`.
    pub fn is_data_type(&self, data_type: &str) -> bool { self.data_frame_count.is_some() && self.data_type == data_type }

    fn clear(&mut self) { *self = Self::default(); }
}

#[derive(Debug)]
pub(crate) struct DragDropState {
    pub(crate) active: bool,
    pub(crate) source_flags: DragDropFlags,
    pub(crate) mouse_button: MouseButton,
    pub(crate) payload: DragDropPayload,
    pub(crate) target_rect: Rectf,
    pub(crate) target_id: Id,
    pub(crate) accept_id_curr: Id,
    pub(crate) accept_id_prev: Id,
    pub(crate) accept_id_curr_rect_surface: f32,
    pub(crate) accept_frame_count: Option<u64>,
    pub(crate) source_frame_count: Option<u64>,
}

impl Default for DragDropState {
    fn default() -> Self {
        Self {
            active: false,
            source_flags: DragDropFlags::NONE,
            mouse_button: MouseButton::Left,
            payload: DragDropPayload::default(),
            target_rect: Rectf::default(),
            target_id: Id::NONE,
            accept_id_curr: Id::NONE,
            accept_id_prev: Id::NONE,
            accept_id_curr_rect_surface: f32::MAX,
            accept_frame_count: None,
            source_frame_count: None,
        }
    }
}

impl DragDropState {
    fn clear(&mut self) {
        self.active = false;
        self.payload.clear();
        self.accept_id_curr = Id::NONE;
        self.accept_id_curr_rect_surface = f32::MAX;
        self.accept_frame_count = None;
    }
}

impl Window {
    /// Id derived from a rect relative to the window, for items that have none.
    pub(crate) fn get_id_from_rect(&self, r: Rectf) -> Id {
        let rel = [(r.x - self.pos.x) as i32, (r.y - self.pos.y) as i32, (r.max_pt().x - self.pos.x) as i32, (r.max_pt().y - self.pos.y) as i32];
        let bytes: Vec<u8> = rel.iter().flat_map(|v| v.to_le_bytes()).collect();
        self.id_stack.top().hash_bytes(&bytes)
    }
}

impl Context {
    /// Expires a delivered or abandoned payload and rolls the accept ids. Runs in `new_frame`.
    pub(crate) fn update_drag_drop_frame(&mut self) {
        let dd = &mut self.drag_drop;
        if dd.active {
            let elapsed = dd.payload.data_frame_count.map_or(true, |f| f + 1 < self.frame_count);
            if dd.payload.delivery || elapsed {
                debug!("drag and drop of {:?} ended", dd.payload.source_id);
                dd.clear();
            }
        }
        dd.accept_id_prev = dd.accept_id_curr;
        dd.accept_id_curr = Id::NONE;
        dd.accept_id_curr_rect_surface = f32::MAX;
    }

    /// Whether a drag is in progress.
    pub fn is_drag_drop_active(&self) -> bool { self.drag_drop.active }

    /// Starts (or continues) a drag from the last item, held with the left button. Returns true while the item is
    /// being dragged; then call [`Context::set_drag_drop_payload`] and [`Context::end_drag_drop_source`].
    pub fn begin_drag_drop_source(&mut self, flags: DragDropFlags) -> bool {
        let button = MouseButton::Left;
        let wid = self.cw_id();
        let (source_id, source_parent_id, dragging) = if flags.contains(DragDropFlags::SOURCE_EXTERN) {
            (Id::from_name("#SourceExtern"), Id::NONE, true)
        } else {
            let mut source_id = self.cw().dc.last_item.id;
            if source_id.is_some() && self.active_id != source_id {
                return false;
            }
            if !self.input.is_mouse_down(button) {
                return false;
            }
            if source_id.is_none() {
                if !flags.contains(DragDropFlags::SOURCE_ALLOW_NULL_ID) {
                    debug_assert!(false, "drag source without id needs SOURCE_ALLOW_NULL_ID");
                    return false;
                }
                let last = self.cw().dc.last_item;
                let hovered = last.status.contains(ItemStatusFlags::HOVERED_RECT);
                if !hovered && (self.active_id.is_none() || self.active_id_window != Some(wid)) {
                    return false;
                }
                source_id = self.cw().get_id_from_rect(last.rect);
                self.cw_mut().dc.last_item.id = source_id;
                if hovered {
                    self.set_hovered_id(source_id);
                    if self.input.is_mouse_clicked(button, false) {
                        self.set_active_id(source_id, Some(wid));
                        self.focus_window(Some(wid));
                    }
                }
                if self.active_id == source_id {
                    self.active_id_allow_overlap = hovered;
                }
            }
            if self.active_id != source_id {
                return false;
            }
            let threshold = self.config.mouse_drag_threshold;
            (source_id, self.cw().id_stack.top(), self.input.is_mouse_dragging(button, threshold))
        };
        if !dragging {
            return false;
        }

        if !self.drag_drop.active {
            self.drag_drop.clear();
            self.drag_drop.payload.source_id = source_id;
            self.drag_drop.payload.source_parent_id = source_parent_id;
            self.drag_drop.active = true;
            self.drag_drop.source_flags = flags;
            self.drag_drop.mouse_button = button;
            debug!("drag and drop started from {:?}", source_id);
        }
        self.drag_drop.source_frame_count = Some(self.frame_count);
        if !flags.contains(DragDropFlags::SOURCE_NO_PREVIEW_TOOLTIP) {
            let bg = self.style.colors[StyleColor::PopupBg as usize];
            let bg = Color { a: (bg.a as f32 * 0.6) as u8, ..bg };
            self.push_style_color(StyleColor::PopupBg, bg);
            self.begin_tooltip();
        }
        if !flags.intersects(DragDropFlags::SOURCE_NO_DISABLE_HOVER | DragDropFlags::SOURCE_EXTERN) {
            self.win_mut(wid).dc.last_item.status.remove(ItemStatusFlags::HOVERED_RECT);
        }
        true
    }

    /// Sets the dragged data. Returns true when a target accepted it this frame or the last.
    pub fn set_drag_drop_payload(&mut self, data_type: &str, data: &[u8]) -> bool {
        let frame = self.frame_count;
        let dd = &mut self.drag_drop;
        debug_assert!(dd.payload.source_id.is_some(), "set_drag_drop_payload() outside a drag source");
        dd.payload.data_type.clear();
        dd.payload.data_type.push_str(data_type);
        dd.payload.data.clear();
        dd.payload.data.extend_from_slice(data);
        dd.payload.data_frame_count = Some(frame);
        dd.accept_frame_count.is_some_and(|f| f + 1 >= frame)
    }

    /// Closes a source opened by [`Context::begin_drag_drop_source`]. A drag without payload is dropped.
    pub fn end_drag_drop_source(&mut self) {
        debug_assert!(self.drag_drop.active, "end_drag_drop_source() without an active drag");
        if !self.drag_drop.source_flags.contains(DragDropFlags::SOURCE_NO_PREVIEW_TOOLTIP) {
            self.end_tooltip();
            self.pop_style_color(1);
        }
        if self.drag_drop.payload.data_frame_count.is_none() {
            self.drag_drop.clear();
        }
    }

    /// Makes the last item a drop target while a drag hovers it. Pair with [`Context::end_drag_drop_target`].
    pub fn begin_drag_drop_target(&mut self) -> bool {
        if !self.drag_drop.active {
            return false;
        }
        let w = self.cw();
        let last = w.dc.last_item;
        if !last.status.contains(ItemStatusFlags::HOVERED_RECT) {
            return false;
        }
        match self.hovered_window {
            Some(h) if self.win(h).root_window == w.root_window => (),
            _ => return false,
        }
        let id = if last.id.is_some() { last.id } else { w.get_id_from_rect(last.rect) };
        if self.drag_drop.payload.source_id == id {
            return false;
        }
        self.drag_drop.target_rect = last.rect;
        self.drag_drop.target_id = id;
        true
    }

    /// Returns the payload if it has `data_type` and was dropped here (or, with `ACCEPT_BEFORE_DELIVERY`, is
    /// hovering here). Outlines the target while previewing.
    pub fn accept_drag_drop_payload(&mut self, data_type: &str, flags: DragDropFlags) -> Option<&DragDropPayload> {
        debug_assert!(self.drag_drop.active && self.drag_drop.payload.data_frame_count.is_some());
        if !self.drag_drop.payload.is_data_type(data_type) {
            return None;
        }
        let was_accepted_previously = self.drag_drop.accept_id_prev == self.drag_drop.target_id;
        let r = self.drag_drop.target_rect;
        let surface = r.width * r.height;
        if surface < self.drag_drop.accept_id_curr_rect_surface {
            self.drag_drop.accept_id_curr = self.drag_drop.target_id;
            self.drag_drop.accept_id_curr_rect_surface = surface;
        }

        self.drag_drop.payload.preview = was_accepted_previously;
        let flags = flags | (self.drag_drop.source_flags & DragDropFlags::ACCEPT_NO_DRAW_DEFAULT_RECT);
        if !flags.contains(DragDropFlags::ACCEPT_NO_DRAW_DEFAULT_RECT) && was_accepted_previously {
            let r = r.expand(3.5, 3.5);
            let col = self.style.color(StyleColor::DragDropTarget, 1.0);
            let w = self.cw_mut();
            let push = !w.clip_rect.contains_rect(&r);
            if push {
                w.draw_list.push_clip_rect_full_screen();
            }
            w.draw_list.add_rect(r.min_pt(), r.max_pt(), col, 0.0, DrawCornerFlags::ALL, 2.0);
            if push {
                w.draw_list.pop_clip_rect();
            }
        }
        self.drag_drop.accept_frame_count = Some(self.frame_count);
        let button = self.drag_drop.mouse_button;
        self.drag_drop.payload.delivery = was_accepted_previously && !self.input.is_mouse_down(button);
        if !self.drag_drop.payload.delivery && !flags.contains(DragDropFlags::ACCEPT_BEFORE_DELIVERY) {
            return None;
        }
        Some(&self.drag_drop.payload)
    }

    /// Closes a target opened by [`Context::begin_drag_drop_target`].
    pub fn end_drag_drop_target(&mut self) { debug_assert!(self.drag_drop.active, "end_drag_drop_target() without an active drag"); }

    /// The payload of the drag in progress.
    pub fn drag_drop_payload(&self) -> Option<&DragDropPayload> { self.drag_drop.active.then_some(&self.drag_drop.payload) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{context, run_frame};
    use crate::{vec2, Cond, WindowFlags};

    /// Source button at y 8, target button at y 31. Returns the bytes delivered to the target, if any.
    fn frame(ctx: &mut Context) -> Option<Vec<u8>> {
        let mut delivered = None;
        run_frame(ctx, |ui| {
            ui.set_next_window_pos(vec2(0.0, 0.0), Cond::Always, vec2(0.0, 0.0));
            ui.set_next_window_size(vec2(300.0, 200.0), Cond::Always);
            ui.window("DnD", WindowFlags::NO_TITLE_BAR, |ui| {
                ui.button("Src");
                if ui.begin_drag_drop_source(DragDropFlags::NONE) {
                    ui.set_drag_drop_payload("color", &[1, 2, 3]);
                    ui.end_drag_drop_source();
                }
                ui.button("Dst");
                if ui.begin_drag_drop_target() {
                    delivered = ui.accept_drag_drop_payload("color", DragDropFlags::NONE).map(|p| p.data.clone());
                    ui.end_drag_drop_target();
                }
            });
        });
        delivered
    }

    #[test]
    fn drop_delivers_on_release_over_the_target() {
        let mut ctx = context();
        frame(&mut ctx);
        ctx.io_mut().mouse_down(12.0, 12.0, MouseButton::Left);
        frame(&mut ctx);
        assert!(!ctx.is_drag_drop_active());

        ctx.io_mut().mouse_move(12.0, 40.0);
        assert_eq!(frame(&mut ctx), None);
        assert!(ctx.is_drag_drop_active());
        assert_eq!(ctx.drag_drop_payload().map(|p| p.data_type.as_str()), Some("color"));

        ctx.io_mut().mouse_up(12.0, 40.0, MouseButton::Left);
        assert_eq!(frame(&mut ctx), Some(vec![1, 2, 3]));
        frame(&mut ctx);
        assert!(!ctx.is_drag_drop_active());
    }

    #[test]
    fn release_away_from_targets_drops_nothing() {
        let mut ctx = context();
        frame(&mut ctx);
        ctx.io_mut().mouse_down(12.0, 12.0, MouseButton::Left);
        frame(&mut ctx);
        ctx.io_mut().mouse_move(150.0, 150.0);
        frame(&mut ctx);
        assert!(ctx.is_drag_drop_active());
        ctx.io_mut().mouse_up(150.0, 150.0, MouseButton::Left);
        assert_eq!(frame(&mut ctx), None);
        frame(&mut ctx);
        frame(&mut ctx);
        assert!(!ctx.is_drag_drop_active());
    }

    #[test]
    fn type_mismatch_is_ignored() {
        let mut payload = DragDropPayload::default();
        assert!(!payload.is_data_type("color"));
        payload.data_type.push_str("color");
        payload.data_frame_count = Some(3);
        assert!(payload.is_data_type("color"));
        assert!(!payload.is_data_type("colour"));
    }
}
