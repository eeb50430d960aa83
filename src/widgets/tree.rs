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
//! Tree nodes and collapsing headers. Open state lives in the window's int storage under the node id.

use bitflags::bitflags;

use crate::{add2, find_rendered_text_end, rect_min_max, vec2, ButtonFlags, Cond, Context, Dir, Id, RectExt, StyleColor};

bitflags! {
    /// Tree node options.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
    pub struct TreeNodeFlags: u32 {
        /// Drawn highlighted.
        const SELECTED = 1 << 0;
        /// Full frame behind the label, as collapsing headers have.
        const FRAMED = 1 << 1;
        /// Later items may overlap the hit box.
        const ALLOW_ITEM_OVERLAP = 1 << 2;
        /// An open node does not indent nor push the id stack.
        const NO_TREE_PUSH_ON_OPEN = 1 << 3;
        /// Kept for parity with logging front ends; no effect here.
        const NO_AUTO_OPEN_ON_LOG = 1 << 4;
        /// Open the first time it is shown.
        const DEFAULT_OPEN = 1 << 5;
        /// Toggles on double-click only.
        const OPEN_ON_DOUBLE_CLICK = 1 << 6;
        /// Toggles only from the arrow (or double-click with `OPEN_ON_DOUBLE_CLICK`).
        const OPEN_ON_ARROW = 1 << 7;
        /// No arrow and always open.
        const LEAF = 1 << 8;
        /// Bullet instead of the arrow.
        const BULLET = 1 << 9;
        /// Unframed node padded to regular widget height.
        const FRAME_PADDING = 1 << 10;
        /// No option.
        const NONE = 0;
        /// Flags of a collapsing header.
        const COLLAPSING_HEADER = Self::FRAMED.bits() | Self::NO_AUTO_OPEN_ON_LOG.bits();
    }
}

impl Context {
    /// Forces the open state of the next tree node or header.
    pub fn set_next_tree_node_open(&mut self, open: bool, cond: Cond) {
        if self.cw().skip_items {
            return;
        }
        self.next_tree_node_open = Some((open, cond));
    }

    fn tree_node_is_open(&mut self, id: Id, flags: TreeNodeFlags) -> bool {
        if flags.contains(TreeNodeFlags::LEAF) {
            return true;
        }
        match self.next_tree_node_open.take() {
            Some((open, Cond::Always)) => {
                self.cw_mut().set_int(id, open as i32);
                open
            }
            Some((open, Cond::Appearing)) if self.cw().appearing => {
                self.cw_mut().set_int(id, open as i32);
                open
            }
            // storage is not persisted, so once and first-use-ever behave alike
            Some((open, _)) => {
                let stored = self.cw().get_int(id, -1);
                if stored == -1 {
                    self.cw_mut().set_int(id, open as i32);
                    open
                } else {
                    stored != 0
                }
            }
            None => self.cw().get_int(id, flags.contains(TreeNodeFlags::DEFAULT_OPEN) as i32) != 0,
        }
    }

    /// Indents and pushes `id` raw on the id stack.
    fn tree_push_raw(&mut self, id: Id) {
        self.indent(0.0);
        let w = self.cw_mut();
        w.dc.tree_depth += 1;
        w.id_stack.push_raw(id);
    }

    /// Node interaction and drawing for item `id`; returns whether the node is open.
    pub fn tree_node_behavior(&mut self, id: Id, flags: TreeNodeFlags, label: &str) -> bool {
        let label = find_rendered_text_end(label);
        let framed = flags.contains(TreeNodeFlags::FRAMED);
        let fp = self.style.frame_padding;
        let padding = if framed || flags.contains(TreeNodeFlags::FRAME_PADDING) { fp } else { vec2(fp.x, 0.0) };
        let (font_size, spacing, rounding) = (self.font_size, self.style.item_spacing, self.style.frame_rounding);
        let label_size = self.calc_text_size(label, false, -1.0);

        let content_max_x = self.get_content_region_max().x;
        let w = self.cw();
        let text_base_offset_y = padding.y.max(w.dc.current_line_text_base_offset);
        let frame_height = w.dc.current_line_height.min(font_size + fp.y * 2.0).max(label_size.y + padding.y * 2.0);
        let cursor = w.dc.cursor_pos;
        let mut frame_bb = rect_min_max(cursor, vec2(w.pos.x + content_max_x, cursor.y + frame_height));
        if framed {
            let half = (w.window_padding.x * 0.5).trunc() - 1.0;
            frame_bb = rect_min_max(vec2(frame_bb.x - half, frame_bb.y), vec2(frame_bb.max_pt().x + half, frame_bb.max_pt().y));
        }
        let text_offset_x = font_size + if framed { padding.x * 3.0 } else { padding.x * 2.0 };
        let text_width = font_size + if label_size.x > 0.0 { label_size.x + padding.x * 2.0 } else { 0.0 };
        self.item_size(vec2(text_width, frame_height), text_base_offset_y);

        // plain nodes accept clicks a little past the label
        let interact_bb = if framed {
            frame_bb
        } else {
            rect_min_max(frame_bb.min_pt(), vec2(frame_bb.x + text_width + spacing.x * 2.0, frame_bb.max_pt().y))
        };
        let mut is_open = self.tree_node_is_open(id, flags);
        let push = is_open && !flags.contains(TreeNodeFlags::NO_TREE_PUSH_ON_OPEN);

        if !self.item_add(interact_bb, id) {
            if push {
                self.tree_push_raw(id);
            }
            return is_open;
        }

        let mut button_flags = ButtonFlags::NO_KEY_MODIFIERS;
        if flags.contains(TreeNodeFlags::ALLOW_ITEM_OVERLAP) {
            button_flags |= ButtonFlags::ALLOW_ITEM_OVERLAP;
        }
        if !flags.contains(TreeNodeFlags::LEAF) {
            button_flags |= ButtonFlags::PRESSED_ON_DRAG_DROP_HOLD;
        }
        if flags.contains(TreeNodeFlags::OPEN_ON_DOUBLE_CLICK) {
            button_flags |= ButtonFlags::PRESSED_ON_DOUBLE_CLICK;
            if flags.contains(TreeNodeFlags::OPEN_ON_ARROW) {
                button_flags |= ButtonFlags::PRESSED_ON_CLICK_RELEASE;
            }
        }
        let (hovered, held, pressed) = self.button_behavior(interact_bb, id, button_flags);

        if !flags.contains(TreeNodeFlags::LEAF) {
            let mut toggled = false;
            if pressed {
                toggled = !flags.intersects(TreeNodeFlags::OPEN_ON_ARROW | TreeNodeFlags::OPEN_ON_DOUBLE_CLICK) || self.nav_activate_id == id;
                if flags.contains(TreeNodeFlags::OPEN_ON_ARROW) {
                    let arrow_max = vec2(interact_bb.x + text_offset_x, interact_bb.max_pt().y);
                    toggled |= self.is_mouse_hovering_rect(interact_bb.min_pt(), arrow_max, true) && !self.nav_disable_mouse_hover;
                }
                if flags.contains(TreeNodeFlags::OPEN_ON_DOUBLE_CLICK) {
                    toggled |= self.input.is_mouse_double_clicked(crate::MouseButton::Left);
                }
                // hold-to-open while dragging never closes the node again
                if self.drag_drop.active && is_open {
                    toggled = false;
                }
            }
            if self.nav_id == id && self.active_id.is_none() {
                let amount = self.nav_input_amount;
                if (amount < 0.0 && is_open) || (amount > 0.0 && !is_open) {
                    toggled = true;
                }
            }
            if toggled {
                is_open = !is_open;
                self.cw_mut().set_int(id, is_open as i32);
            }
        }
        if flags.contains(TreeNodeFlags::ALLOW_ITEM_OVERLAP) {
            self.set_item_allow_overlap();
        }

        let idx = if held && hovered {
            StyleColor::HeaderActive
        } else if hovered {
            StyleColor::HeaderHovered
        } else {
            StyleColor::Header
        };
        let text_pos = add2(frame_bb.min_pt(), vec2(text_offset_x, text_base_offset_y));
        let dir = if is_open { Dir::Down } else { Dir::Right };
        let (fmin, fmax) = (frame_bb.min_pt(), frame_bb.max_pt());
        if framed {
            {
                let mut p = self.painter();
                let col = p.col(idx);
                p.render_frame(fmin, fmax, col, true, rounding);
            }
            self.render_nav_highlight(frame_bb, id);
            let mut p = self.painter();
            p.render_arrow(add2(fmin, vec2(padding.x, text_base_offset_y)), dir, 1.0);
            p.render_text_clipped(text_pos, fmax, label, Some(label_size), vec2(0.0, 0.0), None);
        } else {
            if hovered || flags.contains(TreeNodeFlags::SELECTED) {
                {
                    let mut p = self.painter();
                    let col = p.col(idx);
                    p.render_frame(fmin, fmax, col, false, 0.0);
                }
                self.render_nav_highlight(frame_bb, id);
            }
            let mut p = self.painter();
            if flags.contains(TreeNodeFlags::BULLET) {
                p.render_bullet(add2(fmin, vec2(text_offset_x * 0.5, font_size * 0.5 + text_base_offset_y)));
            } else if !flags.contains(TreeNodeFlags::LEAF) {
                p.render_arrow(add2(fmin, vec2(padding.x, font_size * 0.15 + text_base_offset_y)), dir, 0.70);
            }
            p.render_text(text_pos, label, false);
        }

        if push {
            self.tree_push_raw(id);
        }
        is_open
    }

    /// Tree node labelled `label`. When it returns true the node is open and indented: call
    /// [`Context::tree_pop`] after its children.
    pub fn tree_node(&mut self, label: &str) -> bool { self.tree_node_ex(label, TreeNodeFlags::NONE) }

    /// [`Context::tree_node`] with options.
    pub fn tree_node_ex(&mut self, label: &str, flags: TreeNodeFlags) -> bool {
        if self.cw().skip_items {
            return false;
        }
        let id = self.get_id(label);
        self.tree_node_behavior(id, flags, label)
    }

    /// Indents and pushes `str_id` (or a fixed id) like an open tree node would.
    pub fn tree_push(&mut self, str_id: Option<&str>) {
        self.indent(0.0);
        self.cw_mut().dc.tree_depth += 1;
        self.push_id(str_id.unwrap_or("#TreePush"));
    }

    /// Closes an open tree node or a [`Context::tree_push`].
    pub fn tree_pop(&mut self) {
        self.unindent(0.0);
        let w = self.cw_mut();
        w.dc.tree_depth = w.dc.tree_depth.saturating_sub(1);
        self.pop_id();
    }

    /// Framed header spanning the window; returns whether it is open. Nothing is pushed when open.
    pub fn collapsing_header(&mut self, label: &str, flags: TreeNodeFlags) -> bool {
        if self.cw().skip_items {
            return false;
        }
        let id = self.get_id(label);
        self.tree_node_behavior(id, flags | TreeNodeFlags::COLLAPSING_HEADER | TreeNodeFlags::NO_TREE_PUSH_ON_OPEN, label)
    }

    /// Collapsing header with a close button on its right end; the button clears `open`. A closed header is not
    /// submitted.
    pub fn collapsing_header_closable(&mut self, label: &str, open: &mut bool, flags: TreeNodeFlags) -> bool {
        if self.cw().skip_items || !*open {
            return false;
        }
        let id = self.get_id(label);
        let flags = flags | TreeNodeFlags::ALLOW_ITEM_OVERLAP | TreeNodeFlags::COLLAPSING_HEADER | TreeNodeFlags::NO_TREE_PUSH_ON_OPEN;
        let is_open = self.tree_node_behavior(id, flags, label);

        let radius = self.font_size * 0.5;
        let pad = self.style.frame_padding;
        let w = self.cw();
        let item = w.dc.last_item.rect;
        let center = vec2(item.max_pt().x.min(w.clip_rect.max_pt().x) - pad.x - radius, item.y + pad.y + radius);
        let close_id = Id(id.0.wrapping_add(1));
        if self.with_last_item_preserved(|ui| ui.close_button(close_id, center, radius)) {
            *open = false;
        }
        is_open
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{context, run_frame};
    use crate::{MouseButton, WindowFlags};

    fn frame<R>(ctx: &mut Context, f: impl FnOnce(&mut Context) -> R) -> R {
        let mut out = None;
        run_frame(ctx, |ui| {
            ui.set_next_window_pos(vec2(0.0, 0.0), Cond::Always, vec2(0.0, 0.0));
            ui.set_next_window_size(vec2(300.0, 200.0), Cond::Always);
            ui.window("Tree", WindowFlags::NO_TITLE_BAR, |ui| out = Some(f(ui)));
        });
        out.expect("window content ran")
    }

    fn node(ui: &mut Context) -> (bool, f32) {
        let open = ui.tree_node("root");
        let mut child_x = 0.0;
        if open {
            ui.text("leaf");
            child_x = ui.last_item_rect().x;
            ui.tree_pop();
        }
        (open, child_x)
    }

    #[test]
    fn clicking_toggles_and_children_indent() {
        let mut ctx = context();
        assert_eq!(frame(&mut ctx, node), (false, 0.0));
        ctx.io_mut().mouse_down(20.0, 12.0, MouseButton::Left);
        frame(&mut ctx, node);
        ctx.io_mut().mouse_up(20.0, 12.0, MouseButton::Left);
        let (open, _) = frame(&mut ctx, node);
        assert!(open);
        let (open, x) = frame(&mut ctx, node);
        assert!(open);
        assert_eq!(x, 8.0 + ctx.style().indent_spacing);
        assert_eq!(ctx.window_by_id(Id::from_name("Tree")).map(|w| w.dc().tree_depth()), Some(0));
    }

    #[test]
    fn next_open_state_applies_once() {
        let mut ctx = context();
        let open = frame(&mut ctx, |ui| {
            ui.set_next_tree_node_open(true, Cond::Once);
            let open = ui.tree_node("n");
            if open {
                ui.tree_pop();
            }
            open
        });
        assert!(open);
        let open = frame(&mut ctx, |ui| {
            ui.set_next_tree_node_open(false, Cond::Once);
            let open = ui.tree_node("n");
            if open {
                ui.tree_pop();
            }
            open
        });
        assert!(open);
    }

    #[test]
    fn always_forces_the_state_every_time() {
        let mut ctx = context();
        let forced = |open: bool| {
            move |ui: &mut Context| {
                ui.set_next_tree_node_open(open, Cond::Always);
                let shown = ui.tree_node("forced");
                if shown {
                    ui.tree_pop();
                }
                shown
            }
        };
        assert!(frame(&mut ctx, forced(true)));
        assert!(!frame(&mut ctx, forced(false)));
        assert!(frame(&mut ctx, forced(true)));
        // the forced state is stored, so it survives frames without a request
        assert!(frame(&mut ctx, |ui| {
            let shown = ui.tree_node("forced");
            if shown {
                ui.tree_pop();
            }
            shown
        }));
    }

    #[test]
    fn headers_do_not_indent() {
        let mut ctx = context();
        let x = frame(&mut ctx, |ui| {
            ui.set_next_tree_node_open(true, Cond::Always);
            assert!(ui.collapsing_header("Section", TreeNodeFlags::NONE));
            ui.text("body");
            ui.last_item_rect().x
        });
        assert_eq!(x, 8.0);
    }

    #[test]
    fn close_button_clears_open() {
        let mut ctx = context();
        let mut visible = true;
        let show = |ui: &mut Context, visible: &mut bool| {
            ui.collapsing_header_closable("Panel", visible, TreeNodeFlags::NONE);
        };
        frame(&mut ctx, |ui| show(ui, &mut visible));
        // the button sits at the right end of the header row: 300 - 8 + 3 = 295 is the frame edge
        let (cx, cy) = (295.0 - 4.0 - 6.5, 8.0 + 3.0 + 6.5);
        ctx.io_mut().mouse_down(cx, cy, MouseButton::Left);
        frame(&mut ctx, |ui| show(ui, &mut visible));
        ctx.io_mut().mouse_up(cx, cy, MouseButton::Left);
        frame(&mut ctx, |ui| show(ui, &mut visible));
        assert!(!visible);
    }
}
