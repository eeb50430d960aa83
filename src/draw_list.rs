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
//! Triangle lists batched per clip rect and texture. Widgets append shapes to a window's [`DrawList`] and the host
//! renders the lists gathered in [`DrawData`].

use std::fmt::{Debug, Formatter};
use std::rc::Rc;

use bitflags::*;
use log::warn;

use crate::{add2 as add, mul2 as mul, sub2 as sub, vec2, Color, GlyphProvider, TextureId, Vec2f};

/// Index type of the index buffer.
pub type DrawIdx = u32;

#[derive(Copy, Clone, Debug, Default)]
#[repr(C)]
/// A single vertex.
pub struct DrawVert {
    /// Position in display coordinates.
    pub pos: Vec2f,
    /// Texture coordinates.
    pub uv: Vec2f,
    /// Vertex color.
    pub col: Color,
}

#[derive(Copy, Clone, Debug, Default, PartialEq)]
/// Scissor rectangle in display coordinates, stored as min/max corners.
pub struct ClipRect {
    /// Left edge.
    pub x1: f32,
    /// Top edge.
    pub y1: f32,
    /// Right edge.
    pub x2: f32,
    /// Bottom edge.
    pub y2: f32,
}

impl ClipRect {
    /// Clip rect that covers any realistic display.
    pub const NULL: ClipRect = ClipRect { x1: -8192.0, y1: -8192.0, x2: 8192.0, y2: 8192.0 };

    /// Builds a clip rect from its corners.
    pub fn new(min: Vec2f, max: Vec2f) -> Self { Self { x1: min.x, y1: min.y, x2: max.x, y2: max.y } }
}

#[derive(Clone)]
/// Host callback invoked by the renderer in place of a draw command.
pub struct DrawCallback(pub Rc<dyn Fn(&DrawList, &DrawCmd)>);

impl Debug for DrawCallback {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result { f.write_str("DrawCallback") }
}

#[derive(Clone, Debug)]
/// What a draw command samples from, or the callback it runs instead.
pub enum TextureRef {
    /// Draw the command's triangles with this texture bound.
    Texture(TextureId),
    /// Run the callback. The command holds no triangles.
    Callback(DrawCallback),
}

impl TextureRef {
    fn is_callback(&self) -> bool { matches!(self, TextureRef::Callback(_)) }

    fn same_texture(&self, tex: TextureId) -> bool { matches!(self, TextureRef::Texture(t) if *t == tex) }
}

#[derive(Clone, Debug)]
/// A run of indices sharing one clip rect and texture.
pub struct DrawCmd {
    /// Number of indices, a multiple of 3.
    pub elem_count: u32,
    /// First index in the index buffer.
    pub idx_offset: u32,
    /// Base vertex the indices of this command are relative to.
    pub vtx_offset: u32,
    /// Scissor rectangle.
    pub clip_rect: ClipRect,
    /// Texture or callback.
    pub texture: TextureRef,
}

bitflags! {
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
    /// Tessellation options of a draw list.
    pub struct DrawListFlags : u32 {
        /// Anti-alias strokes.
        const ANTI_ALIASED_LINES = 1;
        /// Anti-alias filled convex shapes.
        const ANTI_ALIASED_FILL = 2;
        /// Plain tessellation.
        const NONE = 0;
    }
}

bitflags! {
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
    /// Corners affected by rounding.
    pub struct DrawCornerFlags : u32 {
        /// Top left corner.
        const TOP_LEFT = 1;
        /// Top right corner.
        const TOP_RIGHT = 2;
        /// Bottom left corner.
        const BOT_LEFT = 4;
        /// Bottom right corner.
        const BOT_RIGHT = 8;
        /// Both top corners.
        const TOP = 1 | 2;
        /// Both bottom corners.
        const BOT = 4 | 8;
        /// Both left corners.
        const LEFT = 1 | 4;
        /// Both right corners.
        const RIGHT = 2 | 8;
        /// Every corner.
        const ALL = 0xF;
        /// No rounding.
        const NONE = 0;
    }
}

fn normalized(d: Vec2f) -> Vec2f {
    let len2 = d.x * d.x + d.y * d.y;
    if len2 > 0.0 { mul(d, 1.0 / len2.sqrt()) } else { d }
}

/// Averaged miter normal, its length capped so sharp angles do not explode.
fn miter(n0: Vec2f, n1: Vec2f) -> Vec2f {
    let dm = mul(add(n0, n1), 0.5);
    let dmr2 = dm.x * dm.x + dm.y * dm.y;
    if dmr2 > 0.000001 { mul(dm, (1.0 / dmr2).min(100.0)) } else { dm }
}

const AA_SIZE: f32 = 1.0;

#[derive(Clone, Debug)]
/// Command, index and vertex buffers of one window, plus the path and clip/texture stacks used to build them.
pub struct DrawList {
    /// Draw commands, in submission order.
    pub cmd_buffer: Vec<DrawCmd>,
    /// Index buffer, relative to each command's `vtx_offset`.
    pub idx_buffer: Vec<DrawIdx>,
    /// Vertex buffer.
    pub vtx_buffer: Vec<DrawVert>,
    /// Tessellation options.
    pub flags: DrawListFlags,
    owner: String,
    vtx_current_idx: u32,
    clip_rect_stack: Vec<ClipRect>,
    texture_id_stack: Vec<TextureId>,
    path: Vec<Vec2f>,
    white_uv: Vec2f,
    circle_vtx12: [Vec2f; 12],
}

impl Default for DrawList {
    fn default() -> Self { Self::new("") }
}

impl DrawList {
    /// Creates an empty list. `owner` is kept for debugging.
    pub fn new(owner: &str) -> Self {
        let mut circle_vtx12 = [vec2(0.0, 0.0); 12];
        for (i, v) in circle_vtx12.iter_mut().enumerate() {
            let a = i as f32 * 2.0 * std::f32::consts::PI / 12.0;
            *v = vec2(a.cos(), a.sin());
        }
        Self {
            cmd_buffer: Vec::new(),
            idx_buffer: Vec::new(),
            vtx_buffer: Vec::new(),
            flags: DrawListFlags::ANTI_ALIASED_LINES | DrawListFlags::ANTI_ALIASED_FILL,
            owner: owner.to_string(),
            vtx_current_idx: 0,
            clip_rect_stack: Vec::new(),
            texture_id_stack: Vec::new(),
            path: Vec::new(),
            white_uv: vec2(0.0, 0.0),
            circle_vtx12,
        }
    }

    /// Name of the window owning this list.
    pub fn owner(&self) -> &str { &self.owner }

    /// Drops every command, vertex, index and stack entry.
    pub fn clear(&mut self) {
        self.cmd_buffer.clear();
        self.idx_buffer.clear();
        self.vtx_buffer.clear();
        self.vtx_current_idx = 0;
        self.clip_rect_stack.clear();
        self.texture_id_stack.clear();
        self.path.clear();
    }

    /// Sets the texture coordinates of an opaque white texel used by untextured shapes.
    pub fn set_white_uv(&mut self, uv: Vec2f) { self.white_uv = uv; }

    /// Returns `true` when no triangle has been emitted.
    pub fn is_empty(&self) -> bool { self.idx_buffer.is_empty() && !self.cmd_buffer.iter().any(|c| c.texture.is_callback()) }

    /// Clip rect currently applied to new primitives.
    pub fn current_clip_rect(&self) -> ClipRect { self.clip_rect_stack.last().copied().unwrap_or(ClipRect::NULL) }

    /// Texture currently applied to new primitives.
    pub fn current_texture_id(&self) -> TextureId { self.texture_id_stack.last().copied().unwrap_or_default() }

    fn add_draw_cmd(&mut self) {
        let clip_rect = self.current_clip_rect();
        debug_assert!(clip_rect.x1 <= clip_rect.x2 && clip_rect.y1 <= clip_rect.y2);
        self.cmd_buffer.push(DrawCmd {
            elem_count: 0,
            idx_offset: self.idx_buffer.len() as u32,
            vtx_offset: self.vtx_buffer.len() as u32,
            clip_rect,
            texture: TextureRef::Texture(self.current_texture_id()),
        });
    }

    fn update_clip_rect(&mut self) {
        let clip = self.current_clip_rect();
        let tex = self.current_texture_id();
        let n = self.cmd_buffer.len();
        let needs_new = match self.cmd_buffer.last() {
            None => true,
            Some(cmd) => (cmd.elem_count != 0 && cmd.clip_rect != clip) || cmd.texture.is_callback(),
        };
        if needs_new {
            self.add_draw_cmd();
            return;
        }
        let merge = n > 1 && {
            let prev = &self.cmd_buffer[n - 2];
            self.cmd_buffer[n - 1].elem_count == 0 && prev.clip_rect == clip && prev.texture.same_texture(tex)
        };
        if merge {
            self.cmd_buffer.pop();
        } else if let Some(cmd) = self.cmd_buffer.last_mut() {
            cmd.clip_rect = clip;
        }
    }

    fn update_texture_id(&mut self) {
        let clip = self.current_clip_rect();
        let tex = self.current_texture_id();
        let n = self.cmd_buffer.len();
        let needs_new = match self.cmd_buffer.last() {
            None => true,
            Some(cmd) => (cmd.elem_count != 0 && !cmd.texture.same_texture(tex)) || cmd.texture.is_callback(),
        };
        if needs_new {
            self.add_draw_cmd();
            return;
        }
        let merge = n > 1 && {
            let prev = &self.cmd_buffer[n - 2];
            self.cmd_buffer[n - 1].elem_count == 0 && prev.clip_rect == clip && prev.texture.same_texture(tex)
        };
        if merge {
            self.cmd_buffer.pop();
        } else if let Some(cmd) = self.cmd_buffer.last_mut() {
            cmd.texture = TextureRef::Texture(tex);
        }
    }

    /// Pushes a clip rect, optionally intersected with the current one.
    pub fn push_clip_rect(&mut self, min: Vec2f, max: Vec2f, intersect_with_current: bool) {
        let mut cr = ClipRect::new(min, max);
        if intersect_with_current {
            if let Some(cur) = self.clip_rect_stack.last() {
                cr.x1 = cr.x1.max(cur.x1);
                cr.y1 = cr.y1.max(cur.y1);
                cr.x2 = cr.x2.min(cur.x2);
                cr.y2 = cr.y2.min(cur.y2);
            }
        }
        cr.x2 = cr.x1.max(cr.x2);
        cr.y2 = cr.y1.max(cr.y2);
        self.clip_rect_stack.push(cr);
        self.update_clip_rect();
    }

    /// Pushes a clip rect that covers the whole display.
    pub fn push_clip_rect_full_screen(&mut self) { self.push_clip_rect(vec2(ClipRect::NULL.x1, ClipRect::NULL.y1), vec2(ClipRect::NULL.x2, ClipRect::NULL.y2), false) }

    /// Pops the last pushed clip rect.
    pub fn pop_clip_rect(&mut self) {
        if self.clip_rect_stack.pop().is_none() {
            debug_assert!(false, "pop_clip_rect() on an empty stack");
            warn!("clip rect stack underflow in draw list '{}'", self.owner);
        }
        self.update_clip_rect();
    }

    /// Pushes a texture for the following primitives.
    pub fn push_texture_id(&mut self, tex: TextureId) {
        self.texture_id_stack.push(tex);
        self.update_texture_id();
    }

    /// Pops the last pushed texture.
    pub fn pop_texture_id(&mut self) {
        if self.texture_id_stack.pop().is_none() {
            debug_assert!(false, "pop_texture_id() on an empty stack");
            warn!("texture stack underflow in draw list '{}'", self.owner);
        }
        self.update_texture_id();
    }

    /// Depth of the clip rect stack.
    pub fn clip_rect_depth(&self) -> usize { self.clip_rect_stack.len() }

    /// Appends a callback command followed by a fresh command.
    pub fn add_callback(&mut self, callback: DrawCallback) {
        let needs_new = match self.cmd_buffer.last() {
            None => true,
            Some(cmd) => cmd.elem_count != 0 || cmd.texture.is_callback(),
        };
        if needs_new {
            self.add_draw_cmd();
        }
        if let Some(cmd) = self.cmd_buffer.last_mut() {
            cmd.texture = TextureRef::Callback(callback);
        }
        self.add_draw_cmd();
    }

    /// Reserves room for `idx_count` indices and `vtx_count` vertices in the current command.
    pub fn prim_reserve(&mut self, idx_count: usize, vtx_count: usize) {
        if self.cmd_buffer.last().is_none_or(|c| c.texture.is_callback()) {
            self.add_draw_cmd();
        }
        let vtx_len = self.vtx_buffer.len() as u32;
        if let Some(cmd) = self.cmd_buffer.last_mut() {
            cmd.elem_count += idx_count as u32;
            self.vtx_current_idx = vtx_len - cmd.vtx_offset;
        }
        self.vtx_buffer.reserve(vtx_count);
        self.idx_buffer.reserve(idx_count);
    }

    /// Writes one vertex.
    #[inline]
    pub fn prim_write_vtx(&mut self, pos: Vec2f, uv: Vec2f, col: Color) {
        self.vtx_buffer.push(DrawVert { pos, uv, col });
        self.vtx_current_idx += 1;
    }

    /// Writes one index, relative to the current command's base vertex.
    #[inline]
    pub fn prim_write_idx(&mut self, idx: DrawIdx) { self.idx_buffer.push(idx); }

    /// Axis aligned untextured rectangle. Requires 6 indices and 4 vertices reserved.
    pub fn prim_rect(&mut self, a: Vec2f, c: Vec2f, col: Color) {
        let uv = self.white_uv;
        self.prim_quad_uv(a, vec2(c.x, a.y), c, vec2(a.x, c.y), uv, uv, uv, uv, col);
    }

    /// Axis aligned textured rectangle. Requires 6 indices and 4 vertices reserved.
    pub fn prim_rect_uv(&mut self, a: Vec2f, c: Vec2f, uv_a: Vec2f, uv_c: Vec2f, col: Color) {
        self.prim_quad_uv(a, vec2(c.x, a.y), c, vec2(a.x, c.y), uv_a, vec2(uv_c.x, uv_a.y), uv_c, vec2(uv_a.x, uv_c.y), col);
    }

    /// Arbitrary textured quad. Requires 6 indices and 4 vertices reserved.
    #[allow(clippy::too_many_arguments)]
    pub fn prim_quad_uv(&mut self, a: Vec2f, b: Vec2f, c: Vec2f, d: Vec2f, uv_a: Vec2f, uv_b: Vec2f, uv_c: Vec2f, uv_d: Vec2f, col: Color) {
        let i = self.vtx_current_idx;
        for idx in [i, i + 1, i + 2, i, i + 2, i + 3] {
            self.prim_write_idx(idx);
        }
        self.prim_write_vtx(a, uv_a, col);
        self.prim_write_vtx(b, uv_b, col);
        self.prim_write_vtx(c, uv_c, col);
        self.prim_write_vtx(d, uv_d, col);
    }

    /// Clears the path.
    pub fn path_clear(&mut self) { self.path.clear() }

    /// Appends a point to the path.
    pub fn path_line_to(&mut self, p: Vec2f) { self.path.push(p) }

    /// Appends a point unless it repeats the last one.
    pub fn path_line_to_merge_duplicate(&mut self, p: Vec2f) {
        match self.path.last() {
            Some(last) if last.x == p.x && last.y == p.y => (),
            _ => self.path.push(p),
        }
    }

    /// Arc using the precomputed 12-step circle; angles are in twelfths of a turn.
    pub fn path_arc_to_fast(&mut self, centre: Vec2f, radius: f32, a_min_of_12: usize, a_max_of_12: usize) {
        if radius == 0.0 || a_min_of_12 > a_max_of_12 {
            self.path.push(centre);
            return;
        }
        for a in a_min_of_12..=a_max_of_12 {
            let c = self.circle_vtx12[a % 12];
            self.path.push(vec2(centre.x + c.x * radius, centre.y + c.y * radius));
        }
    }

    /// Arc from `a_min` to `a_max` radians in `num_segments` steps.
    pub fn path_arc_to(&mut self, centre: Vec2f, radius: f32, a_min: f32, a_max: f32, num_segments: usize) {
        if radius == 0.0 || num_segments == 0 {
            self.path.push(centre);
            return;
        }
        for i in 0..=num_segments {
            let a = a_min + (i as f32 / num_segments as f32) * (a_max - a_min);
            self.path.push(vec2(centre.x + a.cos() * radius, centre.y + a.sin() * radius));
        }
    }

    /// Rectangle outline with optional rounded corners.
    pub fn path_rect(&mut self, a: Vec2f, b: Vec2f, rounding: f32, corners: DrawCornerFlags) {
        let horiz = if corners.contains(DrawCornerFlags::TOP) || corners.contains(DrawCornerFlags::BOT) { 0.5 } else { 1.0 };
        let vert = if corners.contains(DrawCornerFlags::LEFT) || corners.contains(DrawCornerFlags::RIGHT) { 0.5 } else { 1.0 };
        let rounding = rounding.min((b.x - a.x).abs() * horiz - 1.0).min((b.y - a.y).abs() * vert - 1.0);

        if rounding <= 0.0 || corners.is_empty() {
            self.path_line_to(a);
            self.path_line_to(vec2(b.x, a.y));
            self.path_line_to(b);
            self.path_line_to(vec2(a.x, b.y));
        } else {
            let r = |flag: DrawCornerFlags| if corners.contains(flag) { rounding } else { 0.0 };
            let (rtl, rtr, rbr, rbl) = (r(DrawCornerFlags::TOP_LEFT), r(DrawCornerFlags::TOP_RIGHT), r(DrawCornerFlags::BOT_RIGHT), r(DrawCornerFlags::BOT_LEFT));
            self.path_arc_to_fast(vec2(a.x + rtl, a.y + rtl), rtl, 6, 9);
            self.path_arc_to_fast(vec2(b.x - rtr, a.y + rtr), rtr, 9, 12);
            self.path_arc_to_fast(vec2(b.x - rbr, b.y - rbr), rbr, 0, 3);
            self.path_arc_to_fast(vec2(a.x + rbl, b.y - rbl), rbl, 3, 6);
        }
    }

    /// Strokes the path and clears it.
    pub fn path_stroke(&mut self, col: Color, closed: bool, thickness: f32) {
        let path = std::mem::take(&mut self.path);
        self.add_polyline(&path, col, closed, thickness);
        self.path = path;
        self.path.clear();
    }

    /// Fills the path, which must be convex, and clears it.
    pub fn path_fill_convex(&mut self, col: Color) {
        let path = std::mem::take(&mut self.path);
        self.add_convex_poly_filled(&path, col);
        self.path = path;
        self.path.clear();
    }

    /// Line segment.
    pub fn add_line(&mut self, a: Vec2f, b: Vec2f, col: Color, thickness: f32) {
        if col.is_transparent() {
            return;
        }
        self.path_line_to(add(a, vec2(0.5, 0.5)));
        self.path_line_to(add(b, vec2(0.5, 0.5)));
        self.path_stroke(col, false, thickness);
    }

    /// Rectangle outline.
    pub fn add_rect(&mut self, a: Vec2f, b: Vec2f, col: Color, rounding: f32, corners: DrawCornerFlags, thickness: f32) {
        if col.is_transparent() {
            return;
        }
        let inset = if self.flags.contains(DrawListFlags::ANTI_ALIASED_LINES) { 0.5 } else { 0.49 };
        self.path_rect(add(a, vec2(0.5, 0.5)), sub(b, vec2(inset, inset)), rounding, corners);
        self.path_stroke(col, true, thickness);
    }

    /// Filled rectangle.
    pub fn add_rect_filled(&mut self, a: Vec2f, b: Vec2f, col: Color, rounding: f32, corners: DrawCornerFlags) {
        if col.is_transparent() {
            return;
        }
        if rounding > 0.0 {
            self.path_rect(a, b, rounding, corners);
            self.path_fill_convex(col);
        } else {
            self.prim_reserve(6, 4);
            self.prim_rect(a, b, col);
        }
    }

    /// Filled rectangle with one color per corner.
    pub fn add_rect_filled_multi_color(&mut self, a: Vec2f, c: Vec2f, col_ul: Color, col_ur: Color, col_br: Color, col_bl: Color) {
        self.add_quad_filled_multi_color([a, vec2(c.x, a.y), c, vec2(a.x, c.y)], [col_ul, col_ur, col_br, col_bl]);
    }

    /// Filled convex quad with one color per corner, corners in winding order.
    pub fn add_quad_filled_multi_color(&mut self, pts: [Vec2f; 4], cols: [Color; 4]) {
        if cols.iter().all(|c| c.is_transparent()) {
            return;
        }
        let uv = self.white_uv;
        self.prim_reserve(6, 4);
        let i = self.vtx_current_idx;
        for idx in [i, i + 1, i + 2, i, i + 2, i + 3] {
            self.prim_write_idx(idx);
        }
        for (p, c) in pts.into_iter().zip(cols) {
            self.prim_write_vtx(p, uv, c);
        }
    }

    /// Filled triangle with one color per vertex.
    pub fn add_triangle_filled_multi_color(&mut self, a: Vec2f, b: Vec2f, c: Vec2f, col_a: Color, col_b: Color, col_c: Color) {
        if [col_a, col_b, col_c].iter().all(|c| c.is_transparent()) {
            return;
        }
        let uv = self.white_uv;
        self.prim_reserve(3, 3);
        let i = self.vtx_current_idx;
        for idx in [i, i + 1, i + 2] {
            self.prim_write_idx(idx);
        }
        self.prim_write_vtx(a, uv, col_a);
        self.prim_write_vtx(b, uv, col_b);
        self.prim_write_vtx(c, uv, col_c);
    }

    /// Quad outline.
    pub fn add_quad(&mut self, a: Vec2f, b: Vec2f, c: Vec2f, d: Vec2f, col: Color, thickness: f32) {
        if col.is_transparent() {
            return;
        }
        for p in [a, b, c, d] {
            self.path_line_to(p);
        }
        self.path_stroke(col, true, thickness);
    }

    /// Filled quad.
    pub fn add_quad_filled(&mut self, a: Vec2f, b: Vec2f, c: Vec2f, d: Vec2f, col: Color) {
        if col.is_transparent() {
            return;
        }
        for p in [a, b, c, d] {
            self.path_line_to(p);
        }
        self.path_fill_convex(col);
    }

    /// Triangle outline.
    pub fn add_triangle(&mut self, a: Vec2f, b: Vec2f, c: Vec2f, col: Color, thickness: f32) {
        if col.is_transparent() {
            return;
        }
        for p in [a, b, c] {
            self.path_line_to(p);
        }
        self.path_stroke(col, true, thickness);
    }

    /// Filled triangle.
    pub fn add_triangle_filled(&mut self, a: Vec2f, b: Vec2f, c: Vec2f, col: Color) {
        if col.is_transparent() {
            return;
        }
        for p in [a, b, c] {
            self.path_line_to(p);
        }
        self.path_fill_convex(col);
    }

    /// Circle outline made of `num_segments` segments.
    pub fn add_circle(&mut self, centre: Vec2f, radius: f32, col: Color, num_segments: usize, thickness: f32) {
        if col.is_transparent() || num_segments < 3 {
            return;
        }
        let a_max = std::f32::consts::PI * 2.0 * (num_segments as f32 - 1.0) / num_segments as f32;
        self.path_arc_to(centre, radius - 0.5, 0.0, a_max, num_segments - 1);
        self.path_stroke(col, true, thickness);
    }

    /// Filled circle made of `num_segments` segments.
    pub fn add_circle_filled(&mut self, centre: Vec2f, radius: f32, col: Color, num_segments: usize) {
        if col.is_transparent() || num_segments < 3 {
            return;
        }
        let a_max = std::f32::consts::PI * 2.0 * (num_segments as f32 - 1.0) / num_segments as f32;
        self.path_arc_to(centre, radius, 0.0, a_max, num_segments - 1);
        self.path_fill_convex(col);
    }

    /// Strokes a polyline. Anti-aliased strokes add a transparent fringe on both sides.
    #[inline(never)]
    pub fn add_polyline(&mut self, points: &[Vec2f], col: Color, closed: bool, thickness: f32) {
        let points_count = points.len();
        if points_count < 2 {
            return;
        }
        let uv = self.white_uv;
        let count = if closed { points_count } else { points_count - 1 };
        let thick_line = thickness > 1.0;

        if self.flags.contains(DrawListFlags::ANTI_ALIASED_LINES) {
            let col_trans = Color { a: 0, ..col };
            let idx_count = if thick_line { count * 18 } else { count * 12 };
            let vtx_count = if thick_line { points_count * 4 } else { points_count * 3 };
            self.prim_reserve(idx_count, vtx_count);

            let mut normals = vec![vec2(0.0, 0.0); points_count];
            for i1 in 0..count {
                let i2 = if i1 + 1 == points_count { 0 } else { i1 + 1 };
                let d = normalized(sub(points[i2], points[i1]));
                normals[i1] = vec2(d.y, -d.x);
            }
            if !closed {
                normals[points_count - 1] = normals[points_count - 2];
            }

            let base = self.vtx_current_idx;
            if !thick_line {
                let mut temp = vec![vec2(0.0, 0.0); points_count * 2];
                if !closed {
                    let last = points_count - 1;
                    temp[0] = add(points[0], mul(normals[0], AA_SIZE));
                    temp[1] = sub(points[0], mul(normals[0], AA_SIZE));
                    temp[last * 2] = add(points[last], mul(normals[last], AA_SIZE));
                    temp[last * 2 + 1] = sub(points[last], mul(normals[last], AA_SIZE));
                }
                let mut idx1 = base;
                for i1 in 0..count {
                    let i2 = if i1 + 1 == points_count { 0 } else { i1 + 1 };
                    let idx2 = if i1 + 1 == points_count { base } else { idx1 + 3 };
                    let dm = mul(miter(normals[i1], normals[i2]), AA_SIZE);
                    temp[i2 * 2] = add(points[i2], dm);
                    temp[i2 * 2 + 1] = sub(points[i2], dm);
                    for idx in [idx2, idx1, idx1 + 2, idx1 + 2, idx2 + 2, idx2, idx2 + 1, idx1 + 1, idx1, idx1, idx2, idx2 + 1] {
                        self.prim_write_idx(idx);
                    }
                    idx1 = idx2;
                }
                for i in 0..points_count {
                    self.prim_write_vtx(points[i], uv, col);
                    self.prim_write_vtx(temp[i * 2], uv, col_trans);
                    self.prim_write_vtx(temp[i * 2 + 1], uv, col_trans);
                }
            } else {
                let half_inner = (thickness - AA_SIZE) * 0.5;
                let mut temp = vec![vec2(0.0, 0.0); points_count * 4];
                if !closed {
                    let last = points_count - 1;
                    for (i, n) in [(0, normals[0]), (last, normals[last])] {
                        temp[i * 4] = add(points[i], mul(n, half_inner + AA_SIZE));
                        temp[i * 4 + 1] = add(points[i], mul(n, half_inner));
                        temp[i * 4 + 2] = sub(points[i], mul(n, half_inner));
                        temp[i * 4 + 3] = sub(points[i], mul(n, half_inner + AA_SIZE));
                    }
                }
                let mut idx1 = base;
                for i1 in 0..count {
                    let i2 = if i1 + 1 == points_count { 0 } else { i1 + 1 };
                    let idx2 = if i1 + 1 == points_count { base } else { idx1 + 4 };
                    let dm = miter(normals[i1], normals[i2]);
                    let dm_out = mul(dm, half_inner + AA_SIZE);
                    let dm_in = mul(dm, half_inner);
                    temp[i2 * 4] = add(points[i2], dm_out);
                    temp[i2 * 4 + 1] = add(points[i2], dm_in);
                    temp[i2 * 4 + 2] = sub(points[i2], dm_in);
                    temp[i2 * 4 + 3] = sub(points[i2], dm_out);
                    for idx in [
                        idx2 + 1, idx1 + 1, idx1 + 2, idx1 + 2, idx2 + 2, idx2 + 1,
                        idx2 + 1, idx1 + 1, idx1, idx1, idx2, idx2 + 1,
                        idx2 + 2, idx1 + 2, idx1 + 3, idx1 + 3, idx2 + 3, idx2 + 2,
                    ] {
                        self.prim_write_idx(idx);
                    }
                    idx1 = idx2;
                }
                for i in 0..points_count {
                    self.prim_write_vtx(temp[i * 4], uv, col_trans);
                    self.prim_write_vtx(temp[i * 4 + 1], uv, col);
                    self.prim_write_vtx(temp[i * 4 + 2], uv, col);
                    self.prim_write_vtx(temp[i * 4 + 3], uv, col_trans);
                }
            }
        } else {
            self.prim_reserve(count * 6, count * 4);
            for i1 in 0..count {
                let i2 = if i1 + 1 == points_count { 0 } else { i1 + 1 };
                let (p1, p2) = (points[i1], points[i2]);
                let d = normalized(sub(p2, p1));
                let dx = d.x * (thickness * 0.5);
                let dy = d.y * (thickness * 0.5);
                let i = self.vtx_current_idx;
                for idx in [i, i + 1, i + 2, i, i + 2, i + 3] {
                    self.prim_write_idx(idx);
                }
                self.prim_write_vtx(vec2(p1.x + dy, p1.y - dx), uv, col);
                self.prim_write_vtx(vec2(p2.x + dy, p2.y - dx), uv, col);
                self.prim_write_vtx(vec2(p2.x - dy, p2.y + dx), uv, col);
                self.prim_write_vtx(vec2(p1.x - dy, p1.y + dx), uv, col);
            }
        }
    }

    /// Fills a convex polygon. Anti-aliased fills add a transparent fringe ring.
    #[inline(never)]
    pub fn add_convex_poly_filled(&mut self, points: &[Vec2f], col: Color) {
        let points_count = points.len();
        if points_count < 3 {
            return;
        }
        let uv = self.white_uv;

        if self.flags.contains(DrawListFlags::ANTI_ALIASED_FILL) {
            let col_trans = Color { a: 0, ..col };
            let idx_count = (points_count - 2) * 3 + points_count * 6;
            let vtx_count = points_count * 2;
            self.prim_reserve(idx_count, vtx_count);

            let inner = self.vtx_current_idx;
            let outer = inner + 1;
            for i in 2..points_count as u32 {
                for idx in [inner, inner + ((i - 1) << 1), inner + (i << 1)] {
                    self.prim_write_idx(idx);
                }
            }

            let mut normals = vec![vec2(0.0, 0.0); points_count];
            let mut i0 = points_count - 1;
            for i1 in 0..points_count {
                let d = normalized(sub(points[i1], points[i0]));
                normals[i0] = vec2(d.y, -d.x);
                i0 = i1;
            }

            let mut i0 = points_count - 1;
            for i1 in 0..points_count {
                let dm = mul(miter(normals[i0], normals[i1]), AA_SIZE * 0.5);
                self.prim_write_vtx(sub(points[i1], dm), uv, col);
                self.prim_write_vtx(add(points[i1], dm), uv, col_trans);
                let (a, b) = ((i1 as u32) << 1, (i0 as u32) << 1);
                for idx in [inner + a, inner + b, outer + b, outer + b, outer + a, inner + a] {
                    self.prim_write_idx(idx);
                }
                i0 = i1;
            }
        } else {
            self.prim_reserve((points_count - 2) * 3, points_count);
            let base = self.vtx_current_idx;
            for p in points {
                self.prim_write_vtx(*p, uv, col);
            }
            for i in 2..points_count as u32 {
                for idx in [base, base + i - 1, base + i] {
                    self.prim_write_idx(idx);
                }
            }
        }
    }

    /// Draws `text` with `font` at `size` pixels. Glyphs outside the clip rect are skipped; with `cpu_fine_clip`
    /// the remaining quads are cut against it as well.
    #[allow(clippy::too_many_arguments)]
    pub fn add_text<F: GlyphProvider + ?Sized>(
        &mut self,
        font: &F,
        size: f32,
        pos: Vec2f,
        col: Color,
        text: &str,
        wrap_width: f32,
        cpu_fine_clip: Option<ClipRect>,
    ) {
        if col.is_transparent() || text.is_empty() {
            return;
        }
        let mut clip = self.current_clip_rect();
        if let Some(fine) = cpu_fine_clip {
            clip.x1 = clip.x1.max(fine.x1);
            clip.y1 = clip.y1.max(fine.y1);
            clip.x2 = clip.x2.min(fine.x2);
            clip.y2 = clip.y2.min(fine.y2);
        }
        let quads = layout_glyph_quads(font, size, pos, text, wrap_width, &clip, cpu_fine_clip.is_some());
        if quads.is_empty() {
            return;
        }
        self.prim_reserve(quads.len() * 6, quads.len() * 4);
        for q in quads {
            self.prim_rect_uv(q.p0, q.p1, q.uv0, q.uv1, col);
        }
    }

    /// Textured rectangle. Switches texture for the duration of the call when needed.
    pub fn add_image(&mut self, tex: TextureId, a: Vec2f, b: Vec2f, uv_a: Vec2f, uv_b: Vec2f, col: Color) {
        if col.is_transparent() {
            return;
        }
        let push = tex != self.current_texture_id();
        if push {
            self.push_texture_id(tex);
        }
        self.prim_reserve(6, 4);
        self.prim_rect_uv(a, b, uv_a, uv_b, col);
        if push {
            self.pop_texture_id();
        }
    }

    /// Drops a trailing empty command so renderers never see one.
    pub(crate) fn finish(&mut self) {
        if let Some(last) = self.cmd_buffer.last() {
            if last.elem_count == 0 && !last.texture.is_callback() {
                self.cmd_buffer.pop();
            }
        }
    }
}

struct GlyphQuad {
    p0: Vec2f,
    p1: Vec2f,
    uv0: Vec2f,
    uv1: Vec2f,
}

fn layout_glyph_quads<F: GlyphProvider + ?Sized>(
    font: &F,
    size: f32,
    pos: Vec2f,
    text: &str,
    wrap_width: f32,
    clip: &ClipRect,
    fine_clip: bool,
) -> Vec<GlyphQuad> {
    let mut quads = Vec::new();
    let pos = vec2(pos.x.floor(), pos.y.floor());
    if pos.y > clip.y2 {
        return quads;
    }
    let scale = size / font.font_size();
    let line_height = font.font_size() * scale;
    let word_wrap = wrap_width > 0.0;
    let mut word_wrap_eol: Option<usize> = None;
    let (mut x, mut y) = (pos.x, pos.y);

    let bytes = text.as_bytes();
    let mut s = 0;
    while s < text.len() {
        if word_wrap {
            let eol = match word_wrap_eol {
                Some(eol) => eol,
                None => {
                    let mut eol = s + font.calc_word_wrap_position(scale, &text[s..], wrap_width - (x - pos.x));
                    if eol == s {
                        // wrap width too small to fit a single char
                        eol += text[s..].chars().next().map_or(1, |c| c.len_utf8());
                    }
                    word_wrap_eol = Some(eol);
                    eol
                }
            };
            if s >= eol {
                x = pos.x;
                y += line_height;
                word_wrap_eol = None;
                while s < bytes.len() && (bytes[s] == b' ' || bytes[s] == b'\t') {
                    s += 1;
                }
                if s < bytes.len() && bytes[s] == b'\n' {
                    s += 1;
                }
                continue;
            }
        }

        let c = match text[s..].chars().next() {
            Some(c) => c,
            None => break,
        };
        s += c.len_utf8();

        if (c as u32) < 32 {
            if c == '\n' {
                x = pos.x;
                y += line_height;
                if y > clip.y2 {
                    break;
                }
                continue;
            }
            if c == '\r' {
                continue;
            }
        }

        let advance = match font.glyph(c).or_else(|| font.fallback_glyph()) {
            Some(g) => {
                if c != ' ' && c != '\t' {
                    let (mut x1, mut x2) = (x + g.x0 * scale, x + g.x1 * scale);
                    let (mut y1, mut y2) = (y + g.y0 * scale, y + g.y1 * scale);
                    if x1 <= clip.x2 && x2 >= clip.x1 {
                        let (mut u1, mut v1, mut u2, mut v2) = (g.u0, g.v0, g.u1, g.v1);
                        let mut visible = true;
                        if fine_clip {
                            if x1 < clip.x1 {
                                u1 += (1.0 - (x2 - clip.x1) / (x2 - x1)) * (u2 - u1);
                                x1 = clip.x1;
                            }
                            if y1 < clip.y1 {
                                v1 += (1.0 - (y2 - clip.y1) / (y2 - y1)) * (v2 - v1);
                                y1 = clip.y1;
                            }
                            if x2 > clip.x2 {
                                u2 = u1 + ((clip.x2 - x1) / (x2 - x1)) * (u2 - u1);
                                x2 = clip.x2;
                            }
                            if y2 > clip.y2 {
                                v2 = v1 + ((clip.y2 - y1) / (y2 - y1)) * (v2 - v1);
                                y2 = clip.y2;
                            }
                            visible = y1 < y2;
                        }
                        if visible {
                            quads.push(GlyphQuad { p0: vec2(x1, y1), p1: vec2(x2, y2), uv0: vec2(u1, v1), uv1: vec2(u2, v2) });
                        }
                    }
                }
                g.advance_x * scale
            }
            None => font.glyph_advance(c) * scale,
        };
        x += advance;
    }
    quads
}

#[derive(Clone, Debug, Default)]
/// Everything the host needs to render one frame.
pub struct DrawData {
    /// Draw lists in back-to-front order.
    pub cmd_lists: Vec<DrawList>,
    /// Sum of every list's vertex count.
    pub total_vtx_count: usize,
    /// Sum of every list's index count.
    pub total_idx_count: usize,
    /// Top-left of the display.
    pub display_pos: Vec2f,
    /// Display size.
    pub display_size: Vec2f,
    /// Framebuffer to display scale.
    pub framebuffer_scale: Vec2f,
}

impl DrawData {
    pub(crate) fn clear(&mut self) {
        self.cmd_lists.clear();
        self.total_vtx_count = 0;
        self.total_idx_count = 0;
    }

    /// Appends a list, skipping it when it holds nothing to draw.
    pub(crate) fn push_list(&mut self, mut list: DrawList) {
        list.finish();
        if list.cmd_buffer.is_empty() {
            return;
        }
        self.total_vtx_count += list.vtx_buffer.len();
        self.total_idx_count += list.idx_buffer.len();
        self.cmd_lists.push(list);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::test_font;

    fn list() -> DrawList {
        let mut dl = DrawList::new("test");
        dl.push_texture_id(TextureId::new(1));
        dl.push_clip_rect(vec2(0.0, 0.0), vec2(100.0, 100.0), false);
        dl
    }

    fn assert_indices_in_range(dl: &DrawList) {
        for cmd in &dl.cmd_buffer {
            let range = cmd.idx_offset as usize..(cmd.idx_offset + cmd.elem_count) as usize;
            for &i in &dl.idx_buffer[range] {
                assert!(((cmd.vtx_offset + i) as usize) < dl.vtx_buffer.len());
            }
        }
    }

    #[test]
    fn same_state_merges_into_one_command() {
        let mut dl = list();
        dl.add_rect_filled(vec2(0.0, 0.0), vec2(10.0, 10.0), Color::WHITE, 0.0, DrawCornerFlags::ALL);
        dl.add_rect_filled(vec2(20.0, 0.0), vec2(30.0, 10.0), Color::WHITE, 0.0, DrawCornerFlags::ALL);
        assert_eq!(dl.cmd_buffer.len(), 1);
        assert_eq!(dl.cmd_buffer[0].elem_count, 12);
        assert_eq!(dl.vtx_buffer.len(), 8);
        assert_indices_in_range(&dl);
    }

    #[test]
    fn multi_color_triangle_keeps_vertex_colors() {
        let mut dl = list();
        let (r, g) = (Color { r: 255, g: 0, b: 0, a: 255 }, Color { r: 0, g: 255, b: 0, a: 255 });
        dl.add_triangle_filled_multi_color(vec2(0.0, 0.0), vec2(10.0, 0.0), vec2(0.0, 10.0), r, g, Color::TRANSPARENT);
        assert_eq!(dl.cmd_buffer[0].elem_count, 3);
        let cols: Vec<Color> = dl.vtx_buffer.iter().map(|v| v.col).collect();
        assert_eq!(cols, vec![r, g, Color::TRANSPARENT]);
        assert_indices_in_range(&dl);

        dl.add_triangle_filled_multi_color(vec2(0.0, 0.0), vec2(1.0, 0.0), vec2(0.0, 1.0), Color::TRANSPARENT, Color::TRANSPARENT, Color::TRANSPARENT);
        assert_eq!(dl.vtx_buffer.len(), 3);
    }

    #[test]
    fn unused_clip_rect_merges_back() {
        let mut dl = list();
        dl.add_rect_filled(vec2(0.0, 0.0), vec2(10.0, 10.0), Color::WHITE, 0.0, DrawCornerFlags::ALL);
        dl.push_clip_rect(vec2(5.0, 5.0), vec2(50.0, 50.0), true);
        dl.pop_clip_rect();
        dl.add_rect_filled(vec2(0.0, 0.0), vec2(10.0, 10.0), Color::WHITE, 0.0, DrawCornerFlags::ALL);
        assert_eq!(dl.cmd_buffer.len(), 1);

        dl.push_clip_rect(vec2(5.0, 5.0), vec2(50.0, 50.0), true);
        dl.add_rect_filled(vec2(0.0, 0.0), vec2(10.0, 10.0), Color::WHITE, 0.0, DrawCornerFlags::ALL);
        dl.pop_clip_rect();
        dl.add_rect_filled(vec2(0.0, 0.0), vec2(10.0, 10.0), Color::WHITE, 0.0, DrawCornerFlags::ALL);
        assert_eq!(dl.cmd_buffer.len(), 3);
        assert_eq!(dl.cmd_buffer[1].clip_rect, ClipRect { x1: 5.0, y1: 5.0, x2: 50.0, y2: 50.0 });
        assert_eq!(dl.cmd_buffer[1].vtx_offset, 8);
        assert_indices_in_range(&dl);
    }

    #[test]
    fn texture_change_splits_commands() {
        let mut dl = list();
        dl.add_rect_filled(vec2(0.0, 0.0), vec2(10.0, 10.0), Color::WHITE, 0.0, DrawCornerFlags::ALL);
        dl.add_image(TextureId::new(7), vec2(0.0, 0.0), vec2(4.0, 4.0), vec2(0.0, 0.0), vec2(1.0, 1.0), Color::WHITE);
        dl.add_rect_filled(vec2(0.0, 0.0), vec2(10.0, 10.0), Color::WHITE, 0.0, DrawCornerFlags::ALL);
        assert_eq!(dl.cmd_buffer.len(), 3);
        assert!(dl.cmd_buffer[1].texture.same_texture(TextureId::new(7)));
        assert!(dl.cmd_buffer[2].texture.same_texture(TextureId::new(1)));
    }

    #[test]
    fn callbacks_never_merge() {
        let mut dl = list();
        dl.add_rect_filled(vec2(0.0, 0.0), vec2(10.0, 10.0), Color::WHITE, 0.0, DrawCornerFlags::ALL);
        dl.add_callback(DrawCallback(Rc::new(|_, _| {})));
        dl.add_rect_filled(vec2(0.0, 0.0), vec2(10.0, 10.0), Color::WHITE, 0.0, DrawCornerFlags::ALL);
        assert_eq!(dl.cmd_buffer.len(), 3);
        assert!(dl.cmd_buffer[1].texture.is_callback());
        assert_eq!(dl.cmd_buffer[1].elem_count, 0);
        assert_eq!(dl.cmd_buffer[2].elem_count, 6);
    }

    #[test]
    fn aa_stroke_vertex_counts() {
        let pts = [vec2(0.0, 0.0), vec2(10.0, 0.0), vec2(10.0, 10.0)];
        let mut dl = list();
        dl.add_polyline(&pts, Color::WHITE, false, 1.0);
        assert_eq!((dl.vtx_buffer.len(), dl.idx_buffer.len()), (9, 24));

        let mut dl = list();
        dl.add_polyline(&pts, Color::WHITE, true, 1.0);
        assert_eq!((dl.vtx_buffer.len(), dl.idx_buffer.len()), (9, 36));

        let mut dl = list();
        dl.add_polyline(&pts, Color::WHITE, false, 3.0);
        assert_eq!((dl.vtx_buffer.len(), dl.idx_buffer.len()), (12, 36));
        assert_eq!(dl.cmd_buffer[0].elem_count as usize, dl.idx_buffer.len());
        assert_indices_in_range(&dl);
    }

    #[test]
    fn plain_stroke_is_a_quad_per_segment() {
        let mut dl = list();
        dl.flags = DrawListFlags::NONE;
        dl.add_polyline(&[vec2(0.0, 0.0), vec2(10.0, 0.0)], Color::WHITE, false, 2.0);
        assert_eq!((dl.vtx_buffer.len(), dl.idx_buffer.len()), (4, 6));
        assert_eq!(dl.vtx_buffer[0].pos.y, -1.0);
        assert_eq!(dl.vtx_buffer[3].pos.y, 1.0);
    }

    #[test]
    fn convex_fill_counts() {
        let quad = [vec2(0.0, 0.0), vec2(10.0, 0.0), vec2(10.0, 10.0), vec2(0.0, 10.0)];
        let mut dl = list();
        dl.add_convex_poly_filled(&quad, Color::WHITE);
        assert_eq!((dl.vtx_buffer.len(), dl.idx_buffer.len()), (8, 30));
        assert_eq!(dl.vtx_buffer[1].col.a, 0);
        assert_indices_in_range(&dl);

        let mut dl = list();
        dl.flags = DrawListFlags::NONE;
        dl.add_convex_poly_filled(&quad, Color::WHITE);
        assert_eq!((dl.vtx_buffer.len(), dl.idx_buffer.len()), (4, 6));
    }

    #[test]
    fn rounded_rect_path_has_arcs() {
        let mut dl = list();
        dl.path_rect(vec2(0.0, 0.0), vec2(40.0, 40.0), 5.0, DrawCornerFlags::ALL);
        assert_eq!(dl.path.len(), 16);
        dl.path_clear();
        dl.path_rect(vec2(0.0, 0.0), vec2(40.0, 40.0), 0.0, DrawCornerFlags::ALL);
        assert_eq!(dl.path.len(), 4);
        dl.path_line_to_merge_duplicate(vec2(0.0, 40.0));
        assert_eq!(dl.path.len(), 4);
    }

    #[test]
    fn transparent_shapes_emit_nothing() {
        let mut dl = list();
        dl.add_line(vec2(0.0, 0.0), vec2(10.0, 10.0), Color::TRANSPARENT, 1.0);
        dl.add_circle_filled(vec2(5.0, 5.0), 4.0, Color::TRANSPARENT, 12);
        assert!(dl.vtx_buffer.is_empty());
        assert!(dl.is_empty());
    }

    #[test]
    fn text_emits_a_quad_per_visible_glyph() {
        let font = test_font();
        let mut dl = list();
        dl.add_text(&*font, 13.0, vec2(0.0, 0.0), Color::WHITE, "ab c", 0.0, None);
        assert_eq!(dl.vtx_buffer.len(), 12);
        assert_eq!(dl.idx_buffer.len(), 18);

        // the third glyph starts at x = 14, past the clip edge
        let mut dl = list();
        dl.push_clip_rect(vec2(0.0, 0.0), vec2(10.0, 100.0), false);
        dl.add_text(&*font, 13.0, vec2(0.0, 0.0), Color::WHITE, "abc", 0.0, Some(ClipRect::new(vec2(0.0, 0.0), vec2(10.0, 100.0))));
        assert_eq!(dl.vtx_buffer.len(), 8);
        assert!(dl.vtx_buffer.iter().all(|v| v.pos.x <= 10.0));
    }

    #[test]
    fn draw_data_skips_empty_lists_and_trailing_commands() {
        let mut data = DrawData::default();
        data.push_list(list());
        assert!(data.cmd_lists.is_empty());

        let mut dl = list();
        dl.add_rect_filled(vec2(0.0, 0.0), vec2(10.0, 10.0), Color::WHITE, 0.0, DrawCornerFlags::ALL);
        dl.push_clip_rect(vec2(0.0, 0.0), vec2(1.0, 1.0), false);
        data.push_list(dl);
        assert_eq!(data.cmd_lists.len(), 1);
        assert_eq!(data.cmd_lists[0].cmd_buffer.len(), 1);
        assert_eq!(data.total_vtx_count, 4);
        assert_eq!(data.total_idx_count, 6);
    }
}
