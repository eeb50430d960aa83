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
//! Widgets built on [`Context::button_behavior`] and the drag/slider behaviors, plus the [`Painter`] they
//! draw with.

mod button;
mod color;
mod combo;
mod drag;
mod format;
mod selectable;
mod slider;
mod text;
mod tree;

pub use button::*;
pub use color::*;
pub use combo::*;
pub use format::*;
pub use selectable::*;
pub use slider::*;
pub use tree::*;

use crate::{add2, vec2, ClipRect, Color, Context, Dir, DrawCornerFlags, DrawList, Font, GlyphProvider, Id, Rectf, RectExt, Style, StyleColor, Vec2f};

/// Size of `text` at `size` pixels. Widths are rounded up so glyph edges never spill; a non-positive
/// `wrap_width` disables wrapping.
pub(crate) fn calc_text_size<F: GlyphProvider + ?Sized>(font: &F, size: f32, text: &str, wrap_width: f32) -> Vec2f {
    if text.is_empty() {
        return vec2(0.0, size);
    }
    let m = font.measure_text(size, text, wrap_width);
    vec2((m.width + 0.95).trunc(), m.height)
}

/// Draws widget chrome into one window's draw list with the current style and font.
pub(crate) struct Painter<'a> {
    pub(crate) dl: &'a mut DrawList,
    style: &'a Style,
    font: &'a Font,
    font_size: f32,
}

impl<'a> Painter<'a> {
    /// Style color at full alpha.
    pub(crate) fn col(&self, idx: StyleColor) -> Color { self.style.color(idx, 1.0) }

    pub(crate) fn style(&self) -> &Style { self.style }

    /// Filled frame with the style border when `border` is set.
    pub(crate) fn render_frame(&mut self, min: Vec2f, max: Vec2f, fill: Color, border: bool, rounding: f32) {
        self.dl.add_rect_filled(min, max, fill, rounding, DrawCornerFlags::ALL);
        let border_size = self.style.frame_border_size;
        if border && border_size > 0.0 {
            let shadow = self.col(StyleColor::BorderShadow);
            let line = self.col(StyleColor::Border);
            self.dl.add_rect(add2(min, vec2(1.0, 1.0)), add2(max, vec2(1.0, 1.0)), shadow, rounding, DrawCornerFlags::ALL, border_size);
            self.dl.add_rect(min, max, line, rounding, DrawCornerFlags::ALL, border_size);
        }
    }

    /// Filled frame with an explicit border width, used by window chrome.
    pub(crate) fn render_frame_ex(&mut self, min: Vec2f, max: Vec2f, fill: Color, rounding: f32, border_size: f32) {
        self.dl.add_rect_filled(min, max, fill, rounding, DrawCornerFlags::ALL);
        if border_size > 0.0 {
            let line = self.col(StyleColor::Border);
            self.dl.add_rect(min, max, line, rounding, DrawCornerFlags::ALL, border_size);
        }
    }

    /// Border only.
    pub(crate) fn render_frame_border(&mut self, min: Vec2f, max: Vec2f, rounding: f32) {
        let border_size = self.style.frame_border_size;
        if border_size > 0.0 {
            let shadow = self.col(StyleColor::BorderShadow);
            let line = self.col(StyleColor::Border);
            self.dl.add_rect(add2(min, vec2(1.0, 1.0)), add2(max, vec2(1.0, 1.0)), shadow, rounding, DrawCornerFlags::ALL, border_size);
            self.dl.add_rect(min, max, line, rounding, DrawCornerFlags::ALL, border_size);
        }
    }

    /// Unclipped text in `col`.
    pub(crate) fn render_text_col(&mut self, pos: Vec2f, text: &str, col: Color) {
        self.dl.add_text(self.font, self.font_size, pos, col, text, 0.0, None);
    }

    /// Text in the style text color; the part after `##` is dropped when `hide_after_double_hash`.
    pub(crate) fn render_text(&mut self, pos: Vec2f, text: &str, hide_after_double_hash: bool) {
        let text = if hide_after_double_hash { crate::find_rendered_text_end(text) } else { text };
        let col = self.col(StyleColor::Text);
        self.render_text_col(pos, text, col);
    }

    /// Text wrapped at `wrap_width`.
    pub(crate) fn render_text_wrapped(&mut self, pos: Vec2f, text: &str, wrap_width: f32) {
        let col = self.col(StyleColor::Text);
        self.dl.add_text(self.font, self.font_size, pos, col, text, wrap_width, None);
    }

    /// Text aligned within `min..max` by `align` (0 left/top, 1 right/bottom). Glyphs are cut at `clip`, or at
    /// `max` when no clip rect is given, only when the text actually overflows.
    pub(crate) fn render_text_clipped(&mut self, min: Vec2f, max: Vec2f, text: &str, text_size: Option<Vec2f>, align: Vec2f, clip: Option<Rectf>) {
        let text = crate::find_rendered_text_end(text);
        if text.is_empty() {
            return;
        }
        let text_size = text_size.unwrap_or_else(|| calc_text_size(self.font, self.font_size, text, 0.0));
        let (clip_min, clip_max) = match clip {
            Some(c) => (c.min_pt(), c.max_pt()),
            None => (min, max),
        };
        let mut pos = min;
        let mut need_clipping = pos.x + text_size.x >= clip_max.x || pos.y + text_size.y >= clip_max.y;
        if clip.is_some() {
            need_clipping |= pos.x < clip_min.x || pos.y < clip_min.y;
        }
        if align.x > 0.0 {
            pos.x = pos.x.max(pos.x + (max.x - pos.x - text_size.x) * align.x);
        }
        if align.y > 0.0 {
            pos.y = pos.y.max(pos.y + (max.y - pos.y - text_size.y) * align.y);
        }
        let col = self.col(StyleColor::Text);
        let fine = need_clipping.then(|| ClipRect::new(clip_min, clip_max));
        self.dl.add_text(self.font, self.font_size, pos, col, text, 0.0, fine);
    }

    /// Triangle pointing `dir` in a font-size square at `pos`.
    pub(crate) fn render_arrow(&mut self, pos: Vec2f, dir: Dir, scale: f32) {
        let h = self.font_size;
        let mut r = h * 0.40 * scale;
        let center = add2(pos, vec2(h * 0.50, h * 0.50 * scale));
        let (a, b, c) = match dir {
            Dir::Up | Dir::Down => {
                if dir == Dir::Up {
                    r = -r;
                }
                (vec2(0.0, 0.750 * r), vec2(-0.866 * r, -0.750 * r), vec2(0.866 * r, -0.750 * r))
            }
            Dir::Left | Dir::Right => {
                if dir == Dir::Left {
                    r = -r;
                }
                (vec2(0.750 * r, 0.0), vec2(-0.750 * r, 0.866 * r), vec2(-0.750 * r, -0.866 * r))
            }
        };
        let col = self.col(StyleColor::Text);
        self.dl.add_triangle_filled(add2(center, a), add2(center, b), add2(center, c), col);
    }

    /// Small filled circle.
    pub(crate) fn render_bullet(&mut self, pos: Vec2f) {
        let col = self.col(StyleColor::Text);
        self.dl.add_circle_filled(pos, self.font_size * 0.20, col, 8);
    }

    /// Check mark of side `sz`.
    pub(crate) fn render_check(&mut self, pos: Vec2f, col: Color, sz: f32) {
        let thickness = (sz / 5.0).max(1.0);
        let sz = sz - thickness * 0.5;
        let pos = add2(pos, vec2(thickness * 0.25, thickness * 0.25));
        let third = sz / 3.0;
        let bx = pos.x + third;
        let by = pos.y + sz - third * 0.5;
        self.dl.path_line_to(vec2(bx - third, by - third));
        self.dl.path_line_to(vec2(bx, by));
        self.dl.path_line_to(vec2(bx + third * 2.0, by - third * 2.0));
        self.dl.path_stroke(col, false, thickness);
    }

    /// Text size in the painter's font.
    pub(crate) fn text_size(&self, text: &str, wrap_width: f32) -> Vec2f { calc_text_size(self.font, self.font_size, text, wrap_width) }

    pub(crate) fn font_size(&self) -> f32 { self.font_size }
}

impl Context {
    /// Painter for window `id`.
    pub(crate) fn painter_for(&mut self, id: Id) -> Painter<'_> {
        let w = self.windows.get_mut(id).expect("window id refers to a live window");
        Painter { dl: &mut w.draw_list, style: &self.style, font: self.font.as_ref(), font_size: self.font_size }
    }

    /// Painter for the current window.
    pub(crate) fn painter(&mut self) -> Painter<'_> {
        let id = self.cw_id();
        self.painter_for(id)
    }

    /// Outline around the keyboard-focused item.
    pub(crate) fn render_nav_highlight(&mut self, bb: Rectf, id: Id) {
        if !self.is_nav_highlighted(id) {
            return;
        }
        let rounding = self.style.frame_rounding;
        let clip = self.cw().clip_rect;
        let bb = bb.expand(4.0, 4.0);
        let mut p = self.painter();
        let col = p.col(StyleColor::NavHighlight);
        let fully_visible = clip.contains_rect(&bb);
        if !fully_visible {
            p.dl.push_clip_rect(bb.min_pt(), bb.max_pt(), false);
        }
        p.dl.add_rect(add2(bb.min_pt(), vec2(1.0, 1.0)), crate::sub2(bb.max_pt(), vec2(1.0, 1.0)), col, rounding, DrawCornerFlags::ALL, 2.0);
        if !fully_visible {
            p.dl.pop_clip_rect();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::test_font;

    #[test]
    fn text_size_rounds_up_and_keeps_line_height() {
        let font = test_font();
        let size = |text: &str| {
            let s = calc_text_size(&*font, 13.0, text, 0.0);
            (s.x, s.y)
        };
        assert_eq!(size(""), (0.0, 13.0));
        assert_eq!(size("abc"), (21.0, 13.0));
        assert_eq!(size("ab\ncd"), (14.0, 26.0));
    }

    #[test]
    fn wrapped_text_grows_in_height() {
        let font = test_font();
        let s = calc_text_size(&*font, 13.0, "aaaa bbbb", 40.0);
        assert_eq!(s.y, 26.0);
        assert!(s.x <= 40.0);
    }
}
