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
//! Glyph tables and text measurement. A [`Font`] is a read-only glyph table living in a [`FontAtlas`] texture; the
//! [`GlyphProvider`] trait gives measurement and word wrapping to any glyph source.

use std::collections::HashMap;
use std::fmt::{Debug, Formatter};
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::{vec2, Color4b, Error, Result, TextureId, Vec2f};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
/// Metrics and texture coordinates of one glyph, at the font's native size.
pub struct Glyph {
    /// Character this glyph renders.
    pub codepoint: char,
    /// Horizontal advance in pixels.
    pub advance_x: f32,
    /// Left edge of the quad relative to the pen position.
    pub x0: f32,
    /// Top edge of the quad relative to the top of the line.
    pub y0: f32,
    /// Right edge of the quad.
    pub x1: f32,
    /// Bottom edge of the quad.
    pub y1: f32,
    /// Left texture coordinate.
    pub u0: f32,
    /// Top texture coordinate.
    pub v0: f32,
    /// Right texture coordinate.
    pub u1: f32,
    /// Bottom texture coordinate.
    pub v1: f32,
}

#[derive(Copy, Clone, Debug, Default, PartialEq)]
/// Result of [`GlyphProvider::measure_text`].
pub struct TextMetrics {
    /// Width of the widest line.
    pub width: f32,
    /// Total height of all lines.
    pub height: f32,
    /// Bytes of the input processed before measuring stopped.
    pub consumed: usize,
}

fn is_blank(c: char) -> bool { c == ' ' || c == '\t' || c == '\u{3000}' }

/// Source of glyph metrics used by layout and text rendering.
pub trait GlyphProvider {
    /// Native pixel size; also the line height at scale 1.
    fn font_size(&self) -> f32;
    /// Glyph for `c`, if the table has one.
    fn glyph(&self, c: char) -> Option<&Glyph>;
    /// Glyph drawn for missing characters.
    fn fallback_glyph(&self) -> Option<&Glyph>;
    /// Advance of `c` in pixels at native size, falling back when the glyph is missing.
    fn glyph_advance(&self, c: char) -> f32;
    /// Texture holding the glyph pixels.
    fn texture_id(&self) -> TextureId;
    /// Texture coordinates of an opaque white texel.
    fn white_pixel_uv(&self) -> Vec2f;

    /// Byte offset at which `text` must wrap to fit in `wrap_width`. Breaks happen at blanks and after
    /// punctuation; a newline resets the line.
    fn calc_word_wrap_position(&self, scale: f32, text: &str, wrap_width: f32) -> usize {
        let wrap_width = wrap_width / scale;
        let mut line_width = 0.0;
        let mut word_width = 0.0;
        let mut blank_width = 0.0;
        let mut word_end = 0;
        let mut prev_word_end: Option<usize> = None;
        let mut inside_word = true;

        for (s, c) in text.char_indices() {
            let next_s = s + c.len_utf8();
            if (c as u32) < 32 {
                if c == '\n' {
                    line_width = 0.0;
                    word_width = 0.0;
                    blank_width = 0.0;
                    inside_word = true;
                    continue;
                }
                if c == '\r' {
                    continue;
                }
            }

            let char_width = self.glyph_advance(c);
            if is_blank(c) {
                if inside_word {
                    line_width += blank_width;
                    blank_width = 0.0;
                    word_end = s;
                }
                blank_width += char_width;
                inside_word = false;
            } else {
                word_width += char_width;
                if inside_word {
                    word_end = next_s;
                } else {
                    prev_word_end = Some(word_end);
                    line_width += word_width + blank_width;
                    word_width = 0.0;
                    blank_width = 0.0;
                }
                inside_word = !matches!(c, '.' | ',' | ';' | '!' | '?' | '"');
            }

            if line_width + word_width >= wrap_width {
                // a word wider than the whole line is cut mid-word
                if word_width < wrap_width {
                    return prev_word_end.unwrap_or(word_end);
                }
                return s;
            }
        }
        text.len()
    }

    /// Size of `text` drawn at `size` pixels, wrapping at `wrap_width` when positive.
    fn measure_text(&self, size: f32, text: &str, wrap_width: f32) -> TextMetrics { self.measure_text_limited(size, f32::MAX, wrap_width, text) }

    /// Like [`GlyphProvider::measure_text`], stopping before the first character that would cross `max_width`.
    fn measure_text_limited(&self, size: f32, max_width: f32, wrap_width: f32, text: &str) -> TextMetrics {
        let line_height = size;
        let scale = size / self.font_size();
        let mut m = TextMetrics::default();
        let mut line_width = 0.0f32;
        let word_wrap = wrap_width > 0.0;
        let mut word_wrap_eol: Option<usize> = None;

        let bytes = text.as_bytes();
        let mut s = 0;
        while s < text.len() {
            if word_wrap {
                let eol = match word_wrap_eol {
                    Some(eol) => eol,
                    None => {
                        let mut eol = s + self.calc_word_wrap_position(scale, &text[s..], wrap_width - line_width);
                        if eol == s {
                            eol += text[s..].chars().next().map_or(1, |c| c.len_utf8());
                        }
                        word_wrap_eol = Some(eol);
                        eol
                    }
                };
                if s >= eol {
                    m.width = m.width.max(line_width);
                    m.height += line_height;
                    line_width = 0.0;
                    word_wrap_eol = None;
                    while s < bytes.len() {
                        match bytes[s] {
                            b' ' | b'\t' => s += 1,
                            b'\n' => {
                                s += 1;
                                break;
                            }
                            _ => break,
                        }
                    }
                    continue;
                }
            }

            let prev_s = s;
            let c = match text[s..].chars().next() {
                Some(c) => c,
                None => break,
            };
            s += c.len_utf8();

            if (c as u32) < 32 {
                if c == '\n' {
                    m.width = m.width.max(line_width);
                    m.height += line_height;
                    line_width = 0.0;
                    continue;
                }
                if c == '\r' {
                    continue;
                }
            }

            let char_width = self.glyph_advance(c) * scale;
            if line_width + char_width >= max_width {
                s = prev_s;
                break;
            }
            line_width += char_width;
        }

        m.width = m.width.max(line_width);
        if line_width > 0.0 || m.height == 0.0 {
            m.height += line_height;
        }
        m.consumed = s;
        m
    }
}

#[derive(Clone)]
/// Glyph table of one font at one size.
pub struct Font {
    font_size: f32,
    ascent: f32,
    descent: f32,
    glyphs: Vec<Glyph>,
    lookup: HashMap<char, usize>,
    index_advance_x: Vec<f32>,
    fallback_char: char,
    fallback_index: Option<usize>,
    fallback_advance_x: f32,
    texture_id: TextureId,
    white_uv: Vec2f,
}

impl Debug for Font {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!(
            "Font {{ font_size: {}, glyphs: {}, fallback: {:?}, texture: {:?} }}",
            self.font_size,
            self.glyphs.len(),
            self.fallback_char,
            self.texture_id
        ))
    }
}

const FAST_LOOKUP: usize = 256;

impl Font {
    /// Builds the lookup tables over `glyphs`. A tab glyph is synthesised from the space glyph when missing.
    pub fn new(font_size: f32, mut glyphs: Vec<Glyph>, texture_id: TextureId, white_uv: Vec2f) -> Self {
        if !glyphs.iter().any(|g| g.codepoint == '\t') {
            if let Some(space) = glyphs.iter().find(|g| g.codepoint == ' ').cloned() {
                glyphs.push(Glyph { codepoint: '\t', advance_x: space.advance_x * 4.0, ..space });
            }
        }

        let lookup: HashMap<char, usize> = glyphs.iter().enumerate().map(|(i, g)| (g.codepoint, i)).collect();
        let fallback_char = '?';
        let fallback_index = lookup.get(&fallback_char).copied();
        let fallback_advance_x = fallback_index.map_or(font_size * 0.5, |i| glyphs[i].advance_x);

        let mut index_advance_x = vec![-1.0; FAST_LOOKUP];
        for g in &glyphs {
            if (g.codepoint as usize) < FAST_LOOKUP {
                index_advance_x[g.codepoint as usize] = g.advance_x;
            }
        }

        Self {
            font_size,
            ascent: font_size,
            descent: 0.0,
            glyphs,
            lookup,
            index_advance_x,
            fallback_char,
            fallback_index,
            fallback_advance_x,
            texture_id,
            white_uv,
        }
    }

    /// Overrides the advance used for characters with no glyph and no fallback glyph.
    pub fn with_fallback_advance(mut self, advance_x: f32) -> Self {
        if self.fallback_index.is_none() {
            self.fallback_advance_x = advance_x;
        }
        self
    }

    /// Sets the vertical metrics reported by [`Font::ascent`] and [`Font::descent`].
    pub fn with_vertical_metrics(mut self, ascent: f32, descent: f32) -> Self {
        self.ascent = ascent;
        self.descent = descent;
        self
    }

    /// Distance from the top of the line to the baseline.
    pub fn ascent(&self) -> f32 { self.ascent }

    /// Distance from the baseline to the bottom of the line, negative below the baseline.
    pub fn descent(&self) -> f32 { self.descent }

    /// Character substituted for missing glyphs.
    pub fn fallback_char(&self) -> char { self.fallback_char }

    /// Every glyph of the table.
    pub fn glyphs(&self) -> &[Glyph] { &self.glyphs }
}

impl GlyphProvider for Font {
    fn font_size(&self) -> f32 { self.font_size }

    fn glyph(&self, c: char) -> Option<&Glyph> { self.lookup.get(&c).map(|i| &self.glyphs[*i]) }

    fn fallback_glyph(&self) -> Option<&Glyph> { self.fallback_index.map(|i| &self.glyphs[i]) }

    fn glyph_advance(&self, c: char) -> f32 {
        let fast = self.index_advance_x.get(c as usize).copied().unwrap_or(-1.0);
        if fast >= 0.0 {
            return fast;
        }
        if (c as usize) < FAST_LOOKUP {
            return self.fallback_advance_x;
        }
        self.glyph(c).map_or(self.fallback_advance_x, |g| g.advance_x)
    }

    fn texture_id(&self) -> TextureId { self.texture_id }

    fn white_pixel_uv(&self) -> Vec2f { self.white_uv }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
/// Serialisable glyph table of one font.
pub struct FontTable {
    /// Native pixel size.
    pub font_size: f32,
    /// Ascent in pixels.
    pub ascent: f32,
    /// Descent in pixels.
    pub descent: f32,
    /// Glyph metrics.
    pub glyphs: Vec<Glyph>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
/// Serialisable description of an atlas: everything except the pixels.
pub struct GlyphTable {
    /// Texture width in pixels.
    pub width: usize,
    /// Texture height in pixels.
    pub height: usize,
    /// Pixel coordinates of an opaque white texel.
    pub white_pixel: [usize; 2],
    /// Fonts stored in the texture.
    pub fonts: Vec<FontTable>,
}

/// A pre-baked atlas shipped with an application.
pub struct AtlasSource<'a> {
    /// Texture width in pixels.
    pub width: usize,
    /// Texture height in pixels.
    pub height: usize,
    /// RGBA pixels, four bytes per pixel.
    pub pixels: &'a [u8],
    /// Pixel coordinates of an opaque white texel.
    pub white_pixel: [usize; 2],
    /// Fonts stored in the texture.
    pub fonts: &'a [FontTable],
    /// Texture id the host uploads the pixels under.
    pub texture_id: TextureId,
}

#[derive(Clone)]
/// Texture pixels plus the fonts whose glyphs live in them.
pub struct FontAtlas {
    width: usize,
    height: usize,
    pixels: Vec<Color4b>,
    white_pixel: [usize; 2],
    fonts: Vec<Rc<Font>>,
    tables: Vec<FontTable>,
    texture_id: TextureId,
}

impl Debug for FontAtlas {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("FontAtlas {{ {}x{}, fonts: {:?} }}", self.width, self.height, self.fonts))
    }
}

impl FontAtlas {
    pub(crate) fn from_parts(width: usize, height: usize, pixels: Vec<Color4b>, white_pixel: [usize; 2], tables: Vec<FontTable>, texture_id: TextureId) -> Self {
        let white_uv = vec2((white_pixel[0] as f32 + 0.5) / width.max(1) as f32, (white_pixel[1] as f32 + 0.5) / height.max(1) as f32);
        let fonts = tables
            .iter()
            .map(|t| Rc::new(Font::new(t.font_size, t.glyphs.clone(), texture_id, white_uv).with_vertical_metrics(t.ascent, t.descent)))
            .collect();
        Self { width, height, pixels, white_pixel, fonts, tables, texture_id }
    }

    /// Loads a pre-baked atlas.
    pub fn from_source(source: &AtlasSource) -> Result<Self> {
        let expected = source.width * source.height * 4;
        if source.pixels.len() != expected {
            return Err(Error::Image(format!("expected {} RGBA bytes, found {}", expected, source.pixels.len())));
        }
        if source.white_pixel[0] >= source.width || source.white_pixel[1] >= source.height {
            return Err(Error::Image(format!("white pixel {:?} outside a {}x{} atlas", source.white_pixel, source.width, source.height)));
        }
        let pixels = source.pixels.chunks_exact(4).map(|c| crate::color4b(c[0], c[1], c[2], c[3])).collect();
        Ok(Self::from_parts(source.width, source.height, pixels, source.white_pixel, source.fonts.to_vec(), source.texture_id))
    }

    /// Loads an atlas from raw RGBA bytes and a JSON glyph table.
    pub fn from_rgba_and_json(pixels: &[u8], json: &str, texture_id: TextureId) -> Result<Self> {
        let table: GlyphTable = serde_json::from_str(json)?;
        Self::from_source(&AtlasSource {
            width: table.width,
            height: table.height,
            pixels,
            white_pixel: table.white_pixel,
            fonts: &table.fonts,
            texture_id,
        })
    }

    /// Texture width in pixels.
    pub fn width(&self) -> usize { self.width }

    /// Texture height in pixels.
    pub fn height(&self) -> usize { self.height }

    /// Texture pixels, row major.
    pub fn pixels(&self) -> &[Color4b] { &self.pixels }

    /// Pixel coordinates of the white texel.
    pub fn white_pixel(&self) -> [usize; 2] { self.white_pixel }

    /// Texture id fonts of this atlas draw with.
    pub fn texture_id(&self) -> TextureId { self.texture_id }

    /// Fonts of the atlas, in insertion order.
    pub fn fonts(&self) -> &[Rc<Font>] { &self.fonts }

    /// First font of the atlas.
    pub fn default_font(&self) -> Option<Rc<Font>> { self.fonts.first().cloned() }

    /// Describes the atlas as JSON, for shipping alongside the pixels.
    pub fn glyph_table_json(&self) -> Result<String> {
        let table = GlyphTable { width: self.width, height: self.height, white_pixel: self.white_pixel, fonts: self.tables.clone() };
        Ok(serde_json::to_string_pretty(&table)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::test_font;

    #[test]
    fn wraps_at_the_last_blank() {
        let font = test_font();
        // "hello" is 35 px, "hello w" reaches 49, the next char crosses 50
        assert_eq!(font.calc_word_wrap_position(1.0, "hello world", 50.0), 5);
        assert_eq!(font.calc_word_wrap_position(1.0, "hello", 50.0), 5);
    }

    #[test]
    fn wraps_after_punctuation() {
        let font = test_font();
        assert_eq!(font.calc_word_wrap_position(1.0, "abc,defghij", 40.0), 4);
    }

    #[test]
    fn measures_lines() {
        let font = test_font();
        let m = font.measure_text(13.0, "ab\ncd", 0.0);
        assert_eq!((m.width, m.height), (14.0, 26.0));

        let m = font.measure_text(13.0, "hello world", 50.0);
        assert_eq!((m.width, m.height), (35.0, 26.0));
        assert_eq!(m.consumed, 11);

        let m = font.measure_text(13.0, "", 0.0);
        assert_eq!((m.width, m.height), (0.0, 13.0));
    }

    #[test]
    fn stops_at_max_width() {
        let font = test_font();
        let m = font.measure_text_limited(13.0, 20.0, 0.0, "abcdef");
        assert_eq!(m.consumed, 2);
        assert_eq!(m.width, 14.0);
    }

    #[test]
    fn missing_glyphs_fall_back() {
        let font = test_font();
        assert_eq!(font.glyph_advance('é'), 7.0);
        assert_eq!(font.glyph_advance('\t'), 28.0);

        let bare = Font::new(10.0, vec![Glyph { codepoint: 'a', advance_x: 6.0, ..Glyph::default() }], TextureId::default(), vec2(0.0, 0.0))
            .with_fallback_advance(3.0);
        assert!(bare.fallback_glyph().is_none());
        assert_eq!(bare.glyph_advance('z'), 3.0);
        assert_eq!(bare.glyph_advance('\u{4e16}'), 3.0);
    }

    #[test]
    fn atlas_rejects_short_pixel_buffers() {
        let fonts = [];
        let source = AtlasSource { width: 2, height: 2, pixels: &[0; 8], white_pixel: [0, 0], fonts: &fonts, texture_id: TextureId::new(1) };
        assert!(matches!(FontAtlas::from_source(&source), Err(Error::Image(_))));
    }

    #[test]
    fn glyph_table_json_reloads() {
        let table = FontTable {
            font_size: 13.0,
            ascent: 10.0,
            descent: -3.0,
            glyphs: vec![Glyph { codepoint: '?', advance_x: 7.0, x1: 7.0, y1: 13.0, ..Glyph::default() }],
        };
        let fonts = [table];
        let pixels = [255u8; 16];
        let source = AtlasSource { width: 2, height: 2, pixels: &pixels, white_pixel: [1, 1], fonts: &fonts, texture_id: TextureId::new(3) };
        let atlas = FontAtlas::from_source(&source).unwrap();
        let json = atlas.glyph_table_json().unwrap();

        let back = FontAtlas::from_rgba_and_json(&pixels, &json, TextureId::new(3)).unwrap();
        let font = back.default_font().unwrap();
        assert_eq!(font.glyph_advance('?'), 7.0);
        assert_eq!(font.descent(), -3.0);
        assert_eq!(font.white_pixel_uv().x, 0.75);
        assert_eq!(font.texture_id(), TextureId::new(3));
    }
}
