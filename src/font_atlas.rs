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
//! Atlas baking: rasterises TTF fonts with `fontdue`, shelf-packs the glyphs into one RGBA texture and
//! reads/writes the texture as PNG.

use std::fs::File;
use std::io::{BufWriter, Cursor, Read, Write};
use std::ops::RangeInclusive;
use std::path::Path;

use fontdue::FontSettings;
use log::debug;
use png::{BitDepth, ColorType, Decoder, Transformations};

use crate::{color4b, Color4b, Error, FontAtlas, FontTable, Glyph, GlyphTable, Result, TextureId};

/// Printable ASCII, the range baked when the caller gives none.
pub const ASCII_RANGE: RangeInclusive<char> = ' '..='~';

const BORDER_PADDING: usize = 1;
const RECT_PADDING: usize = 1;

/// Packs rectangles left to right in rows whose height is the tallest rectangle of the row.
struct ShelfPacker {
    width: usize,
    height: usize,
    x: usize,
    y: usize,
    shelf_height: usize,
}

impl ShelfPacker {
    fn new(width: usize, height: usize) -> Self { Self { width, height, x: BORDER_PADDING, y: BORDER_PADDING, shelf_height: 0 } }

    fn pack(&mut self, w: usize, h: usize) -> Option<(usize, usize)> {
        if w + 2 * BORDER_PADDING > self.width {
            return None;
        }
        if self.x + w + BORDER_PADDING > self.width {
            self.y += self.shelf_height + RECT_PADDING;
            self.x = BORDER_PADDING;
            self.shelf_height = 0;
        }
        if self.y + h + BORDER_PADDING > self.height {
            return None;
        }
        let pos = (self.x, self.y);
        self.x += w + RECT_PADDING;
        self.shelf_height = self.shelf_height.max(h);
        Some(pos)
    }
}

/// Incrementally bakes fonts into an atlas texture.
pub struct FontAtlasBuilder {
    width: usize,
    height: usize,
    pixels: Vec<Color4b>,
    packer: ShelfPacker,
    white_pixel: [usize; 2],
    tables: Vec<FontTable>,
}

impl FontAtlasBuilder {
    /// Creates an empty `width` x `height` texture holding only the white texel.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        let mut builder = Self {
            width,
            height,
            pixels: vec![Color4b::default(); width * height],
            packer: ShelfPacker::new(width, height),
            white_pixel: [0, 0],
            tables: Vec::new(),
        };
        let white = [color4b(0xFF, 0xFF, 0xFF, 0xFF); 4];
        let (x, y) = builder.add_tile(2, 2, &white)?;
        builder.white_pixel = [x, y];
        Ok(builder)
    }

    /// Rasterises the TTF/OTF file at `path` and returns the font's index in the atlas.
    pub fn add_font_file<P: AsRef<Path>>(&mut self, path: P, size: f32, ranges: &[RangeInclusive<char>]) -> Result<usize> {
        let path = path.as_ref();
        let mut data = Vec::new();
        File::open(path)
            .and_then(|mut f| f.read_to_end(&mut data))
            .map_err(|e| Error::Font(format!("cannot read font file '{}': {}", path.display(), e)))?;
        self.add_font_bytes(&data, size, ranges)
    }

    /// Rasterises an in-memory font at `size` pixels for every char in `ranges` (printable ASCII when empty).
    pub fn add_font_bytes(&mut self, data: &[u8], size: f32, ranges: &[RangeInclusive<char>]) -> Result<usize> {
        let font = fontdue::Font::from_bytes(data, FontSettings { scale: size, ..FontSettings::default() }).map_err(|e| Error::Font(e.to_string()))?;
        let (ascent, descent) = match font.horizontal_line_metrics(size) {
            Some(m) => (m.ascent.round(), m.descent.round()),
            None => (size, 0.0),
        };

        let ranges = if ranges.is_empty() { std::slice::from_ref(&ASCII_RANGE) } else { ranges };
        let mut glyphs = Vec::new();
        for range in ranges {
            for ch in range.clone() {
                if font.lookup_glyph_index(ch) == 0 && ch != ' ' {
                    continue;
                }
                let (metrics, bitmap) = font.rasterize(ch, size);
                let tile: Vec<Color4b> = bitmap.iter().map(|a| color4b(0xFF, 0xFF, 0xFF, *a)).collect();
                let (x, y) = self.add_tile(metrics.width, metrics.height, &tile)?;
                let y0 = ascent - (metrics.ymin as f32 + metrics.height as f32);
                glyphs.push(Glyph {
                    codepoint: ch,
                    advance_x: metrics.advance_width.round(),
                    x0: metrics.xmin as f32,
                    y0,
                    x1: metrics.xmin as f32 + metrics.width as f32,
                    y1: y0 + metrics.height as f32,
                    u0: x as f32 / self.width as f32,
                    v0: y as f32 / self.height as f32,
                    u1: (x + metrics.width) as f32 / self.width as f32,
                    v1: (y + metrics.height) as f32 / self.height as f32,
                });
            }
        }

        debug!("baked {} glyphs at {}px into a {}x{} atlas", glyphs.len(), size, self.width, self.height);
        self.tables.push(FontTable { font_size: size, ascent, descent, glyphs });
        Ok(self.tables.len() - 1)
    }

    fn add_tile(&mut self, width: usize, height: usize, pixels: &[Color4b]) -> Result<(usize, usize)> {
        if width == 0 || height == 0 {
            return Ok((0, 0));
        }
        let (rx, ry) = self.packer.pack(width, height).ok_or(Error::AtlasFull { width: self.width, height: self.height })?;
        for y in 0..height {
            for x in 0..width {
                self.pixels[rx + x + (ry + y) * self.width] = pixels[x + y * width];
            }
        }
        Ok((rx, ry))
    }

    /// Finishes the atlas. Fonts draw with `texture_id`.
    pub fn build(self, texture_id: TextureId) -> FontAtlas {
        FontAtlas::from_parts(self.width, self.height, self.pixels, self.white_pixel, self.tables, texture_id)
    }
}

fn decode_png(bytes: &[u8]) -> Result<(usize, usize, Vec<Color4b>)> {
    let mut decoder = Decoder::new(Cursor::new(bytes));
    decoder.set_transformations(Transformations::normalize_to_color8());
    let mut reader = decoder.read_info().map_err(|e| Error::Image(format!("PNG decode error: {}", e)))?;
    let buf_size = reader.output_buffer_size().ok_or_else(|| Error::Image("PNG decoder did not report output size".into()))?;
    let mut data = vec![0; buf_size];
    let info = reader.next_frame(&mut data).map_err(|e| Error::Image(format!("PNG decode error: {}", e)))?;

    if info.bit_depth != BitDepth::Eight {
        return Err(Error::Image(format!("unsupported PNG bit depth: {:?}", info.bit_depth)));
    }
    let pixel_size = match info.color_type {
        ColorType::Grayscale => 1,
        ColorType::GrayscaleAlpha => 2,
        ColorType::Rgb => 3,
        ColorType::Rgba => 4,
        ColorType::Indexed => return Err(Error::Image("indexed PNGs are not supported".into())),
    };

    let (w, h) = (info.width as usize, info.height as usize);
    let mut pixels = Vec::with_capacity(w * h);
    for y in 0..h {
        let line = &data[y * info.line_size..(y + 1) * info.line_size];
        for px in line[..w * pixel_size].chunks_exact(pixel_size) {
            pixels.push(match px {
                [v] => color4b(*v, *v, *v, 0xFF),
                [v, a] => color4b(*v, *v, *v, *a),
                [r, g, b] => color4b(*r, *g, *b, 0xFF),
                [r, g, b, a] => color4b(*r, *g, *b, *a),
                _ => unreachable!(),
            });
        }
    }
    Ok((w, h, pixels))
}

impl FontAtlas {
    /// Encodes the texture as an RGBA PNG.
    pub fn to_png_bytes(&self) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut bytes, self.width() as u32, self.height() as u32);
            encoder.set_color(ColorType::Rgba);
            encoder.set_depth(BitDepth::Eight);
            let mut writer = encoder.write_header().map_err(|e| Error::Image(e.to_string()))?;
            let data: Vec<u8> = self.pixels().iter().flat_map(|c| [c.x, c.y, c.z, c.w]).collect();
            writer.write_image_data(&data).map_err(|e| Error::Image(e.to_string()))?;
        }
        Ok(bytes)
    }

    /// Writes the texture to `path` as PNG.
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut w = BufWriter::new(File::create(path)?);
        w.write_all(&self.to_png_bytes()?)?;
        Ok(())
    }

    /// Loads an atlas baked by `atlas_bake`: PNG pixels plus the JSON glyph table.
    pub fn from_png_and_json(png_bytes: &[u8], json: &str, texture_id: TextureId) -> Result<Self> {
        let table: GlyphTable = serde_json::from_str(json)?;
        let (w, h, pixels) = decode_png(png_bytes)?;
        if w != table.width || h != table.height {
            return Err(Error::Image(format!("atlas is {}x{} but the glyph table says {}x{}", w, h, table.width, table.height)));
        }
        Ok(FontAtlas::from_parts(w, h, pixels, table.white_pixel, table.fonts, texture_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shelf_packer_wraps_rows_and_fills_up() {
        let mut p = ShelfPacker::new(10, 10);
        assert_eq!(p.pack(4, 3), Some((1, 1)));
        assert_eq!(p.pack(3, 2), Some((6, 1)));
        // 10 + 3 + 1 > 10, so the next tile opens a new shelf below the tallest one
        assert_eq!(p.pack(3, 3), Some((1, 5)));
        assert_eq!(p.pack(9, 1), None);
        assert_eq!(p.pack(2, 5), None);
    }

    #[test]
    fn full_atlas_is_an_error() {
        let mut b = FontAtlasBuilder::new(8, 8).unwrap();
        let tile = vec![Color4b::default(); 36];
        assert!(matches!(b.add_tile(6, 6, &tile), Err(Error::AtlasFull { width: 8, height: 8 })));
    }

    #[test]
    fn bad_font_bytes_are_reported() {
        let mut b = FontAtlasBuilder::new(64, 64).unwrap();
        assert!(matches!(b.add_font_bytes(b"not a font", 13.0, &[]), Err(Error::Font(_))));
    }

    #[test]
    fn png_survives_a_save() {
        let b = FontAtlasBuilder::new(4, 4).unwrap();
        let atlas = b.build(TextureId::new(2));
        let png = atlas.to_png_bytes().unwrap();
        let json = atlas.glyph_table_json().unwrap();
        let back = FontAtlas::from_png_and_json(&png, &json, TextureId::new(2)).unwrap();
        assert_eq!(back.width(), 4);
        assert_eq!(back.white_pixel(), [1, 1]);
        assert_eq!(back.pixels()[1 + 4].w, 0xFF);
        assert_eq!(back.pixels()[0].w, 0);
    }
}
