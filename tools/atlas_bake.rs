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
//! Bakes TTF fonts into an atlas PNG plus the JSON glyph table read back by `FontAtlas::from_png_and_json`.
//!
//! `atlas_bake --font <ttf> [--font <ttf> ...] [--size <px>] [--width <px>] [--height <px>] --output <stem>`
//! writes `<stem>.png` and `<stem>.json`.

use std::{env, error::Error, path::PathBuf};

use imgui_redux::{FontAtlasBuilder, TextureId, ASCII_RANGE};
use log::info;

struct Args {
    fonts: Vec<PathBuf>,
    size: f32,
    width: usize,
    height: usize,
    output: PathBuf,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = parse_args()?;
    let mut builder = FontAtlasBuilder::new(args.width, args.height)?;
    for font in &args.fonts {
        let index = builder.add_font_file(font, args.size, &[ASCII_RANGE])?;
        info!("font {} baked as #{}", font.display(), index);
    }
    let atlas = builder.build(TextureId::new(0));
    let png = args.output.with_extension("png");
    let json = args.output.with_extension("json");
    atlas.save_png(&png)?;
    std::fs::write(&json, atlas.glyph_table_json()?)?;
    info!("wrote {} and {}", png.display(), json.display());
    Ok(())
}

fn next_value(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<String, Box<dyn Error>> {
    args.next().ok_or_else(|| format!("{} requires a value", flag).into())
}

fn parse_args() -> Result<Args, Box<dyn Error>> {
    let mut out = Args { fonts: Vec::new(), size: 13.0, width: 512, height: 512, output: PathBuf::new() };
    let mut output = None;
    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--font" => out.fonts.push(PathBuf::from(next_value(&mut args, "--font")?)),
            "--size" => out.size = next_value(&mut args, "--size")?.parse()?,
            "--width" => out.width = next_value(&mut args, "--width")?.parse()?,
            "--height" => out.height = next_value(&mut args, "--height")?.parse()?,
            "--output" => output = Some(PathBuf::from(next_value(&mut args, "--output")?)),
            other => return Err(format!("unknown argument '{}'", other).into()),
        }
    }
    if out.fonts.is_empty() {
        return Err("missing --font <path>".into());
    }
    out.output = output.ok_or("missing --output <path>")?;
    Ok(out)
}
