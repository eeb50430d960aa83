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
//! Fixtures shared by the unit tests: a fixed-metric font and a one-call frame runner.

use std::rc::Rc;

use crate::{vec2, Config, Context, Font, Glyph, TextureId};

/// Every printable ASCII glyph advances 7 px on a 13 px line. Blanks have no quad.
pub(crate) fn test_font() -> Rc<Font> {
    let glyphs = (' '..='~')
        .map(|c| {
            let (x1, y1) = if c == ' ' { (0.0, 0.0) } else { (6.0, 13.0) };
            Glyph { codepoint: c, advance_x: 7.0, x0: 0.0, y0: 0.0, x1, y1, u0: 0.0, v0: 0.0, u1: 0.5, v1: 0.5 }
        })
        .collect();
    Rc::new(Font::new(13.0, glyphs, TextureId::new(1), vec2(0.75, 0.75)))
}

/// Context on an 800x600 display.
pub(crate) fn context() -> Context { Context::new(test_font(), Config { display_size: [800.0, 600.0], ..Config::default() }) }

/// Runs `f` between `new_frame` and `render`.
pub(crate) fn run_frame<F: FnOnce(&mut Context)>(ctx: &mut Context, f: F) { ctx.frame(f); }
