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
//! Visual style: sizes, paddings and the color palette, plus the push/pop modifier stacks.

use log::warn;

use crate::{vec2, Color, Vec2f};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
/// Semantic color slots of the palette.
#[allow(missing_docs)]
pub enum StyleColor {
    Text,
    TextDisabled,
    WindowBg,
    ChildBg,
    PopupBg,
    Border,
    BorderShadow,
    FrameBg,
    FrameBgHovered,
    FrameBgActive,
    TitleBg,
    TitleBgActive,
    TitleBgCollapsed,
    MenuBarBg,
    ScrollbarBg,
    ScrollbarGrab,
    ScrollbarGrabHovered,
    ScrollbarGrabActive,
    CheckMark,
    SliderGrab,
    SliderGrabActive,
    Button,
    ButtonHovered,
    ButtonActive,
    Header,
    HeaderHovered,
    HeaderActive,
    Separator,
    SeparatorHovered,
    SeparatorActive,
    ResizeGrip,
    ResizeGripHovered,
    ResizeGripActive,
    CloseButton,
    CloseButtonHovered,
    CloseButtonActive,
    PlotLines,
    PlotLinesHovered,
    PlotHistogram,
    PlotHistogramHovered,
    TextSelectedBg,
    ModalWindowDarkening,
    DragDropTarget,
    NavHighlight,
    NavWindowingHighlight,
}

impl StyleColor {
    /// Number of palette entries.
    pub const COUNT: usize = 45;
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
/// Style variables that can be temporarily overridden with [`crate::Context::push_style_var`].
pub enum StyleVar {
    /// `Style::alpha` (float).
    Alpha,
    /// `Style::window_padding` (vec2).
    WindowPadding,
    /// `Style::window_rounding` (float).
    WindowRounding,
    /// `Style::window_border_size` (float).
    WindowBorderSize,
    /// `Style::window_min_size` (vec2).
    WindowMinSize,
    /// `Style::child_rounding` (float).
    ChildRounding,
    /// `Style::child_border_size` (float).
    ChildBorderSize,
    /// `Style::popup_rounding` (float).
    PopupRounding,
    /// `Style::popup_border_size` (float).
    PopupBorderSize,
    /// `Style::frame_padding` (vec2).
    FramePadding,
    /// `Style::frame_rounding` (float).
    FrameRounding,
    /// `Style::frame_border_size` (float).
    FrameBorderSize,
    /// `Style::item_spacing` (vec2).
    ItemSpacing,
    /// `Style::item_inner_spacing` (vec2).
    ItemInnerSpacing,
    /// `Style::indent_spacing` (float).
    IndentSpacing,
    /// `Style::grab_min_size` (float).
    GrabMinSize,
    /// `Style::button_text_align` (vec2).
    ButtonTextAlign,
}

#[derive(Copy, Clone, Debug)]
/// Value carried by a style variable modifier.
pub enum StyleValue {
    /// Scalar variable.
    Float(f32),
    /// Two component variable.
    Vec2(Vec2f),
}

#[derive(Copy, Clone, Debug)]
/// Saved palette entry restored by `pop_style_color`.
pub struct ColorMod {
    /// Palette slot.
    pub idx: StyleColor,
    /// Value before the push.
    pub backup: Color,
}

#[derive(Copy, Clone, Debug)]
/// Saved variable restored by `pop_style_var`.
pub struct StyleMod {
    /// Modified variable.
    pub var: StyleVar,
    /// Value before the push.
    pub backup: StyleValue,
}

#[derive(Clone, Debug)]
/// Sizes, paddings and colors used by every widget.
pub struct Style {
    /// Global alpha applied to every color.
    pub alpha: f32,
    /// Padding inside windows.
    pub window_padding: Vec2f,
    /// Window corner radius.
    pub window_rounding: f32,
    /// Window border thickness.
    pub window_border_size: f32,
    /// Minimum window size.
    pub window_min_size: Vec2f,
    /// Title text alignment inside the title bar.
    pub window_title_align: Vec2f,
    /// Child window corner radius.
    pub child_rounding: f32,
    /// Child window border thickness.
    pub child_border_size: f32,
    /// Popup corner radius.
    pub popup_rounding: f32,
    /// Popup border thickness.
    pub popup_border_size: f32,
    /// Padding inside framed widgets.
    pub frame_padding: Vec2f,
    /// Frame corner radius.
    pub frame_rounding: f32,
    /// Frame border thickness.
    pub frame_border_size: f32,
    /// Spacing between items.
    pub item_spacing: Vec2f,
    /// Spacing between the parts of a composite widget.
    pub item_inner_spacing: Vec2f,
    /// Extra reactive area around items for imprecise pointers.
    pub touch_extra_padding: Vec2f,
    /// Indentation of tree nodes.
    pub indent_spacing: f32,
    /// Scrollbar thickness.
    pub scrollbar_size: f32,
    /// Scrollbar grab radius.
    pub scrollbar_rounding: f32,
    /// Minimum grab size of sliders and scrollbars.
    pub grab_min_size: f32,
    /// Grab corner radius.
    pub grab_rounding: f32,
    /// Button label alignment.
    pub button_text_align: Vec2f,
    /// Minimum visible margin kept when clamping windows to the display.
    pub display_window_padding: Vec2f,
    /// Margin kept free of popups and tooltips on the display edges.
    pub display_safe_area_padding: Vec2f,
    /// Anti-alias strokes.
    pub anti_aliased_lines: bool,
    /// Anti-alias filled shapes.
    pub anti_aliased_fill: bool,
    /// Curve tessellation tolerance; lower means more segments.
    pub curve_tessellation_tol: f32,
    /// Palette indexed by [`StyleColor`].
    pub colors: [Color; StyleColor::COUNT],
}

impl Default for Style {
    fn default() -> Self {
        let mut style = Self {
            alpha: 1.0,
            window_padding: vec2(8.0, 8.0),
            window_rounding: 7.0,
            window_border_size: 1.0,
            window_min_size: vec2(32.0, 32.0),
            window_title_align: vec2(0.0, 0.5),
            child_rounding: 0.0,
            child_border_size: 1.0,
            popup_rounding: 0.0,
            popup_border_size: 1.0,
            frame_padding: vec2(4.0, 3.0),
            frame_rounding: 0.0,
            frame_border_size: 0.0,
            item_spacing: vec2(8.0, 4.0),
            item_inner_spacing: vec2(4.0, 4.0),
            touch_extra_padding: vec2(0.0, 0.0),
            indent_spacing: 21.0,
            scrollbar_size: 16.0,
            scrollbar_rounding: 9.0,
            grab_min_size: 10.0,
            grab_rounding: 0.0,
            button_text_align: vec2(0.5, 0.5),
            display_window_padding: vec2(22.0, 22.0),
            display_safe_area_padding: vec2(4.0, 4.0),
            anti_aliased_lines: true,
            anti_aliased_fill: true,
            curve_tessellation_tol: 1.25,
            colors: [Color::TRANSPARENT; StyleColor::COUNT],
        };
        style.colors_dark();
        style
    }
}

fn c(r: f32, g: f32, b: f32, a: f32) -> Color { Color::from_f32(r, g, b, a) }

impl Style {
    /// Default style with the light palette.
    pub fn light() -> Self {
        let mut style = Self::default();
        style.colors_light();
        style
    }

    /// Palette entry with the global alpha applied.
    pub fn color(&self, idx: StyleColor, alpha_mul: f32) -> Color { self.colors[idx as usize].scale_alpha(self.alpha * alpha_mul) }

    /// Replaces the palette with the dark theme.
    pub fn colors_dark(&mut self) {
        use StyleColor::*;
        let colors = &mut self.colors;
        colors[Text as usize] = c(1.00, 1.00, 1.00, 1.00);
        colors[TextDisabled as usize] = c(0.50, 0.50, 0.50, 1.00);
        colors[WindowBg as usize] = c(0.06, 0.06, 0.06, 0.94);
        colors[ChildBg as usize] = c(1.00, 1.00, 1.00, 0.00);
        colors[PopupBg as usize] = c(0.08, 0.08, 0.08, 0.94);
        colors[Border as usize] = c(0.43, 0.43, 0.50, 0.50);
        colors[BorderShadow as usize] = c(0.00, 0.00, 0.00, 0.00);
        colors[FrameBg as usize] = c(0.16, 0.29, 0.48, 0.54);
        colors[FrameBgHovered as usize] = c(0.26, 0.59, 0.98, 0.40);
        colors[FrameBgActive as usize] = c(0.26, 0.59, 0.98, 0.67);
        colors[TitleBg as usize] = c(0.04, 0.04, 0.04, 1.00);
        colors[TitleBgActive as usize] = c(0.16, 0.29, 0.48, 1.00);
        colors[TitleBgCollapsed as usize] = c(0.00, 0.00, 0.00, 0.51);
        colors[MenuBarBg as usize] = c(0.14, 0.14, 0.14, 1.00);
        colors[ScrollbarBg as usize] = c(0.02, 0.02, 0.02, 0.53);
        colors[ScrollbarGrab as usize] = c(0.31, 0.31, 0.31, 1.00);
        colors[ScrollbarGrabHovered as usize] = c(0.41, 0.41, 0.41, 1.00);
        colors[ScrollbarGrabActive as usize] = c(0.51, 0.51, 0.51, 1.00);
        colors[CheckMark as usize] = c(0.26, 0.59, 0.98, 1.00);
        colors[SliderGrab as usize] = c(0.24, 0.52, 0.88, 1.00);
        colors[SliderGrabActive as usize] = c(0.26, 0.59, 0.98, 1.00);
        colors[Button as usize] = c(0.26, 0.59, 0.98, 0.40);
        colors[ButtonHovered as usize] = c(0.26, 0.59, 0.98, 1.00);
        colors[ButtonActive as usize] = c(0.06, 0.53, 0.98, 1.00);
        colors[Header as usize] = c(0.26, 0.59, 0.98, 0.31);
        colors[HeaderHovered as usize] = c(0.26, 0.59, 0.98, 0.80);
        colors[HeaderActive as usize] = c(0.26, 0.59, 0.98, 1.00);
        colors[Separator as usize] = colors[Border as usize];
        colors[SeparatorHovered as usize] = c(0.10, 0.40, 0.75, 0.78);
        colors[SeparatorActive as usize] = c(0.10, 0.40, 0.75, 1.00);
        colors[ResizeGrip as usize] = c(0.26, 0.59, 0.98, 0.25);
        colors[ResizeGripHovered as usize] = c(0.26, 0.59, 0.98, 0.67);
        colors[ResizeGripActive as usize] = c(0.26, 0.59, 0.98, 0.95);
        colors[CloseButton as usize] = c(0.41, 0.41, 0.41, 0.50);
        colors[CloseButtonHovered as usize] = c(0.98, 0.39, 0.36, 1.00);
        colors[CloseButtonActive as usize] = c(0.98, 0.39, 0.36, 1.00);
        colors[PlotLines as usize] = c(0.61, 0.61, 0.61, 1.00);
        colors[PlotLinesHovered as usize] = c(1.00, 0.43, 0.35, 1.00);
        colors[PlotHistogram as usize] = c(0.90, 0.70, 0.00, 1.00);
        colors[PlotHistogramHovered as usize] = c(1.00, 0.60, 0.00, 1.00);
        colors[TextSelectedBg as usize] = c(0.26, 0.59, 0.98, 0.35);
        colors[ModalWindowDarkening as usize] = c(0.80, 0.80, 0.80, 0.35);
        colors[DragDropTarget as usize] = c(1.00, 1.00, 0.00, 0.90);
        colors[NavHighlight as usize] = c(0.26, 0.59, 0.98, 1.00);
        colors[NavWindowingHighlight as usize] = c(1.00, 1.00, 1.00, 0.70);
    }

    /// Replaces the palette with the light theme.
    pub fn colors_light(&mut self) {
        use StyleColor::*;
        let colors = &mut self.colors;
        colors[Text as usize] = c(0.00, 0.00, 0.00, 1.00);
        colors[TextDisabled as usize] = c(0.60, 0.60, 0.60, 1.00);
        colors[WindowBg as usize] = c(0.94, 0.94, 0.94, 1.00);
        colors[ChildBg as usize] = c(1.00, 1.00, 1.00, 0.00);
        colors[PopupBg as usize] = c(1.00, 1.00, 1.00, 0.98);
        colors[Border as usize] = c(0.00, 0.00, 0.00, 0.30);
        colors[BorderShadow as usize] = c(0.00, 0.00, 0.00, 0.00);
        colors[FrameBg as usize] = c(1.00, 1.00, 1.00, 1.00);
        colors[FrameBgHovered as usize] = c(0.26, 0.59, 0.98, 0.40);
        colors[FrameBgActive as usize] = c(0.26, 0.59, 0.98, 0.67);
        colors[TitleBg as usize] = c(0.96, 0.96, 0.96, 1.00);
        colors[TitleBgActive as usize] = c(0.82, 0.82, 0.82, 1.00);
        colors[TitleBgCollapsed as usize] = c(1.00, 1.00, 1.00, 0.51);
        colors[MenuBarBg as usize] = c(0.86, 0.86, 0.86, 1.00);
        colors[ScrollbarBg as usize] = c(0.98, 0.98, 0.98, 0.53);
        colors[ScrollbarGrab as usize] = c(0.69, 0.69, 0.69, 0.80);
        colors[ScrollbarGrabHovered as usize] = c(0.49, 0.49, 0.49, 0.80);
        colors[ScrollbarGrabActive as usize] = c(0.49, 0.49, 0.49, 1.00);
        colors[CheckMark as usize] = c(0.26, 0.59, 0.98, 1.00);
        colors[SliderGrab as usize] = c(0.26, 0.59, 0.98, 0.78);
        colors[SliderGrabActive as usize] = c(0.46, 0.54, 0.80, 0.60);
        colors[Button as usize] = c(0.26, 0.59, 0.98, 0.40);
        colors[ButtonHovered as usize] = c(0.26, 0.59, 0.98, 1.00);
        colors[ButtonActive as usize] = c(0.06, 0.53, 0.98, 1.00);
        colors[Header as usize] = c(0.26, 0.59, 0.98, 0.31);
        colors[HeaderHovered as usize] = c(0.26, 0.59, 0.98, 0.80);
        colors[HeaderActive as usize] = c(0.26, 0.59, 0.98, 1.00);
        colors[Separator as usize] = c(0.39, 0.39, 0.39, 1.00);
        colors[SeparatorHovered as usize] = c(0.14, 0.44, 0.80, 0.78);
        colors[SeparatorActive as usize] = c(0.14, 0.44, 0.80, 1.00);
        colors[ResizeGrip as usize] = c(0.80, 0.80, 0.80, 0.56);
        colors[ResizeGripHovered as usize] = c(0.26, 0.59, 0.98, 0.67);
        colors[ResizeGripActive as usize] = c(0.26, 0.59, 0.98, 0.95);
        colors[CloseButton as usize] = c(0.59, 0.59, 0.59, 0.50);
        colors[CloseButtonHovered as usize] = c(0.98, 0.39, 0.36, 1.00);
        colors[CloseButtonActive as usize] = c(0.98, 0.39, 0.36, 1.00);
        colors[PlotLines as usize] = c(0.39, 0.39, 0.39, 1.00);
        colors[PlotLinesHovered as usize] = c(1.00, 0.43, 0.35, 1.00);
        colors[PlotHistogram as usize] = c(0.90, 0.70, 0.00, 1.00);
        colors[PlotHistogramHovered as usize] = c(1.00, 0.45, 0.00, 1.00);
        colors[TextSelectedBg as usize] = c(0.26, 0.59, 0.98, 0.35);
        colors[ModalWindowDarkening as usize] = c(0.20, 0.20, 0.20, 0.35);
        colors[DragDropTarget as usize] = c(0.26, 0.59, 0.98, 0.95);
        colors[NavHighlight as usize] = colors[HeaderHovered as usize];
        colors[NavWindowingHighlight as usize] = c(0.70, 0.70, 0.70, 0.70);
    }

    fn var(&self, var: StyleVar) -> StyleValue {
        use StyleValue::*;
        match var {
            StyleVar::Alpha => Float(self.alpha),
            StyleVar::WindowPadding => Vec2(self.window_padding),
            StyleVar::WindowRounding => Float(self.window_rounding),
            StyleVar::WindowBorderSize => Float(self.window_border_size),
            StyleVar::WindowMinSize => Vec2(self.window_min_size),
            StyleVar::ChildRounding => Float(self.child_rounding),
            StyleVar::ChildBorderSize => Float(self.child_border_size),
            StyleVar::PopupRounding => Float(self.popup_rounding),
            StyleVar::PopupBorderSize => Float(self.popup_border_size),
            StyleVar::FramePadding => Vec2(self.frame_padding),
            StyleVar::FrameRounding => Float(self.frame_rounding),
            StyleVar::FrameBorderSize => Float(self.frame_border_size),
            StyleVar::ItemSpacing => Vec2(self.item_spacing),
            StyleVar::ItemInnerSpacing => Vec2(self.item_inner_spacing),
            StyleVar::IndentSpacing => Float(self.indent_spacing),
            StyleVar::GrabMinSize => Float(self.grab_min_size),
            StyleVar::ButtonTextAlign => Vec2(self.button_text_align),
        }
    }

    fn float_slot(&mut self, var: StyleVar) -> Option<&mut f32> {
        match var {
            StyleVar::Alpha => Some(&mut self.alpha),
            StyleVar::WindowRounding => Some(&mut self.window_rounding),
            StyleVar::WindowBorderSize => Some(&mut self.window_border_size),
            StyleVar::ChildRounding => Some(&mut self.child_rounding),
            StyleVar::ChildBorderSize => Some(&mut self.child_border_size),
            StyleVar::PopupRounding => Some(&mut self.popup_rounding),
            StyleVar::PopupBorderSize => Some(&mut self.popup_border_size),
            StyleVar::FrameRounding => Some(&mut self.frame_rounding),
            StyleVar::FrameBorderSize => Some(&mut self.frame_border_size),
            StyleVar::IndentSpacing => Some(&mut self.indent_spacing),
            StyleVar::GrabMinSize => Some(&mut self.grab_min_size),
            _ => None,
        }
    }

    fn vec2_slot(&mut self, var: StyleVar) -> Option<&mut Vec2f> {
        match var {
            StyleVar::WindowPadding => Some(&mut self.window_padding),
            StyleVar::WindowMinSize => Some(&mut self.window_min_size),
            StyleVar::FramePadding => Some(&mut self.frame_padding),
            StyleVar::ItemSpacing => Some(&mut self.item_spacing),
            StyleVar::ItemInnerSpacing => Some(&mut self.item_inner_spacing),
            StyleVar::ButtonTextAlign => Some(&mut self.button_text_align),
            _ => None,
        }
    }

    /// Writes `value` into `var`. Returns `false` when the value kind does not match the variable.
    fn set_var(&mut self, var: StyleVar, value: StyleValue) -> bool {
        match value {
            StyleValue::Float(v) => match self.float_slot(var) {
                Some(slot) => {
                    *slot = v;
                    true
                }
                None => false,
            },
            StyleValue::Vec2(v) => match self.vec2_slot(var) {
                Some(slot) => {
                    *slot = v;
                    true
                }
                None => false,
            },
        }
    }
}

#[derive(Clone, Debug, Default)]
/// Undo stacks for pushed colors and variables.
pub struct StyleStack {
    colors: Vec<ColorMod>,
    vars: Vec<StyleMod>,
}

impl StyleStack {
    /// Overrides palette slot `idx` until the matching pop.
    pub fn push_color(&mut self, style: &mut Style, idx: StyleColor, col: Color) {
        self.colors.push(ColorMod { idx, backup: style.colors[idx as usize] });
        style.colors[idx as usize] = col;
    }

    /// Restores the last `count` pushed colors.
    pub fn pop_colors(&mut self, style: &mut Style, count: usize) {
        for _ in 0..count {
            match self.colors.pop() {
                Some(m) => style.colors[m.idx as usize] = m.backup,
                None => {
                    debug_assert!(false, "pop_style_color() called more times than push_style_color()");
                    warn!("style color stack underflow ignored");
                    return;
                }
            }
        }
    }

    /// Overrides `var` until the matching pop.
    pub fn push_var(&mut self, style: &mut Style, var: StyleVar, value: StyleValue) {
        let backup = style.var(var);
        if style.set_var(var, value) {
            self.vars.push(StyleMod { var, backup });
        } else {
            debug_assert!(false, "push_style_var({:?}) called with a mismatched value kind", var);
            warn!("style var {:?} pushed with a mismatched value kind", var);
        }
    }

    /// Restores the last `count` pushed variables.
    pub fn pop_vars(&mut self, style: &mut Style, count: usize) {
        for _ in 0..count {
            match self.vars.pop() {
                Some(m) => {
                    style.set_var(m.var, m.backup);
                }
                None => {
                    debug_assert!(false, "pop_style_var() called more times than push_style_var()");
                    warn!("style var stack underflow ignored");
                    return;
                }
            }
        }
    }

    /// Number of pushed colors.
    pub fn color_depth(&self) -> usize { self.colors.len() }

    /// Number of pushed variables.
    pub fn var_depth(&self) -> usize { self.vars.len() }

    /// Undoes every pending modifier.
    pub fn unwind(&mut self, style: &mut Style) {
        let (c, v) = (self.colors.len(), self.vars.len());
        self.pop_colors(style, c);
        self.pop_vars(style, v);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dark_palette_is_complete() {
        let s = Style::default();
        assert_eq!(s.colors[StyleColor::Text as usize], Color::WHITE);
        assert_eq!(s.colors[StyleColor::Separator as usize], s.colors[StyleColor::Border as usize]);
        assert_eq!(StyleColor::NavWindowingHighlight as usize + 1, StyleColor::COUNT);
        assert_eq!(Style::light().colors[StyleColor::Text as usize], Color::BLACK);
    }

    #[test]
    fn push_pop_restores() {
        let mut s = Style::default();
        let mut st = StyleStack::default();
        let before = s.colors[StyleColor::Button as usize];
        st.push_color(&mut s, StyleColor::Button, Color::WHITE);
        st.push_var(&mut s, StyleVar::FrameRounding, StyleValue::Float(4.0));
        st.push_var(&mut s, StyleVar::ItemSpacing, StyleValue::Vec2(vec2(1.0, 2.0)));
        assert_eq!(s.frame_rounding, 4.0);
        assert_eq!(s.item_spacing.y, 2.0);
        st.pop_vars(&mut s, 2);
        st.pop_colors(&mut s, 1);
        assert_eq!(s.frame_rounding, 0.0);
        assert_eq!(s.item_spacing.x, 8.0);
        assert_eq!(s.colors[StyleColor::Button as usize], before);
        assert_eq!((st.color_depth(), st.var_depth()), (0, 0));
    }

    #[test]
    fn global_alpha_scales_colors() {
        let mut s = Style::default();
        s.alpha = 0.5;
        assert_eq!(s.color(StyleColor::Text, 1.0).a, 128);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic]
    fn mismatched_kind_is_asserted() {
        let mut s = Style::default();
        StyleStack::default().push_var(&mut s, StyleVar::Alpha, StyleValue::Vec2(vec2(1.0, 1.0)));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic]
    fn underflow_is_asserted() {
        let mut s = Style::default();
        StyleStack::default().pop_colors(&mut s, 1);
    }
}
