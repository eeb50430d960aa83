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
//! Numeric helpers shared by drags and sliders: decimal rounding and a small printf-style formatter.

/// Rounds `v` half-up to `precision` decimals. A negative precision leaves the value untouched.
pub fn round_to_precision(v: f32, precision: i32) -> f32 { round_to_precision_f64(v as f64, precision) as f32 }

pub(crate) fn round_to_precision_f64(v: f64, precision: i32) -> f64 {
    if precision < 0 || !v.is_finite() {
        return v;
    }
    let scale = 10f64.powi(precision);
    (v * scale + 0.5).floor() / scale
}

/// Smallest step representable at `precision` decimals.
pub fn minimum_step_at_decimal_precision(precision: i32) -> f32 {
    const MIN_STEPS: [f32; 10] = [1.0, 0.1, 0.01, 0.001, 0.0001, 0.00001, 0.000001, 0.0000001, 0.00000001, 0.000000001];
    match precision {
        p if p < 0 => f32::MIN_POSITIVE,
        p if (p as usize) < MIN_STEPS.len() => MIN_STEPS[p as usize],
        p => 10f32.powi(-p),
    }
}

/// Decimal precision requested by the first conversion of `fmt`: its `.N`, 0 for integer conversions and
/// -1 (unrounded) for exponent forms. `default` applies when nothing is specified.
pub fn parse_format_precision(fmt: &str, default: i32) -> i32 {
    let bytes = fmt.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] != b'%' {
            i += 1;
            continue;
        }
        if bytes.get(i + 1) == Some(&b'%') {
            i += 2;
            continue;
        }
        return match Spec::parse(&bytes[i + 1..]) {
            Some((spec, _)) => match spec.conv {
                b'd' | b'i' => 0,
                b'e' | b'E' | b'g' | b'G' => -1,
                _ => spec.precision.map_or(default, |p| if p > 10 { default } else { p as i32 }),
            },
            None => default,
        };
    }
    default
}

/// Formats `v` through the printf subset `%[-+ 0#][width][.prec](f|d|i|e|g)` plus `%%`. Text around the
/// conversion is kept; malformed conversions are copied verbatim.
pub fn format_value(fmt: &str, v: f64) -> String {
    let bytes = fmt.as_bytes();
    let mut out = String::with_capacity(fmt.len() + 8);
    let mut lit = 0;
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] != b'%' {
            i += 1;
            continue;
        }
        out.push_str(&fmt[lit..i]);
        if bytes.get(i + 1) == Some(&b'%') {
            out.push('%');
            i += 2;
        } else if let Some((spec, len)) = Spec::parse(&bytes[i + 1..]) {
            out.push_str(&spec.render(v));
            i += 1 + len;
        } else {
            out.push('%');
            i += 1;
        }
        lit = i;
    }
    out.push_str(&fmt[lit..]);
    out
}

#[derive(Default)]
struct Spec {
    left: bool,
    plus: bool,
    space: bool,
    zero: bool,
    alt: bool,
    width: usize,
    precision: Option<usize>,
    conv: u8,
}

fn digits(b: &[u8]) -> (usize, usize) {
    let n = b.iter().take_while(|c| c.is_ascii_digit()).count();
    let v = b[..n].iter().fold(0usize, |acc, c| acc.saturating_mul(10).saturating_add((c - b'0') as usize));
    (v, n)
}

impl Spec {
    fn parse(b: &[u8]) -> Option<(Self, usize)> {
        let mut s = Spec::default();
        let mut j = 0;
        while let Some(c) = b.get(j) {
            match c {
                b'-' => s.left = true,
                b'+' => s.plus = true,
                b' ' => s.space = true,
                b'0' => s.zero = true,
                b'#' => s.alt = true,
                _ => break,
            }
            j += 1;
        }
        let (w, n) = digits(&b[j..]);
        s.width = w;
        j += n;
        if b.get(j) == Some(&b'.') {
            let (p, n) = digits(&b[j + 1..]);
            s.precision = Some(p);
            j += 1 + n;
        }
        match b.get(j) {
            Some(c @ (b'f' | b'F' | b'd' | b'i' | b'e' | b'E' | b'g' | b'G')) => {
                s.conv = *c;
                Some((s, j + 1))
            }
            _ => None,
        }
    }

    fn render(&self, v: f64) -> String {
        let upper = self.conv.is_ascii_uppercase();
        let neg = v.is_sign_negative() && !v.is_nan();
        let a = v.abs();
        let body = if !a.is_finite() {
            let s = if a.is_nan() { "nan" } else { "inf" };
            if upper { s.to_uppercase() } else { s.to_string() }
        } else {
            match self.conv {
                b'f' | b'F' => {
                    let p = self.precision.unwrap_or(6);
                    let mut s = format!("{:.*}", p, a);
                    if self.alt && p == 0 {
                        s.push('.');
                    }
                    s
                }
                b'd' | b'i' => {
                    let s = format!("{:.0}", a.round());
                    let min_digits = self.precision.unwrap_or(1);
                    if s.len() < min_digits { format!("{}{}", "0".repeat(min_digits - s.len()), s) } else { s }
                }
                b'e' | b'E' => exp_form(a, self.precision.unwrap_or(6), self.alt, upper),
                _ => general_form(a, self.precision.unwrap_or(6), self.alt, upper),
            }
        };
        let neg = neg && !(matches!(self.conv, b'd' | b'i') && body.bytes().all(|c| c == b'0'));
        let sign = if neg {
            "-"
        } else if self.plus {
            "+"
        } else if self.space {
            " "
        } else {
            ""
        };
        let len = sign.len() + body.len();
        if len >= self.width {
            return format!("{}{}", sign, body);
        }
        let fill = self.width - len;
        if self.left {
            format!("{}{}{}", sign, body, " ".repeat(fill))
        } else if self.zero && a.is_finite() {
            format!("{}{}{}", sign, "0".repeat(fill), body)
        } else {
            format!("{}{}{}", " ".repeat(fill), sign, body)
        }
    }
}

fn split_exp(s: &str) -> (&str, i32) {
    match s.split_once('e') {
        Some((m, e)) => (m, e.parse().unwrap_or(0)),
        None => (s, 0),
    }
}

fn exp_form(a: f64, p: usize, alt: bool, upper: bool) -> String {
    let s = format!("{:.*e}", p, a);
    let (mant, exp) = split_exp(&s);
    let dot = if alt && p == 0 { "." } else { "" };
    format!("{}{}{}{}{:02}", mant, dot, if upper { 'E' } else { 'e' }, if exp < 0 { '-' } else { '+' }, exp.abs())
}

fn trim_fraction(s: &str) -> &str {
    if s.contains('.') { s.trim_end_matches('0').trim_end_matches('.') } else { s }
}

fn general_form(a: f64, p: usize, alt: bool, upper: bool) -> String {
    let p = p.max(1);
    let x = if a == 0.0 { 0 } else { split_exp(&format!("{:.*e}", p - 1, a)).1 };
    if x >= -4 && x < p as i32 {
        let s = format!("{:.*}", (p as i32 - 1 - x) as usize, a);
        if alt { s } else { trim_fraction(&s).to_string() }
    } else {
        let s = exp_form(a, p - 1, alt, upper);
        if alt {
            return s;
        }
        let at = s.find(['e', 'E']).unwrap_or(s.len());
        format!("{}{}", trim_fraction(&s[..at]), &s[at..])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_half_up() {
        assert_eq!(round_to_precision(1.25, 1), 1.3);
        assert_eq!(round_to_precision(-1.25, 1), -1.2);
        assert_eq!(round_to_precision(7.5, 0), 8.0);
        assert_eq!(round_to_precision(0.123456, 3), 0.123);
        assert_eq!(round_to_precision(3.7, -1), 3.7);
    }

    #[test]
    fn minimum_steps() {
        assert_eq!(minimum_step_at_decimal_precision(0), 1.0);
        assert_eq!(minimum_step_at_decimal_precision(3), 0.001);
        assert_eq!(minimum_step_at_decimal_precision(-1), f32::MIN_POSITIVE);
        assert!((minimum_step_at_decimal_precision(12) - 1e-12).abs() < 1e-18);
    }

    #[test]
    fn precision_from_format() {
        assert_eq!(parse_format_precision("%.3f", 6), 3);
        assert_eq!(parse_format_precision("x=%8.1f units", 6), 1);
        assert_eq!(parse_format_precision("%f", 6), 6);
        assert_eq!(parse_format_precision("%d", 3), 0);
        assert_eq!(parse_format_precision("%e", 3), -1);
        assert_eq!(parse_format_precision("100%% %.2f", 3), 2);
        assert_eq!(parse_format_precision("no conversion", 4), 4);
        assert_eq!(parse_format_precision("%.20f", 4), 4);
    }

    #[test]
    fn formats_fixed_and_integers() {
        assert_eq!(format_value("%.3f", 1.0), "1.000");
        assert_eq!(format_value("%f", 0.5), "0.500000");
        assert_eq!(format_value("Value: %5.1f%%", 3.14159), "Value:   3.1%");
        assert_eq!(format_value("%05.1f", -2.5), "-02.5");
        assert_eq!(format_value("%d", 42.0), "42");
        assert_eq!(format_value("%+d", 5.0), "+5");
        assert_eq!(format_value("%-4d|", 7.0), "7   |");
        assert_eq!(format_value("%.0f deg", 90.0), "90 deg");
    }

    #[test]
    fn formats_exponent_and_general() {
        assert_eq!(format_value("%e", 1234.5), "1.234500e+03");
        assert_eq!(format_value("%.2E", 0.000123), "1.23E-04");
        assert_eq!(format_value("%g", 0.0001), "0.0001");
        assert_eq!(format_value("%g", 0.00001), "1e-05");
        assert_eq!(format_value("%g", 123456789.0), "1.23457e+08");
        assert_eq!(format_value("%g", 2.5), "2.5");
        assert_eq!(format_value("%g", 0.0), "0");
    }

    #[test]
    fn malformed_conversions_are_kept() {
        assert_eq!(format_value("%q and %", 1.0), "%q and %");
        assert_eq!(format_value("plain", 1.0), "plain");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn rounding_is_idempotent(v in -100.0f32..100.0, p in 0i32..4) {
            let once = round_to_precision(v, p);
            prop_assert_eq!(round_to_precision(once, p), once);
        }

        #[test]
        fn fixed_format_has_the_requested_decimals(v in -1.0e6f64..1.0e6, p in 0usize..6) {
            let s = format_value(&format!("%.{}f", p), v);
            let decimals = s.split_once('.').map_or(0, |(_, d)| d.len());
            prop_assert_eq!(decimals, p);
        }
    }
}
