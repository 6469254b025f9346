//! Numeric patterns: `#,##0.00`, `0.0%`, `#,##0,"K"`, `0.00E+00`, `# ?/?`.
//!
//! A pattern is split at its first and last digit placeholder. Everything
//! before is the prefix, everything after the suffix, both rendered as
//! literal text. Literals between placeholders (`000-0000`) stay in place.

use super::literal::{pieces, render_pieces, Piece};
use crate::error::FormatError;

/// Divisor applied before rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scale {
    Thousands,
    Millions,
    Billions,
}

impl Scale {
    pub fn divisor(self) -> f64 {
        match self {
            Scale::Thousands => 1e3,
            Scale::Millions => 1e6,
            Scale::Billions => 1e9,
        }
    }

    // Three or more trailing commas all mean billions.
    fn from_commas(count: usize) -> Option<Self> {
        match count {
            0 => None,
            1 => Some(Scale::Thousands),
            2 => Some(Scale::Millions),
            _ => Some(Scale::Billions),
        }
    }

    fn from_letter(c: char) -> Option<Self> {
        match c {
            'K' => Some(Scale::Thousands),
            'M' => Some(Scale::Millions),
            'B' => Some(Scale::Billions),
            _ => None,
        }
    }
}

/// Fraction rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fraction {
    /// A fixed denominator in price notation: `99-16` for 99.5 over 32nds.
    Fixed(u32),
    /// The closest fraction whose denominator has at most this many digits.
    Vulgar { max_digits: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Digit {
    /// `0`: always shown.
    Zero,
    /// `#`: shown only when significant.
    Hash,
    /// `?`: a space when not significant.
    Question,
}

impl Digit {
    fn from_char(c: char) -> Option<Self> {
        match c {
            '0' => Some(Digit::Zero),
            '#' => Some(Digit::Hash),
            '?' => Some(Digit::Question),
            _ => None,
        }
    }

    fn filler(self) -> Option<char> {
        match self {
            Digit::Zero => Some('0'),
            Digit::Question => Some(' '),
            Digit::Hash => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Slot {
    Digit(Digit),
    Literal(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
struct Layout {
    int_slots: Vec<Slot>,
    frac_slots: Vec<Slot>,
    grouping: bool,
    decimal_point: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct Exponent {
    digits: usize,
    always_sign: bool,
    marker: char,
}

/// A compiled numeric pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NumberPattern {
    prefix: String,
    suffix: String,
    layout: Layout,
    percent: u32,
    scale: Option<Scale>,
    fraction: Option<Fraction>,
    whole_part: bool,
    exponent: Option<Exponent>,
}

fn is_placeholder(piece: &Piece<'_>) -> bool {
    matches!(piece, Piece::Raw(_, '0' | '#' | '?'))
}

impl NumberPattern {
    /// Parses a pattern body. Returns `None` when it has no digit placeholder.
    pub fn parse(body: &str) -> Option<Self> {
        let pcs = pieces(body);
        let first = pcs.iter().position(is_placeholder)?;
        let last = pcs.iter().rposition(is_placeholder)?;
        let percent = pcs
            .iter()
            .filter(|p| matches!(p, Piece::Raw(_, '%')))
            .count() as u32;

        let mut pattern = NumberPattern {
            prefix: render_pieces(&pcs[..first]),
            suffix: String::new(),
            layout: Layout::default(),
            percent,
            scale: None,
            fraction: None,
            whole_part: false,
            exponent: None,
        };

        if let Some((fraction, whole_part, end)) = parse_fraction(&pcs, first) {
            pattern.fraction = Some(fraction);
            pattern.whole_part = whole_part;
            pattern.suffix = render_pieces(&pcs[end..]);
            return Some(pattern);
        }

        if let Some((e_idx, exponent)) = parse_exponent(&pcs, first, last) {
            pattern.layout = build_layout(&pcs[first..e_idx]);
            pattern.exponent = Some(exponent);
            pattern.suffix = render_pieces(&pcs[last + 1..]);
            return Some(pattern);
        }

        pattern.layout = build_layout(&pcs[first..=last]);

        let mut rest = last + 1;
        if matches!(pcs.get(rest), Some(Piece::Raw(_, '.'))) {
            pattern.layout.decimal_point = true;
            rest += 1;
        }
        let mut commas = 0;
        while matches!(pcs.get(rest), Some(Piece::Raw(_, ','))) {
            commas += 1;
            rest += 1;
        }
        pattern.scale = Scale::from_commas(commas);
        if pattern.scale.is_none() {
            // The letter itself stays in the suffix and is emitted.
            if let Some(Piece::Raw(_, c)) = pcs.get(rest) {
                pattern.scale = Scale::from_letter(*c);
            }
        }
        pattern.suffix = render_pieces(&pcs[rest..]);

        Some(pattern)
    }

    pub fn grouping(&self) -> bool {
        self.layout.grouping
    }

    /// Count of required (`0`) fractional digits.
    pub fn min_decimals(&self) -> usize {
        self.layout
            .frac_slots
            .iter()
            .filter(|s| matches!(s, Slot::Digit(Digit::Zero)))
            .count()
    }

    /// Count of all fractional digit placeholders.
    pub fn max_decimals(&self) -> usize {
        count_digits(&self.layout.frac_slots)
    }

    pub fn percent(&self) -> u32 {
        self.percent
    }

    pub fn scale(&self) -> Option<Scale> {
        self.scale
    }

    pub fn fraction(&self) -> Option<Fraction> {
        self.fraction
    }

    pub fn is_scientific(&self) -> bool {
        self.exponent.is_some()
    }

    /// Renders `value`. With `omit_sign` set, negatives render as their
    /// magnitude because the surrounding literals carry the sign.
    pub fn render(&self, value: f64, omit_sign: bool) -> Result<String, FormatError> {
        if !value.is_finite() {
            return Err(FormatError::coercion("a finite number", value));
        }
        let negative = value < 0.0;
        let mut x = value.abs();
        for _ in 0..self.percent {
            x *= 100.0;
        }
        if let Some(scale) = self.scale {
            x /= scale.divisor();
        }
        if !x.is_finite() {
            return Err(FormatError::coercion("a finite number", value));
        }

        let (body, is_zero) = match (&self.fraction, &self.exponent) {
            (Some(Fraction::Fixed(den)), _) => render_fixed_fraction(x, *den),
            (Some(Fraction::Vulgar { max_digits }), _) => {
                render_vulgar_fraction(x, *max_digits, self.whole_part)
            }
            (None, Some(exp)) => render_scientific(x, &self.layout, exp),
            (None, None) => render_layout(x, &self.layout),
        };

        let sign = if negative && !is_zero && !omit_sign {
            "-"
        } else {
            ""
        };
        Ok(format!("{}{}{}{}", sign, self.prefix, body, self.suffix))
    }
}

fn count_digits(slots: &[Slot]) -> usize {
    slots
        .iter()
        .filter(|s| matches!(s, Slot::Digit(_)))
        .count()
}

fn build_layout(span: &[Piece<'_>]) -> Layout {
    let mut layout = Layout::default();
    for piece in span {
        let in_frac = layout.decimal_point;
        let slot = match piece {
            Piece::Raw(_, '.') if !in_frac => {
                layout.decimal_point = true;
                continue;
            }
            Piece::Raw(_, ',') => {
                if !in_frac {
                    layout.grouping = true;
                }
                continue;
            }
            Piece::Raw(_, c) => match Digit::from_char(*c) {
                Some(d) => Slot::Digit(d),
                None => Slot::Literal(c.to_string()),
            },
            other => Slot::Literal(render_pieces(std::slice::from_ref(other))),
        };
        if in_frac {
            layout.frac_slots.push(slot);
        } else {
            layout.int_slots.push(slot);
        }
    }
    layout
}

/// Detects `# ?/?` or `# ??/32` style fractions.
///
/// Returns the fraction, whether a whole-number part precedes the numerator,
/// and the index of the first suffix piece.
fn parse_fraction(pcs: &[Piece<'_>], first: usize) -> Option<(Fraction, bool, usize)> {
    let slash = pcs
        .iter()
        .enumerate()
        .skip(first)
        .find(|(_, p)| matches!(p, Piece::Raw(_, '/')))
        .map(|(i, _)| i)?;

    let mut end = slash + 1;
    let mut denominator = String::new();
    while let Some(Piece::Raw(_, c)) = pcs.get(end) {
        if c.is_ascii_digit() || *c == '?' || *c == '#' {
            denominator.push(*c);
            end += 1;
        } else {
            break;
        }
    }
    if denominator.is_empty() {
        return None;
    }

    let mut numerator_start = slash;
    while numerator_start > first && is_placeholder(&pcs[numerator_start - 1]) {
        numerator_start -= 1;
    }
    if numerator_start == slash {
        return None;
    }
    let whole_part = pcs[first..numerator_start].iter().any(is_placeholder);

    let fraction = if denominator.chars().all(|c| c.is_ascii_digit()) {
        let den: u32 = denominator.parse().ok()?;
        if den == 0 {
            return None;
        }
        Fraction::Fixed(den)
    } else {
        Fraction::Vulgar {
            max_digits: denominator.chars().count().min(4),
        }
    };
    Some((fraction, whole_part, end))
}

/// Finds `E+`/`E-` between the placeholders and describes the exponent.
fn parse_exponent(pcs: &[Piece<'_>], first: usize, last: usize) -> Option<(usize, Exponent)> {
    let e_idx = (first..last).find(|&i| matches!(pcs[i], Piece::Raw(_, 'E' | 'e')))?;
    let (marker, always_sign) = match (&pcs[e_idx], pcs.get(e_idx + 1)) {
        (Piece::Raw(_, m), Some(Piece::Raw(_, '+'))) => (*m, true),
        (Piece::Raw(_, m), Some(Piece::Raw(_, '-'))) => (*m, false),
        _ => return None,
    };
    let digits = pcs[e_idx + 2..=last].iter().filter(|p| is_placeholder(p)).count();
    Some((
        e_idx,
        Exponent {
            digits: digits.max(1),
            always_sign,
            marker,
        },
    ))
}

/// Splits `x` into its shortest round-trip decimal digits and the base-10
/// exponent of the first digit: `1234.5` gives `([1, 2, 3, 4, 5], 3)`.
fn shortest_decimal(x: f64) -> (Vec<u8>, i32) {
    let sci = format!("{:e}", x);
    let (mantissa, exponent) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let digits = mantissa
        .bytes()
        .filter(u8::is_ascii_digit)
        .map(|b| b - b'0')
        .collect();
    (digits, exponent.parse().unwrap_or(0))
}

/// Rounds half away from zero and returns the integer and fractional digit
/// strings. The fractional string has exactly `places` digits.
///
/// Rounding works on the shortest decimal form of `x`, so `1.005` rounds
/// as the decimal it prints as and large integers keep every digit.
fn round_digits(x: f64, places: usize) -> (String, String) {
    let (digits, exponent) = shortest_decimal(x.abs());
    let keep = i64::from(exponent) + 1 + places as i64;

    let scaled: Vec<u8> = if keep < 0 {
        vec![0]
    } else {
        let keep = keep as usize;
        let mut kept: Vec<u8> = digits.iter().copied().take(keep).collect();
        kept.resize(keep, 0);
        if digits.get(keep).is_some_and(|d| *d >= 5) {
            increment_digits(&mut kept);
        }
        kept
    };

    let mut text: String = scaled
        .iter()
        .skip_while(|d| **d == 0)
        .map(|d| char::from(b'0' + d))
        .collect();
    if text.len() <= places {
        text = format!("{}{}", "0".repeat(places + 1 - text.len()), text);
    }
    let split = text.len() - places;
    (text[..split].to_string(), text[split..].to_string())
}

// Adds one unit in the last place, growing on carry out of the top digit.
fn increment_digits(digits: &mut Vec<u8>) {
    for d in digits.iter_mut().rev() {
        if *d == 9 {
            *d = 0;
        } else {
            *d += 1;
            return;
        }
    }
    digits.insert(0, 1);
}

fn group_thousands(digits: &str) -> String {
    let len = digits.chars().count();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        let from_end = len - i;
        out.push(ch);
        if from_end > 1 && from_end % 3 == 1 {
            out.push(',');
        }
    }
    out
}

/// Fills integer slots right to left. Extra digits go to the leftmost slot.
fn fill_int(slots: &[Slot], int_digits: &str, grouping: bool) -> String {
    let digits: Vec<char> = if int_digits == "0" {
        Vec::new()
    } else {
        int_digits.chars().collect()
    };
    let leftmost = slots.iter().position(|s| matches!(s, Slot::Digit(_)));
    let mut remaining = digits.len();
    let mut parts: Vec<String> = Vec::with_capacity(slots.len());

    for (i, slot) in slots.iter().enumerate().rev() {
        match slot {
            Slot::Literal(text) => parts.push(text.clone()),
            Slot::Digit(kind) => {
                if Some(i) == leftmost && remaining > 0 {
                    parts.push(digits[..remaining].iter().collect());
                    remaining = 0;
                } else if remaining > 0 {
                    remaining -= 1;
                    parts.push(digits[remaining].to_string());
                } else if let Some(fill) = kind.filler() {
                    parts.push(fill.to_string());
                }
            }
        }
    }
    parts.reverse();
    let filled = parts.concat();

    let has_literals = slots.iter().any(|s| matches!(s, Slot::Literal(_)));
    if grouping && !has_literals {
        let padding = filled.len() - filled.trim_start().len();
        format!("{}{}", &filled[..padding], group_thousands(&filled[padding..]))
    } else {
        filled
    }
}

/// Fills fractional slots left to right, trimming optional trailing zeros.
/// Returns the text and whether any digit was kept.
fn fill_frac(slots: &[Slot], frac_digits: &str) -> (String, bool) {
    let digits: Vec<char> = frac_digits.chars().collect();
    let kinds: Vec<Digit> = slots
        .iter()
        .filter_map(|s| match s {
            Slot::Digit(d) => Some(*d),
            Slot::Literal(_) => None,
        })
        .collect();

    let mut keep = kinds.len().min(digits.len());
    while keep > 0 && kinds[keep - 1] != Digit::Zero && digits[keep - 1] == '0' {
        keep -= 1;
    }

    let mut out = String::new();
    let mut idx = 0;
    for slot in slots {
        match slot {
            Slot::Literal(text) => out.push_str(text),
            Slot::Digit(kind) => {
                if idx < keep {
                    out.push(digits[idx]);
                } else if *kind == Digit::Question {
                    out.push(' ');
                }
                idx += 1;
            }
        }
    }
    let padded = kinds[keep..].iter().any(|k| *k == Digit::Question);
    (out, keep > 0 || padded)
}

fn render_layout(x: f64, layout: &Layout) -> (String, bool) {
    let places = count_digits(&layout.frac_slots);
    let (int_digits, frac_digits) = round_digits(x, places);
    let is_zero = int_digits
        .chars()
        .chain(frac_digits.chars())
        .all(|c| c == '0');

    let mut out = fill_int(&layout.int_slots, &int_digits, layout.grouping);
    if layout.decimal_point {
        let (frac, shown) = fill_frac(&layout.frac_slots, &frac_digits);
        if shown || places == 0 {
            out.push('.');
            out.push_str(&frac);
        }
    }
    (out, is_zero)
}

fn render_scientific(x: f64, mantissa: &Layout, exp: &Exponent) -> (String, bool) {
    let places = count_digits(&mantissa.frac_slots);
    let (mut coefficient, mut exponent): (f64, i32) = if x == 0.0 {
        (0.0, 0)
    } else {
        // Read off the decimal form; dividing by 10^exponent underflows for
        // subnormals.
        let sci = format!("{:e}", x);
        let (digits, power) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
        (digits.parse().unwrap_or(0.0), power.parse().unwrap_or(0))
    };
    let (mut int_digits, mut frac_digits) = round_digits(coefficient, places);
    if int_digits.len() > 1 {
        // 9.99 rounded up to 10.0
        exponent += 1;
        coefficient /= 10.0;
        (int_digits, frac_digits) = round_digits(coefficient, places);
    }
    let is_zero = int_digits
        .chars()
        .chain(frac_digits.chars())
        .all(|c| c == '0');

    let mut out = fill_int(&mantissa.int_slots, &int_digits, false);
    if out.is_empty() {
        out.push_str(&int_digits);
    }
    if mantissa.decimal_point {
        let (frac, shown) = fill_frac(&mantissa.frac_slots, &frac_digits);
        if shown || places == 0 {
            out.push('.');
            out.push_str(&frac);
        }
    }

    out.push(exp.marker);
    if exponent < 0 {
        out.push('-');
    } else if exp.always_sign {
        out.push('+');
    }
    out.push_str(&format!(
        "{:0width$}",
        exponent.unsigned_abs(),
        width = exp.digits
    ));
    (out, is_zero)
}

fn render_fixed_fraction(x: f64, den: u32) -> (String, bool) {
    let mut whole = x.floor();
    let mut num = ((x - whole) * f64::from(den)).round() as u64;
    if num >= u64::from(den) {
        whole += 1.0;
        num -= u64::from(den);
    }
    let width = den.to_string().len();
    let out = format!("{:.0}-{:0width$}", whole, num, width = width);
    (out, whole == 0.0 && num == 0)
}

fn render_vulgar_fraction(x: f64, max_digits: usize, whole_part: bool) -> (String, bool) {
    let max_den = 10u64.pow(max_digits as u32).saturating_sub(1).max(1);
    let mut whole = x.floor();
    let frac = x - whole;
    let (mut num, den) = closest_fraction(frac, max_den);
    if num == den {
        whole += 1.0;
        num = 0;
    }

    let is_zero = whole == 0.0 && num == 0;
    let out = if num == 0 {
        format!("{:.0}", whole)
    } else if !whole_part {
        format!("{:.0}/{}", whole * den as f64 + num as f64, den)
    } else if whole == 0.0 {
        format!("{}/{}", num, den)
    } else {
        format!("{:.0} {}/{}", whole, num, den)
    };
    (out, is_zero)
}

/// Best rational approximation of `frac` in `[0, 1)` with a denominator of
/// at most `max_den`, from the continued fraction convergents and the last
/// semiconvergent.
fn closest_fraction(frac: f64, max_den: u64) -> (u64, u64) {
    if frac <= 0.0 {
        return (0, 1);
    }
    let (mut p0, mut q0, mut p1, mut q1) = (0u64, 1u64, 1u64, 0u64);
    let mut rest = frac;
    // f64 runs out of precision long before 64 terms.
    for _ in 0..64 {
        let a = rest.floor();
        let q2 = (a as u64)
            .checked_mul(q1)
            .and_then(|v| v.checked_add(q0))
            .filter(|q| *q <= max_den);
        let Some(q2) = q2 else {
            break;
        };
        let p2 = p0 + (a as u64) * p1;
        (p0, q0, p1, q1) = (p1, q1, p2, q2);
        let remainder = rest - a;
        if remainder < 1e-12 {
            break;
        }
        rest = 1.0 / remainder;
    }

    let k = (max_den - q0) / q1;
    let (semi_p, semi_q) = (p0 + k * p1, q0 + k * q1);
    let err_convergent = (frac - p1 as f64 / q1 as f64).abs();
    let err_semi = (frac - semi_p as f64 / semi_q as f64).abs();
    if err_semi < err_convergent {
        (semi_p, semi_q)
    } else {
        (p1, q1)
    }
}
