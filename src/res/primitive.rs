// Typed scalar resource values
//
//  Copyright (C) 2014-2022 Ryan Specialty Group, LLC.
//
//  This file is part of reslink.
//
//  This program is free software: you can redistribute it and/or modify
//  it under the terms of the GNU General Public License as published by
//  the Free Software Foundation, either version 3 of the License, or
//  (at your option) any later version.
//
//  This program is distributed in the hope that it will be useful,
//  but WITHOUT ANY WARRANTY; without even the implied warranty of
//  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
//  GNU General Public License for more details.
//
//  You should have received a copy of the GNU General Public License
//  along with this program.  If not, see <http://www.gnu.org/licenses/>.

//! Typed scalars and their lexical forms.
//!
//! Each parser in this module accepts the literal text of a single format
//!   and returns [`None`] if the text is not of that format;
//!     it is the responsibility of the caller to decide which formats are
//!     permitted and in what order they are attempted.
//! Callers are expected to have trimmed surrounding whitespace.
//!
//! Dimensions and fractions are stored in their packaged 32-bit
//!   [`Complex`] form:
//!
//! ```text
//!   31                         8 7  6 5 4 3      0
//!  [ mantissa (24-bit, signed) ][ -- ][rad][ unit ]
//! ```

use std::fmt::{self, Display};

/// Lexical form of a color literal,
///   which is retained for serialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorFormat {
    /// `#RGB`
    Rgb4,
    /// `#ARGB`
    Argb4,
    /// `#RRGGBB`
    Rgb8,
    /// `#AARRGGBB`
    Argb8,
}

/// A color as packed `0xAARRGGBB`.
///
/// Formats without an alpha channel are fully opaque.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub format: ColorFormat,
    pub argb: u32,
}

impl Color {
    /// Parse `#RGB`, `#ARGB`, `#RRGGBB` or `#AARRGGBB`.
    ///
    /// ```
    /// use reslink::res::{Color, ColorFormat};
    ///
    /// assert_eq!(
    ///     Some(Color { format: ColorFormat::Rgb4, argb: 0xffaabbcc }),
    ///     Color::parse("#abc"),
    /// );
    /// assert_eq!(None, Color::parse("#abcde"));
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        let hex = s.strip_prefix('#')?;

        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }

        let raw = u32::from_str_radix(hex, 16).ok()?;

        // Expand each nibble of a short form into a full byte.
        let expand = |n: u32| {
            (0..4).rev().fold(0, |acc, i| {
                let nibble = (n >> (i * 4)) & 0xf;
                (acc << 8) | (nibble << 4) | nibble
            })
        };

        let (format, argb) = match hex.len() {
            3 => (ColorFormat::Rgb4, expand(0xf000 | raw)),
            4 => (ColorFormat::Argb4, expand(raw)),
            6 => (ColorFormat::Rgb8, 0xff00_0000 | raw),
            8 => (ColorFormat::Argb8, raw),
            _ => return None,
        };

        Some(Self { format, argb })
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{:08x}", self.argb)
    }
}

/// Unit of a dimension or fraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComplexUnit {
    Px,
    Dip,
    Sp,
    Pt,
    In,
    Mm,
    /// `%`
    Fraction,
    /// `%p`,
    ///   relative to the parent.
    FractionParent,
}

impl ComplexUnit {
    const DIMENSION_SUFFIXES: [(&'static str, ComplexUnit); 7] = [
        ("px", ComplexUnit::Px),
        ("dip", ComplexUnit::Dip),
        ("dp", ComplexUnit::Dip),
        ("sp", ComplexUnit::Sp),
        ("pt", ComplexUnit::Pt),
        ("in", ComplexUnit::In),
        ("mm", ComplexUnit::Mm),
    ];

    // `%p` must be tried before `%`.
    const FRACTION_SUFFIXES: [(&'static str, ComplexUnit); 2] = [
        ("%p", ComplexUnit::FractionParent),
        ("%", ComplexUnit::Fraction),
    ];

    /// Packed unit value.
    ///
    /// Dimension and fraction units share values;
    ///   they are distinguished by the value type.
    fn bits(&self) -> u32 {
        use ComplexUnit::*;

        match self {
            Px | Fraction => 0,
            Dip | FractionParent => 1,
            Sp => 2,
            Pt => 3,
            In => 4,
            Mm => 5,
        }
    }

    fn suffix(&self) -> &'static str {
        use ComplexUnit::*;

        match self {
            Px => "px",
            Dip => "dp",
            Sp => "sp",
            Pt => "pt",
            In => "in",
            Mm => "mm",
            Fraction => "%",
            FractionParent => "%p",
        }
    }
}

/// A dimension or fraction in packed form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Complex {
    data: u32,
    unit: ComplexUnit,
}

const UNIT_MASK: u32 = 0xf;
const RADIX_SHIFT: u32 = 4;
const RADIX_MASK: u32 = 0x3;
const MANTISSA_SHIFT: u32 = 8;
const MANTISSA_MASK: u32 = 0x00ff_ffff;

/// Magnitude, scaled by `2^23`,
///   beyond the reach of a 24-bit signed mantissa of radix 23p0.
const MAX_MAGNITUDE_BITS: u64 = 1 << 46;

const RADIX_23P0: u32 = 0;
const RADIX_16P7: u32 = 1;
const RADIX_8P15: u32 = 2;
const RADIX_0P23: u32 = 3;

impl Complex {
    /// Parse a dimension such as `16dp` or `-1.5px`.
    pub fn parse_dimension(s: &str) -> Option<Self> {
        Self::parse_with(s, &ComplexUnit::DIMENSION_SUFFIXES, 1.0)
    }

    /// Parse a fraction such as `50%` or `12.5%p`.
    ///
    /// The packed value is scaled such that `100%` is `1.0`.
    pub fn parse_fraction(s: &str) -> Option<Self> {
        Self::parse_with(s, &ComplexUnit::FRACTION_SUFFIXES, 100.0)
    }

    fn parse_with(
        s: &str,
        suffixes: &[(&str, ComplexUnit)],
        divisor: f32,
    ) -> Option<Self> {
        let (num, unit) = suffixes.iter().find_map(|(suffix, unit)| {
            s.strip_suffix(suffix).map(|num| (num, *unit))
        })?;

        parse_float(num.trim_end())
            .and_then(|f| Self::from_f32(f / divisor, unit))
    }

    /// Pack `value` using the radix with the greatest fractional precision
    ///   that still accommodates its magnitude.
    ///
    /// Returns [`None`] if the integral part of `value` does not fit in
    ///   the signed 24-bit mantissa
    ///     (that is, if its magnitude is `2^23` or greater).
    pub fn from_f32(value: f32, unit: ComplexUnit) -> Option<Self> {
        let neg = value < 0.0;
        let magnitude = if neg { -value } else { value };

        // Saturates for magnitudes beyond `u64`.
        let bits = (magnitude * (1u32 << 23) as f32 + 0.5) as u64;

        if !magnitude.is_finite() || bits >= MAX_MAGNITUDE_BITS {
            return None;
        }

        let (radix, shift) = if bits & 0x7f_ffff == 0 {
            // No fractional part.
            (RADIX_23P0, 23)
        } else if bits & 0xffff_ffff_ff80_0000 == 0 {
            (RADIX_0P23, 0)
        } else if bits & 0xffff_ffff_8000_0000 == 0 {
            (RADIX_8P15, 8)
        } else if bits & 0xffff_ff80_0000_0000 == 0 {
            (RADIX_16P7, 16)
        } else {
            (RADIX_23P0, 23)
        };

        let mut mantissa = ((bits >> shift) as u32) & MANTISSA_MASK;
        if neg {
            mantissa = mantissa.wrapping_neg() & MANTISSA_MASK;
        }

        Some(Self {
            data: unit.bits()
                | (radix << RADIX_SHIFT)
                | (mantissa << MANTISSA_SHIFT),
            unit,
        })
    }

    /// Packed 32-bit representation.
    pub fn data(&self) -> u32 {
        self.data
    }

    pub fn unit(&self) -> ComplexUnit {
        self.unit
    }

    /// Decode the packed value.
    ///
    /// This may differ slightly from the parsed value due to the limited
    ///   precision of the mantissa.
    pub fn to_f32(&self) -> f32 {
        // 2^-8 scaled by the fractional bits of each radix.
        const RADIX_MULTS: [f32; 4] = [
            3.906_25e-3,             // 2^-8
            3.051_757_812_5e-5,      // 2^-15
            1.192_092_895_507_8e-7,  // 2^-23
            4.656_612_873_077_4e-10, // 2^-31
        ];

        debug_assert_eq!(self.unit.bits(), self.data & UNIT_MASK);

        let radix = (self.data >> RADIX_SHIFT) & RADIX_MASK;
        let mantissa = (self.data & (MANTISSA_MASK << MANTISSA_SHIFT)) as i32;

        mantissa as f32 * RADIX_MULTS[radix as usize]
    }
}

impl Display for Complex {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.unit {
            ComplexUnit::Fraction | ComplexUnit::FractionParent => {
                write!(f, "{}{}", self.to_f32() * 100.0, self.unit.suffix())
            }
            _ => write!(f, "{}{}", self.to_f32(), self.unit.suffix()),
        }
    }
}

/// Parse a signed decimal or `0x`-prefixed hexadecimal integer.
///
/// Hexadecimal literals may use the full unsigned 32-bit range and are
///   returned as [`Integer::Hex`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Integer {
    Dec(i32),
    Hex(u32),
}

impl Integer {
    pub fn parse(s: &str) -> Option<Self> {
        let hex = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X"));

        match hex {
            Some(digits) if !digits.is_empty() && digits.len() <= 8 => {
                u32::from_str_radix(digits, 16).ok().map(Integer::Hex)
            }
            Some(_) => None,
            None => s.parse::<i32>().ok().map(Integer::Dec),
        }
    }
}

/// Parse a finite floating point literal.
///
/// Unlike [`str::parse`],
///   this rejects textual forms like `inf` and `NaN`.
pub fn parse_float(s: &str) -> Option<f32> {
    match s.bytes().next() {
        Some(b'0'..=b'9' | b'-' | b'+' | b'.') => {
            s.parse::<f32>().ok().filter(|f| f.is_finite())
        }
        _ => None,
    }
}

/// Parse `true` or `false` without regard to case.
pub fn parse_bool(s: &str) -> Option<bool> {
    if s.eq_ignore_ascii_case("true") {
        Some(true)
    } else if s.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

#[cfg(test)]
mod test;
