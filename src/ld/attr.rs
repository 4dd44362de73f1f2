// Attribute value validation and conversion
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

//! Validation of values assigned to attributes.
//!
//! An [`Attribute`] restricts the values that may be assigned to it by its
//!   [`Format`] mask.
//! [`convert`] checks an [`Item`] against that mask and,
//!   for [`Item::Raw`] literals whose format was not known when they were
//!   declared,
//!     converts the literal into a typed item.
//!
//! Literals are trimmed of surrounding whitespace and then tried against
//!   each format permitted by the attribute in a fixed order:
//!
//!   1. [`Format::REFERENCE`]: `@null`, `@empty`, `@type/name`, `?name`;
//!   2. [`Format::ENUM`] and [`Format::FLAGS`]: symbols of the attribute;
//!   3. [`Format::COLOR`];
//!   4. [`Format::DIMENSION`];
//!   5. [`Format::FRACTION`];
//!   6. [`Format::INTEGER`];
//!   7. [`Format::FLOAT`];
//!   8. [`Format::BOOLEAN`]; and
//!   9. [`Format::STRING`],
//!        which accepts any literal and retains the untrimmed text.
//!
//! The first format to accept the literal wins.
//!
//! ```
//! use reslink::ld::convert;
//! use reslink::res::{Attribute, Format, Item};
//!
//! let align = Attribute::new(Format::ENUM)
//!     .with_symbol("left", 0)
//!     .with_symbol("right", 1);
//!
//! assert_eq!(
//!     Ok(Some(Item::Int(1))),
//!     convert(&align, &Item::Raw("right".into())),
//! );
//! assert!(convert(&align, &Item::Raw("center".into())).is_err());
//! ```

use crate::res::{
    primitive::{self, Integer},
    Attribute, Color, Complex, Format, Item,
};
use std::{
    error::Error,
    fmt::{self, Display},
};

/// Check `item` against the format of `attr`,
///   converting raw literals.
///
/// Returns [`Some`] with a replacement if `item` was converted,
///   or [`None`] if `item` is acceptable as-is.
pub fn convert(
    attr: &Attribute,
    item: &Item,
) -> Result<Option<Item>, AttrValueError> {
    let format = attr.format();

    match item {
        Item::Raw(text) => convert_raw(attr, text).map(Some),

        typed => match typed.format() {
            Some(given) if format.intersects(given) => Ok(None),
            given => Err(AttrValueError::FormatMismatch {
                expected: format,
                given: given.map(|f| f.to_string()).unwrap_or_default(),
            }),
        },
    }
}

fn convert_raw(attr: &Attribute, raw: &str) -> Result<Item, AttrValueError> {
    let format = attr.format();
    let text = raw.trim();

    if format.contains(Format::REFERENCE) {
        if let Some(item) = Item::parse_reference(text) {
            return Ok(item);
        }
    }

    // A symbol that could not be found is reported only if no later
    //   format accepts the literal.
    let mut unknown_symbol = None;

    if format.intersects(Format::ENUM | Format::FLAGS) && is_symbolic(text) {
        match lookup_symbols(attr, text) {
            Ok(item) => return Ok(item),
            Err(name) => unknown_symbol = Some(name),
        }
    }

    let typed = None
        .or_else(|| {
            format
                .contains(Format::COLOR)
                .then(|| Color::parse(text).map(Item::Color))
                .flatten()
        })
        .or_else(|| {
            format
                .contains(Format::DIMENSION)
                .then(|| Complex::parse_dimension(text).map(Item::Dimension))
                .flatten()
        })
        .or_else(|| {
            format
                .contains(Format::FRACTION)
                .then(|| Complex::parse_fraction(text).map(Item::Fraction))
                .flatten()
        })
        .or_else(|| {
            format
                .contains(Format::INTEGER)
                .then(|| {
                    Integer::parse(text).map(|i| match i {
                        Integer::Dec(n) => Item::Int(n),
                        Integer::Hex(n) => Item::IntHex(n),
                    })
                })
                .flatten()
        })
        .or_else(|| {
            format
                .contains(Format::FLOAT)
                .then(|| primitive::parse_float(text).map(Item::Float))
                .flatten()
        })
        .or_else(|| {
            format
                .contains(Format::BOOLEAN)
                .then(|| primitive::parse_bool(text).map(Item::Bool))
                .flatten()
        })
        .or_else(|| {
            format
                .contains(Format::STRING)
                .then(|| Item::String(raw.to_string()))
        });

    match (typed, unknown_symbol) {
        (Some(item), _) => Ok(item),
        (None, Some(literal)) => Err(AttrValueError::UnknownSymbol {
            expected: format,
            literal,
        }),
        (None, None) => Err(AttrValueError::FormatMismatch {
            expected: format,
            given: raw.to_string(),
        }),
    }
}

/// Whether `text` has the shape of a symbol name,
///   or of `|`-delimited symbol names.
///
/// Empty segments (as in `top|`) are permitted so long as at least one
///   name is present;
///     they are reported by [`lookup_symbols`].
fn is_symbolic(text: &str) -> bool {
    let mut names = text.split('|').map(str::trim);

    names.clone().any(|name| !name.is_empty())
        && names.all(|name| name.is_empty() || is_identifier(name))
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();

    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Look up the symbol or symbols of `text`,
///   yielding the offending name if one cannot be found.
///
/// An enum takes a single symbol.
/// Flags are `|`-delimited and their values are combined.
fn lookup_symbols(attr: &Attribute, text: &str) -> Result<Item, String> {
    let format = attr.format();

    if format.contains(Format::ENUM) && !text.contains('|') {
        if let Some(value) = attr.symbol(text) {
            return Ok(Item::Int(value as i32));
        }

        if !format.contains(Format::FLAGS) {
            return Err(text.to_string());
        }
    }

    if !format.contains(Format::FLAGS) {
        return Err(text.to_string());
    }

    text.split('|').map(str::trim).try_fold(0, |acc, name| {
        // An empty segment has no name of its own to report.
        if name.is_empty() {
            return Err(text.to_string());
        }

        attr.symbol(name)
            .map(|value| acc | value)
            .ok_or_else(|| name.to_string())
    })
    .map(Item::IntHex)
}

/// A value cannot be assigned to an attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValueError {
    /// No format permitted by the attribute accepts the value.
    FormatMismatch {
        expected: Format,

        /// The literal,
        ///   or the format of an already-typed item.
        given: String,
    },

    /// A symbol is not defined by an enum or flags attribute.
    UnknownSymbol { expected: Format, literal: String },
}

impl Display for AttrValueError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use AttrValueError::*;

        match self {
            FormatMismatch { expected, given } => {
                write!(f, "expected {expected}, but found `{given}`")
            }
            UnknownSymbol { literal, .. } => {
                write!(f, "unknown symbol `{literal}`")
            }
        }
    }
}

impl Error for AttrValueError {}
