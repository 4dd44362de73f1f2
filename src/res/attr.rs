// Attribute definitions
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

//! Attributes and their allowed value formats.
//!
//! An [`Attribute`] declares a named, typed slot that styles may assign
//!   values to.
//! Its [`Format`] mask restricts what those values may be,
//!   and,
//!     for [`Format::ENUM`] and [`Format::FLAGS`],
//!     its symbol table maps literal names to packed integers.
//!
//! ```
//! use reslink::res::{Attribute, Format};
//!
//! let attr = Attribute::new(Format::ENUM)
//!     .with_symbol("left", 0)
//!     .with_symbol("right", 1);
//!
//! assert_eq!(Some(1), attr.symbol("right"));
//! assert_eq!(None, attr.symbol("center"));
//! assert_eq!("enum", attr.format().to_string());
//! ```

use bitflags::bitflags;
use std::{
    fmt::{self, Display},
    str::FromStr,
};

bitflags! {
    /// Set of value formats accepted by an [`Attribute`].
    ///
    /// Bit values match the packaged attribute type mask so that the mask
    ///   can be serialized without translation.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Format: u32 {
        const REFERENCE = 1 << 0;
        const STRING = 1 << 1;
        const INTEGER = 1 << 2;
        const BOOLEAN = 1 << 3;
        const COLOR = 1 << 4;
        const FLOAT = 1 << 5;
        const DIMENSION = 1 << 6;
        const FRACTION = 1 << 7;
        const ENUM = 1 << 16;
        const FLAGS = 1 << 17;
    }
}

impl Format {
    /// Every format accepted when an attribute does not restrict its
    ///   values.
    ///
    /// This intentionally excludes [`Format::ENUM`] and [`Format::FLAGS`],
    ///   which are meaningless without symbols.
    pub const ANY: Format = Format::REFERENCE
        .union(Format::STRING)
        .union(Format::INTEGER)
        .union(Format::BOOLEAN)
        .union(Format::COLOR)
        .union(Format::FLOAT)
        .union(Format::DIMENSION)
        .union(Format::FRACTION);

    /// Name of each single-bit format as it appears in a declaration.
    const NAMES: [(Format, &'static str); 10] = [
        (Format::REFERENCE, "reference"),
        (Format::STRING, "string"),
        (Format::INTEGER, "integer"),
        (Format::BOOLEAN, "boolean"),
        (Format::COLOR, "color"),
        (Format::FLOAT, "float"),
        (Format::DIMENSION, "dimension"),
        (Format::FRACTION, "fraction"),
        (Format::ENUM, "enum"),
        (Format::FLAGS, "flags"),
    ];
}

impl Display for Format {
    /// Render as a `|`-delimited list of format names,
    ///   e.g. `reference|color`.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("(none)");
        }

        let mut first = true;

        for (format, name) in Self::NAMES {
            if self.contains(format) {
                if !first {
                    f.write_str("|")?;
                }

                f.write_str(name)?;
                first = false;
            }
        }

        Ok(())
    }
}

impl FromStr for Format {
    type Err = String;

    /// Parse a `|`-delimited list of format names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split('|').map(str::trim).try_fold(Format::empty(), |acc, part| {
            Self::NAMES
                .iter()
                .find(|(_, name)| *name == part)
                .map(|(format, _)| acc | *format)
                .ok_or_else(|| part.to_string())
        })
    }
}

/// A symbol of an [`Format::ENUM`] or [`Format::FLAGS`] attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttrSymbol {
    pub name: String,
    pub value: u32,
}

/// A declared, typed slot.
///
/// The format mask is fixed at construction and cannot be altered
///   afterward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    format: Format,
    symbols: Vec<AttrSymbol>,
}

impl Attribute {
    pub fn new(format: Format) -> Self {
        Self {
            format,
            symbols: Vec::new(),
        }
    }

    /// Add a symbol to the attribute's symbol table.
    ///
    /// Symbols retain declaration order.
    pub fn with_symbol<S: Into<String>>(mut self, name: S, value: u32) -> Self {
        self.symbols.push(AttrSymbol {
            name: name.into(),
            value,
        });
        self
    }

    pub fn format(&self) -> Format {
        self.format
    }

    pub fn symbols(&self) -> &[AttrSymbol] {
        &self.symbols
    }

    /// Look up the packed value of the symbol `name`.
    pub fn symbol(&self, name: &str) -> Option<u32> {
        self.symbols
            .iter()
            .find(|sym| sym.name == name)
            .map(|sym| sym.value)
    }
}
