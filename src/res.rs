// Resource model
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

//! Resources and their values.
//!
//! A _resource_ is a named, typed unit of packaged data.
//! It is identified by a [`ResourceName`] independent of configuration,
//!   is given a numeric [`ResourceId`] during linking,
//!   and holds a single [`Value`].
//!
//! Values form a closed set;
//!   see [`Value`] for the variants and [`Item`] for scalars.
//! Lexical forms of typed scalars are parsed by the [`primitive`] module.

mod attr;
mod id;
mod name;
pub mod primitive;
mod source;
mod value;

pub use attr::{AttrSymbol, Attribute, Format};
pub use id::ResourceId;
pub use name::{NameError, ResourceName, ResourceType};
pub use primitive::{Color, ColorFormat, Complex, ComplexUnit};
pub use source::SourceLine;
pub use value::{
    Array, Item, Plural, Quantity, RefKind, RefSite, RefState, Reference,
    Style, StyleEntry, Styleable, Value, ValueKind,
};
