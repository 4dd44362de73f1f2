// Resource linker
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

//! The [linker][] is responsible for turning a table of resource
//!   declarations into a fully resolved,
//!     type-checked table that is ready to be packaged.
//!
//! [linker]: https://en.wikipedia.org/wiki/Linker_(computing)
//!
//! Linking a table with [`Linker::link_and_validate`] proceeds as follows:
//!
//!   1. Every resource without an id is assigned one
//!        (see [`ResourceTable::assign_ids`]).
//!   2. Every resource is then visited in declaration order,
//!        and each [`Reference`] within its value is looked up by a
//!        [`Resolver`].
//!      A reference that is found is bound to the id of its target and
//!        recorded as an edge in the [`RefGraph`].
//!      A reference that is not found is recorded in
//!        [`UnresolvedSymbols`];
//!          this is _not_ an error.
//!   3. Where a reference must name a particular kind of resource
//!        (the parent of a style must be a style;
//!          the keys of a style and the members of a styleable must be
//!          attributes),
//!        a target of any other kind is a [`LinkError`].
//!   4. Values assigned to attributes within a style are checked against
//!        the format of the attribute,
//!          and literals are converted into typed values
//!          (see [`convert`]).
//!
//! Errors do not halt linking;
//!   every error in the table is collected so that they may be reported
//!   together.
//!
//! Cycles
//! ======
//! References are resolved by name and never followed,
//!   so cycles
//!     (such as two styles naming one another as parent)
//!   are linked like any other reference and are never detected.
//!
//! ```
//! use reslink::ld::Linker;
//! use reslink::res::{
//!     Attribute, Format, Item, ResourceName, SourceLine, Style,
//! };
//! use reslink::resolve::TableResolver;
//! use reslink::table::ResourceTable;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let name = |s: &str| s.parse::<ResourceName>();
//! let src = SourceLine::new("res/values/styles.xml", 1);
//!
//! let mut table = ResourceTable::new("app", 0x7f);
//! table.add(
//!     name("attr/tint")?,
//!     src.clone(),
//!     Attribute::new(Format::REFERENCE | Format::COLOR).into(),
//! )?;
//! let style = table.add(
//!     name("style/Base")?,
//!     src.clone(),
//!     Style::default()
//!         .with_entry(name("attr/tint")?, Item::Raw("#f00".into()))
//!         .into(),
//! )?;
//!
//! let mut linker = Linker::new(table, TableResolver::new());
//! assert!(linker.link_and_validate());
//! assert!(linker.unresolved_references().is_empty());
//!
//! let table = linker.into_table();
//! assert!(table.get(style).unwrap().id().is_valid());
//! # Ok(())
//! # }
//! ```
//!
//! [`ResourceTable::assign_ids`]: crate::table::ResourceTable::assign_ids
//! [`Reference`]: crate::res::Reference
//! [`Resolver`]: crate::resolve::Resolver

mod attr;
mod error;
mod graph;
mod linker;
pub mod trace;
mod unresolved;

pub use attr::{convert, AttrValueError};
pub use error::LinkError;
pub use graph::{RefEdge, RefGraph};
pub use linker::Linker;
pub use unresolved::{UnresolvedRef, UnresolvedSymbols};
