// Resource table linker
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

//! Linker for compiled application resource tables.
//!
//! A [`ResourceTable`](table::ResourceTable) holds the resources declared
//!   by a single package.
//! Those resources refer to one another,
//!   and to resources of the packages they are built against,
//!   by name;
//!     the [linker](ld) assigns each resource an id,
//!     binds every reference to the id of its target,
//!     and validates the values assigned to attributes.
//!
//! The major components are:
//!
//!   - [`res`], the resource model (names, ids, and values);
//!   - [`table`], storage of a package's resources;
//!   - [`resolve`], lookup of referenced resources across packages;
//!   - [`ld`], the linker itself; and
//!   - [`diagnose`], rendering of errors for humans.

// We build docs for private items.
#![allow(rustdoc::private_intra_doc_links)]

pub mod global;

#[macro_use]
extern crate static_assertions;

pub mod diagnose;
pub mod ld;
pub mod res;
pub mod resolve;
pub mod table;
