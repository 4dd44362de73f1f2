// Global constants across the entire crate
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

//! System-wide static configuration.
//!
//! This module provides a system-wide configuration.
//! Subsystems should reference these values rather than defining their own
//!   and risk incompatibilities or maintenance issues as requirements
//!   change.
//!
//! By convention,
//!   import this entire module rather than individual members and reference
//!   them as `global::foo` to emphasize their nature and risk.

/// A size capable of representing the index of every entry within a single
///   [`ResourceTable`](crate::table::ResourceTable).
///
/// This must be ≥ [`EntryIdSize`],
///   since a table may hold many types each containing the maximum number
///   of entries.
pub type EntryIndexSize = u32;

/// A size capable of representing the entry portion of a packed
///   [`ResourceId`](crate::res::ResourceId).
pub type EntryIdSize = u16;

/// Package id of the application being linked.
///
/// Statically linked base packages
///   (such as the framework)
///   use lower ids.
pub const APP_PACKAGE_ID: u8 = 0x7f;

/// Package id of the framework base package.
pub const FRAMEWORK_PACKAGE_ID: u8 = 0x01;

/// The lowest type id that may be assigned.
///
/// Type id `0` is reserved so that a packed id of `0` is never valid.
pub const FIRST_TYPE_ID: u8 = 1;

/// Number of distinct type ids that can be represented in a packed id.
pub const TYPE_ID_COUNT: usize = 256;

/// Number of distinct entry ids that can be represented in a packed id.
pub const ENTRY_ID_COUNT: usize = EntryIdSize::MAX as usize + 1;
