// Packed resource identifiers
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

//! Numeric resource identifiers.
//!
//! A [`ResourceId`] packs a package id,
//!   type id,
//!   and entry id into a single `u32` of the form `0xPPTTEEEE`.
//!
//! ```
//! use reslink::res::ResourceId;
//!
//! let id = ResourceId::new(0x7f, 0x02, 0x0010);
//!
//! assert_eq!(0x7f020010, id.as_u32());
//! assert_eq!(0x7f, id.package_id());
//! assert_eq!(0x02, id.type_id());
//! assert_eq!(0x0010, id.entry_id());
//! assert!(id.is_valid());
//!
//! assert!(!ResourceId::UNSET.is_valid());
//! assert_eq!("0x7f020010", id.to_string());
//! ```

use crate::global;
use std::fmt::{self, Display};

/// Packed numeric identifier of a resource.
///
/// The distinguished value [`ResourceId::UNSET`] represents an identifier
///   that has not yet been assigned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ResourceId(u32);

assert_eq_size!(ResourceId, u32);

impl ResourceId {
    /// An identifier that has not yet been assigned.
    pub const UNSET: ResourceId = ResourceId(0);

    pub const fn new(
        package_id: u8,
        type_id: u8,
        entry_id: global::EntryIdSize,
    ) -> Self {
        Self(
            (package_id as u32) << 24
                | (type_id as u32) << 16
                | entry_id as u32,
        )
    }

    pub const fn from_u32(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn as_u32(&self) -> u32 {
        self.0
    }

    pub const fn package_id(&self) -> u8 {
        (self.0 >> 24) as u8
    }

    pub const fn type_id(&self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub const fn entry_id(&self) -> global::EntryIdSize {
        self.0 as global::EntryIdSize
    }

    /// Whether this identifier has been assigned.
    ///
    /// Neither package id `0` nor type id `0` are valid.
    pub const fn is_valid(&self) -> bool {
        self.package_id() != 0 && self.type_id() != 0
    }
}

impl Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:#010x}", self.0)
    }
}

impl From<ResourceId> for u32 {
    fn from(id: ResourceId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn unset_is_default() {
        assert_eq!(ResourceId::UNSET, ResourceId::default());
        assert_eq!("0x00000000", ResourceId::UNSET.to_string());
    }

    #[test]
    fn zero_type_is_invalid() {
        assert!(!ResourceId::new(global::APP_PACKAGE_ID, 0, 1).is_valid());
        assert!(!ResourceId::new(0, 1, 1).is_valid());
        assert!(ResourceId::new(global::APP_PACKAGE_ID, 1, 0).is_valid());
    }

    #[test]
    fn from_raw() {
        let id = ResourceId::from_u32(0x0101_0000);

        assert_eq!(global::FRAMEWORK_PACKAGE_ID, id.package_id());
        assert_eq!(1, id.type_id());
        assert_eq!(0, id.entry_id());
        assert_eq!(0x0101_0000u32, id.into());
    }
}
