// Resource name resolution
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

//! Resolution of [`ResourceName`]s to the resources they name.
//!
//! The [linker](crate::ld) does not decide where a name may be found;
//!   it asks a [`Resolver`].
//! The resolver is given a read-only view of the table being linked and
//!   yields just enough about the target for the linker to bind and
//!   type-check a reference:
//!     its id,
//!     the [`ValueKind`] of its value,
//!     and its [`Attribute`] definition if it is one.
//!
//! [`TableResolver`] is the resolver used for ordinary application
//!   linking:
//!     it searches the local table and then any number of statically
//!     linked base packages
//!       (e.g. the framework package).

use crate::{
    res::{Attribute, ResourceId, ResourceName, ValueKind},
    table::{Entry, ResourceTable},
};

/// What a [`Resolver`] knows about a resource.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedEntry<'a> {
    pub id: ResourceId,
    pub kind: ValueKind,

    /// Attribute definition,
    ///   if the resource is an attribute.
    pub attr: Option<&'a Attribute>,
}

impl<'a> From<&'a Entry> for ResolvedEntry<'a> {
    fn from(entry: &'a Entry) -> Self {
        Self {
            id: entry.id(),
            kind: entry.value().kind(),
            attr: entry.value().as_attribute(),
        }
    }
}

/// Read-only lookup of resources by name.
pub trait Resolver {
    /// Look up `name` on behalf of the table `local`.
    ///
    /// A local `name` is relative to the package of `local`.
    /// Returns [`None`] if the name cannot be found;
    ///   this is not an error.
    fn find<'a>(
        &'a self,
        local: &'a ResourceTable,
        name: &ResourceName,
    ) -> Option<ResolvedEntry<'a>>;
}

/// Resolve names against the local table followed by statically linked
///   base packages.
///
/// Base packages are searched in the order in which they were added,
///   but only those whose package name matches that of the requested
///   name.
#[derive(Debug, Default)]
pub struct TableResolver {
    bases: Vec<ResourceTable>,
}

impl TableResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Statically link against `table`.
    pub fn with_base(mut self, table: ResourceTable) -> Self {
        self.add_base(table);
        self
    }

    pub fn add_base(&mut self, table: ResourceTable) {
        self.bases.push(table);
    }

    pub fn bases(&self) -> &[ResourceTable] {
        &self.bases
    }
}

impl Resolver for TableResolver {
    fn find<'a>(
        &'a self,
        local: &'a ResourceTable,
        name: &ResourceName,
    ) -> Option<ResolvedEntry<'a>> {
        let name = local.qualify(name);

        local
            .find(&name)
            .or_else(|| {
                self.bases
                    .iter()
                    .filter(|base| base.package() == name.package())
                    .find_map(|base| base.find(&name))
            })
            .map(ResolvedEntry::from)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        global,
        res::{Format, Item, SourceLine, Value},
    };

    fn name(s: &str) -> ResourceName {
        s.parse().unwrap()
    }

    fn src() -> SourceLine {
        SourceLine::new("values.xml", 1)
    }

    fn framework() -> ResourceTable {
        let mut table =
            ResourceTable::new("android", global::FRAMEWORK_PACKAGE_ID);

        table
            .add(
                name("attr/textColor"),
                src(),
                Attribute::new(Format::COLOR).into(),
            )
            .unwrap();
        table.assign_ids().unwrap();

        table
    }

    #[test]
    fn finds_local_entries_by_local_name() {
        let mut local = ResourceTable::new("app", global::APP_PACKAGE_ID);
        local
            .add(name("color/c"), src(), Item::Raw("#fff".into()).into())
            .unwrap();

        let sut = TableResolver::new();
        let found = sut.find(&local, &name("color/c")).unwrap();

        assert_eq!(ValueKind::Item, found.kind);
        assert_eq!(None, found.attr);
        assert!(!found.id.is_valid());
    }

    #[test]
    fn falls_back_to_matching_base_package() {
        let local = ResourceTable::new("app", global::APP_PACKAGE_ID);
        let sut = TableResolver::new().with_base(framework());

        let found = sut.find(&local, &name("android:attr/textColor")).unwrap();

        assert_eq!(ValueKind::Attribute, found.kind);
        assert_eq!(Some(Format::COLOR), found.attr.map(Attribute::format));
        assert_eq!(global::FRAMEWORK_PACKAGE_ID, found.id.package_id());

        // Local names never reach a base package.
        assert_eq!(None, sut.find(&local, &name("attr/textColor")));
    }

    #[test]
    fn local_table_takes_precedence() {
        let mut local =
            ResourceTable::new("android", global::FRAMEWORK_PACKAGE_ID);
        local
            .add(name("attr/textColor"), src(), Value::Sentinel)
            .unwrap();

        let sut = TableResolver::new().with_base(framework());
        let found = sut.find(&local, &name("attr/textColor")).unwrap();

        assert_eq!(ValueKind::Sentinel, found.kind);
    }

    #[test]
    fn missing_names_are_not_found() {
        let local = ResourceTable::new("app", global::APP_PACKAGE_ID);
        let sut = TableResolver::new().with_base(framework());

        assert_eq!(None, sut.find(&local, &name("color/missing")));
        assert_eq!(None, sut.find(&local, &name("other:attr/textColor")));
    }
}
