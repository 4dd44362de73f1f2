// Resource table
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

//! Ordered table of the resources of a single package.
//!
//! A [`ResourceTable`] holds one [`Entry`] per [`ResourceName`],
//!   in declaration order.
//! Entries are never removed,
//!   so an [`EntryIndex`] remains valid for the lifetime of the table;
//!     this allows other systems
//!       (like the [reference graph](crate::ld::RefGraph))
//!     to refer to entries,
//!       and to [`Reference`]s within them
//!         (see [`RefHandle`]),
//!       by integer handle rather than by pointer.
//!
//! ```
//! use reslink::res::{Item, ResourceName, ResourceType, SourceLine};
//! use reslink::table::ResourceTable;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut table = ResourceTable::new("app", 0x7f);
//!
//! // Local names are qualified with the table's package.
//! let name = ResourceName::local(ResourceType::Color, "accent");
//! let i = table.add(
//!     name.clone(),
//!     SourceLine::new("res/values/colors.xml", 3),
//!     Item::Raw("#fff".into()).into(),
//! )?;
//!
//! assert_eq!(Some(i), table.lookup(&name));
//! assert_eq!("app:color/accent", table.get(i).unwrap().name().to_string());
//!
//! // Ids are assigned on request.
//! assert!(!table.get(i).unwrap().id().is_valid());
//! table.assign_ids()?;
//! assert_eq!(0x7f010000, table.get(i).unwrap().id().as_u32());
//! # Ok(())
//! # }
//! ```

use crate::{
    global,
    res::{
        RefSite, Reference, ResourceId, ResourceName, ResourceType,
        SourceLine, Value,
    },
};
use fixedbitset::FixedBitSet;
use fxhash::FxHashMap;
use std::{
    borrow::Cow,
    error::Error,
    fmt::{self, Display},
};

/// Stable handle to an [`Entry`] of a [`ResourceTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntryIndex(global::EntryIndexSize);

impl EntryIndex {
    fn new(index: usize) -> Self {
        Self(index as global::EntryIndexSize)
    }

    pub fn as_usize(&self) -> usize {
        self.0 as usize
    }
}

impl Display for EntryIndex {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Stable handle to a specific [`Reference`] within a table entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RefHandle {
    pub entry: EntryIndex,
    pub site: RefSite,
}

/// A named resource and its value.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    name: ResourceName,
    source: SourceLine,
    id: ResourceId,
    value: Value,
}

impl Entry {
    /// Fully qualified name of the resource.
    pub fn name(&self) -> &ResourceName {
        &self.name
    }

    pub fn source(&self) -> &SourceLine {
        &self.source
    }

    /// Assigned id,
    ///   or [`ResourceId::UNSET`].
    pub fn id(&self) -> ResourceId {
        self.id
    }

    pub fn value(&self) -> &Value {
        &self.value
    }
}

/// Resources of a single package.
#[derive(Debug, Clone)]
pub struct ResourceTable {
    package: String,
    package_id: u8,
    entries: Vec<Entry>,

    /// Name lookup.
    index: FxHashMap<ResourceName, EntryIndex>,

    /// Assigned ids,
    ///   used to enforce uniqueness within each type.
    ids: FxHashMap<ResourceId, EntryIndex>,

    /// Type id bound to each type that has at least one assigned id.
    type_ids: FxHashMap<ResourceType, u8>,
}

impl ResourceTable {
    pub fn new<P: Into<String>>(package: P, package_id: u8) -> Self {
        Self {
            package: package.into(),
            package_id,
            entries: Vec::new(),
            index: FxHashMap::default(),
            ids: FxHashMap::default(),
            type_ids: FxHashMap::default(),
        }
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    pub fn package_id(&self) -> u8 {
        self.package_id
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Qualify a local name with this table's package.
    ///
    /// Names that already carry a package are returned as-is.
    pub fn qualify<'a>(&self, name: &'a ResourceName) -> Cow<'a, ResourceName> {
        if name.is_local() {
            Cow::Owned(name.with_package(self.package.as_str()))
        } else {
            Cow::Borrowed(name)
        }
    }

    /// Add a resource whose id will be assigned by
    ///   [`ResourceTable::assign_ids`].
    pub fn add(
        &mut self,
        name: ResourceName,
        source: SourceLine,
        value: Value,
    ) -> Result<EntryIndex, TableError> {
        self.add_with_id(name, source, ResourceId::UNSET, value)
    }

    /// Add a resource with a pre-assigned `id`.
    ///
    /// The id must belong to this package,
    ///   its type id must not already be bound to another type,
    ///   and its entry id must not be taken within its type.
    /// Providing [`ResourceId::UNSET`] is equivalent to
    ///   [`ResourceTable::add`].
    pub fn add_with_id(
        &mut self,
        name: ResourceName,
        source: SourceLine,
        id: ResourceId,
        value: Value,
    ) -> Result<EntryIndex, TableError> {
        let name = self.qualify(&name).into_owned();

        if name.package() != self.package {
            return Err(TableError::ForeignPackage {
                name,
                package: self.package.clone(),
            });
        }

        if let Some(existing) = self.find(&name) {
            return Err(TableError::Duplicate {
                existing: existing.source.clone(),
                name,
            });
        }

        if id != ResourceId::UNSET {
            self.check_id(&name, id)?;
        }

        let index = EntryIndex::new(self.entries.len());

        if id != ResourceId::UNSET {
            self.type_ids.insert(name.ty(), id.type_id());
            self.ids.insert(id, index);
        }

        self.index.insert(name.clone(), index);
        self.entries.push(Entry {
            name,
            source,
            id,
            value,
        });

        Ok(index)
    }

    fn check_id(
        &self,
        name: &ResourceName,
        id: ResourceId,
    ) -> Result<(), TableError> {
        if !id.is_valid() {
            return Err(TableError::InvalidId {
                name: name.clone(),
                id,
            });
        }

        if id.package_id() != self.package_id {
            return Err(TableError::ForeignId {
                name: name.clone(),
                id,
            });
        }

        let type_conflict = self.type_ids.iter().any(|(ty, tid)| {
            (*ty == name.ty()) != (*tid == id.type_id())
        });

        if type_conflict {
            return Err(TableError::TypeIdConflict {
                ty: name.ty(),
                type_id: id.type_id(),
            });
        }

        match self.ids.get(&id).and_then(|i| self.get(*i)) {
            Some(existing) => Err(TableError::IdConflict {
                name: name.clone(),
                id,
                existing: existing.name.clone(),
            }),
            None => Ok(()),
        }
    }

    pub fn get(&self, index: EntryIndex) -> Option<&Entry> {
        self.entries.get(index.as_usize())
    }

    /// Look up an entry by name.
    ///
    /// Local names are qualified before lookup.
    pub fn lookup(&self, name: &ResourceName) -> Option<EntryIndex> {
        self.index.get(self.qualify(name).as_ref()).copied()
    }

    pub fn find(&self, name: &ResourceName) -> Option<&Entry> {
        self.lookup(name).and_then(|i| self.get(i))
    }

    /// Resolve a [`RefHandle`] to the [`Reference`] it describes.
    pub fn reference(&self, handle: &RefHandle) -> Option<&Reference> {
        self.get(handle.entry)
            .and_then(|entry| entry.value.reference_at(handle.site))
    }

    /// Iterate over entries in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (EntryIndex, &Entry)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, entry)| (EntryIndex::new(i), entry))
    }

    /// Replace the value of the entry at `index`,
    ///   returning the previous value.
    ///
    /// Returns [`None`] and leaves the table unchanged if `index` does not
    ///   belong to this table.
    pub fn replace_value(
        &mut self,
        index: EntryIndex,
        value: Value,
    ) -> Option<Value> {
        self.entries
            .get_mut(index.as_usize())
            .map(|entry| std::mem::replace(&mut entry.value, value))
    }

    /// Assign an id to each entry that does not yet have one.
    ///
    /// Types that are not yet bound to a type id are bound to the lowest
    ///   free type id in order of first appearance.
    /// Each entry then receives the lowest free entry id within its type,
    ///   in declaration order.
    /// Existing ids are never altered,
    ///   so this operation is idempotent.
    ///
    /// Returns the entries that were assigned an id.
    pub fn assign_ids(&mut self) -> Result<Vec<EntryIndex>, TableError> {
        let mut used_types = FixedBitSet::with_capacity(global::TYPE_ID_COUNT);
        used_types.insert(0);
        self.type_ids
            .values()
            .for_each(|tid| used_types.insert(*tid as usize));

        let mut next_type = global::FIRST_TYPE_ID as usize;

        for entry in self.entries.iter() {
            let ty = entry.name.ty();

            if self.type_ids.contains_key(&ty) {
                continue;
            }

            while next_type < global::TYPE_ID_COUNT
                && used_types.contains(next_type)
            {
                next_type += 1;
            }

            if next_type >= global::TYPE_ID_COUNT {
                return Err(TableError::TypeIdsExhausted);
            }

            used_types.insert(next_type);
            self.type_ids.insert(ty, next_type as u8);
        }

        let mut used_entries: FxHashMap<u8, FixedBitSet> = FxHashMap::default();
        for id in self.ids.keys() {
            used_entries
                .entry(id.type_id())
                .or_insert_with(|| {
                    FixedBitSet::with_capacity(global::ENTRY_ID_COUNT)
                })
                .insert(id.entry_id() as usize);
        }

        let mut next_entry: FxHashMap<u8, usize> = FxHashMap::default();
        let mut assigned = Vec::new();

        for (i, entry) in self.entries.iter_mut().enumerate() {
            if entry.id != ResourceId::UNSET {
                continue;
            }

            let ty = entry.name.ty();
            let tid = self.type_ids[&ty];

            let used = used_entries.entry(tid).or_insert_with(|| {
                FixedBitSet::with_capacity(global::ENTRY_ID_COUNT)
            });
            let next = next_entry.entry(tid).or_insert(0);

            while *next < global::ENTRY_ID_COUNT && used.contains(*next) {
                *next += 1;
            }

            if *next >= global::ENTRY_ID_COUNT {
                return Err(TableError::EntryIdsExhausted(ty));
            }

            used.insert(*next);

            let id = ResourceId::new(
                self.package_id,
                tid,
                *next as global::EntryIdSize,
            );

            entry.id = id;
            self.ids.insert(id, EntryIndex::new(i));
            assigned.push(EntryIndex::new(i));
        }

        Ok(assigned)
    }
}

/// An operation on a [`ResourceTable`] could not be performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    /// A resource of the same name already exists.
    Duplicate {
        name: ResourceName,
        existing: SourceLine,
    },

    /// The resource belongs to a different package than the table.
    ForeignPackage {
        name: ResourceName,
        package: String,
    },

    /// A pre-assigned id belongs to a different package than the table.
    ForeignId { name: ResourceName, id: ResourceId },

    /// A pre-assigned id has a zero package or type id.
    InvalidId { name: ResourceName, id: ResourceId },

    /// A pre-assigned id is already held by another resource.
    IdConflict {
        name: ResourceName,
        id: ResourceId,
        existing: ResourceName,
    },

    /// A pre-assigned type id is bound to a different type,
    ///   or the type is bound to a different type id.
    TypeIdConflict { ty: ResourceType, type_id: u8 },

    /// There are more types than type ids.
    TypeIdsExhausted,

    /// There are more entries of a type than entry ids.
    EntryIdsExhausted(ResourceType),
}

impl Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use TableError::*;

        match self {
            Duplicate { name, existing } => write!(
                f,
                "duplicate resource `{name}` (first defined at {existing})"
            ),
            ForeignPackage { name, package } => write!(
                f,
                "resource `{name}` does not belong to package `{package}`"
            ),
            ForeignId { name, id } => write!(
                f,
                "id {id} of resource `{name}` belongs to another package"
            ),
            InvalidId { name, id } => {
                write!(f, "invalid id {id} for resource `{name}`")
            }
            IdConflict { name, id, existing } => write!(
                f,
                "id {id} of resource `{name}` is already assigned to \
                    `{existing}`"
            ),
            TypeIdConflict { ty, type_id } => write!(
                f,
                "type `{ty}` conflicts with existing binding of type id \
                    {type_id:#04x}"
            ),
            TypeIdsExhausted => write!(f, "too many resource types"),
            EntryIdsExhausted(ty) => {
                write!(f, "too many resources of type `{ty}`")
            }
        }
    }
}

impl Error for TableError {}
