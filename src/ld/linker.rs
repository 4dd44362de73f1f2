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

//! Linking of a [`ResourceTable`].
//!
//! See the [parent module](super) for an overview.

use super::{
    attr::convert,
    graph::{RefEdge, RefGraph},
    trace::{DefaultTrace, LinkTrace},
    unresolved::UnresolvedSymbols,
    LinkError,
};
use crate::{
    res::{
        Item, RefSite, Reference, ResourceName, SourceLine, Style, Value,
        ValueKind,
    },
    resolve::{ResolvedEntry, Resolver},
    table::{EntryIndex, RefHandle, ResourceTable},
};
use fixedbitset::FixedBitSet;

/// Links a [`ResourceTable`] against a [`Resolver`].
///
/// The linker owns the table for its lifetime,
///   so that nothing else may modify it while it is being linked.
/// The table may be inspected using [`Linker::table`] and recovered using
///   [`Linker::into_table`].
///
/// The reference graph,
///   unresolved symbols,
///   and errors accumulate across calls to
///   [`Linker::link_and_validate`].
pub struct Linker<R: Resolver, T: LinkTrace = DefaultTrace> {
    table: ResourceTable,
    resolver: R,
    graph: RefGraph,
    unresolved: UnresolvedSymbols,
    errors: Vec<LinkError>,

    /// Whether any fatal error has ever been recorded.
    failed: bool,

    trace: T,
}

impl<R: Resolver> Linker<R, DefaultTrace> {
    pub fn new(table: ResourceTable, resolver: R) -> Self {
        Self::with_trace(table, resolver, DefaultTrace::default())
    }
}

impl<R: Resolver, T: LinkTrace> Linker<R, T> {
    /// Create a linker that reports its progress to `trace`.
    pub fn with_trace(table: ResourceTable, resolver: R, trace: T) -> Self {
        Self {
            table,
            resolver,
            graph: RefGraph::new(),
            unresolved: UnresolvedSymbols::new(),
            errors: Vec::new(),
            failed: false,
            trace,
        }
    }

    /// Assign ids to all resources that lack one,
    ///   then resolve and validate every reference in the table.
    ///
    /// References that cannot be resolved are recorded
    ///   (see [`Linker::unresolved_references`])
    ///   but do not cause linking to fail.
    /// Returns `false` if a fatal error was encountered during this or any
    ///   previous call;
    ///     see [`Linker::errors`].
    pub fn link_and_validate(&mut self) -> bool {
        match self.table.assign_ids() {
            Ok(assigned) => {
                for index in assigned {
                    if let Some(entry) = self.table.get(index) {
                        self.trace.trace_assign(entry.name(), entry.id());
                    }
                }
            }

            // Without ids there is nothing that can be meaningfully
            //   resolved.
            Err(err) => {
                record_error(
                    &mut self.errors,
                    &mut self.failed,
                    &mut self.trace,
                    err.into(),
                );

                return false;
            }
        }

        let indexes = self.table.iter().map(|(i, _)| i).collect::<Vec<_>>();
        let mut visited = FixedBitSet::with_capacity(self.table.len());

        for index in indexes {
            if visited.put(index.as_usize()) {
                continue;
            }

            let (referrer, source, mut value) = match self.table.get(index) {
                Some(entry) => (
                    entry.name().clone(),
                    entry.source().clone(),
                    entry.value().clone(),
                ),
                None => continue,
            };

            LinkPass {
                table: &self.table,
                resolver: &self.resolver,
                graph: &mut self.graph,
                unresolved: &mut self.unresolved,
                errors: &mut self.errors,
                failed: &mut self.failed,
                trace: &mut self.trace,
                entry: index,
                referrer: &referrer,
                source: &source,
            }
            .link_value(&mut value);

            self.table.replace_value(index, value);
        }

        !self.failed
    }

    /// References that could not be resolved,
    ///   across all calls to [`Linker::link_and_validate`].
    pub fn unresolved_references(&self) -> &UnresolvedSymbols {
        &self.unresolved
    }

    /// Fatal errors in the order in which they were encountered.
    pub fn errors(&self) -> &[LinkError] {
        &self.errors
    }

    /// Whether a fatal error has been encountered.
    pub fn has_failed(&self) -> bool {
        self.failed
    }

    pub fn graph(&self) -> &RefGraph {
        &self.graph
    }

    pub fn table(&self) -> &ResourceTable {
        &self.table
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    pub fn into_table(self) -> ResourceTable {
        self.table
    }
}

fn record_error<T: LinkTrace>(
    errors: &mut Vec<LinkError>,
    failed: &mut bool,
    trace: &mut T,
    err: LinkError,
) {
    trace.trace_error(&err);
    *failed = true;
    errors.push(err);
}

/// Linking of a single table entry.
///
/// The value being linked is a copy of the entry's value,
///   so that the resolver may observe the table while the value is
///   modified;
///     the caller commits the value once linking is complete.
struct LinkPass<'a, R: Resolver, T: LinkTrace> {
    table: &'a ResourceTable,
    resolver: &'a R,
    graph: &'a mut RefGraph,
    unresolved: &'a mut UnresolvedSymbols,
    errors: &'a mut Vec<LinkError>,
    failed: &'a mut bool,
    trace: &'a mut T,

    entry: EntryIndex,
    referrer: &'a ResourceName,
    source: &'a SourceLine,
}

impl<'a, R: Resolver, T: LinkTrace> LinkPass<'a, R, T> {
    fn link_value(&mut self, value: &mut Value) {
        match value {
            Value::Item(item) => self.link_item(item, RefSite::Item),

            Value::Styleable(styleable) => {
                for (i, attr) in styleable.attrs.iter_mut().enumerate() {
                    self.link_expecting(
                        attr,
                        RefSite::StyleableAttr(i),
                        ValueKind::Attribute,
                    );
                }
            }

            Value::Style(style) => self.link_style(style),

            Value::Array(array) => {
                for (i, item) in array.items.iter_mut().enumerate() {
                    self.link_item(item, RefSite::ArrayItem(i));
                }
            }

            Value::Plural(plural) => {
                for (quantity, item) in plural.iter_mut() {
                    self.link_item(item, RefSite::PluralItem(quantity));
                }
            }

            // Nothing to follow.
            Value::Attribute(_) | Value::Sentinel => (),
        }
    }

    /// Resolve `item` if it is a reference;
    ///   all other items are terminal.
    fn link_item(&mut self, item: &mut Item, site: RefSite) {
        if let Item::Reference(r) = item {
            self.link_reference(r, site);
        }
    }

    fn link_style(&mut self, style: &mut Style) {
        if let Some(parent) = style.parent.as_mut() {
            self.link_expecting(parent, RefSite::StyleParent, ValueKind::Style);
        }

        for (i, entry) in style.entries.iter_mut().enumerate() {
            // An unresolved key leaves its value untouched,
            //   since its format is unknown.
            let attr = match self
                .link_expecting(
                    &mut entry.key,
                    RefSite::StyleKey(i),
                    ValueKind::Attribute,
                )
                .and_then(|found| found.attr)
            {
                Some(attr) => attr,
                None => continue,
            };

            match convert(attr, &entry.value) {
                Ok(Some(item)) => entry.value = item,
                Ok(None) => (),
                Err(err) => {
                    let attr = self.table.qualify(&entry.key.name).into_owned();

                    self.fail(LinkError::AttrValue {
                        referrer: self.referrer.clone(),
                        source: self.source.clone(),
                        attr,
                        err,
                    });

                    continue;
                }
            }

            self.link_item(&mut entry.value, RefSite::StyleValue(i));
        }
    }

    /// Resolve `r`,
    ///   failing if it resolves to anything other than a resource of
    ///   kind `expected`.
    fn link_expecting(
        &mut self,
        r: &mut Reference,
        site: RefSite,
        expected: ValueKind,
    ) -> Option<ResolvedEntry<'a>> {
        let found = self.link_reference(r, site)?;

        if found.kind != expected {
            self.fail(LinkError::WrongKind {
                referrer: self.referrer.clone(),
                source: self.source.clone(),
                target: self.table.qualify(&r.name).into_owned(),
                expected,
                found: found.kind,
            });

            return None;
        }

        Some(found)
    }

    /// Resolve `r` via the [`Resolver`],
    ///   recording an edge on success and an unresolved symbol otherwise.
    fn link_reference(
        &mut self,
        r: &mut Reference,
        site: RefSite,
    ) -> Option<ResolvedEntry<'a>> {
        let (table, resolver) = (self.table, self.resolver);

        let target = table.qualify(&r.name).into_owned();
        let found = resolver.find(table, &target);

        self.trace.trace_resolve(
            self.referrer,
            self.source,
            &target,
            found.map(|found| found.id),
        );

        match found {
            Some(found) if !found.id.is_valid() => {
                self.fail(LinkError::InvalidId {
                    referrer: self.referrer.clone(),
                    source: self.source.clone(),
                    target,
                    id: found.id,
                });

                None
            }

            Some(found) => {
                r.resolve(found.id);

                self.graph.add_ref(
                    self.referrer,
                    &target,
                    RefEdge {
                        source: self.source.clone(),
                        handle: RefHandle {
                            entry: self.entry,
                            site,
                        },
                    },
                );

                Some(found)
            }

            None => {
                self.unresolved.add(target, self.source.clone());
                None
            }
        }
    }

    fn fail(&mut self, err: LinkError) {
        record_error(
            &mut *self.errors,
            &mut *self.failed,
            &mut *self.trace,
            err,
        );
    }
}
