// Resource reference graph
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

//! Graph of references between resources.
//!
//! Each node is a fully qualified [`ResourceName`] and each edge is a
//!   single successful resolution of a [`Reference`](crate::res::Reference)
//!   from the referring resource to its target.
//! Edges carry the [`SourceLine`] of the referrer and a [`RefHandle`]
//!   identifying the reference within the table,
//!     so that the reference itself can be recovered without the graph
//!     holding a pointer into table storage.
//!
//! The graph may contain cycles
//!   (e.g. two styles that name each other as parent);
//!     they are recorded like any other edge and are never detected here.
//! Edges are never deduplicated,
//!   so linking the same table twice doubles its edges.

use crate::{
    global,
    res::{ResourceName, SourceLine},
    table::RefHandle,
};
use fxhash::FxHashMap;
use petgraph::{
    graph::{DiGraph, NodeIndex},
    visit::EdgeRef,
    Direction,
};
use std::fmt::{self, Debug};

/// Index size for graph nodes and edges.
type Ix = global::EntryIndexSize;

/// A single resolved reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefEdge {
    /// Location of the referring resource.
    pub source: SourceLine,

    /// The resolved reference within the table.
    pub handle: RefHandle,
}

/// Directed graph of references.
///
/// This implementation is based on [`petgraph`].
///
/// Nodes are never removed,
///   and are created on first mention as either referrer or target.
#[derive(Default)]
pub struct RefGraph {
    graph: DiGraph<ResourceName, RefEdge, Ix>,
    index: FxHashMap<ResourceName, NodeIndex<Ix>>,
}

impl Debug for RefGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The full graph is far too noisy for traces.
        write!(
            f,
            "[RefGraph: {} resources, {} references]",
            self.node_count(),
            self.edge_count(),
        )
    }
}

impl RefGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Node of `name`,
    ///   creating it if it does not yet exist.
    fn lookup_or_add(&mut self, name: &ResourceName) -> NodeIndex<Ix> {
        match self.index.get(name) {
            Some(&node) => node,
            None => {
                let node = self.graph.add_node(name.clone());
                self.index.insert(name.clone(), node);
                node
            }
        }
    }

    /// Record a resolved reference from `referrer` to `target`.
    pub fn add_ref(
        &mut self,
        referrer: &ResourceName,
        target: &ResourceName,
        edge: RefEdge,
    ) {
        let from = self.lookup_or_add(referrer);
        let to = self.lookup_or_add(target);

        self.graph.add_edge(from, to, edge);
    }

    fn edges_directed<'a>(
        &'a self,
        name: &ResourceName,
        dir: Direction,
    ) -> impl Iterator<Item = (&'a ResourceName, &'a RefEdge)> + 'a {
        let graph = &self.graph;

        self.index
            .get(name)
            .into_iter()
            .flat_map(move |&node| graph.edges_directed(node, dir))
            .map(move |edge| {
                let other = match dir {
                    Direction::Outgoing => edge.target(),
                    Direction::Incoming => edge.source(),
                };

                (&graph[other], edge.weight())
            })
    }

    /// Targets referenced by `referrer`,
    ///   one item per edge.
    ///
    /// The order of edges is unspecified.
    pub fn references_from<'a>(
        &'a self,
        referrer: &ResourceName,
    ) -> impl Iterator<Item = (&'a ResourceName, &'a RefEdge)> + 'a {
        self.edges_directed(referrer, Direction::Outgoing)
    }

    /// Resources referencing `target`,
    ///   one item per edge.
    ///
    /// The order of edges is unspecified.
    pub fn referrers_of<'a>(
        &'a self,
        target: &ResourceName,
    ) -> impl Iterator<Item = (&'a ResourceName, &'a RefEdge)> + 'a {
        self.edges_directed(target, Direction::Incoming)
    }

    /// Whether at least one reference from `referrer` to `target` has been
    ///   recorded.
    pub fn has_ref(
        &self,
        referrer: &ResourceName,
        target: &ResourceName,
    ) -> bool {
        match (self.index.get(referrer), self.index.get(target)) {
            (Some(&from), Some(&to)) => self.graph.contains_edge(from, to),
            _ => false,
        }
    }

    /// Number of distinct resources that are referrers or targets.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of recorded references.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{res::RefSite, table::ResourceTable};

    fn name(s: &str) -> ResourceName {
        s.parse().unwrap()
    }

    fn edge(line: usize) -> RefEdge {
        let mut table = ResourceTable::new("app", global::APP_PACKAGE_ID);
        let entry = table
            .add(
                name("style/Any"),
                SourceLine::new("values.xml", line),
                crate::res::Value::Sentinel,
            )
            .unwrap();

        RefEdge {
            source: SourceLine::new("values.xml", line),
            handle: RefHandle {
                entry,
                site: RefSite::StyleParent,
            },
        }
    }

    #[test]
    fn empty_graph() {
        let sut = RefGraph::new();

        assert_eq!(0, sut.node_count());
        assert_eq!(0, sut.edge_count());
        assert_eq!(0, sut.references_from(&name("app:style/A")).count());
        assert!(!sut.has_ref(&name("app:style/A"), &name("app:style/B")));
    }

    #[test]
    fn records_edges_in_both_directions() {
        let mut sut = RefGraph::new();
        let (a, b, c) =
            (name("app:style/A"), name("app:style/B"), name("app:attr/c"));

        sut.add_ref(&a, &b, edge(1));
        sut.add_ref(&a, &c, edge(2));

        assert_eq!(3, sut.node_count());
        assert_eq!(2, sut.edge_count());

        assert!(sut.has_ref(&a, &b));
        assert!(sut.has_ref(&a, &c));
        assert!(!sut.has_ref(&b, &a));

        let mut targets = sut
            .references_from(&a)
            .map(|(name, _)| name.clone())
            .collect::<Vec<_>>();
        targets.sort();
        assert_eq!(vec![c.clone(), b.clone()], targets);

        assert_eq!(
            vec![(&a, &edge(1))],
            sut.referrers_of(&b).collect::<Vec<_>>(),
        );
    }

    #[test]
    fn cycles_are_recorded() {
        let mut sut = RefGraph::new();
        let (a, b) = (name("app:style/A"), name("app:style/B"));

        sut.add_ref(&a, &b, edge(1));
        sut.add_ref(&b, &a, edge(2));

        assert!(sut.has_ref(&a, &b));
        assert!(sut.has_ref(&b, &a));
        assert_eq!(2, sut.node_count());
    }

    #[test]
    fn edges_are_not_deduplicated() {
        let mut sut = RefGraph::new();
        let (a, b) = (name("app:style/A"), name("app:style/B"));

        sut.add_ref(&a, &b, edge(1));
        sut.add_ref(&a, &b, edge(1));

        assert_eq!(2, sut.edge_count());
        assert_eq!(2, sut.referrers_of(&b).count());
    }
}
