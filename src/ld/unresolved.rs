// Unresolved symbol registry
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

//! Registry of references that could not be resolved.
//!
//! An unresolved reference does not fail linking;
//!   the target may be provided later
//!     (e.g. by a package linked in a subsequent step),
//!   so the linker records every occurrence here and lets the caller
//!   decide what to do with them.
//!
//! Names are kept in [`ResourceName`] order,
//!   and occurrences of each name in the order they were encountered.

use crate::{
    diagnose::{Annotate, AnnotatedLine, Diagnostic},
    res::{ResourceName, SourceLine},
};
use std::{
    collections::BTreeMap,
    error::Error,
    fmt::{self, Display},
};

/// Occurrences of each unresolved name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnresolvedSymbols {
    symbols: BTreeMap<ResourceName, Vec<SourceLine>>,
}

impl UnresolvedSymbols {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an occurrence of `name` at `source`.
    ///
    /// Duplicate occurrences are retained.
    pub fn add(&mut self, name: ResourceName, source: SourceLine) {
        self.symbols.entry(name).or_default().push(source);
    }

    /// Occurrences of `name`,
    ///   if it has been recorded.
    pub fn get(&self, name: &ResourceName) -> Option<&[SourceLine]> {
        self.symbols.get(name).map(Vec::as_slice)
    }

    pub fn contains(&self, name: &ResourceName) -> bool {
        self.symbols.contains_key(name)
    }

    pub fn iter(
        &self,
    ) -> impl Iterator<Item = (&ResourceName, &[SourceLine])> {
        self.symbols
            .iter()
            .map(|(name, sources)| (name, sources.as_slice()))
    }

    /// Number of distinct unresolved names.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// A diagnostic for each recorded occurrence.
    pub fn diagnostics(&self) -> impl Iterator<Item = UnresolvedRef> + '_ {
        self.symbols.iter().flat_map(|(name, sources)| {
            sources.iter().map(move |source| UnresolvedRef {
                name: name.clone(),
                source: source.clone(),
            })
        })
    }
}

/// A reference to a resource that could not be found.
///
/// This is a [`Diagnostic`] for the benefit of callers that choose to
///   report unresolved references;
///     the linker itself does not consider it an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedRef {
    pub name: ResourceName,
    pub source: SourceLine,
}

impl Display for UnresolvedRef {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "resource `{}` not found", self.name)
    }
}

impl Error for UnresolvedRef {}

impl Diagnostic for UnresolvedRef {
    fn describe(&self) -> Vec<AnnotatedLine> {
        vec![
            (&self.source).error("referenced here"),
            (&self.source).help(format!(
                "`{}` is not defined by this package or any package it \
                    links against",
                self.name,
            )),
        ]
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::diagnose::{Reporter, VisualReporter};

    fn name(s: &str) -> ResourceName {
        s.parse().unwrap()
    }

    fn src(line: usize) -> SourceLine {
        SourceLine::new("values.xml", line)
    }

    #[test]
    fn retains_occurrence_order_and_duplicates() {
        let mut sut = UnresolvedSymbols::new();
        let missing = name("app:color/missing");

        sut.add(missing.clone(), src(3));
        sut.add(missing.clone(), src(1));
        sut.add(missing.clone(), src(3));

        assert_eq!(1, sut.len());
        assert_eq!(Some(&[src(3), src(1), src(3)][..]), sut.get(&missing));
    }

    #[test]
    fn names_are_ordered() {
        let mut sut = UnresolvedSymbols::new();

        sut.add(name("app:style/B"), src(1));
        sut.add(name("app:attr/z"), src(2));
        sut.add(name("android:style/A"), src(3));

        assert_eq!(
            vec![
                name("android:style/A"),
                name("app:attr/z"),
                name("app:style/B"),
            ],
            sut.iter().map(|(name, _)| name.clone()).collect::<Vec<_>>(),
        );
    }

    #[test]
    fn empty_registry() {
        let sut = UnresolvedSymbols::new();

        assert!(sut.is_empty());
        assert!(!sut.contains(&name("app:color/c")));
        assert_eq!(None, sut.get(&name("app:color/c")));
        assert_eq!(0, sut.diagnostics().count());
    }

    #[test]
    fn renders_diagnostic_per_occurrence() {
        let mut sut = UnresolvedSymbols::new();
        sut.add(name("app:color/missing"), src(4));
        sut.add(name("app:color/missing"), src(9));

        let diags = sut.diagnostics().collect::<Vec<_>>();
        assert_eq!(2, diags.len());

        let mut reporter = VisualReporter::new();

        assert_eq!(
            "\
error: resource `app:color/missing` not found
  --> values.xml:4
      error: referenced here
      help: `app:color/missing` is not defined by this package or any \
package it links against
",
            reporter.render(&diags[0]).to_string(),
        );
    }
}
