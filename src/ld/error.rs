// Linker errors
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

//! Errors resulting from linking.
//!
//! These are fatal:
//!   any one of them causes [`Linker::link_and_validate`] to report
//!   failure.
//! A reference that simply cannot be found is _not_ a [`LinkError`];
//!   see [`UnresolvedSymbols`](super::UnresolvedSymbols).
//!
//! [`Linker::link_and_validate`]: super::Linker::link_and_validate

use super::attr::AttrValueError;
use crate::{
    diagnose::{Annotate, AnnotatedLine, Diagnostic},
    res::{ResourceId, ResourceName, SourceLine, ValueKind},
    table::TableError,
};
use std::{
    error::Error,
    fmt::{self, Display},
};

/// A fatal error encountered while linking.
#[derive(Debug, Clone, PartialEq)]
pub enum LinkError {
    /// A reference resolved to a resource of a kind that is not permitted
    ///   at that site
    ///     (e.g. a style parent that is not a style).
    WrongKind {
        referrer: ResourceName,
        source: SourceLine,
        target: ResourceName,
        expected: ValueKind,
        found: ValueKind,
    },

    /// A reference resolved to a resource that has no valid id.
    InvalidId {
        referrer: ResourceName,
        source: SourceLine,
        target: ResourceName,
        id: ResourceId,
    },

    /// A value is not acceptable for the attribute it is assigned to.
    AttrValue {
        referrer: ResourceName,
        source: SourceLine,
        attr: ResourceName,
        err: AttrValueError,
    },

    /// Ids could not be assigned.
    Table(TableError),
}

impl LinkError {
    /// Resource being linked when the error occurred,
    ///   if the error is associated with one.
    pub fn referrer(&self) -> Option<&ResourceName> {
        use LinkError::*;

        match self {
            WrongKind { referrer, .. }
            | InvalidId { referrer, .. }
            | AttrValue { referrer, .. } => Some(referrer),
            Table(_) => None,
        }
    }
}

impl Display for LinkError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use LinkError::*;

        match self {
            WrongKind {
                target,
                expected,
                found,
                ..
            } => write!(
                f,
                "expected `{target}` to be {expected}, but found {found}"
            ),
            InvalidId { target, id, .. } => {
                write!(f, "resource `{target}` has invalid id {id}")
            }
            AttrValue { attr, err, .. } => {
                write!(f, "invalid value for attribute `{attr}`: {err}")
            }
            Table(err) => Display::fmt(err, f),
        }
    }
}

impl Error for LinkError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        use LinkError::*;

        match self {
            AttrValue { err, .. } => Some(err),
            Table(err) => Some(err),
            WrongKind { .. } | InvalidId { .. } => None,
        }
    }
}

impl From<TableError> for LinkError {
    fn from(err: TableError) -> Self {
        Self::Table(err)
    }
}

impl Diagnostic for LinkError {
    fn describe(&self) -> Vec<AnnotatedLine> {
        use LinkError::*;

        match self {
            WrongKind {
                referrer,
                source,
                expected,
                ..
            } => vec![
                source.error(format!("referenced by `{referrer}`")),
                source.help(format!(
                    "only a resource of kind `{expected}` may be referenced here"
                )),
            ],

            InvalidId {
                referrer, source, ..
            } => vec![
                source.error(format!("referenced by `{referrer}`")),
                source.help("ids must be assigned before linking"),
            ],

            AttrValue {
                referrer, source, ..
            } => vec![source.error(format!("while linking `{referrer}`"))],

            // Id assignment is not associated with any single line.
            Table(_) => vec![],
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        diagnose::{Reporter, VisualReporter},
        res::Format,
    };

    fn name(s: &str) -> ResourceName {
        s.parse().unwrap()
    }

    #[test]
    fn wrong_kind_report() {
        let err = LinkError::WrongKind {
            referrer: name("app:styleable/View"),
            source: SourceLine::new("attrs.xml", 7),
            target: name("app:style/Base"),
            expected: ValueKind::Attribute,
            found: ValueKind::Style,
        };

        assert_eq!(
            "\
error: expected `app:style/Base` to be attribute, but found style
  --> attrs.xml:7
      error: referenced by `app:styleable/View`
      help: only a resource of kind `attribute` may be referenced here
",
            VisualReporter::new().render(&err).to_string(),
        );
    }

    #[test]
    fn attr_value_error_is_source() {
        let inner = AttrValueError::FormatMismatch {
            expected: Format::COLOR,
            given: "notacolor".into(),
        };

        let err = LinkError::AttrValue {
            referrer: name("app:style/S"),
            source: SourceLine::new("styles.xml", 2),
            attr: name("app:attr/foo"),
            err: inner.clone(),
        };

        assert_eq!(
            "invalid value for attribute `app:attr/foo`: \
                expected color, but found `notacolor`",
            err.to_string(),
        );
        assert_eq!(Some(&name("app:style/S")), err.referrer());
        assert_eq!(
            Some(inner.to_string()),
            err.source().map(ToString::to_string),
        );
    }

    #[test]
    fn table_errors_convert() {
        let err: LinkError = TableError::TypeIdsExhausted.into();

        assert_eq!(None, err.referrer());
        assert!(err.describe().is_empty());
    }
}
