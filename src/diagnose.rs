// Diagnostic system
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

//! Diagnostic system for error reporting.
//!
//! This system is heavily motivated by Rust's.
//! While the data structures and organization may differ,
//!   the diagnostic output is visually similar:
//!
//! ```text
//! error: attribute `app:attr/tint` expects color, but found `blue`
//!   --> res/values/styles.xml:4
//!       error: while linking `app:style/Base`
//! ```
//!
//! Resources are located only by [`SourceLine`],
//!   so diagnostics annotate lines rather than spans of text.

mod report;

pub use report::{Report, Reporter, VisualReporter};

use crate::res::SourceLine;
use std::{
    borrow::Cow,
    error::Error,
    fmt::{self, Display},
};

/// Diagnostic report.
///
/// This describes an error condition or other special event using a series
///   of [`SourceLine`]s to describe the source, cause, and circumstances
///   around an event.
pub trait Diagnostic: Error + Sized {
    /// Produce a series of [`AnnotatedLine`]s describing the source and
    ///   circumstances of the diagnostic event.
    fn describe(&self) -> Vec<AnnotatedLine>;
}

/// Diagnostic severity level.
///
/// Levels are used both for entire reports and for styling of individual
///   [`AnnotatedLine`]s.
///
/// Lower levels are more severe
///   (e.g. level 1 is the worst).
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Default)]
#[repr(u8)]
pub enum Level {
    /// An error internal to the linker that the user cannot resolve,
    ///   but may be able to work around.
    InternalError = 1,

    /// A user-resolvable error.
    ///
    /// These represent errors resulting from the user's input.
    #[default]
    Error,

    /// Useful information that supplements other messages.
    Note,

    /// Additional advice to the user that may help in debugging or fixing a
    ///   problem.
    ///
    /// Unlike other severity levels which provide concrete factual
    ///   information,
    ///     help messages may be more speculative.
    Help,
}

impl Level {
    /// Whether this level represents an error of any kind.
    pub fn is_error(&self) -> bool {
        matches!(self, Level::InternalError | Level::Error)
    }
}

impl Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::InternalError => write!(f, "internal error"),
            Level::Error => write!(f, "error"),
            Level::Note => write!(f, "note"),
            Level::Help => write!(f, "help"),
        }
    }
}

/// A label associated with a report or [`SourceLine`].
///
/// See [`AnnotatedLine`].
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Label<'a>(Cow<'a, str>);

impl<'a> Display for Label<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl<'a> From<String> for Label<'a> {
    fn from(s: String) -> Self {
        Self(Cow::Owned(s))
    }
}

impl<'a> From<&'a str> for Label<'a> {
    fn from(s: &'a str) -> Self {
        Self(Cow::Borrowed(s))
    }
}

/// A source line with an associated severity level and optional label.
///
/// Annotated lines are intended to guide users through debugging a
///   diagnostic message by describing important source locations that
///   contribute to a given diagnostic event.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct AnnotatedLine<'l>(SourceLine, Level, Option<Label<'l>>);

impl<'l> AnnotatedLine<'l> {
    pub fn source(&self) -> &SourceLine {
        &self.0
    }

    pub fn level(&self) -> Level {
        self.1
    }

    pub fn label(&self) -> Option<&Label<'l>> {
        self.2.as_ref()
    }
}

impl<'l> From<AnnotatedLine<'l>> for Vec<AnnotatedLine<'l>> {
    fn from(x: AnnotatedLine<'l>) -> Self {
        vec![x]
    }
}

pub trait Annotate: Sized {
    /// Annotate a [`SourceLine`] with a severity [`Level`] and an optional
    ///   [`Label`] to display alongside of it.
    ///
    /// You may wish to use one of the more specific methods that provide a
    ///   more pleasant interface.
    fn annotate(self, level: Level, label: Option<Label>) -> AnnotatedLine;

    /// Annotate a line as an internal error that the user is not expected
    ///   to be able to resolve,
    ///     but may be able to work around.
    fn internal_error<'l, L: Into<Label<'l>>>(
        self,
        label: L,
    ) -> AnnotatedLine<'l> {
        self.annotate(Level::InternalError, Some(label.into()))
    }

    /// Annotate a line with a clarifying label styled as an error.
    ///
    /// If the label does not include additional _useful_ information over
    ///   the generic message,
    ///     then it may be omitted in favor of `Annotate::mark_error` to
    ///     simply mark the location of the error.
    ///
    /// (This is not named `err` since it does not return an [`Err`].)
    fn error<'l, L: Into<Label<'l>>>(self, label: L) -> AnnotatedLine<'l> {
        self.annotate(Level::Error, Some(label.into()))
    }

    /// Like [`Annotate::error`],
    ///   but only styles the line as a [`Level::Error`] without attaching a
    ///   label.
    fn mark_error(self) -> AnnotatedLine<'static> {
        self.annotate(Level::Error, None)
    }

    /// Supplemental annotated line providing additional context for
    ///   another line.
    fn note<'l, L: Into<Label<'l>>>(self, label: L) -> AnnotatedLine<'l> {
        self.annotate(Level::Note, Some(label.into()))
    }

    /// Provide additional information that may be used to help the user in
    ///   debugging or fixing a diagnostic.
    fn help<'l, L: Into<Label<'l>>>(self, label: L) -> AnnotatedLine<'l> {
        self.annotate(Level::Help, Some(label.into()))
    }
}

impl<S: Into<SourceLine>> Annotate for S {
    fn annotate(self, level: Level, label: Option<Label>) -> AnnotatedLine {
        AnnotatedLine(self.into(), level, label)
    }
}
