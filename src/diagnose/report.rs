// Diagnostic system rendering
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

//! Rendering of diagnostic information.

// NB: `write!` together with `\n` is preferred to `writeln!` so that there
//   is only a single sequence of characters to search for while tracking
//   down newlines,
//     rather than using both.

use super::{AnnotatedLine, Diagnostic, Label, Level};
use crate::res::SourceLine;
use std::fmt::{self, Display};

pub trait Reporter {
    /// Render diagnostic report.
    ///
    /// The provided [`Report`] implements [`Display`].
    ///
    /// Please be mindful of where this report is being rendered to
    ///   (via [`Display`]).
    /// For example,
    ///   if rendering to standard out,
    ///   it is a good idea to buffer the entire report before flushing to
    ///     stdout,
    ///       otherwise the report may become interleaved with other
    ///       concurrent processes.
    ///
    /// This method _does not return [`Result`]_ and should never fail.
    fn render<'d, D: Diagnostic>(&mut self, diagnostic: &'d D)
        -> Report<'d, D>;

    /// Number of reports rendered so far whose level was an error.
    fn error_count(&self) -> usize;

    /// Whether any error has been reported.
    fn has_errors(&self) -> bool {
        self.error_count() > 0
    }
}

/// Render diagnostic report in a highly visual way.
///
/// This report is modeled after Rust's default error reporting,
///   walking the user through each source line involved in the
///   diagnostic along with its labels.
#[derive(Debug, Default)]
pub struct VisualReporter {
    /// Number of error reports rendered.
    error_n: usize,
}

impl VisualReporter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Reporter for VisualReporter {
    fn render<'d, D: Diagnostic>(
        &mut self,
        diagnostic: &'d D,
    ) -> Report<'d, D> {
        let mut report = Report::empty(Message(diagnostic));
        report.extend(diagnostic.describe().into_iter().map(Into::into));

        if report.level.is_error() {
            self.error_n += 1;
        }

        report
    }

    fn error_count(&self) -> usize {
        self.error_n
    }
}

#[derive(Debug)]
pub struct Report<'d, D: Diagnostic> {
    msg: Message<'d, D>,
    secs: Vec<Section<'d>>,
    level: Level,
}

impl<'d, D: Diagnostic> Report<'d, D> {
    fn empty(msg: Message<'d, D>) -> Self {
        Self {
            msg,
            secs: Vec::new(),
            level: Level::default(),
        }
    }

    /// Most severe level of any section of the report,
    ///   defaulting to [`Level::Error`].
    pub fn level(&self) -> Level {
        self.level
    }
}

impl<'d, D: Diagnostic> Extend<Section<'d>> for Report<'d, D> {
    fn extend<T: IntoIterator<Item = Section<'d>>>(&mut self, secs: T) {
        for sec in secs {
            self.level = self.level.min(sec.level);

            // Add the section if it cannot be squashed into the previous.
            let remain = sec.maybe_squash_into(self.secs.last_mut());
            self.secs.extend(remain);
        }
    }
}

impl<'d, D: Diagnostic> Display for Report<'d, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{level}: {msg}\n", level = self.level, msg = self.msg)?;
        self.secs.iter().try_for_each(|sec| sec.fmt(f))
    }
}

#[derive(Debug)]
struct Message<'d, D: Diagnostic>(&'d D);

impl<'d, D: Diagnostic> Display for Message<'d, D> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        Display::fmt(self.0, f)
    }
}

/// A section of a [`Report`] describing a [`SourceLine`].
///
/// Adjacent sections describing the same line are squashed
///   (see [`Section::maybe_squash_into`]),
///   but not non-adjacent ones,
///     since reports ought to be able to produce narratives that may
///       revisit previous lines.
#[derive(Debug, PartialEq, Eq)]
struct Section<'d> {
    source: SourceLine,
    labels: Vec<LineLabel<'d>>,
    level: Level,
}

impl<'d> Section<'d> {
    /// Squash self into the provided [`Section`] if they represent the same
    ///   [`SourceLine`],
    ///     otherwise do nothing.
    ///
    /// If squashed,
    ///   [`None`] is returned.
    /// Otherwise [`Some`] is returned with `self`.
    ///
    /// The term "squash" is borrowed from `git rebase`.
    fn maybe_squash_into(
        self,
        extend: Option<&mut Section<'d>>,
    ) -> Option<Self> {
        match extend {
            Some(extend_sec) if self.source == extend_sec.source => {
                extend_sec.level = extend_sec.level.min(self.level);
                extend_sec.labels.extend(self.labels);
                None
            }

            _ => Some(self),
        }
    }
}

impl<'d> From<AnnotatedLine<'d>> for Section<'d> {
    fn from(AnnotatedLine(source, level, olabel): AnnotatedLine<'d>) -> Self {
        Section {
            source,
            labels: olabel
                .map(|label| LineLabel(level, label))
                .into_iter()
                .collect(),
            level,
        }
    }
}

impl<'d> Display for Section<'d> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  --> {}\n", self.source)?;

        for label in self.labels.iter() {
            write!(f, "{label}\n")?;
        }

        Ok(())
    }
}

/// A label describing a line.
#[derive(Debug, PartialEq, Eq)]
struct LineLabel<'d>(Level, Label<'d>);

impl<'d> Display for LineLabel<'d> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self(level, label) = self;
        write!(f, "      {level}: {label}")
    }
}

#[cfg(test)]
mod test;
