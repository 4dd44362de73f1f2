// Tests for diagnostic system rendering
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

//! These tests assert,
//!   byte-for-byte,
//!   against the report output that will be rendered to the user.
//! Do not interpret them as providing a stable report format;
//!   they exist so that changes to the format are deliberate.

use super::super::Annotate;
use super::*;
use std::error::Error;

#[derive(Debug)]
struct StubError(String, Vec<AnnotatedLine<'static>>);

impl Display for StubError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Error for StubError {}

impl Diagnostic for StubError {
    fn describe(&self) -> Vec<AnnotatedLine> {
        self.1.clone()
    }
}

fn foo(line: usize) -> SourceLine {
    SourceLine::new("res/values/foo.xml", line)
}

macro_rules! assert_report {
    ($msg:expr, $alines:expr, $expected:expr) => {
        let mut sut = VisualReporter::new();

        assert_eq!(
            sut.render(&StubError($msg.into(), $alines)).to_string(),
            $expected,
        );
    };
}

#[test]
fn no_lines() {
    assert_report!(
        "test with no lines",
        vec![],
        // No lines will result in the `Display` of the error only.
        "error: test with no lines\n"
    );
}

#[test]
fn single_line_with_label() {
    assert_report!(
        "single line",
        vec![foo(3).error("label here")],
        "\
error: single line
  --> res/values/foo.xml:3
      error: label here
"
    );
}

#[test]
fn marked_line_has_no_label() {
    assert_report!(
        "marked",
        vec![foo(1).mark_error()],
        "\
error: marked
  --> res/values/foo.xml:1
"
    );
}

#[test]
fn adjacent_lines_are_squashed() {
    assert_report!(
        "squashed",
        vec![
            foo(2).error("first"),
            foo(2).help("second"),
            foo(5).note("elsewhere"),
            foo(2).help("revisited"),
        ],
        "\
error: squashed
  --> res/values/foo.xml:2
      error: first
      help: second
  --> res/values/foo.xml:5
      note: elsewhere
  --> res/values/foo.xml:2
      help: revisited
"
    );
}

#[test]
fn internal_error_raises_report_level() {
    let mut sut = VisualReporter::new();
    let err = StubError("bad".into(), vec![foo(1).internal_error("oops")]);

    let report = sut.render(&err);

    assert_eq!(Level::InternalError, report.level());
    assert!(report.to_string().starts_with("internal error: bad\n"));
}

#[test]
fn counts_errors() {
    let mut sut = VisualReporter::new();
    assert!(!sut.has_errors());

    let err = StubError("one".into(), vec![]);
    sut.render(&err);
    sut.render(&err);

    assert_eq!(2, sut.error_count());
    assert!(sut.has_errors());
}
