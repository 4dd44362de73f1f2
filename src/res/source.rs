// Source provenance of resources
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

//! Where a resource was declared.
//!
//! A [`SourceLine`] exists solely for diagnostics;
//!   it has no effect on resolution.

use std::fmt::{self, Display};

/// File path and line number of a declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SourceLine {
    path: String,
    line: usize,
}

impl SourceLine {
    pub fn new<P: Into<String>>(path: P, line: usize) -> Self {
        Self {
            path: path.into(),
            line,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn line(&self) -> usize {
        self.line
    }
}

impl From<&SourceLine> for SourceLine {
    fn from(source: &SourceLine) -> Self {
        source.clone()
    }
}

impl Display for SourceLine {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}", self.path, self.line)
    }
}
