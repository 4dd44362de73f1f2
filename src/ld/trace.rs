// Linker tracing
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

//! Tracing for linking operations.
//!
//! This provides human-readable traces on standard error any time an id
//!   is assigned or a reference is resolved.
//! These traces are provided automatically when `cfg(test)`,
//!   which means that they are automatically included in the output of any
//!   test failure.
//!
//! Outside of tests,
//!   this can be enabled at build-time using the `link-trace-stderr`
//!   feature flag.
//!
//! _These traces are not meant to be machine-readable!_
//! Do not try to parse them;
//!   the format is subject to change without notice.

use super::LinkError;
use crate::res::{ResourceId, ResourceName, SourceLine};

/// Tracing hooks invoked by the [`Linker`](super::Linker).
///
/// There is no means to return an error and a failure to output the
///   trace should not interrupt processing.
pub trait LinkTrace: Default {
    /// An id was assigned to `name`.
    fn trace_assign(&mut self, name: &ResourceName, id: ResourceId);

    /// A reference from `referrer` to `target` was looked up,
    ///   resolving to `id` if it was found.
    fn trace_resolve(
        &mut self,
        referrer: &ResourceName,
        source: &SourceLine,
        target: &ResourceName,
        id: Option<ResourceId>,
    );

    /// A fatal error was recorded.
    fn trace_error(&mut self, err: &LinkError);
}

/// Perform no tracing.
///
/// This should be used by default for non-test builds,
///   since tracing can incur a significant performance cost.
#[derive(Debug, PartialEq, Default)]
pub struct VoidTrace;

impl LinkTrace for VoidTrace {
    fn trace_assign(&mut self, _name: &ResourceName, _id: ResourceId) {
        // Do nothing at all.
    }

    fn trace_resolve(
        &mut self,
        _referrer: &ResourceName,
        _source: &SourceLine,
        _target: &ResourceName,
        _id: Option<ResourceId>,
    ) {
        // Do nothing at all.
    }

    fn trace_error(&mut self, _err: &LinkError) {
        // Do nothing at all.
    }
}

/// Human-readable [`LinkTrace`].
///
/// See [module-level](self) documentation for more information.
#[derive(Debug, PartialEq, Default)]
pub struct HumanReadableTrace;

impl HumanReadableTrace {
    fn note_cfg() {
        #[allow(unused_variables)]
        let cfg = ""; // so that this compiles without matching cfg
        #[cfg(feature = "link-trace-stderr")]
        #[allow(unused_variables)]
        let cfg = "feature = \"link-trace-stderr\"";
        #[cfg(test)] // takes precedence if both are set
        let cfg = "test";
        eprint!(
            "= note: this trace was output as a debugging aid \
                because `cfg({cfg})`.\n\n",
        );
    }
}

impl LinkTrace for HumanReadableTrace {
    fn trace_assign(&mut self, name: &ResourceName, id: ResourceId) {
        eprint!("[Linker::assign_ids] {name} => {id}\n");
    }

    fn trace_resolve(
        &mut self,
        referrer: &ResourceName,
        source: &SourceLine,
        target: &ResourceName,
        id: Option<ResourceId>,
    ) {
        eprint!(
            "\
[Linker::resolve] {referrer} ({source})
| ==> reference to {target}\n",
        );

        match id {
            Some(id) => eprint!("| ==> resolved to {id}\n"),
            None => eprint!("| ==> unresolved; recording symbol\n"),
        }

        Self::note_cfg();
    }

    fn trace_error(&mut self, err: &LinkError) {
        eprint!(
            "\
[Linker::link_and_validate]
| ==> !!! error: {err}.
|  |  {err:?}\n",
        );

        Self::note_cfg();
    }
}

/// Trace used by the [`Linker`](super::Linker) unless otherwise specified.
#[cfg(any(test, feature = "link-trace-stderr"))]
pub type DefaultTrace = HumanReadableTrace;

/// Trace used by the [`Linker`](super::Linker) unless otherwise specified.
#[cfg(not(any(test, feature = "link-trace-stderr")))]
pub type DefaultTrace = VoidTrace;
