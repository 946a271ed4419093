// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The one error type the generator can return.

use failure::Fail;

/// Everything that can go wrong between a caller asking for a fern
/// and getting one.  None of these are transient; retrying with the
/// same arguments fails the same way.
#[derive(Debug, Fail, PartialEq)]
pub enum IfsError {
    /// The caller asked for something nonsensical: an empty palette,
    /// a negative point count, zero worker threads.
    #[fail(display = "invalid argument: {}", _0)]
    InvalidArgument(String),

    /// A transform table whose probabilities are not a distribution.
    #[fail(display = "invalid transform table: {}", _0)]
    InvalidTable(String),

    /// A worker thread in the threaded generator died.
    #[fail(display = "worker thread panicked while generating")]
    WorkerPanicked,
}
