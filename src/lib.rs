#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Barnsley fern generator
//!
//! An iterated function system (IFS) is a small set of contracting
//! affine maps, each with a probability attached.  Start with a point
//! at the origin, pick one of the maps at random according to those
//! probabilities, apply it, and repeat.  However far from the
//! attractor the point starts, after a few iterations it lands on it
//! and never leaves, so the sequence of visited points traces out the
//! attractor's shape.  With the four maps Michael Barnsley published,
//! that shape is a black spleenwort fern.
//!
//! This crate produces the point cloud and a color for each point.
//! Turning those into pixels is the caller's business.

pub mod affine;
pub mod engine;
pub mod errors;
pub mod table;

#[cfg(test)]
mod testing;

pub use crate::affine::{apply, AffineMap, Point};
pub use crate::engine::{
    checked_count, generate, generate_threaded, generate_with, Fern, Progress,
};
pub use crate::errors::IfsError;
pub use crate::table::{select_transform, TransformTable};
