// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The chaos game itself.
//!
//! Starting from the origin, pick a map from the table, apply it,
//! record the result, and make that the new current point.  The
//! origin is never recorded; the first point out is the first map's
//! image of it.  Nothing survives between calls except the table,
//! which is read-only, so any number of these can run at once as long
//! as each has its own random source.

use crossbeam::thread::ScopedJoinHandle;
use itertools::{Itertools, MinMaxResult};
use log::debug;
use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::affine::Point;
use crate::errors::IfsError;
use crate::table::{select_transform, TransformTable};

/// What a progress hook tells the generator after each point.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Progress {
    /// Keep going.
    Continue,
    /// Stop here.  Everything generated so far is returned.
    Stop,
}

/// A generated point cloud.  `points[i]` is meant to be drawn in
/// `colors[i]`; the two are always the same length.
#[derive(Clone, Debug, PartialEq)]
pub struct Fern<C> {
    /// The trajectory, origin excluded.
    pub points: Vec<Point>,
    /// One palette entry per point.
    pub colors: Vec<C>,
}

impl<C> Fern<C> {
    fn with_capacity(n: usize) -> Self {
        Fern {
            points: Vec::with_capacity(n),
            colors: Vec::with_capacity(n),
        }
    }

    /// The number of points (and of colors).
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True when no points were generated.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Walk the points and their colors together.
    pub fn iter(&self) -> impl Iterator<Item = (&Point, &C)> {
        self.points.iter().zip(self.colors.iter())
    }

    /// The lower-left and upper-right corners of the smallest box
    /// holding every point, or `None` for an empty fern.  Renderers
    /// use this to fit the cloud to their canvas.
    pub fn bounds(&self) -> Option<(Point, Point)> {
        let (xlo, xhi) = span(self.points.iter().map(|p| p.0))?;
        let (ylo, yhi) = span(self.points.iter().map(|p| p.1))?;
        Some((Point(xlo, ylo), Point(xhi, yhi)))
    }
}

fn span<I: Iterator<Item = f64>>(values: I) -> Option<(f64, f64)> {
    match values.minmax() {
        MinMaxResult::NoElements => None,
        MinMaxResult::OneElement(v) => Some((v, v)),
        MinMaxResult::MinMax(lo, hi) => Some((lo, hi)),
    }
}

fn palette_chooser<C>(palette: &[C]) -> Result<Uniform<usize>, IfsError> {
    if palette.is_empty() {
        return Err(IfsError::InvalidArgument(
            "the palette must hold at least one color".to_string(),
        ));
    }
    Ok(Uniform::new(0, palette.len()))
}

/// Runs one chain of `n` steps.  The palette has already been checked.
/// Colors are drawn after the walk, one per point actually produced,
/// so which map was chosen never influences which color is.
fn run_chain<C, R, F>(
    table: &TransformTable,
    n: usize,
    palette: &[C],
    chooser: &Uniform<usize>,
    rng: &mut R,
    mut hook: F,
) -> Fern<C>
where
    C: Clone,
    R: Rng + ?Sized,
    F: FnMut(usize, &Point) -> Progress,
{
    let mut fern = Fern::with_capacity(n);
    let mut current = Point::ORIGIN;
    for i in 0..n {
        let index = select_transform(table, rng);
        current = table.map(index).apply(current);
        fern.points.push(current);
        if hook(i, &current) == Progress::Stop {
            debug!("stopped after {} of {} points", i + 1, n);
            break;
        }
    }
    fern.colors = (0..fern.points.len())
        .map(|_| palette[chooser.sample(rng)].clone())
        .collect();
    fern
}

/// Generate `n` points of the Barnsley fern, each with a color drawn
/// uniformly (with replacement) from `palette`.
///
/// The palette must not be empty; no default is substituted.  Seed
/// `rng` to get the same fern twice.
pub fn generate<C, R>(n: usize, palette: &[C], rng: &mut R) -> Result<Fern<C>, IfsError>
where
    C: Clone,
    R: Rng + ?Sized,
{
    generate_with(
        &TransformTable::barnsley_fern(),
        n,
        palette,
        rng,
        |_, _| Progress::Continue,
    )
}

/// Like `generate`, for any table, and calling `hook` with the index
/// and value of each point as it is produced.  Returning
/// `Progress::Stop` from the hook ends the run; the result is then
/// shorter than `n` but otherwise as valid as a full one.
pub fn generate_with<C, R, F>(
    table: &TransformTable,
    n: usize,
    palette: &[C],
    rng: &mut R,
    hook: F,
) -> Result<Fern<C>, IfsError>
where
    C: Clone,
    R: Rng + ?Sized,
    F: FnMut(usize, &Point) -> Progress,
{
    let chooser = palette_chooser(palette)?;
    debug!(
        "generating {} points from {} maps with {} colors",
        n,
        table.len(),
        palette.len()
    );
    let fern = run_chain(table, n, palette, &chooser, rng, hook);
    debug!("generated {} points", fern.len());
    Ok(fern)
}

/// Turn a signed point count, as a user might type it, into one the
/// generator accepts.  Negative counts are an invalid argument.
pub fn checked_count(n: i64) -> Result<usize, IfsError> {
    if n < 0 {
        return Err(IfsError::InvalidArgument(format!(
            "cannot generate {} points",
            n
        )));
    }
    Ok(n as usize)
}

/// How many points each of `threads` chains should produce so that
/// together they make `n`.
fn chain_lengths(n: usize, threads: usize) -> Vec<usize> {
    let (share, extra) = (n / threads, n % threads);
    (0..threads)
        .map(|i| if i < extra { share + 1 } else { share })
        .collect()
}

/// Split `n` points across `threads` independent chains and run them
/// in parallel.  Chain `i` starts at the origin with its own `StdRng`
/// seeded with `seed + i`; the chains are concatenated in order, so
/// the same `(n, threads, seed)` always gives the same fern.
///
/// Each chain discards only its own origin, so the result is `threads`
/// short trajectories rather than one long one.  For a fern of any
/// useful size that makes no visible difference.
pub fn generate_threaded<C>(
    table: &TransformTable,
    n: usize,
    palette: &[C],
    threads: usize,
    seed: u64,
) -> Result<Fern<C>, IfsError>
where
    C: Clone + Send + Sync,
{
    if threads == 0 {
        return Err(IfsError::InvalidArgument(
            "at least one thread is required".to_string(),
        ));
    }
    let chooser = palette_chooser(palette)?;
    let chooser = &chooser;
    debug!("generating {} points on {} threads", n, threads);

    let chains: Vec<Fern<C>> = crossbeam::scope(|spawner| {
        let handles: Vec<ScopedJoinHandle<Fern<C>>> = chain_lengths(n, threads)
            .into_iter()
            .enumerate()
            .map(|(i, len)| {
                spawner.spawn(move |_| {
                    let mut rng = StdRng::seed_from_u64(seed.wrapping_add(i as u64));
                    run_chain(table, len, palette, chooser, &mut rng, |_, _| {
                        Progress::Continue
                    })
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|handle| handle.join().map_err(|_| IfsError::WorkerPanicked))
            .collect::<Result<Vec<_>, _>>()
    })
    .map_err(|_| IfsError::WorkerPanicked)??;

    let mut fern = Fern::with_capacity(n);
    for chain in chains {
        fern.points.extend(chain.points);
        fern.colors.extend(chain.colors);
    }
    debug!("generated {} points", fern.len());
    Ok(fern)
}
