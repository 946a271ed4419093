// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The transform table: which affine maps an IFS may apply, and how
//! likely each one is to be picked on any given step.

use rand::Rng;

use crate::affine::AffineMap;
use crate::errors::IfsError;

/// How far the probabilities of a table may sum from 1.0 before we
/// refuse it.  Tables are rejected, never rescaled.
pub const PROBABILITY_TOLERANCE: f64 = 1e-9;

/// The four maps of Barnsley's fern, with their probabilities, in
/// selection order: the main frond (each leaflet a smaller copy of
/// the whole), the left and right bottom leaflets, and the stem.
pub const BARNSLEY_FERN: [(AffineMap, f64); 4] = [
    (AffineMap::new(0.85, 0.04, -0.04, 0.85, 0.0, 1.6), 0.85),
    (AffineMap::new(0.20, -0.26, 0.23, 0.22, 0.0, 1.6), 0.07),
    (AffineMap::new(-0.15, 0.28, 0.26, 0.24, 0.0, 0.44), 0.07),
    (AffineMap::new(0.0, 0.0, 0.0, 0.16, 0.0, 0.0), 0.01),
];

/// An ordered list of affine maps and the probability of each.  The
/// cumulative probabilities are computed once, here, rather than on
/// every draw.  Once built, the table is immutable and can be shared
/// freely between threads.
#[derive(Clone, Debug, PartialEq)]
pub struct TransformTable {
    maps: Vec<AffineMap>,
    probabilities: Vec<f64>,
    cumulative: Vec<f64>,
}

impl TransformTable {
    /// Build a table.  Every probability must be finite and
    /// non-negative, and together they must sum to 1.0 within
    /// `PROBABILITY_TOLERANCE`.
    pub fn new(entries: Vec<(AffineMap, f64)>) -> Result<Self, IfsError> {
        if entries.is_empty() {
            return Err(IfsError::InvalidTable(
                "a transform table needs at least one map".to_string(),
            ));
        }

        if let Some((i, p)) = entries
            .iter()
            .map(|(_, p)| *p)
            .enumerate()
            .find(|(_, p)| !p.is_finite() || *p < 0.0)
        {
            return Err(IfsError::InvalidTable(format!(
                "probability {} of map {} is not a non-negative number",
                p, i
            )));
        }

        let total: f64 = entries.iter().map(|(_, p)| p).sum();
        if (total - 1.0).abs() > PROBABILITY_TOLERANCE {
            return Err(IfsError::InvalidTable(format!(
                "probabilities sum to {}, not 1",
                total
            )));
        }

        Ok(TransformTable::from_entries(&entries))
    }

    /// The table that draws the fern.
    pub fn barnsley_fern() -> Self {
        TransformTable::from_entries(&BARNSLEY_FERN)
    }

    fn from_entries(entries: &[(AffineMap, f64)]) -> Self {
        let maps = entries.iter().map(|(m, _)| *m).collect();
        let probabilities: Vec<f64> = entries.iter().map(|(_, p)| *p).collect();
        let cumulative = probabilities
            .iter()
            .scan(0.0_f64, |acc, p| {
                *acc += p;
                Some(*acc)
            })
            .collect();
        TransformTable {
            maps,
            probabilities,
            cumulative,
        }
    }

    /// The number of maps in the table.
    pub fn len(&self) -> usize {
        self.maps.len()
    }

    /// Always false for a table that made it through `new`.
    pub fn is_empty(&self) -> bool {
        self.maps.is_empty()
    }

    /// The map at `index`.  Panics if out of range, like slice indexing.
    pub fn map(&self, index: usize) -> &AffineMap {
        &self.maps[index]
    }

    /// The maps, in selection order.
    pub fn maps(&self) -> &[AffineMap] {
        &self.maps
    }

    /// The probabilities, in selection order.
    pub fn probabilities(&self) -> &[f64] {
        &self.probabilities
    }

    /// Given a value `r` in [0, 1), return the index of the first map
    /// whose cumulative probability is at least `r`.  If rounding left
    /// the final cumulative sum short of `r`, the last map wins.
    ///
    /// This is a linear scan.  Tables here have a handful of entries;
    /// for large ones a binary search over `cumulative` would be the
    /// thing to do.
    pub fn select_at(&self, r: f64) -> usize {
        self.cumulative
            .iter()
            .position(|&c| c >= r)
            .unwrap_or(self.cumulative.len() - 1)
    }
}

/// Draw one uniform value from `rng` and use it to pick a map.
pub fn select_transform<R: Rng + ?Sized>(table: &TransformTable, rng: &mut R) -> usize {
    let r: f64 = rng.gen();
    table.select_at(r)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FixedRng;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn fern_table_passes_validation() {
        let table = TransformTable::new(BARNSLEY_FERN.to_vec()).unwrap();
        assert_eq!(table, TransformTable::barnsley_fern());
        assert_eq!(table.len(), 4);
    }

    #[test]
    fn empty_table_is_rejected() {
        assert!(TransformTable::new(vec![]).is_err());
    }

    #[test]
    fn negative_probability_is_rejected() {
        let m = BARNSLEY_FERN[0].0;
        let t = TransformTable::new(vec![(m, 1.5), (m, -0.5)]);
        match t {
            Err(IfsError::InvalidTable(_)) => {}
            other => panic!("expected InvalidTable, got {:?}", other),
        }
    }

    #[test]
    fn nan_probability_is_rejected() {
        let m = BARNSLEY_FERN[0].0;
        assert!(TransformTable::new(vec![(m, std::f64::NAN)]).is_err());
    }

    #[test]
    fn short_sum_is_rejected_not_normalized() {
        let m = BARNSLEY_FERN[0].0;
        assert!(TransformTable::new(vec![(m, 0.5), (m, 0.4)]).is_err());
        assert!(TransformTable::new(vec![(m, 0.5), (m, 0.6)]).is_err());
    }

    #[test]
    fn select_at_walks_the_cumulative_sums() {
        let table = TransformTable::barnsley_fern();
        assert_eq!(table.select_at(0.0), 0);
        assert_eq!(table.select_at(0.5), 0);
        assert_eq!(table.select_at(0.85), 0);
        assert_eq!(table.select_at(0.86), 1);
        assert_eq!(table.select_at(0.93), 2);
        assert_eq!(table.select_at(0.995), 3);
    }

    #[test]
    fn select_at_falls_back_to_last_map() {
        let m = BARNSLEY_FERN[0].0;
        // Sums to a hair under one, inside the tolerance.
        let table = TransformTable::new(vec![(m, 0.5), (m, 0.5 - 1e-12)]).unwrap();
        assert_eq!(table.select_at(1.0 - 1e-13), 1);
        assert_eq!(table.select_at(2.0), 1);
    }

    #[test]
    fn zero_probability_maps_are_skipped() {
        let m = BARNSLEY_FERN[0].0;
        let table = TransformTable::new(vec![(m, 0.0), (m, 1.0)]).unwrap();
        assert_eq!(table.select_at(0.25), 1);
    }

    #[test]
    fn select_transform_uses_the_drawn_value() {
        let table = TransformTable::barnsley_fern();
        assert_eq!(select_transform(&table, &mut FixedRng::at(0.9)), 1);
        assert_eq!(select_transform(&table, &mut FixedRng::at(0.1)), 0);
    }

    #[test]
    fn seeded_selection_is_reproducible() {
        let table = TransformTable::barnsley_fern();
        let mut a = StdRng::seed_from_u64(17);
        let mut b = StdRng::seed_from_u64(17);
        let xs: Vec<usize> = (0..1000).map(|_| select_transform(&table, &mut a)).collect();
        let ys: Vec<usize> = (0..1000).map(|_| select_transform(&table, &mut b)).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn selection_frequencies_match_probabilities() {
        let table = TransformTable::barnsley_fern();
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let draws = 100_000;
        let mut counts = [0_usize; 4];
        for _ in 0..draws {
            counts[select_transform(&table, &mut rng)] += 1;
        }
        for (i, &p) in table.probabilities().iter().enumerate() {
            let seen = counts[i] as f64 / draws as f64;
            assert!(
                (seen - p).abs() < 0.01,
                "map {} picked {} of the time, expected {}",
                i,
                seen,
                p
            );
        }
    }
}
