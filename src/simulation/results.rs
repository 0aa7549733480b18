// src/simulation/results.rs
use crate::core::{Coord, GridError};
use std::collections::BTreeMap;
use std::fmt;

/// Outcome of a sampling run over a grid.
///
/// Each sample is one string of `rows * cols` `'0'`/`'1'` characters in
/// row-major cell order. Counts are kept alongside the ordered samples and
/// always sum to the number of shots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleSet {
    samples: Vec<String>,
    counts: BTreeMap<String, usize>,
    cols: usize,
}

impl SampleSet {
    /// Builds a sample set from ordered per-shot bitstrings.
    pub(crate) fn from_samples(samples: Vec<String>, cols: usize) -> Self {
        let mut counts = BTreeMap::new();
        for sample in &samples {
            *counts.entry(sample.clone()).or_insert(0) += 1;
        }
        Self { samples, counts, cols }
    }

    /// Per-shot bitstrings in execution order.
    pub fn samples(&self) -> &[String] {
        &self.samples
    }

    /// Occurrence count of every distinct bitstring.
    pub fn counts(&self) -> &BTreeMap<String, usize> {
        &self.counts
    }

    /// Number of shots sampled.
    pub fn shots(&self) -> usize {
        self.samples.len()
    }

    /// Splits into `(counts, samples)`.
    pub fn into_parts(self) -> (BTreeMap<String, usize>, Vec<String>) {
        (self.counts, self.samples)
    }

    /// Fraction of shots for each distinct bitstring.
    pub fn fractions(&self) -> BTreeMap<String, f64> {
        let shots = self.shots() as f64;
        self.counts.iter().map(|(s, c)| (s.clone(), *c as f64 / shots)).collect()
    }

    /// The most frequent bitstring and its count. Ties go to the
    /// lexicographically smallest string.
    pub fn most_frequent(&self) -> Option<(&str, usize)> {
        self.counts
            .iter()
            .fold(None, |best: Option<(&String, usize)>, (s, c)| match best {
                Some((_, best_count)) if best_count >= *c => best,
                _ => Some((s, *c)),
            })
            .map(|(s, c)| (s.as_str(), c))
    }

    /// Fraction of shots in which each cell read `1`, indexed row-major.
    pub fn cell_probabilities(&self) -> Vec<f64> {
        let width = self.samples.first().map_or(0, |s| s.len());
        let mut ones = vec![0usize; width];
        for (sample, count) in &self.counts {
            for (cell, bit) in sample.bytes().enumerate() {
                if bit == b'1' {
                    ones[cell] += count;
                }
            }
        }
        let shots = self.shots() as f64;
        ones.into_iter().map(|n| n as f64 / shots).collect()
    }

    /// Probability of `coord` reading `1`.
    pub fn cell_probability(&self, coord: Coord) -> Result<f64, GridError> {
        let probs = self.cell_probabilities();
        let rows = if self.cols == 0 { 0 } else { probs.len() / self.cols };
        if coord.x >= self.cols || coord.y >= rows {
            return Err(GridError::OutOfBounds { coord, rows, cols: self.cols });
        }
        Ok(probs[coord.y * self.cols + coord.x])
    }

    /// For each pair of cells, the fraction of shots in which they disagree.
    pub fn pair_disagreement(&self, pairs: &[(Coord, Coord)]) -> Result<Vec<f64>, GridError> {
        let width = self.samples.first().map_or(0, |s| s.len());
        let rows = if self.cols == 0 { 0 } else { width / self.cols };
        let position = |coord: Coord| {
            if coord.x < self.cols && coord.y < rows {
                Ok(coord.y * self.cols + coord.x)
            } else {
                Err(GridError::OutOfBounds { coord, rows, cols: self.cols })
            }
        };

        let shots = self.shots() as f64;
        pairs
            .iter()
            .map(|(a, b)| {
                let (i, j) = (position(*a)?, position(*b)?);
                let differ: usize = self
                    .counts
                    .iter()
                    .filter(|(s, _)| s.as_bytes()[i] != s.as_bytes()[j])
                    .map(|(_, c)| *c)
                    .sum();
                Ok(differ as f64 / shots)
            })
            .collect()
    }
}

impl fmt::Display for SampleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Sample Results ({} shots):", self.shots())?;
        if self.counts.is_empty() {
            writeln!(f, "  No samples were taken.")?;
        } else {
            // Most frequent first, then lexicographic
            let mut sorted: Vec<_> = self.counts.iter().collect();
            sorted.sort_by(|(sa, ca), (sb, cb)| cb.cmp(ca).then_with(|| sa.cmp(sb)));
            for (sample, count) in sorted {
                writeln!(f, "  {}: {}", sample, count)?;
            }
        }
        Ok(())
    }
}
