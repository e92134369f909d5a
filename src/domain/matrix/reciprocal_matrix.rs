//! Reciprocal pairwise comparison matrix of TFNs.

use serde::Serialize;

use super::IndexMapping;
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::fuzzy::Tfn;
use crate::domain::scale::LinguisticTermSet;

/// One pairwise judgment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PairwiseCell {
    /// Fuzzy value resolved from the term table at the time of entry.
    pub tri: Tfn,
    /// True when `tri` was obtained by inversion: either the entered
    /// intensity was below 1, or this cell is the mirrored half of a pair.
    pub is_inverse: bool,
    /// Signed intensity: `>= 1` for a direct judgment, `< 1` for its
    /// reciprocal.
    pub intensity: f64,
}

impl PairwiseCell {
    /// The neutral judgment `(1, 1, 1)` with intensity 1.
    pub const IDENTITY: Self = Self {
        tri: Tfn::ONE,
        is_inverse: false,
        intensity: 1.0,
    };
}

impl Default for PairwiseCell {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// An `n x n` reciprocal matrix.
///
/// # Invariants
///
/// Held after every mutation, not only when read:
/// - `cell[i][i] == (1, 1, 1)`
/// - `cell[j][i] == inverse(cell[i][j])` for `i != j`
///
/// Only [`set_pairwise`](Self::set_pairwise) writes cells, and it writes
/// both halves of a pair in one call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReciprocalMatrix {
    size: usize,
    /// Row-major, `size * size` cells.
    cells: Vec<PairwiseCell>,
}

impl ReciprocalMatrix {
    /// Creates an `n x n` matrix with every cell `(1, 1, 1)`.
    pub fn identity(size: usize) -> Self {
        Self {
            size,
            cells: vec![PairwiseCell::IDENTITY; size * size],
        }
    }

    /// Number of compared items.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns true for a `0 x 0` matrix.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the cell at row `i`, column `j`.
    pub fn cell(&self, i: usize, j: usize) -> Option<&PairwiseCell> {
        if i >= self.size || j >= self.size {
            return None;
        }
        self.cells.get(i * self.size + j)
    }

    /// Returns the TFN at row `i`, column `j`.
    pub fn tri(&self, i: usize, j: usize) -> Option<Tfn> {
        self.cell(i, j).map(|c| c.tri)
    }

    /// Returns row `i`.
    pub fn row(&self, i: usize) -> Option<&[PairwiseCell]> {
        if i >= self.size {
            return None;
        }
        let start = i * self.size;
        self.cells.get(start..start + self.size)
    }

    /// Iterates over rows in order.
    pub fn rows(&self) -> impl Iterator<Item = &[PairwiseCell]> {
        self.cells.chunks(self.size.max(1))
    }

    /// The TFNs of row `i`, in column order.
    pub fn row_tfns(&self, i: usize) -> Vec<Tfn> {
        self.row(i)
            .map(|row| row.iter().map(|c| c.tri).collect())
            .unwrap_or_default()
    }

    /// Records the judgment "item `i` compared to item `j` has `intensity`".
    ///
    /// Resolves the intensity through `terms`, writes `cell[i][j]` and its
    /// mirror `cell[j][i]` in the same call. Works the same in either
    /// triangle: the entered cell is always `cell[i][j]`.
    ///
    /// # Errors
    ///
    /// - `IndexOutOfRange` if `i` or `j` is not a row
    /// - `SelfComparison` if `i == j`
    /// - `InvalidIntensity` if `intensity` is not finite and positive
    pub fn set_pairwise(
        &mut self,
        i: usize,
        j: usize,
        intensity: f64,
        terms: &LinguisticTermSet,
    ) -> Result<(), DomainError> {
        self.check_pair(i, j)?;
        if !intensity.is_finite() || intensity <= 0.0 {
            return Err(DomainError::new(
                ErrorCode::InvalidIntensity,
                format!("intensity must be a positive number, got {}", intensity),
            )
            .with_detail("intensity", intensity.to_string()));
        }

        let tri = terms.to_tfn(intensity);
        self.write_pair(i, j, tri, intensity);
        Ok(())
    }

    /// Re-resolves every pair from the intensity of its entered cell against
    /// `terms`. Cells entered against an older table pick up the current
    /// definitions. Pairs never entered stay untouched.
    pub fn refreshed(&self, terms: &LinguisticTermSet) -> Self {
        let mut next = self.clone();
        for i in 0..self.size {
            for j in (i + 1)..self.size {
                let Some((row, col)) = self.entered_cell(i, j) else {
                    continue;
                };
                let intensity = self.cells[row * self.size + col].intensity;
                next.write_pair(row, col, terms.to_tfn(intensity), intensity);
            }
        }
        next
    }

    /// Builds a matrix of `mapping.new_size()` from this one.
    ///
    /// Every pair whose items both survive keeps its cell; any pair touching
    /// a fresh index starts at `(1, 1, 1)`.
    ///
    /// # Errors
    ///
    /// `StructuralInconsistency` if the mapping was built for a different
    /// size.
    pub fn resize(&self, mapping: &IndexMapping) -> Result<Self, DomainError> {
        if mapping.old_size() != self.size {
            return Err(DomainError::structural(format!(
                "mapping expects {} items but matrix has {}",
                mapping.old_size(),
                self.size
            )));
        }

        let mut next = Self::identity(mapping.new_size());
        for old_i in 0..self.size {
            let Some(new_i) = mapping.map(old_i) else {
                continue;
            };
            for old_j in 0..self.size {
                if let Some(new_j) = mapping.map(old_j) {
                    next.cells[new_i * next.size + new_j] = self.cells[old_i * self.size + old_j];
                }
            }
        }
        Ok(next)
    }

    /// Checks both invariants within `tolerance`.
    pub fn is_reciprocal(&self, tolerance: f64) -> bool {
        (0..self.size).all(|i| {
            let diagonal_ok = self.cells[i * self.size + i].tri == Tfn::ONE;
            diagonal_ok
                && ((i + 1)..self.size).all(|j| {
                    let upper = self.cells[i * self.size + j].tri;
                    let lower = self.cells[j * self.size + i].tri;
                    lower.approx_eq(&upper.inverse(), tolerance)
                })
        })
    }

    /// The most likely (`m`) value of every cell, row by row.
    pub fn modal_values(&self) -> Vec<Vec<f64>> {
        self.rows()
            .map(|row| row.iter().map(|c| c.tri.m()).collect())
            .collect()
    }

    fn check_pair(&self, i: usize, j: usize) -> Result<(), DomainError> {
        for index in [i, j] {
            if index >= self.size {
                return Err(DomainError::index_out_of_range("matrix row", index, self.size));
            }
        }
        if i == j {
            return Err(DomainError::new(
                ErrorCode::SelfComparison,
                format!("item {} cannot be compared with itself", i),
            ));
        }
        Ok(())
    }

    /// Which half of the pair `i < j` holds the entered judgment, or `None`
    /// if the pair was never entered.
    ///
    /// An entered cell has `is_inverse == (intensity < 1)`; a mirror is
    /// always flagged inverse.
    fn entered_cell(&self, i: usize, j: usize) -> Option<(usize, usize)> {
        let upper = self.cells[i * self.size + j];
        let lower = self.cells[j * self.size + i];
        if !upper.is_inverse && !lower.is_inverse {
            return None;
        }
        let upper_is_mirror = upper.is_inverse && upper.intensity >= 1.0;
        if !lower.is_inverse || upper_is_mirror {
            Some((j, i))
        } else {
            Some((i, j))
        }
    }

    fn write_pair(&mut self, i: usize, j: usize, tri: Tfn, intensity: f64) {
        let size = self.size;
        self.cells[i * size + j] = PairwiseCell {
            tri,
            is_inverse: intensity < 1.0,
            intensity,
        };
        self.cells[j * size + i] = PairwiseCell {
            tri: tri.inverse(),
            is_inverse: true,
            intensity: 1.0 / intensity,
        };
    }
}
