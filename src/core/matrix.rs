//! Dense row-major distance matrix shared by every kernel
//!
//! Cell `(i, j)` lives at `i * vertices + j`. Unreachable pairs hold
//! [`Distance::INFINITY`]; the only way to combine two distances is
//! [`Distance::through`], which refuses to add through an unreachable operand.

use std::fmt;

use crate::core::error::{ConfigError, Result};

/// Shortest-path length between two vertices
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Distance(u32);

impl Distance {
    /// No known path
    pub const INFINITY: Distance = Distance(u32::MAX);

    /// Distance from a vertex to itself
    pub const ZERO: Distance = Distance(0);

    /// Weight of every generated edge
    pub const UNIT: Distance = Distance(1);

    /// Finite distance. `u32::MAX` is reserved for the unreachable marker
    /// and maps to [`Distance::INFINITY`].
    pub const fn new(value: u32) -> Self {
        Distance(value)
    }

    pub fn is_finite(self) -> bool {
        self.0 != u32::MAX
    }

    /// Raw value, `None` when unreachable
    pub fn value(self) -> Option<u32> {
        self.is_finite().then_some(self.0)
    }

    /// Length of the path `self` followed by `other`.
    ///
    /// Returns `None` when either leg is unreachable or the sum does not fit
    /// below the unreachable marker.
    #[inline(always)]
    pub fn through(self, other: Distance) -> Option<Distance> {
        if !self.is_finite() || !other.is_finite() {
            return None;
        }
        self.0
            .checked_add(other.0)
            .filter(|&sum| sum != u32::MAX)
            .map(Distance)
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value() {
            Some(v) => write!(f, "{}", v),
            None => write!(f, "{}", UNREACHABLE_TOKEN),
        }
    }
}

/// Printable stand-in for unreachable cells
pub const UNREACHABLE_TOKEN: &str = "N";

/// Relax a single cell against one intermediate: `target = min(target, a + b)`.
#[inline(always)]
pub fn relax(target: &mut Distance, a: Distance, b: Distance) {
    if let Some(candidate) = a.through(b) {
        if candidate < *target {
            *target = candidate;
        }
    }
}

/// Square V x V distance matrix backed by one contiguous buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceMatrix {
    vertices: usize,
    cells: Vec<Distance>,
}

impl DistanceMatrix {
    /// Matrix with a zero diagonal and every other pair unreachable
    pub fn disconnected(vertices: usize) -> Result<Self> {
        if vertices == 0 {
            return Err(ConfigError::ZeroVertices.into());
        }
        let mut cells = vec![Distance::INFINITY; vertices * vertices];
        for i in 0..vertices {
            cells[i * vertices + i] = Distance::ZERO;
        }
        Ok(Self { vertices, cells })
    }

    /// Wrap an existing row-major buffer. The length must be a perfect square.
    pub fn from_cells(cells: Vec<Distance>) -> Result<Self> {
        let vertices = (cells.len() as f64).sqrt().round() as usize;
        if vertices == 0 {
            return Err(ConfigError::ZeroVertices.into());
        }
        if vertices * vertices != cells.len() {
            return Err(ConfigError::NotSquare {
                len: cells.len(),
                vertices,
            }
            .into());
        }
        Ok(Self { vertices, cells })
    }

    /// Build from rows of optional weights (`None` = no edge).
    ///
    /// A weight of `u32::MAX` would read back as unreachable and is rejected.
    pub fn from_rows(rows: &[Vec<Option<u32>>]) -> Result<Self> {
        let vertices = rows.len();
        let mut cells = Vec::with_capacity(vertices * vertices);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != vertices {
                return Err(ConfigError::NotSquare {
                    len: vertices * row.len(),
                    vertices,
                }
                .into());
            }
            if let Some(j) = row.iter().position(|&w| w == Some(u32::MAX)) {
                return Err(ConfigError::ReservedWeight {
                    row: i,
                    col: j,
                    weight: u32::MAX,
                }
                .into());
            }
            cells.extend(row.iter().map(|w| w.map_or(Distance::INFINITY, Distance::new)));
        }
        Self::from_cells(cells)
    }

    /// Number of vertices (matrix side)
    pub fn vertices(&self) -> usize {
        self.vertices
    }

    #[inline(always)]
    pub fn index(&self, i: usize, j: usize) -> usize {
        debug_assert!(i < self.vertices && j < self.vertices);
        i * self.vertices + j
    }

    pub fn get(&self, i: usize, j: usize) -> Distance {
        self.cells[self.index(i, j)]
    }

    pub fn set(&mut self, i: usize, j: usize, distance: Distance) {
        let idx = self.index(i, j);
        self.cells[idx] = distance;
    }

    pub fn row(&self, i: usize) -> &[Distance] {
        &self.cells[i * self.vertices..(i + 1) * self.vertices]
    }

    pub fn as_slice(&self) -> &[Distance] {
        &self.cells
    }

    pub fn as_mut_slice(&mut self) -> &mut [Distance] {
        &mut self.cells
    }

    /// Bytes held by the backing buffer
    pub fn memory_footprint(&self) -> usize {
        self.cells.capacity() * std::mem::size_of::<Distance>()
    }

    /// Number of off-diagonal cells with a finite distance
    pub fn reachable_pairs(&self) -> usize {
        (0..self.vertices)
            .map(|i| {
                self.row(i)
                    .iter()
                    .enumerate()
                    .filter(|&(j, d)| j != i && d.is_finite())
                    .count()
            })
            .sum()
    }
}

impl fmt::Display for DistanceMatrix {
    /// One row per line, cells separated by spaces, `N` for unreachable
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.vertices {
            for d in self.row(i) {
                write!(f, "{} ", d)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_through_guards_unreachable() {
        assert_eq!(Distance::new(2).through(Distance::new(3)), Some(Distance::new(5)));
        assert_eq!(Distance::INFINITY.through(Distance::ZERO), None);
        assert_eq!(Distance::ZERO.through(Distance::INFINITY), None);
        // Sums that would collide with the marker are not representable
        assert_eq!(Distance::new(u32::MAX - 1).through(Distance::UNIT), None);
        assert_eq!(Distance::new(u32::MAX - 1).through(Distance::new(7)), None);
    }

    #[test]
    fn test_relax_keeps_minimum() {
        let mut cell = Distance::new(10);
        relax(&mut cell, Distance::new(3), Distance::new(4));
        assert_eq!(cell, Distance::new(7));
        relax(&mut cell, Distance::new(5), Distance::new(5));
        assert_eq!(cell, Distance::new(7));
        relax(&mut cell, Distance::INFINITY, Distance::ZERO);
        assert_eq!(cell, Distance::new(7));

        let mut unreachable = Distance::INFINITY;
        relax(&mut unreachable, Distance::UNIT, Distance::UNIT);
        assert_eq!(unreachable, Distance::new(2));
    }

    #[test]
    fn test_disconnected_layout() {
        let m = DistanceMatrix::disconnected(3).unwrap();
        assert_eq!(m.vertices(), 3);
        assert_eq!(m.as_slice().len(), 9);
        for i in 0..3 {
            for j in 0..3 {
                let expected = if i == j { Distance::ZERO } else { Distance::INFINITY };
                assert_eq!(m.get(i, j), expected);
            }
        }
        assert_eq!(m.memory_footprint(), 9 * 4);
        assert_eq!(m.reachable_pairs(), 0);
    }

    #[test]
    fn test_zero_vertices_rejected() {
        assert!(DistanceMatrix::disconnected(0).is_err());
        assert!(DistanceMatrix::from_cells(Vec::new()).is_err());
    }

    #[test]
    fn test_from_cells_requires_square() {
        assert!(DistanceMatrix::from_cells(vec![Distance::ZERO; 4]).is_ok());
        assert!(DistanceMatrix::from_cells(vec![Distance::ZERO; 5]).is_err());
    }

    #[test]
    fn test_row_major_indexing() {
        let mut m = DistanceMatrix::disconnected(4).unwrap();
        m.set(1, 2, Distance::new(9));
        assert_eq!(m.as_slice()[1 * 4 + 2], Distance::new(9));
        assert_eq!(m.row(1)[2], Distance::new(9));
    }

    #[test]
    fn test_display_uses_unreachable_token() {
        let m = DistanceMatrix::from_rows(&[vec![Some(0), Some(1)], vec![None, Some(0)]]).unwrap();
        assert_eq!(m.to_string(), "0 1 \nN 0 \n");
    }

    #[test]
    fn test_from_rows_rejects_reserved_weight() {
        let err = DistanceMatrix::from_rows(&[vec![Some(0), Some(u32::MAX)], vec![None, Some(0)]]).unwrap_err();
        assert!(matches!(
            err,
            crate::Error::Config(ConfigError::ReservedWeight { row: 0, col: 1, .. })
        ));

        let largest = DistanceMatrix::from_rows(&[vec![Some(0), Some(u32::MAX - 1)], vec![None, Some(0)]]).unwrap();
        assert_eq!(largest.get(0, 1).value(), Some(u32::MAX - 1));
    }
}
