//! Spec component B: pattern extraction.

use crate::orientation::{Orientation, ALL};
use coord_2d::{Coord, Size};
use grid_2d::Grid;
use std::hash::Hash;

/// A `K x K` block of elements, extracted from the input under some orientation. Patterns own
/// their pixels outright rather than re-deriving them from the source grid on every comparison;
/// this keeps non-periodic extraction from ever wrapping around the input's edges by accident.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pattern<T> {
    size: Size,
    pixels: Vec<T>,
}

impl<T: Clone> Pattern<T> {
    /// Extracts the `size`-shaped block at `offset` under `orientation`, tiling across the
    /// grid's edges if `offset + size` runs past them. Used both by [`extract_patterns`] and by
    /// callers building a block to pass to [`Solver::set_pattern`](crate::solver::Solver::set_pattern).
    pub fn extract(grid: &Grid<T>, offset: Coord, size: Size, orientation: Orientation) -> Self {
        let mut pixels = Vec::with_capacity((size.x() * size.y()) as usize);
        for y in 0..size.y() as i32 {
            for x in 0..size.x() as i32 {
                let transformed = orientation.transform_coord(size, Coord::new(x, y));
                pixels.push(grid.get_tiled(offset + transformed).clone());
            }
        }
        Self { size, pixels }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// The element at `(x, y)` within the pattern.
    pub fn get(&self, coord: Coord) -> &T {
        debug_assert!(coord.is_valid(self.size));
        &self.pixels[(coord.y as u32 * self.size.x() + coord.x as u32) as usize]
    }

    /// The pattern's top-left element, used by the renderer.
    pub fn top_left(&self) -> &T {
        &self.pixels[0]
    }
}

/// Extract the pattern dictionary and occurrence weights from an input grid (spec §4.B).
///
/// `orientations` selects which of the 8 dihedral variants to realize per window; pass
/// `&ALL[..symmetry]` to implement the `symmetry` config option.
pub fn extract_patterns<T>(
    grid: &Grid<T>,
    pattern_size: Size,
    periodic_input: bool,
    orientations: &[Orientation],
) -> (Vec<Pattern<T>>, Vec<u32>)
where
    T: Clone + Eq + Hash,
{
    let input_size = grid.size();
    let max_i = if periodic_input {
        input_size.y()
    } else {
        input_size.y() - pattern_size.y() + 1
    };
    let max_j = if periodic_input {
        input_size.x()
    } else {
        input_size.x() - pattern_size.x() + 1
    };

    let mut index_by_pattern: hashbrown::HashMap<Pattern<T>, usize> = hashbrown::HashMap::new();
    let mut patterns = Vec::new();
    let mut weights = Vec::new();

    for i in 0..max_i {
        for j in 0..max_j {
            let offset = Coord::new(j as i32, i as i32);
            for &orientation in orientations {
                let pattern = Pattern::extract(grid, offset, pattern_size, orientation);
                match index_by_pattern.get(&pattern) {
                    Some(&index) => weights[index] += 1,
                    None => {
                        index_by_pattern.insert(pattern.clone(), patterns.len());
                        patterns.push(pattern);
                        weights.push(1);
                    }
                }
            }
        }
    }

    log::debug!(
        "extracted {} distinct patterns from {} windows ({} orientations each)",
        patterns.len(),
        max_i as usize * max_j as usize,
        orientations.len(),
    );

    (patterns, weights)
}

#[cfg(test)]
mod test {
    use super::*;
    use coord_2d::Size;
    use grid_2d::Grid;

    #[test]
    fn uniform_input_single_pattern() {
        let grid = Grid::new_fn(Size::new(4, 4), |_| 0u8);
        let (patterns, weights) = extract_patterns(&grid, Size::new(3, 3), true, &ALL[..1]);
        assert_eq!(patterns.len(), 1);
        assert_eq!(weights, vec![16]);
    }

    #[test]
    fn checkerboard_two_patterns_equal_weight() {
        let grid = Grid::new_fn(Size::new(2, 2), |coord| ((coord.x + coord.y) % 2) as u8);
        let (patterns, weights) = extract_patterns(&grid, Size::new(2, 2), true, &ALL[..1]);
        assert_eq!(patterns.len(), 2);
        assert_eq!(weights[0], weights[1]);
    }

    #[test]
    fn non_periodic_input_shrinks_window_count() {
        let grid = Grid::new_fn(Size::new(4, 1), |coord| (coord.x % 2) as u8);
        let (_, weights) = extract_patterns(&grid, Size::new(2, 1), false, &ALL[..1]);
        // 4 columns, pattern width 2, non-periodic => 3 windows total.
        assert_eq!(weights.iter().sum::<u32>(), 3);
    }

    // A single fully-asymmetric 2x2 window, so every one of the 8 orientations yields a
    // distinct pattern and `ALL[..n]`'s ordering is directly observable.
    fn asymmetric_grid() -> Grid<u8> {
        Grid::new_fn(Size::new(2, 2), |coord| (coord.y * 2 + coord.x) as u8)
    }

    #[test]
    fn symmetry_two_is_identity_and_reflection_not_two_rotations() {
        let grid = asymmetric_grid();
        let pattern_size = Size::new(2, 2);
        let (patterns, _) = extract_patterns(&grid, pattern_size, true, &ALL[..2]);
        let expected: Vec<_> = [Orientation::Original, Orientation::DiagonallyFlippedClockwise90]
            .iter()
            .map(|&o| Pattern::extract(&grid, Coord::new(0, 0), pattern_size, o))
            .collect();
        assert_eq!(patterns.len(), expected.len());
        for pattern in &expected {
            assert!(patterns.contains(pattern));
        }
        // The pure-rotation variant must NOT appear among the symmetry-2 patterns.
        let pure_rotation = Pattern::extract(&grid, Coord::new(0, 0), pattern_size, Orientation::Clockwise90);
        assert!(!patterns.contains(&pure_rotation));
    }

    #[test]
    fn symmetry_four_mixes_rotations_and_reflections() {
        let grid = asymmetric_grid();
        let pattern_size = Size::new(2, 2);
        let (patterns, _) = extract_patterns(&grid, pattern_size, true, &ALL[..4]);
        let expected: Vec<_> = [
            Orientation::Original,
            Orientation::DiagonallyFlippedClockwise90,
            Orientation::Clockwise270,
            Orientation::DiagonallyFlippedClockwise270,
        ]
        .iter()
        .map(|&o| Pattern::extract(&grid, Coord::new(0, 0), pattern_size, o))
        .collect();
        assert_eq!(patterns.len(), expected.len());
        for pattern in &expected {
            assert!(patterns.contains(pattern));
        }
    }
}
