//! Spec component C: compatibility compiler. Builds the directional compatibility table `C`
//! from the extracted pattern dictionary.

use crate::orientation::{Orientation, ALL};
use crate::pattern::{extract_patterns, Pattern};
use crate::stats::{GlobalStats, PatternDescription, PatternId, PatternTable};
use coord_2d::{Coord, Size};
use direction::{CardinalDirection, CardinalDirectionTable, CardinalDirections};
use grid_2d::Grid;
use std::hash::Hash;
use std::num::NonZeroU32;

/// Do `a` (at the origin) and `b` (offset one cell away in `direction`) agree on their overlap?
///
/// The overlap's y-bound must be computed from each pattern's `height()` and its x-bound from
/// `width()`, independently — conflating the two (as the reference implementation's `agrees`
/// helper does for the y-bound) silently breaks on any non-square footprint.
fn agrees<T: PartialEq>(a: &Pattern<T>, b: &Pattern<T>, direction: CardinalDirection) -> bool {
    let size = a.size();
    debug_assert_eq!(size, b.size());
    let (width, height) = (size.x() as i32, size.y() as i32);

    // Range of `a`-local coordinates covered by the overlap, and the corresponding offset into
    // `b`'s local coordinates.
    let (x_range, y_range, b_dx, b_dy): (std::ops::Range<i32>, std::ops::Range<i32>, i32, i32) =
        match direction {
            CardinalDirection::West => (0..width - 1, 0..height, 1, 0),
            CardinalDirection::East => (1..width, 0..height, -1, 0),
            CardinalDirection::North => (0..width, 0..height - 1, 0, 1),
            CardinalDirection::South => (0..width, 1..height, 0, -1),
        };

    for y in y_range {
        for x in x_range.clone() {
            let a_value = a.get(Coord::new(x, y));
            let b_value = b.get(Coord::new(x + b_dx, y + b_dy));
            if a_value != b_value {
                return false;
            }
        }
    }
    true
}

/// The extracted pattern dictionary together with its compatibility table — spec components
/// B and C combined, as the teacher's `OverlappingPatterns` does.
pub struct OverlappingPatterns<T> {
    patterns: PatternTable<Pattern<T>>,
    weights: PatternTable<u32>,
}

impl<T: Clone + Eq + Hash> OverlappingPatterns<T> {
    pub fn new(
        grid: &Grid<T>,
        pattern_size: Size,
        periodic_input: bool,
        orientations: &[Orientation],
    ) -> Self {
        let (patterns, weights) =
            extract_patterns(grid, pattern_size, periodic_input, orientations);
        Self {
            patterns: PatternTable::from_vec(patterns),
            weights: PatternTable::from_vec(weights),
        }
    }

    pub fn pattern(&self, pattern_id: PatternId) -> &Pattern<T> {
        &self.patterns[pattern_id]
    }

    pub fn num_patterns(&self) -> usize {
        self.patterns.len()
    }

    pub fn weight(&self, pattern_id: PatternId) -> u32 {
        self.weights[pattern_id]
    }

    /// The pattern id matching this exact block, if it's in the dictionary. Used by `set_pattern`.
    pub fn pattern_id_of(&self, block: &Pattern<T>) -> Option<PatternId> {
        self.patterns
            .enumerate()
            .find(|(_, pattern)| *pattern == block)
            .map(|(id, _)| id)
    }

    fn compatible_patterns<'a>(
        &'a self,
        pattern: &'a Pattern<T>,
        direction: CardinalDirection,
    ) -> impl 'a + Iterator<Item = PatternId> {
        self.patterns
            .enumerate()
            .filter(move |(_id, other)| agrees(pattern, other, direction))
            .map(|(id, _other)| id)
    }

    pub fn pattern_descriptions(&self) -> PatternTable<PatternDescription> {
        self.patterns
            .iter()
            .zip(self.weights.iter())
            .map(|(pattern, &weight)| {
                let mut allowed_neighbours = CardinalDirectionTable::default();
                for direction in CardinalDirections {
                    allowed_neighbours[direction] = self
                        .compatible_patterns(pattern, direction)
                        .collect::<Vec<_>>();
                }
                PatternDescription::new(NonZeroU32::new(weight), allowed_neighbours)
            })
            .collect::<PatternTable<_>>()
    }

    pub fn global_stats(&self) -> GlobalStats {
        GlobalStats::new(self.pattern_descriptions())
    }
}
