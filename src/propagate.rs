//! Spec component E: propagation. Pops removed (coord, pattern) supports off a worklist and
//! cascades each removal to neighbouring cells until the worklist is empty or a cell runs out of
//! possible patterns.

use crate::stats::{GlobalStats, PatternId};
use crate::wave::{DecrementNumWaysToBecomePattern as D, EntropyWithNoise, Wave};
use crate::wrap::Wrap;
use coord_2d::Coord;
use direction::CardinalDirections;
use hashbrown::HashMap;

#[derive(Debug, Clone)]
struct RemovedPattern {
    coord: Coord,
    pattern_id: PatternId,
}

/// Signals that propagation emptied a cell's possibility set entirely — the caller must abandon
/// this run (spec §4.H: no backtracking; the caller may retry with a new seed).
pub struct Contradiction;

#[derive(Default, Clone)]
pub(crate) struct Propagator {
    worklist: Vec<RemovedPattern>,
}

impl Propagator {
    pub(crate) fn clear(&mut self) {
        self.worklist.clear();
    }

    pub(crate) fn push(&mut self, coord: Coord, pattern_id: PatternId) {
        self.worklist.push(RemovedPattern { coord, pattern_id });
    }

    /// Drains the worklist, updating `entropy_changes_by_coord` with the lowest entropy observed
    /// for each touched cell and decrementing `num_undecided` as cells finalize.
    pub(crate) fn propagate<W: Wrap>(
        &mut self,
        wave: &mut Wave,
        global_stats: &GlobalStats,
        entropy_changes_by_coord: &mut HashMap<Coord, EntropyWithNoise>,
        num_undecided: &mut u32,
    ) -> Result<(), Contradiction> {
        let wave_size = wave.size();
        while let Some(removed) = self.worklist.pop() {
            for direction in CardinalDirections {
                let coord_to_update =
                    match W::normalize_coord(removed.coord + direction.coord(), wave_size) {
                        Some(coord) => coord,
                        None => continue,
                    };
                let cell = wave.grid_mut().get_checked_mut(coord_to_update);
                for &pattern_id in
                    global_stats.compatible_patterns_in_direction(removed.pattern_id, direction)
                {
                    match cell.decrement_num_ways_to_become_pattern(
                        pattern_id,
                        direction,
                        global_stats,
                    ) {
                        D::NoPatternRemoved => continue,
                        D::RemovedNonWeightedPattern => (),
                        D::RemovedWeightedPatternMultipleCandidatesRemain => {
                            let entropy = cell.entropy_with_noise();
                            entropy_changes_by_coord
                                .entry(coord_to_update)
                                .and_modify(|existing| {
                                    if entropy < *existing {
                                        *existing = entropy;
                                    }
                                })
                                .or_insert(entropy);
                        }
                        D::Finalized => {
                            *num_undecided -= 1;
                            entropy_changes_by_coord.remove(&coord_to_update);
                        }
                        D::RemovedFinalCompatiblePattern => return Err(Contradiction),
                        D::RemovedFinalWeightedCompatiblePattern => {
                            entropy_changes_by_coord.remove(&coord_to_update);
                        }
                    }
                    self.worklist.push(RemovedPattern {
                        coord: coord_to_update,
                        pattern_id,
                    });
                }
            }
        }
        Ok(())
    }
}
