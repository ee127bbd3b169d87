//! Spec component F: the observe/propagate driver loop. Tracks which cells are still undecided,
//! picks the lowest-entropy one each round, collapses it, and feeds the resulting removals back
//! into the propagator.

use crate::propagate::{Contradiction, Propagator};
use crate::stats::{GlobalStats, PatternId};
use crate::wave::{EntropyWithNoise, Wave, WaveCell};
use crate::wrap::Wrap;
use coord_2d::Coord;
use hashbrown::HashMap;
use rand::Rng;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

#[derive(PartialEq, Eq, Debug, Clone)]
struct CoordEntropy {
    coord: Coord,
    entropy_with_noise: EntropyWithNoise,
}

// Reversed so the heap is a min-heap on entropy.
impl PartialOrd for CoordEntropy {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        other.entropy_with_noise.partial_cmp(&self.entropy_with_noise)
    }
}

impl Ord for CoordEntropy {
    fn cmp(&self, other: &Self) -> Ordering {
        self.partial_cmp(other).unwrap_or(Ordering::Equal)
    }
}

#[derive(Default, Clone)]
struct Observer {
    entropy_priority_queue: BinaryHeap<CoordEntropy>,
}

enum ChooseNextCell<'a> {
    MinEntropyCell { coord: Coord, cell: &'a mut WaveCell },
    NoCellsWithMultipleWeightedPatterns,
}

impl Observer {
    fn clear(&mut self) {
        self.entropy_priority_queue.clear();
    }

    fn choose_next_cell<'a>(wave: &'a mut Wave, this: &mut Self) -> ChooseNextCell<'a> {
        while let Some(coord_entropy) = this.entropy_priority_queue.pop() {
            let cell = wave.grid_mut().get_checked(coord_entropy.coord);
            if cell.stats.num_weighted_compatible_patterns
                == coord_entropy.entropy_with_noise.num_weighted_compatible_patterns
                && cell.num_compatible_patterns() > 1
            {
                return ChooseNextCell::MinEntropyCell {
                    coord: coord_entropy.coord,
                    cell: wave.grid_mut().get_checked_mut(coord_entropy.coord),
                };
            }
        }
        ChooseNextCell::NoCellsWithMultipleWeightedPatterns
    }
}

/// Outcome of a single observe step.
#[derive(Debug, PartialEq, Eq)]
pub enum Observe {
    Incomplete,
    Complete,
}

#[derive(Debug)]
pub enum PropagateError {
    Contradiction,
}

/// Holds the propagator worklist, the entropy priority queue, and the undecided-cell count —
/// everything the observe/propagate loop needs besides the wave and the pattern stats
/// themselves. Kept separate from [`Wave`] so it can be cleared and reused across runs.
#[derive(Default, Clone)]
pub struct Context {
    propagator: Propagator,
    entropy_changes_by_coord: HashMap<Coord, EntropyWithNoise>,
    observer: Observer,
    num_undecided: u32,
}

impl Context {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn init(&mut self, wave: &Wave, global_stats: &GlobalStats) {
        self.propagator.clear();
        self.observer.clear();
        self.entropy_changes_by_coord.clear();
        if global_stats.num_weighted_patterns() > 1 {
            self.num_undecided = wave.size().count() as u32;
            wave.grid().enumerate().for_each(|(coord, cell)| {
                self.observer.entropy_priority_queue.push(CoordEntropy {
                    coord,
                    entropy_with_noise: cell.entropy_with_noise(),
                });
            });
        } else {
            self.num_undecided = 0;
        }
    }

    /// Forces `coord` to `pattern_id`, pushing every pattern removed elsewhere onto the
    /// propagator's worklist. Used for ground seeding (spec §4.H) and for [`set_pattern`].
    ///
    /// [`set_pattern`]: crate::solver::Solver::set_pattern
    pub fn force_pattern(&mut self, wave: &mut Wave, coord: Coord, pattern_id: PatternId, global_stats: &GlobalStats) {
        let cell = wave.grid_mut().get_checked_mut(coord);
        let removed = cell.remove_all_patterns_except(pattern_id, global_stats);
        for removed_pattern_id in removed {
            self.propagator.push(coord, removed_pattern_id);
        }
    }

    /// Forbids `pattern_id` at `coord` outright, without requiring a neighbour to trigger it.
    pub fn forbid_pattern(&mut self, wave: &mut Wave, coord: Coord, pattern_id: PatternId, global_stats: &GlobalStats) {
        let cell = wave.grid_mut().get_checked_mut(coord);
        if cell.forbid(pattern_id, global_stats) {
            self.propagator.push(coord, pattern_id);
        }
    }

    pub fn propagate<W: Wrap>(
        &mut self,
        wave: &mut Wave,
        global_stats: &GlobalStats,
    ) -> Result<(), PropagateError> {
        self.propagator
            .propagate::<W>(
                wave,
                global_stats,
                &mut self.entropy_changes_by_coord,
                &mut self.num_undecided,
            )
            .map_err(|Contradiction| PropagateError::Contradiction)?;
        for (coord, entropy_with_noise) in self.entropy_changes_by_coord.drain() {
            self.observer
                .entropy_priority_queue
                .push(CoordEntropy { coord, entropy_with_noise });
        }
        Ok(())
    }

    pub fn observe<R: Rng>(
        &mut self,
        wave: &mut Wave,
        global_stats: &GlobalStats,
        rng: &mut R,
    ) -> Observe {
        if self.num_undecided == 0 {
            return Observe::Complete;
        }
        let (coord, pattern_id) = match Observer::choose_next_cell(wave, &mut self.observer) {
            ChooseNextCell::NoCellsWithMultipleWeightedPatterns => return Observe::Complete,
            ChooseNextCell::MinEntropyCell { coord, cell } => {
                (coord, cell.choose_pattern_id(global_stats, rng))
            }
        };
        self.force_pattern(wave, coord, pattern_id, global_stats);
        self.num_undecided -= 1;
        Observe::Incomplete
    }
}
