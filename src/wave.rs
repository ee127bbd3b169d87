//! Spec component D: the wave. One cell per output coordinate, each tracking which patterns
//! remain possible and the running entropy statistics needed to pick the next cell to collapse.

use crate::stats::{GlobalStats, PatternId, PatternTable, PatternWeight};
use coord_2d::{Coord, Size};
use direction::{CardinalDirection, CardinalDirectionTable};
use grid_2d::Grid;
use rand::Rng;
use std::cmp::Ordering;

/// Per-cell running sums used to compute entropy in O(1) after each pattern removal, rather than
/// summing over every remaining pattern on every query.
#[derive(Default, Debug, Clone)]
pub(crate) struct WaveCellStats {
    pub(crate) num_weighted_compatible_patterns: u32,
    sum_compatible_pattern_weight: u32,
    sum_compatible_pattern_weight_log_weight: f64,
}

impl WaveCellStats {
    fn remove_compatible_pattern(&mut self, pattern_weight: &PatternWeight) {
        assert!(self.num_weighted_compatible_patterns >= 1);
        assert!(self.sum_compatible_pattern_weight >= pattern_weight.weight());
        self.num_weighted_compatible_patterns -= 1;
        self.sum_compatible_pattern_weight -= pattern_weight.weight();
        self.sum_compatible_pattern_weight_log_weight -= pattern_weight.weight_log_weight();
    }

    /// `log2(sum_weight) - sum(weight * log2(weight)) / sum_weight`.
    fn entropy(&self) -> f64 {
        assert!(self.sum_compatible_pattern_weight > 0);
        let sum_weight = self.sum_compatible_pattern_weight as f64;
        sum_weight.log2() - (self.sum_compatible_pattern_weight_log_weight / sum_weight)
    }
}

struct DecrementedToZero;

/// For one cell and one pattern, the number of ways (per direction) a neighbour could still be
/// assigned something compatible with this cell being that pattern. Once any direction's count
/// hits zero, the pattern is no longer possible here at all, so every other direction is cleared
/// too — this is what makes removing a support cheap to detect.
#[derive(Default, Clone, Debug)]
pub(crate) struct NumWaysToBecomePattern {
    direction_table: CardinalDirectionTable<u32>,
}

impl NumWaysToBecomePattern {
    const ZERO: CardinalDirectionTable<u32> = CardinalDirectionTable::new_array([0, 0, 0, 0]);

    pub(crate) fn new(direction_table: CardinalDirectionTable<u32>) -> Self {
        if direction_table.iter().any(|&count| count == 0) {
            Self {
                direction_table: Self::ZERO,
            }
        } else {
            Self { direction_table }
        }
    }

    pub(crate) fn is_zero(&self) -> bool {
        *self.direction_table.get(CardinalDirection::North) == 0
    }

    pub(crate) fn clear_all_directions(&mut self) {
        self.direction_table = Self::ZERO;
    }

    fn try_decrement(&mut self, direction: CardinalDirection) -> Option<DecrementedToZero> {
        let count = self.direction_table.get_mut(direction);
        if *count == 0 {
            return None;
        }
        if *count != 1 {
            *count -= 1;
            return None;
        }
        self.clear_all_directions();
        Some(DecrementedToZero)
    }
}

/// Entropy plus a per-cell tie-breaking draw, used to order cells in the observer's priority
/// queue.
///
/// The noise is drawn once per cell, scaled by [`GlobalStats::min_abs_half_plogp`]: half the
/// smallest-magnitude `weight * log2(weight)` term any pattern in the dictionary contributes to
/// entropy, added directly to the entropy rather than compared as a separate field. That bound is
/// small enough that it can only break exact ties between cells with identical compatible-pattern
/// sets, never reorder two cells whose entropy genuinely differs.
#[derive(PartialEq, Debug, Clone, Copy)]
pub(crate) struct EntropyWithNoise {
    value: f64,
    pub(crate) num_weighted_compatible_patterns: u32,
}

impl Eq for EntropyWithNoise {}

impl PartialOrd for EntropyWithNoise {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.value.partial_cmp(&other.value)
    }
}

#[derive(Debug)]
pub enum ChosenPatternIdError {
    NoCompatiblePatterns,
    MultipleCompatiblePatterns,
}

pub(crate) enum DecrementNumWaysToBecomePattern {
    NoPatternRemoved,
    RemovedNonWeightedPattern,
    RemovedFinalCompatiblePattern,
    RemovedFinalWeightedCompatiblePattern,
    Finalized,
    RemovedWeightedPatternMultipleCandidatesRemain,
}

/// One cell of the wave: which patterns remain possible, and the bookkeeping needed to remove
/// one cheaply and to pick the next cell to collapse.
#[derive(Default, Debug, Clone)]
pub struct WaveCell {
    noise: f64,
    num_compatible_patterns: u32,
    pub(crate) stats: WaveCellStats,
    pub(crate) num_ways_to_become_each_pattern: PatternTable<NumWaysToBecomePattern>,
}

impl WaveCell {
    pub fn chosen_pattern_id(&self) -> Result<PatternId, ChosenPatternIdError> {
        if self.num_compatible_patterns == 1 {
            let pattern_id = self
                .num_ways_to_become_each_pattern
                .enumerate()
                .find(|(_, ways)| !ways.is_zero())
                .map(|(id, _)| id)
                .expect("num_compatible_patterns == 1 but no pattern is possible");
            Ok(pattern_id)
        } else if self.num_compatible_patterns == 0 {
            Err(ChosenPatternIdError::NoCompatiblePatterns)
        } else {
            Err(ChosenPatternIdError::MultipleCompatiblePatterns)
        }
    }

    fn weighted_compatible_stats_enumerate<'a>(
        &'a self,
        global_stats: &'a GlobalStats,
    ) -> impl Iterator<Item = (PatternId, &'a PatternWeight)> {
        self.num_ways_to_become_each_pattern
            .iter()
            .zip(global_stats.pattern_stats_option_iter())
            .enumerate()
            .filter_map(|(pattern_id, (ways, weight))| {
                if ways.is_zero() {
                    None
                } else {
                    weight.map(|weight| (pattern_id as PatternId, weight))
                }
            })
    }

    pub(crate) fn decrement_num_ways_to_become_pattern(
        &mut self,
        pattern_id: PatternId,
        direction: CardinalDirection,
        global_stats: &GlobalStats,
    ) -> DecrementNumWaysToBecomePattern {
        use DecrementNumWaysToBecomePattern as D;
        match self.num_ways_to_become_each_pattern[pattern_id].try_decrement(direction) {
            None => D::NoPatternRemoved,
            Some(DecrementedToZero) => {
                assert!(self.num_compatible_patterns >= 1);
                self.num_compatible_patterns -= 1;
                if let Some(pattern_weight) = global_stats.pattern_stats(pattern_id) {
                    self.stats.remove_compatible_pattern(pattern_weight);
                    match self.stats.num_weighted_compatible_patterns {
                        0 => {
                            if self.num_compatible_patterns == 0 {
                                D::RemovedFinalCompatiblePattern
                            } else {
                                D::RemovedFinalWeightedCompatiblePattern
                            }
                        }
                        _ => {
                            if self.num_compatible_patterns == 1 {
                                D::Finalized
                            } else {
                                D::RemovedWeightedPatternMultipleCandidatesRemain
                            }
                        }
                    }
                } else {
                    D::RemovedNonWeightedPattern
                }
            }
        }
    }

    pub(crate) fn remove_all_patterns_except(
        &mut self,
        pattern_id_to_keep: PatternId,
        global_stats: &GlobalStats,
    ) -> Vec<PatternId> {
        let mut removed = Vec::new();
        for (pattern_id, ways) in self.num_ways_to_become_each_pattern.enumerate_mut() {
            if pattern_id == pattern_id_to_keep || ways.is_zero() {
                continue;
            }
            ways.clear_all_directions();
            assert!(self.num_compatible_patterns >= 1);
            self.num_compatible_patterns -= 1;
            if let Some(pattern_weight) = global_stats.pattern_stats(pattern_id) {
                self.stats.remove_compatible_pattern(pattern_weight);
            }
            removed.push(pattern_id);
        }
        removed
    }

    pub(crate) fn forbid(
        &mut self,
        pattern_id: PatternId,
        global_stats: &GlobalStats,
    ) -> bool {
        if self.num_ways_to_become_each_pattern[pattern_id].is_zero() {
            return false;
        }
        self.num_ways_to_become_each_pattern[pattern_id].clear_all_directions();
        self.num_compatible_patterns -= 1;
        if let Some(pattern_weight) = global_stats.pattern_stats(pattern_id) {
            self.stats.remove_compatible_pattern(pattern_weight);
        }
        true
    }

    pub(crate) fn entropy_with_noise(&self) -> EntropyWithNoise {
        EntropyWithNoise {
            value: self.stats.entropy() + self.noise,
            num_weighted_compatible_patterns: self.stats.num_weighted_compatible_patterns,
        }
    }

    pub(crate) fn choose_pattern_id<R: Rng>(
        &self,
        global_stats: &GlobalStats,
        rng: &mut R,
    ) -> PatternId {
        assert!(self.stats.num_weighted_compatible_patterns >= 1);
        let mut remaining = rng.gen_range(0, self.stats.sum_compatible_pattern_weight);
        for (pattern_id, pattern_weight) in self.weighted_compatible_stats_enumerate(global_stats)
        {
            if remaining >= pattern_weight.weight() {
                remaining -= pattern_weight.weight();
            } else {
                return pattern_id;
            }
        }
        unreachable!("remaining weight is drawn from the cell's own positive sum")
    }

    pub(crate) fn num_compatible_patterns(&self) -> u32 {
        self.num_compatible_patterns
    }

    fn init<R: Rng>(&mut self, global_stats: &GlobalStats, rng: &mut R) {
        self.noise = rng.gen::<f64>() * global_stats.min_abs_half_plogp();
        self.num_compatible_patterns = global_stats.num_patterns() as u32;
        self.stats.num_weighted_compatible_patterns = global_stats.num_weighted_patterns();
        self.stats.sum_compatible_pattern_weight = global_stats.sum_pattern_weight();
        self.stats.sum_compatible_pattern_weight_log_weight =
            global_stats.sum_pattern_weight_log_weight();
        self.num_ways_to_become_each_pattern
            .resize(global_stats.num_patterns(), Default::default());
        self.num_ways_to_become_each_pattern
            .iter_mut()
            .zip(global_stats.num_ways_to_become_each_pattern_by_direction())
            .for_each(|(dst, src)| *dst = NumWaysToBecomePattern::new(src));
    }
}

/// The output grid of [`WaveCell`]s.
#[derive(Clone)]
pub struct Wave {
    grid: Grid<WaveCell>,
}

impl Wave {
    pub fn new(size: Size) -> Self {
        Self {
            grid: Grid::new_default(size),
        }
    }

    pub(crate) fn init<R: Rng>(&mut self, global_stats: &GlobalStats, rng: &mut R) {
        self.grid
            .iter_mut()
            .for_each(|cell| cell.init(global_stats, rng));
    }

    pub fn size(&self) -> Size {
        self.grid.size()
    }

    pub fn grid(&self) -> &Grid<WaveCell> {
        &self.grid
    }

    pub(crate) fn grid_mut(&mut self) -> &mut Grid<WaveCell> {
        &mut self.grid
    }

    pub fn get_checked(&self, coord: Coord) -> &WaveCell {
        self.grid.get_checked(coord)
    }
}
