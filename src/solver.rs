//! Spec component F: the solver driver. Ties pattern extraction, the wave, the propagator, and
//! the renderer together behind `new`/`set_pattern`/`run`.

use crate::config::WfcConfig;
use crate::context::{Context, Observe, PropagateError};
use crate::error::ConfigError;
use crate::orientation::{Orientation, ALL};
use crate::overlapping::OverlappingPatterns;
use crate::pattern::Pattern;
use crate::render::{self, RenderError};
use crate::rng::Lcg64;
use crate::stats::{GlobalStats, PatternId};
use crate::wave::Wave;
use crate::wrap::{Wrap, WrapNone, WrapXY};
use coord_2d::{Coord, Size};
use grid_2d::Grid;
use rand::SeedableRng;
use std::hash::Hash;

/// A Wave Function Collapse overlapping-model solver over element type `T`.
///
/// Built once from an input grid and a [`WfcConfig`]. The solver owns its wave and propagation
/// state: calls to [`set_pattern`](Solver::set_pattern) force cells ahead of the solve, and
/// [`run`](Solver::run) propagates those constraints and completes the solve in one call.
pub struct Solver<T> {
    config: WfcConfig,
    overlapping: OverlappingPatterns<T>,
    global_stats: GlobalStats,
    ground_pattern_id: Option<PatternId>,
    rng: Lcg64,
    wave: Wave,
    context: Context,
}

impl<T: Clone + Eq + Hash> Solver<T> {
    /// Extracts the pattern dictionary, compiles the compatibility table (spec §4.B, §4.C), and
    /// initializes a fresh wave ready to accept `set_pattern` calls before the first `run`.
    pub fn new(input: &Grid<T>, config: WfcConfig) -> Result<Self, ConfigError> {
        config.validate(input.size())?;
        let pattern_size = Size::new(config.pattern_size, config.pattern_size);
        let orientations = &ALL[..config.symmetry as usize];
        let overlapping =
            OverlappingPatterns::new(input, pattern_size, config.periodic_input, orientations);
        let global_stats = overlapping.global_stats();
        log::info!(
            "solver constructed: {} patterns, wave {:?}",
            overlapping.num_patterns(),
            config.wave_size(),
        );

        let ground_pattern_id = if config.ground {
            Some(ground_pattern_id(input, &overlapping, pattern_size))
        } else {
            None
        };

        let mut rng = Lcg64::from_u64_seed(config.seed);
        let mut wave = Wave::new(config.wave_size());
        wave.init(&global_stats, &mut rng);
        let mut context = Context::new();
        context.init(&wave, &global_stats);

        let mut solver = Self {
            config,
            overlapping,
            global_stats,
            ground_pattern_id,
            rng,
            wave,
            context,
        };
        solver.seed_ground();
        Ok(solver)
    }

    /// Forces the wave cell at `(i, j)` to the pattern matching `block`, if one exists in the
    /// dictionary and the coordinates are within the wave (spec §6, §7 error kind 2).
    ///
    /// Propagation of the consequences is deferred to the next [`run`](Solver::run) call.
    pub fn set_pattern(&mut self, block: &Pattern<T>, i: u32, j: u32) -> bool {
        let wave_size = self.config.wave_size();
        if i >= wave_size.y() || j >= wave_size.x() {
            return false;
        }
        let pattern_id = match self.overlapping.pattern_id_of(block) {
            Some(id) => id,
            None => return false,
        };
        let coord = Coord::new(j as i32, i as i32);
        self.context
            .force_pattern(&mut self.wave, coord, pattern_id, &self.global_stats);
        true
    }

    /// Ground seeding (spec §4.H): force the bottom row to the ground pattern, strip it from
    /// every other row. Runs once, right after construction, before any caller `set_pattern`.
    fn seed_ground(&mut self) {
        let ground_pattern_id = match self.ground_pattern_id {
            Some(id) => id,
            None => return,
        };
        let wave_size = self.wave.size();
        let bottom_row = wave_size.y() as i32 - 1;

        log::debug!("seeding ground pattern {} on bottom row", ground_pattern_id);
        for x in 0..wave_size.x() as i32 {
            let coord = Coord::new(x, bottom_row);
            self.context
                .force_pattern(&mut self.wave, coord, ground_pattern_id, &self.global_stats);
        }
        for y in 0..bottom_row {
            for x in 0..wave_size.x() as i32 {
                self.context.forbid_pattern(
                    &mut self.wave,
                    Coord::new(x, y),
                    ground_pattern_id,
                    &self.global_stats,
                );
            }
        }
    }

    fn run_to_completion(&mut self) -> Result<(), PropagateError> {
        if self.config.periodic_output {
            self.run_wrapped::<WrapXY>()
        } else {
            self.run_wrapped::<WrapNone>()
        }
    }

    fn run_wrapped<W: Wrap>(&mut self) -> Result<(), PropagateError> {
        self.context.propagate::<W>(&mut self.wave, &self.global_stats)?;
        loop {
            match self
                .context
                .observe(&mut self.wave, &self.global_stats, &mut self.rng)
            {
                Observe::Complete => {
                    log::info!("solve complete");
                    return Ok(());
                }
                Observe::Incomplete => {
                    self.context.propagate::<W>(&mut self.wave, &self.global_stats)?;
                }
            }
        }
    }

    /// Runs the solve to completion (spec §4.F), propagating any pending `set_pattern`/ground
    /// constraints first. Returns the rendered output grid, or `None` on contradiction (spec §7
    /// error kind 3) — the caller may retry with a new [`Solver`] built with a different seed.
    pub fn run(&mut self) -> Option<Grid<T>> {
        match self.run_to_completion() {
            Ok(()) => {}
            Err(PropagateError::Contradiction) => {
                log::warn!("run ended in contradiction");
                return None;
            }
        }
        match render::render(
            &self.wave,
            &self.overlapping,
            self.config.output_size,
            self.config.periodic_output,
        ) {
            Ok(grid) => Some(grid),
            Err(RenderError::Undecided { coord }) => {
                unreachable!("observe loop completed with undecided cell {:?}", coord)
            }
        }
    }
}

/// Identifies the ground pattern as the one extracted from the bottom-middle K×K window of the
/// input (spec §4.H; matches the original source's `get_ground_pattern_id` exactly, including
/// using the bottom-*middle* window rather than bottom-left).
fn ground_pattern_id<T>(
    input: &Grid<T>,
    overlapping: &OverlappingPatterns<T>,
    pattern_size: Size,
) -> PatternId
where
    T: Clone + Eq + Hash,
{
    let input_size = input.size();
    let offset = Coord::new(
        ((input_size.x() - pattern_size.x()) / 2) as i32,
        (input_size.y() - pattern_size.y()) as i32,
    );
    let ground_pattern = Pattern::extract(input, offset, pattern_size, Orientation::Original);
    // `offset.y` is `input_size.y() - pattern_size.y()`, the last row a non-periodic extraction
    // enumerates (see `extract_patterns`'s `max_i`), so this window is always in the dictionary.
    overlapping
        .pattern_id_of(&ground_pattern)
        .expect("the bottom-middle window is always one of the extracted patterns")
}
