//! Spec component G: render. Reads each wave cell's collapsed pattern id and writes the output
//! grid, including the periodic-vs-non-periodic edge fill for the `pattern_size - 1` cells a
//! bounded wave can't assign a pattern anchor to directly.

use crate::overlapping::OverlappingPatterns;
use crate::pattern::Pattern;
use crate::wave::{ChosenPatternIdError, Wave};
use coord_2d::{Coord, Size};
use grid_2d::Grid;
use std::hash::Hash;

/// A wave cell has no chosen pattern yet, or still has more than one possibility.
#[derive(Debug)]
pub enum RenderError {
    Undecided { coord: Coord },
}

/// Renders a fully-collapsed wave to an output grid of the given size.
///
/// `out_size` must equal the wave's size when `periodic_output` is set, or exceed it by
/// `pattern_size - 1` in both dimensions otherwise — [`crate::config`] enforces this at
/// construction time.
pub fn render<T>(
    wave: &Wave,
    overlapping: &OverlappingPatterns<T>,
    out_size: Size,
    periodic_output: bool,
) -> Result<Grid<T>, RenderError>
where
    T: Clone + Eq + Hash,
{
    let wave_size = wave.size();
    let chosen = |coord: Coord| -> Result<&Pattern<T>, RenderError> {
        let cell = wave.get_checked(coord);
        match cell.chosen_pattern_id() {
            Ok(pattern_id) => Ok(overlapping.pattern(pattern_id)),
            Err(ChosenPatternIdError::NoCompatiblePatterns)
            | Err(ChosenPatternIdError::MultipleCompatiblePatterns) => {
                Err(RenderError::Undecided { coord })
            }
        }
    };

    let mut buffer: Vec<Option<T>> = vec![None; (out_size.x() * out_size.y()) as usize];
    let index_of = |coord: Coord| (coord.y as u32 * out_size.x() + coord.x as u32) as usize;
    let mut write = |coord: Coord, value: T| {
        buffer[index_of(coord)] = Some(value);
    };

    for y in 0..wave_size.y() as i32 {
        for x in 0..wave_size.x() as i32 {
            let coord = Coord::new(x, y);
            let pattern = chosen(coord)?;
            write(coord, pattern.top_left().clone());
        }
    }

    if !periodic_output {
        let pattern_size = overlapping.pattern(0).size();
        let last_y = wave_size.y() as i32 - 1;
        let last_x = wave_size.x() as i32 - 1;

        for y in 0..wave_size.y() as i32 {
            let pattern = chosen(Coord::new(last_x, y))?;
            for dx in 1..pattern_size.x() as i32 {
                write(
                    Coord::new(last_x + dx, y),
                    pattern.get(Coord::new(dx, 0)).clone(),
                );
            }
        }
        for x in 0..wave_size.x() as i32 {
            let pattern = chosen(Coord::new(x, last_y))?;
            for dy in 1..pattern_size.y() as i32 {
                write(
                    Coord::new(x, last_y + dy),
                    pattern.get(Coord::new(0, dy)).clone(),
                );
            }
        }
        let corner = chosen(Coord::new(last_x, last_y))?;
        for dy in 1..pattern_size.y() as i32 {
            for dx in 1..pattern_size.x() as i32 {
                write(
                    Coord::new(last_x + dx, last_y + dy),
                    corner.get(Coord::new(dx, dy)).clone(),
                );
            }
        }
    }

    Ok(Grid::new_fn(out_size, |coord| {
        buffer[index_of(coord)]
            .take()
            .expect("every output cell is written by the wave or its edge fill")
    }))
}
