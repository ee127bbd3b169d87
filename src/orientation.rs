use coord_2d::{Coord, Size};

/// One of the 8 elements of the dihedral group of the square, used to enumerate
/// symmetric variants of an extracted pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Orientation {
    /// ##.
    /// ...
    /// ...
    Original,
    /// ..#
    /// ..#
    /// ...
    Clockwise90,
    /// ...
    /// ...
    /// .##
    Clockwise180,
    /// ...
    /// #..
    /// #..
    Clockwise270,
    /// #..
    /// #..
    /// ...
    DiagonallyFlipped,
    /// .##
    /// ...
    /// ...
    DiagonallyFlippedClockwise90,
    /// ...
    /// ..#
    /// ..#
    DiagonallyFlippedClockwise180,
    /// ...
    /// ...
    /// ##.
    DiagonallyFlippedClockwise270,
}

pub const NUM_ORIENTATIONS: usize = 8;

use self::Orientation::*;

/// Ordered to match the sequence `B, reflect(B), rot(B), reflect(rot(B)), rot²(B),
/// reflect(rot²(B)), rot³(B), reflect(rot³(B))` required when extracting under `symmetry < 8`:
/// each prefix `ALL[..n]` must contain whole rotate/reflect pairs, not `n` pure rotations.
pub const ALL: [Orientation; NUM_ORIENTATIONS] = [
    Original,
    DiagonallyFlippedClockwise90,
    Clockwise270,
    DiagonallyFlippedClockwise270,
    Clockwise180,
    DiagonallyFlippedClockwise180,
    Clockwise90,
    DiagonallyFlipped,
];

impl Orientation {
    pub(crate) fn transform_coord(self, size: Size, coord: Coord) -> Coord {
        match self {
            Original => coord,
            Clockwise90 => Coord::new(coord.y, size.x() as i32 - 1 - coord.x),
            Clockwise180 => {
                Coord::new(size.x() as i32 - 1 - coord.x, size.y() as i32 - 1 - coord.y)
            }
            Clockwise270 => Coord::new(size.y() as i32 - 1 - coord.y, coord.x),
            DiagonallyFlipped => Coord::new(coord.y, coord.x),
            DiagonallyFlippedClockwise90 => Coord::new(size.x() as i32 - 1 - coord.x, coord.y),
            DiagonallyFlippedClockwise180 => {
                Coord::new(size.y() as i32 - 1 - coord.y, size.x() as i32 - 1 - coord.x)
            }
            DiagonallyFlippedClockwise270 => Coord::new(coord.x, size.y() as i32 - 1 - coord.y),
        }
    }
}
