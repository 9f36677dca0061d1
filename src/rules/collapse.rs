//! Line collapse: slide, merge and compact one row or column.
//!
//! Every direction is the same operation viewed from a different edge. A
//! line is listed as four positions starting at the edge tiles collapse
//! towards; `line_positions` is the only place that knows about directions.

use smallvec::SmallVec;

use super::outcome::{MergeEvent, TileMotion};
use crate::core::{Direction, Tile};
use crate::grid::{Grid, Position, GRID_SIZE};

/// Positions of line `index`, ordered from the destination edge outwards.
///
/// For horizontal directions `index` is a row, otherwise a column.
#[must_use]
pub fn line_positions(direction: Direction, index: usize) -> [Position; GRID_SIZE] {
    let fixed = index as i32;
    let last = GRID_SIZE as i32 - 1;
    std::array::from_fn(|k| {
        let k = k as i32;
        match direction {
            Direction::Left => Position::new(k, fixed),
            Direction::Right => Position::new(last - k, fixed),
            Direction::Up => Position::new(fixed, k),
            Direction::Down => Position::new(fixed, last - k),
        }
    })
}

/// Everything a collapse did to the grid.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Collapse {
    pub motions: Vec<TileMotion>,
    pub merges: Vec<MergeEvent>,
    pub gained: u64,
}

impl Collapse {
    /// Did any tile move or merge?
    #[must_use]
    pub fn changed(&self) -> bool {
        !self.motions.is_empty() || !self.merges.is_empty()
    }
}

/// Collapse every line of `grid` towards `direction`.
pub fn collapse(grid: &mut Grid, direction: Direction) -> Collapse {
    let mut result = Collapse::default();
    for index in 0..GRID_SIZE {
        collapse_line(grid, &line_positions(direction, index), &mut result);
    }
    result
}

/// Value of `a` and `b` combined, if they can merge.
///
/// Equal values whose double would not fit in a `u32` stay apart.
fn merged_value(a: Tile, b: Tile) -> Option<u32> {
    if a.value == b.value {
        a.doubled().map(|tile| tile.value)
    } else {
        None
    }
}

/// Slide and merge a single line in place.
///
/// Tiles are taken in order from the destination edge. Two neighbours of
/// equal value combine into the next free slot; the trailing tile survives
/// with the doubled value, the leading one is absorbed. A merged tile is
/// never compared again, so each tile merges at most once per move.
pub fn collapse_line(grid: &mut Grid, line: &[Position; GRID_SIZE], out: &mut Collapse) {
    let occupied: SmallVec<[(Position, Tile); GRID_SIZE]> = line
        .iter()
        .filter_map(|&at| grid.get(at).map(|tile| (at, tile)))
        .collect();

    let mut slot = 0;
    let mut i = 0;
    while i < occupied.len() {
        let target = line[slot];
        let (from, tile) = occupied[i];

        let merge = occupied.get(i + 1).and_then(|&(partner_from, partner)| {
            merged_value(tile, partner).map(|value| (partner_from, partner, value))
        });

        match merge {
            Some((partner_from, partner, value)) => {
                // Target is either empty or `from` itself.
                grid.place(None, from);
                grid.move_with_new_value(partner_from, target, value);

                out.motions.push(TileMotion {
                    id: partner.id,
                    from: partner_from,
                    to: target,
                });
                out.merges.push(MergeEvent {
                    survivor: partner.id,
                    absorbed: tile.id,
                    absorbed_from: from,
                    position: target,
                    value,
                });
                out.gained += u64::from(value);
                i += 2;
            }
            None => {
                if from != target {
                    grid.move_tile(from, target);
                    out.motions.push(TileMotion {
                        id: tile.id,
                        from,
                        to: target,
                    });
                }
                i += 1;
            }
        }
        slot += 1;
    }
}
