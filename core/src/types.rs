/// Single coordinate axis used for board width, height, and positions.
///
/// Signed so that coordinates derived from screen positions left of or above the board stay representable and are
/// simply rejected as out of bounds.
pub type Coord = i32;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u32;

/// Two-dimensional coordinates `(x, y)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    /// Callers must have bounds-checked the coordinates first.
    fn to_nd_index(self) -> Self::Output {
        [self.0 as usize, self.1 as usize]
    }
}

/// Converts a cell tally, saturating at `CellCount::MAX` on boards too large to count exactly.
pub(crate) fn saturating_count(count: usize) -> CellCount {
    count.try_into().unwrap_or(CellCount::MAX)
}

/// Total cells of a `width * height` grid, computed wide enough to never overflow.
pub const fn area(width: Coord, height: Coord) -> i64 {
    width as i64 * height as i64
}

const DISPLACEMENTS: [(Coord, Coord); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Applies `delta` to `coords`, returning a value only when it remains in bounds.
fn apply_delta(coords: Coord2, delta: Coord2, bounds: Coord2) -> Option<Coord2> {
    let (x, y) = coords;
    let (dx, dy) = delta;
    let (max_x, max_y) = bounds;

    let next_x = x.checked_add(dx)?;
    if next_x < 0 || next_x >= max_x {
        return None;
    }

    let next_y = y.checked_add(dy)?;
    if next_y < 0 || next_y >= max_y {
        return None;
    }

    Some((next_x, next_y))
}

/// Iterator over the up-to-8 neighbors of a cell, clipped to the board edges.
///
/// Yields nothing when the center itself lies outside the board.
#[derive(Clone, Debug)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    index: u8,
}

impl NeighborIter {
    pub(crate) fn new(center: Coord2, bounds: Coord2) -> Self {
        let in_bounds = center.0 >= 0 && center.0 < bounds.0 && center.1 >= 0 && center.1 < bounds.1;
        Self {
            center,
            bounds,
            index: if in_bounds { 0 } else { DISPLACEMENTS.len() as u8 },
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if usize::from(self.index) >= DISPLACEMENTS.len() {
                return None;
            }

            let next_item =
                apply_delta(self.center, DISPLACEMENTS[self.index as usize], self.bounds);
            self.index += 1;

            if next_item.is_some() {
                return next_item;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oversized_counts_saturate() {
        assert_eq!(saturating_count(7), 7);
        assert_eq!(saturating_count(usize::MAX), CellCount::MAX);
    }

    #[test]
    fn interior_cell_has_eight_neighbors_in_fixed_order() {
        let neighbors: Vec<_> = NeighborIter::new((1, 1), (3, 3)).collect();

        assert_eq!(
            neighbors,
            vec![
                (0, 0),
                (1, 0),
                (2, 0),
                (0, 1),
                (2, 1),
                (0, 2),
                (1, 2),
                (2, 2)
            ]
        );
    }

    #[test]
    fn corner_cell_is_clipped() {
        let neighbors: Vec<_> = NeighborIter::new((0, 0), (3, 3)).collect();

        assert_eq!(neighbors, vec![(1, 0), (0, 1), (1, 1)]);
    }

    #[test]
    fn out_of_bounds_center_yields_nothing() {
        assert_eq!(NeighborIter::new((-1, 0), (3, 3)).count(), 0);
        assert_eq!(NeighborIter::new((3, 1), (3, 3)).count(), 0);
        assert_eq!(NeighborIter::new((0, 0), (0, 0)).count(), 0);
    }

    #[test]
    fn single_row_board() {
        let neighbors: Vec<_> = NeighborIter::new((2, 0), (4, 1)).collect();

        assert_eq!(neighbors, vec![(1, 0), (3, 0)]);
    }

    #[test]
    fn area_does_not_overflow() {
        assert_eq!(area(Coord::MAX, 2), Coord::MAX as i64 * 2);
        assert_eq!(area(-1, 4), -4);
    }
}
