use rand::Rng;
use rand::seq::SliceRandom;
use smallvec::SmallVec;

use crate::types::saturating_count;
use crate::*;

/// The start cell and its neighbors, at most 9 cells that never receive a mine.
pub fn forbidden_zone(board: &Board, start: Coord2) -> SmallVec<[Coord2; 9]> {
    let mut zone = SmallVec::new();
    if board.contains(start) {
        zone.push(start);
        zone.extend(board.neighbors(start));
    }
    zone
}

/// Clears the board and places `mines` mines uniformly among the cells outside `forbidden`, then recomputes clues.
///
/// The candidate cells are shuffled in full with `rng` and the first `mines` of them are mined, so repeated calls
/// with the same generator keep drawing fresh layouts.
pub fn place_mines<R: Rng + ?Sized>(
    board: &mut Board,
    forbidden: &[Coord2],
    mines: CellCount,
    rng: &mut R,
) -> Result<()> {
    board.clear();

    let mut allowed: Vec<Coord2> = board
        .coords()
        .filter(|coords| !forbidden.contains(coords))
        .collect();

    if allowed.len() < mines as usize {
        return Err(GameError::InsufficientSpace {
            mines,
            available: saturating_count(allowed.len()),
        });
    }

    allowed.shuffle(rng);

    for &coords in &allowed[..mines as usize] {
        board.at_mut(coords)?.is_mine = true;
    }

    board.recount();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn forbidden_zone_is_clipped_at_corner() {
        let board = Board::new((5, 5));

        assert_eq!(forbidden_zone(&board, (2, 2)).len(), 9);
        assert_eq!(
            forbidden_zone(&board, (0, 0)).as_slice(),
            &[(0, 0), (1, 0), (0, 1), (1, 1)]
        );
        assert!(forbidden_zone(&board, (5, 0)).is_empty());
    }

    #[test]
    fn placement_avoids_forbidden_cells() {
        let mut board = Board::new((6, 6));
        let zone = forbidden_zone(&board, (3, 3));
        let mut rng = SmallRng::seed_from_u64(11);

        for _ in 0..20 {
            place_mines(&mut board, &zone, 27, &mut rng).unwrap();

            assert_eq!(board.count_mines(), 27);
            assert!(zone.iter().all(|&pos| !board.at(pos).unwrap().is_mine));
        }
    }

    #[test]
    fn placement_overwrites_previous_layout() {
        let mut board = Board::from_mine_coords((4, 4), &[(0, 0), (1, 0), (2, 0)]).unwrap();
        board.at_mut((3, 3)).unwrap().state = CellState::Flagged;
        let mut rng = SmallRng::seed_from_u64(5);

        place_mines(&mut board, &[], 1, &mut rng).unwrap();

        assert_eq!(board.count_mines(), 1);
        assert_eq!(board.count_flagged(), 0);
    }

    #[test]
    fn not_enough_room_is_reported() {
        let mut board = Board::new((3, 3));
        let zone = forbidden_zone(&board, (1, 1));
        let mut rng = SmallRng::seed_from_u64(0);

        assert_eq!(
            place_mines(&mut board, &zone, 1, &mut rng),
            Err(GameError::InsufficientSpace {
                mines: 1,
                available: 0
            })
        );
    }

    #[test]
    fn same_seed_same_layout() {
        let mut first = Board::new((9, 9));
        let mut second = Board::new((9, 9));

        place_mines(&mut first, &[], 10, &mut SmallRng::seed_from_u64(99)).unwrap();
        place_mines(&mut second, &[], 10, &mut SmallRng::seed_from_u64(99)).unwrap();

        assert_eq!(first, second);
    }
}
