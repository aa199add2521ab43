use smallvec::SmallVec;

use crate::*;

/// Plays the board from `start` using only the two deduction rules and reports whether every safe cell got revealed.
///
/// The board must already hold mines and clues. Cell states are simulated in place and put back to hidden before
/// returning, so mines and clues are the only thing left.
pub fn is_logically_solvable(board: &mut Board, start: Coord2) -> bool {
    let solved = deduce(board, start);
    board.reset_states();
    solved
}

fn deduce(board: &mut Board, start: Coord2) -> bool {
    if board.flood_reveal(start).is_err() {
        return false;
    }

    let mut passes = 0u32;
    let mut progress = true;
    while progress {
        progress = false;
        passes += 1;

        for coords in board.coords() {
            match apply_rules(board, coords) {
                Ok(changed) => progress |= changed,
                Err(_) => return false,
            }
        }
    }

    log::trace!("Deduction settled after {} pass(es)", passes);
    board.all_safe_revealed()
}

/// Applies both rules around a hidden cell, using that cell's own clue.
fn apply_rules(board: &mut Board, coords: Coord2) -> Result<bool> {
    let cell = *board.at(coords)?;
    if cell.state != CellState::Hidden {
        return Ok(false);
    }

    let mut flagged = 0usize;
    let mut hidden: SmallVec<[Coord2; 8]> = SmallVec::new();
    for pos in board.neighbors(coords) {
        match board.at(pos)?.state {
            CellState::Flagged => flagged += 1,
            CellState::Hidden => hidden.push(pos),
            _ => {}
        }
    }

    let n_mines = usize::from(cell.n_mines);
    let mut changed = false;

    // every mine around is flagged, the rest is safe
    if flagged == n_mines {
        for &pos in &hidden {
            match board.flood_reveal(pos)? {
                Flood::Mine => changed = true,
                Flood::Opened(opened) => changed |= opened > 0,
            }
        }
    }

    // only just enough covered cells left, all of them are mines
    if flagged + hidden.len() == n_mines {
        for &pos in &hidden {
            let neighbor = board.at_mut(pos)?;
            if neighbor.state == CellState::Hidden {
                neighbor.state = CellState::Flagged;
                changed = true;
            }
        }
    }

    Ok(changed)
}
