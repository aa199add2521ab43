use logisweep_core::*;

/// What the player sees, mines only show up once the game is over.
pub fn player_view(engine: &GameEngine) -> String {
    let show_mines = engine.is_finished();
    render(engine.board(), |cell| match cell.state {
        CellState::Revealed if cell.is_mine => '*',
        CellState::Revealed => clue_char(cell.n_mines),
        CellState::Flagged if show_mines && !cell.is_mine => 'x',
        CellState::Flagged => 'F',
        CellState::QuestionMarked => '?',
        CellState::Hidden if show_mines && cell.is_mine => '*',
        CellState::Hidden => '#',
    })
}

/// The full layout with every mine and clue, ignoring cell states.
pub fn layout_view(board: &Board) -> String {
    render(board, |cell| {
        if cell.is_mine {
            '*'
        } else {
            clue_char(cell.n_mines)
        }
    })
}

pub fn status_line(engine: &GameEngine) -> String {
    let mut line = format!(
        "{:?}, {} mine(s) left",
        engine.state(),
        engine.mines_left()
    );
    if engine.unsolvable() {
        line.push_str(", may need guessing");
    }
    line
}

fn clue_char(n_mines: u8) -> char {
    match n_mines {
        0 => '.',
        n => char::from(b'0' + n),
    }
}

fn render(board: &Board, glyph: impl Fn(&Cell) -> char) -> String {
    let (width, height) = board.size();
    let mut out = String::new();
    for y in 0..height {
        for x in 0..width {
            if let Ok(cell) = board.at((x, y)) {
                out.push(glyph(cell));
            }
        }
        out.push('\n');
    }
    out
}
