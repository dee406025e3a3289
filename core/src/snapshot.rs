use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::board::build_cells;
use crate::*;

/// Per-cell slice of a [`BoardSnapshot`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CellSnapshot {
    pub mine: bool,
    pub open: bool,
    pub marked: bool,
}

/// Whole-board state handed to the persistence collaborator: mine layout,
/// per-cell flags, elapsed time, and lifecycle state. The on-disk format is
/// the collaborator's business; this type only guarantees that a board can
/// be rebuilt from it without re-randomizing mine placement.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub height: Coord,
    pub width: Coord,
    pub p_mine: f64,
    pub seed: u64,
    pub state: GameState,
    pub initial_time: ClockTime,
    pub cells: Array2<CellSnapshot>,
}

impl BoardSnapshot {
    pub fn from_board(board: &Board) -> Self {
        let cells = Array2::from_shape_fn(board.config().size().to_nd_index(), |(x, y)| {
            let cell = board.cell((x as Coord, y as Coord));
            CellSnapshot {
                mine: cell.is_mine(),
                open: cell.is_open(),
                marked: cell.is_marked(),
            }
        });

        Self {
            height: board.height(),
            width: board.width(),
            p_mine: board.p_mine(),
            seed: board.seed(),
            state: board.state(),
            initial_time: board.initial_time(),
            cells,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.height == 0 || self.width == 0 {
            return Err(BoardError::InvalidBoardShape);
        }
        if self.cells.dim() != (self.height as usize, self.width as usize) {
            return Err(BoardError::InvalidBoardShape);
        }
        if !(0.0..=1.0).contains(&self.p_mine) {
            return Err(BoardError::InvalidProbability);
        }
        Ok(())
    }

    /// Rebuilds the board, adjacency included, from the captured flags.
    pub fn into_board(self) -> Result<Board> {
        self.validate()?;

        let config = BoardConfig::new_unchecked(self.height, self.width, self.p_mine);
        let mine_mask = self.cells.map(|cell| cell.mine);
        let mut cells = build_cells(config, mine_mask);

        for (index, snapshot) in self.cells.indexed_iter() {
            let cell = &mut cells[index];
            if snapshot.open {
                cell.force_open();
            }
            cell.set_marked(snapshot.marked);
        }

        Ok(Board::from_parts(
            config,
            cells,
            self.state,
            self.initial_time,
            self.seed,
        ))
    }
}

impl Board {
    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot::from_board(self)
    }

    pub fn from_snapshot(snapshot: BoardSnapshot) -> Result<Self> {
        snapshot.into_board()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mid_game_board() -> Board {
        let config = BoardConfig::new(3, 3, 0.25);
        let mines = FixedMines::from_coords((3, 3), &[(0, 0), (2, 2)]).unwrap();
        let mut board = Board::with_generator(config, 11, mines);
        board.open_field((1, 1));
        board.mark_field((0, 0));
        board.set_initial_time([0, 1, 30]);
        board
    }

    #[test]
    fn snapshot_round_trips_through_json() {
        let board = mid_game_board();
        let snapshot = board.snapshot();

        let json = serde_json::to_string(&snapshot).unwrap();
        let parsed: BoardSnapshot = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed, snapshot);
    }

    #[test]
    fn restore_preserves_layout_flags_and_clock() {
        let board = mid_game_board();
        let restored = Board::from_snapshot(board.snapshot()).unwrap();

        assert_eq!(restored.state(), GameState::InProgress);
        assert_eq!(restored.initial_time(), [0, 1, 30]);
        assert_eq!(restored.snapshot(), board.snapshot());
        assert!(restored.cell((0, 0)).is_mine());
        assert!(restored.cell((0, 0)).is_marked());
        assert!(restored.cell((1, 1)).is_open());
    }

    #[test]
    fn restored_board_does_not_rearm_the_first_move_guard() {
        let board = mid_game_board();
        let mut restored = Board::from_snapshot(board.snapshot()).unwrap();

        // The game is mid-flight, so opening a mine must lose, not defuse.
        assert_eq!(restored.open_field((2, 2)), OpenOutcome::Exploded);
        assert_eq!(restored.state(), GameState::Lost);
    }

    #[test]
    fn restored_adjacency_matches_the_original() {
        let board = mid_game_board();
        let restored = Board::from_snapshot(board.snapshot()).unwrap();

        for cell in board.iter_cells() {
            assert_eq!(
                restored.cell(cell.coords()).neighbors(),
                cell.neighbors()
            );
        }
        assert_eq!(restored.neighbor_mine_count((1, 1)), 2);
    }

    #[test]
    fn validate_rejects_shape_mismatch() {
        let mut snapshot = mid_game_board().snapshot();
        snapshot.width = 2;

        assert_eq!(snapshot.validate(), Err(BoardError::InvalidBoardShape));
        assert_eq!(
            snapshot.into_board().unwrap_err(),
            BoardError::InvalidBoardShape
        );
    }

    #[test]
    fn validate_rejects_bad_probability() {
        let mut snapshot = mid_game_board().snapshot();
        snapshot.p_mine = 1.5;

        assert_eq!(snapshot.validate(), Err(BoardError::InvalidProbability));
    }
}
