use slacktoe_types::models::{Game, Piece};

/// Side length of every board. Other sizes are not supported.
pub const BOARD_SIZE: usize = 3;

/// The mark drawn for a piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    pub fn as_char(self) -> char {
        match self {
            Mark::X => 'X',
            Mark::O => 'O',
        }
    }
}

/// Returns true if the given cells fill a whole row, column or diagonal.
///
/// Pass one player's pieces only. Coordinates outside the board are ignored.
pub fn check_win(pieces: &[Piece]) -> bool {
    let mut grid = [[false; BOARD_SIZE]; BOARD_SIZE];
    for piece in pieces {
        if piece.row < BOARD_SIZE && piece.col < BOARD_SIZE {
            grid[piece.row][piece.col] = true;
        }
    }

    let mut diagonal = 0;
    let mut anti_diagonal = 0;
    for i in 0..BOARD_SIZE {
        let mut horizontal = 0;
        let mut vertical = 0;
        for j in 0..BOARD_SIZE {
            if grid[i][j] {
                horizontal += 1;
            }
            if grid[j][i] {
                vertical += 1;
            }
        }
        if horizontal == BOARD_SIZE || vertical == BOARD_SIZE {
            return true;
        }
        if grid[i][i] {
            diagonal += 1;
        }
        if grid[i][BOARD_SIZE - i - 1] {
            anti_diagonal += 1;
        }
    }

    diagonal == BOARD_SIZE || anti_diagonal == BOARD_SIZE
}

/// Whether every cell holds a piece.
pub fn is_full(pieces: &[Piece]) -> bool {
    pieces.len() >= BOARD_SIZE * BOARD_SIZE
}

/// Draws the board for a Slack message: `X` for player1, `O` for player2,
/// wrapped in a code block so the grid stays monospaced.
pub fn render_board(game: &Game, pieces: &[Piece]) -> String {
    let mut grid = [[' '; BOARD_SIZE]; BOARD_SIZE];
    for piece in pieces {
        if piece.row >= BOARD_SIZE || piece.col >= BOARD_SIZE {
            continue;
        }
        let mark = if piece.player_id == game.player1.id {
            Mark::X
        } else {
            Mark::O
        };
        grid[piece.row][piece.col] = mark.as_char();
    }

    let separator = vec!["---"; BOARD_SIZE].join("+");
    let rows: Vec<String> = grid
        .iter()
        .map(|row| {
            row.iter()
                .map(|cell| format!(" {cell} "))
                .collect::<Vec<_>>()
                .join("|")
        })
        .collect();

    format!("```{}```", rows.join(&format!("\n{separator}\n")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use slacktoe_types::models::Player;
    use uuid::Uuid;

    fn player(name: &str) -> Player {
        Player {
            id: Uuid::new_v4(),
            channel_id: Uuid::nil(),
            user_id: format!("U-{name}"),
            user_name: name.to_string(),
        }
    }

    fn game() -> Game {
        let player1 = player("michael");
        let player2 = player("victoria");
        Game {
            id: Uuid::new_v4(),
            channel_id: Uuid::nil(),
            board_size: BOARD_SIZE,
            current_player_name: player1.user_name.clone(),
            player1,
            player2,
            finished: false,
        }
    }

    fn piece(game: &Game, player_id: Uuid, row: usize, col: usize) -> Piece {
        Piece {
            id: Uuid::new_v4(),
            game_id: game.id,
            player_id,
            row,
            col,
        }
    }

    fn cells(game: &Game, coords: &[(usize, usize)]) -> Vec<Piece> {
        coords
            .iter()
            .map(|&(r, c)| piece(game, game.player1.id, r, c))
            .collect()
    }

    #[test]
    fn every_line_wins() {
        let g = game();
        let lines: [[(usize, usize); 3]; 8] = [
            [(0, 0), (0, 1), (0, 2)],
            [(1, 0), (1, 1), (1, 2)],
            [(2, 0), (2, 1), (2, 2)],
            [(0, 0), (1, 0), (2, 0)],
            [(0, 1), (1, 1), (2, 1)],
            [(0, 2), (1, 2), (2, 2)],
            [(0, 0), (1, 1), (2, 2)],
            [(0, 2), (1, 1), (2, 0)],
        ];
        for line in lines {
            assert!(check_win(&cells(&g, &line)), "line {line:?} should win");
        }
    }

    #[test]
    fn incomplete_lines_do_not_win() {
        let g = game();
        assert!(!check_win(&[]));
        assert!(!check_win(&cells(&g, &[(0, 0), (0, 1)])));
        assert!(!check_win(&cells(&g, &[(0, 0), (1, 1), (2, 1), (1, 2)])));
        // an L shape touches three rows and three columns without owning one
        assert!(!check_win(&cells(&g, &[(0, 0), (1, 0), (2, 1), (2, 2)])));
    }

    #[test]
    fn renders_empty_board() {
        let g = game();
        let expected = "```   |   |   \n---+---+---\n   |   |   \n---+---+---\n   |   |   ```";
        assert_eq!(render_board(&g, &[]), expected);
    }

    #[test]
    fn renders_x_for_player1_and_o_for_player2() {
        let g = game();
        let pieces = vec![
            piece(&g, g.player1.id, 0, 0),
            piece(&g, g.player2.id, 1, 1),
            piece(&g, g.player2.id, 1, 2),
            piece(&g, g.player1.id, 2, 0),
        ];
        let expected = concat!(
            "``` X |   |   \n",
            "---+---+---\n",
            "   | O | O \n",
            "---+---+---\n",
            " X |   |   ```"
        );
        assert_eq!(render_board(&g, &pieces), expected);
    }

    #[test]
    fn full_board_renders_fixed_width_rows() {
        let g = game();
        let mut pieces = Vec::new();
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                let owner = if (row + col) % 2 == 0 { g.player1.id } else { g.player2.id };
                pieces.push(piece(&g, owner, row, col));
            }
        }
        assert!(is_full(&pieces));

        let rendered = render_board(&g, &pieces);
        assert_eq!(rendered, render_board(&g, &pieces));

        let body = rendered.trim_start_matches("```").trim_end_matches("```");
        let lines: Vec<&str> = body.lines().collect();
        assert_eq!(lines.len(), 2 * BOARD_SIZE - 1);
        assert!(lines.iter().all(|l| l.chars().count() == 11));
        assert_eq!(lines[0], " X | O | X ");
    }
}
