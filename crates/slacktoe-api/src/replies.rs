use slacktoe_game::command::MOVES;
use slacktoe_game::{Accepted, Challenged, MoveOutcome, Status};

pub const HELP: &str = "Play tic-tac-toe in Slack! Here are some basic commands:\n\
    `/ttt challenge [someone]` to challenge them to a game\n\
    `/ttt accept` to accept a challenge\n\
    `/ttt status` to see the condition of the current game\n\
    `/ttt moves` to see a list of available moves";

pub fn challenged(c: &Challenged) -> String {
    format!(
        "{} has challenged {} to a game of tic-tac-toe!\nType `/ttt accept` to start the game.",
        c.challenger, c.opponent
    )
}

pub fn accepted(a: &Accepted) -> String {
    format!(
        "{board} {accepter} has accepted the challenge!\n\
         {challenger} has Xs and {accepter} has Os, {starter} has the first turn, good luck!\n\
         Hint: `/ttt moves` shows you the commands for all possible moves.",
        board = a.board,
        accepter = a.accepter,
        challenger = a.challenger,
        starter = a.starter,
    )
}

pub fn moved(outcome: &MoveOutcome) -> String {
    match outcome {
        MoveOutcome::Won { board, winner } => format!("{board} {winner} has won the game! :fire:"),
        MoveOutcome::Drawn { board } => format!("{board} The game ended in a draw!"),
        MoveOutcome::Continue { board, mover, next } => {
            format!("{board} {mover} has made a move, now it's {next}'s turn.")
        }
    }
}

pub fn status(s: &Status) -> String {
    format!("{} It's {}'s turn right now.", s.board, s.current_player)
}

/// One line per cell name, in board order.
pub fn moves() -> String {
    let lines: Vec<String> = MOVES
        .iter()
        .map(|(name, _)| format!("`/ttt {name}` to place a piece in the {} square", describe(name)))
        .collect();
    format!("Available moves:\n{}", lines.join("\n"))
}

/// "bottomleft" -> "bottom left"
fn describe(name: &str) -> String {
    for edge in ["top", "bottom"] {
        match name.strip_prefix(edge) {
            Some(side) if !side.is_empty() => return format!("{edge} {side}"),
            _ => {}
        }
    }
    name.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moves_lists_all_cells() {
        let text = moves();
        assert_eq!(text.lines().count(), 10);
        assert!(text.contains("`/ttt topleft` to place a piece in the top left square"));
        assert!(text.contains("`/ttt center` to place a piece in the center square"));
        assert!(text.ends_with("`/ttt bottomright` to place a piece in the bottom right square"));
    }

    #[test]
    fn help_keeps_line_breaks() {
        assert_eq!(HELP.lines().count(), 5);
        assert!(HELP.lines().all(|l| !l.starts_with(' ')));
    }

    #[test]
    fn move_texts() {
        let board = "```b```".to_string();
        assert_eq!(
            moved(&MoveOutcome::Won { board: board.clone(), winner: "michael".into() }),
            "```b``` michael has won the game! :fire:"
        );
        assert_eq!(
            moved(&MoveOutcome::Drawn { board: board.clone() }),
            "```b``` The game ended in a draw!"
        );
        assert_eq!(
            moved(&MoveOutcome::Continue {
                board,
                mover: "michael".into(),
                next: "victoria".into()
            }),
            "```b``` michael has made a move, now it's victoria's turn."
        );
    }

    #[test]
    fn accept_text_names_sides() {
        let text = accepted(&Accepted {
            board: "```b```".into(),
            challenger: "michael".into(),
            accepter: "victoria".into(),
            starter: "victoria".into(),
        });
        assert!(text.starts_with("```b``` victoria has accepted the challenge!\n"));
        assert!(text.contains("michael has Xs and victoria has Os, victoria has the first turn"));
    }
}
