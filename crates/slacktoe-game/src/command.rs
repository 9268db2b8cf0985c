use slacktoe_types::api::ResponseType;

use crate::error::GameError;

/// Cell names accepted as moves, in board order, with their (row, col).
pub const MOVES: [(&str, (usize, usize)); 9] = [
    ("topleft", (0, 0)),
    ("top", (0, 1)),
    ("topright", (0, 2)),
    ("left", (1, 0)),
    ("center", (1, 1)),
    ("right", (1, 2)),
    ("bottomleft", (2, 0)),
    ("bottom", (2, 1)),
    ("bottomright", (2, 2)),
];

/// One parsed `/ttt` invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Challenge { opponent: String },
    Accept,
    Status,
    Help,
    Moves,
    Move { row: usize, col: usize },
}

impl Command {
    /// Parses the text after `/ttt`. Matching is literal and case-sensitive.
    pub fn parse(text: &str) -> Result<Self, GameError> {
        let text = text.trim();

        if let Some((verb, rest)) = text.split_once(' ') {
            if verb != "challenge" {
                return Err(GameError::InvalidCommand);
            }
            let opponent = rest.strip_prefix('@').unwrap_or(rest);
            if opponent.is_empty() {
                return Err(GameError::InvalidCommand);
            }
            return Ok(Command::Challenge {
                opponent: opponent.to_string(),
            });
        }

        match text {
            "accept" => Ok(Command::Accept),
            "status" => Ok(Command::Status),
            "help" => Ok(Command::Help),
            "moves" => Ok(Command::Moves),
            other => MOVES
                .iter()
                .find(|(name, _)| *name == other)
                .map(|&(_, (row, col))| Command::Move { row, col })
                .ok_or(GameError::InvalidCommand),
        }
    }

    /// Help texts stay private; everything else is posted to the channel.
    pub fn response_type(&self) -> ResponseType {
        match self {
            Command::Help | Command::Moves => ResponseType::Ephemeral,
            _ => ResponseType::InChannel,
        }
    }
}
