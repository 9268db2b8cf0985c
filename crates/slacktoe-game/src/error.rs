use thiserror::Error;

/// Everything a slash command can fail with.
///
/// All variants except [`GameError::Storage`] are ordinary game outcomes and
/// are shown to the user as text. `Storage` is a real fault.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("You are not authorized to use this application.")]
    Unauthorized,

    #[error(
        "Oh no! We can't recognize your command! Try typing `/ttt challenge [user]` to \
         challenge someone to a game. You can also type `/ttt help` for more help."
    )]
    InvalidCommand,

    #[error("Someone else is playing right now. Wait a bit and try again!")]
    CannotChallenge,

    #[error("No one challenged you. Don't be sad, challenge someone else!")]
    NoChallenge,

    #[error("No one is playing right now.")]
    NoActiveGame,

    #[error("You're not playing a game right now. Challenge someone to start a new game!")]
    NotInGame,

    #[error("Wait for your turn!")]
    WrongTurn,

    #[error("That square is already taken. Try an open one!")]
    SquareTaken,

    #[error("storage failure: {0}")]
    Storage(#[from] anyhow::Error),
}

impl GameError {
    /// True for the variants that are answered with their message text
    /// instead of a server error.
    pub fn is_user_facing(&self) -> bool {
        !matches!(self, GameError::Storage(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_is_the_only_fault() {
        assert!(GameError::SquareTaken.is_user_facing());
        assert!(GameError::Unauthorized.is_user_facing());
        assert!(!GameError::Storage(anyhow::anyhow!("disk gone")).is_user_facing());
    }

    #[test]
    fn invalid_command_text_is_one_line() {
        let text = GameError::InvalidCommand.to_string();
        assert!(text.starts_with("Oh no!"));
        assert!(text.contains("`/ttt challenge [user]` to challenge someone"));
        assert!(!text.contains('\n'));
    }
}
