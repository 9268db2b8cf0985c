use std::sync::Arc;

use slacktoe_db::Database;
use slacktoe_game::TicTacToe;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub game: TicTacToe<Database>,
    /// Verification token from the Slack app settings.
    pub slack_token: String,
}

impl AppStateInner {
    pub fn new(game: TicTacToe<Database>, slack_token: impl Into<String>) -> AppState {
        Arc::new(Self {
            game,
            slack_token: slack_token.into(),
        })
    }
}
