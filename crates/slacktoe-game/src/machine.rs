use tracing::{debug, info};

use slacktoe_types::models::Piece;

use crate::board::{BOARD_SIZE, check_win, is_full, render_board};
use crate::error::GameError;
use crate::store::{GameStore, NewGame};

/// Where a command was typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelContext {
    pub team_id: String,
    pub channel_id: String,
}

impl ChannelContext {
    pub fn new(team_id: impl Into<String>, channel_id: impl Into<String>) -> Self {
        Self {
            team_id: team_id.into(),
            channel_id: channel_id.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Challenged {
    pub challenger: String,
    pub opponent: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Accepted {
    pub board: String,
    pub challenger: String,
    pub accepter: String,
    pub starter: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    Won { board: String, winner: String },
    Drawn { board: String },
    Continue { board: String, mover: String, next: String },
}

impl MoveOutcome {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, MoveOutcome::Continue { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub board: String,
    pub current_player: String,
}

type Coin = Box<dyn Fn() -> bool + Send + Sync>;

/// Per-channel tic-tac-toe rules on top of a [`GameStore`].
///
/// Each operation is one store transaction, so a refused command leaves
/// nothing behind and two commands for the same channel never interleave.
pub struct TicTacToe<S> {
    store: S,
    coin: Coin,
}

impl<S: GameStore> TicTacToe<S> {
    /// Uses a fair random coin to pick who moves first.
    pub fn new(store: S) -> Self {
        Self::with_coin(store, rand::random::<bool>)
    }

    /// `coin` returning true means the challenger moves first.
    pub fn with_coin(store: S, coin: impl Fn() -> bool + Send + Sync + 'static) -> Self {
        Self {
            store,
            coin: Box::new(coin),
        }
    }

    pub fn challenge(
        &self,
        ctx: &ChannelContext,
        user_id: &str,
        user_name: &str,
        opponent_name: &str,
    ) -> Result<Challenged, GameError> {
        self.store.transaction(|repo| {
            let channel = repo.upsert_channel(&ctx.team_id, &ctx.channel_id)?;

            if let Some(game) = repo.current_game(&channel)? {
                if !game.finished {
                    debug!("Challenge refused in {}: game {} running", ctx.channel_id, game.id);
                    return Err(GameError::CannotChallenge);
                }
            }

            let challenger = repo.upsert_player(channel.id, user_id, user_name)?;
            let challenge = repo.insert_challenge(channel.id, &challenger, opponent_name)?;

            info!(
                "Challenge {} in {}: {} vs {}",
                challenge.id, ctx.channel_id, challenger.user_name, opponent_name
            );
            Ok(Challenged {
                challenger: challenger.user_name,
                opponent: challenge.opponent_name,
            })
        })
    }

    pub fn accept(
        &self,
        ctx: &ChannelContext,
        user_id: &str,
        user_name: &str,
    ) -> Result<Accepted, GameError> {
        self.store.transaction(|repo| {
            let channel = repo
                .find_channel(&ctx.team_id, &ctx.channel_id)?
                .ok_or(GameError::NoChallenge)?;

            let challenge = repo
                .current_challenge(&channel)?
                .filter(|c| !c.expired && c.opponent_name == user_name)
                .ok_or(GameError::NoChallenge)?;

            repo.expire_challenge(challenge.id)?;
            let accepter = repo.upsert_player(channel.id, user_id, user_name)?;
            // a self-challenge must see the name the upsert just wrote
            let challenger = if challenge.challenger.id == accepter.id {
                accepter.clone()
            } else {
                challenge.challenger
            };

            let starter = if (self.coin)() {
                &challenger.user_name
            } else {
                &accepter.user_name
            };

            let game = repo.insert_game(NewGame {
                channel_id: channel.id,
                board_size: BOARD_SIZE,
                player1: &challenger,
                player2: &accepter,
                current_player_name: starter,
            })?;

            info!(
                "Game {} started in {}: X={} O={}, {} first",
                game.id, ctx.channel_id, challenger.user_name, accepter.user_name, starter
            );
            Ok(Accepted {
                board: render_board(&game, &[]),
                starter: starter.clone(),
                challenger: challenger.user_name.clone(),
                accepter: accepter.user_name.clone(),
            })
        })
    }

    /// Places the mover's piece at (`row`, `col`) and settles the game if
    /// that move wins or fills the board.
    pub fn play(
        &self,
        ctx: &ChannelContext,
        user_id: &str,
        user_name: &str,
        row: usize,
        col: usize,
    ) -> Result<MoveOutcome, GameError> {
        self.store.transaction(|repo| {
            let channel = repo
                .find_channel(&ctx.team_id, &ctx.channel_id)?
                .ok_or(GameError::NotInGame)?;
            let mover = repo
                .find_player(channel.id, user_id)?
                .ok_or(GameError::NotInGame)?;
            let mut game = repo
                .current_game(&channel)?
                .filter(|g| !g.finished && g.involves(mover.id))
                .ok_or(GameError::NotInGame)?;

            if game.current_player_name != user_name {
                return Err(GameError::WrongTurn);
            }
            if row >= game.board_size || col >= game.board_size {
                return Err(GameError::InvalidCommand);
            }

            let mut pieces = repo.pieces(game.id)?;
            if pieces.iter().any(|p| p.row == row && p.col == col) {
                return Err(GameError::SquareTaken);
            }
            pieces.push(repo.insert_piece(game.id, mover.id, row, col)?);

            let mine: Vec<Piece> = pieces
                .iter()
                .filter(|p| p.player_id == mover.id)
                .copied()
                .collect();
            let board = render_board(&game, &pieces);

            let outcome = if check_win(&mine) {
                info!("Game {} won by {}", game.id, user_name);
                MoveOutcome::Won {
                    board,
                    winner: user_name.to_string(),
                }
            } else if is_full(&pieces) {
                info!("Game {} ended in a draw", game.id);
                MoveOutcome::Drawn { board }
            } else {
                let next = game.opponent_of(mover.id).user_name.clone();
                game.current_player_name = next.clone();
                MoveOutcome::Continue {
                    board,
                    mover: user_name.to_string(),
                    next,
                }
            };

            game.finished = outcome.is_terminal();
            repo.update_game(&game)?;
            Ok(outcome)
        })
    }

    pub fn status(&self, ctx: &ChannelContext) -> Result<Status, GameError> {
        self.store.transaction(|repo| {
            let channel = repo
                .find_channel(&ctx.team_id, &ctx.channel_id)?
                .ok_or(GameError::NoActiveGame)?;
            let game = repo
                .current_game(&channel)?
                .filter(|g| !g.finished)
                .ok_or(GameError::NoActiveGame)?;
            let pieces = repo.pieces(game.id)?;

            Ok(Status {
                board: render_board(&game, &pieces),
                current_player: game.current_player_name,
            })
        })
    }
}
