//! Slacktoe game core
//!
//! Everything that decides what a slash command does lives here: the board
//! engine, the command grammar and the per-channel state machine. Storage is
//! reached only through the [`store::GameStore`] seam so the rules can be
//! exercised without a database.

pub mod board;
pub mod command;
pub mod error;
pub mod machine;
pub mod store;

pub use command::Command;
pub use error::GameError;
pub use machine::{Accepted, Challenged, ChannelContext, MoveOutcome, Status, TicTacToe};
pub use store::{GameStore, NewGame, Repository};
