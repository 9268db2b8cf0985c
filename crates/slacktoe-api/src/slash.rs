use axum::{Form, Json, extract::State, http::StatusCode};
use tracing::{debug, error, warn};

use slacktoe_game::{ChannelContext, Command, GameError};
use slacktoe_types::api::{SlashCommandRequest, SlashResponse};

use crate::replies;
use crate::state::{AppState, AppStateInner};

/// GET / — Slack's SSL certificate verification ping.
pub async fn verify() -> StatusCode {
    StatusCode::OK
}

/// POST / — one `/ttt ...` invocation.
///
/// Game-rule refusals are answered with their text, visible to the sender
/// only. Storage faults become a 500.
pub async fn handle_command(
    State(state): State<AppState>,
    Form(req): Form<SlashCommandRequest>,
) -> Result<Json<SlashResponse>, StatusCode> {
    if req.token != state.slack_token {
        warn!("Rejected command from team {} with a bad token", req.team_id);
        return Ok(Json(SlashResponse::ephemeral(GameError::Unauthorized.to_string())));
    }

    let command = match Command::parse(&req.text) {
        Ok(command) => command,
        Err(e) => {
            debug!("Unrecognized command {:?} from {}", req.text, req.user_name);
            return Ok(Json(SlashResponse::ephemeral(e.to_string())));
        }
    };
    let response_type = command.response_type();

    // Run blocking DB work off the async runtime
    let db = state.clone();
    let result = tokio::task::spawn_blocking(move || run(&db, &req, command))
        .await
        .map_err(|e| {
            error!("spawn_blocking join error: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    match result {
        Ok(text) => Ok(Json(SlashResponse::new(response_type, text))),
        Err(e) if e.is_user_facing() => Ok(Json(SlashResponse::ephemeral(e.to_string()))),
        Err(e) => {
            error!("Command failed: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

fn run(
    state: &AppStateInner,
    req: &SlashCommandRequest,
    command: Command,
) -> Result<String, GameError> {
    let ctx = ChannelContext::new(&req.team_id, &req.channel_id);
    let game = &state.game;

    let text = match command {
        Command::Challenge { opponent } => {
            replies::challenged(&game.challenge(&ctx, &req.user_id, &req.user_name, &opponent)?)
        }
        Command::Accept => replies::accepted(&game.accept(&ctx, &req.user_id, &req.user_name)?),
        Command::Status => replies::status(&game.status(&ctx)?),
        Command::Move { row, col } => {
            replies::moved(&game.play(&ctx, &req.user_id, &req.user_name, row, col)?)
        }
        Command::Help => replies::HELP.to_string(),
        Command::Moves => replies::moves(),
    };
    Ok(text)
}
