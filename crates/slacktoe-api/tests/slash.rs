use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use tower::ServiceExt;

use slacktoe_api::router;
use slacktoe_api::state::AppStateInner;
use slacktoe_db::Database;
use slacktoe_game::TicTacToe;
use slacktoe_types::api::{ResponseType, SlashResponse};

const TOKEN: &str = "test-verification-token";

/// Challenger always moves first.
fn app() -> Router {
    let db = Database::open_in_memory().unwrap();
    let game = TicTacToe::with_coin(db, || true);
    router(AppStateInner::new(game, TOKEN))
}

fn form(token: &str, user_id: &str, user_name: &str, text: &str) -> String {
    let encode = |s: &str| s.replace('%', "%25").replace(' ', "+").replace('@', "%40");
    format!(
        "token={}&team_id=T2W2QQW5A&channel_id=C2W35PTRV&user_id={}&user_name={}&command=%2Fttt&text={}",
        encode(token),
        encode(user_id),
        encode(user_name),
        encode(text)
    )
}

async fn post(app: &Router, body: String) -> (StatusCode, Option<SlashResponse>) {
    let req = Request::builder()
        .method("POST")
        .uri("/")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap();

    let res = app.clone().oneshot(req).await.unwrap();
    let status = res.status();
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).ok())
}

async fn say(app: &Router, user_id: &str, user_name: &str, text: &str) -> SlashResponse {
    let (status, body) = post(app, form(TOKEN, user_id, user_name, text)).await;
    assert_eq!(status, StatusCode::OK);
    body.expect("json reply")
}

#[tokio::test]
async fn certificate_check_is_ok() {
    let req = Request::builder().uri("/").body(Body::empty()).unwrap();
    let res = app().oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn wrong_token_is_rejected() {
    let app = app();
    let (status, body) = post(&app, form("nope", "U2W2V2KL6", "michael", "help")).await;
    assert_eq!(status, StatusCode::OK);
    let body = body.unwrap();
    assert_eq!(body.response_type, ResponseType::Ephemeral);
    assert_eq!(body.text, "You are not authorized to use this application.");
}

#[tokio::test]
async fn help_and_moves_are_private() {
    let app = app();
    let help = say(&app, "U2W2V2KL6", "michael", "help").await;
    assert_eq!(help.response_type, ResponseType::Ephemeral);
    assert!(help.text.starts_with("Play tic-tac-toe in Slack!"));

    let moves = say(&app, "U2W2V2KL6", "michael", "moves").await;
    assert_eq!(moves.response_type, ResponseType::Ephemeral);
    assert!(moves.text.starts_with("Available moves:"));
}

#[tokio::test]
async fn gibberish_is_an_invalid_command() {
    let app = app();
    let reply = say(&app, "U2W2V2KL6", "michael", "gibberish").await;
    assert_eq!(reply.response_type, ResponseType::Ephemeral);
    assert!(reply.text.starts_with("Oh no! We can't recognize your command!"));
}

#[tokio::test]
async fn a_whole_game_over_http() {
    let app = app();

    let challenge = say(&app, "U2W2V2KL6", "michael", "challenge @victoria").await;
    assert_eq!(challenge.response_type, ResponseType::InChannel);
    assert_eq!(
        challenge.text,
        "michael has challenged victoria to a game of tic-tac-toe!\nType `/ttt accept` to start the game."
    );

    let accept = say(&app, "U2W2USDLG", "victoria", "accept").await;
    assert_eq!(accept.response_type, ResponseType::InChannel);
    assert!(accept.text.contains("victoria has accepted the challenge!"));
    assert!(accept.text.contains("michael has the first turn"));

    let early = say(&app, "U2W2USDLG", "victoria", "center").await;
    assert_eq!(early.response_type, ResponseType::Ephemeral);
    assert_eq!(early.text, "Wait for your turn!");

    let first = say(&app, "U2W2V2KL6", "michael", "topleft").await;
    assert!(first.text.ends_with("michael has made a move, now it's victoria's turn."));

    let taken = say(&app, "U2W2USDLG", "victoria", "topleft").await;
    assert_eq!(taken.text, "That square is already taken. Try an open one!");

    say(&app, "U2W2USDLG", "victoria", "center").await;
    say(&app, "U2W2V2KL6", "michael", "bottomleft").await;
    say(&app, "U2W2USDLG", "victoria", "right").await;

    let status = say(&app, "U2W2USDLG", "victoria", "status").await;
    assert_eq!(status.response_type, ResponseType::InChannel);
    assert_eq!(
        status.text,
        "``` X |   |   \n---+---+---\n   | O | O \n---+---+---\n X |   |   ``` It's michael's turn right now."
    );

    let win = say(&app, "U2W2V2KL6", "michael", "left").await;
    assert_eq!(win.response_type, ResponseType::InChannel);
    assert!(win.text.ends_with("michael has won the game! :fire:"));

    let after = say(&app, "U2W2V2KL6", "michael", "status").await;
    assert_eq!(after.text, "No one is playing right now.");
}

#[tokio::test]
async fn accept_with_nobody_asking() {
    let app = app();
    let reply = say(&app, "U2W2USDLG", "victoria", "accept").await;
    assert_eq!(reply.response_type, ResponseType::Ephemeral);
    assert_eq!(reply.text, "No one challenged you. Don't be sad, challenge someone else!");
}
