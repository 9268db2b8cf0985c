use serde::{Deserialize, Serialize};

// -- Slash command --

/// Form body Slack posts for a slash command invocation.
///
/// Slack sends more fields than these (`command`, `response_url`,
/// `trigger_id`, ...); they are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct SlashCommandRequest {
    pub token: String,
    pub team_id: String,
    pub channel_id: String,
    pub user_id: String,
    pub user_name: String,
    #[serde(default)]
    pub text: String,
}

/// Who gets to see a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseType {
    /// Posted to the whole channel.
    InChannel,
    /// Only visible to the user who typed the command.
    Ephemeral,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlashResponse {
    pub response_type: ResponseType,
    pub text: String,
}

impl SlashResponse {
    pub fn new(response_type: ResponseType, text: impl Into<String>) -> Self {
        Self {
            response_type,
            text: text.into(),
        }
    }

    pub fn ephemeral(text: impl Into<String>) -> Self {
        Self {
            response_type: ResponseType::Ephemeral,
            text: text.into(),
        }
    }
}
