use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const POST_CALL_TRANSCRIPTION: &str = "post_call_transcription";

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct TranscriptTurn {
    pub role: String,
    pub message: String,
    #[serde(default)]
    pub time_in_call_secs: f64,
}

/// Call payload delivered by the transcription provider. `metadata` and
/// `analysis` are provider-owned and loosely shaped, so they are carried
/// as raw JSON.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct CallData {
    #[serde(default)]
    pub agent_id: String,
    #[serde(default)]
    pub conversation_id: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub transcript: Vec<TranscriptTurn>,
    #[serde(default)]
    pub metadata: Value,
    #[serde(default)]
    pub analysis: Value,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct WebhookEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    #[serde(default)]
    pub event_timestamp: i64,
    #[serde(default)]
    pub data: Option<CallData>,
}

/// Joins transcript turns into the linear form the analysis provider
/// expects, one speaker-tagged paragraph per turn.
pub fn format_transcript(turns: &[TranscriptTurn]) -> String {
    turns
        .iter()
        .map(|turn| {
            let speaker = if turn.role == "user" { "User" } else { "Agent" };
            format!("{}: {}", speaker, turn.message)
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}
