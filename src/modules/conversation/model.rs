use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Conversation {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub user_id: String,
    pub transcript: String,
    pub ai_summary: Option<String>,
    pub created_at: bson::DateTime,
    pub updated_at: bson::DateTime,
}

impl Conversation {
    pub fn new(user_id: String, transcript: String) -> Self {
        let now = bson::DateTime::now();
        Self {
            id: None,
            user_id,
            transcript,
            ai_summary: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn created_at_rfc3339(&self) -> String {
        self.created_at.try_to_rfc3339_string().unwrap_or_default()
    }
}
