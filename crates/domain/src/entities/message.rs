//! Message entity - one stored chat transcript row

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::ids::{MessageId, PetId};

/// Which side of the conversation authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageSender {
    User,
    Ghost,
}

impl MessageSender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Ghost => "ghost",
        }
    }
}

impl fmt::Display for MessageSender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MessageSender {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Self::User),
            "ghost" => Ok(Self::Ghost),
            _ => Err(DomainError::parse(format!("Unknown message sender: {}", s))),
        }
    }
}

/// One turn of a chat conversation, persisted fire-and-forget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: MessageId,
    pub pet_id: PetId,
    pub sender: MessageSender,
    pub body: String,
    pub sent_at: DateTime<Utc>,
}

impl Message {
    pub fn new(
        pet_id: PetId,
        sender: MessageSender,
        body: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: MessageId::new(),
            pet_id,
            sender,
            body: body.into(),
            sent_at: now,
        }
    }
}
