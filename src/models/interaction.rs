use std::fmt::Display;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ClientError;

/// Kind of catalog item an interaction refers to
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Movie,
    Book,
}

impl FromStr for ItemKind {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "movie" => Ok(ItemKind::Movie),
            "book" => Ok(ItemKind::Book),
            other => Err(ClientError::InvalidInput(format!(
                "unknown item type: {}",
                other
            ))),
        }
    }
}

impl Display for ItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ItemKind::Movie => write!(f, "movie"),
            ItemKind::Book => write!(f, "book"),
        }
    }
}

/// Kind of user behavior being recorded
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    View,
    Click,
    Search,
}

impl FromStr for EventKind {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "view" => Ok(EventKind::View),
            "click" => Ok(EventKind::Click),
            "search" => Ok(EventKind::Search),
            other => Err(ClientError::InvalidInput(format!(
                "unknown interaction type: {}",
                other
            ))),
        }
    }
}

impl Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventKind::View => write!(f, "view"),
            EventKind::Click => write!(f, "click"),
            EventKind::Search => write!(f, "search"),
        }
    }
}

/// One observed user action, validated at construction
///
/// Field names are the wire names of `POST /interactions`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InteractionEvent {
    pub item_id: Uuid,
    pub item_type: ItemKind,
    pub interaction_type: EventKind,
}

impl InteractionEvent {
    pub fn new(item_id: Uuid, item_type: ItemKind, interaction_type: EventKind) -> Self {
        Self {
            item_id,
            item_type,
            interaction_type,
        }
    }

    /// Builds an event from untrusted string fields.
    ///
    /// The item ID must be in canonical hyphenated UUID form (8-4-4-4-12,
    /// case-insensitive); the kind fields must be exact wire tokens.
    pub fn parse(item_id: &str, item_kind: &str, event_kind: &str) -> Result<Self, ClientError> {
        let item_id = parse_item_id(item_id)?;
        let item_type = item_kind.parse::<ItemKind>()?;
        let interaction_type = event_kind.parse::<EventKind>()?;

        Ok(Self {
            item_id,
            item_type,
            interaction_type,
        })
    }
}

/// Parses an item ID, accepting only the canonical hyphenated form.
///
/// `Uuid::try_parse` also accepts simple, braced and URN encodings; the
/// length check pins the input to the 36-character hyphenated layout.
pub fn parse_item_id(s: &str) -> Result<Uuid, ClientError> {
    if s.len() != 36 {
        return Err(ClientError::InvalidInput(format!(
            "malformed item id: {}",
            s
        )));
    }
    Uuid::try_parse(s).map_err(|_| ClientError::InvalidInput(format!("malformed item id: {}", s)))
}

/// Backend acknowledgement for a logged interaction
///
/// Every field is defaulted so that any response shape lacking a truthy
/// `success` deserializes as a logical failure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct InteractionAck {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// An event that failed to send while offline, held for replay
#[derive(Debug, Clone)]
pub struct QueuedEvent {
    pub event: InteractionEvent,
    pub queued_at: DateTime<Utc>,
}
