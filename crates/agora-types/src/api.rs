use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::UserId;

// -- Sessions --

/// Handle returned by a successful login. Every session-bearing operation
/// takes one; the store checks the token against its table of issued
/// sessions, so a handle outlives neither logout nor account deletion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: Uuid,
    pub user_id: UserId,
    pub username: String,
}

// -- Messages --

/// A message handed to its receiver by `read_next_message`.
/// `sender_username` is `None` when the sender no longer exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveredMessage {
    pub sender_id: UserId,
    pub sender_username: Option<String>,
    pub content: String,
}

// -- Undo --

/// Result of reversing the most recent logged action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum UndoOutcome {
    /// The post was removed from its author's ledger
    PostRemoved { author_id: UserId, content: String },

    /// The author or the post no longer exists
    PostGone { content: String },

    /// The friendship edge was removed from both sides
    FriendshipRemoved {
        requester_id: UserId,
        accepter_id: UserId,
        requester: String,
    },

    /// Neither side still held the edge
    FriendshipGone { requester: String },

    /// The message was still queued and has been withdrawn
    MessageRetracted { content: String },

    /// The receiver already read the message
    MessageDelivered { content: String },

    /// The sender or receiver deleted their account, taking the message with it
    MessageGone { content: String },
}

impl fmt::Display for UndoOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PostRemoved { content, .. } => write!(f, "Undid last post: {}", content),
            Self::PostGone { content } => {
                write!(f, "Post '{}' no longer exists, nothing removed", content)
            }
            Self::FriendshipRemoved { requester, .. } => {
                write!(f, "Undid friendship with {}", requester)
            }
            Self::FriendshipGone { requester } => {
                write!(f, "Friendship with {} already gone", requester)
            }
            Self::MessageRetracted { content } => write!(f, "Undid message: {}", content),
            Self::MessageDelivered { content } => {
                write!(f, "Message already read, cannot unsend: {}", content)
            }
            Self::MessageGone { content } => {
                write!(f, "Message '{}' no longer exists, nothing removed", content)
            }
        }
    }
}
