use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Account identifier. Drawn from a bounded numeric space at registration.
pub type UserId = u32;

/// Stable handle for a post, used to locate it again on undo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PostId(pub u64);

/// Stable handle for a queued request or message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntryId(pub u64);

/// Public view of an account. Credentials never leave the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub is_admin: bool,
}

/// A post is owned by its author's account. `author` is a copy of the
/// username at creation time, not a reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub author_id: UserId,
    pub author: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Display profile kept in the profile index, keyed by the account id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub user_id: UserId,
    pub username: String,
    pub bio: String,
}

/// One side of a friendship edge. Both endpoints hold a matching entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Friend {
    pub user_id: UserId,
    pub username: String,
}

/// Pending friend request or direct message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueEntry {
    pub id: EntryId,
    pub sender_id: UserId,
    pub receiver_id: UserId,
    pub content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionKind {
    #[serde(rename = "POST")]
    Post,
    #[serde(rename = "FRIEND")]
    FriendAccept,
    #[serde(rename = "MESSAGE")]
    Message,
}

/// What an undo entry points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum UndoAction {
    Post { post_id: PostId },
    FriendAccept,
    Message { entry_id: EntryId },
}

/// A reversible action record on the undo log.
///
/// `receiver_id` is `None` for single-party actions (posts). `content` holds
/// the post text, the requester's username, or the message text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UndoEntry {
    pub action: UndoAction,
    pub sender_id: UserId,
    pub receiver_id: Option<UserId>,
    pub content: String,
}

impl UndoEntry {
    pub fn kind(&self) -> ActionKind {
        match self.action {
            UndoAction::Post { .. } => ActionKind::Post,
            UndoAction::FriendAccept => ActionKind::FriendAccept,
            UndoAction::Message { .. } => ActionKind::Message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_kind_uses_log_tags() {
        assert_eq!(serde_json::to_string(&ActionKind::Post).unwrap(), "\"POST\"");
        assert_eq!(serde_json::to_string(&ActionKind::FriendAccept).unwrap(), "\"FRIEND\"");
        assert_eq!(serde_json::to_string(&ActionKind::Message).unwrap(), "\"MESSAGE\"");
    }

    #[test]
    fn undo_entry_kind_follows_action() {
        let entry = UndoEntry {
            action: UndoAction::Message { entry_id: EntryId(7) },
            sender_id: 1,
            receiver_id: Some(2),
            content: "hey".into(),
        };
        assert_eq!(entry.kind(), ActionKind::Message);

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["action"]["type"], "Message");
        assert_eq!(json["action"]["data"]["entry_id"], 7);
    }
}
