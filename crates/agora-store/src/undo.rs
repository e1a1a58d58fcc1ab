use agora_types::api::UndoOutcome;
use agora_types::models::{UndoAction, UndoEntry};
use tracing::debug;

use crate::SocialStore;
use crate::error::{Result, StoreError};
use crate::{friends, messages, posts};

/// LIFO log of reversible actions, shared by every user.
#[derive(Default)]
pub(crate) struct UndoLog {
    entries: Vec<UndoEntry>,
}

impl UndoLog {
    pub fn push(&mut self, entry: UndoEntry) {
        self.entries.push(entry);
    }

    pub fn pop(&mut self) -> Option<UndoEntry> {
        self.entries.pop()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl SocialStore {
    /// Reverse the most recent logged action, whoever performed it.
    /// The entry is consumed even when its target has since disappeared.
    pub fn undo_last(&self) -> Result<UndoOutcome> {
        self.with_state_mut(|state| {
            let entry = state.undo.pop().ok_or(StoreError::NothingToUndo)?;
            debug!("Undoing {:?} by {}", entry.kind(), entry.sender_id);

            let outcome = match entry.action {
                UndoAction::Post { post_id } => posts::undo_post(state, &entry, post_id),
                UndoAction::FriendAccept => friends::undo_friend_accept(state, &entry),
                UndoAction::Message { entry_id } => {
                    messages::undo_message(state, &entry, entry_id)
                }
            };
            Ok(outcome)
        })
    }
}
