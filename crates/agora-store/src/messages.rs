use agora_types::api::{DeliveredMessage, Session, UndoOutcome};
use agora_types::models::{EntryId, QueueEntry, UndoAction, UndoEntry};
use tracing::debug;

use crate::error::{Result, StoreError};
use crate::{SocialStore, StoreState};

impl SocialStore {
    // -- Messages --

    pub fn send_message(&self, session: &Session, target: &str, content: &str) -> Result<()> {
        self.with_state_mut(|state| {
            let sender_id = state.authenticate(session)?;
            let receiver_id = state
                .registry
                .find_by_username(target)
                .ok_or_else(|| StoreError::UserNotFound {
                    username: target.to_string(),
                })?
                .id;

            let entry_id = state.next_entry_id();
            state.messages.enqueue(QueueEntry {
                id: entry_id,
                sender_id,
                receiver_id,
                content: content.to_string(),
            });
            state.undo.push(UndoEntry {
                action: UndoAction::Message { entry_id },
                sender_id,
                receiver_id: Some(receiver_id),
                content: content.to_string(),
            });

            debug!("Message {} -> {} queued", sender_id, receiver_id);
            Ok(())
        })
    }

    /// Pull the oldest message addressed to the session's user out of the
    /// shared queue. Messages for others keep their positions.
    pub fn read_next_message(&self, session: &Session) -> Result<DeliveredMessage> {
        self.with_state_mut(|state| {
            let me = state.authenticate(session)?;
            let entry = state
                .messages
                .take_first(|e| e.receiver_id == me)
                .ok_or(StoreError::NoMessages)?;

            let sender_username = state
                .registry
                .find_by_id(entry.sender_id)
                .map(|a| a.username.clone());

            Ok(DeliveredMessage {
                sender_id: entry.sender_id,
                sender_username,
                content: entry.content,
            })
        })
    }
}

/// Withdraw a message that has not been read yet. A message missing from
/// the queue was either read, or dropped when one of its parties deleted
/// their account.
pub(crate) fn undo_message(
    state: &mut StoreState,
    entry: &UndoEntry,
    entry_id: EntryId,
) -> UndoOutcome {
    if let Some(message) = state.messages.remove(entry_id) {
        return UndoOutcome::MessageRetracted {
            content: message.content,
        };
    }

    let parties_alive = state.registry.contains(entry.sender_id)
        && entry
            .receiver_id
            .is_some_and(|id| state.registry.contains(id));

    if parties_alive {
        UndoOutcome::MessageDelivered {
            content: entry.content.clone(),
        }
    } else {
        UndoOutcome::MessageGone {
            content: entry.content.clone(),
        }
    }
}
