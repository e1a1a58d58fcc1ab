use agora_types::api::{Session, UndoOutcome};
use agora_types::models::{Friend, QueueEntry, UndoAction, UndoEntry};
use tracing::debug;

use crate::error::{Result, StoreError};
use crate::{SocialStore, StoreState};

const FRIEND_REQUEST: &str = "FRIEND_REQUEST";

impl SocialStore {
    // -- Friends --

    /// Queue a friend request from the session's user to `target`.
    pub fn send_friend_request(&self, session: &Session, target: &str) -> Result<()> {
        self.with_state_mut(|state| {
            let sender_id = state.authenticate(session)?;
            let receiver_id = state
                .registry
                .find_by_username(target)
                .ok_or_else(|| StoreError::UserNotFound {
                    username: target.to_string(),
                })?
                .id;

            let id = state.next_entry_id();
            state.requests.enqueue(QueueEntry {
                id,
                sender_id,
                receiver_id,
                content: FRIEND_REQUEST.to_string(),
            });

            debug!("Friend request {} -> {} queued", sender_id, receiver_id);
            Ok(())
        })
    }

    /// Accept the oldest request addressed to the session's user, wherever
    /// it sits in the queue. Requests for other users are left in place.
    /// Returns the requester's username.
    pub fn accept_friend_request(&self, session: &Session) -> Result<String> {
        self.with_state_mut(|state| {
            let me = state.authenticate(session)?;
            let request = state
                .requests
                .find_first(|e| e.receiver_id == me)
                .ok_or(StoreError::NoPendingRequest)?;
            let (request_id, sender_id) = (request.id, request.sender_id);

            let sender_name = state
                .registry
                .find_by_id(sender_id)
                .ok_or_else(|| StoreError::UserNotFound {
                    username: sender_id.to_string(),
                })?
                .username
                .clone();
            let my_name = state
                .registry
                .find_by_id(me)
                .ok_or(StoreError::NotAuthenticated)?
                .username
                .clone();

            // Everything is validated; mutate from here on
            state.requests.remove(request_id);
            if let Some(account) = state.registry.find_by_id_mut(me) {
                account.friends.push_front(Friend {
                    user_id: sender_id,
                    username: sender_name.clone(),
                });
            }
            if let Some(account) = state.registry.find_by_id_mut(sender_id) {
                account.friends.push_front(Friend {
                    user_id: me,
                    username: my_name,
                });
            }

            state.undo.push(UndoEntry {
                action: UndoAction::FriendAccept,
                sender_id,
                receiver_id: Some(me),
                content: sender_name.clone(),
            });

            debug!("{} and {} are now friends", sender_id, me);
            Ok(sender_name)
        })
    }

    /// The session user's friend names, most recent first.
    pub fn list_friends(&self, session: &Session) -> Result<Vec<String>> {
        self.with_state(|state| {
            let me = state.authenticate(session)?;
            let account = state
                .registry
                .find_by_id(me)
                .ok_or(StoreError::NotAuthenticated)?;
            Ok(account.friends.iter().map(|f| f.username.clone()).collect())
        })
    }
}

/// Drop the edge an accepted request created, on both sides.
pub(crate) fn undo_friend_accept(state: &mut StoreState, entry: &UndoEntry) -> UndoOutcome {
    let requester_id = entry.sender_id;
    let Some(accepter_id) = entry.receiver_id else {
        return UndoOutcome::FriendshipGone {
            requester: entry.content.clone(),
        };
    };

    let mut removed = false;
    if let Some(account) = state.registry.find_by_id_mut(accepter_id) {
        removed |= account.remove_friend(requester_id);
    }
    if let Some(account) = state.registry.find_by_id_mut(requester_id) {
        removed |= account.remove_friend(accepter_id);
    }

    if removed {
        UndoOutcome::FriendshipRemoved {
            requester_id,
            accepter_id,
            requester: entry.content.clone(),
        }
    } else {
        UndoOutcome::FriendshipGone {
            requester: entry.content.clone(),
        }
    }
}
