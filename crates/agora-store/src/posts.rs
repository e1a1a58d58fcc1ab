use agora_types::api::{Session, UndoOutcome};
use agora_types::models::{Post, PostId, UndoAction, UndoEntry};
use tracing::debug;

use crate::error::{Result, StoreError};
use crate::{SocialStore, StoreState};

impl SocialStore {
    // -- Posts --

    /// Publish a post as the session's user. Newest posts come first in the
    /// author's ledger.
    pub fn create_post(&self, session: &Session, content: &str) -> Result<Post> {
        self.with_state_mut(|state| {
            let author_id = state.authenticate(session)?;
            let post_id = state.next_post_id();

            let account = state
                .registry
                .find_by_id_mut(author_id)
                .ok_or(StoreError::NotAuthenticated)?;

            let post = Post {
                id: post_id,
                author_id,
                author: account.username.clone(),
                content: content.to_string(),
                created_at: chrono::Utc::now(),
            };
            account.posts.push_front(post.clone());

            state.undo.push(UndoEntry {
                action: UndoAction::Post { post_id },
                sender_id: author_id,
                receiver_id: None,
                content: post.content.clone(),
            });

            debug!("{} ({}) posted {:?}", post.author, author_id, post_id);
            Ok(post)
        })
    }

    /// Every post, grouped by author in registry scan order, newest first
    /// within each author. There is no global timeline merge.
    pub fn list_all_posts(&self) -> Result<Vec<Post>> {
        self.with_state(|state| {
            Ok(state
                .registry
                .iter()
                .flat_map(|account| account.posts.iter().cloned())
                .collect())
        })
    }
}

/// Remove the post an undo entry refers to. Matching is by id, so posts with
/// identical text are never confused.
pub(crate) fn undo_post(state: &mut StoreState, entry: &UndoEntry, post_id: PostId) -> UndoOutcome {
    let removed = state
        .registry
        .find_by_id_mut(entry.sender_id)
        .and_then(|account| {
            let pos = account.posts.iter().position(|p| p.id == post_id)?;
            account.posts.remove(pos)
        });

    match removed {
        Some(post) => UndoOutcome::PostRemoved {
            author_id: post.author_id,
            content: post.content,
        },
        None => UndoOutcome::PostGone {
            content: entry.content.clone(),
        },
    }
}
