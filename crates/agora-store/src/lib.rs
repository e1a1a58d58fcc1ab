pub mod config;
pub mod error;

mod credentials;
mod friends;
mod ids;
mod messages;
mod posts;
mod profiles;
mod queue;
mod registry;
mod undo;

use std::collections::HashMap;
use std::sync::Mutex;

use agora_types::api::Session;
use agora_types::models::{EntryId, PostId, UserId};
use tracing::info;
use uuid::Uuid;

pub use crate::config::StoreConfig;
pub use crate::error::{Result, StoreError};

use crate::credentials::CredentialHasher;
use crate::ids::IdAllocator;
use crate::profiles::ProfileIndex;
use crate::queue::EntryQueue;
use crate::registry::Registry;
use crate::undo::UndoLog;

/// In-memory social graph: accounts, profiles, posts, friendships, pending
/// requests and messages, and a global undo log.
///
/// All state sits behind one lock, so each public operation either applies
/// completely or leaves everything untouched.
pub struct SocialStore {
    state: Mutex<StoreState>,
    hasher: CredentialHasher,
    default_bio: String,
}

pub(crate) struct StoreState {
    pub ids: IdAllocator,
    pub registry: Registry,
    pub profiles: ProfileIndex,
    pub requests: EntryQueue,
    pub messages: EntryQueue,
    pub undo: UndoLog,
    /// Issued session tokens: token -> account id
    pub sessions: HashMap<Uuid, UserId>,
    next_post_id: u64,
    next_entry_id: u64,
}

impl StoreState {
    /// Resolve a session to its account id. The token must still be issued
    /// and the account must still exist.
    pub fn authenticate(&self, session: &Session) -> Result<UserId> {
        match self.sessions.get(&session.token) {
            Some(&id) if id == session.user_id && self.registry.contains(id) => Ok(id),
            _ => Err(StoreError::NotAuthenticated),
        }
    }

    pub fn next_post_id(&mut self) -> PostId {
        self.next_post_id += 1;
        PostId(self.next_post_id)
    }

    pub fn next_entry_id(&mut self) -> EntryId {
        self.next_entry_id += 1;
        EntryId(self.next_entry_id)
    }
}

impl SocialStore {
    pub fn new(config: StoreConfig) -> Result<Self> {
        let hasher = CredentialHasher::new(config.hash_memory_kib, config.hash_iterations)?;
        let ids = IdAllocator::new(config.id_space, config.id_attempts, config.rng_seed);

        info!(
            "Social store created (id space 1..={}, {} attempts per id)",
            config.id_space, config.id_attempts
        );

        Ok(Self {
            state: Mutex::new(StoreState {
                ids,
                registry: Registry::default(),
                profiles: ProfileIndex::default(),
                requests: EntryQueue::default(),
                messages: EntryQueue::default(),
                undo: UndoLog::default(),
                sessions: HashMap::new(),
                next_post_id: 0,
                next_entry_id: 0,
            }),
            hasher,
            default_bio: config.default_bio,
        })
    }

    pub(crate) fn with_state<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&StoreState) -> Result<T>,
    {
        let state = self.state.lock().map_err(|_| StoreError::LockPoisoned)?;
        f(&state)
    }

    pub(crate) fn with_state_mut<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut StoreState) -> Result<T>,
    {
        let mut state = self.state.lock().map_err(|_| StoreError::LockPoisoned)?;
        f(&mut state)
    }

    // -- Introspection --

    pub fn user_count(&self) -> Result<usize> {
        self.with_state(|state| Ok(state.registry.len()))
    }

    pub fn pending_requests(&self) -> Result<usize> {
        self.with_state(|state| Ok(state.requests.len()))
    }

    pub fn pending_messages(&self) -> Result<usize> {
        self.with_state(|state| Ok(state.messages.len()))
    }

    pub fn undo_depth(&self) -> Result<usize> {
        self.with_state(|state| Ok(state.undo.len()))
    }
}
