use std::collections::VecDeque;

use agora_types::api::Session;
use agora_types::models::{Friend, Post, Profile, User, UserId};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::SocialStore;
use crate::error::{Result, StoreError};

/// Account record. Owns its posts and its side of every friendship.
pub(crate) struct Account {
    pub id: UserId,
    pub username: String,
    pub password_hash: String,
    pub is_admin: bool,
    /// Most recent first
    pub posts: VecDeque<Post>,
    /// Most recent first
    pub friends: VecDeque<Friend>,
}

impl Account {
    fn new(id: UserId, username: &str, password_hash: String) -> Self {
        Self {
            id,
            username: username.to_string(),
            password_hash,
            is_admin: false,
            posts: VecDeque::new(),
            friends: VecDeque::new(),
        }
    }

    pub fn user(&self) -> User {
        User {
            id: self.id,
            username: self.username.clone(),
            is_admin: self.is_admin,
        }
    }

    /// Remove the most recent edge to `friend_id`. Returns true if one existed.
    pub fn remove_friend(&mut self, friend_id: UserId) -> bool {
        match self.friends.iter().position(|f| f.user_id == friend_id) {
            Some(pos) => self.friends.remove(pos).is_some(),
            None => false,
        }
    }
}

/// All accounts, kept in registration order. Scans run newest first, so a
/// later registration shadows an earlier one with the same username.
#[derive(Default)]
pub(crate) struct Registry {
    accounts: Vec<Account>,
}

impl Registry {
    pub fn insert(&mut self, account: Account) {
        self.accounts.push(account);
    }

    pub fn remove(&mut self, id: UserId) -> Option<Account> {
        let pos = self.accounts.iter().position(|a| a.id == id)?;
        Some(self.accounts.remove(pos))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Account> {
        self.accounts.iter().rev()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Account> {
        self.accounts.iter_mut().rev()
    }

    pub fn find_by_id(&self, id: UserId) -> Option<&Account> {
        self.iter().find(|a| a.id == id)
    }

    pub fn find_by_id_mut(&mut self, id: UserId) -> Option<&mut Account> {
        self.iter_mut().find(|a| a.id == id)
    }

    pub fn find_by_username(&self, username: &str) -> Option<&Account> {
        self.iter().find(|a| a.username == username)
    }

    pub fn contains(&self, id: UserId) -> bool {
        self.find_by_id(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }
}

impl SocialStore {
    // -- Accounts --

    /// Create an account and its profile. Usernames are not required to be
    /// unique.
    pub fn register(&self, username: &str, password: &str) -> Result<UserId> {
        // Hash outside the lock
        let password_hash = self.hasher.hash(password)?;

        self.with_state_mut(|state| {
            let registry = &state.registry;
            let id = state.ids.allocate(|id| registry.contains(id))?;

            state
                .registry
                .insert(Account::new(id, username, password_hash));
            state.profiles.insert(Profile {
                user_id: id,
                username: username.to_string(),
                bio: self.default_bio.clone(),
            });

            info!("User '{}' registered (id={})", username, id);
            Ok(id)
        })
    }

    /// Check credentials and issue a session. Every account carrying the
    /// username is a candidate; the newest match wins.
    pub fn login(&self, username: &str, password: &str) -> Result<Session> {
        let candidates: Vec<(UserId, String)> = self.with_state(|state| {
            Ok(state
                .registry
                .iter()
                .filter(|a| a.username == username)
                .map(|a| (a.id, a.password_hash.clone()))
                .collect())
        })?;

        let Some(user_id) = candidates
            .into_iter()
            .find(|(_, stored)| self.hasher.verify(password, stored))
            .map(|(id, _)| id)
        else {
            warn!("Failed login for '{}'", username);
            return Err(StoreError::AuthFailed);
        };

        self.with_state_mut(|state| {
            // The account may have been deleted while we were verifying
            let account = state
                .registry
                .find_by_id(user_id)
                .ok_or(StoreError::AuthFailed)?;

            let session = Session {
                token: Uuid::new_v4(),
                user_id,
                username: account.username.clone(),
            };
            state.sessions.insert(session.token, user_id);

            info!("{} ({}) logged in", session.username, user_id);
            Ok(session)
        })
    }

    pub fn logout(&self, session: &Session) -> Result<()> {
        self.with_state_mut(|state| {
            state.authenticate(session)?;
            state.sessions.remove(&session.token);
            debug!("{} ({}) logged out", session.username, session.user_id);
            Ok(())
        })
    }

    /// Delete the session's account along with its profile, every friend
    /// edge pointing at it, its queued requests and messages (both
    /// directions), and all of its sessions.
    pub fn delete_self(&self, session: &Session) -> Result<()> {
        self.with_state_mut(|state| {
            let id = state.authenticate(session)?;

            let account = state
                .registry
                .remove(id)
                .ok_or(StoreError::NotAuthenticated)?;
            state.profiles.remove(id);

            for other in state.registry.iter_mut() {
                while other.remove_friend(id) {}
            }
            state
                .requests
                .retain(|e| e.sender_id != id && e.receiver_id != id);
            state
                .messages
                .retain(|e| e.sender_id != id && e.receiver_id != id);
            state.sessions.retain(|_, user_id| *user_id != id);

            info!("User '{}' ({}) deleted their account", account.username, id);
            Ok(())
        })
    }

    // -- Lookups --

    pub fn find_user_by_id(&self, id: UserId) -> Result<Option<User>> {
        self.with_state(|state| Ok(state.registry.find_by_id(id).map(Account::user)))
    }

    pub fn find_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.with_state(|state| Ok(state.registry.find_by_username(username).map(Account::user)))
    }
}
