use std::io::{BufRead, Write};

use anyhow::Result;
use tracing::warn;

use agora_store::{SocialStore, StoreError};
use agora_types::api::Session;

use crate::format;

const MENU: &str = "
--- Social Media Simulator ---
1. Register
2. Login
3. Delete My Account
4. Create Post
5. Show All Posts
6. Send Friend Request
7. Accept Friend Request
8. Show Friends
9. Send Message
10. Read Messages
11. Undo Last Action
12. Show Profile
13. Logout
0. Exit";

/// Numbered-choice terminal front end. Holds the one session of whoever is
/// sitting at the terminal; all other state lives in the store.
pub struct Menu<R, W> {
    store: SocialStore,
    session: Option<Session>,
    input: R,
    out: W,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    pub fn new(store: SocialStore, input: R, out: W) -> Self {
        Self {
            store,
            session: None,
            input,
            out,
        }
    }

    /// Loop until `0` or end of input.
    pub fn run(&mut self) -> Result<()> {
        loop {
            writeln!(self.out, "{}", MENU)?;
            let Some(choice) = self.prompt("Choice: ")? else {
                writeln!(self.out, "Bye!")?;
                return Ok(());
            };

            match choice.parse::<u32>() {
                Ok(0) => {
                    writeln!(self.out, "Bye!")?;
                    return Ok(());
                }
                Ok(1) => self.register()?,
                Ok(2) => self.login()?,
                Ok(3) => self.delete_account()?,
                Ok(4) => self.create_post()?,
                Ok(5) => self.show_all_posts()?,
                Ok(6) => self.send_friend_request()?,
                Ok(7) => self.accept_friend_request()?,
                Ok(8) => self.show_friends()?,
                Ok(9) => self.send_message()?,
                Ok(10) => self.read_message()?,
                Ok(11) => self.undo()?,
                Ok(12) => self.show_profile()?,
                Ok(13) => self.logout()?,
                _ => writeln!(self.out, "Invalid choice!")?,
            }
        }
    }

    // -- Accounts --

    fn register(&mut self) -> Result<()> {
        let Some(username) = self.prompt("Enter username: ")? else {
            return Ok(());
        };
        let Some(password) = self.prompt("Enter password: ")? else {
            return Ok(());
        };

        match self.store.register(&username, &password) {
            Ok(id) => writeln!(self.out, "User '{}' registered (ID={})", username, id)?,
            Err(e) => self.report(e)?,
        }
        Ok(())
    }

    fn login(&mut self) -> Result<()> {
        let Some(username) = self.prompt("Enter username: ")? else {
            return Ok(());
        };
        let Some(password) = self.prompt("Enter password: ")? else {
            return Ok(());
        };

        match self.store.login(&username, &password) {
            Ok(session) => {
                if let Some(previous) = self.session.replace(session) {
                    match self.store.logout(&previous) {
                        Ok(()) | Err(StoreError::NotAuthenticated) => {}
                        Err(e) => warn!("Could not end previous session: {}", e),
                    }
                }
                writeln!(self.out, "Login successful! Welcome {}", username)?;
            }
            Err(e) => self.report(e)?,
        }
        Ok(())
    }

    fn logout(&mut self) -> Result<()> {
        let Some(session) = self.require_session()? else {
            return Ok(());
        };
        self.session = None;
        match self.store.logout(&session) {
            Ok(()) => writeln!(self.out, "Logged out.")?,
            Err(e) => self.report(e)?,
        }
        Ok(())
    }

    fn delete_account(&mut self) -> Result<()> {
        let Some(session) = self.require_session()? else {
            return Ok(());
        };
        match self.store.delete_self(&session) {
            Ok(()) => {
                self.session = None;
                writeln!(self.out, "Your account has been deleted.")?;
            }
            Err(e) => self.report(e)?,
        }
        Ok(())
    }

    fn show_profile(&mut self) -> Result<()> {
        let Some(raw) = self.prompt("Enter user ID: ")? else {
            return Ok(());
        };
        let Ok(id) = raw.parse() else {
            writeln!(self.out, "Invalid ID!")?;
            return Ok(());
        };

        match self.store.profile(id) {
            Ok(Some(profile)) => writeln!(self.out, "{}", format::profile_block(&profile))?,
            Ok(None) => writeln!(self.out, "Profile not found!")?,
            Err(e) => self.report(e)?,
        }
        Ok(())
    }

    // -- Posts --

    fn create_post(&mut self) -> Result<()> {
        let Some(session) = self.require_session()? else {
            return Ok(());
        };
        let Some(text) = self.prompt_text("Enter post: ")? else {
            return Ok(());
        };

        match self.store.create_post(&session, &text) {
            Ok(_) => writeln!(self.out, "Post created!")?,
            Err(e) => self.report(e)?,
        }
        Ok(())
    }

    fn show_all_posts(&mut self) -> Result<()> {
        let posts = match self.store.list_all_posts() {
            Ok(posts) => posts,
            Err(e) => return self.report(e),
        };

        writeln!(self.out, "\n=== All Posts ===")?;
        for post in &posts {
            writeln!(self.out, "{}", format::post_line(post))?;
        }
        writeln!(self.out, "=================")?;
        Ok(())
    }

    // -- Friends --

    fn send_friend_request(&mut self) -> Result<()> {
        let Some(session) = self.require_session()? else {
            return Ok(());
        };
        let Some(target) = self.prompt("Enter username to send request: ")? else {
            return Ok(());
        };

        match self.store.send_friend_request(&session, &target) {
            Ok(()) => writeln!(self.out, "Friend request sent to {}", target)?,
            Err(e) => self.report(e)?,
        }
        Ok(())
    }

    fn accept_friend_request(&mut self) -> Result<()> {
        let Some(session) = self.require_session()? else {
            return Ok(());
        };
        match self.store.accept_friend_request(&session) {
            Ok(friend) => writeln!(self.out, "You are now friends with {}!", friend)?,
            Err(e) => self.report(e)?,
        }
        Ok(())
    }

    fn show_friends(&mut self) -> Result<()> {
        let Some(session) = self.require_session()? else {
            return Ok(());
        };
        match self.store.list_friends(&session) {
            Ok(friends) => writeln!(
                self.out,
                "Friends of {}: {}",
                session.username,
                friends.join(" ")
            )?,
            Err(e) => self.report(e)?,
        }
        Ok(())
    }

    // -- Messages --

    fn send_message(&mut self) -> Result<()> {
        let Some(session) = self.require_session()? else {
            return Ok(());
        };
        let Some(target) = self.prompt("Send message to: ")? else {
            return Ok(());
        };
        let Some(text) = self.prompt_text("Enter message: ")? else {
            return Ok(());
        };

        match self.store.send_message(&session, &target, &text) {
            Ok(()) => writeln!(self.out, "Message sent!")?,
            Err(e) => self.report(e)?,
        }
        Ok(())
    }

    fn read_message(&mut self) -> Result<()> {
        let Some(session) = self.require_session()? else {
            return Ok(());
        };
        match self.store.read_next_message(&session) {
            Ok(message) => writeln!(self.out, "{}", format::message_line(&message))?,
            Err(e) => self.report(e)?,
        }
        Ok(())
    }

    // -- Undo --

    fn undo(&mut self) -> Result<()> {
        match self.store.undo_last() {
            Ok(outcome) => writeln!(self.out, "{}.", outcome)?,
            Err(e) => self.report(e)?,
        }
        Ok(())
    }

    // -- Helpers --

    /// Prompt for a single token (username, id, choice). Surrounding
    /// whitespace is dropped.
    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        Ok(self.prompt_text(label)?.map(|line| line.trim().to_string()))
    }

    /// Write a label, read one line of free text with only the line ending
    /// removed. `None` at end of input.
    fn prompt_text(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.out, "{}", label)?;
        self.out.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn require_session(&mut self) -> Result<Option<Session>> {
        if self.session.is_none() {
            writeln!(self.out, "Login first!")?;
        }
        Ok(self.session.clone())
    }

    fn report(&mut self, err: StoreError) -> Result<()> {
        let text = match &err {
            StoreError::NotAuthenticated => {
                self.session = None;
                "Login first!".to_string()
            }
            StoreError::AuthFailed => "Invalid login!".to_string(),
            StoreError::UserNotFound { .. } => "User not found!".to_string(),
            StoreError::NoPendingRequest => "No friend requests!".to_string(),
            StoreError::NoMessages => "No new messages!".to_string(),
            StoreError::NothingToUndo => "Nothing to undo!".to_string(),
            other => {
                warn!("Store error: {}", other);
                format!("Error: {}", other)
            }
        };
        writeln!(self.out, "{}", text)?;
        Ok(())
    }
}
