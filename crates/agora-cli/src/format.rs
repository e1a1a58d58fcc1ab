use chrono::{DateTime, Local, Utc};

use agora_types::api::DeliveredMessage;
use agora_types::models::{Post, Profile};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn timestamp(at: &DateTime<Utc>) -> String {
    at.with_timezone(&Local).format(TIMESTAMP_FORMAT).to_string()
}

/// `[2024-01-01 12:00:00] alice: hello`
pub fn post_line(post: &Post) -> String {
    format!("[{}] {}: {}", timestamp(&post.created_at), post.author, post.content)
}

pub fn message_line(message: &DeliveredMessage) -> String {
    let sender = message.sender_username.as_deref().unwrap_or("Unknown");
    format!("From {}: {}", sender, message.content)
}

pub fn profile_block(profile: &Profile) -> String {
    format!(
        "ID: {}\nUsername: {}\nBio: {}",
        profile.user_id, profile.username, profile.bio
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use agora_types::models::PostId;
    use chrono::TimeZone;

    #[test]
    fn post_line_layout() {
        let created_at = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
        let post = Post {
            id: PostId(1),
            author_id: 7,
            author: "alice".into(),
            content: "hi there".into(),
            created_at,
        };

        let line = post_line(&post);
        let expected_ts = timestamp(&created_at);
        assert_eq!(expected_ts.len(), 19);
        assert_eq!(line, format!("[{}] alice: hi there", expected_ts));
    }

    #[test]
    fn vanished_sender_is_unknown() {
        let message = DeliveredMessage {
            sender_id: 3,
            sender_username: None,
            content: "ghostly".into(),
        };
        assert_eq!(message_line(&message), "From Unknown: ghostly");
    }
}
