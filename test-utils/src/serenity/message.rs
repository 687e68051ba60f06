//! Test factories for creating Serenity Message objects.

use serenity::all::Message;

fn message_json(
    message_id: u64,
    channel_id: u64,
    author_id: u64,
    content: &str,
    components: serde_json::Value,
) -> serde_json::Value {
    serde_json::json!({
        "id": message_id.to_string(),
        "channel_id": channel_id.to_string(),
        "author": {
            "id": author_id.to_string(),
            "username": format!("user{}", author_id),
            "discriminator": "0",
            "global_name": null,
            "avatar": null,
            "bot": false,
        },
        "content": content,
        "timestamp": "2024-01-01T00:00:00.000000+00:00",
        "edited_timestamp": null,
        "tts": false,
        "mention_everyone": false,
        "mentions": [],
        "mention_roles": [],
        "attachments": [],
        "embeds": [],
        "pinned": false,
        "type": 0,
        "flags": 0,
        "components": components,
    })
}

/// Creates a plain text message.
///
/// # Arguments
/// - `message_id` - Discord message ID
/// - `channel_id` - Channel the message was posted in
/// - `author_id` - Discord user ID of the author
/// - `content` - Message text
///
/// # Panics
/// - If the JSON cannot be deserialized into a Message (indicates invalid test data)
pub fn create_test_message(
    message_id: u64,
    channel_id: u64,
    author_id: u64,
    content: &str,
) -> Message {
    serde_json::from_value(message_json(
        message_id,
        channel_id,
        author_id,
        content,
        serde_json::json!([]),
    ))
    .expect("Failed to create test message - invalid JSON structure")
}

/// Creates a message carrying a single action row of secondary buttons.
///
/// # Arguments
/// - `buttons` - `(custom_id, label)` pairs, one button each
///
/// # Panics
/// - If the JSON cannot be deserialized into a Message (indicates invalid test data)
pub fn create_test_message_with_buttons(
    message_id: u64,
    channel_id: u64,
    author_id: u64,
    content: &str,
    buttons: &[(&str, &str)],
) -> Message {
    let buttons: Vec<serde_json::Value> = buttons
        .iter()
        .map(|(custom_id, label)| {
            serde_json::json!({
                "type": 2,
                "style": 2,
                "label": label,
                "custom_id": custom_id,
                "disabled": false,
            })
        })
        .collect();

    serde_json::from_value(message_json(
        message_id,
        channel_id,
        author_id,
        content,
        serde_json::json!([{ "type": 1, "components": buttons }]),
    ))
    .expect("Failed to create test message - invalid JSON structure")
}
