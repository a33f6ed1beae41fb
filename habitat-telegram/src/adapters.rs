//! Adapters from Telegram (teloxide) types to habitat_core types.
//! Depends only on teloxide and habitat_core type definitions.

use habitat_core::{
    Chat, GeoPoint, Message, MessageKind, PhotoAttachment, ToCoreMessage, ToCoreUser, User,
};
use teloxide::types::PhotoSize;

/// Wraps a teloxide User for conversion to core [`User`].
pub struct TelegramUserWrapper<'a>(pub &'a teloxide::types::User);

impl<'a> ToCoreUser for TelegramUserWrapper<'a> {
    fn to_core(&self) -> User {
        User {
            id: self.0.id.0 as i64,
            username: self.0.username.clone(),
            first_name: Some(self.0.first_name.clone()),
            last_name: self.0.last_name.clone(),
        }
    }
}

/// Picks the biggest size variant (Telegram lists them smallest first).
pub fn largest_photo(sizes: &[PhotoSize]) -> Option<PhotoAttachment> {
    sizes
        .iter()
        .enumerate()
        .max_by_key(|(idx, p)| (u64::from(p.width) * u64::from(p.height), *idx))
        .map(|(_, p)| PhotoAttachment {
            file_id: p.file.id.0.clone(),
            file_unique_id: p.file.unique_id.0.clone(),
            width: p.width,
            height: p.height,
        })
}

/// Wraps a teloxide Message for conversion to core [`Message`].
pub struct TelegramMessageWrapper<'a>(pub &'a teloxide::types::Message);

impl<'a> ToCoreMessage for TelegramMessageWrapper<'a> {
    fn to_core(&self) -> Message {
        let msg = self.0;
        let photo = msg.photo().and_then(largest_photo);
        let location = msg.location().map(|l| GeoPoint {
            latitude: l.latitude,
            longitude: l.longitude,
        });
        let content = msg.text().or_else(|| msg.caption()).unwrap_or("").to_string();

        let kind = if photo.is_some() {
            MessageKind::Photo
        } else if location.is_some() {
            MessageKind::Location
        } else if let Some(text) = msg.text() {
            if text.starts_with('/') {
                MessageKind::Command
            } else {
                MessageKind::Text
            }
        } else {
            MessageKind::Other
        };

        Message {
            id: msg.id.to_string(),
            user: msg
                .from
                .as_ref()
                .map(|u| TelegramUserWrapper(u).to_core())
                .unwrap_or_else(|| User {
                    id: 0,
                    username: None,
                    first_name: None,
                    last_name: None,
                }),
            chat: Chat {
                id: msg.chat.id.0,
                chat_type: if msg.chat.is_private() {
                    "private".to_string()
                } else {
                    "group".to_string()
                },
            },
            content,
            kind,
            created_at: msg.date,
            photo,
            location,
        }
    }
}
