use chrono::Utc;
use log::{debug, info};
use thiserror::Error;
use uuid::Uuid;

use crate::models::{Chat, ChatStatus, ContentType, Message, MessageStatus, Route};

/// Sender label attached to messages sent from this workspace.
pub const AGENT_SENDER: &str = "You";

#[derive(Debug, Error, PartialEq)]
pub enum StoreError {
    #[error("no chat with id {0}")]
    ChatNotFound(String),
}

/// The authoritative in-memory store for chats and their messages.
///
/// Chat summaries (`last_message`, `last_message_at`, `unread_count`) are kept
/// consistent with the message list by making this store the only writer of
/// both: the append operations update the owning chat in the same call, and
/// `select_chat` is the only path that clears the unread counter.
pub struct ConversationStore {
    chats: Vec<Chat>,
    messages: Vec<Message>,
    selected: Option<String>,
}

impl ConversationStore {
    pub fn new(chats: Vec<Chat>, messages: Vec<Message>) -> Self {
        ConversationStore {
            chats,
            messages,
            selected: None,
        }
    }

    /// All chats in insertion order.
    pub fn chats(&self) -> &[Chat] {
        &self.chats
    }

    /// All messages in arrival order, across every chat.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn chat(&self, chat_id: &str) -> Option<&Chat> {
        self.chats.iter().find(|c| c.id == chat_id)
    }

    pub fn selected_chat(&self) -> Option<&Chat> {
        self.selected.as_deref().and_then(|id| self.chat(id))
    }

    /// Messages belonging to one chat, oldest first.
    pub fn messages_for(&self, chat_id: &str) -> Vec<&Message> {
        self.messages.iter().filter(|m| m.chat_id == chat_id).collect()
    }

    /// Chats assigned to the given user, in insertion order.
    pub fn assigned_to(&self, user_id: &str) -> Vec<&Chat> {
        self.chats.iter().filter(|c| c.assigned_to == user_id).collect()
    }

    /// Focuses a chat for the UI and marks it read.
    ///
    /// Clearing the unread counter here is the only way it ever decreases;
    /// selecting an already-read chat changes nothing but the focus.
    pub fn select_chat(&mut self, chat_id: &str) -> Result<(), StoreError> {
        let chat = self
            .chats
            .iter_mut()
            .find(|c| c.id == chat_id)
            .ok_or_else(|| StoreError::ChatNotFound(chat_id.to_string()))?;

        if chat.unread_count > 0 {
            debug!("marking {} messages read in chat {}", chat.unread_count, chat_id);
            chat.unread_count = 0;
        }
        self.selected = Some(chat_id.to_string());
        Ok(())
    }

    /// Replaces a chat's status. Every transition between the three states is
    /// permitted in both directions; a closed chat can be reopened.
    pub fn update_status(&mut self, chat_id: &str, status: ChatStatus) -> Result<(), StoreError> {
        let chat = self
            .chats
            .iter_mut()
            .find(|c| c.id == chat_id)
            .ok_or_else(|| StoreError::ChatNotFound(chat_id.to_string()))?;

        info!("chat {} status {} -> {}", chat_id, chat.status.label(), status.label());
        chat.status = status;
        Ok(())
    }

    /// Hands a chat to another agent.
    pub fn reassign(&mut self, chat_id: &str, user_id: &str) -> Result<(), StoreError> {
        let chat = self
            .chats
            .iter_mut()
            .find(|c| c.id == chat_id)
            .ok_or_else(|| StoreError::ChatNotFound(chat_id.to_string()))?;

        info!("chat {} reassigned {} -> {}", chat_id, chat.assigned_to, user_id);
        chat.assigned_to = user_id.to_string();
        Ok(())
    }

    /// Appends an outgoing message and updates the chat's last-message mirror
    /// in the same call. Returns the id of the new message.
    ///
    /// The unread counter is untouched; it tracks inbound traffic only.
    pub fn send_message(
        &mut self,
        chat_id: &str,
        text: &str,
        content_type: ContentType,
    ) -> Result<String, StoreError> {
        let chat = self
            .chats
            .iter_mut()
            .find(|c| c.id == chat_id)
            .ok_or_else(|| StoreError::ChatNotFound(chat_id.to_string()))?;

        let now = Utc::now();
        let message = Message {
            id: Uuid::new_v4().to_string(),
            chat_id: chat_id.to_string(),
            sender_name: AGENT_SENDER.to_string(),
            text: Some(text.to_string()),
            timestamp: now,
            status: MessageStatus::Sent,
            route: Route::Outgoing,
            content_type,
            media_url: None,
        };
        let id = message.id.clone();

        chat.last_message = text.to_string();
        chat.last_message_at = now;
        self.messages.push(message);

        debug!("sent message {} to chat {}", id, chat_id);
        Ok(id)
    }

    /// Appends an inbound message: bumps the unread counter and updates the
    /// last-message mirror together with the append.
    pub fn record_incoming(
        &mut self,
        chat_id: &str,
        sender_name: &str,
        text: &str,
        content_type: ContentType,
    ) -> Result<String, StoreError> {
        let chat = self
            .chats
            .iter_mut()
            .find(|c| c.id == chat_id)
            .ok_or_else(|| StoreError::ChatNotFound(chat_id.to_string()))?;

        let now = Utc::now();
        let message = Message {
            id: Uuid::new_v4().to_string(),
            chat_id: chat_id.to_string(),
            sender_name: sender_name.to_string(),
            text: Some(text.to_string()),
            timestamp: now,
            status: MessageStatus::Delivered,
            route: Route::Incoming,
            content_type,
            media_url: None,
        };
        let id = message.id.clone();

        chat.last_message = text.to_string();
        chat.last_message_at = now;
        chat.unread_count += 1;
        self.messages.push(message);

        debug!("recorded incoming message {} for chat {}", id, chat_id);
        Ok(id)
    }
}
