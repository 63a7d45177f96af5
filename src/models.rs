use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub role: Role,
    pub email: String,
    pub secret: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Sales,
}

impl Role {
    pub fn label(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Sales => "sales",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Chat {
    pub id: String,
    /// External contact identifier, e.g. `5511999999999@c.us`.
    pub jid: String,
    pub name: String,
    pub last_message: String,
    pub last_message_at: DateTime<Utc>,
    pub unread_count: u32,
    /// Id of the user this conversation is assigned to.
    pub assigned_to: String,
    pub status: ChatStatus,
    pub notes: Option<String>,
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatStatus {
    Open,
    InProgress,
    Closed,
}

impl ChatStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ChatStatus::Open => "open",
            ChatStatus::InProgress => "in-progress",
            ChatStatus::Closed => "closed",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Message {
    pub id: String,
    pub chat_id: String,
    pub sender_name: String,
    pub text: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub status: MessageStatus,
    pub route: Route,
    pub content_type: ContentType,
    pub media_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageStatus {
    Sent,
    Delivered,
    Read,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Incoming,
    Outgoing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    Text,
    Image,
    Voice,
    Document,
}

impl ContentType {
    pub fn label(&self) -> &'static str {
        match self {
            ContentType::Text => "text",
            ContentType::Image => "image",
            ContentType::Voice => "voice",
            ContentType::Document => "document",
        }
    }
}

/// A logical connection credential record for an external messaging channel.
#[derive(Debug, Clone)]
pub struct Instance {
    pub id: String,
    pub admin_id: String,
    pub instance_id: String,
    pub token: String,
    pub created_at: DateTime<Utc>,
    pub status: InstanceStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstanceStatus {
    Active,
    Inactive,
}

impl InstanceStatus {
    pub fn label(&self) -> &'static str {
        match self {
            InstanceStatus::Active => "active",
            InstanceStatus::Inactive => "inactive",
        }
    }
}
