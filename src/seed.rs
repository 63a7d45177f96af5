//! The startup fixture: a fixed set of users, chats, messages, and instances.
//! Seeded records satisfy the relationship invariants (every message belongs
//! to a seeded chat, every chat is assigned to a seeded user).

use chrono::{DateTime, Utc};

use crate::models::{
    Chat, ChatStatus, ContentType, Instance, InstanceStatus, Message, MessageStatus, Role, Route,
    User,
};

fn ts(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .expect("hardcoded seed timestamp is valid")
        .with_timezone(&Utc)
}

pub fn seed_users() -> Vec<User> {
    vec![
        User {
            id: "1".into(),
            name: "Admin User".into(),
            role: Role::Admin,
            email: "admin@whatsappcrm.com".into(),
            secret: "admin123".into(),
            created_at: ts("2024-01-01T00:00:00Z"),
        },
        User {
            id: "2".into(),
            name: "John Sales".into(),
            role: Role::Sales,
            email: "john@whatsappcrm.com".into(),
            secret: "sales123".into(),
            created_at: ts("2024-01-02T00:00:00Z"),
        },
        User {
            id: "3".into(),
            name: "Sarah Marketing".into(),
            role: Role::Sales,
            email: "sarah@whatsappcrm.com".into(),
            secret: "sales123".into(),
            created_at: ts("2024-01-03T00:00:00Z"),
        },
        User {
            id: "4".into(),
            name: "Mike Support".into(),
            role: Role::Sales,
            email: "mike@whatsappcrm.com".into(),
            secret: "sales123".into(),
            created_at: ts("2024-01-04T00:00:00Z"),
        },
    ]
}

pub fn seed_chats() -> Vec<Chat> {
    vec![
        Chat {
            id: "1".into(),
            jid: "5511999999999@c.us".into(),
            name: "Ana Silva".into(),
            last_message: "Olá, gostaria de saber mais sobre os produtos".into(),
            last_message_at: ts("2024-08-15T10:30:00Z"),
            unread_count: 3,
            assigned_to: "2".into(),
            status: ChatStatus::Open,
            notes: None,
            avatar: Some("https://images.unsplash.com/photo-1494790108755-2616b612b47c?w=150&h=150&fit=crop&crop=face".into()),
        },
        Chat {
            id: "2".into(),
            jid: "5511888888888@c.us".into(),
            name: "Carlos Santos".into(),
            last_message: "Obrigado pela atenção!".into(),
            last_message_at: ts("2024-08-15T09:15:00Z"),
            unread_count: 0,
            assigned_to: "3".into(),
            status: ChatStatus::Closed,
            notes: None,
            avatar: Some("https://images.unsplash.com/photo-1507003211169-0a1dd7228f2d?w=150&h=150&fit=crop&crop=face".into()),
        },
        Chat {
            id: "3".into(),
            jid: "5511777777777@c.us".into(),
            name: "Maria Costa".into(),
            last_message: "Quando vocês fazem entrega?".into(),
            last_message_at: ts("2024-08-15T08:45:00Z"),
            unread_count: 1,
            assigned_to: "2".into(),
            status: ChatStatus::InProgress,
            notes: None,
            avatar: Some("https://images.unsplash.com/photo-1517841905240-472988babdf9?w=150&h=150&fit=crop&crop=face".into()),
        },
        Chat {
            id: "4".into(),
            jid: "5511666666666@c.us".into(),
            name: "João Oliveira".into(),
            last_message: "Perfeito, muito obrigado!".into(),
            last_message_at: ts("2024-08-14T16:20:00Z"),
            unread_count: 0,
            assigned_to: "4".into(),
            status: ChatStatus::Closed,
            notes: None,
            avatar: Some("https://images.unsplash.com/photo-1472099645785-5658abf4ff4e?w=150&h=150&fit=crop&crop=face".into()),
        },
        Chat {
            id: "5".into(),
            jid: "5511555555555@c.us".into(),
            name: "Fernanda Lima".into(),
            last_message: "Preciso de ajuda com meu pedido".into(),
            last_message_at: ts("2024-08-14T14:10:00Z"),
            unread_count: 2,
            assigned_to: "3".into(),
            status: ChatStatus::Open,
            notes: None,
            avatar: Some("https://images.unsplash.com/photo-1438761681033-6461ffad8d80?w=150&h=150&fit=crop&crop=face".into()),
        },
    ]
}

pub fn seed_messages() -> Vec<Message> {
    let text = |id: &str, chat_id: &str, sender: &str, body: &str, at: &str, status, route| Message {
        id: id.into(),
        chat_id: chat_id.into(),
        sender_name: sender.into(),
        text: Some(body.into()),
        timestamp: ts(at),
        status,
        route,
        content_type: ContentType::Text,
        media_url: None,
    };

    vec![
        text(
            "1",
            "1",
            "Ana Silva",
            "Olá, boa tarde!",
            "2024-08-15T10:25:00Z",
            MessageStatus::Read,
            Route::Incoming,
        ),
        text(
            "2",
            "1",
            "John Sales",
            "Olá Ana! Como posso ajudá-la hoje?",
            "2024-08-15T10:26:00Z",
            MessageStatus::Read,
            Route::Outgoing,
        ),
        text(
            "3",
            "1",
            "Ana Silva",
            "Gostaria de saber mais sobre os produtos que vocês oferecem",
            "2024-08-15T10:30:00Z",
            MessageStatus::Delivered,
            Route::Incoming,
        ),
        text(
            "4",
            "2",
            "Carlos Santos",
            "Vocês fazem entrega para toda cidade?",
            "2024-08-15T09:10:00Z",
            MessageStatus::Read,
            Route::Incoming,
        ),
        text(
            "5",
            "2",
            "Sarah Marketing",
            "Sim, fazemos entrega para toda a região metropolitana!",
            "2024-08-15T09:12:00Z",
            MessageStatus::Read,
            Route::Outgoing,
        ),
        text(
            "6",
            "2",
            "Carlos Santos",
            "Obrigado pela atenção!",
            "2024-08-15T09:15:00Z",
            MessageStatus::Read,
            Route::Incoming,
        ),
    ]
}

pub fn seed_instances() -> Vec<Instance> {
    vec![
        Instance {
            id: "1".into(),
            admin_id: "1".into(),
            instance_id: "inst_001".into(),
            token: "waCRM_token_abcd1234efgh5678".into(),
            created_at: ts("2024-08-01T00:00:00Z"),
            status: InstanceStatus::Active,
        },
        Instance {
            id: "2".into(),
            admin_id: "1".into(),
            instance_id: "inst_002".into(),
            token: "waCRM_token_ijkl9012mnop3456".into(),
            created_at: ts("2024-08-10T00:00:00Z"),
            status: InstanceStatus::Inactive,
        },
    ]
}
