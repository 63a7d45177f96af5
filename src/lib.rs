pub mod directory;
pub mod instances;
pub mod metrics;
pub mod models;
pub mod seed;
pub mod session;
pub mod store;

// Re-export the domain model for convenience
pub use models::*;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::ConversationStore;

    #[test]
    fn test_status_labels() {
        assert_eq!(ChatStatus::Open.label(), "open");
        assert_eq!(ChatStatus::InProgress.label(), "in-progress");
        assert_eq!(ChatStatus::Closed.label(), "closed");
        assert_eq!(Role::Admin.label(), "admin");
        assert_eq!(InstanceStatus::Inactive.label(), "inactive");
    }

    #[test]
    fn test_seed_satisfies_relationship_invariants() {
        let users = seed::seed_users();
        let chats = seed::seed_chats();
        let messages = seed::seed_messages();

        for message in &messages {
            assert!(
                chats.iter().any(|c| c.id == message.chat_id),
                "message {} references missing chat {}",
                message.id,
                message.chat_id
            );
        }
        for chat in &chats {
            assert!(
                users.iter().any(|u| u.id == chat.assigned_to),
                "chat {} assigned to missing user {}",
                chat.id,
                chat.assigned_to
            );
        }
    }

    #[test]
    fn test_seed_last_message_mirrors() {
        // Each seeded chat that has messages must agree with its newest one.
        let chats = seed::seed_chats();
        let store = ConversationStore::new(chats, seed::seed_messages());

        for chat in store.chats() {
            if let Some(last) = store.messages_for(&chat.id).last() {
                assert_eq!(last.text.as_deref(), Some(chat.last_message.as_str()));
                assert_eq!(last.timestamp, chat.last_message_at);
            }
        }
    }

    #[test]
    fn test_messages_for_filters_by_chat() {
        let store = ConversationStore::new(seed::seed_chats(), seed::seed_messages());
        let for_one = store.messages_for("1");
        assert_eq!(for_one.len(), 3);
        assert!(for_one.iter().all(|m| m.chat_id == "1"));

        // Seed chat 3 has no message history yet
        assert!(store.messages_for("3").is_empty());
    }
}
