// Conversation store tests
// These cover the mutation contract: unread clearing on selection, status
// transitions, reassignment, and the compound message-append updates.

mod common;
use common::seeded_store;

use crmbox::models::{ChatStatus, ContentType, MessageStatus, Route};
use crmbox::store::{ConversationStore, StoreError, AGENT_SENDER};

#[test]
fn test_select_chat_clears_unread_only_for_that_chat() {
    let mut store = seeded_store();
    assert_eq!(store.chat("1").map(|c| c.unread_count), Some(3));
    let others_before: Vec<(String, u32)> = store
        .chats()
        .iter()
        .filter(|c| c.id != "1")
        .map(|c| (c.id.clone(), c.unread_count))
        .collect();

    store.select_chat("1").expect("seed chat 1 exists");

    assert_eq!(store.chat("1").map(|c| c.unread_count), Some(0));
    assert_eq!(store.selected_chat().map(|c| c.id.as_str()), Some("1"));
    for (id, before) in others_before {
        assert_eq!(
            store.chat(&id).map(|c| c.unread_count),
            Some(before),
            "chat {} unread count changed by selecting another chat",
            id
        );
    }
}

#[test]
fn test_select_chat_is_idempotent_for_read_chats() {
    let mut store = seeded_store();
    assert_eq!(store.chat("2").map(|c| c.unread_count), Some(0));

    store.select_chat("2").expect("seed chat 2 exists");
    store.select_chat("2").expect("seed chat 2 exists");

    assert_eq!(store.chat("2").map(|c| c.unread_count), Some(0));
    assert_eq!(store.selected_chat().map(|c| c.id.as_str()), Some("2"));
}

#[test]
fn test_send_message_appends_and_mirrors_chat_summary() {
    let mut store = seeded_store();
    let before = store.messages().len();

    let id = store
        .send_message("1", "Hello", ContentType::Text)
        .expect("seed chat 1 exists");

    assert_eq!(store.messages().len(), before + 1);
    let last = store.messages().last().expect("just appended");
    assert_eq!(last.id, id);
    assert_eq!(last.chat_id, "1");
    assert_eq!(last.text.as_deref(), Some("Hello"));
    assert_eq!(last.route, Route::Outgoing);
    assert_eq!(last.status, MessageStatus::Sent);
    assert_eq!(last.sender_name, AGENT_SENDER);

    let chat = store.chat("1").expect("seed chat 1 exists");
    assert_eq!(chat.last_message, "Hello");
    assert_eq!(chat.last_message_at, last.timestamp);
}

#[test]
fn test_send_message_does_not_touch_unread_count() {
    let mut store = seeded_store();
    let before = store.chat("1").map(|c| c.unread_count);

    store
        .send_message("1", "checking in", ContentType::Text)
        .expect("seed chat 1 exists");

    assert_eq!(store.chat("1").map(|c| c.unread_count), before);
}

#[test]
fn test_send_message_is_the_newest_for_its_chat() {
    let mut store = seeded_store();
    store
        .send_message("2", "one more thing", ContentType::Text)
        .expect("seed chat 2 exists");

    let messages = store.messages_for("2");
    let last = messages.last().expect("chat 2 has messages");
    assert_eq!(last.text.as_deref(), Some("one more thing"));
}

#[test]
fn test_update_status_reopens_closed_chat() {
    let mut store = seeded_store();
    assert_eq!(store.chat("2").map(|c| c.status), Some(ChatStatus::Closed));

    store
        .update_status("2", ChatStatus::Open)
        .expect("seed chat 2 exists");

    assert_eq!(store.chat("2").map(|c| c.status), Some(ChatStatus::Open));
}

#[test]
fn test_update_status_is_idempotent_for_fixed_target() {
    let mut store = seeded_store();
    store
        .update_status("3", ChatStatus::Closed)
        .expect("seed chat 3 exists");
    let snapshot: Vec<ChatStatus> = store.chats().iter().map(|c| c.status).collect();

    store
        .update_status("3", ChatStatus::Closed)
        .expect("seed chat 3 exists");

    let after: Vec<ChatStatus> = store.chats().iter().map(|c| c.status).collect();
    assert_eq!(snapshot, after);
}

#[test]
fn test_all_status_transitions_are_permitted() {
    let mut store = seeded_store();
    let all = [ChatStatus::Open, ChatStatus::InProgress, ChatStatus::Closed];
    for from in all {
        for to in all {
            store.update_status("1", from).expect("seed chat 1 exists");
            store.update_status("1", to).expect("seed chat 1 exists");
            assert_eq!(store.chat("1").map(|c| c.status), Some(to));
        }
    }
}

#[test]
fn test_reassign_replaces_assignee() {
    let mut store = seeded_store();
    assert_eq!(store.chat("1").map(|c| c.assigned_to.clone()), Some("2".into()));

    store.reassign("1", "3").expect("seed chat 1 exists");

    assert_eq!(store.chat("1").map(|c| c.assigned_to.clone()), Some("3".into()));
    assert_eq!(store.assigned_to("3").len(), 3);
}

#[test]
fn test_unknown_chat_id_is_surfaced_not_swallowed() {
    let mut store = seeded_store();
    let missing = "no-such-chat";

    assert_eq!(
        store.select_chat(missing),
        Err(StoreError::ChatNotFound(missing.into()))
    );
    assert_eq!(
        store.update_status(missing, ChatStatus::Open),
        Err(StoreError::ChatNotFound(missing.into()))
    );
    assert_eq!(
        store.reassign(missing, "2"),
        Err(StoreError::ChatNotFound(missing.into()))
    );
    assert!(store.send_message(missing, "hi", ContentType::Text).is_err());

    // A rejected mutation leaves nothing behind
    assert_eq!(store.messages().len(), 6);
}

#[test]
fn test_record_incoming_bumps_unread_and_mirrors_summary() {
    let mut store = seeded_store();
    let unread_before = store.chat("3").map(|c| c.unread_count).expect("seed chat 3");

    store
        .record_incoming("3", "Maria Costa", "Ainda estou esperando", ContentType::Text)
        .expect("seed chat 3 exists");

    let chat = store.chat("3").expect("seed chat 3 exists");
    assert_eq!(chat.unread_count, unread_before + 1);
    assert_eq!(chat.last_message, "Ainda estou esperando");

    let last = store.messages().last().expect("just appended");
    assert_eq!(last.route, Route::Incoming);
    assert_eq!(last.status, MessageStatus::Delivered);
    assert_eq!(chat.last_message_at, last.timestamp);
}

#[test]
fn test_messages_preserve_arrival_order() {
    let mut store = seeded_store();
    store
        .send_message("1", "first", ContentType::Text)
        .expect("seed chat 1 exists");
    store
        .record_incoming("1", "Ana Silva", "second", ContentType::Text)
        .expect("seed chat 1 exists");
    store
        .send_message("1", "third", ContentType::Text)
        .expect("seed chat 1 exists");

    let texts: Vec<&str> = store
        .messages_for("1")
        .iter()
        .rev()
        .take(3)
        .rev()
        .filter_map(|m| m.text.as_deref())
        .collect();
    assert_eq!(texts, vec!["first", "second", "third"]);
}

#[test]
fn test_empty_store_has_nothing_selected() {
    let store = ConversationStore::new(Vec::new(), Vec::new());
    assert!(store.chats().is_empty());
    assert!(store.messages().is_empty());
    assert!(store.selected_chat().is_none());
}
