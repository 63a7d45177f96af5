// Team directory, instance manager, and dashboard metric tests

mod common;
use common::{seeded_directory, seeded_store};

use crmbox::directory::DirectoryError;
use crmbox::instances::{InstanceError, InstanceStore};
use crmbox::metrics;
use crmbox::models::{InstanceStatus, Role};
use crmbox::seed;

#[test]
fn test_create_user_defaults_the_secret() {
    let mut directory = seeded_directory();
    let user = directory.create_user("New Agent", "agent@whatsappcrm.com", Role::Sales, "");

    assert_eq!(user.secret, "sales123");
    assert_eq!(user.role, Role::Sales);
    assert!(directory.find(&user.id).is_some());
    assert_eq!(directory.sales_users().len(), 4);
}

#[test]
fn test_update_user_keeps_secret_unless_replaced() {
    let mut directory = seeded_directory();

    directory
        .update_user("2", "John Updated", "john2@whatsappcrm.com", Role::Sales, None)
        .expect("seed user 2 exists");
    let user = directory.find("2").expect("seed user 2 exists");
    assert_eq!(user.name, "John Updated");
    assert_eq!(user.secret, "sales123");

    directory
        .update_user("2", "John Updated", "john2@whatsappcrm.com", Role::Sales, Some("newpass"))
        .expect("seed user 2 exists");
    assert_eq!(directory.find("2").map(|u| u.secret.as_str()), Some("newpass"));
}

#[test]
fn test_delete_user_removes_the_record() {
    let mut directory = seeded_directory();
    directory.delete_user("4").expect("seed user 4 exists");

    assert!(directory.find("4").is_none());
    assert_eq!(
        directory.delete_user("4"),
        Err(DirectoryError::UserNotFound("4".into()))
    );
}

#[test]
fn test_change_secret_checks_the_current_one() {
    let mut directory = seeded_directory();

    assert_eq!(
        directory.change_secret("2", "wrong", "next").err(),
        Some(DirectoryError::SecretMismatch)
    );
    assert_eq!(
        directory.change_secret("2", "sales123", "").err(),
        Some(DirectoryError::EmptySecret)
    );

    let user = directory
        .change_secret("2", "sales123", "next")
        .expect("current secret matches");
    assert_eq!(user.secret, "next");
}

#[test]
fn test_update_profile_touches_name_and_email_only() {
    let mut directory = seeded_directory();
    let user = directory
        .update_profile("3", "Sarah S.", "sarah.s@whatsappcrm.com")
        .expect("seed user 3 exists");

    assert_eq!(user.name, "Sarah S.");
    assert_eq!(user.email, "sarah.s@whatsappcrm.com");
    assert_eq!(user.role, Role::Sales);
    assert_eq!(user.secret, "sales123");
}

#[test]
fn test_create_instance_starts_active_without_token() {
    let mut store = InstanceStore::new(seed::seed_instances());
    let instance = store.create("1");

    assert!(instance.instance_id.starts_with("inst_"));
    assert!(instance.token.is_empty());
    assert_eq!(instance.status, InstanceStatus::Active);
    assert_eq!(store.instances().len(), 3);
}

#[test]
fn test_generate_token_has_the_expected_shape() {
    let mut store = InstanceStore::new(seed::seed_instances());
    let token = store.generate_token("1").expect("seed instance 1 exists");

    assert!(token.starts_with("waCRM_token_"));
    let suffix = &token["waCRM_token_".len()..];
    assert_eq!(suffix.len(), 13);
    assert!(suffix.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));

    // The store keeps the regenerated token
    assert_eq!(store.instances()[0].token, token);
}

#[test]
fn test_toggle_status_flips_both_ways() {
    let mut store = InstanceStore::new(seed::seed_instances());
    assert_eq!(store.active_count(), 1);
    assert_eq!(store.inactive_count(), 1);

    assert_eq!(store.toggle_status("1"), Ok(InstanceStatus::Inactive));
    assert_eq!(store.toggle_status("2"), Ok(InstanceStatus::Active));
    assert_eq!(store.toggle_status("1"), Ok(InstanceStatus::Active));
    assert_eq!(store.active_count(), 2);
}

#[test]
fn test_instance_delete_and_unknown_ids() {
    let mut store = InstanceStore::new(seed::seed_instances());
    store.delete("2").expect("seed instance 2 exists");
    assert_eq!(store.instances().len(), 1);

    assert_eq!(
        store.delete("2"),
        Err(InstanceError::InstanceNotFound("2".into()))
    );
    assert_eq!(
        store.generate_token("nope").err(),
        Some(InstanceError::InstanceNotFound("nope".into()))
    );
    assert_eq!(
        store.toggle_status("nope").err(),
        Some(InstanceError::InstanceNotFound("nope".into()))
    );
}

#[test]
fn test_dashboard_stats_match_the_seeds() {
    let directory = seeded_directory();
    let store = seeded_store();
    let stats = metrics::dashboard_stats(store.chats(), directory.users());

    assert_eq!(stats.total_chats, 5);
    assert_eq!(stats.open, 2);
    assert_eq!(stats.in_progress, 1);
    assert_eq!(stats.closed, 2);
    assert_eq!(stats.unread_total, 6);
    assert_eq!(stats.sales_team_size, 3);
}

#[test]
fn test_agent_load_counts_assignments() {
    let directory = seeded_directory();
    let store = seeded_store();
    let loads = metrics::agent_load(store.chats(), directory.users());

    assert_eq!(loads.len(), 3);
    let by_id = |id: &str| loads.iter().find(|l| l.user_id == id).map(|l| l.chats);
    assert_eq!(by_id("2"), Some(2));
    assert_eq!(by_id("3"), Some(2));
    assert_eq!(by_id("4"), Some(1));

    // (2 + 2 + 1) / 3 rounds up to 2
    assert_eq!(metrics::average_load(store.chats(), directory.users()), 2);
}

#[test]
fn test_average_load_with_empty_team_is_zero() {
    let store = seeded_store();
    assert_eq!(metrics::average_load(store.chats(), &[]), 0);
}
