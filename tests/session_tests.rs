// Session store tests
// These cover login/logout, the durable identity slot, and the fail-closed
// handling of a damaged slot file.

mod common;
use common::{seeded_directory, temp_session};

use std::fs;

use crmbox::models::Role;
use crmbox::session::SessionStore;

#[test]
fn test_login_accepts_seeded_admin() {
    let directory = seeded_directory();
    let (mut session, _dir) = temp_session();

    let ok = session.login(
        directory.users(),
        "admin@whatsappcrm.com",
        "admin123",
        Some(Role::Admin),
    );

    assert!(ok);
    assert!(session.is_authenticated());
    let user = session.current().expect("just logged in");
    assert_eq!(user.id, "1");
    assert_eq!(user.role, Role::Admin);
}

#[test]
fn test_login_rejects_wrong_secret() {
    let directory = seeded_directory();
    let (mut session, dir) = temp_session();

    let ok = session.login(
        directory.users(),
        "admin@whatsappcrm.com",
        "wrong",
        Some(Role::Admin),
    );

    assert!(!ok);
    assert!(!session.is_authenticated());
    // A rejected login must not leave a slot behind
    assert!(!dir.path().join("identity.json").exists());
}

#[test]
fn test_login_rejects_role_hint_mismatch() {
    let directory = seeded_directory();
    let (mut session, _dir) = temp_session();

    let ok = session.login(
        directory.users(),
        "admin@whatsappcrm.com",
        "admin123",
        Some(Role::Sales),
    );

    assert!(!ok);
    assert!(!session.is_authenticated());
}

#[test]
fn test_login_without_role_hint_matches_any_role() {
    let directory = seeded_directory();
    let (mut session, _dir) = temp_session();

    assert!(session.login(directory.users(), "john@whatsappcrm.com", "sales123", None));
    assert_eq!(session.current().map(|u| u.id.as_str()), Some("2"));
}

#[test]
fn test_login_is_deterministic_for_same_inputs() {
    let directory = seeded_directory();
    let (mut session, _dir) = temp_session();

    let first = session.login(
        directory.users(),
        "sarah@whatsappcrm.com",
        "sales123",
        Some(Role::Sales),
    );
    let second = session.login(
        directory.users(),
        "sarah@whatsappcrm.com",
        "sales123",
        Some(Role::Sales),
    );
    assert_eq!(first, second);

    let bad_first = session.login(directory.users(), "sarah@whatsappcrm.com", "nope", None);
    let bad_second = session.login(directory.users(), "sarah@whatsappcrm.com", "nope", None);
    assert_eq!(bad_first, bad_second);
    assert!(!bad_first);
}

#[test]
fn test_identity_survives_restart() {
    let directory = seeded_directory();
    let (mut session, dir) = temp_session();
    assert!(session.login(
        directory.users(),
        "john@whatsappcrm.com",
        "sales123",
        Some(Role::Sales),
    ));

    // A fresh store over the same state dir stands in for a process restart
    let mut restarted = SessionStore::new(dir.path());
    restarted.restore_on_start();

    assert!(restarted.is_authenticated());
    let user = restarted.current().expect("restored");
    assert_eq!(user.id, "2");
    assert_eq!(user.email, "john@whatsappcrm.com");
    assert_eq!(user.secret, "sales123");
}

#[test]
fn test_slot_does_not_hold_the_secret_in_the_clear() {
    let directory = seeded_directory();
    let (mut session, dir) = temp_session();
    assert!(session.login(
        directory.users(),
        "admin@whatsappcrm.com",
        "admin123",
        None,
    ));

    let raw = fs::read_to_string(dir.path().join("identity.json")).expect("slot written");
    assert!(!raw.contains("admin123"));
    assert!(raw.contains("admin@whatsappcrm.com"));
}

#[test]
fn test_logout_clears_identity_and_slot() {
    let directory = seeded_directory();
    let (mut session, dir) = temp_session();
    assert!(session.login(
        directory.users(),
        "mike@whatsappcrm.com",
        "sales123",
        None,
    ));
    assert!(dir.path().join("identity.json").exists());

    session.logout();
    assert!(!session.is_authenticated());
    assert!(!dir.path().join("identity.json").exists());

    // Logging out twice is fine
    session.logout();
    assert!(!session.is_authenticated());
}

#[test]
fn test_restore_with_no_slot_stays_logged_out() {
    let (mut session, _dir) = temp_session();
    session.restore_on_start();
    assert!(!session.is_authenticated());
}

#[test]
fn test_malformed_slot_fails_closed() {
    let (mut session, dir) = temp_session();
    fs::write(dir.path().join("identity.json"), "{ not json at all").expect("write garbage");

    session.restore_on_start();

    assert!(!session.is_authenticated());
}

#[test]
fn test_refresh_rewrites_the_slot() {
    let directory = seeded_directory();
    let (mut session, dir) = temp_session();
    assert!(session.login(
        directory.users(),
        "john@whatsappcrm.com",
        "sales123",
        None,
    ));

    let mut updated = session.current().expect("logged in").clone();
    updated.name = "John Renamed".to_string();
    session.refresh(&updated);
    assert_eq!(session.current().map(|u| u.name.as_str()), Some("John Renamed"));

    let mut restarted = SessionStore::new(dir.path());
    restarted.restore_on_start();
    assert_eq!(restarted.current().map(|u| u.name.as_str()), Some("John Renamed"));
}
