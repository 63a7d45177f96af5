// Shared helpers for integration tests

use tempfile::TempDir;

use crmbox::directory::Directory;
use crmbox::seed;
use crmbox::session::SessionStore;
use crmbox::store::ConversationStore;

/// A conversation store loaded with the startup fixture.
pub fn seeded_store() -> ConversationStore {
    ConversationStore::new(seed::seed_chats(), seed::seed_messages())
}

/// The known-users collection from the startup fixture.
pub fn seeded_directory() -> Directory {
    Directory::new(seed::seed_users())
}

/// A session store backed by a throwaway state directory. The TempDir must
/// be kept alive for as long as the store is used.
pub fn temp_session() -> (SessionStore, TempDir) {
    let dir = TempDir::new().expect("failed to create temp state dir");
    let session = SessionStore::new(dir.path());
    (session, dir)
}
