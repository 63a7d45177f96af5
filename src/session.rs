use anyhow::{anyhow, Result};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::path::{Path, PathBuf};

use crate::models::{Role, User};

const SLOT_FILE: &str = "identity.json";

static STATE_DIR_OVERRIDE: OnceCell<PathBuf> = OnceCell::new();

/// Overrides the directory used for durable state (set from `--state-dir`).
pub fn set_state_dir_override(dir: PathBuf) {
    let _ = STATE_DIR_OVERRIDE.set(dir);
}

/// Resolves the state directory, creating it if needed.
pub fn default_state_dir() -> Result<PathBuf> {
    if let Some(dir) = STATE_DIR_OVERRIDE.get() {
        if !dir.exists() {
            fs::create_dir_all(dir)?;
        }
        return Ok(dir.clone());
    }
    let dir = dirs::config_dir()
        .ok_or_else(|| anyhow!("Could not determine config directory"))?
        .join("crmbox");

    if !dir.exists() {
        fs::create_dir_all(&dir)?;
    }
    Ok(dir)
}

/// On-disk shape of the persisted identity. Structurally the User record,
/// with the secret base64-obfuscated rather than stored in the clear.
#[derive(Serialize, Deserialize)]
struct StoredIdentity {
    id: String,
    name: String,
    role: Role,
    email: String,
    secret: String,
    created_at: DateTime<Utc>,
}

impl StoredIdentity {
    fn from_user(user: &User) -> Self {
        StoredIdentity {
            id: user.id.clone(),
            name: user.name.clone(),
            role: user.role,
            email: user.email.clone(),
            secret: BASE64.encode(&user.secret),
            created_at: user.created_at,
        }
    }

    fn into_user(self) -> User {
        let secret =
            String::from_utf8(BASE64.decode(&self.secret).unwrap_or_default()).unwrap_or_default();
        User {
            id: self.id,
            name: self.name,
            role: self.role,
            email: self.email,
            secret,
            created_at: self.created_at,
        }
    }
}

/// Holds at most one authenticated identity and mirrors it to a single
/// JSON file so a restart picks up where the user left off.
pub struct SessionStore {
    slot_path: PathBuf,
    current: Option<User>,
}

impl SessionStore {
    pub fn new(state_dir: &Path) -> Self {
        SessionStore {
            slot_path: state_dir.join(SLOT_FILE),
            current: None,
        }
    }

    pub fn current(&self) -> Option<&User> {
        self.current.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    /// Scans the known-users collection for an exact email/secret match.
    /// When a role hint is supplied, the matched user's role must equal it.
    ///
    /// On a match the identity is adopted and persisted; otherwise state is
    /// left untouched. The secret comparison is plain string equality, a
    /// placeholder credential scheme rather than real authentication.
    pub fn login(
        &mut self,
        users: &[User],
        email: &str,
        secret: &str,
        role_hint: Option<Role>,
    ) -> bool {
        let found = users.iter().find(|u| {
            u.email == email && u.secret == secret && role_hint.map_or(true, |r| u.role == r)
        });

        match found {
            Some(user) => {
                info!("login accepted for {} ({})", user.email, user.role.label());
                self.current = Some(user.clone());
                if let Err(e) = self.persist(user) {
                    warn!("failed to persist identity: {}", e);
                }
                true
            }
            None => {
                info!("login rejected for {}", email);
                false
            }
        }
    }

    /// Clears the identity and removes the persisted copy. Idempotent.
    pub fn logout(&mut self) {
        self.current = None;
        if self.slot_path.exists() {
            if let Err(e) = fs::remove_file(&self.slot_path) {
                warn!("failed to remove identity slot: {}", e);
            }
        }
        info!("logged out");
    }

    /// Adopts a previously persisted identity, if one exists.
    ///
    /// The restored record is not re-validated against the live user
    /// directory. A slot that cannot be read or parsed is treated as no
    /// identity rather than an error.
    pub fn restore_on_start(&mut self) {
        if !self.slot_path.exists() {
            return;
        }
        let contents = match fs::read_to_string(&self.slot_path) {
            Ok(c) => c,
            Err(e) => {
                warn!("identity slot unreadable, starting logged out: {}", e);
                return;
            }
        };
        match serde_json::from_str::<StoredIdentity>(&contents) {
            Ok(stored) => {
                let user = stored.into_user();
                debug!("restored session for {} without re-validation", user.email);
                self.current = Some(user);
            }
            Err(e) => {
                warn!("identity slot malformed, starting logged out: {}", e);
            }
        }
    }

    /// Replaces the in-memory identity and rewrites the slot. Used when the
    /// logged-in user edits their own profile so the durable copy tracks it.
    pub fn refresh(&mut self, user: &User) {
        self.current = Some(user.clone());
        if let Err(e) = self.persist(user) {
            warn!("failed to refresh persisted identity: {}", e);
        }
    }

    fn persist(&self, user: &User) -> Result<()> {
        let file = File::create(&self.slot_path)?;
        serde_json::to_writer_pretty(file, &StoredIdentity::from_user(user))?;
        debug!("identity persisted to {}", self.slot_path.display());
        Ok(())
    }
}
