use chrono::Utc;
use log::info;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{Role, User};

/// Secret assigned to new team members when none is entered.
const DEFAULT_SECRET: &str = "sales123";

#[derive(Debug, Error, PartialEq)]
pub enum DirectoryError {
    #[error("no user with id {0}")]
    UserNotFound(String),
    #[error("current secret does not match")]
    SecretMismatch,
    #[error("new secret must not be empty")]
    EmptySecret,
}

/// The known-users collection: the login lookup source and the backing
/// store for the sales-team management and profile screens.
pub struct Directory {
    users: Vec<User>,
}

impl Directory {
    pub fn new(users: Vec<User>) -> Self {
        Directory { users }
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn sales_users(&self) -> Vec<&User> {
        self.users.iter().filter(|u| u.role == Role::Sales).collect()
    }

    pub fn find(&self, user_id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == user_id)
    }

    /// Adds a team member. A blank secret falls back to the default one.
    pub fn create_user(&mut self, name: &str, email: &str, role: Role, secret: &str) -> User {
        let user = User {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            role,
            email: email.to_string(),
            secret: if secret.is_empty() {
                DEFAULT_SECRET.to_string()
            } else {
                secret.to_string()
            },
            created_at: Utc::now(),
        };
        info!("created user {} ({})", user.email, user.role.label());
        self.users.push(user.clone());
        user
    }

    /// Edits a team member's record. The secret is only replaced when a new
    /// one is supplied.
    pub fn update_user(
        &mut self,
        user_id: &str,
        name: &str,
        email: &str,
        role: Role,
        secret: Option<&str>,
    ) -> Result<(), DirectoryError> {
        let user = self
            .users
            .iter_mut()
            .find(|u| u.id == user_id)
            .ok_or_else(|| DirectoryError::UserNotFound(user_id.to_string()))?;

        user.name = name.to_string();
        user.email = email.to_string();
        user.role = role;
        if let Some(secret) = secret.filter(|s| !s.is_empty()) {
            user.secret = secret.to_string();
        }
        info!("updated user {}", user_id);
        Ok(())
    }

    pub fn delete_user(&mut self, user_id: &str) -> Result<(), DirectoryError> {
        let before = self.users.len();
        self.users.retain(|u| u.id != user_id);
        if self.users.len() == before {
            return Err(DirectoryError::UserNotFound(user_id.to_string()));
        }
        info!("deleted user {}", user_id);
        Ok(())
    }

    /// Profile edit: display name and email only.
    pub fn update_profile(
        &mut self,
        user_id: &str,
        name: &str,
        email: &str,
    ) -> Result<&User, DirectoryError> {
        let user = self
            .users
            .iter_mut()
            .find(|u| u.id == user_id)
            .ok_or_else(|| DirectoryError::UserNotFound(user_id.to_string()))?;

        user.name = name.to_string();
        user.email = email.to_string();
        info!("profile updated for {}", user_id);
        Ok(user)
    }

    /// Credential change: the current secret must match and the new one must
    /// be non-empty.
    pub fn change_secret(
        &mut self,
        user_id: &str,
        current: &str,
        new_secret: &str,
    ) -> Result<&User, DirectoryError> {
        let user = self
            .users
            .iter_mut()
            .find(|u| u.id == user_id)
            .ok_or_else(|| DirectoryError::UserNotFound(user_id.to_string()))?;

        if user.secret != current {
            return Err(DirectoryError::SecretMismatch);
        }
        if new_secret.is_empty() {
            return Err(DirectoryError::EmptySecret);
        }
        user.secret = new_secret.to_string();
        info!("secret changed for {}", user_id);
        Ok(user)
    }
}
