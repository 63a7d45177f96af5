use chrono::Utc;
use log::info;
use rand::Rng;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{Instance, InstanceStatus};

const TOKEN_PREFIX: &str = "waCRM_token_";
const TOKEN_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
const TOKEN_LEN: usize = 13;

#[derive(Debug, Error, PartialEq)]
pub enum InstanceError {
    #[error("no instance with id {0}")]
    InstanceNotFound(String),
}

/// Connection records for external WhatsApp channels. Tokens are opaque API
/// credentials generated on demand, separately from instance creation.
pub struct InstanceStore {
    instances: Vec<Instance>,
}

impl InstanceStore {
    pub fn new(instances: Vec<Instance>) -> Self {
        InstanceStore { instances }
    }

    pub fn instances(&self) -> &[Instance] {
        &self.instances
    }

    pub fn active_count(&self) -> usize {
        self.instances
            .iter()
            .filter(|i| i.status == InstanceStatus::Active)
            .count()
    }

    pub fn inactive_count(&self) -> usize {
        self.instances.len() - self.active_count()
    }

    /// Registers a new instance. The API token is generated separately.
    pub fn create(&mut self, admin_id: &str) -> Instance {
        let instance = Instance {
            id: Uuid::new_v4().to_string(),
            admin_id: admin_id.to_string(),
            instance_id: format!("inst_{}", Utc::now().timestamp_millis()),
            token: String::new(),
            created_at: Utc::now(),
            status: InstanceStatus::Active,
        };
        info!("created instance {}", instance.instance_id);
        self.instances.push(instance.clone());
        instance
    }

    /// Replaces the instance's API token with a freshly generated one.
    pub fn generate_token(&mut self, id: &str) -> Result<String, InstanceError> {
        let instance = self
            .instances
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| InstanceError::InstanceNotFound(id.to_string()))?;

        let mut rng = rand::thread_rng();
        let suffix: String = (0..TOKEN_LEN)
            .map(|_| TOKEN_CHARSET[rng.gen_range(0..TOKEN_CHARSET.len())] as char)
            .collect();
        instance.token = format!("{}{}", TOKEN_PREFIX, suffix);
        info!("token regenerated for instance {}", instance.instance_id);
        Ok(instance.token.clone())
    }

    /// Flips an instance between active and inactive.
    pub fn toggle_status(&mut self, id: &str) -> Result<InstanceStatus, InstanceError> {
        let instance = self
            .instances
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| InstanceError::InstanceNotFound(id.to_string()))?;

        instance.status = match instance.status {
            InstanceStatus::Active => InstanceStatus::Inactive,
            InstanceStatus::Inactive => InstanceStatus::Active,
        };
        info!(
            "instance {} now {}",
            instance.instance_id,
            instance.status.label()
        );
        Ok(instance.status)
    }

    pub fn delete(&mut self, id: &str) -> Result<(), InstanceError> {
        let before = self.instances.len();
        self.instances.retain(|i| i.id != id);
        if self.instances.len() == before {
            return Err(InstanceError::InstanceNotFound(id.to_string()));
        }
        info!("deleted instance {}", id);
        Ok(())
    }
}
