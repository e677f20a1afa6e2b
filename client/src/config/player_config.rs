use common::config::Validate;
use common::UserIdentity;
use serde::{Deserialize, Serialize};

const MAX_USERNAME_LENGTH: usize = 32;

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct PlayerConfig {
    pub id: String,
    pub username: Option<String>,
}

impl PlayerConfig {
    pub fn to_identity(&self) -> UserIdentity {
        UserIdentity::new(self.id.clone(), self.username.clone())
    }
}

impl Validate for PlayerConfig {
    fn validate(&self) -> Result<(), String> {
        if self.id.trim().is_empty() {
            return Err("player.id must not be empty".to_string());
        }
        if let Some(username) = &self.username {
            if username.trim().is_empty() {
                return Err("player.username must not be blank".to_string());
            }
            if username.chars().count() > MAX_USERNAME_LENGTH {
                return Err(format!(
                    "player.username must not exceed {} characters",
                    MAX_USERNAME_LENGTH
                ));
            }
        }
        Ok(())
    }
}
