//! Allow-list auth middleware.
//!
//! Unauthorized users get a fixed reply and the chain stops before any remote
//! call is made on their behalf.

use async_trait::async_trait;
use gptbot_core::{Bot, Message, Middleware, Result};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Reply sent to users outside the allow-list.
pub const DISALLOWED_MESSAGE: &str = "Sorry, you are not allowed to use this bot.";

/// Allow-list: `*` admits everyone, otherwise a comma-separated id list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowedUsers {
    All,
    Ids(Vec<i64>),
}

impl AllowedUsers {
    /// Parses the configured value. Entries that are not valid ids are
    /// ignored.
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value == "*" {
            return AllowedUsers::All;
        }
        AllowedUsers::Ids(
            value
                .split(',')
                .filter_map(|part| part.trim().parse().ok())
                .collect(),
        )
    }

    pub fn is_allowed(&self, user_id: i64) -> bool {
        match self {
            AllowedUsers::All => true,
            AllowedUsers::Ids(ids) => ids.contains(&user_id),
        }
    }
}

/// Stops the chain with a fixed reply when the sender is not allow-listed.
pub struct AuthMiddleware {
    allowed: AllowedUsers,
    bot: Arc<dyn Bot>,
}

impl AuthMiddleware {
    pub fn new(allowed: AllowedUsers, bot: Arc<dyn Bot>) -> Self {
        Self { allowed, bot }
    }
}

#[async_trait]
impl Middleware for AuthMiddleware {
    #[instrument(skip(self, message))]
    async fn before(&self, message: &Message) -> Result<bool> {
        let user_id = message.user.id;
        if self.allowed.is_allowed(user_id) {
            info!(user_id, "step: user authorized");
            return Ok(true);
        }

        warn!(user_id, "Unauthorized access attempt");
        self.bot.reply_to(message, DISALLOWED_MESSAGE).await?;
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wildcard_allows_everyone() {
        let allowed = AllowedUsers::parse("*");
        assert!(allowed.is_allowed(1));
        assert!(allowed.is_allowed(-42));
    }

    #[test]
    fn test_id_list() {
        let allowed = AllowedUsers::parse("10, 20,30");
        assert!(allowed.is_allowed(10));
        assert!(allowed.is_allowed(20));
        assert!(allowed.is_allowed(30));
        assert!(!allowed.is_allowed(40));
    }

    #[test]
    fn test_invalid_entries_ignored() {
        let allowed = AllowedUsers::parse("10,abc,");
        assert_eq!(allowed, AllowedUsers::Ids(vec![10]));
    }

    #[test]
    fn test_empty_list_allows_nobody() {
        let allowed = AllowedUsers::parse("");
        assert!(!allowed.is_allowed(0));
    }
}
