//! Registered users and the daily confirmation-email sweep.
//!
//! Fully independent from the catalog pipeline: the sweep only reads
//! the users table and talks to the mail relay.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use log::{error, info};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::errors::Result;

/// Users registered within this window who have not activated their
/// account get their confirmation email re-sent.
pub const CONFIRMATION_RESEND_WINDOW_HOURS: i64 = 60;

/// A registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub is_activated: bool,
    pub created_at: DateTime<Utc>,
}

#[async_trait]
pub trait UserRepositoryTrait: Send + Sync {
    /// Users created after `created_after` that are not yet activated.
    async fn find_pending_confirmation(&self, created_after: DateTime<Utc>) -> Result<Vec<User>>;
}

/// Outbound confirmation mail. The daemon wires a concrete sender.
#[async_trait]
pub trait ConfirmationMailer: Send + Sync {
    async fn send_confirmation(&self, user: &User) -> Result<()>;
}

/// Daily sweep re-sending activation emails to recently registered,
/// unconfirmed users. Per-user failures are logged and never abort the
/// sweep.
pub struct ConfirmationSweep {
    users: Arc<dyn UserRepositoryTrait>,
    mailer: Arc<dyn ConfirmationMailer>,
}

impl ConfirmationSweep {
    pub fn new(users: Arc<dyn UserRepositoryTrait>, mailer: Arc<dyn ConfirmationMailer>) -> Self {
        Self { users, mailer }
    }

    /// Returns the number of emails sent.
    pub async fn run(&self) -> Result<usize> {
        let created_after = Utc::now() - Duration::hours(CONFIRMATION_RESEND_WINDOW_HOURS);
        let pending = self.users.find_pending_confirmation(created_after).await?;

        let mut sent = 0;
        for user in &pending {
            match self.mailer.send_confirmation(user).await {
                Ok(()) => sent += 1,
                Err(e) => error!("failed to re-send confirmation to {}: {e}", user.email),
            }
        }

        info!(
            "confirmation sweep: {} pending, {} emails sent",
            pending.len(),
            sent
        );
        Ok(sent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Error;
    use std::sync::Mutex;

    struct FakeUsers {
        users: Vec<User>,
    }

    #[async_trait]
    impl UserRepositoryTrait for FakeUsers {
        async fn find_pending_confirmation(
            &self,
            created_after: DateTime<Utc>,
        ) -> Result<Vec<User>> {
            Ok(self
                .users
                .iter()
                .filter(|u| !u.is_activated && u.created_at > created_after)
                .cloned()
                .collect())
        }
    }

    struct FakeMailer {
        sent_to: Mutex<Vec<String>>,
        fail_for: Option<String>,
    }

    #[async_trait]
    impl ConfirmationMailer for FakeMailer {
        async fn send_confirmation(&self, user: &User) -> Result<()> {
            if self.fail_for.as_deref() == Some(user.email.as_str()) {
                return Err(Error::Mail("relay refused".to_string()));
            }
            self.sent_to.lock().unwrap().push(user.email.clone());
            Ok(())
        }
    }

    fn user(id: i32, email: &str, activated: bool, hours_ago: i64) -> User {
        User {
            id,
            name: format!("user-{id}"),
            email: email.to_string(),
            is_activated: activated,
            created_at: Utc::now() - Duration::hours(hours_ago),
        }
    }

    #[tokio::test]
    async fn only_recent_unactivated_users_get_mail() {
        let users = Arc::new(FakeUsers {
            users: vec![
                user(1, "new@example.com", false, 2),
                user(2, "confirmed@example.com", true, 2),
                user(3, "stale@example.com", false, 90),
            ],
        });
        let mailer = Arc::new(FakeMailer {
            sent_to: Mutex::new(Vec::new()),
            fail_for: None,
        });

        let sent = ConfirmationSweep::new(users, mailer.clone()).run().await.unwrap();

        assert_eq!(sent, 1);
        assert_eq!(*mailer.sent_to.lock().unwrap(), vec!["new@example.com"]);
    }

    #[tokio::test]
    async fn one_failed_send_does_not_abort_the_sweep() {
        let users = Arc::new(FakeUsers {
            users: vec![
                user(1, "a@example.com", false, 1),
                user(2, "b@example.com", false, 1),
                user(3, "c@example.com", false, 1),
            ],
        });
        let mailer = Arc::new(FakeMailer {
            sent_to: Mutex::new(Vec::new()),
            fail_for: Some("b@example.com".to_string()),
        });

        let sent = ConfirmationSweep::new(users, mailer.clone()).run().await.unwrap();

        assert_eq!(sent, 2);
        assert_eq!(
            *mailer.sent_to.lock().unwrap(),
            vec!["a@example.com", "c@example.com"]
        );
    }
}
