//! Flash notifications.
//!
//! Handlers queue notifications in the session; the next rendered page takes
//! them and shows each one once as a toast.

use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::models::session_keys;

/// How a notification is styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationLevel {
    Success,
    Info,
    Error,
}

impl NotificationLevel {
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Success => "toast toast-success",
            Self::Info => "toast toast-info",
            Self::Error => "toast toast-error",
        }
    }
}

/// A user-visible notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub title: String,
    pub description: String,
}

impl Notification {
    #[must_use]
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Success, title, description)
    }

    #[must_use]
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Info, title, description)
    }

    #[must_use]
    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Error, title, description)
    }

    fn new(
        level: NotificationLevel,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            level,
            title: title.into(),
            description: description.into(),
        }
    }

    #[must_use]
    pub const fn css_class(&self) -> &'static str {
        self.level.css_class()
    }
}

/// Queue a notification for the next rendered page.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn push(
    session: &Session,
    notification: Notification,
) -> Result<(), tower_sessions::session::Error> {
    let mut queued: Vec<Notification> = session
        .get(session_keys::NOTIFICATIONS)
        .await?
        .unwrap_or_default();
    queued.push(notification);
    session.insert(session_keys::NOTIFICATIONS, queued).await
}

/// Queue a notification, logging instead of failing.
pub async fn push_or_log(session: &Session, notification: Notification) {
    if let Err(e) = push(session, notification).await {
        tracing::warn!(error = %e, "Failed to queue notification");
    }
}

/// Take every queued notification, oldest first.
///
/// Session errors are logged and yield no notifications.
pub async fn take(session: &Session) -> Vec<Notification> {
    match session
        .remove::<Vec<Notification>>(session_keys::NOTIFICATIONS)
        .await
    {
        Ok(queued) => queued.unwrap_or_default(),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read notifications from session");
            Vec::new()
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use tower_sessions::MemoryStore;

    use super::*;

    fn session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    #[tokio::test]
    async fn test_notifications_shown_once_in_order() {
        let session = session();
        push(&session, Notification::success("Added to cart", "Aam Ka Achar"))
            .await
            .unwrap();
        push(&session, Notification::error("Oops", "try again"))
            .await
            .unwrap();

        let taken = take(&session).await;
        assert_eq!(taken.len(), 2);
        assert_eq!(taken[0].title, "Added to cart");
        assert_eq!(taken[1].level, NotificationLevel::Error);

        assert!(take(&session).await.is_empty());
    }
}
