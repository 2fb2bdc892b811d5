//! # Sessions
//!
//! A session holds the alerts handed to it at start and its own dismissed
//! flag. The flag starts cleared and is never shared between sessions.
//! Dismissing hides the banner for the rest of the session; the alerts
//! themselves are kept so the message can still be sent.

use std::collections::HashMap;

use parking_lot::RwLock;
use serde::Serialize;
use uuid::Uuid;

use docket_core::CalendarDate;

use crate::error::NotifyError;
use crate::scanner::Alert;

/// One user session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    id: Uuid,
    started_on: CalendarDate,
    alerts: Vec<Alert>,
    dismissed: bool,
}

impl Session {
    /// A fresh, undismissed session holding `alerts`.
    pub fn new(started_on: CalendarDate, alerts: Vec<Alert>) -> Self {
        Self {
            id: Uuid::new_v4(),
            started_on,
            alerts,
            dismissed: false,
        }
    }

    /// Session identifier.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Day the session started.
    pub fn started_on(&self) -> CalendarDate {
        self.started_on
    }

    /// Alerts collected when the session started.
    pub fn alerts(&self) -> &[Alert] {
        &self.alerts
    }

    /// Whether the session has dismissed the banner.
    pub fn is_dismissed(&self) -> bool {
        self.dismissed
    }

    /// Whether the banner should be shown.
    pub fn banner_visible(&self) -> bool {
        !self.alerts.is_empty() && !self.dismissed
    }

    /// Hide the banner for the rest of the session.
    pub fn dismiss(&mut self) {
        self.dismissed = true;
    }

    /// Snapshot of the banner for display.
    pub fn banner(&self) -> Banner {
        Banner {
            session_id: self.id,
            visible: self.banner_visible(),
            dismissed: self.dismissed,
            count: self.alerts.len(),
            alerts: self.alerts.clone(),
        }
    }
}

/// Banner state of one session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Banner {
    /// Session the banner belongs to.
    pub session_id: Uuid,
    /// Whether the banner is shown.
    pub visible: bool,
    /// Whether the session dismissed it.
    pub dismissed: bool,
    /// Number of alerts.
    pub count: usize,
    /// The alerts.
    pub alerts: Vec<Alert>,
}

/// Live sessions keyed by identifier.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: RwLock<HashMap<Uuid, Session>>,
}

impl SessionRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a session and return its banner. Sessions started on an
    /// earlier day than the new one are dropped.
    pub fn insert(&self, session: Session) -> Banner {
        let banner = session.banner();
        let mut sessions = self.sessions.write();
        let before = sessions.len();
        sessions.retain(|_, s| s.started_on >= session.started_on);
        let evicted = before - sessions.len();
        if evicted > 0 {
            tracing::debug!(evicted, day = %session.started_on, "dropped sessions of earlier days");
        }
        sessions.insert(session.id, session);
        banner
    }

    /// A copy of the session.
    pub fn get(&self, id: Uuid) -> Result<Session, NotifyError> {
        self.sessions
            .read()
            .get(&id)
            .cloned()
            .ok_or(NotifyError::UnknownSession(id))
    }

    /// Dismiss the banner of one session and return its new state.
    pub fn dismiss(&self, id: Uuid) -> Result<Banner, NotifyError> {
        let mut sessions = self.sessions.write();
        let session = sessions.get_mut(&id).ok_or(NotifyError::UnknownSession(id))?;
        session.dismiss();
        Ok(session.banner())
    }

    /// Number of live sessions.
    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    /// Whether no session is live.
    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }
}
