//! Process-wide session context. The bearer credential lives here and only
//! here; components subscribe for changes instead of reading it ad hoc.

use std::sync::{Arc, RwLock};

use shared::protocol::SessionUser;
use tokio::sync::broadcast;
use tracing::info;

#[derive(Debug, Clone)]
pub enum SessionEvent {
    LoggedIn(SessionUser),
    LoggedOut,
}

#[derive(Debug, Clone)]
struct SessionState {
    token: String,
    user: SessionUser,
}

#[derive(Clone)]
pub struct SessionContext {
    state: Arc<RwLock<Option<SessionState>>>,
    events: broadcast::Sender<SessionEvent>,
}

impl SessionContext {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(16);
        Self {
            state: Arc::new(RwLock::new(None)),
            events,
        }
    }

    pub fn login(&self, token: impl Into<String>, user: SessionUser) {
        {
            let mut state = self.state.write().expect("session lock poisoned");
            *state = Some(SessionState {
                token: token.into(),
                user: user.clone(),
            });
        }
        info!(email = %user.email, "session established");
        let _ = self.events.send(SessionEvent::LoggedIn(user));
    }

    pub fn logout(&self) {
        let had_session = {
            let mut state = self.state.write().expect("session lock poisoned");
            state.take().is_some()
        };
        if had_session {
            info!("session cleared");
            let _ = self.events.send(SessionEvent::LoggedOut);
        }
    }

    pub fn token(&self) -> Option<String> {
        self.state
            .read()
            .expect("session lock poisoned")
            .as_ref()
            .map(|state| state.token.clone())
    }

    pub fn user(&self) -> Option<SessionUser> {
        self.state
            .read()
            .expect("session lock poisoned")
            .as_ref()
            .map(|state| state.user.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.state
            .read()
            .expect("session lock poisoned")
            .is_some()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}
