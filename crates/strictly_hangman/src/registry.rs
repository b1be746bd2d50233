//! Table of active sessions shared between concurrent requests.

use crate::types::Session;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, info, instrument, warn};

/// Unique identifier for a game session.
pub type SessionId = String;

/// Generates a fresh random session id.
pub fn new_session_id() -> SessionId {
    uuid::Uuid::new_v4().to_string()
}

/// Registry operation that could not be carried out.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum RegistryError {
    /// A session already exists under this id.
    #[display("Session {} already exists", _0)]
    Duplicate(SessionId),
    /// No session exists under this id.
    #[display("Session {} not found", _0)]
    NotFound(SessionId),
}

impl std::error::Error for RegistryError {}

type SharedSession = Arc<Mutex<Session>>;

/// Manages all active sessions.
///
/// The table itself sits behind one mutex, held only long enough to look up,
/// insert or remove an entry. Each session has its own mutex, so guesses on
/// different sessions run in parallel while two guesses on the same session
/// are applied one after the other.
#[derive(Debug, Clone, Default)]
pub struct SessionRegistry {
    sessions: Arc<Mutex<HashMap<SessionId, SharedSession>>>,
}

impl SessionRegistry {
    /// Creates an empty registry.
    #[instrument]
    pub fn new() -> Self {
        info!("Creating session registry");
        Self::default()
    }

    fn table(&self) -> std::sync::MutexGuard<'_, HashMap<SessionId, SharedSession>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn entry(&self, id: &str) -> Option<SharedSession> {
        self.table().get(id).cloned()
    }

    /// Adds a session under `id`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Duplicate`] if the id is taken.
    #[instrument(skip(self, session), fields(player = %session.player_name()))]
    pub fn create(&self, id: SessionId, session: Session) -> Result<(), RegistryError> {
        let mut sessions = self.table();
        if sessions.contains_key(&id) {
            warn!(session_id = %id, "Session already exists");
            return Err(RegistryError::Duplicate(id));
        }
        sessions.insert(id.clone(), Arc::new(Mutex::new(session)));
        info!(session_id = %id, active = sessions.len(), "Created new session");
        Ok(())
    }

    /// Returns a copy of the session's current state.
    #[instrument(skip(self))]
    pub fn get(&self, id: &str) -> Option<Session> {
        let Some(entry) = self.entry(id) else {
            debug!(session_id = id, "Session not found");
            return None;
        };
        let session = entry.lock().unwrap_or_else(PoisonError::into_inner).clone();
        Some(session)
    }

    /// Replaces the session stored under `id`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] if no session has that id.
    #[instrument(skip(self, session))]
    pub fn update(&self, id: &str, session: Session) -> Result<(), RegistryError> {
        let entry = self
            .entry(id)
            .ok_or_else(|| RegistryError::NotFound(id.to_string()))?;
        *entry.lock().unwrap_or_else(PoisonError::into_inner) = session;
        debug!(session_id = id, "Session updated");
        Ok(())
    }

    /// Removes the session, returning its last state.
    #[instrument(skip(self))]
    pub fn delete(&self, id: &str) -> Option<Session> {
        let entry = self.table().remove(id)?;
        info!(session_id = id, "Session removed");
        let session = entry.lock().unwrap_or_else(PoisonError::into_inner).clone();
        Some(session)
    }

    /// Runs `f` on the session while holding that session's lock.
    ///
    /// The table lock is released before `f` runs. Returns `None` if no
    /// session has that id.
    #[instrument(skip(self, f))]
    pub fn with_session<R>(&self, id: &str, f: impl FnOnce(&mut Session) -> R) -> Option<R> {
        let entry = self.entry(id)?;
        let mut session = entry.lock().unwrap_or_else(PoisonError::into_inner);
        Some(f(&mut *session))
    }

    /// Lists all active session ids.
    #[instrument(skip(self))]
    pub fn ids(&self) -> Vec<SessionId> {
        let ids: Vec<_> = self.table().keys().cloned().collect();
        debug!(count = ids.len(), "Listed sessions");
        ids
    }

    /// Number of active sessions.
    pub fn len(&self) -> usize {
        self.table().len()
    }

    /// Returns true if no session is active.
    pub fn is_empty(&self) -> bool {
        self.table().is_empty()
    }
}
