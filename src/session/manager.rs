use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use uuid::Uuid;

use super::error::SessionError;
use crate::lifecycle::{CycleOutcome, LifeCycle};
use crate::protocol::RequestParams;
use crate::widget::{Display, TreeError};

/// Builds the initial UI of a new session.
pub type EntryPoint = Arc<dyn Fn(&mut Display) -> Result<(), TreeError> + Send + Sync>;

struct Session {
    display: Mutex<Display>,
}

/// Session table plus the shared life-cycle.
pub struct SessionManager {
    lifecycle: LifeCycle,
    entry_point: EntryPoint,
    max_sessions: usize,
    sessions: Mutex<HashMap<String, Arc<Session>>>,
}

impl SessionManager {
    pub fn new<F>(lifecycle: LifeCycle, max_sessions: usize, entry_point: F) -> Self
    where
        F: Fn(&mut Display) -> Result<(), TreeError> + Send + Sync + 'static,
    {
        Self {
            lifecycle,
            entry_point: Arc::new(entry_point),
            max_sessions,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Start a session: build its UI and run the first cycle.
    ///
    /// Returns the session id, which is also the display id.
    pub fn start(&self) -> Result<(String, CycleOutcome), SessionError> {
        let id = Uuid::new_v4().to_string();
        let mut display = Display::new(id.clone());
        (self.entry_point)(&mut display)?;
        let session = Arc::new(Session {
            display: Mutex::new(display),
        });

        {
            let mut sessions = self.sessions.lock();
            if sessions.len() >= self.max_sessions {
                tracing::warn!(max = self.max_sessions, "Session limit reached");
                return Err(SessionError::LimitReached {
                    max: self.max_sessions,
                });
            }
            sessions.insert(id.clone(), Arc::clone(&session));
        }

        let outcome = {
            let mut display = session.display.lock();
            self.lifecycle.execute(&mut display, &RequestParams::new())
        };
        match outcome {
            Ok(outcome) => {
                tracing::info!(session = %id, "Session started");
                Ok((id, outcome))
            }
            Err(err) => {
                self.sessions.lock().remove(&id);
                tracing::error!(session = %id, error = %err, "Initial cycle failed");
                Err(err.into())
            }
        }
    }

    /// Run one cycle for session `id`.
    pub fn cycle(&self, id: &str, params: &RequestParams) -> Result<CycleOutcome, SessionError> {
        let session = self
            .sessions
            .lock()
            .get(id)
            .cloned()
            .ok_or_else(|| SessionError::NotFound(id.to_string()))?;

        let mut display = session.display.lock();
        let outcome = self.lifecycle.execute(&mut display, params)?;
        if !outcome.report.is_clean() {
            tracing::warn!(
                session = %id,
                decoding_errors = outcome.report.decoding_errors.len(),
                unknown_variants = outcome.report.unknown_variants.len(),
                listener_failures = outcome.report.listener_failures.len(),
                "Cycle completed with isolated failures"
            );
        }
        Ok(outcome)
    }

    pub fn end(&self, id: &str) -> Result<(), SessionError> {
        match self.sessions.lock().remove(id) {
            Some(_) => {
                tracing::info!(session = %id, "Session ended");
                Ok(())
            }
            None => Err(SessionError::NotFound(id.to_string())),
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.sessions.lock().contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.sessions.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionManager")
            .field("sessions", &self.len())
            .field("max_sessions", &self.max_sessions)
            .finish()
    }
}
