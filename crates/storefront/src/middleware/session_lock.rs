//! Per-visitor serialization of mutating requests.
//!
//! A request loads the visitor's session record, changes it and the session
//! layer saves the whole record when the response is produced. Two
//! overlapping mutations for one visitor would each save their own copy and
//! the later save would drop the earlier change. This middleware sits
//! outside the session layer and holds a lock keyed by the session cookie
//! from before the record is loaded until after it is saved.
//!
//! Requests without a session cookie get a fresh session and need no lock.
//! Safe methods (`GET`, `HEAD`, `OPTIONS`) never modify the record.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use axum::{
    extract::{Request, State},
    http::{Method, header::COOKIE},
    middleware::Next,
    response::Response,
};
use tokio::sync::OwnedMutexGuard;
use tower_sessions::cookie::Cookie;

use crate::middleware::session::SESSION_COOKIE_NAME;
use crate::state::AppState;

type LockMap = HashMap<String, Arc<tokio::sync::Mutex<()>>>;

/// Locks for sessions with a mutating request in flight.
///
/// Entries are removed once no request holds or waits for them.
#[derive(Debug, Clone, Default)]
pub struct SessionLocks {
    locks: Arc<Mutex<LockMap>>,
}

impl SessionLocks {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `session_id`.
    pub async fn acquire(&self, session_id: &str) -> SessionLockGuard {
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
            Arc::clone(locks.entry(session_id.to_string()).or_default())
        };

        SessionLockGuard {
            guard: Some(lock.lock_owned().await),
            session_id: session_id.to_string(),
            locks: self.clone(),
        }
    }

    /// Number of sessions currently locked or waited on.
    #[must_use]
    pub fn len(&self) -> usize {
        self.locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Exclusive access to one session; released on drop.
#[derive(Debug)]
pub struct SessionLockGuard {
    guard: Option<OwnedMutexGuard<()>>,
    session_id: String,
    locks: SessionLocks,
}

impl Drop for SessionLockGuard {
    fn drop(&mut self) {
        // Release first so the count below only sees waiters.
        drop(self.guard.take());

        let mut locks = self.locks.locks.lock().unwrap_or_else(PoisonError::into_inner);
        if locks
            .get(&self.session_id)
            .is_some_and(|lock| Arc::strong_count(lock) == 1)
        {
            locks.remove(&self.session_id);
        }
    }
}

/// Run mutating requests for the same session one at a time.
pub async fn session_lock_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    if !mutates(request.method()) {
        return next.run(request).await;
    }

    let Some(session_id) = session_cookie(&request) else {
        return next.run(request).await;
    };

    let _guard = state.session_locks().acquire(&session_id).await;
    next.run(request).await
}

fn mutates(method: &Method) -> bool {
    !matches!(*method, Method::GET | Method::HEAD | Method::OPTIONS)
}

/// Value of the session cookie, if the request carries one.
fn session_cookie(request: &Request) -> Option<String> {
    request
        .headers()
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(Cookie::split_parse)
        .filter_map(Result::ok)
        .find(|cookie| cookie.name() == SESSION_COOKIE_NAME)
        .map(|cookie| cookie.value().to_string())
}
