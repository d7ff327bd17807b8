//! Active-session tracking
//!
//! One entry per currently-authenticated user. Entries are created or
//! refreshed on successful login, refreshed by activity, and removed either
//! by logout or by the idle sweep that runs before each metrics snapshot.

use std::collections::HashMap;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use parking_lot::Mutex;

/// A currently-authenticated user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveSession {
    /// When the session was created, milliseconds since epoch
    pub login_at_ms: u64,
    /// Last observed activity, milliseconds since epoch (last-write-wins)
    pub last_seen_ms: u64,
}

/// Tracks active sessions keyed by user id, with idle expiry.
///
/// The map is small (one entry per signed-in user) and is only locked for
/// map mutations and the sweep; no I/O ever happens under the lock.
#[derive(Debug)]
pub struct SessionTracker {
    idle_threshold_ms: u64,
    sessions: Mutex<HashMap<String, ActiveSession>>,
}

impl SessionTracker {
    /// Create a tracker with the given idle threshold
    pub fn new(idle_threshold: Duration) -> Self {
        Self {
            idle_threshold_ms: idle_threshold.as_millis() as u64,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Insert or refresh a session on successful login.
    ///
    /// A repeated login for the same user id refreshes the existing entry
    /// rather than creating a second one.
    pub fn record_login(&self, user_id: &str) {
        self.record_login_at(user_id, now_millis());
    }

    /// Refresh activity for an existing session.
    ///
    /// No-op if the user has no active session: refreshing is distinct from
    /// the login event that creates one.
    pub fn touch(&self, user_id: &str) {
        self.touch_at(user_id, now_millis());
    }

    /// Remove a session on logout
    pub fn end_session(&self, user_id: &str) {
        self.sessions.lock().remove(user_id);
    }

    /// Remove sessions idle past the threshold and return the count of those
    /// remaining.
    ///
    /// Removal and counting happen in the same scan, so the returned count
    /// never includes a session expired by this sweep.
    pub fn sweep(&self) -> usize {
        self.sweep_at(now_millis())
    }

    /// Number of sessions currently tracked (as of the most recent sweep
    /// plus any logins since)
    pub fn count(&self) -> usize {
        self.sessions.lock().len()
    }

    fn record_login_at(&self, user_id: &str, now_ms: u64) {
        let mut sessions = self.sessions.lock();
        sessions
            .entry(user_id.to_string())
            .and_modify(|session| session.last_seen_ms = now_ms)
            .or_insert(ActiveSession {
                login_at_ms: now_ms,
                last_seen_ms: now_ms,
            });
    }

    fn touch_at(&self, user_id: &str, now_ms: u64) {
        if let Some(session) = self.sessions.lock().get_mut(user_id) {
            session.last_seen_ms = now_ms;
        }
    }

    fn sweep_at(&self, now_ms: u64) -> usize {
        let mut sessions = self.sessions.lock();
        sessions.retain(|_, session| now_ms.saturating_sub(session.last_seen_ms) <= self.idle_threshold_ms);
        sessions.len()
    }
}

/// Milliseconds since the Unix epoch
fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or(0)
}
