//! Server-side session store
//!
//! Maps the opaque id kept in the browser cookie to the Salesforce session
//! obtained at login. Records expire after a period of inactivity.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use uuid::Uuid;

use crate::core::salesforce::SalesforceSession;

/// Cookie carrying the session id
pub const SESSION_COOKIE: &str = "sferd_session";

#[derive(Clone, Debug)]
struct SessionRecord {
    salesforce: SalesforceSession,
    last_seen: DateTime<Utc>,
}

/// Concurrent in-memory session store
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<DashMap<Uuid, SessionRecord>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(DashMap::new()),
            ttl,
        }
    }

    /// Store a Salesforce session and return its new id
    pub fn create(&self, salesforce: SalesforceSession) -> Uuid {
        let id = Uuid::new_v4();
        self.sessions.insert(
            id,
            SessionRecord {
                salesforce,
                last_seen: Utc::now(),
            },
        );
        id
    }

    /// Look up a live session, refreshing its inactivity timer.
    ///
    /// Expired records are removed and reported as missing.
    pub fn get(&self, id: &Uuid) -> Option<SalesforceSession> {
        self.get_at(id, Utc::now())
    }

    fn get_at(&self, id: &Uuid, now: DateTime<Utc>) -> Option<SalesforceSession> {
        {
            let mut record = self.sessions.get_mut(id)?;
            if now - record.last_seen <= self.ttl {
                record.last_seen = now;
                return Some(record.salesforce.clone());
            }
        }

        // Shard guard released above; removing while holding it would deadlock
        tracing::debug!("Session {} expired", id);
        self.sessions.remove(id);
        None
    }

    pub fn remove(&self, id: &Uuid) -> bool {
        self.sessions.remove(id).is_some()
    }

    /// Drop every expired record, returning how many were removed
    pub fn purge_expired(&self) -> usize {
        let now = Utc::now();
        let before = self.sessions.len();
        self.sessions
            .retain(|_, record| now - record.last_seen <= self.ttl);
        before - self.sessions.len()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sf() -> SalesforceSession {
        SalesforceSession {
            instance_url: "https://na1.salesforce.com".to_string(),
            session_id: "00D!token".to_string(),
        }
    }

    #[test]
    fn test_create_and_get() {
        let store = SessionStore::new(Duration::minutes(30));
        let id = store.create(sf());

        assert_eq!(store.get(&id), Some(sf()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_unknown_id() {
        let store = SessionStore::new(Duration::minutes(30));
        assert!(store.get(&Uuid::new_v4()).is_none());
    }

    #[test]
    fn test_expired_session_is_removed() {
        let store = SessionStore::new(Duration::minutes(30));
        let id = store.create(sf());

        let later = Utc::now() + Duration::minutes(31);
        assert!(store.get_at(&id, later).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_access_refreshes_inactivity_timer() {
        let store = SessionStore::new(Duration::minutes(30));
        let id = store.create(sf());

        let t1 = Utc::now() + Duration::minutes(20);
        assert!(store.get_at(&id, t1).is_some());
        let t2 = t1 + Duration::minutes(20);
        assert!(store.get_at(&id, t2).is_some());
    }

    #[test]
    fn test_remove() {
        let store = SessionStore::new(Duration::minutes(30));
        let id = store.create(sf());
        assert!(store.remove(&id));
        assert!(!store.remove(&id));
        assert!(store.get(&id).is_none());
    }

    #[test]
    fn test_purge_expired_keeps_live_sessions() {
        let store = SessionStore::new(Duration::minutes(30));
        store.create(sf());
        assert_eq!(store.purge_expired(), 0);

        let zero_ttl = SessionStore::new(Duration::milliseconds(-1));
        zero_ttl.create(sf());
        assert_eq!(zero_ttl.purge_expired(), 1);
    }
}
