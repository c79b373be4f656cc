//! Session storage for logged-in users.
//!
//! A session is created at login, carried by the client as an opaque id, and
//! resolved on every request by the authentication middleware. The store is
//! abstracted behind [`SessionStore`] so the in-memory implementation can be
//! swapped for an external one without touching the middleware or handlers.
//!
//! Expiry is idle-based: every successful resolve pushes the session's
//! deadline forward, and expired entries are dropped lazily on access.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};
use std::time::Duration;

use chrono::{DateTime, Utc};
use futures::future::BoxFuture;
use uuid::Uuid;

use crate::domain::User;

// =============================================================================
// SessionId
// =============================================================================

/// Opaque identifier handed to the client after login.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Generates a fresh random session id.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parses a session id from its cookie representation.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        Uuid::parse_str(value).ok().map(Self)
    }

    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

// =============================================================================
// SessionRecord
// =============================================================================

#[derive(Debug, Clone)]
struct SessionRecord {
    user: User,
    last_seen: DateTime<Utc>,
}

impl SessionRecord {
    fn is_expired(&self, ttl: Duration, now: DateTime<Utc>) -> bool {
        let idle_seconds = now.signed_duration_since(self.last_seen).num_seconds();
        idle_seconds >= i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX)
    }
}

// =============================================================================
// SessionStore
// =============================================================================

/// Storage for active sessions.
///
/// Implementations must be thread-safe; the store is shared between the
/// authentication middleware and the login/logout handlers.
pub trait SessionStore: Send + Sync {
    /// Creates a session for a freshly authenticated user.
    fn insert(&self, user: User) -> BoxFuture<'_, SessionId>;

    /// Returns the session's user, or `None` for unknown or expired ids.
    fn resolve(&self, id: SessionId) -> BoxFuture<'_, Option<User>>;

    /// Replaces the stored user, used after a profile edit. Unknown ids are
    /// ignored.
    fn refresh(&self, id: SessionId, user: User) -> BoxFuture<'_, ()>;

    /// Removes the session. Removing an unknown id is a no-op.
    fn invalidate(&self, id: SessionId) -> BoxFuture<'_, ()>;
}

// =============================================================================
// InMemorySessionStore
// =============================================================================

/// Process-local session store.
///
/// Sessions do not survive a restart. A multi-instance deployment would swap
/// in an external store through [`SessionStore`].
pub struct InMemorySessionStore {
    ttl: Duration,
    sessions: RwLock<HashMap<Uuid, SessionRecord>>,
}

impl InMemorySessionStore {
    /// Creates a store whose sessions expire after `ttl` of inactivity.
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            sessions: RwLock::new(HashMap::new()),
        }
    }
}

impl SessionStore for InMemorySessionStore {
    fn insert(&self, user: User) -> BoxFuture<'_, SessionId> {
        Box::pin(async move {
            let id = SessionId::generate();
            let record = SessionRecord {
                user,
                last_seen: Utc::now(),
            };
            self.sessions
                .write()
                .unwrap_or_else(PoisonError::into_inner)
                .insert(*id.as_uuid(), record);
            id
        })
    }

    fn resolve(&self, id: SessionId) -> BoxFuture<'_, Option<User>> {
        Box::pin(async move {
            let now = Utc::now();
            let mut sessions = self
                .sessions
                .write()
                .unwrap_or_else(PoisonError::into_inner);

            let expired = sessions
                .get(id.as_uuid())
                .is_some_and(|record| record.is_expired(self.ttl, now));
            if expired {
                sessions.remove(id.as_uuid());
                return None;
            }

            sessions.get_mut(id.as_uuid()).map(|record| {
                record.last_seen = now;
                record.user.clone()
            })
        })
    }

    fn refresh(&self, id: SessionId, user: User) -> BoxFuture<'_, ()> {
        Box::pin(async move {
            let mut sessions = self
                .sessions
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            if let Some(record) = sessions.get_mut(id.as_uuid()) {
                record.user = user;
                record.last_seen = Utc::now();
            }
        })
    }

    fn invalidate(&self, id: SessionId) -> BoxFuture<'_, ()> {
        Box::pin(async move {
            self.sessions
                .write()
                .unwrap_or_else(PoisonError::into_inner)
                .remove(id.as_uuid());
        })
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn create_test_user() -> User {
        User::new(
            "Margaret".to_string(),
            "margaret".to_string(),
            "secret".to_string(),
            None,
        )
    }

    fn create_test_store() -> InMemorySessionStore {
        InMemorySessionStore::new(Duration::from_secs(3600))
    }

    mod session_id {
        use super::*;

        #[rstest]
        fn generate_creates_unique_ids() {
            assert_ne!(SessionId::generate(), SessionId::generate());
        }

        #[rstest]
        fn display_and_parse_roundtrip() {
            let id = SessionId::generate();
            let parsed = SessionId::parse(&id.to_string());

            assert_eq!(parsed, Some(id));
        }

        #[rstest]
        #[case("")]
        #[case("not-a-uuid")]
        #[case("1234")]
        fn parse_rejects_garbage(#[case] value: &str) {
            assert!(SessionId::parse(value).is_none());
        }
    }

    mod store {
        use super::*;

        #[rstest]
        #[tokio::test]
        async fn insert_then_resolve_returns_user() {
            let store = create_test_store();

            let id = store.insert(create_test_user()).await;
            let resolved = store.resolve(id).await;

            assert_eq!(resolved.map(|user| user.login), Some("margaret".to_string()));
        }

        #[rstest]
        #[tokio::test]
        async fn resolve_unknown_returns_none() {
            let store = create_test_store();

            assert!(store.resolve(SessionId::generate()).await.is_none());
        }

        #[rstest]
        #[tokio::test]
        async fn invalidate_removes_session() {
            let store = create_test_store();
            let id = store.insert(create_test_user()).await;

            store.invalidate(id).await;

            assert!(store.resolve(id).await.is_none());
        }

        #[rstest]
        #[tokio::test]
        async fn invalidate_unknown_is_noop() {
            let store = create_test_store();

            store.invalidate(SessionId::generate()).await;
        }

        #[rstest]
        #[tokio::test]
        async fn zero_ttl_expires_immediately() {
            let store = InMemorySessionStore::new(Duration::ZERO);
            let id = store.insert(create_test_user()).await;

            assert!(store.resolve(id).await.is_none());
        }

        #[rstest]
        #[tokio::test]
        async fn expired_session_is_removed_not_just_hidden() {
            let store = InMemorySessionStore::new(Duration::ZERO);
            let id = store.insert(create_test_user()).await;

            store.resolve(id).await;

            let sessions = store
                .sessions
                .read()
                .unwrap_or_else(PoisonError::into_inner);
            assert!(sessions.is_empty());
        }

        #[rstest]
        #[tokio::test]
        async fn refresh_replaces_stored_user() {
            let store = create_test_store();
            let id = store.insert(create_test_user()).await;

            let mut updated = create_test_user();
            updated.name = "Margaret Hamilton".to_string();
            store.refresh(id, updated).await;

            let resolved = store.resolve(id).await;
            assert_eq!(
                resolved.map(|user| user.name),
                Some("Margaret Hamilton".to_string())
            );
        }

        #[rstest]
        #[tokio::test]
        async fn refresh_unknown_is_noop() {
            let store = create_test_store();

            store.refresh(SessionId::generate(), create_test_user()).await;
        }

        #[rstest]
        #[tokio::test]
        async fn sessions_are_isolated() {
            let store = create_test_store();
            let first = store.insert(create_test_user()).await;

            let mut other = create_test_user();
            other.login = "grace".to_string();
            let second = store.insert(other).await;

            assert_eq!(
                store.resolve(first).await.map(|user| user.login),
                Some("margaret".to_string())
            );
            assert_eq!(
                store.resolve(second).await.map(|user| user.login),
                Some("grace".to_string())
            );
        }
    }
}
