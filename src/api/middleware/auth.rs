//! Session-based authorization filter.
//!
//! Every request passes through [`AuthLayer`]. A request carrying a valid
//! session cookie is forwarded with the logged-in user attached as a request
//! extension; anything else is forwarded only when it targets one of the
//! public paths and is otherwise redirected to the login page.

use std::sync::Arc;
use std::task::{Context, Poll};

use axum::extract::{FromRequestParts, OptionalFromRequestParts, Request};
use axum::http::request::Parts;
use axum::http::{HeaderMap, header};
use axum::response::{IntoResponse, Redirect, Response};
use futures::future::BoxFuture;
use tower::{Layer, Service};

use crate::domain::User;
use crate::infrastructure::{SessionId, SessionStore};

/// Name of the session cookie issued on login.
pub const SESSION_COOKIE: &str = "TODO_SESSION";

/// Paths reachable without a session, matched exactly.
const PUBLIC_PATHS: [&str; 3] = ["/", "/login", "/registration"];

// =============================================================================
// SessionUser
// =============================================================================

/// The logged-in user attached to a request by [`AuthLayer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUser(User);

impl SessionUser {
    #[must_use]
    pub const fn new(user: User) -> Self {
        Self(user)
    }

    #[must_use]
    pub const fn user(&self) -> &User {
        &self.0
    }

    #[must_use]
    pub fn into_user(self) -> User {
        self.0
    }
}

impl<State> FromRequestParts<State> for SessionUser
where
    State: Send + Sync,
{
    type Rejection = Redirect;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &State,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Self>()
            .cloned()
            .ok_or_else(|| Redirect::to("/login"))
    }
}

impl<State> OptionalFromRequestParts<State> for SessionUser
where
    State: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &State,
    ) -> Result<Option<Self>, Self::Rejection> {
        Ok(parts.extensions.get::<Self>().cloned())
    }
}

impl<State> FromRequestParts<State> for SessionId
where
    State: Send + Sync,
{
    type Rejection = Redirect;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &State,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Self>()
            .copied()
            .ok_or_else(|| Redirect::to("/login"))
    }
}

// =============================================================================
// Cookie handling
// =============================================================================

/// `Set-Cookie` value establishing a session.
#[must_use]
pub fn session_cookie(session_id: SessionId) -> String {
    format!("{SESSION_COOKIE}={session_id}; Path=/; HttpOnly; SameSite=Lax")
}

/// `Set-Cookie` value clearing the session cookie on logout.
#[must_use]
pub fn expired_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

fn session_id_from_headers(headers: &HeaderMap) -> Option<SessionId> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .and_then(|(_, value)| SessionId::parse(value))
}

fn is_public_path(path: &str) -> bool {
    PUBLIC_PATHS.contains(&path)
}

// =============================================================================
// AuthLayer
// =============================================================================

#[derive(Clone)]
pub struct AuthLayer {
    sessions: Arc<dyn SessionStore>,
}

impl AuthLayer {
    #[must_use]
    pub fn new(sessions: Arc<dyn SessionStore>) -> Self {
        Self { sessions }
    }
}

impl<Service> Layer<Service> for AuthLayer {
    type Service = AuthService<Service>;

    fn layer(&self, inner: Service) -> Self::Service {
        AuthService {
            inner,
            sessions: Arc::clone(&self.sessions),
        }
    }
}

// =============================================================================
// AuthService
// =============================================================================

#[derive(Clone)]
pub struct AuthService<Service> {
    inner: Service,
    sessions: Arc<dyn SessionStore>,
}

impl<InnerService> Service<Request> for AuthService<InnerService>
where
    InnerService: Service<Request, Response = Response> + Clone + Send + 'static,
    InnerService::Future: Send,
{
    type Response = Response;
    type Error = InnerService::Error;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, context: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(context)
    }

    fn call(&mut self, mut request: Request) -> Self::Future {
        let sessions = Arc::clone(&self.sessions);
        let mut inner = self.inner.clone();

        Box::pin(async move {
            if let Some(session_id) = session_id_from_headers(request.headers()) {
                // The id is attached even when the session turns out to be
                // dead, so the logout handler can still clear it.
                request.extensions_mut().insert(session_id);

                if let Some(user) = sessions.resolve(session_id).await {
                    request.extensions_mut().insert(SessionUser::new(user));
                    return inner.call(request).await;
                }
            }

            if is_public_path(request.uri().path()) {
                return inner.call(request).await;
            }

            Ok(Redirect::to("/login").into_response())
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
