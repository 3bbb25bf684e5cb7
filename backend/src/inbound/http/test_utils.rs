//! Helpers shared by the inbound HTTP unit tests.

use actix_session::storage::CookieSessionStore;
use actix_session::{SessionMiddleware, config::CookieContentSecurity};
use actix_web::cookie::Key;

/// Cookie-session middleware with a throwaway key for test apps.
pub(crate) fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".into())
        .cookie_secure(false)
        .cookie_content_security(CookieContentSecurity::Private)
        .build()
}
