//! The httpOnly `token` cookie that carries the access token for browsers.

use axum_extra::extract::cookie::{Cookie, SameSite};

use crate::config::ServerConfig;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "token";

/// Cookie holding `token`, living as long as the token itself.
pub fn session_cookie(token: String, config: &ServerConfig) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .secure(config.is_production())
        .same_site(SameSite::Strict)
        .max_age(time::Duration::minutes(config.jwt.expiry_mins))
        .build()
}

/// Expired, empty cookie that makes the browser drop its session.
pub fn cleared_session_cookie(config: &ServerConfig) -> Cookie<'static> {
    let mut cookie = session_cookie(String::new(), config);
    cookie.make_removal();
    cookie
}
