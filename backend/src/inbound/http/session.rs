//! Session cookie handling and the request extractors built on it.
//!
//! The token travels in an HTTP-only cookie named `user_token` whose
//! max-age matches the token's 24-hour lifetime. Two extractors cover the
//! two verification modes: [`SessionClaim`] checks the signature and expiry
//! only, [`CurrentUser`] additionally loads the live account record.

use actix_web::cookie::{Cookie, SameSite, time::Duration as CookieDuration};
use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest, web};
use futures_util::future::LocalBoxFuture;

use crate::domain::session::TOKEN_TTL_HOURS;
use crate::domain::user::{Email, User};
use crate::domain::{Error, SessionAuthenticator};
use crate::inbound::http::state::HttpState;

/// Cookie carrying the session token.
pub const USER_TOKEN_COOKIE: &str = "user_token";

/// Build the session cookie for a freshly issued token.
pub fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build(USER_TOKEN_COOKIE, token)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(CookieDuration::hours(TOKEN_TTL_HOURS))
        .finish()
}

/// Cookie that clears the session on the client.
///
/// The token itself stays valid until its natural expiry; logout is purely
/// a client-side affair.
pub fn clear_session_cookie() -> Cookie<'static> {
    Cookie::build(USER_TOKEN_COOKIE, "")
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(CookieDuration::ZERO)
        .finish()
}

fn unauthenticated() -> Error {
    Error::unauthorized("Unauthorized access.")
}

fn state_of(req: &HttpRequest) -> Result<web::Data<HttpState>, Error> {
    req.app_data::<web::Data<HttpState>>()
        .cloned()
        .ok_or_else(|| Error::internal("HTTP state not configured"))
}

fn verify_cookie(req: &HttpRequest, sessions: &SessionAuthenticator) -> Result<Email, Error> {
    let cookie = req.cookie(USER_TOKEN_COOKIE).ok_or_else(unauthenticated)?;
    sessions.verify(cookie.value())
}

/// Claim-only verification: the email from a valid token, storage untouched.
pub struct SessionClaim(pub Email);

impl FromRequest for SessionClaim {
    type Error = Error;
    type Future = std::future::Ready<Result<Self, Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let result = state_of(req)
            .and_then(|state| verify_cookie(req, &state.sessions))
            .map(SessionClaim);
        std::future::ready(result)
    }
}

/// Claim-only verification that tolerates anonymous callers.
///
/// Used where the endpoint is public but the response differs for
/// authenticated viewers.
pub struct MaybeClaim(pub Option<Email>);

impl FromRequest for MaybeClaim {
    type Error = Error;
    type Future = std::future::Ready<Result<Self, Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let claim = state_of(req)
            .ok()
            .and_then(|state| verify_cookie(req, &state.sessions).ok());
        std::future::ready(Ok(MaybeClaim(claim)))
    }
}

/// Fetch-mode verification: valid token plus a live account record.
///
/// Fails as unauthenticated when the backing account no longer exists, so
/// deleting an account revokes its outstanding tokens.
pub struct CurrentUser(pub User);

impl FromRequest for CurrentUser {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let state = state_of(req);
        let email = state
            .as_ref()
            .ok()
            .map(|state| verify_cookie(req, &state.sessions));
        Box::pin(async move {
            let state = state?;
            let email = email.unwrap_or_else(|| Err(unauthenticated()))?;
            let user = state.accounts.verify_and_fetch(&email).await?;
            Ok(CurrentUser(user))
        })
    }
}
