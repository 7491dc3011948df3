//! Account API handlers: register, login, me, logout.
//!
//! ```text
//! POST /register {"email":"a@b","name":"...","bloodGroup":"B+","password":"..."}
//! POST /login    {"email":"a@b","password":"..."}
//! GET  /me
//! GET  /logout
//! ```
//!
//! Register and login set the `user_token` cookie on success; logout clears
//! it client-side only.

use actix_web::{HttpResponse, get, post, web};
use serde::Deserialize;

use crate::domain::auth::{CredentialValidationError, LoginCredentials, Registration};
use crate::domain::user::{BloodGroup, Location};
use crate::domain::{ApiResult, Error};
use crate::inbound::http::envelope::Envelope;
use crate::inbound::http::session::{CurrentUser, clear_session_cookie, session_cookie};
use crate::inbound::http::state::HttpState;

/// Registration request body for `POST /register`.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct RegisterRequest {
    pub email: String,
    pub name: String,
    #[serde(rename = "bloodGroup")]
    pub blood_group: BloodGroup,
    #[serde(default)]
    pub photo: String,
    pub division: String,
    pub district: String,
    pub upazila: String,
    pub password: String,
}

/// Login request body for `POST /login`.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

fn map_credential_error(err: CredentialValidationError) -> Error {
    Error::invalid_request(err.to_string())
}

/// Create an account and establish a session.
///
/// A duplicate email is a conflict: no user is created and no cookie is
/// set.
#[utoipa::path(
    post,
    path = "/register",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "Account created, session cookie set"),
        (status = 400, description = "Invalid payload"),
        (status = 409, description = "Email already in use")
    ),
    tags = ["accounts"],
    operation_id = "register",
    security([])
)]
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let payload = payload.into_inner();
    let registration = Registration::try_new(
        &payload.email,
        &payload.name,
        payload.blood_group,
        payload.photo,
        Location {
            division: payload.division,
            district: payload.district,
            upazila: payload.upazila,
        },
        &payload.password,
    )
    .map_err(map_credential_error)?;

    let user = state.accounts.register(registration).await?;
    let token = state.sessions.issue(&user.email)?;

    Ok(HttpResponse::Ok()
        .cookie(session_cookie(token))
        .json(Envelope::data_with_message(
            "Register success...",
            user.profile(),
        )))
}

/// Authenticate and establish a session.
#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success, session cookie set"),
        (status = 400, description = "Invalid payload"),
        (status = 401, description = "Unknown email or wrong password")
    ),
    tags = ["accounts"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let credentials = LoginCredentials::try_from_parts(&payload.email, &payload.password)
        .map_err(map_credential_error)?;

    let user = state.accounts.login(credentials).await?;
    let token = state.sessions.issue(&user.email)?;

    Ok(HttpResponse::Ok()
        .cookie(session_cookie(token))
        .json(Envelope::data_with_message(
            "Login success...",
            user.profile(),
        )))
}

/// Current account, resolved from the session cookie in fetch mode.
#[utoipa::path(
    get,
    path = "/me",
    responses(
        (status = 200, description = "Current account"),
        (status = 401, description = "Missing, invalid, or expired session")
    ),
    tags = ["accounts"],
    operation_id = "me"
)]
#[get("/me")]
pub async fn me(user: CurrentUser) -> ApiResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(Envelope::data_with_message(
        "Login success...",
        user.0.profile(),
    )))
}

/// Clear the session cookie.
#[utoipa::path(
    get,
    path = "/logout",
    responses((status = 200, description = "Cookie cleared")),
    tags = ["accounts"],
    operation_id = "logout",
    security([])
)]
#[get("/logout")]
pub async fn logout() -> ApiResult<HttpResponse> {
    Ok(HttpResponse::Ok()
        .cookie(clear_session_cookie())
        .json(Envelope::message("Logout success...")))
}
