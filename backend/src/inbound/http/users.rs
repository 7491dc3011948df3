//! User directory API handlers.
//!
//! ```text
//! GET  /users           admin listing, optional status filter
//! GET  /search-users    public donor search
//! POST /edit_profile    self-service profile edit
//! POST /edit-user/{id}  admin role/status moderation
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::Deserialize;
use uuid::Uuid;

use crate::domain::ApiResult;
use crate::domain::page::{DEFAULT_LIMIT, Page};
use crate::domain::ports::DonorSearchFilter;
use crate::domain::user::{Location, ModerationEdit, ProfileEdit};
use crate::inbound::http::envelope::Envelope;
use crate::inbound::http::session::CurrentUser;
use crate::inbound::http::state::HttpState;

fn page_of(limit: Option<u64>, skip: Option<u64>) -> Page {
    Page {
        limit: limit.unwrap_or(DEFAULT_LIMIT),
        skip: skip.unwrap_or(0),
    }
}

/// Admin listing query.
#[derive(Debug, Default, Deserialize)]
pub struct ListUsersQuery {
    pub status: Option<String>,
    pub limit: Option<u64>,
    pub skip: Option<u64>,
}

/// Public donor search query. Unknown blood-group values match everything.
#[derive(Debug, Default, Deserialize)]
pub struct SearchUsersQuery {
    #[serde(rename = "bloodGroup")]
    pub blood_group: Option<String>,
    pub district: Option<String>,
    pub upazila: Option<String>,
    pub limit: Option<u64>,
    pub skip: Option<u64>,
}

/// Self-service edit body. The location only changes when all three of
/// division/district/upazila are supplied together.
#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
pub struct EditProfileRequest {
    pub name: Option<String>,
    pub photo: Option<String>,
    #[serde(rename = "bloodGroup")]
    pub blood_group: Option<String>,
    pub division: Option<String>,
    pub district: Option<String>,
    pub upazila: Option<String>,
}

impl From<EditProfileRequest> for ProfileEdit {
    fn from(value: EditProfileRequest) -> Self {
        let location = match (value.division, value.district, value.upazila) {
            (Some(division), Some(district), Some(upazila)) => Some(Location {
                division,
                district,
                upazila,
            }),
            _ => None,
        };
        Self {
            name: value.name,
            photo: value.photo,
            blood_group: value.blood_group.as_deref().and_then(|raw| raw.parse().ok()),
            location,
        }
    }
}

/// Moderation body. Values outside the closed role/status sets parse to
/// `None` and leave the stored value untouched.
#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
pub struct EditUserRequest {
    pub status: Option<String>,
    pub role: Option<String>,
}

impl From<EditUserRequest> for ModerationEdit {
    fn from(value: EditUserRequest) -> Self {
        Self {
            status: value.status.as_deref().and_then(|raw| raw.parse().ok()),
            role: value.role.as_deref().and_then(|raw| raw.parse().ok()),
        }
    }
}

/// Admin listing of accounts; never includes password hashes.
#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "Accounts"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Caller is not an admin")
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(
    state: web::Data<HttpState>,
    user: CurrentUser,
    query: web::Query<ListUsersQuery>,
) -> ApiResult<HttpResponse> {
    let status = query.status.as_deref().and_then(|raw| raw.parse().ok());
    let page = state
        .directory
        .list_users(&user.0, status, page_of(query.limit, query.skip))
        .await?;
    Ok(HttpResponse::Ok().json(Envelope::page(page)))
}

/// Public donor search with a privacy-minimising projection.
#[utoipa::path(
    get,
    path = "/search-users",
    responses((status = 200, description = "Matching donors")),
    tags = ["users"],
    operation_id = "searchUsers",
    security([])
)]
#[get("/search-users")]
pub async fn search_users(
    state: web::Data<HttpState>,
    query: web::Query<SearchUsersQuery>,
) -> ApiResult<HttpResponse> {
    let query = query.into_inner();
    let filter = DonorSearchFilter {
        blood_group: query.blood_group.as_deref().and_then(|raw| raw.parse().ok()),
        district: query.district,
        upazila: query.upazila,
    };
    let page = state
        .directory
        .search_users(&filter, page_of(query.limit, query.skip))
        .await?;
    Ok(HttpResponse::Ok().json(Envelope::page(page)))
}

/// Edit the caller's own profile fields.
#[utoipa::path(
    post,
    path = "/edit_profile",
    request_body = EditProfileRequest,
    responses(
        (status = 200, description = "Profile updated"),
        (status = 400, description = "No editable field supplied"),
        (status = 401, description = "Not authenticated")
    ),
    tags = ["users"],
    operation_id = "editProfile"
)]
#[post("/edit_profile")]
pub async fn edit_profile(
    state: web::Data<HttpState>,
    user: CurrentUser,
    payload: web::Json<EditProfileRequest>,
) -> ApiResult<HttpResponse> {
    state
        .directory
        .edit_own_profile(&user.0, payload.into_inner().into())
        .await?;
    Ok(HttpResponse::Ok().json(Envelope::message("Profile updated.")))
}

/// Admin moderation of another account's role or status.
#[utoipa::path(
    post,
    path = "/edit-user/{id}",
    request_body = EditUserRequest,
    responses(
        (status = 200, description = "User updated"),
        (status = 403, description = "Caller is not an admin"),
        (status = 404, description = "No such user")
    ),
    tags = ["users"],
    operation_id = "editUser"
)]
#[post("/edit-user/{id}")]
pub async fn edit_user(
    state: web::Data<HttpState>,
    user: CurrentUser,
    path: web::Path<Uuid>,
    payload: web::Json<EditUserRequest>,
) -> ApiResult<HttpResponse> {
    state
        .directory
        .edit_user(&user.0, path.into_inner(), payload.into_inner().into())
        .await?;
    Ok(HttpResponse::Ok().json(Envelope::message("User updated.")))
}
