//! Funding API handlers.
//!
//! ```text
//! POST /funding          open intent, returns the provider redirect URL
//! POST /funding-success  confirm a completed checkout session
//! GET  /fundings         paid records, any authenticated caller
//! ```

use actix_web::{HttpResponse, get, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::ApiResult;
use crate::domain::funding::{FundingRecord, FundingStatus};
use crate::domain::page::{DEFAULT_LIMIT, Page, PageOf};
use crate::inbound::http::envelope::Envelope;
use crate::inbound::http::session::CurrentUser;
use crate::inbound::http::state::HttpState;

/// Intent request body; `amount` is in decimal currency units.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct OpenFundingRequest {
    pub amount: f64,
}

/// Confirmation request body carrying the provider session reference.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct ConfirmFundingRequest {
    pub session_id: String,
}

/// Checkout session handed back to the caller for the redirect.
#[derive(Debug, Serialize)]
pub struct FundingSessionResponse {
    pub url: String,
    pub session_id: String,
}

/// Wire projection of a funding ledger record. `amount` is in integer
/// minor units.
#[derive(Debug, Serialize)]
pub struct FundingResponse {
    pub id: Uuid,
    pub name: String,
    pub amount: i64,
    pub status: FundingStatus,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl From<FundingRecord> for FundingResponse {
    fn from(record: FundingRecord) -> Self {
        Self {
            id: record.id,
            name: record.contributor_name,
            amount: record.amount.value(),
            status: record.status,
            created_at: record.created_at,
        }
    }
}

/// Pagination query for the paid listing.
#[derive(Debug, Default, Deserialize)]
pub struct FundingsQuery {
    pub limit: Option<u64>,
    pub skip: Option<u64>,
}

/// Open a funding intent and return the provider checkout redirect.
#[utoipa::path(
    post,
    path = "/funding",
    request_body = OpenFundingRequest,
    responses(
        (status = 200, description = "Checkout session created"),
        (status = 400, description = "Unusable amount"),
        (status = 401, description = "Not authenticated"),
        (status = 500, description = "Provider failure")
    ),
    tags = ["fundings"],
    operation_id = "openFunding"
)]
#[post("/funding")]
pub async fn open_funding(
    state: web::Data<HttpState>,
    user: CurrentUser,
    payload: web::Json<OpenFundingRequest>,
) -> ApiResult<HttpResponse> {
    let session = state.fundings.open_intent(&user.0, payload.amount).await?;
    Ok(HttpResponse::Ok().json(Envelope::data(FundingSessionResponse {
        url: session.redirect_url,
        session_id: session.id,
    })))
}

/// Confirm a checkout session the provider reports as paid.
#[utoipa::path(
    post,
    path = "/funding-success",
    request_body = ConfirmFundingRequest,
    responses(
        (status = 200, description = "Funding confirmed"),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Session has no matching record"),
        (status = 409, description = "Payment incomplete or already confirmed")
    ),
    tags = ["fundings"],
    operation_id = "confirmFunding"
)]
#[post("/funding-success")]
pub async fn confirm_funding(
    state: web::Data<HttpState>,
    _user: CurrentUser,
    payload: web::Json<ConfirmFundingRequest>,
) -> ApiResult<HttpResponse> {
    let record = state.fundings.confirm(&payload.session_id).await?;
    Ok(HttpResponse::Ok().json(Envelope::data_with_message(
        "Funding confirmed.",
        FundingResponse::from(record),
    )))
}

/// Paid records, newest first, visible to any authenticated caller.
#[utoipa::path(
    get,
    path = "/fundings",
    responses(
        (status = 200, description = "Paid records"),
        (status = 401, description = "Not authenticated")
    ),
    tags = ["fundings"],
    operation_id = "listFundings"
)]
#[get("/fundings")]
pub async fn list_fundings(
    state: web::Data<HttpState>,
    _user: CurrentUser,
    query: web::Query<FundingsQuery>,
) -> ApiResult<HttpResponse> {
    let page = state
        .fundings
        .list_paid(Page {
            limit: query.limit.unwrap_or(DEFAULT_LIMIT),
            skip: query.skip.unwrap_or(0),
        })
        .await?;
    let page = PageOf {
        items: page.items.into_iter().map(FundingResponse::from).collect(),
        total: page.total,
    };
    Ok(HttpResponse::Ok().json(Envelope::page(page)))
}
