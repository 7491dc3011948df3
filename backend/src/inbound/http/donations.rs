//! Donation request API handlers.
//!
//! ```text
//! POST   /create_donation_request        create (auth, active account)
//! GET    /my-donation-requests           owner feed (auth)
//! GET    /pending-donation-requests      public pending feed
//! GET    /all-donation-request           public browse, optional status filter
//! GET    /donation/{id}                  public single read
//! DELETE /donation/{id}                  owner or admin
//! PATCH  /donation-accept/{id}           pending → in-progress (auth)
//! PATCH  /donation-status/{id}           in-progress → done|canceled
//! ```

use actix_web::{HttpResponse, delete, get, patch, post, web};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::ApiResult;
use crate::domain::Error;
use crate::domain::donation::{
    DonationDraft, DonationRequest, DonationStatus, RequestExposure,
};
use crate::domain::page::{DEFAULT_LIMIT, Page, PageOf};
use crate::domain::user::{BloodGroup, Email, Location};
use crate::inbound::http::envelope::Envelope;
use crate::inbound::http::session::{CurrentUser, MaybeClaim};
use crate::inbound::http::state::HttpState;

/// Creation request body; status and timestamps are server-assigned and
/// deliberately absent.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct CreateDonationRequest {
    pub receiver_name: String,
    #[serde(rename = "bloodGroup")]
    pub blood_group: BloodGroup,
    pub division: String,
    pub district: String,
    pub upazila: String,
    pub hospital_name: String,
    pub full_address: String,
    pub donation_date: NaiveDate,
    pub donation_time: NaiveTime,
    #[serde(default)]
    pub request_message: String,
}

impl From<CreateDonationRequest> for DonationDraft {
    fn from(value: CreateDonationRequest) -> Self {
        Self {
            receiver_name: value.receiver_name,
            blood_group: value.blood_group,
            location: Location {
                division: value.division,
                district: value.district,
                upazila: value.upazila,
            },
            hospital_name: value.hospital_name,
            full_address: value.full_address,
            donation_date: value.donation_date,
            donation_time: value.donation_time,
            message: value.request_message,
        }
    }
}

/// Wire projection of a donation request.
///
/// `requester_email` and `full_address` are omitted under the masked
/// exposure policy for anonymous single-record reads.
#[derive(Debug, Serialize)]
pub struct DonationResponse {
    pub id: Uuid,
    pub requester_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requester_email: Option<Email>,
    pub receiver_name: String,
    #[serde(rename = "bloodGroup")]
    pub blood_group: BloodGroup,
    pub division: String,
    pub district: String,
    pub upazila: String,
    pub hospital_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_address: Option<String>,
    pub donation_date: NaiveDate,
    pub donation_time: NaiveTime,
    pub request_message: String,
    pub status: DonationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub donor_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub donor_email: Option<Email>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl DonationResponse {
    fn from_record(record: DonationRequest, exposure: RequestExposure) -> Self {
        let masked = exposure == RequestExposure::Masked;
        Self {
            id: record.id,
            requester_name: record.requester.name,
            requester_email: (!masked).then_some(record.requester.email),
            receiver_name: record.receiver_name,
            blood_group: record.blood_group,
            division: record.location.division,
            district: record.location.district,
            upazila: record.location.upazila,
            hospital_name: record.hospital_name,
            full_address: (!masked).then_some(record.full_address),
            donation_date: record.donation_date,
            donation_time: record.donation_time,
            request_message: record.message,
            status: record.status,
            donor_name: record.donor.as_ref().map(|donor| donor.name.clone()),
            donor_email: record.donor.map(|donor| donor.email),
            created_at: record.created_at,
        }
    }

    fn page(page: PageOf<DonationRequest>) -> PageOf<Self> {
        PageOf {
            items: page
                .items
                .into_iter()
                .map(|record| Self::from_record(record, RequestExposure::Full))
                .collect(),
            total: page.total,
        }
    }
}

/// Feed query: pagination plus an optional status filter. An unknown
/// status value matches everything rather than failing the request.
#[derive(Debug, Default, Deserialize)]
pub struct FeedQuery {
    pub status: Option<String>,
    pub limit: Option<u64>,
    pub skip: Option<u64>,
}

impl FeedQuery {
    fn page(&self) -> Page {
        Page {
            limit: self.limit.unwrap_or(DEFAULT_LIMIT),
            skip: self.skip.unwrap_or(0),
        }
    }

    fn status(&self) -> Option<DonationStatus> {
        self.status.as_deref().and_then(|raw| raw.parse().ok())
    }
}

/// Settlement request body for `PATCH /donation-status/{id}`.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct StatusUpdateRequest {
    pub status: String,
}

/// Create a donation request owned by the caller.
#[utoipa::path(
    post,
    path = "/create_donation_request",
    request_body = CreateDonationRequest,
    responses(
        (status = 200, description = "Request created"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Account blocked")
    ),
    tags = ["donations"],
    operation_id = "createDonationRequest"
)]
#[post("/create_donation_request")]
pub async fn create_donation_request(
    state: web::Data<HttpState>,
    user: CurrentUser,
    payload: web::Json<CreateDonationRequest>,
) -> ApiResult<HttpResponse> {
    let request = state
        .donations
        .create(&user.0, payload.into_inner().into())
        .await?;
    Ok(HttpResponse::Ok().json(Envelope::data_with_message(
        "Request created success.",
        DonationResponse::from_record(request, RequestExposure::Full),
    )))
}

/// Requests owned by the caller, newest first.
#[utoipa::path(
    get,
    path = "/my-donation-requests",
    responses(
        (status = 200, description = "Owner feed"),
        (status = 401, description = "Not authenticated")
    ),
    tags = ["donations"],
    operation_id = "myDonationRequests"
)]
#[get("/my-donation-requests")]
pub async fn my_donation_requests(
    state: web::Data<HttpState>,
    user: CurrentUser,
    query: web::Query<FeedQuery>,
) -> ApiResult<HttpResponse> {
    let page = state.donations.list_mine(&user.0, query.page()).await?;
    Ok(HttpResponse::Ok().json(Envelope::page(DonationResponse::page(page))))
}

/// Public feed of requests still waiting for a donor.
#[utoipa::path(
    get,
    path = "/pending-donation-requests",
    responses((status = 200, description = "Pending feed")),
    tags = ["donations"],
    operation_id = "pendingDonationRequests",
    security([])
)]
#[get("/pending-donation-requests")]
pub async fn pending_donation_requests(
    state: web::Data<HttpState>,
    query: web::Query<FeedQuery>,
) -> ApiResult<HttpResponse> {
    let page = state
        .donations
        .browse(Some(DonationStatus::Pending), query.page())
        .await?;
    Ok(HttpResponse::Ok().json(Envelope::page(DonationResponse::page(page))))
}

/// Public browse feed with an optional status filter.
#[utoipa::path(
    get,
    path = "/all-donation-request",
    responses((status = 200, description = "Browse feed")),
    tags = ["donations"],
    operation_id = "allDonationRequests",
    security([])
)]
#[get("/all-donation-request")]
pub async fn all_donation_requests(
    state: web::Data<HttpState>,
    query: web::Query<FeedQuery>,
) -> ApiResult<HttpResponse> {
    let page = state.donations.browse(query.status(), query.page()).await?;
    Ok(HttpResponse::Ok().json(Envelope::page(DonationResponse::page(page))))
}

/// Public single-record read.
///
/// Anonymous callers get the configured exposure; authenticated callers
/// always see the full record.
#[utoipa::path(
    get,
    path = "/donation/{id}",
    responses(
        (status = 200, description = "Request"),
        (status = 404, description = "No such request")
    ),
    tags = ["donations"],
    operation_id = "getDonation",
    security([])
)]
#[get("/donation/{id}")]
pub async fn get_donation(
    state: web::Data<HttpState>,
    claim: MaybeClaim,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let record = state.donations.get(path.into_inner()).await?;
    let exposure = if claim.0.is_some() {
        RequestExposure::Full
    } else {
        state.exposure
    };
    Ok(HttpResponse::Ok().json(Envelope::data(DonationResponse::from_record(
        record, exposure,
    ))))
}

/// Delete a request, allowed for the owner and admins.
#[utoipa::path(
    delete,
    path = "/donation/{id}",
    responses(
        (status = 200, description = "Request deleted"),
        (status = 403, description = "Caller is neither owner nor admin"),
        (status = 404, description = "No such request")
    ),
    tags = ["donations"],
    operation_id = "deleteDonation"
)]
#[delete("/donation/{id}")]
pub async fn delete_donation(
    state: web::Data<HttpState>,
    user: CurrentUser,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    state.donations.delete(&user.0, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(Envelope::message("Request deleted.")))
}

/// Accept a pending request as the calling donor.
#[utoipa::path(
    patch,
    path = "/donation-accept/{id}",
    responses(
        (status = 200, description = "Request accepted"),
        (status = 404, description = "No such request"),
        (status = 409, description = "Already accepted")
    ),
    tags = ["donations"],
    operation_id = "acceptDonation"
)]
#[patch("/donation-accept/{id}")]
pub async fn accept_donation(
    state: web::Data<HttpState>,
    user: CurrentUser,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    state.donations.accept(&user.0, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(Envelope::message("Request accepted.")))
}

/// Settle an in-progress request as done or canceled.
#[utoipa::path(
    patch,
    path = "/donation-status/{id}",
    request_body = StatusUpdateRequest,
    responses(
        (status = 200, description = "Request settled"),
        (status = 403, description = "Caller is neither owner nor elevated"),
        (status = 404, description = "No such request"),
        (status = 409, description = "Bad target or stale state")
    ),
    tags = ["donations"],
    operation_id = "setDonationStatus"
)]
#[patch("/donation-status/{id}")]
pub async fn set_donation_status(
    state: web::Data<HttpState>,
    user: CurrentUser,
    path: web::Path<Uuid>,
    payload: web::Json<StatusUpdateRequest>,
) -> ApiResult<HttpResponse> {
    let target: DonationStatus = payload
        .status
        .parse()
        .map_err(|_| Error::invalid_transition(format!("cannot settle a request as {}", payload.status)))?;
    state
        .donations
        .set_status(&user.0, path.into_inner(), target)
        .await?;
    Ok(HttpResponse::Ok().json(Envelope::message("Request updated.")))
}
