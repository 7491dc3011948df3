//! OpenAPI documentation configuration.
//!
//! Defines the [`ApiDoc`] struct generating the OpenAPI specification for
//! the REST API: every endpoint from the inbound layer, the request body
//! schemas, and the session cookie security scheme. The generated document
//! backs Swagger UI in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "user_token",
                "Session token cookie issued by POST /register and POST /login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "BloodLink backend API",
        description = "Blood-donation coordination: accounts, donation \
                       requests, donor search, and platform funding."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::health::root,
        crate::inbound::http::health::live,
        crate::inbound::http::health::ready,
        crate::inbound::http::accounts::register,
        crate::inbound::http::accounts::login,
        crate::inbound::http::accounts::me,
        crate::inbound::http::accounts::logout,
        crate::inbound::http::donations::create_donation_request,
        crate::inbound::http::donations::my_donation_requests,
        crate::inbound::http::donations::pending_donation_requests,
        crate::inbound::http::donations::all_donation_requests,
        crate::inbound::http::donations::get_donation,
        crate::inbound::http::donations::delete_donation,
        crate::inbound::http::donations::accept_donation,
        crate::inbound::http::donations::set_donation_status,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::search_users,
        crate::inbound::http::users::edit_profile,
        crate::inbound::http::users::edit_user,
        crate::inbound::http::fundings::open_funding,
        crate::inbound::http::fundings::confirm_funding,
        crate::inbound::http::fundings::list_fundings,
    ),
    components(schemas(
        crate::inbound::http::accounts::RegisterRequest,
        crate::inbound::http::accounts::LoginRequest,
        crate::inbound::http::donations::CreateDonationRequest,
        crate::inbound::http::donations::StatusUpdateRequest,
        crate::inbound::http::users::EditProfileRequest,
        crate::inbound::http::users::EditUserRequest,
        crate::inbound::http::fundings::OpenFundingRequest,
        crate::inbound::http::fundings::ConfirmFundingRequest,
    ))
)]
pub struct ApiDoc;
