//! Route registration shared by `main` and the HTTP test suites.

use actix_web::{ResponseError, error::InternalError, web};

use crate::domain::Error;
use crate::inbound::http::{accounts, donations, fundings, health, users};

/// Register every endpoint plus payload error handlers on `cfg`.
///
/// Payload and query failures are rewritten through the domain error type
/// so malformed input gets the same envelope as every other failure.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        InternalError::from_response(
            "",
            Error::invalid_request(err.to_string()).error_response(),
        )
        .into()
    }))
    .app_data(web::QueryConfig::default().error_handler(|err, _req| {
        InternalError::from_response(
            "",
            Error::invalid_request(err.to_string()).error_response(),
        )
        .into()
    }))
    .app_data(web::PathConfig::default().error_handler(|err, _req| {
        InternalError::from_response("", Error::not_found(err.to_string()).error_response()).into()
    }))
    .service(health::root)
    .service(health::live)
    .service(health::ready)
    .service(accounts::register)
    .service(accounts::login)
    .service(accounts::me)
    .service(accounts::logout)
    .service(donations::create_donation_request)
    .service(donations::my_donation_requests)
    .service(donations::pending_donation_requests)
    .service(donations::all_donation_requests)
    .service(donations::get_donation)
    .service(donations::delete_donation)
    .service(donations::accept_donation)
    .service(donations::set_donation_status)
    .service(users::list_users)
    .service(users::search_users)
    .service(users::edit_profile)
    .service(users::edit_user)
    .service(fundings::open_funding)
    .service(fundings::confirm_funding)
    .service(fundings::list_fundings);
}
