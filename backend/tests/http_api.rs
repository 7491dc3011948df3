//! Integration tests over the full HTTP surface, using the in-memory
//! repositories and the fixture checkout provider.

use std::sync::Arc;

use actix_web::cookie::Cookie;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{App, test, web};
use async_trait::async_trait;
use chrono::{TimeDelta, TimeZone, Utc};
use mockable::Clock;
use serde_json::{Value, json};
use uuid::Uuid;

use bloodlink::domain::donation::RequestExposure;
use bloodlink::domain::ports::{
    CheckoutProvider, CheckoutProviderError, CheckoutSession, CheckoutSessionRequest,
    CheckoutSessionStatus, FixtureCheckoutProvider, FixturePasswordHasher, ProviderPaymentStatus,
    UserRepository,
};
use bloodlink::domain::user::Role;
use bloodlink::domain::{
    AccountService, DonationService, PaymentReconciler, SessionAuthenticator, UserDirectory,
};
use bloodlink::inbound::http::routes;
use bloodlink::inbound::http::state::HttpState;
use bloodlink::outbound::persistence::memory::{
    MemoryDonationRepository, MemoryFundingRepository, MemoryUserRepository,
};
use bloodlink::test_support::{MutableClock, sample_user, sample_user_with_role};

const SIGNING_KEY: &[u8] = b"integration-test-signing-key";

/// Provider stub that reports every session as not yet paid.
struct UnpaidProvider;

#[async_trait]
impl CheckoutProvider for UnpaidProvider {
    async fn create_session(
        &self,
        request: &CheckoutSessionRequest,
    ) -> Result<CheckoutSession, CheckoutProviderError> {
        Ok(CheckoutSession {
            id: format!("cs_fixture_{}", request.funding_id),
            redirect_url: "https://checkout.invalid/pay".to_owned(),
        })
    }

    async fn fetch_session(
        &self,
        session_id: &str,
    ) -> Result<CheckoutSessionStatus, CheckoutProviderError> {
        let funding_id = session_id
            .strip_prefix("cs_fixture_")
            .and_then(|raw| Uuid::parse_str(raw).ok());
        Ok(CheckoutSessionStatus {
            id: session_id.to_owned(),
            payment_status: ProviderPaymentStatus::Unpaid,
            funding_id,
        })
    }
}

struct TestContext {
    state: web::Data<HttpState>,
    users: Arc<MemoryUserRepository>,
    clock: Arc<MutableClock>,
}

impl TestContext {
    fn new() -> Self {
        Self::build(RequestExposure::Full, Arc::new(FixtureCheckoutProvider))
    }

    fn masked() -> Self {
        Self::build(RequestExposure::Masked, Arc::new(FixtureCheckoutProvider))
    }

    fn unpaid_provider() -> Self {
        Self::build(RequestExposure::Full, Arc::new(UnpaidProvider))
    }

    fn build(exposure: RequestExposure, provider: Arc<dyn CheckoutProvider>) -> Self {
        let start = Utc
            .timestamp_opt(1_700_000_000, 0)
            .single()
            .expect("valid start instant");
        let clock = Arc::new(MutableClock::new(start));
        let clock_dyn: Arc<dyn Clock> = clock.clone();

        let users = Arc::new(MemoryUserRepository::new());
        let donations = Arc::new(MemoryDonationRepository::new());
        let fundings = Arc::new(MemoryFundingRepository::new());
        let hasher = Arc::new(FixturePasswordHasher);

        let state = web::Data::new(HttpState {
            sessions: Arc::new(SessionAuthenticator::new(SIGNING_KEY, clock_dyn.clone())),
            accounts: Arc::new(AccountService::new(
                users.clone(),
                hasher,
                clock_dyn.clone(),
            )),
            donations: Arc::new(DonationService::new(donations, clock_dyn.clone())),
            directory: Arc::new(UserDirectory::new(users.clone())),
            fundings: Arc::new(PaymentReconciler::new(fundings, provider, clock_dyn)),
            exposure,
        });
        Self {
            state,
            users,
            clock,
        }
    }

    async fn app(
        &self,
    ) -> impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>
    {
        test::init_service(
            App::new()
                .app_data(self.state.clone())
                .configure(routes::configure),
        )
        .await
    }

    /// Seed an account directly in the store and log it in over HTTP.
    async fn login_seeded(
        &self,
        app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
        email: &str,
        role: Role,
    ) -> Cookie<'static> {
        self.users
            .insert(&sample_user_with_role(email, role))
            .await
            .expect("seed user");
        let response = test::call_service(
            app,
            test::TestRequest::post()
                .uri("/login")
                .set_json(json!({"email": email, "password": "secret"}))
                .to_request(),
        )
        .await;
        assert!(response.status().is_success(), "seeded login must succeed");
        session_cookie_of(&response)
    }
}

fn session_cookie_of(response: &ServiceResponse) -> Cookie<'static> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "user_token")
        .expect("session cookie present")
        .into_owned()
}

async fn body_of(response: ServiceResponse) -> Value {
    let bytes = test::read_body(response).await;
    serde_json::from_slice(&bytes).expect("json body")
}

fn register_payload(email: &str) -> Value {
    json!({
        "email": email,
        "name": "Abdul Alo",
        "bloodGroup": "B+",
        "photo": "https://img.example/alo.png",
        "division": "Dhaka",
        "district": "Dhaka",
        "upazila": "Uttara",
        "password": "secret",
    })
}

fn donation_payload() -> Value {
    json!({
        "receiver_name": "Rahim Uddin",
        "bloodGroup": "O+",
        "division": "Dhaka",
        "district": "Dhaka",
        "upazila": "Uttara",
        "hospital_name": "Dhaka Medical College Hospital",
        "full_address": "Secretariat Rd, Dhaka 1000",
        "donation_date": "2024-03-14",
        "donation_time": "10:30:00",
        "request_message": "Urgent transfusion before surgery.",
    })
}

async fn create_request_id(
    app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    cookie: &Cookie<'static>,
) -> String {
    let response = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/create_donation_request")
            .cookie(cookie.clone())
            .set_json(donation_payload())
            .to_request(),
    )
    .await;
    assert!(response.status().is_success());
    let body = body_of(response).await;
    body["data"]["id"].as_str().expect("request id").to_owned()
}

#[actix_web::test]
async fn registering_the_same_email_twice_is_a_conflict_without_a_cookie() {
    let ctx = TestContext::new();
    let app = ctx.app().await;

    let first = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/register")
            .set_json(register_payload("donor@example.com"))
            .to_request(),
    )
    .await;
    assert_eq!(first.status(), 200);
    assert_eq!(session_cookie_of(&first).http_only(), Some(true));

    let second = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/register")
            .set_json(register_payload("donor@example.com"))
            .to_request(),
    )
    .await;
    assert_eq!(second.status(), 409);
    assert!(
        second
            .response()
            .cookies()
            .all(|cookie| cookie.name() != "user_token"),
        "no session cookie on conflict"
    );
    let body = body_of(second).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Email already in use.");
}

#[actix_web::test]
async fn me_round_trips_the_session_and_never_leaks_the_password() {
    let ctx = TestContext::new();
    let app = ctx.app().await;

    let response = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/register")
            .set_json(register_payload("donor@example.com"))
            .to_request(),
    )
    .await;
    let cookie = session_cookie_of(&response);
    let register_body = body_of(response).await;
    assert!(!register_body.to_string().contains("password"));

    let me = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/me")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(me.status(), 200);
    let body = body_of(me).await;
    assert_eq!(body["data"]["email"], "donor@example.com");
    assert_eq!(body["data"]["role"], "donor");
    assert_eq!(body["data"]["status"], "active");
}

#[actix_web::test]
async fn me_without_a_cookie_is_unauthenticated() {
    let ctx = TestContext::new();
    let app = ctx.app().await;

    let response =
        test::call_service(&app, test::TestRequest::get().uri("/me").to_request()).await;
    assert_eq!(response.status(), 401);
    let body = body_of(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Unauthorized access.");
}

#[actix_web::test]
async fn a_session_expires_the_instant_after_24_hours() {
    let ctx = TestContext::new();
    let app = ctx.app().await;
    let cookie = ctx.login_seeded(&app, "donor@example.com", Role::Donor).await;

    ctx.clock.advance_seconds(86_400);
    let still_valid = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/me")
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(still_valid.status(), 200);

    ctx.clock.advance_seconds(1);
    let expired = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/me")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(expired.status(), 401);
}

#[actix_web::test]
async fn login_with_a_wrong_password_is_unauthenticated() {
    let ctx = TestContext::new();
    let app = ctx.app().await;
    ctx.users
        .insert(&sample_user("donor@example.com"))
        .await
        .expect("seed user");

    let response = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/login")
            .set_json(json!({"email": "donor@example.com", "password": "wrong"}))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), 401);
}

#[actix_web::test]
async fn logout_clears_the_cookie_client_side() {
    let ctx = TestContext::new();
    let app = ctx.app().await;

    let response =
        test::call_service(&app, test::TestRequest::get().uri("/logout").to_request()).await;
    assert_eq!(response.status(), 200);
    let cookie = session_cookie_of(&response);
    assert_eq!(cookie.value(), "");
    let body = body_of(response).await;
    assert_eq!(body["message"], "Logout success...");
}

#[actix_web::test]
async fn a_blocked_account_cannot_create_requests() {
    let ctx = TestContext::new();
    let app = ctx.app().await;
    let cookie = ctx.login_seeded(&app, "donor@example.com", Role::Donor).await;

    let admin_cookie = ctx.login_seeded(&app, "admin@example.com", Role::Admin).await;
    let donor = ctx
        .users
        .find_by_email(&bloodlink::test_support::email("donor@example.com"))
        .await
        .expect("lookup runs")
        .expect("donor exists");
    let blocked = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/edit-user/{}", donor.id))
            .cookie(admin_cookie)
            .set_json(json!({"status": "blocked"}))
            .to_request(),
    )
    .await;
    assert_eq!(blocked.status(), 200);

    let response = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/create_donation_request")
            .cookie(cookie)
            .set_json(donation_payload())
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), 403);
}

#[actix_web::test]
async fn acceptance_assigns_exactly_one_donor() {
    let ctx = TestContext::new();
    let app = ctx.app().await;
    let requester = ctx
        .login_seeded(&app, "requester@example.com", Role::Donor)
        .await;
    let first = ctx.login_seeded(&app, "first@example.com", Role::Donor).await;
    let second = ctx
        .login_seeded(&app, "second@example.com", Role::Donor)
        .await;

    let id = create_request_id(&app, &requester).await;

    let win = test::call_service(
        &app,
        test::TestRequest::patch()
            .uri(&format!("/donation-accept/{id}"))
            .cookie(first)
            .to_request(),
    )
    .await;
    assert_eq!(win.status(), 200);

    let lose = test::call_service(
        &app,
        test::TestRequest::patch()
            .uri(&format!("/donation-accept/{id}"))
            .cookie(second)
            .to_request(),
    )
    .await;
    assert_eq!(lose.status(), 409);

    let record = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/donation/{id}"))
            .to_request(),
    )
    .await;
    let body = body_of(record).await;
    assert_eq!(body["data"]["status"], "in-progress");
    assert_eq!(body["data"]["donor_email"], "first@example.com");
}

#[actix_web::test]
async fn settlement_rejects_targets_outside_done_and_canceled() {
    let ctx = TestContext::new();
    let app = ctx.app().await;
    let admin = ctx.login_seeded(&app, "admin@example.com", Role::Admin).await;
    let requester = ctx
        .login_seeded(&app, "requester@example.com", Role::Donor)
        .await;
    let id = create_request_id(&app, &requester).await;

    for target in ["pending", "in-progress", "garbage"] {
        let response = test::call_service(
            &app,
            test::TestRequest::patch()
                .uri(&format!("/donation-status/{id}"))
                .cookie(admin.clone())
                .set_json(json!({"status": target}))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), 409, "target {target} must be rejected");
    }
}

#[actix_web::test]
async fn settlement_flows_from_in_progress_only() {
    let ctx = TestContext::new();
    let app = ctx.app().await;
    let requester = ctx
        .login_seeded(&app, "requester@example.com", Role::Donor)
        .await;
    let donor = ctx.login_seeded(&app, "helper@example.com", Role::Donor).await;
    let stranger = ctx
        .login_seeded(&app, "stranger@example.com", Role::Donor)
        .await;
    let id = create_request_id(&app, &requester).await;

    // Still pending: the in-progress precondition fails.
    let premature = test::call_service(
        &app,
        test::TestRequest::patch()
            .uri(&format!("/donation-status/{id}"))
            .cookie(requester.clone())
            .set_json(json!({"status": "done"}))
            .to_request(),
    )
    .await;
    assert_eq!(premature.status(), 409);

    let accepted = test::call_service(
        &app,
        test::TestRequest::patch()
            .uri(&format!("/donation-accept/{id}"))
            .cookie(donor)
            .to_request(),
    )
    .await;
    assert_eq!(accepted.status(), 200);

    let forbidden = test::call_service(
        &app,
        test::TestRequest::patch()
            .uri(&format!("/donation-status/{id}"))
            .cookie(stranger)
            .set_json(json!({"status": "done"}))
            .to_request(),
    )
    .await;
    assert_eq!(forbidden.status(), 403);

    let settled = test::call_service(
        &app,
        test::TestRequest::patch()
            .uri(&format!("/donation-status/{id}"))
            .cookie(requester)
            .set_json(json!({"status": "done"}))
            .to_request(),
    )
    .await;
    assert_eq!(settled.status(), 200);
}

#[actix_web::test]
async fn deletion_is_limited_to_the_owner_and_admins() {
    let ctx = TestContext::new();
    let app = ctx.app().await;
    let requester = ctx
        .login_seeded(&app, "requester@example.com", Role::Donor)
        .await;
    let volunteer = ctx
        .login_seeded(&app, "volunteer@example.com", Role::Volunteer)
        .await;
    let admin = ctx.login_seeded(&app, "admin@example.com", Role::Admin).await;
    let id = create_request_id(&app, &requester).await;

    let forbidden = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/donation/{id}"))
            .cookie(volunteer)
            .to_request(),
    )
    .await;
    assert_eq!(forbidden.status(), 403);

    // The record is untouched by the refused delete.
    let still_there = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/donation/{id}"))
            .to_request(),
    )
    .await;
    assert_eq!(still_there.status(), 200);

    let removed = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/donation/{id}"))
            .cookie(admin)
            .to_request(),
    )
    .await;
    assert_eq!(removed.status(), 200);

    let gone = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/donation/{id}"))
            .to_request(),
    )
    .await;
    assert_eq!(gone.status(), 404);
}

#[actix_web::test]
async fn moderation_ignores_values_outside_the_closed_sets() {
    let ctx = TestContext::new();
    let app = ctx.app().await;
    let admin = ctx.login_seeded(&app, "admin@example.com", Role::Admin).await;
    ctx.users
        .insert(&sample_user("donor@example.com"))
        .await
        .expect("seed user");
    let donor = ctx
        .users
        .find_by_email(&bloodlink::test_support::email("donor@example.com"))
        .await
        .expect("lookup runs")
        .expect("donor exists");

    let response = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/edit-user/{}", donor.id))
            .cookie(admin)
            .set_json(json!({"role": "superuser", "status": "suspended"}))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), 200);

    let stored = ctx
        .users
        .find_by_id(donor.id)
        .await
        .expect("lookup runs")
        .expect("donor exists");
    assert_eq!(stored.role, Role::Donor);
    assert_eq!(
        stored.status,
        bloodlink::domain::user::AccountStatus::Active
    );
}

#[actix_web::test]
async fn the_user_listing_is_admin_only_and_windows_correctly() {
    let ctx = TestContext::new();
    let app = ctx.app().await;
    let donor_cookie = ctx.login_seeded(&app, "donor0@example.com", Role::Donor).await;
    for index in 1..5i64 {
        let mut user = sample_user(&format!("donor{index}@example.com"));
        user.register_at += TimeDelta::seconds(index);
        ctx.users.insert(&user).await.expect("seed user");
    }
    let admin = ctx.login_seeded(&app, "admin@example.com", Role::Admin).await;

    let forbidden = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/users")
            .cookie(donor_cookie)
            .to_request(),
    )
    .await;
    assert_eq!(forbidden.status(), 403);

    let response = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/users?limit=2&skip=1")
            .cookie(admin)
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), 200);
    let body = body_of(response).await;
    assert_eq!(body["totalMatch"], 6);
    let items = body["data"].as_array().expect("data array");
    assert_eq!(items.len(), 2);
    assert!(!body.to_string().contains("password"));
}

#[actix_web::test]
async fn the_public_donor_search_is_privacy_minimised() {
    let ctx = TestContext::new();
    let app = ctx.app().await;
    ctx.users
        .insert(&sample_user("donor@example.com"))
        .await
        .expect("seed user");

    let response = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/search-users?bloodGroup=B%2B&district=Dhaka")
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), 200);
    let body = body_of(response).await;
    assert_eq!(body["totalMatch"], 1);
    let card = &body["data"][0];
    assert_eq!(card["email"], "donor@example.com");
    assert!(card.get("status").is_none());
    assert!(card.get("role").is_none());
    assert!(card.get("registerAt").is_none());
}

#[actix_web::test]
async fn profile_edits_apply_only_the_supplied_fields() {
    let ctx = TestContext::new();
    let app = ctx.app().await;
    let cookie = ctx.login_seeded(&app, "donor@example.com", Role::Donor).await;

    let empty = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/edit_profile")
            .cookie(cookie.clone())
            .set_json(json!({}))
            .to_request(),
    )
    .await;
    assert_eq!(empty.status(), 400);

    let response = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/edit_profile")
            .cookie(cookie.clone())
            .set_json(json!({"name": "Abdul Karim", "bloodGroup": "AB-"}))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), 200);

    let me = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/me")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    let body = body_of(me).await;
    assert_eq!(body["data"]["name"], "Abdul Karim");
    assert_eq!(body["data"]["bloodGroup"], "AB-");
    assert_eq!(body["data"]["division"], "Dhaka");
}

#[actix_web::test]
async fn funding_flows_from_intent_to_paid_exactly_once() {
    let ctx = TestContext::new();
    let app = ctx.app().await;
    let cookie = ctx.login_seeded(&app, "donor@example.com", Role::Donor).await;

    let intent = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/funding")
            .cookie(cookie.clone())
            .set_json(json!({"amount": 5.0}))
            .to_request(),
    )
    .await;
    assert_eq!(intent.status(), 200);
    let intent_body = body_of(intent).await;
    let session_id = intent_body["data"]["session_id"]
        .as_str()
        .expect("session id")
        .to_owned();
    assert!(intent_body["data"]["url"].as_str().is_some());

    let confirm = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/funding-success")
            .cookie(cookie.clone())
            .set_json(json!({"session_id": session_id}))
            .to_request(),
    )
    .await;
    assert_eq!(confirm.status(), 200);
    let confirm_body = body_of(confirm).await;
    assert_eq!(confirm_body["data"]["amount"], 500);
    assert_eq!(confirm_body["data"]["status"], "paid");

    let replay = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/funding-success")
            .cookie(cookie.clone())
            .set_json(json!({"session_id": session_id}))
            .to_request(),
    )
    .await;
    assert_eq!(replay.status(), 409);

    let listing = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/fundings")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(listing.status(), 200);
    let listing_body = body_of(listing).await;
    assert_eq!(listing_body["totalMatch"], 1);
    assert_eq!(listing_body["data"][0]["amount"], 500);
}

#[actix_web::test]
async fn an_unpaid_session_never_settles_the_record() {
    let ctx = TestContext::unpaid_provider();
    let app = ctx.app().await;
    let cookie = ctx.login_seeded(&app, "donor@example.com", Role::Donor).await;

    let intent = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/funding")
            .cookie(cookie.clone())
            .set_json(json!({"amount": 5.0}))
            .to_request(),
    )
    .await;
    let intent_body = body_of(intent).await;
    let session_id = intent_body["data"]["session_id"]
        .as_str()
        .expect("session id")
        .to_owned();

    let confirm = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/funding-success")
            .cookie(cookie.clone())
            .set_json(json!({"session_id": session_id}))
            .to_request(),
    )
    .await;
    assert_eq!(confirm.status(), 409);

    let listing = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/fundings")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    let listing_body = body_of(listing).await;
    assert_eq!(listing_body["totalMatch"], 0);
}

#[actix_web::test]
async fn masked_exposure_hides_contact_details_from_anonymous_readers() {
    let ctx = TestContext::masked();
    let app = ctx.app().await;
    let requester = ctx
        .login_seeded(&app, "requester@example.com", Role::Donor)
        .await;
    let id = create_request_id(&app, &requester).await;

    let anonymous = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/donation/{id}"))
            .to_request(),
    )
    .await;
    let body = body_of(anonymous).await;
    assert!(body["data"].get("requester_email").is_none());
    assert!(body["data"].get("full_address").is_none());
    assert_eq!(body["data"]["hospital_name"], "Dhaka Medical College Hospital");

    let authenticated = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/donation/{id}"))
            .cookie(requester)
            .to_request(),
    )
    .await;
    let body = body_of(authenticated).await;
    assert_eq!(body["data"]["requester_email"], "requester@example.com");
}

#[actix_web::test]
async fn feeds_filter_by_status_and_report_totals() {
    let ctx = TestContext::new();
    let app = ctx.app().await;
    let requester = ctx
        .login_seeded(&app, "requester@example.com", Role::Donor)
        .await;
    let donor = ctx.login_seeded(&app, "helper@example.com", Role::Donor).await;

    let mut ids = Vec::new();
    for _ in 0..3 {
        ids.push(create_request_id(&app, &requester).await);
    }
    let accepted = test::call_service(
        &app,
        test::TestRequest::patch()
            .uri(&format!("/donation-accept/{}", ids[0]))
            .cookie(donor)
            .to_request(),
    )
    .await;
    assert_eq!(accepted.status(), 200);

    let pending = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/pending-donation-requests")
            .to_request(),
    )
    .await;
    let pending_body = body_of(pending).await;
    assert_eq!(pending_body["totalMatch"], 2);

    let in_progress = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/all-donation-request?status=in-progress")
            .to_request(),
    )
    .await;
    let in_progress_body = body_of(in_progress).await;
    assert_eq!(in_progress_body["totalMatch"], 1);

    let mine = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/my-donation-requests?limit=2")
            .cookie(requester)
            .to_request(),
    )
    .await;
    let mine_body = body_of(mine).await;
    assert_eq!(mine_body["totalMatch"], 3);
    assert_eq!(mine_body["data"].as_array().expect("data array").len(), 2);
}

#[actix_web::test]
async fn health_probes_and_the_root_greeting_respond() {
    let ctx = TestContext::new();
    let app = ctx.app().await;

    for path in ["/health/live", "/health/ready"] {
        let response =
            test::call_service(&app, test::TestRequest::get().uri(path).to_request()).await;
        assert_eq!(response.status(), 200, "probe {path}");
    }

    let root = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    assert_eq!(root.status(), 200);
    let body = body_of(root).await;
    assert_eq!(body["success"], true);
}
