//! Backend entry-point: wires adapters, domain services, REST endpoints,
//! and OpenAPI docs.

use std::env;
use std::sync::Arc;

use actix_web::{App, HttpServer, web};
use mockable::{Clock, DefaultClock};
use rand::RngCore;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use bloodlink::ApiDoc;
use bloodlink::domain::donation::RequestExposure;
use bloodlink::domain::ports::{CheckoutProvider, FixtureCheckoutProvider};
use bloodlink::domain::{
    AccountService, DonationService, PaymentReconciler, SessionAuthenticator, UserDirectory,
};
use bloodlink::inbound::http::routes;
use bloodlink::inbound::http::state::HttpState;
use bloodlink::outbound::payments::stripe::{CheckoutRedirects, StripeCheckoutProvider};
use bloodlink::outbound::persistence::memory::{
    MemoryDonationRepository, MemoryFundingRepository, MemoryUserRepository,
};
use bloodlink::outbound::security::password::SaltedSha256Hasher;

fn signing_key() -> std::io::Result<Vec<u8>> {
    match env::var("TOKEN_SIGNING_KEY") {
        Ok(key) if !key.is_empty() => Ok(key.into_bytes()),
        _ => {
            let allow_dev = env::var("TOKEN_ALLOW_EPHEMERAL").ok().as_deref() == Some("1");
            if cfg!(debug_assertions) || allow_dev {
                warn!("TOKEN_SIGNING_KEY not set, using an ephemeral key (dev only)");
                let mut key = vec![0u8; 32];
                rand::thread_rng().fill_bytes(&mut key);
                Ok(key)
            } else {
                Err(std::io::Error::other(
                    "TOKEN_SIGNING_KEY must be set outside debug builds",
                ))
            }
        }
    }
}

fn checkout_provider() -> std::io::Result<Arc<dyn CheckoutProvider>> {
    let redirects = CheckoutRedirects {
        success_url: env::var("FUNDING_SUCCESS_URL")
            .unwrap_or_else(|_| "http://localhost:5173/funding-success".into()),
        cancel_url: env::var("FUNDING_CANCEL_URL")
            .unwrap_or_else(|_| "http://localhost:5173/funding".into()),
    };
    match env::var("STRIPE_SECRET_KEY") {
        Ok(key) if !key.is_empty() => {
            let provider = StripeCheckoutProvider::new(key, redirects)
                .map_err(|err| std::io::Error::other(format!("stripe client: {err}")))?;
            Ok(Arc::new(provider))
        }
        _ if cfg!(debug_assertions) => {
            warn!("STRIPE_SECRET_KEY not set, using the fixture checkout provider (dev only)");
            Ok(Arc::new(FixtureCheckoutProvider))
        }
        _ => Err(std::io::Error::other(
            "STRIPE_SECRET_KEY must be set outside debug builds",
        )),
    }
}

fn request_exposure() -> RequestExposure {
    match env::var("PUBLIC_REQUEST_EXPOSURE") {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            warn!(value = %raw, "unknown PUBLIC_REQUEST_EXPOSURE, serving full records");
            RequestExposure::Full
        }),
        Err(_) => RequestExposure::Full,
    }
}

fn build_state() -> std::io::Result<HttpState> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);

    let users = Arc::new(MemoryUserRepository::new());
    let donations = Arc::new(MemoryDonationRepository::new());
    let fundings = Arc::new(MemoryFundingRepository::new());
    let hasher = Arc::new(SaltedSha256Hasher);

    Ok(HttpState {
        sessions: Arc::new(SessionAuthenticator::new(signing_key()?, clock.clone())),
        accounts: Arc::new(AccountService::new(users.clone(), hasher, clock.clone())),
        donations: Arc::new(DonationService::new(donations, clock.clone())),
        directory: Arc::new(UserDirectory::new(users)),
        fundings: Arc::new(PaymentReconciler::new(fundings, checkout_provider()?, clock)),
        exposure: request_exposure(),
    })
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let state = web::Data::new(build_state()?);
    let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".into());

    HttpServer::new(move || {
        let app = App::new()
            .app_data(state.clone())
            .configure(routes::configure);

        #[cfg(debug_assertions)]
        let app =
            app.service(SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()));

        app
    })
    .bind(bind_addr)?
    .run()
    .await
}
