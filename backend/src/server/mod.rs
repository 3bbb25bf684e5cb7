//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_session::{
    SessionMiddleware,
    config::{CookieContentSecurity, PersistentSession},
    storage::CookieSessionStore,
};
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use backend::Trace;
#[cfg(debug_assertions)]
use backend::doc::ApiDoc;
use backend::domain::ListingService;
use backend::domain::ports::{InMemoryListingRepository, ListingCommand, ListingQuery};
use backend::inbound::http::health::{HealthState, live, ready};
use backend::inbound::http::listings::{
    create_listing, delete_listing, list_listings, manage_listings, show_listing, update_listing,
};
use backend::inbound::http::state::HttpState;
use backend::outbound::persistence::DieselListingRepository;
use backend::outbound::storage::FsLogoStore;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

/// Build the listing service over the configured adapters.
///
/// Uses the Diesel repository when a pool is available and the in-memory
/// repository otherwise, matching the fixture fallback used in tests.
fn build_listing_ports(
    config: &ServerConfig,
) -> std::io::Result<(Arc<dyn ListingQuery>, Arc<dyn ListingCommand>)> {
    let logos = Arc::new(FsLogoStore::open(&config.logo_dir)?);

    match &config.db_pool {
        Some(pool) => {
            let repository = Arc::new(DieselListingRepository::new(pool.clone()));
            let service = Arc::new(ListingService::new(repository, logos));
            Ok((service.clone(), service))
        }
        None => {
            let repository = Arc::new(InMemoryListingRepository::new());
            let service = Arc::new(ListingService::new(repository, logos));
            Ok((service.clone(), service))
        }
    }
}

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    key: Key,
    cookie_secure: bool,
    same_site: SameSite,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        key,
        cookie_secure,
        same_site,
    } = deps;

    let session = SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".into())
        .cookie_path("/".into())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(same_site)
        .session_lifecycle(
            PersistentSession::default().session_ttl(actix_web::cookie::time::Duration::hours(2)),
        )
        .build();

    // manage_listings precedes show_listing so /listings/mine is not
    // swallowed by the {id} segment.
    let api = web::scope("/api/v1")
        .wrap(session)
        .service(list_listings)
        .service(manage_listings)
        .service(show_listing)
        .service(create_listing)
        .service(update_listing)
        .service(delete_listing);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Construct an Actix HTTP server using the provided health state and
/// configuration.
///
/// # Errors
/// Propagates [`std::io::Error`] when the logo directory cannot be opened
/// or binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let (listings_query, listings) = build_listing_ports(&config)?;
    let http_state = web::Data::new(HttpState::new(listings_query, listings));
    let server_health_state = health_state.clone();
    let ServerConfig {
        key,
        cookie_secure,
        same_site,
        bind_addr,
        logo_dir: _,
        db_pool: _,
    } = config;

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            key: key.clone(),
            cookie_secure,
            same_site,
        })
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
