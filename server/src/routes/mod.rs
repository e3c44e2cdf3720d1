//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! One axum router serves the Leptos SSR pages, the compiled `/pkg` assets,
//! a health check, and the `/api/v1` relay to the grants backend. The browser
//! therefore sees a single origin and never needs CORS.

pub mod proxy;

use std::path::PathBuf;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use leptos::prelude::*;
use leptos_axum::{LeptosRoutes, generate_route_list};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::HostConfig;
use proxy::{ProxyError, ProxyState};

/// Errors produced while assembling the router.
#[derive(Debug, thiserror::Error)]
pub enum RouterError {
    #[error("leptos configuration: {0}")]
    LeptosConfig(String),

    #[error(transparent)]
    Proxy(#[from] ProxyError),
}

/// Full host router: SSR pages, static assets, health check, and API relay.
///
/// # Errors
///
/// Returns an error if the Leptos configuration cannot be loaded (missing or
/// malformed `[workspace.metadata.leptos]` section) or the proxy client
/// cannot be built.
pub fn app(config: &HostConfig) -> Result<Router, RouterError> {
    let conf = get_configuration(None).map_err(|e| RouterError::LeptosConfig(e.to_string()))?;
    let leptos_options = conf.leptos_options;
    let routes = generate_route_list(grantdesk_client::app::App);

    let leptos_router = Router::new()
        .leptos_routes(&leptos_options, routes, {
            let opts = leptos_options.clone();
            move || grantdesk_client::app::shell(opts.clone())
        })
        .with_state(leptos_options.clone());

    let site_root_path = PathBuf::from(leptos_options.site_root.as_ref());
    let proxy_state = ProxyState::new(&config.backend_url, config.timeouts)?;

    Ok(Router::new()
        .route("/healthz", get(healthz))
        .merge(proxy::router(proxy_state))
        .merge(leptos_router)
        .nest_service("/pkg", ServeDir::new(site_root_path.join("pkg")))
        .layer(TraceLayer::new_for_http()))
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
