#![recursion_limit = "4096"]

#[cfg(feature = "ssr")]
#[tokio::main]
async fn main() {
    use axum::Router;
    use leptos::prelude::*;
    use leptos_axum::{LeptosRoutes, generate_route_list};
    use sferd::app::*;
    use sferd::core::config::Config;
    use sferd::core::erd_api::{ErdApiState, erd_api_router};
    use sferd::core::salesforce::HttpSalesforce;
    use std::time::Duration;
    use tower_http::compression::{CompressionLayer, CompressionLevel};
    use tower_http::cors::CorsLayer;
    use tower_http::services::ServeDir;
    use tracing_subscriber::EnvFilter;

    // Load .env file (if exists)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env();
    tracing::info!(
        "Config loaded: api_version={}, timeout={}s, session_ttl={}m, secure_cookie={}",
        config.api_version,
        config.request_timeout_secs,
        config.session_ttl_minutes,
        config.cookie_secure
    );

    let salesforce = match HttpSalesforce::new(
        config.api_version.clone(),
        Duration::from_secs(config.request_timeout_secs),
    ) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!("Failed to build Salesforce client: {}", e);
            return;
        }
    };
    let erd_state = ErdApiState::new(salesforce, config);

    // Sweep expired sessions in the background
    let sessions = erd_state.sessions.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(60));
        loop {
            interval.tick().await;
            let purged = sessions.purge_expired();
            if purged > 0 {
                tracing::debug!(
                    "Purged {} expired sessions, {} active",
                    purged,
                    sessions.len()
                );
            }
        }
    });

    // Load configuration from Cargo.toml [package.metadata.leptos]
    // Can be overridden via LEPTOS_SITE_ADDR env var
    let conf = get_configuration(None).unwrap();
    let leptos_options = conf.leptos_options;
    let addr = leptos_options.site_addr;

    let routes = generate_route_list(App);

    // Serves .br and .gz variants of the bundle when present
    let pkg_service = ServeDir::new(format!("{}/pkg", leptos_options.site_root))
        .precompressed_br()
        .precompressed_gzip();

    let leptos_router = Router::new()
        .nest_service("/pkg", pkg_service)
        .leptos_routes(&leptos_options, routes, {
            let leptos_options = leptos_options.clone();
            move || shell(leptos_options.clone())
        })
        .fallback(leptos_axum::file_and_error_handler(shell))
        .with_state(leptos_options);

    let app = Router::new()
        // REST backend: /login, /logout, /get_objects, /generate_erd
        .merge(erd_api_router(erd_state))
        .merge(leptos_router)
        .layer(CorsLayer::very_permissive())
        .layer(
            CompressionLayer::new()
                .br(true)
                .gzip(true)
                .quality(CompressionLevel::Best),
        );

    tracing::info!("listening on http://{}", &addr);

    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    axum::serve(listener, app.into_make_service())
        .await
        .unwrap();
}

#[cfg(not(feature = "ssr"))]
pub fn main() {
    // no client-side main function
    // see lib.rs for hydration function instead
}
