mod api;
mod middleware;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use corium_commerce::CommerceClient;

use crate::{
    api::{build_app, default_rate_limit_state, AppState},
    middleware::AdminAuthState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Arc::new(corium_core::load_app_config()?);
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let categories = corium_core::load_categories(&config.categories_path)?;
    tracing::info!(
        count = categories.categories.len(),
        path = %config.categories_path.display(),
        "loaded category navigation"
    );

    let client = CommerceClient::new(
        &config.commerce_api_url,
        &config.commerce_api_token,
        config.client_timeout_secs,
    )?
    .with_retry_policy(
        config.client_max_retries,
        config.client_retry_backoff_base_ms,
    );

    let auth = AdminAuthState::from_env(matches!(
        config.env,
        corium_core::Environment::Development
    ))?;
    let app = build_app(
        AppState {
            client: Arc::new(client),
            categories: Arc::new(categories.categories),
        },
        auth,
        default_rate_limit_state(),
    );

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
