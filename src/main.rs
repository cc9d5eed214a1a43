use anyhow::Result;
use qaboard::application::{
    ports::{avatar::AvatarFetcher, i18n::LanguageCatalog, security::TokenManager},
    services::ApplicationServices,
};
use qaboard::config::AppConfig;
use qaboard::domain::{profile::ProfileRepository, space::SpaceRepository};
use qaboard::infrastructure::{
    avatar::HttpAvatarFetcher,
    backend::{BackendClient, BackendProfileRepository, BackendSpaceRepository},
    i18n::StaticLanguageCatalog,
    security::token::BiscuitTokenManager,
};
use qaboard::presentation::http::{routes::build_router, state::HttpState};
use std::{net::SocketAddr, sync::Arc};
use tokio::signal;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_LOG_FILTER: &str = "info,tower_http=info,reqwest=warn";

#[tokio::main]
async fn main() {
    if let Err(err) = bootstrap().await {
        tracing::error!(error = %err, "fatal error");
        eprintln!("fatal error: {err}");
        std::process::exit(1);
    }
}

async fn bootstrap() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;
    let router = build_router(build_state(&config)?);

    let listener = tokio::net::TcpListener::bind(config.listen_addr()).await?;
    tracing::info!(address = %listener.local_addr()?, "people directory listening");

    // the avatar limiter keys on the peer address
    axum::serve(
        listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}

/// Wires the backend adapters, token verification, avatar proxy and
/// language tables into the state every handler receives.
fn build_state(config: &AppConfig) -> Result<HttpState> {
    let backend = Arc::new(BackendClient::new(
        config.backend_endpoint(),
        config.backend_api_token().map(str::to_string),
        config.backend_timeout(),
    )?);
    tracing::info!(endpoint = backend.endpoint(), "using object store backend");

    let profile_repo: Arc<dyn ProfileRepository> =
        Arc::new(BackendProfileRepository::new(Arc::clone(&backend)));
    let space_repo: Arc<dyn SpaceRepository> = Arc::new(BackendSpaceRepository::new(backend));

    let token_manager: Arc<dyn TokenManager> = Arc::new(BiscuitTokenManager::new(
        config.biscuit_private_key(),
        config.token_ttl(),
    )?);
    let avatar_fetcher: Arc<dyn AvatarFetcher> = Arc::new(HttpAvatarFetcher::new(
        config.avatar().timeout,
        config.avatar().max_bytes,
    )?);
    let language_catalog: Arc<dyn LanguageCatalog> = Arc::new(StaticLanguageCatalog::new());

    let services = ApplicationServices::new(
        profile_repo,
        space_repo,
        token_manager,
        avatar_fetcher,
        language_catalog,
        config.people().clone(),
    );

    Ok(HttpState {
        services: Arc::new(services),
        site: Arc::new(config.site().clone()),
        avatar: Arc::new(config.avatar().clone()),
        allowed_origins: Arc::new(config.allowed_origins().to_vec()),
    })
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .try_init();
    if installed.is_err() {
        tracing::warn!("tracing subscriber already initialised");
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for CTRL+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install terminate handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
    tracing::info!("shutdown signal received");
}
