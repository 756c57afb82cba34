use std::process;

use tokio::{net::TcpListener, sync::watch, time::timeout, try_join};
use tracing::{Dispatch, Level, dispatcher, error, info, warn};
use tracing_subscriber::fmt as tracing_fmt;
use trailpost::{
    application::{error::AppError, fixtures::Fixtures, seed::SeedError, seed::SeedService},
    config,
    infra::{
        error::InfraError,
        http::{self, AdminState, ApiState},
        store::Repositories,
        telemetry,
    },
};

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        report_application_error(&error);
        process::exit(1);
    }
}

fn report_application_error(error: &AppError) {
    if dispatcher::has_been_set() {
        error!(error = %error, "application error");
        return;
    }

    let subscriber = tracing_fmt().with_max_level(Level::ERROR).finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %error, "application error");
    });
}

async fn run() -> Result<(), AppError> {
    let (cli_args, settings) = config::load_with_cli()?;

    let command = cli_args
        .command
        .unwrap_or(config::Command::Serve(Box::<config::ServeArgs>::default()));

    telemetry::init(&settings.logging)?;

    match command {
        config::Command::Serve(_) => run_serve(settings).await,
        config::Command::Seed(args) => run_seed(settings, args).await,
    }
}

async fn run_serve(settings: config::Settings) -> Result<(), AppError> {
    let repositories = Repositories::open(&settings.database).await?;
    let api_state = ApiState::from_repositories(&repositories);
    let admin_state = AdminState::from_repositories(&repositories);

    serve_http(&settings, api_state, admin_state).await
}

async fn run_seed(settings: config::Settings, args: config::SeedArgs) -> Result<(), AppError> {
    let repositories = Repositories::open(&settings.database).await?;
    if repositories.is_in_memory() {
        warn!(
            target = "trailpost::seed",
            "seeding the in-memory store; the data is discarded when this process exits"
        );
    }

    let fixtures = match args.fixtures.as_deref() {
        Some(dir) => {
            info!(
                target = "trailpost::seed",
                dir = %dir.display(),
                "loading fixtures from directory"
            );
            Fixtures::from_dir(dir).await.map_err(SeedError::from)?
        }
        None => Fixtures::bundled().map_err(SeedError::from)?,
    };

    SeedService::new(repositories.seed.clone())
        .seed(fixtures)
        .await?;
    Ok(())
}

async fn serve_http(
    settings: &config::Settings,
    api_state: ApiState,
    admin_state: AdminState,
) -> Result<(), AppError> {
    let public_router = http::build_router(api_state);
    let admin_router = http::build_admin_router(admin_state);

    let public_listener = TcpListener::bind(settings.server.public_addr)
        .await
        .map_err(|err| AppError::from(InfraError::from(err)))?;
    let admin_listener = TcpListener::bind(settings.server.admin_addr)
        .await
        .map_err(|err| AppError::from(InfraError::from(err)))?;

    info!(
        target = "trailpost::serve",
        public = %settings.server.public_addr,
        admin = %settings.server.admin_addr,
        "listening"
    );

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let public_server = axum::serve(public_listener, public_router.into_make_service())
        .with_graceful_shutdown(shutdown_requested(shutdown_rx.clone()));
    let admin_server = axum::serve(admin_listener, admin_router.into_make_service())
        .with_graceful_shutdown(shutdown_requested(shutdown_rx));

    let servers = async { try_join!(public_server, admin_server) };
    tokio::pin!(servers);

    tokio::select! {
        result = &mut servers => {
            result.map_err(|err| AppError::from(InfraError::Server(err.to_string())))?;
            return Ok(());
        }
        signal = tokio::signal::ctrl_c() => {
            signal.map_err(|err| AppError::from(InfraError::from(err)))?;
            info!(target = "trailpost::serve", "shutdown requested");
        }
    }

    let _ = shutdown_tx.send(true);

    match timeout(settings.server.graceful_shutdown, servers).await {
        Ok(result) => {
            result.map_err(|err| AppError::from(InfraError::Server(err.to_string())))?;
            info!(target = "trailpost::serve", "shutdown complete");
        }
        Err(_) => warn!(
            target = "trailpost::serve",
            timeout_secs = settings.server.graceful_shutdown.as_secs(),
            "graceful shutdown timed out; dropping open connections"
        ),
    }

    Ok(())
}

async fn shutdown_requested(mut receiver: watch::Receiver<bool>) {
    let _ = receiver.wait_for(|stop| *stop).await;
}
