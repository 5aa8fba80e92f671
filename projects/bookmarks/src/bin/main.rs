use std::sync::Arc;

use axum::serve;
use projects_bookmarks::{
	config::{Config, ConfigError},
	db::{build_pool, BuildPoolError},
	endpoints::{app, bookmarks::AppState},
	service::{BookmarksService, InMemoryBookmarksService, PgBookmarksService},
};
use thiserror::Error;
use tracing::{error, info, warn};

#[derive(Debug, Error)]
pub enum MainError {
	#[error("Config: {source}")]
	Config {
		#[source]
		source: ConfigError,
	},
	#[error("TracingInit: {source}")]
	TracingInit {
		#[source]
		source: utils_trace::TracingInitError,
	},
	#[error("BuildPool: {source}")]
	BuildPool {
		#[source]
		source: BuildPoolError,
	},
	#[error("TcpListenerBind: {source}")]
	TcpListenerBind {
		#[source]
		source: std::io::Error,
	},
	#[error("Serve: {source}")]
	Serve {
		#[source]
		source: std::io::Error,
	},
}

#[tokio::main]
async fn main() -> Result<(), MainError> {
	let config = Config::from_env()
		.map_err(|source| MainError::Config { source })?;

	utils_trace::init(&config.log_level, config.log_format)
		.map_err(|source| MainError::TracingInit { source })?;

	let bookmarks: Arc<dyn BookmarksService> = match &config.database_url {
		Some(database_url) => {
			let pool = build_pool(database_url, config.db_pool_size)
				.map_err(|source| MainError::BuildPool { source })?;
			info!(pool_size = config.db_pool_size, "Using PostgreSQL storage");
			Arc::new(PgBookmarksService::new(pool))
		}
		None => {
			warn!("DATABASE_URL not set, bookmarks are kept in memory");
			Arc::new(InMemoryBookmarksService::new())
		}
	};

	let app = app(AppState::new(bookmarks), &config.mount_path);

	let listener = tokio::net::TcpListener::bind(config.listen_addr)
		.await
		.map_err(|source| MainError::TcpListenerBind { source })?;

	info!("Server running on addr: {}{}", config.listen_addr, config.mount_path);

	serve(listener, app)
		.with_graceful_shutdown(shutdown_signal())
		.await
		.map_err(|source| MainError::Serve { source })?;

	Ok(())
}

async fn shutdown_signal() {
	if let Err(err) = tokio::signal::ctrl_c().await {
		error!(error = %err, "Failed to listen for shutdown signal");
		std::future::pending::<()>().await;
	}
	info!("Shutting down");
}
