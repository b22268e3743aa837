use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use tower_http::trace::TraceLayer;
use tracing::info;

use board_api::grid::GridStateInner;
use board_api::placement::PlacementService;
use board_api::routes::grid_router;
use board_api::shutdown::shutdown_signal;
use board_api::templates::Template;
use board_db::{Database, Schema};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "board_server=debug,board_api=debug,board_db=info,tower_http=debug".into()
            }),
        )
        .init();

    // Config
    let host = std::env::var("GRID_HOST").unwrap_or_else(|_| "0.0.0.0".into());
    let port: u16 = std::env::var("GRID_PORT")
        .unwrap_or_else(|_| "8080".into())
        .parse()?;
    let db_path: PathBuf = std::env::var("GRID_DB_PATH")
        .unwrap_or_else(|_| "./db/app.db".into())
        .into();
    let template_dir: PathBuf = std::env::var("GRID_TEMPLATE_DIR")
        .unwrap_or_else(|_| "templates".into())
        .into();
    let static_dir: PathBuf = std::env::var("GRID_STATIC_DIR")
        .unwrap_or_else(|_| "static".into())
        .into();

    // Init database and templates; either failing aborts startup
    let db = Arc::new(Database::open(&db_path, Schema::Grid)?);
    let index = Template::load(&template_dir.join("index.html"))?;

    let state = Arc::new(GridStateInner {
        placements: PlacementService::new(db),
        index,
    });

    info!("Serving static files from {}", static_dir.display());
    let app = grid_router(state, static_dir).layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Grid board listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Grid board stopped");
    Ok(())
}
