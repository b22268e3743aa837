use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use tower_http::trace::TraceLayer;
use tracing::info;

use board_api::routes::todo_router;
use board_api::shutdown::shutdown_signal;
use board_api::templates::Template;
use board_api::todo::TodoStateInner;
use board_db::{Database, Schema};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "todo_server=debug,board_api=debug,board_db=info,tower_http=debug".into()
            }),
        )
        .init();

    // Config
    let host = std::env::var("TODO_HOST").unwrap_or_else(|_| "0.0.0.0".into());
    let port: u16 = std::env::var("TODO_PORT")
        .unwrap_or_else(|_| "8080".into())
        .parse()?;
    let db_path: PathBuf = std::env::var("TODO_DB_PATH")
        .unwrap_or_else(|_| "./db/todo.db".into())
        .into();
    let template_dir: PathBuf = std::env::var("TODO_TEMPLATE_DIR")
        .unwrap_or_else(|_| "templates".into())
        .into();

    // Opening with the todo schema drops whatever the last run stored
    let db = Arc::new(Database::open(&db_path, Schema::Todo)?);
    let page = Template::load(&template_dir.join("todo.html"))?;

    let state = Arc::new(TodoStateInner { db, page });
    let app = todo_router(state).layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Todo board listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Todo board stopped");
    Ok(())
}
