use pipeline_server::routes::build_app;
use pipeline_server::{Config, ServerState, init_logger};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Environment (dotenv, logging)
    dotenv::dotenv().ok();
    let config = Config::from_env();
    init_logger(&config.log_level);

    tracing::info!(
        environment = %config.environment,
        "Order pipeline server starting..."
    );

    // 2. Shared state: seeded store + master pipeline
    let state = ServerState::initialize();

    // 3. HTTP server
    let app = build_app(state);
    let addr = format!("0.0.0.0:{}", config.http_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "Listening");

    axum::serve(listener, app).await?;

    Ok(())
}
