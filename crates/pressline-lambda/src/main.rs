use tracing_subscriber::EnvFilter;

use pressline_lambda::config::{LogFormat, ServiceConfig};
use pressline_lambda::state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let config = ServiceConfig::from_env()?;

    let subscriber = tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env());
    match config.log_format {
        LogFormat::Json => subscriber.json().init(),
        LogFormat::Pretty => subscriber.init(),
    }

    let lambda = config.lambda;
    let bind_addr = config.bind_addr;
    tracing::info!(route = %config.route, lambda, "starting pressline");

    let app = pressline_lambda::app(AppState::new(config));

    if lambda {
        return lambda_http::run(app).await.map_err(|e| eyre::eyre!(e));
    }

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    tracing::info!(addr = %bind_addr, "listening");
    axum::serve(listener, app).await?;
    Ok(())
}
