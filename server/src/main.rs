use color_eyre::eyre::WrapErr;
use tracing::info;

use input_form::{routes, setup::setup_tracing, state::AppState};

fn main() -> color_eyre::Result<()> {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(4)
        .enable_all()
        .build()?
        .block_on(async { run_application().await })
}

async fn run_application() -> color_eyre::Result<()> {
    setup_tracing("input_form")?;

    let app_state = AppState::from_env()?;
    let addr = app_state.config.listen_addr;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .wrap_err_with(|| format!("Failed to bind {addr}"))?;
    info!("Listening on {}", addr);

    axum::serve(listener, routes::routes(app_state)).await?;

    Ok(())
}
