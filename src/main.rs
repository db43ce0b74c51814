use std::sync::Arc;

use actix_web::middleware::{Logger, NormalizePath};
use actix_web::web::Data;
use actix_web::{App, HttpServer};
use dotenvy::dotenv;
use tracing::info;
use tracing_appender::rolling;

use hrms_console::client::ApiClient;
use hrms_console::config::Config;
use hrms_console::routes;
use hrms_console::state::ConsoleState;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let config = Config::from_env()?;

    // Rolling daily log
    let file_appender = rolling::daily(&config.log_dir, "console.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(config.log_level)
        .with_ansi(false)
        .with_target(false) // removes module path
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .pretty()
        .init();

    info!(
        server_addr = %config.server_addr,
        api_base_url = %config.api_base_url,
        "Console starting..."
    );

    let api = ApiClient::new(&config.api_base_url)?;
    let state = Data::new(ConsoleState::new(Arc::new(api)));

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(NormalizePath::trim())
            .app_data(state.clone())
            .configure(routes::configure)
    })
    .workers(config.workers)
    .bind(&config.server_addr)?
    .run()
    .await?;

    Ok(())
}
