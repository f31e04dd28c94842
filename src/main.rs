use order_composer::config::Config;
use order_composer::{build_server, build_service, create_pool, run_migrations};

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Loads `.env` before the logger reads RUST_LOG.
    let config = Config::from_env()?;
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let pool = create_pool(&config.database_url)?;
    run_migrations(&pool)?;

    let service = build_service(pool, &config)?;

    log::info!("Starting server at http://{}:{}", config.host, config.port);

    build_server(service, &config.host, config.port)?.await?;
    Ok(())
}
