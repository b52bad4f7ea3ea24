use anyhow::Context;
use tokio::net::TcpListener;

use wrong_note::{app, config::Config, db, seed, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::load()?;

    let pool = db::build_pool(&config.database_url)?;
    db::run_migrations(&pool)?;

    if let Some(path) = &config.question_bank_path {
        let mut conn = pool.get().context("failed to get DB connection for import")?;
        seed::import_question_bank(&mut conn, path)?;
    }

    let bind_addr = config.bind_addr.clone();
    let app = app(AppState::new(pool, config).context("failed to prepare login hashing")?);

    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind to {bind_addr}"))?;

    log::info!("Server running on http://{}", bind_addr);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
