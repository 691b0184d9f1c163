//! Questbot entry point.

use questbot_bot::config::BotConfig;
use questbot_bot::error::AppError;
use questbot_bot::routes;
use questbot_bot::{logging, state};
use questbot_core::dialogue::ChatState;
use teloxide::dispatching::dialogue::InMemStorage;
use teloxide::dptree;
use teloxide::prelude::*;
use tracing::{debug, info};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // A missing .env file is fine; the variables may come from the environment.
    let dotenv = dotenvy::dotenv();

    let config = BotConfig::from_env()?;
    logging::init(config.log_file.as_deref())?;
    if let Err(error) = dotenv {
        debug!(%error, ".env not loaded");
    }

    info!(?config, "starting questbot");

    let pool = questbot_store::connect(&config.database).await?;
    questbot_store::migrate(&pool).await?;
    info!("migrations applied");

    tokio::fs::create_dir_all(&config.uploads_dir).await?;

    let bot = Bot::new(config.token.clone());
    // Updates sent while the bot was offline are dropped.
    bot.delete_webhook().drop_pending_updates(true).await?;

    let services = state::build_services(
        &pool,
        bot.clone(),
        InMemStorage::<ChatState>::new(),
        config.uploads_dir.clone(),
    );

    info!("polling for updates");
    Dispatcher::builder(bot, routes::schema())
        .dependencies(dptree::deps![services])
        .default_handler(|update| async move {
            debug!(update_id = ?update.id, "unhandled update");
        })
        .error_handler(LoggingErrorHandler::with_custom_text(
            "An error has occurred in the dispatcher",
        ))
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    info!("questbot stopped");
    Ok(())
}
