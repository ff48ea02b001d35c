//! Interactive terminal front end for Taskdeck.
//!
//! # Responsibility
//! - Wire configuration, logging and storage into one session.
//! - Keep all terminal I/O out of `taskdeck_core`.

pub mod app;
pub mod command;
pub mod config;
pub mod demo;
pub mod error;
pub mod prompt;
pub mod render;

pub use app::App;
pub use config::Config;
pub use error::{CliError, CliResult};

use log::info;
use std::io;
use taskdeck_core::db::{open_db, open_db_in_memory};
use taskdeck_core::{
    init_logging, ItemService, SqliteItemRepository, SqliteTemplateRepository, TemplateService,
};

/// Runs one interactive session on stdin/stdout.
pub fn run(config: &Config) -> CliResult<()> {
    if let Some(log_dir) = &config.log_dir {
        init_logging(&config.log_level, log_dir)?;
    }

    let conn = match &config.db {
        Some(path) => open_db(path)?,
        None => open_db_in_memory()?,
    };
    let items = ItemService::new(SqliteItemRepository::try_new(&conn)?);
    let templates = TemplateService::new(SqliteTemplateRepository::try_new(&conn)?);

    if config.demo_items > 0 {
        demo::seed_demo_data(&items, &templates, config.demo_items, &mut rand::rng())?;
    }

    info!(
        "event=session_start module=cli status=ok persistent={}",
        config.db.is_some()
    );
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut app = App::new(items, templates, stdin.lock(), stdout.lock());
    app.run()
}
