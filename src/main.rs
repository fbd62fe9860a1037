mod app;
mod args;
mod config;
mod entry;
mod error;
mod logger;
mod metrics;

use error::AppResult;

fn main() -> AppResult<()> {
    entry::run()
}
