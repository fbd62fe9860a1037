use clap::Parser;

use crate::args::AnalyzerArgs;
use crate::error::AppResult;
use crate::{app, config, logger};

pub(crate) fn run() -> AppResult<()> {
    let args = AnalyzerArgs::parse();
    logger::init_logging(&args);

    let settings = config::resolve_settings(&args)?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(app::run_replay(&settings))
}
