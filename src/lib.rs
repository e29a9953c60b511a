pub mod aggregator;
pub mod args;
pub mod config;
pub mod errors;
pub mod leaderboard;
pub mod ranked_index;
pub mod session;
pub mod traits;

use std::io;

use indicatif::{ProgressBar, ProgressStyle};
use log::info;

use crate::aggregator::Aggregator;
use crate::config::Config;
use crate::errors::TagError;
use crate::ranked_index::RankedIndex;
use crate::session::Session;

pub use crate::traits::FoldCase;

/*
Loads the tag file named in the Config, ranks its tags, prints the leaderboard and then
answers queries typed on stdin until the user exits.
 */
pub fn run(config: Config) -> Result<(), TagError> {
    println!("Reading data file {} .....", config.source.display());

    let progress = ProgressBar::new(0).with_style(
        ProgressStyle::with_template("{spinner} counting tags [{bar:40}] {pos}/{len} batches")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let table = Aggregator::new(config.policy)
        .with_batch_size(config.batch_size)
        .with_progress(progress)
        .load(&config.source)?;

    info!(
        "Counted {} records into {} distinct tags, skipped {} lines",
        table.records(),
        table.len(),
        table.skipped().len()
    );

    let index = RankedIndex::from_table(table);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session::new(&index, stdin.lock(), stdout.lock());
    session.print_leaderboard(config.leaderboard_size)?;
    session.run()
}
