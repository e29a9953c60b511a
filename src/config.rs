use crate::aggregator::MalformedPolicy;
use crate::args::Args;
use std::path::PathBuf;

/// Configuration structure containing runtime settings.
///
/// # Fields
///
/// * `source` - Path of the comma separated tag file to aggregate
/// * `leaderboard_size` - Number of entries in each half of the startup leaderboard
/// * `batch_size` - Number of data lines counted together on one worker
/// * `policy` - Whether malformed lines are skipped or abort the load
///
#[derive(Clone, Debug)]
pub struct Config {
    pub source: PathBuf,
    pub leaderboard_size: usize,
    pub batch_size: usize,
    pub policy: MalformedPolicy,
}

impl Config {
    /// Builds a new Config instance from provided command line arguments.
    ///
    /// # Details
    ///
    /// This function performs the following setup:
    /// 1. Uses the requested thread count, or the available CPU cores when none was given
    /// 2. Configures the global rayon pool with that thread count
    /// 3. Clamps the batch size to at least one line
    /// 4. Copies the leaderboard size and malformed line policy
    ///
    /// A global pool that was already configured is logged as an error but doesn't halt
    /// execution; the existing pool is used instead.
    pub fn build(args: &Args) -> Config {
        let num_threads = args.threads.filter(|n| *n > 0).unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        });

        if let Err(e) = rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
        {
            log::error!("Could not configure thread pool: {}", e);
        }
        log::debug!("Counting tags using {} threads", num_threads);

        Config {
            source: PathBuf::from(&args.source),
            leaderboard_size: args.leaderboard_size,
            batch_size: args.batch_size.max(1),
            policy: args.on_malformed,
        }
    }
}
