use clap::Parser;

use crate::aggregator::MalformedPolicy;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// (optional) Comma separated tag file, the header line is skipped
    #[arg(short = 'f', long = "file", default_value = "tags.csv")]
    pub source: String,

    /// (optional) Number of most and least frequent tags to show at startup
    #[arg(short = 'n', long = "leaderboard-size", default_value_t = 3)]
    pub leaderboard_size: usize,

    /// (optional) Number of data lines counted per parallel batch
    #[arg(short = 'b', long = "batch-size", default_value_t = 1000)]
    pub batch_size: usize,

    /// (optional) defaults to the available parallelism of this machine
    #[arg(short = 't', long = "threads")]
    pub threads: Option<usize>,

    /// (optional) What to do with a line that has no tag field
    #[arg(short = 'm', long = "on-malformed", value_enum, default_value_t = MalformedPolicy::Skip)]
    pub on_malformed: MalformedPolicy,

    #[arg(short, long)]
    pub verbose: bool,
}
