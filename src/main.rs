use std::process;

use clap::Parser;
use env_logger::Env;

use movie_tags::args::Args;
use movie_tags::config::Config;

fn main() {
    let args = Args::parse();

    // RUST_LOG still wins over the verbose flag
    let default_level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_level)).init();

    let config = Config::build(&args);

    if let Err(e) = movie_tags::run(config) {
        eprintln!("Fatal Error: {e}");
        process::exit(1);
    }
}
