use clap::Parser;
use env_logger::Env;

use gopherkv_cli::{Args, Config};

fn main() {
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    let config = Config::from_args(args);
    let result = gopherkv_cli::run(&config);
    if let Err(e) = &result {
        eprintln!("Error: {}", e);
    }
    std::process::exit(gopherkv_cli::exit_code(&result, config.strict));
}
