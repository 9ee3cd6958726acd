//! Command-line configuration.

use std::path::PathBuf;

use clap::Parser;
use gopherkv_compiler::{CompileOptions, KeyPrefix};

/// gopher2kv - compile a directory tree into Redis keys for Gopher mode
#[derive(Parser, Debug, Clone)]
#[command(name = "gopher2kv")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Target Redis host
    #[arg(long, env = "GOPHER2KV_HOST")]
    pub host: String,

    /// Target Redis TCP port
    #[arg(long, env = "GOPHER2KV_PORT", value_parser = clap::value_parser!(u16).range(1..))]
    pub port: u16,

    /// Directory to compile
    #[arg(long, env = "GOPHER2KV_ROOT", default_value = ".")]
    pub root: PathBuf,

    /// Key prefix of the root menu; must end with '/'
    #[arg(long, env = "GOPHER2KV_PREFIX", default_value = "/")]
    pub prefix: KeyPrefix,

    /// Host advertised in generated menu lines
    #[arg(long, env = "GOPHER2KV_LOCAL_HOST", default_value = "localhost")]
    pub local_host: String,

    /// Port advertised in generated menu lines
    #[arg(long, env = "GOPHER2KV_LOCAL_PORT", default_value_t = 70)]
    pub local_port: u16,

    /// Treat every entry as content, including modifiers and ordering prefixes
    #[arg(long)]
    pub all: bool,

    /// Write keys without asking
    #[arg(long, conflicts_with = "dry_run")]
    pub write: bool,

    /// Compile and list the keys, but never connect to Redis
    #[arg(long)]
    pub dry_run: bool,

    /// Print the compile report as JSON
    #[arg(long)]
    pub json: bool,

    /// Exit with a failure status if any entry was skipped
    #[arg(long)]
    pub strict: bool,

    /// Log every key written
    #[arg(short, long)]
    pub verbose: bool,
}

/// What to do once the tree is compiled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// List staged keys only.
    DryRun,
    /// Ask before writing.
    Confirm,
    /// Write straight away.
    Write,
}

/// Validated settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub redis_host: String,
    pub redis_port: u16,
    pub root: PathBuf,
    pub prefix: KeyPrefix,
    pub options: CompileOptions,
    pub mode: Mode,
    pub json: bool,
    pub strict: bool,
}

impl Config {
    pub fn from_args(args: Args) -> Self {
        let mode = if args.dry_run {
            Mode::DryRun
        } else if args.write {
            Mode::Write
        } else {
            Mode::Confirm
        };

        Self {
            redis_host: args.host,
            redis_port: args.port,
            root: args.root,
            prefix: args.prefix,
            options: CompileOptions {
                local_host: args.local_host,
                local_port: args.local_port,
                process_all: args.all,
            },
            mode,
            json: args.json,
            strict: args.strict,
        }
    }

    /// `host:port` of the Redis target.
    pub fn redis_address(&self) -> String {
        format!("{}:{}", self.redis_host, self.redis_port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("gopher2kv").chain(argv.iter().copied()))
    }

    #[test]
    fn minimal_arguments_use_defaults() {
        let config = Config::from_args(parse(&["--host", "127.0.0.1", "--port", "6379"]).unwrap());

        assert_eq!(config.redis_address(), "127.0.0.1:6379");
        assert_eq!(config.root, PathBuf::from("."));
        assert_eq!(config.prefix, KeyPrefix::root());
        assert_eq!(config.options, CompileOptions::default());
        assert_eq!(config.mode, Mode::Confirm);
        assert!(!config.json);
        assert!(!config.strict);
    }

    #[test]
    fn every_option_is_carried_over() {
        let args = parse(&[
            "--host",
            "redis.internal",
            "--port",
            "7000",
            "--root",
            "/srv/gopher",
            "--prefix",
            "/phlog/",
            "--local-host",
            "gopher.example.net",
            "--local-port",
            "7070",
            "--all",
            "--write",
            "--json",
            "--strict",
        ])
        .unwrap();
        let config = Config::from_args(args);

        assert_eq!(config.root, PathBuf::from("/srv/gopher"));
        assert_eq!(config.prefix.as_str(), "/phlog/");
        assert_eq!(
            config.options,
            CompileOptions {
                local_host: "gopher.example.net".to_string(),
                local_port: 7070,
                process_all: true,
            }
        );
        assert_eq!(config.mode, Mode::Write);
        assert!(config.json);
        assert!(config.strict);
    }

    #[test]
    fn dry_run_mode() {
        let config =
            Config::from_args(parse(&["--host", "h", "--port", "1", "--dry-run"]).unwrap());
        assert_eq!(config.mode, Mode::DryRun);
    }

    #[test]
    fn host_and_port_are_required() {
        assert!(parse(&["--port", "6379"]).is_err());
        assert!(parse(&["--host", "localhost"]).is_err());
    }

    #[test]
    fn zero_port_is_rejected() {
        assert!(parse(&["--host", "localhost", "--port", "0"]).is_err());
        assert!(parse(&["--host", "localhost", "--port", "seventy"]).is_err());
    }

    #[test]
    fn prefix_must_end_with_slash() {
        let err = parse(&["--host", "h", "--port", "1", "--prefix", "/phlog"]).unwrap_err();
        assert!(err.to_string().contains("must end with '/'"));
    }

    #[test]
    fn write_and_dry_run_conflict() {
        assert!(parse(&["--host", "h", "--port", "1", "--write", "--dry-run"]).is_err());
    }
}
