//! The compile-confirm-publish flow.

use std::io::{self, BufRead, Write};

use gopherkv_compiler::{compile, CompileError, CompileReport, LocalFilesystem};
use gopherkv_store::{InMemoryStore, KvWriter, RedisStore, StoreError};

use crate::config::{Config, Mode};

#[derive(thiserror::Error, Debug)]
pub enum CliError {
    #[error("root path {} is not a directory", .0.display())]
    RootNotDirectory(std::path::PathBuf),

    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error("store error ({address}): {source}")]
    Store {
        address: String,
        #[source]
        source: StoreError,
    },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// How a run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub report: CompileReport,
    /// Keys copied to Redis; `None` when nothing was written.
    pub written: Option<usize>,
}

/// Run against the real filesystem and Redis.
pub fn run(config: &Config) -> Result<Outcome, CliError> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    run_with(
        config,
        &mut stdin.lock(),
        &mut stdout.lock(),
        |config: &Config| -> Result<Box<dyn KvWriter>, StoreError> {
            let store = RedisStore::connect(&config.redis_host, config.redis_port)?;
            log::debug!("Connected to redis at {}", store.address());
            Ok(Box::new(store))
        },
    )
}

/// Run with explicit input, output and store factory.
///
/// The tree is compiled into an in-memory staging store first, so nothing
/// touches Redis until the whole tree has been read successfully and the
/// user has agreed to write.
pub fn run_with<C>(
    config: &Config,
    input: &mut dyn BufRead,
    output: &mut dyn Write,
    connect: C,
) -> Result<Outcome, CliError>
where
    C: FnOnce(&Config) -> Result<Box<dyn KvWriter>, StoreError>,
{
    if !config.root.is_dir() {
        return Err(CliError::RootNotDirectory(config.root.clone()));
    }

    log::info!(
        "Compiling {} into {}",
        config.root.display(),
        config.prefix
    );
    let mut staging = InMemoryStore::new();
    let report = compile(
        &LocalFilesystem,
        &mut staging,
        &config.root,
        &config.prefix,
        &config.options,
    )?;

    let written = match config.mode {
        Mode::DryRun => {
            for (key, value) in staging.iter() {
                writeln!(output, "{}\t{} bytes", key, value.len())?;
            }
            None
        }
        Mode::Confirm => {
            if confirm(&staging, config, input, output)? {
                Some(publish(&staging, config, connect)?)
            } else {
                writeln!(output, "Nothing written.")?;
                None
            }
        }
        Mode::Write => Some(publish(&staging, config, connect)?),
    };

    if config.json {
        serde_json::to_writer_pretty(&mut *output, &report)?;
        writeln!(output)?;
    } else {
        print_summary(output, &report, written)?;
    }

    Ok(Outcome { report, written })
}

/// Process exit status for a finished run.
///
/// Failures exit with 1. A run that skipped entries exits with 2 when
/// `strict` is set.
pub fn exit_code(result: &Result<Outcome, CliError>, strict: bool) -> i32 {
    match result {
        Ok(outcome) if strict && !outcome.report.is_clean() => 2,
        Ok(_) => 0,
        Err(_) => 1,
    }
}

fn confirm(
    staging: &InMemoryStore,
    config: &Config,
    input: &mut dyn BufRead,
    output: &mut dyn Write,
) -> Result<bool, CliError> {
    write!(
        output,
        "Write {} keys to {}? [y/N] ",
        staging.len(),
        config.redis_address()
    )?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    let answer = answer.trim();
    Ok(answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes"))
}

fn publish<C>(staging: &InMemoryStore, config: &Config, connect: C) -> Result<usize, CliError>
where
    C: FnOnce(&Config) -> Result<Box<dyn KvWriter>, StoreError>,
{
    let store_error = |source: StoreError| CliError::Store {
        address: config.redis_address(),
        source,
    };

    let mut store = connect(config).map_err(store_error)?;
    let written = staging.flush_into(&mut *store).map_err(store_error)?;
    log::info!("Wrote {} keys to {}", written, config.redis_address());
    Ok(written)
}

fn print_summary(
    output: &mut dyn Write,
    report: &CompileReport,
    written: Option<usize>,
) -> io::Result<()> {
    writeln!(
        output,
        "{} menus, {} files, {} links ({} modifiers skipped)",
        report.menus_written, report.blobs_written, report.links_resolved, report.modifiers_skipped
    )?;
    for diagnostic in &report.diagnostics {
        writeln!(output, "warning: {}", diagnostic)?;
    }
    if let Some(written) = written {
        writeln!(output, "{} keys written.", written)?;
    }
    Ok(())
}
