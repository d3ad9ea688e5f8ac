mod aggregator;
mod config;
mod error;
mod filters;
mod git;
mod languages;
mod ranking;
mod reporters;
mod types;

use clap::Parser;
use colored::Colorize;
use indicatif::{ParallelProgressIterator, ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

use aggregator::Aggregator;
use error::{FameError, FameResult};
use filters::FileFilter;
use types::*;

#[derive(Parser, Debug)]
#[command(
    name = "git-fame",
    about = "Attribute the lines of a git tree to their authors and rank contributors",
    version,
    long_about = "Blames every tracked file at a revision and reports, per contributor,\n\
                  the number of lines they own, the distinct commits those lines come\n\
                  from, and the distinct files they appear in.\n\n\
                  Defaults can be stored in .git-fame.yml (see --generate-config)."
)]
struct Args {
    /// Repository root. Defaults to the current directory.
    #[arg(long, value_name = "PATH")]
    repository: Option<PathBuf>,

    /// Revision whose tree is attributed [default: HEAD]
    #[arg(long, value_name = "REF")]
    revision: Option<String>,

    /// Primary ranking key [default: lines]
    #[arg(long, value_enum)]
    order_by: Option<SortKey>,

    /// Credit committers instead of authors
    #[arg(long)]
    use_committer: bool,

    /// Output format [default: tabular]
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Only files ending with one of these suffixes, e.g. '.go,.md'
    #[arg(long, value_delimiter = ',')]
    extensions: Vec<String>,

    /// Only files written in these languages, e.g. 'go,markdown'
    #[arg(long, value_delimiter = ',')]
    languages: Vec<String>,

    /// Skip files matching any of these globs, e.g. 'foo/*,bar/*'
    #[arg(long, value_delimiter = ',')]
    exclude: Vec<String>,

    /// Keep only files matching at least one of these globs
    #[arg(long, value_delimiter = ',')]
    restrict_to: Vec<String>,

    /// YAML config file. Defaults to <repository>/.git-fame.yml if present.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print an annotated config template and exit
    #[arg(long)]
    generate_config: bool,

    /// Log more (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Everything a run needs, after merging CLI flags over the config file.
#[derive(Debug)]
struct RunOptions {
    repository: PathBuf,
    revision:   String,
    order_by:   SortKey,
    format:     OutputFormat,
    role:       IdentityRole,
    filter:     FileFilter,
}

fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            let _ = e.print();
            std::process::exit(11);
        }
    };

    init_tracing(args.verbose);

    if args.generate_config {
        if let Err(e) = config::print_template(&mut io::stdout()) {
            fail(&FameError::Io(e));
        }
        return;
    }

    if let Err(e) = run(&args) {
        fail(&e);
    }
}

fn fail(e: &FameError) -> ! {
    eprintln!("{} {e}", "error:".red().bold());
    std::process::exit(e.exit_code());
}

fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init()
        .ok();
}

// ── Pipeline ───────────────────────────────────────────────────────────────────

fn run(args: &Args) -> FameResult<()> {
    let options = resolve_options(args)?;
    let rows = collect_stats(&options)?;

    // Rendered only once every file has been attributed, so a failure
    // never leaves partial output behind.
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    reporters::render(options.format, &rows, &mut out)?;
    out.flush()?;
    Ok(())
}

fn resolve_options(args: &Args) -> FameResult<RunOptions> {
    let repository = match &args.repository {
        Some(path) => path.clone(),
        None => std::env::current_dir()
            .map_err(|e| FameError::Config(format!("cannot determine current directory: {e}")))?,
    };
    ensure_repository(&repository)?;

    let cfg = config::discover_config(args.config.as_deref(), &repository).map_err(FameError::Config)?;

    let revision = args.revision.clone()
        .or_else(|| cfg.revision.clone())
        .unwrap_or_else(|| "HEAD".to_string());
    let order_by = args.order_by.or_else(|| cfg.sort_key()).unwrap_or_default();
    let format = args.format.or_else(|| cfg.output_format()).unwrap_or_default();
    let role = IdentityRole::from_use_committer(args.use_committer || cfg.use_committer.unwrap_or(false));

    let filter = FileFilter::new(
        &list_or_config(&args.extensions, &cfg.extensions),
        &list_or_config(&args.languages, &cfg.languages),
        &list_or_config(&args.exclude, &cfg.exclude),
        &list_or_config(&args.restrict_to, &cfg.restrict_to),
    )?;

    Ok(RunOptions { repository, revision, order_by, format, role, filter })
}

fn list_or_config(flag: &[String], fallback: &Option<Vec<String>>) -> Vec<String> {
    if flag.is_empty() { fallback.clone().unwrap_or_default() } else { flag.to_vec() }
}

fn ensure_repository(path: &Path) -> FameResult<()> {
    if path.join(".git").exists() {
        Ok(())
    } else {
        Err(FameError::NotARepository(path.to_path_buf()))
    }
}

/// Lists, filters, blames and aggregates, then ranks.
fn collect_stats(options: &RunOptions) -> FameResult<Vec<AuthorStats>> {
    let started = Instant::now();

    let tracked = git::ls_tree::list_files(&options.repository, &options.revision)?;
    let files = filters::filter_files(&tracked, &options.filter);
    tracing::info!(
        repository = %options.repository.display(),
        revision = options.revision.as_str(),
        tracked = tracked.len(),
        selected = files.len(),
        "attributing files"
    );

    let aggregator = attribute(options, &files)?;
    let records = aggregator.finish();
    let rows = ranking::rank_authors(&records, options.order_by);

    tracing::info!(authors = rows.len(), elapsed_ms = started.elapsed().as_millis() as u64, "done");
    Ok(rows)
}

/// Blames files in parallel. Each worker folds its files into a partial
/// aggregator; partials are merged by set union, so the totals do not depend
/// on how files were split between workers.
fn attribute(options: &RunOptions, files: &[TrackedFile]) -> FameResult<Aggregator> {
    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} blaming [{pos}/{len}] {wide_bar}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let result: FameResult<Aggregator> = files
        .par_iter()
        .progress_with(pb.clone())
        .map(|file| git::blame::attribute_file(&options.repository, &options.revision, file, options.role))
        .try_fold(
            Aggregator::new,
            |mut partial: Aggregator, events: FameResult<Vec<AttributionEvent>>| -> FameResult<Aggregator> {
                partial.record_all(&events?);
                Ok(partial)
            },
        )
        .try_reduce(Aggregator::new, |mut left, right| {
            left.merge(right);
            Ok(left)
        });
    pb.finish_and_clear();
    result
}

// ── Tests ──────────────────────────────────────────────────────────────────────
