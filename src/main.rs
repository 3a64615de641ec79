use crate::config::Config;
use crate::error::SolverError;
use crate::export::Format;
use clap::{ArgAction, Parser};
use eyre::{Result, WrapErr};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{Level, info};

mod algos;
mod checks;
mod config;
mod display;
mod error;
mod export;
mod loaders;
mod model;
mod solver;
mod stats;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Options {
    /// Team data, or a request with `data` and `teamCount` fields (`-` for standard input)
    input: PathBuf,
    /// Configuration file (default: sciflow.toml if it exists)
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Number of teams
    #[arg(short, long)]
    teams: Option<usize>,
    /// Number of students per team
    #[arg(short = 's', long)]
    team_size: Option<usize>,
    /// Output format
    #[arg(short, long, value_enum, default_value_t)]
    format: Format,
    /// Write the assignments to this file instead of the standard output
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Do not display statistics
    #[arg(short, long)]
    quiet: bool,
    /// Set verbosity level
    #[arg(short, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<ExitCode> {
    color_eyre::install()?;
    let options = Options::parse();
    let level = match options.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
    match run(&options) {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) => match e.downcast_ref::<SolverError>() {
            Some(solver_error) => {
                eprintln!("Error: {solver_error}");
                Ok(ExitCode::from(solver_error.exit_code()))
            }
            None => Err(e),
        },
    }
}

fn run(options: &Options) -> Result<()> {
    let config = Config::load_or_default(options.config.as_deref())?;
    let mut settings = config.settings();
    if let Some(team_size) = options.team_size {
        settings.team_size = team_size;
    }
    let request = loaders::load(&options.input)?;
    let team_count = options
        .teams
        .or(request.team_count)
        .unwrap_or(config.solver.team_count);
    let solution = solver::compute(&request.data, team_count, &settings)?;
    match &options.output {
        Some(path) => {
            let file = File::create(path)
                .wrap_err_with(|| format!("cannot create output file {}", path.display()))?;
            let mut out = BufWriter::new(file);
            export::write_assignments(&mut out, &solution.assignments, options.format)?;
            out.flush()
                .wrap_err_with(|| format!("cannot write output file {}", path.display()))?;
            info!(path = %path.display(), "assignments written");
        }
        None => export::write_assignments(
            &mut io::stdout().lock(),
            &solution.assignments,
            options.format,
        )?,
    }
    if !options.quiet {
        // Keep the standard output parsable for machine-readable formats.
        let mut out: Box<dyn Write> = if options.format == Format::Table && options.output.is_none()
        {
            Box::new(io::stdout().lock())
        } else {
            Box::new(io::stderr().lock())
        };
        writeln!(out)?;
        writeln!(
            out,
            "Teams formed: {} of {team_count} requested",
            solution.teams
        )?;
        display::display_stats(&mut out, &request.data.students, &solution.assignments)?;
        display::display_skipped(&mut out, &solution.skipped)?;
    }
    Ok(())
}
