//! routenet - analysis of logistics route networks
//!
//! Loads a route list, runs the requested analysis, prints the report and appends it to the
//! per-graph report log.

mod cli;

use std::process::ExitCode;

use clap::Parser;
use tracing::info;

use cli::Cli;
use routenet::analysis::Analysis;
use routenet::error::Result;
use routenet::io::{GraphReader, RouteListReader};
use routenet::logging;
use routenet::report_log::ReportLog;

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => err.exit(),
    };

    if let Err(e) = logging::init_tracing(cli.verbose, cli.log_level.as_deref(), cli.log_json) {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let representation = cli.representation();
    let analysis = cli.command.analysis();
    let config = cli.config()?;

    let graph = RouteListReader::new()
        .representation(representation)
        .density_threshold(config.density_threshold)
        .try_read_graph_file(&cli.graph_file)?;

    let report = analysis.run(&graph, &config)?;
    print!("{}", report);
    if !report.ends_with('\n') {
        println!();
    }

    if cli.no_log {
        return Ok(());
    }

    let log = ReportLog::new(&config.log_dir);
    if analysis != Analysis::Overview {
        log.append(cli.graph_index, &Analysis::Overview.run(&graph, &config)?)?;
    }
    let path = log.append(cli.graph_index, &report)?;
    info!(path = %path.display(), analysis = analysis.name(), "report logged");

    Ok(())
}
