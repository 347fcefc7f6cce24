use std::process::ExitCode;

use clap::Parser;

mod cli;
use cli::Cli;

pub fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // usage errors go to stderr; --help & --version go to stdout
            let code = if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
            let _ = e.print();
            return code;
        }
    };
    cli::initialize_tracing(&cli.log_filter, cli.log_format);

    match obj2ply::convert_with(&cli.input, &cli.output, &cli.options()) {
        Ok(report) => {
            tracing::debug!(?report, "conversion complete");
            println!(
                "Success: converted {} -> {} ({} vertices, {} triangles)",
                cli.input.display(),
                cli.output.display(),
                report.vertices,
                report.triangles
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::debug!(error = ?e, "conversion failed");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
