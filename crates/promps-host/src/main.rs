//! promps - serve Promps commands over stdin/stdout
//!
//! Reads one JSON request per line and writes one JSON response per line.
//! Logs go to stderr.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use promps_core::Locale;
use promps_host::{handle_line, AppConfig, HostState};

#[derive(Parser)]
#[command(name = "promps")]
#[command(about = "Serve Promps grammar and pattern commands as JSON lines")]
struct Args {
    /// Configuration file (defaults are used when it does not exist)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the configured default locale
    #[arg(short, long)]
    locale: Option<Locale>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => match AppConfig::load_or_default(path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("Failed to load configuration {:?}: {}", path, e);
                return ExitCode::FAILURE;
            }
        },
        None => AppConfig::default(),
    };
    if let Some(locale) = args.locale {
        config.default_locale = locale;
    }

    log::info!("Promps host starting (locale: {})", config.default_locale);
    let mut state = HostState::from_config(config);

    match serve(&mut state, io::stdin().lock(), io::stdout().lock()) {
        Ok(()) => {
            log::info!("Input closed, shutting down");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("I/O error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn serve(state: &mut HostState, input: impl BufRead, mut output: impl Write) -> io::Result<()> {
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        writeln!(output, "{}", handle_line(state, &line))?;
        output.flush()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serve_one_response_per_request() {
        let mut state = HostState::default();
        let input = "{\"id\":1,\"command\":\"greet\",\"args\":{\"name\":\"Ada\"}}\n\n{\"id\":2,\"command\":\"list_macros\"}\n";
        let mut output = Vec::new();

        serve(&mut state, input.as_bytes(), &mut output).unwrap();

        let text = String::from_utf8(output).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("Hello, Ada!"));
        assert!(lines[1].contains("\"ok\":true"));
    }
}
