#![deny(clippy::implicit_return)]
#![allow(clippy::needless_return)]

mod application;
mod configuration;
mod domain;
mod infrastructure;

use std::env;
use std::process;
use std::process::ExitCode;

use anyhow::Error;
use owo_colors::OwoColorize;
use owo_colors::Stream;

use crate::application::cli;
use crate::application::terminal;

fn handle_error(err: Error) {
    let message = format!(
        "Oh no! coachlm has failed with the following app version and error.\n\nVersion: {}\nError: {:#}",
        env!("CARGO_PKG_VERSION"),
        err
    );
    eprintln!(
        "{}",
        message.if_supports_color(Stream::Stderr, |t| return t.red())
    );

    let backtrace = err.backtrace();
    if backtrace.to_string() == "disabled backtrace" {
        let args = env::args().collect::<Vec<String>>().join(" ");
        eprintln!("\nRunning the following can help explain further what the issue is:");
        eprintln!("\nRUST_BACKTRACE=1 RUST_LOG=coachlm {args}");
    } else {
        eprintln!("\n{}", backtrace);
    }

    process::exit(1);
}

#[tokio::main]
async fn main() -> ExitCode {
    better_panic::install();

    let _guard = if env::var("RUST_LOG")
        .unwrap_or_else(|_| return "".to_string())
        .contains("coachlm")
    {
        let debug_log_dir = env::var("COACHLM_LOG_DIR").unwrap_or_else(|_| {
            return dirs::cache_dir()
                .unwrap_or_else(env::temp_dir)
                .join("coachlm")
                .to_string_lossy()
                .to_string();
        });

        let file_appender = tracing_appender::rolling::never(debug_log_dir, "debug.log");
        let (writer, guard) = tracing_appender::non_blocking(file_appender);
        tracing_subscriber::fmt()
            .json()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(writer)
            .init();

        Some(guard)
    } else {
        None
    };

    let intent = match cli::parse().await {
        Ok(Some(intent)) => intent,
        Ok(None) => return ExitCode::SUCCESS,
        Err(err) => {
            handle_error(err);
            return ExitCode::FAILURE;
        }
    };

    match terminal::start(intent).await {
        Ok(outcome) => return outcome.exit_code(),
        Err(err) => {
            handle_error(err);
            return ExitCode::FAILURE;
        }
    }
}
