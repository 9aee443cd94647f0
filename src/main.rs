use std::env;

use anyhow::{Context, Result};
use tokio::io::AsyncReadExt;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use results_converter::{CommandClipboard, ConverterConfig, LocationResult, Session};

fn print_usage(program: &str) {
    eprintln!("Usage: {} [FILE] [--location] [--copy]", program);
    eprintln!("  FILE: pasted result text (default: stdin)");
    eprintln!("  --location: append the current location");
    eprintln!("  --copy: also copy the markdown to the clipboard");
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so stdout carries only the markdown
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "results_converter=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("results-converter");

    let mut path = None;
    let mut with_location = false;
    let mut copy = false;
    for arg in args.iter().skip(1) {
        match arg.as_str() {
            "--location" | "-l" => with_location = true,
            "--copy" | "-c" => copy = true,
            "--help" | "-h" => {
                print_usage(program);
                return Ok(());
            }
            flag if flag.starts_with('-') => {
                eprintln!("Unknown option: {}", flag);
                print_usage(program);
                std::process::exit(1);
            }
            file if path.is_none() => path = Some(file.to_string()),
            extra => {
                eprintln!("Unexpected argument: {}", extra);
                print_usage(program);
                std::process::exit(1);
            }
        }
    }

    let raw = match &path {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path))?,
        None => {
            let mut raw = String::new();
            tokio::io::stdin()
                .read_to_string(&mut raw)
                .await
                .context("Failed to read stdin")?;
            raw
        }
    };

    let config = ConverterConfig::from_env();
    let provider = config.build_provider()?;
    let mut session = Session::new(provider.clone());
    session.set_raw_text(raw);

    if with_location {
        session.request_location();
        if let LocationResult::Unavailable(reason) = provider.wait_for_terminal().await {
            eprintln!("{}", reason);
        }
    }

    let markdown = session.format().to_string();
    println!("{}", markdown);

    if copy {
        match CommandClipboard::new(&config.clipboard_cmd) {
            Some(clipboard) => session.copy_to(&clipboard).await?,
            None => anyhow::bail!("No clipboard command configured"),
        }
    }

    Ok(())
}
