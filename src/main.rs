// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use anyhow::{anyhow, Context};
use std::env;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_util::sync::CancellationToken;

use sk_to_n2k::backends::memory::MemoryValueSource;
use sk_to_n2k::backends::pgn::LayoutEncoder;
use sk_to_n2k::backends::sink::{forward, WriterSink};
use sk_to_n2k::config::consts::DEBOUNCE_WINDOW;
use sk_to_n2k::config::load_config;
use sk_to_n2k::conversions;
use sk_to_n2k::engine::Engine;
use sk_to_n2k::observability::init_tracing;

fn usage(program: &str) {
    eprintln!("Usage: {} <config.yaml|toml|json>", program);
    eprintln!("       {} --list", program);
    eprintln!();
    eprintln!("Reads Signal K updates from stdin, one per line, either");
    eprintln!("  propulsion.port.revolutions=25.5");
    eprintln!("or a JSON delta, and writes Actisense lines to stdout.");
}

/// argv[0], or the binary name when the OS passed no arguments at all.
fn program_name(args: &[String]) -> &str {
    args.first().map(String::as_str).unwrap_or("sk-to-n2k")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() >= 2 && args[1] == "--list" {
        for entry in conversions::builtin()?.catalog() {
            println!("{:<22} {}", entry.option_key, entry.title);
        }
        return Ok(());
    }

    if args.len() != 2 {
        usage(program_name(&args));
        std::process::exit(1);
    }

    let config = load_config(&args[1]).with_context(|| format!("loading {}", args[1]))?;
    init_tracing(&config.logging.filter);

    let source = Arc::new(MemoryValueSource::new());
    let mut engine = Engine::builder(source.clone(), Arc::new(LayoutEncoder::standard()))
        .raw_events(source.clone())
        .registry(conversions::builtin()?)
        .build();

    let shutdown = CancellationToken::new();
    let lines = engine.outbound().subscribe();
    let writer = {
        let shutdown = shutdown.clone();
        tokio::spawn(async move {
            let mut sink = WriterSink::new(tokio::io::stdout());
            forward(lines, &mut sink, shutdown).await
        })
    };

    let report = engine.start(config.conversions)?;
    if report.started.is_empty() {
        tracing::warn!("No conversions started; check the 'conversions' section of {}", args[1]);
    }

    let mut input = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            line = input.next_line() => match line.context("reading stdin")? {
                Some(line) => {
                    if let Err(e) = source.ingest_line(&line) {
                        tracing::warn!(error = %e, "Ignoring malformed input line");
                    }
                }
                None => {
                    // Let the last debounced burst flush before shutting down.
                    tokio::time::sleep(DEBOUNCE_WINDOW * 2).await;
                    break;
                }
            },
        }
    }

    engine.stop();
    shutdown.cancel();
    let written = writer.await.map_err(|e| anyhow!("writer task failed: {}", e))??;
    tracing::info!(written, "Shut down");
    Ok(())
}
