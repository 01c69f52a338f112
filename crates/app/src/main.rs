use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tokio::io::{AsyncBufRead, BufReader};
use tracing::info;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::writer::MakeWriterExt;

use spellvox_app::runtime::{self, Pipeline};
use spellvox_consensus::{ProcessorInput, ReplaySource, SessionCommand};

#[derive(Parser)]
#[command(name = "spellvox")]
#[command(about = "Replay recognizer alternatives through the consensus engine")]
#[command(version)]
struct Cli {
    /// JSON-lines segment file, or "-" for stdin
    #[arg(short, long, default_value = "-")]
    input: String,

    /// Resolve segments as spelled letters instead of free text
    #[arg(short, long)]
    alphabet: bool,

    /// Session configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Keep the whole transcript instead of the trailing window
    #[arg(long)]
    no_cap: bool,

    /// Only print the final transcript line
    #[arg(short, long)]
    quiet: bool,
}

fn init_logging() -> anyhow::Result<()> {
    std::fs::create_dir_all("logs")?;
    let file_appender = RollingFileAppender::new(Rotation::DAILY, "logs", "spellvox.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

    // Stdout carries the JSON-lines output, so logs go to stderr and the file.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr.and(non_blocking_file))
        .with_env_filter(log_level)
        .init();

    std::mem::forget(guard);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging()?;

    let mut config = spellvox_app::load_config(cli.config.as_deref())?;
    if cli.alphabet {
        config.alphabet_mode = true;
    }
    if cli.no_cap {
        config.transcript.tail_cap = None;
    }
    info!(
        alphabet_mode = config.alphabet_mode,
        tail_cap = ?config.transcript.tail_cap,
        input = %cli.input,
        "Starting spellvox replay"
    );

    // --- 1. Consensus pipeline ---
    let alphabet_mode = config.alphabet_mode;
    let Pipeline {
        input_tx,
        shutdown_tx,
        mut selection_rx,
        transcript,
        metrics,
        handle,
    } = runtime::spawn_pipeline(&config);

    // --- 2. Selection printer ---
    let quiet = cli.quiet;
    let printer = tokio::spawn(async move {
        while let Some(event) = selection_rx.recv().await {
            if quiet {
                continue;
            }
            match serde_json::to_string(&event) {
                Ok(line) => println!("{line}"),
                Err(e) => tracing::warn!("Failed to serialize selection: {e}"),
            }
        }
    });

    // --- 3. Replay the input ---
    input_tx
        .send(ProcessorInput::Command(SessionCommand::Start {
            alphabet_mode,
        }))
        .await
        .context("starting session")?;

    let reader: Box<dyn AsyncBufRead + Unpin + Send> = if cli.input == "-" {
        Box::new(BufReader::new(tokio::io::stdin()))
    } else {
        let file = tokio::fs::File::open(&cli.input)
            .await
            .with_context(|| format!("opening replay input {}", cli.input))?;
        Box::new(BufReader::new(file))
    };
    let mut source = ReplaySource::new(reader);

    tokio::select! {
        result = runtime::pump_source(&mut source, &input_tx) => {
            let pumped = result.context("replaying segments")?;
            info!(pumped, "Replay input exhausted");
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Interrupt received, stopping replay early");
        }
    }

    // --- 4. Drain and shut down ---
    let _ = input_tx
        .send(ProcessorInput::Command(SessionCommand::Stop))
        .await;
    drop(input_tx);
    let _ = shutdown_tx.send(()).await;

    handle.await.context("consensus processor task")?;
    printer.await.context("selection printer task")?;

    // --- 5. Final transcript ---
    let final_text = transcript.read();
    println!(
        "{}",
        serde_json::json!({ "type": "transcript", "text": final_text })
    );

    let stats = metrics.read();
    info!(
        segments = stats.segments_in,
        finals = stats.final_count,
        interims = stats.interim_count,
        letters = stats.letters_appended,
        empty = stats.empty_selections,
        ignored = stats.segments_ignored,
        "Replay complete"
    );

    Ok(())
}
