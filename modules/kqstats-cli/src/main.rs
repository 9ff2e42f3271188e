use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWriteExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use kqstats_stream::{read_recording, record_line, DecodeStats, Decoder, Event, Replay};

mod config;
use config::{Config, LogFormat};

#[derive(Parser)]
#[command(name = "kqstats")]
#[command(about = "Decode the Killer Queen cabinet stats feed into JSON events")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode lines from a file (or stdin) and print one JSON event per line
    Decode {
        /// Input file; reads stdin when omitted
        file: Option<PathBuf>,

        /// Append every received line, stamped with its receive time, to this recording
        #[arg(long)]
        record: Option<PathBuf>,

        /// Exit non-zero if any line failed to decode
        #[arg(long)]
        strict: bool,
    },

    /// Replay a recording through the decoder with pacing
    Replay {
        /// Recording produced by `decode --record`
        file: PathBuf,

        /// Delay between lines (defaults to KQSTATS_REPLAY_INTERVAL_MS or 1000)
        #[arg(long)]
        interval_ms: Option<u64>,

        /// Start over from the first line when the recording runs out
        #[arg(long = "loop")]
        looping: bool,

        /// Stop after this many lines
        #[arg(long)]
        limit: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();

    match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(1)
        }
    }
}

async fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = Config::from_env()?;
    init_tracing(config.log_format)?;

    let stats = match cli.command {
        Commands::Decode { file, record, strict } => {
            let stats = match file {
                Some(path) => {
                    let input = tokio::fs::File::open(&path)
                        .await
                        .with_context(|| format!("Failed to open {}", path.display()))?;
                    decode_stream(input, record).await?
                }
                None => decode_stream(tokio::io::stdin(), record).await?,
            };
            if strict && stats.total_rejected() > 0 {
                log_summary(&stats);
                return Ok(ExitCode::from(2));
            }
            stats
        }
        Commands::Replay {
            file,
            interval_ms,
            looping,
            limit,
        } => {
            let interval = interval_ms
                .map(Duration::from_millis)
                .unwrap_or(config.replay_interval);
            let lines = read_recording(&file)
                .await
                .with_context(|| format!("Failed to load recording {}", file.display()))?;
            info!(lines = lines.len(), path = %file.display(), looping, "Replaying recording");
            let replay = Replay::new(lines).looping(looping).with_interval(interval);
            replay_recording(replay, limit).await?
        }
    };

    log_summary(&stats);
    Ok(ExitCode::SUCCESS)
}

fn init_tracing(format: LogFormat) -> Result<()> {
    let filter = env_filter(std::env::var("RUST_LOG").ok().as_deref())?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    match format {
        LogFormat::Pretty => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
    Ok(())
}

/// `RUST_LOG` wins when set; otherwise only our own crates log, at info.
fn env_filter(rust_log: Option<&str>) -> Result<EnvFilter> {
    match rust_log {
        Some(directives) if !directives.trim().is_empty() => {
            EnvFilter::try_new(directives).context("Invalid RUST_LOG")
        }
        _ => Ok(EnvFilter::new("kqstats=info")),
    }
}

/// Decode every line of `input` in arrival order.
async fn decode_stream<R>(input: R, record: Option<PathBuf>) -> Result<DecodeStats>
where
    R: AsyncRead + Unpin,
{
    let mut recorder = match record {
        Some(path) => Some(
            tokio::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .await
                .with_context(|| format!("Failed to open recording {}", path.display()))?,
        ),
        None => None,
    };

    let decoder = Decoder::new();
    let mut stats = DecodeStats::new();
    let mut lines = BufReader::new(input).lines();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        if let Some(out) = recorder.as_mut() {
            let recorded = record_line(Utc::now(), &line);
            out.write_all(recorded.as_bytes()).await?;
            out.write_all(b"\n").await?;
        }
        emit(decoder.decode(&line), &mut stats)?;
    }

    if let Some(mut out) = recorder {
        out.flush().await?;
    }
    Ok(stats)
}

async fn replay_recording(mut replay: Replay, limit: Option<usize>) -> Result<DecodeStats> {
    let decoder = Decoder::new();
    let mut stats = DecodeStats::new();
    let mut played = 0usize;
    let interval = replay.interval();

    loop {
        if limit.is_some_and(|max| played >= max) {
            break;
        }
        let Some(line) = replay.next_line() else {
            break;
        };
        emit(decoder.decode(line), &mut stats)?;
        played += 1;

        tokio::select! {
            _ = tokio::time::sleep(interval) => {}
            _ = tokio::signal::ctrl_c() => {
                info!("Shutting down");
                break;
            }
        }
    }
    Ok(stats)
}

/// Print a decoded event as one JSON line, or log why the line was dropped.
fn emit(result: Result<Event, kqstats_stream::DecodeError>, stats: &mut DecodeStats) -> Result<()> {
    stats.record(&result);
    match result {
        Ok(event) => {
            let json = serde_json::to_string(&event).context("Failed to serialize event")?;
            println!("{json}");
        }
        Err(e) => warn!(class = e.class(), error = %e, "Dropped line"),
    }
    Ok(())
}

fn log_summary(stats: &DecodeStats) {
    let by_kind: Vec<String> = stats
        .decoded
        .iter()
        .map(|(kind, n)| format!("{kind}={n}"))
        .collect();
    info!(
        decoded = stats.total_decoded(),
        rejected = stats.total_rejected(),
        kinds = %by_kind.join(","),
        "Decode summary"
    );
}
