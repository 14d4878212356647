use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::{Parser, Subcommand};
use log::{error, info, LevelFilter};

use chess_engine::agent::run_stdio_loop;
use chess_engine::config::{EngineConfig, DEFAULT_HASH_MB};
use chess_engine::game_repr::{init_magics, Position, START_FEN};

#[derive(Parser, Debug)]
#[command(name = "chess_engine", version, about = "UCI chess engine")]
struct Cli {
    /// Transposition table size in MB
    #[arg(long, default_value_t = DEFAULT_HASH_MB)]
    hash: usize,

    /// Deepest iteration when `go` gives no depth
    #[arg(long, default_value_t = 64)]
    max_depth: i32,

    /// Keep the transposition table between searches until `ucinewgame`
    #[arg(long)]
    reuse_tt: bool,

    /// File receiving a record for every `go` that fell back to a default move
    #[arg(long, value_name = "PATH")]
    error_log: Option<PathBuf>,

    /// Do not write the error log
    #[arg(long, conflicts_with = "error_log")]
    no_error_log: bool,

    /// Log level on stderr, overridden by RUST_LOG
    #[arg(long, default_value = "warn")]
    log_level: LevelFilter,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Count leaf nodes of the legal move tree
    Perft {
        depth: u32,

        #[arg(long, default_value = START_FEN)]
        fen: String,

        /// Print the count below each root move
        #[arg(long)]
        divide: bool,

        /// Split the root moves across threads
        #[arg(long)]
        parallel: bool,
    },
}

impl Cli {
    fn engine_config(&self) -> EngineConfig {
        let defaults = EngineConfig::default();
        let error_log = if self.no_error_log {
            None
        } else {
            self.error_log.clone().or(defaults.error_log)
        };
        EngineConfig {
            hash_mb: self.hash,
            max_depth: self.max_depth,
            reuse_tt: self.reuse_tt,
            error_log,
            ..defaults
        }
        .normalized()
    }
}

fn run_perft(fen: &str, depth: u32, divide: bool, parallel: bool) -> Result<(), String> {
    let mut pos = Position::from_fen(fen).map_err(|e| e.to_string())?;
    let start = Instant::now();

    let nodes = if divide || parallel {
        let mut counts = if parallel {
            pos.divide_parallel(depth)
        } else {
            pos.divide(depth)
        };
        counts.sort_by_key(|(mv, _)| mv.to_uci());
        if divide {
            for (mv, count) in &counts {
                println!("{}: {}", mv, count);
            }
            println!();
        }
        counts.iter().map(|(_, count)| count).sum()
    } else {
        pos.perft(depth)
    };

    let elapsed = start.elapsed();
    println!("Nodes searched: {}", nodes);
    println!(
        "Time: {} ms ({:.2} Mnps)",
        elapsed.as_millis(),
        nodes as f64 / elapsed.as_secs_f64().max(1e-9) / 1e6
    );
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.log_level)
        .parse_default_env()
        .target(env_logger::Target::Stderr)
        .init();

    init_magics();

    let result = match &cli.command {
        Some(Command::Perft {
            depth,
            fen,
            divide,
            parallel,
        }) => run_perft(fen, *depth, *divide, *parallel),
        None => {
            let config = cli.engine_config();
            info!("starting UCI loop with {:?}", config);
            run_stdio_loop(config).map_err(|e| e.to_string())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}
