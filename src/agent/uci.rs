//! UCI protocol front-end and command loop.
//!
//! Keeps the current position, turns `go` into a search under the derived
//! time budget and prints protocol output. A reader thread owns stdin so a
//! `stop` or `quit` typed during a search reaches the search through the
//! shared stop flag.

use std::fs::OpenOptions;
use std::io::{self, BufRead, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Sender};
use std::sync::Arc;
use std::thread;

use log::{debug, error, info, warn};

use super::ai::{allocate_time_ms, GoParams, SearchLimits, Searcher};
use crate::config::{clamp_hash_mb, EngineConfig, MAX_HASH_MB, MAX_SEARCH_DEPTH, MIN_HASH_MB};
use crate::error::{UciError, UciResult};
use crate::game_repr::{Position, START_FEN};

const ENGINE_NAME: &str = "Chess Engine";
const ENGINE_AUTHOR: &str = "kechprog";

const COMMANDS: [&str; 12] = [
    "uci",
    "isready",
    "setoption",
    "ucinewgame",
    "position",
    "go",
    "stop",
    "d",
    "debug",
    "quit",
    "register",
    "ponderhit",
];

/// Run the engine on stdin/stdout until `quit` or end of input
pub fn run_stdio_loop(config: EngineConfig) -> UciResult<()> {
    let mut engine = UciEngine::new(config);
    let stop = engine.stop_handle();
    let (tx, rx) = mpsc::channel();

    let reader = thread::spawn(move || read_commands(io::stdin().lock(), &stop, &tx));

    let mut stdout = io::stdout();
    for line in rx {
        let quit = engine.handle_command(&line, &mut stdout)?;
        stdout.flush()?;
        if quit {
            break;
        }
    }

    match reader.join() {
        Ok(result) => result?,
        Err(_) => warn!("input thread panicked"),
    }
    info!("engine shutting down");
    Ok(())
}

/// Forward input lines to the engine loop. `stop` and `quit` also raise the
/// stop flag right away, since the engine loop is busy while it searches.
pub fn read_commands<R: BufRead>(input: R, stop: &AtomicBool, tx: &Sender<String>) -> io::Result<()> {
    for line in input.lines() {
        let line = line?;
        let command = line.split_whitespace().find(|tok| COMMANDS.contains(tok));
        if matches!(command, Some("stop") | Some("quit")) {
            stop.store(true, Ordering::Relaxed);
        }
        let quit = command == Some("quit");
        if tx.send(line).is_err() || quit {
            break;
        }
    }
    Ok(())
}

pub struct UciEngine {
    pos: Position,
    searcher: Searcher,
    stop: Arc<AtomicBool>,
    config: EngineConfig,
    /// Last accepted `position` command, copied into error log records
    last_position: String,
    debug_mode: bool,
}

impl UciEngine {
    pub fn new(config: EngineConfig) -> Self {
        let config = config.normalized();
        let searcher = Searcher::new(&config);
        let stop = searcher.stop_handle();
        Self {
            pos: Position::default(),
            searcher,
            stop,
            config,
            last_position: "position startpos".to_string(),
            debug_mode: false,
        }
    }

    pub fn position(&self) -> &Position {
        &self.pos
    }

    pub fn stop_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop)
    }

    /// Handle one input line. Returns true when the engine should quit.
    pub fn handle_command(&mut self, line: &str, out: &mut impl Write) -> UciResult<bool> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        // Leading tokens that are not commands are skipped
        let Some(start) = tokens.iter().position(|tok| COMMANDS.contains(tok)) else {
            if let Some(first) = tokens.first() {
                debug!("ignoring unknown command '{}'", first);
            }
            return Ok(false);
        };
        let trimmed = tokens[start..].join(" ");
        let trimmed = trimmed.as_str();
        let mut parts = tokens[start..].iter().copied();
        let Some(cmd) = parts.next() else {
            return Ok(false);
        };

        match cmd {
            "uci" => {
                writeln!(out, "id name {} {}", ENGINE_NAME, env!("CARGO_PKG_VERSION"))?;
                writeln!(out, "id author {}", ENGINE_AUTHOR)?;
                writeln!(
                    out,
                    "option name Hash type spin default {} min {} max {}",
                    self.config.hash_mb, MIN_HASH_MB, MAX_HASH_MB
                )?;
                writeln!(out, "option name Clear Hash type button")?;
                writeln!(out, "uciok")?;
            }
            "isready" => {
                writeln!(out, "readyok")?;
            }
            "setoption" => {
                if let Err(err) = self.handle_setoption(trimmed) {
                    warn!("{}", err);
                    writeln!(out, "info string setoption error: {}", err)?;
                }
            }
            "ucinewgame" => {
                self.pos = Position::default();
                self.last_position = "position startpos".to_string();
                self.searcher.new_game();
            }
            "position" => {
                if let Err(err) = self.handle_position(trimmed) {
                    warn!("{}", err);
                    writeln!(out, "info string position error: {}", err)?;
                }
            }
            "go" => self.handle_go(trimmed, out)?,
            "stop" => {
                // Any search has already returned; lower the flag the reader raised
                self.stop.store(false, Ordering::Relaxed);
            }
            "d" => {
                writeln!(out, "{}", self.pos)?;
            }
            "debug" => {
                self.debug_mode = parts.next() == Some("on");
            }
            "quit" => return Ok(true),
            // Nothing to do for these
            "register" | "ponderhit" => {}
            other => debug!("ignoring unknown command '{}'", other),
        }

        Ok(false)
    }

    fn handle_setoption(&mut self, line: &str) -> UciResult<()> {
        let mut name_tokens = Vec::new();
        let mut value_tokens = Vec::new();
        let mut in_value = false;
        let mut seen_name = false;

        for tok in line.split_whitespace().skip(1) {
            match tok {
                "name" if !seen_name => seen_name = true,
                "value" if seen_name => in_value = true,
                _ if in_value => value_tokens.push(tok),
                _ if seen_name => name_tokens.push(tok),
                _ => {}
            }
        }
        let name = name_tokens.join(" ");
        let value = value_tokens.join(" ");

        if name.eq_ignore_ascii_case("Hash") {
            let mb: usize = value
                .parse()
                .map_err(|_| UciError::Command(format!("invalid Hash value '{}'", value)))?;
            self.config.hash_mb = clamp_hash_mb(mb);
            self.searcher.resize_tt(self.config.hash_mb);
            info!("hash set to {} MB", self.config.hash_mb);
        } else if name.eq_ignore_ascii_case("Clear Hash") {
            self.searcher.new_game();
        } else {
            return Err(UciError::Command(format!("unknown option '{}'", name)));
        }
        Ok(())
    }

    /// Replace the position. A bad FEN leaves the old one in place; illegal
    /// moves in the move list are skipped.
    fn handle_position(&mut self, line: &str) -> UciResult<()> {
        let mut tokens = line.split_whitespace().skip(1).peekable();

        let mut pos = match tokens.next() {
            Some("startpos") => Position::from_fen(START_FEN)?,
            Some("fen") => {
                let mut fields = Vec::new();
                while let Some(&tok) = tokens.peek() {
                    if tok == "moves" {
                        break;
                    }
                    fields.push(tok);
                    tokens.next();
                }
                if fields.is_empty() {
                    return Err(UciError::Command("missing FEN after 'position fen'".to_string()));
                }
                Position::from_fen(&fields.join(" "))?
            }
            Some(other) => return Err(UciError::Command(format!("unsupported position token '{}'", other))),
            None => return Err(UciError::Command("incomplete position command".to_string())),
        };

        if tokens.next() == Some("moves") {
            for text in tokens {
                match pos.parse_uci_move(text) {
                    Ok(mv) => pos.make_move(mv),
                    Err(err) => warn!("skipping move: {}", err),
                }
            }
        }

        self.pos = pos;
        self.last_position = line.to_string();
        Ok(())
    }

    fn handle_go(&mut self, line: &str, out: &mut impl Write) -> UciResult<()> {
        let params = parse_go_params(line);
        let limits = SearchLimits {
            time_ms: allocate_time_ms(&params, self.pos.side_to_move(), self.pos.eval().stage),
            max_depth: params.depth.unwrap_or(self.config.max_depth).clamp(1, MAX_SEARCH_DEPTH),
            infinite: params.infinite,
        };
        debug!("go: budget {} ms, max depth {}", limits.time_ms, limits.max_depth);

        let mut write_error = None;
        let result = self.searcher.search(&mut self.pos, limits, |info| {
            let written = writeln!(out, "{}", info.to_uci()).and_then(|_| out.flush());
            if let Err(err) = written {
                if write_error.is_none() {
                    write_error = Some(err);
                }
            }
        });
        if let Some(err) = write_error {
            return Err(err.into());
        }

        if self.debug_mode {
            let tt = self.searcher.tt();
            writeln!(
                out,
                "info string nodes {} time {} hashfull {} tt hit rate {:.2}",
                result.nodes,
                result.time_ms,
                tt.hashfull(),
                tt.hit_rate()
            )?;
        }

        let bestmove = match result.best_move {
            Some(mv) => format!("bestmove {}", mv),
            None => {
                // No iteration finished: play the first legal move if there is one
                let fallback = self.pos.legal_moves().first().copied();
                let bestmove = match fallback {
                    Some(mv) => format!("bestmove {}", mv),
                    None => "bestmove 0000".to_string(),
                };
                error!("search produced no move for '{}', sending '{}'", self.pos.to_fen(), bestmove);
                self.record_failed_go(line, &bestmove);
                bestmove
            }
        };
        writeln!(out, "{}", bestmove)?;
        Ok(())
    }

    /// Append a record for a `go` that needed the fallback move
    fn record_failed_go(&self, go_line: &str, bestmove: &str) {
        let Some(path) = &self.config.error_log else {
            return;
        };
        let record = format!(
            "[{}]\n{}\n{}\n{}\n\n",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
            self.last_position,
            go_line,
            bestmove
        );
        let written = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .and_then(|mut file| file.write_all(record.as_bytes()));
        if let Err(err) = written {
            warn!("could not write error log {}: {}", path.display(), err);
        }
    }
}

/// Milliseconds token; some GUIs send negative clocks when flagging
fn parse_ms(token: Option<&&str>) -> Option<u64> {
    token.and_then(|t| t.parse::<i64>().ok()).map(|v| v.max(0) as u64)
}

pub fn parse_go_params(line: &str) -> GoParams {
    let mut params = GoParams::default();
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let mut i = 0usize;
    while i < tokens.len() {
        match tokens[i] {
            "depth" => {
                i += 1;
                params.depth = tokens.get(i).and_then(|x| x.parse::<i32>().ok());
            }
            "movetime" => {
                i += 1;
                params.movetime_ms = parse_ms(tokens.get(i));
            }
            "wtime" => {
                i += 1;
                params.wtime_ms = parse_ms(tokens.get(i));
            }
            "btime" => {
                i += 1;
                params.btime_ms = parse_ms(tokens.get(i));
            }
            "winc" => {
                i += 1;
                params.winc_ms = parse_ms(tokens.get(i));
            }
            "binc" => {
                i += 1;
                params.binc_ms = parse_ms(tokens.get(i));
            }
            "infinite" => {
                params.infinite = true;
            }
            _ => {}
        }
        i += 1;
    }
    params
}
