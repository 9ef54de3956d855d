//! A UCI engine running as a child process.

use std::io::{BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};
use std::thread;
use std::time::Duration;

use shakmaty::uci::UciMove;
use tracing::{debug, trace, warn};
use upset_core::{position_fen, Chess, Engine, EngineError, SearchLimits, SearchResult};

use crate::protocol::{
    go_command, parse_bestmove, parse_id_name, position_command, setoption_command, SearchInfo,
};

/// How long a session gets to exit after `quit` before it is killed
const QUIT_GRACE: Duration = Duration::from_millis(500);
const QUIT_POLL: Duration = Duration::from_millis(10);

/// Program and arguments used to start an engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl EngineCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }
}

/// One engine process. The process is shut down when the session is dropped.
pub struct UciEngine {
    name: String,
    child: Child,
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
}

impl UciEngine {
    /// Start the engine and complete the `uci` / `isready` handshake.
    pub fn spawn(command: &EngineCommand) -> Result<Self, EngineError> {
        let mut child = Command::new(&command.program)
            .args(&command.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| EngineError::Spawn {
                program: command.program.clone(),
                source,
            })?;

        let pipes = child.stdin.take().zip(child.stdout.take());
        let Some((stdin, stdout)) = pipes else {
            let _ = child.kill();
            let _ = child.wait();
            return Err(EngineError::Disconnected {
                engine: command.program.clone(),
            });
        };

        let mut engine = Self {
            name: command.program.clone(),
            child,
            stdin,
            stdout: BufReader::new(stdout),
        };

        engine.send("uci")?;
        loop {
            let line = engine.read_line()?;
            if let Some(name) = parse_id_name(&line) {
                engine.name = name.to_string();
            } else if line == "uciok" {
                break;
            }
        }
        engine.ready()?;

        debug!(engine = %engine.name, program = %command.program, "engine started");
        Ok(engine)
    }

    pub fn set_option(&mut self, name: &str, value: &str) -> Result<(), EngineError> {
        self.send(&setoption_command(name, value))
    }

    /// Limit playing strength to the given rating.
    pub fn set_elo(&mut self, elo: u32) -> Result<(), EngineError> {
        self.set_option("UCI_LimitStrength", "true")?;
        self.set_option("UCI_Elo", &elo.to_string())?;
        self.ready()
    }

    /// Block until the engine has processed everything sent so far.
    pub fn ready(&mut self) -> Result<(), EngineError> {
        self.send("isready")?;
        self.wait_for("readyok")
    }

    /// Ask for the best move in `fen`.
    ///
    /// `Ok(None)` means the engine reported that the side to move has no move.
    pub fn best_move(
        &mut self,
        fen: &str,
        limits: &SearchLimits,
    ) -> Result<(Option<String>, SearchInfo), EngineError> {
        self.send(&position_command(fen))?;
        self.send(&go_command(limits))?;

        let mut info = SearchInfo::default();
        loop {
            let line = self.read_line()?;
            if line.starts_with("info") {
                info.update(&line);
                continue;
            }
            if line.starts_with("bestmove") {
                return match parse_bestmove(&line) {
                    Some(mv) => Ok((mv, info)),
                    None => Err(EngineError::Protocol {
                        engine: self.name.clone(),
                        line,
                    }),
                };
            }
        }
    }

    fn send(&mut self, cmd: &str) -> Result<(), EngineError> {
        trace!(engine = %self.name, ">> {}", cmd);
        writeln!(self.stdin, "{}", cmd)
            .and_then(|_| self.stdin.flush())
            .map_err(|source| EngineError::Io {
                engine: self.name.clone(),
                source,
            })
    }

    fn read_line(&mut self) -> Result<String, EngineError> {
        let mut line = String::new();
        let read = self
            .stdout
            .read_line(&mut line)
            .map_err(|source| EngineError::Io {
                engine: self.name.clone(),
                source,
            })?;
        if read == 0 {
            return Err(EngineError::Disconnected {
                engine: self.name.clone(),
            });
        }
        let line = line.trim().to_string();
        trace!(engine = %self.name, "<< {}", line);
        Ok(line)
    }

    fn wait_for(&mut self, expected: &str) -> Result<(), EngineError> {
        loop {
            if self.read_line()? == expected {
                return Ok(());
            }
        }
    }

    fn shutdown(&mut self) {
        let _ = self.send("quit");

        let mut waited = Duration::ZERO;
        while waited < QUIT_GRACE {
            match self.child.try_wait() {
                Ok(Some(_)) => return,
                Ok(None) => {
                    thread::sleep(QUIT_POLL);
                    waited += QUIT_POLL;
                }
                Err(e) => {
                    warn!(engine = %self.name, error = %e, "failed to poll engine process, killing it");
                    self.kill();
                    return;
                }
            }
        }

        warn!(engine = %self.name, "engine did not exit after quit, killing it");
        self.kill();
    }

    fn kill(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

impl Engine for UciEngine {
    fn search(&mut self, pos: &Chess, limits: &SearchLimits) -> Result<SearchResult, EngineError> {
        let fen = position_fen(pos);
        let (reply, info) = self.best_move(&fen, limits)?;

        let best_move = match reply {
            None => None,
            Some(text) => {
                let illegal = |reason: String| EngineError::IllegalMove {
                    engine: self.name.clone(),
                    mv: text.clone(),
                    fen: fen.clone(),
                    reason,
                };
                let uci = text
                    .parse::<UciMove>()
                    .map_err(|e| illegal(e.to_string()))?;
                Some(uci.to_move(pos).map_err(|e| illegal(e.to_string()))?)
            }
        };

        Ok(SearchResult {
            best_move,
            depth: info.depth,
            nodes: info.nodes,
        })
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn new_game(&mut self) -> Result<(), EngineError> {
        self.send("ucinewgame")?;
        self.ready()
    }
}

impl Drop for UciEngine {
    fn drop(&mut self) {
        self.shutdown();
    }
}
