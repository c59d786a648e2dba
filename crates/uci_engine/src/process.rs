//! Engine process lifecycle: spawn, handshake, move requests, shutdown.

use std::io::{BufRead, BufReader, BufWriter, Write};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use chess_core::{parse_uci_move, Deadline, Engine, EngineError, Move, Position, SearchLimits};
use tracing::{debug, info, warn};

use crate::protocol::{go_command, parse_line, position_command, setoption_command, EngineLine};
use crate::spec::EngineSpec;

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Bounds on the waits that are not part of a move request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdapterTimeouts {
    /// `uci`/`uciok` and `isready`/`readyok` round trips
    pub handshake: Duration,
    /// Waiting for the process to exit after `quit`, and again for the
    /// reader thread to finish
    pub shutdown: Duration,
}

impl Default for AdapterTimeouts {
    fn default() -> Self {
        Self {
            handshake: Duration::from_secs(10),
            shutdown: Duration::from_secs(1),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Running,
    /// Process exited or was killed; resources not yet released
    Dead,
    Terminated,
}

/// A UCI engine running as a child process.
pub struct UciEngine {
    name: String,
    id_name: Option<String>,
    child: Child,
    stdin: BufWriter<ChildStdin>,
    lines: Receiver<String>,
    reader: Option<JoinHandle<()>>,
    timeouts: AdapterTimeouts,
    state: State,
}

impl UciEngine {
    /// Start the engine and complete the UCI handshake.
    pub fn spawn(spec: &EngineSpec, timeouts: AdapterTimeouts) -> Result<Self, EngineError> {
        let mut child = Command::new(&spec.path)
            .args(&spec.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| EngineError::Spawn {
                path: spec.path.clone(),
                source,
            })?;

        let (stdin, stdout) = match (child.stdin.take(), child.stdout.take()) {
            (Some(stdin), Some(stdout)) => (stdin, stdout),
            _ => {
                reap(&mut child);
                return Err(EngineError::Protocol("engine pipes unavailable".to_string()));
            }
        };

        let (tx, rx) = mpsc::channel();
        let reader = thread::Builder::new()
            .name(format!("uci-{}", spec.name))
            .spawn(move || forward_lines(stdout, tx));
        let reader = match reader {
            Ok(handle) => handle,
            Err(e) => {
                reap(&mut child);
                return Err(EngineError::Io(e));
            }
        };

        let mut engine = Self {
            name: spec.name.clone(),
            id_name: None,
            child,
            stdin: BufWriter::new(stdin),
            lines: rx,
            reader: Some(reader),
            timeouts,
            state: State::Running,
        };
        // On failure the engine is dropped, which shuts the process down
        engine.handshake(spec)?;

        info!(
            engine = %engine.name,
            id = engine.id_name.as_deref().unwrap_or("?"),
            "engine ready"
        );
        Ok(engine)
    }

    /// Name the engine reported in `id name`, if any.
    pub fn id_name(&self) -> Option<&str> {
        self.id_name.as_deref()
    }

    fn handshake(&mut self, spec: &EngineSpec) -> Result<(), EngineError> {
        self.send("uci")?;
        let deadline = Deadline::after(self.timeouts.handshake);
        loop {
            let line = self.recv_before(&deadline)?;
            match parse_line(&line) {
                EngineLine::IdName(name) => self.id_name = Some(name.to_string()),
                EngineLine::UciOk => break,
                _ => {}
            }
        }

        for (name, value) in &spec.options {
            self.send(&setoption_command(name, &value.to_string()))?;
        }
        self.sync_ready()
    }

    fn sync_ready(&mut self) -> Result<(), EngineError> {
        self.send("isready")?;
        let deadline = Deadline::after(self.timeouts.handshake);
        loop {
            let line = self.recv_before(&deadline)?;
            if parse_line(&line) == EngineLine::ReadyOk {
                return Ok(());
            }
        }
    }

    fn send(&mut self, cmd: &str) -> Result<(), EngineError> {
        debug!(engine = %self.name, cmd, "engine <");
        writeln!(self.stdin, "{cmd}")?;
        self.stdin.flush()?;
        Ok(())
    }

    fn recv_before(&mut self, deadline: &Deadline) -> Result<String, EngineError> {
        match self.lines.recv_timeout(deadline.remaining()) {
            Ok(line) => {
                debug!(engine = %self.name, line = line.trim(), "engine >");
                Ok(line)
            }
            Err(RecvTimeoutError::Timeout) => Err(EngineError::Timeout(deadline.elapsed())),
            Err(RecvTimeoutError::Disconnected) => {
                self.state = State::Dead;
                Err(EngineError::Crashed)
            }
        }
    }

    fn ensure_running(&self) -> Result<(), EngineError> {
        match self.state {
            State::Running => Ok(()),
            State::Dead | State::Terminated => Err(EngineError::Terminated),
        }
    }

    fn kill(&mut self) {
        reap(&mut self.child);
        self.state = State::Dead;
    }
}

impl Engine for UciEngine {
    fn choose_move(&mut self, pos: &Position, limits: &SearchLimits) -> Result<Move, EngineError> {
        self.ensure_running()?;
        self.send(&position_command(pos))?;
        self.send(&go_command(limits))?;

        let mut deadline = Deadline::after(limits.soft_limit());
        let mut stop_sent = false;
        loop {
            match self.recv_before(&deadline) {
                Ok(line) => match parse_line(&line) {
                    EngineLine::BestMove(Some(txt)) => {
                        return parse_uci_move(pos.board(), txt)
                            .map_err(|e| EngineError::Protocol(e.to_string()));
                    }
                    EngineLine::BestMove(None) => return Err(EngineError::NoMove),
                    _ => {}
                },
                Err(EngineError::Timeout(_)) if !stop_sent => {
                    warn!(engine = %self.name, "engine overran its move time, sending stop");
                    self.send("stop")?;
                    stop_sent = true;
                    deadline.extend(limits.grace);
                }
                Err(EngineError::Timeout(waited)) => {
                    warn!(engine = %self.name, ?waited, "engine is not answering, killing it");
                    self.kill();
                    return Err(EngineError::Timeout(waited));
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn new_game(&mut self) -> Result<(), EngineError> {
        self.ensure_running()?;
        self.send("ucinewgame")?;
        self.sync_ready()
    }

    fn terminate(&mut self) -> Result<(), EngineError> {
        if self.state == State::Terminated {
            return Ok(());
        }
        if self.state == State::Running {
            // The engine may already be gone; the exit wait below covers it
            let _ = self.send("quit");
        }
        self.state = State::Terminated;

        if !wait_for_exit(&mut self.child, self.timeouts.shutdown) {
            warn!(engine = %self.name, "engine ignored quit, killing it");
            reap(&mut self.child);
        }
        if let Some(reader) = self.reader.take() {
            join_with_timeout(reader, self.timeouts.shutdown, &self.name);
        }
        debug!(engine = %self.name, "engine shut down");
        Ok(())
    }
}

impl Drop for UciEngine {
    fn drop(&mut self) {
        let _ = self.terminate();
    }
}

/// Reader thread body: forward stdout lines until EOF or until nobody listens.
fn forward_lines(stdout: ChildStdout, tx: Sender<String>) {
    let reader = BufReader::new(stdout);
    for line in reader.lines() {
        match line {
            Ok(l) => {
                if tx.send(l).is_err() {
                    break;
                }
            }
            Err(_) => break,
        }
    }
}

fn reap(child: &mut Child) {
    let _ = child.kill();
    let _ = child.wait();
}

fn wait_for_exit(child: &mut Child, timeout: Duration) -> bool {
    let deadline = Deadline::after(timeout);
    loop {
        match child.try_wait() {
            Ok(Some(_)) => return true,
            Ok(None) if deadline.expired() => return false,
            Ok(None) => thread::sleep(POLL_INTERVAL),
            Err(_) => return false,
        }
    }
}

fn join_with_timeout(handle: JoinHandle<()>, timeout: Duration, engine: &str) {
    let deadline = Deadline::after(timeout);
    while !handle.is_finished() {
        if deadline.expired() {
            warn!(engine, "reader thread still running, detaching it");
            return;
        }
        thread::sleep(POLL_INTERVAL);
    }
    if handle.join().is_err() {
        warn!(engine, "reader thread panicked");
    }
}
