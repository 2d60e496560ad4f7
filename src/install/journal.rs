//! Watching a systemd unit's journal for sentinel lines.
//!
//! `journalctl -f -n 0` only emits output produced after we attach, so a
//! sentinel observed here belongs to the current restart, not a stale run.

use std::io::BufRead;
use std::process::{Command, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

use anyhow::{Context, Result, bail};
use thiserror::Error;

/// Emitted by the companion installer when provisioning finishes.
pub const INSTALL_DONE_SENTINEL: &str = "Done in ";

/// Apache logs this on startup; its presence on the last journal line
/// means the web server came up.
pub const APACHE_READY_SENTINEL: &str = "AH00558";

#[derive(Debug, Error)]
pub enum WaitError {
    #[error("timed out after {timeout:?} waiting for \"{sentinel}\" in the {unit} journal")]
    Timeout {
        unit: String,
        sentinel: String,
        timeout: Duration,
    },
    #[error("journal stream for {unit} closed before \"{sentinel}\" appeared")]
    StreamClosed { unit: String, sentinel: String },
    #[error("failed to follow the {unit} journal")]
    Spawn {
        unit: String,
        #[source]
        source: std::io::Error,
    },
}

/// Block until a journal line for `unit` contains `sentinel`.
///
/// Follows the journal from zero historical lines, so only output written
/// after this call counts. Bounded by `timeout`.
pub fn wait_for_sentinel(unit: &str, sentinel: &str, timeout: Duration) -> Result<(), WaitError> {
    let mut child = Command::new("journalctl")
        .args(["-u", unit, "-f", "-n", "0"])
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|source| WaitError::Spawn {
            unit: unit.to_string(),
            source,
        })?;

    let stdout = child.stdout.take().map(std::io::BufReader::new);
    let (tx, rx) = mpsc::channel();

    std::thread::spawn(move || {
        if let Some(reader) = stdout {
            for line in reader.lines() {
                match line {
                    // Receiver may be dropped — ignore send errors.
                    Ok(l) => {
                        if tx.send(l).is_err() {
                            break;
                        }
                    }
                    Err(_) => break,
                }
            }
        }
    });

    let outcome = scan(rx, sentinel, timeout);

    let _ = child.kill();
    let _ = child.wait();

    match outcome {
        ScanOutcome::Found => Ok(()),
        ScanOutcome::TimedOut => Err(WaitError::Timeout {
            unit: unit.to_string(),
            sentinel: sentinel.to_string(),
            timeout,
        }),
        ScanOutcome::Closed => Err(WaitError::StreamClosed {
            unit: unit.to_string(),
            sentinel: sentinel.to_string(),
        }),
    }
}

enum ScanOutcome {
    Found,
    TimedOut,
    Closed,
}

/// Drain lines from `rx` until one contains `sentinel`, the deadline
/// passes, or the sender side goes away.
fn scan(rx: Receiver<String>, sentinel: &str, timeout: Duration) -> ScanOutcome {
    let deadline = Instant::now() + timeout;

    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            return ScanOutcome::TimedOut;
        }
        match rx.recv_timeout(remaining) {
            Ok(line) if line.contains(sentinel) => return ScanOutcome::Found,
            Ok(_) => {}
            Err(RecvTimeoutError::Timeout) => return ScanOutcome::TimedOut,
            Err(RecvTimeoutError::Disconnected) => return ScanOutcome::Closed,
        }
    }
}

/// Read the unit's full journal history.
pub fn read_full(unit: &str) -> Result<String> {
    let output = Command::new("journalctl")
        .args(["-u", unit, "--no-pager"])
        .output()
        .context("failed to invoke journalctl")?;

    if !output.status.success() {
        bail!(
            "journalctl -u {unit} failed (exit {}): {}",
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Last non-empty line of a journal dump.
pub fn last_line(log: &str) -> Option<&str> {
    log.lines().rev().find(|l| !l.trim().is_empty())
}
