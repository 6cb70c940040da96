// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Child process helpers shared by the outline and run adapters.

use std::io::{self, Read, Write};
use std::process::{Child, Command, ExitStatus, Output, Stdio};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Run a child process with an optional timeout.
///
/// Stdout and stderr are drained on background threads so a chatty child
/// cannot block on a full pipe. If the timeout expires the process is killed
/// and a `TimedOut` error is returned.
pub fn run_with_timeout(mut child: Child, timeout: Option<Duration>) -> io::Result<Output> {
    let stdout = drain(child.stdout.take());
    let stderr = drain(child.stderr.take());

    let status = match timeout {
        Some(t) => wait_with_deadline(&mut child, t)?,
        None => child.wait()?,
    };

    Ok(Output {
        status,
        stdout: collect(stdout),
        stderr: collect(stderr),
    })
}

/// Spawn `cmd`, write `input` to its stdin, and wait for it to finish.
pub fn run_with_input(
    mut cmd: Command,
    input: &str,
    timeout: Option<Duration>,
) -> io::Result<Output> {
    cmd.stdin(Stdio::piped());
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());

    let mut child = cmd.spawn()?;
    let Some(mut stdin) = child.stdin.take() else {
        child.kill().ok();
        child.wait().ok();
        return Err(io::Error::new(
            io::ErrorKind::BrokenPipe,
            "unable to write to stdin: pipe does not exist",
        ));
    };

    let input = input.to_owned();
    let writer = std::thread::spawn(move || {
        // A child that exits without reading its input closes the pipe early.
        if let Err(e) = stdin.write_all(input.as_bytes())
            && e.kind() != io::ErrorKind::BrokenPipe
        {
            tracing::debug!("failed to write child stdin: {}", e);
        }
    });

    let output = run_with_timeout(child, timeout);
    writer.join().ok();
    output
}

/// Human-readable rendering of a command line for error messages.
pub fn describe(cmd: &Command) -> String {
    let mut parts = vec![cmd.get_program().to_string_lossy().into_owned()];
    parts.extend(cmd.get_args().map(|a| a.to_string_lossy().into_owned()));
    parts.join(" ")
}

fn wait_with_deadline(child: &mut Child, timeout: Duration) -> io::Result<ExitStatus> {
    let start = Instant::now();
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(status);
        }
        if start.elapsed() > timeout {
            child.kill().ok();
            child.wait().ok();
            return Err(io::Error::new(
                io::ErrorKind::TimedOut,
                format!("command timed out after {:?}", timeout),
            ));
        }
        std::thread::sleep(POLL_INTERVAL);
    }
}

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> Option<JoinHandle<Vec<u8>>> {
    pipe.map(|mut pipe| {
        std::thread::spawn(move || {
            let mut buf = Vec::new();
            pipe.read_to_end(&mut buf).ok();
            buf
        })
    })
}

fn collect(handle: Option<JoinHandle<Vec<u8>>>) -> Vec<u8> {
    handle.and_then(|h| h.join().ok()).unwrap_or_default()
}

#[cfg(test)]
#[path = "process_tests.rs"]
mod tests;
