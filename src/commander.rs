// src/commander.rs

//! Subprocess execution
//!
//! The client never spawns processes itself; it hands the program and the
//! assembled arguments to a [`Commander`]. [`SystemCommander`] is the real
//! implementation; tests substitute their own.

use crate::error::{Error, Result};
use std::io::{self, Read, Write};
use std::path::Path;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::mpsc::{self, Sender};
use std::thread::{self, JoinHandle};
use tracing::{debug, warn};

/// Size of each chunk read from the child's pipes
const CHUNK_SIZE: usize = 8192;

/// Runs an external program to completion
pub trait Commander {
    /// Run `program` with `args`, blocking until it exits
    ///
    /// Everything the child writes to stdout or stderr is copied into
    /// `output` when one is given. Returns the captured stdout.
    fn run(
        &self,
        program: &Path,
        args: &[String],
        output: Option<&mut (dyn Write + '_)>,
    ) -> Result<String>;
}

impl<C: Commander + ?Sized> Commander for &C {
    fn run(
        &self,
        program: &Path,
        args: &[String],
        output: Option<&mut (dyn Write + '_)>,
    ) -> Result<String> {
        (**self).run(program, args, output)
    }
}

/// Which pipe a chunk came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stream {
    Stdout,
    Stderr,
}

/// Spawns real processes with `std::process::Command`
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemCommander;

impl SystemCommander {
    pub fn new() -> Self {
        SystemCommander
    }
}

impl Commander for SystemCommander {
    fn run(
        &self,
        program: &Path,
        args: &[String],
        mut output: Option<&mut (dyn Write + '_)>,
    ) -> Result<String> {
        let command_line = command_line(program, args);
        debug!("Spawning: {}", command_line);

        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| Error::Spawn {
                program: program.display().to_string(),
                source,
            })?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| io::Error::other("child stdout was not captured"))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| io::Error::other("child stderr was not captured"))?;

        let (tx, rx) = mpsc::channel();
        let stdout_reader = forward(stdout, Stream::Stdout, tx.clone());
        let stderr_reader = forward(stderr, Stream::Stderr, tx);

        let mut captured_stdout = Vec::new();
        let mut captured_stderr = Vec::new();
        let mut sink_error = None;

        // Ends once both reader threads have hit EOF and dropped their senders
        for (stream, chunk) in rx {
            let written = match output.as_deref_mut() {
                Some(sink) => sink.write_all(&chunk),
                None => Ok(()),
            };
            if let Err(e) = written {
                warn!("Output sink failed, discarding further output: {}", e);
                sink_error = Some(e);
                output = None;
            }

            match stream {
                Stream::Stdout => captured_stdout.extend_from_slice(&chunk),
                Stream::Stderr => captured_stderr.extend_from_slice(&chunk),
            }
        }

        let status = reap(&mut child, [(stdout_reader, "stdout"), (stderr_reader, "stderr")])?;

        if let Some(e) = sink_error {
            return Err(Error::Io(e));
        }
        if let Some(sink) = output {
            sink.flush()?;
        }

        debug!(
            "{} exited with {} ({} bytes stdout, {} bytes stderr)",
            command_line,
            status,
            captured_stdout.len(),
            captured_stderr.len()
        );

        if !status.success() {
            warn!("{} failed with {}", command_line, status);
            return Err(Error::CommandFailed {
                command: command_line,
                status,
                stderr: String::from_utf8_lossy(&captured_stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&captured_stdout).into_owned())
    }
}

/// Program and arguments joined for logs and error messages
pub fn command_line(program: &Path, args: &[String]) -> String {
    let mut line = program.display().to_string();
    for arg in args {
        line.push(' ');
        line.push_str(arg);
    }
    line
}

/// Read `reader` to EOF on its own thread, sending each chunk tagged with `stream`
fn forward<R>(
    mut reader: R,
    stream: Stream,
    tx: Sender<(Stream, Vec<u8>)>,
) -> JoinHandle<io::Result<()>>
where
    R: Read + Send + 'static,
{
    thread::spawn(move || {
        let mut buf = [0u8; CHUNK_SIZE];
        loop {
            let n = match reader.read(&mut buf) {
                Ok(0) => return Ok(()),
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };

            // Receiver gone means the caller stopped listening
            if tx.send((stream, buf[..n].to_vec())).is_err() {
                return Ok(());
            }
        }
    })
}

/// Wait for `child`, then surface any reader failure
///
/// The child is always waited on first so a failed pipe read never leaves
/// it unreaped.
fn reap(
    child: &mut Child,
    readers: [(JoinHandle<io::Result<()>>, &str); 2],
) -> Result<ExitStatus> {
    let joined: Vec<Result<()>> = readers
        .into_iter()
        .map(|(handle, name)| join_reader(handle, name))
        .collect();

    let status = child.wait()?;

    for result in joined {
        result?;
    }
    Ok(status)
}

fn join_reader(handle: JoinHandle<io::Result<()>>, name: &str) -> Result<()> {
    handle
        .join()
        .map_err(|_| io::Error::other(format!("{} reader thread panicked", name)))??;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_line_joins_arguments() {
        let args = vec!["install".to_string(), "vim".to_string(), "--assumeyes".to_string()];
        assert_eq!(
            command_line(Path::new("/usr/bin/dnf"), &args),
            "/usr/bin/dnf install vim --assumeyes"
        );
        assert_eq!(command_line(Path::new("dnf"), &[]), "dnf");
    }

    #[test]
    fn test_system_commander_is_default() {
        fn assert_implements_commander<T: Commander + Default>() {}
        assert_implements_commander::<SystemCommander>();
    }

    #[cfg(unix)]
    #[test]
    fn test_captures_stdout() {
        let stdout = SystemCommander::new()
            .run(Path::new("echo"), &["hello".to_string()], None)
            .unwrap();
        assert_eq!(stdout, "hello\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_sink_receives_both_streams() {
        let args = vec!["-c".to_string(), "echo out; echo err >&2".to_string()];
        let mut sink: Vec<u8> = Vec::new();

        let stdout = SystemCommander::new()
            .run(Path::new("sh"), &args, Some(&mut sink))
            .unwrap();

        assert_eq!(stdout, "out\n");
        let relayed = String::from_utf8(sink).unwrap();
        assert!(relayed.contains("out\n"));
        assert!(relayed.contains("err\n"));
    }

    #[cfg(unix)]
    #[test]
    fn test_non_zero_exit_reports_stderr() {
        let args = vec!["-c".to_string(), "echo nope >&2; exit 3".to_string()];
        let err = SystemCommander::new()
            .run(Path::new("sh"), &args, None)
            .unwrap_err();

        match err {
            Error::CommandFailed {
                command,
                status,
                stderr,
            } => {
                assert!(command.starts_with("sh -c"));
                assert_eq!(status.code(), Some(3));
                assert_eq!(stderr, "nope");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_reader_failure_still_reaps_child() {
        let mut child = Command::new("sleep").arg("1").spawn().unwrap();
        let failed: JoinHandle<io::Result<()>> =
            thread::spawn(|| Err(io::Error::other("pipe read failed")));
        let finished: JoinHandle<io::Result<()>> = thread::spawn(|| Ok(()));

        let err = reap(&mut child, [(failed, "stdout"), (finished, "stderr")]).unwrap_err();

        assert!(matches!(err, Error::Io(_)));
        // Still running unless reap waited for it
        assert!(child.try_wait().unwrap().is_some());
    }

    #[test]
    fn test_missing_binary_is_spawn_error() {
        let err = SystemCommander::new()
            .run(Path::new("/nonexistent/bin/dnf"), &[], None)
            .unwrap_err();
        assert!(matches!(err, Error::Spawn { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_sink_still_reaps_child() {
        struct BrokenSink;

        impl Write for BrokenSink {
            fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
                Err(io::Error::other("sink closed"))
            }

            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let mut sink = BrokenSink;
        let err = SystemCommander::new()
            .run(Path::new("echo"), &["hello".to_string()], Some(&mut sink))
            .unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
