//! Subprocess management shared by every executor.
//!
//! [`run_command`] owns spawn, output capture, and timeout handling. Executors
//! only decide which program and arguments to run.

use std::process::Stdio;
use std::time::Instant;

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;

use super::executor::{ScriptError, ScriptInput, ScriptOutput};

/// Maximum stdout or stderr size captured per stream (10 MiB).
///
/// Bytes past the cap are still read from the pipe and discarded, so the
/// script never sees a closed pipe and its exit code is unaffected.
pub const MAX_OUTPUT_BYTES: usize = 10 * 1024 * 1024;

/// Spawn `cmd`, capture stdout/stderr, and wait for exit under the timeout.
///
/// The timeout covers both the exit and the draining of both pipes, so a
/// background process that inherits stdout cannot hold the run open. The
/// child leads its own process group; on timeout, or if the returned future
/// is dropped first, the whole group is killed.
pub async fn run_command(
    cmd: &mut Command,
    input: ScriptInput,
) -> Result<ScriptOutput, ScriptError> {
    cmd.stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    #[cfg(unix)]
    cmd.process_group(0);

    if let Some(dir) = &input.working_directory {
        cmd.current_dir(dir);
    }

    let start = Instant::now();

    let mut child = cmd.spawn()?;
    let mut group = ProcessGroup::new(child.id());

    let stdout = child.stdout.take();
    let stderr = child.stderr.take();

    // Drain both pipes concurrently with `wait()`, otherwise a script that
    // fills the pipe buffer would block forever.
    let collect = async {
        let (status, stdout, stderr) =
            tokio::join!(child.wait(), read_stream(stdout), read_stream(stderr));
        status.map(|status| (status, stdout, stderr))
    };

    let collected = tokio::time::timeout(input.timeout, collect).await;

    match collected {
        Ok(Ok((status, stdout_bytes, stderr_bytes))) => {
            group.disarm();
            Ok(ScriptOutput {
                stdout: String::from_utf8_lossy(&stdout_bytes).into_owned(),
                stderr: String::from_utf8_lossy(&stderr_bytes).into_owned(),
                exit_code: status.code().unwrap_or(-1),
                duration_ms: start.elapsed().as_millis() as u64,
            })
        }
        Ok(Err(e)) => Err(ScriptError::Io(e)),
        Err(_elapsed) => {
            group.kill();
            // The shell itself may already be reaped if only a background
            // child kept the pipes open.
            if let Err(e) = child.kill().await {
                tracing::debug!(error = %e, "Timed-out script already exited");
            }
            Err(ScriptError::Timeout {
                elapsed_ms: start.elapsed().as_millis() as u64,
            })
        }
    }
}

/// Kills the child's process group when dropped, unless disarmed.
///
/// `kill_on_drop` only reaches the direct child; this also reaches anything
/// the script started in the background.
struct ProcessGroup {
    pgid: Option<u32>,
}

impl ProcessGroup {
    fn new(pgid: Option<u32>) -> Self {
        Self { pgid }
    }

    fn disarm(&mut self) {
        self.pgid = None;
    }

    fn kill(&mut self) {
        let Some(pgid) = self.pgid.take() else {
            return;
        };
        #[cfg(unix)]
        {
            // Safety: killpg takes plain integers and has no memory effects.
            let ret = unsafe { libc::killpg(pgid as libc::pid_t, libc::SIGKILL) };
            if ret != 0 {
                let err = std::io::Error::last_os_error();
                tracing::debug!(pgid, error = %err, "Failed to kill script process group");
            }
        }
        #[cfg(not(unix))]
        let _ = pgid;
    }
}

impl Drop for ProcessGroup {
    fn drop(&mut self) {
        self.kill();
    }
}

/// Read an output stream to EOF, keeping the first [`MAX_OUTPUT_BYTES`].
async fn read_stream<R: AsyncRead + Unpin>(handle: Option<R>) -> Vec<u8> {
    let mut buf = Vec::new();
    if let Some(mut h) = handle {
        let _ = (&mut h)
            .take(MAX_OUTPUT_BYTES as u64)
            .read_to_end(&mut buf)
            .await;
        let _ = tokio::io::copy(&mut h, &mut tokio::io::sink()).await;
    }
    buf
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use assert_matches::assert_matches;

    use super::*;
    use crate::scripting::test_helpers::default_input;

    fn bash(script: &str) -> Command {
        let mut cmd = Command::new("bash");
        cmd.arg("-c").arg(script);
        cmd
    }

    #[tokio::test]
    async fn captures_stdout_and_stderr_separately() {
        let output = run_command(&mut bash("echo out; echo err >&2"), default_input())
            .await
            .expect("run");
        assert_eq!(output.stdout, "out\n");
        assert_eq!(output.stderr, "err\n");
        assert_eq!(output.exit_code, 0);
    }

    #[tokio::test]
    async fn reports_nonzero_exit_code() {
        let output = run_command(&mut bash("exit 42"), default_input())
            .await
            .expect("run");
        assert_eq!(output.exit_code, 42);
    }

    #[tokio::test]
    async fn stdin_is_closed() {
        // `cat` would hang forever on an open stdin.
        let output = run_command(&mut bash("cat; echo done"), default_input())
            .await
            .expect("run");
        assert_eq!(output.stdout, "done\n");
    }

    #[tokio::test]
    async fn timeout_kills_process() {
        let input = ScriptInput {
            working_directory: None,
            timeout: Duration::from_millis(200),
        };
        let result = run_command(&mut bash("sleep 60"), input).await;
        assert_matches!(result, Err(ScriptError::Timeout { .. }));
    }

    #[tokio::test]
    async fn background_child_holding_stdout_does_not_outlive_timeout() {
        let input = ScriptInput {
            working_directory: None,
            timeout: Duration::from_millis(500),
        };
        let start = Instant::now();
        let result = run_command(&mut bash("sleep 8 &\necho started"), input).await;
        assert_matches!(result, Err(ScriptError::Timeout { .. }));
        assert!(
            start.elapsed() < Duration::from_secs(3),
            "run took {:?}",
            start.elapsed()
        );
    }

    #[tokio::test]
    async fn timeout_kills_background_children() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let marker = dir.path().join("survived");
        let script = format!("(sleep 1; touch '{}') &\nsleep 60", marker.display());
        let input = ScriptInput {
            working_directory: None,
            timeout: Duration::from_millis(200),
        };
        let result = run_command(&mut bash(&script), input).await;
        assert_matches!(result, Err(ScriptError::Timeout { .. }));

        tokio::time::sleep(Duration::from_millis(1500)).await;
        assert!(!marker.exists(), "background child outlived the timeout");
    }

    #[tokio::test]
    async fn spawn_failure_is_io_error() {
        let mut cmd = Command::new("/nonexistent/interpreter-binary");
        let result = run_command(&mut cmd, default_input()).await;
        assert_matches!(result, Err(ScriptError::Io(_)));
    }

    #[tokio::test]
    async fn runs_in_working_directory() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let input = ScriptInput {
            working_directory: Some(dir.path().to_path_buf()),
            timeout: Duration::from_secs(5),
        };
        let output = run_command(&mut bash("pwd -P"), input).await.expect("run");
        let expected = dir.path().canonicalize().expect("canonicalize dir");
        assert_eq!(output.stdout.trim(), expected.to_str().expect("path"));
    }

    #[tokio::test]
    async fn large_output_is_drained_without_deadlock() {
        // 1 MiB comfortably exceeds any pipe buffer.
        let output = run_command(
            &mut bash("head -c 1048576 /dev/zero | tr '\\0' 'a'"),
            default_input(),
        )
        .await
        .expect("run");
        assert_eq!(output.stdout.len(), 1024 * 1024);
    }

    #[tokio::test]
    async fn output_past_the_cap_is_discarded_without_failing_the_script() {
        let over_cap = MAX_OUTPUT_BYTES + 2 * 1024 * 1024;
        let script = format!("echo tail >&2; head -c {over_cap} /dev/zero | tr '\\0' 'a'");
        let output = run_command(&mut bash(&script), default_input())
            .await
            .expect("run");
        assert_eq!(output.exit_code, 0);
        assert_eq!(output.stdout.len(), MAX_OUTPUT_BYTES);
        assert_eq!(output.stderr, "tail\n");
    }
}
