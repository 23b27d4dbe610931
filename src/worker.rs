use log::{debug, error, warn};
use std::io;
use std::process::{Command, Stdio};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::sync::oneshot;

use crate::command::PackageCommand;
use crate::error::{DispatchError, RunError};
use crate::i18n::Language;

#[cfg(windows)]
const CREATE_NO_WINDOW: u32 = 0x0800_0000;

/// Result of one command, as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskOutcome {
    pub succeeded: bool,
    pub text: String,
}

impl TaskOutcome {
    pub fn success(text: impl Into<String>) -> Self {
        Self { succeeded: true, text: text.into() }
    }

    pub fn failure(text: impl Into<String>) -> Self {
        Self { succeeded: false, text: text.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutput {
    pub success: bool,
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

/// Runs a command to completion and hands back everything it printed.
#[cfg_attr(test, mockall::automock)]
pub trait ProcessRunner: Send {
    fn run(&self, command: &PackageCommand) -> Result<ProcessOutput, RunError>;
}

/// Runs commands as real child processes, blocking until they exit.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn run(&self, command: &PackageCommand) -> Result<ProcessOutput, RunError> {
        let mut cmd = Command::new(&command.program);
        cmd.args(&command.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        #[cfg(windows)]
        {
            use std::os::windows::process::CommandExt;
            cmd.creation_flags(CREATE_NO_WINDOW);
        }

        debug!("Launching: {}", command);
        let output = cmd.output().map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => RunError::NotFound(command.program.clone()),
            _ => RunError::Io(e),
        })?;
        debug!("'{}' exited with {:?}", command.program, output.status.code());

        Ok(ProcessOutput {
            success: output.status.success(),
            code: output.status.code(),
            stdout: String::from_utf8(output.stdout)?,
            stderr: String::from_utf8(output.stderr)?,
        })
    }
}

/// Executes `command` and folds every possible failure into a displayable outcome.
pub fn run_task<R>(runner: &R, command: &PackageCommand, language: Language) -> TaskOutcome
where
    R: ProcessRunner + ?Sized,
{
    match runner.run(command) {
        Ok(output) if output.success => TaskOutcome::success(output.stdout),
        Ok(output) => {
            let detail = if output.stderr.is_empty() { &output.stdout } else { &output.stderr };
            warn!("'{}' failed with exit code {:?}", command, output.code);
            TaskOutcome::failure(language.command_failed(&command.to_string(), detail.trim()))
        }
        Err(RunError::NotFound(tool)) => {
            warn!("'{}' is not on PATH", tool);
            TaskOutcome::failure(language.tool_not_found(&tool))
        }
        Err(e) => {
            error!("Running '{}' failed: {}", command, e);
            TaskOutcome::failure(language.unexpected(&e.to_string()))
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerState {
    Idle,
    Running,
}

#[derive(Debug)]
struct Job {
    command: PackageCommand,
    reply: oneshot::Sender<TaskOutcome>,
}

/// A single long-lived thread that runs one command at a time.
///
/// Submitting while a command is in flight is refused with
/// [`DispatchError::Busy`] instead of queueing.
#[derive(Debug)]
pub struct Worker {
    sender: Option<mpsc::Sender<Job>>,
    running: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl Worker {
    pub fn spawn<R>(runner: R, language: Language) -> io::Result<Self>
    where
        R: ProcessRunner + 'static,
    {
        let (sender, mut receiver) = mpsc::channel::<Job>(1);
        let running = Arc::new(AtomicBool::new(false));
        let thread_running = Arc::clone(&running);

        let thread = thread::Builder::new()
            .name("perch-worker".to_string())
            .spawn(move || {
                debug!("Worker thread started");
                while let Some(job) = receiver.blocking_recv() {
                    let outcome = run_task(&runner, &job.command, language);
                    // Idle is visible before the outcome is
                    thread_running.store(false, Ordering::Release);
                    if job.reply.send(outcome).is_err() {
                        warn!("Nobody is waiting for the outcome of '{}'", job.command);
                    }
                }
                debug!("Worker thread stopped");
            })?;

        Ok(Self {
            sender: Some(sender),
            running,
            thread: Some(thread),
        })
    }

    pub fn state(&self) -> WorkerState {
        if self.running.load(Ordering::Acquire) {
            WorkerState::Running
        } else {
            WorkerState::Idle
        }
    }

    /// Hands `command` to the worker thread. The returned receiver resolves
    /// once the child process has exited.
    pub fn submit(&self, command: PackageCommand) -> Result<oneshot::Receiver<TaskOutcome>, DispatchError> {
        let sender = self.sender.as_ref().ok_or(DispatchError::WorkerStopped)?;

        if self
            .running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(DispatchError::Busy);
        }

        debug!("Submitting: {}", command);
        let (reply, receiver) = oneshot::channel();
        match sender.try_send(Job { command, reply }) {
            Ok(()) => Ok(receiver),
            Err(e) => {
                self.running.store(false, Ordering::Release);
                Err(match e {
                    TrySendError::Full(_) => DispatchError::Busy,
                    TrySendError::Closed(_) => DispatchError::WorkerStopped,
                })
            }
        }
    }

    /// Stops accepting work and blocks until the thread, including any
    /// command still running on it, has finished.
    pub fn shutdown(&mut self) {
        self.sender.take();
        if let Some(thread) = self.thread.take() {
            debug!("Waiting for worker thread to finish");
            if thread.join().is_err() {
                error!("Worker thread panicked");
            }
        }
    }
}

impl Drop for Worker {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command;
    use futures::executor::block_on;
    use std::time::Duration;

    fn exited(success: bool, code: i32, stdout: &str, stderr: &str) -> ProcessOutput {
        ProcessOutput {
            success,
            code: Some(code),
            stdout: stdout.to_string(),
            stderr: stderr.to_string(),
        }
    }

    #[test]
    fn success_returns_stdout_untouched() {
        let mut runner = MockProcessRunner::new();
        runner
            .expect_run()
            .times(1)
            .returning(|_| Ok(exited(true, 0, "PackageX  1.0", "")));

        let request = command::list_installed("winget");
        let outcome = run_task(&runner, &request.command, Language::English);
        assert_eq!(outcome, TaskOutcome::success("PackageX  1.0"));
    }

    #[test]
    fn failure_prefers_stderr() {
        let mut runner = MockProcessRunner::new();
        runner
            .expect_run()
            .returning(|_| Ok(exited(false, 1, "ignored", "no match found\n")));

        let request = command::search("winget", "nothing").unwrap();
        let outcome = run_task(&runner, &request.command, Language::English);
        assert!(!outcome.succeeded);
        assert_eq!(outcome.text, "Error running: winget search nothing\nno match found");
    }

    #[test]
    fn failure_falls_back_to_stdout() {
        let mut runner = MockProcessRunner::new();
        runner
            .expect_run()
            .returning(|_| Ok(exited(false, 2, "  No installed package found.  ", "")));

        let request = command::uninstall("winget", "Foo.Bar").unwrap();
        let outcome = run_task(&runner, &request.command, Language::English);
        assert!(!outcome.succeeded);
        assert!(outcome.text.ends_with("\nNo installed package found."));
    }

    #[test]
    fn missing_tool_mentions_name_and_path() {
        let mut runner = MockProcessRunner::new();
        runner
            .expect_run()
            .returning(|c| Err(RunError::NotFound(c.program.clone())));

        let request = command::upgrade_all("winget");
        let outcome = run_task(&runner, &request.command, Language::English);
        assert!(!outcome.succeeded);
        assert!(outcome.text.contains("winget"));
        assert!(outcome.text.contains("PATH"));
    }

    #[test]
    fn other_errors_are_reported_as_unexpected() {
        let mut runner = MockProcessRunner::new();
        runner.expect_run().returning(|_| {
            Err(RunError::Io(io::Error::new(io::ErrorKind::PermissionDenied, "access denied")))
        });

        let request = command::list_installed("winget");
        let outcome = run_task(&runner, &request.command, Language::Spanish);
        assert!(!outcome.succeeded);
        assert_eq!(outcome.text, "Error inesperado: access denied");
    }

    #[test]
    fn invalid_utf8_is_unexpected() {
        let mut runner = MockProcessRunner::new();
        runner.expect_run().returning(|_| {
            let bad = String::from_utf8(vec![0xff, 0xfe]).unwrap_err();
            Err(RunError::Encoding(bad))
        });

        let request = command::list_installed("winget");
        let outcome = run_task(&runner, &request.command, Language::English);
        assert!(outcome.text.starts_with("Unexpected error: output is not valid UTF-8"));
    }

    #[test]
    fn system_runner_reports_missing_executable() {
        let command = PackageCommand {
            program: "perch-no-such-tool-on-path".to_string(),
            args: vec!["list".to_string()],
        };
        let outcome = run_task(&SystemRunner, &command, Language::English);
        assert!(!outcome.succeeded);
        assert!(outcome.text.contains("'perch-no-such-tool-on-path'"));
        assert!(outcome.text.contains("PATH"));
    }

    #[cfg(unix)]
    #[test]
    fn system_runner_captures_streams_and_status() {
        let ok = PackageCommand {
            program: "sh".to_string(),
            args: vec!["-c".to_string(), "printf 'PackageX  1.0'".to_string()],
        };
        assert_eq!(run_task(&SystemRunner, &ok, Language::English), TaskOutcome::success("PackageX  1.0"));

        let failing = PackageCommand {
            program: "sh".to_string(),
            args: vec!["-c".to_string(), "echo 'no match found' >&2; exit 1".to_string()],
        };
        let outcome = run_task(&SystemRunner, &failing, Language::English);
        assert!(!outcome.succeeded);
        assert!(outcome.text.ends_with("no match found"));
    }

    #[test]
    fn worker_delivers_outcomes_in_order() {
        let mut runner = MockProcessRunner::new();
        runner
            .expect_run()
            .returning(|c| Ok(exited(true, 0, &c.args.join(","), "")));
        let mut worker = Worker::spawn(runner, Language::English).unwrap();

        let first = block_on(worker.submit(command::list_installed("winget").command).unwrap()).unwrap();
        let second = block_on(worker.submit(command::search("winget", "git").unwrap().command).unwrap()).unwrap();

        assert_eq!(first.text, "list");
        assert_eq!(second.text, "search,git");
        worker.shutdown();
    }

    #[test]
    fn resubmit_right_after_outcome_is_accepted() {
        let mut runner = MockProcessRunner::new();
        runner
            .expect_run()
            .times(200)
            .returning(|_| Ok(exited(true, 0, "ok", "")));
        let mut worker = Worker::spawn(runner, Language::English).unwrap();

        for _ in 0..200 {
            let receiver = worker
                .submit(command::list_installed("winget").command)
                .expect("worker should be idle once the outcome arrived");
            assert_eq!(block_on(receiver).unwrap(), TaskOutcome::success("ok"));
            assert_eq!(worker.state(), WorkerState::Idle);
        }
        worker.shutdown();
    }

    #[test]
    fn second_submission_is_rejected_while_running() {
        let (release_tx, release_rx) = std::sync::mpsc::channel::<()>();
        let release_rx = std::sync::Mutex::new(release_rx);
        let mut runner = MockProcessRunner::new();
        runner.expect_run().times(1).returning(move |_| {
            let _ = release_rx.lock().unwrap().recv();
            Ok(exited(true, 0, "done", ""))
        });
        let worker = Worker::spawn(runner, Language::English).unwrap();

        let pending = worker.submit(command::list_installed("winget").command).unwrap();
        assert_eq!(worker.state(), WorkerState::Running);
        assert!(matches!(
            worker.submit(command::upgrade_all("winget").command),
            Err(DispatchError::Busy)
        ));

        release_tx.send(()).unwrap();
        assert_eq!(block_on(pending).unwrap(), TaskOutcome::success("done"));
        assert_eq!(worker.state(), WorkerState::Idle);
    }

    #[test]
    fn shutdown_waits_for_in_flight_task() {
        let finished = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&finished);
        let mut runner = MockProcessRunner::new();
        runner.expect_run().returning(move |_| {
            thread::sleep(Duration::from_millis(200));
            flag.store(true, Ordering::SeqCst);
            Ok(exited(true, 0, "", ""))
        });
        let mut worker = Worker::spawn(runner, Language::English).unwrap();

        let _pending = worker.submit(command::upgrade_all("winget").command).unwrap();
        worker.shutdown();

        assert!(finished.load(Ordering::SeqCst));
        assert!(matches!(
            worker.submit(command::list_installed("winget").command),
            Err(DispatchError::WorkerStopped)
        ));
    }
}
