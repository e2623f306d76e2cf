//! Command runner
//!
//! [`CommandRunner`] is the seam between task planning and process
//! execution. [`ProcessRunner`] spawns real processes, on a pseudo-terminal
//! when one is wanted; [`RecordingRunner`] records invocations and replays
//! scripted exit codes for tests.

use std::collections::{BTreeMap, VecDeque};
use std::ffi::{OsStr, OsString};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::{Mutex, PoisonError};

use console::{style, Term};
use portable_pty::{native_pty_system, CommandBuilder, PtyPair, PtySize};
use tracing::{debug, info};

use durango_core::{DurangoError, PtyMode, Result, TaskError};

/// One external command: a program and its argument vector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

impl Invocation {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// The full command line, quoted so it can be pasted into a shell
    pub fn command_line(&self) -> String {
        shell_words::join(std::iter::once(&self.program).chain(self.args.iter()))
    }
}

/// Per-invocation execution options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    /// Print the command before running it
    pub echo: bool,
    /// Print the command and do nothing else
    pub dry_run: bool,
    /// Variables merged over the ambient environment
    pub env: BTreeMap<String, String>,
    /// Pseudo-terminal usage
    pub pty: PtyMode,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            echo: true,
            dry_run: false,
            env: BTreeMap::new(),
            pty: PtyMode::Auto,
        }
    }
}

impl RunOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Add an overlay variable; later values replace earlier ones
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    pub fn with_pty(mut self, pty: PtyMode) -> Self {
        self.pty = pty;
        self
    }
}

/// Executes one invocation synchronously
pub trait CommandRunner: Send + Sync + std::fmt::Debug {
    /// Run the invocation; a non-zero exit is `TaskError::CommandFailed`
    fn run(&self, invocation: &Invocation, options: &RunOptions) -> Result<()>;
}

/// Copy of the ambient environment with the overlay applied on top.
pub fn merge_environment<I>(
    ambient: I,
    overlay: &BTreeMap<String, String>,
) -> BTreeMap<OsString, OsString>
where
    I: IntoIterator<Item = (OsString, OsString)>,
{
    let mut env: BTreeMap<OsString, OsString> = ambient.into_iter().collect();
    for (key, value) in overlay {
        env.insert(OsString::from(key), OsString::from(value));
    }
    env
}

/// Runner that spawns real child processes
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl ProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for ProcessRunner {
    fn run(&self, invocation: &Invocation, options: &RunOptions) -> Result<()> {
        let command = invocation.command_line();

        if options.dry_run {
            println!("[dry-run] {}", command);
            debug!(command = %command, "dry run, not executing");
            return Ok(());
        }

        let env = merge_environment(std::env::vars_os(), &options.env);
        let program = resolve_program(&invocation.program, &env)?;

        if options.echo {
            println!("{}", style(&command).bold());
        }

        let use_pty = match options.pty {
            PtyMode::Always => true,
            PtyMode::Never => false,
            PtyMode::Auto => Term::stdout().is_term(),
        };

        info!(
            command = %command,
            pty = use_pty,
            overlay = options.env.len(),
            "running command"
        );

        let code = if use_pty {
            run_in_pty(&program, invocation, &env, &command)?
        } else {
            run_inherited(&program, invocation, &env, &command)?
        };

        debug!(command = %command, code, "command exited");
        if code != 0 {
            return Err(TaskError::CommandFailed { command, code }.into());
        }

        Ok(())
    }
}

/// Locate the program on the `PATH` the child will see
fn resolve_program(program: &str, env: &BTreeMap<OsString, OsString>) -> Result<PathBuf> {
    let cwd = std::env::current_dir()?;
    which::which_in(program, env.get(OsStr::new("PATH")), cwd)
        .map_err(|_| DurangoError::from(TaskError::ProgramNotFound(program.to_string())))
}

/// Exit status reported for a child killed by `signal`
fn signal_exit(signal: i32) -> i32 {
    128 + signal
}

const SIGNALS: &[(i32, &str, &str)] = &[
    (1, "SIGHUP", "Hangup"),
    (2, "SIGINT", "Interrupt"),
    (3, "SIGQUIT", "Quit"),
    (4, "SIGILL", "Illegal instruction"),
    (6, "SIGABRT", "Aborted"),
    (6, "SIGABRT", "Abort trap"),
    (8, "SIGFPE", "Floating point exception"),
    (9, "SIGKILL", "Killed"),
    (11, "SIGSEGV", "Segmentation fault"),
    (13, "SIGPIPE", "Broken pipe"),
    (14, "SIGALRM", "Alarm clock"),
    (15, "SIGTERM", "Terminated"),
];

/// Number of a signal as the pty layer reports it: a `strsignal`
/// description ("Terminated"), a name ("SIGTERM"), or text ending in the
/// number ("Signal 34").
fn signal_number(reported: &str) -> Option<i32> {
    let reported = reported.trim();
    if let Some((_, digits)) = reported.rsplit_once(|c: char| c == ' ' || c == ':') {
        if let Ok(number) = digits.parse() {
            return Some(number);
        }
    }

    let bare = reported.strip_prefix("SIG").unwrap_or(reported);
    SIGNALS
        .iter()
        .find(|(_, name, description)| {
            reported.eq_ignore_ascii_case(description)
                || bare.eq_ignore_ascii_case(&name[3..])
        })
        .map(|(number, _, _)| *number)
}

fn run_inherited(
    program: &Path,
    invocation: &Invocation,
    env: &BTreeMap<OsString, OsString>,
    command: &str,
) -> Result<i32> {
    let status = Command::new(program)
        .args(&invocation.args)
        .env_clear()
        .envs(env)
        .status()
        .map_err(|e| TaskError::SpawnFailed {
            command: command.to_string(),
            reason: e.to_string(),
        })?;

    if let Some(code) = status.code() {
        return Ok(code);
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return Ok(signal_exit(signal));
        }
    }

    Ok(1)
}

fn run_in_pty(
    program: &Path,
    invocation: &Invocation,
    env: &BTreeMap<OsString, OsString>,
    command: &str,
) -> Result<i32> {
    let (rows, cols) = Term::stdout().size();
    let PtyPair { master, slave } = native_pty_system()
        .openpty(PtySize {
            rows,
            cols,
            pixel_width: 0,
            pixel_height: 0,
        })
        .map_err(|e| TaskError::Pty(e.to_string()))?;

    let mut builder = CommandBuilder::new(program);
    builder.args(&invocation.args);
    builder.env_clear();
    for (key, value) in env {
        builder.env(key, value);
    }
    builder.cwd(std::env::current_dir()?);

    let mut child = slave
        .spawn_command(builder)
        .map_err(|e| TaskError::SpawnFailed {
            command: command.to_string(),
            reason: e.to_string(),
        })?;
    // The reader only sees EOF once every slave handle is closed.
    drop(slave);

    let mut reader = master
        .try_clone_reader()
        .map_err(|e| TaskError::Pty(e.to_string()))?;
    let pump = std::thread::spawn(move || {
        let mut stdout = std::io::stdout();
        let _ = std::io::copy(&mut reader, &mut stdout);
        let _ = stdout.flush();
    });

    let status = child.wait()?;
    drop(master);
    let _ = pump.join();

    if let Some(reported) = status.signal() {
        match signal_number(reported) {
            Some(signal) => return Ok(signal_exit(signal)),
            None => debug!(signal = reported, "unrecognised signal from pty child"),
        }
    }

    Ok(i32::try_from(status.exit_code()).unwrap_or(1))
}

/// A call captured by [`RecordingRunner`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub invocation: Invocation,
    pub options: RunOptions,
}

/// Test double that records invocations and returns scripted exit codes.
///
/// Codes are consumed in order; once exhausted every call succeeds.
/// Dry-run calls are recorded but never consume a code.
#[derive(Debug, Default)]
pub struct RecordingRunner {
    exit_codes: Mutex<VecDeque<i32>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_exit_codes(codes: Vec<i32>) -> Self {
        Self {
            exit_codes: Mutex::new(codes.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Quoted command lines of every recorded call
    pub fn command_lines(&self) -> Vec<String> {
        self.calls()
            .iter()
            .map(|c| c.invocation.command_line())
            .collect()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, invocation: &Invocation, options: &RunOptions) -> Result<()> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(RecordedCall {
                invocation: invocation.clone(),
                options: options.clone(),
            });

        if options.dry_run {
            return Ok(());
        }

        let code = self
            .exit_codes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or(0);

        if code != 0 {
            return Err(TaskError::CommandFailed {
                command: invocation.command_line(),
                code,
            }
            .into());
        }

        Ok(())
    }
}
