//! Blocking subprocess execution
//!
//! Every configure/build/install stage runs external tools through this one
//! entry point. The working directory is always passed explicitly to the
//! child; the engine never mutates its own process-global cwd, so stages
//! cannot leak directory state into each other.

use std::ffi::{OsStr, OsString};
use std::path::PathBuf;
use std::process;

use tracing::debug;

use crate::error::CoreError;
use crate::Result;

/// A subprocess invocation.
///
/// The child inherits stdio so native build output streams straight to the
/// terminal; the call blocks until the child exits and only the exit status
/// is inspected. No timeout, no cancellation.
pub struct Cmd {
    program: OsString,
    args: Vec<OsString>,
    cwd: Option<PathBuf>,
    envs: Vec<(OsString, OsString)>,
}

impl Cmd {
    pub fn new(program: impl AsRef<OsStr>) -> Self {
        Self {
            program: program.as_ref().to_os_string(),
            args: Vec::new(),
            cwd: None,
            envs: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args.extend(args.into_iter().map(|a| a.as_ref().to_os_string()));
        self
    }

    /// Explicit working directory for the child.
    pub fn cwd(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    /// Additional environment variable on top of the inherited environment.
    pub fn env(mut self, key: impl AsRef<OsStr>, value: impl AsRef<OsStr>) -> Self {
        self.envs
            .push((key.as_ref().to_os_string(), value.as_ref().to_os_string()));
        self
    }

    /// Run to completion; non-zero exit is an error carrying the exit code.
    pub fn run(self) -> Result<()> {
        let program = self.program.to_string_lossy().into_owned();
        debug!(program = %program, args = ?self.args, cwd = ?self.cwd, "spawning");

        let mut command = process::Command::new(&self.program);
        command.args(&self.args);
        if let Some(cwd) = &self.cwd {
            command.current_dir(cwd);
        }
        for (key, value) in &self.envs {
            command.env(key, value);
        }

        let status = command.status().map_err(|source| CoreError::Spawn {
            program: program.clone(),
            source,
        })?;

        if !status.success() {
            return Err(CoreError::CommandFailed {
                program,
                code: status.code(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[cfg(unix)]
    fn sh(script: &str) -> Cmd {
        Cmd::new("/bin/sh").arg("-c").arg(script)
    }

    #[test]
    #[cfg(unix)]
    fn zero_exit_is_ok() {
        sh("exit 0").run().unwrap();
    }

    #[test]
    #[cfg(unix)]
    fn non_zero_exit_carries_the_code() {
        let err = sh("exit 3").run().unwrap_err();
        match err {
            CoreError::CommandFailed { program, code } => {
                assert_eq!(program, "/bin/sh");
                assert_eq!(code, Some(3));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_program_is_a_spawn_error() {
        let err = Cmd::new("depstrap-no-such-tool").run().unwrap_err();
        assert!(matches!(err, CoreError::Spawn { .. }));
    }

    #[test]
    #[cfg(unix)]
    fn cwd_is_passed_to_the_child() {
        let temp = TempDir::new().unwrap();
        sh("pwd > marker.txt").cwd(temp.path()).run().unwrap();

        let recorded = fs::read_to_string(temp.path().join("marker.txt")).unwrap();
        let recorded = recorded.trim();
        let expected = temp.path().canonicalize().unwrap();
        assert_eq!(std::path::Path::new(recorded).canonicalize().unwrap(), expected);
    }

    #[test]
    #[cfg(unix)]
    fn env_additions_reach_the_child() {
        let temp = TempDir::new().unwrap();
        sh("echo \"$DEPSTRAP_TEST_VALUE\" > env.txt")
            .cwd(temp.path())
            .env("DEPSTRAP_TEST_VALUE", "forty-two")
            .run()
            .unwrap();

        let recorded = fs::read_to_string(temp.path().join("env.txt")).unwrap();
        assert_eq!(recorded.trim(), "forty-two");
    }
}
