use std::ffi::{OsStr, OsString};
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum ExternalToolError {
    #[error("Failed to launch '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("'{program}' exited with {status}")]
    Failed { program: String, status: ExitStatus },
}

/// A fully specified external command: program, arguments and the
/// directory it runs in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolInvocation {
    pub program: PathBuf,
    pub args: Vec<OsString>,
    pub work_dir: PathBuf,
}

impl ToolInvocation {
    pub fn new(program: impl Into<PathBuf>, work_dir: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            work_dir: work_dir.into(),
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
        self.args
            .extend(args.into_iter().map(|a| a.as_ref().to_os_string()));
        self
    }

    pub fn program_name(&self) -> String {
        self.program.display().to_string()
    }

    /// Shell-like rendering for logs.
    pub fn command_line(&self) -> String {
        let mut line = self.program_name();
        for arg in &self.args {
            line.push(' ');
            line.push_str(&arg.to_string_lossy());
        }
        line
    }

    pub fn has_arg(&self, arg: &str) -> bool {
        self.args.iter().any(|a| a == arg)
    }

    pub fn arg_after(&self, flag: &str) -> Option<&Path> {
        let pos = self.args.iter().position(|a| a == flag)?;
        self.args.get(pos + 1).map(Path::new)
    }
}

/// Executes external tools. The workflows only talk to this trait, so they
/// can be exercised without Rosetta or ProQ installed.
pub trait CommandRunner {
    fn run(&self, invocation: &ToolInvocation) -> Result<(), ExternalToolError>;
}

/// Runs commands as child processes, inheriting stdout and stderr, and
/// waits for each to finish.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, invocation: &ToolInvocation) -> Result<(), ExternalToolError> {
        info!("Running: {}", invocation.command_line());
        debug!("Working directory: {:?}", invocation.work_dir);

        let status = Command::new(&invocation.program)
            .args(&invocation.args)
            .current_dir(&invocation.work_dir)
            .status()
            .map_err(|source| ExternalToolError::Spawn {
                program: invocation.program_name(),
                source,
            })?;

        if !status.success() {
            return Err(ExternalToolError::Failed {
                program: invocation.program_name(),
                status,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::sync::Mutex;

    type Hook = Box<dyn Fn(&ToolInvocation) -> Result<(), ExternalToolError> + Send + Sync>;

    /// Records every invocation and hands it to an optional hook that can
    /// fake the tool's side effects.
    pub struct RecordingRunner {
        pub calls: Mutex<Vec<ToolInvocation>>,
        hook: Option<Hook>,
    }

    impl RecordingRunner {
        pub fn new() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                hook: None,
            }
        }

        pub fn with_hook(
            hook: impl Fn(&ToolInvocation) -> Result<(), ExternalToolError> + Send + Sync + 'static,
        ) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                hook: Some(Box::new(hook)),
            }
        }

        pub fn calls(&self) -> Vec<ToolInvocation> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl CommandRunner for RecordingRunner {
        fn run(&self, invocation: &ToolInvocation) -> Result<(), ExternalToolError> {
            self.calls.lock().unwrap().push(invocation.clone());
            match &self.hook {
                Some(hook) => hook(invocation),
                None => Ok(()),
            }
        }
    }
}
