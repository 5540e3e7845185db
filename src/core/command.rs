use std::io;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use tokio::process::Command;

use crate::error::{Error, Result};

/// Timeout for desktop tools that are expected to answer right away.
pub const TOOL_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub timeout: Option<Duration>,
}

impl Invocation {
    pub fn new<I, S>(program: &str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.to_string(),
            args: args.into_iter().map(Into::into).collect(),
            timeout: Some(TOOL_TIMEOUT),
        }
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Runs an external program and reports whether it succeeded.
#[async_trait]
pub trait Runner: Send + Sync {
    async fn run(&self, invocation: &Invocation) -> Result<()>;
}

pub struct System;

#[async_trait]
impl Runner for System {
    async fn run(&self, invocation: &Invocation) -> Result<()> {
        debug!("Running {} {:?}", invocation.program, invocation.args);

        let child = Command::new(&invocation.program)
            .args(&invocation.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|err| match err.kind() {
                io::ErrorKind::NotFound => Error::ToolNotFound(invocation.program.clone()),
                _ => Error::Backend(format!("Failed to run {}: {}", invocation.program, err)),
            })?;

        // Dropping the future on timeout kills the child.
        let output = match invocation.timeout {
            Some(limit) => tokio::time::timeout(limit, child.wait_with_output())
                .await
                .map_err(|_| {
                    Error::Backend(format!(
                        "{} did not finish within {}s",
                        invocation.program,
                        limit.as_secs()
                    ))
                })??,
            None => child.wait_with_output().await?,
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::Backend(format!(
                "{} failed ({}): {}",
                invocation.program,
                output.status,
                stderr.trim()
            )));
        }

        Ok(())
    }
}
