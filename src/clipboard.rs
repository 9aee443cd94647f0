use std::process::Stdio;

use anyhow::{Context, Result};
use futures::FutureExt;
use futures::future::BoxFuture;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::platform::Clipboard;

/// Clipboard backed by an external command reading plain text on stdin
/// (`pbcopy`, `wl-copy`, `xclip -selection clipboard`, ...).
pub struct CommandClipboard {
    program: String,
    args: Vec<String>,
}

impl CommandClipboard {
    /// Returns `None` for an empty command line
    pub fn new(cmd: &[String]) -> Option<Self> {
        let (program, args) = cmd.split_first()?;
        Some(Self {
            program: program.clone(),
            args: args.to_vec(),
        })
    }

    async fn run(&self, text: &str) -> Result<()> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .spawn()
            .with_context(|| format!("Failed to start clipboard command '{}'", self.program))?;

        let written = match child.stdin.take() {
            Some(mut stdin) => stdin.write_all(text.as_bytes()).await,
            None => Err(std::io::Error::other("no stdin")),
        };
        // stdin is closed by now; reap the child even when the write failed
        let status = child
            .wait()
            .await
            .context("Clipboard command did not finish")?;
        written.context("Failed to write to clipboard command")?;

        if !status.success() {
            anyhow::bail!("Clipboard command '{}' exited with {}", self.program, status);
        }
        Ok(())
    }
}

impl Clipboard for CommandClipboard {
    fn set_text<'a>(&'a self, text: &'a str) -> BoxFuture<'a, Result<()>> {
        self.run(text).boxed()
    }
}
