use crate::external::{ProviderError, ShortenProvider};
use std::process::{Command, Stdio};
use tracing::trace;

/// A provider backed by an external program.
///
/// The program is run with the configured arguments followed by the page
/// URL; the first line it prints is taken as the short URL. A non-zero exit
/// status is a failure, reported with the program's stderr.
#[derive(Debug, Clone)]
pub struct CommandProvider {
    id: String,
    program: String,
    args: Vec<String>,
}

impl CommandProvider {
    pub fn new(id: impl Into<String>, program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            id: id.into(),
            program: program.into(),
            args,
        }
    }

    /// Parses `id=program arg...`, splitting the command on whitespace.
    pub fn parse(definition: &str) -> Result<Self, ProviderError> {
        let (id, command) = definition
            .split_once('=')
            .ok_or_else(|| ProviderError::new(format!("expected `id=command`, got `{definition}`")))?;
        let mut words = command.split_whitespace().map(str::to_string);
        let program = words
            .next()
            .ok_or_else(|| ProviderError::new(format!("provider `{id}` has no command")))?;
        let id = id.trim();
        if id.is_empty() {
            return Err(ProviderError::new(format!("provider id is empty in `{definition}`")));
        }
        Ok(Self::new(id, program, words.collect()))
    }
}

impl ShortenProvider for CommandProvider {
    fn id(&self) -> &str {
        &self.id
    }

    fn shorten(&self, url: &str) -> Result<String, ProviderError> {
        trace!(provider = %self.id, program = %self.program, url, "running shortening command");

        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(url)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| ProviderError::new(format!("cannot run `{}`: {e}", self.program)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ProviderError::new(format!(
                "`{}` exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        stdout
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .map(str::to_string)
            .ok_or_else(|| ProviderError::new(format!("`{}` printed nothing", self.program)))
    }
}
