//! Operator-supplied credentials.
//!
//! Horus auth tokens expire while a harvest is still running, and the tool
//! does not refresh them itself. Whenever the service rejects the current
//! token the controller asks the [`CredentialProvider`] for a fresh one and
//! resumes from its checkpoint.

use std::io::{self, BufRead, Write};

use anyhow::{bail, Context, Result};

/// Opaque `Authorization` header value.
#[derive(Clone)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn header_value(&self) -> &str {
        &self.0
    }
}

/// Source of fresh auth tokens.
///
/// Invoked once at controller start and once per restart. Implementations
/// may block on operator input.
pub trait CredentialProvider {
    fn acquire(&mut self) -> Result<Credential>;
}

/// Prompts the operator for a token on the terminal.
///
/// The operator copies the `Authorization` request header out of a logged-in
/// browser session and pastes it here.
pub struct TerminalCredentials;

impl CredentialProvider for TerminalCredentials {
    fn acquire(&mut self) -> Result<Credential> {
        let mut stdout = io::stdout();
        writeln!(stdout, "To continue insert auth token:")?;
        stdout.flush()?;

        let mut line = String::new();
        io::stdin()
            .lock()
            .read_line(&mut line)
            .context("failed to read auth token from stdin")?;

        let token = line.trim();
        if token.is_empty() {
            bail!("no auth token entered");
        }
        Ok(Credential::new(token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_exposes_header_value() {
        let credential = Credential::new("Bearer abc123");
        assert_eq!(credential.header_value(), "Bearer abc123");
    }
}
