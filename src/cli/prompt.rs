//! Terminal prompt for the developer Postman API key.

use std::io::{self, IsTerminal};

use dialoguer::Password;

use crate::cli::output;
use crate::core::constants;
use crate::core::credentials::Prompt;
use crate::error::Result;

/// Hidden-input prompt on a terminal; one plain line from piped stdin.
pub struct TerminalPrompt;

impl Prompt for TerminalPrompt {
    fn prompt_line(&self, message: &str) -> Result<String> {
        output::hint(&format!(
            "Postman API key required, see {}",
            constants::API_KEYS_URL
        ));

        if !io::stdin().is_terminal() {
            let mut input = String::new();
            io::stdin().read_line(&mut input)?;
            return Ok(input.trim().to_string());
        }

        let value = Password::new()
            .with_prompt(message)
            .allow_empty_password(true)
            .interact()?;
        Ok(value)
    }
}
