//! Shared helpers for command handlers.

use std::io::{self, IsTerminal};
use std::time::Duration;

use dialoguer::{Input, Password};
use indicatif::{ProgressBar, ProgressStyle};

use rollbook_core::{CredentialForm, LoginResult, Portal};

use crate::cli::{CredentialArgs, GlobalOpts};
use crate::config::Profile;
use crate::error::CliError;

// ── Loading indicator ───────────────────────────────────────────────

/// Stderr spinner shown while a request is in flight. Cleared on drop,
/// so every exit path (success, error, `?`) removes it.
pub struct Spinner(Option<ProgressBar>);

impl Spinner {
    pub fn start(message: &str, quiet: bool) -> Self {
        if quiet || !io::stderr().is_terminal() {
            return Self(None);
        }
        let bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner:.magenta} {msg}") {
            bar.set_style(style);
        }
        bar.set_message(message.to_owned());
        bar.enable_steady_tick(Duration::from_millis(80));
        Self(Some(bar))
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        if let Some(bar) = self.0.take() {
            bar.finish_and_clear();
        }
    }
}

// ── Credentials ─────────────────────────────────────────────────────

/// Map a dialoguer / interactive I/O failure into CliError.
pub fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

/// Fill the credential form from flags, the profile, then prompts.
///
/// Off a terminal a missing value stays empty and is rejected by form
/// validation before any request is made.
pub fn credential_form(args: CredentialArgs, profile: &Profile) -> Result<CredentialForm, CliError> {
    let interactive = io::stdin().is_terminal();

    let roll_number = match args.roll.or_else(|| profile.roll_number.clone()) {
        Some(roll) => roll,
        None if interactive => Input::new()
            .with_prompt("Roll number")
            .interact_text()
            .map_err(prompt_err)?,
        None => String::new(),
    };

    let birthday = match args.dob {
        Some(dob) => dob,
        None if interactive => Password::new()
            .with_prompt("Date of birth (YYYY-MM-DD)")
            .allow_empty_password(true)
            .interact()
            .map_err(prompt_err)?,
        None => String::new(),
    };

    Ok(CredentialForm::new(roll_number, birthday))
}

/// Log in with the resolved credentials, spinner on stderr meanwhile.
pub async fn login(
    portal: &Portal,
    args: CredentialArgs,
    profile: &Profile,
    global: &GlobalOpts,
) -> Result<LoginResult, CliError> {
    let form = credential_form(args, profile)?;
    let _spinner = Spinner::start("Logging in", global.quiet);
    Ok(portal.login(&form).await?)
}
