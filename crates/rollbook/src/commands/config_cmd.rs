//! Config subcommand handlers.

use std::fmt::Write as _;

use dialoguer::{Confirm, Input};

use rollbook_core::DEFAULT_BASE_URL;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Config, DEFAULT_PROFILE, Profile};
use crate::error::CliError;
use crate::output;

use super::util::prompt_err;

// ── Helpers ─────────────────────────────────────────────────────────

/// Format config as TOML-ish text for the table view.
fn format_config(cfg: &Config) -> String {
    let mut out = String::new();

    if let Some(ref default) = cfg.default_profile {
        let _ = writeln!(out, "default_profile = \"{default}\"");
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "[defaults]");
    let _ = writeln!(out, "output = \"{}\"", cfg.defaults.output);
    let _ = writeln!(out, "color = \"{}\"", cfg.defaults.color);
    let _ = writeln!(out, "insecure = {}", cfg.defaults.insecure);
    let _ = writeln!(out, "timeout = {}", cfg.defaults.timeout);

    for (name, p) in &cfg.profiles {
        let _ = writeln!(out);
        let _ = writeln!(out, "[profiles.{name}]");
        let _ = writeln!(out, "base_url = \"{}\"", p.base_url);
        if let Some(ref roll) = p.roll_number {
            let _ = writeln!(out, "roll_number = \"{roll}\"");
        }
        if let Some(ref ca) = p.ca_cert {
            let _ = writeln!(out, "ca_cert = \"{}\"", ca.display());
        }
        if let Some(insecure) = p.insecure {
            let _ = writeln!(out, "insecure = {insecure}");
        }
        if let Some(timeout) = p.timeout {
            let _ = writeln!(out, "timeout = {timeout}");
        }
    }

    out.trim_end().to_owned()
}

fn save_config(cfg: &Config) -> Result<(), CliError> {
    config::save_config(cfg)?;
    Ok(())
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        // ── Init: interactive wizard ────────────────────────────────
        ConfigCommand::Init => {
            let config_path = config::config_path();
            eprintln!("rollbook configuration wizard");
            eprintln!("   Config path: {}\n", config_path.display());

            if config_path.exists()
                && !Confirm::new()
                    .with_prompt("A config file already exists. Overwrite it?")
                    .default(false)
                    .interact()
                    .map_err(prompt_err)?
            {
                return Ok(());
            }

            let profile_name: String = Input::new()
                .with_prompt("Profile name")
                .default(DEFAULT_PROFILE.into())
                .interact_text()
                .map_err(prompt_err)?;

            let base_url: String = Input::new()
                .with_prompt("Records service URL")
                .default(DEFAULT_BASE_URL.into())
                .validate_with(|input: &String| {
                    rollbook_config::parse_base_url(input)
                        .map(|_| ())
                        .map_err(|e| e.to_string())
                })
                .interact_text()
                .map_err(prompt_err)?;

            let roll: String = Input::new()
                .with_prompt("Roll number (optional)")
                .allow_empty(true)
                .interact_text()
                .map_err(prompt_err)?;

            let mut cfg = Config {
                default_profile: Some(profile_name.clone()),
                ..Config::default()
            };
            cfg.profiles.insert(
                profile_name.clone(),
                Profile {
                    base_url,
                    roll_number: Some(roll.trim().to_owned()).filter(|r| !r.is_empty()),
                    ..Profile::default()
                },
            );

            save_config(&cfg)?;

            eprintln!("\n✓ Configuration written to {}", config_path.display());
            eprintln!("  Active profile: {profile_name}");
            eprintln!("\n  Test it: rollbook sessions");
            Ok(())
        }

        // ── Show ────────────────────────────────────────────────────
        ConfigCommand::Show => {
            let cfg = config::load_config_or_default();
            let out = output::render_single(&global.output, &cfg, format_config, |c| {
                c.profiles.keys().cloned().collect::<Vec<_>>().join("\n")
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        // ── Path ────────────────────────────────────────────────────
        ConfigCommand::Path => {
            output::print_output(&config::config_path().display().to_string(), false);
            Ok(())
        }

        // ── SetProfile <name> ───────────────────────────────────────
        ConfigCommand::SetProfile {
            name,
            base_url,
            roll,
            ca_cert,
            insecure,
            timeout,
        } => {
            // The file alone: env overrides must not be written back.
            let mut cfg = config::load_file_config()?;
            let profile = cfg.profiles.entry(name.clone()).or_default();

            if let Some(url) = base_url {
                rollbook_config::parse_base_url(&url)?;
                profile.base_url = url;
            }
            if let Some(roll) = roll {
                profile.roll_number = Some(roll).filter(|r| !r.trim().is_empty());
            }
            if ca_cert.is_some() {
                profile.ca_cert = ca_cert;
            }
            if insecure.is_some() {
                profile.insecure = insecure;
            }
            if timeout.is_some() {
                profile.timeout = timeout;
            }

            save_config(&cfg)?;
            if !global.quiet {
                eprintln!("✓ Saved profile '{name}'");
            }
            Ok(())
        }

        // ── Use <name> ─────────────────────────────────────────────
        ConfigCommand::Use { name } => {
            let mut cfg = config::load_file_config()?;

            if name != DEFAULT_PROFILE && !cfg.profiles.contains_key(&name) {
                return Err(CliError::ProfileNotFound {
                    available: cfg.available_profiles(),
                    name,
                });
            }

            cfg.default_profile = Some(name.clone());
            save_config(&cfg)?;
            if !global.quiet {
                eprintln!("✓ Default profile set to '{name}'");
            }
            Ok(())
        }
    }
}
