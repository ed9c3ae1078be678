//! CLI configuration: thin wrapper around `rollbook_config` shared types.
//!
//! Re-exports the shared types and adds resolution that respects the
//! `GlobalOpts` flag overrides (--profile, --base-url, --insecure, --timeout).

use rollbook_core::PortalConfig;

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use rollbook_config::{
    Config, DEFAULT_PROFILE, Profile, config_path, load_config, load_config_or_default,
    load_file_config, save_config,
};

// ── CLI-specific helpers ────────────────────────────────────────────

/// The active profile with CLI flag overrides applied.
///
/// Flags (and their `ROLLBOOK_*` env vars) win over profile values.
pub fn resolve_profile(global: &GlobalOpts, cfg: &Config) -> Result<Profile, CliError> {
    let name = cfg.active_profile_name(global.profile.as_deref());
    let mut profile = cfg.profile(&name)?;

    if let Some(ref url) = global.base_url {
        profile.base_url.clone_from(url);
    }
    if global.insecure {
        profile.insecure = Some(true);
    }
    if let Some(timeout) = global.timeout {
        profile.timeout = Some(timeout);
    }

    tracing::debug!(profile = %name, base_url = %profile.base_url, "resolved profile");
    Ok(profile)
}

/// Translate the resolved profile into a `PortalConfig`.
pub fn portal_config(profile: &Profile, cfg: &Config) -> Result<PortalConfig, CliError> {
    Ok(rollbook_config::profile_to_portal_config(
        profile,
        &cfg.defaults,
    )?)
}
