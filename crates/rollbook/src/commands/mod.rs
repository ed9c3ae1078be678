//! Command dispatch: bridges CLI args -> `Portal` calls -> output formatting.

pub mod config_cmd;
pub mod details;
pub mod login;
pub mod util;

use rollbook_core::Portal;

use crate::cli::{Command, GlobalOpts};
use crate::config::Profile;
use crate::error::CliError;

/// Dispatch a service-bound command to its handler.
pub async fn dispatch(
    cmd: Command,
    portal: &Portal,
    profile: &Profile,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Login(args) => login::handle(portal, args, profile, global).await,
        Command::Sessions(args) => login::sessions(portal, args, profile, global).await,
        Command::Details(args) => details::handle(portal, args, profile, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
