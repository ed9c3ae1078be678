//! Login and session-list handlers.

use tabled::Tabled;

use rollbook_core::{LoginResult, Portal};

use crate::cli::{CredentialArgs, GlobalOpts};
use crate::config::Profile;
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct SessionRow {
    #[tabled(rename = "Session")]
    session: String,
}

fn detail(result: &LoginResult, color: bool) -> String {
    let sessions = if result.session_list.is_empty() {
        "-".to_owned()
    } else {
        result.session_list.join(", ")
    };
    [
        output::field("Name", &result.name, color),
        output::field("Reg No", &result.reg_no, color),
        output::field("Sessions", sessions, color),
    ]
    .join("\n")
}

// ── Handlers ────────────────────────────────────────────────────────

pub async fn handle(
    portal: &Portal,
    args: CredentialArgs,
    profile: &Profile,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let result = util::login(portal, args, profile, global).await?;
    let color = output::should_color(&global.color);
    let out = output::render_single(
        &global.output,
        &result,
        |r| detail(r, color),
        |r| r.reg_no.clone(),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}

pub async fn sessions(
    portal: &Portal,
    args: CredentialArgs,
    profile: &Profile,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let result = util::login(portal, args, profile, global).await?;
    if result.session_list.is_empty() && !global.quiet {
        eprintln!("No sessions on record for {}", result.reg_no);
    }
    let out = output::render_list(
        &global.output,
        &result.session_list,
        |s| SessionRow { session: s.clone() },
        Clone::clone,
    );
    output::print_output(&out, global.quiet);
    Ok(())
}
