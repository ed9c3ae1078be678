//! Session details handler.

use tabled::Tabled;

use rollbook_core::{Portal, StudentDetails, Subject};

use crate::cli::{DetailsArgs, GlobalOpts};
use crate::config::Profile;
use crate::error::CliError;
use crate::output;

use super::util::{self, Spinner};

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct SubjectRow {
    #[tabled(rename = "Subject")]
    name: String,
    #[tabled(rename = "Mode")]
    mode: String,
}

impl From<&Subject> for SubjectRow {
    fn from(s: &Subject) -> Self {
        Self {
            name: s.name.clone(),
            mode: s.mode.clone(),
        }
    }
}

fn detail(d: &StudentDetails, color: bool) -> String {
    let mut lines = vec![
        output::heading("Basic", color),
        output::field("Name", &d.basic.name, color),
        output::field("Reg No", &d.basic.reg_no, color),
        output::field("Gender", &d.basic.gender, color),
        String::new(),
        output::heading("Academic", color),
        output::field("Course", &d.academic.course, color),
        output::field("Stream", &d.academic.stream, color),
        output::field("Batch", &d.academic.batch, color),
        output::field("Section", &d.academic.section, color),
        output::field("Session", &d.academic.session, color),
        String::new(),
        output::heading("Subjects", color),
    ];
    if d.subjects.is_empty() {
        lines.push("-".into());
    } else {
        let rows: Vec<SubjectRow> = d.subjects.iter().map(SubjectRow::from).collect();
        lines.push(output::render_table(&rows));
    }
    lines.join("\n")
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    portal: &Portal,
    args: DetailsArgs,
    profile: &Profile,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let result = util::login(portal, args.credentials, profile, global).await?;

    if !result.has_session(&args.session) {
        let available = if result.session_list.is_empty() {
            "(none)".to_owned()
        } else {
            result.session_list.join(", ")
        };
        return Err(CliError::UnknownSession {
            session: args.session,
            available,
        });
    }

    let details = {
        let _spinner = Spinner::start("Fetching details", global.quiet);
        portal.open_session(&args.session).await?
    };

    let color = output::should_color(&global.color);
    let out = output::render_single(
        &global.output,
        &details,
        |d| detail(d, color),
        |d| {
            d.subjects
                .iter()
                .map(|s| s.name.clone())
                .collect::<Vec<_>>()
                .join("\n")
        },
    );
    output::print_output(&out, global.quiet);
    Ok(())
}
