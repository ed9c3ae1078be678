// Birthday handling
//
// The records service uses the student's date of birth, rendered as
// `DD-Mon-YYYY`, as the account password. Parsing happens once at the
// input boundary so an invalid date can never leak into a request body.

use chrono::{Datelike, NaiveDate};
use secrecy::SecretString;

use crate::error::Error;

/// Shape produced by HTML date pickers and accepted on the command line.
const INPUT_FORMAT: &str = "%Y-%m-%d";

/// Password shape expected by the service: `01-Mar-2005`.
///
/// chrono renders `%b` with fixed English abbreviations, independent of
/// the host locale.
const PASSWORD_FORMAT: &str = "%d-%b-%Y";

/// Parse a `YYYY-MM-DD` birthday.
pub fn parse_birthday(input: &str) -> Result<NaiveDate, Error> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidBirthday {
            input: input.to_owned(),
            reason: "date of birth is required".into(),
        });
    }

    let date =
        NaiveDate::parse_from_str(trimmed, INPUT_FORMAT).map_err(|e| Error::InvalidBirthday {
            input: input.to_owned(),
            reason: format!("{e} (expected YYYY-MM-DD)"),
        })?;

    // `%Y` renders anything else without four plain digits.
    if !(1..=9999).contains(&date.year()) {
        return Err(Error::InvalidBirthday {
            input: input.to_owned(),
            reason: "year must be between 0001 and 9999".into(),
        });
    }
    Ok(date)
}

/// Render a birthday as `DD-Mon-YYYY`.
pub fn format_birthday(date: NaiveDate) -> String {
    date.format(PASSWORD_FORMAT).to_string()
}

/// The login password for a given birthday.
pub fn password_for(date: NaiveDate) -> SecretString {
    SecretString::from(format_birthday(date))
}
