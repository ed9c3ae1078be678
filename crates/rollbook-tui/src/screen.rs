//! Screen identifier enum.

use std::fmt;

use rollbook_core::View;

/// The two TUI screens, one per portal view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScreenId {
    #[default]
    Login,
    Dashboard,
}

impl ScreenId {
    /// Title for the header bar.
    pub fn label(self) -> &'static str {
        match self {
            Self::Login => "Login",
            Self::Dashboard => "Dashboard",
        }
    }
}

impl From<View> for ScreenId {
    fn from(view: View) -> Self {
        match view {
            View::CredentialForm => Self::Login,
            View::Dashboard => Self::Dashboard,
        }
    }
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
