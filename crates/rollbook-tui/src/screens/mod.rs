//! Screen implementations. Each screen is a top-level Component.

pub mod dashboard;
pub mod login;

use crate::component::Component;
use crate::screen::ScreenId;

/// Create both screens. The login form starts pre-filled with `roll_number`.
pub fn create_screens(roll_number: Option<String>) -> Vec<(ScreenId, Box<dyn Component>)> {
    vec![
        (
            ScreenId::Login,
            Box::new(login::LoginScreen::new(roll_number)),
        ),
        (
            ScreenId::Dashboard,
            Box::new(dashboard::DashboardScreen::new()),
        ),
    ]
}
