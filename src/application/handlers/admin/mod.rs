//! Admin handlers and the settings views shared with public routes.

mod admin_login;
mod list_registrations;
mod send_webinar_links;
mod webinar_settings;

pub use admin_login::AdminLoginHandler;
pub use list_registrations::ListRegistrationsHandler;
pub use send_webinar_links::{
    FailedRecipient, SendWebinarLinksCommand, SendWebinarLinksHandler, SendWebinarLinksResult,
};
pub use webinar_settings::WebinarSettingsHandler;
