//! Webinar domain - schedule settings shown publicly and in emails.

mod settings;

pub use settings::{
    parse_webinar_date, SettingsUpdate, WebinarSettings, DEFAULT_WEBINAR_DATE,
    DEFAULT_WEBINAR_TIME, DEFAULT_WEBINAR_TITLE, KEY_WEBINAR_DATE, KEY_WEBINAR_TIME,
    KEY_WEBINAR_TITLE, KEY_ZOOM_LINK,
};
