//! Webinar schedule settings and the registration-open rule.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const KEY_WEBINAR_DATE: &str = "webinar_date";
pub const KEY_WEBINAR_TIME: &str = "webinar_time";
pub const KEY_WEBINAR_TITLE: &str = "webinar_title";
pub const KEY_ZOOM_LINK: &str = "zoom_link";

pub const DEFAULT_WEBINAR_DATE: &str = "December 10, 2025";
pub const DEFAULT_WEBINAR_TIME: &str = "9:00 AM - 12:00 PM IST";
pub const DEFAULT_WEBINAR_TITLE: &str = "The Needles Webinar";

/// Accepted spellings of the webinar date, tried in order.
const DATE_FORMATS: [&str; 5] = ["%B %d, %Y", "%d %B %Y", "%d-%m-%Y", "%Y-%m-%d", "%d %B, %Y"];

/// Current webinar schedule as configured by the admin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebinarSettings {
    pub webinar_date: String,
    pub webinar_time: String,
    pub webinar_title: String,
    pub zoom_link: String,
}

impl Default for WebinarSettings {
    fn default() -> Self {
        Self {
            webinar_date: DEFAULT_WEBINAR_DATE.to_string(),
            webinar_time: DEFAULT_WEBINAR_TIME.to_string(),
            webinar_title: DEFAULT_WEBINAR_TITLE.to_string(),
            zoom_link: String::new(),
        }
    }
}

impl WebinarSettings {
    /// Builds settings from stored key/value pairs; missing keys keep defaults.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut settings = Self::default();
        for (key, value) in pairs {
            let value = value.into();
            match key.as_ref() {
                KEY_WEBINAR_DATE => settings.webinar_date = value,
                KEY_WEBINAR_TIME => settings.webinar_time = value,
                KEY_WEBINAR_TITLE => settings.webinar_title = value,
                KEY_ZOOM_LINK => settings.zoom_link = value,
                _ => {}
            }
        }
        settings
    }

    /// Key/value pairs in storage form.
    pub fn to_pairs(&self) -> [(&'static str, &str); 4] {
        [
            (KEY_WEBINAR_DATE, self.webinar_date.as_str()),
            (KEY_WEBINAR_TIME, self.webinar_time.as_str()),
            (KEY_WEBINAR_TITLE, self.webinar_title.as_str()),
            (KEY_ZOOM_LINK, self.zoom_link.as_str()),
        ]
    }

    /// Applies a partial update; `None` fields are left unchanged.
    pub fn apply(&mut self, update: SettingsUpdate) {
        if let Some(date) = update.webinar_date {
            self.webinar_date = date;
        }
        if let Some(time) = update.webinar_time {
            self.webinar_time = time;
        }
        if let Some(title) = update.webinar_title {
            self.webinar_title = title;
        }
        if let Some(link) = update.zoom_link {
            self.zoom_link = link;
        }
    }

    /// Parsed webinar date, if it matches one of the accepted formats.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        parse_webinar_date(&self.webinar_date)
    }

    /// Registration closes on the webinar day. Unparsable dates keep it open.
    pub fn registration_open(&self, today: NaiveDate) -> bool {
        match self.parsed_date() {
            Some(date) => today < date,
            None => true,
        }
    }
}

/// Partial settings update from the admin surface.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SettingsUpdate {
    pub webinar_date: Option<String>,
    pub webinar_time: Option<String>,
    pub webinar_title: Option<String>,
    pub zoom_link: Option<String>,
}

impl SettingsUpdate {
    pub fn is_empty(&self) -> bool {
        self.webinar_date.is_none()
            && self.webinar_time.is_none()
            && self.webinar_title.is_none()
            && self.zoom_link.is_none()
    }
}

pub fn parse_webinar_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn defaults_match_published_schedule() {
        let settings = WebinarSettings::default();
        assert_eq!(settings.webinar_date, "December 10, 2025");
        assert_eq!(settings.webinar_time, "9:00 AM - 12:00 PM IST");
        assert_eq!(settings.webinar_title, "The Needles Webinar");
        assert!(settings.zoom_link.is_empty());
    }

    #[test]
    fn parses_every_accepted_format() {
        let expected = date(2025, 12, 10);
        for raw in [
            "December 10, 2025",
            "10 December 2025",
            "10-12-2025",
            "2025-12-10",
            "10 December, 2025",
            "  2025-12-10  ",
        ] {
            assert_eq!(parse_webinar_date(raw), Some(expected), "format {raw}");
        }
    }

    #[test]
    fn unparsable_date_keeps_registration_open() {
        let settings = WebinarSettings {
            webinar_date: "sometime soon".to_string(),
            ..WebinarSettings::default()
        };
        assert!(settings.registration_open(date(2030, 1, 1)));
    }

    #[test]
    fn registration_closes_on_webinar_day() {
        let settings = WebinarSettings::default();
        assert!(settings.registration_open(date(2025, 12, 9)));
        assert!(!settings.registration_open(date(2025, 12, 10)));
        assert!(!settings.registration_open(date(2025, 12, 11)));
    }

    #[test]
    fn from_pairs_ignores_unknown_keys() {
        let settings = WebinarSettings::from_pairs([
            ("webinar_title", "Masterclass"),
            ("theme", "dark"),
        ]);
        assert_eq!(settings.webinar_title, "Masterclass");
        assert_eq!(settings.webinar_date, DEFAULT_WEBINAR_DATE);
    }

    #[test]
    fn apply_changes_only_present_fields() {
        let mut settings = WebinarSettings::default();
        settings.apply(SettingsUpdate {
            zoom_link: Some("https://zoom.us/j/1".to_string()),
            ..SettingsUpdate::default()
        });
        assert_eq!(settings.zoom_link, "https://zoom.us/j/1");
        assert_eq!(settings.webinar_title, DEFAULT_WEBINAR_TITLE);
    }
}
