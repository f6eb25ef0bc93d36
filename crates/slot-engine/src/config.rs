//! TOML-based scheduler configuration.
//!
//! Holds a user's scheduling preferences: preference policy, work hours, sprint
//! length, excluded weekdays and the named time zone slots are reported in.
//! Every field has a default, so an empty file is a valid configuration.
//!
//! ```toml
//! preference = "afternoon"
//! work_start_hour = 9
//! work_end_hour = 19
//! sprint_days = 14
//! excluded_weekdays = ["Fri", "Sat"]
//! time_zone = "Asia/Jerusalem"
//! ```

use std::path::Path;

use chrono::{Duration, NaiveDate, Utc, Weekday};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};
use crate::interval::validate_work_hours;
use crate::provider::BusySource;
use crate::selector::Preference;
use crate::walker::{SlotRequest, SprintWalker, DEFAULT_EXCLUDED_WEEKDAYS};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulerConfig {
    #[serde(default)]
    pub preference: Preference,
    #[serde(default = "default_work_start_hour")]
    pub work_start_hour: u32,
    #[serde(default = "default_work_end_hour")]
    pub work_end_hour: u32,
    /// Number of calendar days a sprint covers, counting the first.
    #[serde(default = "default_sprint_days")]
    pub sprint_days: u32,
    #[serde(default = "default_excluded_weekdays")]
    pub excluded_weekdays: Vec<Weekday>,
    /// IANA zone name attached to scheduled events.
    #[serde(default = "default_time_zone")]
    pub time_zone: String,
}

fn default_work_start_hour() -> u32 {
    9
}
fn default_work_end_hour() -> u32 {
    19
}
fn default_sprint_days() -> u32 {
    14
}
fn default_excluded_weekdays() -> Vec<Weekday> {
    DEFAULT_EXCLUDED_WEEKDAYS.to_vec()
}
fn default_time_zone() -> String {
    "Asia/Jerusalem".into()
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            preference: Preference::default(),
            work_start_hour: default_work_start_hour(),
            work_end_hour: default_work_end_hour(),
            sprint_days: default_sprint_days(),
            excluded_weekdays: default_excluded_weekdays(),
            time_zone: default_time_zone(),
        }
    }
}

impl SchedulerConfig {
    /// Read and validate a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            SlotError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| SlotError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| SlotError::Config(e.to_string()))
    }

    pub fn validate(&self) -> Result<()> {
        validate_work_hours(self.work_start_hour, self.work_end_hour)
            .map_err(|e| SlotError::Config(e.to_string()))?;
        if self.sprint_days == 0 {
            return Err(SlotError::Config("sprint_days must be at least 1".into()));
        }
        self.time_zone()?;
        Ok(())
    }

    pub fn time_zone(&self) -> Result<Tz> {
        self.time_zone
            .parse()
            .map_err(|_| SlotError::InvalidTimezone(self.time_zone.clone()))
    }

    /// Today's date in the configured zone.
    pub fn today(&self) -> Result<NaiveDate> {
        Ok(Utc::now().with_timezone(&self.time_zone()?).date_naive())
    }

    /// Build a request covering `sprint_days` days from `sprint_start`.
    pub fn request_for(&self, duration_hours: f64, sprint_start: NaiveDate) -> Result<SlotRequest> {
        let sprint_end = sprint_start
            .checked_add_signed(Duration::days(i64::from(self.sprint_days.saturating_sub(1))))
            .ok_or_else(|| {
                SlotError::InvalidRequest(format!("sprint starting {} overflows", sprint_start))
            })?;
        Ok(SlotRequest {
            duration_hours,
            preference: self.preference,
            sprint_start,
            sprint_end,
            work_start_hour: self.work_start_hour,
            work_end_hour: self.work_end_hour,
        })
    }

    /// A walker over `source` honouring the configured weekend.
    pub fn walker<S: BusySource>(&self, source: S) -> SprintWalker<S> {
        SprintWalker::new(source).with_excluded_weekdays(self.excluded_weekdays.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let config = SchedulerConfig::from_toml_str("").unwrap();
        assert_eq!(config, SchedulerConfig::default());
        assert_eq!(config.excluded_weekdays, vec![Weekday::Fri, Weekday::Sat]);
    }

    #[test]
    fn parses_all_fields() {
        let config = SchedulerConfig::from_toml_str(
            r#"
preference = "morning"
work_start_hour = 8
work_end_hour = 16
sprint_days = 5
excluded_weekdays = ["Sat", "Sun"]
time_zone = "Europe/London"
"#,
        )
        .unwrap();
        assert_eq!(config.preference, Preference::Morning);
        assert_eq!(config.work_start_hour, 8);
        assert_eq!(config.work_end_hour, 16);
        assert_eq!(config.sprint_days, 5);
        assert_eq!(config.excluded_weekdays, vec![Weekday::Sat, Weekday::Sun]);
        assert_eq!(config.time_zone().unwrap(), chrono_tz::Europe::London);
    }

    #[test]
    fn unknown_time_zone_rejected() {
        let err = SchedulerConfig::from_toml_str(r#"time_zone = "Mars/Olympus""#).unwrap_err();
        assert!(matches!(err, SlotError::InvalidTimezone(_)));
    }

    #[test]
    fn inverted_work_hours_rejected() {
        let err =
            SchedulerConfig::from_toml_str("work_start_hour = 18\nwork_end_hour = 9").unwrap_err();
        assert!(matches!(err, SlotError::Config(_)));
    }

    #[test]
    fn request_spans_sprint_days() {
        let config = SchedulerConfig::default();
        let start = NaiveDate::from_ymd_opt(2026, 3, 16).unwrap();
        let request = config.request_for(2.0, start).unwrap();
        assert_eq!(request.sprint_end, NaiveDate::from_ymd_opt(2026, 3, 29).unwrap());
        assert_eq!(request.work_start_hour, 9);
        assert_eq!(request.work_end_hour, 19);
    }

    #[test]
    fn toml_roundtrip_keeps_values() {
        let config = SchedulerConfig {
            preference: Preference::Afternoon,
            ..SchedulerConfig::default()
        };
        let text = config.to_toml_string().unwrap();
        assert_eq!(SchedulerConfig::from_toml_str(&text).unwrap(), config);
    }
}
