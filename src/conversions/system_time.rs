// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use chrono::{DateTime, Timelike, Utc};
use serde::Deserialize;
use std::time::Duration;

use crate::conversion::{Conversion, ConversionRegistry, MessageDescriptor, OutputDiscipline, Trigger};
use crate::errors::{ConfigError, TransformError, ValidationError};

pub const SYSTEM_TIME: &str = "SYSTEM_TIME";
const TITLE: &str = "System Time (126992)";
const DEFAULT_INTERVAL_MS: u64 = 1000;

/// Time source "local crystal clock" in the low nibble, reserved bits set.
const SOURCE_LOCAL_CLOCK: u8 = 0xf0 | 0x05;

#[derive(Debug, Deserialize)]
struct Settings {
    #[serde(default = "default_interval_ms")]
    interval_ms: u64,
}

fn default_interval_ms() -> u64 {
    DEFAULT_INTERVAL_MS
}

pub(super) fn register(registry: &mut ConversionRegistry) -> Result<(), ValidationError> {
    registry.register_configured(SYSTEM_TIME, TITLE, |options| {
        let Settings { interval_ms } = options.settings_as()?;
        if interval_ms == 0 {
            return Err(ConfigError::InvalidOption {
                option_key: options.option_key().to_string(),
                reason: "'interval_ms' must be greater than zero".to_string(),
            });
        }

        let conversion = Conversion::new(
            SYSTEM_TIME,
            TITLE,
            Trigger::every(Duration::from_millis(interval_ms), |_| {
                Ok(Some(vec![Some(MessageDescriptor::raw(126992, payload(Utc::now())?))]))
            }),
        )
        .with_output(OutputDiscipline::RawBuffer);
        Ok(vec![conversion])
    })
}

/// SID, source, days since 1970-01-01, then 0.1 ms units since midnight.
fn payload(now: DateTime<Utc>) -> Result<Vec<u8>, TransformError> {
    let days = u16::try_from(now.timestamp().div_euclid(86_400))
        .map_err(|_| TransformError::failed(format!("{} is outside the 126992 date range", now)))?;
    let ticks = now.num_seconds_from_midnight() * 10_000 + now.nanosecond().min(999_999_999) / 100_000;

    let mut bytes = Vec::with_capacity(8);
    bytes.push(0xff);
    bytes.push(SOURCE_LOCAL_CLOCK);
    bytes.extend_from_slice(&days.to_le_bytes());
    bytes.extend_from_slice(&ticks.to_le_bytes());
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConversionOptions;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn payload_layout() {
        // 2026-10-19 is day 20745; 10:00:00.5 is 360_005_000 ticks.
        let now = Utc.with_ymd_and_hms(2026, 10, 19, 10, 0, 0).unwrap() + chrono::Duration::milliseconds(500);
        let bytes = payload(now).unwrap();
        assert_eq!(bytes.len(), 8);
        assert_eq!(&bytes[..2], &[0xff, 0xf5]);
        assert_eq!(u16::from_le_bytes([bytes[2], bytes[3]]), 20745);
        assert_eq!(u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]), 360_005_000);
    }

    #[test]
    fn dates_outside_the_day_counter_fail() {
        let before_epoch = Utc.with_ymd_and_hms(1969, 12, 31, 23, 59, 59).unwrap();
        assert!(payload(before_epoch).is_err());

        // Day 65535 is 2149-06-06; the day after no longer fits.
        let last_day = Utc.with_ymd_and_hms(2149, 6, 6, 12, 0, 0).unwrap();
        assert_eq!(&payload(last_day).unwrap()[2..4], &[0xff, 0xff]);
        let overflow = Utc.with_ymd_and_hms(2149, 6, 7, 0, 0, 0).unwrap();
        assert!(matches!(payload(overflow), Err(TransformError::Failed(_))));
    }

    fn resolve(options: ConversionOptions) -> Result<Vec<Conversion>, ConfigError> {
        let registry = crate::conversions::builtin().unwrap();
        let entry = registry.entries().find(|entry| entry.option_key() == SYSTEM_TIME).unwrap();
        entry.resolve(&options)
    }

    #[test]
    fn interval_defaults_to_one_second() {
        let conversions = resolve(ConversionOptions::enabled()).unwrap();
        assert_eq!(conversions[0].output(), OutputDiscipline::RawBuffer);
        let Trigger::Timer { interval, .. } = conversions[0].trigger() else {
            panic!("expected timer trigger");
        };
        assert_eq!(*interval, Duration::from_secs(1));
    }

    #[test]
    fn zero_interval_is_rejected() {
        let result = resolve(ConversionOptions::enabled().with_setting("interval_ms", json!(0)));
        assert!(matches!(result, Err(ConfigError::InvalidOption { .. })));
    }

    #[test]
    fn interval_is_read_from_settings() {
        let conversions = resolve(ConversionOptions::enabled().with_setting("interval_ms", json!(250))).unwrap();
        let Trigger::Timer { interval, .. } = conversions[0].trigger() else {
            panic!("expected timer trigger");
        };
        assert_eq!(*interval, Duration::from_millis(250));

        let result = resolve(ConversionOptions::enabled().with_setting("interval_ms", json!("fast")));
        assert!(matches!(result, Err(ConfigError::InvalidOption { .. })));
    }
}
