// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Actisense-style ASCII serialization of one NMEA 2000 message.
//!
//! ```text
//! 2026-10-19T10:00:00.000Z,2,127488,0,255,3,01,ab,00
//! └ timestamp            │ │      │ │   │ └ payload bytes, two-digit lowercase hex
//!                        │ │      │ │   └ byte count
//!                        │ │      │ └ destination (255 = broadcast)
//!                        │ │      └ source (always 0)
//!                        │ └ PGN
//!                        └ priority (always 2)
//! ```

use chrono::{DateTime, SecondsFormat, Utc};
use std::fmt::Write;

use crate::config::consts::{BROADCAST_ADDRESS, MAX_PAYLOAD_LEN, MAX_PGN, WIRE_PRIORITY, WIRE_SOURCE};
use crate::errors::EncodingError;

/// Encode one message with the current wall-clock time.
pub fn encode_line(pgn: u32, data: &[u8], destination: Option<u8>) -> Result<String, EncodingError> {
    encode_line_at(Utc::now(), pgn, data, destination)
}

/// Encode one message with an explicit timestamp. Performs no I/O.
pub fn encode_line_at(
    timestamp: DateTime<Utc>,
    pgn: u32,
    data: &[u8],
    destination: Option<u8>,
) -> Result<String, EncodingError> {
    if pgn > MAX_PGN {
        return Err(EncodingError::InvalidPgn(pgn));
    }
    if data.len() > MAX_PAYLOAD_LEN {
        return Err(EncodingError::PayloadTooLarge {
            pgn,
            len: data.len(),
            max: MAX_PAYLOAD_LEN,
        });
    }

    let mut line = String::with_capacity(40 + data.len() * 3);
    // Writing into a String cannot fail.
    let _ = write!(
        line,
        "{},{},{},{},{},{},",
        timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
        WIRE_PRIORITY,
        pgn,
        WIRE_SOURCE,
        destination.unwrap_or(BROADCAST_ADDRESS),
        data.len()
    );
    for (i, byte) in data.iter().enumerate() {
        if i > 0 {
            line.push(',');
        }
        let _ = write!(line, "{:02x}", byte);
    }

    Ok(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 10, 0, 0).unwrap()
            + chrono::Duration::milliseconds(42)
    }

    #[test]
    fn encodes_engine_rapid_example() {
        let line = encode_line_at(fixed_time(), 127488, &[0x01, 0xAB, 0x00], None).unwrap();
        assert_eq!(line, "2026-10-19T10:00:00.042Z,2,127488,0,255,3,01,ab,00");
    }

    #[test]
    fn explicit_destination() {
        let line = encode_line_at(fixed_time(), 59904, &[0x14, 0xf0, 0x01], Some(35)).unwrap();
        assert!(line.ends_with(",2,59904,0,35,3,14,f0,01"));
    }

    #[test]
    fn empty_payload_leaves_trailing_field_empty() {
        let line = encode_line_at(fixed_time(), 126992, &[], None).unwrap();
        assert!(line.ends_with(",2,126992,0,255,0,"));
    }

    #[test]
    fn current_time_has_millisecond_utc_timestamp() {
        let line = encode_line(127488, &[0x0f], None).unwrap();
        let (timestamp, rest) = line.split_once(',').unwrap();
        assert_eq!(rest, "2,127488,0,255,1,0f");
        assert!(timestamp.ends_with('Z'));
        assert_eq!(timestamp.len(), "2026-10-19T10:00:00.000Z".len());
        assert!(DateTime::parse_from_rfc3339(timestamp).is_ok());
    }

    #[test]
    fn rejects_pgn_outside_18_bits() {
        assert_eq!(
            encode_line(0x4_0000, &[0x00], None),
            Err(EncodingError::InvalidPgn(0x4_0000))
        );
    }

    #[test]
    fn rejects_oversized_payload() {
        let data = vec![0u8; MAX_PAYLOAD_LEN + 1];
        assert!(matches!(
            encode_line(126996, &data, None),
            Err(EncodingError::PayloadTooLarge { len, .. }) if len == MAX_PAYLOAD_LEN + 1
        ));
    }
}
