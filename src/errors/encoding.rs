// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use thiserror::Error;

/// Failure to turn one message descriptor into a wire line.
///
/// Raised by the protocol encoder or the wire encoder. The dispatcher logs it
/// together with the offending descriptor and moves on to the next one.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EncodingError {
    /// No field layout is known for this PGN.
    #[error("No field layout for PGN {0}")]
    UnknownPgn(u32),

    /// PGN does not fit in 18 bits.
    #[error("PGN {0} is outside the 18-bit PGN range")]
    InvalidPgn(u32),

    /// A numeric field does not fit its encoded width.
    #[error("PGN {pgn} field '{field}' value {value} is out of range")]
    FieldOutOfRange { pgn: u32, field: String, value: f64 },

    /// A field holds a value of the wrong type.
    #[error("PGN {pgn} field '{field}' is invalid: {reason}")]
    InvalidField {
        pgn: u32,
        field: String,
        reason: String,
    },

    /// Descriptor body does not match the conversion's output discipline.
    #[error("PGN {pgn} descriptor carries {actual}, expected {expected}")]
    BodyMismatch {
        pgn: u32,
        expected: &'static str,
        actual: &'static str,
    },

    /// Payload exceeds the transport maximum.
    #[error("PGN {pgn} payload of {len} bytes exceeds the {max} byte maximum")]
    PayloadTooLarge { pgn: u32, len: usize, max: usize },

    /// The encoder panicked.
    #[error("Encoder panicked: {0}")]
    Panicked(String),
}
