// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::conversion::FieldMap;
use crate::errors::EncodingError;

/// Turns a named-field message object into the PGN's payload bytes.
pub trait ProtocolEncoder: Send + Sync {
    fn encode(&self, pgn: u32, fields: &FieldMap) -> Result<Vec<u8>, EncodingError>;
}
