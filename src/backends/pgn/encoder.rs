// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde_json::Value;
use std::collections::HashMap;

use crate::backends::pgn::layout::{
    FieldDef, FieldKind, PgnLayout, ENGINE_PARAMETERS_DYNAMIC, ENGINE_PARAMETERS_RAPID, TEMPERATURE,
};
use crate::conversion::FieldMap;
use crate::errors::EncodingError;
use crate::traits::ProtocolEncoder;

/// Encodes field maps for the PGNs it has layouts for.
#[derive(Debug, Clone, Default)]
pub struct LayoutEncoder {
    layouts: HashMap<u32, PgnLayout>,
}

impl LayoutEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Encoder for every PGN the built-in conversions produce.
    pub fn standard() -> Self {
        Self::new()
            .with_layout(ENGINE_PARAMETERS_RAPID)
            .with_layout(ENGINE_PARAMETERS_DYNAMIC)
            .with_layout(TEMPERATURE)
    }

    pub fn with_layout(mut self, layout: PgnLayout) -> Self {
        self.layouts.insert(layout.pgn, layout);
        self
    }
}

impl ProtocolEncoder for LayoutEncoder {
    fn encode(&self, pgn: u32, fields: &FieldMap) -> Result<Vec<u8>, EncodingError> {
        let layout = self.layouts.get(&pgn).ok_or(EncodingError::UnknownPgn(pgn))?;

        let mut writer = BitWriter::with_capacity(layout.bit_len().div_ceil(8));
        for field in layout.fields {
            let raw = raw_value(pgn, field, lookup(field, fields))?;
            writer.push(raw, field.bits);
        }
        Ok(writer.finish())
    }
}

/// Non-null value under the field's name, else under one of its aliases.
fn lookup<'a>(field: &FieldDef, fields: &'a FieldMap) -> Option<&'a Value> {
    fields
        .iter()
        .filter(|(key, value)| field.answers_to(key) && !value.is_null())
        .min_by_key(|(key, _)| key.as_str() != field.name)
        .map(|(_, value)| value)
}

fn all_ones(bits: u8) -> u64 {
    if bits >= 64 {
        u64::MAX
    } else {
        (1u64 << bits) - 1
    }
}

fn raw_value(pgn: u32, field: &FieldDef, value: Option<&Value>) -> Result<u64, EncodingError> {
    let bits = field.bits;
    match field.kind {
        FieldKind::Reserved => Ok(all_ones(bits)),
        FieldKind::Unsigned { resolution } => {
            let Some(value) = value else {
                return Ok(all_ones(bits));
            };
            let scaled = scaled(pgn, field, value, resolution)?;
            if scaled < 0.0 || scaled > all_ones(bits) as f64 {
                return Err(out_of_range(pgn, field, value));
            }
            Ok(scaled as u64)
        }
        FieldKind::Signed { resolution } => {
            let max_positive = all_ones(bits - 1);
            let Some(value) = value else {
                return Ok(max_positive);
            };
            let scaled = scaled(pgn, field, value, resolution)?;
            let max = max_positive as f64;
            let min = -max - 1.0;
            if scaled < min || scaled > max {
                return Err(out_of_range(pgn, field, value));
            }
            Ok((scaled as i64 as u64) & all_ones(bits))
        }
        FieldKind::Bitfield => match value {
            None => Ok(0),
            Some(Value::Array(positions)) => {
                let mut raw = 0u64;
                for position in positions {
                    match position.as_u64() {
                        Some(bit) if bit < bits as u64 => raw |= 1 << bit,
                        _ => return Err(invalid(pgn, field, format!("{} is not a bit position", position))),
                    }
                }
                Ok(raw)
            }
            Some(value) => match value.as_u64() {
                Some(raw) if raw <= all_ones(bits) => Ok(raw),
                Some(_) => Err(out_of_range(pgn, field, value)),
                None => Err(invalid(pgn, field, format!("expected flags, got {}", value))),
            },
        },
    }
}

fn scaled(pgn: u32, field: &FieldDef, value: &Value, resolution: f64) -> Result<f64, EncodingError> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    };
    match number {
        Some(n) if n.is_finite() => Ok((n / resolution).round()),
        _ => Err(invalid(pgn, field, format!("expected a number, got {}", value))),
    }
}

fn out_of_range(pgn: u32, field: &FieldDef, value: &Value) -> EncodingError {
    EncodingError::FieldOutOfRange {
        pgn,
        field: field.name.to_string(),
        value: value.as_f64().unwrap_or(f64::NAN),
    }
}

fn invalid(pgn: u32, field: &FieldDef, reason: String) -> EncodingError {
    EncodingError::InvalidField {
        pgn,
        field: field.name.to_string(),
        reason,
    }
}

/// Packs values little-endian, least significant bit first.
struct BitWriter {
    bytes: Vec<u8>,
    bit_len: usize,
}

impl BitWriter {
    fn with_capacity(bytes: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(bytes),
            bit_len: 0,
        }
    }

    fn push(&mut self, value: u64, bits: u8) {
        for i in 0..bits {
            let offset = self.bit_len % 8;
            if offset == 0 {
                self.bytes.push(0);
            }
            if (value >> i) & 1 == 1 {
                if let Some(last) = self.bytes.last_mut() {
                    *last |= 1 << offset;
                }
            }
            self.bit_len += 1;
        }
    }

    fn finish(self) -> Vec<u8> {
        self.bytes
    }
}
