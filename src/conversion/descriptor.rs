// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::Serialize;
use serde_json::{Map, Value};

use crate::config::consts::BROADCAST_ADDRESS;

/// Named-field message object handed to the protocol encoder.
pub type FieldMap = Map<String, Value>;

/// One transform invocation's output. `None` entries are skipped by the dispatcher.
pub type Batch = Vec<Option<MessageDescriptor>>;

/// Payload of a descriptor: named fields or bytes already encoded.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageBody {
    Fields(FieldMap),
    Raw(Vec<u8>),
}

impl MessageBody {
    pub fn kind(&self) -> &'static str {
        match self {
            MessageBody::Fields(_) => "named fields",
            MessageBody::Raw(_) => "raw bytes",
        }
    }
}

/// One outbound message prior to wire serialization.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MessageDescriptor {
    pub pgn: u32,
    pub body: MessageBody,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<u8>,
}

impl MessageDescriptor {
    pub fn fields(pgn: u32, fields: FieldMap) -> Self {
        Self {
            pgn,
            body: MessageBody::Fields(fields),
            destination: None,
        }
    }

    pub fn raw(pgn: u32, bytes: Vec<u8>) -> Self {
        Self {
            pgn,
            body: MessageBody::Raw(bytes),
            destination: None,
        }
    }

    pub fn to(mut self, destination: u8) -> Self {
        self.destination = Some(destination);
        self
    }

    /// Destination address, broadcast when none was given.
    pub fn destination_or_broadcast(&self) -> u8 {
        self.destination.unwrap_or(BROADCAST_ADDRESS)
    }

    /// JSON rendering used in error logs.
    pub fn describe(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| format!("{:?}", self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn destination_defaults_to_broadcast() {
        let descriptor = MessageDescriptor::raw(126992, vec![0x01]);
        assert_eq!(descriptor.destination_or_broadcast(), 255);
        assert_eq!(descriptor.to(12).destination_or_broadcast(), 12);
    }

    #[test]
    fn describe_renders_json() {
        let mut fields = FieldMap::new();
        fields.insert("Speed".to_string(), json!(1200.0));
        let text = MessageDescriptor::fields(127488, fields).describe();
        assert_eq!(text, r#"{"pgn":127488,"body":{"fields":{"Speed":1200.0}}}"#);
    }
}
