// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Signal K delta, the unit delivered by the raw event feed.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Delta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    #[serde(default)]
    pub updates: Vec<Update>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Update {
    #[serde(rename = "$source", default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub values: Vec<PathValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathValue {
    pub path: String,
    pub value: Value,
}

impl Delta {
    /// Single-value delta for `vessels.self`.
    pub fn single(path: impl Into<String>, value: Value) -> Self {
        Self {
            context: Some("vessels.self".to_string()),
            updates: vec![Update {
                source: None,
                timestamp: None,
                values: vec![PathValue {
                    path: path.into(),
                    value,
                }],
            }],
        }
    }

    /// Every `(path, value)` pair in the delta, in order.
    pub fn values(&self) -> impl Iterator<Item = &PathValue> {
        self.updates.iter().flat_map(|update| update.values.iter())
    }
}
