// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod backends;      // value source, pgn encoder, sinks
pub mod config;        // options + config files
pub mod conversion;    // conversion model + registry
pub mod conversions;   // built-in catalog
pub mod engine;        // adapters, dispatcher, lifecycle
pub mod errors;        // error handling
pub mod observability;
pub mod traits;        // collaborator seams
