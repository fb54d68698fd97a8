// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Concrete collaborators for the engine.
//!
//! - [`memory`]: in-memory value store implementing both
//!   [`ValueSource`](crate::traits::ValueSource) and
//!   [`RawEventFeed`](crate::traits::RawEventFeed)
//! - [`pgn`]: table-driven NMEA 2000 field encoder
//! - [`sink`]: transports that forward outbound wire lines
//! - `stub` (test builds only): encoders that fail or panic on demand

pub mod memory;
pub mod pgn;
pub mod sink;
#[cfg(test)]
pub mod stub;
