// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::time::Duration;

/// Quiet window for value-change debouncing.
pub const DEBOUNCE_WINDOW: Duration = Duration::from_millis(20);
/// Staleness timeout used by the built-in catalog for engine inputs.
pub const DEFAULT_STALENESS_TIMEOUT: Duration = Duration::from_secs(10);

/// Priority field written on every wire line.
pub const WIRE_PRIORITY: u8 = 2;
/// Source address field written on every wire line.
pub const WIRE_SOURCE: u8 = 0;
/// Destination used when a descriptor names none.
pub const BROADCAST_ADDRESS: u8 = 255;
/// Largest PGN representable in the 18-bit PGN field.
pub const MAX_PGN: u32 = 0x3_FFFF;
/// ISO 11783-3 transport protocol maximum payload.
pub const MAX_PAYLOAD_LEN: usize = 1785;

/// Name of the outbound channel carrying encoded wire lines.
pub const OUTBOUND_CHANNEL: &str = "outbound-wire-line";
/// Lines buffered per outbound subscriber before it starts lagging.
pub const OUTBOUND_CAPACITY: usize = 1024;
/// Deltas buffered per raw-event subscriber in the in-memory source.
pub const RAW_EVENT_CAPACITY: usize = 1024;

/// Default `tracing` filter when neither the config nor `RUST_LOG` sets one.
pub const DEFAULT_LOG_FILTER: &str = "info";
