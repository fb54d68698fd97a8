// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Table-driven NMEA 2000 field encoder.
//!
//! Each supported PGN is described by a [`PgnLayout`]: an ordered list of
//! fixed-width fields packed little-endian, least significant bit first.
//! [`LayoutEncoder`] looks fields up by name (or alias) in a descriptor's
//! field map and packs them into the payload.

mod encoder;
mod layout;

pub use encoder::LayoutEncoder;
pub use layout::{FieldDef, FieldKind, PgnLayout, ENGINE_PARAMETERS_DYNAMIC, ENGINE_PARAMETERS_RAPID, TEMPERATURE};
