// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod protocol_encoder;
pub mod source_adapter;
pub mod value_source;

pub use protocol_encoder::ProtocolEncoder;
pub use source_adapter::SourceAdapter;
pub use value_source::{DeltaStream, RawEventFeed, ValueSource, ValueStream};
