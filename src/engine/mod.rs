// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The conversion engine.
//!
//! ```text
//!  ValueSource ─┐
//!  RawEventFeed ┼─▶ SourceAdapter ─▶ ConversionRunner ─▶ Dispatcher ─▶ wire ─▶ OutboundChannel
//!  timer ───────┘      (task)          (transform)      (encode)     (line)
//! ```
//!
//! [`Engine::start`] resolves the registry against the configured options and
//! hands one [`ConversionRunner`] per conversion to the adapter for its
//! trigger kind. [`Engine::stop`] cancels every subscription handle.

pub mod adapters;
pub mod combine;
mod context;
pub mod debounce;
pub mod dispatcher;
mod isolation;
mod lifecycle;
mod outbound;
mod runner;
mod subscription;
pub mod wire;

pub use adapters::AdapterSet;
pub use context::AppContext;
pub use dispatcher::{DispatchSummary, Dispatcher};
pub use lifecycle::{Engine, EngineBuilder, SkippedConversion, StartReport};
pub use outbound::OutboundChannel;
pub use runner::ConversionRunner;
pub use subscription::SubscriptionHandle;
