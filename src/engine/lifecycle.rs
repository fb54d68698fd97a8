// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;
use std::sync::Arc;
use tokio::runtime::Handle;

use crate::config::{validate_options, ResolvedOptions};
use crate::conversion::{Conversion, ConversionRegistry};
use crate::engine::adapters::{AdapterSet, RawEventAdapter, TimerAdapter, ValueChangeAdapter};
use crate::engine::{AppContext, ConversionRunner, Dispatcher, OutboundChannel, SubscriptionHandle};
use crate::errors::{ConfigError, EngineError, ValidationError};
use crate::observability::messages::engine::{
    ConversionDisabled, ConversionEnabled, ConversionSkipped, EngineStarted, EngineStarting, EngineStopped,
    OptionKeyIgnored,
};
use crate::observability::messages::StructuredLog;
use crate::traits::{ProtocolEncoder, RawEventFeed, ValueSource};

/// What [`Engine::start`] activated and what it had to leave out.
#[derive(Debug, Default)]
pub struct StartReport {
    /// Titles of the conversions that were activated.
    pub started: Vec<String>,
    /// Conversions (or configured entries) that could not be activated.
    pub skipped: Vec<SkippedConversion>,
    /// Option keys in the configuration that match no registered entry.
    pub ignored_keys: Vec<String>,
}

#[derive(Debug)]
pub struct SkippedConversion {
    pub title: String,
    pub error: ConfigError,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EngineState {
    Stopped,
    Running,
}

/// Owns the conversion registry and the running subscriptions.
///
/// ```no_run
/// use std::sync::Arc;
/// use sk_to_n2k::backends::memory::MemoryValueSource;
/// use sk_to_n2k::backends::pgn::LayoutEncoder;
/// use sk_to_n2k::config::{ConversionOptions, ResolvedOptions};
/// use sk_to_n2k::conversions;
/// use sk_to_n2k::engine::Engine;
///
/// # async fn run() -> anyhow::Result<()> {
/// let source = Arc::new(MemoryValueSource::new());
/// let mut engine = Engine::builder(source.clone(), Arc::new(LayoutEncoder::standard()))
///     .raw_events(source)
///     .registry(conversions::builtin()?)
///     .build();
///
/// let mut lines = engine.outbound().subscribe();
/// engine.start(ResolvedOptions::new().with("SYSTEM_TIME", ConversionOptions::enabled()))?;
/// println!("{}", lines.recv().await?);
/// engine.stop();
/// # Ok(())
/// # }
/// ```
pub struct Engine {
    registry: ConversionRegistry,
    adapters: AdapterSet,
    values: Arc<dyn ValueSource>,
    dispatcher: Arc<Dispatcher>,
    outbound: OutboundChannel,
    subscriptions: Vec<SubscriptionHandle>,
    state: EngineState,
}

impl Engine {
    pub fn builder(values: Arc<dyn ValueSource>, encoder: Arc<dyn ProtocolEncoder>) -> EngineBuilder {
        EngineBuilder::new(values, encoder)
    }

    /// Activate every enabled conversion for `options`.
    ///
    /// A conversion that fails to build or activate is logged and skipped;
    /// the rest still start.
    pub fn start(&mut self, options: ResolvedOptions) -> Result<StartReport, EngineError> {
        if self.state == EngineState::Running {
            return Err(EngineError::AlreadyRunning);
        }
        if Handle::try_current().is_err() {
            return Err(EngineError::NoRuntime);
        }

        EngineStarting {
            registered: self.registry.len(),
            configured: options.len(),
        }
        .log();

        let mut report = StartReport::default();
        if let Err(errors) = validate_options(&self.registry, &options) {
            for error in errors {
                if let ValidationError::UnknownOptionKey { option_key } = error {
                    OptionKeyIgnored { option_key: &option_key }.log();
                    report.ignored_keys.push(option_key);
                }
            }
        }

        let context = AppContext::new(self.values.clone(), self.outbound.clone(), Arc::new(options));
        let mut handles = Vec::new();

        for entry in self.registry.entries() {
            let Some(entry_options) = context.options().enabled(entry.option_key()) else {
                ConversionDisabled {
                    option_key: entry.option_key(),
                }
                .log();
                continue;
            };

            let conversions = match entry.resolve(entry_options) {
                Ok(conversions) => conversions,
                Err(error) => {
                    report.skip(entry.title(), error);
                    continue;
                }
            };

            for conversion in conversions {
                let title = conversion.title().to_string();
                match self.activate(conversion, &context) {
                    Ok(mut activated) => {
                        handles.append(&mut activated);
                        report.started.push(title);
                    }
                    Err(error) => report.skip(&title, error),
                }
            }
        }

        EngineStarted {
            started: report.started.len(),
            skipped: report.skipped.len(),
            subscriptions: handles.len(),
        }
        .log();

        self.subscriptions = handles;
        self.state = EngineState::Running;
        Ok(report)
    }

    /// Cancel every subscription. Safe to call repeatedly.
    pub fn stop(&mut self) {
        if self.state == EngineState::Stopped {
            return;
        }
        let cancelled = self.subscriptions.len();
        for handle in self.subscriptions.drain(..) {
            handle.cancel();
        }
        self.state = EngineState::Stopped;
        EngineStopped { cancelled }.log();
    }

    pub fn is_running(&self) -> bool {
        self.state == EngineState::Running
    }

    pub fn active_subscriptions(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn outbound(&self) -> &OutboundChannel {
        &self.outbound
    }

    pub fn registry(&self) -> &ConversionRegistry {
        &self.registry
    }

    fn activate(&self, conversion: Conversion, context: &AppContext) -> Result<Vec<SubscriptionHandle>, ConfigError> {
        conversion.validate()?;
        let kind = conversion.trigger().kind();
        let adapter = self.adapters.get(kind).ok_or_else(|| ConfigError::UnsupportedTrigger {
            conversion: conversion.title().to_string(),
            trigger: kind,
        })?;

        ConversionEnabled {
            title: conversion.title(),
            option_key: conversion.option_key(),
            trigger: &kind.to_string(),
        }
        .log();

        let runner = ConversionRunner::new(Arc::new(conversion), self.dispatcher.clone(), context.clone());
        adapter.activate(runner)
    }
}

impl StartReport {
    fn skip(&mut self, title: &str, error: ConfigError) {
        ConversionSkipped { title, error: &error }.log();
        self.skipped.push(SkippedConversion {
            title: title.to_string(),
            error,
        });
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        self.stop();
    }
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("registered", &self.registry.len())
            .field("adapters", &self.adapters)
            .field("subscriptions", &self.subscriptions.len())
            .field("state", &self.state)
            .finish()
    }
}

/// Assembles an [`Engine`] from its collaborators.
///
/// Value-change and timer adapters are always installed; the raw-event
/// adapter only when a feed is supplied.
pub struct EngineBuilder {
    values: Arc<dyn ValueSource>,
    encoder: Arc<dyn ProtocolEncoder>,
    raw_events: Option<Arc<dyn RawEventFeed>>,
    registry: ConversionRegistry,
    outbound: OutboundChannel,
}

impl EngineBuilder {
    pub fn new(values: Arc<dyn ValueSource>, encoder: Arc<dyn ProtocolEncoder>) -> Self {
        Self {
            values,
            encoder,
            raw_events: None,
            registry: ConversionRegistry::new(),
            outbound: OutboundChannel::new(),
        }
    }

    pub fn raw_events(mut self, feed: Arc<dyn RawEventFeed>) -> Self {
        self.raw_events = Some(feed);
        self
    }

    pub fn registry(mut self, registry: ConversionRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn build(self) -> Engine {
        let mut adapters = AdapterSet::new();
        adapters.insert(Arc::new(ValueChangeAdapter::new(self.values.clone())));
        adapters.insert(Arc::new(TimerAdapter::new()));
        if let Some(feed) = self.raw_events {
            adapters.insert(Arc::new(RawEventAdapter::new(feed)));
        }

        Engine {
            registry: self.registry,
            adapters,
            values: self.values,
            dispatcher: Arc::new(Dispatcher::new(self.encoder, self.outbound.clone())),
            outbound: self.outbound,
            subscriptions: Vec::new(),
            state: EngineState::Stopped,
        }
    }
}
