// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;
use std::sync::Arc;

use crate::conversion::{Conversion, TransformResult};
use crate::engine::dispatcher::{DispatchSummary, Dispatcher};
use crate::engine::{isolation, AppContext};
use crate::errors::TransformError;
use crate::observability::messages::dispatch::{TransformFailed, TransformInvoked};
use crate::observability::messages::StructuredLog;

/// Invokes one conversion's transform and hands the result to the dispatcher.
///
/// Source adapters own a runner per activated conversion and call
/// [`ConversionRunner::invoke`] each time the trigger fires.
#[derive(Clone)]
pub struct ConversionRunner {
    conversion: Arc<Conversion>,
    dispatcher: Arc<Dispatcher>,
    context: AppContext,
}

impl ConversionRunner {
    pub fn new(conversion: Arc<Conversion>, dispatcher: Arc<Dispatcher>, context: AppContext) -> Self {
        Self {
            conversion,
            dispatcher,
            context,
        }
    }

    pub fn conversion(&self) -> &Conversion {
        &self.conversion
    }

    pub fn context(&self) -> &AppContext {
        &self.context
    }

    /// Run `transform`, log an error or panic, and dispatch whatever it produced.
    pub fn invoke<F>(&self, transform: F) -> DispatchSummary
    where
        F: FnOnce() -> TransformResult,
    {
        let trigger = self.conversion.trigger().kind().to_string();
        let invoked = TransformInvoked {
            conversion: self.conversion.title(),
            trigger: &trigger,
        };
        let span = invoked.span("invoke");
        let _guard = span.enter();
        invoked.log();

        let batch = match isolation::catch(transform) {
            Ok(Ok(batch)) => batch,
            Ok(Err(error)) => {
                self.log_failure(&error);
                None
            }
            Err(message) => {
                self.log_failure(&TransformError::Panicked(message));
                None
            }
        };

        self.dispatcher.dispatch(&self.conversion, batch)
    }

    fn log_failure(&self, error: &TransformError) {
        TransformFailed {
            conversion: self.conversion.title(),
            trigger: &self.conversion.trigger().kind().to_string(),
            error,
        }
        .log();
    }
}

impl fmt::Debug for ConversionRunner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionRunner")
            .field("conversion", &self.conversion.title())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::stub::{test_context, StubEncoder};
    use crate::conversion::{FieldMap, MessageDescriptor, Trigger};

    fn runner() -> (ConversionRunner, tokio::sync::broadcast::Receiver<String>) {
        let context = test_context();
        let lines = context.outbound().subscribe();
        let dispatcher = Arc::new(Dispatcher::new(Arc::new(StubEncoder::new()), context.outbound().clone()));
        let conversion = Arc::new(Conversion::new("test", "Test", Trigger::on_delta(|_, _| Ok(None))));
        (ConversionRunner::new(conversion, dispatcher, context), lines)
    }

    #[tokio::test]
    async fn successful_transform_is_dispatched() {
        let (runner, mut lines) = runner();
        let summary = runner.invoke(|| Ok(Some(vec![Some(MessageDescriptor::fields(127488, FieldMap::new()))])));
        assert_eq!(summary.emitted, 1);
        assert!(lines.recv().await.unwrap().contains(",127488,"));
    }

    #[test]
    fn transform_error_emits_nothing() {
        let (runner, mut lines) = runner();
        let summary = runner.invoke(|| Err(TransformError::failed("no data")));
        assert_eq!(summary, DispatchSummary::default());
        assert!(lines.try_recv().is_err());
    }

    #[test]
    fn transform_panic_is_contained() {
        let (runner, mut lines) = runner();
        let summary = runner.invoke(|| panic!("index out of bounds"));
        assert_eq!(summary, DispatchSummary::default());
        assert!(lines.try_recv().is_err());

        // The runner stays usable afterwards.
        assert_eq!(runner.invoke(|| Ok(None)), DispatchSummary::default());
    }
}
