// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Cancellation handle for one source adapter subscription.
///
/// Cancelling is idempotent. Cancelling stops future invocations; an
/// invocation already running finishes.
#[derive(Clone)]
pub struct SubscriptionHandle {
    label: Arc<str>,
    token: CancellationToken,
}

impl SubscriptionHandle {
    pub fn new(label: impl Into<Arc<str>>) -> Self {
        Self {
            label: label.into(),
            token: CancellationToken::new(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Token the subscription task watches.
    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

impl fmt::Debug for SubscriptionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubscriptionHandle")
            .field("label", &self.label)
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancel_is_idempotent() {
        let handle = SubscriptionHandle::new("engine/value-change");
        let token = handle.token();
        handle.cancel();
        handle.cancel();
        assert!(handle.is_cancelled());
        assert!(token.is_cancelled());
        assert_eq!(handle.label(), "engine/value-change");
    }
}
