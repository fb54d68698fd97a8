// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Cross-checks between an options snapshot and the conversion registry.
//!
//! Registration already rejects duplicate and empty option keys. What remains
//! is the other direction: option keys in the configuration that no registered
//! conversion answers to, which usually means a typo that silently leaves a
//! conversion disabled.

use crate::config::ResolvedOptions;
use crate::conversion::ConversionRegistry;
use crate::errors::ValidationError;

/// Report every configured option key that no registry entry uses.
///
/// # Returns
/// * `Ok(())` - every option key is known
/// * `Err(Vec<ValidationError>)` - one `UnknownOptionKey` per unmatched key, sorted
pub fn validate_options(
    registry: &ConversionRegistry,
    options: &ResolvedOptions,
) -> Result<(), Vec<ValidationError>> {
    let mut unknown: Vec<&String> = options
        .keys()
        .filter(|key| !registry.contains_key(key))
        .collect();

    if unknown.is_empty() {
        return Ok(());
    }

    unknown.sort();
    Err(unknown
        .into_iter()
        .map(|key| ValidationError::UnknownOptionKey {
            option_key: key.clone(),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConversionOptions;
    use crate::conversion::{Conversion, Trigger};
    use std::time::Duration;

    fn registry() -> ConversionRegistry {
        let mut registry = ConversionRegistry::new();
        registry
            .register(Conversion::new(
                "SYSTEM_TIME",
                "System Time",
                Trigger::every(Duration::from_secs(1), |_| Ok(None)),
            ))
            .unwrap();
        registry
    }

    #[test]
    fn known_keys_pass() {
        let options = ResolvedOptions::new().with("SYSTEM_TIME", ConversionOptions::enabled());
        assert!(validate_options(&registry(), &options).is_ok());
    }

    #[test]
    fn unknown_keys_are_reported_sorted() {
        let options = ResolvedOptions::new()
            .with("SYSTEM_TIME", ConversionOptions::enabled())
            .with("ZETA", ConversionOptions::enabled())
            .with("ALPHA", ConversionOptions::default());

        let errors = validate_options(&registry(), &options).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::UnknownOptionKey {
                    option_key: "ALPHA".to_string()
                },
                ValidationError::UnknownOptionKey {
                    option_key: "ZETA".to_string()
                },
            ]
        );
    }
}
