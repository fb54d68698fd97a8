// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use crate::config::ConversionOptions;
use crate::conversion::Conversion;
use crate::errors::{ConfigError, ValidationError};

/// Expands the typed options of one option key into runnable conversions.
pub type ConversionBuilder =
    Arc<dyn Fn(&ConversionOptions) -> Result<Vec<Conversion>, ConfigError> + Send + Sync>;

/// One registered option key.
#[derive(Clone)]
pub enum RegistryEntry {
    /// A conversion that needs nothing from its options beyond `enabled`.
    Fixed(Conversion),
    /// Conversions built from the options at start time, e.g. one per engine.
    Configured {
        option_key: String,
        title: String,
        build: ConversionBuilder,
    },
}

impl RegistryEntry {
    pub fn option_key(&self) -> &str {
        match self {
            RegistryEntry::Fixed(conversion) => conversion.option_key(),
            RegistryEntry::Configured { option_key, .. } => option_key,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            RegistryEntry::Fixed(conversion) => conversion.title(),
            RegistryEntry::Configured { title, .. } => title,
        }
    }

    /// Resolve the conversions to activate for these options.
    pub fn resolve(&self, options: &ConversionOptions) -> Result<Vec<Conversion>, ConfigError> {
        match self {
            RegistryEntry::Fixed(conversion) => Ok(vec![conversion.clone()]),
            RegistryEntry::Configured { build, .. } => build(options),
        }
    }
}

impl fmt::Debug for RegistryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryEntry::Fixed(conversion) => f.debug_tuple("Fixed").field(conversion).finish(),
            RegistryEntry::Configured {
                option_key, title, ..
            } => f
                .debug_struct("Configured")
                .field("option_key", option_key)
                .field("title", title)
                .finish_non_exhaustive(),
        }
    }
}

/// Option key and title of a registered entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub option_key: String,
    pub title: String,
}

/// Every conversion the engine knows about, keyed by option key.
#[derive(Debug, Clone, Default)]
pub struct ConversionRegistry {
    entries: Vec<RegistryEntry>,
    keys: HashSet<String>,
}

impl ConversionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, conversion: Conversion) -> Result<(), ValidationError> {
        self.insert(RegistryEntry::Fixed(conversion))
    }

    pub fn register_configured<F>(
        &mut self,
        option_key: impl Into<String>,
        title: impl Into<String>,
        build: F,
    ) -> Result<(), ValidationError>
    where
        F: Fn(&ConversionOptions) -> Result<Vec<Conversion>, ConfigError> + Send + Sync + 'static,
    {
        self.insert(RegistryEntry::Configured {
            option_key: option_key.into(),
            title: title.into(),
            build: Arc::new(build),
        })
    }

    fn insert(&mut self, entry: RegistryEntry) -> Result<(), ValidationError> {
        if entry.option_key().is_empty() {
            return Err(ValidationError::EmptyOptionKey {
                title: entry.title().to_string(),
            });
        }
        if !self.keys.insert(entry.option_key().to_string()) {
            return Err(ValidationError::DuplicateOptionKey {
                option_key: entry.option_key().to_string(),
            });
        }
        self.entries.push(entry);
        Ok(())
    }

    pub fn entries(&self) -> impl Iterator<Item = &RegistryEntry> {
        self.entries.iter()
    }

    pub fn contains_key(&self, option_key: &str) -> bool {
        self.keys.contains(option_key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Option keys and titles in registration order.
    pub fn catalog(&self) -> Vec<CatalogEntry> {
        self.entries
            .iter()
            .map(|entry| CatalogEntry {
                option_key: entry.option_key().to_string(),
                title: entry.title().to_string(),
            })
            .collect()
    }
}
