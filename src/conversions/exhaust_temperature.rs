// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde_json::{json, Map};

use crate::conversion::{Conversion, ConversionRegistry, InputBinding, MessageDescriptor, Trigger};
use crate::errors::ValidationError;

use super::{engines, scaled};

pub const EXHAUST_TEMPERATURE: &str = "EXHAUST_TEMPERATURE";
const TITLE: &str = "Temperature, exhaust (130312)";

/// Temperature source code for exhaust gas.
const EXHAUST_GAS: u8 = 14;

pub(super) fn register(registry: &mut ConversionRegistry) -> Result<(), ValidationError> {
    registry.register_configured(EXHAUST_TEMPERATURE, TITLE, |options| {
        let conversions = engines(options, "tempInstanceId", |engine| engine.temp_instance_id)?
            .into_iter()
            .map(|(engine, instance)| {
                let path = engine.path("exhaustTemperature");
                let binding = InputBinding::new(0, path.clone());
                Conversion::new(
                    EXHAUST_TEMPERATURE,
                    format!("{} [{}]", TITLE, engine.signalk_id),
                    Trigger::on_values([binding], move |[temperature]| {
                        let mut fields = Map::new();
                        fields.insert("Instance".into(), json!(instance));
                        fields.insert("Source".into(), json!(EXHAUST_GAS));
                        fields.insert("Actual Temperature".into(), scaled(&temperature, 1.0, &path)?);
                        Ok(Some(vec![Some(MessageDescriptor::fields(130312, fields))]))
                    }),
                )
            })
            .collect();
        Ok(conversions)
    })
}
