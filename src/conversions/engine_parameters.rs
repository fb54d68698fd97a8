// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde_json::{json, Map};

use crate::config::consts::DEFAULT_STALENESS_TIMEOUT;
use crate::conversion::{Conversion, ConversionRegistry, FieldMap, InputBinding, MessageDescriptor, Trigger};
use crate::errors::ValidationError;

use super::{engines, scaled, EngineMapping};

pub const ENGINE_PARAMETERS: &str = "ENGINE_PARAMETERS";
const TITLE: &str = "Engine Parameters (127489,127488)";

/// (Signal K key under `propulsion.<id>`, PGN field, scale to field units)
type Input = (&'static str, &'static str, f64);

const DYNAMIC: [Input; 10] = [
    ("oilPressure", "Oil pressure", 0.01),
    ("oilTemperature", "Oil temperature", 1.0),
    ("temperature", "Temperature", 1.0),
    ("alternatorVoltage", "Alternator Potential", 1.0),
    ("fuel.rate", "Fuel Rate", 1000.0 / 3600.0),
    ("runTime", "Total Engine hours", 1.0),
    ("coolantPressure", "Coolant Pressure", 0.01),
    ("fuel.pressure", "Fuel Pressure", 0.01),
    ("engineLoad", "Percent Engine Load", 100.0),
    ("engineTorque", "Percent Engine Torque", 100.0),
];

const RAPID: [Input; 3] = [
    ("revolutions", "Speed", 60.0),
    ("boostPressure", "Boost Pressure", 0.01),
    ("drive.trimState", "Tilt/Trim", 100.0),
];

pub(super) fn register(registry: &mut ConversionRegistry) -> Result<(), ValidationError> {
    registry.register_configured(ENGINE_PARAMETERS, TITLE, |options| {
        let engines = engines(options, "instanceId", |engine| engine.instance_id)?;
        let dynamic = engines.iter().map(|(engine, instance)| {
            per_engine(engine, *instance, 127489, &DYNAMIC, |fields| {
                // Discrete status flags are not mapped from Signal K yet.
                fields.insert("Discrete Status 1".into(), json!([]));
                fields.insert("Discrete Status 2".into(), json!([]));
            })
        });
        let rapid = engines
            .iter()
            .map(|(engine, instance)| per_engine(engine, *instance, 127488, &RAPID, |_| {}));
        Ok(dynamic.chain(rapid).collect())
    })
}

fn per_engine<const N: usize>(
    engine: &EngineMapping,
    instance: u8,
    pgn: u32,
    inputs: &'static [Input; N],
    extra: fn(&mut FieldMap),
) -> Conversion {
    let bindings: [InputBinding; N] = std::array::from_fn(|slot| {
        InputBinding::new(slot, engine.path(inputs[slot].0)).with_staleness(DEFAULT_STALENESS_TIMEOUT)
    });

    Conversion::new(
        ENGINE_PARAMETERS,
        format!("{} {} [{}]", TITLE, pgn, engine.signalk_id),
        Trigger::on_values(bindings, move |values| {
            let mut fields = Map::new();
            fields.insert("Instance".into(), json!(instance));
            for (value, (key, field, factor)) in values.iter().zip(inputs.iter()) {
                fields.insert((*field).into(), scaled(value, *factor, key)?);
            }
            extra(&mut fields);
            Ok(Some(vec![Some(MessageDescriptor::fields(pgn, fields))]))
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::pgn::LayoutEncoder;
    use crate::config::ConversionOptions;
    use crate::conversion::MessageBody;
    use crate::traits::ProtocolEncoder;
    use serde_json::Value;

    fn resolve(engines: Value) -> Vec<Conversion> {
        let registry = crate::conversions::builtin().unwrap();
        let entry = registry
            .entries()
            .find(|entry| entry.option_key() == ENGINE_PARAMETERS)
            .unwrap();
        entry
            .resolve(&ConversionOptions::enabled().with_setting("engines", engines))
            .unwrap()
    }

    #[test]
    fn dynamic_and_rapid_per_engine() {
        let conversions = resolve(json!([
            {"signalkId": "port", "instanceId": 0},
            {"signalkId": "starboard", "instanceId": 1}
        ]));
        let titles: Vec<&str> = conversions.iter().map(|c| c.title()).collect();
        assert_eq!(
            titles,
            vec![
                "Engine Parameters (127489,127488) 127489 [port]",
                "Engine Parameters (127489,127488) 127489 [starboard]",
                "Engine Parameters (127489,127488) 127488 [port]",
                "Engine Parameters (127489,127488) 127488 [starboard]",
            ]
        );
        for conversion in &conversions {
            conversion.validate().unwrap();
        }
    }

    #[test]
    fn rapid_update_scales_signalk_units() {
        let conversions = resolve(json!([{"signalkId": "port", "instanceId": 1}]));
        let rapid = &conversions[1];
        let Trigger::ValueChange { inputs, callback, .. } = rapid.trigger() else {
            panic!("expected value-change trigger");
        };
        assert_eq!(inputs[2].path, "propulsion.port.drive.trimState");
        assert_eq!(inputs[0].staleness, Some(DEFAULT_STALENESS_TIMEOUT));

        // 20 Hz = 1200 rpm, boost pressure unknown, trim 10 %
        let batch = callback(&[Some(json!(20)), None, Some(json!(0.1))]).unwrap().unwrap();
        let descriptor = batch[0].as_ref().unwrap();
        let MessageBody::Fields(fields) = &descriptor.body else {
            panic!("expected named fields");
        };
        assert_eq!(fields["Instance"], json!(1));
        assert_eq!(fields["Speed"], json!(1200.0));
        assert_eq!(fields["Boost Pressure"], Value::Null);

        let bytes = LayoutEncoder::standard().encode(descriptor.pgn, fields).unwrap();
        assert_eq!(bytes, vec![0x01, 0xc0, 0x12, 0xff, 0xff, 0x0a, 0xff, 0xff]);
    }

    #[test]
    fn dynamic_parameters_encode_with_missing_inputs() {
        let conversions = resolve(json!([{"signalkId": "port", "instanceId": 0}]));
        let Trigger::ValueChange { callback, .. } = conversions[0].trigger() else {
            panic!("expected value-change trigger");
        };

        let mut values = vec![None; 10];
        values[0] = Some(json!(250000)); // Pa
        values[2] = Some(json!(350.15)); // K
        let batch = callback(&values).unwrap().unwrap();
        let descriptor = batch[0].as_ref().unwrap();
        let MessageBody::Fields(fields) = &descriptor.body else {
            panic!("expected named fields");
        };
        assert_eq!(fields["Oil pressure"], json!(2500.0));

        let bytes = LayoutEncoder::standard().encode(127489, fields).unwrap();
        assert_eq!(bytes.len(), 26);
        // 2500 hPa = 0x09c4
        assert_eq!(&bytes[1..3], &[0xc4, 0x09]);
        // 350.15 K / 0.01 = 35015 = 0x88c7
        assert_eq!(&bytes[5..7], &[0xc7, 0x88]);
        assert_eq!(&bytes[20..24], &[0x00; 4]);
    }

    #[test]
    fn non_numeric_input_fails_the_transform() {
        let conversions = resolve(json!([{"signalkId": "port", "instanceId": 0}]));
        let Trigger::ValueChange { callback, .. } = conversions[1].trigger() else {
            panic!("expected value-change trigger");
        };
        assert!(callback(&[Some(json!("fast")), None, None]).is_err());
    }
}
