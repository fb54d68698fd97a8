// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

/// How a field's value maps to raw bits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    /// Unsigned number; raw = round(value / resolution). Missing is all ones.
    Unsigned { resolution: f64 },
    /// Two's complement number; raw = round(value / resolution). Missing is
    /// the largest positive value.
    Signed { resolution: f64 },
    /// Flag bits, given as an integer or a list of bit positions. Missing is zero.
    Bitfield,
    /// Always all ones.
    Reserved,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldDef {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub bits: u8,
    pub kind: FieldKind,
}

impl FieldDef {
    const fn unsigned(name: &'static str, bits: u8, resolution: f64) -> Self {
        Self {
            name,
            aliases: &[],
            bits,
            kind: FieldKind::Unsigned { resolution },
        }
    }

    const fn signed(name: &'static str, bits: u8, resolution: f64) -> Self {
        Self {
            name,
            aliases: &[],
            bits,
            kind: FieldKind::Signed { resolution },
        }
    }

    const fn bitfield(name: &'static str, bits: u8) -> Self {
        Self {
            name,
            aliases: &[],
            bits,
            kind: FieldKind::Bitfield,
        }
    }

    const fn reserved(bits: u8) -> Self {
        Self {
            name: "Reserved",
            aliases: &[],
            bits,
            kind: FieldKind::Reserved,
        }
    }

    const fn aka(mut self, aliases: &'static [&'static str]) -> Self {
        self.aliases = aliases;
        self
    }

    /// Does `key` name this field?
    pub fn answers_to(&self, key: &str) -> bool {
        self.name == key || self.aliases.contains(&key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PgnLayout {
    pub pgn: u32,
    pub name: &'static str,
    pub fields: &'static [FieldDef],
}

impl PgnLayout {
    pub fn bit_len(&self) -> usize {
        self.fields.iter().map(|field| field.bits as usize).sum()
    }
}

/// PGN 127488, Engine Parameters, Rapid Update.
pub const ENGINE_PARAMETERS_RAPID: PgnLayout = PgnLayout {
    pgn: 127488,
    name: "Engine Parameters, Rapid Update",
    fields: &[
        FieldDef::unsigned("Instance", 8, 1.0).aka(&["Engine Instance"]),
        // rpm
        FieldDef::unsigned("Speed", 16, 0.25),
        // hPa
        FieldDef::unsigned("Boost Pressure", 16, 1.0),
        // percent
        FieldDef::signed("Tilt/Trim", 8, 1.0),
        FieldDef::reserved(16),
    ],
};

/// PGN 127489, Engine Parameters, Dynamic.
pub const ENGINE_PARAMETERS_DYNAMIC: PgnLayout = PgnLayout {
    pgn: 127489,
    name: "Engine Parameters, Dynamic",
    fields: &[
        FieldDef::unsigned("Instance", 8, 1.0).aka(&["Engine Instance"]),
        // hPa
        FieldDef::unsigned("Oil pressure", 16, 1.0),
        // K
        FieldDef::unsigned("Oil temperature", 16, 0.1),
        FieldDef::unsigned("Temperature", 16, 0.01),
        // V
        FieldDef::signed("Alternator Potential", 16, 0.01),
        // L/h
        FieldDef::signed("Fuel Rate", 16, 0.1),
        // s
        FieldDef::unsigned("Total Engine hours", 32, 1.0),
        // hPa
        FieldDef::unsigned("Coolant Pressure", 16, 1.0),
        // hPa
        FieldDef::unsigned("Fuel Pressure", 16, 1.0),
        FieldDef::reserved(8),
        FieldDef::bitfield("Discrete Status 1", 16),
        FieldDef::bitfield("Discrete Status 2", 16),
        // percent
        FieldDef::signed("Percent Engine Load", 8, 1.0),
        FieldDef::signed("Percent Engine Torque", 8, 1.0),
    ],
};

/// PGN 130312, Temperature.
pub const TEMPERATURE: PgnLayout = PgnLayout {
    pgn: 130312,
    name: "Temperature",
    fields: &[
        FieldDef::unsigned("SID", 8, 1.0),
        FieldDef::unsigned("Instance", 8, 1.0).aka(&["Temperature Instance"]),
        FieldDef::unsigned("Source", 8, 1.0).aka(&["Temperature Source"]),
        // K
        FieldDef::unsigned("Actual Temperature", 16, 0.01),
        FieldDef::unsigned("Set Temperature", 16, 0.01),
        FieldDef::reserved(8),
    ],
};
