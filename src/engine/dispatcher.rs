// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use crate::conversion::{Batch, Conversion, MessageBody, MessageDescriptor, OutputDiscipline};
use crate::engine::isolation;
use crate::engine::wire;
use crate::engine::OutboundChannel;
use crate::errors::EncodingError;
use crate::observability::messages::dispatch::{DescriptorEncodingFailed, LineDropped, LineEmitted};
use crate::observability::messages::StructuredLog;
use crate::traits::ProtocolEncoder;

/// Outcome counts for one dispatched batch.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DispatchSummary {
    /// Lines handed to the outbound channel.
    pub emitted: usize,
    /// Descriptors that failed to encode.
    pub failed: usize,
    /// Empty slots in the batch.
    pub skipped: usize,
}

/// Encodes descriptors and publishes wire lines, one descriptor at a time.
///
/// A failure on one descriptor is logged and does not affect the others.
pub struct Dispatcher {
    encoder: Arc<dyn ProtocolEncoder>,
    outbound: OutboundChannel,
}

impl Dispatcher {
    pub fn new(encoder: Arc<dyn ProtocolEncoder>, outbound: OutboundChannel) -> Self {
        Self { encoder, outbound }
    }

    /// Dispatch a transform result. `None` emits nothing.
    pub fn dispatch(&self, conversion: &Conversion, batch: Option<Batch>) -> DispatchSummary {
        let mut summary = DispatchSummary::default();
        let Some(batch) = batch else {
            return summary;
        };

        for descriptor in batch {
            let Some(descriptor) = descriptor else {
                summary.skipped += 1;
                continue;
            };

            match self.encode(conversion.output(), &descriptor) {
                Ok(line) => {
                    LineEmitted {
                        conversion: conversion.title(),
                        pgn: descriptor.pgn,
                        line: &line,
                    }
                    .log();
                    if !self.outbound.emit(line) {
                        LineDropped {
                            channel: self.outbound.name(),
                            pgn: descriptor.pgn,
                        }
                        .log();
                    }
                    summary.emitted += 1;
                }
                Err(error) => {
                    DescriptorEncodingFailed {
                        conversion: conversion.title(),
                        descriptor: &descriptor.describe(),
                        error: &error,
                    }
                    .log();
                    summary.failed += 1;
                }
            }
        }

        summary
    }

    fn encode(&self, output: OutputDiscipline, descriptor: &MessageDescriptor) -> Result<String, EncodingError> {
        let pgn = descriptor.pgn;
        let payload = match (output, &descriptor.body) {
            (OutputDiscipline::ProtocolEncode, MessageBody::Fields(fields)) => {
                isolation::catch(|| self.encoder.encode(pgn, fields)).map_err(EncodingError::Panicked)??
            }
            (OutputDiscipline::RawBuffer, MessageBody::Raw(bytes)) => bytes.clone(),
            (OutputDiscipline::ProtocolEncode, body) => {
                return Err(EncodingError::BodyMismatch {
                    pgn,
                    expected: "fields",
                    actual: body.kind(),
                })
            }
            (OutputDiscipline::RawBuffer, body) => {
                return Err(EncodingError::BodyMismatch {
                    pgn,
                    expected: "raw",
                    actual: body.kind(),
                })
            }
        };

        wire::encode_line(pgn, &payload, Some(descriptor.destination_or_broadcast()))
    }
}
