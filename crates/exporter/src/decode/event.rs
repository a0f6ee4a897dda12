// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Event decoding.
//!
//! `System.Events` stores a vector of event records. Each record carries the
//! dispatch phase, a runtime-level variant wrapping the pallet's own event
//! variant, and a topics list the exporter ignores.

use heck::ToLowerCamelCase;
use scale_value::{Primitive, Value, ValueDef};
use thiserror::Error;

use crate::metadata::{MetadataError, RuntimeTypes};

#[derive(Debug, Error)]
pub enum EventDecodeError {
    #[error(transparent)]
    Metadata(#[from] MetadataError),

    #[error("Failed to decode events storage value: {0}")]
    DecodeFailed(String),

    #[error("Unexpected events shape: {0}")]
    UnexpectedShape(&'static str),
}

/// One event, as the export records it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedEvent {
    /// lowerCamelCase pallet name.
    pub section: String,
    /// Event variant name, as declared by the pallet.
    pub method: String,
    /// Stringified dispatch phase, e.g. `ApplyExtrinsic(1)`.
    pub phase: String,
    /// Stringified event fields in declaration order.
    pub data: Vec<String>,
}

/// Decode the raw `System.Events` storage bytes into the node's event order.
pub fn decode_events(
    bytes: &[u8],
    types: &RuntimeTypes,
) -> Result<Vec<DecodedEvent>, EventDecodeError> {
    let type_id = types.events_type_id()?;

    let mut cursor = bytes;
    let decoded = scale_value::scale::decode_as_type(&mut cursor, type_id, types.types())
        .map_err(|e| EventDecodeError::DecodeFailed(e.to_string()))?;

    let ValueDef::Composite(records) = decoded.value else {
        return Err(EventDecodeError::UnexpectedShape(
            "events value is not a sequence",
        ));
    };

    records.into_values().map(decode_record).collect()
}

fn decode_record(record: Value<u32>) -> Result<DecodedEvent, EventDecodeError> {
    let ValueDef::Composite(fields) = record.value else {
        return Err(EventDecodeError::UnexpectedShape(
            "event record is not a composite",
        ));
    };

    // EventRecord is { phase, event, topics }; topics are not exported.
    let mut fields = fields.into_values();
    let phase = fields
        .next()
        .ok_or(EventDecodeError::UnexpectedShape("event record missing phase"))?;
    let event = fields
        .next()
        .ok_or(EventDecodeError::UnexpectedShape("event record missing event"))?;

    let phase = phase_to_string(&phase)?;

    let ValueDef::Variant(pallet_variant) = event.value else {
        return Err(EventDecodeError::UnexpectedShape(
            "event is not a pallet variant",
        ));
    };
    let section = pallet_variant.name.to_lower_camel_case();

    let inner = pallet_variant
        .values
        .into_values()
        .next()
        .ok_or(EventDecodeError::UnexpectedShape("pallet variant is empty"))?;
    let ValueDef::Variant(event_variant) = inner.value else {
        return Err(EventDecodeError::UnexpectedShape(
            "pallet event is not a variant",
        ));
    };

    let data = event_variant
        .values
        .values()
        .map(scale_value::stringify::to_string)
        .collect();

    Ok(DecodedEvent {
        section,
        method: event_variant.name,
        phase,
        data,
    })
}

fn phase_to_string(phase: &Value<u32>) -> Result<String, EventDecodeError> {
    let ValueDef::Variant(variant) = &phase.value else {
        return Err(EventDecodeError::UnexpectedShape("phase is not a variant"));
    };

    // ApplyExtrinsic carries the extrinsic index; the other phases are bare.
    if variant.name == "ApplyExtrinsic" {
        let index = variant.values.values().next().and_then(|v| match &v.value {
            ValueDef::Primitive(Primitive::U128(n)) => Some(*n),
            _ => None,
        });
        if let Some(index) = index {
            return Ok(format!("{}({})", variant.name, index));
        }
    }

    Ok(variant.name.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures as fixtures;
    use parity_scale_codec::Encode;

    fn types() -> RuntimeTypes {
        RuntimeTypes::from_hex(&fixtures::metadata_hex()).unwrap()
    }

    #[test]
    fn decodes_event_records_in_order() {
        let decoded = decode_events(&fixtures::events().encode(), &types()).unwrap();

        assert_eq!(decoded.len(), 2);

        assert_eq!(decoded[0].section, "system");
        assert_eq!(decoded[0].method, "ExtrinsicSuccess");
        assert_eq!(decoded[0].phase, "ApplyExtrinsic(0)");
        assert_eq!(decoded[0].data.len(), 1);

        assert_eq!(decoded[1].section, "balances");
        assert_eq!(decoded[1].method, "Transfer");
        assert_eq!(decoded[1].phase, "Finalization");
        assert_eq!(decoded[1].data.len(), 3);
    }

    #[test]
    fn decodes_an_empty_event_list() {
        let empty: Vec<fixtures::EventRecord> = vec![];
        let decoded = decode_events(&empty.encode(), &types()).unwrap();
        assert!(decoded.is_empty());
    }

    #[test]
    fn rejects_garbage_bytes() {
        assert!(decode_events(&[0xff, 0xff, 0xff, 0xff], &types()).is_err());
    }
}
