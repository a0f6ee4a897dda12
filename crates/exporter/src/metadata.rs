// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Runtime metadata lookups needed to decode calls and events.
//!
//! `state_getMetadata` returns V14 metadata on current runtimes; anything
//! else is rejected up front rather than half-decoded.

use frame_metadata::v14::{RuntimeMetadataV14, StorageEntryType};
use frame_metadata::{RuntimeMetadata, RuntimeMetadataPrefixed};
use parity_scale_codec::Decode;
use scale_info::PortableRegistry;
use sp_core::hashing::twox_128;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("Metadata is not valid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    #[error("Failed to decode runtime metadata")]
    DecodeFailed(#[source] parity_scale_codec::Error),

    #[error("Unsupported runtime metadata version; only V14 is supported")]
    UnsupportedVersion,

    #[error("System.Events storage entry not found in metadata")]
    EventsEntryMissing,
}

/// Decoded V14 runtime metadata plus the lookups the block decoders need.
pub struct RuntimeTypes {
    metadata: RuntimeMetadataV14,
}

impl RuntimeTypes {
    /// Parse the hex reply of `state_getMetadata`.
    pub fn from_hex(metadata_hex: &str) -> Result<Self, MetadataError> {
        let bytes = hex::decode(metadata_hex.trim_start_matches("0x"))?;
        let prefixed = RuntimeMetadataPrefixed::decode(&mut &bytes[..])
            .map_err(MetadataError::DecodeFailed)?;

        match prefixed.1 {
            RuntimeMetadata::V14(metadata) => Ok(Self { metadata }),
            _ => Err(MetadataError::UnsupportedVersion),
        }
    }

    pub fn types(&self) -> &PortableRegistry {
        &self.metadata.types
    }

    /// Pallet name and call enum type for the pallet at `index`, if the
    /// pallet exists and dispatches calls.
    pub fn pallet_call(&self, index: u8) -> Option<(&str, u32)> {
        let pallet = self.metadata.pallets.iter().find(|p| p.index == index)?;
        let calls = pallet.calls.as_ref()?;
        Some((pallet.name.as_str(), calls.ty.id()))
    }

    /// Storage key of `System.Events`: `twox128(prefix) ++ twox128("Events")`.
    pub fn events_storage_key(&self) -> Result<String, MetadataError> {
        let (prefix, _) = self.events_entry()?;
        let mut key = twox_128(prefix.as_bytes()).to_vec();
        key.extend(twox_128(b"Events"));
        Ok(format!("0x{}", hex::encode(key)))
    }

    /// Type of the event record vector stored under `System.Events`.
    pub fn events_type_id(&self) -> Result<u32, MetadataError> {
        let (_, type_id) = self.events_entry()?;
        Ok(type_id)
    }

    fn events_entry(&self) -> Result<(&str, u32), MetadataError> {
        let storage = self
            .metadata
            .pallets
            .iter()
            .find(|p| p.name == "System")
            .and_then(|p| p.storage.as_ref())
            .ok_or(MetadataError::EventsEntryMissing)?;
        let entry = storage
            .entries
            .iter()
            .find(|e| e.name == "Events")
            .ok_or(MetadataError::EventsEntryMissing)?;

        match &entry.ty {
            StorageEntryType::Plain(ty) => Ok((storage.prefix.as_str(), ty.id())),
            StorageEntryType::Map { .. } => Err(MetadataError::EventsEntryMissing),
        }
    }
}
