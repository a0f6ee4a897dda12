// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Extrinsic decoding.
//!
//! Extrinsics arrive from `chain_getBlock` as SCALE bytes:
//!
//! ```text
//! [ length (compact) | version | address | signature | era | nonce | tip | call_data ]
//!                      ^^^^^^^   ^^^^^^^   ^^^^^^^^^   ^^^   ^^^^^   ^^^
//!                      1 byte    varies    varies      1-2   compact compact
//! ```
//!
//! - **version**: High bit (0x80) indicates signed; low bits are version number
//! - **address**: MultiAddress enum (AccountId32, Index, Raw, Address32, Address20)
//! - **signature**: MultiSignature enum (Ed25519/Sr25519 = 64 bytes, Ecdsa = 65 bytes)
//! - **era**: Mortal (2 bytes) or Immortal (1 byte)
//! - **tip**: Compact-encoded u128 balance
//!
//! The signed fields are only present when the version byte has its high bit
//! set. Call data is decoded against the pallet's call enum from the runtime
//! metadata; arguments are kept as independent strings with no structural
//! interpretation beyond the stringify.

use heck::ToLowerCamelCase;
use parity_scale_codec::{Compact, Decode};
use sp_core::crypto::{AccountId32, Ss58Codec};
use sp_runtime::generic::Era;
use thiserror::Error;

use crate::metadata::RuntimeTypes;

#[derive(Debug, Error)]
pub enum ExtrinsicDecodeError {
    #[error("Empty extrinsic")]
    Empty,

    #[error("Malformed extrinsic: {0}")]
    Malformed(&'static str),

    #[error("Unknown MultiAddress variant: 0x{0:02x}")]
    UnknownAddressVariant(u8),

    #[error("Unknown MultiSignature variant: 0x{0:02x}")]
    UnknownSignatureVariant(u8),

    #[error("No pallet with index {0} in runtime metadata")]
    UnknownPalletIndex(u8),

    #[error("Failed to decode call for pallet {pallet}: {reason}")]
    CallDecodeFailed { pallet: String, reason: String },

    #[error("Call data not fully consumed for pallet {0}")]
    TrailingCallBytes(String),
}

/// The fields of one extrinsic the export records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedExtrinsic {
    /// `pallet.call`, both parts lowerCamelCase.
    pub method: String,
    /// Display form of the signing account; `None` for unsigned extrinsics.
    pub signer: Option<String>,
    /// Tip as a decimal string; `None` for unsigned extrinsics.
    pub tip: Option<String>,
    /// Stringified call arguments in declaration order.
    pub args: Vec<String>,
}

/// The sender, as encoded in the extrinsic's MultiAddress.
enum Address {
    Id([u8; 32]),
    Index(u32),
    Raw(Vec<u8>),
    Address32([u8; 32]),
    Address20([u8; 20]),
}

impl Address {
    fn display(&self, ss58_prefix: u16) -> String {
        match self {
            Address::Id(bytes) | Address::Address32(bytes) => {
                AccountId32::from(*bytes).to_ss58check_with_version(ss58_prefix.into())
            }
            Address::Index(index) => index.to_string(),
            Address::Raw(bytes) => format!("0x{}", hex::encode(bytes)),
            Address::Address20(bytes) => format!("0x{}", hex::encode(bytes)),
        }
    }
}

pub fn decode_extrinsic(
    bytes: &[u8],
    types: &RuntimeTypes,
    ss58_prefix: u16,
) -> Result<DecodedExtrinsic, ExtrinsicDecodeError> {
    if bytes.is_empty() {
        return Err(ExtrinsicDecodeError::Empty);
    }

    // Skip the compact-encoded extrinsic length prefix
    let mut cursor = bytes;
    Compact::<u32>::decode(&mut cursor)
        .map_err(|_| ExtrinsicDecodeError::Malformed("invalid length prefix"))?;

    if cursor.is_empty() {
        return Err(ExtrinsicDecodeError::Malformed(
            "truncated after length prefix",
        ));
    }

    let version = cursor[0];
    cursor = &cursor[1..];

    let (signer, tip) = if version & 0b1000_0000 != 0 {
        let address = decode_address(&mut cursor)?;
        skip_signature(&mut cursor)?;
        Era::decode(&mut cursor).map_err(|_| ExtrinsicDecodeError::Malformed("invalid era"))?;
        Compact::<u32>::decode(&mut cursor)
            .map_err(|_| ExtrinsicDecodeError::Malformed("invalid nonce"))?;
        let Compact(tip) = Compact::<u128>::decode(&mut cursor)
            .map_err(|_| ExtrinsicDecodeError::Malformed("invalid tip"))?;

        (Some(address.display(ss58_prefix)), Some(tip.to_string()))
    } else {
        // Unsigned extrinsic - no sender or tip fields exist
        (None, None)
    };

    let (method, args) = decode_call(cursor, types)?;

    Ok(DecodedExtrinsic {
        method,
        signer,
        tip,
        args,
    })
}

fn decode_address(cursor: &mut &[u8]) -> Result<Address, ExtrinsicDecodeError> {
    let variant = u8::decode(cursor)
        .map_err(|_| ExtrinsicDecodeError::Malformed("missing address variant"))?;

    match variant {
        0x00 => {
            let bytes = <[u8; 32]>::decode(cursor)
                .map_err(|_| ExtrinsicDecodeError::Malformed("truncated AccountId address"))?;
            Ok(Address::Id(bytes))
        }
        0x01 => {
            let Compact(index) = Compact::<u32>::decode(cursor)
                .map_err(|_| ExtrinsicDecodeError::Malformed("invalid Index address"))?;
            Ok(Address::Index(index))
        }
        0x02 => {
            let bytes = Vec::<u8>::decode(cursor)
                .map_err(|_| ExtrinsicDecodeError::Malformed("truncated Raw address"))?;
            Ok(Address::Raw(bytes))
        }
        0x03 => {
            let bytes = <[u8; 32]>::decode(cursor)
                .map_err(|_| ExtrinsicDecodeError::Malformed("truncated Address32"))?;
            Ok(Address::Address32(bytes))
        }
        0x04 => {
            let bytes = <[u8; 20]>::decode(cursor)
                .map_err(|_| ExtrinsicDecodeError::Malformed("truncated Address20"))?;
            Ok(Address::Address20(bytes))
        }
        unknown => Err(ExtrinsicDecodeError::UnknownAddressVariant(unknown)),
    }
}

fn skip_signature(cursor: &mut &[u8]) -> Result<(), ExtrinsicDecodeError> {
    let variant = u8::decode(cursor)
        .map_err(|_| ExtrinsicDecodeError::Malformed("missing signature variant"))?;

    let len = match variant {
        // Ed25519 or Sr25519
        0x00 | 0x01 => 64,
        // Ecdsa
        0x02 => 65,
        unknown => return Err(ExtrinsicDecodeError::UnknownSignatureVariant(unknown)),
    };

    if cursor.len() < len {
        return Err(ExtrinsicDecodeError::Malformed("truncated signature"));
    }
    *cursor = &cursor[len..];

    Ok(())
}

fn decode_call(
    cursor: &[u8],
    types: &RuntimeTypes,
) -> Result<(String, Vec<String>), ExtrinsicDecodeError> {
    let (&pallet_index, mut call_data) = cursor
        .split_first()
        .ok_or(ExtrinsicDecodeError::Malformed("missing call data"))?;

    let (pallet_name, call_type) = types
        .pallet_call(pallet_index)
        .ok_or(ExtrinsicDecodeError::UnknownPalletIndex(pallet_index))?;

    let call = scale_value::scale::decode_as_type(&mut call_data, call_type, types.types())
        .map_err(|e| ExtrinsicDecodeError::CallDecodeFailed {
            pallet: pallet_name.to_string(),
            reason: e.to_string(),
        })?;

    if !call_data.is_empty() {
        return Err(ExtrinsicDecodeError::TrailingCallBytes(
            pallet_name.to_string(),
        ));
    }

    let scale_value::ValueDef::Variant(variant) = call.value else {
        return Err(ExtrinsicDecodeError::CallDecodeFailed {
            pallet: pallet_name.to_string(),
            reason: "call type is not a variant".to_string(),
        });
    };

    let method = format!(
        "{}.{}",
        pallet_name.to_lower_camel_case(),
        variant.name.to_lower_camel_case()
    );
    let args = variant
        .values
        .values()
        .map(scale_value::stringify::to_string)
        .collect();

    Ok((method, args))
}
