//! Hand-built runtime metadata and SCALE fixtures shared by decoder and
//! exporter tests.

#![allow(non_camel_case_types)]

use frame_metadata::v14::{
    ExtrinsicMetadata, PalletCallMetadata, PalletEventMetadata, PalletMetadata,
    PalletStorageMetadata, RuntimeMetadataV14, StorageEntryMetadata, StorageEntryModifier,
    StorageEntryType,
};
use frame_metadata::{RuntimeMetadata, RuntimeMetadataPrefixed};
use parity_scale_codec::{Compact, Encode};
use scale_info::TypeInfo;
use scale_info::meta_type;

pub const SYSTEM_PALLET_INDEX: u8 = 0;
pub const BALANCES_PALLET_INDEX: u8 = 5;

pub const ALICE: [u8; 32] = [1u8; 32];

#[derive(Encode, TypeInfo)]
pub enum SystemCall {
    remark { remark: Vec<u8> },
}

#[derive(Encode, TypeInfo)]
pub enum BalancesCall {
    transfer_keep_alive { dest: [u8; 32], value: u128 },
}

#[derive(Encode, TypeInfo)]
pub enum Phase {
    ApplyExtrinsic(u32),
    Finalization,
    Initialization,
}

#[derive(Encode, TypeInfo)]
pub enum SystemEvent {
    ExtrinsicSuccess { weight: u64 },
}

#[derive(Encode, TypeInfo)]
pub enum BalancesEvent {
    Transfer {
        from: [u8; 32],
        to: [u8; 32],
        amount: u128,
    },
}

#[derive(Encode, TypeInfo)]
pub enum RuntimeEvent {
    #[codec(index = 0)]
    System(SystemEvent),
    #[codec(index = 5)]
    Balances(BalancesEvent),
}

#[derive(Encode, TypeInfo)]
pub struct EventRecord {
    pub phase: Phase,
    pub event: RuntimeEvent,
    pub topics: Vec<[u8; 32]>,
}

/// A two-pallet V14 runtime: System (carrying the Events storage entry) and
/// Balances.
pub fn runtime_metadata() -> RuntimeMetadataV14 {
    let pallets = vec![
        PalletMetadata {
            name: "System",
            storage: Some(PalletStorageMetadata {
                prefix: "System",
                entries: vec![StorageEntryMetadata {
                    name: "Events",
                    modifier: StorageEntryModifier::Default,
                    ty: StorageEntryType::Plain(meta_type::<Vec<EventRecord>>()),
                    default: vec![0],
                    docs: vec![],
                }],
            }),
            calls: Some(PalletCallMetadata {
                ty: meta_type::<SystemCall>(),
            }),
            event: Some(PalletEventMetadata {
                ty: meta_type::<SystemEvent>(),
            }),
            constants: vec![],
            error: None,
            index: SYSTEM_PALLET_INDEX,
        },
        PalletMetadata {
            name: "Balances",
            storage: None,
            calls: Some(PalletCallMetadata {
                ty: meta_type::<BalancesCall>(),
            }),
            event: Some(PalletEventMetadata {
                ty: meta_type::<BalancesEvent>(),
            }),
            constants: vec![],
            error: None,
            index: BALANCES_PALLET_INDEX,
        },
    ];

    let extrinsic = ExtrinsicMetadata {
        ty: meta_type::<()>(),
        version: 4,
        signed_extensions: vec![],
    };

    RuntimeMetadataV14::new(pallets, extrinsic, meta_type::<()>())
}

/// The metadata fixture as `state_getMetadata` would return it.
pub fn metadata_hex() -> String {
    let prefixed = RuntimeMetadataPrefixed(
        frame_metadata::META_RESERVED,
        RuntimeMetadata::V14(runtime_metadata()),
    );
    format!("0x{}", hex::encode(prefixed.encode()))
}

fn length_prefixed(mut inner: Vec<u8>) -> Vec<u8> {
    let mut out = Compact(inner.len() as u32).encode();
    out.append(&mut inner);
    out
}

/// Unsigned v4 extrinsic wrapping `call` under `pallet_index`.
pub fn unsigned_extrinsic(pallet_index: u8, call: &impl Encode) -> Vec<u8> {
    let mut inner = vec![0x04, pallet_index];
    inner.extend(call.encode());
    length_prefixed(inner)
}

/// Signed v4 extrinsic: AccountId sender, sr25519 signature placeholder,
/// immortal era.
pub fn signed_extrinsic(
    pallet_index: u8,
    signer: [u8; 32],
    nonce: u32,
    tip: u128,
    call: &impl Encode,
) -> Vec<u8> {
    let mut inner = vec![0x84];
    inner.push(0x00); // MultiAddress::Id
    inner.extend(signer);
    inner.push(0x01); // MultiSignature::Sr25519
    inner.extend([0x55u8; 64]);
    inner.push(0x00); // Era::Immortal
    inner.extend(Compact(nonce).encode());
    inner.extend(Compact(tip).encode());
    inner.push(pallet_index);
    inner.extend(call.encode());
    length_prefixed(inner)
}

pub fn unsigned_remark_hex() -> String {
    let call = SystemCall::remark {
        remark: b"hello".to_vec(),
    };
    format!(
        "0x{}",
        hex::encode(unsigned_extrinsic(SYSTEM_PALLET_INDEX, &call))
    )
}

pub fn signed_transfer_hex() -> String {
    let call = BalancesCall::transfer_keep_alive {
        dest: [2u8; 32],
        value: 1_000,
    };
    format!(
        "0x{}",
        hex::encode(signed_extrinsic(BALANCES_PALLET_INDEX, ALICE, 7, 5, &call))
    )
}

/// Two events: one in the ApplyExtrinsic(0) phase, one during finalization.
pub fn events() -> Vec<EventRecord> {
    vec![
        EventRecord {
            phase: Phase::ApplyExtrinsic(0),
            event: RuntimeEvent::System(SystemEvent::ExtrinsicSuccess { weight: 1_000 }),
            topics: vec![],
        },
        EventRecord {
            phase: Phase::Finalization,
            event: RuntimeEvent::Balances(BalancesEvent::Transfer {
                from: [1u8; 32],
                to: [2u8; 32],
                amount: 10,
            }),
            topics: vec![],
        },
    ]
}

pub fn events_hex() -> String {
    format!("0x{}", hex::encode(events().encode()))
}

/// A `PreRuntime(aura, ...)` digest item, hex-encoded like a header log.
pub fn pre_runtime_log_hex() -> String {
    let mut bytes = vec![6u8];
    bytes.extend(b"aura");
    bytes.extend(vec![1u8, 2, 3].encode());
    format!("0x{}", hex::encode(bytes))
}
