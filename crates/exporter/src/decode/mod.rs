//! Decoders that turn raw node bytes into export records.

pub mod digest;
pub mod event;
pub mod extrinsic;
