// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! The export driver: fetches an inclusive block range and writes the JSON
//! document.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use config::ExporterConfig;
use subxt_rpcs::RpcClient;
use thiserror::Error;

use crate::decode::digest::render_digest_logs;
use crate::decode::event::{EventDecodeError, decode_events};
use crate::decode::extrinsic::{ExtrinsicDecodeError, decode_extrinsic};
use crate::metadata::{MetadataError, RuntimeTypes};
use crate::record::{BlockRecord, EventRecord, ExtrinsicRecord};
use crate::rpc::ChainRpc;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to connect to node at {url}")]
    ConnectFailed {
        url: String,
        #[source]
        source: subxt_rpcs::Error,
    },

    #[error("Failed to fetch chain properties")]
    PropertiesFailed(#[source] subxt_rpcs::Error),

    #[error("Failed to fetch runtime metadata")]
    MetadataFetchFailed(#[source] subxt_rpcs::Error),

    #[error("Unusable runtime metadata")]
    Metadata(#[from] MetadataError),

    #[error("Failed to look up the hash of block {number}")]
    BlockHashFailed {
        number: u64,
        #[source]
        source: subxt_rpcs::Error,
    },

    #[error("Block {0} not found on the chain")]
    BlockNotFound(u64),

    #[error("Failed to fetch block {number}")]
    BlockFetchFailed {
        number: u64,
        #[source]
        source: subxt_rpcs::Error,
    },

    #[error("Failed to fetch events for block {number}")]
    EventsFetchFailed {
        number: u64,
        #[source]
        source: subxt_rpcs::Error,
    },

    #[error("Extrinsic {index} of block {number} is not valid hex")]
    ExtrinsicNotHex { number: u64, index: u32 },

    #[error("Failed to decode extrinsic {index} of block {number}")]
    ExtrinsicDecodeFailed {
        number: u64,
        index: u32,
        #[source]
        source: ExtrinsicDecodeError,
    },

    #[error("Events storage of block {0} is not valid hex")]
    EventsNotHex(u64),

    #[error("Failed to decode events of block {number}")]
    EventDecodeFailed {
        number: u64,
        #[source]
        source: EventDecodeError,
    },

    #[error("Failed to serialize export")]
    SerializeFailed(#[source] serde_json::Error),

    #[error("Failed to write export file {path}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// What a finished run hands back for the operator report.
#[derive(Debug)]
pub struct ExportSummary {
    pub path: PathBuf,
    pub count: usize,
}

/// Fetches every block in an inclusive height range, strictly sequentially,
/// and writes the result as one pretty-printed JSON document.
pub struct BlockRangeExporter {
    config: ExporterConfig,
}

impl BlockRangeExporter {
    pub fn new(config: ExporterConfig) -> Self {
        Self { config }
    }

    /// Connect to the configured node, export `[start, end]`, write the file.
    pub async fn run(&self, start: u64, end: u64) -> Result<ExportSummary, ExportError> {
        let client = connect(&self.config.substrate.url).await?;
        self.run_with_client(ChainRpc::new(client), start, end).await
    }

    /// Same as [`Self::run`], but over an already-built RPC client.
    ///
    /// The client is owned here: whatever happens inside the fetch loop, the
    /// connection is released before the run aborts or touches the
    /// filesystem.
    pub async fn run_with_client(
        &self,
        chain: ChainRpc,
        start: u64,
        end: u64,
    ) -> Result<ExportSummary, ExportError> {
        let started_at = Utc::now();

        let fetched = self.fetch_range(&chain, start, end).await;
        drop(chain);
        let records = fetched?;

        self.write_records(start, end, started_at, &records)
    }

    async fn fetch_range(
        &self,
        chain: &ChainRpc,
        start: u64,
        end: u64,
    ) -> Result<Vec<BlockRecord>, ExportError> {
        let properties = chain
            .system_properties()
            .await
            .map_err(ExportError::PropertiesFailed)?;
        let ss58_prefix = properties.ss58_prefix();

        // Call and event layouts come from the runtime metadata at the start
        // of the range. A range crossing a runtime upgrade surfaces as a
        // decode error rather than a silently mis-decoded record.
        let start_hash = chain
            .block_hash(start)
            .await
            .map_err(|source| ExportError::BlockHashFailed {
                number: start,
                source,
            })?
            .ok_or(ExportError::BlockNotFound(start))?;
        let metadata_hex = chain
            .metadata(&start_hash)
            .await
            .map_err(ExportError::MetadataFetchFailed)?;
        let types = RuntimeTypes::from_hex(&metadata_hex)?;

        let mut records = Vec::with_capacity((end.saturating_sub(start) + 1) as usize);
        for number in start..=end {
            tracing::info!("Fetching block {}", number);
            records.push(fetch_block(chain, &types, ss58_prefix, number).await?);
        }

        Ok(records)
    }

    fn write_records(
        &self,
        start: u64,
        end: u64,
        started_at: DateTime<Utc>,
        records: &[BlockRecord],
    ) -> Result<ExportSummary, ExportError> {
        let path =
            PathBuf::from(&self.config.export.out_dir).join(file_name(start, end, started_at));

        let json = serde_json::to_string_pretty(records).map_err(ExportError::SerializeFailed)?;
        std::fs::write(&path, json).map_err(|source| ExportError::WriteFailed {
            path: path.clone(),
            source,
        })?;

        Ok(ExportSummary {
            path,
            count: records.len(),
        })
    }
}

async fn connect(url: &str) -> Result<RpcClient, ExportError> {
    let connect_failed = |source| ExportError::ConnectFailed {
        url: url.to_string(),
        source,
    };

    // `from_url` insists on TLS; plain ws/http endpoints (the local-node
    // default) go through the insecure constructor.
    if url.starts_with("ws://") || url.starts_with("http://") {
        RpcClient::from_insecure_url(url).await.map_err(connect_failed)
    } else {
        RpcClient::from_url(url).await.map_err(connect_failed)
    }
}

/// Fetch and normalize one block. The record's `blockNumber` is the requested
/// height, never re-derived from the returned header.
async fn fetch_block(
    chain: &ChainRpc,
    types: &RuntimeTypes,
    ss58_prefix: u16,
    number: u64,
) -> Result<BlockRecord, ExportError> {
    let hash = chain
        .block_hash(number)
        .await
        .map_err(|source| ExportError::BlockHashFailed { number, source })?
        .ok_or(ExportError::BlockNotFound(number))?;

    let signed_block = chain
        .signed_block(&hash)
        .await
        .map_err(|source| ExportError::BlockFetchFailed { number, source })?
        .ok_or(ExportError::BlockNotFound(number))?;

    let events_key = types.events_storage_key()?;
    let events_bytes = chain
        .storage(&events_key, &hash)
        .await
        .map_err(|source| ExportError::EventsFetchFailed { number, source })?;

    let mut extrinsics = Vec::with_capacity(signed_block.block.extrinsics.len());
    for (index, extrinsic_hex) in signed_block.block.extrinsics.iter().enumerate() {
        let index = index as u32;
        let bytes = hex::decode(extrinsic_hex.trim_start_matches("0x"))
            .map_err(|_| ExportError::ExtrinsicNotHex { number, index })?;
        let decoded = decode_extrinsic(&bytes, types, ss58_prefix)
            .map_err(|source| ExportError::ExtrinsicDecodeFailed {
                number,
                index,
                source,
            })?;

        extrinsics.push(ExtrinsicRecord {
            index,
            method: decoded.method,
            signer: decoded.signer,
            tip: decoded.tip,
            args: decoded.args,
        });
    }

    let events = match events_bytes {
        Some(events_hex) => {
            let bytes = hex::decode(events_hex.trim_start_matches("0x"))
                .map_err(|_| ExportError::EventsNotHex(number))?;
            decode_events(&bytes, types)
                .map_err(|source| ExportError::EventDecodeFailed { number, source })?
                .into_iter()
                .enumerate()
                .map(|(index, event)| EventRecord {
                    index: index as u32,
                    section: event.section,
                    method: event.method,
                    phase: event.phase,
                    data: event.data,
                })
                .collect()
        }
        None => {
            // Only genesis-like blocks are missing the entry entirely.
            tracing::warn!("No events storage found for block {}", number);
            Vec::new()
        }
    };

    let header = signed_block.block.header;

    Ok(BlockRecord {
        block_number: number,
        hash,
        parent_hash: header.parent_hash,
        state_root: header.state_root,
        extrinsics_root: header.extrinsics_root,
        digest_logs: render_digest_logs(&header.digest.logs),
        extrinsics,
        events,
    })
}

/// `blocks_<start>_<end>_<timestamp>.json`, timestamp in UTC with `:` and `.`
/// swapped for `-` so the name is filesystem-safe.
fn file_name(start: u64, end: u64, started_at: DateTime<Utc>) -> String {
    format!(
        "blocks_{}_{}_{}.json",
        start,
        end,
        started_at.format("%Y-%m-%dT%H-%M-%S-%3fZ")
    )
}
