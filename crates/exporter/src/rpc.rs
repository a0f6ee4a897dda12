//! Thin typed wrapper over the node's JSON-RPC surface.
//!
//! Only the handful of legacy RPC methods the exporter needs are exposed.
//! Replies are parsed into fixed serde schemas right at the boundary, so a
//! node answering with an unexpected shape fails loudly instead of leaking
//! untyped JSON into the rest of the pipeline.

use serde::Deserialize;
use subxt_rpcs::{RpcClient, client::rpc_params};

/// A signed block as returned by `chain_getBlock`.
#[derive(Debug, Clone, Deserialize)]
pub struct SignedBlockJson {
    pub block: BlockJson,
    #[serde(default)]
    pub justifications: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BlockJson {
    pub header: HeaderJson,
    /// SCALE-encoded extrinsics, hex with a 0x prefix, in body order.
    pub extrinsics: Vec<String>,
}

/// Block header fields, hex-encoded exactly as the node reports them.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderJson {
    pub parent_hash: String,
    pub number: String,
    pub state_root: String,
    pub extrinsics_root: String,
    pub digest: DigestJson,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DigestJson {
    /// SCALE-encoded digest items, hex with a 0x prefix.
    #[serde(default)]
    pub logs: Vec<String>,
}

/// The subset of `system_properties` the exporter cares about.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemProperties {
    #[serde(default)]
    pub ss58_format: Option<u16>,
}

impl SystemProperties {
    /// 42 is the shared "generic substrate" prefix nodes fall back to.
    pub fn ss58_prefix(&self) -> u16 {
        self.ss58_format.unwrap_or(42)
    }
}

/// The RPC methods used by the exporter, all issued over a single client
/// connection.
pub struct ChainRpc {
    client: RpcClient,
}

impl ChainRpc {
    pub fn new(client: RpcClient) -> Self {
        Self { client }
    }

    /// Canonical-chain block hash at `number`; `None` when the chain has no
    /// block at that height.
    pub async fn block_hash(&self, number: u64) -> Result<Option<String>, subxt_rpcs::Error> {
        self.client
            .request("chain_getBlockHash", rpc_params![number])
            .await
    }

    pub async fn signed_block(
        &self,
        hash: &str,
    ) -> Result<Option<SignedBlockJson>, subxt_rpcs::Error> {
        self.client.request("chain_getBlock", rpc_params![hash]).await
    }

    /// Raw storage bytes under `key` at `hash`, hex with a 0x prefix.
    pub async fn storage(
        &self,
        key: &str,
        hash: &str,
    ) -> Result<Option<String>, subxt_rpcs::Error> {
        self.client
            .request("state_getStorage", rpc_params![key, hash])
            .await
    }

    /// SCALE-encoded runtime metadata at `hash`, hex with a 0x prefix.
    pub async fn metadata(&self, hash: &str) -> Result<String, subxt_rpcs::Error> {
        self.client
            .request("state_getMetadata", rpc_params![hash])
            .await
    }

    pub async fn system_properties(&self) -> Result<SystemProperties, subxt_rpcs::Error> {
        self.client.request("system_properties", rpc_params![]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signed_block_parses_the_node_shape() {
        let reply = serde_json::json!({
            "block": {
                "header": {
                    "parentHash": "0x4a9af9ee9b9692e09e20e2fec63dcc48f649b50a49a951c31e9260e2a7e386aa",
                    "number": "0x64",
                    "stateRoot": "0x9f08f0a0b5360aa959cb542875b09bbe7a0a50b0764d3d54d0ca5b7f5cf9e0c2",
                    "extrinsicsRoot": "0x3b2a5d3bca2a37acdbf2e0b461df1d458bf2ed4e01c5f3e9ab0b46fa5ee0d3a1",
                    "digest": { "logs": ["0x0642414245b501"] }
                },
                "extrinsics": ["0x280403000b1a7c36358101"]
            },
            "justifications": null
        });

        let block: SignedBlockJson = serde_json::from_value(reply).unwrap();
        assert_eq!(block.block.header.number, "0x64");
        assert_eq!(block.block.extrinsics.len(), 1);
        assert_eq!(block.block.header.digest.logs.len(), 1);
    }

    #[test]
    fn ss58_prefix_defaults_to_generic_substrate() {
        let properties: SystemProperties = serde_json::from_value(serde_json::json!({
            "tokenDecimals": 12,
            "tokenSymbol": "UNIT"
        }))
        .unwrap();
        assert_eq!(properties.ss58_prefix(), 42);

        let properties: SystemProperties =
            serde_json::from_value(serde_json::json!({ "ss58Format": 0 })).unwrap();
        assert_eq!(properties.ss58_prefix(), 0);
    }
}
