//! The records written to the export file.

use serde::{Deserialize, Serialize};

/// One exported block: header fields verbatim from the node plus decoded
/// extrinsics and events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockRecord {
    /// The requested height, never re-derived from the returned header.
    pub block_number: u64,
    pub hash: String,
    pub parent_hash: String,
    pub state_root: String,
    pub extrinsics_root: String,
    pub digest_logs: Vec<String>,
    pub extrinsics: Vec<ExtrinsicRecord>,
    pub events: Vec<EventRecord>,
}

/// `signer` and `tip` stay `Option` without any skip attribute: an unsigned
/// extrinsic serializes them as explicit `null`s, not omitted fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtrinsicRecord {
    pub index: u32,
    /// `pallet.call`, both parts lowerCamelCase.
    pub method: String,
    pub signer: Option<String>,
    pub tip: Option<String>,
    pub args: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    pub index: u32,
    pub section: String,
    pub method: String,
    pub phase: String,
    pub data: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsigned_extrinsic_serializes_explicit_nulls() {
        let record = ExtrinsicRecord {
            index: 0,
            method: "timestamp.set".to_string(),
            signer: None,
            tip: None,
            args: vec!["1700000000000".to_string()],
        };

        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("signer").unwrap().is_null());
        assert!(json.get("tip").unwrap().is_null());
    }

    #[test]
    fn block_record_uses_camel_case_keys() {
        let record = BlockRecord {
            block_number: 100,
            hash: "0xaa".to_string(),
            parent_hash: "0xbb".to_string(),
            state_root: "0xcc".to_string(),
            extrinsics_root: "0xdd".to_string(),
            digest_logs: vec![],
            extrinsics: vec![],
            events: vec![],
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["blockNumber"], 100);
        assert!(json.get("parentHash").is_some());
        assert!(json.get("stateRoot").is_some());
        assert!(json.get("extrinsicsRoot").is_some());
        assert!(json.get("digestLogs").is_some());
    }
}
