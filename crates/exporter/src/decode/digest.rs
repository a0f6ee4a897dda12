//! Digest log rendering.
//!
//! Header digest items arrive as hex-encoded SCALE. The exporter renders
//! each one as a short human-readable string; anything it cannot parse falls
//! back to the raw hex rather than failing the block.

use parity_scale_codec::Decode;

/// Length of a consensus engine id ("BABE", "aura", "pow_").
const CONSENSUS_ENGINE_ID_LEN: usize = 4;

/// SCALE discriminants of `sp_runtime::generic::DigestItem`.
///
/// ChangesTrieRoot (2) and ChangesTrieSignal (3) were removed upstream.
mod discriminant {
    pub const OTHER: u8 = 0;
    pub const CONSENSUS: u8 = 4;
    pub const SEAL: u8 = 5;
    pub const PRE_RUNTIME: u8 = 6;
    pub const RUNTIME_ENVIRONMENT_UPDATED: u8 = 8;
}

/// Render every digest log of a header, in order.
pub fn render_digest_logs(logs: &[String]) -> Vec<String> {
    logs.iter()
        .map(|log_hex| try_render(log_hex).unwrap_or_else(|| log_hex.clone()))
        .collect()
}

fn try_render(log_hex: &str) -> Option<String> {
    let bytes = hex::decode(log_hex.strip_prefix("0x")?).ok()?;
    let (&kind, data) = bytes.split_first()?;

    match kind {
        discriminant::PRE_RUNTIME => render_consensus("PreRuntime", data),
        discriminant::CONSENSUS => render_consensus("Consensus", data),
        discriminant::SEAL => render_consensus("Seal", data),
        discriminant::RUNTIME_ENVIRONMENT_UPDATED => Some("RuntimeEnvironmentUpdated".to_string()),
        discriminant::OTHER => {
            let mut cursor = data;
            let payload = Vec::<u8>::decode(&mut cursor).ok()?;
            Some(format!("Other(0x{})", hex::encode(payload)))
        }
        _ => None,
    }
}

/// PreRuntime/Consensus/Seal payloads are `(ConsensusEngineId, Vec<u8>)`:
/// 4 raw engine bytes followed by a length-prefixed payload.
fn render_consensus(kind: &str, data: &[u8]) -> Option<String> {
    if data.len() < CONSENSUS_ENGINE_ID_LEN {
        return None;
    }

    let (engine, rest) = data.split_at(CONSENSUS_ENGINE_ID_LEN);
    let engine = match std::str::from_utf8(engine) {
        Ok(s) if s.chars().all(|c| c.is_ascii_graphic()) => s.to_string(),
        _ => format!("0x{}", hex::encode(engine)),
    };

    let mut cursor = rest;
    let payload = Vec::<u8>::decode(&mut cursor).ok()?;

    Some(format!("{}({}, 0x{})", kind, engine, hex::encode(payload)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use parity_scale_codec::Encode;

    fn log_hex(kind: u8, engine: &[u8; 4], payload: &[u8]) -> String {
        let mut bytes = vec![kind];
        bytes.extend(engine);
        bytes.extend(payload.to_vec().encode());
        format!("0x{}", hex::encode(bytes))
    }

    #[test]
    fn renders_pre_runtime_log() {
        let log = log_hex(6, b"aura", &[1, 2, 3]);
        assert_eq!(render_digest_logs(&[log]), vec!["PreRuntime(aura, 0x010203)"]);
    }

    #[test]
    fn renders_seal_log() {
        let log = log_hex(5, b"BABE", &[0xaa]);
        assert_eq!(render_digest_logs(&[log]), vec!["Seal(BABE, 0xaa)"]);
    }

    #[test]
    fn renders_non_ascii_engine_as_hex() {
        let log = log_hex(4, &[0x00, 0x01, 0x02, 0x03], &[]);
        assert_eq!(render_digest_logs(&[log]), vec!["Consensus(0x00010203, 0x)"]);
    }

    #[test]
    fn renders_runtime_environment_updated() {
        assert_eq!(
            render_digest_logs(&["0x08".to_string()]),
            vec!["RuntimeEnvironmentUpdated"]
        );
    }

    #[test]
    fn falls_back_to_raw_hex_for_unknown_items() {
        let unknown = "0x07deadbeef".to_string();
        let garbage = "0xnothex".to_string();
        assert_eq!(
            render_digest_logs(&[unknown.clone(), garbage.clone()]),
            vec![unknown, garbage]
        );
    }
}
