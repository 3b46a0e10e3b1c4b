//! # Selection Trace
//!
//! Deterministic trace hashing for replay-parity verification of
//! efficiency-selection sequences.
//!
//! A selection module examines candidates in a fixed order and consumes one
//! uniform draw per candidate; the resulting `SelectionRecord` sequence is
//! a complete account of an event's selection. Hashing that sequence gives
//! an O(1) check that a re-run with the same seed and inputs reproduced the
//! run bit-for-bit:
//!
//! ```text
//! TraceHash(original) == TraceHash(replay)
//! ```
//!
//! ## Canonical Binary Encoding
//!
//! Records are encoded in a strict binary format independent of serde/JSON
//! serialization, so hashes are platform- and serde-version-independent:
//!
//! - **Version byte**: first byte of every record is the encoding version
//! - **Category**: stable wire tag, one byte
//! - **f64**: IEEE 754 bits as u64 little-endian
//! - **bool**: one byte, 0x00 / 0x01
//!
//! ### Field order (SelectionRecord)
//!
//! After the version byte: category, pt, eta, draw, probability, accepted.
//!
//! ## Encoding Version History
//!
//! - v1 (0x01): initial format

use kiransim_core::SelectionObserver;
use kiransim_models::SelectionRecord;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Current encoding version for canonical bytes.
/// Increment when the encoding format changes.
pub const ENCODING_VERSION: u8 = 0x01;

/// A recorded selection sequence and its hash.
///
/// The hash is computed incrementally as records are added, so parity
/// verification against another trace is O(1) in the match case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionTrace {
    /// Encoding version used to generate this trace.
    #[serde(default = "default_encoding_version")]
    pub encoding_version: u8,
    /// The selection decisions in examination order.
    pub records: Vec<SelectionRecord>,
    /// SHA-256 over the canonical encoding of all records (hex in JSON).
    #[serde(with = "hex_hash")]
    pub trace_hash: [u8; 32],
}

fn default_encoding_version() -> u8 {
    ENCODING_VERSION
}

/// Serde helper for hex encoding/decoding of hash bytes.
mod hex_hash {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(hash: &[u8; 32], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&hex::encode(hash))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<[u8; 32], D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let bytes = hex::decode(&s).map_err(serde::de::Error::custom)?;
        if bytes.len() != 32 {
            return Err(serde::de::Error::custom(format!(
                "expected 32 bytes, got {}",
                bytes.len()
            )));
        }
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&bytes);
        Ok(arr)
    }
}

impl SelectionTrace {
    /// Verify parity with another trace by comparing hashes.
    pub fn verify_parity(&self, other: &SelectionTrace) -> bool {
        self.trace_hash == other.trace_hash
    }

    /// The trace hash as a hex string, for logging and display.
    pub fn hash_hex(&self) -> String {
        hex::encode(self.trace_hash)
    }

    /// Number of recorded decisions.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the trace is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Load a trace from a JSON file.
    pub fn load(path: &std::path::Path) -> Result<Self, TraceError> {
        let file = std::fs::File::open(path).map_err(|e| TraceError::Io(e.to_string()))?;
        let reader = std::io::BufReader::new(file);
        serde_json::from_reader(reader).map_err(|e| TraceError::Parse(e.to_string()))
    }

    /// Save the trace to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), TraceError> {
        let file = std::fs::File::create(path).map_err(|e| TraceError::Io(e.to_string()))?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self).map_err(|e| TraceError::Serialize(e.to_string()))
    }
}

/// Errors raised by trace persistence.
#[derive(Debug, Clone, thiserror::Error)]
pub enum TraceError {
    #[error("I/O error: {0}")]
    Io(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("serialize error: {0}")]
    Serialize(String),
}

/// Builder accumulating records with an incremental hash.
#[derive(Debug, Default)]
pub struct SelectionTraceBuilder {
    records: Vec<SelectionRecord>,
    hasher: Sha256,
}

impl SelectionTraceBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one selection decision, updating the incremental hash.
    pub fn record(&mut self, record: &SelectionRecord) {
        let bytes = canonical_bytes(record);
        self.hasher.update(&bytes);
        self.records.push(*record);
    }

    /// Finalize into a complete trace, consuming the builder.
    pub fn finalize(self) -> SelectionTrace {
        let hash = self.hasher.finalize();
        SelectionTrace {
            encoding_version: ENCODING_VERSION,
            records: self.records,
            trace_hash: hash.into(),
        }
    }

    /// Current record count.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether nothing has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Observer plugging a trace builder into a selection module.
///
/// Lend it to the module for a run, then take the builder back and
/// finalize.
#[derive(Debug, Default)]
pub struct TraceObserver {
    builder: SelectionTraceBuilder,
}

impl TraceObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Finalize the accumulated records into a trace.
    pub fn finalize(self) -> SelectionTrace {
        self.builder.finalize()
    }
}

impl SelectionObserver for TraceObserver {
    fn on_selection(&mut self, record: &SelectionRecord) {
        self.builder.record(record);
    }
}

/// Result of replay-parity verification.
#[derive(Debug, Clone)]
pub enum ReplayParityResult {
    /// Traces match: identical hashes.
    Match,
    /// Traces diverge at a specific record.
    Divergence {
        /// 0-based index of the first divergent record.
        index: usize,
        /// The original record at the divergence point.
        original: SelectionRecord,
        /// The replay record at the divergence point.
        replay: SelectionRecord,
        /// Human-readable reason for the divergence.
        reason: String,
    },
    /// Traces have different lengths.
    LengthMismatch {
        original_len: usize,
        replay_len: usize,
    },
}

/// Verify replay parity between an original trace and a replay trace.
///
/// Fast path compares hashes; on mismatch the first divergent record is
/// located and described.
pub fn verify_replay_parity(
    original: &SelectionTrace,
    replay: &SelectionTrace,
) -> ReplayParityResult {
    if original.trace_hash == replay.trace_hash {
        return ReplayParityResult::Match;
    }

    let min_len = original.records.len().min(replay.records.len());
    for i in 0..min_len {
        let a = &original.records[i];
        let b = &replay.records[i];
        if canonical_bytes(a) != canonical_bytes(b) {
            return ReplayParityResult::Divergence {
                index: i,
                original: *a,
                replay: *b,
                reason: find_divergence_reason(a, b),
            };
        }
    }

    ReplayParityResult::LengthMismatch {
        original_len: original.records.len(),
        replay_len: replay.records.len(),
    }
}

/// Name the first field that differs between two records.
fn find_divergence_reason(original: &SelectionRecord, replay: &SelectionRecord) -> String {
    if original.category != replay.category {
        return format!(
            "category differs: original={}, replay={}",
            original.category, replay.category
        );
    }
    if original.pt.to_bits() != replay.pt.to_bits() {
        return format!("pt differs: original={}, replay={}", original.pt, replay.pt);
    }
    if original.eta.to_bits() != replay.eta.to_bits() {
        return format!(
            "eta differs: original={}, replay={}",
            original.eta, replay.eta
        );
    }
    if original.draw.to_bits() != replay.draw.to_bits() {
        return format!(
            "draw differs: original={}, replay={}",
            original.draw, replay.draw
        );
    }
    if original.probability.to_bits() != replay.probability.to_bits() {
        return format!(
            "probability differs: original={}, replay={}",
            original.probability, replay.probability
        );
    }
    if original.accepted != replay.accepted {
        return format!(
            "accepted differs: original={}, replay={}",
            original.accepted, replay.accepted
        );
    }
    "unknown field differs".to_string()
}

// =============================================================================
// CANONICAL BINARY ENCODING
// =============================================================================

/// Encode a `SelectionRecord` to canonical bytes for hashing.
///
/// Deterministic and independent of serde serialization; see the module
/// documentation for the encoding rules. The first byte is always
/// `ENCODING_VERSION`.
pub fn canonical_bytes(record: &SelectionRecord) -> Vec<u8> {
    let mut buf = Vec::with_capacity(1 + 1 + 4 * 8 + 1);

    buf.push(ENCODING_VERSION);
    buf.push(record.category.wire_tag());
    encode_f64(&mut buf, record.pt);
    encode_f64(&mut buf, record.eta);
    encode_f64(&mut buf, record.draw);
    encode_f64(&mut buf, record.probability);
    buf.push(record.accepted as u8);

    buf
}

/// Encode f64 as IEEE 754 bits, little-endian.
fn encode_f64(buf: &mut Vec<u8>, val: f64) {
    buf.extend_from_slice(&val.to_bits().to_le_bytes());
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use kiransim_models::Category;

    /// Deterministic test record; `seq` perturbs the kinematics.
    fn make_record(seq: u32, category: Category, accepted: bool) -> SelectionRecord {
        SelectionRecord {
            category,
            pt: 30.0 + seq as f64,
            eta: -1.5 + 0.25 * seq as f64,
            draw: (seq as f64 + 0.5) / 64.0,
            probability: if accepted { 0.95 } else { 0.0 },
            accepted,
        }
    }

    #[test]
    fn test_identical_sequences_hash_identically() {
        let records = vec![
            make_record(0, Category::Jet, true),
            make_record(1, Category::Electron, false),
            make_record(2, Category::Photon, true),
        ];

        let mut b1 = SelectionTraceBuilder::new();
        let mut b2 = SelectionTraceBuilder::new();
        for r in &records {
            b1.record(r);
            b2.record(r);
        }

        let t1 = b1.finalize();
        let t2 = b2.finalize();

        assert_eq!(
            t1.trace_hash, t2.trace_hash,
            "identical sequences must produce identical hashes"
        );
        assert!(matches!(
            verify_replay_parity(&t1, &t2),
            ReplayParityResult::Match
        ));
    }

    #[test]
    fn test_draw_divergence_located_at_correct_index() {
        let records = vec![
            make_record(0, Category::Jet, true),
            make_record(1, Category::Jet, true),
            make_record(2, Category::Muon, false),
        ];

        let mut b1 = SelectionTraceBuilder::new();
        let mut b2 = SelectionTraceBuilder::new();
        for (i, r) in records.iter().enumerate() {
            b1.record(r);
            let mut replayed = *r;
            if i == 1 {
                replayed.draw += 0.125;
            }
            b2.record(&replayed);
        }

        let result = verify_replay_parity(&b1.finalize(), &b2.finalize());
        match result {
            ReplayParityResult::Divergence { index, reason, .. } => {
                assert_eq!(index, 1, "divergence should be located at index 1");
                assert!(
                    reason.contains("draw"),
                    "reason should name the draw field, got: {reason}"
                );
            }
            other => panic!("expected Divergence, got {other:?}"),
        }
    }

    #[test]
    fn test_length_mismatch_detected() {
        let mut b1 = SelectionTraceBuilder::new();
        let mut b2 = SelectionTraceBuilder::new();

        b1.record(&make_record(0, Category::Jet, true));
        b1.record(&make_record(1, Category::Jet, false));
        b2.record(&make_record(0, Category::Jet, true));

        match verify_replay_parity(&b1.finalize(), &b2.finalize()) {
            ReplayParityResult::LengthMismatch {
                original_len,
                replay_len,
            } => {
                assert_eq!(original_len, 2);
                assert_eq!(replay_len, 1);
            }
            other => panic!("expected LengthMismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_traces_match() {
        let t1 = SelectionTraceBuilder::new().finalize();
        let t2 = SelectionTraceBuilder::new().finalize();
        assert!(matches!(
            verify_replay_parity(&t1, &t2),
            ReplayParityResult::Match
        ));
    }

    #[test]
    fn test_canonical_bytes_layout() {
        let r = make_record(3, Category::Muon, true);
        let bytes = canonical_bytes(&r);

        assert_eq!(bytes.len(), 2 + 4 * 8 + 1, "fixed-width record encoding");
        assert_eq!(bytes[0], ENCODING_VERSION, "first byte is the version");
        assert_eq!(bytes[1], Category::Muon.wire_tag());
        assert_eq!(*bytes.last().unwrap(), 0x01, "accepted encodes as 0x01");
    }

    #[test]
    fn test_canonical_bytes_deterministic() {
        let r = make_record(7, Category::Photon, false);
        assert_eq!(canonical_bytes(&r), canonical_bytes(&r));
    }

    #[test]
    fn test_category_affects_hash() {
        // Same kinematics, same draw, different category.
        let a = make_record(0, Category::Jet, true);
        let b = make_record(0, Category::Electron, true);

        let mut b1 = SelectionTraceBuilder::new();
        let mut b2 = SelectionTraceBuilder::new();
        b1.record(&a);
        b2.record(&b);

        assert_ne!(b1.finalize().trace_hash, b2.finalize().trace_hash);
    }

    #[test]
    fn test_hash_hex_format() {
        let mut b = SelectionTraceBuilder::new();
        b.record(&make_record(0, Category::Jet, true));
        let trace = b.finalize();

        let hex = trace.hash_hex();
        assert_eq!(hex.len(), 64, "SHA-256 hex should be 64 characters");
        assert!(hex.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_trace_json_roundtrip_preserves_hash() {
        let mut b = SelectionTraceBuilder::new();
        b.record(&make_record(0, Category::Jet, true));
        b.record(&make_record(1, Category::Electron, false));
        let trace = b.finalize();

        let json = serde_json::to_string(&trace).unwrap();
        let back: SelectionTrace = serde_json::from_str(&json).unwrap();

        assert_eq!(back.trace_hash, trace.trace_hash);
        assert_eq!(back.len(), trace.len());
        assert_eq!(back.encoding_version, ENCODING_VERSION);
    }

    #[test]
    fn test_observer_records_into_builder() {
        let mut observer = TraceObserver::new();
        let record = make_record(0, Category::Jet, true);
        observer.on_selection(&record);

        let trace = observer.finalize();
        assert_eq!(trace.len(), 1);
        assert_eq!(trace.records[0], record);
    }
}
