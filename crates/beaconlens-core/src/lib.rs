//! beaconlens core library for offline Eddystone beacon analysis.
//!
//! This crate implements the analysis pipeline used by the CLI:
//! advertisement sources feed the analysis layer, which drives the
//! Eddystone decoder (layout/reader/parser) and aggregates results into a
//! deterministic report. Decoding is byte-oriented and side-effect free;
//! all I/O is isolated in `source` modules. Protocol conventions are
//! captured in readers so parsers stay minimal and consistent with the
//! published frame formats.
//!
//! Invariants:
//! - A decoded frame is only constructed after the Eddystone service
//!   identifier has matched; there is no partial or default result.
//! - Decoded values own their data; nothing borrows from the input buffer
//!   past the decode call.
//! - Report outputs are deterministic and stable across runs (beacons in
//!   record order, failures in id order).
//!
//! Version française (résumé):
//! Cette crate fournit le cœur d'analyse hors ligne : sources -> analyse ->
//! décodeur Eddystone (layout/reader/parser) -> rapport déterministe. Les
//! E/S restent dans `source`, les conventions de protocole dans les
//! `reader`. Garanties : construction atomique des trames décodées, ordre
//! stable du rapport.
//!
//! # Examples
//! ```no_run
//! use std::path::Path;
//!
//! use beaconlens_core::analyze_dump_file;
//!
//! let report = analyze_dump_file(Path::new("scan.hex"))?;
//! println!("report version: {}", report.report_version);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use serde::{Deserialize, Serialize};

mod analysis;
mod protocols;
mod source;

pub use analysis::{AnalysisError, analyze_dump_file, analyze_source};
pub use protocols::eddystone::{
    DecodedAdvertisement, DecodedFrame, EddystoneError, FrameKind, TlmFrame, UidFrame, UrlFrame,
    decode, decode_advertisement, expand_url,
};
pub use source::{
    AdvertisementEvent, AdvertisementSource, HexDumpSource, SourceError, parse_hex_payload,
};

/// Current report schema version.
pub const REPORT_VERSION: u32 = 1;
/// Default timestamp used when no generation time is available.
pub const DEFAULT_GENERATED_AT: &str = "1970-01-01T00:00:00Z";

/// Aggregated analysis report with deterministic ordering.
///
/// # Examples
/// ```
/// use beaconlens_core::make_stub_report;
///
/// let report = make_stub_report("scan.hex", 123);
/// assert_eq!(report.report_version, beaconlens_core::REPORT_VERSION);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Report schema version (not the binary version).
    pub report_version: u32,
    /// Tool identification metadata.
    pub tool: ToolInfo,
    /// RFC3339 timestamp representing the report generation time.
    pub generated_at: String,
    /// Input dump metadata.
    pub input: InputInfo,
    /// Decode counters for the whole dump.
    pub summary: ScanSummary,
    /// Decoded beacons in record order.
    pub beacons: Vec<BeaconSummary>,
    /// Aggregated decode failures in stable id order.
    pub failures: Vec<DecodeFailure>,
}

/// Tool metadata embedded in reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    /// Tool name (e.g., "beaconlens").
    pub name: String,
    /// Tool version (semver).
    pub version: String,
}

/// Input dump metadata embedded in reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputInfo {
    /// Input path as provided to the analyzer.
    pub path: String,
    /// Input size in bytes.
    pub bytes: u64,
}

/// Whole-dump decode counters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanSummary {
    /// Advertisements read from the source.
    pub advertisements_total: u64,
    /// Advertisements that decoded into an Eddystone frame.
    pub decoded_total: u64,
    pub uid_frames: u64,
    pub url_frames: u64,
    pub tlm_frames: u64,
}

/// One decoded beacon advertisement, flattened for presentation.
///
/// Only the fields of the decoded frame kind are present; the address and
/// RSSI side metadata are carried through from the capture uninterpreted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BeaconSummary {
    /// 1-based record number within the dump.
    pub record: u64,
    /// Frame kind name ("uid", "url", "tlm").
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rssi: Option<i8>,
    /// AD flags byte, when the advertisement carried a flags structure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flags: Option<u8>,
    /// Calibrated power at 0 m (UID frames).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ranging_data: Option<i8>,
    /// Namespace identifier as colon-separated hex (UID frames).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace_id: Option<String>,
    /// Instance identifier as colon-separated hex (UID frames).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance_id: Option<String>,
    /// Calibrated power at 0 m (URL frames).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tx_power: Option<i8>,
    /// Expanded URL text (URL frames).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tlm_version: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub battery_millivolts: Option<u16>,
    /// Beacon temperature in degrees Celsius (TLM frames).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature_c: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advertisement_count: Option<u32>,
    /// Whole seconds since beacon power-up (TLM frames).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uptime_s: Option<u32>,
}

/// Aggregated decode failures for one failure id.
///
/// # Examples
/// ```
/// use beaconlens_core::DecodeFailure;
///
/// let failure = DecodeFailure {
///     id: "BL-ADV-TRUNCATED".to_string(),
///     count: 1,
///     examples: vec!["record 3: advertisement truncated: need 4 bytes, got 2".to_string()],
/// };
/// assert_eq!(failure.count, 1);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecodeFailure {
    /// Stable failure identifier (e.g., `BL-ADV-TRUNCATED`).
    pub id: String,
    /// Number of occurrences aggregated into this failure.
    pub count: u64,
    /// At most three example contexts, formatted as `record N: message`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<String>,
}

/// Build a stub report with base fields filled and empty aggregates.
///
/// # Examples
/// ```
/// use beaconlens_core::make_stub_report;
///
/// let report = make_stub_report("scan.hex", 123);
/// assert!(report.beacons.is_empty());
/// ```
pub fn make_stub_report(input_path: &str, input_bytes: u64) -> Report {
    Report {
        report_version: REPORT_VERSION,
        tool: ToolInfo {
            name: "beaconlens".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        generated_at: DEFAULT_GENERATED_AT.to_string(),
        input: InputInfo {
            path: input_path.to_string(),
            bytes: input_bytes,
        },
        summary: ScanSummary::default(),
        beacons: vec![],
        failures: vec![],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_omits_optional_fields_when_none() {
        let mut report = make_stub_report("scan.hex", 1);
        report.summary.advertisements_total = 1;
        report.summary.decoded_total = 1;
        report.summary.uid_frames = 1;
        report.beacons.push(BeaconSummary {
            record: 1,
            kind: "uid".to_string(),
            address: None,
            rssi: None,
            flags: None,
            ranging_data: Some(-18),
            namespace_id: Some("00:01:02:03:04:05:06:07:08:09".to_string()),
            instance_id: Some("AA:BB:CC:DD:EE:FF".to_string()),
            tx_power: None,
            url: None,
            tlm_version: None,
            battery_millivolts: None,
            temperature_c: None,
            advertisement_count: None,
            uptime_s: None,
        });
        report.failures.push(DecodeFailure {
            id: "BL-ADV-NOT-FOUND".to_string(),
            count: 2,
            examples: vec![],
        });

        let value = serde_json::to_value(&report).expect("report json");
        let beacon = &value["beacons"][0];
        assert!(beacon.get("address").is_none());
        assert!(beacon.get("rssi").is_none());
        assert!(beacon.get("flags").is_none());
        assert!(beacon.get("url").is_none());
        assert_eq!(beacon["ranging_data"], -18);

        let failure = &value["failures"][0];
        assert!(failure.get("examples").is_none());
        assert_eq!(failure["count"], 2);
    }

    #[test]
    fn report_round_trips_through_json() {
        let report = make_stub_report("scan.hex", 42);
        let json = serde_json::to_string(&report).expect("serialize");
        let parsed: Report = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed.input.bytes, 42);
        assert_eq!(parsed.tool.name, "beaconlens");
    }
}
