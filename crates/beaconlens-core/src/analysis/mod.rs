use std::path::Path;

use thiserror::Error;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

use crate::protocols::eddystone::{DecodedAdvertisement, DecodedFrame, decode_advertisement};
use crate::source::{AdvertisementEvent, AdvertisementSource, HexDumpSource, SourceError};
use crate::{BeaconSummary, DEFAULT_GENERATED_AT, Report, make_stub_report};

mod failures;

use failures::FailureStats;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Source error: {0}")]
    Source(#[from] SourceError),
}

pub fn analyze_dump_file(path: &Path) -> Result<Report, AnalysisError> {
    let source = HexDumpSource::open(path)?;
    analyze_source(path, source)
}

pub fn analyze_source<S: AdvertisementSource>(
    path: &Path,
    mut source: S,
) -> Result<Report, AnalysisError> {
    let mut report = make_stub_report(&path.display().to_string(), path.metadata()?.len());
    let mut failures = FailureStats::new();

    while let Some(event) = source.next_advertisement()? {
        report.summary.advertisements_total += 1;
        match decode_advertisement(&event.data) {
            Ok(decoded) => {
                report.summary.decoded_total += 1;
                match decoded.frame {
                    DecodedFrame::Uid(_) => report.summary.uid_frames += 1,
                    DecodedFrame::Url(_) => report.summary.url_frames += 1,
                    DecodedFrame::Tlm(_) => report.summary.tlm_frames += 1,
                }
                report.beacons.push(build_beacon_summary(&event, &decoded));
            }
            Err(err) => failures.add(event.record, &err),
        }
    }

    report.generated_at = generated_at();
    report.failures = failures.into_summaries();
    Ok(report)
}

fn build_beacon_summary(
    event: &AdvertisementEvent,
    decoded: &DecodedAdvertisement,
) -> BeaconSummary {
    let mut summary = BeaconSummary {
        record: event.record,
        kind: decoded.frame.kind().to_string(),
        address: event.address.clone(),
        rssi: event.rssi,
        flags: decoded.flags,
        ranging_data: None,
        namespace_id: None,
        instance_id: None,
        tx_power: None,
        url: None,
        tlm_version: None,
        battery_millivolts: None,
        temperature_c: None,
        advertisement_count: None,
        uptime_s: None,
    };
    match &decoded.frame {
        DecodedFrame::Uid(uid) => {
            summary.ranging_data = Some(uid.ranging_data);
            summary.namespace_id = Some(uid.namespace_hex());
            summary.instance_id = Some(uid.instance_hex());
        }
        DecodedFrame::Url(url) => {
            summary.tx_power = Some(url.tx_power);
            summary.url = Some(url.url.clone());
        }
        DecodedFrame::Tlm(tlm) => {
            summary.tlm_version = Some(tlm.version);
            summary.battery_millivolts = Some(tlm.battery_millivolts);
            summary.temperature_c = Some(f64::from(tlm.temperature));
            summary.advertisement_count = Some(tlm.advertisement_count);
            summary.uptime_s = Some(tlm.uptime_seconds());
        }
    }
    summary
}

fn generated_at() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| DEFAULT_GENERATED_AT.to_string())
}

#[cfg(test)]
mod tests {
    use super::build_beacon_summary;
    use crate::protocols::eddystone::{
        DecodedAdvertisement, DecodedFrame, TlmFrame, UidFrame, UrlFrame,
    };
    use crate::source::AdvertisementEvent;

    fn event() -> AdvertisementEvent {
        AdvertisementEvent {
            record: 4,
            address: Some("AA:BB:CC:DD:EE:01".to_string()),
            rssi: Some(-71),
            data: vec![],
        }
    }

    fn decoded(frame: DecodedFrame) -> DecodedAdvertisement {
        DecodedAdvertisement {
            flags: Some(0x06),
            service_uuid: 0xFEAA,
            frame,
        }
    }

    #[test]
    fn uid_summary_formats_identifiers() {
        let frame = DecodedFrame::Uid(UidFrame {
            ranging_data: -18,
            namespace_id: [0, 1, 2, 3, 4, 5, 6, 7, 8, 9],
            instance_id: [0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF],
        });
        let summary = build_beacon_summary(&event(), &decoded(frame));
        assert_eq!(summary.record, 4);
        assert_eq!(summary.kind, "uid");
        assert_eq!(summary.rssi, Some(-71));
        assert_eq!(summary.flags, Some(0x06));
        assert_eq!(
            summary.namespace_id.as_deref(),
            Some("00:01:02:03:04:05:06:07:08:09")
        );
        assert_eq!(summary.instance_id.as_deref(), Some("AA:BB:CC:DD:EE:FF"));
        assert_eq!(summary.url, None);
        assert_eq!(summary.tlm_version, None);
    }

    #[test]
    fn url_summary_carries_expanded_url() {
        let frame = DecodedFrame::Url(UrlFrame {
            tx_power: -7,
            url: "http://www.example.com".to_string(),
        });
        let summary = build_beacon_summary(&event(), &decoded(frame));
        assert_eq!(summary.kind, "url");
        assert_eq!(summary.tx_power, Some(-7));
        assert_eq!(summary.url.as_deref(), Some("http://www.example.com"));
        assert_eq!(summary.namespace_id, None);
    }

    #[test]
    fn tlm_summary_converts_units() {
        let frame = DecodedFrame::Tlm(TlmFrame {
            version: 0,
            battery_millivolts: 3700,
            temperature: 20.5,
            advertisement_count: 10,
            uptime_deciseconds: 128,
        });
        let summary = build_beacon_summary(&event(), &decoded(frame));
        assert_eq!(summary.kind, "tlm");
        assert_eq!(summary.battery_millivolts, Some(3700));
        assert_eq!(summary.temperature_c, Some(20.5));
        assert_eq!(summary.uptime_s, Some(12));
    }
}
