use std::fs;
use std::path::Path;

use beaconlens_core::{Report, analyze_dump_file};

fn load_expected_report(dir: &str) -> Report {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("..").join("..");
    let expected_path = root.join(dir).join("expected_report.json");

    let expected_json = fs::read_to_string(&expected_path).expect("read expected_report.json");
    serde_json::from_str(&expected_json).expect("parse expected report")
}

fn run_golden(dir: &str) {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("..").join("..");
    let input = root.join(dir).join("input.hex");
    let expected = load_expected_report(dir);

    let mut actual = analyze_dump_file(&input).expect("analyze dump");
    actual.generated_at = expected.generated_at.clone();
    actual.input.path = expected.input.path.clone();

    let actual_value = serde_json::to_value(actual).expect("serialize actual");
    let expected_value = serde_json::to_value(expected).expect("serialize expected");

    assert_eq!(actual_value, expected_value, "golden mismatch in {dir}");
}

#[test]
fn golden_uid() {
    run_golden("tests/golden/uid");
}

#[test]
fn golden_url() {
    run_golden("tests/golden/url");
}

#[test]
fn golden_tlm() {
    run_golden("tests/golden/tlm");
}

#[test]
fn golden_mixed_failures() {
    run_golden("tests/golden/mixed_failures");
}

#[test]
fn golden_skip_vendor() {
    run_golden("tests/golden/skip_vendor");
}

#[test]
fn golden_mixed_failures_counts() {
    let report = load_expected_report("tests/golden/mixed_failures");
    assert_eq!(report.summary.advertisements_total, 7);
    assert_eq!(report.summary.decoded_total, 2);
    assert_eq!(report.summary.uid_frames, 1);
    assert_eq!(report.summary.tlm_frames, 1);
    let ids: Vec<&str> = report
        .failures
        .iter()
        .map(|failure| failure.id.as_str())
        .collect();
    assert_eq!(
        ids,
        [
            "BL-ADV-NOT-FOUND",
            "BL-ADV-TRUNCATED",
            "BL-FRAME-INVALID-LENGTH",
            "BL-FRAME-UNRECOGNIZED",
            "BL-SVC-UNRECOGNIZED",
        ]
    );
}
