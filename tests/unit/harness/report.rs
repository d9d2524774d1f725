use super::*;

fn sample() -> RunReport {
    RunReport {
        harness: HarnessKind::Combine,
        engine: "reference".to_string(),
        mode: RunMode::Checked { bound: 8 },
        iterations_run: 8,
        checkpoints_checked: 4,
        mismatches: vec![CheckpointMismatch {
            iterations: 1,
            expected: 0x5F9F_0D59,
            actual: 0x1234_5678,
        }],
        declined: 3,
        final_digest: 0xDEAD_BEEF,
    }
}

#[test]
fn json_carries_every_field() {
    let v: serde_json::Value = serde_json::from_str(&sample().to_json().unwrap()).unwrap();
    assert_eq!(v["harness"], "Combine");
    assert_eq!(v["engine"], "reference");
    assert_eq!(v["mode"]["Checked"]["bound"], 8);
    assert_eq!(v["mismatches"][0]["expected"], 0x5F9F_0D59u32);
    assert_eq!(v["declined"], 3);
    assert_eq!(v["final_digest"], 0xDEAD_BEEFu32);
}

#[test]
fn passed_tracks_mismatches() {
    let mut r = sample();
    assert!(!r.passed());
    r.mismatches.clear();
    assert!(r.passed());
}

#[test]
fn write_json_creates_parent_dirs() {
    let dir = std::env::temp_dir().join(format!("blitcheck-report-{}", std::process::id()));
    let path = dir.join("nested").join("report.json");
    let _ = std::fs::remove_dir_all(&dir);
    sample().write_json(&path).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("\"iterations_run\": 8"));
    let _ = std::fs::remove_dir_all(&dir);
}
