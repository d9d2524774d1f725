use super::*;

#[test]
fn checkpoints_are_one_less_than_powers_of_two() {
    let found: Vec<usize> = (0..70).filter(|&i| is_checkpoint(i)).collect();
    assert_eq!(found, vec![0, 1, 3, 7, 15, 31, 63]);
}

#[test]
fn golden_tables_cover_default_bounds() {
    assert_eq!(COMBINE_GOLDEN.len(), 21);
    assert_eq!(COMPARE_GOLDEN.len(), 20);
}

#[test]
fn xor_and_crc_accumulators_differ() {
    assert_eq!(Accumulator::Xor.fold(0xF0F0_0000, 0x0F0F_0000), 0xFFFF_0000);
    assert_eq!(
        Accumulator::Crc.fold(0, 0x0403_0201),
        crc32(0, &[1, 2, 3, 4])
    );
}

static SMALL_GOLDEN: [u32; 3] = [1, 1 ^ 2, 1 ^ 2 ^ 3 ^ 4];

#[test]
fn tracker_passes_when_values_reproduce_the_table() {
    let mut t = CheckpointTracker::new(&SMALL_GOLDEN, Accumulator::Xor);
    for (i, v) in [1u32, 2, 3, 4].into_iter().enumerate() {
        assert_eq!(t.record(i, v), None);
    }
    assert!(t.passed());
    assert_eq!(t.checked(), 3);
    assert_eq!(t.running(), 1 ^ 2 ^ 3 ^ 4);
}

#[test]
fn tracker_keeps_going_after_a_mismatch() {
    let mut t = CheckpointTracker::new(&SMALL_GOLDEN, Accumulator::Xor);
    let first = t.record(0, 9).expect("first checkpoint must fail");
    assert_eq!(first.iterations, 1);
    assert_eq!(first.expected, 1);
    assert_eq!(first.actual, 9);
    // Later checkpoints still get compared, against the poisoned running value.
    assert!(t.record(1, 2).is_some());
    assert_eq!(t.record(2, 3), None);
    assert!(t.record(3, 4).is_some());
    assert_eq!(t.mismatches().len(), 3);
    assert_eq!(t.checked(), 3);
}

#[test]
fn tracker_stops_checking_past_the_table() {
    let mut t = CheckpointTracker::new(&SMALL_GOLDEN, Accumulator::Xor);
    for (i, v) in [1u32, 2, 3, 4, 5, 6, 7, 8].into_iter().enumerate() {
        t.record(i, v);
    }
    assert_eq!(t.checked(), 3);
    assert!(t.passed());
}

#[test]
fn mismatch_message_names_iteration_and_digests() {
    let m = CheckpointMismatch {
        iterations: 64,
        expected: 0x4339_E41B,
        actual: 0x1,
    };
    assert_eq!(
        m.to_string(),
        "Error found before iteration      64: cumulative CRC 00000001 should be 4339E41B"
    );
}
