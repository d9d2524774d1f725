use super::*;
use crate::engine::reference::ReferenceEngine;
use crate::foundation::core::read_pixel;

#[test]
fn overlap_is_the_box_area_at_the_centre_and_zero_at_the_corners() {
    assert_eq!(expected_overlap(5, 5), 25);
    assert_eq!(expected_overlap(0, 0), 0);
    assert_eq!(expected_overlap(10, 10), 0);
    assert_eq!(expected_overlap(4, 7), 4 * 3);
}

#[test]
fn eight_bit_fixture_matches_the_classic_strides() {
    let f = BoxFixture::new(Depth::D8, true);
    assert_eq!(f.large.desc.pitch, 28);
    assert_eq!(f.small.desc.pitch, 16);
    assert_eq!(read_pixel(&f.large.words, &f.large.desc, 10, 10), 0xFF);
    assert_eq!(read_pixel(&f.large.words, &f.large.desc, 9, 10), 0);
    assert_eq!(read_pixel(&f.small.words, &f.small.desc, 9, 9), 0xFF);
    assert_eq!(read_pixel(&f.small.words, &f.small.desc, 10, 9), 0);
}

#[test]
fn reference_engine_passes_every_depth_and_endianness() {
    for depth in [Depth::D8, Depth::D16, Depth::D32] {
        for msb in [true, false] {
            let sweep = sweep_boxes(&mut ReferenceEngine, &BoxFixture::new(depth, msb));
            assert_eq!(sweep.cases, 11 * 11 * 3 * 2);
            assert!(sweep.passed(), "{}", sweep.mismatches[0]);
        }
    }
}

struct Constant(u32);

impl ComparisonEngine for Constant {
    fn name(&self) -> &str {
        "constant"
    }

    fn compare_colors(&mut self, _: &CompareOp, _: &[u32], _: &[u32]) -> u32 {
        self.0
    }
}

#[test]
fn a_wrong_engine_is_caught_at_every_other_offset() {
    let sweep = sweep_boxes(&mut Constant(25), &BoxFixture::new(Depth::D8, true));
    // Only (5, 5) has a full overlap: 3 rules × 2 orders agree there.
    assert_eq!(sweep.mismatches.len(), sweep.cases - 6);
    let text = sweep.mismatches[0].to_string();
    assert!(text.starts_with("Rule pixelMatch, width 15, height 15\n"), "{text}");
    assert!(text.contains("A: 8 bpp, big-endian, stride 28, x 0, y 0"), "{text}");
    assert!(text.ends_with("Result = 25, should be 0\n"), "{text}");
}
