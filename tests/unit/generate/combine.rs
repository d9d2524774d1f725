use super::*;
use proptest::prelude::*;

fn case(iteration: usize) -> CombineCase {
    generate_combine_case(&mut Sequencer::for_iteration(iteration))
}

fn check_invariants(case: &CombineCase) {
    let op = &case.op;
    assert!(op.width >= 1 && op.height >= 1);
    assert!(op.src.x + op.width <= case.src_extent.width);
    assert!(op.dest.x + op.width <= case.dest_extent.width);
    assert!(op.src.y + op.height <= case.src_extent.height);
    assert!(op.dest.y + op.height <= case.dest_extent.height);
    op.src.check_rect(op.width, op.height, BUFFER_WORDS).unwrap();
    op.dest.check_rect(op.width, op.height, BUFFER_WORDS).unwrap();
    assert!(case.dest_region_bytes() <= BUFFER_WORDS * 4);

    if op.src.depth != op.dest.depth && (op.src.depth < Depth::D16 || op.dest.depth < Depth::D16) {
        assert!(op.color_map.indexed.is_some(), "{case}");
    }
    if let Some(ix) = op.color_map.indexed {
        assert_eq!(ix.table, op.dest.depth);
    }
    if op.src.depth == op.dest.depth && op.color_map.indexed.is_none() {
        assert!(!op.color_map.is_present());
    }
    if op.rule.ignores_halftone() {
        assert!(op.halftone.is_none());
    }
    if let Some(h) = op.halftone {
        assert!((1..=12).contains(&h.height));
    }
    match op.options {
        RuleOptions::SourceAlpha(_) => assert!(op.rule.takes_source_alpha()),
        RuleOptions::ComponentAlpha { color, .. } => {
            assert_eq!(op.rule, CombinationRule::RgbComponentAlpha);
            assert!(color <= 0xFF_FFFF);
        }
        RuleOptions::None => {
            assert!(!op.rule.takes_source_alpha());
            assert_ne!(op.rule, CombinationRule::RgbComponentAlpha);
        }
    }
    if matches!(
        op.rule,
        CombinationRule::AlphaBlend | CombinationRule::AlphaBlendScaled
    ) {
        assert_eq!(op.src.depth, Depth::D32);
        assert_eq!(op.dest.depth, Depth::D32);
    }
}

#[test]
fn same_iteration_same_case() {
    for i in [0, 1, 7, 4096, 1_048_575] {
        assert_eq!(case(i), case(i));
    }
}

#[test]
fn extents_are_the_first_four_draws() {
    let mut seq = Sequencer::for_iteration(123);
    let src_w = seq.below(3840) as usize + 1;
    let src_h = seq.below(16) as usize + 1;
    let dest_w = seq.below(3840) as usize + 1;
    let dest_h = seq.below(16) as usize + 1;
    let c = case(123);
    assert_eq!(c.src_extent, Extent { width: src_w, height: src_h });
    assert_eq!(c.dest_extent, Extent { width: dest_w, height: dest_h });
}

#[test]
fn first_thousand_cases_are_well_formed() {
    for i in 0..1000 {
        check_invariants(&case(i));
    }
}

#[test]
fn component_alpha_runs_below_thirty_two_bits() {
    let narrow = (0..20_000)
        .map(case)
        .filter(|c| c.op.rule == CombinationRule::RgbComponentAlpha)
        .any(|c| c.op.dest.depth != Depth::D32);
    assert!(narrow);
}

#[test]
fn generation_covers_every_depth_and_both_endiannesses() {
    let mut depths = std::collections::BTreeSet::new();
    let mut lsb = false;
    for i in 0..2000 {
        let c = case(i);
        depths.insert(c.op.src.depth);
        depths.insert(c.op.dest.depth);
        lsb |= !c.op.src.msb || !c.op.dest.msb;
    }
    assert_eq!(depths.len(), 6);
    assert!(lsb);
}

#[test]
fn narrowing_never_yields_zero() {
    for i in 0..64 {
        let mut seq = Sequencer::for_iteration(i);
        for width in [1, 2, 3, 17, 3840] {
            let w = narrow_width(&mut seq, width);
            assert!((1..=width).contains(&w));
        }
    }
}

#[test]
fn fixture_tables_are_masked_and_reproducible() {
    let a = CombineFixture::generate();
    assert!(a.lookup.table(Depth::D1).iter().all(|&v| v <= 1));
    assert!(a.lookup.table(Depth::D8).iter().all(|&v| v <= 0xFF));
    assert!(a.lookup.table(Depth::D32).iter().any(|&v| v > 0x7FFF_FFFF));
    assert_eq!(a.src.len(), BUFFER_WORDS);
    let b = CombineFixture::generate();
    assert_eq!(a.src, b.src);
    assert_eq!(a.dest_init, b.dest_init);
    assert_eq!(a.gamma, b.gamma);
    assert_ne!(a.src, a.dest_init);
}

proptest! {
    #[test]
    fn any_iteration_is_well_formed(iteration in 0usize..(1 << 21)) {
        check_invariants(&case(iteration));
    }
}
