use super::*;

#[test]
fn fixed_part_expands_555_to_888() {
    // Pure red, green, blue in 15-bit colour.
    assert_eq!(MAP_5_8.apply(0x7C00), 0xF8_0000);
    assert_eq!(MAP_5_8.apply(0x03E0), 0x00_F800);
    assert_eq!(MAP_5_8.apply(0x001F), 0x00_00F8);
}

#[test]
fn fixed_part_truncates_888_to_555() {
    assert_eq!(MAP_8_5.apply(0x00FF_FFFF), 0x7FFF);
    assert_eq!(MAP_8_5.apply(0x0080_0000), 0x4000);
    assert_eq!(MAP_8_3.apply(0x00FF_FFFF), 0x01FF);
    assert_eq!(MAP_8_4.apply(0x00FF_FFFF), 0x0FFF);
    assert_eq!(MAP_5_3.apply(0x7FFF), 0x01FF);
    assert_eq!(MAP_5_4.apply(0x7FFF), 0x0FFF);
}

#[test]
fn colour_map_applies_fixed_then_indexed() {
    let mut table = vec![0u32; LOOKUP_ENTRIES];
    table[0x7FFF] = 0xABCD;
    let map = ColorMap {
        fixed: Some(&MAP_8_5),
        indexed: Some(IndexedPart {
            mask: 0x7FFF,
            table: Depth::D16,
        }),
    };
    assert!(map.is_present());
    assert_eq!(map.index_mask(), 0x7FFF);
    assert_eq!(map.map(0x00FF_FFFF, Some(&table)), 0xABCD);
    assert_eq!(ColorMap::NONE.map(0x1234, None), 0x1234);
    assert!(!ColorMap::NONE.is_present());
}

#[test]
fn generated_tables_respect_depth_masks() {
    let mut seq = Sequencer::new(0);
    let tables = LookupTables::generate(&mut seq);
    for depth in Depth::ALL {
        let table = tables.table(depth);
        assert_eq!(table.len(), LOOKUP_ENTRIES);
        assert!(table.iter().all(|&v| v & !depth.pixel_mask() == 0));
    }
    // 32-bit entries mix a second draw into the top half.
    assert!(tables.table(Depth::D32).iter().any(|&v| v & 0x8000_0000 != 0));
}

#[test]
fn table_generation_consumes_seven_draws_per_entry() {
    let mut a = Sequencer::new(0);
    let _ = LookupTables::generate(&mut a);
    let mut b = Sequencer::new(0);
    for _ in 0..LOOKUP_ENTRIES * 7 {
        b.next();
    }
    assert_eq!(a.next(), b.next());
}

#[test]
fn scoped_table_restores_on_drop() {
    let mut seq = Sequencer::new(0);
    let mut tables = LookupTables::generate(&mut seq);
    let before = tables.table(Depth::D8).to_vec();
    {
        let mut guard = tables.scoped(Depth::D8);
        guard.iter_mut().for_each(|v| *v = v.wrapping_add(1));
        assert_ne!(&guard[..], &before[..]);
    }
    assert_eq!(tables.table(Depth::D8), &before[..]);
}

#[test]
fn scoped_table_restores_during_unwind() {
    let mut tables = LookupTables::zeroed();
    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        let mut guard = tables.scoped(Depth::D4);
        guard[7] = 99;
        panic!("engine blew up");
    }));
    assert!(result.is_err());
    assert_eq!(tables.table(Depth::D4)[7], 0);
}

#[test]
fn gamma_tables_interleave_draws() {
    let mut seq = Sequencer::new(42);
    let tables = GammaTables::generate(&mut seq);
    let mut check = Sequencer::new(42);
    assert_eq!(tables.gamma[0], check.next() as u8);
    assert_eq!(tables.ungamma[0], check.next() as u8);
    assert_eq!(tables.gamma[1], check.next() as u8);
}
