use super::*;

fn render(words: &[u32], per_row: usize, rows: usize, depth: Depth, msb: bool) -> String {
    let mut out = Vec::new();
    dump_buffer(&mut out, words, per_row, rows, depth, msb).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn one_bit_pixels_print_as_digits_msb_first() {
    let text = render(&[0xA000_0001], 1, 1, Depth::D1, true);
    assert_eq!(text, format!("1 0 1 {}1\n", "0 ".repeat(28)));
}

#[test]
fn byte_pixels_honour_endianness() {
    assert_eq!(render(&[0x1122_33F4], 1, 1, Depth::D8, true), "11 22 33 F4\n");
    assert_eq!(render(&[0x1122_33F4], 1, 1, Depth::D8, false), "F4 33 22 11\n");
}

#[test]
fn nibbles_print_one_hex_digit() {
    assert_eq!(
        render(&[0x0123_4ABC], 1, 1, Depth::D4, true),
        "0 1 2 3 4 A B C\n"
    );
}

#[test]
fn rows_split_on_word_count() {
    let text = render(&[1, 2, 3, 4, 5, 6], 2, 2, Depth::D32, true);
    assert_eq!(text, "00000001 00000002\n00000003 00000004\n");
    let text = render(&[0x0001_FFFF], 1, 1, Depth::D16, false);
    assert_eq!(text, "FFFF 0001\n");
}
