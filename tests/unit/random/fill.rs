use super::*;

fn filled(len: usize, profile: FillProfile, seed: u32) -> Vec<u32> {
    let mut words = vec![0xDEAD_BEEF; len];
    let mut seq = Sequencer::new(seed);
    fill_biased(&mut words, profile, &mut seq);
    words
}

#[test]
fn same_seed_same_words() {
    for profile in [FillProfile::Exponential, FillProfile::Uniform64] {
        assert_eq!(filled(257, profile, 7), filled(257, profile, 7));
    }
}

#[test]
fn different_seeds_differ() {
    assert_ne!(
        filled(64, FillProfile::Exponential, 1),
        filled(64, FillProfile::Exponential, 2)
    );
}

#[test]
fn every_word_is_written() {
    // A fill can legitimately produce this pattern, but not for every word of a long buffer.
    let words = filled(1024, FillProfile::Uniform64, 3);
    assert!(words.iter().any(|&w| w != 0xDEAD_BEEF));
    let words = filled(1024, FillProfile::Exponential, 3);
    assert!(words.iter().filter(|&&w| w == 0xDEAD_BEEF).count() < 4);
}

#[test]
fn exponential_profile_produces_homogeneous_words() {
    let words = filled(4096, FillProfile::Exponential, 11);
    let zeros = words.iter().filter(|&&w| w == 0).count();
    let ones = words.iter().filter(|&&w| w == u32::MAX).count();
    // Runs of up to 1023 bits leave many whole words uniform.
    assert!(zeros > 100, "only {zeros} all-zero words");
    assert!(ones > 100, "only {ones} all-one words");
}

#[test]
fn fill_consumes_a_deterministic_number_of_draws() {
    let mut a = Sequencer::new(5);
    let mut b = Sequencer::new(5);
    let mut words = vec![0u32; 99];
    fill_biased(&mut words, FillProfile::Uniform64, &mut a);
    fill_biased(&mut words, FillProfile::Uniform64, &mut b);
    assert_eq!(a.next(), b.next());
}

#[test]
fn empty_buffer_draws_nothing() {
    let mut seq = Sequencer::new(9);
    let mut reference = seq.clone();
    fill_biased(&mut [], FillProfile::Exponential, &mut seq);
    assert_eq!(seq.next(), reference.next());
}
