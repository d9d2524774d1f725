use crate::random::sequencer::Sequencer;

/// How run lengths are drawn when synthesising a buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum FillProfile {
    /// `1 << (next() % 10)` with random low bits OR-ed in: mostly short runs, occasionally
    /// up to 1023 bits. Used by the combination harness.
    Exponential,
    /// `next() % 64 + 1` bits. Used by the comparison harness.
    Uniform64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum RunKind {
    Zeros,
    Random,
    Ones,
}

impl RunKind {
    fn draw(seq: &mut Sequencer) -> Self {
        match seq.below(3) {
            0 => Self::Zeros,
            1 => Self::Random,
            _ => Self::Ones,
        }
    }
}

impl FillProfile {
    fn run_length(self, seq: &mut Sequencer) -> usize {
        match self {
            Self::Exponential => {
                let run = 1usize << seq.below(10);
                // The OR-ed draw is taken even when the mask is empty.
                run | (seq.next() as usize & (run - 1))
            }
            Self::Uniform64 => seq.below(64) as usize + 1,
        }
    }
}

/// Fill `words` with runs of all-zero, all-one and random bits, packed MSB-first into each word.
///
/// Random runs never take more than 16 bits from a single draw.
pub fn fill_biased(words: &mut [u32], profile: FillProfile, seq: &mut Sequencer) {
    let mut total_remain = words.len() * 32;
    if total_remain == 0 {
        return;
    }
    let mut out = words.iter_mut();
    let mut word = 0u32;
    let mut word_remain = 32usize;
    loop {
        let kind = RunKind::draw(seq);
        let mut run_remain = profile.run_length(seq).min(total_remain);
        loop {
            let mut bits = run_remain.min(word_remain);
            if kind == RunKind::Random && bits > 16 {
                bits = 16;
            }
            word = if bits == 32 { 0 } else { word << bits };
            let ones = ((1u64 << bits) - 1) as u32;
            match kind {
                RunKind::Zeros => {}
                RunKind::Ones => word |= ones,
                RunKind::Random => word |= seq.next() & ones,
            }
            total_remain -= bits;
            run_remain -= bits;
            word_remain -= bits;
            if word_remain == 0 {
                if let Some(slot) = out.next() {
                    *slot = word;
                }
                word_remain = 32;
            }
            if run_remain == 0 {
                break;
            }
        }
        if total_remain == 0 {
            break;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/random/fill.rs"]
mod tests;
