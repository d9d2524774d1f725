//! Compiled-in golden digests and the checkpoint bookkeeping that compares against them.

use crate::oracle::crc::crc32;

/// Cumulative digests of the combination harness after the first `2^k` iterations.
pub static COMBINE_GOLDEN: [u32; 21] = [
    0x5F9F_0D59, // first 1
    0xBB82_76CE, // first 2
    0x4454_3305, // first 4
    0x1222_F3A8, // first 8
    0xF059_E545, // first 16
    0x727F_DBF4, // first 32
    0x4339_E41B, // first 64
    0x3176_4B3D, // first 128
    0xD738_3ADC, // first 256
    0x042D_C04A, // first 512
    0xE63B_7E24, // first 1024
    0x2766_2683, // first 2048
    0xC7ED_6D1A, // first 4096
    0x7624_A093, // first 8192
    0x6669_53EF, // first 16384
    0x9962_0736, // first 32768
    0xA904_469F, // first 65536
    0x30D0_9CB2, // first 131072
    0x7578_79CC, // first 262144
    0x71F9_7864, // first 524288
    0x42AD_160D, // first 1048576
];

/// Cumulative digests of the comparison harness after the first `2^k` iterations.
pub static COMPARE_GOLDEN: [u32; 20] = [
    0x066E_A0BC, // first 1
    0x178C_58C9, // first 2
    0x67E9_BB0A, // first 4
    0xBAB1_EAD3, // first 8
    0xEF3B_BE62, // first 16
    0x370A_2867, // first 32
    0xAFBB_1455, // first 64
    0xC204_7F34, // first 128
    0x7398_0AA9, // first 256
    0x3A5E_DD6E, // first 512
    0x8C11_E5F0, // first 1024
    0x70CD_9956, // first 2048
    0x2826_B20A, // first 4096
    0x3408_FE46, // first 8192
    0x290C_8B83, // first 16384
    0xFAAF_41CA, // first 32768
    0x5FC6_DE82, // first 65536
    0xA678_8B63, // first 131072
    0x008C_D456, // first 262144
    0x4F08_5D8E, // first 524288
];

/// How a per-iteration value is folded into the running digest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum Accumulator {
    /// `running ^= value` (combination harness: value is the destination CRC).
    Xor,
    /// `running = crc32(running, value.to_le_bytes())` (comparison harness: value is the
    /// engine's return value).
    Crc,
}

impl Accumulator {
    /// Fold `value` into `running`.
    pub fn fold(self, running: u32, value: u32) -> u32 {
        match self {
            Self::Xor => running ^ value,
            Self::Crc => crc32(running, &value.to_le_bytes()),
        }
    }
}

/// `true` for iterations `2^k - 1`, after which `2^k` iterations have been folded in.
pub fn is_checkpoint(iteration: usize) -> bool {
    iteration & iteration.wrapping_add(1) == 0
}

/// A checkpoint whose running digest differed from the golden value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct CheckpointMismatch {
    /// Iterations completed when the check ran.
    pub iterations: usize,
    /// Golden value.
    pub expected: u32,
    /// Running digest.
    pub actual: u32,
}

impl std::fmt::Display for CheckpointMismatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Error found before iteration {:7}: cumulative CRC {:08X} should be {:08X}",
            self.iterations, self.actual, self.expected
        )
    }
}

/// Running digest plus position in the golden table.
///
/// Mismatches are collected, never raised: a run reports every regression it can see.
#[derive(Clone, Debug)]
pub struct CheckpointTracker {
    golden: &'static [u32],
    accumulator: Accumulator,
    running: u32,
    next_index: usize,
    mismatches: Vec<CheckpointMismatch>,
}

impl CheckpointTracker {
    /// Start from a zero running digest.
    pub fn new(golden: &'static [u32], accumulator: Accumulator) -> Self {
        Self {
            golden,
            accumulator,
            running: 0,
            next_index: 0,
            mismatches: Vec::new(),
        }
    }

    /// Fold iteration `iteration`'s value in and check it if this is a checkpoint.
    ///
    /// Returns the mismatch when the check failed.
    pub fn record(&mut self, iteration: usize, value: u32) -> Option<CheckpointMismatch> {
        self.running = self.accumulator.fold(self.running, value);
        if self.next_index >= self.golden.len() || !is_checkpoint(iteration) {
            return None;
        }
        let expected = self.golden[self.next_index];
        self.next_index += 1;
        if self.running == expected {
            tracing::debug!(
                iterations = iteration + 1,
                digest = self.running,
                "checkpoint ok"
            );
            return None;
        }
        let mismatch = CheckpointMismatch {
            iterations: iteration + 1,
            expected,
            actual: self.running,
        };
        tracing::warn!(%mismatch, "checkpoint mismatch");
        self.mismatches.push(mismatch);
        Some(mismatch)
    }

    /// Current running digest.
    pub fn running(&self) -> u32 {
        self.running
    }

    /// Checkpoints compared so far.
    pub fn checked(&self) -> usize {
        self.next_index
    }

    /// Every mismatch seen so far.
    pub fn mismatches(&self) -> &[CheckpointMismatch] {
        &self.mismatches
    }

    /// `true` when no checkpoint has failed.
    pub fn passed(&self) -> bool {
        self.mismatches.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/oracle/golden.rs"]
mod tests;
