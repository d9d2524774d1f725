//! Reseedable pseudo-random draw stream.
//!
//! The golden digests were produced with the C library `rand()` found on glibc systems, which
//! is the TYPE_3 additive feedback generator (`r[i] = r[i-3] + r[i-31]`, low bit discarded)
//! seeded through a Park-Miller minimal standard LCG. The algorithm and every draw made from it
//! are part of the regression contract: a single extra or missing draw shifts every later value.

const DEGREE: usize = 31;
const SEPARATION: usize = 3;
const DISCARD: usize = DEGREE * 10;

/// Largest value [`Sequencer::next`] can return.
pub const RAND_MAX: u32 = 0x7FFF_FFFF;

/// Seed used for iteration `iteration` of a harness run.
///
/// The C harnesses pass a `size_t` expression to an `unsigned int` parameter, so the value is
/// truncated to 32 bits.
pub fn iteration_seed(iteration: usize) -> u32 {
    (iteration ^ (iteration << 16)) as u32
}

/// Explicit draw stream threaded through every generation step.
#[derive(Clone, Debug)]
pub struct Sequencer {
    state: [i32; DEGREE],
    front: usize,
    rear: usize,
}

impl Sequencer {
    /// A stream in the state produced by `srand(seed)`.
    pub fn new(seed: u32) -> Self {
        let mut s = Self {
            state: [0; DEGREE],
            front: SEPARATION,
            rear: 0,
        };
        s.seed(seed);
        s
    }

    /// A stream seeded for one harness iteration.
    pub fn for_iteration(iteration: usize) -> Self {
        Self::new(iteration_seed(iteration))
    }

    /// Reset to the deterministic state for `seed`. Seed 0 behaves like seed 1.
    pub fn seed(&mut self, seed: u32) {
        let seed = if seed == 0 { 1 } else { seed };
        let mut word = seed as i32;
        self.state[0] = word;
        for slot in 1..DEGREE {
            // 16807 * word % 2147483647 without overflowing 31 bits.
            let hi = word / 127_773;
            let lo = word % 127_773;
            word = 16_807 * lo - 2_836 * hi;
            if word < 0 {
                word += 2_147_483_647;
            }
            self.state[slot] = word;
        }
        self.front = SEPARATION;
        self.rear = 0;
        for _ in 0..DISCARD {
            self.next();
        }
    }

    /// Next value in `0..=RAND_MAX`.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> u32 {
        let val = (self.state[self.front] as u32).wrapping_add(self.state[self.rear] as u32);
        self.state[self.front] = val as i32;
        self.front += 1;
        if self.front >= DEGREE {
            self.front = 0;
            self.rear += 1;
        } else {
            self.rear += 1;
            if self.rear >= DEGREE {
                self.rear = 0;
            }
        }
        val >> 1
    }

    /// `next() % bound`, the idiom the harness uses for bounded draws.
    pub fn below(&mut self, bound: u32) -> u32 {
        self.next() % bound
    }

    /// `next() & 1 != 0`.
    pub fn coin(&mut self) -> bool {
        self.next() & 1 != 0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/random/sequencer.rs"]
mod tests;
