//! XorShift128 generator with a fixed, host-independent recurrence.
//!
//! Every random decision in the pipeline is drawn from one instance, in one
//! fixed call order, so a given seed always produces the same map.

use rand::{Error, RngCore, SeedableRng};

const X0: u32 = 123_456_789;
const Y0: u32 = 362_436_069;
const Z0: u32 = 521_288_629;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeededRandom {
    x: u32,
    y: u32,
    z: u32,
    w: u32,
}

impl SeededRandom {
    pub fn new(seed: u32) -> Self {
        Self {
            x: X0,
            y: Y0,
            z: Z0,
            w: seed,
        }
    }

    fn step(&mut self) -> u32 {
        let t = self.x ^ (self.x << 11);
        self.x = self.y;
        self.y = self.z;
        self.z = self.w;
        self.w = (self.w ^ (self.w >> 19)) ^ (t ^ (t >> 8));
        self.w
    }

    /// Next raw value as a signed 32-bit integer
    pub fn next(&mut self) -> i32 {
        self.step() as i32
    }

    /// Uniform integer in `[min, max]`, both ends inclusive
    pub fn next_int(&mut self, min: i64, max: i64) -> i64 {
        let r = self.next().unsigned_abs() as i64;
        let span = max - min + 1;
        if span <= 0 {
            return min;
        }
        min + r % span
    }

    /// Fair coin: `true` when `next_int(0, 1)` yields 0
    pub fn coin(&mut self) -> bool {
        self.next_int(0, 1) == 0
    }
}

impl RngCore for SeededRandom {
    fn next_u32(&mut self) -> u32 {
        self.step()
    }

    fn next_u64(&mut self) -> u64 {
        let hi = self.step() as u64;
        let lo = self.step() as u64;
        (hi << 32) | lo
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.step().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for SeededRandom {
    type Seed = [u8; 4];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u32::from_le_bytes(seed))
    }

    fn seed_from_u64(state: u64) -> Self {
        Self::new(state as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn reference_values() {
        let mut rng = SeededRandom::new(1);
        let expected: [i32; 5] = [-638953871, 504890836, -1873192399, -1873199053, 462149015];
        for exp in expected {
            assert_eq!(rng.next(), exp);
        }
    }

    #[test]
    fn reference_next_int() {
        let mut rng = SeededRandom::new(1);
        let expected: [i64; 5] = [71, 36, 99, 53, 15];
        for exp in expected {
            assert_eq!(rng.next_int(0, 99), exp);
        }
    }

    #[test]
    fn int_range_is_inclusive() {
        let mut rng = SeededRandom::new(7);
        let mut seen = [false; 3];
        for _ in 0..1000 {
            let v = rng.next_int(1, 3);
            assert!((1..=3).contains(&v));
            seen[(v - 1) as usize] = true;
        }
        assert!(seen.iter().all(|&s| s), "every value in range is reachable");
    }

    #[test]
    fn absolute_value_of_min_does_not_overflow() {
        // Force w to i32::MIN and check the next draw stays in range
        let mut rng = SeededRandom {
            x: 0,
            y: 0,
            z: 0,
            w: 0x8000_0000,
        };
        assert_eq!(rng.clone().next(), (0x8000_0000u32 ^ (0x8000_0000u32 >> 19)) as i32);
        let v = rng.next_int(0, 99);
        assert!((0..=99).contains(&v));
    }

    #[test]
    fn works_as_rand_rng() {
        let mut a = SeededRandom::seed_from_u64(42);
        let mut b = SeededRandom::new(42);
        assert_eq!(a.next_u32(), b.next() as u32);
        let v: u8 = a.gen_range(0..10);
        assert!(v < 10);
    }
}
