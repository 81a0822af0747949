/// Lengths at or below this are treated as zero.
pub(crate) const NEARLY_ZERO: f64 = 1.0 / 4096.0;

/// 32-bit linear congruential generator used for deterministic jitter.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Lcg32(u32);

impl Lcg32 {
    const MUL: u32 = 1_664_525;
    const ADD: u32 = 1_013_904_223;

    pub(crate) fn new(seed: u32) -> Self {
        Self(seed)
    }

    /// Mixes a seed with its 16-bit rotation before seeding.
    pub(crate) fn new_mixed(seed: u32) -> Self {
        Self::new(seed ^ seed.rotate_left(16))
    }

    pub(crate) fn next_u32(&mut self) -> u32 {
        self.0 = self.0.wrapping_mul(Self::MUL).wrapping_add(Self::ADD);
        self.0
    }

    /// Uniform value in `[-1, 1)` with 16 fractional bits.
    pub(crate) fn next_signed_unit(&mut self) -> f64 {
        let fixed = (self.next_u32() as i32) >> 15;
        f64::from(fixed) / 65536.0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
