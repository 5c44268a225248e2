/// SplitMix64 generator used for seeded stagger shuffles.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Rng64 {
    state: u64,
}

impl Rng64 {
    pub(crate) fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    pub(crate) fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform integer in `[0, bound)`. `bound` must be non-zero.
    pub(crate) fn next_below(&mut self, bound: u64) -> u64 {
        debug_assert!(bound > 0);
        // Widening multiply keeps the bias negligible for the small bounds used here.
        ((u128::from(self.next_u64()) * u128::from(bound)) >> 64) as u64
    }
}

/// Apply GSAP-style edge resistance to a value dragged past `[min, max]`.
///
/// `resistance` in `[0, 1]`: 0 moves freely past the bound, 1 pins to the bound.
pub(crate) fn resist(value: f64, min: f64, max: f64, resistance: f64) -> f64 {
    let keep = 1.0 - resistance.clamp(0.0, 1.0);
    if value > max {
        max + (value - max) * keep
    } else if value < min {
        min - (min - value) * keep
    } else {
        value
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
