/// Pseudo-random numbers keyed by world position instead of call order.
///
/// Every output is a pure function of `(seed, x)`: asking twice for the same
/// position yields the same bits, so terrain can be regenerated anywhere
/// without remembering what was generated before. Nearby positions are not
/// correlated; a tiny change in `x` may jump anywhere in the range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PositionalRng {
    seed: i32,
}

impl PositionalRng {
    pub fn new(seed: i32) -> Self {
        Self { seed }
    }

    pub fn seed(&self) -> i32 {
        self.seed
    }

    /// A generator with an independent stream, derived from this seed.
    pub fn salted(&self, salt: i32) -> Self {
        Self::new(self.seed ^ salt)
    }

    /// Integer hash of `x`.
    ///
    /// `floor(cos(seed * x) * i32::MAX)` with its 16-bit halves swapped and
    /// the lowest bit flipped. Evaluated in double precision.
    pub fn int_hash(&self, x: f64) -> i32 {
        let w = ((self.seed as f64 * x).cos() * i32::MAX as f64).floor() as i32;
        w.rotate_left(16) ^ 1
    }

    /// Value in `[min, max)`, give or take `1.2e-10 * (max - min)` below `min`.
    ///
    /// The hash is shifted by `i32::MAX` with wrapping 32-bit arithmetic,
    /// divided by `u32::MAX` and offset by one half. Wrapping folds the
    /// upper half of the hash range below the lower one, which is what keeps
    /// the offset result inside the unit interval.
    pub fn range_float(&self, x: f64, min: f64, max: f64) -> f64 {
        let w = self.int_hash(x);
        let normalized = w.wrapping_add(i32::MAX) as f64 / u32::MAX as f64 + 0.5;
        normalized * (max - min) + min
    }

    /// [`range_float`](Self::range_float) truncated toward zero.
    pub fn range_int(&self, x: f64, min: i32, max: i32) -> i32 {
        self.range_float(x, min as f64, max as f64) as i32
    }
}
