use alloc::boxed::Box;
use alloc::vec;

use crate::jsf::Jsf64;
use crate::limbs::{mul_wide, Limbs};

// WideMcg features
// -multiplicative congruential generator over an arbitrary fixed number of limbs
// -next state is the high half of the full double-width product,
//  discarding the statistically weak low half
// -one wide multiplication is amortized over one output word per state limb
// -two resident product buffers alternate roles, so the hot path never allocates

/// Wide truncated multiplicative congruential RNG.
/// 64-bit output, state width chosen at construction.
#[derive(Clone)]
pub struct WideMcg {
    /// Product buffers of 2S limbs each. The high half of the active
    /// buffer holds the current S-limb state.
    buffers: [Box<[u64]>; 2],
    /// Fixed odd multiplier of S limbs.
    multiplier: Box<[u64]>,
    /// Index of the active buffer.
    active: usize,
    /// Count of state limbs already emitted as output.
    limb: usize,
}

// As recommended, this Debug implementation does not expose internal state.
impl core::fmt::Debug for WideMcg {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "WideMcg {{}}")
    }
}

impl WideMcg {

    /// Creates a new WideMcg RNG with the given even number of state limbs,
    /// drawing one uniform word per limb of state and multiplier from the sampler.
    /// Both operands are forced odd, keeping them units modulo the power-of-two
    /// modulus.
    pub fn new<R: RngCore>(rng: &mut R, limbs: usize) -> Self {
        assert!(limbs > 0 && limbs % 2 == 0, "limb count must be even and nonzero");
        let mut buffer0 = vec![0u64; 2 * limbs].into_boxed_slice();
        let buffer1 = vec![0u64; 2 * limbs].into_boxed_slice();
        let mut multiplier = vec![0u64; limbs].into_boxed_slice();
        buffer0.high_mut().randomize(rng);
        buffer0.high_mut().make_odd();
        multiplier.randomize(rng);
        multiplier.make_odd();
        // The cursor starts exhausted so that the first output
        // comes from a fresh product.
        WideMcg {
            buffers: [buffer0, buffer1],
            multiplier,
            active: 0,
            limb: limbs,
        }
    }

    /// Creates a new WideMcg RNG with the given even number of state limbs,
    /// sampling the operands from a JSF64 stream seeded with the given seed.
    pub fn from_seed(seed: u64, limbs: usize) -> Self {
        let mut sampler = Jsf64::from_seed(seed);
        Self::new(&mut sampler, limbs)
    }

    /// Returns the number of state limbs.
    #[inline]
    pub fn limbs(&self) -> usize {
        self.multiplier.len()
    }

    /// View of the current S-limb state.
    #[inline]
    fn state(&self) -> &[u64] {
        self.buffers[self.active].high()
    }

    /// Advances to the next state: multiplies the state by the multiplier
    /// into the inactive buffer, then swaps buffer roles. The high half of
    /// the product becomes the state, the low half is never emitted.
    pub fn advance(&mut self) {
        let [buffer0, buffer1] = &mut self.buffers;
        let (source, destination) = if self.active == 0 {
            (&**buffer0, &mut **buffer1)
        } else {
            (&**buffer1, &mut **buffer0)
        };
        mul_wide(destination, source.high(), &self.multiplier);
        self.active ^= 1;
        self.limb = 0;
    }

    /// Generates the next 64-bit random number.
    #[inline]
    pub fn next(&mut self) -> u64 {
        if self.limb == self.limbs() {
            self.advance();
        }
        let x = self.state()[self.limb];
        self.limb += 1;
        x
    }
}

// Two generators are equal iff they are about to produce the same output
// stream: logical state, multiplier and output cursor all match.
// Buffer identity and scratch contents do not participate.
impl PartialEq for WideMcg {
    fn eq(&self, other: &Self) -> bool {
        self.state() == other.state()
            && self.multiplier == other.multiplier
            && self.limb == other.limb
    }
}

impl Eq for WideMcg {}

use super::{RngCore, Error};

impl RngCore for WideMcg {
    fn next_u32(&mut self) -> u32 {
        self.next() as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.next()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        let bytes = dest.len();
        let mut i = 0;
        while i < bytes {
            let x = self.next();
            let j = bytes.min(i + 8);
            // Always use Little-Endian.
            dest[i .. j].copy_from_slice(&x.to_le_bytes()[0 .. (j - i)]);
            i = j;
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        Ok(self.fill_bytes(dest))
    }
}
