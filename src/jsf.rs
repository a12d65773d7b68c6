use wrapping_arithmetic::wrappit;

// JSF (Jenkins Small Fast) features
// -chaotic ARX design by Bob Jenkins
// -state is four words of equal width, output is one word per step
// -one subtraction, one XOR, two additions and two or three rotations per step
// -rotation triples select statistically independent variants of the family
// -20 discarded warm-up steps at seeding erase structure from poor seeds

/// Rotation triple selecting a JSF variant.
/// A zero third rotation selects the two-rotation step.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Rotations {
    pub p: u32,
    pub q: u32,
    pub r: u32,
}

// The 32-bit rotation sets are all those suggested by Bob Jenkins.
// Each set produces a distinct and hopefully statistically independent sequence.

/// Two-rotation sets for 32-bit state words.
pub const JSF32_2ROT: [Rotations; 13] = [
    Rotations { p: 27, q: 17, r: 0 },
    Rotations { p: 9, q: 16, r: 0 },
    Rotations { p: 9, q: 24, r: 0 },
    Rotations { p: 10, q: 16, r: 0 },
    Rotations { p: 10, q: 24, r: 0 },
    Rotations { p: 11, q: 16, r: 0 },
    Rotations { p: 11, q: 24, r: 0 },
    Rotations { p: 25, q: 8, r: 0 },
    Rotations { p: 25, q: 16, r: 0 },
    Rotations { p: 26, q: 8, r: 0 },
    Rotations { p: 26, q: 16, r: 0 },
    Rotations { p: 26, q: 17, r: 0 },
    Rotations { p: 27, q: 16, r: 0 },
];

/// Three-rotation sets for 32-bit state words.
pub const JSF32_3ROT: [Rotations; 23] = [
    Rotations { p: 3, q: 14, r: 24 },
    Rotations { p: 3, q: 25, r: 15 },
    Rotations { p: 4, q: 15, r: 24 },
    Rotations { p: 6, q: 16, r: 28 },
    Rotations { p: 7, q: 16, r: 27 },
    Rotations { p: 8, q: 14, r: 3 },
    Rotations { p: 11, q: 16, r: 23 },
    Rotations { p: 12, q: 16, r: 22 },
    Rotations { p: 12, q: 17, r: 23 },
    Rotations { p: 13, q: 16, r: 22 },
    Rotations { p: 15, q: 25, r: 3 },
    Rotations { p: 16, q: 9, r: 3 },
    Rotations { p: 17, q: 9, r: 3 },
    Rotations { p: 17, q: 27, r: 7 },
    Rotations { p: 19, q: 7, r: 3 },
    Rotations { p: 23, q: 15, r: 11 },
    Rotations { p: 23, q: 16, r: 11 },
    Rotations { p: 23, q: 17, r: 11 },
    Rotations { p: 24, q: 3, r: 16 },
    Rotations { p: 24, q: 4, r: 16 },
    Rotations { p: 25, q: 14, r: 3 },
    Rotations { p: 27, q: 16, r: 6 },
    Rotations { p: 27, q: 16, r: 7 },
];

/// Two-rotation set for 64-bit state words.
pub const JSF64_2ROT: [Rotations; 1] = [Rotations { p: 39, q: 11, r: 0 }];

/// Three-rotation set for 64-bit state words.
pub const JSF64_3ROT: [Rotations; 1] = [Rotations { p: 7, q: 13, r: 37 }];

// Tiny width sets derived with a variant of Bob Jenkins' rngav.c.
// The tiny widths are for testing and specialized uses only.

/// Two-rotation set for 16-bit state words.
pub const JSF16_2ROT: [Rotations; 1] = [Rotations { p: 13, q: 8, r: 0 }];

/// Two-rotation set for 8-bit state words.
pub const JSF8_2ROT: [Rotations; 1] = [Rotations { p: 1, q: 4, r: 0 }];

macro_rules! jsf {
    ($(#[$attr:meta])* $name:ident, $state:ty, $output:ty, $default:expr) => {

        $(#[$attr])*
        #[derive(Clone, Eq, PartialEq)]
        pub struct $name {
            a: $state,
            b: $state,
            c: $state,
            d: $state,
            /// Rotation triple of this variant. Fixed after construction.
            rot: Rotations,
        }

        // As recommended, this Debug implementation does not expose internal state.
        impl core::fmt::Debug for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
                write!(f, concat!(stringify!($name), " {{}}"))
            }
        }

        impl $name {

            /// Creates a new RNG from the default seed using the default rotation set.
            pub fn new() -> Self {
                Self::from_seed(0xcafe5eed00000001u64 as $state)
            }

            /// Creates a new RNG from the given seed using the default rotation set.
            /// All seeds work equally well.
            pub fn from_seed(seed: $state) -> Self {
                Self::with_rotations($default, seed)
            }

            /// Creates a new RNG from the given seed using the given rotation set.
            /// The first two rotations must be in 1 ..= W-1 for state width W;
            /// a zero third rotation selects the two-rotation step.
            pub fn with_rotations(rot: Rotations, seed: $state) -> Self {
                let bits = <$state>::BITS;
                assert!(rot.p >= 1 && rot.p < bits);
                assert!(rot.q >= 1 && rot.q < bits);
                assert!(rot.r < bits);
                let mut jsf = $name { a: 0, b: 0, c: 0, d: 0, rot };
                jsf.seed(seed);
                jsf
            }

            /// Resets the RNG to the deterministic stream of the given seed,
            /// keeping the rotation set. All seeds work equally well.
            pub fn seed(&mut self, seed: $state) {
                self.a = 0xf1ea5eedu64 as $state;
                self.b = seed;
                self.c = seed;
                self.d = seed;
                // Warm-up steps mix the seed into a well-distributed state.
                for _ in 0 .. 20 {
                    self.step();
                }
            }

            /// Advances to the next state.
            #[wrappit] #[inline]
            fn step(&mut self) {
                let t = if self.rot.r != 0 { self.d.rotate_left(self.rot.r) } else { self.d };
                let e = self.a - self.b.rotate_left(self.rot.p);
                self.a = self.b ^ self.c.rotate_left(self.rot.q);
                self.b = self.c + t;
                self.c = self.d + e;
                self.d = e + self.a;
            }

            /// Returns the current output.
            #[inline]
            fn get(&self) -> $output {
                // The single point where state width narrows to output width.
                self.d as $output
            }

            /// Generates the next random number.
            #[inline]
            pub fn next(&mut self) -> $output {
                self.step();
                self.get()
            }
        }
    };
}

jsf! {
    /// JSF32 non-cryptographic RNG. 32-bit output, 128-bit state.
    Jsf32, u32, u32, JSF32_2ROT[0]
}

jsf! {
    /// JSF64 non-cryptographic RNG. 64-bit output, 256-bit state.
    Jsf64, u64, u64, JSF64_3ROT[0]
}

jsf! {
    /// JSF16 non-cryptographic RNG. 16-bit output, 64-bit state.
    /// For testing and specialized uses only.
    Jsf16, u16, u16, JSF16_2ROT[0]
}

jsf! {
    /// JSF8 non-cryptographic RNG. 8-bit output, 32-bit state.
    /// For testing and specialized uses only.
    Jsf8, u8, u8, JSF8_2ROT[0]
}

use super::{RngCore, Error, SeedableRng};

impl RngCore for Jsf64 {
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

impl SeedableRng for Jsf64 {
    type Seed = [u8; 8];

    /// Creates a new JSF64 RNG from a seed.
    /// All seeds work equally well.
    fn from_seed(seed: Self::Seed) -> Self {
        // Always use Little-Endian.
        Jsf64::from_seed(u64::from_le_bytes(seed))
    }
}

impl RngCore for Jsf32 {
    fn next_u32(&mut self) -> u32 {
        self.next()
    }

    fn next_u64(&mut self) -> u64 {
        let x = self.next() as u64;
        let y = self.next() as u64;
        x | (y << 32)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        let bytes = dest.len();
        let mut i = 0;
        while i < bytes {
            let x = self.next();
            let j = bytes.min(i + 4);
            // Always use Little-Endian.
            dest[i .. j].copy_from_slice(&x.to_le_bytes()[0 .. (j - i)]);
            i = j;
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        Ok(self.fill_bytes(dest))
    }
}

impl SeedableRng for Jsf32 {
    type Seed = [u8; 4];

    /// Creates a new JSF32 RNG from a seed.
    /// All seeds work equally well.
    fn from_seed(seed: Self::Seed) -> Self {
        // Always use Little-Endian.
        Jsf32::from_seed(u32::from_le_bytes(seed))
    }
}

#[cfg(test)] mod tests {
    use super::*;

    jsf! {
        /// Mixed width variant exercising output narrowing.
        Jsf32x16, u32, u16, JSF32_2ROT[0]
    }

    #[test] pub fn determinism_and_equality() {

        let mut r: u64 = 0;
        let mut rnd = || -> u64 { r = r.wrapping_mul(0xd1342543de82ef95).wrapping_add(0xffff); r };

        for _ in 0 .. 1<<10 {
            let seed = rnd();
            let mut jsf1 = Jsf64::from_seed(seed);
            let mut jsf2 = Jsf64::from_seed(seed);
            assert!(jsf1 == jsf2);
            let n = 1 + (rnd() & 0xff);
            for _ in 0 .. n {
                assert_eq!(jsf1.next(), jsf2.next());
            }
            assert!(jsf1 == jsf2);

            // Reseeding restarts the identical stream.
            let x = jsf1.next();
            jsf1.seed(seed);
            jsf2.seed(seed);
            for _ in 0 .. n {
                jsf1.next();
                jsf2.next();
            }
            assert_eq!(x, jsf1.next());
            assert!(jsf1 != jsf2);
        }
    }

    #[test] pub fn warm_up_avalanche() {

        let mut r: u64 = 0;
        let mut rnd = || -> u64 { r = r.wrapping_mul(0xd1342543de82ef95).wrapping_add(0xffff); r };

        // Seeds one bit apart must diverge thoroughly during warm-up.
        let pairs: u64 = 1 << 10;
        let mut total: u64 = 0;
        for _ in 0 .. pairs {
            let seed = rnd();
            let bit = rnd() & 63;
            let mut jsf1 = Jsf64::from_seed(seed);
            let mut jsf2 = Jsf64::from_seed(seed ^ (1 << bit));
            total += (jsf1.next() ^ jsf2.next()).count_ones() as u64;
        }
        assert!(total > 28 * pairs && total < 36 * pairs);
    }

    #[test] pub fn output_narrowing() {

        // A narrowed variant emits the low output-width bits of the wide stream.
        let mut wide = Jsf32::from_seed(0x5eed);
        let mut narrow = Jsf32x16::with_rotations(JSF32_2ROT[0], 0x5eed);
        for _ in 0 .. 100 {
            assert_eq!(wide.next() as u16, narrow.next());
        }

        // Tiny widths run the same step at their own word width.
        let mut tiny1 = Jsf16::new();
        let mut tiny2 = Jsf16::new();
        let mut tiny8 = Jsf8::from_seed(0xed);
        for _ in 0 .. 100 {
            assert_eq!(tiny1.next(), tiny2.next());
            tiny8.next();
        }
    }

    #[test] pub fn byte_uniformity() {

        let mut jsf = Jsf64::new();
        let samples = 1 << 16;
        let mut counts = [0u64; 256];
        for _ in 0 .. samples {
            for &byte in jsf.next().to_le_bytes().iter() {
                counts[byte as usize] += 1;
            }
        }
        let expected = (samples * 8) as f64 / 256.0;
        let chi2: f64 = counts.iter().map(|&c| {
            let d = c as f64 - expected;
            d * d / expected
        }).sum();
        // 255 degrees of freedom.
        assert!(chi2 > 170.0 && chi2 < 350.0);
    }

    #[test] pub fn fill_bytes_consistency() {

        let mut r: u64 = 0;
        let mut rnd = || -> u64 { r = r.wrapping_mul(0xd1342543de82ef95).wrapping_add(0xffff); r };

        for _ in 0 .. 1<<8 {
            let seed = rnd();
            let bytes = 1 + (rnd() & 0x7f);
            let mut buffer1 = [0u8; 0x80];
            let mut buffer2 = [0u8; 0x80];
            let mut jsf1 = Jsf64::from_seed(seed);
            jsf1.fill_bytes(&mut buffer1[0 .. bytes as usize]);
            let mut jsf2 = Jsf64::from_seed(seed);
            for i in 0 .. 0x10 {
                let x = jsf2.next_u64();
                buffer2[(i << 3) .. ((i + 1) << 3)].copy_from_slice(&x.to_le_bytes());
            }
            assert!(buffer1[0 .. bytes as usize].iter().zip(buffer2[0 .. bytes as usize].iter()).all(|(x, y)| x == y));
        }
    }

    #[test] #[should_panic] pub fn zero_first_rotation_rejected() {
        Jsf32::with_rotations(Rotations { p: 0, q: 17, r: 0 }, 1);
    }

    #[test] #[should_panic] pub fn oversized_rotation_rejected() {
        Jsf32::with_rotations(Rotations { p: 27, q: 32, r: 0 }, 1);
    }
}
