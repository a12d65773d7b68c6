use num_bigint::BigUint;
use num_traits::Zero;
use rand_core::RngCore;

// This module contains view and arithmetic helpers for
// unsigned wide integers stored as little-endian u64 limb slices.

/// View helpers over a little-endian limb buffer.
/// The halving views require an even number of limbs.
pub trait Limbs {

    /// View of the low half of the buffer.
    fn low(&self) -> &[u64];

    /// View of the high half of the buffer.
    fn high(&self) -> &[u64];

    /// Mutable view of the low half of the buffer.
    fn low_mut(&mut self) -> &mut [u64];

    /// Mutable view of the high half of the buffer.
    fn high_mut(&mut self) -> &mut [u64];

    /// Forces the value odd.
    fn make_odd(&mut self);

    /// Forces the value even.
    fn make_even(&mut self);

    /// Fills the buffer with one uniform word per limb.
    fn randomize<R: RngCore>(&mut self, rng: &mut R);

    /// Converts the value to an arbitrary-precision integer.
    fn to_big(&self) -> BigUint;

    /// Stores an arbitrary-precision integer into the buffer.
    /// The value must fit the buffer.
    fn assign_big(&mut self, x: &BigUint);

    /// Adds the value of another buffer. The result must fit the buffer.
    fn add_assign(&mut self, rhs: &[u64]);

    /// Subtracts the value of another buffer. The subtrahend must not be larger.
    fn sub_assign(&mut self, rhs: &[u64]);

    /// Multiplies by the value of another buffer. The result must fit the buffer.
    fn mul_assign(&mut self, rhs: &[u64]);

    /// Divides by the value of another buffer. The divisor must be nonzero.
    fn div_assign(&mut self, rhs: &[u64]);
}

impl Limbs for [u64] {

    #[inline]
    fn low(&self) -> &[u64] {
        assert!(self.len() % 2 == 0);
        &self[.. self.len() / 2]
    }

    #[inline]
    fn high(&self) -> &[u64] {
        assert!(self.len() % 2 == 0);
        &self[self.len() / 2 ..]
    }

    #[inline]
    fn low_mut(&mut self) -> &mut [u64] {
        assert!(self.len() % 2 == 0);
        let mid = self.len() / 2;
        &mut self[.. mid]
    }

    #[inline]
    fn high_mut(&mut self) -> &mut [u64] {
        assert!(self.len() % 2 == 0);
        let mid = self.len() / 2;
        &mut self[mid ..]
    }

    #[inline]
    fn make_odd(&mut self) {
        assert!(!self.is_empty());
        self[0] |= 1;
    }

    #[inline]
    fn make_even(&mut self) {
        assert!(!self.is_empty());
        self[0] &= !1;
    }

    fn randomize<R: RngCore>(&mut self, rng: &mut R) {
        for limb in self.iter_mut() {
            *limb = rng.next_u64();
        }
    }

    fn to_big(&self) -> BigUint {
        self.iter().rev().fold(BigUint::zero(), |acc, &limb| (acc << 64) | BigUint::from(limb))
    }

    fn assign_big(&mut self, x: &BigUint) {
        let mut digits = x.iter_u64_digits();
        assert!(digits.len() <= self.len(), "value exceeds view capacity");
        for limb in self.iter_mut() {
            *limb = digits.next().unwrap_or(0);
        }
    }

    fn add_assign(&mut self, rhs: &[u64]) {
        let x = self.to_big() + rhs.to_big();
        self.assign_big(&x);
    }

    fn sub_assign(&mut self, rhs: &[u64]) {
        let a = self.to_big();
        let b = rhs.to_big();
        assert!(b <= a, "subtraction underflow");
        self.assign_big(&(a - b));
    }

    fn mul_assign(&mut self, rhs: &[u64]) {
        let x = self.to_big() * rhs.to_big();
        self.assign_big(&x);
    }

    fn div_assign(&mut self, rhs: &[u64]) {
        let b = rhs.to_big();
        assert!(!b.is_zero(), "division by zero");
        self.assign_big(&(self.to_big() / b));
    }
}

/// Schoolbook multiplication of two equal-size limb operands
/// into a full double-size product. Does not allocate.
pub fn mul_wide(dst: &mut [u64], a: &[u64], b: &[u64]) {
    let n = a.len();
    assert!(n > 0);
    assert!(b.len() == n);
    assert!(dst.len() == 2 * n);
    dst[.. n].fill(0);
    for i in 0 .. n {
        let mut carry: u64 = 0;
        for j in 0 .. n {
            let t = (a[i] as u128) * (b[j] as u128) + dst[i + j] as u128 + carry as u128;
            dst[i + j] = t as u64;
            carry = (t >> 64) as u64;
        }
        dst[i + n] = carry;
    }
}
