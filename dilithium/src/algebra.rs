//! Arithmetic over `Z_q`, `q = 8380417`: reductions, rounding, decomposition and hints.
//!
//! Coefficients come in three representations, each its own type:
//!
//! * [`Elem`]: the normalized representative in `[0, q)`
//! * [`Le2q`]: a partially reduced representative in `[0, 2q)`
//! * [`Centered`]: a small signed value `a` held as `q + a`
//!
//! None of the routines here check that their inputs are in range.  Every function states the
//! range it expects and the range it returns.

use core::ops::{Add, Sub};
use hybrid_array::ArraySize;

pub use crate::module_lattice::algebra::{Field, Polynomial, Vector};

use crate::define_field;
use crate::module_lattice::algebra::Elem as FieldElem;

define_field!(BaseField, u32, 8380417);

/// A normalized element of `Z_q`, in `[0, q)`
pub type Elem = FieldElem<BaseField>;

/// The modulus
pub const Q: u32 = <BaseField as Field>::Q;

/// The number of coefficients in a polynomial
pub const N: usize = 256;

/// The number of low-order bits dropped from `t` by [`power2round`]
pub const D: u32 = 14;

/// The bound on the coefficients of the masking vector, `(q - 1) / 16`
pub const GAMMA1: u32 = (Q - 1) >> 4;

/// The low-order rounding range, `(q - 1) / 32`
pub const GAMMA2: u32 = (Q - 1) >> 5;

/// The divisor used by [`decompose`], `2 * GAMMA2`
pub const ALPHA: u32 = 2 * GAMMA2;

/// All ones if the top bit of `x` is set, zero otherwise
pub(crate) const fn sign_mask(x: u32) -> u32 {
    0u32.wrapping_sub(x >> 31)
}

/// A representative of a residue class in `[0, 2q)`
#[derive(Copy, Clone, Default, Debug, PartialEq, Eq)]
pub struct Le2q(pub u32);

impl Le2q {
    pub const fn new(x: u32) -> Self {
        debug_assert!(x < 2 * Q);
        Self(x)
    }

    /// The representative in `[0, q)`
    pub fn normalize(self) -> Elem {
        Elem::new(BaseField::small_reduce(self.0))
    }
}

impl From<Elem> for Le2q {
    fn from(x: Elem) -> Self {
        Self(x.0)
    }
}

impl From<Centered> for Le2q {
    fn from(x: Centered) -> Self {
        Self(x.0)
    }
}

impl Add<Le2q> for Le2q {
    type Output = Le2q;

    fn add(self, rhs: Le2q) -> Le2q {
        reduce_le2q(self.0 + rhs.0)
    }
}

impl Sub<Le2q> for Le2q {
    type Output = Le2q;

    fn sub(self, rhs: Le2q) -> Le2q {
        reduce_le2q(self.0 + 2 * Q - rhs.0)
    }
}

/// A small signed value `a` with `|a| < q`, held as `q + a`
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Centered(pub u32);

impl Default for Centered {
    /// Zero, held as `q`
    fn default() -> Self {
        Self(Q)
    }
}

impl Centered {
    pub const fn from_signed(a: i32) -> Self {
        Self(Q.wrapping_add_signed(a))
    }

    #[allow(clippy::cast_possible_wrap)]
    #[allow(clippy::as_conversions)]
    pub const fn to_signed(self) -> i32 {
        // Both values are below 2^25, so neither cast wraps.
        self.0 as i32 - Q as i32
    }

    /// The representative in `[0, q)`
    pub fn normalize(self) -> Elem {
        Elem::new(BaseField::small_reduce(self.0))
    }
}

impl From<Elem> for Centered {
    /// Take `x` to the signed value in `[-(q-1)/2, (q-1)/2]` congruent to it
    fn from(x: Elem) -> Self {
        let above = sign_mask(((Q - 1) >> 1).wrapping_sub(x.0));
        Self(x.0 + (!above & Q))
    }
}

/// Reduce any 32-bit `x` to a congruent value in `[0, 2q)`, using `2^23 = 2^13 - 1 (mod q)`
pub const fn reduce_le2q(x: u32) -> Le2q {
    let x1 = x >> 23;
    let x2 = x & 0x7f_ffff;
    Le2q(x2 + (x1 << 13) - x1)
}

/// Reduce any 32-bit `x` to `[0, q)`
pub fn mod_q(x: u32) -> Elem {
    reduce_le2q(x).normalize()
}

/// Split `a` into `a0 + 2^D * a1`, with `a0` in `(-2^(D-1), 2^(D-1)]` and `a1` in `[0, 511]`
pub fn power2round(a: Elem) -> (Centered, Elem) {
    const HALF: u32 = 1 << (D - 1);

    let a = a.0;
    let mut a0 = a & ((1 << D) - 1);
    a0 = a0.wrapping_sub(HALF + 1);
    a0 = a0.wrapping_add(sign_mask(a0) & (1 << D));
    a0 = a0.wrapping_sub(HALF - 1);

    (Centered(Q.wrapping_add(a0)), Elem::new(a.wrapping_sub(a0) >> D))
}

/// Split `a` into `a0 + ALPHA * a1`, with `a0` in `(-ALPHA/2, ALPHA/2]` and `a1` in `[0, 15]`.
///
/// When `a` lies above `q - 1 - ALPHA/2` the quotient would be 16; instead `a1` is 0 and `a0`
/// is `a - q`, in `[-ALPHA/2, 0)`.
pub fn decompose(a: Elem) -> (Centered, Elem) {
    let a = a.0;

    // a1 = round(a / ALPHA), computed as a multiply and shift and wrapped mod 16.
    let mut a1 = (a + 127) >> 7;
    a1 = ((a1 * 1025 + (1 << 21)) >> 22) & 15;

    // a0 is signed here; it gets q added unless a1 wrapped to zero from the top of the range, in
    // which case a0 = a already equals q + (a - q).
    let mut a0 = a.wrapping_sub(a1 * ALPHA);
    a0 = a0.wrapping_add(sign_mask(a0.wrapping_sub((Q - 1) >> 1)) & Q);

    (Centered(a0), Elem::new(a1))
}

/// Whether `r1 * ALPHA + z0` has a high part other than `r1`.  `z0` is typically a low part
/// plus a small perturbation and may be any representative in `[0, 2q)`.
pub fn make_hint(z0: Le2q, r1: Elem) -> bool {
    let z = z0.normalize().0;
    !(z <= GAMMA2 || z > Q - GAMMA2 || (z == Q - GAMMA2 && r1.0 == 0))
}

/// Recover `r1` from `r = r1 * ALPHA + z0` (any representative in `[0, 2q)`) and the hint
/// computed by [`make_hint`] for `z0` and `r1`
pub fn use_hint(r: Le2q, hint: bool) -> Elem {
    let (a0, a1) = decompose(r.normalize());
    if !hint {
        a1
    } else if a0.0 > Q {
        Elem::new((a1.0 + 1) & 15)
    } else {
        Elem::new(a1.0.wrapping_sub(1) & 15)
    }
}

impl FieldElem<BaseField> {
    /// The absolute value of the centered representative
    pub fn infinity_norm(&self) -> u32 {
        if self.0 <= (Q - 1) >> 1 {
            self.0
        } else {
            Q - self.0
        }
    }
}

impl Polynomial<Elem> {
    pub fn power2round(&self) -> (Polynomial<Centered>, Polynomial<Elem>) {
        (self.map(|x| power2round(x).0), self.map(|x| power2round(x).1))
    }

    pub fn decompose(&self) -> (Polynomial<Centered>, Polynomial<Elem>) {
        (self.map(|x| decompose(x).0), self.map(|x| decompose(x).1))
    }

    pub fn infinity_norm(&self) -> u32 {
        self.0.iter().map(Elem::infinity_norm).fold(0, u32::max)
    }
}

impl Polynomial<Le2q> {
    pub fn normalize(&self) -> Polynomial<Elem> {
        self.map(Le2q::normalize)
    }
}

impl Polynomial<Centered> {
    pub fn normalize(&self) -> Polynomial<Elem> {
        self.map(Centered::normalize)
    }
}

impl<K: ArraySize> Vector<Elem, K> {
    pub fn power2round(&self) -> (Vector<Centered, K>, Vector<Elem, K>) {
        (self.map(|x| power2round(x).0), self.map(|x| power2round(x).1))
    }

    pub fn decompose(&self) -> (Vector<Centered, K>, Vector<Elem, K>) {
        (self.map(|x| decompose(x).0), self.map(|x| decompose(x).1))
    }

    pub fn infinity_norm(&self) -> u32 {
        self.0.iter().map(Polynomial::<Elem>::infinity_norm).fold(0, u32::max)
    }
}

impl<K: ArraySize> Vector<Le2q, K> {
    pub fn normalize(&self) -> Vector<Elem, K> {
        self.map(Le2q::normalize)
    }
}

impl<K: ArraySize> Vector<Centered, K> {
    pub fn normalize(&self) -> Vector<Elem, K> {
        self.map(Centered::normalize)
    }
}

#[cfg(test)]
#[allow(clippy::integer_division_remainder_used)]
mod test {
    use super::*;
    use hybrid_array::{Array, typenum::U2};

    #[test]
    fn constants() {
        assert_eq!(Q, 8_380_417);
        assert_eq!(GAMMA1, 523_776);
        assert_eq!(GAMMA2, 261_888);
        assert_eq!(ALPHA, 523_776);
        assert_eq!((Q - 1) / ALPHA, 16);
        assert_eq!((Q - 1) >> D, 511);
    }

    #[test]
    fn reductions() {
        let samples = [0, 1, Q - 1, Q, Q + 1, 2 * Q - 1, 2 * Q, 1 << 23, u32::MAX, 0xdead_beef];
        for x in samples {
            let r = reduce_le2q(x);
            assert!(r.0 < 2 * Q);
            assert_eq!(r.0 % Q, x % Q);
            assert_eq!(mod_q(x).0, x % Q);
        }

        for x in (0..u32::MAX).step_by(65_521) {
            assert_eq!(mod_q(x).0, x % Q);
        }
    }

    #[test]
    fn le2q_ops() {
        let a = Le2q::new(2 * Q - 1);
        let b = Le2q::new(5);
        assert_eq!((a + b).normalize().0, 4);
        assert_eq!((b - a).normalize().0, 6);
        assert_eq!((a - b).normalize().0, Q - 6);
        assert_eq!(Le2q::from(Elem::new(7)).normalize().0, 7);
    }

    #[test]
    fn centered() {
        for a in [-8191, -1, 0, 1, 8192] {
            let c = Centered::from_signed(a);
            assert_eq!(c.to_signed(), a);
            let expect = if a < 0 { Q - a.unsigned_abs() } else { a.unsigned_abs() };
            assert_eq!(c.normalize().0, expect);
            assert_eq!(Centered::from(c.normalize()), c);
        }

        assert_eq!(Centered::from(Elem::new((Q - 1) / 2)).to_signed(), 4_190_208);
        assert_eq!(Centered::from(Elem::new((Q + 1) / 2)).to_signed(), -4_190_208);
    }

    #[test]
    fn centered_default_is_zero() {
        assert_eq!(Centered::default().to_signed(), 0);
        assert_eq!(Centered::default(), Centered::from_signed(0));
        assert_eq!(Centered::default().normalize(), Elem::new(0));
        assert_eq!(
            Polynomial::<Centered>::default().normalize(),
            Polynomial::<Elem>::default()
        );
    }

    #[test]
    fn power2round_all() {
        for a in 0..Q {
            let (a0, a1) = power2round(Elem::new(a));
            let s = a0.to_signed();
            assert!(-(1 << (D - 1)) < s && s <= 1 << (D - 1), "a0 out of range for {a}");
            assert!(a1.0 <= 511);
            assert_eq!(a1.0 * (1 << D), a.wrapping_add_signed(-s));
        }
    }

    // Rounding as written in the Dilithium paper, with division and a branch.
    fn decompose_reference(a: u32) -> (i64, u32) {
        let alpha = i64::from(ALPHA);
        let a = i64::from(a);
        let mut a0 = a % alpha;
        if a0 > alpha / 2 {
            a0 -= alpha;
        }

        if a - a0 == i64::from(Q) - 1 {
            (a0 - 1, 0)
        } else {
            (a0, u32::try_from((a - a0) / alpha).unwrap())
        }
    }

    #[test]
    fn decompose_all() {
        for a in 0..Q {
            let (a0, a1) = decompose(Elem::new(a));
            let (r0, r1) = decompose_reference(a);
            assert_eq!((i64::from(a0.to_signed()), a1.0), (r0, r1), "mismatch at {a}");
        }
    }

    #[test]
    fn decompose_top_of_range() {
        // Just above q - 1 - ALPHA/2, the high part wraps to zero.
        let (a0, a1) = decompose(Elem::new(Q - 1));
        assert_eq!(a1.0, 0);
        assert_eq!(a0.to_signed(), -1);

        let (a0, a1) = decompose(Elem::new(Q - 1 - GAMMA2));
        assert_eq!(a1.0, 15);
        assert_eq!(a0.to_signed(), i32::try_from(GAMMA2).unwrap());
    }

    #[test]
    fn hints() {
        let mut rng = 0x2545_f491_u32;
        for _ in 0..200_000 {
            rng ^= rng << 13;
            rng ^= rng >> 17;
            rng ^= rng << 5;
            let r = rng % Q;
            let f = (rng >> 7) % (2 * GAMMA2 + 1);
            let f = mod_q(Q + f - GAMMA2);

            let (r0, r1) = decompose(Elem::new(r));
            let z0 = Le2q::from(r0) - Le2q::from(f);
            let h = make_hint(z0, r1);

            let w = Elem::new(r) - f;
            assert_eq!(h, decompose(w).1 != r1);
            assert_eq!(use_hint(Le2q::from(w), h), r1);
        }
    }

    #[test]
    fn hint_boundaries() {
        assert!(!make_hint(Le2q::new(GAMMA2), Elem::new(3)));
        assert!(make_hint(Le2q::new(GAMMA2 + 1), Elem::new(3)));
        assert!(!make_hint(Le2q::new(Q - GAMMA2 + 1), Elem::new(3)));
        assert!(make_hint(Le2q::new(Q - GAMMA2), Elem::new(3)));
        assert!(!make_hint(Le2q::new(Q - GAMMA2), Elem::new(0)));
        assert!(!make_hint(Le2q::new(Q + GAMMA2), Elem::new(3)));

        assert_eq!(use_hint(Le2q::new(Q - 1), true).0, 15);
        assert_eq!(use_hint(Le2q::new(GAMMA2), true).0, 1);
        assert_eq!(use_hint(Le2q::new(GAMMA2 + 1), true).0, 0);
        assert_eq!(use_hint(Le2q::new(GAMMA2 + 1), false).0, 1);
    }

    #[test]
    fn infinity_norm() {
        assert_eq!(Elem::new(0).infinity_norm(), 0);
        assert_eq!(Elem::new(Q - 1).infinity_norm(), 1);
        assert_eq!(Elem::new((Q - 1) / 2).infinity_norm(), (Q - 1) / 2);
        assert_eq!(Elem::new((Q + 1) / 2).infinity_norm(), (Q - 1) / 2);

        let mut p = Polynomial::<Elem>::default();
        p.0[17] = Elem::new(Q - 40);
        p.0[200] = Elem::new(39);
        assert_eq!(p.infinity_norm(), 40);

        let v: Vector<Elem, U2> = Vector::new(Array([Polynomial::default(), p]));
        assert_eq!(v.infinity_norm(), 40);
    }

    #[test]
    fn polynomial_lifts() {
        let p = Polynomial::<Elem>::new(Array::from_fn(|i| {
            Elem::new(u32::try_from(i).unwrap() * 32_749)
        }));

        let (p0, p1) = p.power2round();
        let (d0, d1) = p.decompose();
        for i in 0..N {
            assert_eq!((p0.0[i], p1.0[i]), power2round(p.0[i]));
            assert_eq!((d0.0[i], d1.0[i]), decompose(p.0[i]));
        }

        let sum = &p0.map(Le2q::from) + &p.map(Le2q::from);
        let diff = &sum - &p0.map(Le2q::from);
        assert_eq!(diff.normalize(), p);
        assert_eq!(p0.map(Le2q::from).normalize(), p0.normalize());
    }
}
