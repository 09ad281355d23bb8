use crate::module_lattice::util::Truncate;
use hybrid_array::{
    Array,
    typenum::{U256, Unsigned},
};

#[cfg(feature = "zeroize")]
use zeroize::Zeroize;

use crate::algebra::{Elem, Le2q, Polynomial, Vector, make_hint, use_hint};
use crate::error::{Error, Result, check_length};
use crate::param::{EncodedHint, HintParams, ParameterSet};

/// The hint bits for one polynomial
pub type HintPolynomial = Array<bool, U256>;

/// Compute the hint bit for each coefficient of a polynomial, from the low parts `z0` and the
/// high parts `r1`
pub fn make_hints(z0: &Polynomial<Le2q>, r1: &Polynomial<Elem>) -> HintPolynomial {
    z0.0.iter()
        .zip(r1.0.iter())
        .map(|(&z, &r)| make_hint(z, r))
        .collect()
}

/// Apply the hint bits for one polynomial to `r`
pub fn use_hints(h: &HintPolynomial, r: &Polynomial<Le2q>) -> Polynomial<Elem> {
    Polynomial::new(
        h.iter()
            .zip(r.0.iter())
            .map(|(&h, &r)| use_hint(r, h))
            .collect(),
    )
}

/// A hint vector: `K` polynomials' worth of bits, of which at most `Omega` may be set
#[derive(Clone, PartialEq, Debug)]
pub struct Hint<P>(pub Array<HintPolynomial, P::K>)
where
    P: ParameterSet;

impl<P> Default for Hint<P>
where
    P: ParameterSet,
{
    fn default() -> Self {
        Self(Array::default())
    }
}

#[cfg(feature = "zeroize")]
impl<P> Zeroize for Hint<P>
where
    P: ParameterSet,
{
    fn zeroize(&mut self) {
        for h in &mut self.0 {
            h.iter_mut().for_each(Zeroize::zeroize);
        }
    }
}

impl<P> Hint<P>
where
    P: ParameterSet,
{
    pub fn new(z0: &Vector<Le2q, P::K>, r1: &Vector<Elem, P::K>) -> Self {
        Self(
            z0.0.iter()
                .zip(r1.0.iter())
                .map(|(z, r)| make_hints(z, r))
                .collect(),
        )
    }

    pub fn hamming_weight(&self) -> usize {
        self.0
            .iter()
            .map(|x| x.iter().filter(|x| **x).count())
            .sum()
    }

    pub fn use_hint(&self, r: &Vector<Le2q, P::K>) -> Vector<Elem, P::K> {
        Vector::new(
            self.0
                .iter()
                .zip(r.0.iter())
                .map(|(h, r)| use_hints(h, r))
                .collect(),
        )
    }
}

impl<P> Hint<P>
where
    P: HintParams,
{
    /// Pack the positions of the set bits, then one cumulative count per polynomial.  The
    /// caller must ensure that no more than `Omega` bits are set.
    pub fn bit_pack(&self) -> EncodedHint<P> {
        debug_assert!(self.hamming_weight() <= P::Omega::USIZE);

        let mut y: EncodedHint<P> = Array::default();
        let mut index = 0;
        let omega = P::Omega::USIZE;
        for (i, h) in self.0.iter().enumerate() {
            for (j, _) in h.iter().enumerate().filter(|(_, x)| **x) {
                y[index] = Truncate::truncate(j);
                index += 1;
            }

            y[omega + i] = Truncate::truncate(index);
        }

        y
    }

    /// Unpack a hint, accepting only the encoding [`Hint::bit_pack`] would produce: counts that
    /// never decrease and stay within `Omega`, positions strictly increasing within each
    /// polynomial, and zeros in every unused position slot.
    pub fn bit_unpack(y: &EncodedHint<P>) -> Option<Self> {
        let (indices, counts) = P::split_hint(y);

        let mut h = Self::default();
        let mut start = 0;
        for (i, &end) in counts.iter().enumerate() {
            let end = usize::from(end);
            if end < start || end > indices.len() {
                return None;
            }

            let indices = &indices[start..end];
            if !indices.windows(2).all(|w| w[0] < w[1]) {
                return None;
            }

            for &j in indices {
                h.0[i][usize::from(j)] = true;
            }

            start = end;
        }

        if indices[start..].iter().any(|&x| x != 0) {
            return None;
        }

        Some(h)
    }
}

impl<P> TryFrom<&[u8]> for Hint<P>
where
    P: HintParams,
{
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        check_length(P::HINT_SIZE, bytes.len())?;
        let y = <&EncodedHint<P>>::try_from(bytes).map_err(|_| Error::InvalidLength {
            expected: P::HINT_SIZE,
            got: bytes.len(),
        })?;

        Self::bit_unpack(y).ok_or(Error::NonCanonical)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::Mode3;
    use crate::algebra::{ALPHA, Centered, GAMMA2, Q, mod_q};
    use hybrid_array::typenum::U5;

    fn truncate(x: usize) -> u32 {
        u32::try_from(x).unwrap()
    }

    fn example() -> Hint<Mode3> {
        let mut h = Hint::<Mode3>::default();
        h.0[0][56] = true;
        h.0[0][100] = true;
        h.0[1][255] = true;
        h.0[3][2] = true;
        h.0[3][23] = true;
        h.0[4][1] = true;
        h
    }

    fn example_bytes() -> EncodedHint<Mode3> {
        let mut y = EncodedHint::<Mode3>::default();
        y[..6].copy_from_slice(&[56, 100, 255, 2, 23, 1]);
        y[96..].copy_from_slice(&[2, 3, 3, 5, 6]);
        y
    }

    #[test]
    fn pack() {
        let h = example();
        assert_eq!(h.hamming_weight(), 6);
        assert_eq!(h.bit_pack(), example_bytes());
        assert_eq!(Hint::bit_unpack(&example_bytes()), Some(h.clone()));
        assert_eq!(Hint::<Mode3>::try_from(example_bytes().as_slice()), Ok(h));
    }

    #[test]
    fn empty() {
        let h = Hint::<Mode3>::default();
        let y = h.bit_pack();
        assert!(y.iter().all(|&x| x == 0));
        assert_eq!(Hint::bit_unpack(&y), Some(h));
    }

    #[test]
    fn full() {
        let mut h = Hint::<Mode3>::default();
        for j in 0..96 {
            h.0[4][j + 100] = true;
        }
        let y = h.bit_pack();
        assert_eq!(&y[96..], &[0, 0, 0, 0, 96]);
        assert_eq!(Hint::bit_unpack(&y), Some(h));
    }

    #[test]
    fn reject() {
        // Decreasing count
        let mut y = example_bytes();
        y[97] = 1;
        assert_eq!(Hint::<Mode3>::bit_unpack(&y), None);

        // Count beyond omega
        let mut y = example_bytes();
        y[100] = 97;
        assert_eq!(Hint::<Mode3>::bit_unpack(&y), None);

        // Positions out of order within a polynomial
        let mut y = example_bytes();
        y.swap(0, 1);
        assert_eq!(Hint::<Mode3>::bit_unpack(&y), None);

        // Repeated position
        let mut y = example_bytes();
        y[1] = 56;
        assert_eq!(Hint::<Mode3>::bit_unpack(&y), None);

        // Nonzero padding
        let mut y = example_bytes();
        y[95] = 1;
        assert_eq!(Hint::<Mode3>::bit_unpack(&y), None);
        assert_eq!(
            Hint::<Mode3>::try_from(y.as_slice()),
            Err(Error::NonCanonical)
        );

        // Positions may decrease across a polynomial boundary
        let mut y = example_bytes();
        y[2] = 0;
        assert!(Hint::<Mode3>::bit_unpack(&y).is_some());
    }

    #[test]
    fn wrong_length() {
        let y = example_bytes();
        assert_eq!(
            Hint::<Mode3>::try_from(&y[..100]),
            Err(Error::InvalidLength {
                expected: 101,
                got: 100
            })
        );
    }

    #[test]
    fn make_and_use() {
        // Perturbations that carry into the next high part need a hint.
        let mut r = Polynomial::<Elem>::default();
        r.0[0] = Elem::new(GAMMA2);
        r.0[1] = Elem::new(ALPHA);
        r.0[2] = Elem::new(Q - 1 - GAMMA2);

        let mut z = Polynomial::<Elem>::default();
        z.0[0] = Elem::new(1);
        z.0[1] = Elem::new(5);
        z.0[2] = Elem::new(1);

        let (r0, r1) = r.decompose();
        let z0 = &r0.map(Le2q::from) + &z.map(Le2q::from);
        let h = make_hints(&z0, &r1);
        assert_eq!(&h[..3], &[true, false, true]);
        assert!(h[3..].iter().all(|&x| !x));

        // The hint takes the high part of r + z back to that of r.
        let w = (&r + &z).map(Le2q::from);
        assert_eq!(use_hints(&h, &w), r1);
        assert_ne!(w.normalize().decompose().1, r1);
    }

    #[test]
    fn vector() {
        let r: Vector<Elem, U5> = Vector::new(Array::from_fn(|i| {
            Polynomial::new(Array::from_fn(|j| {
                mod_q(truncate(i * 7919 + j * 104_729).wrapping_mul(40_961))
            }))
        }));
        let z: Vector<Elem, U5> = Vector::new(Array::from_fn(|i| {
            Polynomial::new(Array::from_fn(|j| {
                let a = i32::try_from(j * 2039 + i * 9).unwrap() - 260_000;
                Centered::from_signed(a).normalize()
            }))
        }));

        let (r0, r1) = r.decompose();
        let z0 = &r0.map(Le2q::from) + &z.map(Le2q::from);
        let h = Hint::<Mode3>::new(&z0, &r1);
        assert!(h.hamming_weight() > 0);

        let w = (&r + &z).map(Le2q::from);
        assert_eq!(h.use_hint(&w), r1);
    }
}
