//! Deterministic sampling of polynomials from a seed.
//!
//! Both samplers are generic over the field, so the same code serves the Dilithium modulus and
//! smaller moduli.  The default entry points use SHAKE-256 for noise and SHAKE-128 for uniform
//! sampling; the `_with` variants accept any extendable-output function.

use hybrid_array::{Array, ArraySize, typenum::U256};
use sha3::{Shake128, Shake256, digest::ExtendableOutput};

use crate::crypto::ShakeState;
use crate::module_lattice::algebra::{Elem, Field, Polynomial, Vector};
use crate::module_lattice::encode::{EncodedPolynomial, byte_decode};
use crate::module_lattice::util::Truncate;
use crate::param::CbdSamplingSize;
use crate::util::B32;

/// Bytes squeezed per round of uniform sampling, the SHAKE-128 rate
const UNIFORM_BLOCK: usize = 168;

/// A permutation of the 256 coefficient positions of a polynomial, such as the order in which
/// an NTT implementation expects its input.
pub trait CoefficientOrder {
    /// The position at which the coefficient of `x^i` is stored
    fn position(i: usize) -> usize;

    /// Reorder a polynomial from natural order into this order
    fn tangle<C: Copy>(p: &Polynomial<C>) -> Polynomial<C> {
        let mut out = p.clone();
        for (i, &c) in p.0.iter().enumerate() {
            out.0[Self::position(i)] = c;
        }
        out
    }

    /// Reorder a polynomial from this order back into natural order
    fn untangle<C: Copy>(p: &Polynomial<C>) -> Polynomial<C> {
        Polynomial(Array::<C, U256>::from_fn(|i| p.0[Self::position(i)]))
    }
}

/// Coefficients in order of increasing degree
#[derive(Copy, Clone, Debug, Default)]
pub struct NaturalOrder;

impl CoefficientOrder for NaturalOrder {
    fn position(i: usize) -> usize {
        i
    }

    fn tangle<C: Copy>(p: &Polynomial<C>) -> Polynomial<C> {
        p.clone()
    }

    fn untangle<C: Copy>(p: &Polynomial<C>) -> Polynomial<C> {
        p.clone()
    }
}

/// Coefficient `x^i` stored at the 8-bit reversal of `i`
#[derive(Copy, Clone, Debug, Default)]
pub struct BitReversedOrder;

impl CoefficientOrder for BitReversedOrder {
    fn position(i: usize) -> usize {
        usize::from(u8::truncate(i).reverse_bits())
    }
}

/// Sample a polynomial from the centered binomial distribution with parameter `η`, using
/// SHAKE-256 over `seed || nonce`.
pub fn derive_noise<Eta, F>(seed: &B32, nonce: u8) -> Polynomial<Elem<F>>
where
    Eta: CbdSamplingSize,
    F: Field,
{
    derive_noise_with::<Eta, F, Shake256>(seed, nonce)
}

/// [`derive_noise`] over an arbitrary extendable-output function
pub fn derive_noise_with<Eta, F, Shake>(seed: &B32, nonce: u8) -> Polynomial<Elem<F>>
where
    Eta: CbdSamplingSize,
    F: Field,
    Shake: ExtendableOutput + Default + Clone,
{
    // 2η bits per coefficient: the low η bits are summed and the high η bits subtracted.
    let bytes: EncodedPolynomial<Eta::SampleSize> =
        ShakeState::<Shake>::seeded(seed, &[nonce]).squeeze_new();

    let eta = Eta::U32;
    let mask = (1 << eta) - 1;
    let vals = byte_decode::<Eta::SampleSize>(&bytes);
    Polynomial(
        vals.iter()
            .map(|&v| {
                let a = F::Int::from(u16::truncate((v & mask).count_ones()));
                let b = F::Int::from(u16::truncate((v >> eta).count_ones()));
                Elem::new(a) - Elem::new(b)
            })
            .collect(),
    )
}

/// Sample `K` noise polynomials with consecutive nonces starting at `base`
pub fn derive_noise_vector<Eta, F, K>(seed: &B32, base: u8) -> Vector<Elem<F>, K>
where
    Eta: CbdSamplingSize,
    F: Field,
    K: ArraySize,
{
    Vector(Array::from_fn(|i| {
        derive_noise::<Eta, F>(seed, base.wrapping_add(u8::truncate(i)))
    }))
}

/// Sample a polynomial by rejection, using SHAKE-128 over `seed || x || y`, and return it in
/// the coefficient order `O`.
///
/// Candidates are 12-bit chunks, so coefficients are uniform in `[0, min(q, 4096))`.  For
/// moduli above 4096, such as the Dilithium modulus, nothing is ever rejected and every
/// coefficient is below 4096, not uniform over `[0, q)`.
///
/// The number of rounds is not bounded; it terminates with overwhelming probability.
pub fn derive_uniform<F, O>(seed: &B32, x: u8, y: u8) -> Polynomial<Elem<F>>
where
    F: Field,
    O: CoefficientOrder,
{
    derive_uniform_with::<F, O, Shake128>(seed, x, y)
}

/// [`derive_uniform`] over an arbitrary extendable-output function
pub fn derive_uniform_with<F, O, Shake>(seed: &B32, x: u8, y: u8) -> Polynomial<Elem<F>>
where
    F: Field,
    O: CoefficientOrder,
    Shake: ExtendableOutput + Default + Clone,
{
    let mut ctx = ShakeState::<Shake>::seeded(seed, &[x, y]);

    let mut a = Polynomial::<Elem<F>>::default();
    let mut i = 0;
    let mut block = [0u8; UNIFORM_BLOCK];
    'outer: loop {
        ctx.squeeze(&mut block);

        for b in block.chunks_exact(3) {
            let (b0, b1, b2) = (u16::from(b[0]), u16::from(b[1]), u16::from(b[2]));
            let d1 = b0 | ((b1 & 0x0f) << 8);
            let d2 = (b1 >> 4) | (b2 << 4);

            for d in [d1, d2] {
                let d = F::Int::from(d);
                if d < F::Q {
                    a.0[i] = Elem::new(d);
                    i += 1;

                    if i == 256 {
                        break 'outer;
                    }
                }
            }
        }
    }

    O::tangle(&a)
}

/// Sample a `K x L` matrix of uniform polynomials.  Entry `(i, j)` uses `x = j` and `y = i`.
pub fn derive_uniform_matrix<F, O, K, L>(seed: &B32) -> Array<Vector<Elem<F>, L>, K>
where
    F: Field,
    O: CoefficientOrder,
    K: ArraySize,
    L: ArraySize,
{
    Array::from_fn(|i| {
        Vector(Array::from_fn(|j| {
            derive_uniform::<F, O>(seed, u8::truncate(j), u8::truncate(i))
        }))
    })
}
