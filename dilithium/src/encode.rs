use core::marker::PhantomData;
use hybrid_array::typenum::{U4, U9, U14, U20, Unsigned};

use crate::algebra::{Centered, Elem, GAMMA1, Polynomial, Q, Vector, sign_mask};
use crate::error::{Error, Result, check_length};
use crate::module_lattice::encode::{
    ArraySize, EncodedPolynomial, EncodingSize, RawValues, byte_decode, byte_encode,
};
use crate::param::EtaSize;

/// `BitPack` maps each coefficient of a polynomial to a fixed-width unsigned value and lays the
/// values out least significant bit first.  Implementors only say how one coefficient is mapped;
/// packing of polynomials and vectors is provided.
///
/// Unpacking never fails and never validates: every bit pattern of the right length decodes to
/// some polynomial.
pub trait BitPack {
    /// The representation of the coefficients this codec accepts and produces
    type Coefficient: Copy + Default;

    /// Bits per coefficient
    type Bits: EncodingSize;

    /// Bytes per packed polynomial
    const BYTES: usize = <Self::Bits as EncodingSize>::EncodedPolynomialSize::USIZE;

    /// Map a coefficient to a value in `[0, 2^Bits)`
    fn encode(c: Self::Coefficient) -> u32;

    /// Map a value in `[0, 2^Bits)` back to a coefficient
    fn decode(v: u32) -> Self::Coefficient;

    fn pack(p: &Polynomial<Self::Coefficient>) -> EncodedPolynomial<Self::Bits> {
        let vals: RawValues = p.0.iter().map(|&c| Self::encode(c)).collect();
        byte_encode::<Self::Bits>(&vals)
    }

    fn unpack(enc: &EncodedPolynomial<Self::Bits>) -> Polynomial<Self::Coefficient> {
        let vals = byte_decode::<Self::Bits>(enc);
        Polynomial(vals.iter().map(|&v| Self::decode(v)).collect())
    }

    /// Pack the polynomials of `v` one after another into `out`, which must be exactly
    /// `K * BYTES` long.
    fn pack_vector<K: ArraySize>(v: &Vector<Self::Coefficient, K>, out: &mut [u8]) -> Result<()> {
        check_length(Self::BYTES * K::USIZE, out.len())?;
        for (p, chunk) in v.0.iter().zip(out.chunks_exact_mut(Self::BYTES)) {
            chunk.copy_from_slice(&Self::pack(p));
        }

        Ok(())
    }

    /// Unpack `K` polynomials from `enc`, which must be exactly `K * BYTES` long.
    fn unpack_vector<K: ArraySize>(enc: &[u8]) -> Result<Vector<Self::Coefficient, K>> {
        check_length(Self::BYTES * K::USIZE, enc.len())?;

        let mut v = Vector::<Self::Coefficient, K>::default();
        for (p, chunk) in v.0.iter_mut().zip(enc.chunks_exact(Self::BYTES)) {
            let chunk = <&EncodedPolynomial<Self::Bits>>::try_from(chunk).map_err(|_| {
                Error::InvalidLength {
                    expected: Self::BYTES,
                    got: chunk.len(),
                }
            })?;
            *p = Self::unpack(chunk);
        }

        Ok(v)
    }
}

/// The high part of `t`, coefficients in `[0, 512)`, 9 bits each
#[derive(Copy, Clone, Debug, Default)]
pub struct T1;

impl BitPack for T1 {
    type Coefficient = Elem;
    type Bits = U9;

    fn encode(c: Elem) -> u32 {
        c.0
    }

    fn decode(v: u32) -> Elem {
        Elem::new(v)
    }
}

/// The low part of `t`, coefficients in `(-2^13, 2^13]`, 14 bits each
#[derive(Copy, Clone, Debug, Default)]
pub struct T0;

impl T0 {
    const OFFSET: u32 = Q + (1 << 13);
}

impl BitPack for T0 {
    type Coefficient = Centered;
    type Bits = U14;

    fn encode(c: Centered) -> u32 {
        Self::OFFSET - c.0
    }

    fn decode(v: u32) -> Centered {
        Centered(Self::OFFSET - v)
    }
}

/// Secret coefficients in `[-η, η]`, 3 bits each for `η <= 3` and 4 bits each for `η <= 7`.
///
/// Values beyond `2η` still decode, to coefficients outside the range; callers that need the
/// bound must check it.
#[derive(Copy, Clone, Debug, Default)]
pub struct LeqEta<Eta>(PhantomData<Eta>);

impl<Eta: EtaSize> BitPack for LeqEta<Eta> {
    type Coefficient = Centered;
    type Bits = Eta::Bits;

    fn encode(c: Centered) -> u32 {
        Q + Eta::U32 - c.0
    }

    fn decode(v: u32) -> Centered {
        Centered(Q + Eta::U32 - v)
    }
}

/// Masking coefficients with absolute value below `γ1`, 20 bits each
#[derive(Copy, Clone, Debug, Default)]
pub struct LeGamma1;

impl BitPack for LeGamma1 {
    type Coefficient = Elem;
    type Bits = U20;

    fn encode(c: Elem) -> u32 {
        // γ1 - 1 - c, with q added back when c is the representative of a negative value
        let t = (GAMMA1 - 1).wrapping_sub(c.0);
        t.wrapping_add(sign_mask(t) & Q)
    }

    fn decode(v: u32) -> Elem {
        let t = (GAMMA1 - 1).wrapping_sub(v);
        Elem::new(t.wrapping_add(sign_mask(t) & Q))
    }
}

/// The high part `w1` of `w`, coefficients in `[0, 16)`, 4 bits each
#[derive(Copy, Clone, Debug, Default)]
pub struct HighBits;

impl BitPack for HighBits {
    type Coefficient = Elem;
    type Bits = U4;

    fn encode(c: Elem) -> u32 {
        c.0
    }

    fn decode(v: u32) -> Elem {
        Elem::new(v)
    }
}
