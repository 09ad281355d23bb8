use core::fmt::Debug;
use core::ops::{Div, Mul};
use hybrid_array::{
    Array,
    typenum::{Gcd, Gcf, Prod, Quot, U8, U32, U256, Unsigned},
};

use super::util::Truncate;

/// An array length with other useful properties
pub trait ArraySize: hybrid_array::ArraySize + PartialEq + Debug {}

impl<T> ArraySize for T where T: hybrid_array::ArraySize + PartialEq + Debug {}

/// A bit width `D` that can describe encoded polynomials.  The encoding of a polynomial is 256
/// `D`-bit values laid end to end, least significant bit first, which takes `32 * D` bytes.
///
/// The encoder works on groups of `ValueStep` values that occupy exactly `ByteStep` bytes, the
/// smallest whole-byte unit for the width.
pub trait EncodingSize: ArraySize {
    type EncodedPolynomialSize: ArraySize;
    type ValueStep: ArraySize;
    type ByteStep: ArraySize;
}

type EncodingUnit<D> = Quot<Prod<D, U8>, Gcf<D, U8>>;

pub type EncodedPolynomialSize<D> = <D as EncodingSize>::EncodedPolynomialSize;
pub type EncodedPolynomial<D> = Array<u8, EncodedPolynomialSize<D>>;

impl<D> EncodingSize for D
where
    D: ArraySize + Mul<U8> + Gcd<U8> + Mul<U32>,
    Prod<D, U32>: ArraySize,
    Prod<D, U8>: Div<Gcf<D, U8>>,
    EncodingUnit<D>: Div<D> + Div<U8>,
    Quot<EncodingUnit<D>, D>: ArraySize,
    Quot<EncodingUnit<D>, U8>: ArraySize,
{
    type EncodedPolynomialSize = Prod<D, U32>;
    type ValueStep = Quot<EncodingUnit<D>, D>;
    type ByteStep = Quot<EncodingUnit<D>, U8>;
}

/// The raw coefficient values of one polynomial, before or after bit packing
pub type RawValues = Array<u32, U256>;

/// Pack 256 values of `D` bits each.  Bits of a value above the low `D` are ignored; callers
/// are expected to have mapped coefficients into `[0, 2^D)` already.
pub fn byte_encode<D: EncodingSize>(vals: &RawValues) -> EncodedPolynomial<D> {
    let val_step = D::ValueStep::USIZE;
    let byte_step = D::ByteStep::USIZE;
    let mask = (1u128 << D::USIZE) - 1;

    let mut bytes = EncodedPolynomial::<D>::default();

    let vc = vals.chunks(val_step);
    let bc = bytes.chunks_mut(byte_step);
    for (v, b) in vc.zip(bc) {
        let mut x = 0u128;
        for (j, &vj) in v.iter().enumerate() {
            x |= (u128::from(vj) & mask) << (D::USIZE * j);
        }

        let xb = x.to_le_bytes();
        b.copy_from_slice(&xb[..byte_step]);
    }

    bytes
}

/// Unpack 256 values of `D` bits each.  Every output is in `[0, 2^D)`; no other validation
/// is done.
pub fn byte_decode<D: EncodingSize>(bytes: &EncodedPolynomial<D>) -> RawValues {
    let val_step = D::ValueStep::USIZE;
    let byte_step = D::ByteStep::USIZE;
    let mask = (1u32 << D::USIZE) - 1;

    let mut vals = RawValues::default();

    let vc = vals.chunks_mut(val_step);
    let bc = bytes.chunks(byte_step);
    for (v, b) in vc.zip(bc) {
        let mut xb = [0u8; 16];
        xb[..byte_step].copy_from_slice(b);

        let x = u128::from_le_bytes(xb);
        for (j, vj) in v.iter_mut().enumerate() {
            *vj = u32::truncate(x >> (D::USIZE * j)) & mask;
        }
    }

    vals
}
