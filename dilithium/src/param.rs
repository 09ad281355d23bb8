//! Compile-time parameters.  `ParameterSet` captures the per-instance parameters of the scheme
//! as type-level integers.  `CbdSamplingSize` and `EtaSize` are "upstream" of `ParameterSet`;
//! they describe how many bits a sampled or encoded coefficient occupies.
//!
//! The byte widths of encoded vectors follow from these and are provided as associated
//! constants, so that callers can size their buffers without spelling out trait bounds.

use core::ops::{Add, Sub};

use hybrid_array::{
    Array,
    typenum::{Sum, U2, U3, U4, U5, U6, U7, Unsigned},
};

use crate::encode::{BitPack, HighBits, LeGamma1, LeqEta, T0, T1};
use crate::module_lattice::encode::{ArraySize, EncodingSize};

/// An integer that describes a centered binomial sampling width `η`
pub trait CbdSamplingSize: ArraySize {
    /// Bits consumed per coefficient, `2η`
    type SampleSize: EncodingSize;
}

impl CbdSamplingSize for U2 {
    type SampleSize = U4;
}

impl CbdSamplingSize for U3 {
    type SampleSize = U6;
}

/// An integer that describes the range `[-η, η]` of secret coefficients
pub trait EtaSize: Unsigned {
    /// Bits needed to encode `η - a` for `a` in `[-η, η]`
    type Bits: EncodingSize;
}

impl EtaSize for U2 {
    type Bits = U3;
}

impl EtaSize for U3 {
    type Bits = U3;
}

impl EtaSize for U5 {
    type Bits = U4;
}

impl EtaSize for U6 {
    type Bits = U4;
}

impl EtaSize for U7 {
    type Bits = U4;
}

/// A `ParameterSet` captures the parameters that describe a particular instance of the scheme.
/// There are four variants, [`Mode1`](crate::Mode1) through [`Mode4`](crate::Mode4).
pub trait ParameterSet {
    /// Number of rows in the A matrix
    type K: ArraySize;

    /// Number of columns in the A matrix
    type L: ArraySize;

    /// Private key range
    type Eta: EtaSize;

    /// Max number of true values in the hint
    type Omega: ArraySize;

    /// Bytes in a packed `t1` vector
    const T1_SIZE: usize = T1::BYTES * Self::K::USIZE;

    /// Bytes in a packed `t0` vector
    const T0_SIZE: usize = T0::BYTES * Self::K::USIZE;

    /// Bytes in a packed `s1` vector
    const S1_SIZE: usize = LeqEta::<Self::Eta>::BYTES * Self::L::USIZE;

    /// Bytes in a packed `s2` vector
    const S2_SIZE: usize = LeqEta::<Self::Eta>::BYTES * Self::K::USIZE;

    /// Bytes in a packed `z` vector
    const Z_SIZE: usize = LeGamma1::BYTES * Self::L::USIZE;

    /// Bytes in a packed `w1` vector
    const W1_SIZE: usize = HighBits::BYTES * Self::K::USIZE;

    /// Bytes in a packed hint
    const HINT_SIZE: usize = Self::Omega::USIZE + Self::K::USIZE;
}

/// Sizes and layout of the packed hint, derived from `K` and `Omega`
pub trait HintParams: ParameterSet {
    type HintSize: ArraySize;

    fn split_hint(y: &EncodedHint<Self>) -> (&EncodedHintIndices<Self>, &EncodedHintCounts<Self>);
}

pub type EncodedHintIndices<P> = Array<u8, <P as ParameterSet>::Omega>;
pub type EncodedHintCounts<P> = Array<u8, <P as ParameterSet>::K>;

/// A hint vector encoded as a byte array
pub type EncodedHint<P> = Array<u8, <P as HintParams>::HintSize>;

impl<P> HintParams for P
where
    P: ParameterSet,
    P::Omega: Add<P::K>,
    Sum<P::Omega, P::K>: ArraySize + Sub<P::Omega, Output = P::K>,
{
    type HintSize = Sum<P::Omega, P::K>;

    fn split_hint(y: &EncodedHint<Self>) -> (&EncodedHintIndices<Self>, &EncodedHintCounts<Self>) {
        y.split_ref()
    }
}
