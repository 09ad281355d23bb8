//! The sparse challenge polynomial `c`: exactly [`TAU`] coefficients are `±1`, the rest zero.
//!
//! The packed form is a 32-byte mask of the nonzero positions followed by a little-endian
//! 64-bit word whose bit `k` is set when the `k`-th nonzero coefficient (in order of increasing
//! degree) is `-1`.

use hybrid_array::{Array, typenum::U40};

use crate::algebra::{Elem, Polynomial, Q};
use crate::error::{Error, Result, check_length};

/// Number of nonzero coefficients in a challenge
pub const TAU: usize = 60;

/// A challenge polynomial encoded as a byte array
pub type EncodedChallenge = Array<u8, U40>;

/// Pack a challenge.  The caller must ensure `c` has exactly `TAU` coefficients, each `1` or
/// `q - 1`.
pub fn pack_challenge(c: &Polynomial<Elem>) -> EncodedChallenge {
    let mut y = EncodedChallenge::default();
    let mut signs = 0u64;
    let mut k = 0;
    for (i, x) in c.0.iter().enumerate() {
        if x.0 == 0 {
            continue;
        }

        y[i >> 3] |= 1 << (i & 7);
        if x.0 == Q - 1 {
            signs |= 1 << k;
        }
        k += 1;
    }

    debug_assert_eq!(k, TAU);
    y[32..].copy_from_slice(&signs.to_le_bytes());
    y
}

/// Unpack a challenge.  Returns `None` unless exactly `TAU` positions are marked and every sign
/// bit past the `TAU`-th is clear.
///
/// This accepts fewer encodings than a decoder that only checks the unused sign bits: masks of
/// any other weight are rejected too, so every accepted encoding is the packing of its result.
pub fn unpack_challenge(y: &EncodedChallenge) -> Option<Polynomial<Elem>> {
    let (mask, signs) = y.split_at(32);
    let mut word = [0u8; 8];
    word.copy_from_slice(signs);
    let mut signs = u64::from_le_bytes(word);

    if signs >> TAU != 0 {
        return None;
    }

    let weight: u32 = mask.iter().map(|b| b.count_ones()).sum();
    if usize::try_from(weight).ok() != Some(TAU) {
        return None;
    }

    let mut c = Polynomial::<Elem>::default();
    for (i, x) in c.0.iter_mut().enumerate() {
        if (mask[i >> 3] >> (i & 7)) & 1 == 1 {
            // 1 ^ (1 ^ (q - 1)) = q - 1 when the sign bit is set
            let negate = 0u32.wrapping_sub(u32::from(signs & 1 == 1));
            *x = Elem::new(1 ^ (negate & (1 ^ (Q - 1))));
            signs >>= 1;
        }
    }

    Some(c)
}

/// [`unpack_challenge`] from an untrusted slice
pub fn decode_challenge(bytes: &[u8]) -> Result<Polynomial<Elem>> {
    check_length(40, bytes.len())?;
    let y = <&EncodedChallenge>::try_from(bytes).map_err(|_| Error::InvalidLength {
        expected: 40,
        got: bytes.len(),
    })?;

    unpack_challenge(y).ok_or(Error::NonCanonical)
}
