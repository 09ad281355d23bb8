use hybrid_array::Array;
use sha3::digest::{ExtendableOutput, XofReader};

use crate::module_lattice::encode::ArraySize;
use crate::util::B32;

/// An extendable-output function used in two phases: first all input is absorbed, then output
/// is squeezed in as many pieces as the caller likes.  Absorbing after the first squeeze is a
/// programming error.
pub(crate) enum ShakeState<Shake: ExtendableOutput> {
    Absorbing(Shake),
    Squeezing(Shake::Reader),
}

impl<Shake: ExtendableOutput + Default> Default for ShakeState<Shake> {
    fn default() -> Self {
        Self::Absorbing(Shake::default())
    }
}

impl<Shake: ExtendableOutput + Default + Clone> ShakeState<Shake> {
    /// The stream over `seed || domain`, where `domain` is the nonce or matrix position
    pub(crate) fn seeded(seed: &B32, domain: &[u8]) -> Self {
        Self::default().absorb(seed).absorb(domain)
    }

    pub(crate) fn absorb(mut self, input: &[u8]) -> Self {
        match &mut self {
            Self::Absorbing(sponge) => sponge.update(input),
            Self::Squeezing(_) => unreachable!(),
        }

        self
    }

    fn reader(&mut self) -> &mut Shake::Reader {
        if let Self::Absorbing(sponge) = self {
            *self = Self::Squeezing(sponge.clone().finalize_xof());
        }

        match self {
            Self::Squeezing(reader) => reader,
            Self::Absorbing(_) => unreachable!(),
        }
    }

    pub(crate) fn squeeze(&mut self, output: &mut [u8]) -> &mut Self {
        self.reader().read(output);
        self
    }

    pub(crate) fn squeeze_new<N: ArraySize>(&mut self) -> Array<u8, N> {
        let mut v = Array::default();
        self.squeeze(&mut v);
        v
    }
}
