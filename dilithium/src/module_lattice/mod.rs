//! Generic building blocks for module lattices: prime fields, polynomials over them, vectors of
//! polynomials, and the little-endian bit layout used to serialize polynomial coefficients.
//!
//! Nothing in here knows about a particular modulus or parameter set.  The scheme-specific
//! arithmetic lives in [`crate::algebra`], built on top of these types.

/// Fields, field elements, polynomials and vectors
pub mod algebra;

/// Fixed-width bit packing of polynomial coefficients
pub mod encode;

/// Integer helpers
pub(crate) mod util;
