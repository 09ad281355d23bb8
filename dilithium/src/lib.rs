#![no_std]
#![doc = include_str!("../README.md")]
#![doc(
    html_logo_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg",
    html_favicon_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg"
)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![warn(clippy::pedantic)] // Be pedantic by default
#![warn(clippy::integer_division_remainder_used)] // Be judicious about using `/` and `%`
#![allow(clippy::module_name_repetitions)] // `HintParams`, `EncodedHint` and friends read better
#![allow(clippy::must_use_candidate)] // Nearly every function here is pure
#![allow(clippy::clone_on_copy)] // Be explicit about moving data

//! # Usage
//!
//! Sample a uniform polynomial, split off its low bits and pack the high part:
//!
//! ```
//! use dilithium_core::{B32, BaseField};
//! use dilithium_core::encode::{BitPack, T0, T1};
//! use dilithium_core::sampling::{NaturalOrder, derive_uniform};
//!
//! let seed = B32::default();
//! let t = derive_uniform::<BaseField, NaturalOrder>(&seed, 0, 0);
//! let (t0, t1) = t.power2round();
//!
//! let packed = T1::pack(&t1);
//! assert_eq!(packed.len(), 288);
//! assert_eq!(T1::unpack(&packed), t1);
//! assert_eq!(T0::unpack(&T0::pack(&t0)), t0);
//! ```
//!
//! Decoders of attacker-controlled data reject anything that is not the unique encoding of a
//! value:
//!
//! ```
//! use dilithium_core::{Error, Hint, Mode3};
//!
//! let mut bytes = [0u8; 101];
//! bytes[100] = 1; // one hint bit claimed, at position 0 of the last polynomial
//! assert!(Hint::<Mode3>::try_from(&bytes[..]).is_ok());
//!
//! bytes[1] = 7; // garbage in the unused position slots
//! assert_eq!(Hint::<Mode3>::try_from(&bytes[..]), Err(Error::NonCanonical));
//! ```

pub mod algebra;

pub mod challenge;

/// Fixed-width coefficient codecs
pub mod encode;

/// Errors from the slice-based decoders
pub mod error;

/// Hint vectors and their packed form
pub mod hint;

/// Generic module-lattice building blocks
pub mod module_lattice;

/// Parameter sets and the sizes they imply
pub mod param;

pub mod sampling;

mod crypto;
mod util;

use hybrid_array::typenum::{U2, U3, U4, U5, U6, U7, U64, U80, U96, U120};

pub use hybrid_array as array;

pub use crate::algebra::{BaseField, Centered, Elem, Le2q, Polynomial, Vector};
pub use crate::error::{Error, Result};
pub use crate::hint::Hint;
pub use crate::param::{CbdSamplingSize, EtaSize, HintParams, ParameterSet};
pub use crate::util::B32;

/// `Mode1` is the smallest parameter set.
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Mode1;

impl ParameterSet for Mode1 {
    type K = U3;
    type L = U2;
    type Eta = U7;
    type Omega = U64;
}

/// `Mode2` is the parameter set with `K = 4`, `L = 3`.
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Mode2;

impl ParameterSet for Mode2 {
    type K = U4;
    type L = U3;
    type Eta = U6;
    type Omega = U80;
}

/// `Mode3` is the recommended parameter set.
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Mode3;

impl ParameterSet for Mode3 {
    type K = U5;
    type L = U4;
    type Eta = U5;
    type Omega = U96;
}

/// `Mode4` is the largest parameter set.
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Mode4;

impl ParameterSet for Mode4 {
    type K = U6;
    type L = U5;
    type Eta = U3;
    type Omega = U120;
}
