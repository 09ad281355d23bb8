use hybrid_array::{Array, typenum::U32};

/// A 32-byte seed
pub type B32 = Array<u8, U32>;
