/// Safely truncate an unsigned integer value to shorter representation
pub trait Truncate<T> {
    fn truncate(x: T) -> Self;
}

macro_rules! define_truncate {
    ($from:ident, $to:ident) => {
        impl Truncate<$from> for $to {
            #[allow(clippy::cast_possible_truncation)]
            #[allow(clippy::as_conversions)]
            fn truncate(x: $from) -> $to {
                // The high-order bits are cleared first, so the cast can never lose information.
                (x & $from::from($to::MAX)) as $to
            }
        }
    };
}

define_truncate!(u32, u16);
define_truncate!(u128, u32);
define_truncate!(usize, u8);
