use core::fmt::Debug;
use core::ops::{Add, Neg, Sub};
use hybrid_array::{Array, ArraySize, typenum::U256};
use num_traits::PrimInt;

#[cfg(feature = "zeroize")]
use zeroize::Zeroize;

/// A prime-order field `Z_q`.  Implementations are normally produced with [`define_field!`].
pub trait Field: Copy + Default + Debug + PartialEq {
    /// The primitive integer type holding a reduced member of the field
    type Int: PrimInt + Default + Debug + From<u16>;

    /// The modulus
    const Q: Self::Int;

    /// Reduce `x < 2q` to `[0, q)` without branching on `x`
    fn small_reduce(x: Self::Int) -> Self::Int;
}

/// The `define_field` macro creates a zero-sized struct and an implementation of the Field trait
/// for that struct.  The caller must specify:
///
/// * `$field`: The name of the zero-sized struct to be created
/// * `$int`: The primitive integer type to be used to represent members of the field.  It must
///   be unsigned and leave the top bit clear for any value below `2 * $q`.
/// * `$q`: The prime number that defines the field.
#[macro_export]
macro_rules! define_field {
    ($field:ident, $int:ty, $q:literal) => {
        #[derive(Copy, Clone, Default, Debug, PartialEq, Eq)]
        pub struct $field;

        impl $crate::module_lattice::algebra::Field for $field {
            type Int = $int;

            const Q: Self::Int = $q;

            fn small_reduce(x: Self::Int) -> Self::Int {
                // x - q is "negative" exactly when its top bit is set; the mask then adds q back.
                let r = x.wrapping_sub(Self::Q);
                let mask = (r >> (<$int>::BITS - 1)).wrapping_neg();
                r.wrapping_add(mask & Self::Q)
            }
        }
    };
}

/// An `Elem` is a member of the specified prime-order field, always kept in `[0, q)`.  Elements
/// can be added, subtracted and negated; the overloaded operators keep the value reduced using a
/// branch-free conditional subtraction.
#[derive(Copy, Clone, Default, Debug, PartialEq, Eq)]
pub struct Elem<F: Field>(pub F::Int);

impl<F: Field> Elem<F> {
    /// Wrap an integer that the caller knows to be in `[0, q)`
    pub const fn new(x: F::Int) -> Self {
        Self(x)
    }
}

#[cfg(feature = "zeroize")]
impl<F: Field> Zeroize for Elem<F>
where
    F::Int: Zeroize,
{
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

impl<F: Field> Neg for Elem<F> {
    type Output = Elem<F>;

    fn neg(self) -> Elem<F> {
        Elem(F::small_reduce(F::Q - self.0))
    }
}

impl<F: Field> Add<Elem<F>> for Elem<F> {
    type Output = Elem<F>;

    fn add(self, rhs: Elem<F>) -> Elem<F> {
        Elem(F::small_reduce(self.0 + rhs.0))
    }
}

impl<F: Field> Sub<Elem<F>> for Elem<F> {
    type Output = Elem<F>;

    fn sub(self, rhs: Elem<F>) -> Elem<F> {
        Elem(F::small_reduce(self.0 + F::Q - rhs.0))
    }
}

/// A `Polynomial` is a member of the ring `R_q = Z_q[X] / (X^256 + 1)`, stored as its 256
/// coefficients.  The coefficient type `C` records which representative of each residue class
/// is held, so that routines with different range requirements cannot be mixed up.
///
/// Polynomials can be added, subtracted and negated whenever their coefficients can.  We do
/// not define multiplication of polynomials here.
#[derive(Clone, Default, Debug, PartialEq, Eq)]
pub struct Polynomial<C>(pub Array<C, U256>);

impl<C> Polynomial<C> {
    pub const fn new(x: Array<C, U256>) -> Self {
        Self(x)
    }
}

impl<C: Copy> Polynomial<C> {
    /// Apply `f` to every coefficient
    pub fn map<D>(&self, f: impl Fn(C) -> D) -> Polynomial<D> {
        Polynomial(self.0.iter().map(|&c| f(c)).collect())
    }
}

#[cfg(feature = "zeroize")]
impl<C: Zeroize> Zeroize for Polynomial<C> {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

impl<C: Copy + Add<Output = C>> Add<&Polynomial<C>> for &Polynomial<C> {
    type Output = Polynomial<C>;

    fn add(self, rhs: &Polynomial<C>) -> Polynomial<C> {
        Polynomial(
            self.0
                .iter()
                .zip(rhs.0.iter())
                .map(|(&x, &y)| x + y)
                .collect(),
        )
    }
}

impl<C: Copy + Sub<Output = C>> Sub<&Polynomial<C>> for &Polynomial<C> {
    type Output = Polynomial<C>;

    fn sub(self, rhs: &Polynomial<C>) -> Polynomial<C> {
        Polynomial(
            self.0
                .iter()
                .zip(rhs.0.iter())
                .map(|(&x, &y)| x - y)
                .collect(),
        )
    }
}

impl<C: Copy + Neg<Output = C>> Neg for &Polynomial<C> {
    type Output = Polynomial<C>;

    fn neg(self) -> Polynomial<C> {
        Polynomial(self.0.iter().map(|&x| -x).collect())
    }
}

/// A `Vector` is a vector of `K` polynomials sharing one coefficient representation.  Vectors
/// support the same operations as their polynomials, component-wise.
#[derive(Clone, Default, Debug, PartialEq, Eq)]
pub struct Vector<C, K: ArraySize>(pub Array<Polynomial<C>, K>);

impl<C, K: ArraySize> Vector<C, K> {
    pub const fn new(x: Array<Polynomial<C>, K>) -> Self {
        Self(x)
    }
}

impl<C: Copy, K: ArraySize> Vector<C, K> {
    /// Apply `f` to every coefficient of every polynomial
    pub fn map<D>(&self, f: impl Fn(C) -> D) -> Vector<D, K> {
        Vector(self.0.iter().map(|p| p.map(&f)).collect())
    }
}

#[cfg(feature = "zeroize")]
impl<C: Zeroize, K: ArraySize> Zeroize for Vector<C, K> {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

impl<C: Copy + Add<Output = C>, K: ArraySize> Add<&Vector<C, K>> for &Vector<C, K> {
    type Output = Vector<C, K>;

    fn add(self, rhs: &Vector<C, K>) -> Vector<C, K> {
        Vector(
            self.0
                .iter()
                .zip(rhs.0.iter())
                .map(|(x, y)| x + y)
                .collect(),
        )
    }
}

impl<C: Copy + Sub<Output = C>, K: ArraySize> Sub<&Vector<C, K>> for &Vector<C, K> {
    type Output = Vector<C, K>;

    fn sub(self, rhs: &Vector<C, K>) -> Vector<C, K> {
        Vector(
            self.0
                .iter()
                .zip(rhs.0.iter())
                .map(|(x, y)| x - y)
                .collect(),
        )
    }
}

impl<C: Copy + Neg<Output = C>, K: ArraySize> Neg for &Vector<C, K> {
    type Output = Vector<C, K>;

    fn neg(self) -> Vector<C, K> {
        Vector(self.0.iter().map(|x| -x).collect())
    }
}
