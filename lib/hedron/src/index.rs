use num_traits::{AsPrimitive, PrimInt, Unsigned};

/// Trait for types which can act as indices into a [Mesh](crate::Mesh)'s vertex list.
pub trait ArrayIndex: PrimInt + Unsigned + AsPrimitive<usize> + std::fmt::Debug + 'static {
    /// Convert a `usize` position into this index type, or `None` if it doesn't fit.
    #[inline]
    fn from_usize(value: usize) -> Option<Self> {
        num_traits::cast(value)
    }
}
impl<P> ArrayIndex for P where P: PrimInt + Unsigned + AsPrimitive<usize> + std::fmt::Debug + 'static {}
