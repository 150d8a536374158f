//! Tag types for the spaces that vectors and matrices live in.

use core::fmt::{self, Debug, Formatter};
use core::marker::PhantomData;

/// Tag type for real vector spaces (Euclidean spaces) of dimension `DIM`.
/// For example, the type `Real<3>` corresponds to ℝ³.
///
/// The `Basis` parameter distinguishes otherwise identical spaces, such as
/// model space and world space, from each other.
pub struct Real<const DIM: usize, Basis = ()>(PhantomData<Basis>);

/// Tag type for the projective 4-space over reals, 𝗣<sub>4</sub>(ℝ).
/// Perspective projection maps points of a real 3-space into this space;
/// dividing by the `w` component maps them back out.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Proj4;

// Manual impls so that `Basis` needs no bounds of its own.

impl<const DIM: usize, B> Copy for Real<DIM, B> {}

impl<const DIM: usize, B> Clone for Real<DIM, B> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<const DIM: usize, B> Default for Real<DIM, B> {
    fn default() -> Self {
        Self(PhantomData)
    }
}

impl<const DIM: usize, B> PartialEq for Real<DIM, B> {
    fn eq(&self, _: &Self) -> bool {
        true
    }
}

impl<const DIM: usize, B: Debug + Default> Debug for Real<DIM, B> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        const DIMS: [&str; 5] = ["⁰", "¹", "²", "³", "⁴"];
        write!(f, "ℝ{}", DIMS.get(DIM).unwrap_or(&"ⁿ"))?;
        let basis = alloc::format!("{:?}", B::default());
        if basis != "()" {
            write!(f, "<{basis}>")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use alloc::format;

    use super::*;

    #[derive(Debug, Default)]
    struct Tag;

    #[test]
    fn real_debug() {
        assert_eq!(format!("{:?}", Real::<3>::default()), "ℝ³");
        assert_eq!(format!("{:?}", Real::<2, Tag>::default()), "ℝ²<Tag>");
    }
}
