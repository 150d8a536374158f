//! Pseudo-random number generation and distributions.
//!
//! Used for randomized testing and benchmarking of transform sequences.
//! The generator is deterministic given its seed, so a failing sequence can
//! always be replayed.

use core::{array, ops::Range};

use crate::math::angle::{Angle, rads, turns};
use crate::math::float::f32 as fp;
use crate::math::quat::Quat;
use crate::math::vec::{Vec3, Vector, vec3};

//
// Traits and types
//

type DefaultRng = Xorshift64;

/// Trait for generating values sampled from a probability distribution.
pub trait Distrib<R = DefaultRng>: Clone {
    /// The type of the elements of the sample space of `Self`, also called
    /// "outcomes".
    type Sample;

    /// Returns a pseudo-random value sampled from `self`.
    fn sample(&self, rng: &mut R) -> Self::Sample;

    /// Returns an iterator that yields samples from `self`.
    fn iter(&self, rng: R) -> Iter<Self, R> {
        Iter(self.clone(), rng)
    }
}

/// A pseudo-random number generator (PRNG) that uses a [Xorshift algorithm][^1]
/// to generate 64 bits of randomness at a time, represented by a `u64`.
///
/// Xorshift uses only three shifts and three xor operations per generated
/// number. Xorshift64 has a period of 2<sup>64</sup>-1: it yields every
/// number in the interval [1, 2<sup>64</sup>) exactly once before repeating.
///
/// [^1]: Marsaglia, G. (2003). Xorshift RNGs. Journal of Statistical Software,
///     8(14), 1–6. <https://doi.org/10.18637/jss.v008.i14>
#[derive(Copy, Clone, Debug)]
#[repr(transparent)]
pub struct Xorshift64(pub u64);

/// A uniform distribution of values in the given range.
#[derive(Clone, Debug)]
pub struct Uniform<T>(pub Range<T>);

/// A distribution of 3-vectors on the (surface of) the unit sphere.
/// Useful as rotation axes.
#[derive(Copy, Clone, Debug, Default)]
pub struct UnitSphere;

/// A uniform distribution of unit quaternions, that is, of rotations.
#[derive(Copy, Clone, Debug, Default)]
pub struct UnitQuat;

/// Iterator returned by the [Distrib::iter()] method.
pub struct Iter<D, R>(D, R);

//
// Inherent impls
//

impl Xorshift64 {
    /// A random 64-bit prime, used to initialize the generator returned by
    /// [`Xorshift64::default()`].
    pub const DEFAULT_SEED: u64 = 378682147834061;

    /// Returns a new `Xorshift64` seeded by the given number.
    ///
    /// Two `Xorshift64` instances generate the same sequence of pseudo-random
    /// numbers if and only if they were created with the same seed.
    ///
    /// # Examples
    /// ```
    /// # use lockstep_core::math::rand::Xorshift64;
    /// let mut g = Xorshift64::from_seed(123);
    /// assert_eq!(g.next_bits(), 133101616827);
    /// assert_eq!(g.next_bits(), 12690785413091508870);
    /// assert_eq!(g.next_bits(), 7516749944291143043);
    /// ```
    ///
    /// # Panics
    ///
    /// If `seed` equals 0.
    pub fn from_seed(seed: u64) -> Self {
        assert_ne!(seed, 0, "xorshift seed cannot be zero");
        Self(seed)
    }

    /// Returns 64 bits of pseudo-randomness.
    pub fn next_bits(&mut self) -> u64 {
        let Self(x) = self;
        *x ^= *x << 13;
        *x ^= *x >> 7;
        *x ^= *x << 17;
        *x
    }
}

//
// Foreign trait impls
//

impl<D: Distrib> Iterator for Iter<D, DefaultRng> {
    type Item = D::Sample;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.0.sample(&mut self.1))
    }
}

impl Default for Xorshift64 {
    fn default() -> Self {
        Self::from_seed(Self::DEFAULT_SEED)
    }
}

//
// Local trait impls
//

impl Distrib for Uniform<usize> {
    type Sample = usize;

    /// Returns a uniformly distributed `usize` in the given range.
    fn sample(&self, rng: &mut DefaultRng) -> usize {
        let Range { start, end } = self.0;
        // Modulo bias is negligible for the small ranges used here
        (rng.next_bits() % (end - start) as u64) as usize + start
    }
}

impl Distrib for Uniform<f32> {
    type Sample = f32;

    /// Returns a uniformly distributed `f32` in the given range.
    fn sample(&self, rng: &mut DefaultRng) -> f32 {
        let Range { start, end } = self.0;
        // Bit repr of a random f32 in range 1.0..2.0
        let bits = 127 << 23 | rng.next_bits() >> 41;
        let unit = f32::from_bits(bits as u32) - 1.0;
        unit * (end - start) + start
    }
}

impl Distrib for Uniform<Angle> {
    type Sample = Angle;

    /// Returns a uniformly distributed angle in the given range.
    fn sample(&self, rng: &mut DefaultRng) -> Angle {
        let Range { start, end } = &self.0;
        rads(Uniform(start.to_rads()..end.to_rads()).sample(rng))
    }
}

impl<const N: usize> Distrib for Uniform<[f32; N]> {
    type Sample = [f32; N];

    /// Returns an array of values that represents a uniformly distributed
    /// point within the N-dimensional box bounded by `self.0`.
    fn sample(&self, rng: &mut DefaultRng) -> [f32; N] {
        array::from_fn(|i| Uniform(self.0.start[i]..self.0.end[i]).sample(rng))
    }
}

impl<Sp, const N: usize> Distrib for Uniform<Vector<[f32; N], Sp>> {
    type Sample = Vector<[f32; N], Sp>;

    /// Returns a uniformly distributed vector within the box bounded by
    /// `self.0`.
    fn sample(&self, rng: &mut DefaultRng) -> Self::Sample {
        Uniform(self.0.start.0..self.0.end.0).sample(rng).into()
    }
}

impl Distrib for UnitSphere {
    type Sample = Vec3;

    /// Returns a unit vector. Points are drawn from the unit ball by
    /// rejection, then projected onto the sphere.
    fn sample(&self, rng: &mut DefaultRng) -> Vec3 {
        let d = Uniform([-1.0f32; 3]..[1.0; 3]);
        loop {
            let v = Vec3::from(d.sample(rng));
            if v.len_sqr() <= 1.0 {
                if let Some(n) = v.try_normalize() {
                    return n;
                }
            }
        }
    }
}

impl Distrib for UnitQuat {
    type Sample = Quat;

    /// Returns a uniformly distributed unit quaternion.
    fn sample(&self, rng: &mut DefaultRng) -> Quat {
        // Shoemake, K. (1992). Uniform random rotations.
        let u = Uniform([0.0f32; 3]..[1.0; 3]).sample(rng);
        let (a, b) = (fp::sqrt(1.0 - u[0]), fp::sqrt(u[0]));
        let (s1, c1) = turns(u[1]).sin_cos();
        let (s2, c2) = turns(u[2]).sin_cos();
        Quat::new(b * c2, vec3(a * s1, a * c1, b * s2))
    }
}
