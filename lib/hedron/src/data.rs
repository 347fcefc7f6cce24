mod mesh;
pub use mesh::*;

use std::{fmt::Display, str::FromStr};

use nalgebra::{Point3, Scalar, Vector3, Vector4};
use num_traits::Float;

/// A vertex position.
pub type Position<Real> = Point3<Real>;
/// A vertex normal. Not necessarily normalized; stored as read.
pub type Normal<Real> = Vector3<Real>;
/// An 8-bit-per-channel vertex color.
pub type Rgba = Vector4<u8>;

/// Floating-point types usable as vertex coordinates.
pub trait Coordinate: Scalar + Float + FromStr + Display {
    /// The name of this type as a PLY scalar property.
    const PLY_TYPE: &'static str;
}

macro_rules! impl_coordinate {
    ($Target:ty: $name:literal) => {
        impl Coordinate for $Target {
            const PLY_TYPE: &'static str = $name;
        }
    };
}

impl_coordinate!(f32: "float");
impl_coordinate!(f64: "double");
