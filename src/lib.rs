//! Conversion of Wavefront OBJ meshes to ASCII PLY.
//!
//! The pipeline is strictly linear: [validate_input] → [OBJ reader](hedron::de::obj) →
//! [PLY writer](hedron::ser::ply). The first failure ends the conversion, and the destination is
//! only replaced once a complete document has been written.
#![cfg_attr(not(debug_assertions), warn(missing_docs))]

pub mod error;
pub use error::Error;

mod validate;
pub use validate::*;

mod convert;
pub use convert::*;

pub use hedron;
