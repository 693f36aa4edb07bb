//! Triangle-mesh assembly and STL export for generated designs.

pub mod facet;
pub mod mesh;
pub mod stl;

pub use facet::*;
pub use mesh::*;
pub use stl::*;
