//! Procedural design generation: grids, base shapes, textures and distortions.

pub mod design;
pub mod grid;
pub mod params;
pub mod shapes;
pub mod spline;
pub mod texture;
pub mod transform;

pub use design::*;
pub use grid::*;
pub use params::*;
pub use shapes::*;
pub use spline::*;
pub use texture::*;
pub use transform::*;
