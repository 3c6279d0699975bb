#![cfg_attr(not(feature = "std"), no_std)]

//! Vertex data and layout descriptions for the quad demo. Nothing in here touches OpenGL, so it
//! can be built and tested without a window or a graphics driver.

pub mod layout;
pub mod quad;

pub use layout::{DrawMode, ParseDrawModeError, VertexAttribute, POSITION_ATTRIBUTE};
pub use quad::{Mesh, QUAD_INDICES, QUAD_TRIANGLES, QUAD_VERTICES};
