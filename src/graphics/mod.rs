pub mod opengl;
pub mod quad;
pub mod utils;
pub mod window;
