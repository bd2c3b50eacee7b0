pub mod camera;
pub mod clock;
pub mod geometry;
pub mod locations;
pub mod math;
pub mod obj;
pub mod shader;
pub mod texture;
