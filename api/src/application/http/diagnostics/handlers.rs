pub mod debug_water;

pub use debug_water::{__path_debug_water, debug_water};
