//! Grayscale image handling for bitlines (I/O, raster mapping, preprocessing).

pub mod io;
pub mod preprocess;
pub mod raster;
pub mod resize;
