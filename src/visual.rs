//! Visualizer core: the shared sample ring plus the oscilloscope and
//! spectrum algorithms that paint it into the terminal grid.

pub mod analysis;
pub mod ring;
pub mod scope;
pub mod spectrum;

pub use ring::SampleRing;
