// Library exports for the dots and boxes search engine
// The binaries and integration tests drive the engine through these modules

pub mod board;
pub mod config;
pub mod dispatch;
pub mod driver;
pub mod geometry;
pub mod moves;
pub mod report;
pub mod search;
pub mod simple_profiler;
pub mod types;
