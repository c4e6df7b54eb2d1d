pub mod descmap;

pub use descmap::DescmapConfig;
