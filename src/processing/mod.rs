pub mod color;
pub mod sampler;
pub mod statistics;
