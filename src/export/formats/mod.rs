pub mod entropy;
pub mod significance;
