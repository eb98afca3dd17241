pub mod clock;
pub mod mood;
pub mod stress_map;
pub mod upstream;
