pub mod harness;
pub mod upstream;
