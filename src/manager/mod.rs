mod manager;

pub use manager::*;
