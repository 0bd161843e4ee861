pub mod authmw;
pub mod cors;
