// Reusable library API, shared by the CLI and the bench/doc binaries
pub mod assignment;
pub mod consistency;
pub mod domain;
pub mod errors;
pub mod log;
pub mod puzzle;
pub mod render;
pub mod search;
pub mod slot;
pub mod solver;
pub mod word_list;
