pub mod bim;
pub mod chromosome;
pub mod indexed_read;
pub mod ranges;
