pub mod arr_helpers;
pub mod error;
pub mod genotype;
pub mod index;
pub mod io;
