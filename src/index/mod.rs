pub mod loc;
pub mod multi;
pub mod sorted;
pub mod unique;
