pub mod errors;
pub mod grouping;
pub mod order;
pub mod ports;
