// Text I/O operations

pub mod csv;
pub mod delimited;
