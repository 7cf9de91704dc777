pub mod coding;
pub mod cursor;
pub mod error;
