pub mod cursor;
pub mod ipv4;
pub mod pseudo;
