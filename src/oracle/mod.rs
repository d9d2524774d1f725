pub mod crc;
pub mod geometry;
pub mod golden;
