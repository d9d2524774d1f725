pub mod driver;
pub mod dump;
pub mod probe;
pub mod report;
