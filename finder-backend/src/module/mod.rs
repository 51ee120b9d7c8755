pub mod availability;
pub mod catalog;
pub mod scheduled;
pub mod storage;
