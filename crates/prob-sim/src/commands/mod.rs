pub mod generate;
pub mod pmf;
pub mod summarize;
pub mod version;
