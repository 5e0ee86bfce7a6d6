pub mod output;
pub mod scan;
