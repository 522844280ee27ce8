pub mod filter;
pub mod format;
pub mod parse;
pub mod writer;
