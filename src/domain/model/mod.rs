pub mod book;
pub mod collation;
pub mod library;
pub mod sort;
