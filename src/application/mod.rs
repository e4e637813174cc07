pub mod error;
pub mod service;
pub mod view;
