pub mod json_store;
pub mod local_storage;
pub mod store;
