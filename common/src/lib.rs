pub mod file_format;
pub mod float_ext;
pub mod log_setup;
pub mod serde;
