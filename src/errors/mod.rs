pub mod error_mapper;

pub use error_mapper::load_error_report;
