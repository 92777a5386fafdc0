pub mod data_files;
pub mod route_cache;
