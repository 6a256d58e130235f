pub mod static_paths;
