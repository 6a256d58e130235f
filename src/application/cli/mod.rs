pub mod arguments;
pub mod run;

pub use arguments::Cli;
