mod color_choice;
mod log_level;
mod output_format;

pub use color_choice::ColorChoice;
pub use log_level::LogLevel;
pub use output_format::OutputFormat;
