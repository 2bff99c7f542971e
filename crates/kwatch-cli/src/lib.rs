mod cli;
mod config;
mod io;
mod logging;
mod run;

pub use cli::{Cli, Commands, ConvertCommand, DecodeCommand, EncodeCommand, ObjectKind, OutputFormat};
pub use config::{load_config, load_effective_config, validate_config, ConfigError, KwatchConfig, LoggingConfig};
pub use io::{read_input_events, InputError, InputEvent};
pub use logging::init_logging;
pub use run::{execute_convert, execute_decode, execute_encode, RunError};
