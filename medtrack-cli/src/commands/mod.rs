mod clear;
mod config_cmd;
mod person;

pub use clear::ClearCommand;
pub use config_cmd::ConfigCommand;
pub use person::PersonCommand;
