//! Commands that act on the working directory rather than on a model.
//!
//! - **init**: write a default `.metainherit.toml`

pub mod init;

pub use init::{default_config_contents, init_config, init_config_in};
