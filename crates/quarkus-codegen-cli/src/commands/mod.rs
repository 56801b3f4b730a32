//! CLI command implementations for quarkus-codegen.
//!
//! Each module corresponds to a subcommand (`quarkus-codegen <command>`).

pub mod generate;
pub mod init;
pub mod templates;
