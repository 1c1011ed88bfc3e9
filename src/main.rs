use anyhow::Result;
use clap::Parser;
use metainherit::cli::{Cli, Commands, InterfacesConfig, ResolveConfig};

fn main() -> Result<()> {
    let cli = Cli::parse();
    metainherit::cli::init_logging(cli.verbose);

    match cli.command {
        Commands::Resolve {
            model,
            type_name,
            method,
            params,
            declaring,
            config,
            only,
            include_class,
            include_superclasses,
            include_interfaces,
            format,
        } => metainherit::cli::handle_resolve_command(ResolveConfig {
            model,
            type_name,
            method,
            params,
            declaring,
            config,
            only,
            include_class,
            include_superclasses,
            include_interfaces,
            format,
        }),
        Commands::Interfaces {
            model,
            type_name,
            method,
            params,
            kind,
            format,
        } => metainherit::cli::handle_interfaces_command(InterfacesConfig {
            model,
            type_name,
            method,
            params,
            kind,
            format,
        }),
        Commands::Check { model } => metainherit::cli::handle_check_command(&model),
        Commands::Init { force } => metainherit::commands::init::init_config(force),
    }
}
