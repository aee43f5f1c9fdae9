use clap::{Parser, Subcommand};
use labels_app::{
    config::{AppConfig, observability::LoggingConfig},
    context::AppContext,
};

use crate::observability;

mod actions;
mod delete;
mod export;
mod generate;
mod saved;
mod show;

#[derive(Debug, Parser)]
#[command(name = "labels", about = "EAN-13 shelf label generator", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    config: AppConfig,

    #[command(flatten)]
    logging: LoggingConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Generate a label, save it and optionally export it
    Generate(generate::GenerateArgs),
    /// List saved barcodes
    Saved(saved::SavedArgs),
    /// Show the preview symbol of a saved barcode
    Show(show::ShowArgs),
    /// Delete a saved barcode
    Delete(delete::DeleteArgs),
    /// Export a saved barcode without saving it again
    Export(export::ExportArgs),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        observability::init_subscriber(&self.logging)
            .map_err(|error| format!("failed to initialise logging: {error}"))?;

        let ctx = AppContext::from_config(&self.config)
            .await
            .map_err(|error| format!("failed to start: {}", error_chain(&error)))?;

        match self.command {
            Commands::Generate(args) => generate::run(&ctx, args).await,
            Commands::Saved(args) => saved::run(&ctx, args).await,
            Commands::Show(args) => show::run(&ctx, args).await,
            Commands::Delete(args) => delete::run(&ctx, args).await,
            Commands::Export(args) => export::run(&ctx, args).await,
        }
    }
}

/// An error and its sources joined with `: `.
pub(crate) fn error_chain(error: &dyn std::error::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();

    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }

    message
}
