use std::path::PathBuf;

use clap::Args;
use labels_app::{context::AppContext, domain::barcodes::models::BarcodeUuid};

use super::error_chain;

#[derive(Debug, Args)]
pub(crate) struct ShowArgs {
    /// Saved barcode ID
    id: BarcodeUuid,

    /// Write the preview SVG to this file instead of stdout
    #[arg(long, value_name = "FILE")]
    output: Option<PathBuf>,
}

pub(crate) async fn run(ctx: &AppContext, args: ShowArgs) -> Result<(), String> {
    let workbench = ctx.workbench();

    let record = ctx
        .barcodes
        .get_barcode(args.id)
        .await
        .map_err(|error| format!("failed to load barcode {}: {error}", args.id))?;

    let symbol = workbench
        .preview_record(&record)
        .map_err(|error| format!("failed to render barcode: {}", error_chain(&error)))?;

    println!("item_name: {}", record.item_name);
    println!("item_code: {}", record.item_code);
    println!("barcode: {}", symbol.text());
    println!("mrp: {}", record.mrp);
    println!("created_at: {}", record.timestamp);

    match args.output {
        Some(path) => {
            tokio::fs::write(&path, symbol.to_svg())
                .await
                .map_err(|error| format!("failed to write {}: {error}", path.display()))?;

            println!("preview: {}", path.display());
        }
        None => println!("{}", symbol.to_svg()),
    }

    Ok(())
}
