use clap::Args;
use labels_app::{context::AppContext, domain::barcodes::models::BarcodeUuid};

use super::{
    actions::{self, ExportFlags},
    error_chain,
};

#[derive(Debug, Args)]
pub(crate) struct ExportArgs {
    /// Saved barcode ID
    id: BarcodeUuid,

    #[command(flatten)]
    exports: ExportFlags,
}

pub(crate) async fn run(ctx: &AppContext, args: ExportArgs) -> Result<(), String> {
    let mut workbench = ctx.workbench();

    let label = workbench
        .open_saved(args.id)
        .await
        .map_err(|error| format!("failed to open barcode {}: {}", args.id, error_chain(&error)))?;

    println!("barcode: {}", label.symbol.text());

    actions::run(&workbench, &args.exports).await
}
