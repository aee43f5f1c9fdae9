use clap::Args;
use labels_app::{context::AppContext, domain::barcodes::models::BarcodeUuid};

use super::error_chain;

#[derive(Debug, Args)]
pub(crate) struct DeleteArgs {
    /// Saved barcode ID
    id: BarcodeUuid,
}

pub(crate) async fn run(ctx: &AppContext, args: DeleteArgs) -> Result<(), String> {
    let mut workbench = ctx.workbench();

    let removed = workbench
        .delete(args.id)
        .await
        .map_err(|error| format!("failed to delete barcode: {}", error_chain(&error)))?;

    match removed {
        Some(record) => println!("deleted: {} ({})", record.item_name, record.item_code),
        None => println!("no saved barcode with id {}", args.id),
    }

    Ok(())
}
