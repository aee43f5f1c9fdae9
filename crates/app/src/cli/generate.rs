use clap::Args;
use labels::validation::LabelInput;
use labels_app::{
    context::AppContext,
    generator::GenerateError,
    workbench::{GenerateOutcome, WorkbenchError},
};

use super::{
    actions::{self, ExportFlags},
    error_chain,
};

#[derive(Debug, Args)]
pub(crate) struct GenerateArgs {
    /// Item name printed at the top of the label
    #[arg(long)]
    name: String,

    /// 12-digit item code; the check digit is added automatically
    #[arg(long)]
    code: String,

    /// Maximum retail price
    #[arg(long)]
    mrp: String,

    #[command(flatten)]
    exports: ExportFlags,
}

pub(crate) async fn run(ctx: &AppContext, args: GenerateArgs) -> Result<(), String> {
    let mut workbench = ctx.workbench();

    workbench.edit_input(LabelInput::new(args.name, args.code, args.mrp));

    match workbench.generate().await {
        Ok(GenerateOutcome::Saved(record)) => {
            println!("saved: {}", record.id);
            println!("item_name: {}", record.item_name);
            println!("item_code: {}", record.item_code);
            println!("mrp: {}", record.mrp);
        }
        Ok(GenerateOutcome::AlreadySaved(code)) => {
            println!("item code {code} is already saved; label generated without saving");
        }
        Err(WorkbenchError::Generate(GenerateError::Validation(error))) => {
            return Err(error.to_string());
        }
        Err(error) => {
            return Err(format!("failed to generate label: {}", error_chain(&error)));
        }
    }

    if let Some(label) = workbench.label() {
        println!("barcode: {}", label.symbol.text());
    }

    actions::run(&workbench, &args.exports).await
}
