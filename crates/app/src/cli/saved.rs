use clap::Args;
use labels_app::{
    context::AppContext,
    domain::barcodes::models::BarcodeRecord,
    workbench::View,
};
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};

#[derive(Debug, Args)]
pub(crate) struct SavedArgs {
    /// Only show items whose name or code contains this text
    #[arg(long, value_name = "QUERY")]
    search: Option<String>,
}

pub(crate) async fn run(ctx: &AppContext, args: SavedArgs) -> Result<(), String> {
    let mut workbench = ctx.workbench();

    workbench.show(View::Saved);
    workbench.set_filter(args.search.unwrap_or_default());

    let title = workbench.saved_tab_title().await;
    let records = workbench.saved_barcodes().await;

    println!("{title}");

    if records.is_empty() {
        if workbench.filter().trim().is_empty() {
            println!("no saved barcodes");
        } else {
            println!("no saved barcodes match {:?}", workbench.filter().trim());
        }

        return Ok(());
    }

    println!("{}", saved_table(&records));

    Ok(())
}

fn saved_table(records: &[BarcodeRecord]) -> String {
    let mut builder = Builder::default();

    builder.push_record(["Item", "Code", "MRP", "Created", "ID"]);

    for record in records {
        builder.push_record([
            record.item_name.to_string(),
            record.item_code.to_string(),
            record.mrp.to_string(),
            record.timestamp.strftime("%Y-%m-%d %H:%M").to_string(),
            record.id.to_string(),
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Columns::new(2..3), Alignment::right());

    table.to_string()
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use labels::validation::LabelInput;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn table_lists_record_fields() -> TestResult {
        let record = BarcodeRecord {
            timestamp: Timestamp::from_millisecond(1_700_000_000_000)?,
            ..BarcodeRecord::new(LabelInput::new("Basmati Rice", "590123412345", "25.5").validate()?)
        };

        let table = saved_table(std::slice::from_ref(&record));

        assert!(table.contains("Basmati Rice"));
        assert!(table.contains("590123412345"));
        assert!(table.contains("25.50"));
        assert!(table.contains("2023-11-14 22:13"));
        assert!(table.contains(&record.id.to_string()));

        Ok(())
    }
}
