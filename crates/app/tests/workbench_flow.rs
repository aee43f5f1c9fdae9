//! Workbench flows against file-backed storage

use std::{path::Path, sync::Arc};

use labels::{symbology::Ean13Renderer, validation::LabelInput};
use labels_app::{
    domain::barcodes::{BarcodesService, JsonBarcodesService},
    exports::{NoopSpooler, PrintArea, UnavailableShareSheet},
    storage::FileSlotStore,
    workbench::{GenerateOutcome, View, Workbench, WorkbenchServices},
};
use testresult::TestResult;

async fn workbench(root: &Path) -> TestResult<Workbench> {
    let store = Arc::new(FileSlotStore::new(root.join("data")));
    let barcodes = JsonBarcodesService::load(store, "barcodes").await;

    let print_area = PrintArea::new(root.join("print"));
    print_area.prepare().await?;

    Ok(Workbench::new(WorkbenchServices {
        barcodes: Arc::new(barcodes),
        renderer: Arc::new(Ean13Renderer::new()),
        print_area,
        spooler: Arc::new(NoopSpooler),
        share_sheet: Arc::new(UnavailableShareSheet),
    }))
}

#[tokio::test]
async fn saved_labels_survive_restart() -> TestResult {
    let dir = tempfile::tempdir()?;

    {
        let mut workbench = workbench(dir.path()).await?;

        workbench.edit_input(LabelInput::new("Basmati Rice", "590123412345", "25.5"));
        workbench.generate().await?;

        workbench.edit_input(LabelInput::new("Green Tea", "400638133393", "4.5"));
        workbench.generate().await?;
    }

    let mut workbench = workbench(dir.path()).await?;
    workbench.show(View::Saved);

    let names: Vec<String> = workbench
        .saved_barcodes()
        .await
        .iter()
        .map(|record| record.item_name.to_string())
        .collect();

    assert_eq!(workbench.saved_tab_title().await, "Saved (2)");
    assert_eq!(names, ["Green Tea", "Basmati Rice"]);

    Ok(())
}

#[tokio::test]
async fn stored_slot_uses_documented_fields() -> TestResult {
    let dir = tempfile::tempdir()?;
    let mut workbench = workbench(dir.path()).await?;

    workbench.edit_input(LabelInput::new("Basmati Rice", "590123412345", "25.5"));
    workbench.generate().await?;

    let raw = std::fs::read_to_string(dir.path().join("data").join("barcodes.json"))?;
    let value: serde_json::Value = serde_json::from_str(&raw)?;
    let record = value.get(0).ok_or_else(|| std::io::Error::other("empty slot"))?;

    assert_eq!(record.get("itemName").and_then(|v| v.as_str()), Some("Basmati Rice"));
    assert_eq!(record.get("itemCode").and_then(|v| v.as_str()), Some("590123412345"));
    assert_eq!(record.get("mrp").and_then(serde_json::Value::as_f64), Some(25.5));
    assert!(record.get("timestamp").is_some_and(serde_json::Value::is_i64));
    assert!(record.get("id").is_some_and(serde_json::Value::is_string));

    Ok(())
}

#[tokio::test]
async fn corrupt_slot_starts_empty_and_recovers() -> TestResult {
    let dir = tempfile::tempdir()?;
    std::fs::create_dir_all(dir.path().join("data"))?;
    std::fs::write(dir.path().join("data").join("barcodes.json"), "[{\"id\":")?;

    let mut workbench = workbench(dir.path()).await?;

    assert_eq!(workbench.saved_tab_title().await, "Saved (0)");

    workbench.edit_input(LabelInput::new("Basmati Rice", "590123412345", "25.5"));

    let outcome = workbench.generate().await?;

    assert!(
        matches!(outcome, GenerateOutcome::Saved(_)),
        "expected Saved, got {outcome:?}"
    );

    Ok(())
}

#[tokio::test]
async fn export_saved_record_downloads_and_prints() -> TestResult {
    let dir = tempfile::tempdir()?;
    let store = Arc::new(FileSlotStore::new(dir.path().join("data")));
    let barcodes = JsonBarcodesService::load(store, "barcodes").await;

    let record = barcodes
        .add_barcode(LabelInput::new("Green Tea", "400638133393", "4.5").validate()?)
        .await?;

    let mut workbench = workbench(dir.path()).await?;

    workbench.open_saved(record.id).await?;

    let png = workbench.download(&dir.path().join("downloads")).await?;
    let document = workbench.print().await?;

    assert!(png.ends_with("Green_Tea-400638133393.png"));
    assert!(std::fs::read_to_string(document)?.contains("MRP: 4.50"));
    assert_eq!(workbench.saved_tab_title().await, "Saved (1)");

    Ok(())
}
