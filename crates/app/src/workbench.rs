//! Workbench
//!
//! The workflow shell: the current view, the form, the generator state and
//! the saved-barcode filter, with every user action routed through here.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use labels::{
    items::ItemCode,
    label::{LabelLayout, print::print_fragment},
    symbology::{Symbol, SymbolOptions, SymbolRenderer},
    validation::LabelInput,
};
use thiserror::Error;
use tracing::{info, warn};

use crate::{
    domain::barcodes::{
        BarcodesService, BarcodesServiceError, filter_barcodes,
        models::{BarcodeRecord, BarcodeUuid},
    },
    exports::{
        ExportError, PrintArea, PrintError, PrintSpooler, ShareError, SharePayload, ShareSheet,
        render_label_png, write_download,
    },
    generator::{GenerateError, GeneratedLabel, GeneratorState, LabelGenerator},
};

/// Errors surfaced to the user by workbench actions.
#[derive(Debug, Error)]
pub enum WorkbenchError {
    /// Generating the label failed.
    #[error(transparent)]
    Generate(#[from] GenerateError),

    /// The saved collection rejected the operation.
    #[error(transparent)]
    Barcodes(#[from] BarcodesServiceError),

    /// Producing an image failed.
    #[error(transparent)]
    Export(#[from] ExportError),

    /// Printing failed.
    #[error(transparent)]
    Print(#[from] PrintError),

    /// Sharing failed.
    #[error(transparent)]
    Share(#[from] ShareError),
}

/// Top-level views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// Label form and preview.
    #[default]
    Generator,

    /// Saved barcode list.
    Saved,
}

/// Result of generating and saving a label.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerateOutcome {
    /// The label is ready and a new record was saved.
    Saved(BarcodeRecord),

    /// The label is ready but its item code was already saved.
    AlreadySaved(ItemCode),
}

/// Result of a share request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareOutcome {
    /// The label was shared.
    Shared,

    /// The user dismissed the share sheet.
    Cancelled,
}

/// Services the workbench drives.
pub struct WorkbenchServices {
    /// Saved collection.
    pub barcodes: Arc<dyn BarcodesService>,

    /// Symbol renderer.
    pub renderer: Arc<dyn SymbolRenderer>,

    /// Print area for print documents.
    pub print_area: PrintArea,

    /// Printer.
    pub spooler: Arc<dyn PrintSpooler>,

    /// Share sheet.
    pub share_sheet: Arc<dyn ShareSheet>,
}

pub struct Workbench {
    view: View,
    filter: String,
    input: LabelInput,
    generator: LabelGenerator,
    layout: LabelLayout,
    services: WorkbenchServices,
}

impl Workbench {
    pub fn new(services: WorkbenchServices) -> Self {
        Self {
            view: View::default(),
            filter: String::new(),
            input: LabelInput::default(),
            generator: LabelGenerator::new(Arc::clone(&services.renderer)),
            layout: LabelLayout::default(),
            services,
        }
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn show(&mut self, view: View) {
        self.view = view;
    }

    /// Title of the saved tab, e.g. `Saved (3)`.
    pub async fn saved_tab_title(&self) -> String {
        format!("Saved ({})", self.services.barcodes.count().await)
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn set_filter(&mut self, query: impl Into<String>) {
        self.filter = query.into();
    }

    /// Saved barcodes matching the current filter, newest first.
    pub async fn saved_barcodes(&self) -> Vec<BarcodeRecord> {
        let records = self.services.barcodes.list_barcodes().await;

        filter_barcodes(&records, &self.filter)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn input(&self) -> &LabelInput {
        &self.input
    }

    /// Replace the form input. Any generated label is discarded.
    pub fn edit_input(&mut self, input: LabelInput) {
        self.input = input;
        self.generator.reset();
    }

    pub fn generator_state(&self) -> &GeneratorState {
        self.generator.state()
    }

    /// The label ready for export, if any.
    pub fn label(&self) -> Option<&GeneratedLabel> {
        self.generator.label()
    }

    /// Generate a label from the form and save it.
    ///
    /// A duplicate item code still leaves the label ready for export.
    ///
    /// # Errors
    ///
    /// Returns [`WorkbenchError::Generate`] when the form is rejected or the
    /// symbol cannot be rendered, and [`WorkbenchError::Barcodes`] when the
    /// record cannot be stored.
    pub async fn generate(&mut self) -> Result<GenerateOutcome, WorkbenchError> {
        let label = self.generator.generate(&self.input)?;

        match self.services.barcodes.add_barcode(label.content).await {
            Ok(record) => Ok(GenerateOutcome::Saved(record)),
            Err(BarcodesServiceError::AlreadyExists(code)) => {
                warn!(item_code = %code, "label generated for an item code that is already saved");

                Ok(GenerateOutcome::AlreadySaved(code))
            }
            Err(error) => Err(error.into()),
        }
    }

    /// Make a saved barcode the ready label without saving it again.
    ///
    /// # Errors
    ///
    /// Returns [`WorkbenchError::Barcodes`] for unknown ids and
    /// [`WorkbenchError::Generate`] when the symbol cannot be rendered.
    pub async fn open_saved(&mut self, id: BarcodeUuid) -> Result<GeneratedLabel, WorkbenchError> {
        let record = self.services.barcodes.get_barcode(id).await?;
        let content = record.content();

        self.input = LabelInput::new(
            content.name.as_str(),
            content.code.as_str(),
            content.mrp.amount().to_string(),
        );

        Ok(self.generator.load(content)?)
    }

    /// The symbol shown when a saved row is expanded.
    ///
    /// # Errors
    ///
    /// Returns [`WorkbenchError::Barcodes`] for unknown ids and
    /// [`WorkbenchError::Generate`] when the symbol cannot be rendered.
    pub async fn preview(&self, id: BarcodeUuid) -> Result<Symbol, WorkbenchError> {
        let record = self.services.barcodes.get_barcode(id).await?;

        self.preview_record(&record)
    }

    /// The preview symbol for a record already in hand.
    ///
    /// # Errors
    ///
    /// Returns [`WorkbenchError::Generate`] when the symbol cannot be rendered.
    pub fn preview_record(&self, record: &BarcodeRecord) -> Result<Symbol, WorkbenchError> {
        self.services
            .renderer
            .render(&record.item_code, &SymbolOptions::preview())
            .map_err(|error| GenerateError::from(error).into())
    }

    /// Delete a saved barcode immediately.
    ///
    /// # Errors
    ///
    /// Returns [`WorkbenchError::Barcodes`] when the collection cannot be
    /// stored.
    pub async fn delete(&mut self, id: BarcodeUuid) -> Result<Option<BarcodeRecord>, WorkbenchError> {
        Ok(self.services.barcodes.remove_barcode(id).await?)
    }

    /// Write the ready label as a PNG into `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::NothingGenerated`] before a label is ready, or
    /// the error of the failing render or write step.
    pub async fn download(&self, dir: &Path) -> Result<PathBuf, WorkbenchError> {
        let label = self.generator.label().ok_or(ExportError::NothingGenerated)?;
        let png = self.label_png(label).await?;

        Ok(write_download(dir, &label.content, &png).await?)
    }

    /// Send the ready label to the printer.
    ///
    /// # Errors
    ///
    /// Returns [`PrintError::NothingGenerated`] before a label is ready,
    /// [`PrintError::MissingPrintArea`] when the print area is gone, or the
    /// spooler's error.
    pub async fn print(&self) -> Result<PathBuf, WorkbenchError> {
        let label = self.generator.label().ok_or(PrintError::NothingGenerated)?;
        let fragment = print_fragment(&label.content, &label.symbol.to_svg());

        let document = self.services.print_area.inject(&fragment).await?;

        self.services.spooler.spool(&document).await?;

        info!(document = %document.display(), "printed label");

        Ok(document)
    }

    /// Whether sharing can be offered.
    pub fn can_share(&self) -> bool {
        self.services.share_sheet.is_available()
    }

    /// Share the ready label as a PNG. Dismissing the share sheet is not an
    /// error.
    ///
    /// # Errors
    ///
    /// Returns [`ShareError::Unavailable`] without a share sheet,
    /// [`ExportError::NothingGenerated`] before a label is ready, or the
    /// render or share failure.
    pub async fn share(&self) -> Result<ShareOutcome, WorkbenchError> {
        if !self.can_share() {
            return Err(ShareError::Unavailable.into());
        }

        let label = self.generator.label().ok_or(ExportError::NothingGenerated)?;
        let png = self.label_png(label).await?;

        match self
            .services
            .share_sheet
            .share(SharePayload::for_label(&label.content, png))
            .await
        {
            Ok(()) => Ok(ShareOutcome::Shared),
            Err(ShareError::Cancelled) => {
                info!("share cancelled");

                Ok(ShareOutcome::Cancelled)
            }
            Err(error) => Err(error.into()),
        }
    }

    async fn label_png(&self, label: &GeneratedLabel) -> Result<Vec<u8>, ExportError> {
        render_label_png(
            Arc::clone(&self.services.renderer),
            label.content.clone(),
            self.layout.clone(),
        )
        .await
    }
}

impl std::fmt::Debug for Workbench {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Workbench")
            .field("view", &self.view)
            .field("filter", &self.filter)
            .field("input", &self.input)
            .field("generator", &self.generator)
            .finish_non_exhaustive()
    }
}

impl std::fmt::Debug for WorkbenchServices {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkbenchServices")
            .field("print_area", &self.print_area)
            .finish_non_exhaustive()
    }
}
