//! Label Generator
//!
//! Tracks one generation cycle: form input is validated, the symbol is
//! rendered, and the result stays ready for export until the form changes.

use std::sync::Arc;

use labels::{
    label::LabelContent,
    symbology::{Symbol, SymbolError, SymbolOptions, SymbolRenderer},
    validation::{LabelInput, ValidationError},
};
use thiserror::Error;
use tracing::debug;

/// Errors raised while generating a label.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GenerateError {
    /// The form input was rejected.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The symbol could not be rendered.
    #[error("failed to render barcode")]
    Render(#[from] SymbolError),
}

/// A validated label with its rendered symbol.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedLabel {
    /// Confirmed content.
    pub content: LabelContent,

    /// Symbol rendered with the label preset.
    pub symbol: Symbol,
}

/// Where the current generation cycle stands.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum GeneratorState {
    /// Nothing generated yet, or the form changed since.
    #[default]
    Empty,

    /// The last attempt failed; nothing is available for export.
    Failed(String),

    /// A label is ready for download, print or share.
    Ready(GeneratedLabel),
}

/// Validates form input and renders labels through a [`SymbolRenderer`].
pub struct LabelGenerator {
    renderer: Arc<dyn SymbolRenderer>,
    options: SymbolOptions,
    state: GeneratorState,
}

impl LabelGenerator {
    /// A generator rendering with the label preset.
    pub fn new(renderer: Arc<dyn SymbolRenderer>) -> Self {
        Self {
            renderer,
            options: SymbolOptions::label(),
            state: GeneratorState::Empty,
        }
    }

    /// Current state.
    pub fn state(&self) -> &GeneratorState {
        &self.state
    }

    /// The ready label, if any.
    pub fn label(&self) -> Option<&GeneratedLabel> {
        match &self.state {
            GeneratorState::Ready(label) => Some(label),
            GeneratorState::Empty | GeneratorState::Failed(_) => None,
        }
    }

    /// Validate `input` and render its symbol.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::Validation`] for rejected input and
    /// [`GenerateError::Render`] when the symbol cannot be drawn. Either way
    /// the previous label is discarded.
    pub fn generate(&mut self, input: &LabelInput) -> Result<GeneratedLabel, GenerateError> {
        match input.validate() {
            Ok(content) => self.load(content),
            Err(error) => {
                debug!(error = %error, "label input rejected");
                self.state = GeneratorState::Failed(error.to_string());

                Err(error.into())
            }
        }
    }

    /// Render already-confirmed content, e.g. a saved record.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::Render`] when the symbol cannot be drawn; the
    /// previous label is discarded.
    pub fn load(&mut self, content: LabelContent) -> Result<GeneratedLabel, GenerateError> {
        match self.renderer.render(&content.code, &self.options) {
            Ok(symbol) => {
                let label = GeneratedLabel { content, symbol };
                self.state = GeneratorState::Ready(label.clone());

                Ok(label)
            }
            Err(error) => {
                let error = GenerateError::from(error);
                self.state = GeneratorState::Failed(error.to_string());

                Err(error)
            }
        }
    }

    /// Forget the current label, e.g. after the form is edited.
    pub fn reset(&mut self) {
        self.state = GeneratorState::Empty;
    }
}

impl std::fmt::Debug for LabelGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LabelGenerator")
            .field("options", &self.options)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
