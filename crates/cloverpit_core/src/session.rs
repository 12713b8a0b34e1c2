use crate::codec::{self, SaveDocument};
use crate::error::CoreError;
use crate::fields::{self, GameValues, QuickField, actions, quick_edit};

/// An in-memory save document and every operation the editor performs on
/// it. Construction fails when the bytes do not decode, so a `Session`
/// always holds a well-formed document.
#[derive(Debug, Clone)]
pub struct Session {
    document: SaveDocument,
}

impl Session {
    pub fn open_bytes<B: AsRef<[u8]>>(bytes: B) -> Result<Self, CoreError> {
        Ok(Self {
            document: codec::decode(bytes.as_ref())?,
        })
    }

    pub fn from_document(document: SaveDocument) -> Self {
        Self { document }
    }

    pub fn document(&self) -> &SaveDocument {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut SaveDocument {
        &mut self.document
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, CoreError> {
        codec::encode(&self.document)
    }

    pub fn game_values(&self) -> Result<GameValues, CoreError> {
        fields::project(&self.document)
    }

    /// Apply edited game values all-or-nothing: the merge runs against a
    /// copy, so a validation failure leaves the document untouched.
    pub fn apply_game_values(&mut self, values: &GameValues) -> Result<(), CoreError> {
        let mut next = self.document.clone();
        fields::merge(&mut next, values)?;
        self.document = next;
        Ok(())
    }

    pub fn quick_fields(&self) -> Vec<QuickField> {
        quick_edit::project(&self.document)
    }

    pub fn apply_quick_edit(&mut self, path: &str, raw: &str) -> Result<(), CoreError> {
        quick_edit::apply(&mut self.document, path, raw)
    }

    /// Batch quick edits; every pending value is validated before any field
    /// is overwritten.
    pub fn apply_quick_edits(&mut self, edits: &[(String, String)]) -> Result<(), CoreError> {
        quick_edit::apply_batch(&mut self.document, edits)
    }

    pub fn powerup_names(&self) -> Result<Vec<String>, CoreError> {
        actions::powerup_names(&self.document)
    }

    pub fn unlock_all_powerups(&mut self) -> Result<usize, CoreError> {
        actions::unlock_all_powerups(&mut self.document)
    }

    pub fn unlock_all_drawers(&mut self) {
        actions::unlock_all_drawers(&mut self.document);
    }

    pub fn add_standard_run_modifiers(&mut self) -> Result<usize, CoreError> {
        actions::add_standard_run_modifiers(&mut self.document)
    }

    pub fn has_complete_skeleton(&self) -> Result<bool, CoreError> {
        actions::has_complete_skeleton(&self.document)
    }

    pub fn transform_phone_holy(&mut self) -> Result<(), CoreError> {
        actions::transform_phone_holy(&mut self.document)
    }

    /// The raw document view: pretty-printed JSON, 2-space indent.
    pub fn document_text(&self) -> Result<String, CoreError> {
        codec::to_pretty_text(&self.document)
    }

    /// Replace the document from edited raw text. Parsing happens before
    /// commit, so invalid text leaves the current document in place.
    pub fn replace_document_text(&mut self, text: &str) -> Result<(), CoreError> {
        self.document = codec::parse_text(text)?;
        Ok(())
    }

    /// Parse raw text without committing it.
    pub fn validate_text(text: &str) -> Result<(), CoreError> {
        codec::parse_text(text).map(|_| ())
    }
}
