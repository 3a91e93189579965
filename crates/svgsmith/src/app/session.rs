//! Edit session orchestration over the sprite collection.

use anyhow::{Context, Result};

use crate::app::collection::{self, EditCommand};
use crate::app::export::{ExportOptions, ExportResult, Exporter};
use crate::app::ingest::{IngestReport, IngestTarget, Ingestor, SvgSource};
use crate::domain::errors::ModelError;
use crate::domain::model::{SpriteCollection, SpriteGroup};

/// What an in-place rename is aimed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenameTarget {
    Group { group: usize },
    Fragment { group: usize, fragment: usize },
}

/// An in-flight rename.
///
/// The draft buffers text while the host's input field is being edited;
/// nothing reaches the collection until [`EditSession::commit_rename`] runs.
/// Hosts commit on explicit confirmation and on focus loss alike; there is
/// no cancel path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameDraft {
    target: RenameTarget,
    text: String,
}

impl RenameDraft {
    /// Replace the draft text with the field's current contents.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn target(&self) -> RenameTarget {
        self.target
    }
}

/// Thin coordinator owning the collection and sequencing ingest, edits, and
/// exports. All state transitions are whole-value replacements of the
/// collection, so readers never observe a partial update.
#[derive(Debug, Default)]
pub struct EditSession {
    collection: SpriteCollection,
}

impl EditSession {
    /// Start a session with an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current collection state.
    pub fn collection(&self) -> &SpriteCollection {
        &self.collection
    }

    /// Apply one edit command; on failure the session state is unchanged.
    pub fn apply(&mut self, command: EditCommand) -> Result<(), ModelError> {
        self.collection = collection::apply(&self.collection, command)?;
        Ok(())
    }

    /// Run a batch of sources through the ingestor into this session.
    pub fn ingest(
        &mut self,
        ingestor: &Ingestor,
        sources: &[SvgSource],
        target: IngestTarget,
    ) -> Result<IngestReport, ModelError> {
        let (next, report) = ingestor.ingest(&self.collection, sources, target)?;
        self.collection = next;
        Ok(report)
    }

    /// Begin renaming a group or fragment, seeding the draft with the
    /// current name.
    pub fn begin_rename(&self, target: RenameTarget) -> Result<RenameDraft, ModelError> {
        let text = match target {
            RenameTarget::Group { group } => self.group_checked(group)?.name.clone(),
            RenameTarget::Fragment { group, fragment } => {
                let slot = self.group_checked(group)?;
                let len = slot.fragments.len();
                slot.fragments
                    .get(fragment)
                    .ok_or(ModelError::FragmentIndexOutOfRange {
                        group,
                        index: fragment,
                        len,
                    })?
                    .id
                    .clone()
            }
        };
        Ok(RenameDraft { target, text })
    }

    /// Commit a rename draft, applying whatever text it holds.
    pub fn commit_rename(&mut self, draft: RenameDraft) -> Result<(), ModelError> {
        let command = match draft.target {
            RenameTarget::Group { group } => EditCommand::RenameGroup {
                group,
                name: draft.text,
            },
            RenameTarget::Fragment { group, fragment } => EditCommand::RenameFragment {
                group,
                fragment,
                id: draft.text,
            },
        };
        self.apply(command)
    }

    /// Export one group as a sprite sheet.
    pub fn export_group(
        &self,
        exporter: &Exporter,
        group: usize,
        options: &ExportOptions,
    ) -> Result<ExportResult> {
        let slot = self
            .group_checked(group)
            .context("export aimed at a missing group")?;
        exporter.export_group(&slot.name, &slot.fragments, options)
    }

    /// Export one fragment as a standalone icon.
    pub fn export_fragment(
        &self,
        exporter: &Exporter,
        group: usize,
        fragment: usize,
        options: &ExportOptions,
    ) -> Result<ExportResult> {
        let slot = self
            .group_checked(group)
            .context("export aimed at a missing group")?;
        let len = slot.fragments.len();
        let fragment = slot
            .fragments
            .get(fragment)
            .ok_or(ModelError::FragmentIndexOutOfRange {
                group,
                index: fragment,
                len,
            })
            .context("export aimed at a missing fragment")?;
        exporter.export_fragment(fragment, options)
    }

    fn group_checked(&self, index: usize) -> Result<&SpriteGroup, ModelError> {
        self.collection
            .group(index)
            .ok_or(ModelError::GroupIndexOutOfRange {
                index,
                len: self.collection.len(),
            })
    }
}
