//! Batched ingestion of SVG sources into the sprite collection.

use crate::app::collection::{self, EditCommand};
use crate::app::extract::{self, base_name};
use crate::domain::errors::ModelError;
use crate::domain::model::SpriteCollection;

/// One SVG document handed in by the host, already read as text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SvgSource {
    pub file_name: String,
    pub text: String,
}

impl SvgSource {
    pub fn new(file_name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            text: text.into(),
        }
    }
}

/// Hook applied to raw markup before extraction.
///
/// Hosts hang their sanitizer or structural minifier here; ingestion assumes
/// whatever comes out is safe to parse and re-embed verbatim. Filters run in
/// registration order.
pub trait MarkupFilter {
    fn apply(&self, markup: &str) -> String;
}

impl<F> MarkupFilter for F
where
    F: Fn(&str) -> String,
{
    fn apply(&self, markup: &str) -> String {
        self(markup)
    }
}

/// Where single-icon sources should land.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestTarget {
    /// Every source gets a group of its own, named from the file base name.
    NewGroups,
    /// Single-icon sources merge into the group at this position. Sprite
    /// sources still produce their own group per file.
    Group(usize),
}

/// What happened to each source of a batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestReport {
    pub ingested: Vec<IngestedSource>,
    pub skipped: Vec<SkippedSource>,
}

/// A source that made it into the collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestedSource {
    pub file_name: String,
    /// Position of the group that received the fragments.
    pub group: usize,
    pub fragment_count: usize,
    pub multi_fragment: bool,
}

/// A source dropped from the batch, with the parse failure that caused it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedSource {
    pub file_name: String,
    pub reason: String,
}

/// Runs batches of sources through filtering and extraction into the
/// collection.
#[derive(Default)]
pub struct Ingestor {
    filters: Vec<Box<dyn MarkupFilter>>,
}

impl Ingestor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a markup filter; filters apply in the order added.
    pub fn with_filter(mut self, filter: impl MarkupFilter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Ingest a batch of sources, producing the next collection state and a
    /// per-source report.
    ///
    /// Sources are processed strictly in the order given, so group numbering
    /// is reproducible across runs. A malformed source is skipped and
    /// reported without aborting the rest of the batch; only an out-of-range
    /// merge target fails the call as a whole, before any state changes.
    pub fn ingest(
        &self,
        state: &SpriteCollection,
        sources: &[SvgSource],
        target: IngestTarget,
    ) -> Result<(SpriteCollection, IngestReport), ModelError> {
        if let IngestTarget::Group(index) = target {
            let len = state.len();
            if index >= len {
                return Err(ModelError::GroupIndexOutOfRange { index, len });
            }
        }

        let mut next = state.clone();
        let mut report = IngestReport::default();

        for source in sources {
            let markup = self.filtered(&source.text);
            let extraction = match extract::extract(&source.file_name, &markup) {
                Ok(extraction) => extraction,
                Err(err) => {
                    tracing::warn!(
                        file = %source.file_name,
                        error = %err,
                        "skipping source that failed to parse"
                    );
                    report.skipped.push(SkippedSource {
                        file_name: source.file_name.clone(),
                        reason: err.to_string(),
                    });
                    continue;
                }
            };

            let group = match (extraction.multi_fragment, target) {
                (false, IngestTarget::Group(index)) => index,
                _ => {
                    next = collection::apply(
                        &next,
                        EditCommand::AddGroup {
                            name: base_name(&source.file_name).to_owned(),
                        },
                    )?;
                    next.len() - 1
                }
            };

            let fragment_count = extraction.fragments.len();
            next = collection::apply(
                &next,
                EditCommand::AddFragments {
                    group,
                    fragments: extraction.fragments,
                },
            )?;

            report.ingested.push(IngestedSource {
                file_name: source.file_name.clone(),
                group,
                fragment_count,
                multi_fragment: extraction.multi_fragment,
            });
        }

        Ok((next, report))
    }

    fn filtered(&self, markup: &str) -> String {
        self.filters
            .iter()
            .fold(markup.to_owned(), |text, filter| filter.apply(&text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPRITE: &str = "<svg xmlns=\"http://www.w3.org/2000/svg\">\
<symbol id=\"a\" viewBox=\"0 0 10 10\"><path/></symbol>\
<symbol id=\"b\" viewBox=\"0 0 20 20\"><rect/></symbol>\
</svg>";
    const ICON: &str = "<svg viewBox=\"0 0 5 5\"><circle/></svg>";

    fn sources() -> Vec<SvgSource> {
        vec![
            SvgSource::new("shapes.svg", SPRITE),
            SvgSource::new("dot.svg", ICON),
        ]
    }

    #[test]
    fn sprite_sources_create_one_group_per_file() {
        let (state, report) = Ingestor::new()
            .ingest(&SpriteCollection::new(), &sources(), IngestTarget::NewGroups)
            .unwrap();

        assert_eq!(state.len(), 2);
        assert_eq!(state.groups[0].name, "shapes");
        assert_eq!(state.groups[0].fragments.len(), 2);
        assert_eq!(state.groups[1].name, "dot");
        assert_eq!(state.groups[1].fragments[0].id, "dot");
        assert_eq!(report.ingested.len(), 2);
        assert!(report.skipped.is_empty());
    }

    #[test]
    fn single_icons_merge_into_the_requested_group() {
        let (state, _) = Ingestor::new()
            .ingest(
                &SpriteCollection::new(),
                &[SvgSource::new("shapes.svg", SPRITE)],
                IngestTarget::NewGroups,
            )
            .unwrap();

        let (state, report) = Ingestor::new()
            .ingest(
                &state,
                &[SvgSource::new("dot.svg", ICON)],
                IngestTarget::Group(0),
            )
            .unwrap();

        assert_eq!(state.len(), 1);
        assert_eq!(state.groups[0].fragments.len(), 3);
        assert_eq!(report.ingested[0].group, 0);
        assert!(!report.ingested[0].multi_fragment);
    }

    #[test]
    fn sprite_sources_ignore_the_merge_target() {
        let (state, _) = Ingestor::new()
            .ingest(
                &SpriteCollection::new(),
                &[SvgSource::new("first.svg", ICON)],
                IngestTarget::NewGroups,
            )
            .unwrap();

        let (state, report) = Ingestor::new()
            .ingest(
                &state,
                &[SvgSource::new("shapes.svg", SPRITE)],
                IngestTarget::Group(0),
            )
            .unwrap();

        assert_eq!(state.len(), 2);
        assert_eq!(state.groups[1].name, "shapes");
        assert!(report.ingested[0].multi_fragment);
        assert_eq!(report.ingested[0].group, 1);
    }

    #[test]
    fn malformed_sources_are_skipped_without_aborting_the_batch() {
        let batch = vec![
            SvgSource::new("bad.svg", "<svg><symbol id="),
            SvgSource::new("dot.svg", ICON),
        ];
        let (state, report) = Ingestor::new()
            .ingest(&SpriteCollection::new(), &batch, IngestTarget::NewGroups)
            .unwrap();

        assert_eq!(state.len(), 1);
        assert_eq!(state.groups[0].name, "dot");
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].file_name, "bad.svg");
        assert_eq!(report.ingested.len(), 1);
    }

    #[test]
    fn merge_target_out_of_range_fails_before_any_state_change() {
        let err = Ingestor::new()
            .ingest(&SpriteCollection::new(), &sources(), IngestTarget::Group(0))
            .unwrap_err();
        assert_eq!(err, ModelError::GroupIndexOutOfRange { index: 0, len: 0 });
    }

    #[test]
    fn groups_follow_submission_order() {
        let batch = vec![
            SvgSource::new("one.svg", ICON),
            SvgSource::new("two.svg", ICON),
            SvgSource::new("three.svg", ICON),
        ];
        let (state, _) = Ingestor::new()
            .ingest(&SpriteCollection::new(), &batch, IngestTarget::NewGroups)
            .unwrap();
        let names: Vec<&str> = state.groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, ["one", "two", "three"]);
    }

    #[test]
    fn filters_run_before_extraction() {
        let ingestor = Ingestor::new()
            .with_filter(|markup: &str| markup.replace("<script>alert(1)</script>", ""));
        let tainted = "<svg viewBox=\"0 0 5 5\"><script>alert(1)</script><circle/></svg>";
        let (state, _) = ingestor
            .ingest(
                &SpriteCollection::new(),
                &[SvgSource::new("dot.svg", tainted)],
                IngestTarget::NewGroups,
            )
            .unwrap();
        assert_eq!(state.groups[0].fragments[0].body, "<circle/>");
    }

    #[test]
    fn sprite_group_is_created_even_when_every_candidate_is_dropped() {
        let empty = "<svg><symbol viewBox=\"0 0 1 1\"></symbol></svg>";
        let (state, report) = Ingestor::new()
            .ingest(
                &SpriteCollection::new(),
                &[SvgSource::new("empty.svg", empty)],
                IngestTarget::NewGroups,
            )
            .unwrap();
        assert_eq!(state.len(), 1);
        assert!(state.groups[0].fragments.is_empty());
        assert_eq!(report.ingested[0].fragment_count, 0);
    }
}
