//! Extracting reusable fragments from SVG markup.

use roxmltree::{Document, Node};
use thiserror::Error;

use crate::domain::model::Fragment;

/// Error returned when markup cannot be parsed at all.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("markup is not well-formed XML: {0}")]
    MalformedMarkup(#[from] roxmltree::Error),
}

/// Outcome of extracting one source document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    /// Fragments that survived the completeness check, in document order.
    pub fragments: Vec<Fragment>,
    /// Whether the source was already structured as a sprite, i.e. contained
    /// at least one `symbol` element.
    pub multi_fragment: bool,
}

/// Parse one SVG document and pull out its candidate fragments.
///
/// A document holding any `symbol` element (matched by local name, anywhere
/// in the tree) is treated as a sprite and yields one candidate per symbol.
/// Otherwise a bare `svg` root yields a single candidate whose identifier
/// falls back to the file name with its extension stripped. Candidates
/// missing an identifier, view box, or body are dropped without diagnostics;
/// only malformed markup is an error.
pub fn extract(file_name: &str, markup: &str) -> Result<Extraction, ExtractError> {
    let doc = Document::parse(markup)?;

    let symbols: Vec<Node<'_, '_>> = doc
        .descendants()
        .filter(|node| node.is_element() && node.tag_name().name() == "symbol")
        .collect();

    if !symbols.is_empty() {
        let fragments = symbols
            .iter()
            .filter_map(|node| candidate(node.attribute("id").unwrap_or_default(), node, markup))
            .collect();
        return Ok(Extraction {
            fragments,
            multi_fragment: true,
        });
    }

    let root = doc.root_element();
    if root.tag_name().name() == "svg" {
        // An empty id attribute counts as absent, same as a missing one.
        let id = root
            .attribute("id")
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| base_name(file_name));
        let fragments = candidate(id, &root, markup).into_iter().collect();
        return Ok(Extraction {
            fragments,
            multi_fragment: false,
        });
    }

    Ok(Extraction {
        fragments: Vec::new(),
        multi_fragment: false,
    })
}

/// File name with the extension after the last dot stripped. A name without
/// a dot is returned unchanged.
pub fn base_name(file_name: &str) -> &str {
    match file_name.rfind('.') {
        Some(index) => &file_name[..index],
        None => file_name,
    }
}

fn candidate<'input>(id: &str, node: &Node<'_, 'input>, markup: &'input str) -> Option<Fragment> {
    let view_box = node.attribute("viewBox").unwrap_or_default();
    let fragment = Fragment::new(id, view_box, inner_markup(node, markup));
    fragment.is_complete().then_some(fragment)
}

/// The verbatim source text between an element's opening and closing tags.
///
/// Slicing the original input rather than re-serializing the tree keeps the
/// body byte-for-byte intact, so whatever was embedded comes back out
/// unchanged. Surrounding whitespace is trimmed; the serializer frames the
/// body in newlines of its own.
fn inner_markup<'input>(node: &Node<'_, 'input>, markup: &'input str) -> &'input str {
    match (node.first_child(), node.last_child()) {
        (Some(first), Some(last)) => markup[first.range().start..last.range().end].trim(),
        _ => "",
    }
}
