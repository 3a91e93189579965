//! Domain models for fragments, sprite groups, and the editable collection.

/// One named, self-contained graphic definition: an identifier, a view box,
/// and the raw inner markup that draws it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub id: String,
    pub view_box: String,
    pub body: String,
}

impl Fragment {
    pub fn new(
        id: impl Into<String>,
        view_box: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            view_box: view_box.into(),
            body: body.into(),
        }
    }

    /// True when every field required for embedding is present. Incomplete
    /// fragments are dropped before they reach a group, never stored.
    pub fn is_complete(&self) -> bool {
        !self.id.is_empty() && !self.view_box.is_empty() && !self.body.is_empty()
    }
}

/// A named set of fragments corresponding to one exportable sprite file. The
/// name doubles as the base file name on export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpriteGroup {
    pub name: String,
    pub fragments: Vec<Fragment>,
}

impl SpriteGroup {
    /// Create an empty group with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fragments: Vec::new(),
        }
    }
}

/// The full in-session sequence of groups; the root of editable state.
///
/// The collection owns its groups outright and groups own their fragments;
/// moving a fragment between groups always copies the value. State lives only
/// for the duration of the session.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpriteCollection {
    pub groups: Vec<SpriteGroup>,
}

impl SpriteCollection {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of groups currently held.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Returns whether the collection holds no groups.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Access a group by position.
    pub fn group(&self, index: usize) -> Option<&SpriteGroup> {
        self.groups.get(index)
    }
}
