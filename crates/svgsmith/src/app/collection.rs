//! Editing commands over the sprite collection.

use crate::domain::errors::ModelError;
use crate::domain::model::{Fragment, SpriteCollection, SpriteGroup};

/// One edit to the collection, expressed as a value so hosts can queue,
/// log, or replay edits without reaching into the state themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditCommand {
    /// Append a new empty group. Duplicate names are permitted.
    AddGroup { name: String },
    /// Append fragments to an existing group. Fragments that fail the
    /// completeness check are dropped; duplicate identifiers are allowed to
    /// coexist and keep their relative order through serialization.
    AddFragments {
        group: usize,
        fragments: Vec<Fragment>,
    },
    /// Replace a group's name. No uniqueness or non-empty check; an empty
    /// rename simply produces an oddly-named group.
    RenameGroup { group: usize, name: String },
    /// Replace a fragment's identifier, same policy as [`EditCommand::RenameGroup`].
    RenameFragment {
        group: usize,
        fragment: usize,
        id: String,
    },
    /// Delete a group by position.
    RemoveGroup { group: usize },
    /// Delete a fragment by position.
    RemoveFragment { group: usize, fragment: usize },
}

/// Apply one command, producing the next collection state.
///
/// The input state is never mutated; callers swap in the returned value on
/// success, so a failed command (stale index) leaves the visible state
/// exactly as it was.
pub fn apply(state: &SpriteCollection, command: EditCommand) -> Result<SpriteCollection, ModelError> {
    let mut next = state.clone();
    match command {
        EditCommand::AddGroup { name } => {
            next.groups.push(SpriteGroup::new(name));
        }
        EditCommand::AddFragments { group, fragments } => {
            let slot = group_mut(&mut next, group)?;
            slot.fragments
                .extend(fragments.into_iter().filter(Fragment::is_complete));
        }
        EditCommand::RenameGroup { group, name } => {
            group_mut(&mut next, group)?.name = name;
        }
        EditCommand::RenameFragment {
            group,
            fragment,
            id,
        } => {
            fragment_mut(&mut next, group, fragment)?.id = id;
        }
        EditCommand::RemoveGroup { group } => {
            let len = next.groups.len();
            if group >= len {
                return Err(ModelError::GroupIndexOutOfRange { index: group, len });
            }
            next.groups.remove(group);
        }
        EditCommand::RemoveFragment { group, fragment } => {
            let slot = group_mut(&mut next, group)?;
            let len = slot.fragments.len();
            if fragment >= len {
                return Err(ModelError::FragmentIndexOutOfRange {
                    group,
                    index: fragment,
                    len,
                });
            }
            slot.fragments.remove(fragment);
        }
    }
    Ok(next)
}

fn group_mut(state: &mut SpriteCollection, index: usize) -> Result<&mut SpriteGroup, ModelError> {
    let len = state.groups.len();
    state
        .groups
        .get_mut(index)
        .ok_or(ModelError::GroupIndexOutOfRange { index, len })
}

fn fragment_mut(
    state: &mut SpriteCollection,
    group: usize,
    index: usize,
) -> Result<&mut Fragment, ModelError> {
    let slot = group_mut(state, group)?;
    let len = slot.fragments.len();
    slot.fragments
        .get_mut(index)
        .ok_or(ModelError::FragmentIndexOutOfRange { group, index, len })
}
