//! Custom-space creation.
//!
//! # Responsibility
//! - Validate custom-space requests against the current header set.
//! - Materialize copies of the aggregated base-space items.
//!
//! # Invariants
//! - A failed request leaves the model untouched.
//! - Materialization is idempotent: no `(space, project)` pair is ever
//!   duplicated, even when source memberships overlap.
//! - Custom spaces aggregate base spaces only; nesting is rejected.

use crate::model::header::{HeaderEntry, SelectionType};
use crate::model::item::DataItem;
use crate::repo::snapshot_repo::SnapshotRepository;
use crate::store::CheckStore;
use log::info;
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Request to create one custom space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomSpaceRequest {
    /// Title of the new space; must not collide with any existing header.
    pub title: String,
    /// Item selection behavior inside the new space.
    pub selection_type: SelectionType,
    /// Base-space titles to aggregate; must be non-empty.
    pub original_spaces: Vec<String>,
}

/// Errors from custom-space creation.
#[derive(Debug, PartialEq, Eq)]
pub enum CustomSpaceError {
    /// A header with this title already exists; the caller must retry
    /// with a different title.
    DuplicateTitle(String),
    /// The request named no source spaces.
    NoSourceSpaces,
    /// A named source space does not exist.
    UnknownSourceSpace(String),
    /// A named source space is itself custom.
    SourceSpaceIsCustom(String),
}

impl Display for CustomSpaceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateTitle(title) => {
                write!(f, "a space named `{title}` already exists")
            }
            Self::NoSourceSpaces => write!(f, "a custom space needs at least one source space"),
            Self::UnknownSourceSpace(title) => {
                write!(f, "source space `{title}` does not exist")
            }
            Self::SourceSpaceIsCustom(title) => {
                write!(f, "source space `{title}` is custom; only base spaces can be aggregated")
            }
        }
    }
}

impl Error for CustomSpaceError {}

impl<R: SnapshotRepository> CheckStore<R> {
    /// Creates a custom space aggregating one or more base spaces.
    ///
    /// On success the new header is appended checked, every item of every
    /// source space is copied into it (skipping projects already present),
    /// the title is registered in the selection order, and subscribers are
    /// notified. On any error the model is left unchanged.
    pub fn create_custom_space(
        &mut self,
        request: CustomSpaceRequest,
    ) -> Result<(), CustomSpaceError> {
        if self
            .model
            .header
            .iter()
            .any(|header| header.title == request.title)
        {
            return Err(CustomSpaceError::DuplicateTitle(request.title));
        }
        if request.original_spaces.is_empty() {
            return Err(CustomSpaceError::NoSourceSpaces);
        }
        for source in &request.original_spaces {
            match self.model.header.iter().find(|header| &header.title == source) {
                None => return Err(CustomSpaceError::UnknownSourceSpace(source.clone())),
                Some(header) if header.is_custom => {
                    return Err(CustomSpaceError::SourceSpaceIsCustom(source.clone()));
                }
                Some(_) => {}
            }
        }

        let header = HeaderEntry::custom(
            request.title.clone(),
            request.selection_type,
            request.original_spaces.clone(),
        );
        let checked = header.checked;
        self.model.header.push(header);

        let copies = materialize_items(&self.model.data, &request.title, &request.original_spaces);
        info!(
            "event=custom_space_create module=store status=ok title={} sources={} items={}",
            request.title,
            request.original_spaces.len(),
            copies.len()
        );
        self.model.data.extend(copies);

        self.update_selection_order(&request.title, checked);
        self.notify_and_persist();
        Ok(())
    }
}

/// Copies every item of every source space into `title`, skipping projects
/// the target space already holds.
fn materialize_items(
    existing: &[DataItem],
    title: &str,
    original_spaces: &[String],
) -> Vec<DataItem> {
    // Seed with projects already in the target space, then keep tracking
    // across sources so overlapping memberships cannot duplicate.
    let mut present: HashSet<String> = existing
        .iter()
        .filter(|item| item.space == title)
        .map(|item| item.project.clone())
        .collect();

    let mut copies = Vec::new();
    for source in original_spaces {
        for item in existing.iter().filter(|item| &item.space == source) {
            if !present.insert(item.project.clone()) {
                continue;
            }
            copies.push(DataItem {
                space: title.to_string(),
                category: item.category.clone(),
                project: item.project.clone(),
                note: item.note.clone(),
                checked: false,
            });
        }
    }
    copies
}

#[cfg(test)]
mod tests {
    use super::materialize_items;
    use crate::model::item::DataItem;

    #[test]
    fn overlapping_sources_yield_no_duplicate_projects() {
        let existing = vec![
            DataItem::new("A", "shared"),
            DataItem::new("A", "only-a"),
            DataItem::new("B", "shared"),
        ];

        let copies =
            materialize_items(&existing, "Both", &["A".to_string(), "B".to_string()]);
        let projects: Vec<&str> = copies.iter().map(|item| item.project.as_str()).collect();
        assert_eq!(projects, vec!["shared", "only-a"]);
        assert!(copies.iter().all(|item| item.space == "Both"));
        assert!(copies.iter().all(|item| !item.checked));
    }

    #[test]
    fn projects_already_in_target_space_are_skipped() {
        let existing = vec![DataItem::new("Both", "shared"), DataItem::new("A", "shared")];
        let copies = materialize_items(&existing, "Both", &["A".to_string()]);
        assert!(copies.is_empty());
    }
}
