//! Listing filters.

use crate::store::StoreError;
use crate::types::Status;
use eyre::Result;

/// Which tasks to list.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Filter {
    /// Every task.
    #[default]
    All,
    /// Tasks with exactly this status.
    Status(Status),
    /// Tasks whose project contains this substring.
    Project(String),
}

impl Filter {
    /// Build a filter from optional status and project selectors.
    ///
    /// At most one may be given; both is [`StoreError::ConflictingFilter`],
    /// even when the project is empty. An empty project alone lists all.
    pub fn from_options(status: Option<Status>, project: Option<String>) -> Result<Self> {
        match (status, project) {
            (Some(_), Some(_)) => Err(eyre::eyre!(StoreError::ConflictingFilter)),
            (Some(status), None) => Ok(Filter::Status(status)),
            (None, Some(project)) if project.is_empty() => Ok(Filter::All),
            (None, Some(project)) => Ok(Filter::Project(project)),
            (None, None) => Ok(Filter::All),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_selectors_lists_all() {
        assert_eq!(Filter::from_options(None, None).unwrap(), Filter::All);
        assert_eq!(Filter::from_options(None, Some(String::new())).unwrap(), Filter::All);
    }

    #[test]
    fn test_single_selector() {
        assert_eq!(
            Filter::from_options(Some(Status::Done), None).unwrap(),
            Filter::Status(Status::Done)
        );
        assert_eq!(
            Filter::from_options(None, Some("groceries".to_string())).unwrap(),
            Filter::Project("groceries".to_string())
        );
    }

    #[test]
    fn test_both_selectors_conflict() {
        let err = Filter::from_options(Some(Status::Todo), Some("groceries".to_string())).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<StoreError>(),
            Some(StoreError::ConflictingFilter)
        ));

        let err = Filter::from_options(Some(Status::Todo), Some(String::new())).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<StoreError>(),
            Some(StoreError::ConflictingFilter)
        ));
    }
}
