use serde::{Deserialize, Serialize};

use crate::{JobGroup, JobInfo};

/// Container returned by the summary endpoints.
///
/// Both `getJobInfo` and `getGroupInfo` wrap their records in a `children` array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", bound(deserialize = "T: Deserialize<'de>"))]
pub struct Listing<T> {
    #[serde(default = "Vec::new", deserialize_with = "super::nullable::or_default")]
    pub children: Vec<T>,
}

impl<T> Default for Listing<T> {
    fn default() -> Self {
        Self {
            children: Vec::new(),
        }
    }
}

impl<T> Listing<T> {
    pub fn new(children: Vec<T>) -> Self {
        Self { children }
    }

    /// Returns the only child, or `None` when the listing has zero or several.
    pub fn single(&self) -> Option<&T> {
        match self.children.as_slice() {
            [only] => Some(only),
            _ => None,
        }
    }
}

pub type JobInfoListing = Listing<JobInfo>;
pub type JobGroupListing = Listing<JobGroup>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_requires_exactly_one_child() {
        let empty: Listing<u32> = Listing::default();
        assert_eq!(empty.single(), None);

        let one = Listing::new(vec![7u32]);
        assert_eq!(one.single(), Some(&7));

        let two = Listing::new(vec![7u32, 8]);
        assert_eq!(two.single(), None);
    }

    #[test]
    fn missing_or_null_children_is_empty() {
        let missing: Listing<u32> = serde_json::from_str("{}").unwrap();
        assert!(missing.children.is_empty());

        let null: Listing<u32> = serde_json::from_str(r#"{"children":null}"#).unwrap();
        assert!(null.children.is_empty());
    }
}
