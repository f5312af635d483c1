//! Work items and the dependency links between them.
//!
//! The analysis engine only looks at ids and structural links; status and
//! type ride along so presentation layers can style nodes without a second
//! lookup.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Lifecycle status of a work item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    #[default]
    Open,
    InProgress,
    Blocked,
    Closed,
}

impl Status {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::InProgress => "in_progress",
            Self::Blocked => "blocked",
            Self::Closed => "closed",
        }
    }

    /// Whether the item still needs work.
    #[must_use]
    pub const fn is_active(self) -> bool {
        !matches!(self, Self::Closed)
    }
}

/// Work item type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum IssueType {
    #[default]
    Task,
    Bug,
    Feature,
    Epic,
    Chore,
    /// Any type the store knows about that the engine does not.
    #[serde(other)]
    Other,
}

impl IssueType {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Task => "task",
            Self::Bug => "bug",
            Self::Feature => "feature",
            Self::Epic => "epic",
            Self::Chore => "chore",
            Self::Other => "other",
        }
    }
}

/// Tag carried by a dependency link.
///
/// Only [`DependencyKind::Blocks`] and [`DependencyKind::ParentChild`] are
/// structural and take part in graph analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum DependencyKind {
    #[default]
    Blocks,
    ParentChild,
    Related,
    DiscoveredFrom,
    #[serde(other)]
    Other,
}

impl DependencyKind {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Blocks => "blocks",
            Self::ParentChild => "parent-child",
            Self::Related => "related",
            Self::DiscoveredFrom => "discovered-from",
            Self::Other => "other",
        }
    }

    /// Whether links of this kind order work (and so enter the graph).
    #[must_use]
    pub const fn is_structural(self) -> bool {
        matches!(self, Self::Blocks | Self::ParentChild)
    }
}

/// A single work item as handed to the analysis engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub status: Status,
    #[serde(default)]
    pub issue_type: IssueType,
}

impl Issue {
    /// Open task with the given id and title.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            status: Status::default(),
            issue_type: IssueType::default(),
        }
    }

    #[must_use]
    pub const fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    #[must_use]
    pub const fn with_type(mut self, issue_type: IssueType) -> Self {
        self.issue_type = issue_type;
        self
    }
}

/// `issue_id` depends on `depends_on_id`.
///
/// In the analysis graph this becomes the edge
/// `depends_on_id → issue_id` (prerequisite enables dependent).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dependency {
    pub issue_id: String,
    pub depends_on_id: String,
    #[serde(default, rename = "type")]
    pub kind: DependencyKind,
}

impl Dependency {
    pub fn new(
        issue_id: impl Into<String>,
        depends_on_id: impl Into<String>,
        kind: DependencyKind,
    ) -> Self {
        Self {
            issue_id: issue_id.into(),
            depends_on_id: depends_on_id.into(),
            kind,
        }
    }

    /// Shorthand for a `blocks` link.
    pub fn blocks(issue_id: impl Into<String>, depends_on_id: impl Into<String>) -> Self {
        Self::new(issue_id, depends_on_id, DependencyKind::Blocks)
    }
}

/// Error returned when parsing an enum value from text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseEnumError {
    pub expected: &'static str,
    pub got: String,
}

impl fmt::Display for ParseEnumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {}: '{}'", self.expected, self.got)
    }
}

impl std::error::Error for ParseEnumError {}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for IssueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for DependencyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn normalize(input: &str) -> String {
    input.trim().to_ascii_lowercase().replace('_', "-")
}

impl FromStr for Status {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "open" => Ok(Self::Open),
            "in-progress" => Ok(Self::InProgress),
            "blocked" => Ok(Self::Blocked),
            "closed" => Ok(Self::Closed),
            _ => Err(ParseEnumError {
                expected: "status",
                got: s.to_string(),
            }),
        }
    }
}

impl FromStr for IssueType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "task" => Ok(Self::Task),
            "bug" => Ok(Self::Bug),
            "feature" => Ok(Self::Feature),
            "epic" => Ok(Self::Epic),
            "chore" => Ok(Self::Chore),
            "other" => Ok(Self::Other),
            _ => Err(ParseEnumError {
                expected: "issue type",
                got: s.to_string(),
            }),
        }
    }
}

impl FromStr for DependencyKind {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "blocks" => Ok(Self::Blocks),
            "parent-child" => Ok(Self::ParentChild),
            "related" | "relates-to" => Ok(Self::Related),
            "discovered-from" => Ok(Self::DiscoveredFrom),
            "other" => Ok(Self::Other),
            _ => Err(ParseEnumError {
                expected: "dependency kind",
                got: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_blocking_kinds_are_structural() {
        assert!(DependencyKind::Blocks.is_structural());
        assert!(DependencyKind::ParentChild.is_structural());
        assert!(!DependencyKind::Related.is_structural());
        assert!(!DependencyKind::DiscoveredFrom.is_structural());
        assert!(!DependencyKind::Other.is_structural());
    }

    #[test]
    fn enums_round_trip_through_display() {
        for status in [
            Status::Open,
            Status::InProgress,
            Status::Blocked,
            Status::Closed,
        ] {
            assert_eq!(status.to_string().parse::<Status>(), Ok(status));
        }
        for kind in [
            DependencyKind::Blocks,
            DependencyKind::ParentChild,
            DependencyKind::Related,
            DependencyKind::DiscoveredFrom,
        ] {
            assert_eq!(kind.to_string().parse::<DependencyKind>(), Ok(kind));
        }
    }

    #[test]
    fn parse_is_lenient_about_case_and_separators() {
        assert_eq!(" In_Progress ".parse::<Status>(), Ok(Status::InProgress));
        assert_eq!("PARENT_CHILD".parse(), Ok(DependencyKind::ParentChild));
        assert_eq!("relates-to".parse(), Ok(DependencyKind::Related));
    }

    #[test]
    fn parse_rejects_unknown_values() {
        let err = "someday".parse::<Status>().expect_err("unknown status");
        assert_eq!(err.expected, "status");
        assert_eq!(err.to_string(), "invalid status: 'someday'");
    }

    #[test]
    fn serde_uses_wire_names() {
        let dep = Dependency::new("bv-2", "bv-1", DependencyKind::ParentChild);
        let json = serde_json::to_string(&dep).expect("serialize");
        assert_eq!(
            json,
            r#"{"issue_id":"bv-2","depends_on_id":"bv-1","type":"parent-child"}"#
        );

        let issue: Issue =
            serde_json::from_str(r#"{"id":"bv-9","status":"in_progress","issue_type":"spike"}"#)
                .expect("deserialize");
        assert_eq!(issue.status, Status::InProgress);
        assert_eq!(issue.issue_type, IssueType::Other);
        assert!(issue.title.is_empty());
    }

    #[test]
    fn unknown_dependency_kind_is_not_structural() {
        let dep: Dependency =
            serde_json::from_str(r#"{"issue_id":"a","depends_on_id":"b","type":"mentions"}"#)
                .expect("deserialize");
        assert_eq!(dep.kind, DependencyKind::Other);
        assert!(!dep.kind.is_structural());
    }
}
