use serde::{Deserialize, Serialize};

/// What to do with a property whose value cannot be encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnsupportedPropertyBehavior {
    /// Record a log entry and omit the property.
    Log,
    /// Omit the property silently.
    #[default]
    Skip,
    /// Abort the whole read.
    Throw,
    /// Emit name, matchName and type without a value.
    Metadata,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchBy {
    #[default]
    Index,
    /// Pair by name within groups of equal names, then by position.
    Name,
}

/// What to do when an index-matched project item has a different kind than
/// the incoming one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MismatchBehavior {
    #[default]
    Create,
    Skip,
    Error,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GetOptions {
    pub unsupported_property_behavior: UnsupportedPropertyBehavior,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateOptions {
    pub marker_match_by: MatchBy,
    pub layer_match_by: MatchBy,
    pub project_item_match_by: MatchBy,
    pub project_item_mismatch_behavior: MismatchBehavior,
}
