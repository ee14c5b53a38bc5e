//! Per-call context threaded through every read and write.

use crate::options::{GetOptions, UpdateOptions};
use crate::scene::ItemId;
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Warning,
    Error,
}

/// A document-level log line returned to the caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_name: Option<String>,
}

/// Counts of what a write touched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub non_comp_item_count: usize,
    pub comp_count: usize,
    pub layer_count: usize,
    pub property_count: usize,
    pub key_count: usize,
}

#[derive(Debug, Default)]
pub struct AexState {
    pub get_options: GetOptions,
    pub update_options: UpdateOptions,
    pub stats: Stats,
    pub log: Vec<LogEntry>,
    /// Source duration of the layer being walked, for time remap scaling.
    pub time_remap_duration: Option<f64>,
    /// Document aexid -> live item, filled as items are created or matched.
    pub sources: HashMap<String, ItemId>,
}

impl AexState {
    pub fn for_get(options: GetOptions) -> Self {
        Self {
            get_options: options,
            ..Self::default()
        }
    }

    pub fn for_update(options: UpdateOptions) -> Self {
        Self {
            update_options: options,
            ..Self::default()
        }
    }

    pub fn warn(&mut self, message: String, match_name: Option<&str>) {
        tracing::warn!(match_name = match_name.unwrap_or(""), "{message}");
        self.log.push(LogEntry {
            level: LogLevel::Warning,
            message,
            match_name: match_name.map(str::to_owned),
        });
    }
}
