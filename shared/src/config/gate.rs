//! Verification gate configuration

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Verification gate configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GateConfig {
    /// Verification code validity window in seconds
    #[serde(default = "default_code_ttl")]
    pub code_ttl_seconds: u64,

    /// Per-group allow-list of email suffixes
    ///
    /// A group with no entry (or an empty list) accepts any address.
    /// Suffixes are matched case-sensitively against the end of the
    /// address, so `@example.com` pins the exact domain while
    /// `.edu.au` admits a whole family of domains.
    #[serde(default)]
    pub group_mail_suffixes: HashMap<String, Vec<String>>,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            code_ttl_seconds: default_code_ttl(),
            group_mail_suffixes: HashMap::new(),
        }
    }
}

impl GateConfig {
    /// Load configuration from environment variables
    ///
    /// `GATE_CODE_TTL_SECONDS` overrides the validity window.
    /// `GATE_GROUP_SUFFIXES` carries the allow-list table in the form
    /// `group1:@example.com|.edu.au;group2:@corp.net`.
    pub fn from_env() -> Self {
        let code_ttl_seconds = std::env::var("GATE_CODE_TTL_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_code_ttl);

        let group_mail_suffixes = std::env::var("GATE_GROUP_SUFFIXES")
            .map(|v| Self::parse_suffix_table(&v))
            .unwrap_or_default();

        Self {
            code_ttl_seconds,
            group_mail_suffixes,
        }
    }

    /// Parse a `group:sfx|sfx;group:sfx` table
    ///
    /// Empty segments are skipped rather than rejected so a trailing
    /// separator in the variable does not poison the whole table.
    fn parse_suffix_table(raw: &str) -> HashMap<String, Vec<String>> {
        let mut table = HashMap::new();
        for entry in raw.split(';') {
            let entry = entry.trim();
            if entry.is_empty() {
                continue;
            }
            let Some((group, suffixes)) = entry.split_once(':') else {
                continue;
            };
            let suffixes: Vec<String> = suffixes
                .split('|')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect();
            table.insert(group.trim().to_string(), suffixes);
        }
        table
    }

    /// Look up the suffix allow-list for a group
    pub fn suffixes_for(&self, group_id: &str) -> Option<&[String]> {
        self.group_mail_suffixes.get(group_id).map(Vec::as_slice)
    }
}

fn default_code_ttl() -> u64 {
    600
}
