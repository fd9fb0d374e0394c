/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2026 the tsdb-report authors
 */

use memchr::memchr;

use super::MetricTagMap;

/// An instrument name split into its base name and inline tags.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParsedName {
    pub base: String,
    pub tags: MetricTagMap,
}

impl ParsedName {
    /// Split a composite instrument name into a base name and a trailing
    /// inline tag section: `requests{region=us}` has base `requests` and
    /// tags `region=us`. A string that does not match the
    /// `base{key=value,...}` grammar as a whole is taken verbatim as the
    /// base name with no tags. Never fails.
    pub fn parse(raw: &str) -> Self {
        Self::parse_tagged(raw).unwrap_or_else(|| ParsedName {
            base: raw.to_string(),
            tags: MetricTagMap::default(),
        })
    }

    fn parse_tagged(raw: &str) -> Option<Self> {
        let data = raw.as_bytes();
        let brace = memchr(b'{', data)?;
        if brace == 0 || data[data.len() - 1] != b'}' {
            return None;
        }

        let section = &raw[brace + 1..raw.len() - 1];
        let mut tags = MetricTagMap::default();
        tags.parse_section(section, b'=', b',').ok()?;

        Some(ParsedName {
            base: raw[..brace].to_string(),
            tags,
        })
    }
}
