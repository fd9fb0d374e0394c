/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2026 the tsdb-report authors
 */

use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, anyhow};
use yaml_rust::Yaml;

use super::ReporterConfig;
use crate::types::{MetricTagMap, MetricTagName, MetricTagValue, TimeUnit};

impl ReporterConfig {
    /// Load a reporter config from a yaml map.
    pub fn parse_yaml(v: &Yaml) -> anyhow::Result<Self> {
        let Yaml::Hash(map) = v else {
            return Err(anyhow!("yaml value type for reporter config should be 'map'"));
        };

        let mut config = ReporterConfig::new(String::new());
        for (k, v) in map.iter() {
            let Yaml::String(k) = k else {
                return Err(anyhow!("found non-string key in reporter config map"));
            };
            config
                .set(k, v)
                .context(format!("failed to parse value of key {k}"))?;
        }
        config.check()?;
        Ok(config)
    }

    fn set(&mut self, k: &str, v: &Yaml) -> anyhow::Result<()> {
        match k {
            "application_id" | "application" => {
                self.application_id = as_string(v)?;
                Ok(())
            }
            "name" => {
                self.name = as_string(v)?;
                Ok(())
            }
            "rate_unit" => {
                self.rate_unit = as_time_unit(v)?;
                Ok(())
            }
            "duration_unit" => {
                self.duration_unit = as_time_unit(v)?;
                Ok(())
            }
            "emit_interval" => {
                self.emit_interval = as_duration(v)?;
                Ok(())
            }
            "static_tags" | "tags" => {
                self.static_tags = as_tag_map(v)?;
                Ok(())
            }
            _ => Err(anyhow!("invalid key {k}")),
        }
    }
}

fn as_string(v: &Yaml) -> anyhow::Result<String> {
    match v {
        Yaml::String(s) => Ok(s.to_string()),
        Yaml::Integer(i) => Ok(i.to_string()),
        _ => Err(anyhow!("yaml value type should be 'string'")),
    }
}

fn as_time_unit(v: &Yaml) -> anyhow::Result<TimeUnit> {
    match v {
        Yaml::String(s) => TimeUnit::from_str(s),
        _ => Err(anyhow!("yaml value type for time unit should be 'string'")),
    }
}

fn as_duration(v: &Yaml) -> anyhow::Result<Duration> {
    match v {
        Yaml::String(s) => humanize_rs::duration::parse(s)
            .map_err(|e| anyhow!("invalid humanize duration string: {e}")),
        Yaml::Integer(i) => u64::try_from(*i)
            .map(Duration::from_secs)
            .map_err(|_| anyhow!("out of range integer duration value")),
        _ => Err(anyhow!(
            "yaml value type for duration should be 'string' or 'integer'"
        )),
    }
}

fn as_tag_map(v: &Yaml) -> anyhow::Result<MetricTagMap> {
    let Yaml::Hash(map) = v else {
        return Err(anyhow!("yaml value type for static tags should be 'map'"));
    };

    let mut tags = MetricTagMap::default();
    for (k, v) in map.iter() {
        let Yaml::String(k) = k else {
            return Err(anyhow!("found non-string tag name"));
        };
        let name =
            MetricTagName::from_str(k).map_err(|e| anyhow!("invalid tag name {k}: {e}"))?;
        let value = MetricTagValue::from_str(&as_string(v)?)
            .map_err(|e| anyhow!("invalid tag value for {k}: {e}"))?;
        tags.insert(name, value);
    }
    Ok(tags)
}
