/*
 * vDup mail duplication service
 *
 * Copyright (C) 2003 - viridIT SAS
 * Licensed under the Elastic License 2.0
 *
 * You should have received a copy of the Elastic License 2.0 along with
 * this program. If not, see https://www.elastic.co/licensing/elastic-license.
 *
 */

use std::{collections::HashMap, str::FromStr};

#[derive(Debug, serde::Deserialize, serde::Serialize, PartialEq, Eq)]
pub struct Logs {
    #[serde(default)]
    pub facility: LogsFacility,
    /// Customize the log level of the different part of the program.
    /// The `default` key sets the level of everything not listed.
    ///
    /// See <https://docs.rs/tracing-subscriber/0.3.17/tracing_subscriber/filter/struct.Targets.html>
    #[serde(
        default = "Logs::default_levels",
        serialize_with = "Logs::serialize_levels",
        deserialize_with = "Logs::deserialize_levels"
    )]
    pub levels: HashMap<String, tracing_subscriber::filter::LevelFilter>,
}

impl Logs {
    fn default_levels() -> HashMap<String, tracing_subscriber::filter::LevelFilter> {
        HashMap::from([(
            "default".to_string(),
            tracing_subscriber::filter::LevelFilter::WARN,
        )])
    }

    /// Build the target filter the subscriber is initialized with.
    #[must_use]
    pub fn targets_filter(&self) -> tracing_subscriber::filter::Targets {
        let default = self
            .levels
            .get("default")
            .copied()
            .unwrap_or(tracing_subscriber::filter::LevelFilter::WARN);

        tracing_subscriber::filter::Targets::new()
            .with_targets(
                self.levels
                    .iter()
                    .filter(|(target, _)| target.as_str() != "default")
                    .map(|(target, level)| (target.clone(), *level)),
            )
            .with_default(default)
    }

    fn serialize_levels<S: serde::Serializer>(
        value: &HashMap<String, tracing_subscriber::filter::LevelFilter>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let mut x = serializer.serialize_map(Some(value.len()))?;
        for i in value {
            serde::ser::SerializeMap::serialize_entry(&mut x, &i.0, &i.1.to_string())?;
        }
        serde::ser::SerializeMap::end(x)
    }

    fn deserialize_levels<'de, D>(
        deserializer: D,
    ) -> Result<HashMap<String, tracing_subscriber::filter::LevelFilter>, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = <rhai::Map as serde::Deserialize>::deserialize(deserializer)?;
        value
            .into_iter()
            .map(|key| {
                tracing_subscriber::filter::LevelFilter::from_str(key.1.to_string().as_str())
                    .map(|level| (key.0.to_string(), level))
                    .map_err(|e| {
                        serde::de::Error::custom(format!("Failed to parse log level: `{e}`"))
                    })
            })
            .collect::<Result<HashMap<String, tracing_subscriber::filter::LevelFilter>, _>>()
    }
}

#[derive(Default, Debug, serde::Deserialize, serde::Serialize, PartialEq, Eq)]
pub enum LogsFacility {
    File(std::path::PathBuf),
    #[default]
    Console,
}

impl Default for Logs {
    fn default() -> Self {
        Self {
            facility: LogsFacility::default(),
            levels: Self::default_levels(),
        }
    }
}
