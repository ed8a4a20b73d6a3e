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

use vdup_config::{logs, semver, Broker, Config, ConfigResult, DuplicateSettings, StoreSettings};
use vdup_integrity::ProtocolParams;

pub mod cli;

/// Configuration for the duplicator service.
#[derive(Default, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DuplicatorConfig {
    pub api_version: semver::VersionReq,
    /// Name of the service, used in logs.
    #[serde(default = "DuplicatorConfig::default_name")]
    pub name: String,
    /// AMQP client configuration.
    #[serde(default)]
    pub broker: Broker,
    /// logging configuration.
    #[serde(default)]
    pub logs: logs::Logs,
    /// Shared token store configuration.
    #[serde(default)]
    pub store: StoreSettings,
    /// Duplicate-to-sender protocol configuration.
    #[serde(default)]
    pub duplicate: DuplicateSettings,
    /// Path to the configuration script.
    #[serde(skip)]
    pub path: std::path::PathBuf,
}

impl DuplicatorConfig {
    fn default_name() -> String {
        "vdup".to_string()
    }

    /// The protocol constants the engine runs with.
    #[must_use]
    pub fn protocol_params(&self) -> ProtocolParams {
        ProtocolParams {
            marker_name: self.duplicate.flag_name.clone(),
            marker_value: self.duplicate.flag_value.clone(),
            token_header: self.duplicate.token_header_name.clone(),
            key_prefix: self.duplicate.key_prefix.clone(),
            token_ttl: self.duplicate.token_ttl,
        }
    }
}

impl Config for DuplicatorConfig {
    #[allow(clippy::field_reassign_with_default)]
    fn with_path(path: &impl AsRef<std::path::Path>) -> ConfigResult<Self>
    where
        Self: Config + serde::de::DeserializeOwned + serde::Serialize,
    {
        let mut config = Self::default();
        config.path = path.as_ref().into();

        Ok(config)
    }

    fn api_version(&self) -> &semver::VersionReq {
        &self.api_version
    }

    fn broker(&self) -> &Broker {
        &self.broker
    }

    fn logs(&self) -> &logs::Logs {
        &self.logs
    }

    fn path(&self) -> &std::path::Path {
        &self.path
    }
}
