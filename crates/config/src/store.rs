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

/// Shared ephemeral key-value store parameters.
#[derive(Debug, serde::Deserialize, serde::Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct StoreSettings {
    /// Connection string of the redis server holding the token records.
    #[serde(default = "StoreSettings::default_url")]
    pub url: String,
    /// How long to wait for the initial connection before giving up.
    #[serde(default = "StoreSettings::default_connect_timeout", with = "humantime_serde")]
    pub connect_timeout: std::time::Duration,
}

impl StoreSettings {
    fn default_url() -> String {
        "redis://localhost:6379".to_string()
    }

    const fn default_connect_timeout() -> std::time::Duration {
        std::time::Duration::from_secs(5)
    }
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            url: Self::default_url(),
            connect_timeout: Self::default_connect_timeout(),
        }
    }
}
