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

/// Duplicate-to-sender protocol parameters.
///
/// Every instance sharing one store must run with the same values here,
/// otherwise tokens issued by one instance will never verify on another.
#[derive(Debug, serde::Deserialize, serde::Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct DuplicateSettings {
    /// Name of the header marking a message as already-a-duplicate.
    #[serde(default = "DuplicateSettings::default_flag_name")]
    pub flag_name: String,
    /// Value the marker header is emitted with.
    #[serde(default = "DuplicateSettings::default_flag_value")]
    pub flag_value: String,
    /// Name of the internal header carrying the security token.
    #[serde(default = "DuplicateSettings::default_token_header_name")]
    pub token_header_name: String,
    /// Namespace prepended to every token key in the store.
    #[serde(default = "DuplicateSettings::default_key_prefix")]
    pub key_prefix: String,
    /// Lifetime of an unconsumed token. Must cover an ordinary loopback
    /// delivery; anything longer only widens the forgery window.
    #[serde(default = "DuplicateSettings::default_token_ttl", with = "humantime_serde")]
    pub token_ttl: std::time::Duration,
}

impl DuplicateSettings {
    fn default_flag_name() -> String {
        "X-Vdup-Duplicate".to_string()
    }

    fn default_flag_value() -> String {
        "yes".to_string()
    }

    fn default_token_header_name() -> String {
        "X-Vdup-Token".to_string()
    }

    fn default_key_prefix() -> String {
        "vdup".to_string()
    }

    const fn default_token_ttl() -> std::time::Duration {
        std::time::Duration::from_secs(60)
    }
}

impl Default for DuplicateSettings {
    fn default() -> Self {
        Self {
            flag_name: Self::default_flag_name(),
            flag_value: Self::default_flag_value(),
            token_header_name: Self::default_token_header_name(),
            key_prefix: Self::default_key_prefix(),
            token_ttl: Self::default_token_ttl(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let settings = serde_json::from_str::<DuplicateSettings>("{}").unwrap();

        assert_eq!(settings, DuplicateSettings::default());
        assert_eq!(settings.token_ttl, std::time::Duration::from_secs(60));
    }

    #[test]
    fn test_ttl_is_human_readable() {
        let settings =
            serde_json::from_str::<DuplicateSettings>(r#"{ "token_ttl": "2m 30s" }"#).unwrap();

        assert_eq!(settings.token_ttl, std::time::Duration::from_secs(150));
    }

    #[test]
    fn test_unknown_fields_are_rejected() {
        assert!(serde_json::from_str::<DuplicateSettings>(r#"{ "token": "x" }"#).is_err());
    }
}
