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

/// AMQP client parameters.
#[derive(Debug, serde::Deserialize, serde::Serialize, PartialEq, Eq)]
pub struct Broker {
    /// AMQP endpoint.
    #[serde(default = "Broker::default_uri")]
    pub uri: String,
    #[serde(
        default,
        skip_serializing,
        deserialize_with = "crate::deserialize_certificate"
    )]
    pub certificate_chain: Option<String>,
}

impl Default for Broker {
    fn default() -> Self {
        Self {
            uri: Self::default_uri(),
            certificate_chain: None,
        }
    }
}

impl Broker {
    fn default_uri() -> String {
        "amqp://localhost:5672".to_string()
    }

    /// Open a connection to the broker.
    ///
    /// # Errors
    ///
    /// * The broker cannot be reached or refused the connection.
    pub async fn connect(&self) -> lapin::Result<lapin::Connection> {
        lapin::Connection::connect_with_config(
            &self.uri,
            lapin::ConnectionProperties::default(),
            lapin::tcp::OwnedTLSConfig {
                identity: None,
                cert_chain: self.certificate_chain.clone(),
            },
        )
        .await
    }
}
