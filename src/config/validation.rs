//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Reject missing signer credentials before anything touches the network
//! - Validate value ranges (intervals > 0, addresses parse as felts)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: (ScriptConfig, Script) → Result<(), Vec<ValidationError>>
//! - Only the settings the given script reads are checked
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;

use crate::blockchain::types::parse_felt;
use crate::config::schema::{Script, ScriptConfig};

/// A single semantic problem with the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Validate a fully merged configuration for `script`.
pub fn validate_config(config: &ScriptConfig, script: Script) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    validate_credentials(config, &mut errors);

    match url::Url::parse(&config.network.rpc_url) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
        Ok(url) => errors.push(ValidationError::new(
            "network.rpc_url",
            format!("unsupported scheme '{}'", url.scheme()),
        )),
        Err(e) => errors.push(ValidationError::new(
            "network.rpc_url",
            format!("invalid URL '{}': {}", config.network.rpc_url, e),
        )),
    }

    if let Err(e) = parse_felt(&config.contracts.player_address) {
        errors.push(ValidationError::new("contracts.player_address", e.to_string()));
    }

    if config.transactions.poll_interval_ms == 0 {
        errors.push(ValidationError::new(
            "transactions.poll_interval_ms",
            "must be greater than 0",
        ));
    }
    if config.transactions.acceptance_timeout_secs == 0 {
        errors.push(ValidationError::new(
            "transactions.acceptance_timeout_secs",
            "must be greater than 0",
        ));
    }

    match script {
        Script::Refresher => validate_refresher(config, &mut errors),
        Script::Transfer => {
            if let Err(e) = parse_felt(&config.contracts.erc1155_address) {
                errors.push(ValidationError::new("contracts.erc1155_address", e.to_string()));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_refresher(config: &ScriptConfig, errors: &mut Vec<ValidationError>) {
    if config.refresh.interval_ms == 0 {
        errors.push(ValidationError::new("refresh.interval_ms", "must be greater than 0"));
    }

    if let Some(addr) = &config.observability.metrics_address {
        if addr.parse::<SocketAddr>().is_err() {
            errors.push(ValidationError::new(
                "observability.metrics_address",
                format!("invalid socket address '{}'", addr),
            ));
        }
    }
}

fn validate_credentials(config: &ScriptConfig, errors: &mut Vec<ValidationError>) {
    let address = config.signer.account_address.as_deref().map(str::trim);
    let key = config.signer.private_key.as_deref().map(str::trim);

    match address {
        None | Some("") => errors.push(ValidationError::new(
            "signer.account_address",
            "ACCOUNT_ADDRESS must be set",
        )),
        Some(value) => {
            if let Err(e) = parse_felt(value) {
                errors.push(ValidationError::new("signer.account_address", e.to_string()));
            }
        }
    }

    match key {
        None | Some("") => errors.push(ValidationError::new(
            "signer.private_key",
            "PRIVATE_KEY must be set",
        )),
        // Never echo the key itself back into the error message.
        Some(value) => {
            if parse_felt(value).is_err() {
                errors.push(ValidationError::new(
                    "signer.private_key",
                    "not a valid field element",
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> ScriptConfig {
        let mut config = ScriptConfig::default();
        config.signer.account_address = Some("0x0123abc".to_string());
        config.signer.private_key = Some("0x1a2b3c".to_string());
        config
    }

    #[test]
    fn test_valid_config() {
        assert!(validate_config(&valid_config(), Script::Refresher).is_ok());
    }

    #[test]
    fn test_missing_credentials_reports_both() {
        let config = ScriptConfig::default();
        let errors = validate_config(&config, Script::Refresher).unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert!(fields.contains(&"signer.account_address"));
        assert!(fields.contains(&"signer.private_key"));
    }

    #[test]
    fn test_blank_credentials_rejected() {
        let mut config = valid_config();
        config.signer.private_key = Some("   ".to_string());
        let errors = validate_config(&config, Script::Refresher).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "signer.private_key");
    }

    #[test]
    fn test_invalid_key_is_not_echoed() {
        let mut config = valid_config();
        config.signer.private_key = Some("0xnothex-secret".to_string());
        let errors = validate_config(&config, Script::Refresher).unwrap_err();
        assert!(!errors[0].to_string().contains("secret"));
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = valid_config();
        config.network.rpc_url = "ftp://node".to_string();
        config.refresh.interval_ms = 0;
        config.contracts.player_address = "player".to_string();
        config.observability.metrics_address = Some("nowhere".to_string());

        let errors = validate_config(&config, Script::Refresher).unwrap_err();
        assert_eq!(errors.len(), 4);
    }

    #[test]
    fn test_checks_scoped_to_script() {
        let mut config = valid_config();
        config.refresh.interval_ms = 0;
        config.observability.metrics_address = Some("nowhere".to_string());
        config.contracts.erc1155_address = "token".to_string();

        let refresher = validate_config(&config, Script::Refresher).unwrap_err();
        let fields: Vec<_> = refresher.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["refresh.interval_ms", "observability.metrics_address"]);

        let transfer = validate_config(&config, Script::Transfer).unwrap_err();
        let fields: Vec<_> = transfer.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["contracts.erc1155_address"]);
    }

    #[test]
    fn test_transfer_reports_only_credentials() {
        let mut config = ScriptConfig::default();
        config.refresh.interval_ms = 0;
        config.observability.metrics_address = Some("nowhere".to_string());

        let errors = validate_config(&config, Script::Transfer).unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["signer.account_address", "signer.private_key"]);
    }
}
