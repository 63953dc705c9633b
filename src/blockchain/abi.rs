//! Contract interface descriptions.
//!
//! Reads the `abi` array of a compiled contract class
//! (`target/dev/<package>_<Contract>.contract_class.json`) and answers
//! whether an entry point exists and how many inputs it takes. Calldata
//! itself is encoded in `transaction.rs`.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::blockchain::types::{ChainError, ChainResult};

/// A function declared by the contract, either at top level or inside an
/// `interface` entry.
#[derive(Debug, Clone, Deserialize)]
pub struct AbiFunction {
    pub name: String,
    #[serde(default)]
    pub inputs: Vec<AbiParam>,
    #[serde(default)]
    pub state_mutability: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AbiParam {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum AbiEntry {
    Function(AbiFunction),
    Interface {
        #[serde(default)]
        items: Vec<AbiEntry>,
    },
    // structs, enums, events, impls, constructors...
    #[serde(other)]
    Other,
}

/// Scarb writes the ABI as an array; classes fetched over RPC carry it as a
/// JSON-encoded string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawAbi {
    Entries(Vec<AbiEntry>),
    Encoded(String),
}

#[derive(Debug, Deserialize)]
struct ContractClassFile {
    abi: RawAbi,
}

/// Callable interface of one contract.
#[derive(Debug, Clone, Default)]
pub struct ContractAbi {
    functions: Vec<AbiFunction>,
}

impl ContractAbi {
    /// Load the ABI from a contract class file.
    pub fn load(path: &Path) -> ChainResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            ChainError::Abi(format!("Cannot read '{}': {}", path.display(), e))
        })?;
        Self::from_json(&content)
            .map_err(|e| ChainError::Abi(format!("'{}': {}", path.display(), e)))
    }

    /// Parse a contract class document of the shape `{ "abi": [...] }`.
    pub fn from_json(content: &str) -> ChainResult<Self> {
        let class: ContractClassFile = serde_json::from_str(content)
            .map_err(|e| ChainError::Abi(format!("Malformed contract class: {}", e)))?;

        let entries = match class.abi {
            RawAbi::Entries(entries) => entries,
            RawAbi::Encoded(json) => serde_json::from_str(&json)
                .map_err(|e| ChainError::Abi(format!("Malformed encoded ABI: {}", e)))?,
        };

        let mut functions = Vec::new();
        collect_functions(entries, &mut functions);
        Ok(Self { functions })
    }

    /// Look up a function by name.
    pub fn function(&self, name: &str) -> Option<&AbiFunction> {
        self.functions.iter().find(|f| f.name == name)
    }

    /// Number of declared functions.
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// Fail unless `name` is declared with exactly `arity` inputs.
    pub fn ensure_entrypoint(&self, name: &str, arity: usize) -> ChainResult<()> {
        let function = self
            .function(name)
            .ok_or_else(|| ChainError::Abi(format!("Entry point '{}' not found", name)))?;

        if function.inputs.len() != arity {
            return Err(ChainError::Abi(format!(
                "Entry point '{}' takes {} inputs, expected {}",
                name,
                function.inputs.len(),
                arity
            )));
        }
        Ok(())
    }
}

fn collect_functions(entries: Vec<AbiEntry>, out: &mut Vec<AbiFunction>) {
    for entry in entries {
        match entry {
            AbiEntry::Function(function) => out.push(function),
            AbiEntry::Interface { items } => collect_functions(items, out),
            AbiEntry::Other => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAYER_CLASS: &str = r#"{
        "sierra_program": [],
        "abi": [
            { "type": "impl", "name": "PlayerActionsImpl",
              "interface_name": "coa::IPlayerActions" },
            { "type": "struct", "name": "core::integer::u256", "members": [
                { "name": "low", "type": "core::integer::u128" },
                { "name": "high", "type": "core::integer::u128" }
            ]},
            { "type": "interface", "name": "coa::IPlayerActions", "items": [
                { "type": "function", "name": "refresh_inventory", "inputs": [], "outputs": [],
                  "state_mutability": "external" },
                { "type": "function", "name": "transfer_objects", "inputs": [
                    { "name": "object_ids", "type": "core::array::Array::<core::integer::u256>" }
                ], "outputs": [], "state_mutability": "external" }
            ]},
            { "type": "event", "name": "coa::Event", "kind": "enum", "variants": [] }
        ]
    }"#;

    #[test]
    fn test_nested_interface_functions() {
        let abi = ContractAbi::from_json(PLAYER_CLASS).unwrap();
        assert_eq!(abi.len(), 2);
        assert!(abi.ensure_entrypoint("refresh_inventory", 0).is_ok());
        assert!(abi.ensure_entrypoint("transfer_objects", 1).is_ok());

        let f = abi.function("transfer_objects").unwrap();
        assert_eq!(f.inputs[0].ty, "core::array::Array::<core::integer::u256>");
        assert_eq!(f.state_mutability.as_deref(), Some("external"));
    }

    #[test]
    fn test_top_level_functions() {
        let abi = ContractAbi::from_json(
            r#"{ "abi": [ { "type": "function", "name": "balance_of", "inputs": [
                { "name": "account", "type": "felt" }, { "name": "id", "type": "Uint256" }
            ], "outputs": [] } ] }"#,
        )
        .unwrap();
        assert!(abi.ensure_entrypoint("balance_of", 2).is_ok());
    }

    #[test]
    fn test_encoded_abi_string() {
        let abi = ContractAbi::from_json(
            r#"{ "abi": "[{\"type\":\"function\",\"name\":\"refresh_inventory\",\"inputs\":[]}]" }"#,
        )
        .unwrap();
        assert!(abi.function("refresh_inventory").is_some());
    }

    #[test]
    fn test_missing_entrypoint() {
        let abi = ContractAbi::from_json(PLAYER_CLASS).unwrap();
        let err = abi.ensure_entrypoint("safe_transfer_from", 5).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_arity_mismatch() {
        let abi = ContractAbi::from_json(PLAYER_CLASS).unwrap();
        let err = abi.ensure_entrypoint("transfer_objects", 2).unwrap_err();
        assert!(err.to_string().contains("takes 1 inputs"));
    }

    #[test]
    fn test_missing_abi_key() {
        assert!(ContractAbi::from_json(r#"{ "sierra_program": [] }"#).is_err());
    }

    #[test]
    fn test_unreadable_file() {
        let err = ContractAbi::load(Path::new("/nonexistent/class.json")).unwrap_err();
        assert!(matches!(err, ChainError::Abi(_)));
    }
}
