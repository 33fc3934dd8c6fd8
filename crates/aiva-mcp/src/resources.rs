//! Static reference resources
//!
//! Fixed TM Forum reference text served via the MCP resources protocol.
//! Pure constants, byte-identical on every read.

use serde::{Deserialize, Serialize};

/// Resource metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceInfo {
    pub uri: String,
    pub name: String,
    pub description: Option<String>,
    pub mime_type: Option<String>,
}

/// Registry of the embedded reference documents.
pub struct ResourceRegistry {
    resources: Vec<ResourceInfo>,
}

impl Default for ResourceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceRegistry {
    pub fn new() -> Self {
        let resources = vec![
            ResourceInfo {
                uri: "apis://categories".to_string(),
                name: "TM Forum Open API categories".to_string(),
                description: Some("The main categories of TM Forum Open APIs".to_string()),
                mime_type: Some("text/plain".to_string()),
            },
            ResourceInfo {
                uri: "knowledge://frameworks".to_string(),
                name: "TM Forum frameworks".to_string(),
                description: Some("Key TM Forum frameworks".to_string()),
                mime_type: Some("text/plain".to_string()),
            },
        ];
        Self { resources }
    }

    pub fn list(&self) -> &[ResourceInfo] {
        &self.resources
    }

    pub fn get(&self, uri: &str) -> Option<&ResourceInfo> {
        self.resources.iter().find(|r| r.uri == uri)
    }

    pub fn read(&self, uri: &str) -> Option<&'static str> {
        match uri {
            "apis://categories" => Some(API_CATEGORIES_DOC),
            "knowledge://frameworks" => Some(FRAMEWORKS_DOC),
            _ => None,
        }
    }
}

const API_CATEGORIES_DOC: &str = r#"TM Forum Open APIs are organized into these main categories:

1. Customer Management APIs
   - Customer management, engagement, and experience
   - Party management and privacy

2. Product Management APIs
   - Product catalog and inventory
   - Product ordering and qualification
   - Product specifications and offering management
   - Product Quote management
   - Product Configuration management

3. Service Management APIs
   - Service catalog and inventory
   - Service ordering and activation
   - Service quality management
   - Service problem management
   - Service test management
   - Service performance management
   - Service Level Agreement management
   - Service Level Assurance management

4. Resource Management APIs
   - Resource catalog and inventory
   - Resource ordering and activation
   - Resource function management
   - Resource performance management
   - Resource trouble management

5. Common APIs
   - Event management
   - Notification management
   - Alarm management
   - Usage management
   - Audit Management
   - Authorization Management
   - Identity Management
"#;

const FRAMEWORKS_DOC: &str = r#"Key TM Forum frameworks include:

1. Open Digital Architecture (ODA)
   - Component-based architecture
   - Open APIs and standard interfaces
   - Cloud-native design principles

2. Business Process Framework (eTOM)
   - End-to-end business processes
   - Operations and strategy mapping
   - Process decomposition

3. Information Framework (SID)
   - Common information model
   - Business entity definitions
   - Data model standards

4. Application Framework (TAM)
   - Application component mapping
   - System integration patterns
   - Application capabilities"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_both_documents() {
        let registry = ResourceRegistry::new();
        let uris: Vec<_> = registry.list().iter().map(|r| r.uri.as_str()).collect();
        assert_eq!(uris, vec!["apis://categories", "knowledge://frameworks"]);
    }

    #[test]
    fn reads_are_byte_identical_across_calls() {
        let registry = ResourceRegistry::new();
        let first = registry.read("apis://categories").unwrap();
        let second = registry.read("apis://categories").unwrap();
        assert_eq!(first, second);
        assert!(first.contains("Customer Management APIs"));

        let frameworks = registry.read("knowledge://frameworks").unwrap();
        assert!(frameworks.contains("Open Digital Architecture (ODA)"));
    }

    #[test]
    fn unknown_uri_is_none() {
        let registry = ResourceRegistry::new();
        assert!(registry.read("docs://missing").is_none());
        assert!(registry.get("docs://missing").is_none());
    }
}
