use serde::Serialize;
use tfview_types::{ActionKind, ResourceAddr, ResourceKey};

/// Resource description attached to every hook record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceRecord {
    pub addr: String,
    pub module: String,
    pub resource: String,
    pub implied_provider: String,
    pub resource_type: String,
    pub resource_name: String,
    pub resource_key: Option<ResourceKey>,
}

impl From<&ResourceAddr> for ResourceRecord {
    fn from(addr: &ResourceAddr) -> Self {
        Self {
            addr: addr.to_string(),
            module: addr.module_path(),
            resource: addr.resource(),
            implied_provider: addr.implied_provider().to_string(),
            resource_type: addr.resource_type.clone(),
            resource_name: addr.name.clone(),
            resource_key: addr.key.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HookRecord {
    pub resource: ResourceRecord,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<ActionKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elapsed_seconds: Option<u64>,
}

impl HookRecord {
    pub fn new(addr: &ResourceAddr) -> Self {
        Self {
            resource: ResourceRecord::from(addr),
            action: None,
            id_key: None,
            id_value: None,
            elapsed_seconds: None,
        }
    }
}
