//! State snapshot files replayed by the refresh command.
//!
//! ```json
//! {
//!   "resources": [{"addr": "aws_instance.web", "id": "i-0abc"}],
//!   "outputs": {"ip": {"value": "10.0.0.1"}},
//!   "diagnostics": []
//! }
//! ```

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use tfview_types::{
    ActionKind, Diagnostic, Diagnostics, OutputValue, OutputValues, ResourceAddr, ResourceMode,
    Value, ValueType,
};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub resources: Vec<ResourceEntry>,
    #[serde(default)]
    pub outputs: BTreeMap<String, OutputEntry>,
    /// Diagnostics recorded by the run that produced the snapshot
    #[serde(default)]
    pub diagnostics: Diagnostics,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResourceEntry {
    pub addr: String,
    #[serde(default)]
    pub id: Option<String>,
    /// Simulated provider failure for this resource
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputEntry {
    #[serde(default)]
    pub value: serde_json::Value,
    #[serde(default)]
    pub sensitive: bool,
    #[serde(default, rename = "type")]
    pub ty: Option<ValueType>,
    /// The value is not known until apply
    #[serde(default)]
    pub unknown: bool,
}

/// A resource ready to hand to the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedResource {
    pub addr: ResourceAddr,
    pub action: ActionKind,
    pub id: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct RefreshPlan {
    pub resources: Vec<PlannedResource>,
    pub outputs: OutputValues,
    pub diagnostics: Diagnostics,
}

impl Snapshot {
    pub fn read(path: &Path) -> Result<Self, Diagnostic> {
        let content = std::fs::read_to_string(path).map_err(|err| {
            Diagnostic::error(
                "Failed to read state snapshot",
                format!("Could not read {}: {}.", path.display(), err),
            )
        })?;

        serde_json::from_str(&content).map_err(|err| {
            Diagnostic::error(
                "Invalid state snapshot",
                format!("{} is not a valid snapshot: {}.", path.display(), err),
            )
        })
    }

    /// Resolve addresses and output values. Entries that cannot be resolved
    /// are dropped and reported as error diagnostics.
    pub fn into_plan(self) -> (RefreshPlan, Diagnostics) {
        let mut diags = Diagnostics::new();
        let mut resources = Vec::with_capacity(self.resources.len());

        for entry in self.resources {
            match entry.addr.parse::<ResourceAddr>() {
                Ok(addr) => {
                    let action = match addr.mode {
                        ResourceMode::Managed => ActionKind::Refresh,
                        ResourceMode::Data => ActionKind::Read,
                    };
                    resources.push(PlannedResource {
                        addr,
                        action,
                        id: entry.id,
                        error: entry.error,
                    });
                }
                Err(err) => diags.push(Diagnostic::error(
                    "Invalid resource address in state",
                    err.to_string(),
                )),
            }
        }

        let outputs = self
            .outputs
            .into_iter()
            .map(|(name, entry)| {
                let value = if entry.unknown {
                    Value::Unknown
                } else {
                    Value::from(entry.value)
                };
                let mut output = OutputValue::new(value);
                if let Some(ty) = entry.ty {
                    output = output.with_type(ty);
                }
                if entry.sensitive {
                    output = output.sensitive();
                }
                (name, output)
            })
            .collect();

        let plan = RefreshPlan {
            resources,
            outputs,
            diagnostics: self.diagnostics,
        };
        (plan, diags)
    }
}

impl RefreshPlan {
    /// Keep only resources matched by one of `targets`. An empty target list
    /// keeps everything.
    pub fn retain_targets(&mut self, targets: &[ResourceAddr]) {
        if targets.is_empty() {
            return;
        }
        self.resources
            .retain(|r| targets.iter().any(|t| target_matches(t, &r.addr)));
    }
}

/// A target without an instance key selects every instance of the resource.
fn target_matches(target: &ResourceAddr, addr: &ResourceAddr) -> bool {
    target.module == addr.module
        && target.mode == addr.mode
        && target.resource_type == addr.resource_type
        && target.name == addr.name
        && (target.key.is_none() || target.key == addr.key)
}
