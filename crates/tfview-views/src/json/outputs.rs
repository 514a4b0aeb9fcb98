use serde::Serialize;
use std::collections::BTreeMap;
use tfview_types::{Diagnostic, Diagnostics, OutputValues};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JsonOutput {
    pub sensitive: bool,
    #[serde(rename = "type")]
    pub ty: serde_json::Value,
    /// Omitted for sensitive outputs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,
}

pub type JsonOutputs = BTreeMap<String, JsonOutput>;

/// Convert output values into the `outputs` record schema.
///
/// Every output is checked, so the returned diagnostics name each output that
/// could not be encoded. Callers must not emit the map when diagnostics
/// contain errors.
pub fn outputs_from_map(outputs: &OutputValues) -> (JsonOutputs, Diagnostics) {
    let mut json = JsonOutputs::new();
    let mut diags = Diagnostics::new();

    for (name, output) in outputs {
        let encoded = output
            .ty
            .check(&output.value)
            .and_then(|_| output.value.to_json());

        match encoded {
            Ok(value) => {
                json.insert(
                    name.clone(),
                    JsonOutput {
                        sensitive: output.sensitive,
                        ty: output.ty.to_json(),
                        value: (!output.sensitive).then_some(value),
                    },
                );
            }
            Err(reason) => diags.push(
                Diagnostic::error(
                    format!("Error serializing output {:?}", name),
                    format!("Unable to serialize output {:?}: {}.", name, reason),
                )
                .with_address(format!("output.{}", name)),
            ),
        }
    }

    (json, diags)
}
