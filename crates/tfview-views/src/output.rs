use crate::format::format_value;
use crate::view::View;
use std::sync::Arc;
use tfview_types::OutputValues;

/// Renders output values as `name = value` lines.
pub struct OutputHuman {
    view: Arc<View>,
}

impl OutputHuman {
    pub fn new(view: Arc<View>) -> Self {
        Self { view }
    }

    pub fn output(&self, outputs: &OutputValues) {
        let text = format_outputs(outputs);
        if !text.is_empty() {
            self.view.streams().println(&text);
        }
    }
}

pub fn format_outputs(outputs: &OutputValues) -> String {
    let mut out = String::new();
    for (name, output) in outputs {
        if output.sensitive {
            out.push_str(&format!("{} = <sensitive>\n", name));
        } else {
            out.push_str(&format!("{} = {}\n", name, format_value(&output.value, 0)));
        }
    }
    out.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tfview_types::{OutputValue, Value};

    #[test]
    fn test_outputs_sorted_and_masked() {
        let outputs = OutputValues::from([
            ("zone".to_string(), OutputValue::new(Value::string("eu-west-1a"))),
            ("db_password".to_string(), OutputValue::new(Value::string("hunter2")).sensitive()),
        ]);

        let text = format_outputs(&outputs);

        assert_eq!(text, "db_password = <sensitive>\nzone = \"eu-west-1a\"");
        assert!(!text.contains("hunter2"));
    }
}
