use crate::value::{Value, ValueType};
use std::collections::BTreeMap;

/// Root module output values keyed by name. Ordered so every renderer walks
/// outputs in the same sequence.
pub type OutputValues = BTreeMap<String, OutputValue>;

#[derive(Debug, Clone, PartialEq)]
pub struct OutputValue {
    pub value: Value,
    pub sensitive: bool,
    pub ty: ValueType,
}

impl OutputValue {
    /// Output whose type is inferred from its value.
    pub fn new(value: Value) -> Self {
        let ty = ValueType::of(&value);
        Self {
            value,
            sensitive: false,
            ty,
        }
    }

    pub fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }

    pub fn with_type(mut self, ty: ValueType) -> Self {
        self.ty = ty;
        self
    }
}
