use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Dynamic value produced by the reconciliation engine.
///
/// `Unknown` marks a value that is not yet known (for example a computed
/// attribute of a resource that has not been created). It has no JSON
/// representation.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    String(String),
    List(Vec<Value>),
    Map(BTreeMap<String, Value>),
    Unknown,
}

impl Value {
    pub fn string(s: impl Into<String>) -> Self {
        Value::String(s.into())
    }

    pub fn number(n: impl Into<serde_json::Number>) -> Self {
        Value::Number(n.into())
    }

    /// Short noun used in error messages ("a string", "a list", ...)
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "a bool",
            Value::Number(_) => "a number",
            Value::String(_) => "a string",
            Value::List(_) => "a list",
            Value::Map(_) => "a map",
            Value::Unknown => "an unknown value",
        }
    }

    /// Convert to JSON. Fails on the first unknown value, naming its path.
    pub fn to_json(&self) -> std::result::Result<serde_json::Value, String> {
        let mut path = Vec::new();
        self.to_json_at(&mut path)
    }

    fn to_json_at(&self, path: &mut Vec<String>) -> std::result::Result<serde_json::Value, String> {
        Ok(match self {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Number(n) => serde_json::Value::Number(n.clone()),
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::List(items) => {
                let mut out = Vec::with_capacity(items.len());
                for (i, item) in items.iter().enumerate() {
                    path.push(format!("[{}]", i));
                    out.push(item.to_json_at(path)?);
                    path.pop();
                }
                serde_json::Value::Array(out)
            }
            Value::Map(entries) => {
                let mut out = serde_json::Map::new();
                for (k, v) in entries {
                    path.push(format!("[{:?}]", k));
                    out.insert(k.clone(), v.to_json_at(path)?);
                    path.pop();
                }
                serde_json::Value::Object(out)
            }
            Value::Unknown => {
                return Err(if path.is_empty() {
                    "value is not yet known".to_string()
                } else {
                    format!("value at {} is not yet known", path.concat())
                });
            }
        })
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(entries) => {
                Value::Map(
                    entries
                        .into_iter()
                        .map(|(k, v)| (k, Value::from(v)))
                        .collect(),
                )
            }
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

/// Type constraint of a value, serialized in the cty JSON type notation
/// (`"string"`, `["list","string"]`, `["object",{"a":"number"}]`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "serde_json::Value", try_from = "serde_json::Value")]
pub enum ValueType {
    Dynamic,
    String,
    Number,
    Bool,
    List(Box<ValueType>),
    Set(Box<ValueType>),
    Map(Box<ValueType>),
    Tuple(Vec<ValueType>),
    Object(BTreeMap<String, ValueType>),
}

impl ValueType {
    /// Infer the structural type of a value. Collections infer as tuples and
    /// objects since element types are not declared.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null | Value::Unknown => ValueType::Dynamic,
            Value::Bool(_) => ValueType::Bool,
            Value::Number(_) => ValueType::Number,
            Value::String(_) => ValueType::String,
            Value::List(items) => ValueType::Tuple(items.iter().map(ValueType::of).collect()),
            Value::Map(entries) => ValueType::Object(
                entries
                    .iter()
                    .map(|(k, v)| (k.clone(), ValueType::of(v)))
                    .collect(),
            ),
        }
    }

    /// Check that `value` conforms to this type. Null and unknown conform to
    /// every type.
    pub fn check(&self, value: &Value) -> std::result::Result<(), String> {
        let mut path = Vec::new();
        self.check_at(value, &mut path)
    }

    fn check_at(&self, value: &Value, path: &mut Vec<String>) -> std::result::Result<(), String> {
        if matches!(value, Value::Null | Value::Unknown) {
            return Ok(());
        }

        let mismatch = |path: &[String], wanted: &str| {
            let found = value.kind();
            if path.is_empty() {
                format!("{} is required, but got {}", wanted, found)
            } else {
                format!("{}: {} is required, but got {}", path.concat(), wanted, found)
            }
        };

        match (self, value) {
            (ValueType::Dynamic, _) => Ok(()),
            (ValueType::String, Value::String(_)) => Ok(()),
            (ValueType::Number, Value::Number(_)) => Ok(()),
            (ValueType::Bool, Value::Bool(_)) => Ok(()),
            (ValueType::List(elem) | ValueType::Set(elem), Value::List(items)) => {
                for (i, item) in items.iter().enumerate() {
                    path.push(format!("[{}]", i));
                    elem.check_at(item, path)?;
                    path.pop();
                }
                Ok(())
            }
            (ValueType::Map(elem), Value::Map(entries)) => {
                for (k, v) in entries {
                    path.push(format!("[{:?}]", k));
                    elem.check_at(v, path)?;
                    path.pop();
                }
                Ok(())
            }
            (ValueType::Tuple(elems), Value::List(items)) => {
                if elems.len() != items.len() {
                    return Err(mismatch(path, &format!("a tuple of {} elements", elems.len())));
                }
                for (i, (ty, item)) in elems.iter().zip(items).enumerate() {
                    path.push(format!("[{}]", i));
                    ty.check_at(item, path)?;
                    path.pop();
                }
                Ok(())
            }
            (ValueType::Object(attrs), Value::Map(entries)) => {
                if let Some(extra) = entries.keys().find(|k| !attrs.contains_key(*k)) {
                    return Err(mismatch(path, &format!("an object without attribute {:?}", extra)));
                }
                for (name, ty) in attrs {
                    let Some(v) = entries.get(name) else {
                        return Err(mismatch(path, &format!("an object with attribute {:?}", name)));
                    };
                    path.push(format!(".{}", name));
                    ty.check_at(v, path)?;
                    path.pop();
                }
                Ok(())
            }
            (ValueType::String, _) => Err(mismatch(path, "a string")),
            (ValueType::Number, _) => Err(mismatch(path, "a number")),
            (ValueType::Bool, _) => Err(mismatch(path, "a bool")),
            (ValueType::List(_), _) => Err(mismatch(path, "a list")),
            (ValueType::Set(_), _) => Err(mismatch(path, "a set")),
            (ValueType::Map(_), _) => Err(mismatch(path, "a map")),
            (ValueType::Tuple(_), _) => Err(mismatch(path, "a tuple")),
            (ValueType::Object(_), _) => Err(mismatch(path, "an object")),
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::json;
        match self {
            ValueType::Dynamic => json!("dynamic"),
            ValueType::String => json!("string"),
            ValueType::Number => json!("number"),
            ValueType::Bool => json!("bool"),
            ValueType::List(elem) => json!(["list", elem.to_json()]),
            ValueType::Set(elem) => json!(["set", elem.to_json()]),
            ValueType::Map(elem) => json!(["map", elem.to_json()]),
            ValueType::Tuple(elems) => {
                json!(["tuple", elems.iter().map(ValueType::to_json).collect::<Vec<_>>()])
            }
            ValueType::Object(attrs) => {
                let attrs: serde_json::Map<String, serde_json::Value> = attrs
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect();
                json!(["object", attrs])
            }
        }
    }

    pub fn from_json(json: &serde_json::Value) -> Result<Self> {
        use serde_json::Value as J;

        match json {
            J::String(name) => match name.as_str() {
                "dynamic" => Ok(ValueType::Dynamic),
                "string" => Ok(ValueType::String),
                "number" => Ok(ValueType::Number),
                "bool" => Ok(ValueType::Bool),
                other => Err(Error::InvalidType(format!("unknown primitive type {:?}", other))),
            },
            J::Array(parts) if parts.len() == 2 => {
                let kind = parts[0]
                    .as_str()
                    .ok_or_else(|| Error::InvalidType("collection kind must be a string".into()))?;
                let inner = &parts[1];
                match kind {
                    "list" => Ok(ValueType::List(Box::new(Self::from_json(inner)?))),
                    "set" => Ok(ValueType::Set(Box::new(Self::from_json(inner)?))),
                    "map" => Ok(ValueType::Map(Box::new(Self::from_json(inner)?))),
                    "tuple" => {
                        let elems = inner.as_array().ok_or_else(|| {
                            Error::InvalidType("tuple element types must be an array".into())
                        })?;
                        Ok(ValueType::Tuple(
                            elems.iter().map(Self::from_json).collect::<Result<_>>()?,
                        ))
                    }
                    "object" => {
                        let attrs = inner.as_object().ok_or_else(|| {
                            Error::InvalidType("object attribute types must be an object".into())
                        })?;
                        let attrs = attrs
                            .iter()
                            .map(|(k, v)| Ok((k.clone(), Self::from_json(v)?)))
                            .collect::<Result<_>>()?;
                        Ok(ValueType::Object(attrs))
                    }
                    other => Err(Error::InvalidType(format!(
                        "unknown collection kind {:?}",
                        other
                    ))),
                }
            }
            other => Err(Error::InvalidType(format!("unexpected type notation {}", other))),
        }
    }
}

impl From<ValueType> for serde_json::Value {
    fn from(ty: ValueType) -> Self {
        ty.to_json()
    }
}

impl TryFrom<serde_json::Value> for ValueType {
    type Error = Error;

    fn try_from(json: serde_json::Value) -> Result<Self> {
        ValueType::from_json(&json)
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_json())
    }
}
