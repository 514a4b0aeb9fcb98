use crate::{Error, Result};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Instance key of a counted (`[0]`) or keyed (`["a"]`) resource or module.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum ResourceKey {
    Int(i64),
    Str(String),
}

impl fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKey::Int(i) => write!(f, "[{}]", i),
            ResourceKey::Str(s) => write!(f, "[{:?}]", s),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceMode {
    Managed,
    Data,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModuleStep {
    pub name: String,
    pub key: Option<ResourceKey>,
}

/// Absolute address of a resource instance, e.g.
/// `module.net["a"].aws_subnet.private[0]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceAddr {
    pub module: Vec<ModuleStep>,
    pub mode: ResourceMode,
    pub resource_type: String,
    pub name: String,
    pub key: Option<ResourceKey>,
}

impl ResourceAddr {
    pub fn managed(resource_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            module: Vec::new(),
            mode: ResourceMode::Managed,
            resource_type: resource_type.into(),
            name: name.into(),
            key: None,
        }
    }

    /// Module path prefix, empty for the root module.
    pub fn module_path(&self) -> String {
        let mut out = String::new();
        for (i, step) in self.module.iter().enumerate() {
            if i > 0 {
                out.push('.');
            }
            out.push_str("module.");
            out.push_str(&step.name);
            if let Some(key) = &step.key {
                out.push_str(&key.to_string());
            }
        }
        out
    }

    /// Address relative to its module.
    pub fn resource(&self) -> String {
        let mut out = String::new();
        if self.mode == ResourceMode::Data {
            out.push_str("data.");
        }
        out.push_str(&self.resource_type);
        out.push('.');
        out.push_str(&self.name);
        if let Some(key) = &self.key {
            out.push_str(&key.to_string());
        }
        out
    }

    /// Provider inferred from the resource type prefix (`aws_instance` -> `aws`).
    pub fn implied_provider(&self) -> &str {
        match self.resource_type.split_once('_') {
            Some((prefix, _)) => prefix,
            None => &self.resource_type,
        }
    }
}

impl fmt::Display for ResourceAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let module = self.module_path();
        if module.is_empty() {
            write!(f, "{}", self.resource())
        } else {
            write!(f, "{}.{}", module, self.resource())
        }
    }
}

impl Serialize for ResourceAddr {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl FromStr for ResourceAddr {
    type Err = Error;

    fn from_str(input: &str) -> Result<Self> {
        let mut parser = Parser { input, pos: 0 };
        parser.parse()
    }
}

struct Parser<'a> {
    input: &'a str,
    pos: usize,
}

impl Parser<'_> {
    fn parse(&mut self) -> Result<ResourceAddr> {
        let mut module = Vec::new();

        while self.rest().starts_with("module.") {
            self.pos += "module.".len();
            let name = self.ident()?;
            let key = self.key()?;
            self.expect('.')?;
            module.push(ModuleStep { name, key });
        }

        let mode = if self.rest().starts_with("data.") {
            self.pos += "data.".len();
            ResourceMode::Data
        } else {
            ResourceMode::Managed
        };

        let resource_type = self.ident()?;
        self.expect('.')?;
        let name = self.ident()?;
        let key = self.key()?;

        if !self.rest().is_empty() {
            return Err(self.error(format!("unexpected trailing input {:?}", self.rest())));
        }

        Ok(ResourceAddr {
            module,
            mode,
            resource_type,
            name,
            key,
        })
    }

    fn rest(&self) -> &str {
        &self.input[self.pos..]
    }

    fn error(&self, reason: impl Into<String>) -> Error {
        Error::InvalidAddress {
            input: self.input.to_string(),
            reason: reason.into(),
        }
    }

    fn expect(&mut self, c: char) -> Result<()> {
        if self.rest().starts_with(c) {
            self.pos += c.len_utf8();
            Ok(())
        } else {
            Err(self.error(format!("expected '{}' at offset {}", c, self.pos)))
        }
    }

    fn ident(&mut self) -> Result<String> {
        let len = self
            .rest()
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_' || c == '-'))
            .unwrap_or(self.rest().len());
        if len == 0 {
            return Err(self.error(format!("expected a name at offset {}", self.pos)));
        }
        let ident = self.rest()[..len].to_string();
        if !ident.starts_with(|c: char| c.is_ascii_alphabetic() || c == '_') {
            return Err(self.error(format!("name {:?} must start with a letter", ident)));
        }
        self.pos += len;
        Ok(ident)
    }

    fn key(&mut self) -> Result<Option<ResourceKey>> {
        if !self.rest().starts_with('[') {
            return Ok(None);
        }
        self.pos += 1;

        let key = if self.rest().starts_with('"') {
            self.pos += 1;
            let mut value = String::new();
            let mut chars = self.rest().char_indices();
            let end = loop {
                match chars.next() {
                    Some((i, '"')) => break i,
                    Some((_, '\\')) => match chars.next() {
                        Some((_, c)) => value.push(c),
                        None => return Err(self.error("unterminated string key")),
                    },
                    Some((_, c)) => value.push(c),
                    None => return Err(self.error("unterminated string key")),
                }
            };
            self.pos += end + 1;
            ResourceKey::Str(value)
        } else {
            let len = self
                .rest()
                .find(|c: char| !(c.is_ascii_digit() || c == '-'))
                .unwrap_or(self.rest().len());
            let digits = &self.rest()[..len];
            let index = digits
                .parse::<i64>()
                .map_err(|_| self.error(format!("invalid instance key {:?}", digits)))?;
            self.pos += len;
            ResourceKey::Int(index)
        };

        self.expect(']')?;
        Ok(Some(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_root_resource() {
        let addr: ResourceAddr = "aws_instance.web".parse().unwrap();
        assert_eq!(addr.module_path(), "");
        assert_eq!(addr.resource(), "aws_instance.web");
        assert_eq!(addr.implied_provider(), "aws");
        assert_eq!(addr.key, None);
    }

    #[test]
    fn test_parse_nested_module_with_keys() {
        let input = r#"module.net["eu.west"].module.sub[2].data.aws_ami.base[0]"#;
        let addr: ResourceAddr = input.parse().unwrap();
        assert_eq!(addr.mode, ResourceMode::Data);
        assert_eq!(addr.module_path(), r#"module.net["eu.west"].module.sub[2]"#);
        assert_eq!(addr.resource(), "data.aws_ami.base[0]");
        assert_eq!(addr.key, Some(ResourceKey::Int(0)));
        assert_eq!(addr.to_string(), input);
    }

    #[test]
    fn test_implied_provider_without_underscore() {
        let addr: ResourceAddr = "random.x".parse().unwrap();
        assert_eq!(addr.implied_provider(), "random");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!("aws_instance".parse::<ResourceAddr>().is_err());
        assert!("aws_instance.web[".parse::<ResourceAddr>().is_err());
        assert!("aws_instance.web extra".parse::<ResourceAddr>().is_err());
        assert!("module..aws_instance.web".parse::<ResourceAddr>().is_err());
    }
}
