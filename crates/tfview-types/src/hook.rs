use crate::addr::ResourceAddr;
use serde::Serialize;
use std::fmt;

/// What the engine is doing to a resource instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    /// Re-read the remote object of a managed resource
    Refresh,
    /// Read a data source
    Read,
    Create,
    Update,
    Delete,
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionKind::Refresh => write!(f, "refresh"),
            ActionKind::Read => write!(f, "read"),
            ActionKind::Create => write!(f, "create"),
            ActionKind::Update => write!(f, "update"),
            ActionKind::Delete => write!(f, "delete"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Start,
    Complete,
    Errored,
}

/// Identifying attribute of the remote object (`id = "i-0abc"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceId {
    pub key: String,
    pub value: String,
}

/// Progress event delivered to every registered hook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookEvent {
    pub addr: ResourceAddr,
    pub action: ActionKind,
    pub phase: Phase,
    pub id: Option<ResourceId>,
}

impl HookEvent {
    pub fn new(addr: ResourceAddr, action: ActionKind, phase: Phase) -> Self {
        Self {
            addr,
            action,
            phase,
            id: None,
        }
    }

    pub fn with_id(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.id = Some(ResourceId {
            key: key.into(),
            value: value.into(),
        });
        self
    }
}

/// Instruction returned by a hook to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookAction {
    Continue,
    Halt,
}
