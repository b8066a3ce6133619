//! Node layer: an explicit description of what a processing node declares to a
//! node-editor host (parameter schema, outputs, display metadata) and how it is
//! executed, plus a registry the host enumerates instead of discovering plugins.
use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use crate::core::batch::ImageBatch;
use crate::error::{Error, Result};

pub mod aspect_resize;
pub mod upload;

pub use aspect_resize::AspectResizeNode;
pub use upload::UploadImageNode;

/// Declared type and constraints of one node input.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ParamKind {
    Image,
    Int {
        default: i64,
        min: i64,
        max: i64,
        step: i64,
    },
    Choice {
        choices: Vec<String>,
        default: String,
    },
    String {
        default: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParamSpec {
    pub name: String,
    #[serde(flatten)]
    pub kind: ParamKind,
}

impl ParamSpec {
    pub fn new(name: &str, kind: ParamKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
        }
    }

    fn default_value(&self) -> Option<NodeValue> {
        match &self.kind {
            ParamKind::Image => None,
            ParamKind::Int { default, .. } => Some(NodeValue::Int(*default)),
            ParamKind::Choice { default, .. } => Some(NodeValue::Choice(default.clone())),
            ParamKind::String { default } => Some(NodeValue::String(default.clone())),
        }
    }

    fn invalid(&self, value: impl std::fmt::Display) -> Error {
        Error::invalid_argument(&self.name, value)
    }

    /// Check `value` against the declared kind and constraints.
    fn check(&self, value: &NodeValue) -> Result<()> {
        match (&self.kind, value) {
            (ParamKind::Image, NodeValue::Image(_)) => Ok(()),
            (ParamKind::Int { min, max, step, .. }, NodeValue::Int(v)) => {
                if v < min || v > max || (*step > 0 && (v - min) % step != 0) {
                    Err(self.invalid(v))
                } else {
                    Ok(())
                }
            }
            (ParamKind::Choice { choices, .. }, NodeValue::Choice(v)) => {
                if choices.iter().any(|c| c == v) {
                    Ok(())
                } else {
                    Err(self.invalid(v))
                }
            }
            (ParamKind::String { .. }, NodeValue::String(_)) => Ok(()),
            (_, other) => Err(self.invalid(format!("<{}>", other.type_name()))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputKind {
    Image,
    String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputSpec {
    pub name: String,
    pub kind: OutputKind,
}

impl OutputSpec {
    pub fn new(name: &str, kind: OutputKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
        }
    }
}

/// A value flowing into or out of a node.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeValue {
    Image(ImageBatch),
    Int(i64),
    Choice(String),
    String(String),
}

impl NodeValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            NodeValue::Image(_) => "image",
            NodeValue::Int(_) => "int",
            NodeValue::Choice(_) => "choice",
            NodeValue::String(_) => "string",
        }
    }
}

pub type NodeInputs = BTreeMap<String, NodeValue>;

/// Fill in defaults for missing inputs and check every declared input.
/// Inputs that the schema does not declare are rejected.
pub fn resolve_inputs(schema: &[ParamSpec], inputs: &NodeInputs) -> Result<NodeInputs> {
    if let Some(unknown) = inputs.keys().find(|k| !schema.iter().any(|p| &p.name == *k)) {
        return Err(Error::invalid_argument("input", unknown));
    }

    let mut resolved = NodeInputs::new();
    for param in schema {
        let value = match inputs.get(&param.name) {
            Some(v) => v.clone(),
            None => param.default_value().ok_or_else(|| Error::MissingArgument {
                arg: param.name.clone(),
            })?,
        };
        param.check(&value)?;
        resolved.insert(param.name.clone(), value);
    }
    Ok(resolved)
}

fn missing(name: &str) -> Error {
    Error::MissingArgument {
        arg: name.to_string(),
    }
}

pub fn get_image<'a>(inputs: &'a NodeInputs, name: &str) -> Result<&'a ImageBatch> {
    match inputs.get(name) {
        Some(NodeValue::Image(batch)) => Ok(batch),
        Some(other) => Err(Error::invalid_argument(name, other.type_name())),
        None => Err(missing(name)),
    }
}

pub fn get_int(inputs: &NodeInputs, name: &str) -> Result<i64> {
    match inputs.get(name) {
        Some(NodeValue::Int(v)) => Ok(*v),
        Some(other) => Err(Error::invalid_argument(name, other.type_name())),
        None => Err(missing(name)),
    }
}

pub fn get_str<'a>(inputs: &'a NodeInputs, name: &str) -> Result<&'a str> {
    match inputs.get(name) {
        Some(NodeValue::Choice(v)) | Some(NodeValue::String(v)) => Ok(v),
        Some(other) => Err(Error::invalid_argument(name, other.type_name())),
        None => Err(missing(name)),
    }
}

/// Serializable description of a node, as shown to the host.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeSchema {
    pub name: String,
    pub display_name: String,
    pub category: String,
    pub inputs: Vec<ParamSpec>,
    pub outputs: Vec<OutputSpec>,
}

pub trait Node: Send + Sync {
    /// Stable identifier the host stores in saved graphs.
    fn name(&self) -> &'static str;
    fn display_name(&self) -> &'static str;
    fn category(&self) -> &'static str;
    fn inputs(&self) -> Vec<ParamSpec>;
    fn outputs(&self) -> Vec<OutputSpec>;

    /// Run the node on inputs already passed through `validate`.
    fn run(&self, inputs: &NodeInputs) -> Result<Vec<NodeValue>>;

    fn validate(&self, inputs: &NodeInputs) -> Result<NodeInputs> {
        resolve_inputs(&self.inputs(), inputs)
    }

    fn execute(&self, inputs: &NodeInputs) -> Result<Vec<NodeValue>> {
        let resolved = self.validate(inputs)?;
        debug!("Executing node {}", self.name());
        self.run(&resolved)
    }

    fn schema(&self) -> NodeSchema {
        NodeSchema {
            name: self.name().to_string(),
            display_name: self.display_name().to_string(),
            category: self.category().to_string(),
            inputs: self.inputs(),
            outputs: self.outputs(),
        }
    }
}

/// Explicit set of nodes offered to a host, keyed by node name.
#[derive(Default)]
pub struct NodeRegistry {
    nodes: BTreeMap<&'static str, Box<dyn Node>>,
}

impl NodeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the aspect-resize and GCS upload nodes.
    pub fn with_builtin_nodes() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(AspectResizeNode));
        registry.register(Box::new(UploadImageNode::default()));
        registry
    }

    /// Add a node, replacing any node registered under the same name.
    pub fn register(&mut self, node: Box<dyn Node>) -> Option<Box<dyn Node>> {
        self.nodes.insert(node.name(), node)
    }

    pub fn get(&self, name: &str) -> Option<&dyn Node> {
        self.nodes.get(name).map(|n| n.as_ref())
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.nodes.keys().copied().collect()
    }

    /// Name to display-name mapping.
    pub fn display_names(&self) -> BTreeMap<&'static str, &'static str> {
        self.nodes
            .values()
            .map(|n| (n.name(), n.display_name()))
            .collect()
    }

    pub fn schemas(&self) -> Vec<NodeSchema> {
        self.nodes.values().map(|n| n.schema()).collect()
    }

    pub fn schemas_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.schemas())?)
    }

    pub fn execute(&self, name: &str, inputs: &NodeInputs) -> Result<Vec<NodeValue>> {
        let node = self
            .get(name)
            .ok_or_else(|| Error::invalid_argument("node", name))?;
        node.execute(inputs)
    }
}
