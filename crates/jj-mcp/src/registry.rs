//! Operation registry
//!
//! The registry is built once, when the server initializes, by concatenating
//! the per-category tool groups and the view list. It is immutable
//! afterwards; lookups borrow from it.

use std::collections::HashSet;

use serde_json::Value;

use crate::operations::{self, Action, Invocation, parse_arguments};
use crate::resources::{View, views};
use crate::tools::ToolDefinition;
use crate::{Error, Result};

/// Decodes raw arguments and builds the command for one tool
pub type Builder = fn(Value) -> Result<Invocation>;

/// A registered action
#[derive(Debug, Clone)]
pub struct ToolSpec {
    name: &'static str,
    description: &'static str,
    input_schema: Value,
    build: Builder,
}

impl ToolSpec {
    /// Register the operation implemented by `A`.
    pub fn of<A: Action>() -> Self {
        Self {
            name: A::NAME,
            description: A::DESCRIPTION,
            input_schema: input_schema::<A>(),
            build: build_invocation::<A>,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn description(&self) -> &'static str {
        self.description
    }

    pub fn input_schema(&self) -> &Value {
        &self.input_schema
    }

    /// The entry published by `tools/list`.
    pub fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.name.to_string(),
            description: self.description.to_string(),
            input_schema: self.input_schema.clone(),
        }
    }

    /// Validate `arguments` and build the command, without running it.
    pub fn invocation(&self, arguments: Value) -> Result<Invocation> {
        (self.build)(arguments)
    }
}

fn build_invocation<A: Action>(arguments: Value) -> Result<Invocation> {
    parse_arguments::<A>(arguments)?.invocation()
}

fn input_schema<A: Action>() -> Value {
    let mut schema = Value::from(schemars::schema_for!(A));
    if let Value::Object(map) = &mut schema {
        map.remove("$schema");
    }
    schema
}

/// Every action and view the server exposes
#[derive(Debug, Clone, Default)]
pub struct Registry {
    tools: Vec<ToolSpec>,
    resources: Vec<View>,
}

impl Registry {
    /// Concatenate tool groups in order and append the views.
    ///
    /// # Errors
    ///
    /// Returns `Error::DuplicateOperation` if a tool name or view URI is
    /// registered twice.
    pub fn from_groups(
        groups: impl IntoIterator<Item = Vec<ToolSpec>>,
        resources: Vec<View>,
    ) -> Result<Self> {
        let tools: Vec<ToolSpec> = groups.into_iter().flatten().collect();

        let mut seen = HashSet::new();
        for name in tools
            .iter()
            .map(ToolSpec::name)
            .chain(resources.iter().map(|view| view.uri()))
        {
            if !seen.insert(name) {
                return Err(Error::DuplicateOperation(name.to_string()));
            }
        }

        Ok(Self { tools, resources })
    }

    /// The full set of operations: basic, bookmark, history and remote
    /// tools followed by the views.
    pub fn builtin() -> Result<Self> {
        Self::from_groups(
            [
                operations::basic::tools(),
                operations::bookmark::tools(),
                operations::history::tools(),
                operations::remote::tools(),
            ],
            views(),
        )
    }

    pub fn tools(&self) -> &[ToolSpec] {
        &self.tools
    }

    pub fn resources(&self) -> &[View] {
        &self.resources
    }

    pub fn tool(&self, name: &str) -> Option<&ToolSpec> {
        self.tools.iter().find(|tool| tool.name == name)
    }

    pub fn resource(&self, uri: &str) -> Option<View> {
        self.resources.iter().copied().find(|view| view.uri() == uri)
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty() && self.resources.is_empty()
    }
}
