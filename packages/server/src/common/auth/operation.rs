//! The shape of a GraphQL operation as seen by the authorization gate.
//!
//! Only the operation kind and the names of its top-level fields matter for
//! access decisions, so the parsed document is reduced to exactly that.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use async_graphql_parser::types::{
    DocumentOperations, ExecutableDocument, OperationDefinition, OperationType, Selection,
    SelectionSet,
};
use async_graphql_parser::Positioned;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Query,
    Mutation,
    Subscription,
}

impl OperationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Query => "query",
            OperationKind::Mutation => "mutation",
            OperationKind::Subscription => "subscription",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OperationKind {
    type Err = OperationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "query" => Ok(OperationKind::Query),
            "mutation" => Ok(OperationKind::Mutation),
            "subscription" => Ok(OperationKind::Subscription),
            other => Err(OperationError::UnknownKind(other.to_string())),
        }
    }
}

impl From<&OperationType> for OperationKind {
    fn from(ty: &OperationType) -> Self {
        match ty {
            OperationType::Query => OperationKind::Query,
            OperationType::Mutation => OperationKind::Mutation,
            OperationType::Subscription => OperationKind::Subscription,
        }
    }
}

/// Errors raised while turning a request body into an [`Operation`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OperationError {
    #[error("Syntax error: {0}")]
    Syntax(String),

    #[error("Unknown operation named \"{0}\"")]
    UnknownOperation(String),

    #[error("Must provide operation name if query contains multiple operations")]
    AmbiguousOperation,

    #[error("Unknown operation kind: {0}")]
    UnknownKind(String),
}

/// One GraphQL query/mutation/subscription, reduced to what access control needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation {
    name: Option<String>,
    kind: OperationKind,
    field_names: Vec<String>,
}

impl Operation {
    pub fn new<I, S>(name: Option<String>, kind: OperationKind, field_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name,
            kind,
            field_names: field_names.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse a request document and select the operation that will execute.
    ///
    /// Follows GraphQL operation selection: a lone operation runs regardless of
    /// `operation_name`, several operations require a matching name.
    pub fn parse(query: &str, operation_name: Option<&str>) -> Result<Self, OperationError> {
        let document = async_graphql_parser::parse_query(query)
            .map_err(|e| OperationError::Syntax(e.to_string()))?;

        Self::from_document(&document, operation_name)
    }

    pub fn from_document(
        document: &ExecutableDocument,
        operation_name: Option<&str>,
    ) -> Result<Self, OperationError> {
        let (name, definition) = match &document.operations {
            DocumentOperations::Single(op) => (operation_name.map(String::from), &op.node),
            // A single named operation also lands here
            DocumentOperations::Multiple(ops) => {
                let (name, op) = match operation_name {
                    Some(wanted) => ops
                        .iter()
                        .find(|(name, _)| name.as_str() == wanted)
                        .ok_or_else(|| OperationError::UnknownOperation(wanted.to_string()))?,
                    None if ops.len() == 1 => ops
                        .iter()
                        .next()
                        .ok_or(OperationError::AmbiguousOperation)?,
                    None => return Err(OperationError::AmbiguousOperation),
                };
                (Some(name.to_string()), &op.node)
            }
        };

        Ok(Self {
            name,
            kind: OperationKind::from(&definition.ty),
            field_names: top_level_field_names(document, definition),
        })
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn kind(&self) -> OperationKind {
        self.kind
    }

    /// Names of the top-level field selections, in document order
    pub fn field_names(&self) -> &[String] {
        &self.field_names
    }
}

fn top_level_field_names(
    document: &ExecutableDocument,
    definition: &OperationDefinition,
) -> Vec<String> {
    let mut names = Vec::new();
    let mut visited = HashSet::new();
    collect_fields(
        document,
        &definition.selection_set,
        &mut visited,
        &mut names,
    );
    names
}

// Fragments at the top level select root fields too, so they are flattened.
// A spread naming a fragment the document does not define keeps the fragment
// name, which no policy whitelists.
fn collect_fields(
    document: &ExecutableDocument,
    selection_set: &Positioned<SelectionSet>,
    visited: &mut HashSet<String>,
    names: &mut Vec<String>,
) {
    for selection in &selection_set.node.items {
        match &selection.node {
            Selection::Field(field) => names.push(field.node.name.node.to_string()),
            Selection::InlineFragment(fragment) => {
                collect_fields(document, &fragment.node.selection_set, visited, names)
            }
            Selection::FragmentSpread(spread) => {
                let fragment_name = spread.node.fragment_name.node.as_str();
                if !visited.insert(fragment_name.to_string()) {
                    continue;
                }
                match document
                    .fragments
                    .iter()
                    .find(|(name, _)| name.as_str() == fragment_name)
                {
                    Some((_, definition)) => {
                        collect_fields(document, &definition.node.selection_set, visited, names)
                    }
                    None => names.push(fragment_name.to_string()),
                }
            }
        }
    }
}
