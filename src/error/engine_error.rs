use std::fmt;

use thiserror::Error;

use crate::error::{ErrorKind, ExpressionError};

/// Where a diagnosed identifier was registered.
#[derive(Debug, Clone, PartialEq)]
pub enum Origin {
    /// A registered expression.
    Expression {
        /// Position of the expression in identifier order.
        index:  usize,
        /// The expression text.
        source: String,
    },
    /// A caller-supplied value.
    Value(f64),
}

/// One failure collected while validating or evaluating the registered expressions.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    /// The identifier the failure belongs to.
    pub id:     String,
    /// Where that identifier was registered.
    pub origin: Origin,
    /// The underlying failure.
    pub error:  ExpressionError,
}

impl Diagnostic {
    /// Creates a diagnostic for the expression at `index`.
    pub fn expression(id: &str, index: usize, source: &str, error: ExpressionError) -> Self {
        Self { id: id.to_string(),
               origin: Origin::Expression { index,
                                            source: source.to_string() },
               error }
    }

    /// Creates a diagnostic for a value binding.
    pub fn value(id: &str, value: f64, error: ExpressionError) -> Self {
        Self { id: id.to_string(),
               origin: Origin::Value(value),
               error }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.error.kind(), self.error)?;
        match &self.origin {
            Origin::Expression { index, source } => {
                write!(f, ": expression[{index}] {} = {source}", self.id)
            },
            Origin::Value(value) => write!(f, ": value {} = {value}", self.id),
        }
    }
}

/// One link of a dependency cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleLink {
    /// The expression identifier.
    pub id:     String,
    /// The expression text.
    pub source: String,
}

/// A closed loop of expressions, in traversal order. The last link depends on the
/// first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyCycle {
    /// The links of the loop.
    pub links: Vec<CycleLink>,
}

impl DependencyCycle {
    /// Returns the identifiers of the loop, in traversal order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.links.iter().map(|link| link.id.as_str())
    }
}

impl fmt::Display for DependencyCycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for link in &self.links {
            write!(f, "{}={{{}}} -> ", link.id, link.source)?;
        }
        match self.links.first() {
            Some(first) => f.write_str(&first.id),
            None => Ok(()),
        }
    }
}

/// Represents the aggregate failures returned by
/// [`ExpressionEngine::evaluate`](crate::engine::ExpressionEngine::evaluate).
///
/// No partial results accompany either variant.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// Lexical, syntax or runtime failures collected across every expression.
    #[error("{}", render_lines(.0))]
    Parsing(Vec<Diagnostic>),
    /// Every dependency cycle found in the graph.
    #[error("{}", render_lines(.0))]
    CyclicDependency(Vec<DependencyCycle>),
}

impl EngineError {
    /// Returns [`ErrorKind::Parsing`] or [`ErrorKind::CyclicDependency`].
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Parsing(_) => ErrorKind::Parsing,
            Self::CyclicDependency(_) => ErrorKind::CyclicDependency,
        }
    }

    /// Returns the collected diagnostics, empty for a cycle failure.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        match self {
            Self::Parsing(diagnostics) => diagnostics,
            Self::CyclicDependency(_) => &[],
        }
    }

    /// Returns the detected cycles, empty for a parsing failure.
    #[must_use]
    pub fn cycles(&self) -> &[DependencyCycle] {
        match self {
            Self::Parsing(_) => &[],
            Self::CyclicDependency(cycles) => cycles,
        }
    }
}

fn render_lines<T: fmt::Display>(items: &[T]) -> String {
    items.iter()
         .map(ToString::to_string)
         .collect::<Vec<_>>()
         .join("\n")
}
