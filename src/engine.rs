//! Orchestration of named expressions.
//!
//! The engine owns the registered values and expressions. Every call to
//! [`ExpressionEngine::evaluate`] rebuilds the dependency graph from scratch,
//! validates it, and evaluates each expression after everything it references.

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, trace, warn};

use crate::{
    error::{CycleLink, DependencyCycle, Diagnostic, EngineError, ExpressionError},
    graph::DependencyGraph,
    interpreter::{
        lexer::identifiers,
        parser::core::{DEFAULT_MAX_DEPTH, evaluate_with_depth},
        symbols::{SymbolTable, is_reserved},
    },
};

/// Tunable limits of an [`ExpressionEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineOptions {
    /// Maximum nesting of parentheses and function arguments in one
    /// expression.
    pub max_depth: usize,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self { max_depth: DEFAULT_MAX_DEPTH }
    }
}

/// Evaluates a set of named expressions that may reference each other and
/// caller-supplied values.
///
/// Registration order does not matter: the engine discovers which identifiers
/// each expression references and evaluates dependencies first.
///
/// # Example
/// ```
/// use formulary::ExpressionEngine;
///
/// let mut engine = ExpressionEngine::new();
/// engine.insert_value("a1", 5.0);
/// engine.insert_expression("a3", "a2 * 2");
/// engine.insert_expression("a2", "a1 + 1");
///
/// let results = engine.evaluate().unwrap();
/// assert_eq!(results["a2"], 6.0);
/// assert_eq!(results["a3"], 12.0);
/// assert_eq!(engine.get_result("a3"), Some(12.0));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ExpressionEngine {
    expressions: BTreeMap<String, String>,
    values:      BTreeMap<String, f64>,
    results:     BTreeMap<String, f64>,
    options:     EngineOptions,
}

impl ExpressionEngine {
    /// Creates an empty engine with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty engine with the given options.
    #[must_use]
    pub fn with_options(options: EngineOptions) -> Self {
        Self { options,
               ..Self::default() }
    }

    /// Returns the engine's options.
    #[must_use]
    pub const fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Registers a value, replacing any earlier value with the same identifier.
    pub fn insert_value(&mut self, id: impl Into<String>, value: f64) {
        self.values.insert(id.into(), value);
    }

    /// Registers an expression, replacing any earlier expression with the same
    /// identifier.
    pub fn insert_expression(&mut self, id: impl Into<String>, source: impl Into<String>) {
        self.expressions.insert(id.into(), source.into());
    }

    /// Iterates over the registered expressions in identifier order.
    pub fn expressions(&self) -> impl Iterator<Item = (&str, &str)> {
        self.expressions
            .iter()
            .map(|(id, source)| (id.as_str(), source.as_str()))
    }

    /// Iterates over the registered values in identifier order.
    pub fn values(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(id, value)| (id.as_str(), *value))
    }

    /// Returns the result of `id` from the last successful [`Self::evaluate`].
    ///
    /// Returns `None` if `id` is not an expression, or if no evaluation has
    /// succeeded since the last failure.
    #[must_use]
    pub fn get_result(&self, id: &str) -> Option<f64> {
        self.results.get(id).copied()
    }

    /// Evaluates every registered expression.
    ///
    /// The pass runs in four phases:
    /// 1. Each expression's identifiers are extracted and checked against the
    ///    registered expressions, values and reserved constants.
    /// 2. A dependency graph is built with one edge per referenced expression.
    /// 3. The graph is checked for cycles.
    /// 4. Expressions are evaluated dependencies first, each result becoming a
    ///    symbol for the ones that follow. A failing expression does not stop
    ///    the pass.
    ///
    /// # Errors
    /// - [`EngineError::Parsing`] with every unresolved identifier, lexical
    ///   error or reserved identifier found in phase 1, or every failure from
    ///   phase 4.
    /// - [`EngineError::CyclicDependency`] with every cycle found in phase 3.
    ///
    /// No results are returned or retained when any phase fails.
    pub fn evaluate(&mut self) -> Result<BTreeMap<String, f64>, EngineError> {
        self.results.clear();

        let graph = self.build_graph()?;
        self.check_cycles(&graph)?;

        let order = graph.topological_order();
        debug!(expressions = order.len(), "evaluating in dependency order");

        let mut symbols = SymbolTable::new();
        for (id, value) in &self.values {
            if !self.expressions.contains_key(id) {
                symbols.define(id, *value)
                       .map_err(|error| EngineError::Parsing(vec![Diagnostic::value(id, *value, error)]))?;
            }
        }

        let mut results = BTreeMap::new();
        let mut diagnostics = Vec::new();
        for id in order {
            let Some(source) = self.expressions.get(id) else {
                continue;
            };
            let outcome = evaluate_with_depth(source, &symbols, self.options.max_depth)
                .and_then(|value| symbols.define(id, value).map(|()| value));
            match outcome {
                Ok(value) => {
                    trace!(id, value, "evaluated expression");
                    results.insert(id.to_string(), value);
                },
                Err(error) => {
                    let index = graph.position(id).unwrap_or_default();
                    let diagnostic = Diagnostic::expression(id, index, source, error);
                    warn!(%diagnostic, "expression failed");
                    diagnostics.push(diagnostic);
                },
            }
        }

        if !diagnostics.is_empty() {
            return Err(EngineError::Parsing(diagnostics));
        }

        self.results.clone_from(&results);
        Ok(results)
    }

    /// Counts, for every registered value, how many expressions reference it.
    ///
    /// Identifiers that name an expression are not counted. Every value is
    /// present, possibly with a count of zero. Expressions that fail to lex
    /// are skipped.
    ///
    /// # Example
    /// ```
    /// use formulary::ExpressionEngine;
    ///
    /// let mut engine = ExpressionEngine::new();
    /// engine.insert_value("a1", 1.0);
    /// engine.insert_value("a2", 2.0);
    /// engine.insert_expression("x", "a1 + a1");
    /// engine.insert_expression("y", "a1 * x");
    ///
    /// let counts = engine.id_count();
    /// assert_eq!(counts["a1"], 2);
    /// assert_eq!(counts["a2"], 0);
    /// assert!(!counts.contains_key("x"));
    /// ```
    #[must_use]
    pub fn id_count(&self) -> BTreeMap<String, usize> {
        let mut counts: BTreeMap<String, usize> = self.values
                                                      .keys()
                                                      .filter(|id| !self.expressions.contains_key(*id))
                                                      .map(|id| (id.clone(), 0))
                                                      .collect();

        for (id, source) in &self.expressions {
            let referenced = match identifiers(source) {
                Ok(ids) => ids.into_iter()
                              .map(|(name, _)| name)
                              .collect::<BTreeSet<_>>(),
                Err(error) => {
                    warn!(id = id.as_str(), %error, "skipping expression that does not lex");
                    continue;
                },
            };
            for name in referenced {
                if let Some(count) = counts.get_mut(&name) {
                    *count += 1;
                }
            }
        }

        counts
    }

    /// Returns the value identifiers referenced by at least one expression, in
    /// identifier order.
    #[must_use]
    pub fn unique_ids(&self) -> Vec<String> {
        self.id_count()
            .into_iter()
            .filter_map(|(id, count)| (count > 0).then_some(id))
            .collect()
    }

    /// Extracts every expression's identifiers and builds the dependency graph.
    ///
    /// Vertices are the expressions in identifier order. All problems are
    /// collected before failing.
    fn build_graph(&self) -> Result<DependencyGraph, EngineError> {
        let mut graph = DependencyGraph::new(self.expressions.keys().cloned().collect());
        let mut diagnostics = Vec::new();

        for (id, value) in &self.values {
            if is_reserved(id) {
                diagnostics.push(Diagnostic::value(id,
                                                   *value,
                                                   ExpressionError::ConstantReassignment { name:
                                                                                               id.clone() }));
            }
        }

        for (index, (id, source)) in self.expressions.iter().enumerate() {
            if is_reserved(id) {
                diagnostics.push(Diagnostic::expression(id,
                                                        index,
                                                        source,
                                                        ExpressionError::ConstantReassignment { name:
                                                                                                    id.clone() }));
            }

            let referenced = match identifiers(source) {
                Ok(referenced) => referenced,
                Err(error) => {
                    diagnostics.push(Diagnostic::expression(id, index, source, error));
                    continue;
                },
            };

            for (name, position) in referenced {
                if let Some(dependency) = graph.position(&name) {
                    graph.add_edge(index, dependency);
                } else if !self.values.contains_key(&name) && !is_reserved(&name) {
                    diagnostics.push(Diagnostic::expression(id,
                                                            index,
                                                            source,
                                                            ExpressionError::UnknownSymbol { name,
                                                                                             position }));
                }
            }
        }

        debug!(vertices = graph.len(), problems = diagnostics.len(), "built dependency graph");
        if !diagnostics.is_empty() {
            for diagnostic in &diagnostics {
                warn!(%diagnostic, "dependency extraction failed");
            }
            return Err(EngineError::Parsing(diagnostics));
        }

        Ok(graph)
    }

    /// Fails with every cycle in `graph`, each link carrying its expression
    /// text.
    fn check_cycles(&self, graph: &DependencyGraph) -> Result<(), EngineError> {
        let link = |id: &str| CycleLink { id:     id.to_string(),
                                          source: self.expressions
                                                      .get(id)
                                                      .cloned()
                                                      .unwrap_or_default(), };
        let cycles: Vec<DependencyCycle> =
            graph.cycles()
                 .into_iter()
                 .map(|ids| DependencyCycle { links: ids.into_iter().map(link).collect() })
                 .collect();

        debug!(cycles = cycles.len(), "checked dependency cycles");
        if cycles.is_empty() {
            return Ok(());
        }
        for cycle in &cycles {
            warn!(%cycle, "cyclic dependency");
        }
        Err(EngineError::CyclicDependency(cycles))
    }
}
