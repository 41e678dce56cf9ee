use rustc_hash::FxHashMap;

use crate::error::ExpressionError;

/// Identifiers that are always defined and can never be reassigned.
pub const RESERVED_CONSTANTS: [(&str, f64); 2] = [("pi", std::f64::consts::PI),
                                                  ("e", std::f64::consts::E)];

/// Returns `true` if `name` is one of the [`RESERVED_CONSTANTS`].
///
/// # Example
/// ```
/// use formulary::interpreter::symbols::is_reserved;
///
/// assert!(is_reserved("pi"));
/// assert!(!is_reserved("pie"));
/// ```
#[must_use]
pub fn is_reserved(name: &str) -> bool {
    RESERVED_CONSTANTS.iter().any(|(reserved, _)| *reserved == name)
}

/// The identifier to number mapping an expression is evaluated against.
///
/// A new table holds only the reserved constants. During one evaluation pass
/// the engine defines every external value and then every expression result as
/// it becomes available, so the table only grows.
#[derive(Debug, Clone)]
pub struct SymbolTable {
    symbols: FxHashMap<String, f64>,
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolTable {
    /// Creates a table seeded with `pi` and `e`.
    #[must_use]
    pub fn new() -> Self {
        let symbols = RESERVED_CONSTANTS.iter()
                                        .map(|(name, value)| ((*name).to_string(), *value))
                                        .collect();
        Self { symbols }
    }

    /// Binds `name` to `value`, replacing any earlier binding.
    ///
    /// # Errors
    /// Returns [`ExpressionError::ConstantReassignment`] if `name` is reserved.
    ///
    /// # Example
    /// ```
    /// use formulary::interpreter::symbols::SymbolTable;
    ///
    /// let mut table = SymbolTable::new();
    /// table.define("a1", 5.0).unwrap();
    /// assert_eq!(table.get("a1"), Some(5.0));
    /// assert!(table.define("pi", 3.0).is_err());
    /// ```
    pub fn define(&mut self, name: &str, value: f64) -> Result<(), ExpressionError> {
        if is_reserved(name) {
            return Err(ExpressionError::ConstantReassignment { name: name.to_string() });
        }
        self.symbols.insert(name.to_string(), value);
        Ok(())
    }

    /// Looks up `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<f64> {
        self.symbols.get(name).copied()
    }

    /// Returns `true` if `name` is bound.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.symbols.contains_key(name)
    }

    /// Number of bound identifiers, constants included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Returns `true` if nothing is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}
