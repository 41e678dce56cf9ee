/// Numeric conversion helpers.
///
/// Provides exact conversions between `f64` and `i64`, and the digit joining
/// used by the `~` operator.
pub mod num;
