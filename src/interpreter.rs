/// The lexer module tokenizes expression text.
///
/// The lexer reads the raw text of one expression and produces a forward-only
/// stream of tokens: numbers, identifiers, function keywords, logical keywords
/// and operators. It also provides the identifier scan the engine uses to
/// discover dependencies without evaluating anything.
///
/// # Responsibilities
/// - Converts the input character stream into tokens with byte offsets.
/// - Reclassifies function and logical keywords.
/// - Reports lexical errors for invalid or malformed input.
pub mod lexer;
/// The parser module evaluates expressions while parsing them.
///
/// The parser walks the token stream with a recursive-descent grammar in which
/// every rule returns the number it denotes, resolving identifiers against a
/// symbol table.
///
/// # Responsibilities
/// - Implements operator precedence from logical `or` down to primaries.
/// - Enforces zero-division and math-domain rules.
/// - Bounds nesting depth so pathological input fails instead of overflowing
///   the stack.
pub mod parser;
/// The symbols module holds the identifier to number bindings.
///
/// # Responsibilities
/// - Seeds the reserved constants `pi` and `e`.
/// - Rejects attempts to rebind a reserved constant.
pub mod symbols;
