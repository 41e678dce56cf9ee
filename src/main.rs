use std::{
    fs,
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::Parser;
use formulary::{EngineOptions, ExpressionEngine, interpreter::parser::core::DEFAULT_MAX_DEPTH};

/// formulary evaluates named numeric expressions that reference each other,
/// in dependency order.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// A value binding such as `a1=5`. May be repeated.
    #[arg(long = "value", value_name = "NAME=NUMBER", value_parser = parse_value)]
    values: Vec<(String, f64)>,

    /// An expression binding such as `a=a1+1`. May be repeated.
    #[arg(long = "expr", value_name = "NAME=EXPRESSION", value_parser = parse_binding)]
    expressions: Vec<(String, String)>,

    /// Reads bindings from a file, one `name = text` per line. Text that is a
    /// number registers a value, anything else an expression. Blank lines and
    /// lines starting with `#` are ignored.
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Also prints how many expressions reference each value.
    #[arg(short, long)]
    usage: bool,

    /// Maximum nesting of parentheses and function arguments.
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Enables debug logging.
    #[arg(long)]
    verbose: bool,
}

fn parse_binding(binding: &str) -> Result<(String, String), String> {
    let (name, text) = binding.split_once('=')
                              .ok_or_else(|| format!("expected NAME=TEXT, found '{binding}'"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing name in '{binding}'"));
    }
    Ok((name.to_string(), text.trim().to_string()))
}

fn parse_value(binding: &str) -> Result<(String, f64), String> {
    let (name, text) = parse_binding(binding)?;
    let value = text.parse()
                    .map_err(|_| format!("'{text}' is not a number"))?;
    Ok((name, value))
}

fn load_file(engine: &mut ExpressionEngine, path: &Path) -> Result<(), String> {
    let contents = fs::read_to_string(path).map_err(|e| {
                                               format!("Failed to read the input file '{}': {e}",
                                                       path.display())
                                           })?;

    for (number, line) in contents.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let (name, text) = parse_binding(line).map_err(|e| format!("line {}: {e}", number + 1))?;
        match text.parse::<f64>() {
            Ok(value) => engine.insert_value(name, value),
            Err(_) => engine.insert_expression(name, text),
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    let filter = if args.verbose {
        tracing_subscriber::EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into())
    } else {
        tracing_subscriber::EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into())
    };
    tracing_subscriber::fmt().with_env_filter(filter)
                             .with_target(false)
                             .with_writer(std::io::stderr)
                             .init();

    let mut engine = ExpressionEngine::with_options(EngineOptions { max_depth: args.max_depth });

    if let Some(path) = &args.file
       && let Err(e) = load_file(&mut engine, path)
    {
        eprintln!("{e}");
        return ExitCode::FAILURE;
    }
    for (name, value) in args.values {
        engine.insert_value(name, value);
    }
    for (name, text) in args.expressions {
        engine.insert_expression(name, text);
    }

    match engine.evaluate() {
        Ok(results) => {
            for (name, value) in &results {
                println!("{name} = {value}");
            }
        },
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        },
    }

    if args.usage {
        for (name, count) in engine.id_count() {
            println!("{name}: {count}");
        }
    }

    ExitCode::SUCCESS
}
