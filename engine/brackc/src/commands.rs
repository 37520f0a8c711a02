//! Subcommand implementations.

use std::io::Read;
use std::sync::Once;

use brack_eval::{DefaultProvider, Renderer};

use crate::report;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. Enable with `RUST_LOG=brack_eval=trace`
/// (or any standard filter); without `RUST_LOG` nothing is installed.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}

/// Where tag source comes from.
enum Input {
    /// Literal source from `-e`.
    Inline(String),
    /// A path, with `-` meaning stdin.
    Path(String),
}

/// Load an input, returning the source and a display name for reports.
fn load(input: &Input) -> Result<(String, String), String> {
    match input {
        Input::Inline(source) => Ok((source.clone(), "<inline>".to_string())),
        Input::Path(path) if path == "-" => {
            let mut source = String::new();
            std::io::stdin()
                .read_to_string(&mut source)
                .map_err(|e| format!("cannot read stdin: {e}"))?;
            Ok((source, "<stdin>".to_string()))
        }
        Input::Path(path) => std::fs::read_to_string(path)
            .map(|source| (source, path.clone()))
            .map_err(|e| format!("cannot read `{path}`: {e}")),
    }
}

/// Parse a `--var key=value` argument.
fn parse_var(arg: &str) -> Result<(String, String), String> {
    match arg.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("invalid --var `{arg}`, expected key=value")),
    }
}

pub fn cmd_render(args: &[String]) -> i32 {
    let mut input = None;
    let mut seed = None;
    let mut vars = Vec::new();

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-e" => {
                let Some(source) = args.get(i + 1) else {
                    eprintln!("-e requires an argument");
                    return 1;
                };
                input = Some(Input::Inline(source.clone()));
                i += 2;
            }
            "--seed" => {
                let parsed = args.get(i + 1).and_then(|v| v.parse::<u64>().ok());
                let Some(value) = parsed else {
                    eprintln!("--seed requires an unsigned integer");
                    return 1;
                };
                seed = Some(value);
                i += 2;
            }
            "--var" => {
                let Some(arg) = args.get(i + 1) else {
                    eprintln!("--var requires an argument");
                    return 1;
                };
                match parse_var(arg) {
                    Ok(pair) => vars.push(pair),
                    Err(message) => {
                        eprintln!("{message}");
                        return 1;
                    }
                }
                i += 2;
            }
            path => {
                input = Some(Input::Path(path.to_string()));
                i += 1;
            }
        }
    }

    let Some(input) = input else {
        eprintln!("Usage: brack render <file.tag | -e source | -> [--seed <n>] [--var key=value]...");
        return 1;
    };
    let (source, name) = match load(&input) {
        Ok(loaded) => loaded,
        Err(message) => {
            eprintln!("{message}");
            return 1;
        }
    };

    let mut provider = match seed {
        Some(seed) => DefaultProvider::seeded(seed),
        None => DefaultProvider::new(),
    };
    for (key, value) in &vars {
        provider.store_mut().set(key, value);
    }

    match Renderer::new(&mut provider).render(&source) {
        Ok(out) => {
            println!("{out}");
            0
        }
        Err(error) => {
            report::emit(&name, &source, &error);
            1
        }
    }
}

pub fn cmd_tokens(args: &[String]) -> i32 {
    let input = match args {
        [] => {
            eprintln!("Usage: brack tokens <file.tag | -e source | ->");
            return 1;
        }
        [flag, source, ..] if flag == "-e" => Input::Inline(source.clone()),
        [path, ..] => Input::Path(path.clone()),
    };
    let (source, _) = match load(&input) {
        Ok(loaded) => loaded,
        Err(message) => {
            eprintln!("{message}");
            return 1;
        }
    };
    for token in brack_lexer::lex(&source) {
        println!("{token:?}");
    }
    0
}

pub fn cmd_math(args: &[String]) -> i32 {
    if args.is_empty() {
        eprintln!("Usage: brack math <expression>");
        return 1;
    }
    let source = args.join(" ");
    match brack_math::eval_str(&source) {
        Ok(value) => {
            println!("{value}");
            0
        }
        Err(error) => {
            eprintln!("error: {error}");
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::parse_var;
    use pretty_assertions::assert_eq;

    #[test]
    fn parse_var_splits_on_first_equals() {
        assert_eq!(
            parse_var("greeting=a=b"),
            Ok(("greeting".to_string(), "a=b".to_string()))
        );
    }

    #[test]
    fn parse_var_rejects_missing_key_or_equals() {
        assert!(parse_var("novalue").is_err());
        assert!(parse_var("=x").is_err());
    }
}
