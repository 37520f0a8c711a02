//! brack CLI.
//!
//! Front end for the tag engine: render tag source from a file, an
//! inline argument, or stdin; dump the token stream; evaluate the
//! arithmetic sub-language directly.

mod commands;
mod report;

use commands::{cmd_math, cmd_render, cmd_tokens};

fn main() {
    commands::init_tracing();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        std::process::exit(1);
    }

    let code = match args[1].as_str() {
        "render" => cmd_render(&args[2..]),
        "tokens" => cmd_tokens(&args[2..]),
        "math" => cmd_math(&args[2..]),
        "help" | "--help" | "-h" => {
            print_usage();
            0
        }
        other => {
            eprintln!("unknown command: {other}");
            print_usage();
            1
        }
    };
    std::process::exit(code);
}

fn print_usage() {
    eprintln!("Usage: brack <command> [args]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  render <file.tag> [options]    Render a tag source file ('-' reads stdin)");
    eprintln!("  render -e <source> [options]   Render inline tag source");
    eprintln!("  tokens <file.tag | -e source>  Dump the token stream");
    eprintln!("  math <expression>              Evaluate an arithmetic expression");
    eprintln!();
    eprintln!("Render options:");
    eprintln!("  --seed <n>        Seed the RNG for reproducible [rand: ...] picks");
    eprintln!("  --var key=value   Preload a tag variable (repeatable)");
}
