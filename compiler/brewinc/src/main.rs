//! Brewin CLI
//!
//! Runs Brewin programs at language level 1, 2 or 3.

use brewinc::commands::{lex_file, parse_run_options, run_file};

fn main() {
    brewinc::init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    match command.as_str() {
        "run" => {
            let (options, path) = match parse_run_options(&args[2..]) {
                Ok(parsed) => parsed,
                Err(msg) => {
                    eprintln!("error: {msg}");
                    eprintln!("Usage: brewin run <file.brewin> [--level=N] [--max-depth=N]");
                    std::process::exit(1);
                }
            };
            let Some(path) = path else {
                eprintln!("error: missing file path");
                eprintln!("Usage: brewin run <file.brewin> [--level=N] [--max-depth=N]");
                std::process::exit(1);
            };
            run_file(path, &options);
        }
        "lex" => {
            if args.len() < 3 {
                eprintln!("Usage: brewin lex <file.brewin>");
                std::process::exit(1);
            }
            lex_file(&args[2]);
        }
        "help" | "--help" | "-h" => {
            print_usage();
        }
        "version" | "--version" | "-v" => {
            println!("Brewin {}", env!("CARGO_PKG_VERSION"));
        }
        _ => {
            // If it looks like a file path, try to run it
            if std::path::Path::new(command)
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("brewin"))
            {
                match parse_run_options(&args[2..]) {
                    Ok((options, _)) => run_file(command, &options),
                    Err(msg) => {
                        eprintln!("error: {msg}");
                        std::process::exit(1);
                    }
                }
            } else {
                eprintln!("Unknown command: {command}");
                eprintln!();
                print_usage();
                std::process::exit(1);
            }
        }
    }
}

fn print_usage() {
    println!("Brewin interpreter");
    println!();
    println!("Usage: brewin <command> [options]");
    println!();
    println!("Commands:");
    println!("  run <file.brewin>    Run a Brewin program");
    println!("  lex <file.brewin>    Show statements and tokens");
    println!("  help                 Show this help message");
    println!("  version              Show version information");
    println!();
    println!("Run options:");
    println!("  --level=<n>          Language level: 1, 2, 3 (default: 3)");
    println!("  --max-depth=<n>      Limit active function calls (0: unlimited)");
    println!();
    println!("Environment:");
    println!("  RUST_LOG=brewin_eval=debug   Trace calls and returns on stderr");
    println!("  BREWIN_LOG_TREE=1            Indent trace output by span");
    println!();
    println!("Examples:");
    println!("  brewin run main.brewin");
    println!("  brewin run main.brewin --level=2");
    println!("  brewin main.brewin --max-depth=1000");
    println!("  brewin lex main.brewin");
}
