//! Irony CLI — compile and run Irony programs.
//!
//! Exit codes:
//! - 0: Success
//! - 1: Usage, input or assembly error
//! - 2: Compile error
//! - 3: Runtime error

mod commands;

use std::process;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let result = match args[1].as_str() {
        "compile" => commands::compile(&args[2..]),
        "run" => commands::run(&args[2..]),
        "exec" => commands::exec(&args[2..]),
        "--help" | "-h" | "help" => {
            print_usage();
            process::exit(0);
        }
        other => {
            eprintln!("error: unknown command '{other}'");
            eprintln!();
            print_usage();
            process::exit(1);
        }
    };

    if let Err(code) = result {
        process::exit(code);
    }
}

fn print_usage() {
    eprintln!("Usage: irony <command> [args]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  compile <input.iy> [-o output.asm]   Compile source to assembly");
    eprintln!("  run <input.asm> [--debug]            Execute assembly");
    eprintln!("  exec <input.iy> [--debug]            Compile and execute source");
    eprintln!();
    eprintln!("Compile options (compile, exec):");
    eprintln!("  --teaching      Reject 'for' loops");
    eprintln!("  --compare-rhs   Compare 'if a < b' against b instead of 2");
}
