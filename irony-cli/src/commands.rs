//! CLI command implementations.

use std::fs;

use irony_cli::Error;
use irony_compiler::{CompileOptions, ConditionLowering, Dialect};

/// Flags accepted after the input file.
#[derive(Default)]
struct Flags {
    debug: bool,
    output: Option<String>,
    options: CompileOptions,
}

/// Parse trailing flags, accepting only those listed in `allowed`.
fn parse_flags(command: &str, args: &[String], allowed: &[&str]) -> Result<Flags, i32> {
    let mut flags = Flags::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        let arg = arg.as_str();
        if !allowed.contains(&arg) {
            eprintln!("error: {command} does not accept '{arg}'");
            return Err(1);
        }
        match arg {
            "--debug" => flags.debug = true,
            "--teaching" => flags.options.dialect = Dialect::Teaching,
            "--compare-rhs" => flags.options.condition = ConditionLowering::RightOperand,
            "-o" => {
                let Some(path) = iter.next() else {
                    eprintln!("error: -o requires a file name");
                    return Err(1);
                };
                flags.output = Some(path.clone());
            }
            _ => {
                eprintln!("error: unknown flag '{arg}'");
                return Err(1);
            }
        }
    }

    Ok(flags)
}

fn read_lines(input: &str) -> Result<Vec<String>, i32> {
    let text = fs::read_to_string(input).map_err(|e| {
        eprintln!("error: cannot read '{input}': {e}");
        1
    })?;
    Ok(text.lines().map(str::to_string).collect())
}

fn report(e: Error) -> i32 {
    eprintln!("error: {e}");
    e.exit_code()
}

fn print_output(lines: &[String]) {
    for line in lines {
        println!("{line}");
    }
}

/// Compile a source file to assembly, on stdout or into `-o <file>`.
pub fn compile(args: &[String]) -> Result<(), i32> {
    let Some(input) = args.first() else {
        eprintln!("error: compile requires an input file");
        eprintln!("Usage: irony compile <input.iy> [-o output.asm]");
        return Err(1);
    };
    let flags = parse_flags("compile", &args[1..], &["-o", "--teaching", "--compare-rhs"])?;

    let source = read_lines(input)?;
    let assembly = irony_cli::compile_with_options(&source, &flags.options).map_err(report)?;

    match flags.output {
        Some(output) => {
            let mut text = assembly.join("\n");
            text.push('\n');
            fs::write(&output, text).map_err(|e| {
                eprintln!("error: cannot write '{output}': {e}");
                1
            })?;
            eprintln!("compiled {} instructions -> {output}", assembly.len());
        }
        None => print_output(&assembly),
    }
    Ok(())
}

/// Execute an assembly file and print its output.
pub fn run(args: &[String]) -> Result<(), i32> {
    let Some(input) = args.first() else {
        eprintln!("error: run requires an input file");
        eprintln!("Usage: irony run <input.asm> [--debug]");
        return Err(1);
    };
    let flags = parse_flags("run", &args[1..], &["--debug"])?;

    let assembly = read_lines(input)?;
    let output = irony_cli::execute(&assembly, flags.debug).map_err(report)?;
    print_output(&output);
    Ok(())
}

/// Compile a source file and execute it.
pub fn exec(args: &[String]) -> Result<(), i32> {
    let Some(input) = args.first() else {
        eprintln!("error: exec requires an input file");
        eprintln!("Usage: irony exec <input.iy> [--debug]");
        return Err(1);
    };
    let flags = parse_flags("exec", &args[1..], &["--debug", "--teaching", "--compare-rhs"])?;

    let source = read_lines(input)?;
    let assembly = irony_cli::compile_with_options(&source, &flags.options).map_err(report)?;
    let output = irony_cli::execute(&assembly, flags.debug).map_err(report)?;
    print_output(&output);
    Ok(())
}
