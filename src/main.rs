use bft::cli_util::{exit_code, print_error};
use bft::{Generator, execute};
use clap::{Args, Parser, Subcommand};
use std::env;
use std::fs;
use std::io::{self, IsTerminal, Read, Write};

fn print_top_usage_and_exit(program: &str, code: i32) -> ! {
    eprintln!(
        r#"Usage:
  {0} run  "<code>"             # Run Brainfuck code (args are concatenated)
  {0} run  --file <PATH>        # Run Brainfuck code loaded from file
  {0} gen  [--bytes] [TEXT...]  # Generate Brainfuck to print TEXT/STDIN/file
  {0} gen  [--bytes] --file <PATH>
  {0} repl                      # Start a Brainfuck REPL (read-eval-print loop)

Run "{0} <subcommand> --help" for more info.
"#,
        program
    );
    let _ = io::stderr().flush();
    std::process::exit(code);
}

fn run_usage_and_exit(program: &str, code: i32) -> ! {
    eprintln!(
        r#"Usage:
  {0} run "<code>"
  {0} run --file <PATH>

Options:
  --file, -f <PATH>  Read Brainfuck code from PATH instead of positional "<code>"
  --help, -h         Show this help

Notes:
- Input (`,`) reads a single byte from stdin; on EOF the current cell is set to 0.
- Characters outside of Brainfuck's ><+-.,[] are treated as comments.
- The tape starts with one cell and grows to the right as needed; moving
  left of cell 0 is an error.

Examples:
- Load Brainfuck code from a file:
    {0} run --file ./program.bf
- Read bytes from a file as stdin (`,` will consume file input):
    {0} run ",[.,]" < input.txt
"#,
        program
    );
    let _ = io::stderr().flush();
    std::process::exit(code);
}

fn gen_usage_and_exit(program: &str, code: i32) -> ! {
    eprintln!(
        r#"Usage:
  {0} gen [--bytes] [TEXT...]           # Read UTF-8 TEXT args (preferred) or from STDIN if no TEXT is given
  {0} gen [--bytes] --file <PATH>       # Read from file instead of STDIN

Options:
  --file, -f <PATH>  Read input from file at PATH (otherwise reads from TEXT or STDIN)
  --bytes            Treat input as raw bytes (no UTF-8 required)
  --help, -h         Show this help

Description:
  Generates Brainfuck code that, when executed, will output the provided input bytes.

Notes:
  - Output is Brainfuck code printed to stdout followed by a newline.
"#,
        program
    );
    let _ = io::stderr().flush();
    std::process::exit(code);
}

fn repl_usage_and_exit(program: &str, code: i32) -> ! {
    eprintln!(
        r#"Usage:
  {0} repl   # Start a Brainfuck REPL (read-eval-print loop)

Options:
  --help, -h         Show this help

Description:
  Starts a REPL where you can enter Brainfuck code and execute it live.

Notes:
    - Ctrl+d executes the current buffer on *nix/macOS.
    - Ctrl+z and Enter will execute the current buffer on Windows.
    - Ctrl+c exits the REPL immediately.
    - The REPL will print a newline after each execution for readability.
    - Each execution starts with a fresh tape and pointer.
    - The REPL will exit after a single execution if the environment variable `BFT_REPL_ONCE` is set to `1`.
"#,
        program
    );
    let _ = io::stderr().flush();
    std::process::exit(code);
}

#[derive(Parser, Debug)]
#[command(name = "bft", disable_help_flag = true, disable_help_subcommand = true)]
struct Cli {
    /// Show this help
    #[arg(short = 'h', long = "help", action = clap::ArgAction::SetTrue)]
    help: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    Run(RunArgs),
    Gen(GenArgs),
    Repl(ReplArgs),
}

#[derive(Args, Debug)]
#[command(disable_help_flag = true)]
struct RunArgs {
    /// Read Brainfuck code from PATH instead of positional "<code>"
    #[arg(short = 'f', long = "file")]
    file: Option<String>,

    /// Concatenated Brainfuck code parts
    #[arg(value_name = "code", allow_hyphen_values = true)]
    code: Vec<String>,

    /// Show this help
    #[arg(short = 'h', long = "help", action = clap::ArgAction::SetTrue)]
    help: bool,
}

#[derive(Args, Debug)]
#[command(disable_help_flag = true)]
struct GenArgs {
    /// Treat input as raw bytes (no UTF-8 required)
    #[arg(long = "bytes")]
    bytes: bool,

    /// Read input from file at PATH (otherwise reads from TEXT or STDIN)
    #[arg(short = 'f', long = "file")]
    file: Option<String>,

    /// Positional text (UTF-8). If omitted, reads from STDIN.
    #[arg(value_name = "TEXT", trailing_var_arg = true)]
    text: Vec<String>,

    /// Show this help
    #[arg(short = 'h', long = "help", action = clap::ArgAction::SetTrue)]
    help: bool,
}

#[derive(Args, Debug)]
#[command(disable_help_flag = true)]
struct ReplArgs {
    /// Show this help
    #[arg(short = 'h', long = "help", action = clap::ArgAction::SetTrue)]
    help: bool,
}

fn run_run_with_args(program: &str, args: RunArgs) -> i32 {
    if args.help {
        run_usage_and_exit(program, 0);
    }

    let RunArgs { file, code, .. } = args;

    if file.is_none() && code.is_empty() {
        run_usage_and_exit(program, 2);
    }

    if file.is_some() && !code.is_empty() {
        eprintln!("{program}: cannot use positional code together with --file");
        run_usage_and_exit(program, 2);
    }

    let code_str = if let Some(path) = file {
        match fs::read_to_string(&path) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("{program}: failed to read code file as UTF-8: {e}");
                let _ = io::stderr().flush();
                return 1;
            }
        }
    } else {
        code.join("")
    };

    // Execute the original source so that error positions match it
    if let Err(err) = execute(&code_str, io::stdin().lock(), io::stdout().lock()) {
        print_error(Some(program), &code_str, &err);
        let _ = io::stderr().flush();
        return exit_code(&err);
    }

    // For readability, ensure output ends with a newline
    println!();
    let _ = io::stdout().flush();
    0
}

fn run_gen_with_args(program: &str, args: GenArgs) -> i32 {
    if args.help {
        gen_usage_and_exit(program, 0);
    }

    let GenArgs { bytes, file, text, .. } = args;

    if file.is_some() && !text.is_empty() {
        eprintln!("{program}: cannot use positional TEXT together with --file");
        gen_usage_and_exit(program, 2);
    }

    let input_bytes: Vec<u8> = match file {
        Some(path) => {
            if bytes {
                match fs::read(&path) {
                    Ok(b) => b,
                    Err(e) => {
                        eprintln!("{program}: failed to read file: {e}");
                        let _ = io::stderr().flush();
                        return 1;
                    }
                }
            } else {
                match fs::read_to_string(&path) {
                    Ok(s) => s.into_bytes(),
                    Err(e) => {
                        eprintln!(
                            "{program}: failed to read file as UTF-8 (use --bytes for binary): {e}"
                        );
                        let _ = io::stderr().flush();
                        return 1;
                    }
                }
            }
        }
        None => {
            if !text.is_empty() {
                text.join(" ").into_bytes()
            } else if bytes {
                let mut buf = Vec::new();
                if let Err(e) = io::stdin().lock().read_to_end(&mut buf) {
                    eprintln!("{program}: failed reading stdin: {e}");
                    let _ = io::stderr().flush();
                    return 1;
                }
                buf
            } else {
                let mut s = String::new();
                if let Err(e) = io::stdin().read_to_string(&mut s) {
                    eprintln!(
                        "{program}: failed reading UTF-8 from stdin (use --bytes for binary): {e}"
                    );
                    let _ = io::stderr().flush();
                    return 1;
                }
                s.into_bytes()
            }
        }
    };

    let code = Generator::new(&input_bytes).generate();
    println!("{}", code);
    let _ = io::stdout().flush();
    0
}

/// Executes a single Brainfuck program contained in `buffer`.
/// - Program output goes to stdout.
/// - Errors are printed concisely to stderr.
/// - A newline is always written to stdout after execution (success or error)
///   so that the prompt begins at column 0 on the next iteration.
fn execute_repl_buffer(buffer: &str) {
    if let Err(err) = execute(buffer, io::stdin().lock(), io::stdout().lock()) {
        print_error(None, buffer, &err);
        let _ = io::stderr().flush();
    }
    println!();
    let _ = io::stdout().flush();
}

fn run_repl_with_args(program: &str, args: ReplArgs) -> i32 {
    if args.help {
        repl_usage_and_exit(program, 0);
    }

    // Install SIGINT (ctrl+c) handler to flush and exit(0) immediately
    if let Err(e) = ctrlc::set_handler(|| {
        let _ = std::io::stdout().flush();
        let _ = std::io::stderr().flush();
        std::process::exit(0);
    }) {
        eprintln!("{program}: failed to set ctrl+c handler: {e}");
        let _ = std::io::stderr().flush();
        return 1;
    }

    let interactive = io::stdin().is_terminal();
    if interactive {
        println!("Brainfuck REPL");
        println!(
            "Ctrl+d/Ctrl+z Enter (Windows) executes the current buffer. Press ctrl+c to exit"
        );
    }

    if let Err(e) = repl_loop(interactive) {
        eprintln!("{program}: repl failed: {e}");
        let _ = io::stderr().flush();
        return 1;
    }
    0
}

fn repl_loop(interactive: bool) -> io::Result<()> {
    loop {
        let mut stdin = io::stdin().lock();

        if interactive {
            print!("bft> ");
            io::stdout().flush()?;
        }

        let Some(submission) = read_submission(&mut stdin) else {
            // EOF with nothing buffered: leave the loop
            if interactive {
                println!();
                io::stdout().flush()?;
            }
            return Ok(());
        };
        drop(stdin);

        let filtered = ops_only(submission.trim());
        if filtered.is_empty() {
            continue;
        }

        // Execute the Brainfuck code in the submission
        execute_repl_buffer(&filtered);

        // Test hook: if BFT_REPL_ONCE is set, exit after a single execution
        // to allow integration testing
        if env::var("BFT_REPL_ONCE").ok().as_deref() == Some("1") {
            return Ok(());
        }
    }
}

fn read_submission<R: io::BufRead>(stdin: &mut R) -> Option<String> {
    // Collect all lines until EOF
    let mut buffer = String::new();

    loop {
        let mut line = String::new();
        match stdin.read_line(&mut line) {
            Ok(0) => {
                // EOF
                break;
            }
            Ok(_) => {
                buffer.push_str(&line);
            }
            Err(_) => {
                // Read error, ignore
                return None;
            }
        }
    }

    if buffer.is_empty() { None } else { Some(buffer) }
}

/// Keep only Brainfuck instruction characters
fn ops_only(s: &str) -> String {
    s.chars()
        .filter(|c| matches!(c, '>' | '<' | '+' | '-' | '.' | ',' | '[' | ']'))
        .collect()
}

fn main() {
    // We still pull the program name for help rendering consistency
    let program = env::args().next().unwrap_or_else(|| String::from("bft"));

    let cli = Cli::parse();

    if cli.help || cli.command.is_none() {
        print_top_usage_and_exit(&program, if cli.help { 0 } else { 2 });
    }

    let code = match cli.command.unwrap() {
        Command::Run(args) => run_run_with_args(&program, args),
        Command::Gen(args) => run_gen_with_args(&program, args),
        Command::Repl(args) => run_repl_with_args(&program, args),
    };

    std::process::exit(code);
}
