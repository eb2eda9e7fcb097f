use std::io::{Read, Write};
use tlink::{display, DuplicatePolicy, Error, LinkConfig, ModuleStore, Program};

const HELP_TEMPLATE: &str = "\
{before-help}{bin} {version}
  {author}
  {about}

{usage-heading}
{tab}{usage}

{all-args}{after-help}";

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Debug, clap::Parser)]
#[clap(author, version, about, help_template = HELP_TEMPLATE)]
struct Args {
    /// Input file (`-` reads standard input)
    #[clap(default_value = "input.txt")]
    input: String,

    /// Output file (standard output if omitted)
    #[clap(short, long)]
    output: Option<String>,

    /// Output format
    #[clap(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// YAML config file
    #[clap(short, long)]
    config: Option<String>,

    /// Policy for names defined more than once (overrides config)
    #[clap(long, value_enum)]
    duplicates: Option<DuplicatePolicy>,

    /// Dump modules as parsed
    #[clap(short, long)]
    dump: bool,

    /// Only print the result and errors
    #[clap(short, long)]
    quiet: bool,
}

fn main() {
    use clap::Parser;

    let args: Args = Args::parse();
    let log = |msg: String| {
        if !args.quiet {
            eprintln!("{}", msg);
        }
    };

    log(format!("Two-pass linker"));

    // ------------------------------------------------------------------------
    // Configuration
    let mut config = match &args.config {
        Some(path) => LinkConfig::load(path).unwrap_or_else(|e| fail(&e, path, "")),
        None => LinkConfig::default(),
    };
    if let Some(policy) = args.duplicates {
        config.duplicates = policy;
    }

    log(format!("1. Read Source"));
    log(format!("  < {}", args.input));
    let source = read_source(&args.input).unwrap_or_else(|e| fail(&e, &args.input, ""));

    let program = run(&args, &config, &source, &log)
        .unwrap_or_else(|e| fail(&e, &args.input, &source));

    if !args.quiet {
        for warning in &program.warnings {
            warning.print_diag(&args.input, &source);
        }
    }

    let out = match args.format {
        Format::Text => Ok(format!(
            "{}\n{}",
            display::symbol_table(&program.symbols),
            display::memory_map(&program.memory)
        )),
        Format::Json => program.to_json().map(|json| json + "\n"),
    }
    .unwrap_or_else(|e| fail(&e, &args.input, &source));

    match &args.output {
        Some(path) => {
            log(format!("  > {}", path));
            std::fs::write(path, out)
                .map_err(|e| Error::FileWrite(path.clone(), e))
                .unwrap_or_else(|e| fail(&e, path, ""));
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(out.as_bytes())
                .map_err(|e| Error::FileWrite(format!("<stdout>"), e))
                .unwrap_or_else(|e| fail(&e, "<stdout>", ""));
        }
    }
}

fn run(
    args: &Args,
    config: &LinkConfig,
    source: &str,
    log: &dyn Fn(String),
) -> Result<Program, Error> {
    if args.dump {
        display::print_modules(&ModuleStore::parse(source)?);
    }

    log(format!("2. Link Modules"));
    let program = tlink::link(source, config)?;
    log(format!(
        "  {} modules, {} symbols, {} words",
        program.modules.len(),
        program.symbols.len(),
        program.memory.len()
    ));
    Ok(program)
}

fn read_source(path: &str) -> Result<String, Error> {
    if path == "-" {
        let mut source = String::new();
        std::io::stdin()
            .read_to_string(&mut source)
            .map_err(|e| Error::FileRead(format!("<stdin>"), e))?;
        return Ok(source);
    }
    std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => Error::FileOpen(path.to_string(), e),
        _ => Error::FileRead(path.to_string(), e),
    })
}

fn fail(e: &Error, file: &str, source: &str) -> ! {
    e.print_diag(file, source);
    std::process::exit(1);
}
