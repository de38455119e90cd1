//! Hardcopy Filter
//!
//! Reads host output from stdin or a file, translates it for a hardcopy
//! printer and writes the result to stdout. Replies to host status queries
//! go to a separate file so they never reach the printer.

use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use hardcopy_term::app::Config;
use hardcopy_term::translator::{ResetEvent, Translator};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let args: Vec<String> = std::env::args().collect();

    // Parse command line arguments
    let mut config_path: Option<PathBuf> = None;
    let mut input_file: Option<PathBuf> = None;
    let mut responses_file: Option<PathBuf> = None;
    let mut wrap = false;
    let mut nlcr = false;
    let mut nul_delays = false;
    let mut show_help = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-c" | "--config" => {
                i += 1;
                if i < args.len() {
                    config_path = Some(PathBuf::from(&args[i]));
                }
            },
            "-r" | "--responses" => {
                i += 1;
                if i < args.len() {
                    responses_file = Some(PathBuf::from(&args[i]));
                }
            },
            "-w" | "--wrap" => {
                wrap = true;
            },
            "-n" | "--nlcr" => {
                nlcr = true;
            },
            "-d" | "--nul-delays" => {
                nul_delays = true;
            },
            "-h" | "--help" => {
                show_help = true;
            },
            _ => {
                // Treat as input file if no flag
                if input_file.is_none() && !args[i].starts_with('-') {
                    input_file = Some(PathBuf::from(&args[i]));
                }
            },
        }
        i += 1;
    }

    if show_help {
        print_help();
        return ExitCode::SUCCESS;
    }

    let mut config = match &config_path {
        Some(path) => match Config::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error loading config '{}': {}", path.display(), e);
                return ExitCode::FAILURE;
            },
        },
        None => Config::load_or_default(),
    };
    config.modes.autowrap |= wrap;
    config.modes.newline_crlf |= nlcr;
    config.modes.nul_delays |= nul_delays;

    match run(&config, input_file.as_ref(), responses_file.as_ref()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        },
    }
}

fn run(config: &Config, input: Option<&PathBuf>, responses: Option<&PathBuf>) -> io::Result<()> {
    let mut reader: Box<dyn Read> = match input {
        Some(path) => Box::new(File::open(path)?),
        None => Box::new(io::stdin()),
    };
    let mut replies: Option<BufWriter<File>> = match responses {
        Some(path) => Some(BufWriter::new(File::create(path)?)),
        None => None,
    };
    let stdout = io::stdout();
    let mut printer = BufWriter::new(stdout.lock());

    let mut translator = config.translator();
    tracing::info!("Translating with modes {:?}", translator.modes());

    let mut buf = [0u8; 4096];
    loop {
        let n = reader.read(&mut buf)?;
        if n == 0 {
            break;
        }
        for &byte in &buf[..n] {
            relay_byte(&mut translator, byte, &mut printer, replies.as_mut())?;
        }
        printer.flush()?;
        if let Some(replies) = replies.as_mut() {
            replies.flush()?;
        }
    }

    if translator.is_collecting() {
        tracing::debug!("Input ended inside an escape sequence");
    }
    printer.flush()
}

/// Feed one byte through the translator and drain both chunks
fn relay_byte(
    translator: &mut Translator,
    byte: u8,
    printer: &mut impl Write,
    replies: Option<&mut BufWriter<File>>,
) -> io::Result<()> {
    let step = translator.process(byte);
    printer.write_all(step.output())?;

    if !step.response().is_empty() {
        match replies {
            Some(replies) => replies.write_all(step.response())?,
            None => tracing::debug!(
                "Discarding host response: {}",
                step.response().escape_ascii()
            ),
        }
    }

    while let Some(event) = translator.take_event() {
        match event {
            ResetEvent::Soft => tracing::info!("Soft reset requested"),
            ResetEvent::Hard => tracing::info!("Hard reset requested"),
        }
    }
    Ok(())
}

fn print_help() {
    println!("Hardcopy Filter");
    println!();
    println!("Usage: hardcopy-filter [OPTIONS] [INPUT_FILE]");
    println!();
    println!("Options:");
    println!("  -c, --config <PATH>     Load configuration from a JSON file");
    println!("  -r, --responses <PATH>  Write replies to host status queries to a file");
    println!("  -w, --wrap              Start with auto-wrap enabled");
    println!("  -n, --nlcr              Start with LF sent as CR LF");
    println!("  -d, --nul-delays        Start with NUL filler after line feeds");
    println!("  -h, --help              Show this help message");
    println!();
    println!("If no input file is specified, reads from stdin.");
    println!("Printer output is written to stdout.");
    println!();
    println!("Examples:");
    println!("  printf 'abc\\033[8Gdef\\n' | hardcopy-filter");
    println!("  hardcopy-filter --wrap --nlcr session.log > /dev/ttyUSB0");
}
