use std::fs;

use clap::Parser;
use tommy::get_result;
use tracing_subscriber::EnvFilter;

/// tommy is a small imperative scripting language with closures, arrays and
/// optional type annotations.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells tommy to look at a file instead of a script.
    #[arg(short, long)]
    file: bool,

    contents: String,
}

fn main() {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("warn"))
                                                  .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter)
                             .with_writer(std::io::stderr)
                             .with_target(false)
                             .init();

    let args = Args::parse();

    let script = if args.file {
        fs::read_to_string(&args.contents).unwrap_or_else(|_| {
            eprintln!("Failed to read the input file '{}'. Perhaps this file does not exist?",
                      &args.contents);
            std::process::exit(1);
        })
    } else {
        args.contents
    };

    if let Err(e) = get_result(&script) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
