//! animstream CLI - inspect animation dictionary streams.

use std::env;
use std::fs::File;
use std::io::BufReader;
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use animstream::chunk::{IStream, ID_UV_ANIM_DICT};
use animstream::{InterpolatorRegistry, Result, UvAnimDictionary};

fn usage() {
    eprintln!("Usage: animstream [-v] <dictionary-file>");
    eprintln!();
    eprintln!("Dump the animations of a UV animation dictionary stream.");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -v, --verbose   enable debug logging");
    eprintln!("  -h, --help      show this help");
}

fn main() -> ExitCode {
    let mut verbose = false;
    let mut path: Option<String> = None;
    for arg in env::args().skip(1) {
        match arg.as_str() {
            "-v" | "--verbose" => verbose = true,
            "-h" | "--help" => {
                usage();
                return ExitCode::SUCCESS;
            }
            _ => path = Some(arg),
        }
    }

    let filter = if verbose { "animstream=debug" } else { "animstream=warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();

    let Some(path) = path else {
        usage();
        return ExitCode::FAILURE;
    };

    match dump(&path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn dump(path: &str) -> Result<()> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut stream = IStream::new(&mut reader);

    let registry = InterpolatorRegistry::with_builtin_formats();
    stream.find_chunk(ID_UV_ANIM_DICT)?;
    let dict = UvAnimDictionary::stream_read(&mut stream, &registry)?;

    println!("{}: {} animation(s)", path, dict.len());
    for anim in dict.iter() {
        let name = anim
            .name()
            .map(|n| n.to_string())
            .unwrap_or_else(|| "<unnamed>".to_string());
        println!(
            "  {:<32} tag=0x{:<4X} format={:<12} frames={:<5} flags=0x{:X} duration={}s",
            name,
            anim.type_tag(),
            anim.format().name(),
            anim.num_frames(),
            anim.flags(),
            anim.duration()
        );
    }
    Ok(())
}
