use chrono::Utc;
use listing_feed::ingest::{self, IngestOptions};
use std::path::PathBuf;

fn main() {
    let opts = match parse_args(std::env::args().skip(1)) {
        Ok(opts) => opts,
        Err(msg) => {
            eprintln!("❌ {msg}");
            eprintln!(
                "Usage: ingest --host <addr:port> [--output <path>] [--int-bools <field,field,...>]"
            );
            std::process::exit(2);
        }
    };

    println!(
        "🧵 Ingestion run against {} started at {}",
        opts.host,
        Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    );

    match ingest::run(&opts) {
        Ok(report) => {
            println!(
                "✅ Data has been saved to {} ({} listings)",
                opts.output.display(),
                report.count
            );
        }
        Err(e) => {
            eprintln!("❌ Ingestion failed: {e}");
            std::process::exit(1);
        }
    }
}

fn parse_args(args: impl Iterator<Item = String>) -> Result<IngestOptions, String> {
    let args: Vec<String> = args.collect();

    let mut host = None;
    let mut output = PathBuf::from("output.json");
    let mut boolean_fields = Vec::new();

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--host" => host = Some(value_of(&args, &mut i, "--host")?),
            "--output" => output = PathBuf::from(value_of(&args, &mut i, "--output")?),
            "--int-bools" => {
                boolean_fields = value_of(&args, &mut i, "--int-bools")?
                    .split(',')
                    .map(|f| f.trim().to_string())
                    .filter(|f| !f.is_empty())
                    .collect();
            }
            other => return Err(format!("Unknown argument '{other}'")),
        }
        i += 1;
    }

    let host = host.ok_or_else(|| "--host is required".to_string())?;

    Ok(IngestOptions {
        host,
        output,
        boolean_fields,
    })
}

fn value_of(args: &[String], i: &mut usize, flag: &str) -> Result<String, String> {
    *i += 1;
    args.get(*i)
        .cloned()
        .ok_or_else(|| format!("{flag} requires a value"))
}
