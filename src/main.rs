use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::error;

use hashbench::benchmark::{run_benchmark, BenchSettings};
use hashbench::loader::load_keys;
use hashbench::logging::initialize_logger;
use hashbench::pdf::PdfWriter;
use hashbench::report::{render_console, render_table};

const PDF_TITLE: &str = "Hash Table Report - FNV-1a vs djb2";

/// Inserts the keys of a file into chained hash tables and compares their
/// bucket distribution.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct BenchConfig {
    /// Keys file, one key per line
    input: PathBuf,

    /// Buckets per table; values outside 1..=32 fall back to 32
    #[arg(short, long, default_value_t = 32, allow_negative_numbers = true)]
    capacity: i64,

    /// Where to write the PDF report
    #[arg(long, default_value = "hash_report.pdf")]
    pdf: PathBuf,

    /// Skip the PDF report
    #[arg(long)]
    no_pdf: bool,

    /// Lookups of present keys in the search probe
    #[arg(long, default_value_t = 500)]
    search_hits: usize,

    /// Lookups of absent keys in the search probe
    #[arg(long, default_value_t = 500)]
    search_misses: usize,

    /// Also report an ahash-backed table
    #[arg(long)]
    baseline: bool,
}

impl BenchConfig {
    fn settings(&self) -> BenchSettings {
        BenchSettings {
            capacity: self.capacity,
            search_hits: self.search_hits,
            search_misses: self.search_misses,
            baseline: self.baseline,
        }
    }
}

fn run(config: &BenchConfig) -> hashbench::Result<()> {
    let keys = load_keys(&config.input)?;
    let reports = run_benchmark(&keys, &config.settings())?;

    print!("{}", render_console(&reports));

    if !config.no_pdf {
        let mut pdf = PdfWriter::new(PDF_TITLE);
        for report in &reports {
            pdf.push_text(&render_table(report));
            pdf.push_line("");
        }
        pdf.write_to_path(&config.pdf)?;
        println!("\nPDF written: {}", config.pdf.display());
    }
    Ok(())
}

fn main() -> ExitCode {
    initialize_logger();
    let config = BenchConfig::parse();

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}
