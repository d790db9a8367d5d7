use anyhow::{Context, Result};
use clap::Parser;
use std::path::Path;
use stdfscope::analysis::Analyzer;
use stdfscope::cli::{Cli, Command, OutputFormat};
use stdfscope::config::{self, Config};
use stdfscope::csv_output::CsvOutput;
use stdfscope::generator::SampleGenerator;
use stdfscope::json_output::{JsonAnalysisOutput, JsonParseOutput};
use stdfscope::report;
use stdfscope::store::TestResultStore;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    } else if std::env::var_os("RUST_LOG").is_some() {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .init();
    }
}

fn write_output(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
}

fn run_parse(file: &Path, csv: Option<&Path>, summary: bool, format: OutputFormat) -> Result<()> {
    let store = TestResultStore::from_path(file)?;
    let source = file.display().to_string();

    match format {
        OutputFormat::Json => println!("{}", JsonParseOutput::new(source, &store).to_json()?),
        OutputFormat::Text if summary => println!("{}", report::summary_text(&source, &store)),
        OutputFormat::Text => {}
    }

    if let Some(csv_path) = csv {
        write_output(csv_path, &CsvOutput::from_results(store.results()).to_csv())?;
        println!("Results exported to: {}", csv_path.display());
    }

    Ok(())
}

fn run_analyze(file: &Path, report_path: Option<&Path>, sigma: f64, format: OutputFormat) -> Result<()> {
    let store = TestResultStore::from_path(file)?;
    let analyzer = Analyzer::new(&store);
    let source = file.display().to_string();

    let rendered = match format {
        OutputFormat::Text => report::analysis_report(&source, &analyzer, sigma),
        OutputFormat::Json => JsonAnalysisOutput::new(source, &analyzer, sigma).to_json()?,
    };

    match report_path {
        Some(path) => {
            write_output(path, &rendered)?;
            println!("Report saved to: {}", path.display());
        }
        None => println!("{}", rendered),
    }

    Ok(())
}

fn run_generate(output: &Path, tests: u32, seed: Option<u64>) -> Result<()> {
    let mut generator = match seed {
        Some(seed) => SampleGenerator::with_seed(seed),
        None => SampleGenerator::new(),
    };
    generator.write_to(output, tests)?;
    println!("Sample STDF file generated: {}", output.display());
    Ok(())
}

fn main() -> Result<()> {
    let args = Cli::parse();

    init_tracing(args.debug);

    let config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };

    match args.command {
        Command::Parse {
            file,
            csv,
            summary,
            format,
        } => run_parse(&file, csv.as_deref(), summary, format),
        Command::Analyze {
            file,
            report,
            sigma,
            format,
        } => {
            let sigma = sigma.unwrap_or(config.analysis.outlier_sigma);
            config::validate_sigma(sigma)?;
            run_analyze(&file, report.as_deref(), sigma, format)
        }
        Command::Generate {
            output,
            tests,
            seed,
        } => run_generate(
            &output,
            tests.unwrap_or(config.generate.tests),
            seed.or(config.generate.seed),
        ),
    }
}
