use std::fs;
use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use informegen::{AppConfig, AppError, ExamForm};

#[derive(Parser)]
#[command(name = "informegen")]
#[command(version)]
#[command(about = "Generate medical exam reports from a .docx template", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fill the report template with form data and write the .docx
    #[clap(visible_alias = "g")]
    Generate(GenerateArgs),
}

#[derive(Args)]
struct GenerateArgs {
    /// Path to the deployment configuration (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// JSON file with the submitted form fields
    #[arg(short, long)]
    form: Option<PathBuf>,

    /// Directory the report is written into
    #[arg(short, long, default_value = ".")]
    out: PathBuf,

    /// Patient name
    #[arg(long)]
    nombre: Option<String>,

    /// Patient RUN
    #[arg(long)]
    run: Option<String>,

    /// Birth date, ISO format (YYYY-MM-DD)
    #[arg(long)]
    fecnac: Option<String>,

    /// Exam type (default: TC)
    #[arg(long)]
    tipo_examen: Option<String>,

    /// Exam region (default: Cerebral)
    #[arg(long)]
    region_examen: Option<String>,

    /// Clinical background
    #[arg(long)]
    antecedentes: Option<String>,

    /// Findings
    #[arg(long)]
    hallazgos: Option<String>,

    /// Conclusion
    #[arg(long)]
    conclusion: Option<String>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("informegen=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Generate(args) => generate(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn generate(args: GenerateArgs) -> Result<(), AppError> {
    let config = match &args.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };

    let mut form = match &args.form {
        Some(path) => ExamForm::from_json(&fs::read_to_string(path)?)?,
        None => ExamForm::default(),
    };

    // Per-field flags override values coming from the JSON file.
    if let Some(nombre) = args.nombre {
        form.nombre = nombre;
    }
    if let Some(run) = args.run {
        form.run = run;
    }
    if let Some(fecnac) = args.fecnac {
        form.fecnac = fecnac;
    }
    if let Some(tipo_examen) = args.tipo_examen {
        form.tipo_examen = tipo_examen;
    }
    if let Some(region_examen) = args.region_examen {
        form.region_examen = region_examen;
    }
    if let Some(antecedentes) = args.antecedentes {
        form.antecedentes = antecedentes;
    }
    if let Some(hallazgos) = args.hallazgos {
        form.hallazgos = hallazgos;
    }
    if let Some(conclusion) = args.conclusion {
        form.conclusion = conclusion;
    }

    let report = informegen::generate(&config, &form)?;

    fs::create_dir_all(&args.out)?;
    let path = args.out.join(&report.filename);
    fs::write(&path, report.document.as_bytes())?;
    println!("{}", path.display());
    Ok(())
}
