use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use clinote_core::config::resolve_config_path;
use clinote_core::constants::CONFIG_ENV_VAR;
use clinote_core::{
    to_patient_context_as_of, CatalogAppendix, CombineOptions, EngineConfig, ExpansionEngine,
    NoteDraft, NoteSections, NoteType, PatientContext, Registry, SchemaVariant, SectionSchema,
    SpecialtyCatalog,
};
use clinote_record::PatientFile;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "clinote")]
#[command(about = "Clinical note content engine CLI")]
struct Cli {
    /// Engine configuration file (YAML). Falls back to $CLINOTE_CONFIG
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args)]
struct InputArgs {
    /// Input file; reads stdin when omitted or "-"
    #[arg(long, short)]
    input: Option<PathBuf>,
}

#[derive(Args)]
struct SchemaArgs {
    /// Use the five-section schema
    #[arg(long)]
    simplified: bool,
}

impl SchemaArgs {
    fn schema(&self) -> &'static SectionSchema {
        if self.simplified {
            SchemaVariant::Simplified.schema()
        } else {
            SchemaVariant::Full.schema()
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Split canonical note text into sections (JSON)
    Parse {
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        schema: SchemaArgs,
    },
    /// Join sections (JSON) into canonical note text
    Combine {
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        schema: SchemaArgs,
        /// Emit placeholders for empty sections
        #[arg(long)]
        template: bool,
        /// Specialty catalog appended in template mode
        #[arg(long)]
        specialty: Option<String>,
    },
    /// Expand shortcuts and macros against a patient record
    Expand {
        #[command(flatten)]
        input: InputArgs,
        /// Patient record (YAML, or JSON with a .json extension)
        #[arg(long, short)]
        patient: Option<PathBuf>,
    },
    /// Report whether text contains any registered shortcut or macro
    Check {
        #[command(flatten)]
        input: InputArgs,
    },
    /// Combine, expand and print a note submission (JSON)
    Finalise {
        #[command(flatten)]
        input: InputArgs,
        /// Note title
        #[arg(long, default_value = "")]
        title: String,
        /// Note type (soap, progress, consultation, procedure, discharge, wellness)
        #[arg(long, default_value = "soap")]
        note_type: NoteType,
        /// Patient record (YAML, or JSON with a .json extension)
        #[arg(long, short)]
        patient: Option<PathBuf>,
    },
    /// List registered shortcuts and macros, or specialty catalogs
    Catalog {
        /// List specialty catalogs instead of shortcuts and macros
        #[arg(long)]
        specialties: bool,
    },
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("clinote=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = match resolve_config_path(cli.config, std::env::var(CONFIG_ENV_VAR).ok()) {
        Some(path) => EngineConfig::load(&path)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?,
        None => EngineConfig::default(),
    };
    let engine = ExpansionEngine::with_config(Registry::builtin(), &config);

    match cli.command {
        Some(Commands::Parse { input, schema }) => {
            let text = read_input(&input)?;
            let sections = schema.schema().parse(&text);
            println!("{}", serde_json::to_string_pretty(&sections)?);
        }
        Some(Commands::Combine {
            input,
            schema,
            template,
            specialty,
        }) => {
            let sections = read_sections(&input)?;
            let mut options = CombineOptions::from_config(&config).with_placeholders(template);
            if let Some(name) = specialty {
                let Some(catalog) = SpecialtyCatalog::builtin(&name) else {
                    bail!("unknown specialty: {name}");
                };
                options = options.with_appendix(CatalogAppendix::all(catalog));
            }
            print!("{}", schema.schema().combine(&sections, &options));
        }
        Some(Commands::Expand { input, patient }) => {
            let text = read_input(&input)?;
            let ctx = load_context(patient.as_deref())?;
            print!("{}", engine.expand(&text, &ctx));
        }
        Some(Commands::Check { input }) => {
            let text = read_input(&input)?;
            println!("{}", engine.has_shortcuts(&text));
        }
        Some(Commands::Finalise {
            input,
            title,
            note_type,
            patient,
        }) => {
            let sections = read_sections(&input)?;
            let ctx = load_context(patient.as_deref())?;
            let note = NoteDraft::new(note_type)
                .with_title(title)
                .with_sections(sections)
                .finalise(&engine, &config, &ctx, chrono::Utc::now());
            tracing::info!(id = %note.id, "finalised {} note", note_type.default_title());
            println!("{}", serde_json::to_string_pretty(&note)?);
        }
        Some(Commands::Catalog { specialties }) => {
            if specialties {
                println!(
                    "{}",
                    serde_json::to_string_pretty(SpecialtyCatalog::builtin_all())?
                );
            } else {
                for entry in engine.catalog() {
                    println!("{:<14} {:<9} {}", entry.key, entry.kind, entry.description);
                }
            }
        }
        None => {
            println!("Use 'clinote --help' for commands");
        }
    }

    Ok(())
}

fn read_input(args: &InputArgs) -> anyhow::Result<String> {
    match args.input.as_deref() {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        _ => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("failed to read stdin")?;
            Ok(text)
        }
    }
}

fn read_sections(args: &InputArgs) -> anyhow::Result<NoteSections> {
    let text = read_input(args)?;
    serde_json::from_str(&text).context("sections must be a JSON object keyed by section name")
}

fn load_context(path: Option<&Path>) -> anyhow::Result<PatientContext> {
    let Some(path) = path else {
        return Ok(PatientContext::default());
    };

    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read patient record {}", path.display()))?;
    let record = if path.extension().is_some_and(|ext| ext == "json") {
        PatientFile::parse_json(&text)
    } else {
        PatientFile::parse_yaml(&text)
    }
    .with_context(|| format!("invalid patient record {}", path.display()))?;

    Ok(to_patient_context_as_of(
        &record,
        chrono::Utc::now().date_naive(),
    ))
}
