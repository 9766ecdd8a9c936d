use anyhow::{Context, Result};
use canteen_model::{ColumnDefinition, MarketMetadata, Processor, ProcessorConfig, Upload};
use clap::{Args, Parser, Subcommand};
use definition::DefinitionTemplate;
use std::{fs, path::PathBuf};
use tracing::{error, info, warn, Level};

mod definition;

/// Canteen Model Processor
/// Converts canteen menu CSV files to the Canteen Model JSON document
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output for detailed processing information
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a menu CSV file into a Canteen Model document
    Convert(ConvertArgs),
    /// Generate a column definition to start a custom mapping from
    GenerateDefinition {
        /// Preset to copy (sjsu/uh); a commented custom template when omitted
        #[arg(short, long)]
        preset: Option<String>,

        /// Output path for the generated definition
        #[arg(
            short,
            long,
            default_value = "custom.cdf.jsonc",
            value_name = "OUTPUT PATH"
        )]
        output: PathBuf,
    },
    /// Validate a column definition file
    ValidateDefinition {
        /// Path to the column definition file to validate
        #[arg(value_name = "PATH TO DEFINITION")]
        definition: PathBuf,
    },
}

#[derive(Args)]
struct ConvertArgs {
    /// The CSV (or TXT) menu file to convert
    #[arg(value_name = "PATH TO FILE")]
    file: PathBuf,

    /// Menu type: a preset name (sjsu, uh) or "custom"
    #[arg(short = 't', long = "type")]
    menu_type: Option<String>,

    /// Column definition to use with --type custom
    #[arg(short, long, value_name = "PATH TO DEFINITION")]
    custom_definition: Option<PathBuf>,

    /// Output path for the generated document; stdout when omitted
    #[arg(short, long, value_name = "OUTPUT PATH")]
    output: Option<PathBuf>,

    /// Pretty-print the generated document
    #[arg(long)]
    pretty: bool,

    /// Processor config file
    #[arg(long, value_name = "PATH TO CONFIG")]
    config: Option<PathBuf>,

    /// Directory holding <type>.cdf.json preset definitions
    #[arg(long, value_name = "DIRECTORY")]
    definitions_dir: Option<PathBuf>,

    /// Canteen model template to start from
    #[arg(long, value_name = "PATH TO TEMPLATE")]
    template: Option<PathBuf>,

    #[command(flatten)]
    market: MarketArgs,
}

#[derive(Args)]
struct MarketArgs {
    #[arg(long)]
    market_id: Option<String>,
    #[arg(long)]
    account_name: Option<String>,
    #[arg(long)]
    location_name: Option<String>,
    #[arg(long)]
    market_name: Option<String>,
    #[arg(long)]
    menu: Option<String>,
    #[arg(long)]
    connect_url: Option<String>,
    #[arg(long)]
    kiosk: Option<String>,
}

impl From<MarketArgs> for MarketMetadata {
    fn from(args: MarketArgs) -> Self {
        MarketMetadata {
            market_id: args.market_id,
            account_name: args.account_name,
            location_name: args.location_name,
            market_name: args.market_name,
            menu: args.menu,
            connect_url: args.connect_url,
            kiosk: args.kiosk,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging with appropriate level
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    // stdout carries the document, so logs go to stderr
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .with_writer(std::io::stderr)
        .init();

    info!("Canteen Model Processor starting up...");

    match cli.command {
        Commands::Convert(args) => convert_command(args).await,
        Commands::GenerateDefinition { preset, output } => {
            generate_definition_command(preset.as_deref(), &output)
        }
        Commands::ValidateDefinition { definition } => validate_definition_command(&definition),
    }
}

async fn convert_command(args: ConvertArgs) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => ProcessorConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => ProcessorConfig::default(),
    };
    if args.definitions_dir.is_some() {
        config.definitions_dir = args.definitions_dir.clone();
    }
    if args.template.is_some() {
        config.template_path = args.template.clone();
    }

    // Verify the menu file exists
    if !args.file.exists() {
        anyhow::bail!("Menu file not found: {}", args.file.display());
    }
    let bytes = fs::read(&args.file)
        .with_context(|| format!("Failed to read menu file: {}", args.file.display()))?;
    let file_name = args
        .file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned());
    let upload = Upload { file_name, bytes };

    let custom_definition = match &args.custom_definition {
        Some(path) => Some(
            fs::read(path)
                .with_context(|| format!("Failed to read column definition: {}", path.display()))?,
        ),
        None => None,
    };

    let processor = Processor::new(config);
    let market = MarketMetadata::from(args.market);

    info!("Beginning CSV processing...");
    let processed = match processor
        .process_upload(
            Some(upload),
            args.menu_type.as_deref(),
            &market,
            custom_definition.as_deref(),
        )
        .await
    {
        Ok(processed) => processed,
        Err(e) => {
            let status = e.status_code();
            error!("Conversion failed with status {}: {}", status, e);
            return Err(anyhow::Error::new(e).context(format!("Conversion failed ({})", status)));
        }
    };

    for warning in processed.state.get_warnings() {
        warn!("{}", warning.message);
    }

    let document = if args.pretty {
        serde_json::to_string_pretty(&processed.model)
    } else {
        serde_json::to_string(&processed.model)
    }
    .context("Failed to serialize Canteen Model")?;

    match &args.output {
        Some(path) => {
            fs::write(path, document)
                .with_context(|| format!("Failed to write document to: {}", path.display()))?;
            info!("Wrote Canteen Model to {}", path.display());
        }
        None => println!("{}", document),
    }

    info!(
        "Processing completed successfully: {} catalog items",
        processed.model.market.product_catalog.len()
    );
    Ok(())
}

fn generate_definition_command(preset: Option<&str>, output: &PathBuf) -> Result<()> {
    let template = DefinitionTemplate::from_name(preset)?;

    info!("Generating {} column definition...", template);

    // if output is a directory, append the default file name
    let full_file_output_path = if output.is_dir() {
        output.join(template.default_file_name())
    } else {
        output.into()
    };

    fs::write(&full_file_output_path, template.contents()).context(format!(
        "Failed to write column definition to: {}",
        output.display()
    ))?;

    info!(
        "Successfully generated column definition at: {}",
        full_file_output_path.display()
    );
    Ok(())
}

fn validate_definition_command(definition_path: &PathBuf) -> Result<()> {
    info!("Validating column definition...");

    // Verify definition file exists
    if !definition_path.exists() {
        anyhow::bail!(
            "Column definition not found: {}",
            definition_path.display()
        );
    }

    let bytes = fs::read(definition_path)?;
    let definition = ColumnDefinition::from_slice(&bytes)
        .context("Failed to parse column definition. See errors for additional details:")?;

    definition
        .validate()
        .context("Failed to validate column definition")?;

    info!("Column definition validation successful");
    info!("Entries: {}", definition.mappings().len());
    Ok(())
}
