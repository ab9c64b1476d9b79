use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use log::info;

use report_enricher::{
    insight_collection_schema, load_report, write_json, EnricherConfig, InsightSynthesizer,
    OpenAiClient, ReportWalker,
};

const DEFAULT_DATA_DIR: &str = "client/public/data";
const REPORT_FILE: &str = "latest-report.json";
const REPORT_EN_FILE: &str = "latest-report.en.json";
const INSIGHTS_FILE: &str = "insights.json";
const INSIGHTS_EN_FILE: &str = "insights.en.json";

#[derive(Parser, Debug)]
#[command(
    name = "report-enricher",
    version,
    about = "Translate the latest report and generate strategic insights for the dashboard"
)]
struct Cli {
    #[arg(
        long,
        global = true,
        default_value = DEFAULT_DATA_DIR,
        help = "Directory holding the dashboard's JSON data files"
    )]
    data_dir: PathBuf,
    #[arg(long, global = true, help = "Model id (overrides REPORT_ENRICHER_MODEL)")]
    model: Option<String>,
    #[arg(long, global = true, help = "API base URL (overrides OPENAI_BASE_URL)")]
    base_url: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Translate the report into English
    Translate {
        input: Option<PathBuf>,
        output: Option<PathBuf>,
    },
    /// Generate insights and their English translation
    Insights {
        #[arg(long)]
        report: Option<PathBuf>,
        #[arg(long)]
        output: Option<PathBuf>,
        #[arg(long)]
        output_en: Option<PathBuf>,
    },
    /// Run `translate` and then `insights` with default paths
    All,
    /// Print the JSON Schema of the insight collection
    Schema,
}

impl Cli {
    fn data_file(&self, name: &str) -> PathBuf {
        self.data_dir.join(name)
    }

    fn config(&self) -> anyhow::Result<EnricherConfig> {
        let mut config = EnricherConfig::from_env()?;
        if let Some(model) = &self.model {
            config = config.with_model(model);
        }
        if let Some(base_url) = &self.base_url {
            config = config.with_base_url(base_url);
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Schema => {
            println!("{}", serde_json::to_string_pretty(&insight_collection_schema())?);
        }
        Commands::Translate { input, output } => {
            let config = cli.config()?;
            let client = OpenAiClient::from_config(&config);
            let input = input.clone().unwrap_or_else(|| cli.data_file(REPORT_FILE));
            let output = output.clone().unwrap_or_else(|| cli.data_file(REPORT_EN_FILE));
            translate(&client, &config, &input, &output).await?;
        }
        Commands::Insights {
            report,
            output,
            output_en,
        } => {
            let config = cli.config()?;
            let client = OpenAiClient::from_config(&config);
            let report = report.clone().unwrap_or_else(|| cli.data_file(REPORT_FILE));
            let output = output.clone().unwrap_or_else(|| cli.data_file(INSIGHTS_FILE));
            let output_en = output_en
                .clone()
                .unwrap_or_else(|| cli.data_file(INSIGHTS_EN_FILE));
            insights(&client, &config, &report, &output, &output_en).await?;
        }
        Commands::All => {
            let config = cli.config()?;
            let client = OpenAiClient::from_config(&config);
            let report = cli.data_file(REPORT_FILE);
            translate(&client, &config, &report, &cli.data_file(REPORT_EN_FILE)).await?;
            insights(
                &client,
                &config,
                &report,
                &cli.data_file(INSIGHTS_FILE),
                &cli.data_file(INSIGHTS_EN_FILE),
            )
            .await?;
        }
    }

    Ok(())
}

async fn translate(
    client: &OpenAiClient,
    config: &EnricherConfig,
    input: &Path,
    output: &Path,
) -> anyhow::Result<()> {
    let report = load_report(input)?;
    let walker = ReportWalker::new(client, config.profiles);
    let translated = walker
        .translate_report(&report)
        .await
        .with_context(|| format!("translating {}", input.display()))?;

    write_json(output, &translated)?;
    info!("Translated report saved to {}", output.display());
    Ok(())
}

async fn insights(
    client: &OpenAiClient,
    config: &EnricherConfig,
    report_path: &Path,
    output: &Path,
    output_en: &Path,
) -> anyhow::Result<()> {
    let report = load_report(report_path)?;
    let synthesizer = InsightSynthesizer::new(client, config.profiles);

    let source = synthesizer
        .synthesize(&report)
        .await
        .context("generating insights")?;
    write_json(output, &source)?;
    info!("{} insights saved to {}", source.len(), output.display());

    let translated = synthesizer
        .translate_collection(&source)
        .await
        .context("translating insights")?;
    write_json(output_en, &translated)?;
    info!("{} EN insights saved to {}", translated.len(), output_en.display());

    Ok(())
}
