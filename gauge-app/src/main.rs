use clap::{Parser, ValueEnum};
use color_eyre::eyre::bail;
use gauge_common::observability::{LogConfig, init_logging};
use gauge_common::timing::timed;
use gauge_config::{GaugeConfig, GaugeConfigLoader, LlmConfig};
use gauge_crawl::CrawlApiExtractor;
use gauge_extract::html::HtmlExtractor;
use gauge_extract::{DEFAULT_USER_AGENT, Extractor};
use gauge_llm::openai::OpenAiClient;
use gauge_llm::seo;
use gauge_llm::traits::LlmClient;
use gauge_score::ExtractionRecord;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

use compare::{Comparison, SideResult, Winner};

mod compare;
mod render;

const HTML_STRATEGY: &str = "direct HTML parsing";
const CRAWL_STRATEGY: &str = "the crawl API";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(
    name = "pagegauge",
    about = "Compare direct HTML parsing against a managed crawl API for SEO data extraction"
)]
struct Cli {
    /// Page to extract and score with both strategies.
    url: Url,

    /// Config file (YAML). Defaults to ./pagegauge.yaml when present.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Site niche fed into the LLM report.
    #[arg(long, default_value = "general")]
    niche: String,

    /// Site tagline fed into the LLM report.
    #[arg(long, default_value = "")]
    tagline: String,

    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Generate an LLM SEO report for the winning record.
    #[arg(long)]
    analyze: bool,

    /// Ask the LLM for a head-to-head comparison of the two records.
    #[arg(long)]
    compare: bool,

    /// Skip the managed crawl API even when a key is configured.
    #[arg(long)]
    skip_crawl_api: bool,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let loader = match &cli.config {
        Some(path) => GaugeConfigLoader::new().with_file(path),
        None => GaugeConfigLoader::new().with_optional_file("pagegauge.yaml"),
    };
    let cfg = loader.load()?;

    init_logging(LogConfig::default()).map_err(|e| color_eyre::eyre::eyre!(e.to_string()))?;
    tracing::info!(url = %cli.url, "comparison started");

    let comparison = run_comparison(&cli, &cfg).await?;

    match cli.format {
        Format::Text => println!("{}", render::render_text(&comparison)),
        Format::Json => println!("{}", serde_json::to_string_pretty(&comparison)?),
    }

    if cli.analyze || cli.compare {
        let llm = llm_from_config(&cfg.llm)?;

        if cli.analyze {
            let target = winning_side(&comparison)?;
            let report = seo::seo_report(
                llm.as_ref(),
                &target.record,
                cli.url.as_str(),
                &cli.niche,
                &cli.tagline,
            )
            .await?;
            println!("\n== SEO analysis ({}) ==\n{report}", target.strategy);
        }

        if cli.compare {
            let verdict = seo::compare_extractions(
                llm.as_ref(),
                &comparison.html.record,
                &comparison.crawl.record,
            )
            .await?;
            println!("\n== LLM comparison ==\n{verdict}");
        }
    }

    Ok(())
}

async fn run_comparison(cli: &Cli, cfg: &GaugeConfig) -> color_eyre::Result<Comparison> {
    let fetch_timeout = Duration::from_secs(cfg.fetch.timeout_secs);
    let user_agent = cfg.fetch.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT);

    let html_extractor = HtmlExtractor::new(fetch_timeout, user_agent)?;
    let html_side = run_side(&html_extractor, HTML_STRATEGY, &cli.url).await;

    let crawl_side = if cli.skip_crawl_api {
        SideResult::new(
            CRAWL_STRATEGY,
            ExtractionRecord::failed("crawl api error: skipped"),
            0.0,
        )
    } else {
        let crawl_extractor = CrawlApiExtractor::new(
            cfg.crawl.api_key.clone(),
            cfg.crawl.max_attempts,
            Duration::from_secs(cfg.crawl.timeout_secs),
            cfg.crawl.use_proxy,
            cfg.crawl.base_url.as_deref(),
        )?;
        run_side(&crawl_extractor, CRAWL_STRATEGY, &cli.url).await
    };

    Ok(Comparison::new(&cli.url, html_side, crawl_side))
}

async fn run_side(extractor: &dyn Extractor, label: &str, url: &Url) -> SideResult {
    tracing::info!(strategy = extractor.name(), %url, "extraction started");
    let (mut record, elapsed) = timed(extractor.extract(url)).await;
    if !record.is_failed() {
        record.execution_time = Some(elapsed);
    }
    tracing::info!(
        strategy = extractor.name(),
        elapsed_secs = elapsed,
        failed = record.is_failed(),
        "extraction finished"
    );
    SideResult::new(label, record, elapsed)
}

fn winning_side(comparison: &Comparison) -> color_eyre::Result<&SideResult> {
    match comparison.recommendation.winner {
        Winner::Html | Winner::Tie => Ok(&comparison.html),
        Winner::CrawlApi => Ok(&comparison.crawl),
        Winner::Neither => bail!("both extractions failed; nothing to analyze"),
    }
}

fn llm_from_config(cfg: &Option<LlmConfig>) -> color_eyre::Result<Box<dyn LlmClient>> {
    match cfg {
        Some(LlmConfig::Openai {
            model,
            auth_token,
            endpoint,
        }) => Ok(Box::new(OpenAiClient::new(
            auth_token.clone(),
            model.clone(),
            Some(endpoint),
        )?)),
        None => bail!(
            "no LLM configured: add an `llm:` section to pagegauge.yaml or set GAUGE_LLM__* variables"
        ),
    }
}
