use std::fs;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use owo_colors::OwoColorize;
use siterate_core::{
    AnalysisMode, Analyzer, AnalyzerConfig, JsonConfig, OpenAiJudge, SiteReport, TextConfig, convert_to_json,
    convert_to_text, fetch_file, fetch_stdin,
};

mod echo;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Output format for the report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid format: {}. Valid options: text, json", s)),
        }
    }
}

/// Rate the design, SEO and content quality of a web page
#[derive(Parser, Debug)]
#[command(name = "siterate")]
#[command(version)]
#[command(about = "Rate the design, SEO and content quality of a web page", long_about = None)]
struct Args {
    /// URL to analyze, local HTML file, or "-" for stdin
    #[arg(value_name = "INPUT")]
    input: String,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text", value_name = "FORMAT")]
    format: OutputFormat,

    /// Tone of the AI judgment (professional, roast)
    #[arg(short, long, default_value = "professional", value_name = "MODE")]
    mode: AnalysisMode,

    /// Also score the page with the OpenAI judge (needs OPENAI_API_KEY)
    #[arg(long)]
    ai: bool,

    /// Check the first outbound links and report their status
    #[arg(long)]
    check_links: bool,

    /// Source URL to report for file or stdin input
    #[arg(long, value_name = "URL")]
    url: Option<String>,

    /// HTTP timeout in seconds
    #[arg(long, default_value = "10", value_name = "SECS")]
    timeout: u64,

    /// Custom User-Agent for HTTP requests
    #[arg(long, value_name = "UA")]
    user_agent: Option<String>,

    /// Hide per-category issue lists in text output
    #[arg(long)]
    no_issues: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    /// Anything that is not stdin, an existing path, or an `.html` file name is treated as a URL.
    fn is_remote(&self) -> bool {
        let lower = self.input.to_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            return true;
        }
        self.input != "-"
            && !PathBuf::from(&self.input).exists()
            && !(lower.ends_with(".html") || lower.ends_with(".htm"))
    }

    fn analyzer_config(&self) -> AnalyzerConfig {
        let mut builder = AnalyzerConfig::builder()
            .timeout(self.timeout)
            .mode(self.mode)
            .check_links(self.check_links);
        if let Some(user_agent) = &self.user_agent {
            builder = builder.user_agent(user_agent.clone());
        }
        builder.build()
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.verbose {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "siterate_core=debug".into()),
            )
            .with_writer(std::io::stderr)
            .init();
        echo::print_banner();
        echo::print_info("Debug logging enabled");
        eprintln!();
    }

    let started = Instant::now();
    let config = args.analyzer_config();

    let report = if args.ai {
        let judge = OpenAiJudge::from_env().context("AI scoring requested but the OpenAI judge is not configured")?;
        if args.verbose {
            echo::print_info(&format!("AI judge: {} ({} mode)", judge.model(), args.mode));
        }
        run(&args, Analyzer::with_judge(config, judge)).await?
    } else {
        run(&args, Analyzer::with_config(config)).await?
    };

    if args.verbose {
        echo::print_step(3, 3, "Writing report");
        echo::print_summary(&report);
        echo::print_timing("Total", started.elapsed());
        eprintln!();
    }

    let output = match args.format {
        OutputFormat::Text => {
            let config = TextConfig { include_issues: !args.no_issues, ..Default::default() };
            convert_to_text(&report, &config)
        }
        OutputFormat::Json => convert_to_json(&report, &JsonConfig { pretty: true }).context("Failed to render JSON")?,
    };

    match &args.output {
        Some(path) => {
            fs::write(path, format!("{}\n", output))
                .with_context(|| format!("Failed to write to file: {}", path.display()))?;
            echo::print_success(&format!("Report written to {}", path.display().bright_white()));
        }
        None => println!("{}", output),
    }

    Ok(())
}

async fn run<J: siterate_core::Judge>(args: &Args, analyzer: Analyzer<J>) -> anyhow::Result<SiteReport> {
    if args.is_remote() {
        if args.verbose {
            echo::print_step(1, 3, &format!("Fetching {}", args.input.bright_white().underline()));
            echo::print_step(2, 3, "Scoring page");
        }
        return analyzer
            .analyze(&args.input)
            .await
            .with_context(|| format!("Failed to analyze {}", args.input));
    }

    let html = if args.input == "-" {
        if args.verbose {
            echo::print_step(1, 3, "Reading from stdin");
        }
        fetch_stdin().context("Failed to read from stdin")?
    } else {
        if args.verbose {
            echo::print_step(1, 3, &format!("Reading from file {}", args.input.bright_white()));
        }
        fetch_file(&args.input).with_context(|| format!("Failed to read file: {}", args.input))?
    };

    if args.verbose {
        eprintln!("  {} {}", "Size:".dimmed(), echo::format_size(html.len()).bright_white());
        echo::print_step(2, 3, "Scoring page");
    }

    let source = match &args.url {
        Some(url) => siterate_core::normalize_url(url)?.to_string(),
        None if args.input == "-" => "stdin".to_string(),
        None => args.input.clone(),
    };
    analyzer
        .analyze_html(&source, 200, &html)
        .await
        .with_context(|| format!("Failed to analyze {}", source))
}
