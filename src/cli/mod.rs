use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use crate::clients::anthropic::{AnthropicClient, MessagesApi};
use crate::core::Result;
use crate::domain::{Question, Source};
use crate::infra::config::{Config, FileConfig};
use crate::research::{ResearchAgent, RULE};

const QUIT_WORDS: [&str; 3] = ["quit", "exit", "q"];

#[derive(Parser, Debug)]
#[command(name = "research-agent")]
#[command(about = "Answer research questions from PubMed and Scholar Gateway via the MCP connector")]
#[command(version)]
pub struct Cli {
    /// Research question; omit to start an interactive session
    pub question: Vec<String>,

    /// Literature source to answer from
    #[arg(short, long, value_enum, default_value_t = Source::Pubmed)]
    pub source: Source,

    /// Hide progress and tool activity
    #[arg(short, long)]
    pub quiet: bool,

    /// Model override
    #[arg(long)]
    pub model: Option<String>,

    /// Maximum output tokens override
    #[arg(long)]
    pub max_tokens: Option<u32>,

    /// Force the model to call at least one tool
    #[arg(long)]
    pub require_tools: bool,

    /// Carry earlier questions and answers into later interactive questions
    #[arg(long)]
    pub keep_history: bool,

    /// TOML file with base_url, model, max_tokens, timeout_secs
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

pub async fn run() -> ExitCode {
    let cli = Cli::parse();
    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut out = std::io::stdout();
    run_with(cli, |k| std::env::var(k).ok(), &mut input, &mut out).await
}

/// Entry point with injectable environment and console.
pub async fn run_with<F>(cli: Cli, lookup: F, input: &mut dyn BufRead, out: &mut dyn Write) -> ExitCode
where
    F: Fn(&str) -> Option<String>,
{
    match execute(cli, lookup, input, out).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, pre_flight = e.is_pre_flight(), "research failed");
            eprintln!("❌ {e}");
            ExitCode::FAILURE
        }
    }
}

async fn execute<F>(cli: Cli, lookup: F, input: &mut dyn BufRead, out: &mut dyn Write) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    let file = match &cli.config {
        Some(path) => FileConfig::load(path)?,
        None => FileConfig::default(),
    };
    let mut cfg = Config::layered(file, lookup)?;
    if let Some(model) = cli.model {
        cfg.model = model;
    }
    if let Some(max_tokens) = cli.max_tokens {
        cfg.max_tokens = max_tokens;
    }
    cfg.validate()?;

    let client = AnthropicClient::from_config(&cfg)?;
    let mut agent = ResearchAgent::from_config(client, cli.source, &cfg)?
        .verbose(!cli.quiet)
        .require_tool_use(cli.require_tools)
        .keep_history(cli.keep_history);
    tracing::info!(source = %cli.source, model = %cfg.model, "BOOT research-agent");

    if !cli.quiet {
        print_header(out, cli.source)?;
    }

    if cli.question.is_empty() {
        let asked = interactive(&mut agent, input, out).await?;
        tracing::info!(questions = asked, "session ended");
        Ok(())
    } else {
        let question = Question::new(cli.question.join(" "))?;
        answer_one(&mut agent, &question, out).await
    }
}

fn print_header(out: &mut dyn Write, source: Source) -> std::io::Result<()> {
    writeln!(out, "\n{RULE}")?;
    writeln!(out, "  {}", source.title())?;
    writeln!(out, "  {}", source.tagline())?;
    writeln!(out, "  Powered by Anthropic MCP Connector")?;
    writeln!(out, "{RULE}\n")
}

fn example_questions(source: Source) -> &'static [&'static str] {
    match source {
        Source::Pubmed => &[
            "What are the latest treatments for Type 2 diabetes?",
            "What is the evidence for mRNA vaccines in cancer treatment?",
        ],
        Source::Scholar => &[
            "What are recent advances in organic solar cells?",
            "What does the research say about remote work productivity?",
        ],
        Source::All => &[
            "What are the latest treatments for Type 2 diabetes?",
            "What papers discuss polymer nanoparticles for drug delivery?",
            "What are recent advances in organic solar cells?",
        ],
    }
}

pub fn is_quit(line: &str) -> bool {
    let line = line.trim();
    line.is_empty() || QUIT_WORDS.iter().any(|w| line.eq_ignore_ascii_case(w))
}

/// Run one question and print its answer under a banner.
pub async fn answer_one<C: MessagesApi>(
    agent: &mut ResearchAgent<C>,
    question: &Question,
    out: &mut dyn Write,
) -> Result<()> {
    let answer = agent.ask(question, out).await?;
    writeln!(out, "\n{RULE}\n  Answer\n{RULE}\n")?;
    writeln!(out, "{answer}")?;
    out.flush()?;
    Ok(())
}

/// Read questions until EOF, an empty line, or a quit word. Returns how many
/// questions were asked. The first failure ends the session.
pub async fn interactive<C: MessagesApi>(
    agent: &mut ResearchAgent<C>,
    input: &mut dyn BufRead,
    out: &mut dyn Write,
) -> Result<usize> {
    writeln!(out, "Enter your research question (empty line or 'quit' to exit):")?;
    let examples = example_questions(agent.source());
    for (i, example) in examples.iter().enumerate() {
        let lead = if i == 0 { "(Examples: " } else { "          " };
        let tail = if i + 1 == examples.len() { ")" } else { "" };
        writeln!(out, "{lead}'{example}'{tail}")?;
    }
    writeln!(out)?;

    let mut asked = 0;
    loop {
        write!(out, "> ")?;
        out.flush()?;
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 || is_quit(&line) {
            break;
        }
        let question = Question::new(line.trim())?;
        answer_one(agent, &question, out).await?;
        asked += 1;
    }
    writeln!(out, "Goodbye.")?;
    Ok(asked)
}
