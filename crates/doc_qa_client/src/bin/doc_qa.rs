//! doc-qa: terminal front end for Document Q&A.
//! Uploads a document, asks questions from the command line or stdin, prints
//! the answers and optionally saves the generated summary.

use anyhow::Context as _;
use clap::Parser;
use doc_qa_client::config::{self, Config};
use doc_qa_client::{BackendAddress, SelectedFile, Session};
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(
    name = "doc-qa",
    version,
    about = "Upload a text document to the QA backend and ask questions about it."
)]
struct Cli {
    /// Config file (defaults to $DOC_QA_CONFIG, then ~/.doc-qa/config.yaml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Backend base URL, overriding the configured address
    #[arg(long, env = "DOC_QA_BACKEND")]
    backend: Option<String>,

    /// Directory that receives summary.pdf
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Download the summary after answering
    #[arg(long)]
    summary: bool,

    /// Text document to upload
    file: PathBuf,

    /// Question to ask; read one per line from stdin when omitted
    question: Vec<String>,
}

impl Cli {
    fn load_config(&self) -> anyhow::Result<Config> {
        // 1. --config <path> flag
        if let Some(path) = &self.config {
            return config::load(path)
                .with_context(|| format!("failed to load config from {}", path.display()));
        }
        // 2. DOC_QA_CONFIG env var
        if let Some(path) = std::env::var_os("DOC_QA_CONFIG").map(PathBuf::from) {
            return config::load(&path)
                .with_context(|| format!("failed to load config from {}", path.display()));
        }
        // 3. Default path (~/.doc-qa/config.yaml), optional
        match config::default_config_path() {
            Some(path) => config::load_or_default(&path)
                .with_context(|| format!("failed to load config from {}", path.display())),
            None => Ok(Config::default()),
        }
    }

    fn build_session(&self) -> anyhow::Result<Session> {
        let cfg = self.load_config()?;
        let address = match &self.backend {
            Some(url) => BackendAddress::Fixed(url.clone()),
            None => cfg.backend_address(),
        };
        let download_dir = self.out_dir.clone().unwrap_or_else(|| cfg.download_dir());
        let client = doc_qa_client::Client::new(address)?;
        Ok(Session::new(client, download_dir))
    }

    fn questions(&self) -> anyhow::Result<Vec<String>> {
        if !self.question.is_empty() {
            return Ok(vec![self.question.join(" ")]);
        }
        if self.summary && io::stdin().is_terminal() {
            // Summary-only runs do not prompt an interactive terminal.
            return Ok(Vec::new());
        }
        let mut questions = Vec::new();
        for line in io::stdin().lock().lines() {
            let line = line.context("failed to read stdin")?;
            let line = line.trim();
            if !line.is_empty() {
                questions.push(line.to_string());
            }
        }
        Ok(questions)
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let session = cli.build_session()?;
    log::debug!("backend at {}", session.client().address().base_url());

    let stdout = io::stdout();

    session.select_file(SelectedFile::from_path(&cli.file));
    let notice = session.upload_document().await?;
    writeln!(stdout.lock(), "{}", notice)?;

    for question in cli.questions()? {
        session.set_question(question);
        let answer = session.submit_question().await?;
        writeln!(stdout.lock(), "{}", answer)?;
    }

    if cli.summary {
        let notice = session.download_summary().await?;
        writeln!(stdout.lock(), "{}", notice)?;
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Error: failed to create runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match rt.block_on(run(cli)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
