mod report;

use std::fs;
use std::path::Path;

use anyhow::{bail, Context};
use chrono::Utc;
use clap::{Parser, Subcommand};
use resume_screen_core::{
    discover_resume_files, extract_pdf_text, CandidateRanker, FieldExtractor, GeminiClient,
    OnnxEmbedder, QuestionGenerator, DEFAULT_EMBEDDING_DIMENSIONS, DEFAULT_QUESTION_COUNT,
};
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use report::{build_rows, write_csv, write_xlsx};

#[derive(Parser)]
#[command(name = "resume-screen", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Credential for the generation service.
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,
}

#[derive(Subcommand)]
enum Command {
    /// Extract, rank, and tabulate a folder of resumes against a job description.
    Analyze {
        /// Text file holding the job description.
        #[arg(long)]
        job_description: String,
        /// Folder that contains resume PDFs recursively.
        #[arg(long)]
        resumes: String,
        /// Directory holding model.onnx and tokenizer.json.
        #[arg(long, default_value = "models/embedding")]
        model_dir: String,
        /// Embedding width of the model.
        #[arg(long, default_value_t = DEFAULT_EMBEDDING_DIMENSIONS)]
        embedding_dimensions: usize,
        /// Write the ranked table to this xlsx spreadsheet.
        #[arg(long)]
        export: Option<String>,
        /// Also write the ranked table to this CSV file.
        #[arg(long)]
        export_csv: Option<String>,
        /// Generate interview questions for the candidate at this rank (1-based).
        #[arg(long)]
        questions_for_rank: Option<usize>,
        /// Number of questions to request.
        #[arg(long, default_value_t = DEFAULT_QUESTION_COUNT)]
        question_count: usize,
    },
    /// Generate interview questions for a single resume.
    Questions {
        /// Path to one resume PDF.
        #[arg(long)]
        resume: String,
        /// Number of questions to request.
        #[arg(long, default_value_t = DEFAULT_QUESTION_COUNT)]
        question_count: usize,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let app_version = env!("CARGO_PKG_VERSION");

    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer())
        .init();

    let Cli { command, api_key } = Cli::parse();
    let client = GeminiClient::new(api_key);

    info!(
        version = app_version,
        started_at = %Utc::now().to_rfc3339(),
        "resume-screen boot"
    );

    match command {
        Command::Analyze {
            job_description,
            resumes,
            model_dir,
            embedding_dimensions,
            export,
            export_csv,
            questions_for_rank,
            question_count,
        } => {
            let description = fs::read_to_string(&job_description)
                .with_context(|| format!("reading job description {job_description}"))?;
            let description = description.trim().to_string();
            if description.is_empty() {
                bail!("job description is empty: {job_description}");
            }

            let folder = Path::new(&resumes);
            let files = discover_resume_files(folder);
            if files.is_empty() {
                bail!("no pdf files found in {}", folder.display());
            }

            let extractor = FieldExtractor::new(client.clone());
            let mut texts = Vec::with_capacity(files.len());
            let mut records = Vec::with_capacity(files.len());

            for path in &files {
                info!(path = %path.display(), "processing resume");
                let text = extract_pdf_text(path);
                if text.is_empty() {
                    warn!(path = %path.display(), "no text extracted, treating resume as blank");
                }

                let record = extractor.extract(&text).await;
                texts.push(text);
                records.push(record);
            }

            info!(resume_count = texts.len(), "ranking resumes");

            let embedder = OnnxEmbedder::load(Path::new(&model_dir), embedding_dimensions)?;
            let ranker = CandidateRanker::new(embedder);
            let ranking = ranker.rank(&description, &texts)?;

            let rows = build_rows(&ranking, &records);
            for row in &rows {
                println!("[{}] {} score={}", row.rank, row.name, row.score);
                println!("  phone={}", row.phone);
                println!("  email={}", row.email);
                println!("  skills={}", row.skills);
                println!("  work_experience={}", row.work_experience);
            }

            if let Some(export_path) = export {
                write_xlsx(Path::new(&export_path), &rows)
                    .with_context(|| format!("writing spreadsheet export {export_path}"))?;
                println!(
                    "{} candidates exported to {} at {}",
                    rows.len(),
                    export_path,
                    Utc::now().to_rfc3339()
                );
            }

            if let Some(export_path) = export_csv {
                write_csv(Path::new(&export_path), &rows)
                    .with_context(|| format!("writing csv export {export_path}"))?;
                println!(
                    "{} candidates exported to {} at {}",
                    rows.len(),
                    export_path,
                    Utc::now().to_rfc3339()
                );
            }

            if let Some(rank) = questions_for_rank {
                if rank == 0 || rank > ranking.order.len() {
                    bail!("rank {} is out of range 1..={}", rank, ranking.order.len());
                }

                let index = ranking.order[rank - 1];
                let generator = QuestionGenerator::new(client.clone());
                let generated = generator.generate(&texts[index], question_count).await;

                println!("Generated questions for {}:", records[index].full_name);
                for question in generated {
                    println!("- {question}");
                }
            }
        }
        Command::Questions {
            resume,
            question_count,
        } => {
            let path = Path::new(&resume);
            let text = extract_pdf_text(path);
            if text.is_empty() {
                warn!(path = %path.display(), "no text extracted, generating from blank profile");
            }

            let generator = QuestionGenerator::new(client);
            let generated = generator.generate(&text, question_count).await;

            for question in generated {
                println!("- {question}");
            }
        }
    }

    Ok(())
}
