pub mod embedder;
pub mod error;
pub mod fields;
pub mod llm;
pub mod pdf;
pub mod prompts;
pub mod questions;
pub mod ranker;
pub mod skills;

pub use embedder::{
    Embedder, HashedNgramEmbedder, OnnxEmbedder, DEFAULT_EMBEDDING_DIMENSIONS, MAX_SEQUENCE_TOKENS,
};
pub use error::{EmbedError, GenerateError};
pub use fields::{
    extract_with_patterns, CandidateRecord, FieldExtractor, EMPTY_WORK_EXPERIENCE, SKILLS_FALLBACK,
    UNKNOWN_FIELD, WORK_EXPERIENCE_FALLBACK,
};
pub use llm::{GeminiClient, TextGenerator, GENERATION_MODEL};
pub use pdf::{discover_resume_files, extract_pdf_text};
pub use prompts::{render_detail_extraction_prompt, render_interview_questions_prompt};
pub use questions::{QuestionGenerator, DEFAULT_QUESTION_COUNT, QUESTION_FAILURE_MESSAGE};
pub use ranker::{cosine_similarity, CandidateRanker, Ranking};
pub use skills::normalize_skills;
