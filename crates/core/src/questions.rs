use tracing::warn;

use crate::llm::TextGenerator;
use crate::prompts::render_interview_questions_prompt;

pub const DEFAULT_QUESTION_COUNT: usize = 5;

pub const QUESTION_FAILURE_MESSAGE: &str = "Error generating questions. Please try again.";

pub struct QuestionGenerator<G: TextGenerator> {
    generator: G,
}

impl<G: TextGenerator> QuestionGenerator<G> {
    pub fn new(generator: G) -> Self {
        Self { generator }
    }

    pub async fn generate(&self, resume_text: &str, question_count: usize) -> Vec<String> {
        let prompt = render_interview_questions_prompt(resume_text, question_count);

        match self.generator.generate(&prompt).await {
            Ok(response) => response
                .trim()
                .split('\n')
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect(),
            Err(error) => {
                warn!(%error, "question generation request failed");
                vec![QUESTION_FAILURE_MESSAGE.to_string()]
            }
        }
    }
}
