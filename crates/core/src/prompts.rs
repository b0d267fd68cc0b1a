pub const DETAIL_EXTRACTION_PROMPT: &str = r#"Extract the following details from the resume text:
1. Full Name
2. Phone Number
3. Email Address
4. Work Experience (structured as Company Name, Job Title, Start Date, End Date, and Job Description)
5. Skills (a list of skills)

Resume Text:
{resume_text}

Provide the extracted details in valid JSON format."#;

pub const INTERVIEW_QUESTIONS_PROMPT: &str = r#"Based on the following candidate profile:
{resume_text}

Generate {question_count} specific, job-relevant interview questions to evaluate the candidate's skills and experiences:"#;

pub fn render_detail_extraction_prompt(resume_text: &str) -> String {
    DETAIL_EXTRACTION_PROMPT.replace("{resume_text}", resume_text)
}

pub fn render_interview_questions_prompt(resume_text: &str, question_count: usize) -> String {
    INTERVIEW_QUESTIONS_PROMPT
        .replace("{resume_text}", resume_text)
        .replace("{question_count}", &question_count.to_string())
}

#[cfg(test)]
mod tests {
    use super::{render_detail_extraction_prompt, render_interview_questions_prompt};

    #[test]
    fn extraction_prompt_embeds_resume_verbatim() {
        let prompt = render_detail_extraction_prompt("Jane Doe\nRust developer");

        assert!(prompt.contains("Jane Doe\nRust developer"));
        assert!(prompt.contains("Provide the extracted details in valid JSON format."));
        assert!(!prompt.contains("{resume_text}"));
    }

    #[test]
    fn question_prompt_embeds_count() {
        let prompt = render_interview_questions_prompt("profile text", 7);

        assert!(prompt.contains("Generate 7 specific, job-relevant interview questions"));
        assert!(prompt.contains("profile text"));
        assert!(!prompt.contains("{question_count}"));
    }
}
