// Prompt templates for tutoring and study-material tasks
// Author: kelexine (https://github.com/kelexine)

use super::explanation::ExplanationRequest;
use super::processing::ContentTask;
use crate::content::ContentChunk;

pub const TUTOR_SYSTEM_PROMPT: &str = "You are a patient tutor. Explain concepts clearly and \
concisely for a student, correcting misconceptions without being condescending.";

pub const MATERIAL_SYSTEM_PROMPT: &str = "You turn course material into study aids. Use only \
the material provided and keep the original terminology.";

pub fn explanation_prompt(request: &ExplanationRequest) -> String {
    let mut prompt = String::new();
    if let Some(subject) = &request.subject {
        prompt.push_str(&format!("Subject: {}\n", subject));
    }
    prompt.push_str(&format!("Question: {}\n", request.question));
    prompt.push_str(&format!("Student answer: {}\n", request.user_answer));

    match &request.correct_answer {
        Some(correct) if correct.trim() == request.user_answer.trim() => {
            prompt.push_str(&format!("Correct answer: {}\n\n", correct));
            prompt.push_str("The student is correct. Explain why this answer is right and reinforce the key idea.");
        }
        Some(correct) => {
            prompt.push_str(&format!("Correct answer: {}\n\n", correct));
            prompt.push_str(
                "The student is incorrect. Explain why the correct answer is right and \
                 where the student's reasoning likely went wrong.",
            );
        }
        None => {
            prompt.push('\n');
            prompt.push_str("Evaluate the student's answer and explain the reasoning behind the best answer.");
        }
    }

    prompt
}

pub fn chunk_prompt(task: &ContentTask, chunk: &ContentChunk) -> String {
    let instruction = match task {
        ContentTask::Summary => {
            "Summarize the following material as concise bullet points.".to_string()
        }
        ContentTask::Quiz { questions_per_chunk } => format!(
            "Write {} multiple-choice questions with four options each about the following \
             material. Mark the correct option and give a one-sentence explanation.",
            questions_per_chunk
        ),
        ContentTask::Flashcards => {
            "Write flashcards for the following material, one per line as `front | back`."
                .to_string()
        }
    };

    format!(
        "{}\nTopics: {}\n\n---\n{}\n---",
        instruction,
        chunk.topics.join(", "),
        chunk.content
    )
}
