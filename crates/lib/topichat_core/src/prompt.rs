//! Prompt construction for topic-constrained answers.
//!
//! The off-topic boundary is only an instruction to the model; nothing here
//! classifies the question locally.

/// Refusal the model is told to return verbatim for off-topic questions.
pub fn refusal_sentence(topic: &str) -> String {
    format!("Sorry, that question is outside my current expertise on {topic}.")
}

/// Builds the instruction sent to the model for one `(topic, message)` pair.
pub fn build_prompt(topic: &str, message: &str) -> String {
    let refusal = refusal_sentence(topic);
    format!(
        "You are an AI assistant focused on discussing a specific topic.\n\
         The current topic is: \"{topic}\".\n\
         \n\
         Your goal is to answer the user's questions helpfully and accurately, \
         as long as they are reasonably related to \"{topic}\".\n\
         Questions about people, events, concepts, history, or sub-fields within \
         \"{topic}\" are considered on-topic.\n\
         \n\
         However, if the user asks a question that is clearly *not* related to \
         \"{topic}\", you MUST respond *exactly* with the following phrase and nothing else:\n\
         \"{refusal}\"\n\
         \n\
         Do not apologize further or offer to discuss other things if the question \
         is off-topic. Just use the specified refusal phrase.\n\
         \n\
         User Question: \"{message}\"\n\
         \n\
         Your Answer:"
    )
}
