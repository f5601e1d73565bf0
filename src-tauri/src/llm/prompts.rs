//! Prompt templates and fallback replies for the hosted model.

/// Reply when the chat call fails outright.
pub const CHAT_ERROR_FALLBACK: &str = "I'm having trouble connecting to my brain right now.";

/// Reply when the chat call succeeds but produces no text.
pub const CHAT_EMPTY_FALLBACK: &str = "I'm not sure how to respond to that.";

pub const INSIGHT_ERROR_FALLBACK: &str = "Failed to get AI insight.";
pub const INSIGHT_EMPTY_FALLBACK: &str = "No description generated.";

/// Chat prompt: the user's question about the model they are viewing.
pub fn build_chat_prompt(user_message: &str, model_name: &str) -> String {
    format!(
        "User is viewing a 3D model of {model_name} in an AR viewer.\n\
         User asks: \"{user_message}\".\n\
         Provide a helpful, concise response about using AR or the model itself."
    )
}

/// One-shot marketing blurb for a model.
pub fn build_describe_prompt(model_name: &str, description: &str) -> String {
    format!(
        "I have a 3D model called \"{model_name}\". Its technical description is: \"{description}\".\n\
         Can you give me a brief, catchy, 2-sentence marketing description for this object to be used in an AR app?"
    )
}
