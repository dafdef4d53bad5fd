use crate::style::Style;

/// Build the refinement prompt sent to the text-generation endpoint.
pub fn refinement_prompt(original: &str, style: Style) -> String {
    format!(
        "You are a prompt engineering expert. Your task is to refine the following prompt \
         according to specific style guidelines.\n\
         \n\
         ORIGINAL PROMPT:\n\
         {original}\n\
         \n\
         STYLE: {name}\n\
         DESCRIPTION: {description}\n\
         INSTRUCTION: {instruction}\n\
         \n\
         IMPORTANT GUIDELINES:\n\
         - Create a SUBSTANTIALLY DIFFERENT and MORE DETAILED version\n\
         - Make the variant feel distinctly different from the original\n\
         - The refined prompt should be substantive enough to provide real value\n\
         \n\
         Refined prompt (respond ONLY with the refined prompt, no explanations or preamble):",
        name = style.display_name(),
        description = style.description(),
        instruction = style.instruction(),
    )
}

/// Deterministic local rewrite used when the outbound call fails: the
/// original text plus a fixed templated suffix per style.
pub fn fallback_rewrite(original: &str, style: Style) -> String {
    let suffix = match style {
        Style::Concise => "Be direct and specific in your response.",
        Style::Detailed => {
            "Provide a comprehensive response with:\n\
             - Detailed explanations\n\
             - Relevant examples\n\
             - Context and background\n\
             - Specific implementation details"
        }
        Style::Creative => {
            "Approach this creatively by:\n\
             - Thinking outside conventional boundaries\n\
             - Using vivid examples and analogies\n\
             - Exploring unexpected angles\n\
             - Presenting ideas in engaging ways"
        }
        Style::Analytical => {
            "Analyze this systematically:\n\
             1. Break down the key components\n\
             2. Examine relationships and dependencies\n\
             3. Identify patterns or frameworks\n\
             4. Structure your response logically with clear reasoning"
        }
    };
    format!("{original}\n\n{suffix}")
}
