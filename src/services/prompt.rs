use crate::models::{ConversionInput, Preferences};
use crate::services::ai_service::Part;

/// Follows an inline image so the model knows what to do with it.
pub const IMAGE_INSTRUCTION: &str = "Extract and convert this recipe based on the following instructions.";

/// Prompt parts for one conversion: the input first, the task directive last.
pub fn build_parts(input: &ConversionInput, prefs: &Preferences) -> Vec<Part> {
    let mut parts = match input {
        ConversionInput::Image { content, mime_type } => vec![
            Part::InlineData {
                mime_type: mime_type.clone(),
                data: content.clone(),
            },
            Part::Text(IMAGE_INSTRUCTION.to_string()),
        ],
        ConversionInput::Text { content } => {
            vec![Part::Text(format!("Original Recipe Input: \"{}\"", content))]
        }
    };

    parts.push(Part::Text(task_directive(prefs)));
    parts
}

pub fn task_directive(prefs: &Preferences) -> String {
    format!(
        "You are a professional chef and nutritionist AI.\n\
         \n\
         Task: Analyze the provided recipe input (text or image) and convert/rewrite it to strictly follow these preferences:\n\
         - Dietary Requirement: {}\n\
         - Regional Cuisine Style: {} (Adapt spices and techniques accordingly if not 'Original')\n\
         - Target Servings: {} (Scale ingredients accurately)\n\
         - Optimization Goal: {} (e.g., if Budget, swap for cheaper ingredients; if Healthy, reduce sugar/fats).\n\
         \n\
         If 'Regional Cuisine Style' is Indian, use local Indian alternatives (e.g., Paneer instead of Tofu/Cheese where appropriate, local vegetables).\n\
         If 'Goal' is Budget, suggest cost-effective swaps.\n\
         \n\
         Provide the output in strict JSON format.",
        prefs.dietary(),
        prefs.region(),
        prefs.servings(),
        prefs.goal(),
    )
}
