pub mod ai_service; // GenerativeModel trait
pub mod converter;
pub mod gemini; // Google Gemini client
pub mod prompt;
pub mod schema;
pub mod validation;

pub use ai_service::GenerativeModel;
pub use converter::RecipeConverter;
pub use gemini::GeminiService;
