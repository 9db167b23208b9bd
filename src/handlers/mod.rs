pub mod session;

pub use session::{ConversionOutcome, ConversionSession};
