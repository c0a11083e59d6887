mod error;
mod google;
mod hangul;
mod mock;
mod openai;
mod provider;
mod resolve;

pub use error::TranslateError;
pub use google::{DEFAULT_GOOGLE_ENDPOINT, GoogleTranslator};
pub use hangul::{contains_hangul, is_hangul_syllable};
pub use mock::MockTranslator;
pub use openai::OpenAiTranslator;
pub use provider::{SOURCE_LANGUAGE, TARGET_LANGUAGE, Translator};
pub use resolve::{Resolution, Resolver};
