mod layer;
mod sqlite;

pub use layer::{CachedGenerator, CachedSynthesizer};
pub use sqlite::{CacheManager, response_key, speech_key};
