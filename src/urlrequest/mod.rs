//! URL handling and the synthesizer entry point.
//!
//! - [`normalize`]: raw string to [`NormalizedUrl`], never failing
//! - [`CookieHeaderSynthesizer`]: normalize, query every source, merge
//! - [`SynthesizerConfig`]: timeouts, default scheme and the source list

mod config;
mod normalize;
mod synthesizer;

pub use config::{SourceConfig, SynthesizerConfig, DEFAULT_QUERY_TIMEOUT};
pub use normalize::{normalize, normalize_with_scheme, NormalizedUrl, DEFAULT_SCHEME};
pub use synthesizer::CookieHeaderSynthesizer;
