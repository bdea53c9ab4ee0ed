//! Print the `Cookie` header a configured set of stores produces for a URL.
//!
//! ```text
//! cargo run --example cookie_header -- cookieheader.json https://www.example.com/
//! ```
//!
//! Set `RUST_LOG=cookieheader=debug` to see each source's answer.

use cookieheader::urlrequest::{CookieHeaderSynthesizer, SynthesizerConfig};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let (Some(config_path), Some(url)) = (args.next(), args.next()) else {
        eprintln!("usage: cookie_header <config.json> <url>");
        return ExitCode::FAILURE;
    };

    let config = match SynthesizerConfig::load(&PathBuf::from(config_path)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("failed to load config: {e}");
            return ExitCode::FAILURE;
        }
    };

    let synthesizer = match CookieHeaderSynthesizer::from_config(&config) {
        Ok(synthesizer) => synthesizer,
        Err(e) => {
            eprintln!("failed to open cookie sources: {e}");
            return ExitCode::FAILURE;
        }
    };

    println!("{}", synthesizer.get_cookie_header_blocking(&url));
    ExitCode::SUCCESS
}
