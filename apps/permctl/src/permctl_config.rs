use gazette_application::{CodecConfig, DecodeMode};
use gazette_core::AppResult;
use tracing_subscriber::EnvFilter;

/// Loads codec settings from environment variables, with `--strict` taking precedence.
pub fn load_codec_config(
    strict_flag: bool,
    env_lookup: &dyn Fn(&str) -> Option<String>,
) -> AppResult<CodecConfig> {
    let mut config = CodecConfig::from_lookup(env_lookup)?;
    if strict_flag {
        config.decode_mode = DecodeMode::Strict;
    }

    Ok(config)
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
