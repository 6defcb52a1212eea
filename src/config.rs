use crate::services::splitter::ShortfallPolicy;
use rust_decimal::Decimal;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub engine: EngineSettings,
    pub participants: ParticipantSettings,
    pub application: ApplicationSettings,
}

#[derive(Debug, Deserialize)]
pub struct EngineSettings {
    /// Balances within this distance of zero count as settled.
    #[serde(default = "default_tolerance")]
    pub settlement_tolerance: Decimal,
    #[serde(default)]
    pub shortfall_policy: ShortfallPolicy,
}

/// The fixed participant universe the engine operates over.
#[derive(Debug, Deserialize)]
pub struct ParticipantSettings {
    pub universe: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct ApplicationSettings {
    pub log_level: String,
    #[serde(default)]
    pub log_format: String,
}

fn default_tolerance() -> Decimal {
    Decimal::new(1, 2)
}

impl Settings {
    pub fn new() -> crate::error::Result<Self> {
        let builder = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(config::Environment::with_prefix("APP").separator("__"));

        Ok(builder.build()?.try_deserialize()?)
    }
}
