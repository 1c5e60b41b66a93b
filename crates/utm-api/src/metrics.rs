//! Prometheus counters served at `/metrics`.
use prometheus::{Encoder, IntCounter, IntCounterVec, Opts, Registry, TextEncoder};

pub struct Metrics {
    registry: Registry,
    pub compositions: IntCounter,
    pub compose_rejections: IntCounter,
    pub hint_commits: IntCounter,
    pub validation_failures: IntCounterVec,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let compositions = IntCounter::new("utm_compositions_total", "Links composed")?;
        let compose_rejections = IntCounter::new(
            "utm_compose_rejections_total",
            "Compose requests that could not produce a link",
        )?;
        let hint_commits = IntCounter::new("utm_hint_commits_total", "Hint history commits")?;
        let validation_failures = IntCounterVec::new(
            Opts::new("utm_validation_failures_total", "Field values failing validation"),
            &["field", "kind"],
        )?;

        registry.register(Box::new(compositions.clone()))?;
        registry.register(Box::new(compose_rejections.clone()))?;
        registry.register(Box::new(hint_commits.clone()))?;
        registry.register(Box::new(validation_failures.clone()))?;

        Ok(Self {
            registry,
            compositions,
            compose_rejections,
            hint_commits,
            validation_failures,
        })
    }

    pub fn encode(&self) -> Result<String, prometheus::Error> {
        encode(&self.registry)
    }
}

pub fn encode(registry: &Registry) -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();
    encoder.encode(&registry.gather(), &mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer).to_string())
}
