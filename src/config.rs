use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::params::{
    parse_assignment, AiTier, IndustryId, ParamKey, ParameterSet, ParameterStore,
};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub defaults: DefaultsConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub parameters: BTreeMap<String, toml::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default = "default_industry")]
    pub industry: String,
    #[serde(default = "default_tier")]
    pub tier: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_format")]
    pub format: String,
    #[serde(default = "default_chart_width")]
    pub chart_width: usize,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub industry: Option<String>,
    pub tier: Option<String>,
    pub format: Option<String>,
}

impl Config {
    pub fn default_path() -> PathBuf {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home.join(".config/omnichannel-roi/config.toml")
    }

    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path
            .map(|p| p.to_path_buf())
            .unwrap_or_else(Self::default_path);
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = fs::read_to_string(&path)
            .with_context(|| format!("failed reading config: {}", path.display()))?;
        Self::parse(&data).with_context(|| format!("failed parsing TOML config: {}", path.display()))
    }

    pub fn parse(data: &str) -> Result<Self> {
        Ok(toml::from_str(data)?)
    }

    pub fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(industry) = overrides.industry {
            self.defaults.industry = industry;
        }
        if let Some(tier) = overrides.tier {
            self.defaults.tier = tier;
        }
        if let Some(format) = overrides.format {
            self.output.format = format;
        }
    }

    pub fn industry(&self) -> Result<IndustryId> {
        Ok(IndustryId::from_str(&self.defaults.industry)?)
    }

    pub fn tier(&self) -> Result<AiTier> {
        Ok(AiTier::from_str(&self.defaults.tier)?)
    }

    pub fn parameter_overrides(&self) -> Result<Vec<(ParamKey, f64)>> {
        let mut out = Vec::with_capacity(self.parameters.len());
        for (name, value) in &self.parameters {
            let raw = match value {
                toml::Value::Integer(i) => i.to_string(),
                toml::Value::Float(f) => f.to_string(),
                toml::Value::String(s) => s.clone(),
                other => anyhow::bail!("parameter {name} must be a number, got {other}"),
            };
            let assignment = parse_assignment(&format!("{name}={raw}"))
                .with_context(|| format!("invalid [parameters] entry: {name}"))?;
            out.push(assignment);
        }
        Ok(out)
    }

    pub fn initial_store(&self) -> Result<ParameterStore> {
        let mut store = ParameterStore::from_preset(self.industry()?).select_tier(self.tier()?);
        for (key, value) in self.parameter_overrides()? {
            store = store.enter_field(key, value);
        }
        Ok(store)
    }

    pub fn write_template(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("failed creating config directory: {}", parent.display())
            })?;
        }
        fs::write(path, Self::default_template())
            .with_context(|| format!("failed writing config template: {}", path.display()))
    }

    pub fn default_template() -> String {
        let template = r#"[defaults]
# general, home_services, healthcare_practice, real_estate
industry = "general"
# basic or enterprise
tier = "basic"

[output]
# table, json or csv
format = "table"
chart_width = 40
log_level = "warn"

# Per-field overrides applied after the preset. Run `fields` for names.
[parameters]
# human_hourly_cost = 32
# ai_handling_percentage = 75
"#;
        template.to_string()
    }
}

// A parameter file without `ai_tier` takes the configured tier instead of Basic.
pub fn parse_parameter_file(data: &str, default_tier: AiTier) -> Result<ParameterSet> {
    let value: serde_json::Value = serde_json::from_str(data)?;
    let has_tier = value.get("ai_tier").is_some();
    let mut params: ParameterSet = serde_json::from_value(value)?;
    if !has_tier {
        params.ai_tier = default_tier;
    }
    Ok(params)
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            industry: default_industry(),
            tier: default_tier(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            chart_width: default_chart_width(),
            log_level: default_log_level(),
        }
    }
}

fn default_industry() -> String {
    IndustryId::General.as_slug().to_string()
}

fn default_tier() -> String {
    AiTier::Basic.as_slug().to_string()
}

fn default_format() -> String {
    "table".to_string()
}

fn default_chart_width() -> usize {
    40
}

fn default_log_level() -> String {
    "warn".to_string()
}

#[cfg(test)]
mod tests {
    use crate::config::{parse_parameter_file, Config, ConfigOverrides};
    use crate::params::{AiTier, IndustryId, ParamKey, ParameterSource};

    #[test]
    fn template_parses_to_defaults() {
        let config = Config::parse(&Config::default_template()).expect("template parses");
        assert_eq!(config.industry().expect("industry"), IndustryId::General);
        assert_eq!(config.tier().expect("tier"), AiTier::Basic);
        assert_eq!(config.output.chart_width, 40);
        assert!(config.parameters.is_empty());
    }

    #[test]
    fn reads_parameter_overrides() {
        let config = Config::parse(
            r#"
[defaults]
industry = "real-estate"

[parameters]
human_hourly_cost = 45
aiHandlingPercentage = "65%"
voice_show_up_rate = 250.0
"#,
        )
        .expect("config parses");

        let overrides = config.parameter_overrides().expect("overrides");
        assert_eq!(overrides.len(), 3);

        let store = config.initial_store().expect("store");
        assert_eq!(store.source(), ParameterSource::Preset(IndustryId::RealEstate));
        assert_eq!(store.snapshot().get(ParamKey::HumanHourlyCost), 45.0);
        assert_eq!(store.snapshot().ai_handling_percentage, 65.0);
        assert_eq!(store.snapshot().voice.funnel.show_up, 100.0);
    }

    #[test]
    fn rejects_unknown_parameters() {
        let config = Config::parse("[parameters]\nsnack_budget = 10\n").expect("config parses");
        assert!(config.parameter_overrides().is_err());
    }

    #[test]
    fn overrides_win_over_file_values() {
        let mut config = Config::default();
        config.apply_overrides(ConfigOverrides {
            industry: Some("healthcare".to_string()),
            tier: Some("enterprise".to_string()),
            format: None,
        });
        assert_eq!(config.industry().expect("industry"), IndustryId::HealthcarePractice);
        assert_eq!(config.tier().expect("tier"), AiTier::Enterprise);
        assert_eq!(config.output.format, "table");
    }

    #[test]
    fn parameter_file_without_tier_keeps_the_configured_one() {
        let params = parse_parameter_file(r#"{"avg_revenue_per_sale": 800}"#, AiTier::Enterprise)
            .expect("parameter file parses");
        assert_eq!(params.ai_tier, AiTier::Enterprise);
        assert_eq!(params.avg_revenue_per_sale, 800.0);

        let params = parse_parameter_file(r#"{"ai_tier": "basic"}"#, AiTier::Enterprise)
            .expect("parameter file parses");
        assert_eq!(params.ai_tier, AiTier::Basic);

        assert!(parse_parameter_file("not json", AiTier::Basic).is_err());
    }
}
