use std::fmt::{Display, Formatter};

use serde::Serialize;
use tracing::debug;

use crate::params::normalize::coerce;
use crate::params::{AiTier, IndustryId, ParamKey, ParameterSet};

pub fn apply_preset(current: &ParameterSet, industry: IndustryId) -> ParameterSet {
    industry.preset().to_parameters(current.ai_tier)
}

pub fn update_field(current: &ParameterSet, key: ParamKey, value: f64) -> ParameterSet {
    let mut next = *current;
    next.set(key, coerce(value));
    next
}

/// Same as [`update_field`] but behaves like the numeric input control:
/// NaN keeps the current value, anything else is clamped to the field range.
pub fn enter_field(current: &ParameterSet, key: ParamKey, raw: f64) -> ParameterSet {
    match key.range().clamp(raw) {
        Some(value) => update_field(current, key, value),
        None => *current,
    }
}

pub fn select_tier(current: &ParameterSet, tier: AiTier) -> ParameterSet {
    ParameterSet {
        ai_tier: tier,
        ..*current
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterSource {
    Preset(IndustryId),
    Custom,
}

impl ParameterSource {
    pub fn as_slug(&self) -> &'static str {
        match self {
            Self::Preset(industry) => industry.as_slug(),
            Self::Custom => "custom",
        }
    }
}

impl Display for ParameterSource {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Preset(industry) => write!(f, "{industry}"),
            Self::Custom => write!(f, "Custom parameters"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ParameterStore {
    source: ParameterSource,
    params: ParameterSet,
}

impl ParameterStore {
    pub fn new() -> Self {
        Self::from_preset(IndustryId::General)
    }

    pub fn from_preset(industry: IndustryId) -> Self {
        Self {
            source: ParameterSource::Preset(industry),
            params: industry.preset().to_parameters(AiTier::default()),
        }
    }

    pub fn source(&self) -> ParameterSource {
        self.source
    }

    pub fn snapshot(&self) -> &ParameterSet {
        &self.params
    }

    pub fn apply_preset(&self, industry: IndustryId) -> Self {
        debug!("applying preset {industry}");
        Self {
            source: ParameterSource::Preset(industry),
            params: apply_preset(&self.params, industry),
        }
    }

    pub fn update_field(&self, key: ParamKey, value: f64) -> Self {
        Self {
            source: self.source,
            params: update_field(&self.params, key, value),
        }
    }

    pub fn enter_field(&self, key: ParamKey, raw: f64) -> Self {
        let params = enter_field(&self.params, key, raw);
        let stored = params.get(key);
        if raw.is_nan() {
            debug!("ignored NaN input for {key}");
        } else if stored != raw {
            debug!("clamped {key} from {raw} to {stored}");
        }
        Self {
            source: self.source,
            params,
        }
    }

    pub fn select_tier(&self, tier: AiTier) -> Self {
        Self {
            source: self.source,
            params: select_tier(&self.params, tier),
        }
    }

    pub fn replace(&self, params: ParameterSet) -> Self {
        Self {
            source: ParameterSource::Custom,
            params,
        }
    }
}

impl Default for ParameterStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use crate::params::store::{
        apply_preset, enter_field, update_field, ParameterSource, ParameterStore,
    };
    use crate::params::{AiTier, IndustryId, ParamKey};

    #[test]
    fn new_store_is_seeded_from_general() {
        let store = ParameterStore::new();
        assert_eq!(store.source(), ParameterSource::Preset(IndustryId::General));
        assert_eq!(store.snapshot().avg_revenue_per_sale, 500.0);
        assert_eq!(store.snapshot().ai_tier, AiTier::Basic);
    }

    #[test]
    fn transitions_leave_the_previous_snapshot_untouched() {
        let before = ParameterStore::new();
        let after = before.update_field(ParamKey::HumanHourlyCost, 45.0);
        assert_eq!(before.snapshot().human_hourly_cost, 30.0);
        assert_eq!(after.snapshot().human_hourly_cost, 45.0);
    }

    #[test]
    fn preset_overwrites_edits_but_keeps_tier() {
        let store = ParameterStore::new()
            .select_tier(AiTier::Enterprise)
            .update_field(ParamKey::VoiceMonthlyCalls, 9_000.0)
            .apply_preset(IndustryId::RealEstate);
        assert_eq!(store.source(), ParameterSource::Preset(IndustryId::RealEstate));
        assert_eq!(store.snapshot().voice.monthly_volume, 200.0);
        assert_eq!(store.snapshot().avg_revenue_per_sale, 5_000.0);
        assert_eq!(store.snapshot().ai_tier, AiTier::Enterprise);
    }

    #[test]
    fn update_field_coerces_non_finite_to_zero() {
        let params = IndustryId::General.preset().to_parameters(AiTier::Basic);
        let next = update_field(&params, ParamKey::AvgRevenuePerSale, f64::NAN);
        assert_eq!(next.avg_revenue_per_sale, 0.0);
        let next = update_field(&params, ParamKey::AvgRevenuePerSale, -20.0);
        assert_eq!(next.avg_revenue_per_sale, -20.0);
    }

    #[test]
    fn enter_field_clamps_and_ignores_nan() {
        let params = apply_preset(
            &IndustryId::General.preset().to_parameters(AiTier::Basic),
            IndustryId::General,
        );
        let clamped = enter_field(&params, ParamKey::VoiceShowUpRate, 140.0);
        assert_eq!(clamped.voice.funnel.show_up, 100.0);
        let kept = enter_field(&params, ParamKey::VoiceShowUpRate, f64::NAN);
        assert_eq!(kept.voice.funnel.show_up, 70.0);
    }

    #[test]
    fn replaced_snapshot_is_labelled_custom() {
        let store = ParameterStore::from_preset(IndustryId::HomeServices)
            .replace(IndustryId::RealEstate.preset().to_parameters(AiTier::Basic));
        assert_eq!(store.source(), ParameterSource::Custom);
        assert_eq!(store.source().to_string(), "Custom parameters");
        assert_eq!(store.source().as_slug(), "custom");

        let edited = store.update_field(ParamKey::HumanHourlyCost, 40.0);
        assert_eq!(edited.source(), ParameterSource::Custom);
        let back = edited.apply_preset(IndustryId::General);
        assert_eq!(back.source().to_string(), "General");
    }
}
