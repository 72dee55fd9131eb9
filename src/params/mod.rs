pub mod normalize;
pub mod presets;
pub mod schema;
pub mod store;
#[cfg(test)]
pub(crate) mod testing;

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::params::normalize::lenient_f64;

pub use presets::{IndustryId, IndustryParseError, IndustryPreset};
pub use schema::{
    parse_assignment, AssignmentParseError, InputRange, ParamKey, ParamKeyParseError,
};
pub use store::{ParameterSource, ParameterStore};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum AiTier {
    #[default]
    Basic,
    Enterprise,
}

impl AiTier {
    pub const ALL: [AiTier; 2] = [AiTier::Basic, AiTier::Enterprise];

    pub fn as_slug(&self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Enterprise => "enterprise",
        }
    }
}

impl Display for AiTier {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let display = match self {
            Self::Basic => "Basic",
            Self::Enterprise => "Enterprise",
        };
        write!(f, "{display}")
    }
}

#[derive(Debug, Error)]
#[error("unknown AI tier: {0} (expected basic or enterprise)")]
pub struct TierParseError(pub String);

impl FromStr for AiTier {
    type Err = TierParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "basic" => Ok(Self::Basic),
            "enterprise" | "ent" => Ok(Self::Enterprise),
            _ => Err(TierParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct FunnelRates {
    #[serde(deserialize_with = "lenient_f64")]
    pub qualification: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub booking: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub show_up: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub sale: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct ChannelParams {
    #[serde(deserialize_with = "lenient_f64")]
    pub monthly_volume: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub avg_handling_minutes: f64,
    pub funnel: FunnelRates,
    #[serde(deserialize_with = "lenient_f64")]
    pub ai_autonomy: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub booking_improvement: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub show_up_improvement: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct TierPricing {
    #[serde(deserialize_with = "lenient_f64")]
    pub setup_fee: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub monthly_base_fee: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub per_minute_voice_cost: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub included_text_interactions: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub overage_text_cost: f64,
}

impl TierPricing {
    pub const BASIC: TierPricing = TierPricing {
        setup_fee: 2_000.0,
        monthly_base_fee: 497.0,
        per_minute_voice_cost: 0.45,
        included_text_interactions: 1_000.0,
        overage_text_cost: 0.05,
    };

    pub const ENTERPRISE: TierPricing = TierPricing {
        setup_fee: 5_000.0,
        monthly_base_fee: 2_000.0,
        per_minute_voice_cost: 0.30,
        included_text_interactions: 10_000.0,
        overage_text_cost: 0.03,
    };

    pub fn standard(tier: AiTier) -> Self {
        match tier {
            AiTier::Basic => Self::BASIC,
            AiTier::Enterprise => Self::ENTERPRISE,
        }
    }

    pub fn or_standard(self, tier: AiTier) -> Self {
        let standard = Self::standard(tier);
        let pick = |value: f64, fallback: f64| {
            if value.is_finite() && value != 0.0 {
                value
            } else {
                fallback
            }
        };
        Self {
            setup_fee: pick(self.setup_fee, standard.setup_fee),
            monthly_base_fee: pick(self.monthly_base_fee, standard.monthly_base_fee),
            per_minute_voice_cost: pick(self.per_minute_voice_cost, standard.per_minute_voice_cost),
            included_text_interactions: pick(
                self.included_text_interactions,
                standard.included_text_interactions,
            ),
            overage_text_cost: pick(self.overage_text_cost, standard.overage_text_cost),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct ParameterSet {
    #[serde(deserialize_with = "lenient_f64")]
    pub avg_revenue_per_sale: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub operating_days_per_month: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub human_hourly_cost: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub avg_messages_per_text_conversation: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub avg_missed_voice_calls_daily: f64,
    pub voice: ChannelParams,
    pub text: ChannelParams,
    pub ai_tier: AiTier,
    /// Share of all interactions offered to the AI, shared by both channels.
    #[serde(deserialize_with = "lenient_f64")]
    pub ai_handling_percentage: f64,
    pub basic: TierPricing,
    pub enterprise: TierPricing,
}

impl ParameterSet {
    pub fn pricing(&self, tier: AiTier) -> &TierPricing {
        match tier {
            AiTier::Basic => &self.basic,
            AiTier::Enterprise => &self.enterprise,
        }
    }

    pub fn selected_pricing(&self) -> &TierPricing {
        self.pricing(self.ai_tier)
    }

    pub fn get(&self, key: ParamKey) -> f64 {
        let mut copy = *self;
        *copy.field_mut(key)
    }

    pub fn set(&mut self, key: ParamKey, value: f64) {
        *self.field_mut(key) = value;
    }

    fn field_mut(&mut self, key: ParamKey) -> &mut f64 {
        match key {
            ParamKey::AvgRevenuePerSale => &mut self.avg_revenue_per_sale,
            ParamKey::OperatingDaysPerMonth => &mut self.operating_days_per_month,
            ParamKey::HumanHourlyCost => &mut self.human_hourly_cost,
            ParamKey::AvgMessagesPerTextConversation => {
                &mut self.avg_messages_per_text_conversation
            }
            ParamKey::AvgMissedVoiceCallsDaily => &mut self.avg_missed_voice_calls_daily,
            ParamKey::VoiceMonthlyCalls => &mut self.voice.monthly_volume,
            ParamKey::VoiceAvgCallMinutes => &mut self.voice.avg_handling_minutes,
            ParamKey::VoiceQualificationRate => &mut self.voice.funnel.qualification,
            ParamKey::VoiceBookingRate => &mut self.voice.funnel.booking,
            ParamKey::VoiceShowUpRate => &mut self.voice.funnel.show_up,
            ParamKey::VoiceSaleRate => &mut self.voice.funnel.sale,
            ParamKey::VoiceAiAutonomy => &mut self.voice.ai_autonomy,
            ParamKey::VoiceBookingImprovement => &mut self.voice.booking_improvement,
            ParamKey::VoiceShowUpImprovement => &mut self.voice.show_up_improvement,
            ParamKey::TextMonthlyConversations => &mut self.text.monthly_volume,
            ParamKey::TextAvgHandlingMinutes => &mut self.text.avg_handling_minutes,
            ParamKey::TextQualificationRate => &mut self.text.funnel.qualification,
            ParamKey::TextBookingRate => &mut self.text.funnel.booking,
            ParamKey::TextShowUpRate => &mut self.text.funnel.show_up,
            ParamKey::TextSaleRate => &mut self.text.funnel.sale,
            ParamKey::TextAiAutonomy => &mut self.text.ai_autonomy,
            ParamKey::TextBookingImprovement => &mut self.text.booking_improvement,
            ParamKey::TextShowUpImprovement => &mut self.text.show_up_improvement,
            ParamKey::AiHandlingPercentage => &mut self.ai_handling_percentage,
            ParamKey::BasicSetupFee => &mut self.basic.setup_fee,
            ParamKey::BasicMonthlyFee => &mut self.basic.monthly_base_fee,
            ParamKey::BasicPerMinuteVoiceCost => &mut self.basic.per_minute_voice_cost,
            ParamKey::BasicIncludedTextInteractions => &mut self.basic.included_text_interactions,
            ParamKey::BasicOverageTextCost => &mut self.basic.overage_text_cost,
            ParamKey::EnterpriseSetupFee => &mut self.enterprise.setup_fee,
            ParamKey::EnterpriseMonthlyFee => &mut self.enterprise.monthly_base_fee,
            ParamKey::EnterprisePerMinuteVoiceCost => &mut self.enterprise.per_minute_voice_cost,
            ParamKey::EnterpriseIncludedTextInteractions => {
                &mut self.enterprise.included_text_interactions
            }
            ParamKey::EnterpriseOverageTextCost => &mut self.enterprise.overage_text_cost,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::{AiTier, ParamKey, ParameterSet, TierPricing};

    #[test]
    fn get_and_set_round_trip_every_key() {
        let mut params = ParameterSet::default();
        for (idx, key) in ParamKey::ALL.iter().enumerate() {
            params.set(*key, idx as f64 + 0.5);
        }
        for (idx, key) in ParamKey::ALL.iter().enumerate() {
            assert_eq!(params.get(*key), idx as f64 + 0.5, "field {key}");
        }
    }

    #[test]
    fn selected_pricing_follows_tier() {
        let mut params = ParameterSet {
            basic: TierPricing::BASIC,
            enterprise: TierPricing::ENTERPRISE,
            ..ParameterSet::default()
        };
        assert_eq!(params.selected_pricing().setup_fee, 2_000.0);
        params.ai_tier = AiTier::Enterprise;
        assert_eq!(params.selected_pricing().setup_fee, 5_000.0);
    }

    #[test]
    fn zero_prices_fall_back_to_standard() {
        let partial = TierPricing {
            setup_fee: 0.0,
            monthly_base_fee: 750.0,
            ..TierPricing::default()
        };
        let filled = partial.or_standard(AiTier::Basic);
        assert_eq!(filled.setup_fee, 2_000.0);
        assert_eq!(filled.monthly_base_fee, 750.0);
        assert_eq!(filled.overage_text_cost, 0.05);
    }

    #[test]
    fn parses_tiers() {
        assert_eq!(AiTier::from_str("Enterprise").expect("tier"), AiTier::Enterprise);
        assert_eq!(AiTier::from_str(" basic ").expect("tier"), AiTier::Basic);
        assert!(AiTier::from_str("premium").is_err());
    }

    #[test]
    fn missing_and_non_numeric_fields_deserialize_to_zero() {
        let parsed: ParameterSet = serde_json::from_str(
            r#"{
                "avg_revenue_per_sale": "1,250",
                "human_hourly_cost": "abc",
                "voice": { "monthly_volume": 300, "funnel": { "qualification": null } },
                "ai_tier": "enterprise"
            }"#,
        )
        .expect("failed to parse parameters");
        assert_eq!(parsed.avg_revenue_per_sale, 1_250.0);
        assert_eq!(parsed.human_hourly_cost, 0.0);
        assert_eq!(parsed.voice.monthly_volume, 300.0);
        assert_eq!(parsed.voice.funnel.qualification, 0.0);
        assert_eq!(parsed.text.monthly_volume, 0.0);
        assert_eq!(parsed.ai_tier, AiTier::Enterprise);
    }
}
