use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::params::{AiTier, ChannelParams, FunnelRates, ParameterSet, TierPricing};

#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum IndustryId {
    #[default]
    General,
    HomeServices,
    HealthcarePractice,
    RealEstate,
}

impl IndustryId {
    pub const ALL: [IndustryId; 4] = [
        IndustryId::General,
        IndustryId::HomeServices,
        IndustryId::HealthcarePractice,
        IndustryId::RealEstate,
    ];

    pub fn as_slug(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::HomeServices => "home_services",
            Self::HealthcarePractice => "healthcare_practice",
            Self::RealEstate => "real_estate",
        }
    }

    pub fn preset(&self) -> &'static IndustryPreset {
        match self {
            Self::General => &GENERAL,
            Self::HomeServices => &HOME_SERVICES,
            Self::HealthcarePractice => &HEALTHCARE_PRACTICE,
            Self::RealEstate => &REAL_ESTATE,
        }
    }
}

impl Display for IndustryId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let display = match self {
            Self::General => "General",
            Self::HomeServices => "Home Services",
            Self::HealthcarePractice => "Healthcare Practice",
            Self::RealEstate => "Real Estate",
        };
        write!(f, "{display}")
    }
}

#[derive(Debug, Error)]
#[error("unknown industry preset: {0}")]
pub struct IndustryParseError(pub String);

impl FromStr for IndustryId {
    type Err = IndustryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s
            .trim()
            .to_ascii_lowercase()
            .replace(['-', '_', ' '], "");
        match normalized.as_str() {
            "general" | "default" => Ok(Self::General),
            "homeservices" | "home" => Ok(Self::HomeServices),
            "healthcarepractice" | "healthcare" | "health" => Ok(Self::HealthcarePractice),
            "realestate" => Ok(Self::RealEstate),
            _ => Err(IndustryParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct IndustryPreset {
    pub id: IndustryId,
    pub avg_revenue_per_sale: f64,
    pub operating_days_per_month: f64,
    pub human_hourly_cost: f64,
    pub avg_messages_per_text_conversation: f64,
    pub avg_missed_voice_calls_daily: f64,
    pub voice: ChannelParams,
    pub text: ChannelParams,
    pub ai_handling_percentage: f64,
    pub basic: TierPricing,
    pub enterprise: TierPricing,
}

impl IndustryPreset {
    pub fn all() -> [&'static IndustryPreset; 4] {
        IndustryId::ALL.map(|id| id.preset())
    }

    pub fn to_parameters(&self, tier: AiTier) -> ParameterSet {
        ParameterSet {
            avg_revenue_per_sale: self.avg_revenue_per_sale,
            operating_days_per_month: self.operating_days_per_month,
            human_hourly_cost: self.human_hourly_cost,
            avg_messages_per_text_conversation: self.avg_messages_per_text_conversation,
            avg_missed_voice_calls_daily: self.avg_missed_voice_calls_daily,
            voice: self.voice,
            text: self.text,
            ai_tier: tier,
            ai_handling_percentage: self.ai_handling_percentage,
            basic: self.basic.or_standard(AiTier::Basic),
            enterprise: self.enterprise.or_standard(AiTier::Enterprise),
        }
    }
}

const fn channel(
    monthly_volume: f64,
    avg_handling_minutes: f64,
    funnel: [f64; 4],
    ai_autonomy: f64,
) -> ChannelParams {
    ChannelParams {
        monthly_volume,
        avg_handling_minutes,
        funnel: FunnelRates {
            qualification: funnel[0],
            booking: funnel[1],
            show_up: funnel[2],
            sale: funnel[3],
        },
        ai_autonomy,
        booking_improvement: 10.0,
        show_up_improvement: 10.0,
    }
}

const GENERAL: IndustryPreset = IndustryPreset {
    id: IndustryId::General,
    avg_revenue_per_sale: 500.0,
    operating_days_per_month: 22.0,
    human_hourly_cost: 30.0,
    avg_messages_per_text_conversation: 6.0,
    avg_missed_voice_calls_daily: 5.0,
    voice: channel(300.0, 10.0, [20.0, 25.0, 70.0, 25.0], 75.0),
    text: channel(700.0, 8.0, [25.0, 30.0, 75.0, 30.0], 85.0),
    ai_handling_percentage: 80.0,
    basic: TierPricing::BASIC,
    enterprise: TierPricing::ENTERPRISE,
};

const HOME_SERVICES: IndustryPreset = IndustryPreset {
    id: IndustryId::HomeServices,
    avg_revenue_per_sale: 450.0,
    operating_days_per_month: 26.0,
    human_hourly_cost: 28.0,
    avg_messages_per_text_conversation: 5.0,
    avg_missed_voice_calls_daily: 10.0,
    voice: channel(400.0, 12.0, [22.0, 28.0, 65.0, 28.0], 70.0),
    text: channel(600.0, 7.0, [28.0, 32.0, 70.0, 32.0], 80.0),
    ai_handling_percentage: 75.0,
    basic: TierPricing::BASIC,
    enterprise: TierPricing::ENTERPRISE,
};

const HEALTHCARE_PRACTICE: IndustryPreset = IndustryPreset {
    id: IndustryId::HealthcarePractice,
    avg_revenue_per_sale: 250.0,
    operating_days_per_month: 22.0,
    human_hourly_cost: 35.0,
    avg_messages_per_text_conversation: 8.0,
    avg_missed_voice_calls_daily: 8.0,
    voice: channel(500.0, 8.0, [15.0, 40.0, 80.0, 20.0], 80.0),
    text: channel(1_000.0, 5.0, [20.0, 45.0, 85.0, 25.0], 90.0),
    ai_handling_percentage: 85.0,
    basic: TierPricing::BASIC,
    enterprise: TierPricing::ENTERPRISE,
};

const REAL_ESTATE: IndustryPreset = IndustryPreset {
    id: IndustryId::RealEstate,
    avg_revenue_per_sale: 5_000.0,
    operating_days_per_month: 26.0,
    human_hourly_cost: 32.0,
    avg_messages_per_text_conversation: 7.0,
    avg_missed_voice_calls_daily: 3.0,
    voice: channel(200.0, 15.0, [10.0, 15.0, 60.0, 10.0], 65.0),
    text: channel(800.0, 10.0, [15.0, 20.0, 65.0, 15.0], 75.0),
    ai_handling_percentage: 70.0,
    basic: TierPricing::BASIC,
    enterprise: TierPricing::ENTERPRISE,
};
