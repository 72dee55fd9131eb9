use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum ParamKey {
    AvgRevenuePerSale,
    OperatingDaysPerMonth,
    HumanHourlyCost,
    AvgMessagesPerTextConversation,
    AvgMissedVoiceCallsDaily,
    VoiceMonthlyCalls,
    VoiceAvgCallMinutes,
    VoiceQualificationRate,
    VoiceBookingRate,
    VoiceShowUpRate,
    VoiceSaleRate,
    VoiceAiAutonomy,
    VoiceBookingImprovement,
    VoiceShowUpImprovement,
    TextMonthlyConversations,
    TextAvgHandlingMinutes,
    TextQualificationRate,
    TextBookingRate,
    TextShowUpRate,
    TextSaleRate,
    TextAiAutonomy,
    TextBookingImprovement,
    TextShowUpImprovement,
    AiHandlingPercentage,
    BasicSetupFee,
    BasicMonthlyFee,
    BasicPerMinuteVoiceCost,
    BasicIncludedTextInteractions,
    BasicOverageTextCost,
    EnterpriseSetupFee,
    EnterpriseMonthlyFee,
    EnterprisePerMinuteVoiceCost,
    EnterpriseIncludedTextInteractions,
    EnterpriseOverageTextCost,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct InputRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub unit: &'static str,
}

impl InputRange {
    const fn new(min: f64, max: f64, step: f64, unit: &'static str) -> Self {
        Self {
            min,
            max,
            step,
            unit,
        }
    }

    pub fn clamp(&self, value: f64) -> Option<f64> {
        if value.is_nan() {
            return None;
        }
        Some(value.max(self.min).min(self.max))
    }
}

const PERCENT: InputRange = InputRange::new(0.0, 100.0, 1.0, "%");
const AI_PERCENT: InputRange = InputRange::new(0.0, 100.0, 5.0, "%");

impl ParamKey {
    pub const ALL: [ParamKey; 34] = [
        ParamKey::AvgRevenuePerSale,
        ParamKey::OperatingDaysPerMonth,
        ParamKey::HumanHourlyCost,
        ParamKey::AvgMessagesPerTextConversation,
        ParamKey::AvgMissedVoiceCallsDaily,
        ParamKey::VoiceMonthlyCalls,
        ParamKey::VoiceAvgCallMinutes,
        ParamKey::VoiceQualificationRate,
        ParamKey::VoiceBookingRate,
        ParamKey::VoiceShowUpRate,
        ParamKey::VoiceSaleRate,
        ParamKey::VoiceAiAutonomy,
        ParamKey::VoiceBookingImprovement,
        ParamKey::VoiceShowUpImprovement,
        ParamKey::TextMonthlyConversations,
        ParamKey::TextAvgHandlingMinutes,
        ParamKey::TextQualificationRate,
        ParamKey::TextBookingRate,
        ParamKey::TextShowUpRate,
        ParamKey::TextSaleRate,
        ParamKey::TextAiAutonomy,
        ParamKey::TextBookingImprovement,
        ParamKey::TextShowUpImprovement,
        ParamKey::AiHandlingPercentage,
        ParamKey::BasicSetupFee,
        ParamKey::BasicMonthlyFee,
        ParamKey::BasicPerMinuteVoiceCost,
        ParamKey::BasicIncludedTextInteractions,
        ParamKey::BasicOverageTextCost,
        ParamKey::EnterpriseSetupFee,
        ParamKey::EnterpriseMonthlyFee,
        ParamKey::EnterprisePerMinuteVoiceCost,
        ParamKey::EnterpriseIncludedTextInteractions,
        ParamKey::EnterpriseOverageTextCost,
    ];

    pub fn as_slug(&self) -> &'static str {
        match self {
            Self::AvgRevenuePerSale => "avg_revenue_per_sale",
            Self::OperatingDaysPerMonth => "operating_days_per_month",
            Self::HumanHourlyCost => "human_hourly_cost",
            Self::AvgMessagesPerTextConversation => "avg_messages_per_text_conversation",
            Self::AvgMissedVoiceCallsDaily => "avg_missed_voice_calls_daily",
            Self::VoiceMonthlyCalls => "voice_monthly_calls",
            Self::VoiceAvgCallMinutes => "voice_avg_call_minutes",
            Self::VoiceQualificationRate => "voice_qualification_rate",
            Self::VoiceBookingRate => "voice_booking_rate",
            Self::VoiceShowUpRate => "voice_show_up_rate",
            Self::VoiceSaleRate => "voice_sale_rate",
            Self::VoiceAiAutonomy => "voice_ai_autonomy",
            Self::VoiceBookingImprovement => "voice_booking_improvement",
            Self::VoiceShowUpImprovement => "voice_show_up_improvement",
            Self::TextMonthlyConversations => "text_monthly_conversations",
            Self::TextAvgHandlingMinutes => "text_avg_handling_minutes",
            Self::TextQualificationRate => "text_qualification_rate",
            Self::TextBookingRate => "text_booking_rate",
            Self::TextShowUpRate => "text_show_up_rate",
            Self::TextSaleRate => "text_sale_rate",
            Self::TextAiAutonomy => "text_ai_autonomy",
            Self::TextBookingImprovement => "text_booking_improvement",
            Self::TextShowUpImprovement => "text_show_up_improvement",
            Self::AiHandlingPercentage => "ai_handling_percentage",
            Self::BasicSetupFee => "basic_setup_fee",
            Self::BasicMonthlyFee => "basic_monthly_fee",
            Self::BasicPerMinuteVoiceCost => "basic_per_minute_voice_cost",
            Self::BasicIncludedTextInteractions => "basic_included_text_interactions",
            Self::BasicOverageTextCost => "basic_overage_text_cost",
            Self::EnterpriseSetupFee => "enterprise_setup_fee",
            Self::EnterpriseMonthlyFee => "enterprise_monthly_fee",
            Self::EnterprisePerMinuteVoiceCost => "enterprise_per_minute_voice_cost",
            Self::EnterpriseIncludedTextInteractions => "enterprise_included_text_interactions",
            Self::EnterpriseOverageTextCost => "enterprise_overage_text_cost",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::AvgRevenuePerSale => "Average Revenue per Sale",
            Self::OperatingDaysPerMonth => "Operating Days per Month",
            Self::HumanHourlyCost => "Human Agent Hourly Cost (Fully Loaded)",
            Self::AvgMessagesPerTextConversation => "Avg. Messages per Text Conversation",
            Self::AvgMissedVoiceCallsDaily => "Avg. Missed Voice Calls per Day",
            Self::VoiceMonthlyCalls => "Monthly Incoming Voice Calls",
            Self::VoiceAvgCallMinutes => "Avg. Human Time per Voice Call",
            Self::VoiceQualificationRate => "Lead Qualification Rate (Voice)",
            Self::VoiceBookingRate => "Appt. Booking Rate (Qualified Voice Leads)",
            Self::VoiceShowUpRate => "Appt. Show-Up Rate (Booked Voice Appts)",
            Self::VoiceSaleRate => "Appt. to Sale Rate (Attended Voice Appts)",
            Self::VoiceAiAutonomy => "AI Autonomy (Voice Calls)",
            Self::VoiceBookingImprovement => "Improvement in Booking Rate (Voice AI)",
            Self::VoiceShowUpImprovement => "Improvement in Show-Up Rate (Voice AI)",
            Self::TextMonthlyConversations => "Monthly Incoming Text Conversations",
            Self::TextAvgHandlingMinutes => "Avg. Human Time per Text Conversation",
            Self::TextQualificationRate => "Lead Qualification Rate (Text)",
            Self::TextBookingRate => "Appt. Booking Rate (Qualified Text Leads)",
            Self::TextShowUpRate => "Appt. Show-Up Rate (Booked Text Appts)",
            Self::TextSaleRate => "Appt. to Sale Rate (Attended Text Appts)",
            Self::TextAiAutonomy => "AI Autonomy (Text Conversations)",
            Self::TextBookingImprovement => "Improvement in Booking Rate (Text AI)",
            Self::TextShowUpImprovement => "Improvement in Show-Up Rate (Text AI)",
            Self::AiHandlingPercentage => "AI Handling Percentage",
            Self::BasicSetupFee => "Basic AI - Setup Fee",
            Self::BasicMonthlyFee => "Basic AI - Monthly Cost",
            Self::BasicPerMinuteVoiceCost => "Basic AI - Per Minute Voice Cost",
            Self::BasicIncludedTextInteractions => "Basic AI - Included Monthly Text Conversations",
            Self::BasicOverageTextCost => "Basic AI - Overage Cost per Text Conversation",
            Self::EnterpriseSetupFee => "Enterprise AI - Setup Fee",
            Self::EnterpriseMonthlyFee => "Enterprise AI - Monthly Platform Cost",
            Self::EnterprisePerMinuteVoiceCost => "Enterprise AI - Per Minute Voice Cost",
            Self::EnterpriseIncludedTextInteractions => {
                "Enterprise AI - Included Monthly Text Conversations"
            }
            Self::EnterpriseOverageTextCost => "Enterprise AI - Overage Cost per Text Conversation",
        }
    }

    pub fn range(&self) -> InputRange {
        match self {
            Self::AvgRevenuePerSale => InputRange::new(0.0, 10_000.0, 10.0, "$"),
            Self::OperatingDaysPerMonth => InputRange::new(1.0, 31.0, 1.0, "days"),
            Self::HumanHourlyCost => InputRange::new(10.0, 150.0, 1.0, "$"),
            Self::AvgMessagesPerTextConversation => InputRange::new(2.0, 30.0, 1.0, "msgs"),
            Self::AvgMissedVoiceCallsDaily => InputRange::new(0.0, 200.0, 1.0, "#"),
            Self::VoiceMonthlyCalls => InputRange::new(0.0, 10_000.0, 10.0, "#"),
            Self::VoiceAvgCallMinutes => InputRange::new(1.0, 60.0, 0.5, "min"),
            Self::TextMonthlyConversations => InputRange::new(0.0, 20_000.0, 10.0, "#"),
            Self::TextAvgHandlingMinutes => InputRange::new(1.0, 30.0, 0.5, "min"),
            Self::VoiceQualificationRate
            | Self::VoiceBookingRate
            | Self::VoiceShowUpRate
            | Self::VoiceSaleRate
            | Self::TextQualificationRate
            | Self::TextBookingRate
            | Self::TextShowUpRate
            | Self::TextSaleRate
            | Self::VoiceBookingImprovement
            | Self::VoiceShowUpImprovement
            | Self::TextBookingImprovement
            | Self::TextShowUpImprovement => PERCENT,
            Self::VoiceAiAutonomy | Self::TextAiAutonomy | Self::AiHandlingPercentage => {
                AI_PERCENT
            }
            Self::BasicSetupFee => InputRange::new(500.0, 5_000.0, 100.0, "$"),
            Self::BasicMonthlyFee => InputRange::new(100.0, 3_000.0, 50.0, "$"),
            Self::BasicPerMinuteVoiceCost => InputRange::new(0.05, 1.0, 0.01, "$"),
            Self::BasicIncludedTextInteractions => InputRange::new(0.0, 10_000.0, 100.0, "#"),
            Self::BasicOverageTextCost => InputRange::new(0.01, 0.5, 0.01, "$"),
            Self::EnterpriseSetupFee => InputRange::new(2_000.0, 50_000.0, 500.0, "$"),
            Self::EnterpriseMonthlyFee => InputRange::new(500.0, 10_000.0, 100.0, "$"),
            Self::EnterprisePerMinuteVoiceCost => InputRange::new(0.03, 0.5, 0.01, "$"),
            Self::EnterpriseIncludedTextInteractions => {
                InputRange::new(0.0, 50_000.0, 500.0, "#")
            }
            Self::EnterpriseOverageTextCost => InputRange::new(0.01, 0.25, 0.005, "$"),
        }
    }
}

impl Display for ParamKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_slug())
    }
}

#[derive(Debug, Error)]
#[error("unknown parameter: {0} (run `fields` to list them)")]
pub struct ParamKeyParseError(pub String);

impl FromStr for ParamKey {
    type Err = ParamKeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        if let Some(key) = Self::ALL.iter().find(|k| k.as_slug() == normalized) {
            return Ok(*key);
        }
        // camelCase spellings used by the web form
        let key = match normalized.replace('_', "").as_str() {
            "avgrevenuepersale" | "revenue" => Self::AvgRevenuePerSale,
            "operatingdayspermonth" | "operatingdays" => Self::OperatingDaysPerMonth,
            "humanhourlycost" | "hourlycost" => Self::HumanHourlyCost,
            "avgmessagespertextconversation" => Self::AvgMessagesPerTextConversation,
            "avgmissedvoicecallsdaily" | "missedcalls" => Self::AvgMissedVoiceCallsDaily,
            "monthlyvoicecalls" | "voicecalls" => Self::VoiceMonthlyCalls,
            "avgcalldurationhuman" => Self::VoiceAvgCallMinutes,
            "voiceleadqualificationrate" => Self::VoiceQualificationRate,
            "voiceappointmentbookingrate" => Self::VoiceBookingRate,
            "voiceappointmentshowuprate" => Self::VoiceShowUpRate,
            "voiceappointmenttosalerate" => Self::VoiceSaleRate,
            "aiautonomyvoice" => Self::VoiceAiAutonomy,
            "aivoicebookingrateimprovement" => Self::VoiceBookingImprovement,
            "aivoiceshowuprateimprovement" => Self::VoiceShowUpImprovement,
            "monthlytextinteractions" | "textconversations" => Self::TextMonthlyConversations,
            "avgtextinteractiontimehuman" => Self::TextAvgHandlingMinutes,
            "textleadqualificationrate" => Self::TextQualificationRate,
            "textappointmentbookingrate" => Self::TextBookingRate,
            "textappointmentshowuprate" => Self::TextShowUpRate,
            "textappointmenttosalerate" => Self::TextSaleRate,
            "aiautonomytext" => Self::TextAiAutonomy,
            "aitextbookingrateimprovement" => Self::TextBookingImprovement,
            "aitextshowuprateimprovement" => Self::TextShowUpImprovement,
            "aihandlingpercentage" | "handling" => Self::AiHandlingPercentage,
            "basicaisetupfee" => Self::BasicSetupFee,
            "basicaimonthlycost" => Self::BasicMonthlyFee,
            "basicaiperminutevoicecost" => Self::BasicPerMinuteVoiceCost,
            "basicaiincludedtextinteractions" => Self::BasicIncludedTextInteractions,
            "basicaioveragetextcost" => Self::BasicOverageTextCost,
            "enterpriseaisetupfee" => Self::EnterpriseSetupFee,
            "enterpriseaimonthlycost" => Self::EnterpriseMonthlyFee,
            "enterpriseaiperminutevoicecost" => Self::EnterprisePerMinuteVoiceCost,
            "enterpriseaiincludedtextinteractions" => Self::EnterpriseIncludedTextInteractions,
            "enterpriseaioveragetextcost" => Self::EnterpriseOverageTextCost,
            _ => return Err(ParamKeyParseError(s.to_string())),
        };
        Ok(key)
    }
}

#[derive(Debug, Error)]
pub enum AssignmentParseError {
    #[error("expected key=value, got: {0}")]
    MissingEquals(String),
    #[error(transparent)]
    UnknownKey(#[from] ParamKeyParseError),
    #[error("invalid number for {key}: {raw}")]
    InvalidNumber { key: ParamKey, raw: String },
}

pub fn parse_assignment(raw: &str) -> Result<(ParamKey, f64), AssignmentParseError> {
    let Some((key, value)) = raw.split_once('=') else {
        return Err(AssignmentParseError::MissingEquals(raw.to_string()));
    };
    let key = ParamKey::from_str(key)?;
    let value = crate::params::normalize::to_f64(&serde_json::Value::String(value.to_string()))
        .ok_or_else(|| AssignmentParseError::InvalidNumber {
            key,
            raw: value.trim().to_string(),
        })?;
    Ok((key, value))
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::{parse_assignment, AssignmentParseError, ParamKey};

    #[test]
    fn parses_slugs_and_form_names() {
        assert_eq!(
            ParamKey::from_str("voice-show-up-rate").expect("slug"),
            ParamKey::VoiceShowUpRate
        );
        assert_eq!(
            ParamKey::from_str("voiceAppointmentShowUpRate").expect("form name"),
            ParamKey::VoiceShowUpRate
        );
        assert_eq!(
            ParamKey::from_str("enterpriseAiOverageTextCost").expect("form name"),
            ParamKey::EnterpriseOverageTextCost
        );
        assert!(ParamKey::from_str("coffee_budget").is_err());
    }

    #[test]
    fn every_slug_parses_back() {
        for key in ParamKey::ALL {
            assert_eq!(ParamKey::from_str(key.as_slug()).expect("slug"), key);
        }
    }

    #[test]
    fn clamps_to_control_range() {
        let range = ParamKey::HumanHourlyCost.range();
        assert_eq!(range.clamp(5.0), Some(10.0));
        assert_eq!(range.clamp(500.0), Some(150.0));
        assert_eq!(range.clamp(42.0), Some(42.0));
        assert_eq!(range.clamp(f64::NAN), None);
    }

    #[test]
    fn parses_assignments() {
        let (key, value) = parse_assignment("human_hourly_cost=$35").expect("assignment");
        assert_eq!(key, ParamKey::HumanHourlyCost);
        assert_eq!(value, 35.0);

        assert!(matches!(
            parse_assignment("human_hourly_cost"),
            Err(AssignmentParseError::MissingEquals(_))
        ));
        assert!(matches!(
            parse_assignment("human_hourly_cost=lots"),
            Err(AssignmentParseError::InvalidNumber { .. })
        ));
    }
}
