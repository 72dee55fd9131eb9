use serde::{Deserialize, Serialize};

use crate::params::FunnelRates;

pub const MAX_SHOW_UP_RATE: f64 = 100.0;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct FunnelOutcome {
    pub volume: f64,
    pub qualified: f64,
    pub booked: f64,
    pub attended: f64,
    pub sales: f64,
    pub revenue: f64,
}

pub fn run_cascade(volume: f64, rates: &FunnelRates, revenue_per_sale: f64) -> FunnelOutcome {
    let qualified = volume * (rates.qualification / 100.0);
    let booked = qualified * (rates.booking / 100.0);
    let attended = booked * (rates.show_up / 100.0);
    let sales = attended * (rates.sale / 100.0);
    FunnelOutcome {
        volume,
        qualified,
        booked,
        attended,
        sales,
        revenue: sales * revenue_per_sale,
    }
}

pub fn uplift(rates: &FunnelRates, booking_improvement: f64, show_up_improvement: f64) -> FunnelRates {
    FunnelRates {
        qualification: rates.qualification,
        booking: rates.booking * (1.0 + booking_improvement / 100.0),
        show_up: (rates.show_up * (1.0 + show_up_improvement / 100.0)).min(MAX_SHOW_UP_RATE),
        sale: rates.sale,
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::engine::funnel::{run_cascade, uplift, MAX_SHOW_UP_RATE};
    use crate::params::FunnelRates;

    fn rates(qualification: f64, booking: f64, show_up: f64, sale: f64) -> FunnelRates {
        FunnelRates {
            qualification,
            booking,
            show_up,
            sale,
        }
    }

    #[test]
    fn cascades_reference_voice_funnel() {
        let outcome = run_cascade(300.0, &rates(20.0, 25.0, 70.0, 25.0), 500.0);
        assert!((outcome.qualified - 60.0).abs() < 1e-9);
        assert!((outcome.booked - 15.0).abs() < 1e-9);
        assert!((outcome.attended - 10.5).abs() < 1e-9);
        assert!((outcome.sales - 2.625).abs() < 1e-9);
        assert!((outcome.revenue - 1_312.5).abs() < 1e-9);
    }

    #[test]
    fn raising_any_single_rate_never_lowers_revenue() {
        let base = rates(20.0, 25.0, 70.0, 25.0);
        let baseline = run_cascade(300.0, &base, 500.0).revenue;
        let bumps = [
            rates(30.0, 25.0, 70.0, 25.0),
            rates(20.0, 35.0, 70.0, 25.0),
            rates(20.0, 25.0, 80.0, 25.0),
            rates(20.0, 25.0, 70.0, 35.0),
        ];
        for bumped in bumps {
            assert!(run_cascade(300.0, &bumped, 500.0).revenue >= baseline);
        }
    }

    #[test]
    fn uplift_touches_only_booking_and_show_up() {
        let lifted = uplift(&rates(20.0, 25.0, 70.0, 25.0), 10.0, 10.0);
        assert_eq!(lifted.qualification, 20.0);
        assert!((lifted.booking - 27.5).abs() < 1e-9);
        assert!((lifted.show_up - 77.0).abs() < 1e-9);
        assert_eq!(lifted.sale, 25.0);
    }

    #[test]
    fn show_up_uplift_is_capped() {
        for improvement in [0.0, 10.0, 50.0, 100.0, 1_000.0] {
            let lifted = uplift(&rates(20.0, 25.0, 95.0, 25.0), 0.0, improvement);
            assert!(lifted.show_up <= MAX_SHOW_UP_RATE);
        }
        let lifted = uplift(&rates(20.0, 25.0, 95.0, 25.0), 0.0, 50.0);
        assert_eq!(lifted.show_up, MAX_SHOW_UP_RATE);
    }

    fn rates_strategy() -> impl Strategy<Value = FunnelRates> {
        (0.0f64..=100.0, 0.0f64..=100.0, 0.0f64..=100.0, 0.0f64..=100.0)
            .prop_map(|(q, b, s, sale)| rates(q, b, s, sale))
    }

    proptest! {
        #[test]
        fn each_stage_is_at_most_the_previous(
            volume in 0.0f64..=20_000.0,
            funnel in rates_strategy(),
            revenue_per_sale in 0.0f64..=10_000.0
        ) {
            let outcome = run_cascade(volume, &funnel, revenue_per_sale);
            prop_assert!(outcome.qualified <= outcome.volume);
            prop_assert!(outcome.booked <= outcome.qualified);
            prop_assert!(outcome.attended <= outcome.booked);
            prop_assert!(outcome.sales <= outcome.attended);
            prop_assert!(outcome.revenue >= 0.0);
        }

        #[test]
        fn uplift_keeps_show_up_within_bounds(
            funnel in rates_strategy(),
            booking_improvement in 0.0f64..=1_000.0,
            show_up_improvement in 0.0f64..=1_000.0
        ) {
            let lifted = uplift(&funnel, booking_improvement, show_up_improvement);
            prop_assert!(lifted.show_up <= MAX_SHOW_UP_RATE);
            prop_assert!(lifted.show_up >= funnel.show_up);
            prop_assert!(lifted.booking >= funnel.booking);
        }
    }
}
