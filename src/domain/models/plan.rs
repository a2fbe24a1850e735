use serde::Serialize;

/// A named hourly service tier. Static reference data, not derived from
/// server state.
#[derive(Debug, Serialize, Clone, Copy, PartialEq)]
pub struct PricingPlan {
    pub id: &'static str,
    pub name: &'static str,
    pub hourly_rate: f64,
    pub admin_only: bool,
}

pub const PLANS: [PricingPlan; 5] = [
    PricingPlan {
        id: "wash",
        name: "Self-service wash",
        hourly_rate: 700.0,
        admin_only: false,
    },
    PricingPlan {
        id: "dry-post",
        name: "Dry post",
        hourly_rate: 400.0,
        admin_only: false,
    },
    PricingPlan {
        id: "cleaning",
        name: "Interior cleaning",
        hourly_rate: 1200.0,
        admin_only: false,
    },
    PricingPlan {
        id: "polish",
        name: "Polishing",
        hourly_rate: 1500.0,
        admin_only: false,
    },
    PricingPlan {
        id: "technical",
        name: "Technical work",
        hourly_rate: 0.0,
        admin_only: true,
    },
];

impl PricingPlan {
    pub fn all() -> &'static [PricingPlan] {
        &PLANS
    }

    pub fn visible_to_customers() -> impl Iterator<Item = &'static PricingPlan> {
        PLANS.iter().filter(|p| !p.admin_only)
    }

    pub fn find(id: &str) -> Option<&'static PricingPlan> {
        PLANS.iter().find(|p| p.id == id)
    }
}
