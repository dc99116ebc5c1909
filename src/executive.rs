//! Narrative content for the executive panel and the KPI trend badges.
//!
//! None of this is derived from the generated tables. It is fixed product copy
//! and stays that way until the dashboard gets a real data source.

use std::fmt;

use crate::models::AlertCategory;

pub const PERSONNEL_COVERAGE: f64 = 0.92;

pub const GAUGE_VALUE: f64 = 72.0;
pub const GAUGE_REFERENCE: f64 = 65.0;
pub const GAUGE_THRESHOLD: f64 = 90.0;

/// Trend badges shown next to each KPI tile.
pub mod trends {
    pub const KM_TODAY: &str = "+12.3%";
    pub const AVG_EFFICIENCY: &str = "-2.1%";
    pub const FUEL_TOTAL: &str = "+5.7%";
    pub const ROUTE_COMPLIANCE: &str = "+3.2%";
    pub const VISITS: &str = "+8";
    pub const SUPERVISION_COMPLIANCE: &str = "+5.2%";
    pub const ACTIVE_CLIENTS: &str = "+3";
    pub const RISK_SCORE: &str = "-2.3";
    pub const ATTENDANCE: &str = "-3.2%";
    pub const OVERTIME: &str = "+127";
    pub const PAYROLL_ALERTS: &str = "+2";
    pub const COVERAGE: &str = "-1.5%";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskBand {
    Low,
    Elevated,
    High,
}

impl fmt::Display for RiskBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskBand::Low => f.write_str("low"),
            RiskBand::Elevated => f.write_str("elevated"),
            RiskBand::High => f.write_str("high"),
        }
    }
}

/// Gauge colour band for an integrated risk score on the 0-100 scale.
pub fn risk_band(score: f64) -> RiskBand {
    if score < 50.0 {
        RiskBand::Low
    } else if score < 75.0 {
        RiskBand::Elevated
    } else {
        RiskBand::High
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decision {
    pub area: AlertCategory,
    pub impact: u8,
    pub urgency: u8,
    pub risk: u8,
    pub action: &'static str,
}

pub const DECISION_MATRIX: [Decision; 4] = [
    Decision {
        area: AlertCategory::Fleet,
        impact: 85,
        urgency: 78,
        risk: 65,
        action: "Immediate preventive maintenance VH-005, VH-008",
    },
    Decision {
        area: AlertCategory::Supervision,
        impact: 72,
        urgency: 85,
        risk: 58,
        action: "Reassign supervisor to priority client",
    },
    Decision {
        area: AlertCategory::HumanResources,
        impact: 68,
        urgency: 62,
        risk: 45,
        action: "Activate backup staff for night shift",
    },
    Decision {
        area: AlertCategory::Security,
        impact: 91,
        urgency: 95,
        risk: 88,
        action: "Update security protocols",
    },
];

/// Decisions ordered by combined impact and urgency, most pressing first.
pub fn prioritized_decisions() -> Vec<Decision> {
    let mut decisions = DECISION_MATRIX.to_vec();
    decisions.sort_by_key(|d| std::cmp::Reverse(d.impact as u16 + d.urgency as u16));
    decisions
}

pub struct Highlight {
    pub area: AlertCategory,
    pub points: [&'static str; 3],
}

pub const HIGHLIGHTS: [Highlight; 3] = [
    Highlight {
        area: AlertCategory::Fleet,
        points: [
            "3 vehicles need urgent maintenance",
            "Efficiency 8% below target",
            "Opportunity: optimize north zone routes",
        ],
    },
    Highlight {
        area: AlertCategory::Supervision,
        points: [
            "2 priority clients without coverage",
            "Supervisor SUP-003 critically underperforming",
            "Action: reassign VIP clients",
        ],
    },
    Highlight {
        area: AlertCategory::HumanResources,
        points: [
            "Projected absenteeism 18% next week",
            "5 pending payroll alerts",
            "Recommendation: activate contingency plan",
        ],
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::High => f.write_str("HIGH"),
            Priority::Medium => f.write_str("MEDIUM"),
            Priority::Low => f.write_str("LOW"),
        }
    }
}

pub struct Recommendation {
    pub priority: Priority,
    pub action: &'static str,
    pub outcome: &'static str,
}

pub const RECOMMENDATIONS: [Recommendation; 4] = [
    Recommendation {
        priority: Priority::High,
        action: "Rotate night shift staff to reduce absenteeism",
        outcome: "+15% coverage",
    },
    Recommendation {
        priority: Priority::Medium,
        action: "Optimize north zone routes based on traffic patterns",
        outcome: "$8,500/month saved",
    },
    Recommendation {
        priority: Priority::Medium,
        action: "Urgent training for underperforming supervisors",
        outcome: "+22% compliance",
    },
    Recommendation {
        priority: Priority::Low,
        action: "Upgrade GPS tracking on the older fleet",
        outcome: "+40% accuracy",
    },
];

/// Operating cost projection in thousands: (month, current trend, with optimization).
pub const COST_PROJECTION: [(&str, u32, u32); 6] = [
    ("Jan", 420, 420),
    ("Feb", 435, 430),
    ("Mar", 445, 425),
    ("Apr", 460, 430),
    ("May", 475, 435),
    ("Jun", 490, 440),
];

pub fn projected_savings() -> u32 {
    COST_PROJECTION
        .iter()
        .map(|(_, current, optimized)| current.saturating_sub(*optimized))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn risk_bands_match_gauge_steps() {
        assert_eq!(risk_band(10.0), RiskBand::Low);
        assert_eq!(risk_band(50.0), RiskBand::Elevated);
        assert_eq!(risk_band(GAUGE_VALUE), RiskBand::Elevated);
        assert_eq!(risk_band(75.0), RiskBand::High);
        assert_eq!(risk_band(GAUGE_THRESHOLD), RiskBand::High);
    }

    #[test]
    fn security_is_the_most_pressing_decision() {
        let decisions = prioritized_decisions();
        assert_eq!(decisions[0].area, AlertCategory::Security);
        assert_eq!(decisions[3].area, AlertCategory::HumanResources);
    }

    #[test]
    fn savings_accumulate_over_projection() {
        assert_eq!(projected_savings(), 145);
    }
}
