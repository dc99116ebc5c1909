use std::collections::HashMap;
use std::fmt;

use chrono::NaiveDate;

use crate::models::{
    AlertEvent, AlertSeverity, Attendance, Guard, HistoryPoint, PayrollAlert, Supervisor, Vehicle,
    VehicleStatus,
};

pub const EFFICIENCY_CRITICAL: f64 = 0.80;
pub const EFFICIENCY_WARNING: f64 = 0.85;
pub const COMPLIANCE_OPTIMAL: f64 = 0.90;
pub const COMPLIANCE_REVIEW: f64 = 0.75;

/// Scale used by the supervisor radar chart for visit and client counts.
pub const RADAR_COUNT_SCALE: f64 = 15.0;

pub const GRID_SHIFTS: usize = 2;
pub const GRID_ZONES: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EfficiencyAlert {
    Critical,
    Warning,
}

impl fmt::Display for EfficiencyAlert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EfficiencyAlert::Critical => f.write_str("critical"),
            EfficiencyAlert::Warning => f.write_str("warning"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComplianceLabel {
    Optimal,
    Review,
    Critical,
}

impl fmt::Display for ComplianceLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComplianceLabel::Optimal => f.write_str("optimal"),
            ComplianceLabel::Review => f.write_str("review"),
            ComplianceLabel::Critical => f.write_str("critical"),
        }
    }
}

pub fn efficiency_alert(efficiency: f64) -> Option<EfficiencyAlert> {
    if efficiency < EFFICIENCY_CRITICAL {
        Some(EfficiencyAlert::Critical)
    } else if efficiency < EFFICIENCY_WARNING {
        Some(EfficiencyAlert::Warning)
    } else {
        None
    }
}

pub fn compliance_label(compliance: f64) -> ComplianceLabel {
    if compliance > COMPLIANCE_OPTIMAL {
        ComplianceLabel::Optimal
    } else if compliance > COMPLIANCE_REVIEW {
        ComplianceLabel::Review
    } else {
        ComplianceLabel::Critical
    }
}

/// Starts from +0.0; `Iterator::sum` over an empty f64 iterator yields -0.0.
fn total<I>(values: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    values.into_iter().fold(0.0, |acc, value| acc + value)
}

fn mean<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), value| (sum + value, count + 1));
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FleetSummary {
    pub total_km: f64,
    pub avg_efficiency: Option<f64>,
    pub total_fuel: f64,
    pub avg_route_compliance: Option<f64>,
    pub status_counts: Vec<(VehicleStatus, usize)>,
}

pub fn fleet_summary(vehicles: &[Vehicle]) -> FleetSummary {
    let status_counts = VehicleStatus::ALL
        .iter()
        .map(|status| {
            let count = vehicles.iter().filter(|v| v.status == *status).count();
            (*status, count)
        })
        .collect();

    FleetSummary {
        total_km: total(vehicles.iter().map(|v| v.km_today)),
        avg_efficiency: mean(vehicles.iter().map(|v| v.efficiency)),
        total_fuel: total(vehicles.iter().map(|v| v.fuel_liters)),
        avg_route_compliance: mean(vehicles.iter().map(|v| v.route_compliance)),
        status_counts,
    }
}

/// Vehicles under the warning threshold, worst efficiency first.
pub fn vehicles_needing_attention(vehicles: &[Vehicle]) -> Vec<(&Vehicle, EfficiencyAlert)> {
    let mut flagged: Vec<(&Vehicle, EfficiencyAlert)> = vehicles
        .iter()
        .filter_map(|v| efficiency_alert(v.efficiency).map(|alert| (v, alert)))
        .collect();
    flagged.sort_by(|a, b| {
        a.0.efficiency
            .partial_cmp(&b.0.efficiency)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    flagged
}

#[derive(Debug, Clone, PartialEq)]
pub struct SupervisionSummary {
    pub total_visits: u32,
    pub avg_compliance: Option<f64>,
    pub total_clients: u32,
    pub avg_risk_score: Option<f64>,
}

pub fn supervision_summary(supervisors: &[Supervisor]) -> SupervisionSummary {
    SupervisionSummary {
        total_visits: supervisors.iter().map(|s| s.completed_visits).sum(),
        avg_compliance: mean(supervisors.iter().map(|s| s.compliance)),
        total_clients: supervisors.iter().map(|s| s.assigned_clients).sum(),
        avg_risk_score: mean(supervisors.iter().map(|s| s.risk_score)),
    }
}

/// Radar axes that come straight from the supervisor row, each on a 0-100 scale.
#[derive(Debug, Clone, PartialEq)]
pub struct SupervisorProfile {
    pub name: String,
    pub visits: f64,
    pub compliance: f64,
    pub clients: f64,
}

pub fn supervisor_profile(supervisor: &Supervisor) -> SupervisorProfile {
    SupervisorProfile {
        name: supervisor.name.clone(),
        visits: supervisor.completed_visits as f64 / RADAR_COUNT_SCALE * 100.0,
        compliance: supervisor.compliance * 100.0,
        clients: supervisor.assigned_clients as f64 / RADAR_COUNT_SCALE * 100.0,
    }
}

/// Compliance laid out as shift rows by zone columns for the heatmap.
/// Only defined when the table fills the grid exactly.
pub fn compliance_grid(supervisors: &[Supervisor]) -> Option<[[f64; GRID_ZONES]; GRID_SHIFTS]> {
    if supervisors.len() != GRID_SHIFTS * GRID_ZONES {
        return None;
    }

    let mut grid = [[0.0; GRID_ZONES]; GRID_SHIFTS];
    for (index, supervisor) in supervisors.iter().enumerate() {
        grid[index / GRID_ZONES][index % GRID_ZONES] = supervisor.compliance;
    }
    Some(grid)
}

#[derive(Debug, Clone, PartialEq)]
pub struct HrSummary {
    pub attendance_rate: Option<f64>,
    pub overtime_hours: u32,
    pub payroll_alerts: usize,
    pub duplicate_payments: usize,
    pub inconsistencies: usize,
    pub payroll_total: f64,
    pub attendance_mix: Vec<(Attendance, usize)>,
}

pub fn hr_summary(guards: &[Guard]) -> HrSummary {
    let count_payroll = |kind: PayrollAlert| guards.iter().filter(|g| g.payroll_alert == kind).count();
    let present = guards
        .iter()
        .filter(|g| g.attendance == Attendance::Present)
        .count();

    HrSummary {
        attendance_rate: if guards.is_empty() {
            None
        } else {
            Some(present as f64 / guards.len() as f64)
        },
        overtime_hours: guards.iter().map(|g| g.overtime_hours).sum(),
        payroll_alerts: guards
            .iter()
            .filter(|g| g.payroll_alert != PayrollAlert::None)
            .count(),
        duplicate_payments: count_payroll(PayrollAlert::DuplicatePayment),
        inconsistencies: count_payroll(PayrollAlert::Inconsistency),
        payroll_total: total(guards.iter().map(|g| g.base_salary)),
        attendance_mix: Attendance::ALL
            .iter()
            .map(|kind| {
                let count = guards.iter().filter(|g| g.attendance == *kind).count();
                (*kind, count)
            })
            .collect(),
    }
}

pub fn guards_with_payroll_alerts(guards: &[Guard]) -> Vec<&Guard> {
    guards
        .iter()
        .filter(|g| g.payroll_alert != PayrollAlert::None)
        .collect()
}

pub fn alert_summary(alerts: &[AlertEvent]) -> Vec<(AlertSeverity, usize)> {
    let mut counts: HashMap<AlertSeverity, usize> = HashMap::new();
    for alert in alerts {
        *counts.entry(alert.severity).or_insert(0) += 1;
    }

    AlertSeverity::ALL
        .iter()
        .map(|severity| (*severity, counts.get(severity).copied().unwrap_or(0)))
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct HistorySummary {
    pub total_incidents: u32,
    pub km_total: Option<f64>,
    pub fuel_total: Option<f64>,
    pub avg_efficiency: Option<f64>,
}

pub fn history_summary(history: &[HistoryPoint]) -> HistorySummary {
    let latest = history.iter().max_by_key(|point| point.date);

    HistorySummary {
        total_incidents: history.iter().map(|point| point.incidents).sum(),
        km_total: latest.map(|point| point.km_total),
        fuel_total: latest.map(|point| point.fuel_total),
        avg_efficiency: mean(history.iter().map(|point| point.avg_efficiency)),
    }
}

/// One row of the fleet trend chart. `km_day` is recovered from the cumulative totals.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyTrend {
    pub date: NaiveDate,
    pub km_day: f64,
    pub avg_efficiency: f64,
    pub incidents: u32,
    pub efficiency_alert: Option<EfficiencyAlert>,
}

pub fn daily_trend(history: &[HistoryPoint]) -> Vec<DailyTrend> {
    let mut points: Vec<&HistoryPoint> = history.iter().collect();
    points.sort_by_key(|point| point.date);

    let mut previous_km = 0.0;
    points
        .into_iter()
        .map(|point| {
            let km_day = point.km_total - previous_km;
            previous_km = point.km_total;
            DailyTrend {
                date: point.date,
                km_day,
                avg_efficiency: point.avg_efficiency,
                incidents: point.incidents,
                efficiency_alert: efficiency_alert(point.avg_efficiency),
            }
        })
        .collect()
}

/// Narrows the fleet table the way the dashboard's vehicle and status selectors do.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VehicleFilter {
    pub vehicle_id: Option<String>,
    pub status: Option<VehicleStatus>,
}

impl VehicleFilter {
    pub fn is_empty(&self) -> bool {
        self.vehicle_id.is_none() && self.status.is_none()
    }

    pub fn matches(&self, vehicle: &Vehicle) -> bool {
        let id_matches = self
            .vehicle_id
            .as_deref()
            .map_or(true, |id| vehicle.vehicle_id.eq_ignore_ascii_case(id));
        let status_matches = self.status.map_or(true, |status| vehicle.status == status);
        id_matches && status_matches
    }

    pub fn apply<'a>(&self, vehicles: &'a [Vehicle]) -> Vec<&'a Vehicle> {
        vehicles.iter().filter(|v| self.matches(v)).collect()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate, NaiveDateTime};

    use super::*;
    use crate::models::{AlertCategory, Shift, VehicleCategory};

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 2, 2)
            .and_then(|d| d.and_hms_opt(12, 0, 0))
            .expect("valid timestamp")
    }

    fn sample_vehicle(id: &str, efficiency: f64, status: VehicleStatus) -> Vehicle {
        Vehicle {
            vehicle_id: id.to_string(),
            category: VehicleCategory::ArmoredA,
            status,
            km_today: 200.0,
            fuel_liters: 40.0,
            efficiency,
            last_stop: now() - Duration::minutes(30),
            lat: -12.0,
            lon: -77.0,
            route_compliance: 0.9,
        }
    }

    fn sample_supervisor(index: u32, compliance: f64) -> Supervisor {
        Supervisor {
            supervisor_id: format!("SUP-{index:03}"),
            name: format!("Supervisor {index}"),
            assigned_clients: 9,
            completed_visits: 6,
            compliance,
            risk_score: 12.0,
        }
    }

    fn sample_guard(attendance: Attendance, payroll_alert: PayrollAlert) -> Guard {
        Guard {
            guard_id: "GRD-0001".to_string(),
            name: "Guard 1".to_string(),
            shift: Shift::Night,
            attendance,
            overtime_hours: 4,
            base_salary: 2000.0,
            payroll_alert,
        }
    }

    #[test]
    fn efficiency_thresholds_follow_expected_tiers() {
        assert_eq!(efficiency_alert(0.78), Some(EfficiencyAlert::Critical));
        assert_eq!(efficiency_alert(0.83), Some(EfficiencyAlert::Warning));
        assert_eq!(efficiency_alert(0.90), None);
        assert_eq!(efficiency_alert(0.80), Some(EfficiencyAlert::Warning));
        assert_eq!(efficiency_alert(0.85), None);
    }

    #[test]
    fn compliance_thresholds_follow_expected_tiers() {
        assert_eq!(compliance_label(0.95), ComplianceLabel::Optimal);
        assert_eq!(compliance_label(0.80), ComplianceLabel::Review);
        assert_eq!(compliance_label(0.60), ComplianceLabel::Critical);
        assert_eq!(compliance_label(0.90), ComplianceLabel::Review);
        assert_eq!(compliance_label(0.75), ComplianceLabel::Critical);
    }

    #[test]
    fn flags_only_low_efficiency_vehicles_worst_first() {
        let vehicles = vec![
            sample_vehicle("VH-001", 0.83, VehicleStatus::Active),
            sample_vehicle("VH-002", 0.90, VehicleStatus::Active),
            sample_vehicle("VH-003", 0.78, VehicleStatus::EnRoute),
        ];

        let flagged = vehicles_needing_attention(&vehicles);
        assert_eq!(flagged.len(), 2);
        assert_eq!(flagged[0].0.vehicle_id, "VH-003");
        assert_eq!(flagged[0].1, EfficiencyAlert::Critical);
        assert_eq!(flagged[1].0.vehicle_id, "VH-001");
        assert_eq!(flagged[1].1, EfficiencyAlert::Warning);
    }

    #[test]
    fn fleet_summary_aggregates_rows() {
        let vehicles = vec![
            sample_vehicle("VH-001", 0.80, VehicleStatus::Active),
            sample_vehicle("VH-002", 0.90, VehicleStatus::Maintenance),
        ];

        let summary = fleet_summary(&vehicles);
        assert!((summary.total_km - 400.0).abs() < 1e-9);
        assert!((summary.total_fuel - 80.0).abs() < 1e-9);
        assert!((summary.avg_efficiency.unwrap_or_default() - 0.85).abs() < 1e-9);
        assert!(summary
            .status_counts
            .contains(&(VehicleStatus::Maintenance, 1)));
        assert!(summary.status_counts.contains(&(VehicleStatus::EnRoute, 0)));
    }

    #[test]
    fn empty_tables_omit_means() {
        let fleet = fleet_summary(&[]);
        assert_eq!(fleet.avg_efficiency, None);
        assert_eq!(fleet.avg_route_compliance, None);
        assert_eq!(fleet.total_km, 0.0);
        assert!(fleet.total_km.is_sign_positive());
        assert!(fleet.total_fuel.is_sign_positive());
        assert!(hr_summary(&[]).payroll_total.is_sign_positive());

        assert_eq!(supervision_summary(&[]).avg_compliance, None);
        assert_eq!(hr_summary(&[]).attendance_rate, None);

        let history = history_summary(&[]);
        assert_eq!(history.km_total, None);
        assert_eq!(history.total_incidents, 0);
    }

    #[test]
    fn supervision_summary_sums_visits_and_clients() {
        let supervisors = vec![sample_supervisor(1, 0.9), sample_supervisor(2, 0.7)];
        let summary = supervision_summary(&supervisors);
        assert_eq!(summary.total_visits, 12);
        assert_eq!(summary.total_clients, 18);
        assert!((summary.avg_compliance.unwrap_or_default() - 0.8).abs() < 1e-9);
        assert!((summary.avg_risk_score.unwrap_or_default() - 12.0).abs() < 1e-9);
    }

    #[test]
    fn profile_scales_counts_to_percentages() {
        let profile = supervisor_profile(&sample_supervisor(3, 0.82));
        assert!((profile.visits - 40.0).abs() < 1e-9);
        assert!((profile.clients - 60.0).abs() < 1e-9);
        assert!((profile.compliance - 82.0).abs() < 1e-9);
    }

    #[test]
    fn compliance_grid_requires_exactly_ten_supervisors() {
        let supervisors: Vec<Supervisor> = (1..=10)
            .map(|i| sample_supervisor(i, i as f64 / 10.0))
            .collect();
        let grid = compliance_grid(&supervisors).expect("full grid");
        assert!((grid[0][0] - 0.1).abs() < 1e-9);
        assert!((grid[1][4] - 1.0).abs() < 1e-9);

        assert_eq!(compliance_grid(&supervisors[..9]), None);
    }

    #[test]
    fn hr_summary_counts_attendance_and_payroll() {
        let guards = vec![
            sample_guard(Attendance::Present, PayrollAlert::None),
            sample_guard(Attendance::Present, PayrollAlert::DuplicatePayment),
            sample_guard(Attendance::Absent, PayrollAlert::Inconsistency),
            sample_guard(Attendance::Late, PayrollAlert::None),
        ];

        let summary = hr_summary(&guards);
        assert_eq!(summary.attendance_rate, Some(0.5));
        assert_eq!(summary.overtime_hours, 16);
        assert_eq!(summary.payroll_alerts, 2);
        assert_eq!(summary.duplicate_payments, 1);
        assert_eq!(summary.inconsistencies, 1);
        assert!((summary.payroll_total - 8000.0).abs() < 1e-9);
        assert!(summary.attendance_mix.contains(&(Attendance::Late, 1)));
        assert_eq!(guards_with_payroll_alerts(&guards).len(), 2);
    }

    #[test]
    fn alert_summary_reports_every_severity() {
        let alerts = vec![
            AlertEvent {
                timestamp: now(),
                severity: AlertSeverity::Warning,
                category: AlertCategory::Fleet,
                message: "Low fuel on VH-011".to_string(),
            },
            AlertEvent {
                timestamp: now() - Duration::minutes(5),
                severity: AlertSeverity::Warning,
                category: AlertCategory::Security,
                message: "Speed alert VH-009".to_string(),
            },
        ];

        let counts = alert_summary(&alerts);
        assert_eq!(
            counts,
            vec![
                (AlertSeverity::Critical, 0),
                (AlertSeverity::Warning, 2),
                (AlertSeverity::Info, 0),
            ]
        );
    }

    #[test]
    fn history_summary_uses_latest_cumulative_values() {
        let day = now().date();
        let history = vec![
            HistoryPoint {
                date: day - Duration::days(1),
                km_total: 4000.0,
                fuel_total: 500.0,
                incidents: 3,
                avg_efficiency: 0.8,
            },
            HistoryPoint {
                date: day,
                km_total: 8200.0,
                fuel_total: 1100.0,
                incidents: 1,
                avg_efficiency: 0.9,
            },
        ];

        let summary = history_summary(&history);
        assert_eq!(summary.total_incidents, 4);
        assert_eq!(summary.km_total, Some(8200.0));
        assert_eq!(summary.fuel_total, Some(1100.0));
    }

    #[test]
    fn daily_trend_recovers_per_day_distance() {
        let day = now().date();
        let history = vec![
            HistoryPoint {
                date: day,
                km_total: 8200.0,
                fuel_total: 1100.0,
                incidents: 1,
                avg_efficiency: 0.9,
            },
            HistoryPoint {
                date: day - Duration::days(1),
                km_total: 4000.0,
                fuel_total: 500.0,
                incidents: 3,
                avg_efficiency: 0.78,
            },
        ];

        let trend = daily_trend(&history);
        assert_eq!(trend.len(), 2);
        assert_eq!(trend[0].date, day - Duration::days(1));
        assert!((trend[0].km_day - 4000.0).abs() < 1e-9);
        assert_eq!(trend[0].incidents, 3);
        assert_eq!(trend[0].efficiency_alert, Some(EfficiencyAlert::Critical));
        assert!((trend[1].km_day - 4200.0).abs() < 1e-9);
        assert_eq!(trend[1].efficiency_alert, None);
        assert!(daily_trend(&[]).is_empty());
    }

    #[test]
    fn vehicle_filter_narrows_by_id_and_status() {
        let vehicles = vec![
            sample_vehicle("VH-001", 0.9, VehicleStatus::Active),
            sample_vehicle("VH-002", 0.9, VehicleStatus::Maintenance),
            sample_vehicle("VH-003", 0.9, VehicleStatus::Active),
        ];

        let everything = VehicleFilter::default();
        assert!(everything.is_empty());
        assert_eq!(everything.apply(&vehicles).len(), 3);

        let active = VehicleFilter {
            status: Some(VehicleStatus::Active),
            ..VehicleFilter::default()
        };
        let ids: Vec<&str> = active
            .apply(&vehicles)
            .into_iter()
            .map(|v| v.vehicle_id.as_str())
            .collect();
        assert_eq!(ids, vec!["VH-001", "VH-003"]);

        let single = VehicleFilter {
            vehicle_id: Some("vh-002".to_string()),
            status: None,
        };
        assert_eq!(single.apply(&vehicles).len(), 1);

        let conflicting = VehicleFilter {
            vehicle_id: Some("VH-002".to_string()),
            status: Some(VehicleStatus::Active),
        };
        assert!(conflicting.apply(&vehicles).is_empty());
    }
}
