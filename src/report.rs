use std::fmt::Write;

use chrono::Duration;

use crate::executive::{self, trends};
use crate::generator::absenteeism_forecast;
use crate::metrics;
use crate::models::Dataset;
use crate::sampling::seeded_rng;

const RECENT_ALERTS: usize = 5;
const PROFILED_SUPERVISORS: usize = 3;
const FORECAST_DAYS: usize = 7;
// Mixed into the seed so the forecast draws from its own stream.
const FORECAST_STREAM: u64 = 0x5eed_f00d;

fn percent(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.1}%", v * 100.0),
        None => "n/a".to_string(),
    }
}

fn decimal(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.1}"),
        None => "n/a".to_string(),
    }
}

pub fn build_report(data: &Dataset) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "# SecureFleet Control Center");
    let _ = writeln!(
        output,
        "Generated at {} (seed {})",
        data.anchor.format("%Y-%m-%d %H:%M:%S"),
        data.seed
    );
    let _ = writeln!(output);

    write_alerts(&mut output, data);
    write_fleet(&mut output, data);
    write_supervision(&mut output, data);
    write_hr(&mut output, data);
    write_executive(&mut output);

    output
}

fn write_alerts(output: &mut String, data: &Dataset) {
    let _ = writeln!(output, "## Alert Center");
    let counts = metrics::alert_summary(&data.alerts)
        .iter()
        .map(|(severity, count)| format!("{severity}: {count}"))
        .collect::<Vec<_>>()
        .join(", ");
    let _ = writeln!(output, "{counts}");
    let _ = writeln!(output);

    if data.alerts.is_empty() {
        let _ = writeln!(output, "No alerts in the feed.");
    } else {
        for alert in data.alerts.iter().take(RECENT_ALERTS) {
            let _ = writeln!(
                output,
                "- [{}] {} - {} ({})",
                alert.severity,
                alert.category,
                alert.message,
                alert.timestamp.format("%H:%M:%S")
            );
        }
    }
    let _ = writeln!(output);
}

fn write_fleet(output: &mut String, data: &Dataset) {
    let fleet = metrics::fleet_summary(&data.vehicles);

    let _ = writeln!(output, "## Fleet");
    let _ = writeln!(
        output,
        "- Km today: {:.0} ({})",
        fleet.total_km,
        trends::KM_TODAY
    );
    let _ = writeln!(
        output,
        "- Average efficiency: {} ({})",
        percent(fleet.avg_efficiency),
        trends::AVG_EFFICIENCY
    );
    let _ = writeln!(
        output,
        "- Fuel used: {:.0} L ({})",
        fleet.total_fuel,
        trends::FUEL_TOTAL
    );
    let _ = writeln!(
        output,
        "- Route compliance: {} ({})",
        percent(fleet.avg_route_compliance),
        trends::ROUTE_COMPLIANCE
    );

    let statuses = fleet
        .status_counts
        .iter()
        .map(|(status, count)| format!("{status} {count}"))
        .collect::<Vec<_>>()
        .join(", ");
    let _ = writeln!(output, "- Status: {statuses}");
    let _ = writeln!(output);

    let _ = writeln!(output, "### Vehicles Below Efficiency Target");
    let flagged = metrics::vehicles_needing_attention(&data.vehicles);
    if flagged.is_empty() {
        let _ = writeln!(output, "All vehicles within target.");
    } else {
        for (vehicle, alert) in flagged {
            let _ = writeln!(
                output,
                "- {} ({}, {}) efficiency {:.1}% - {}",
                vehicle.vehicle_id,
                vehicle.category,
                vehicle.status,
                vehicle.efficiency * 100.0,
                alert
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "### Fleet Positions");
    if data.vehicles.is_empty() {
        let _ = writeln!(output, "No vehicles reporting.");
    } else {
        let _ = writeln!(output, "| Vehicle | Status | Lat | Lon | Last stop |");
        let _ = writeln!(output, "|---|---|---|---|---|");
        for vehicle in &data.vehicles {
            let _ = writeln!(
                output,
                "| {} | {} | {:.4} | {:.4} | {} |",
                vehicle.vehicle_id,
                vehicle.status,
                vehicle.lat,
                vehicle.lon,
                vehicle.last_stop.format("%H:%M")
            );
        }
    }

    let history = metrics::history_summary(&data.history);
    let _ = writeln!(output);
    let _ = writeln!(output, "### Daily Trend");
    let _ = writeln!(
        output,
        "{} incidents over the window, average efficiency {}",
        history.total_incidents,
        percent(history.avg_efficiency)
    );
    let trend = metrics::daily_trend(&data.history);
    if !trend.is_empty() {
        let _ = writeln!(output);
        let _ = writeln!(output, "| Date | Km | Efficiency | Incidents |");
        let _ = writeln!(output, "|---|---|---|---|");
        for day in trend {
            let flag = day
                .efficiency_alert
                .map(|alert| format!(" ({alert})"))
                .unwrap_or_default();
            let _ = writeln!(
                output,
                "| {} | {:.0} | {:.1}%{} | {} |",
                day.date,
                day.km_day,
                day.avg_efficiency * 100.0,
                flag,
                day.incidents
            );
        }
    }
    let _ = writeln!(output);
}

fn write_supervision(output: &mut String, data: &Dataset) {
    let summary = metrics::supervision_summary(&data.supervisors);

    let _ = writeln!(output, "## Supervision");
    let _ = writeln!(
        output,
        "- Visits completed: {} ({})",
        summary.total_visits,
        trends::VISITS
    );
    let _ = writeln!(
        output,
        "- Overall compliance: {} ({})",
        percent(summary.avg_compliance),
        trends::SUPERVISION_COMPLIANCE
    );
    let _ = writeln!(
        output,
        "- Active clients: {} ({})",
        summary.total_clients,
        trends::ACTIVE_CLIENTS
    );
    let _ = writeln!(
        output,
        "- Risk score: {} ({})",
        decimal(summary.avg_risk_score),
        trends::RISK_SCORE
    );
    let _ = writeln!(output);

    let _ = writeln!(output, "| Supervisor | Name | Clients | Visits | Compliance | Status |");
    let _ = writeln!(output, "|---|---|---|---|---|---|");
    for supervisor in &data.supervisors {
        let _ = writeln!(
            output,
            "| {} | {} | {} | {} | {:.1}% | {} |",
            supervisor.supervisor_id,
            supervisor.name,
            supervisor.assigned_clients,
            supervisor.completed_visits,
            supervisor.compliance * 100.0,
            metrics::compliance_label(supervisor.compliance)
        );
    }
    let _ = writeln!(output);

    if let Some(grid) = metrics::compliance_grid(&data.supervisors) {
        let _ = writeln!(output, "### Compliance by Zone");
        let _ = writeln!(output, "| Shift | Zone 1 | Zone 2 | Zone 3 | Zone 4 | Zone 5 |");
        let _ = writeln!(output, "|---|---|---|---|---|---|");
        for (label, row) in ["AM", "PM"].iter().zip(grid.iter()) {
            let cells = row
                .iter()
                .map(|c| format!("{:.2}", c))
                .collect::<Vec<_>>()
                .join(" | ");
            let _ = writeln!(output, "| {label} | {cells} |");
        }
        let _ = writeln!(output);
    }

    let _ = writeln!(output, "### Top Supervisor Profiles");
    for supervisor in data.supervisors.iter().take(PROFILED_SUPERVISORS) {
        let profile = metrics::supervisor_profile(supervisor);
        let _ = writeln!(
            output,
            "- {}: visits {:.0}, compliance {:.0}, clients {:.0}",
            profile.name, profile.visits, profile.compliance, profile.clients
        );
    }
    let _ = writeln!(output);
}

fn write_hr(output: &mut String, data: &Dataset) {
    let summary = metrics::hr_summary(&data.guards);

    let _ = writeln!(output, "## Human Resources");
    let _ = writeln!(
        output,
        "- Attendance: {} ({})",
        percent(summary.attendance_rate),
        trends::ATTENDANCE
    );
    let _ = writeln!(
        output,
        "- Overtime hours: {} ({})",
        summary.overtime_hours,
        trends::OVERTIME
    );
    let _ = writeln!(
        output,
        "- Payroll alerts: {} ({})",
        summary.payroll_alerts,
        trends::PAYROLL_ALERTS
    );
    let _ = writeln!(
        output,
        "- Personnel coverage: {} ({})",
        percent(Some(executive::PERSONNEL_COVERAGE)),
        trends::COVERAGE
    );
    let _ = writeln!(
        output,
        "- Payroll total: ${:.0}, {} duplicate payments, {} inconsistencies",
        summary.payroll_total,
        summary.duplicate_payments,
        summary.inconsistencies
    );
    let _ = writeln!(output);

    let _ = writeln!(output, "### Absenteeism Forecast");
    let mut rng = seeded_rng(data.seed ^ FORECAST_STREAM);
    let start = data.anchor.date() + Duration::days(1);
    for point in absenteeism_forecast(&mut rng, start, FORECAST_DAYS) {
        let _ = writeln!(
            output,
            "- {}: predicted {:.1}%, baseline {:.1}%",
            point.date,
            point.predicted * 100.0,
            point.baseline * 100.0
        );
    }
    let _ = writeln!(output);

    let _ = writeln!(output, "### Guards With Payroll Alerts");
    let flagged = metrics::guards_with_payroll_alerts(&data.guards);
    if flagged.is_empty() {
        let _ = writeln!(output, "No payroll alerts.");
    } else {
        for guard in flagged {
            let _ = writeln!(
                output,
                "- {} ({}, {} shift, {}): {}",
                guard.guard_id, guard.name, guard.shift, guard.attendance, guard.payroll_alert
            );
        }
    }
    let _ = writeln!(output);
}

fn write_executive(output: &mut String) {
    let _ = writeln!(output, "## Executive Decisions");

    for highlight in executive::HIGHLIGHTS.iter() {
        let _ = writeln!(output, "### {}", highlight.area);
        for point in highlight.points {
            let _ = writeln!(output, "- {point}");
        }
    }
    let _ = writeln!(output);

    let _ = writeln!(output, "### Decision Matrix");
    for decision in executive::prioritized_decisions() {
        let _ = writeln!(
            output,
            "- {}: impact {}, urgency {}, risk {} - {}",
            decision.area, decision.impact, decision.urgency, decision.risk, decision.action
        );
    }
    let _ = writeln!(output);

    let _ = writeln!(
        output,
        "Integrated risk score {:.0} (reference {:.0}, {} band). Optimization saves {}k over the projection window.",
        executive::GAUGE_VALUE,
        executive::GAUGE_REFERENCE,
        executive::risk_band(executive::GAUGE_VALUE),
        executive::projected_savings()
    );
    let _ = writeln!(output);

    let _ = writeln!(output, "### Recommendations");
    for rec in executive::RECOMMENDATIONS.iter() {
        let _ = writeln!(output, "- [{}] {} ({})", rec.priority, rec.action, rec.outcome);
    }

    let _ = writeln!(output);
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::generator::{SampleDataGenerator, DEFAULT_SEED};

    fn dataset() -> Dataset {
        let anchor = NaiveDate::from_ymd_opt(2026, 2, 2)
            .and_then(|d| d.and_hms_opt(10, 15, 0))
            .expect("valid anchor");
        SampleDataGenerator::new(DEFAULT_SEED, anchor).generate()
    }

    #[test]
    fn report_covers_every_panel() {
        let report = build_report(&dataset());
        for heading in [
            "# SecureFleet Control Center",
            "## Alert Center",
            "## Fleet",
            "## Supervision",
            "## Human Resources",
            "## Executive Decisions",
        ] {
            assert!(report.contains(heading), "missing {heading}");
        }
        assert!(report.contains("Generated at 2026-02-02 10:15:00 (seed 42)"));
    }

    #[test]
    fn report_is_stable_for_a_fixed_dataset() {
        let data = dataset();
        assert_eq!(build_report(&data), build_report(&data));
    }

    #[test]
    fn lists_only_the_most_recent_alerts() {
        let data = dataset();
        let report = build_report(&data);
        assert!(report.contains(&data.alerts[0].message));
        assert!(report.contains(&data.alerts[RECENT_ALERTS - 1].message));
        assert!(!report.contains(&data.alerts[RECENT_ALERTS].message));
    }

    #[test]
    fn empty_dataset_still_renders() {
        let mut data = dataset();
        data.vehicles.clear();
        data.supervisors.clear();
        data.guards.clear();
        data.history.clear();
        data.alerts.clear();

        let report = build_report(&data);
        assert!(report.contains("No alerts in the feed."));
        assert!(report.contains("Average efficiency: n/a"));
        assert!(report.contains("All vehicles within target."));
        assert!(report.contains("No payroll alerts."));
        assert!(report.contains("No vehicles reporting."));
        assert!(!report.contains("### Compliance by Zone"));
        assert!(report.contains("- Km today: 0 ("));
        assert!(report.contains("- Fuel used: 0 L ("));
        assert!(report.contains("- Payroll total: $0,"));
        assert!(!report.contains(": -0"), "negative zero in:\n{report}");
        assert!(!report.contains("$-0"), "negative zero in:\n{report}");
    }

    #[test]
    fn supervision_section_includes_grid_and_profiles() {
        let data = dataset();
        let report = build_report(&data);
        assert!(report.contains("### Compliance by Zone"));
        assert!(report.contains("| AM |"));
        assert!(report.contains("- Supervisor 3: visits"));
        assert!(!report.contains("- Supervisor 4: visits"));
    }

    #[test]
    fn fleet_section_lists_positions_for_every_vehicle() {
        let data = dataset();
        let report = build_report(&data);
        assert!(report.contains("### Fleet Positions"));
        for vehicle in &data.vehicles {
            let row = format!(
                "| {} | {} | {:.4} | {:.4} |",
                vehicle.vehicle_id, vehicle.status, vehicle.lat, vehicle.lon
            );
            assert!(report.contains(&row), "missing {row}");
        }
    }

    #[test]
    fn fleet_section_has_one_trend_row_per_history_day() {
        let data = dataset();
        let report = build_report(&data);
        let first = data.history.first().expect("history");
        let last = data.history.last().expect("history");

        assert!(report.contains("### Daily Trend"));
        assert!(report.contains(&format!("| {} | {:.0} |", first.date, first.km_total)));
        assert!(report.contains(&format!("| {} |", last.date)));
        let rows = report
            .lines()
            .filter(|line| line.starts_with("| 2026-"))
            .count();
        assert_eq!(rows, data.history.len());
    }

    #[test]
    fn forecast_starts_the_day_after_the_anchor() {
        let report = build_report(&dataset());
        assert!(report.contains("- 2026-02-03: predicted"));
        assert!(report.contains("- 2026-02-09: predicted"));
        assert!(!report.contains("- 2026-02-10: predicted"));
    }
}
