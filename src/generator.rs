use std::sync::LazyLock;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use rand::Rng;
use tracing::debug;

use crate::models::{
    AbsenteeismPoint, AlertCategory, AlertEvent, AlertSeverity, Attendance, Dataset, Guard,
    HistoryPoint, PayrollAlert, Shift, Supervisor, Vehicle, VehicleCategory, VehicleStatus,
};
use crate::sampling::{poisson, seeded_rng, Categorical, DistributionError};

pub const DEFAULT_SEED: u64 = 42;

pub const VEHICLE_COUNT: usize = 15;
pub const SUPERVISOR_COUNT: usize = 10;
pub const GUARD_COUNT: usize = 50;
pub const HISTORY_DAYS: usize = 30;
pub const ALERT_COUNT: usize = 20;

const ALERT_INTERVAL_MINUTES: i64 = 5;
const INCIDENT_RATE: f64 = 2.0;

const ALERT_MESSAGES: [&str; 20] = [
    "Excess fuel consumption detected on VH-005",
    "Unauthorized stop - VH-008",
    "Supervisor SUP-003 missed scheduled visits",
    "Payroll alert: duplicate payment GRD-0015",
    "Urgent maintenance required VH-012",
    "Optimized route available for VH-007",
    "Night shift absenteeism above 15%",
    "Priority client without supervision",
    "Vehicle VH-003 off route",
    "Replacement needed for GRD-0032",
    "Efficiency KPI below critical threshold",
    "New incident reported - North Zone",
    "Security update available",
    "Supervisor SUP-007 exceeded target",
    "Low fuel on VH-011",
    "Speed alert VH-009",
    "Shift change without coverage",
    "VIP client requests supervision",
    "Preventive maintenance scheduled",
    "Tracking system updated",
];

static DISTRIBUTIONS: LazyLock<Distributions> =
    LazyLock::new(|| Distributions::standard().expect("literal weights"));

struct Distributions {
    vehicle_category: Categorical<VehicleCategory>,
    vehicle_status: Categorical<VehicleStatus>,
    shift: Categorical<Shift>,
    attendance: Categorical<Attendance>,
    payroll_alert: Categorical<PayrollAlert>,
    alert_severity: Categorical<AlertSeverity>,
    alert_category: Categorical<AlertCategory>,
}

impl Distributions {
    fn standard() -> Result<Self, DistributionError> {
        Ok(Self {
            vehicle_category: Categorical::uniform(&[
                VehicleCategory::ArmoredA,
                VehicleCategory::ArmoredB,
                VehicleCategory::Pickup,
            ])?,
            vehicle_status: Categorical::new(vec![
                (VehicleStatus::Active, 0.4),
                (VehicleStatus::EnRoute, 0.3),
                (VehicleStatus::Maintenance, 0.1),
                (VehicleStatus::Available, 0.2),
            ])?,
            shift: Categorical::uniform(&[Shift::Morning, Shift::Afternoon, Shift::Night])?,
            attendance: Categorical::new(vec![
                (Attendance::Present, 0.8),
                (Attendance::Absent, 0.1),
                (Attendance::Late, 0.1),
            ])?,
            payroll_alert: Categorical::new(vec![
                (PayrollAlert::None, 0.8),
                (PayrollAlert::DuplicatePayment, 0.1),
                (PayrollAlert::Inconsistency, 0.1),
            ])?,
            alert_severity: Categorical::new(vec![
                (AlertSeverity::Critical, 0.2),
                (AlertSeverity::Warning, 0.4),
                (AlertSeverity::Info, 0.4),
            ])?,
            alert_category: Categorical::uniform(&[
                AlertCategory::Fleet,
                AlertCategory::Supervision,
                AlertCategory::HumanResources,
                AlertCategory::Security,
            ])?,
        })
    }
}

/// Builds the mock dashboard tables. Output depends only on the seed, the
/// anchor timestamp and the random stream handed to [`generate_with`].
///
/// [`generate_with`]: SampleDataGenerator::generate_with
pub struct SampleDataGenerator {
    seed: u64,
    anchor: NaiveDateTime,
    dists: &'static Distributions,
}

impl SampleDataGenerator {
    pub fn new(seed: u64, anchor: NaiveDateTime) -> Self {
        Self {
            seed,
            anchor,
            dists: &DISTRIBUTIONS,
        }
    }

    pub fn generate(&self) -> Dataset {
        let mut rng = seeded_rng(self.seed);
        self.generate_with(&mut rng)
    }

    pub fn generate_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Dataset {
        debug!(seed = self.seed, anchor = %self.anchor, "generating sample dataset");

        let vehicles = self.vehicles(rng);
        let supervisors = self.supervisors(rng);
        let guards = self.guards(rng);
        let history = self.history(rng);
        let alerts = self.alerts(rng, ALERT_COUNT);

        Dataset {
            seed: self.seed,
            anchor: self.anchor,
            vehicles,
            supervisors,
            guards,
            history,
            alerts,
        }
    }

    fn vehicles<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<Vehicle> {
        (1..=VEHICLE_COUNT)
            .map(|i| Vehicle {
                vehicle_id: format!("VH-{i:03}"),
                category: self.dists.vehicle_category.sample(rng),
                status: self.dists.vehicle_status.sample(rng),
                km_today: rng.gen_range(150.0..350.0),
                fuel_liters: rng.gen_range(20.0..60.0),
                efficiency: rng.gen_range(0.75..0.95),
                last_stop: self.anchor - Duration::minutes(rng.gen_range(5..120)),
                lat: rng.gen_range(-12.08..-11.95),
                lon: rng.gen_range(-77.08..-76.95),
                route_compliance: rng.gen_range(0.80..1.0),
            })
            .collect()
    }

    fn supervisors<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<Supervisor> {
        (1..=SUPERVISOR_COUNT)
            .map(|i| Supervisor {
                supervisor_id: format!("SUP-{i:03}"),
                name: format!("Supervisor {i}"),
                assigned_clients: rng.gen_range(5..15),
                completed_visits: rng.gen_range(3..12),
                compliance: rng.gen_range(0.70..1.0),
                risk_score: rng.gen_range(0.0..30.0),
            })
            .collect()
    }

    fn guards<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<Guard> {
        (1..=GUARD_COUNT)
            .map(|i| Guard {
                guard_id: format!("GRD-{i:04}"),
                name: format!("Guard {i}"),
                shift: self.dists.shift.sample(rng),
                attendance: self.dists.attendance.sample(rng),
                overtime_hours: rng.gen_range(0..20),
                base_salary: rng.gen_range(1500.0..3000.0),
                payroll_alert: self.dists.payroll_alert.sample(rng),
            })
            .collect()
    }

    fn history<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<HistoryPoint> {
        let last_day = self.anchor.date();
        let mut km_total = 0.0;
        let mut fuel_total = 0.0;

        (0..HISTORY_DAYS)
            .map(|offset| {
                km_total += rng.gen_range(3000.0..5000.0);
                fuel_total += rng.gen_range(400.0..800.0);
                let days_back = (HISTORY_DAYS - 1 - offset) as i64;
                HistoryPoint {
                    date: last_day - Duration::days(days_back),
                    km_total,
                    fuel_total,
                    incidents: poisson(rng, INCIDENT_RATE),
                    avg_efficiency: rng.gen_range(0.75..0.95),
                }
            })
            .collect()
    }

    fn alerts<R: Rng + ?Sized>(&self, rng: &mut R, count: usize) -> Vec<AlertEvent> {
        ALERT_MESSAGES
            .iter()
            .take(count)
            .enumerate()
            .map(|(i, message)| AlertEvent {
                timestamp: self.anchor - Duration::minutes(ALERT_INTERVAL_MINUTES * i as i64),
                severity: self.dists.alert_severity.sample(rng),
                category: self.dists.alert_category.sample(rng),
                message: (*message).to_string(),
            })
            .collect()
    }
}

/// Seven-day absenteeism projection for the HR tab. Drawn per render, outside the cached tables.
pub fn absenteeism_forecast<R: Rng + ?Sized>(
    rng: &mut R,
    start: NaiveDate,
    days: usize,
) -> Vec<AbsenteeismPoint> {
    (0..days)
        .map(|offset| AbsenteeismPoint {
            date: start + Duration::days(offset as i64),
            predicted: rng.gen_range(0.08..0.20),
            baseline: rng.gen_range(0.10..0.15),
        })
        .collect()
}
