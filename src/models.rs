use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use clap::ValueEnum;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleCategory {
    ArmoredA,
    ArmoredB,
    Pickup,
}

impl fmt::Display for VehicleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            VehicleCategory::ArmoredA => "Armored A",
            VehicleCategory::ArmoredB => "Armored B",
            VehicleCategory::Pickup => "Pickup",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum VehicleStatus {
    Active,
    EnRoute,
    Maintenance,
    Available,
}

impl VehicleStatus {
    pub const ALL: [VehicleStatus; 4] = [
        VehicleStatus::Active,
        VehicleStatus::EnRoute,
        VehicleStatus::Maintenance,
        VehicleStatus::Available,
    ];
}

impl fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            VehicleStatus::Active => "Active",
            VehicleStatus::EnRoute => "En route",
            VehicleStatus::Maintenance => "Maintenance",
            VehicleStatus::Available => "Available",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Vehicle {
    pub vehicle_id: String,
    pub category: VehicleCategory,
    pub status: VehicleStatus,
    pub km_today: f64,
    pub fuel_liters: f64,
    pub efficiency: f64,
    pub last_stop: NaiveDateTime,
    pub lat: f64,
    pub lon: f64,
    pub route_compliance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Supervisor {
    pub supervisor_id: String,
    pub name: String,
    pub assigned_clients: u32,
    pub completed_visits: u32,
    pub compliance: f64,
    pub risk_score: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Shift {
    Morning,
    Afternoon,
    Night,
}

impl fmt::Display for Shift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Shift::Morning => "Morning",
            Shift::Afternoon => "Afternoon",
            Shift::Night => "Night",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Attendance {
    Present,
    Absent,
    Late,
}

impl Attendance {
    pub const ALL: [Attendance; 3] = [Attendance::Present, Attendance::Absent, Attendance::Late];
}

impl fmt::Display for Attendance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Attendance::Present => "Present",
            Attendance::Absent => "Absent",
            Attendance::Late => "Late",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PayrollAlert {
    None,
    DuplicatePayment,
    Inconsistency,
}

impl fmt::Display for PayrollAlert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PayrollAlert::None => "No alerts",
            PayrollAlert::DuplicatePayment => "Duplicate payment",
            PayrollAlert::Inconsistency => "Inconsistency",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Guard {
    pub guard_id: String,
    pub name: String,
    pub shift: Shift,
    pub attendance: Attendance,
    pub overtime_hours: u32,
    pub base_salary: f64,
    pub payroll_alert: PayrollAlert,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryPoint {
    pub date: NaiveDate,
    pub km_total: f64,
    pub fuel_total: f64,
    pub incidents: u32,
    pub avg_efficiency: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertSeverity {
    Critical,
    Warning,
    Info,
}

impl AlertSeverity {
    pub const ALL: [AlertSeverity; 3] = [
        AlertSeverity::Critical,
        AlertSeverity::Warning,
        AlertSeverity::Info,
    ];
}

impl fmt::Display for AlertSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AlertSeverity::Critical => "Critical",
            AlertSeverity::Warning => "Warning",
            AlertSeverity::Info => "Info",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertCategory {
    Fleet,
    Supervision,
    HumanResources,
    Security,
}

impl fmt::Display for AlertCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AlertCategory::Fleet => "Fleet",
            AlertCategory::Supervision => "Supervision",
            AlertCategory::HumanResources => "HR",
            AlertCategory::Security => "Security",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertEvent {
    pub timestamp: NaiveDateTime,
    pub severity: AlertSeverity,
    pub category: AlertCategory,
    pub message: String,
}

/// One day of the absenteeism chart: predicted rate against the historical baseline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AbsenteeismPoint {
    pub date: NaiveDate,
    pub predicted: f64,
    pub baseline: f64,
}

/// Every table behind the dashboard, drawn together from a single seeded stream.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub seed: u64,
    pub anchor: NaiveDateTime,
    pub vehicles: Vec<Vehicle>,
    pub supervisors: Vec<Supervisor>,
    pub guards: Vec<Guard>,
    pub history: Vec<HistoryPoint>,
    pub alerts: Vec<AlertEvent>,
}
