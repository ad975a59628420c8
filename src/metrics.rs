//! Prometheus metrics for the command interpreter
//!
//! Features:
//! - Command counts by keyword and status
//! - Admission outcomes (parked, full, duplicate)
//! - Departure outcomes (vacated, not found)
//! - Lot capacity and occupancy gauges

use crate::error::{Error, Result};
use crate::lot::{LotStats, ParkOutcome};
use prometheus::{Encoder, IntCounterVec, IntGauge, Opts, Registry, TextEncoder};
use tracing::info;

lazy_static::lazy_static! {
    /// Global metrics registry
    pub static ref METRICS_REGISTRY: Registry = Registry::new();

    pub static ref COMMANDS_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("parking_commands_total", "Total number of commands executed"),
        &["command", "status"]
    ).unwrap();

    pub static ref ADMISSIONS_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("parking_admissions_total", "Park requests by outcome"),
        &["outcome"]
    ).unwrap();

    pub static ref DEPARTURES_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("parking_departures_total", "Leave requests by outcome"),
        &["outcome"]
    ).unwrap();

    pub static ref LOT_CAPACITY: IntGauge = IntGauge::new(
        "parking_lot_capacity",
        "Number of slots in the lot"
    ).unwrap();

    pub static ref OCCUPIED_SLOTS: IntGauge = IntGauge::new(
        "parking_occupied_slots",
        "Number of slots currently holding a car"
    ).unwrap();
}

/// Initialize metrics registry
pub fn init_metrics() {
    info!("Initializing Prometheus metrics");

    // Registering twice is harmless
    METRICS_REGISTRY.register(Box::new(COMMANDS_TOTAL.clone())).ok();
    METRICS_REGISTRY.register(Box::new(ADMISSIONS_TOTAL.clone())).ok();
    METRICS_REGISTRY.register(Box::new(DEPARTURES_TOTAL.clone())).ok();
    METRICS_REGISTRY.register(Box::new(LOT_CAPACITY.clone())).ok();
    METRICS_REGISTRY.register(Box::new(OCCUPIED_SLOTS.clone())).ok();
}

/// Render all registered metrics in the Prometheus text format
pub fn export_metrics() -> Result<String> {
    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();
    encoder
        .encode(&METRICS_REGISTRY.gather(), &mut buffer)
        .map_err(|e| Error::Internal(format!("Failed to encode metrics: {}", e)))?;

    String::from_utf8(buffer)
        .map_err(|e| Error::Internal(format!("Metrics are not valid UTF-8: {}", e)))
}

/// Record one executed command
pub fn record_command(command: &str, success: bool) {
    let status = if success { "success" } else { "error" };
    COMMANDS_TOTAL.with_label_values(&[command, status]).inc();
}

/// Record the outcome of a park request
pub fn record_admission(outcome: &Result<ParkOutcome>) {
    let label = match outcome {
        Ok(ParkOutcome::Parked(_)) => "parked",
        Ok(ParkOutcome::Full) => "full",
        Err(Error::DuplicateOccupant { .. }) => "duplicate",
        Err(_) => "error",
    };
    ADMISSIONS_TOTAL.with_label_values(&[label]).inc();
}

/// Record the outcome of a leave request
pub fn record_departure(vacated: bool) {
    let label = if vacated { "vacated" } else { "not_found" };
    DEPARTURES_TOTAL.with_label_values(&[label]).inc();
}

/// Update capacity and occupancy gauges
pub fn update_occupancy(stats: &LotStats) {
    LOT_CAPACITY.set(i64::from(stats.capacity));
    OCCUPIED_SLOTS.set(i64::from(stats.occupied));
}
