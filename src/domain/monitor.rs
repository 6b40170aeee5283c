use crate::domain::machine::{Machine, MachineCategory, MachineDetails, ServiceCheckpoint};

/// Threshold configuration for the service monitor. The 90/100/5% numbers
/// are the historical behavior; they are carried here as configuration
/// rather than constants baked into the evaluation.
#[derive(Debug, Clone, Copy)]
pub struct ThresholdPolicy {
    pub warning_percent: f64,
    pub overdue_percent: f64,
    /// Fraction of the service interval the gauge must advance past the
    /// last-notified value before the same band re-alerts.
    pub realert_drift: f64,
}

impl Default for ThresholdPolicy {
    fn default() -> Self {
        ThresholdPolicy {
            warning_percent: 90.0,
            overdue_percent: 100.0,
            realert_drift: 0.05,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertLevel {
    Warning,
    Critical,
}

impl AlertLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertLevel::Warning => "warning",
            AlertLevel::Critical => "critical",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "warning" => Some(AlertLevel::Warning),
            "critical" => Some(AlertLevel::Critical),
            _ => None,
        }
    }
}

/// Which gauge the crossing was measured on; decides which checkpoint field
/// on the machine record must advance on emission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GaugeKind {
    RuntimeHours,
    OdometerKm,
}

/// A service-due crossing that passed the checkpoint dedupe and should be
/// turned into a notification.
#[derive(Debug, Clone)]
pub struct ServiceAlert {
    pub level: AlertLevel,
    pub gauge: GaugeKind,
    pub triggered_threshold: f64,
    pub current_value: f64,
    pub interval_value: f64,
    pub message: String,
}

fn gauge_for(machine: &Machine) -> (GaugeKind, f64, f64, &'static str, Option<ServiceCheckpoint>) {
    if machine.category == MachineCategory::MaterialHandling {
        let (odometer, interval) = match machine.details {
            MachineDetails::MaterialHandling {
                odometer_km,
                service_interval_km,
                ..
            } => (odometer_km, service_interval_km),
            _ => (0.0, 0.0),
        };
        (
            GaugeKind::OdometerKm,
            odometer,
            interval,
            "km",
            machine.odometer_checkpoint,
        )
    } else {
        (
            GaugeKind::RuntimeHours,
            machine.current_runtime_hours,
            machine.service_interval_hours,
            "h",
            machine.runtime_checkpoint,
        )
    }
}

/// Evaluate a machine's service gauge against the policy. Returns an alert
/// only when a notification is actually due: the crossed band must be higher
/// than the last-notified one, or the same band with the gauge more than
/// `realert_drift` of the interval past the last-notified value.
pub fn evaluate(machine: &Machine, policy: &ThresholdPolicy) -> Option<ServiceAlert> {
    let (gauge, current, interval, unit, checkpoint) = gauge_for(machine);

    // Interval not configured: nothing to measure against.
    if interval <= 0.0 {
        return None;
    }

    let percent = current / interval * 100.0;
    let (level, triggered) = if percent >= policy.overdue_percent {
        (AlertLevel::Critical, policy.overdue_percent)
    } else if percent >= policy.warning_percent {
        (AlertLevel::Warning, policy.warning_percent)
    } else {
        return None;
    };

    let (last_threshold, last_value) = checkpoint
        .map(|cp| (cp.threshold, cp.value))
        .unwrap_or((0.0, 0.0));

    let escalated = triggered > last_threshold;
    let drifted =
        triggered == last_threshold && current > last_value + interval * policy.realert_drift;
    if !escalated && !drifted {
        return None;
    }

    let message = match level {
        AlertLevel::Critical => format!(
            "Machine {} (ID: {}) is past its service limit! ({current}/{interval} {unit})",
            machine.name, machine.machine_id
        ),
        AlertLevel::Warning => format!(
            "Machine {} (ID: {}) will need servicing soon. ({current}/{interval} {unit})",
            machine.name, machine.machine_id
        ),
    };

    Some(ServiceAlert {
        level,
        gauge,
        triggered_threshold: triggered,
        current_value: current,
        interval_value: interval,
        message,
    })
}
