use serde::{Deserialize, Serialize};

pub const STATUS_RUN: &str = "RUN";
pub const STATUS_IDLE: &str = "IDLE";
pub const STATUS_STOP: &str = "STOP";

const SECONDS_PER_HOUR: f64 = 3600.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MachineCategory {
    General,
    CoolingTower,
    KompresorUnit,
    MaterialHandling,
}

impl MachineCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            MachineCategory::General => "general",
            MachineCategory::CoolingTower => "cooling_tower",
            MachineCategory::KompresorUnit => "kompresor_unit",
            MachineCategory::MaterialHandling => "material_handling",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "general" => Some(MachineCategory::General),
            "cooling_tower" => Some(MachineCategory::CoolingTower),
            "kompresor_unit" => Some(MachineCategory::KompresorUnit),
            "material_handling" => Some(MachineCategory::MaterialHandling),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MachineCategory::General => "General",
            MachineCategory::CoolingTower => "Cooling Tower",
            MachineCategory::KompresorUnit => "Kompresor Unit",
            MachineCategory::MaterialHandling => "Material Handling",
        }
    }

    pub const ALL: [MachineCategory; 4] = [
        MachineCategory::General,
        MachineCategory::CoolingTower,
        MachineCategory::KompresorUnit,
        MachineCategory::MaterialHandling,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MachineStatus {
    Run,
    Idle,
    Stop,
}

impl MachineStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MachineStatus::Run => STATUS_RUN,
            MachineStatus::Idle => STATUS_IDLE,
            MachineStatus::Stop => STATUS_STOP,
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            STATUS_RUN => Some(MachineStatus::Run),
            STATUS_IDLE => Some(MachineStatus::Idle),
            STATUS_STOP => Some(MachineStatus::Stop),
            _ => None,
        }
    }
}

/// Category-specific machine attributes. Stored as one JSON column; unknown
/// or malformed payloads degrade to `None` so a corrupt record never takes a
/// page down.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MachineDetails {
    CoolingTower {
        water_capacity_liters: f64,
        pump_type: String,
    },
    Compressor {
        pressure_bar: f64,
        temperature_celsius: f64,
    },
    MaterialHandling {
        odometer_km: f64,
        drive_type: String,
        service_interval_km: f64,
    },
    #[default]
    None,
}

/// Last-notified service checkpoint: the threshold band that fired, the
/// gauge value at that moment, and when.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ServiceCheckpoint {
    pub threshold: f64,
    pub value: f64,
    pub at: i64,
}

#[derive(Debug, Clone)]
pub struct Machine {
    pub id: i64,
    pub machine_id: String,
    pub name: String,
    pub category: MachineCategory,
    pub location: String,
    pub status: MachineStatus,
    pub current_runtime_hours: f64,
    pub service_interval_hours: f64,
    /// Set only while status is RUN.
    pub last_run_start: Option<i64>,
    pub details: MachineDetails,
    pub runtime_checkpoint: Option<ServiceCheckpoint>,
    pub odometer_checkpoint: Option<ServiceCheckpoint>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Machine {
    /// Runtime to display for the machine right now. While RUN this adds the
    /// elapsed wall-clock time since the run started without touching the
    /// stored value; the stored hours only advance when the machine actually
    /// leaves RUN.
    pub fn displayed_runtime_hours(&self, now: i64) -> f64 {
        match (self.status, self.last_run_start) {
            (MachineStatus::Run, Some(start)) if now > start => {
                self.current_runtime_hours + (now - start) as f64 / SECONDS_PER_HOUR
            }
            _ => self.current_runtime_hours,
        }
    }

    /// Commit a status transition. Entering RUN records the start marker;
    /// leaving RUN folds the elapsed duration into `current_runtime_hours`
    /// and clears the marker. RUN -> RUN is a no-op so reselecting the same
    /// status never resets the running clock.
    pub fn apply_status(&mut self, next: MachineStatus, now: i64) {
        match (self.status, next) {
            (MachineStatus::Run, MachineStatus::Run) => {}
            (MachineStatus::Run, _) => {
                if let Some(start) = self.last_run_start.take() {
                    if now > start {
                        self.current_runtime_hours += (now - start) as f64 / SECONDS_PER_HOUR;
                    }
                }
                self.status = next;
            }
            (_, MachineStatus::Run) => {
                self.status = MachineStatus::Run;
                self.last_run_start = Some(now);
            }
            (_, _) => {
                self.status = next;
            }
        }
    }
}
