use crate::table::CellValue;

use super::report::MetricReport;

pub const PROCESS_COLUMNS: [&str; 4] = ["PID", "Name", "CPU %", "Memory %"];

#[derive(Debug, Clone, PartialEq)]
pub struct ProcessRow {
    pub pid: u32,
    pub name: String,
    pub cpu_percent: f64,
    pub memory_percent: f64,
}

impl ProcessRow {
    pub fn cells(&self) -> Vec<CellValue> {
        vec![
            CellValue::Int(self.pid as i64),
            CellValue::Text(self.name.clone()),
            CellValue::Float(round_tenth(self.cpu_percent)),
            CellValue::Float(round_tenth(self.memory_percent)),
        ]
    }
}

fn round_tenth(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

/// Everything the dashboard displays, as of the last accepted report.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricSnapshot {
    pub cpu_usage: f64,
    pub memory_usage: f64,
    pub gpu_usage: f64,
    pub disk_read_rate: Option<f64>,
    pub disk_write_rate: Option<f64>,
    pub upload_rate: Option<f64>,
    pub download_rate: Option<f64>,
    pub battery_charge: Option<f64>,
    pub processes: Vec<ProcessRow>,
}

impl MetricSnapshot {
    /// The static values shown when no collector is configured.
    pub fn placeholder() -> Self {
        Self {
            cpu_usage: 49.0,
            memory_usage: 75.0,
            gpu_usage: 19.0,
            disk_read_rate: Some(1_000_000_000.0),
            disk_write_rate: Some(3_000_000_000.0),
            upload_rate: None,
            download_rate: None,
            battery_charge: None,
            processes: vec![
                ProcessRow {
                    pid: 123,
                    name: "python".to_string(),
                    cpu_percent: 10.5,
                    memory_percent: 20.1,
                },
                ProcessRow {
                    pid: 456,
                    name: "chrome".to_string(),
                    cpu_percent: 5.2,
                    memory_percent: 15.3,
                },
            ],
        }
    }

    /// Merges a parsed report. Fields the report does not carry keep their
    /// previous value.
    pub fn apply(&mut self, report: &MetricReport, disk_rates: Option<(f64, f64)>) {
        self.cpu_usage = report.cpu_usage.clamp(0.0, 100.0);
        self.memory_usage = report.memory_usage.clamp(0.0, 100.0);
        if let Some(gpu) = report.gpu_usage {
            self.gpu_usage = gpu.clamp(0.0, 100.0);
        }
        if let Some((read, write)) = disk_rates {
            self.disk_read_rate = Some(read);
            self.disk_write_rate = Some(write);
        }
        if let Some((up, down)) = report.network_rates {
            self.upload_rate = Some(up);
            self.download_rate = Some(down);
        }
        if let Some(charge) = report.battery_charge {
            self.battery_charge = Some(charge);
        }
        if let Some(processes) = &report.processes {
            self.processes = processes.clone();
        }
    }

    pub fn process_cells(&self) -> Vec<Vec<CellValue>> {
        self.processes.iter().map(ProcessRow::cells).collect()
    }
}
