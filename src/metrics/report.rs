use serde::Deserialize;

use crate::error::ReportError;

use super::snapshot::ProcessRow;

/// Cumulative sector counters summed over whole disks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DiskCounters {
    pub sectors_read: u64,
    pub sectors_written: u64,
}

/// One accepted collector document.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MetricReport {
    pub cpu_usage: f64,
    pub memory_usage: f64,
    pub gpu_usage: Option<f64>,
    /// Rates reported directly, in bytes per second.
    pub disk_rates: Option<(f64, f64)>,
    pub disk_counters: Option<DiskCounters>,
    /// Summed (upload, download) in bytes per second.
    pub network_rates: Option<(f64, f64)>,
    pub battery_charge: Option<f64>,
    pub processes: Option<Vec<ProcessRow>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireReport {
    cpu_usage: Option<f64>,
    memory_usage: Option<f64>,
    gpu_usage: Option<f64>,
    disk_read_rate: Option<f64>,
    disk_write_rate: Option<f64>,
    cpu: Option<WireCpu>,
    memory: Option<WireMemory>,
    processes: Option<Vec<WireProcess>>,
    process_info: Option<WireProcessInfo>,
    disk: Option<WireDisk>,
    network: Option<WireNetwork>,
    battery: Option<WireBattery>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireCpu {
    cpu_usage: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireMemory {
    memory_usage: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireProcessInfo {
    processes: Option<Vec<WireProcess>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireProcess {
    #[serde(alias = "process_id")]
    pid: u32,
    #[serde(alias = "process_name")]
    name: String,
    cpu_percent: Option<f64>,
    memory_percent: Option<f64>,
    cpu: Option<WireProcessCpu>,
    memory: Option<WireProcessMemory>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireProcessCpu {
    cpu_usage: f64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireProcessMemory {
    memory_percent: f64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireDisk {
    disks: Option<Vec<WireDiskStats>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireDiskStats {
    device: String,
    sectors_read: u64,
    sectors_written: u64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireNetwork {
    interfaces: Option<Vec<WireInterface>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireInterface {
    upload_rate_bytes_per_sec: f64,
    download_rate_bytes_per_sec: f64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireBattery {
    current_capacity: Option<f64>,
}

impl WireProcess {
    fn into_row(self) -> ProcessRow {
        ProcessRow {
            pid: self.pid,
            name: self.name,
            cpu_percent: self
                .cpu_percent
                .or(self.cpu.map(|c| c.cpu_usage))
                .unwrap_or(0.0),
            memory_percent: self
                .memory_percent
                .or(self.memory.map(|m| m.memory_percent))
                .unwrap_or(0.0),
        }
    }
}

/// Parses one collector document. Accepts both the flat form
/// (`{"cpu_usage": .., "memory_usage": ..}`) and the collector's full snapshot
/// form with nested `cpu`/`memory`/`process_info` sections.
pub fn parse_report(input: &str) -> Result<MetricReport, ReportError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ReportError::Empty);
    }
    let wire: WireReport = serde_json::from_str(input)?;

    let cpu_usage = wire
        .cpu_usage
        .or(wire.cpu.and_then(|c| c.cpu_usage))
        .ok_or(ReportError::MissingField("cpu_usage"))?;
    let memory_usage = wire
        .memory_usage
        .or(wire.memory.and_then(|m| m.memory_usage))
        .ok_or(ReportError::MissingField("memory_usage"))?;

    let disk_rates = match (wire.disk_read_rate, wire.disk_write_rate) {
        (Some(read), Some(write)) => Some((read.max(0.0), write.max(0.0))),
        _ => None,
    };

    let disk_counters = wire
        .disk
        .and_then(|d| d.disks)
        .map(|disks| sum_whole_disks(&disks));

    let network_rates = wire.network.and_then(|n| n.interfaces).map(|ifaces| {
        ifaces.iter().fold((0.0, 0.0), |(up, down), i| {
            (
                up + i.upload_rate_bytes_per_sec.max(0.0),
                down + i.download_rate_bytes_per_sec.max(0.0),
            )
        })
    });

    // The collector reports -1 when no battery is present.
    let battery_charge = wire
        .battery
        .and_then(|b| b.current_capacity)
        .filter(|c| *c >= 0.0);

    let processes = wire
        .processes
        .or(wire.process_info.and_then(|p| p.processes))
        .map(|procs| procs.into_iter().map(WireProcess::into_row).collect());

    Ok(MetricReport {
        cpu_usage,
        memory_usage,
        gpu_usage: wire.gpu_usage,
        disk_rates,
        disk_counters,
        network_rates,
        battery_charge,
        processes,
    })
}

/// Partitions (`sda1`, `nvme0n1p2`) repeat their parent's counters, so only
/// devices that are not a partition of another listed device are summed.
fn sum_whole_disks(disks: &[WireDiskStats]) -> DiskCounters {
    disks
        .iter()
        .filter(|d| {
            !disks
                .iter()
                .any(|parent| is_partition_of(&d.device, &parent.device))
        })
        .fold(DiskCounters::default(), |acc, d| DiskCounters {
            sectors_read: acc.sectors_read.saturating_add(d.sectors_read),
            sectors_written: acc.sectors_written.saturating_add(d.sectors_written),
        })
}

/// `sda1` belongs to `sda` and `nvme0n1p2` to `nvme0n1`; `dm-10` is its own
/// device even when `dm-1` is listed.
fn is_partition_of(device: &str, parent: &str) -> bool {
    let Some(suffix) = device.strip_prefix(parent) else {
        return false;
    };
    let is_number = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    match parent.bytes().last() {
        Some(b) if b.is_ascii_alphabetic() => is_number(suffix),
        Some(b) if b.is_ascii_digit() => suffix.strip_prefix('p').is_some_and(is_number),
        _ => false,
    }
}

/// Splits collector output into documents, one per non-empty line.
pub fn parse_lines(output: &str) -> Vec<Result<MetricReport, ReportError>> {
    output
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(parse_report)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_flat_document() {
        let report = parse_report(r#"{"cpu_usage": 12.5, "memory_usage": 40.0}"#).unwrap();
        assert_eq!(report.cpu_usage, 12.5);
        assert_eq!(report.memory_usage, 40.0);
        assert!(report.processes.is_none());
        assert!(report.gpu_usage.is_none());
    }

    #[test]
    fn parses_full_snapshot_document() {
        let doc = r#"{
            "cpu": {"cpu_usage": 33.0, "cpu_name": "Test CPU", "per_core_usage": []},
            "memory": {"memory_usage": 61.5, "cached_memory": 1000},
            "process_info": {"processes": [
                {"type": "app", "process_id": 42, "process_name": "firefox",
                 "user": "me", "status": "Sleeping",
                 "cpu": {"cpu_usage": 7.25, "cpu_time": 1.0},
                 "memory": {"memory_usage_kb": 1024, "memory_percent": 3.5},
                 "threads": 12}
            ]},
            "disk": {"disks": [
                {"device": "sda", "sectors_read": 100, "sectors_written": 50},
                {"device": "sda1", "sectors_read": 90, "sectors_written": 40},
                {"device": "nvme0n1", "sectors_read": 10, "sectors_written": 5}
            ]},
            "network": {"interfaces": [
                {"interface": "eth0", "upload_rate_bytes_per_sec": 100.0, "download_rate_bytes_per_sec": 200.0},
                {"interface": "wlan0", "upload_rate_bytes_per_sec": 1.0, "download_rate_bytes_per_sec": 2.0}
            ]},
            "battery": {"status": "Unavailable", "current_capacity": -1},
            "timestamp": "2025-01-01T00:00:00Z"
        }"#;
        let report = parse_report(doc).unwrap();
        assert_eq!(report.cpu_usage, 33.0);
        assert_eq!(report.memory_usage, 61.5);
        assert_eq!(
            report.disk_counters,
            Some(DiskCounters {
                sectors_read: 110,
                sectors_written: 55
            })
        );
        assert_eq!(report.network_rates, Some((101.0, 202.0)));
        assert_eq!(report.battery_charge, None);

        let processes = report.processes.unwrap();
        assert_eq!(processes.len(), 1);
        assert_eq!(processes[0].pid, 42);
        assert_eq!(processes[0].name, "firefox");
        assert_eq!(processes[0].cpu_percent, 7.25);
        assert_eq!(processes[0].memory_percent, 3.5);
    }

    #[test]
    fn null_sections_are_tolerated() {
        let doc = r#"{"cpu_usage": 1, "memory_usage": 2, "process_info": null, "disk": {"disks": null}}"#;
        let report = parse_report(doc).unwrap();
        assert!(report.processes.is_none());
        assert!(report.disk_counters.is_none());
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(
            parse_report("{\"cpu_usage\": 12"),
            Err(ReportError::Json(_))
        ));
        assert!(matches!(parse_report("   "), Err(ReportError::Empty)));
    }

    #[test]
    fn missing_usage_is_an_error() {
        assert!(matches!(
            parse_report(r#"{"memory_usage": 5}"#),
            Err(ReportError::MissingField("cpu_usage"))
        ));
        assert!(matches!(
            parse_report(r#"{"cpu_usage": 5}"#),
            Err(ReportError::MissingField("memory_usage"))
        ));
    }

    #[test]
    fn direct_disk_rates_need_both_directions() {
        let both =
            parse_report(r#"{"cpu_usage":1,"memory_usage":1,"disk_read_rate":10,"disk_write_rate":20}"#)
                .unwrap();
        assert_eq!(both.disk_rates, Some((10.0, 20.0)));
        let one = parse_report(r#"{"cpu_usage":1,"memory_usage":1,"disk_read_rate":10}"#).unwrap();
        assert_eq!(one.disk_rates, None);
    }

    #[test]
    fn lines_are_parsed_independently() {
        let output = "{\"cpu_usage\":1,\"memory_usage\":2}\n\nnot json\n{\"cpu_usage\":3,\"memory_usage\":4}\n";
        let results = parse_lines(output);
        assert_eq!(results.len(), 3);
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
        assert_eq!(results[2].as_ref().unwrap().cpu_usage, 3.0);
    }

    #[test]
    fn partitions_are_not_double_counted() {
        let doc = r#"{"cpu_usage": 1, "memory_usage": 1, "disk": {"disks": [
            {"device": "sda", "sectors_read": 100, "sectors_written": 100},
            {"device": "sda1", "sectors_read": 60, "sectors_written": 60},
            {"device": "sdaa", "sectors_read": 7, "sectors_written": 7},
            {"device": "nvme0n1", "sectors_read": 20, "sectors_written": 20},
            {"device": "nvme0n1p2", "sectors_read": 20, "sectors_written": 20},
            {"device": "nvme0n10", "sectors_read": 3, "sectors_written": 3},
            {"device": "dm-1", "sectors_read": 10, "sectors_written": 10},
            {"device": "dm-10", "sectors_read": 5, "sectors_written": 5}
        ]}}"#;
        let report = parse_report(&doc.replace('\n', " ")).unwrap();
        assert_eq!(
            report.disk_counters,
            Some(DiskCounters {
                sectors_read: 145,
                sectors_written: 145,
            })
        );
    }

    #[test]
    fn partition_suffix_rules() {
        assert!(is_partition_of("sda1", "sda"));
        assert!(is_partition_of("mmcblk0p1", "mmcblk0"));
        assert!(!is_partition_of("sdaa", "sda"));
        assert!(!is_partition_of("dm-10", "dm-1"));
        assert!(!is_partition_of("md10", "md1"));
        assert!(!is_partition_of("nvme0n10", "nvme0n1"));
        assert!(!is_partition_of("sda", "sda"));
    }
}
