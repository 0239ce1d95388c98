use tracing::warn;

use crate::config::GaugesConfig;
use crate::gauge::color::Rgb;
use crate::gauge::{GaugeState, percent_from_usage};
use crate::metrics::history::SeriesHistory;
use crate::metrics::snapshot::{MetricSnapshot, PROCESS_COLUMNS};
use crate::table::TableModel;

pub const PLACEHOLDER_SERIES: [f64; 10] = [1.0, 3.0, 2.0, 5.0, 4.0, 6.0, 7.0, 8.0, 7.0, 6.0];

const CPU_COLOR: Rgb = Rgb::new(0xFF, 0x2D, 0x71);
const GPU_COLOR: Rgb = Rgb::new(0xCC, 0x53, 0xFF);
const MEMORY_COLOR: Rgb = Rgb::new(0xFF, 0x9F, 0x0D);
const GRAPH_COLOR: Rgb = Rgb::new(0xCC, 0x53, 0xFF);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableId {
    Dashboard,
    Overview,
}

impl TableId {
    pub fn index(self) -> usize {
        match self {
            TableId::Dashboard => 0,
            TableId::Overview => 1,
        }
    }
}

/// What the header graph is plotting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphSource {
    Placeholder,
    Battery,
    Cpu,
}

impl GraphSource {
    pub fn title(self) -> &'static str {
        match self {
            GraphSource::Placeholder => "Energy",
            GraphSource::Battery => "Battery %",
            GraphSource::Cpu => "CPU %",
        }
    }
}

#[derive(Debug, Clone)]
pub struct LineGraph {
    pub color: Rgb,
    pub history: SeriesHistory,
    pub source: GraphSource,
}

impl LineGraph {
    /// Appends the live sample, restarting the series when the source changes.
    pub fn record(&mut self, snapshot: &MetricSnapshot) {
        let (source, sample) = match snapshot.battery_charge {
            Some(charge) => (GraphSource::Battery, charge),
            None => (GraphSource::Cpu, snapshot.cpu_usage),
        };
        if source != self.source {
            self.history.clear();
            self.source = source;
        }
        self.history.push(sample);
    }
}

/// A pair of throughput readings shown as two labelled values.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RatePanel {
    pub first: Option<f64>,
    pub second: Option<f64>,
}

/// The composed dashboard. Built once; every component is a named field.
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub cpu: GaugeState,
    pub gpu: GaugeState,
    pub memory: GaugeState,
    pub network: RatePanel,
    pub disk: RatePanel,
    pub graph: LineGraph,
    pub process_table: TableModel,
    pub overview_table: TableModel,
}

impl Dashboard {
    pub fn build(gauges: &GaugesConfig, snapshot: &MetricSnapshot) -> Self {
        let cpu_color = config_color("cpu_color", &gauges.cpu_color, CPU_COLOR);
        let gpu_color = config_color("gpu_color", &gauges.gpu_color, GPU_COLOR);
        let memory_color = config_color("memory_color", &gauges.memory_color, MEMORY_COLOR);
        let graph_color = config_color("graph_color", &gauges.graph_color, GRAPH_COLOR);

        let rows = snapshot.process_cells();
        Dashboard {
            cpu: GaugeState::new(percent_from_usage(snapshot.cpu_usage), cpu_color),
            gpu: GaugeState::new(percent_from_usage(snapshot.gpu_usage), gpu_color),
            memory: GaugeState::new(percent_from_usage(snapshot.memory_usage), memory_color),
            network: RatePanel {
                first: snapshot.upload_rate,
                second: snapshot.download_rate,
            },
            disk: RatePanel {
                first: snapshot.disk_read_rate,
                second: snapshot.disk_write_rate,
            },
            graph: LineGraph {
                color: graph_color,
                history: SeriesHistory::with_samples(gauges.history_length, &PLACEHOLDER_SERIES),
                source: GraphSource::Placeholder,
            },
            process_table: TableModel::new(&PROCESS_COLUMNS, rows.clone()),
            overview_table: TableModel::new(&PROCESS_COLUMNS, rows),
        }
    }

    /// Pushes a new snapshot into every component. Returns `true` when a
    /// gauge, rate panel or table row changed; the graph moves regardless.
    pub fn apply_snapshot(&mut self, snapshot: &MetricSnapshot) -> bool {
        let mut changed = false;
        changed |= self.cpu.set_value(percent_from_usage(snapshot.cpu_usage));
        changed |= self.gpu.set_value(percent_from_usage(snapshot.gpu_usage));
        changed |= self.memory.set_value(percent_from_usage(snapshot.memory_usage));

        let network = RatePanel {
            first: snapshot.upload_rate,
            second: snapshot.download_rate,
        };
        let disk = RatePanel {
            first: snapshot.disk_read_rate,
            second: snapshot.disk_write_rate,
        };
        changed |= network != self.network || disk != self.disk;
        self.network = network;
        self.disk = disk;

        self.graph.record(snapshot);

        let rows = snapshot.process_cells();
        for table in [&mut self.process_table, &mut self.overview_table] {
            // Compared after the table re-applies its own sort.
            let previous = table.rows().to_vec();
            table.set_rows(rows.clone());
            changed |= table.rows() != previous.as_slice();
        }

        changed
    }

    pub fn table(&self, id: TableId) -> &TableModel {
        match id {
            TableId::Dashboard => &self.process_table,
            TableId::Overview => &self.overview_table,
        }
    }

    pub fn table_mut(&mut self, id: TableId) -> &mut TableModel {
        match id {
            TableId::Dashboard => &mut self.process_table,
            TableId::Overview => &mut self.overview_table,
        }
    }
}

fn config_color(key: &str, value: &str, fallback: Rgb) -> Rgb {
    Rgb::from_hex(value).unwrap_or_else(|| {
        warn!(key, value, "invalid color in config, using default");
        fallback
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::snapshot::ProcessRow;

    fn build() -> Dashboard {
        Dashboard::build(&GaugesConfig::default(), &MetricSnapshot::placeholder())
    }

    #[test]
    fn build_wires_placeholder_values() {
        let dashboard = build();
        assert_eq!(dashboard.cpu.value(), 49);
        assert_eq!(dashboard.gpu.value(), 19);
        assert_eq!(dashboard.memory.value(), 75);
        assert_eq!(dashboard.cpu.foreground(), Rgb::new(255, 45, 113));
        assert_eq!(dashboard.graph.source, GraphSource::Placeholder);
        assert_eq!(dashboard.graph.history.len(), PLACEHOLDER_SERIES.len());
        assert_eq!(dashboard.process_table.row_count(), 2);
        assert_eq!(dashboard.overview_table.columns().len(), 4);
    }

    #[test]
    fn invalid_config_color_falls_back() {
        let gauges = GaugesConfig {
            cpu_color: "not-a-color".to_string(),
            ..GaugesConfig::default()
        };
        let dashboard = Dashboard::build(&gauges, &MetricSnapshot::placeholder());
        assert_eq!(dashboard.cpu.foreground(), CPU_COLOR);
    }

    #[test]
    fn tables_keep_independent_hidden_columns() {
        let mut dashboard = build();
        dashboard.table_mut(TableId::Dashboard).hide_column(1);
        assert!(dashboard.table(TableId::Dashboard).is_hidden(1));
        assert!(!dashboard.table(TableId::Overview).is_hidden(1));
    }

    #[test]
    fn live_snapshot_replaces_placeholder_series() {
        let mut dashboard = build();
        let mut snapshot = MetricSnapshot::placeholder();
        snapshot.cpu_usage = 12.4;
        snapshot.processes = vec![ProcessRow {
            pid: 1,
            name: "init".to_string(),
            cpu_percent: 0.0,
            memory_percent: 0.1,
        }];

        assert!(dashboard.apply_snapshot(&snapshot));
        assert_eq!(dashboard.cpu.value(), 12);
        assert_eq!(dashboard.graph.source, GraphSource::Cpu);
        assert_eq!(dashboard.graph.history.points(), vec![(0.0, 12.4)]);
        assert_eq!(dashboard.process_table.row_count(), 1);

        snapshot.battery_charge = Some(80.0);
        dashboard.apply_snapshot(&snapshot);
        assert_eq!(dashboard.graph.source, GraphSource::Battery);
        assert_eq!(dashboard.graph.history.points(), vec![(0.0, 80.0)]);
    }

    #[test]
    fn sorted_table_with_same_rows_is_unchanged() {
        let mut dashboard = build();
        dashboard.table_mut(TableId::Dashboard).sort_by(0);
        dashboard.table_mut(TableId::Dashboard).sort_by(0);
        dashboard.table_mut(TableId::Overview).sort_by(1);

        let snapshot = MetricSnapshot::placeholder();
        assert!(!dashboard.apply_snapshot(&snapshot));
        assert_eq!(
            dashboard.process_table.rows()[0][1],
            crate::table::CellValue::Text("chrome".to_string())
        );
    }
}
