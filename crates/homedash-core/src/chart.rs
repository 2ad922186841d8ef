//! Rolling chart buffer.
//!
//! [`ChartBuffer`] holds the last N climate points shown in the dashboard's
//! chart: a time label, the temperature in the current display unit, and the
//! humidity. Temperatures are stored already converted for display, so a unit
//! toggle rewrites them in place with [`ChartBuffer::convert_temperatures`].

use std::collections::VecDeque;

use chrono::{DateTime, Local};

use homedash_types::{DeviceSnapshot, DisplayUnit};

/// Default number of points kept in the chart.
pub const DEFAULT_CHART_CAPACITY: usize = 20;

/// Format of the chart's time labels.
const LABEL_FORMAT: &str = "%H:%M:%S";

/// One plotted update.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    /// Local time of the update, `HH:MM:SS`.
    pub label: String,
    /// Temperature in the display unit at the time it was plotted.
    pub temperature: f64,
    /// Relative humidity in percent.
    pub humidity: f64,
}

/// Fixed-capacity FIFO of chart points.
///
/// Each point carries its label, temperature and humidity together, so the
/// three series can never drift to different lengths.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartBuffer {
    points: VecDeque<ChartPoint>,
    capacity: usize,
}

impl Default for ChartBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_CHART_CAPACITY)
    }
}

impl ChartBuffer {
    /// Create an empty buffer holding at most `capacity` points.
    ///
    /// A capacity of zero is raised to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            points: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a point, evicting the oldest one when the buffer is full.
    pub fn push(&mut self, label: impl Into<String>, temperature: f64, humidity: f64) {
        while self.points.len() >= self.capacity {
            self.points.pop_front();
        }
        self.points.push_back(ChartPoint {
            label: label.into(),
            temperature,
            humidity,
        });
    }

    /// Plot a snapshot received at `at`.
    ///
    /// Nothing is appended unless the snapshot has both temperature and
    /// humidity. Returns whether a point was added.
    pub fn append_snapshot(
        &mut self,
        snapshot: &DeviceSnapshot,
        unit: DisplayUnit,
        at: DateTime<Local>,
    ) -> bool {
        let Some((temp, humidity)) = snapshot.climate() else {
            return false;
        };
        self.push(
            at.format(LABEL_FORMAT).to_string(),
            unit.to_display(temp),
            humidity,
        );
        true
    }

    /// Rewrite every buffered temperature from `from` to `to`.
    pub fn convert_temperatures(&mut self, from: DisplayUnit, to: DisplayUnit) {
        if from == to {
            return;
        }
        for point in &mut self.points {
            point.temperature = DisplayUnit::convert(point.temperature, from, to);
        }
    }

    /// Legend for the temperature series, e.g. `Temp (°C)`.
    pub fn temperature_label(unit: DisplayUnit) -> String {
        format!("Temp ({})", unit.symbol())
    }

    /// Time labels, oldest first.
    pub fn labels(&self) -> Vec<&str> {
        self.points.iter().map(|p| p.label.as_str()).collect()
    }

    /// Temperatures, oldest first.
    pub fn temperatures(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.temperature).collect()
    }

    /// Humidities, oldest first.
    pub fn humidities(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.humidity).collect()
    }

    /// Temperature series as `(index, value)` pairs for plotting.
    pub fn temperature_series(&self) -> Vec<(f64, f64)> {
        self.series(|p| p.temperature)
    }

    /// Humidity series as `(index, value)` pairs for plotting.
    pub fn humidity_series(&self) -> Vec<(f64, f64)> {
        self.series(|p| p.humidity)
    }

    fn series(&self, value: impl Fn(&ChartPoint) -> f64) -> Vec<(f64, f64)> {
        self.points
            .iter()
            .enumerate()
            .map(|(i, p)| (i as f64, value(p)))
            .collect()
    }

    /// Smallest and largest value across both series.
    pub fn bounds(&self) -> Option<(f64, f64)> {
        self.points
            .iter()
            .flat_map(|p| [p.temperature, p.humidity])
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }

    /// Number of buffered points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Maximum number of points kept.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn snapshot(temp: Option<f64>, humidity: Option<f64>) -> DeviceSnapshot {
        DeviceSnapshot {
            temp,
            humidity,
            ..Default::default()
        }
    }

    fn at(h: u32, m: u32, s: u32) -> DateTime<Local> {
        Local
            .with_ymd_and_hms(2024, 3, 1, h, m, s)
            .single()
            .expect("unambiguous local time")
    }

    #[test]
    fn test_append_snapshot_formats_label() {
        let mut chart = ChartBuffer::new(20);
        assert!(chart.append_snapshot(
            &snapshot(Some(21.0), Some(40.0)),
            DisplayUnit::Celsius,
            at(9, 5, 7)
        ));

        assert_eq!(chart.labels(), ["09:05:07"]);
        assert_eq!(chart.temperatures(), [21.0]);
        assert_eq!(chart.humidities(), [40.0]);
    }

    #[test]
    fn test_append_snapshot_uses_display_unit() {
        let mut chart = ChartBuffer::new(20);
        chart.append_snapshot(
            &snapshot(Some(21.0), Some(40.0)),
            DisplayUnit::Fahrenheit,
            at(12, 0, 0),
        );
        assert!((chart.temperatures()[0] - 69.8).abs() < 1e-9);
    }

    #[test]
    fn test_skip_on_partial() {
        let mut chart = ChartBuffer::new(20);
        chart.push("12:00:00", 20.0, 50.0);

        let unit = DisplayUnit::Celsius;
        assert!(!chart.append_snapshot(&snapshot(Some(21.0), None), unit, at(12, 0, 2)));
        assert!(!chart.append_snapshot(&snapshot(None, Some(40.0)), unit, at(12, 0, 4)));
        assert_eq!(chart.len(), 1);
    }

    #[test]
    fn test_evicts_oldest_at_capacity() {
        let mut chart = ChartBuffer::new(3);
        for i in 0..5 {
            chart.push(format!("t{}", i), i as f64, 50.0);
        }

        assert_eq!(chart.len(), 3);
        assert_eq!(chart.labels(), ["t2", "t3", "t4"]);
        assert_eq!(chart.temperatures(), [2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_zero_capacity_is_raised() {
        let mut chart = ChartBuffer::new(0);
        chart.push("a", 1.0, 1.0);
        chart.push("b", 2.0, 2.0);
        assert_eq!(chart.capacity(), 1);
        assert_eq!(chart.labels(), ["b"]);
    }

    #[test]
    fn test_convert_temperatures_in_place() {
        let mut chart = ChartBuffer::new(20);
        chart.push("a", 21.0, 40.0);
        chart.push("b", 0.0, 41.0);

        chart.convert_temperatures(DisplayUnit::Celsius, DisplayUnit::Fahrenheit);
        let temps = chart.temperatures();
        assert!((temps[0] - 69.8).abs() < 1e-9);
        assert!((temps[1] - 32.0).abs() < 1e-9);
        // Humidity is never touched.
        assert_eq!(chart.humidities(), [40.0, 41.0]);

        chart.convert_temperatures(DisplayUnit::Fahrenheit, DisplayUnit::Celsius);
        let temps = chart.temperatures();
        assert!((temps[0] - 21.0).abs() < 1e-9);
        assert!(temps[1].abs() < 1e-9);
    }

    #[test]
    fn test_temperature_label() {
        assert_eq!(ChartBuffer::temperature_label(DisplayUnit::Celsius), "Temp (°C)");
        assert_eq!(ChartBuffer::temperature_label(DisplayUnit::Fahrenheit), "Temp (°F)");
    }

    #[test]
    fn test_series_and_bounds() {
        let mut chart = ChartBuffer::new(20);
        assert_eq!(chart.bounds(), None);

        chart.push("a", 21.0, 40.0);
        chart.push("b", 23.0, 38.0);
        assert_eq!(chart.temperature_series(), [(0.0, 21.0), (1.0, 23.0)]);
        assert_eq!(chart.humidity_series(), [(0.0, 40.0), (1.0, 38.0)]);
        assert_eq!(chart.bounds(), Some((21.0, 40.0)));
    }
}
