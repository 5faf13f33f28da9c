/// Text bar chart of demand versus amount sent per zone
/// The chart is a plain value owned by whoever renders it

use crate::models::{Allocation, DEFAULT_RESOURCE};
use crate::reporting::format_quantity;

const BAR_CHAR: char = '█';

#[derive(Clone, Debug, PartialEq)]
pub struct Series {
    pub label: String,
    pub values: Vec<f64>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct BarChart {
    /// One label per zone, in allocation result order
    pub labels: Vec<String>,
    pub series: Vec<Series>,
}

impl BarChart {
    /// Demand and sent series for every resource of the allocation
    pub fn from_allocation(allocation: &Allocation) -> Self {
        let labels = allocation.results.iter().map(|r| format!("Zone {}", r.id)).collect();

        let mut series = Vec::with_capacity(allocation.resources.len() * 2);
        for (resource, name) in allocation.resources.iter().enumerate() {
            let prefix = if allocation.resources.len() == 1 && name == DEFAULT_RESOURCE {
                String::new()
            } else {
                format!("{} ", capitalize(name))
            };
            series.push(Series {
                label: format!("{}demand", prefix),
                values: allocation.results.iter().map(|r| r.demand_for(resource)).collect(),
            });
            series.push(Series {
                label: format!("{}sent", prefix),
                values: allocation.results.iter().map(|r| r.sent_for(resource)).collect(),
            });
        }

        BarChart { labels, series }
    }

    pub fn max_value(&self) -> f64 {
        self.series
            .iter()
            .flat_map(|s| s.values.iter().copied())
            .fold(0.0, f64::max)
    }

    /// Render with the longest bar `width` characters wide
    pub fn render(&self, width: usize) -> String {
        let max = self.max_value();
        let label_width = self.labels.iter().map(|l| l.len()).max().unwrap_or(0);
        let series_width = self.series.iter().map(|s| s.label.chars().count()).max().unwrap_or(0);

        let mut out = String::new();
        for (i, label) in self.labels.iter().enumerate() {
            for (j, series) in self.series.iter().enumerate() {
                let value = series.values.get(i).copied().unwrap_or(0.0);
                let bar_len = if max > 0.0 {
                    ((value / max) * width as f64).round() as usize
                } else {
                    0
                };
                let zone = if j == 0 { label.as_str() } else { "" };
                out.push_str(&format!(
                    "{:<lw$}  {:<sw$} |{} {}\n",
                    zone,
                    series.label,
                    BAR_CHAR.to_string().repeat(bar_len),
                    format_quantity(value),
                    lw = label_width,
                    sw = series_width,
                ));
            }
        }
        out
    }
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
