use super::ReportGenerator;
use crate::bench::MeasurementSeries;
use anyhow::Result;
use console::style;
use std::fmt::Write;

/// Terminal chart of elapsed time per measurement
///
/// One row per measurement in execution order, with a bar scaled to the slowest run.
/// Failure-tagged measurements show as a missing data point.
#[derive(Debug, Clone)]
pub struct ChartRenderer {
    width: usize,
    styled: bool,
}

impl Default for ChartRenderer {
    fn default() -> Self {
        Self {
            width: 40,
            styled: true,
        }
    }
}

impl ChartRenderer {
    pub fn new(width: usize, styled: bool) -> Self {
        Self {
            width: width.max(1),
            styled,
        }
    }

    fn bar_len(&self, elapsed: u64, max: u64) -> usize {
        if max == 0 {
            return 0;
        }
        let scaled = (elapsed as f64 / max as f64 * self.width as f64).round() as usize;
        // Nonzero runs always get at least one cell
        if elapsed > 0 { scaled.max(1) } else { 0 }
    }
}

impl ReportGenerator for ChartRenderer {
    fn generate(&self, series: &MeasurementSeries) -> Result<String> {
        let mut out = String::new();
        if series.is_empty() {
            writeln!(out, "(no measurements)")?;
            return Ok(out);
        }

        let max = series
            .iter()
            .filter(|m| m.is_success())
            .map(|m| m.elapsed_millis)
            .max()
            .unwrap_or(0);
        let label_width = series
            .iter()
            .map(|m| m.strategy.len() + 1 + m.repetition.to_string().len())
            .max()
            .unwrap_or(0);

        writeln!(out, "Elapsed time per run (ms, max {})", max)?;
        for m in series {
            let label = format!("{:<width$}", format!("{}#{}", m.strategy, m.repetition), width = label_width);

            let row = match m.failure() {
                None => {
                    let bar = "█".repeat(self.bar_len(m.elapsed_millis, max));
                    if self.styled {
                        format!("{} │{} {}", style(label).dim(), style(bar).cyan(), m.elapsed_millis)
                    } else {
                        format!("{} │{} {}", label, bar, m.elapsed_millis)
                    }
                }
                Some(kind) => {
                    let missing = format!("· missing ({})", kind);
                    if self.styled {
                        format!("{} │{}", style(label).dim(), style(missing).yellow())
                    } else {
                        format!("{} │{}", label, missing)
                    }
                }
            };
            writeln!(out, "{}", row)?;
        }

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bench::Measurement;
    use crate::error::CountError;

    #[test]
    fn test_bars_scale_to_slowest_run() {
        let series: MeasurementSeries = vec![
            Measurement::counted("Serial", 1, 1, 100),
            Measurement::counted("Cpu", 1, 1, 50),
            Measurement::counted("Gpu", 1, 1, 0),
        ]
        .into_iter()
        .collect();

        let chart = ChartRenderer::new(10, false).generate(&series).unwrap();
        let lines: Vec<&str> = chart.lines().collect();

        assert_eq!(lines[0], "Elapsed time per run (ms, max 100)");
        assert_eq!(lines[1], "Serial#1 │██████████ 100");
        assert_eq!(lines[2], "Cpu#1    │█████ 50");
        assert_eq!(lines[3], "Gpu#1    │ 0");
    }

    #[test]
    fn test_failures_render_as_missing_points() {
        let series: MeasurementSeries = vec![
            Measurement::counted("Serial", 1, 1, 5),
            Measurement::failed(
                "Gpu",
                1,
                &CountError::GpuUnavailable("none".to_string()),
                0,
            ),
        ]
        .into_iter()
        .collect();

        let chart = ChartRenderer::new(10, false).generate(&series).unwrap();
        assert!(chart.contains("Gpu#1    │· missing (gpu_unavailable)"));
    }

    #[test]
    fn test_only_failures_does_not_divide_by_zero() {
        let series: MeasurementSeries = vec![Measurement::failed(
            "Gpu",
            1,
            &CountError::KernelBuild("syntax".to_string()),
            3,
        )]
        .into_iter()
        .collect();

        let chart = ChartRenderer::default().generate(&series).unwrap();
        assert!(chart.contains("missing (kernel_build)"));
    }

    #[test]
    fn test_empty_series() {
        let chart = ChartRenderer::default().generate(&MeasurementSeries::new()).unwrap();
        assert_eq!(chart, "(no measurements)\n");
    }
}
