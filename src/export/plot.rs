//! Renders the recorded series as a PNG chart.

use std::path::Path;

use color_eyre::Result;
use plotters::prelude::*;
use plotters::series::DashedLineSeries;

use crate::proc::sampler::TimeSeries;

const PLOT_SIZE: (u32, u32) = (800, 400);

/// Draw CPU percent (dashed) and memory in MB (solid) against sample index.
/// An empty series draws nothing.
pub fn render(path: &Path, series: &TimeSeries) -> Result<()> {
    if series.is_empty() {
        return Ok(());
    }
    let samples = series.samples();
    let peak_cpu = samples.iter().map(|s| s.cpu_percent).fold(0.0, f32::max);
    // Both series share one y axis; leave headroom above the taller of them.
    let y_max = (peak_cpu.max(series.peak_memory_mb()) * 1.1).max(1.0);

    let root = BitMapBackend::new(path, PLOT_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(40)
        .build_cartesian_2d(0..samples.len(), 0f32..y_max)?;
    chart.configure_mesh().x_desc("Sample").draw()?;

    chart
        .draw_series(DashedLineSeries::new(
            samples.iter().map(|s| (s.index, s.cpu_percent)),
            4,
            3,
            BLUE.stroke_width(1),
        ))?
        .label("CPU (%)")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE));

    chart
        .draw_series(LineSeries::new(
            samples.iter().map(|s| (s.index, s.memory_mb)),
            RED.stroke_width(1),
        ))?
        .label("Memory (MB)")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED));

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;
    root.present()?;

    println!("Saved plot to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_series_writes_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plot.png");
        render(&path, &TimeSeries::default()).unwrap();
        assert!(!path.exists());
    }
}
