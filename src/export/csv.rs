//! CSV log of every sample in a run.

use std::path::Path;

use color_eyre::Result;
use csv::Writer;

use crate::proc::sampler::TimeSeries;

/// Write one row per sample. An empty series writes nothing at all, so a
/// degenerate run never leaves a header-only file behind.
pub fn write_log(path: &Path, series: &TimeSeries) -> Result<()> {
    if series.is_empty() {
        return Ok(());
    }
    let mut writer = Writer::from_path(path)?;
    writer.write_record(["SampleIndex", "CPUPercent", "MemoryMB"])?;
    for sample in series.samples() {
        writer.write_record([
            sample.index.to_string(),
            format!("{:.2}", sample.cpu_percent),
            format!("{:.2}", sample.memory_mb),
        ])?;
    }
    writer.flush()?;
    println!("Logged data to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn three_samples_give_header_plus_three_rows() {
        let mut series = TimeSeries::default();
        series.push(5.0, 10.0);
        series.push(7.5, 10.5);
        series.push(6.0, 11.0);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("samples.csv");
        write_log(&path, &series).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "SampleIndex,CPUPercent,MemoryMB");
        assert_eq!(lines[1], "0,5.00,10.00");
        assert_eq!(lines[2], "1,7.50,10.50");
        assert_eq!(lines[3], "2,6.00,11.00");
    }

    #[test]
    fn empty_series_writes_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("samples.csv");
        write_log(&path, &TimeSeries::default()).unwrap();
        assert!(!path.exists());
    }
}
