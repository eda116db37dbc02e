use super::OutputError;
use plotters::prelude::*;
use std::error::Error;
use std::ops::Range;
use std::path::Path;

const PLOT_SIZE: (u32, u32) = (800, 500);

fn padded_range(values: &[f64]) -> Range<f64> {
    let (min, max) = values
        .iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), &v| {
            (min.min(v), max.max(v))
        });
    if !min.is_finite() {
        return 0.0..1.0;
    }
    let pad = if max > min { (max - min) * 0.05 } else { 1.0 };
    (min - pad)..(max + pad)
}

fn draw_series(
    path: &Path,
    title: &str,
    y_label: &str,
    values: &[f64],
) -> Result<(), Box<dyn Error>> {
    let root = SVGBackend::new(path, PLOT_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let x_range = 0.5..(values.len().max(1) as f64 + 0.5);
    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 20))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_range, padded_range(values))?;

    chart
        .configure_mesh()
        .x_desc("Residue")
        .y_desc(y_label)
        .draw()?;

    chart.draw_series(LineSeries::new(
        values
            .iter()
            .enumerate()
            .filter(|(_, v)| v.is_finite())
            .map(|(i, &v)| ((i + 1) as f64, v)),
        &BLUE,
    ))?;

    root.present()?;
    Ok(())
}

/// Renders a per-residue series as an SVG line plot.
///
/// Residues are numbered from 1 along the x axis; non-finite values are left
/// out of the line.
pub fn plot_series(
    path: &Path,
    title: &str,
    y_label: &str,
    values: &[f64],
) -> Result<(), OutputError> {
    draw_series(path, title, y_label, values).map_err(|e| OutputError::Plot {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padded_range_handles_flat_and_empty_series() {
        assert_eq!(padded_range(&[]), 0.0..1.0);
        assert_eq!(padded_range(&[2.0, 2.0]), 1.0..3.0);
        let range = padded_range(&[0.0, 10.0, f64::NAN]);
        assert!((range.start + 0.5).abs() < 1e-12);
        assert!((range.end - 10.5).abs() < 1e-12);
    }

    #[test]
    fn plot_series_writes_an_svg_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run_1_DC.svg");
        plot_series(&path, "DC (frame 1)", "DC", &[0.25, 0.5, 0.75, 0.5]).unwrap();

        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("polyline") || svg.contains("path"));
    }
}
