//! GPA trend chart
//!
//! Renders GPA against semester number as an SVG line chart.

use crate::error::{GpaError, GpaResult};
use crate::table::SemesterTable;
use plotters::prelude::*;
use std::fs;
use std::path::Path;

/// Chart styling
#[derive(Clone, Debug)]
pub struct ChartOptions {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub width: u32,
    pub height: u32,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            title: "GPA Trend".to_string(),
            x_label: "Semester".to_string(),
            y_label: "GPA".to_string(),
            width: 640,
            height: 480,
        }
    }
}

fn chart_err<E: std::fmt::Display>(err: E) -> GpaError {
    GpaError::Chart(err.to_string())
}

/// Render the table's trend as an SVG document
pub fn render_trend_svg(table: &SemesterTable, options: &ChartOptions) -> GpaResult<String> {
    let points: Vec<(f64, f64)> = table
        .trend()
        .into_iter()
        .map(|(semester, gpa)| (semester as f64, gpa))
        .collect();
    if points.is_empty() {
        return Err(GpaError::EmptyTable);
    }

    let min_x = points.iter().map(|p| p.0).fold(f64::INFINITY, f64::min);
    let max_x = points.iter().map(|p| p.0).fold(f64::NEG_INFINITY, f64::max);
    let max_y = points.iter().map(|p| p.1).fold(0.0, f64::max);

    // Pad so single points and the 4.0 line are not drawn on the frame
    let x_range = (min_x - 0.5)..(max_x + 0.5);
    let y_range = 0.0..(max_y.max(4.0) + 0.25);

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (options.width, options.height)).into_drawing_area();
        root.fill(&WHITE).map_err(chart_err)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(&options.title, ("sans-serif", 24).into_font())
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(50)
            .build_cartesian_2d(x_range, y_range)
            .map_err(chart_err)?;

        chart
            .configure_mesh()
            .x_desc(options.x_label.as_str())
            .y_desc(options.y_label.as_str())
            .draw()
            .map_err(chart_err)?;

        chart
            .draw_series(LineSeries::new(points.iter().copied(), &BLUE))
            .map_err(chart_err)?;
        chart
            .draw_series(points.iter().map(|&p| Circle::new(p, 4, BLUE.filled())))
            .map_err(chart_err)?;

        root.present().map_err(chart_err)?;
    }

    Ok(svg)
}

/// Render the trend chart and write it to `path`
pub fn save_trend_svg(table: &SemesterTable, options: &ChartOptions, path: &Path) -> GpaResult<()> {
    let svg = render_trend_svg(table, options)?;
    fs::write(path, svg)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::SemesterRecord;

    #[test]
    fn test_render_trend() {
        let table = SemesterTable::from_records(vec![
            SemesterRecord::new(2, 3.4, 16),
            SemesterRecord::new(1, 3.1, 16),
            SemesterRecord::new(3, 3.7, 17),
        ]);

        let svg = render_trend_svg(&table, &ChartOptions::default()).unwrap();

        assert!(svg.contains("<svg"));
        assert!(svg.contains("<polyline"));
        assert!(svg.contains("<circle"));
    }

    #[test]
    fn test_render_single_point() {
        let table = SemesterTable::from_records(vec![SemesterRecord::new(1, 3.0, 16)]);
        assert!(render_trend_svg(&table, &ChartOptions::default()).is_ok());
    }

    #[test]
    fn test_render_empty_table() {
        let err = render_trend_svg(&SemesterTable::new(), &ChartOptions::default()).unwrap_err();
        assert!(matches!(err, GpaError::EmptyTable));
    }
}
