//! Export computed views to CSV.
//!
//! The exports are meant to be easy to consume in spreadsheets or downstream scripts.

use std::path::Path;

use crate::domain::Dominance;
use crate::error::AppError;
use crate::report::{AxisView, BarView};

/// Write the ranked distribution: `country,rank,type,proportion,percent,color`.
pub fn write_distribution_csv(path: &Path, view: &BarView) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display())))?;

    writer
        .write_record(["country", "rank", "type", "proportion", "percent", "color"])
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV header: {e}")))?;

    for bar in &view.bars {
        writer
            .write_record([
                view.country.clone(),
                bar.rank.to_string(),
                bar.label.code().to_string(),
                format!("{:.10}", bar.value),
                bar.percent_text.clone(),
                bar.color.to_string(),
            ])
            .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::new(2, format!("Failed to flush export CSV: {e}")))?;
    Ok(())
}

/// Write the axis table:
/// `country,axis,first_pole,first_value,second_pole,second_value,dominant,margin_pp`.
///
/// `dominant` is empty when the axis is exactly balanced.
pub fn write_axes_csv(path: &Path, view: &AxisView) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display())))?;

    writer
        .write_record([
            "country",
            "axis",
            "first_pole",
            "first_value",
            "second_pole",
            "second_value",
            "dominant",
            "margin_pp",
        ])
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV header: {e}")))?;

    for (donut, line) in view.donuts.iter().zip(&view.narrative) {
        let [a, b] = &donut.poles;
        let dominant = match line.dominance {
            Dominance::Leading { pole, .. } => pole.letter().to_string(),
            Dominance::Balanced => String::new(),
        };
        writer
            .write_record([
                view.country.clone(),
                donut.axis.label().to_string(),
                a.pole.letter().to_string(),
                format!("{:.10}", a.value),
                b.pole.letter().to_string(),
                format!("{:.10}", b.value),
                dominant,
                format!("{:.1}", line.margin_pp),
            ])
            .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::new(2, format!("Failed to flush export CSV: {e}")))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fallback_dataset;
    use crate::palette::GradientPalette;
    use crate::report::{axis_view, bar_view};

    #[test]
    fn distribution_export_has_header_and_sixteen_rows() {
        let ds = fallback_dataset();
        let view = bar_view(ds.country("Germany").unwrap(), &GradientPalette::reds());
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dist.csv");

        write_distribution_csv(&path, &view).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "country,rank,type,proportion,percent,color");
        assert_eq!(lines.len(), 17);
        assert!(lines[1].starts_with("Germany,1,ESFJ,"), "{}", lines[1]);
        assert!(lines[1].ends_with(",#FF0000"), "{}", lines[1]);
    }

    #[test]
    fn axes_export_quotes_country_and_reports_dominant() {
        let mut row = fallback_dataset().country("Japan").unwrap().clone();
        row.country = "Korea, Republic of".to_string();
        let view = axis_view(&row);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("axes.csv");

        write_axes_csv(&path, &view).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[1].starts_with("\"Korea, Republic of\",E/I,E,"), "{}", lines[1]);
        // Japan's illustrative row leans introverted.
        assert!(lines[1].contains(",I,"), "{}", lines[1]);
    }
}
