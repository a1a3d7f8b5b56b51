//! JSON output of presentation views.
//!
//! The JSON is the "portable" representation of a page: the same structures
//! the TUI renders (`BarView`, `AxisView`), serialized as-is.

use std::fs::File;
use std::path::Path;

use serde::Serialize;

use crate::error::AppError;

/// Serialize a view to a pretty-printed JSON string.
pub fn to_json_string<T: Serialize>(view: &T) -> Result<String, AppError> {
    serde_json::to_string_pretty(view).map_err(|e| AppError::new(4, format!("Failed to serialize JSON: {e}")))
}

/// Write a view to a JSON file.
pub fn write_json(path: &Path, view: &impl Serialize) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create JSON '{}': {e}", path.display())))?;
    serde_json::to_writer_pretty(file, view)
        .map_err(|e| AppError::new(2, format!("Failed to write JSON: {e}")))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fallback_dataset;
    use crate::palette::GradientPalette;
    use crate::report::{axis_view, bar_view};

    #[test]
    fn bar_view_json_shape() {
        let ds = fallback_dataset();
        let view = bar_view(ds.country("Brazil").unwrap(), &GradientPalette::reds());
        let json: serde_json::Value = serde_json::from_str(&to_json_string(&view).unwrap()).unwrap();

        assert_eq!(json["country"], "Brazil");
        let bars = json["bars"].as_array().unwrap();
        assert_eq!(bars.len(), 16);
        assert_eq!(bars[0]["rank"], 1);
        assert_eq!(bars[0]["label"], "ESFJ");
        assert_eq!(bars[0]["color"], "#FF0000");
        assert!(bars[0]["percent_text"].as_str().unwrap().ends_with('%'));
    }

    #[test]
    fn axis_view_json_shape() {
        let ds = fallback_dataset();
        let view = axis_view(ds.country("Brazil").unwrap());
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("axes.json");
        write_json(&path, &view).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        let donuts = json["donuts"].as_array().unwrap();
        assert_eq!(donuts.len(), 4);
        assert_eq!(donuts[0]["axis"], "E/I");
        assert_eq!(donuts[0]["poles"][0]["pole"], "E");
        assert_eq!(donuts[0]["poles"][0]["color"], "#F07167");
        assert_eq!(json["narrative"].as_array().unwrap().len(), 4);
        assert_eq!(json["narrative"][0]["dominance"]["kind"], "leading");
    }
}
