use crate::error::{GanttError, GanttResult};

pub(super) fn validate_plot_width(width: f64) -> GanttResult<f64> {
    if !width.is_finite() || width <= 0.0 {
        return Err(GanttError::InvalidData(
            "plot width must be finite and > 0".to_owned(),
        ));
    }
    Ok(width)
}

pub(super) fn validate_height(height: f64) -> GanttResult<f64> {
    if !height.is_finite() || height < 0.0 {
        return Err(GanttError::InvalidData(
            "plot height must be finite and >= 0".to_owned(),
        ));
    }
    Ok(height)
}

pub(super) fn validate_lane_height(lane_height: f64) -> GanttResult<f64> {
    if !lane_height.is_finite() || lane_height <= 0.0 {
        return Err(GanttError::InvalidData(
            "lane height must be finite and > 0".to_owned(),
        ));
    }
    Ok(lane_height)
}

pub(super) fn validate_handle_width(handle_width: f64) -> GanttResult<f64> {
    if !handle_width.is_finite() || handle_width < 0.0 {
        return Err(GanttError::InvalidData(
            "drag handle width must be finite and >= 0".to_owned(),
        ));
    }
    Ok(handle_width)
}

pub(super) fn validate_context_menu_items(items: &[String]) -> GanttResult<()> {
    if items.iter().any(String::is_empty) {
        return Err(GanttError::InvalidData(
            "context menu items must not be empty".to_owned(),
        ));
    }
    Ok(())
}

/// Pointer positions arrive in surface coordinates.
pub(super) fn validate_pointer(x: f64, y: f64) -> GanttResult<()> {
    if !x.is_finite() || !y.is_finite() {
        return Err(GanttError::InvalidData(
            "pointer position must be finite".to_owned(),
        ));
    }
    Ok(())
}
