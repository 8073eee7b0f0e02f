use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};

use crate::error::HotelError;
use crate::images::TourImage;
use crate::models::TourStatus;

/// Produce a rectangle centered within `area` that spans the requested percent
/// of the width and height. Used for modal dialogs.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(area);

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(horizontal[1]);

    vertical[1]
}

/// Extract the most relevant error message from a chained error.
pub(crate) fn surface_error(err: &anyhow::Error) -> String {
    err.chain()
        .last()
        .map(|cause| cause.to_string())
        .unwrap_or_else(|| err.to_string())
}

/// Message for a hotel failure. Rejections already read well; store errors
/// are reduced to their root cause like any other chain.
pub(crate) fn surface_hotel_error(err: &HotelError) -> String {
    match err {
        HotelError::Store(inner) => surface_error(inner),
        other => other.to_string(),
    }
}

pub(crate) fn status_style(status: TourStatus) -> Style {
    match status {
        TourStatus::Active => Style::default().fg(Color::Green),
        TourStatus::Inactive => Style::default().fg(Color::Red),
    }
}

/// Short image note for a tour card.
pub(crate) fn image_label(image: &TourImage) -> String {
    match image {
        TourImage::Available(path) => format!("[image: {}]", path.display()),
        TourImage::Unavailable(_) => "[image unavailable]".to_string(),
    }
}

/// `***..` style rating that fits in a narrow table column.
pub(crate) fn stars_label(stars: i64) -> String {
    let filled = stars.clamp(0, 5) as usize;
    format!("{}{}", "*".repeat(filled), ".".repeat(5 - filled))
}
