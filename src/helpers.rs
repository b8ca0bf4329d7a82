use pingpong::{Field, Rect as FieldRect};
use ratatui::layout::Rect;

pub fn centered_rect_with_percentage(percent_x: u16, percent_y: u16, cols: u16, rows: u16) -> Rect {
    let width = percent_of(cols, percent_x);
    let height = std::cmp::min(std::cmp::max(percent_of(rows, percent_y), 5), rows);
    Rect::new((cols - width) / 2, (rows - height) / 2, width, height)
}

// widened so very large terminals don't overflow, capped at the full extent
fn percent_of(extent: u16, percent: u16) -> u16 {
    let scaled = u32::from(extent) * u32::from(percent) / 100;
    scaled.min(u32::from(extent)) as u16
}

pub fn centered_rect(width: u16, height: u16, cols: u16, rows: u16) -> Rect {
    let actual_width = std::cmp::min(width, cols);
    let actual_height = std::cmp::min(height, rows);
    Rect::new(
        cols.saturating_sub(actual_width) / 2,
        rows.saturating_sub(actual_height) / 2,
        actual_width,
        actual_height,
    )
}

/// Maps a rect in field units onto terminal cells inside `area`.
///
/// Coordinates are clipped to the area, entities sitting partly outside the field
/// for a tick are drawn against the border. Every entity keeps at least one cell.
pub fn field_to_cells(rect: &FieldRect, field: &Field, area: Rect) -> Rect {
    let scale_x = |x: i32| scale(x, field.width, area.width);
    let scale_y = |y: i32| scale(y, field.height, area.height);

    let left = scale_x(rect.left()).min(area.width.saturating_sub(1));
    let top = scale_y(rect.top()).min(area.height.saturating_sub(1));
    let right = scale_x(rect.right()).max(left + 1).min(area.width);
    let bottom = scale_y(rect.bottom()).max(top + 1).min(area.height);

    Rect::new(
        area.x + left,
        area.y + top,
        right.saturating_sub(left).max(1),
        bottom.saturating_sub(top).max(1),
    )
}

fn scale(value: i32, field_extent: i32, cells: u16) -> u16 {
    if field_extent <= 0 {
        return 0;
    }
    let value = value.clamp(0, field_extent) as i64;
    (value * cells as i64 / field_extent as i64) as u16
}
