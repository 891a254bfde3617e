use ratatui::layout::Rect;

/// Rectangle of `width` x `height` cells centered in `area`, clamped to its bounds.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centers_and_clamps() {
        assert_eq!(centered_rect(10, 4, Rect::new(0, 0, 30, 10)), Rect::new(10, 3, 10, 4));
        assert_eq!(centered_rect(50, 50, Rect::new(2, 2, 20, 8)), Rect::new(2, 2, 20, 8));
    }
}
