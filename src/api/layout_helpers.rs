pub(super) fn estimate_label_text_width_px(text: &str, font_size_px: f64) -> f64 {
    // Deterministic and backend-independent.
    let units = text.chars().fold(0.0, |acc, ch| {
        acc + match ch {
            '0'..='9' => 0.62,
            '.' | ',' => 0.34,
            '-' | '+' | '%' | '(' | ')' => 0.42,
            ' ' => 0.33,
            'i' | 'l' | 'í' | 'I' => 0.28,
            'm' | 'M' | 'W' | 'w' => 0.86,
            _ => 0.58,
        }
    });
    (units * font_size_px).max(font_size_px)
}

pub(super) fn estimate_text_height_px(font_size_px: f64) -> f64 {
    font_size_px * 1.35
}
