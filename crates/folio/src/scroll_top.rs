/// Inline `display` value for the scroll-to-top button at offset `scroll_y`.
pub fn button_display(scroll_y: f64, threshold: f64) -> &'static str {
    if scroll_y > threshold { "block" } else { "none" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_display() {
        assert_eq!(button_display(0.0, 400.0), "none");
        assert_eq!(button_display(400.0, 400.0), "none");
        assert_eq!(button_display(401.0, 400.0), "block");
    }
}
