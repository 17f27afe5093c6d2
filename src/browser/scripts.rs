//! JavaScript snippets injected into the live page.

/// Installed before any page script runs; hides the automation marker.
pub const HIDE_WEBDRIVER: &str =
    "Object.defineProperty(navigator, 'webdriver', {get: () => undefined})";

/// Function declaration applied to an element; centers it in the viewport.
pub const SCROLL_INTO_VIEW_FN: &str = "function() { this.scrollIntoView({block: 'center'}); }";

/// Function declaration applied to an element; dispatches a synthetic click.
///
/// Reaches elements whose overlays intercept native input events.
pub const CLICK_FN: &str = "function() { this.click(); }";

/// Generate JavaScript that scrolls the window vertically by `dy` pixels.
pub fn scroll_by(dy: i64) -> String {
    format!("window.scrollBy(0, {dy});")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_by_script() {
        assert_eq!(scroll_by(500), "window.scrollBy(0, 500);");
        assert_eq!(scroll_by(-20), "window.scrollBy(0, -20);");
    }
}
