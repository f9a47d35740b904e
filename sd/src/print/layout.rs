//! Page layout for printed letters

use std::time::Duration;

/// Page geometry and timing for one print job
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintLayout {
    /// CSS page size, e.g. `A4` or `210mm 330mm` for folio
    pub page_size: String,
    /// CSS margin shorthand applied to every page
    pub margin: String,
    /// Time the surface gets to lay out the body before printing
    pub settle_delay: Duration,
}

pub const DEFAULT_PAGE_SIZE: &str = "A4";
pub const DEFAULT_MARGIN: &str = "20mm";
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(250);

impl Default for PrintLayout {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE.to_string(),
            margin: DEFAULT_MARGIN.to_string(),
            settle_delay: DEFAULT_SETTLE_DELAY,
        }
    }
}

impl PrintLayout {
    /// The minimal stylesheet injected ahead of the letter body
    pub fn stylesheet(&self) -> String {
        format!(
            "@page {{ size: {}; margin: {}; }}\nbody {{ margin: 0; }}\n",
            self.page_size, self.margin
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_stylesheet() {
        assert_eq!(
            PrintLayout::default().stylesheet(),
            "@page { size: A4; margin: 20mm; }\nbody { margin: 0; }\n"
        );
    }

    #[test]
    fn test_custom_page() {
        let layout = PrintLayout {
            page_size: "210mm 330mm".to_string(),
            margin: "15mm 20mm".to_string(),
            settle_delay: Duration::ZERO,
        };
        assert!(layout.stylesheet().starts_with("@page { size: 210mm 330mm; margin: 15mm 20mm; }"));
    }
}
