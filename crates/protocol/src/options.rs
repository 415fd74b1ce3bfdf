//! Option structs for navigation and printing.

use serde::{Deserialize, Serialize};

use crate::types::{Length, Margin, PaperFormat, WaitUntil};

/// Default timeout in milliseconds for navigation and protocol commands.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Navigation options for `Page::goto`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GotoOptions {
    /// Maximum navigation time in milliseconds, wait condition included.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,

    /// When to consider navigation succeeded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wait_until: Option<WaitUntil>,
}

impl GotoOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = Some(timeout_ms);
        self
    }

    pub fn wait_until(mut self, wait_until: WaitUntil) -> Self {
        self.wait_until = Some(wait_until);
        self
    }
}

/// High-level PDF options, in the shape a caller thinks about them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PdfOptions {
    pub format: PaperFormat,
    pub print_background: bool,
    pub margin: Margin,
}

impl PdfOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Letter paper, half-inch margins all round, backgrounds printed.
    pub fn resume() -> Self {
        Self::new()
            .format(PaperFormat::Letter)
            .print_background(true)
            .margin(Margin::uniform(Length::inches(0.5)))
    }

    pub fn format(mut self, format: PaperFormat) -> Self {
        self.format = format;
        self
    }

    pub fn print_background(mut self, print_background: bool) -> Self {
        self.print_background = print_background;
        self
    }

    pub fn margin(mut self, margin: Margin) -> Self {
        self.margin = margin;
        self
    }

    /// Converts to the `Page.printToPDF` parameter object, portrait at 100%.
    pub fn to_print_params(&self) -> PrintToPdfParams {
        let (width, height) = self.format.dimensions();
        PrintToPdfParams {
            landscape: false,
            display_header_footer: false,
            print_background: self.print_background,
            scale: 1.0,
            paper_width: width.as_inches(),
            paper_height: height.as_inches(),
            margin_top: self.margin.top.as_inches(),
            margin_bottom: self.margin.bottom.as_inches(),
            margin_left: self.margin.left.as_inches(),
            margin_right: self.margin.right.as_inches(),
            prefer_css_page_size: false,
            transfer_mode: TransferMode::ReturnAsBase64,
        }
    }
}

/// How `Page.printToPDF` hands back the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransferMode {
    ReturnAsBase64,
}

/// Wire parameters for `Page.printToPDF`; all dimensions in inches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrintToPdfParams {
    pub landscape: bool,
    pub display_header_footer: bool,
    pub print_background: bool,
    pub scale: f64,
    pub paper_width: f64,
    pub paper_height: f64,
    pub margin_top: f64,
    pub margin_bottom: f64,
    pub margin_left: f64,
    pub margin_right: f64,
    #[serde(rename = "preferCSSPageSize")]
    pub prefer_css_page_size: bool,
    pub transfer_mode: TransferMode,
}

/// Result of `Page.printToPDF` in base64 transfer mode.
#[derive(Debug, Clone, Deserialize)]
pub struct PrintToPdfResult {
    pub data: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn resume_options_serialize_to_letter_with_half_inch_margins() {
        let params = serde_json::to_value(PdfOptions::resume().to_print_params()).unwrap();
        assert_eq!(
            params,
            json!({
                "landscape": false,
                "displayHeaderFooter": false,
                "printBackground": true,
                "scale": 1.0,
                "paperWidth": 8.5,
                "paperHeight": 11.0,
                "marginTop": 0.5,
                "marginBottom": 0.5,
                "marginLeft": 0.5,
                "marginRight": 0.5,
                "preferCSSPageSize": false,
                "transferMode": "ReturnAsBase64",
            })
        );
    }

    #[test]
    fn default_does_not_print_background() {
        let params = PdfOptions::default().to_print_params();
        assert!(!params.print_background);
        assert_eq!(params.margin_top, 0.0);
    }

    #[test]
    fn goto_options_builder_sets_fields() {
        let options = GotoOptions::new()
            .timeout_ms(5_000)
            .wait_until(WaitUntil::Load);
        assert_eq!(options.timeout_ms, Some(5_000));
        assert_eq!(options.wait_until, Some(WaitUntil::Load));
    }
}
