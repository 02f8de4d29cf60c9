//! HTML rendering
//!
//! Produces the markup of the quote page: one `price-item` element per line in
//! the breakdown container, and the formatted total for the total element.

use std::fmt::Write as _;

use crate::quote::{LineItem, Quote};

/// Escape text for use in HTML content.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());

    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }

    out
}

/// Markup for one line item.
pub fn render_line(line: &LineItem) -> String {
    let style = if line.is_indented() {
        r#" style="padding-left: 1rem;""#
    } else {
        ""
    };

    format!(
        r#"<div class="price-item"{style}><span class="label">{}</span><span class="cost">{}</span></div>"#,
        escape(line.label()),
        escape(&line.formatted_cost()),
    )
}

/// Markup for the whole breakdown container.
pub fn render_breakdown(quote: &Quote) -> String {
    quote
        .breakdown()
        .iter()
        .fold(String::new(), |mut out, line| {
            _ = writeln!(out, "{}", render_line(line));
            out
        })
}

/// Text content of the total element.
pub fn render_total(quote: &Quote) -> String {
    quote.formatted_total()
}

/// The two output regions of the quote page.
///
/// Every [`HtmlView::update`] replaces both regions in full.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HtmlView {
    breakdown: String,
    total: String,
    renders: usize,
}

impl HtmlView {
    /// Empty view.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace both regions with the quote.
    pub fn update(&mut self, quote: &Quote) {
        self.breakdown = render_breakdown(quote);
        self.total = render_total(quote);
        self.renders += 1;
    }

    /// Breakdown container markup.
    pub fn breakdown(&self) -> &str {
        &self.breakdown
    }

    /// Total element text.
    pub fn total(&self) -> &str {
        &self.total
    }

    /// Number of times the view has been rendered.
    pub fn renders(&self) -> usize {
        self.renders
    }

    /// Both regions as one standalone fragment.
    pub fn to_fragment(&self) -> String {
        format!(
            "<div id=\"price-breakdown\">\n{}</div>\n<p id=\"final-price\">{}</p>\n",
            self.breakdown,
            escape(&self.total)
        )
    }
}
