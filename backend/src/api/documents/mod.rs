//! Document highlighting entry points.

pub mod count_html_hits;
pub mod highlight_html;
