#![allow(missing_docs)]

pub(crate) mod html;

pub(crate) use html::{assert_valid_html, count_matches, parse_html_document, select_text};
