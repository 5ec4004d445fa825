//! Browser host for the highlight pipelines: web-sys bindings, JavaScript
//! exports and a demo page.

// dioxus components are snake case
#![allow(non_snake_case)]

pub mod app;
pub mod browser;
pub mod exports;
pub(crate) mod components;
