pub mod error_boundary;
pub mod highlight_controls;
pub mod passage;
