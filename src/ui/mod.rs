/// UI module exports
mod components;
pub mod panel;
pub mod popup;
