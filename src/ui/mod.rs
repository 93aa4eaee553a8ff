//! UI module - reusable components and the view models they render

pub mod components;
pub mod view_models;
