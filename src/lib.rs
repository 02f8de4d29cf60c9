//! Cake Quote
//!
//! Price quotes for custom cake orders: static price tables per option
//! category, a line-item breakdown with total, and the form model that keeps
//! the quote current as options change.

pub mod calculator;
pub mod catalog;
pub mod commands;
pub mod config;
pub mod fillings;
pub mod fixtures;
pub mod form;
pub mod html;
pub mod logging;
pub mod options;
pub mod prelude;
pub mod pricing;
pub mod quote;
pub mod receipt;
pub mod selection;
