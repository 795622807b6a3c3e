//! Charts module - chart rendering

mod plotter;

pub use plotter::{ChartPlotter, COUNTS_COLOR, DATUM_COLOR, DRAINAGE_COLOR};
