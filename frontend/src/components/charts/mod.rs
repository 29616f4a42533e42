//! Canvas charts drawn with plotters.
//!
//! Each redraw resizes the canvas and paints it white first, so nothing from a
//! previous drawing survives.

pub mod category_chart;
pub mod trend_chart;

pub use category_chart::CategoryChart;
pub use trend_chart::TrendChart;

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters_canvas::CanvasBackend;
use web_sys::HtmlCanvasElement;
use yew::NodeRef;

use crate::services::logging::Logger;

pub const CHART_WIDTH: u32 = 480;
pub const CHART_HEIGHT: u32 = 320;

const PALETTE: [RGBColor; 8] = [
    RGBColor(102, 126, 234),
    RGBColor(240, 147, 251),
    RGBColor(67, 233, 123),
    RGBColor(255, 154, 158),
    RGBColor(250, 208, 97),
    RGBColor(79, 172, 254),
    RGBColor(196, 113, 237),
    RGBColor(255, 112, 67),
];

pub fn palette(index: usize) -> RGBColor {
    PALETTE[index % PALETTE.len()]
}

/// Blank drawing area over the referenced canvas, or `None` when the canvas
/// is not mounted
pub fn clear_surface(canvas_ref: &NodeRef) -> Option<DrawingArea<CanvasBackend, Shift>> {
    let canvas = canvas_ref.cast::<HtmlCanvasElement>()?;
    canvas.set_width(CHART_WIDTH);
    canvas.set_height(CHART_HEIGHT);

    let root = CanvasBackend::with_canvas_object(canvas)?.into_drawing_area();
    root.fill(&WHITE).ok()?;
    Some(root)
}

/// Flush a finished drawing to the canvas; a failure is logged for `component`
pub fn present(root: &DrawingArea<CanvasBackend, Shift>, component: &str) -> bool {
    match root.present() {
        Ok(()) => true,
        Err(e) => {
            Logger::warn_with_component(component, &format!("failed to present chart: {:?}", e));
            false
        }
    }
}
