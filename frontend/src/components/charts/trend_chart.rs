use plotters::prelude::*;
use shared::TrendPoint;
use yew::prelude::*;

use super::{clear_surface, palette, present, CHART_HEIGHT, CHART_WIDTH};
use crate::services::logging::Logger;

#[derive(Properties, PartialEq)]
pub struct TrendChartProps {
    /// Ordered by month ascending
    pub points: Vec<TrendPoint>,
    pub currency: String,
}

/// Monthly spending as a line over consecutive months
pub struct TrendChart {
    canvas_ref: NodeRef,
}

impl Component for TrendChart {
    type Message = ();
    type Properties = TrendChartProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            canvas_ref: NodeRef::default(),
        }
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        ctx.props() != old_props
    }

    fn rendered(&mut self, ctx: &Context<Self>, _first_render: bool) {
        let props = ctx.props();
        if self.draw(&props.points, &props.currency).is_none() {
            Logger::debug_with_component("trend-chart", "nothing drawn");
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        html! {
            <div class="chart-card">
                <h3 class="chart-title">{"Monthly Trend"}</h3>
                {if ctx.props().points.is_empty() {
                    html! {
                        <div class="chart-empty">
                            <p>{"No monthly data to chart"}</p>
                        </div>
                    }
                } else {
                    html! {
                        <canvas
                            ref={self.canvas_ref.clone()}
                            class="chart-canvas"
                            width={CHART_WIDTH.to_string()}
                            height={CHART_HEIGHT.to_string()}
                        ></canvas>
                    }
                }}
            </div>
        }
    }
}

impl TrendChart {
    fn draw(&self, points: &[TrendPoint], currency: &str) -> Option<()> {
        let root = clear_surface(&self.canvas_ref)?;
        if points.is_empty() {
            return None;
        }

        let (x_min, x_max) = x_range(points.len());
        let y_max = points.iter().map(|point| point.value).fold(0.0_f64, f64::max);
        let y_max = if y_max > 0.0 { y_max * 1.1 } else { 1.0 };

        let mut chart = ChartBuilder::on(&root)
            .margin(15)
            .x_label_area_size(40)
            .y_label_area_size(70)
            .build_cartesian_2d(x_min..x_max, 0.0..y_max)
            .ok()?;

        let label_at = |x: &f64| month_at(points, *x).unwrap_or_default();
        let money = |y: &f64| format!("{}{:.0}", currency, y);

        chart
            .configure_mesh()
            .x_labels(points.len())
            .x_label_formatter(&label_at)
            .y_label_formatter(&money)
            .label_style(("sans-serif", 12, &RGBColor(102, 126, 234)))
            .axis_style(&RGBColor(230, 230, 230))
            .bold_line_style(&RGBColor(245, 245, 245))
            .light_line_style(&RGBColor(250, 250, 250))
            .draw()
            .ok()?;

        let color = palette(0);
        let series: Vec<(f64, f64)> = points
            .iter()
            .enumerate()
            .map(|(index, point)| (index as f64, point.value))
            .collect();

        chart
            .draw_series(LineSeries::new(series.clone(), color.stroke_width(3)))
            .ok()?;
        chart
            .draw_series(series.into_iter().map(|point| Circle::new(point, 4, color.filled())))
            .ok()?;

        present(&root, "trend-chart").then_some(())
    }
}

/// Axis bounds for `count` points at x = 0, 1, ..., with half a step of padding
fn x_range(count: usize) -> (f64, f64) {
    (-0.5, count.max(1) as f64 - 0.5)
}

/// Month label for an axis position, only at whole point indices
fn month_at(points: &[TrendPoint], x: f64) -> Option<String> {
    let rounded = x.round();
    if (x - rounded).abs() > 1e-6 || rounded < 0.0 {
        return None;
    }
    points.get(rounded as usize).map(|point| point.label.clone())
}
