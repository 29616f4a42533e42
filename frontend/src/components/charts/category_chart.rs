use std::f64::consts::PI;

use plotters::prelude::*;
use shared::CategorySlice;
use yew::prelude::*;

use super::{clear_surface, palette, present, CHART_HEIGHT, CHART_WIDTH};
use crate::services::logging::Logger;

// Points per full turn when approximating slice arcs
const ARC_STEPS: f64 = 120.0;

#[derive(Properties, PartialEq)]
pub struct CategoryChartProps {
    pub slices: Vec<CategorySlice>,
}

/// Share of the total spent per category, as a pie with a legend
pub struct CategoryChart {
    canvas_ref: NodeRef,
}

impl Component for CategoryChart {
    type Message = ();
    type Properties = CategoryChartProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            canvas_ref: NodeRef::default(),
        }
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        ctx.props().slices != old_props.slices
    }

    fn rendered(&mut self, ctx: &Context<Self>, _first_render: bool) {
        self.draw(&ctx.props().slices);
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        html! {
            <div class="chart-card">
                <h3 class="chart-title">{"Spending by Category"}</h3>
                {if ctx.props().slices.is_empty() {
                    html! {
                        <div class="chart-empty">
                            <p>{"No category data to chart"}</p>
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

impl CategoryChart {
    fn draw(&self, slices: &[CategorySlice]) {
        let Some(root) = clear_surface(&self.canvas_ref) else {
            return;
        };

        let total: f64 = slices.iter().map(|slice| slice.value).sum();
        if total <= 0.0 {
            return;
        }

        let (pie_area, legend_area) = root.split_horizontally(CHART_HEIGHT as i32);
        let center = ((CHART_HEIGHT / 2) as i32, (CHART_HEIGHT / 2) as i32);
        let radius = (CHART_HEIGHT / 2) as f64 - 20.0;

        let mut start = -PI / 2.0;
        for (index, slice) in slices.iter().enumerate() {
            let sweep = slice.value / total * 2.0 * PI;
            let points = slice_outline(center, radius, start, sweep);
            if pie_area
                .draw(&Polygon::new(points, palette(index).filled()))
                .is_err()
            {
                Logger::warn_with_component("category-chart", "failed to draw slice");
                return;
            }
            start += sweep;
        }

        for (index, slice) in slices.iter().enumerate() {
            let y = 20 + index as i32 * 22;
            let swatch = Rectangle::new([(0, y), (12, y + 12)], palette(index).filled());
            let label = Text::new(
                format!("{} ({:.1}%)", slice.label, slice.share),
                (18, y),
                ("sans-serif", 14).into_font(),
            );
            if legend_area.draw(&swatch).is_err() || legend_area.draw(&label).is_err() {
                return;
            }
        }

        present(&root, "category-chart");
    }
}

/// Closed outline of a pie slice starting at `start` radians and sweeping `sweep`
fn slice_outline(center: (i32, i32), radius: f64, start: f64, sweep: f64) -> Vec<(i32, i32)> {
    let steps = ((sweep / (2.0 * PI)) * ARC_STEPS).ceil().max(1.0) as usize;
    let mut points = Vec::with_capacity(steps + 2);
    points.push(center);
    for step in 0..=steps {
        let angle = start + sweep * step as f64 / steps as f64;
        points.push((
            center.0 + (radius * angle.cos()).round() as i32,
            center.1 + (radius * angle.sin()).round() as i32,
        ));
    }
    points
}
