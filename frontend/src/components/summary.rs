use shared::SummaryView;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct SummaryCardsProps {
    pub summary: SummaryView,
}

#[function_component(SummaryCards)]
pub fn summary_cards(props: &SummaryCardsProps) -> Html {
    let summary = &props.summary;

    html! {
        <section class="summary-section">
            <div class="summary-card">
                <span class="summary-label">{"Total Expenses"}</span>
                <span class="summary-value">{&summary.total_label}</span>
            </div>
            <div class="summary-card">
                <span class="summary-label">{"Total Records"}</span>
                <span class="summary-value">{summary.record_count.to_string()}</span>
            </div>
            {if summary.rejected_count > 0 {
                html! {
                    <div class="summary-card warning">
                        <span class="summary-label">{"Unreadable amounts"}</span>
                        <span class="summary-value">{summary.rejected_count.to_string()}</span>
                    </div>
                }
            } else { html! {} }}
        </section>
    }
}
