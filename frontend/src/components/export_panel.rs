use std::rc::Rc;

use shared::export::{csv_file, report_file};
use shared::{ClientError, Expense, ExportFile, ReportLayout};
use yew::prelude::*;

use crate::services::download;
use crate::services::logging::Logger;

#[derive(Properties, PartialEq)]
pub struct ExportPanelProps {
    pub expenses: Rc<Vec<Expense>>,
}

#[derive(Clone, Copy)]
enum ExportKind {
    Csv,
    Report,
}

impl ExportKind {
    fn build(self, expenses: &[Expense]) -> Result<ExportFile, ClientError> {
        let today = chrono::Local::now().date_naive();
        let file = match self {
            ExportKind::Csv => csv_file(expenses, today)?,
            ExportKind::Report => report_file(expenses, today, ReportLayout::default())?,
        };
        Ok(file)
    }
}

/// CSV and report downloads of the expenses currently listed
#[function_component(ExportPanel)]
pub fn export_panel(props: &ExportPanelProps) -> Html {
    let message = use_state(|| Option::<Result<String, String>>::None);

    let on_export = |kind: ExportKind| {
        let expenses = props.expenses.clone();
        let message = message.clone();
        Callback::from(move |_: MouseEvent| {
            let outcome = kind
                .build(&expenses)
                .map_err(|e| e.to_string())
                .and_then(|file| download::save_file(&file).map(|()| file.filename));

            if let Err(e) = &outcome {
                Logger::warn_with_component("export", &format!("export failed: {}", e));
            }
            message.set(Some(outcome.map(|filename| format!("Saved {}", filename))));
        })
    };

    html! {
        <section class="export-section">
            <h2>{"Export"}</h2>
            <div class="export-actions">
                <button class="btn btn-secondary" onclick={on_export(ExportKind::Csv)}>
                    {"Download CSV"}
                </button>
                <button class="btn btn-secondary" onclick={on_export(ExportKind::Report)}>
                    {"Download Report"}
                </button>
            </div>
            {match (*message).as_ref() {
                Some(Ok(text)) => html! { <div class="form-message success">{text}</div> },
                Some(Err(text)) => html! { <div class="form-message error">{text}</div> },
                None => html! {},
            }}
        </section>
    }
}
