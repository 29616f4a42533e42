//! CSV and paginated text report export of the in-memory expense list.
//!
//! CSV fields are joined with bare commas and are not quoted, so a comma
//! inside a description shifts the columns of that row.

use chrono::NaiveDate;

use crate::{error::ExportError, Expense};

pub const CSV_HEADER: &str = "Category,Amount,Description,Date";

/// A finished export ready to be handed to the browser as a download
#[derive(Debug, Clone, PartialEq)]
pub struct ExportFile {
    pub filename: String,
    pub mime_type: &'static str,
    pub content: String,
}

/// CSV text: header plus one row per expense in list order, no trailing newline
pub fn to_csv(expenses: &[Expense]) -> Result<String, ExportError> {
    if expenses.is_empty() {
        return Err(ExportError::Empty);
    }

    let mut lines = Vec::with_capacity(expenses.len() + 1);
    lines.push(CSV_HEADER.to_string());
    for expense in expenses {
        lines.push(
            [
                expense.category.as_str(),
                expense.amount.to_string().as_str(),
                expense.description.as_str(),
                expense.expense_date.as_str(),
            ]
            .join(","),
        );
    }
    Ok(lines.join("\n"))
}

pub fn csv_file(expenses: &[Expense], today: NaiveDate) -> Result<ExportFile, ExportError> {
    Ok(ExportFile {
        filename: format!("expenses_{}.csv", today.format("%Y%m%d")),
        mime_type: "text/csv",
        content: to_csv(expenses)?,
    })
}

/// Vertical geometry of a report page, in abstract units (A4 millimetres by default)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReportLayout {
    pub page_height: u32,
    pub top_margin: u32,
    pub bottom_margin: u32,
    pub line_spacing: u32,
}

impl Default for ReportLayout {
    fn default() -> Self {
        Self {
            page_height: 297,
            top_margin: 20,
            bottom_margin: 10,
            line_spacing: 10,
        }
    }
}

impl ReportLayout {
    fn last_line_y(&self) -> u32 {
        self.page_height.saturating_sub(self.bottom_margin)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportLine {
    /// Distance from the top of the page
    pub y: u32,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportPage {
    pub lines: Vec<ReportLine>,
}

/// Expense report laid out top to bottom with a fixed line spacing.
///
/// The title sits on the first page with one blank line below it. A new page
/// starts whenever the next line would fall past the bottom margin.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub pages: Vec<ReportPage>,
}

impl Report {
    pub fn build(expenses: &[Expense], title: &str, layout: ReportLayout) -> Result<Self, ExportError> {
        if expenses.is_empty() {
            return Err(ExportError::Empty);
        }

        let mut pages = Vec::new();
        let mut page = ReportPage::default();
        page.lines.push(ReportLine {
            y: layout.top_margin,
            text: title.to_string(),
        });
        let mut y = layout.top_margin + layout.line_spacing * 2;

        for expense in expenses {
            if y > layout.last_line_y() {
                pages.push(std::mem::take(&mut page));
                y = layout.top_margin;
            }
            page.lines.push(ReportLine {
                y,
                text: report_row(expense),
            });
            y += layout.line_spacing;
        }
        pages.push(page);

        Ok(Self { pages })
    }

    /// Plain-text rendering; pages are separated by a form feed
    pub fn render_text(&self) -> String {
        self.pages
            .iter()
            .map(|page| {
                page.lines
                    .iter()
                    .map(|line| line.text.as_str())
                    .collect::<Vec<_>>()
                    .join("\n")
            })
            .collect::<Vec<_>>()
            .join("\n\u{000C}\n")
    }
}

fn report_row(expense: &Expense) -> String {
    format!(
        "{} | {} | {} | {}",
        expense.expense_date, expense.category, expense.amount, expense.description
    )
}

pub fn report_file(
    expenses: &[Expense],
    today: NaiveDate,
    layout: ReportLayout,
) -> Result<ExportFile, ExportError> {
    let title = format!("Expense Report - {}", today.format("%Y-%m-%d"));
    let report = Report::build(expenses, &title, layout)?;
    Ok(ExportFile {
        filename: format!("expenses_report_{}.txt", today.format("%Y%m%d")),
        mime_type: "text/plain",
        content: report.render_text(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{expense, sample_expenses};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    #[test]
    fn test_csv_sample_exact() {
        assert_eq!(
            to_csv(&sample_expenses()).unwrap(),
            "Category,Amount,Description,Date\nFood,10,,2024-01-05\nFood,5,,2024-01-20\nTransport,7,,2024-02-01"
        );
    }

    #[test]
    fn test_csv_keeps_fractional_amounts_and_list_order() {
        let mut lunch = expense(1, "Food", 7.5, "2024-05-02");
        lunch.description = "Lunch".to_string();
        let expenses = vec![expense(2, "Rent", 900.0, "2024-05-01"), lunch];

        let csv = to_csv(&expenses).unwrap();
        let rows: Vec<&str> = csv.lines().collect();
        assert_eq!(rows[1], "Rent,900,,2024-05-01");
        assert_eq!(rows[2], "Food,7.5,Lunch,2024-05-02");
    }

    #[test]
    fn test_csv_does_not_quote_embedded_commas() {
        let mut record = expense(1, "Food", 3.0, "2024-01-01");
        record.description = "milk, eggs".to_string();

        let csv = to_csv(&[record]).unwrap();
        assert!(csv.ends_with("Food,3,milk, eggs,2024-01-01"));
    }

    #[test]
    fn test_exports_fail_on_empty_list() {
        assert_eq!(to_csv(&[]), Err(ExportError::Empty));
        assert_eq!(csv_file(&[], today()), Err(ExportError::Empty));
        assert_eq!(
            Report::build(&[], "Report", ReportLayout::default()),
            Err(ExportError::Empty)
        );
        assert_eq!(
            report_file(&[], today(), ReportLayout::default()),
            Err(ExportError::Empty)
        );
    }

    #[test]
    fn test_file_names() {
        let csv = csv_file(&sample_expenses(), today()).unwrap();
        assert_eq!(csv.filename, "expenses_20240301.csv");
        assert_eq!(csv.mime_type, "text/csv");

        let report = report_file(&sample_expenses(), today(), ReportLayout::default()).unwrap();
        assert_eq!(report.filename, "expenses_report_20240301.txt");
        assert!(report.content.starts_with("Expense Report - 2024-03-01\n"));
    }

    #[test]
    fn test_report_lines_use_fixed_spacing() {
        let report = Report::build(&sample_expenses(), "Report", ReportLayout::default()).unwrap();
        assert_eq!(report.pages.len(), 1);

        let lines = &report.pages[0].lines;
        assert_eq!(lines[0].y, 20);
        assert_eq!(lines[1].y, 40);
        assert_eq!(lines[2].y, 50);
        assert_eq!(lines[3].y, 60);
        assert_eq!(lines[1].text, "2024-01-05 | Food | 10 | ");
    }

    #[test]
    fn test_report_starts_new_page_past_bottom_margin() {
        // first page holds the title plus rows at y = 40..=280
        let expenses: Vec<Expense> = (0..30)
            .map(|i| expense(i, "Food", 1.0, "2024-01-01"))
            .collect();
        let report = Report::build(&expenses, "Report", ReportLayout::default()).unwrap();

        assert_eq!(report.pages.len(), 2);
        assert_eq!(report.pages[0].lines.len(), 1 + 25);
        assert_eq!(report.pages[0].lines.last().unwrap().y, 280);
        assert_eq!(report.pages[1].lines.len(), 5);
        assert_eq!(report.pages[1].lines[0].y, 20);

        let rows: usize = report.pages.iter().map(|p| p.lines.len()).sum::<usize>() - 1;
        assert_eq!(rows, expenses.len());
        assert_eq!(report.render_text().matches('\u{000C}').count(), 1);
    }
}
