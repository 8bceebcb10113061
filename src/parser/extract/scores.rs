use std::sync::LazyLock;

use scraper::{ElementRef, Selector};
use serde::Serialize;

use crate::parser::cells::{clean_cell, direct_cells};

static TR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("tr").unwrap());

/// Score rollup over one listing's inspection rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScoreSummary {
    pub average_score: f64,
    pub high_score: i32,
    pub total_inspections: usize,
}

/// A row recording one inspection event: a `tr` with exactly four direct
/// cells whose first cell mentions an inspection without *leading* with
/// the word. The section header ("Inspection Type / Date ...") starts
/// with it; data rows ("Routine Inspection/Field Review ...") do not.
/// The cell-count check runs first, so short rows never reach the text
/// lookup.
pub fn is_inspection_row(row: ElementRef<'_>) -> bool {
    if row.value().name() != "tr" {
        return false;
    }
    let cells = direct_cells(&row);
    if cells.len() != 4 {
        return false;
    }
    let text = clean_cell(cells.first().copied()).to_lowercase();
    text.contains("inspection") && !text.starts_with("inspection")
}

/// Count, average, and max the scores in the listing's inspection rows.
/// A score cell that fails to parse drops that row from the sample count
/// rather than erroring; an empty sample set averages to 0.
pub fn summarize(listing: ElementRef<'_>) -> ScoreSummary {
    let rows: Vec<_> = listing
        .select(&TR)
        .filter(|row| is_inspection_row(*row))
        .collect();

    let mut samples = rows.len();
    let mut total = 0;
    let mut high_score = 0;
    for row in rows {
        let cells = direct_cells(&row);
        match clean_cell(cells.get(2).copied()).parse::<i32>() {
            Ok(score) => {
                total += score;
                if score > high_score {
                    high_score = score;
                }
            }
            Err(_) => samples -= 1,
        }
    }

    let average_score = if samples > 0 {
        f64::from(total) / samples as f64
    } else {
        0.0
    };
    ScoreSummary {
        average_score,
        high_score,
        total_inspections: samples,
    }
}
