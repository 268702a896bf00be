use std::collections::{HashMap, HashSet};

use crate::aggregate::{SUMMARY_DAYS, SummaryRow};

/// Column order of the final table.
pub const HEADER: [&str; 11] = [
    "City", "Min 1", "Max 1", "Min 2", "Max 2", "Min 3", "Max 3", "Min 4", "Max 4", "Min Avg",
    "Max Avg",
];

/// Drop duplicate city queries, keeping the first occurrence of each. Runs
/// before any network call so duplicates cost nothing.
pub fn dedup_cities(cities: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    cities.iter().filter(|city| seen.insert(city.as_str())).cloned().collect()
}

/// Order the aggregated rows by the caller's original city list (duplicates
/// collapsed, first occurrence wins) and render every numeric column as
/// two-decimal text. Cities the aggregator dropped are simply absent; no
/// placeholder rows.
pub fn render_table(rows: &HashMap<String, SummaryRow>, cities: &[String]) -> Vec<Vec<String>> {
    dedup_cities(cities).iter().filter_map(|city| rows.get(city)).map(format_row).collect()
}

fn format_row(row: &SummaryRow) -> Vec<String> {
    let mut out = Vec::with_capacity(HEADER.len());
    out.push(display_name(&row.city));
    for rank in 0..SUMMARY_DAYS {
        out.push(format_temp(row.day_min[rank]));
        out.push(format_temp(row.day_max[rank]));
    }
    out.push(format_temp(row.min_avg));
    out.push(format_temp(row.max_avg));
    out
}

/// Cosmetic rewrite of the query form: "Lima,Peru" -> "Lima, Peru".
fn display_name(city: &str) -> String {
    city.replace(',', ", ")
}

fn format_temp(value: f64) -> String {
    format!("{value:.2}")
}
