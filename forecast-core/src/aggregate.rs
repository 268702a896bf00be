use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;

use crate::model::ForecastSample;

/// Number of 3-hour windows that make a calendar date a "complete" day.
pub const SAMPLES_PER_DAY: usize = 8;

/// Number of ranked complete days that go into a summary row.
pub const SUMMARY_DAYS: usize = 4;

/// Per-city output of the aggregation: four ranked days of min/max plus
/// their arithmetic means. Values stay numeric here; rendering to text is
/// the summary module's job.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow {
    pub city: String,
    pub day_min: [f64; SUMMARY_DAYS],
    pub day_max: [f64; SUMMARY_DAYS],
    pub min_avg: f64,
    pub max_avg: f64,
}

/// Running min/max/count for one (city, date) bucket.
#[derive(Debug, Clone, Copy)]
struct DailyAggregate {
    sample_count: usize,
    day_min: f64,
    day_max: f64,
}

impl DailyAggregate {
    fn new() -> Self {
        Self { sample_count: 0, day_min: f64::INFINITY, day_max: f64::NEG_INFINITY }
    }

    fn observe(&mut self, sample: &ForecastSample) {
        self.sample_count += 1;
        self.day_min = self.day_min.min(sample.temp_min);
        self.day_max = self.day_max.max(sample.temp_max);
    }
}

/// Reduce the concatenated multi-city sample set into one summary row per
/// city with at least four complete days. Partial days (fewer than
/// [`SAMPLES_PER_DAY`] windows, typically the edges of the horizon) never
/// enter the ranking, and a city with fewer than [`SUMMARY_DAYS`] complete
/// days is left out entirely rather than producing a partial row.
pub fn summarize(samples: &[ForecastSample]) -> HashMap<String, SummaryRow> {
    let mut buckets: BTreeMap<(&str, NaiveDate), DailyAggregate> = BTreeMap::new();
    for sample in samples {
        buckets
            .entry((sample.city.as_str(), sample.date()))
            .or_insert_with(DailyAggregate::new)
            .observe(sample);
    }

    // The ordered walk visits each city's dates chronologically, so a
    // complete day's rank is its position among the city's survivors.
    // Each city is an independent partition; ranks never cross cities.
    let mut complete_days: HashMap<&str, Vec<DailyAggregate>> = HashMap::new();
    for ((city, _date), agg) in &buckets {
        if agg.sample_count == SAMPLES_PER_DAY {
            complete_days.entry(city).or_default().push(*agg);
        }
    }

    complete_days
        .into_iter()
        .filter(|(_, days)| days.len() >= SUMMARY_DAYS)
        .map(|(city, days)| {
            let day_min = std::array::from_fn(|rank| days[rank].day_min);
            let day_max = std::array::from_fn(|rank| days[rank].day_max);
            let row = SummaryRow {
                city: city.to_string(),
                day_min,
                day_max,
                min_avg: mean(&day_min),
                max_avg: mean(&day_max),
            };
            (city.to_string(), row)
        })
        .collect()
}

fn mean(values: &[f64; SUMMARY_DAYS]) -> f64 {
    values.iter().sum::<f64>() / SUMMARY_DAYS as f64
}
