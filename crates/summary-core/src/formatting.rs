use crate::quarters::QuarterBucket;

/// Axis labels for a run of quarter buckets.
///
/// Each bucket is labelled with the abbreviated month of its start. Every
/// fourth label, starting with the second, also carries the year so that a
/// long series stays readable without repeating the year on every tick.
///
/// # Examples
///
/// ```
/// use summary_core::formatting::quarter_tick_labels;
/// use summary_core::quarters::QuarterBucket;
///
/// let buckets = QuarterBucket::span(
///     QuarterBucket::new(2000, 4).unwrap(),
///     QuarterBucket::new(2001, 2).unwrap(),
/// );
/// assert_eq!(quarter_tick_labels(&buckets), vec!["Oct", "Jan 2001", "Apr"]);
/// ```
pub fn quarter_tick_labels(buckets: &[QuarterBucket]) -> Vec<String> {
    buckets
        .iter()
        .enumerate()
        .map(|(i, bucket)| {
            if i % 4 == 1 {
                bucket.start().format("%b %Y").to_string()
            } else {
                bucket.start().format("%b").to_string()
            }
        })
        .collect()
}

/// Label for a bucket, e.g. `"Jan-Mar 2001"`.
pub fn quarter_range_label(bucket: &QuarterBucket) -> String {
    let last_month = bucket.end() - chrono::Duration::days(1);
    format!(
        "{}-{} {}",
        bucket.start().format("%b"),
        last_month.format("%b"),
        bucket.year()
    )
}
