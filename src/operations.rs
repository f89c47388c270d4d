/// Topic list operations: sorting, formatting

use crate::topic::Topic;

/// Sort topics red, then yellow, then green (stable within a tier)
pub fn sort_by_status(topics: &[Topic]) -> Vec<Topic> {
    let mut sorted = topics.to_vec();
    sorted.sort_by_key(|topic| topic.status().rank());
    sorted
}

/// "2.5 horas"
pub fn format_duration(hours: f64) -> String {
    format!("{:.1} horas", hours)
}
