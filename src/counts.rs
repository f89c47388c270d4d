/// Status counting and badge precedence
use crate::topic::{Status, Topic};
use serde::{Deserialize, Serialize};

pub const RED_BADGE_COLOR: &str = "#f44336";
pub const YELLOW_BADGE_COLOR: &str = "#ffc107";

/// Aggregate of topics per status, cached in storage as `conteoTemas`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    #[serde(rename = "rojo")]
    pub red: usize,
    #[serde(rename = "amarillo")]
    pub yellow: usize,
    #[serde(rename = "verde")]
    pub green: usize,
    pub total: usize,
}

impl StatusCounts {
    pub fn tally(topics: &[Topic]) -> StatusCounts {
        topics.iter().fold(
            StatusCounts {
                total: topics.len(),
                ..StatusCounts::default()
            },
            |mut counts, topic| {
                match topic.status() {
                    Status::Red => counts.red += 1,
                    Status::Yellow => counts.yellow += 1,
                    Status::Green => counts.green += 1,
                }
                counts
            },
        )
    }
}

/// What the toolbar badge should show
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Badge {
    Alert { text: String, color: &'static str },
    Clear,
}

impl Badge {
    /// Red beats yellow; green alone (or nothing) clears the badge
    pub fn for_counts(counts: &StatusCounts) -> Badge {
        if counts.red > 0 {
            Badge::Alert {
                text: counts.red.to_string(),
                color: RED_BADGE_COLOR,
            }
        } else if counts.yellow > 0 {
            Badge::Alert {
                text: counts.yellow.to_string(),
                color: YELLOW_BADGE_COLOR,
            }
        } else {
            Badge::Clear
        }
    }

    pub fn text(&self) -> &str {
        match self {
            Badge::Alert { text, .. } => text,
            Badge::Clear => "",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(red: usize, yellow: usize, green: usize) -> StatusCounts {
        StatusCounts {
            red,
            yellow,
            green,
            total: red + yellow + green,
        }
    }

    fn topic(status: &str) -> Topic {
        serde_json::from_value(serde_json::json!({
            "nombre": "tema",
            "estado": status,
        }))
        .unwrap()
    }

    #[test]
    fn test_tally() {
        let topics = vec![topic("rojo"), topic("verde"), topic("rojo"), topic("amarillo")];

        let counts = StatusCounts::tally(&topics);

        assert_eq!(counts.red, 2);
        assert_eq!(counts.yellow, 1);
        assert_eq!(counts.green, 1);
        assert_eq!(counts.total, 4);
    }

    #[test]
    fn test_tally_empty() {
        assert_eq!(StatusCounts::tally(&[]), StatusCounts::default());
    }

    #[test]
    fn test_badge_red_wins() {
        let badge = Badge::for_counts(&counts(3, 7, 9));
        assert_eq!(
            badge,
            Badge::Alert {
                text: "3".to_string(),
                color: RED_BADGE_COLOR
            }
        );
    }

    #[test]
    fn test_badge_yellow_without_red() {
        let badge = Badge::for_counts(&counts(0, 5, 2));
        assert_eq!(
            badge,
            Badge::Alert {
                text: "5".to_string(),
                color: YELLOW_BADGE_COLOR
            }
        );
    }

    #[test]
    fn test_badge_cleared_for_green_or_nothing() {
        assert_eq!(Badge::for_counts(&counts(0, 0, 4)), Badge::Clear);
        assert_eq!(Badge::for_counts(&counts(0, 0, 0)), Badge::Clear);
        assert_eq!(Badge::Clear.text(), "");
    }

    #[test]
    fn test_badge_precedence_grid() {
        for red in 0..3 {
            for yellow in 0..3 {
                for green in 0..3 {
                    let badge = Badge::for_counts(&counts(red, yellow, green));
                    let expected = if red > 0 {
                        red.to_string()
                    } else if yellow > 0 {
                        yellow.to_string()
                    } else {
                        String::new()
                    };
                    assert_eq!(badge.text(), expected);
                }
            }
        }
    }

    #[test]
    fn test_storage_shape() {
        let json = serde_json::to_value(counts(1, 2, 3)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"rojo": 1, "amarillo": 2, "verde": 3, "total": 6})
        );
    }
}
