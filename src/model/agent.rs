use std::fmt;

/// A student together with their cost for every event, in event order
/// (less is better).
#[derive(Clone, Debug, PartialEq)]
pub struct Agent {
    pub student: String,
    pub weights: Vec<f64>,
}

impl Agent {
    pub fn new(student: impl Into<String>, weights: Vec<f64>) -> Self {
        Self {
            student: student.into(),
            weights,
        }
    }

    /// Mean cost over all events, 0 if there are no events at all.
    pub fn average_weight(&self) -> f64 {
        if self.weights.is_empty() {
            0.0
        } else {
            self.weights.iter().sum::<f64>() / self.weights.len() as f64
        }
    }
}

impl fmt::Display for Agent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.student)
    }
}

#[test]
fn test_average_weight() {
    assert_eq!(Agent::new("Jane Doe", vec![1.0, 2.0, 1.5]).average_weight(), 1.5);
    assert_eq!(Agent::new("Bob Doe", vec![]).average_weight(), 0.0);
}
