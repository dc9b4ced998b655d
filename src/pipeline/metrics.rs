//! Confusion matrix and per-class precision/recall/F1 for the held-out predictions

use serde::Serialize;

/// 2x2 confusion matrix indexed `[actual][predicted]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ConfusionMatrix {
    pub counts: [[usize; 2]; 2],
}

impl ConfusionMatrix {
    pub fn from_predictions(truth: &[u8], predicted: &[u8]) -> Self {
        let mut counts = [[0usize; 2]; 2];
        for (&t, &p) in truth.iter().zip(predicted) {
            counts[usize::from(t.min(1))][usize::from(p.min(1))] += 1;
        }
        Self { counts }
    }

    pub fn true_positives(&self, class: usize) -> usize {
        self.counts[class][class]
    }

    /// Rows predicted as `class`
    pub fn predicted(&self, class: usize) -> usize {
        self.counts[0][class] + self.counts[1][class]
    }

    /// Rows whose actual label is `class`
    pub fn actual(&self, class: usize) -> usize {
        self.counts[class][0] + self.counts[class][1]
    }

    pub fn total(&self) -> usize {
        self.actual(0) + self.actual(1)
    }
}

/// Precision, recall and F1 for one class
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassMetrics {
    pub label: String,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub support: usize,
}

/// Per-class metrics with accuracy and macro/weighted averages.
///
/// Undefined ratios (zero denominators) are reported as 0.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationReport {
    pub classes: Vec<ClassMetrics>,
    pub accuracy: f64,
    pub macro_avg: ClassMetrics,
    pub weighted_avg: ClassMetrics,
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}

impl ClassificationReport {
    /// Build from a confusion matrix; `labels[c]` names class `c`.
    pub fn new(matrix: &ConfusionMatrix, labels: [&str; 2]) -> Self {
        let classes: Vec<ClassMetrics> = (0..2)
            .map(|c| {
                let precision = ratio(matrix.true_positives(c), matrix.predicted(c));
                let recall = ratio(matrix.true_positives(c), matrix.actual(c));
                let f1 = if precision + recall == 0.0 {
                    0.0
                } else {
                    2.0 * precision * recall / (precision + recall)
                };
                ClassMetrics {
                    label: labels[c].to_string(),
                    precision,
                    recall,
                    f1,
                    support: matrix.actual(c),
                }
            })
            .collect();

        let total = matrix.total();
        let average = |label: &str, weight: &dyn Fn(&ClassMetrics) -> f64| {
            let norm: f64 = classes.iter().map(weight).sum();
            let mean = |f: fn(&ClassMetrics) -> f64| {
                if norm == 0.0 {
                    0.0
                } else {
                    classes.iter().map(|c| f(c) * weight(c)).sum::<f64>() / norm
                }
            };
            ClassMetrics {
                label: label.to_string(),
                precision: mean(|c| c.precision),
                recall: mean(|c| c.recall),
                f1: mean(|c| c.f1),
                support: total,
            }
        };

        let macro_avg = average("macro avg", &|_| 1.0);
        let weighted_avg = average("weighted avg", &|c| c.support as f64);

        Self {
            accuracy: ratio(matrix.true_positives(0) + matrix.true_positives(1), total),
            classes,
            macro_avg,
            weighted_avg,
        }
    }
}
