//! Binary classification metrics. Positive class is 1 (left). Zero denominators yield 0.0.

use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ConfusionMatrix {
    pub tn: usize,
    pub fp: usize,
    pub fn_: usize,
    pub tp: usize,
}

impl ConfusionMatrix {
    pub fn new(y_true: &[u8], y_pred: &[u8]) -> Self {
        let mut m = Self::default();
        for (t, p) in y_true.iter().zip(y_pred) {
            match (t, p) {
                (0, 0) => m.tn += 1,
                (0, _) => m.fp += 1,
                (_, 0) => m.fn_ += 1,
                _ => m.tp += 1,
            }
        }
        m
    }

    pub fn total(&self) -> usize {
        self.tn + self.fp + self.fn_ + self.tp
    }
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}

pub fn accuracy(y_true: &[u8], y_pred: &[u8]) -> f64 {
    let m = ConfusionMatrix::new(y_true, y_pred);
    ratio(m.tp + m.tn, m.total())
}

pub fn precision(y_true: &[u8], y_pred: &[u8]) -> f64 {
    let m = ConfusionMatrix::new(y_true, y_pred);
    ratio(m.tp, m.tp + m.fp)
}

pub fn recall(y_true: &[u8], y_pred: &[u8]) -> f64 {
    let m = ConfusionMatrix::new(y_true, y_pred);
    ratio(m.tp, m.tp + m.fn_)
}

pub fn f1(y_true: &[u8], y_pred: &[u8]) -> f64 {
    let p = precision(y_true, y_pred);
    let r = recall(y_true, y_pred);
    if p + r == 0.0 {
        0.0
    } else {
        2.0 * p * r / (p + r)
    }
}

/// Area under the ROC curve via the rank-sum statistic (ties get average ranks)
pub fn roc_auc(y_true: &[u8], scores: &[f64]) -> f64 {
    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|a, b| scores[*a].total_cmp(&scores[*b]));

    let mut ranks = vec![0.0; scores.len()];
    let mut i = 0;
    while i < order.len() {
        let mut j = i;
        while j + 1 < order.len() && scores[order[j + 1]] == scores[order[i]] {
            j += 1;
        }
        let avg = (i + j) as f64 / 2.0 + 1.0;
        for k in i..=j {
            ranks[order[k]] = avg;
        }
        i = j + 1;
    }

    let n_pos = y_true.iter().filter(|y| **y == 1).count();
    let n_neg = y_true.len() - n_pos;
    if n_pos == 0 || n_neg == 0 {
        return 0.0;
    }
    let pos_rank_sum: f64 = y_true
        .iter()
        .zip(&ranks)
        .filter(|(y, _)| **y == 1)
        .map(|(_, r)| r)
        .sum();
    (pos_rank_sum - (n_pos * (n_pos + 1)) as f64 / 2.0) / (n_pos * n_neg) as f64
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassReport {
    pub label: u8,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub support: usize,
}

/// Per-class precision/recall/F1, class 0 then class 1
pub fn classification_report(y_true: &[u8], y_pred: &[u8]) -> Vec<ClassReport> {
    [0u8, 1u8]
        .iter()
        .map(|&label| {
            // relabel so `label` is the positive class
            let t: Vec<u8> = y_true.iter().map(|y| u8::from(*y == label)).collect();
            let p: Vec<u8> = y_pred.iter().map(|y| u8::from(*y == label)).collect();
            ClassReport {
                label,
                precision: precision(&t, &p),
                recall: recall(&t, &p),
                f1: f1(&t, &p),
                support: t.iter().filter(|v| **v == 1).count(),
            }
        })
        .collect()
}

/// Mean and population standard deviation
pub fn mean_std(values: &[f64]) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0);
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    (mean, var.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    const Y: [u8; 6] = [0, 0, 0, 1, 1, 1];
    const P: [u8; 6] = [0, 1, 0, 1, 0, 1];

    #[test]
    fn confusion_counts() {
        let m = ConfusionMatrix::new(&Y, &P);
        assert_eq!(m, ConfusionMatrix { tn: 2, fp: 1, fn_: 1, tp: 2 });
    }

    #[test]
    fn headline_metrics() {
        assert!((accuracy(&Y, &P) - 4.0 / 6.0).abs() < 1e-12);
        assert!((precision(&Y, &P) - 2.0 / 3.0).abs() < 1e-12);
        assert!((recall(&Y, &P) - 2.0 / 3.0).abs() < 1e-12);
        assert!((f1(&Y, &P) - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn zero_denominators() {
        assert_eq!(precision(&[0, 1], &[0, 0]), 0.0);
        assert_eq!(recall(&[0, 0], &[0, 1]), 0.0);
        assert_eq!(f1(&[0, 0], &[0, 0]), 0.0);
    }

    #[test]
    fn auc_perfect_random_and_tied() {
        assert_eq!(roc_auc(&[0, 0, 1, 1], &[0.1, 0.2, 0.8, 0.9]), 1.0);
        assert_eq!(roc_auc(&[0, 0, 1, 1], &[0.9, 0.8, 0.2, 0.1]), 0.0);
        assert_eq!(roc_auc(&[0, 1, 0, 1], &[0.5, 0.5, 0.5, 0.5]), 0.5);
        assert_eq!(roc_auc(&[0, 1, 0, 1], &[0.1, 0.4, 0.35, 0.8]), 0.75);
    }

    #[test]
    fn report_per_class() {
        let r = classification_report(&Y, &P);
        assert_eq!(r.len(), 2);
        assert_eq!(r[0].support, 3);
        assert!((r[0].recall - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn mean_and_population_std() {
        let (m, s) = mean_std(&[1.0, 3.0]);
        assert_eq!(m, 2.0);
        assert_eq!(s, 1.0);
    }
}
