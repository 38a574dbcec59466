//! Seeded stratified partitioning: train/test split and k-fold assignment.

use crate::config::PipelineConfig;
use crate::dataset::{read_records, write_records};
use crate::error::{PipelineError, Result};
use crate::features::EngineeredRecord;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::BTreeMap;
use tracing::info;

/// Row indices grouped by label, ascending label order
fn indices_by_label(labels: &[u8]) -> BTreeMap<u8, Vec<usize>> {
    let mut groups: BTreeMap<u8, Vec<usize>> = BTreeMap::new();
    for (i, l) in labels.iter().enumerate() {
        groups.entry(*l).or_default().push(i);
    }
    groups
}

/// Stratified train/test row indices. Each class sends `round(n_class * test_size)` rows to test.
pub fn stratified_split(labels: &[u8], test_size: f64, seed: u64) -> Result<(Vec<usize>, Vec<usize>)> {
    if !(0.0..1.0).contains(&test_size) {
        return Err(PipelineError::InvalidParameter(format!(
            "test_size must be in [0, 1), got {}",
            test_size
        )));
    }
    if labels.is_empty() {
        return Err(PipelineError::EmptyDataset);
    }
    let mut rng = StdRng::seed_from_u64(seed);
    let mut train = Vec::new();
    let mut test = Vec::new();
    for (_, mut idx) in indices_by_label(labels) {
        idx.shuffle(&mut rng);
        let n_test = (idx.len() as f64 * test_size).round() as usize;
        test.extend_from_slice(&idx[..n_test]);
        train.extend_from_slice(&idx[n_test..]);
    }
    train.shuffle(&mut rng);
    test.shuffle(&mut rng);
    Ok((train, test))
}

/// Stratified k-fold: returns (train, validation) row indices per fold
pub fn stratified_folds(labels: &[u8], k: usize, seed: u64) -> Result<Vec<(Vec<usize>, Vec<usize>)>> {
    if k < 2 {
        return Err(PipelineError::InvalidParameter(format!("folds must be >= 2, got {}", k)));
    }
    if labels.len() < k {
        return Err(PipelineError::InvalidParameter(format!(
            "{} rows cannot fill {} folds",
            labels.len(),
            k
        )));
    }
    let mut rng = StdRng::seed_from_u64(seed);
    let mut fold_of = vec![0usize; labels.len()];
    // continuing the round-robin across classes keeps fold sizes within one row of each other
    let mut next = 0;
    for (_, mut idx) in indices_by_label(labels) {
        idx.shuffle(&mut rng);
        for i in idx {
            fold_of[i] = next % k;
            next += 1;
        }
    }
    Ok((0..k)
        .map(|f| {
            let (val, train): (Vec<usize>, Vec<usize>) = (0..labels.len()).partition(|i| fold_of[*i] == f);
            (train, val)
        })
        .collect())
}

/// Split stage: engineered file → train and test files
pub fn split(config: &PipelineConfig) -> Result<(Vec<EngineeredRecord>, Vec<EngineeredRecord>)> {
    let records: Vec<EngineeredRecord> = read_records(&config.paths.featured())?;
    let labels: Vec<u8> = records.iter().map(|r| r.attrition).collect();
    let (train_idx, test_idx) = stratified_split(&labels, config.split.test_size, config.split.seed)?;

    let pick = |idx: &[usize]| idx.iter().map(|i| records[*i].clone()).collect::<Vec<_>>();
    let train = pick(&train_idx);
    let test = pick(&test_idx);

    write_records(&config.paths.train(), &train)?;
    write_records(&config.paths.test(), &test)?;
    info!(train = train.len(), test = test.len(), "preprocessing completed and data saved");
    Ok((train, test))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(n0: usize, n1: usize) -> Vec<u8> {
        let mut v = vec![0u8; n0];
        v.extend(std::iter::repeat(1u8).take(n1));
        v
    }

    #[test]
    fn split_preserves_class_proportions() {
        let y = labels(60, 40);
        let (train, test) = stratified_split(&y, 0.2, 42).unwrap();
        assert_eq!(train.len(), 80);
        assert_eq!(test.len(), 20);
        let test_pos = test.iter().filter(|i| y[**i] == 1).count();
        assert_eq!(test_pos, 8);
    }

    #[test]
    fn split_is_a_partition() {
        let y = labels(33, 17);
        let (mut train, test) = stratified_split(&y, 0.2, 7).unwrap();
        train.extend(test);
        train.sort_unstable();
        assert_eq!(train, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn split_is_reproducible_for_a_seed() {
        let y = labels(50, 50);
        assert_eq!(
            stratified_split(&y, 0.2, 42).unwrap(),
            stratified_split(&y, 0.2, 42).unwrap()
        );
        assert_ne!(
            stratified_split(&y, 0.2, 42).unwrap(),
            stratified_split(&y, 0.2, 43).unwrap()
        );
    }

    #[test]
    fn rejects_bad_test_size() {
        assert!(stratified_split(&labels(5, 5), 1.5, 42).is_err());
        assert!(stratified_split(&[], 0.2, 42).is_err());
    }

    #[test]
    fn folds_cover_every_row_once_and_stay_stratified() {
        let y = labels(50, 25);
        let folds = stratified_folds(&y, 5, 42).unwrap();
        assert_eq!(folds.len(), 5);
        let mut seen: Vec<usize> = folds.iter().flat_map(|(_, v)| v.clone()).collect();
        seen.sort_unstable();
        assert_eq!(seen, (0..75).collect::<Vec<_>>());
        for (train, val) in &folds {
            assert_eq!(train.len() + val.len(), 75);
            assert_eq!(val.len(), 15);
            assert_eq!(val.iter().filter(|i| y[**i] == 1).count(), 5);
        }
    }
}
