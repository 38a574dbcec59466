//! Standardizes a subset of columns; every other column passes through unchanged.

use ndarray::{Array2, ArrayView2, Axis};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    pub columns: Vec<usize>,
    pub mean: Vec<f64>,
    /// Population standard deviation; 1.0 for constant columns
    pub scale: Vec<f64>,
}

impl StandardScaler {
    pub fn fit(x: ArrayView2<'_, f64>, columns: &[usize]) -> Self {
        let mut mean = Vec::with_capacity(columns.len());
        let mut scale = Vec::with_capacity(columns.len());
        for &c in columns {
            let col = x.index_axis(Axis(1), c);
            let m = col.mean().unwrap_or(0.0);
            let sd = col.std(0.0);
            mean.push(m);
            scale.push(if sd > 0.0 && sd.is_finite() { sd } else { 1.0 });
        }
        Self {
            columns: columns.to_vec(),
            mean,
            scale,
        }
    }

    pub fn transform(&self, x: ArrayView2<'_, f64>) -> Array2<f64> {
        let mut out = x.to_owned();
        for (i, &c) in self.columns.iter().enumerate() {
            let (m, s) = (self.mean[i], self.scale[i]);
            out.column_mut(c).mapv_inplace(|v| (v - m) / s);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn scales_only_selected_columns() {
        let x = array![[1.0, 10.0], [3.0, 20.0]];
        let s = StandardScaler::fit(x.view(), &[0]);
        assert_eq!(s.mean, vec![2.0]);
        assert_eq!(s.scale, vec![1.0]);
        let t = s.transform(x.view());
        assert_eq!(t, array![[-1.0, 10.0], [1.0, 20.0]]);
    }

    #[test]
    fn constant_column_keeps_unit_scale() {
        let x = array![[5.0], [5.0], [5.0]];
        let s = StandardScaler::fit(x.view(), &[0]);
        assert_eq!(s.scale, vec![1.0]);
        assert_eq!(s.transform(x.view()), array![[0.0], [0.0], [0.0]]);
    }
}
