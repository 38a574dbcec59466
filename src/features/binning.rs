//! Fixed-edge binning with right-closed intervals `(a, b]`.

#[derive(Debug, Clone, Copy)]
pub struct Bins {
    pub edges: &'static [f64],
    pub labels: &'static [i64],
    /// Close the first interval on its left edge as well
    pub include_lowest: bool,
}

/// Annual income (monthly × 12)
pub const ANNUAL_INCOME_BINS: Bins = Bins {
    edges: &[0.0, 240_000.0, 420_000.0, 600_000.0, 2_000_000.0, f64::INFINITY],
    labels: &[0, 1, 2, 3, 4],
    include_lowest: true,
};

/// Age in years
pub const AGE_BINS: Bins = Bins {
    edges: &[17.0, 25.0, 35.0, 45.0, 60.0, 65.0],
    labels: &[1, 2, 3, 4, 5],
    include_lowest: false,
};

impl Bins {
    /// Label of the interval containing `v`; `None` outside every interval
    pub fn assign(&self, v: f64) -> Option<i64> {
        if v.is_nan() {
            return None;
        }
        self.edges
            .windows(2)
            .zip(self.labels)
            .enumerate()
            .find(|(i, (w, _))| {
                let above = v > w[0] || (self.include_lowest && *i == 0 && v == w[0]);
                above && v <= w[1]
            })
            .map(|(_, (_, label))| *label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn income_edges() {
        let b = ANNUAL_INCOME_BINS;
        assert_eq!(b.assign(0.0), Some(0));
        assert_eq!(b.assign(240_000.0), Some(0));
        assert_eq!(b.assign(240_000.01), Some(1));
        assert_eq!(b.assign(420_000.0), Some(1));
        assert_eq!(b.assign(600_000.0), Some(2));
        assert_eq!(b.assign(2_000_000.0), Some(3));
        assert_eq!(b.assign(2_000_001.0), Some(4));
        assert_eq!(b.assign(-1.0), None);
    }

    #[test]
    fn age_edges() {
        let b = AGE_BINS;
        assert_eq!(b.assign(17.0), None);
        assert_eq!(b.assign(18.0), Some(1));
        assert_eq!(b.assign(25.0), Some(1));
        assert_eq!(b.assign(26.0), Some(2));
        assert_eq!(b.assign(45.0), Some(3));
        assert_eq!(b.assign(59.0), Some(4));
        assert_eq!(b.assign(65.0), Some(5));
        assert_eq!(b.assign(66.0), None);
    }

    #[test]
    fn nan_is_unbinned() {
        assert_eq!(ANNUAL_INCOME_BINS.assign(f64::NAN), None);
    }
}
