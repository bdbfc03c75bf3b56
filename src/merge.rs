// src/merge.rs
// Deterministic merge over the per-source results: flatten, dedup by numeric
// value, sort ascending. Pure and total; arrival order of the inputs never
// shows in the output.

use serde_json::Number;

/// Flatten all per-source sequences, drop duplicate numeric values (`1` and
/// `1.0` are the same value), and sort ascending numerically.
pub fn merge(results: Vec<Vec<f64>>) -> Vec<f64> {
    let mut all: Vec<f64> = results.into_iter().flatten().collect();
    all.sort_by(f64::total_cmp);
    all.dedup_by(|a, b| a == b);
    all
}

/// Wire representation: integral values serialize as JSON integers
/// (`3`, not `3.0`), everything else as floats. Inputs come from parsed
/// JSON, so non-finite values cannot occur.
pub fn to_json_numbers(values: &[f64]) -> Vec<Number> {
    values
        .iter()
        .map(|&v| {
            if v.fract() == 0.0 && (i64::MIN as f64..=i64::MAX as f64).contains(&v) {
                Number::from(v as i64)
            } else {
                Number::from_f64(v).unwrap_or_else(|| Number::from(0))
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merges_dedups_and_sorts_ascending() {
        assert_eq!(merge(vec![vec![3.0, 1.0, 2.0], vec![2.0, 5.0]]), vec![1.0, 2.0, 3.0, 5.0]);
    }

    #[test]
    fn all_empty_inputs_merge_to_empty() {
        assert_eq!(merge(vec![]), Vec::<f64>::new());
        assert_eq!(merge(vec![vec![], vec![], vec![]]), Vec::<f64>::new());
    }

    #[test]
    fn sorts_numerically_not_lexicographically() {
        // String ordering would put 10 before 2.
        assert_eq!(merge(vec![vec![10.0, 2.0, 1.0]]), vec![1.0, 2.0, 10.0]);
    }

    #[test]
    fn negatives_and_fractions_sort_by_value() {
        assert_eq!(
            merge(vec![vec![0.5, -3.0], vec![-0.25, 2.0]]),
            vec![-3.0, -0.25, 0.5, 2.0]
        );
    }

    #[test]
    fn equal_values_collapse_regardless_of_representation() {
        // 1 and 1.0 are the same numeric value; so are -0.0 and 0.0.
        assert_eq!(merge(vec![vec![1.0], vec![1.0, -0.0, 0.0]]), vec![0.0, 1.0]);
    }

    #[test]
    fn merge_is_idempotent() {
        let r = vec![vec![3.0, 1.0, 2.0, 2.0], vec![5.0, 1.5]];
        let once = merge(r);
        assert_eq!(merge(vec![once.clone()]), once);
    }

    #[test]
    fn wire_numbers_keep_integers_integral() {
        let out = to_json_numbers(&[1.0, 2.5, -3.0]);
        let rendered = serde_json::to_string(&out).unwrap();
        assert_eq!(rendered, "[1,2.5,-3]");
    }
}
