// crates/rv_foundation/src/float.rs

//! 浮点数辅助函数

/// 检查切片中所有值是否有限
///
/// 返回第一个非有限值的位置，全部有限时返回 `None`。
#[inline]
pub fn first_non_finite(values: &[f64]) -> Option<usize> {
    values.iter().position(|v| !v.is_finite())
}

/// 在 [start, end] 上生成 n 个等距点（含两端）
///
/// 与常见数值库的 `linspace` 行为一致：`n == 1` 时仅返回 `start`，
/// 最后一个点精确等于 `end`。
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            let mut out: Vec<f64> = (0..n).map(|i| start + step * i as f64).collect();
            out[n - 1] = end;
            out
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linspace_endpoints() {
        let x = linspace(-0.5, 1.0, 4);
        assert_eq!(x.len(), 4);
        assert_eq!(x[0], -0.5);
        assert_eq!(x[3], 1.0);
        assert!((x[1] - 0.0).abs() < 1e-15);
    }

    #[test]
    fn test_linspace_degenerate() {
        assert!(linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(linspace(2.0, 3.0, 1), vec![2.0]);
    }

    #[test]
    fn test_first_non_finite() {
        assert_eq!(first_non_finite(&[1.0, 2.0]), None);
        assert_eq!(first_non_finite(&[1.0, f64::INFINITY, f64::NAN]), Some(1));
        assert_eq!(first_non_finite(&[f64::NAN]), Some(0));
    }
}
