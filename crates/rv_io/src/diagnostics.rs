// crates/rv_io/src/diagnostics.rs

//! 剖面诊断输出
//!
//! - `profile.csv`: `index,x,a,beta,h0`
//! - `profile.svg`: 接触角、半宽、中心线高度随采样序号的变化（需启用 `plot` 特性）

use std::fmt::Write;
use std::path::{Path, PathBuf};

use rv_physics::SpreadingProfile;
use tracing::info;

use crate::atomic::write_atomic;
use crate::error::IoResult;

/// CSV 文件名
pub const PROFILE_CSV: &str = "profile.csv";
/// SVG 文件名
pub const PROFILE_SVG: &str = "profile.svg";

/// 生成 CSV 文本
pub fn profile_csv(profile: &SpreadingProfile) -> String {
    let mut out = String::with_capacity(64 * (profile.len() + 1));
    out.push_str("index,x,a,beta,h0\n");
    for (i, s) in profile.samples().iter().enumerate() {
        let _ = writeln!(
            out,
            "{},{:.9e},{:.9e},{:.9e},{:.9e}",
            i, s.x, s.half_width, s.contact_angle, s.centerline_height
        );
    }
    out
}

/// 写出 CSV
pub fn write_profile_csv(path: &Path, profile: &SpreadingProfile) -> IoResult<()> {
    write_atomic(path, &profile_csv(profile))
}

/// 写出诊断文件，返回已写出的路径
pub fn write_diagnostics(
    dir: &Path,
    profile: &SpreadingProfile,
    plot: bool,
) -> IoResult<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)?;
    let mut written = Vec::new();

    let csv = dir.join(PROFILE_CSV);
    write_profile_csv(&csv, profile)?;
    written.push(csv);

    if plot {
        #[cfg(feature = "plot")]
        {
            let svg = dir.join(PROFILE_SVG);
            plot::plot_profile(&svg, profile)?;
            written.push(svg);
        }
        #[cfg(not(feature = "plot"))]
        tracing::warn!("未启用 plot 特性，跳过 {}", PROFILE_SVG);
    }

    info!("诊断输出: {} 个文件写入 {}", written.len(), dir.display());
    Ok(written)
}

#[cfg(feature = "plot")]
mod plot {
    use std::path::Path;

    use plotters::prelude::*;
    use rv_physics::SpreadingProfile;

    use crate::error::{IoError, IoResult};

    fn plot_err<E: std::fmt::Display>(err: E) -> IoError {
        IoError::Plot(err.to_string())
    }

    fn range(values: &[f64]) -> std::ops::Range<f64> {
        let lo = values.iter().copied().fold(f64::INFINITY, f64::min);
        let hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let pad = ((hi - lo) * 0.05).max(hi.abs() * 1e-6).max(f64::MIN_POSITIVE);
        (lo - pad)..(hi + pad)
    }

    pub(super) fn plot_profile(path: &Path, profile: &SpreadingProfile) -> IoResult<()> {
        let samples = profile.samples();
        let n = samples.len().max(2) as f64;
        let series: [(&str, Vec<f64>, RGBColor); 3] = [
            ("beta [rad]", samples.iter().map(|s| s.contact_angle).collect(), RED),
            ("a [m]", samples.iter().map(|s| s.half_width).collect(), BLUE),
            ("h0 [m]", samples.iter().map(|s| s.centerline_height).collect(), GREEN),
        ];

        let root = SVGBackend::new(path, (800, 900)).into_drawing_area();
        root.fill(&WHITE).map_err(plot_err)?;
        let panels = root.split_evenly((3, 1));

        for (area, (label, values, color)) in panels.iter().zip(series.iter()) {
            let mut chart = ChartBuilder::on(area)
                .caption(*label, ("sans-serif", 18))
                .margin(10)
                .x_label_area_size(30)
                .y_label_area_size(70)
                .build_cartesian_2d(0.0..n - 1.0, range(values))
                .map_err(plot_err)?;
            chart.configure_mesh().draw().map_err(plot_err)?;
            chart
                .draw_series(LineSeries::new(
                    values.iter().enumerate().map(|(i, v)| (i as f64, *v)),
                    color,
                ))
                .map_err(plot_err)?;
        }

        root.present().map_err(plot_err)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rv_config::CaseConfig;

    fn small_profile() -> SpreadingProfile {
        let mut config = CaseConfig::default();
        config.plate.cells_x = 6;
        rv_physics::solve(&config).unwrap().profile
    }

    #[test]
    fn test_csv_has_header_and_one_row_per_sample() {
        let profile = small_profile();
        let csv = profile_csv(&profile);
        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(lines[0], "index,x,a,beta,h0");
        assert_eq!(lines.len(), profile.len() + 1);
        assert!(lines[1].starts_with("0,"));
        let fields: Vec<f64> = lines[2].split(',').skip(1).map(|f| f.parse().unwrap()).collect();
        assert_eq!(fields.len(), 4);
        assert!((fields[1] - profile.samples()[1].half_width).abs() < 1e-11);
    }

    #[test]
    fn test_write_diagnostics_without_plot() {
        let dir = tempfile::tempdir().unwrap();
        let written = write_diagnostics(dir.path(), &small_profile(), false).unwrap();
        assert_eq!(written, vec![dir.path().join(PROFILE_CSV)]);
        assert!(written[0].exists());
    }
}
