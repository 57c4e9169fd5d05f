// crates/rv_io/src/set_fields/writer.rs

//! 区域条目渲染
//!
//! 每个几何基元渲染为一个 `regions` 条目：
//!
//! ```text
//! cylinderToCell
//! {
//!     p1 (0.00000e+00 0.00000e+00 -1.20000e-03);
//!     p2 (4.00000e-04 0.00000e+00 -1.20000e-03);
//!     radius 3.10000e-03;
//!     fieldValues
//!     (
//!         volScalarFieldValue alpha.liquid 1.00000e+00
//!     );
//! }
//! ```

use std::fmt::Write;

use rv_physics::{FieldValue, GeometricPrimitive, Vec3};

/// 以 C `%.5e` 的形式格式化数值
pub fn format_scalar(value: f64) -> String {
    let formatted = format!("{:.5e}", value);
    match formatted.split_once('e') {
        Some((mantissa, exponent)) => match exponent.parse::<i32>() {
            Ok(exp) => {
                let sign = if exp < 0 { '-' } else { '+' };
                format!("{}e{}{:02}", mantissa, sign, exp.abs())
            }
            Err(_) => formatted,
        },
        // inf / NaN
        None => formatted,
    }
}

fn format_vector(v: &Vec3) -> String {
    format!(
        "({} {} {})",
        format_scalar(v[0]),
        format_scalar(v[1]),
        format_scalar(v[2])
    )
}

fn write_field_values(out: &mut String, values: &[FieldValue]) {
    out.push_str("    fieldValues\n    (\n");
    for value in values {
        let _ = match value {
            FieldValue::Scalar { field, value } => {
                writeln!(out, "        volScalarFieldValue {} {}", field, format_scalar(*value))
            }
            FieldValue::Vector { field, value } => {
                writeln!(out, "        volVectorFieldValue {} {}", field, format_vector(value))
            }
        };
    }
    out.push_str("    );\n");
}

/// 渲染单个基元
pub fn render_entry(primitive: &GeometricPrimitive) -> String {
    let mut out = String::with_capacity(256);
    // 写入 String 不会失败
    let _ = match primitive {
        GeometricPrimitive::Cylinder { p1, p2, radius, .. } => writeln!(
            out,
            "cylinderToCell\n{{\n    p1 {};\n    p2 {};\n    radius {};",
            format_vector(p1),
            format_vector(p2),
            format_scalar(*radius)
        ),
        GeometricPrimitive::Box { min, max, .. } => writeln!(
            out,
            "boxToCell\n{{\n    box {} {};",
            format_vector(min),
            format_vector(max)
        ),
        GeometricPrimitive::RotatedBox { origin, i, j, k, .. } => writeln!(
            out,
            "rotatedBoxToCell\n{{\n    origin {};\n    i {};\n    j {};\n    k {};",
            format_vector(origin),
            format_vector(i),
            format_vector(j),
            format_vector(k)
        ),
    };
    write_field_values(&mut out, primitive.values());
    out.push('}');
    out
}

/// 渲染基元列表
pub fn render_entries(primitives: &[GeometricPrimitive]) -> Vec<String> {
    primitives.iter().map(render_entry).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rv_config::FieldNames;
    use rv_physics::PrimitiveBuilder;

    #[test]
    fn test_format_scalar_matches_c_style() {
        assert_eq!(format_scalar(1.0), "1.00000e+00");
        assert_eq!(format_scalar(-1.5e-3), "-1.50000e-03");
        assert_eq!(format_scalar(0.0), "0.00000e+00");
        assert_eq!(format_scalar(12345.678), "1.23457e+04");
        assert_eq!(format_scalar(2.0e-120), "2.00000e-120");
    }

    #[test]
    fn test_render_cylinder() {
        let mut builder = PrimitiveBuilder::new(FieldNames::default());
        builder.liquid_cylinder([0.0, 0.0, -1.2e-3], [4e-4, 0.0, -1.2e-3], 3.1e-3);
        let text = render_entry(&builder.build()[0]);
        let expected = "cylinderToCell
{
    p1 (0.00000e+00 0.00000e+00 -1.20000e-03);
    p2 (4.00000e-04 0.00000e+00 -1.20000e-03);
    radius 3.10000e-03;
    fieldValues
    (
        volScalarFieldValue alpha.liquid 1.00000e+00
    );
}";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_render_box_with_vector_and_scalar() {
        let mut builder = PrimitiveBuilder::new(FieldNames::default());
        builder.flow_box([0.0, -1.0, 0.0], [1.0, 1.0, 0.5], [0.25, 0.0, 0.0], 3.0);
        let text = render_entry(&builder.build()[0]);
        assert!(text.starts_with(
            "boxToCell\n{\n    box (0.00000e+00 -1.00000e+00 0.00000e+00) (1.00000e+00"
        ));
        assert!(text.contains("volVectorFieldValue U (2.50000e-01 0.00000e+00 0.00000e+00)"));
        assert!(text.contains("volScalarFieldValue p_rgh 3.00000e+00"));
        assert!(text.ends_with("    );\n}"));
    }

    #[test]
    fn test_render_rotated_box() {
        let mut builder = PrimitiveBuilder::new(FieldNames::default());
        builder.liquid_rotated_box(
            [-1.0, -10.0, 0.0],
            [-5.0, 0.0, -10.0],
            [0.0, 20.0, 0.0],
            [10.0, 0.0, -5.0],
        );
        let entries = render_entries(&builder.build());
        assert_eq!(entries.len(), 1);
        assert!(entries[0].starts_with("rotatedBoxToCell"));
        assert!(entries[0].contains("    j (0.00000e+00 2.00000e+01 0.00000e+00);"));
    }
}
