// crates/rv_physics/src/primitives.rs

//! 几何区域基元
//!
//! 求解器输出的区域初始化描述：圆柱（液体截面）、轴对齐盒（速度与压力）、
//! 旋转盒（入口填充）。每个基元带有若干场值，由下游写出为
//! `setFieldsDict` 的 `regions` 条目。
//!
//! [`PrimitiveBuilder`] 累积基元并一次性返回不可变列表。

use rv_config::FieldNames;
use serde::Serialize;

/// 三维点或向量 [m]
pub type Vec3 = [f64; 3];

/// 场值
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldValue {
    /// 标量场
    Scalar {
        /// 场名称
        field: String,
        /// 值
        value: f64,
    },
    /// 向量场
    Vector {
        /// 场名称
        field: String,
        /// 值
        value: Vec3,
    },
}

impl FieldValue {
    /// 场名称
    pub fn field(&self) -> &str {
        match self {
            Self::Scalar { field, .. } | Self::Vector { field, .. } => field,
        }
    }
}

/// 几何基元
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum GeometricPrimitive {
    /// 圆柱，轴线两端点与半径
    Cylinder {
        /// 轴线起点
        p1: Vec3,
        /// 轴线终点
        p2: Vec3,
        /// 半径
        radius: f64,
        /// 场值
        values: Vec<FieldValue>,
    },
    /// 轴对齐盒
    Box {
        /// 最小角点
        min: Vec3,
        /// 最大角点
        max: Vec3,
        /// 场值
        values: Vec<FieldValue>,
    },
    /// 旋转盒，原点与三条棱向量
    RotatedBox {
        /// 原点
        origin: Vec3,
        /// 第一条棱
        i: Vec3,
        /// 第二条棱
        j: Vec3,
        /// 第三条棱
        k: Vec3,
        /// 场值
        values: Vec<FieldValue>,
    },
}

impl GeometricPrimitive {
    /// 场值
    pub fn values(&self) -> &[FieldValue] {
        match self {
            Self::Cylinder { values, .. }
            | Self::Box { values, .. }
            | Self::RotatedBox { values, .. } => values,
        }
    }
}

/// 各类基元数量
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PrimitiveCounts {
    /// 圆柱
    pub cylinders: usize,
    /// 轴对齐盒
    pub boxes: usize,
    /// 旋转盒
    pub rotated_boxes: usize,
}

impl PrimitiveCounts {
    /// 统计基元列表
    pub fn of(primitives: &[GeometricPrimitive]) -> Self {
        primitives.iter().fold(Self::default(), |mut acc, p| {
            match p {
                GeometricPrimitive::Cylinder { .. } => acc.cylinders += 1,
                GeometricPrimitive::Box { .. } => acc.boxes += 1,
                GeometricPrimitive::RotatedBox { .. } => acc.rotated_boxes += 1,
            }
            acc
        })
    }

    /// 总数
    pub fn total(&self) -> usize {
        self.cylinders + self.boxes + self.rotated_boxes
    }
}

/// 基元构建器
#[derive(Debug, Clone)]
pub struct PrimitiveBuilder {
    fields: FieldNames,
    primitives: Vec<GeometricPrimitive>,
}

impl PrimitiveBuilder {
    /// 使用给定场名称创建构建器
    pub fn new(fields: FieldNames) -> Self {
        Self {
            fields,
            primitives: Vec::new(),
        }
    }

    /// 预留容量
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.primitives.reserve(capacity);
        self
    }

    fn liquid(&self) -> FieldValue {
        FieldValue::Scalar {
            field: self.fields.liquid.clone(),
            value: 1.0,
        }
    }

    /// 添加充满液体的圆柱
    pub fn liquid_cylinder(&mut self, p1: Vec3, p2: Vec3, radius: f64) -> &mut Self {
        let values = vec![self.liquid()];
        self.primitives.push(GeometricPrimitive::Cylinder {
            p1,
            p2,
            radius,
            values,
        });
        self
    }

    /// 添加携带速度与压力的盒
    pub fn flow_box(&mut self, min: Vec3, max: Vec3, velocity: Vec3, pressure: f64) -> &mut Self {
        let values = vec![
            FieldValue::Vector {
                field: self.fields.velocity.clone(),
                value: velocity,
            },
            FieldValue::Scalar {
                field: self.fields.pressure.clone(),
                value: pressure,
            },
        ];
        self.primitives.push(GeometricPrimitive::Box { min, max, values });
        self
    }

    /// 添加充满液体的旋转盒
    pub fn liquid_rotated_box(&mut self, origin: Vec3, i: Vec3, j: Vec3, k: Vec3) -> &mut Self {
        let values = vec![self.liquid()];
        self.primitives.push(GeometricPrimitive::RotatedBox {
            origin,
            i,
            j,
            k,
            values,
        });
        self
    }

    /// 当前基元数量
    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    /// 完成构建
    pub fn build(self) -> Vec<GeometricPrimitive> {
        self.primitives
    }
}
