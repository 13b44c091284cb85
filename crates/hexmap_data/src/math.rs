pub mod consts {
    pub use core::f32::consts::*;

    /// `sqrt(3)`, the ratio between a hexagon's width and its circumradius.
    pub const SQRT_3: f32 = 1.732_050_8;
}

pub type Float = f32;
pub type Int = i32;
pub type UInt = u32;

pub type Vec2 = vek::Vec2<Float>;
pub type IVec2 = vek::Vec2<Int>;

pub type Matrix2 = vek::Mat2<Float>;
