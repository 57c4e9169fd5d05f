// crates/rv_physics/src/numerics/mod.rs

//! 数值方法

pub mod ode;

pub use ode::{
    create_integrator, numerical_jacobian, DormandPrince45, OdeIntegrator, OdeOptions,
    OdeSolution, OdeStats, Rosenbrock21, ScalarOde,
};
