// Domain layer: models and ports. Concrete providers live under adapters.

pub mod model;
pub mod ports;
