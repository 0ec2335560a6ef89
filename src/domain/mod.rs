// Domain layer: models and ports. No process or protocol details here.

pub mod model;
pub mod ports;
