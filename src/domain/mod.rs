// Domain layer: models, rule tables and ports. No I/O here.

pub mod model;
pub mod ports;
pub mod rules;
