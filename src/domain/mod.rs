// Domain layer: journal data models and the ports exercises are written against.

pub mod model;
pub mod ports;
