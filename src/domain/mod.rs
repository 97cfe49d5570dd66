// Domain layer: job models and ports (interfaces). Nothing here touches the network or disk.

pub mod model;
pub mod ports;
