// Domain layer: form models, catalogs and ports. Nothing here performs I/O.

pub mod model;
pub mod ports;
