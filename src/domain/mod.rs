// Domain layer: records, the persisted document and the ports the core talks to.

pub mod document;
pub mod model;
pub mod ports;
