// Domain layer: coupon model, window arithmetic, policies and ports (interfaces).
// Nothing here touches IO; adapters live under src/adapters.

pub mod model;
pub mod policy;
pub mod ports;
pub mod window;
