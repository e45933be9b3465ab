//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements   | Connects to               |
//! |------------|--------------|---------------------------|
//! | `log_sink` | EventSink    | `log` facade (report)     |
//! | `sim_room` | SensorPort   | in-memory room model      |
//! |            | ActuatorPort |                           |

pub mod log_sink;
pub mod sim_room;
