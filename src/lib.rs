pub mod cli;
pub mod ctx;
pub mod error;
pub mod io;
pub mod math;
pub mod model;
pub mod pipeline;
pub mod schema;
pub mod scores;
pub mod synth;
pub mod vitals;
