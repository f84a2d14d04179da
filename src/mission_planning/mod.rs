// Mission planning module

pub mod pickup_sequencer;

pub use pickup_sequencer::*;
