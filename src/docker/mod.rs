// Docker integration: batched `inspect` calls against the container engine.

pub mod inspect;

pub use inspect::{CommandInspector, Inspect, into_list};
