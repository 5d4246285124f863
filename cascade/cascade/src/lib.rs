pub mod cache;
pub mod config;
pub mod control;
pub mod error;
pub mod form;
pub mod markup;
pub mod populator;
pub mod record;
pub mod source;

pub use cache::OptionsCache;
pub use config::{CascadeConfig, ConfigError, EndpointConfig};
pub use control::{Dom, MemoryDom, PLACEHOLDER_LABEL, SelectElement, SelectOption};
pub use error::PopulateError;
pub use form::ChainedForm;
pub use populator::{Applied, Component, Outcome, Populator, Target, Ticket};
pub use record::{OptionRecord, OptionsResponse, ParentId};
pub use source::{Endpoint, HttpOptionSource, OptionSource};
