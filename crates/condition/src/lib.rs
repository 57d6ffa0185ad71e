//! Alert condition documents and their mapping onto the alerting API.
//!
//! A condition is configured as a [`ConditionConfig`], checked by
//! [`validate`], turned into the wire [`AlertCondition`] by [`build`] and
//! turned back by [`read`] / [`read_into`].

pub mod catalog;
mod error;
mod loader;
mod mapper;
pub mod model;
mod schema;
mod validate;

pub use error::{ConditionError, ShapeError, ValidationError};
pub use loader::{load_from_file, load_from_str, LoadError};
pub use mapper::{build, read, read_into};
pub use model::{AlertCondition, AlertConditionNrql, AlertConditionTerm, AlertConditionUserDefined};
pub use schema::{
    ConditionConfig, ConditionType, NrqlConfig, Operator, Priority, TermConfig, TimeFunction,
    UserDefinedValueFunction, ValueFunction,
};
pub use validate::{check_shape, validate, validate_duration, Shape};
