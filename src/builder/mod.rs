//! Fluent builders for variables and constraints, registered through
//! [`Model::add`].

use crate::{Error, Model};

mod cons;
mod var;

pub use cons::{cons, ConsBuilder};
pub use var::{var, VarBuilder};

/// Something that can be registered in a model via [`Model::add`].
pub trait CanBeAddedToModel {
    /// The handle returned after registration (e.g. [`Variable`](crate::Variable)).
    type Return;

    /// Registers the built item in the model.
    fn add(self, model: &mut Model) -> Result<Self::Return, Error>;
}
