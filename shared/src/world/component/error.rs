use thiserror::Error;

use super::schema::FieldKind;

/// Errors that can occur while registering components or building behaviours
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComponentError {
    /// Component kind not registered in the protocol
    #[error("Component not registered with Protocol. Must call `add_component()` during protocol initialization. Component: {component_name}")]
    ComponentNotRegistered { component_name: &'static str },

    /// Component kind registered twice
    #[error("Component {component_name} was already registered with the Protocol")]
    AlreadyRegistered { component_name: &'static str },

    /// Schema declares more fields than a dirty mask can address
    #[error("Component {component_name} declares {field_count} fields, the maximum is {max}")]
    TooManyFields {
        component_name: &'static str,
        field_count: usize,
        max: u8,
    },

    /// Two fields in one schema share a name
    #[error("Component {component_name} declares field `{field_name}` more than once")]
    DuplicateFieldName {
        component_name: &'static str,
        field_name: &'static str,
    },

    /// The component's field list disagrees with its declared schema in length
    #[error("Component {component_name} declares {declared} fields but exposes {actual}")]
    FieldCountMismatch {
        component_name: &'static str,
        declared: usize,
        actual: usize,
    },

    /// The component's field list disagrees with its declared schema in kind
    #[error("Component {component_name} field `{field_name}` is declared as {declared:?} but is {actual:?}")]
    FieldKindMismatch {
        component_name: &'static str,
        field_name: &'static str,
        declared: FieldKind,
        actual: FieldKind,
    },
}
