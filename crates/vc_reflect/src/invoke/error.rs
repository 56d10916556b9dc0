use alloc::string::String;
use thiserror::Error;

use crate::info::Category;
use crate::invoke::ReceiverKind;

// -----------------------------------------------------------------------------
// Error

/// The error returned by runtime invocation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InvokeError {
    #[error("No member named `{0}` was found")]
    NotFound(String),

    #[error("No overload accepts arguments ({0})")]
    NoMatchingOverload(String),

    #[error("{0} overloads match equally well")]
    Ambiguous(usize),

    #[error("The member is a template and needs type arguments")]
    MissingTypeArgs,

    #[error("No instantiation matches the given type arguments")]
    UnknownInstantiation,

    #[error("Receiver mismatch: expected {expect:?}, found {actual:?}")]
    ReceiverMismatch {
        expect: ReceiverKind,
        actual: ReceiverKind,
    },

    #[error("Receiver type mismatch: expected `{0}`")]
    ReceiverType(&'static str),

    #[error("Argument {index} type mismatch: expected `{expect}`")]
    ArgumentType { index: usize, expect: &'static str },

    #[error("Expected {expect} arguments, found {actual}")]
    ArgumentCount { expect: usize, actual: usize },

    #[error("Variable `{0}` is read-only")]
    ReadOnly(String),

    #[error("Type `{0}` has no constructor")]
    NoConstructor(&'static str),

    #[error("Type `{base}` is not an embedded base of `{derived}`")]
    NotABase {
        base: &'static str,
        derived: &'static str,
    },

    #[error("Member kind mismatch: expected {expect:?}, found {actual:?}")]
    KindMismatch { expect: Category, actual: Category },
}
