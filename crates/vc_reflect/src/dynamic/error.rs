use core::fmt;

use thiserror::Error;

use crate::dynamic::{Capability, Dyn, Prototype};

/// A failed [`Dyn`] conversion: the target prototype has a slot the source lacks.
///
/// The unconverted value is handed back.
#[derive(Error)]
#[error("cannot convert `{type_name}` to `{target}`: no slot `{slot}` of type `{signature}`")]
pub struct ConvertError<P: ?Sized + Prototype, C: Capability> {
    value: Dyn<P, C>,
    type_name: &'static str,
    target: &'static str,
    slot: &'static str,
    signature: &'static str,
}

impl<P: ?Sized + Prototype, C: Capability> ConvertError<P, C> {
    pub(crate) fn new(
        value: Dyn<P, C>,
        target: &'static str,
        slot: &'static str,
        signature: &'static str,
    ) -> Self {
        Self {
            type_name: value.type_name().unwrap_or("<empty>"),
            value,
            target,
            slot,
            signature,
        }
    }

    /// The path of the prototype that could not be reached.
    #[inline(always)]
    pub const fn target(&self) -> &'static str {
        self.target
    }

    /// The missing slot.
    #[inline(always)]
    pub const fn slot(&self) -> &'static str {
        self.slot
    }

    /// Returns the unconverted value.
    #[inline]
    pub fn into_value(self) -> Dyn<P, C> {
        self.value
    }
}

impl<P: ?Sized + Prototype, C: Capability> fmt::Debug for ConvertError<P, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConvertError")
            .field("value", &self.value)
            .field("target", &self.target)
            .field("slot", &self.slot)
            .field("signature", &self.signature)
            .finish()
    }
}
