use alloc::string::ToString;
use core::any::Any;

use crate::info::{Reflected, TypeInfo};
use crate::invoke::{InvokeError, Output, Receiver};

// -----------------------------------------------------------------------------
// ObjectBuilder

/// Sets the variables of a reflected value by name.
///
/// # Examples
///
/// ```
/// use vc_reflect::derive::Reflected;
/// use vc_reflect::invoke::ObjectBuilder;
///
/// #[derive(Reflected, Default, Debug, PartialEq)]
/// struct Config {
///     name: String,
///     retries: u8,
/// }
///
/// let config = ObjectBuilder::<Config>::default()
///     .set("name", String::from("fetch"))?
///     .set("retries", 3_u8)?
///     .build();
///
/// assert_eq!(config, Config { name: "fetch".into(), retries: 3 });
/// assert!(ObjectBuilder::new(config).set("retries", 3_i32).is_err());
/// # Ok::<(), vc_reflect::invoke::InvokeError>(())
/// ```
pub struct ObjectBuilder<T: Reflected> {
    value: T,
}

impl<T: Reflected> ObjectBuilder<T> {
    /// Starts from an existing value.
    #[inline]
    pub const fn new(value: T) -> Self {
        Self { value }
    }

    /// Assigns `value` to the variable `name`, which may be inherited from an
    /// embedded base.
    pub fn set<V: Any>(mut self, name: &str, value: V) -> Result<Self, InvokeError> {
        let info: &'static TypeInfo = T::type_info();
        let member = info
            .find_member(name)
            .ok_or_else(|| InvokeError::NotFound(name.to_string()))?;
        let expect = member
            .as_variable()?
            .value_type()
            .map_or("_", |ty| ty.type_name());

        let out = info.invoke(name, Receiver::Mut(&mut self.value), None, crate::args![])?;
        let Output::Mut(slot) = out else {
            return Err(InvokeError::ReadOnly(name.to_string()));
        };
        let slot = slot
            .downcast_mut::<V>()
            .ok_or(InvokeError::ArgumentType { index: 0, expect })?;
        *slot = value;
        Ok(self)
    }

    /// Borrows the value built so far.
    #[inline]
    pub const fn get(&self) -> &T {
        &self.value
    }

    /// Finishes building.
    #[inline]
    pub fn build(self) -> T {
        self.value
    }
}

impl<T: Reflected + Default> Default for ObjectBuilder<T> {
    #[inline]
    fn default() -> Self {
        Self::new(T::default())
    }
}
