use std::any::type_name;
use std::marker::PhantomData;

use tracing::{debug, trace};

use crate::error::MapError;
use crate::shape::Shape;

/// Convert a source value into a freshly constructed target shape.
///
/// The target is always newly allocated — never the source instance. Each
/// source field is copied into **every** target field with an identical
/// name and declared `TypeId`; fields present on only one side are skipped
/// silently. Copying is `Clone` plus assignment: shared handles (`Arc`,
/// `Rc`) stay shared, owned values are duplicated, nothing is converted
/// recursively.
///
/// A `None` source yields the empty target unchanged — copy nothing from
/// nothing. Construction of the empty target can still fail, so `None` is
/// not a guaranteed `Ok`.
///
/// # Errors
///
/// - [`MapError::Construction`] — `T::empty()` failed.
/// - [`MapError::Access`] — a matched field refused to be read or written.
pub fn convert<S: Shape, T: Shape>(source: Option<&S>) -> Result<T, MapError> {
    let mut target =
        T::empty().map_err(|e| e.with_context(format!("creating {}", type_name::<T>())))?;

    let Some(source) = source else {
        debug!(
            target_shape = type_name::<T>(),
            "source absent, returning empty target"
        );
        return Ok(target);
    };

    let source_fields = S::fields();
    let target_fields = T::fields();
    let mut copied = 0usize;

    for source_field in &source_fields {
        // Re-read per match: a duplicate-named target consumes one payload each.
        for target_field in target_fields.iter().filter(|t| source_field.matches(t)) {
            let value = source_field.read(source).map_err(|e| {
                e.with_context(format!(
                    "reading {}.{}",
                    type_name::<S>(),
                    source_field.name()
                ))
            })?;
            target_field.write(&mut target, value).map_err(|e| {
                e.with_context(format!(
                    "writing {}.{}",
                    type_name::<T>(),
                    target_field.name()
                ))
            })?;
            trace!(
                field = source_field.name(),
                field_type = source_field.type_name(),
                "field copied"
            );
            copied += 1;
        }
    }

    debug!(
        source_shape = type_name::<S>(),
        target_shape = type_name::<T>(),
        copied,
        "conversion complete"
    );
    Ok(target)
}

/// Stateless conversion handle for a fixed shape pair.
///
/// Carries no data, so constructing one per call and reusing a single
/// instance across calls (and threads) are interchangeable. The reverse
/// direction is the same primitive with the roles swapped — a named
/// counterpart so callers never have to remember an argument order.
pub struct Mapper<A, B> {
    _shapes: PhantomData<fn() -> (A, B)>,
}

impl<A: Shape, B: Shape> Mapper<A, B> {
    pub fn new() -> Self {
        Self {
            _shapes: PhantomData,
        }
    }

    /// A → B.
    pub fn convert(&self, source: Option<&A>) -> Result<B, MapError> {
        convert(source)
    }

    /// B → A.
    pub fn convert_reverse(&self, source: Option<&B>) -> Result<A, MapError> {
        convert(source)
    }
}

impl<A: Shape, B: Shape> Default for Mapper<A, B> {
    fn default() -> Self {
        Self::new()
    }
}
