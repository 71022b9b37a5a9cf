use std::any::{Any, TypeId};

use crate::error::MapError;

/// Introspection contract for a record shape.
///
/// A shape is a struct with a fixed set of named, typed fields. The
/// contract exposes exactly what the mapper needs: zero-argument
/// construction and a per-field descriptor table. Normally generated by
/// `#[derive(Shape)]`; a manual implementation is the escape hatch for
/// types whose construction can fail or whose fields need custom access.
pub trait Shape: Sized + 'static {
    /// Construct an empty value of this shape.
    ///
    /// The derive generates `Ok(Self::default())`. Manual implementations
    /// may return `MapError::Construction` — there is no other way for a
    /// conversion to observe a non-instantiable target.
    fn empty() -> Result<Self, MapError>;

    /// Descriptor table, one entry per declared field, in declaration order.
    ///
    /// Built fresh on every call and discarded after — no caching, no
    /// shared state between conversions.
    fn fields() -> Vec<FieldDescriptor<Self>>;
}

/// Reads a field's value out of an instance, erased behind `Box<dyn Any>`.
pub type ReadFn<S> = fn(&S) -> Result<Box<dyn Any>, MapError>;

/// Writes an erased value into a field of an instance.
pub type WriteFn<S> = fn(&mut S, Box<dyn Any>) -> Result<(), MapError>;

/// A single field of a shape: identity plus type-erased accessors.
///
/// Declared type identity is the field type's `TypeId` — exact nominal
/// identity including every generic parameter. `i32` never matches `i64`,
/// `HashMap<String, i64>` never matches `HashMap<String, String>`.
/// `type_name` is the type as written, for diagnostics only.
///
/// The accessors are generated inside the defining crate, so they reach
/// private fields — the whole mechanism depends on crossing ordinary
/// visibility boundaries.
pub struct FieldDescriptor<S> {
    name: &'static str,
    type_name: &'static str,
    type_id: TypeId,
    read: ReadFn<S>,
    write: WriteFn<S>,
}

impl<S> FieldDescriptor<S> {
    pub fn new(
        name: &'static str,
        type_name: &'static str,
        type_id: TypeId,
        read: ReadFn<S>,
        write: WriteFn<S>,
    ) -> Self {
        Self {
            name,
            type_name,
            type_id,
            read,
            write,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Whether this field corresponds to `other` on the opposite shape:
    /// identical name AND identical declared `TypeId`. Merely assignable
    /// or coercible types do not correspond.
    pub fn matches<T>(&self, other: &FieldDescriptor<T>) -> bool {
        self.name == other.name && self.type_id == other.type_id
    }

    /// Read this field's value from `instance`, cloned behind `dyn Any`.
    pub fn read(&self, instance: &S) -> Result<Box<dyn Any>, MapError> {
        (self.read)(instance)
    }

    /// Write an erased value into this field of `instance`.
    pub fn write(&self, instance: &mut S, payload: Box<dyn Any>) -> Result<(), MapError> {
        (self.write)(instance, payload)
    }
}

impl<S> std::fmt::Debug for FieldDescriptor<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .field("type_name", &self.type_name)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::any::TypeId;

    use super::FieldDescriptor;
    use crate::error::MapError;

    struct A {
        x: i64,
    }

    struct B {
        x: i64,
    }

    fn a_x() -> FieldDescriptor<A> {
        FieldDescriptor::new(
            "x",
            "i64",
            TypeId::of::<i64>(),
            |a| Ok(Box::new(a.x)),
            |a, v| {
                a.x = *v.downcast::<i64>().map_err(|_| MapError::access("x"))?;
                Ok(())
            },
        )
    }

    #[test]
    fn matches_requires_name_and_type_id() {
        let b_x: FieldDescriptor<B> = FieldDescriptor::new(
            "x",
            "i64",
            TypeId::of::<i64>(),
            |b| Ok(Box::new(b.x)),
            |b, v| {
                b.x = *v.downcast::<i64>().map_err(|_| MapError::access("x"))?;
                Ok(())
            },
        );
        let b_renamed: FieldDescriptor<B> = FieldDescriptor::new(
            "y",
            "i64",
            TypeId::of::<i64>(),
            |b| Ok(Box::new(b.x)),
            |_, _| Ok(()),
        );
        let b_retyped: FieldDescriptor<B> = FieldDescriptor::new(
            "x",
            "i32",
            TypeId::of::<i32>(),
            |b| Ok(Box::new(b.x as i32)),
            |_, _| Ok(()),
        );

        assert!(a_x().matches(&b_x));
        assert!(!a_x().matches(&b_renamed));
        assert!(!a_x().matches(&b_retyped));
    }

    #[test]
    fn read_then_write_transfers_the_value() {
        let a = A { x: 42 };
        let mut b = B { x: 0 };
        let b_x: FieldDescriptor<B> = FieldDescriptor::new(
            "x",
            "i64",
            TypeId::of::<i64>(),
            |b| Ok(Box::new(b.x)),
            |b, v| {
                b.x = *v.downcast::<i64>().map_err(|_| MapError::access("x"))?;
                Ok(())
            },
        );

        let value = a_x().read(&a).unwrap();
        b_x.write(&mut b, value).unwrap();
        assert_eq!(b.x, 42);
    }

    #[test]
    fn write_refuses_a_mistyped_payload() {
        let mut b = B { x: 7 };
        let b_x: FieldDescriptor<B> = FieldDescriptor::new(
            "x",
            "i64",
            TypeId::of::<i64>(),
            |b| Ok(Box::new(b.x)),
            |b, v| {
                b.x = *v
                    .downcast::<i64>()
                    .map_err(|_| MapError::access("payload for field 'x' is not a i64"))?;
                Ok(())
            },
        );

        let err = b_x.write(&mut b, Box::new("not an i64")).unwrap_err();
        assert!(matches!(err, MapError::Access(_)));
        assert_eq!(b.x, 7);
    }
}
