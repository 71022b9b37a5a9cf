use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Fields, Type};

/// Derive macro for the `Shape` introspection contract.
///
/// Generates an implementation of `fieldmap::shape::Shape`:
///
/// - `empty()` — `Self::default()`; the struct must implement `Default`.
/// - `fields()` — one `FieldDescriptor` per named field, in declaration
///   order, with accessors that move values through `Box<dyn Any>`.
///
/// Every field type must be `Clone + 'static`. The expansion lives inside
/// the defining crate, so the generated accessors reach private fields.
///
/// # Example
///
/// ```ignore
/// #[derive(Shape, Default)]
/// struct User {
///     id: i64,
///     name: String,
/// }
/// ```
///
/// Only structs with named fields are supported; generic structs are
/// rejected (field `TypeId`s require fully concrete types).
#[proc_macro_derive(Shape)]
pub fn derive_shape(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match derive_impl(&input) {
        Ok(tokens) => tokens,
        Err(e) => e.to_compile_error().into(),
    }
}

fn derive_impl(input: &DeriveInput) -> Result<TokenStream, syn::Error> {
    let name = &input.ident;

    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "Shape does not support generic parameters",
        ));
    }

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    name,
                    "Shape only supports structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                name,
                "Shape only supports structs",
            ));
        }
    };

    let mut descriptor_tokens = Vec::new();

    for field in fields {
        let field_name = field
            .ident
            .as_ref()
            .ok_or_else(|| syn::Error::new_spanned(field, "expected named field"))?;
        let field_name_str = field_name.to_string();
        let field_ty = &field.ty;
        let type_name_str = type_display_name(field_ty);

        descriptor_tokens.push(quote! {
            fieldmap::shape::FieldDescriptor::new(
                #field_name_str,
                #type_name_str,
                std::any::TypeId::of::<#field_ty>(),
                |__instance: &Self| -> Result<Box<dyn std::any::Any>, fieldmap::error::MapError> {
                    let __value: Box<dyn std::any::Any> = Box::new(__instance.#field_name.clone());
                    Ok(__value)
                },
                |__instance: &mut Self, __payload: Box<dyn std::any::Any>| -> Result<(), fieldmap::error::MapError> {
                    match __payload.downcast::<#field_ty>() {
                        Ok(v) => {
                            __instance.#field_name = *v;
                            Ok(())
                        }
                        Err(_) => Err(fieldmap::error::MapError::access(format!(
                            "payload for field '{}' is not a {}",
                            #field_name_str, #type_name_str,
                        ))),
                    }
                },
            )
        });
    }

    let expanded = quote! {
        impl fieldmap::shape::Shape for #name {
            fn empty() -> Result<Self, fieldmap::error::MapError> {
                Ok(<Self as Default>::default())
            }

            fn fields() -> Vec<fieldmap::shape::FieldDescriptor<Self>> {
                vec![
                    #(#descriptor_tokens),*
                ]
            }
        }
    };

    Ok(TokenStream::from(expanded))
}

/// Render a field type as written, for diagnostics
/// (`Option<i32>`, `HashMap<String,i64>`).
fn type_display_name(ty: &Type) -> String {
    quote!(#ty).to_string().replace(' ', "")
}
