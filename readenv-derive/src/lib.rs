//! Derive macro implementation for readenv

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Fields, Type};

mod attrs;

use attrs::{FieldAttrs, StructAttrs};

/// Extract inner type from Option<T>
fn option_inner_type(ty: &Type) -> Option<&Type> {
    let Type::Path(type_path) = ty else {
        return None;
    };
    let seg = type_path.path.segments.last()?;
    if seg.ident != "Option" {
        return None;
    }
    match &seg.arguments {
        syn::PathArguments::AngleBracketed(args) => match args.args.first() {
            Some(syn::GenericArgument::Type(inner)) => Some(inner),
            _ => None,
        },
        _ => None,
    }
}

/// `ReadEnv` derive macro
///
/// Implements `readenv::ReadEnv` and adds `read()` / `read_with()`
/// associated functions to the struct.
///
/// # Supported Attributes
///
/// **Struct-level**:
/// - `#[readenv(prefix = "PREFIX_")]`: Add prefix to derived env var names
///
/// **Field-level**:
/// - `#[readenv(env_name = "NAME")]`: Custom environment variable name
/// - `#[readenv(dotenv_name = "NAME")]`: Custom dotenv key
/// - `#[readenv(file_name = "name")]`: Custom file name in the secrets directory
/// - `#[readenv(file_location = "/dir")]`: Custom secrets directory
/// - `#[readenv(file_path = "/dir/name")]`: Exact file to read
/// - `#[readenv(default)]`: Use `Default::default()` if no source has a value
/// - `#[readenv(default = value)]`: Use explicit default value
/// - `#[readenv(converter = "func")]`: Convert with `func(&str) -> Result<T, E>`
/// - `#[readenv(no_env)]` / `#[readenv(no_file)]`: Skip a source kind
///
/// # Example
///
/// See the `readenv` crate documentation for usage examples.
#[proc_macro_derive(ReadEnv, attributes(readenv))]
pub fn derive_readenv(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let struct_name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let struct_attrs = StructAttrs::from_attrs(&input.attrs)?;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    input,
                    "ReadEnv only supports structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                input,
                "ReadEnv only supports structs",
            ));
        }
    };

    let mut descriptors = Vec::with_capacity(fields.len());
    let mut initializers = Vec::with_capacity(fields.len());

    for field in fields {
        let Some(field_name) = field.ident.as_ref() else {
            continue;
        };
        let attrs = FieldAttrs::from_field(field)?;
        let descriptor = field_descriptor(&field_name.to_string(), &attrs, &struct_attrs.prefix);
        let resolve = resolve_expr(&field.ty, &attrs);

        initializers.push(quote! {
            #field_name: {
                let __field = #descriptor;
                #resolve
            }
        });
        descriptors.push(descriptor);
    }

    Ok(quote! {
        impl #impl_generics ::readenv::ReadEnv for #struct_name #ty_generics #where_clause {
            fn fields() -> ::std::vec::Vec<::readenv::Field> {
                ::std::vec![#(#descriptors),*]
            }

            fn from_context(__ctx: &::readenv::Context) -> ::readenv::Result<Self> {
                ::std::result::Result::Ok(Self {
                    #(#initializers),*
                })
            }
        }

        impl #impl_generics #struct_name #ty_generics #where_clause {
            /// Read the configuration from `/run/secrets` and the environment
            ///
            /// # Errors
            ///
            /// - A required field has no value in any source
            /// - A value cannot be converted into its field type
            pub fn read() -> ::readenv::Result<Self> {
                ::readenv::read::<Self>()
            }

            /// Read the configuration with explicit options
            ///
            /// # Errors
            ///
            /// - The dotenv file exists but cannot be read or parsed
            /// - A required field has no value in any source
            /// - A value cannot be converted into its field type
            pub fn read_with(options: &::readenv::ReadOptions) -> ::readenv::Result<Self> {
                ::readenv::read_with::<Self>(options)
            }
        }
    })
}

/// Build the `readenv::Field` expression for one struct field.
fn field_descriptor(name: &str, attrs: &FieldAttrs, prefix: &str) -> TokenStream2 {
    let mut builder = quote! { ::readenv::Field::new(#name) };

    // Explicit names are taken verbatim, the prefix only applies to derived ones
    let env_name = match &attrs.env_name {
        Some(env_name) => Some(env_name.clone()),
        None if !prefix.is_empty() => Some(format!("{}{}", prefix, name.to_uppercase())),
        None => None,
    };
    if let Some(env_name) = env_name {
        builder = quote! { #builder.env_name(#env_name) };
    }
    if let Some(dotenv_name) = &attrs.dotenv_name {
        builder = quote! { #builder.dotenv_name(#dotenv_name) };
    }
    if let Some(file_name) = &attrs.file_name {
        builder = quote! { #builder.file_name(#file_name) };
    }
    if let Some(file_location) = &attrs.file_location {
        builder = quote! { #builder.file_location(#file_location) };
    }
    if let Some(file_path) = &attrs.file_path {
        builder = quote! { #builder.file_path(#file_path) };
    }
    if attrs.no_env {
        builder = quote! { #builder.use_env(false) };
    }
    if attrs.no_file {
        builder = quote! { #builder.use_file(false) };
    }

    builder
}

/// Build the expression resolving one field against `__ctx`.
fn resolve_expr(ty: &Type, attrs: &FieldAttrs) -> TokenStream2 {
    let default = attrs.default.as_ref().map(|value| match value {
        Some(expr) => quote! { #expr },
        None => quote! { ::std::default::Default::default() },
    });

    if let Some(inner) = option_inner_type(ty) {
        // Option<T>: absent means None unless a default is given
        let resolved = match &attrs.converter {
            Some(func) => quote! { __ctx.optional_with::<#inner, _, _>(&__field, #func)? },
            None => quote! { __ctx.optional::<#inner>(&__field)? },
        };
        return match default {
            Some(default) => quote! {
                #resolved.or_else(|| ::std::option::Option::Some(#default))
            },
            None => resolved,
        };
    }

    match (&attrs.converter, default) {
        (Some(func), Some(default)) => quote! {
            __ctx.with_default_with::<#ty, _, _, _>(&__field, #func, || #default)?
        },
        (Some(func), None) => quote! {
            __ctx.required_with::<#ty, _, _>(&__field, #func)?
        },
        (None, Some(default)) => quote! {
            __ctx.with_default::<#ty, _>(&__field, || #default)?
        },
        (None, None) => quote! {
            __ctx.required::<#ty>(&__field)?
        },
    }
}
