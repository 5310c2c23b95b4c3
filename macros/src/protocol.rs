//! `Encode` and `Decode` derives for packet structs and discriminated enums.

use darling::{FromDeriveInput, FromField, FromMeta, FromVariant};
use proc_macro2::{Ident, TokenStream};
use quote::quote;
use syn::{Data, DataEnum, DeriveInput, Fields};

/// `#[encoding(...)]` options on a field. At most one may be set.
#[derive(Default, Debug, FromField)]
#[darling(attributes(encoding), forward_attrs(allow, doc, cfg))]
#[darling(default)]
struct FieldOptions {
    varint: bool,
    varlong: bool,
    angle: bool,
    /// `Option` field preceded by a presence flag.
    bool_prefixed: bool,
    length_prefix: Option<LengthPrefix>,
    /// Character limit of a string field.
    max_length: Option<usize>,
}

#[derive(Debug, Clone, Copy, FromMeta)]
enum LengthPrefix {
    #[darling(rename = "varint")]
    VarInt,
    /// Items run to the end of the frame. Only valid on the last field.
    #[darling(rename = "inferred")]
    Inferred,
}

/// Wire layout of a single field.
#[derive(Debug, Clone, Copy)]
enum Layout {
    /// The field type's own `Encode`/`Decode` impl.
    Natural,
    VarInt,
    VarLong,
    Angle,
    BoolPrefixed,
    BoundedString(usize),
    List(LengthPrefix),
}

impl Layout {
    fn of(field: &syn::Field) -> syn::Result<Self> {
        let options = FieldOptions::from_field(field)?;

        let mut layouts = Vec::new();
        if options.varint {
            layouts.push(Self::VarInt);
        }
        if options.varlong {
            layouts.push(Self::VarLong);
        }
        if options.angle {
            layouts.push(Self::Angle);
        }
        if options.bool_prefixed {
            layouts.push(Self::BoolPrefixed);
        }
        if let Some(max) = options.max_length {
            layouts.push(Self::BoundedString(max));
        }
        if let Some(prefix) = options.length_prefix {
            layouts.push(Self::List(prefix));
        }

        match layouts.as_slice() {
            [] => Ok(Self::Natural),
            [layout] => Ok(*layout),
            _ => Err(syn::Error::new_spanned(
                field,
                "at most one encoding option can be set",
            )),
        }
    }

    /// Statements writing `value` to `encoder`.
    fn write(self, value: TokenStream) -> TokenStream {
        match self {
            Self::Natural => quote! {
                crate::protocol::Encode::encode(&#value, encoder)?;
            },
            Self::VarInt => quote! {
                encoder.write_var_int(#value.try_into()?);
            },
            Self::VarLong => quote! {
                encoder.write_var_long(#value.try_into()?);
            },
            Self::Angle => quote! {
                encoder.write_angle(#value)?;
            },
            Self::BoundedString(max) => quote! {
                encoder.write_string_with_limit(&#value, #max)?;
            },
            Self::BoolPrefixed => quote! {
                encoder.write_bool(#value.is_some());
                if let Some(value) = &#value {
                    crate::protocol::Encode::encode(value, encoder)?;
                }
            },
            Self::List(prefix) => {
                let write_length = match prefix {
                    LengthPrefix::VarInt => quote! {
                        encoder.write_var_int(#value.len().try_into()?);
                    },
                    LengthPrefix::Inferred => quote! {},
                };
                quote! {
                    #write_length
                    for item in &#value {
                        crate::protocol::Encode::encode(item, encoder)?;
                    }
                }
            }
        }
    }

    /// Expression reading a value from `decoder`.
    fn read(self) -> TokenStream {
        match self {
            Self::Natural => quote! { crate::protocol::Decode::decode(decoder)? },
            Self::VarInt => quote! { decoder.read_var_int()?.try_into()? },
            Self::VarLong => quote! { decoder.read_var_long()?.try_into()? },
            Self::Angle => quote! { decoder.read_angle()? },
            Self::BoundedString(max) => {
                quote! { decoder.read_string_with_limit(#max)?.to_owned() }
            }
            Self::BoolPrefixed => quote! {
                if decoder.read_bool()? {
                    Some(crate::protocol::Decode::decode(decoder)?)
                } else {
                    None
                }
            },
            Self::List(LengthPrefix::VarInt) => quote! {{
                let length = decoder.read_length_prefix()?;
                let mut items = Vec::with_capacity(length);
                for _ in 0..length {
                    items.push(crate::protocol::Decode::decode(decoder)?);
                }
                items
            }},
            Self::List(LengthPrefix::Inferred) => quote! {{
                let mut items = Vec::new();
                while !decoder.is_finished() {
                    items.push(crate::protocol::Decode::decode(decoder)?);
                }
                items
            }},
        }
    }
}

#[derive(Debug)]
struct Field {
    ident: Ident,
    layout: Layout,
}

fn fields_of(fields: &Fields) -> syn::Result<Vec<Field>> {
    match fields {
        Fields::Named(named) => named
            .named
            .iter()
            .map(|field| {
                let ident = field
                    .ident
                    .clone()
                    .ok_or_else(|| syn::Error::new_spanned(field, "expected a named field"))?;
                Ok(Field {
                    ident,
                    layout: Layout::of(field)?,
                })
            })
            .collect(),
        Fields::Unnamed(unnamed) => Err(syn::Error::new_spanned(
            unnamed,
            "only named fields are supported",
        )),
        Fields::Unit => Ok(Vec::new()),
    }
}

/// Reads each field into a local of the same name.
fn read_fields(fields: &[Field]) -> TokenStream {
    let reads = fields.iter().map(|Field { ident, layout }| {
        let read = layout.read();
        quote! { let #ident = #read; }
    });
    quote! { #(#reads)* }
}

#[derive(Debug, FromDeriveInput)]
#[darling(attributes(encoding), forward_attrs(allow, doc, cfg))]
struct EnumOptions {
    discriminant: Discriminant,
}

#[derive(Debug, Clone, Copy, FromMeta)]
enum Discriminant {
    #[darling(rename = "varint")]
    VarInt,
    #[darling(rename = "byte")]
    Byte,
}

impl Discriminant {
    fn write(self, variant: &Variant) -> syn::Result<TokenStream> {
        let out_of_range = |kind: &str| {
            syn::Error::new_spanned(&variant.ident, format!("id does not fit in a {kind}"))
        };
        Ok(match self {
            Self::VarInt => {
                let id = i32::try_from(variant.id).map_err(|_| out_of_range("varint"))?;
                quote! { encoder.write_var_int(#id); }
            }
            Self::Byte => {
                let id = u8::try_from(variant.id).map_err(|_| out_of_range("byte"))?;
                quote! { encoder.write_u8(#id); }
            }
        })
    }

    fn read(self) -> TokenStream {
        match self {
            Self::VarInt => quote! { i64::from(decoder.read_var_int()?) },
            Self::Byte => quote! { i64::from(decoder.read_u8()?) },
        }
    }
}

#[derive(Debug, FromVariant)]
#[darling(attributes(encoding), forward_attrs(allow, doc, cfg))]
struct VariantOptions {
    id: i64,
}

#[derive(Debug)]
struct Variant {
    ident: Ident,
    id: i64,
    fields: Vec<Field>,
}

#[derive(Debug)]
enum Input {
    Struct(Vec<Field>),
    Enum {
        discriminant: Discriminant,
        variants: Vec<Variant>,
    },
}

impl Input {
    fn parse(input: &DeriveInput) -> syn::Result<Self> {
        match &input.data {
            Data::Struct(s) => fields_of(&s.fields).map(Self::Struct),
            Data::Enum(e) => Self::parse_enum(e, input),
            Data::Union(u) => Err(syn::Error::new_spanned(
                u.union_token,
                "cannot derive Encode/Decode on a union",
            )),
        }
    }

    fn parse_enum(data: &DataEnum, input: &DeriveInput) -> syn::Result<Self> {
        let EnumOptions { discriminant } = EnumOptions::from_derive_input(input)?;
        let variants = data
            .variants
            .iter()
            .map(|variant| {
                let VariantOptions { id } = VariantOptions::from_variant(variant)?;
                Ok(Variant {
                    ident: variant.ident.clone(),
                    id,
                    fields: fields_of(&variant.fields)?,
                })
            })
            .collect::<syn::Result<Vec<_>>>()?;
        Ok(Self::Enum {
            discriminant,
            variants,
        })
    }

    fn encode_body(&self) -> syn::Result<TokenStream> {
        match self {
            Self::Struct(fields) => {
                let writes = fields
                    .iter()
                    .map(|Field { ident, layout }| layout.write(quote! { self.#ident }));
                Ok(quote! {
                    #(#writes)*
                    Ok(())
                })
            }
            Self::Enum {
                discriminant,
                variants,
            } => {
                let mut arms = Vec::new();
                for variant in variants {
                    let ident = &variant.ident;
                    let bindings = variant.fields.iter().map(|field| &field.ident);
                    let write_id = discriminant.write(variant)?;
                    let writes = variant
                        .fields
                        .iter()
                        .map(|Field { ident, layout }| layout.write(quote! { (*#ident) }));
                    arms.push(quote! {
                        Self::#ident { #(#bindings),* } => {
                            #write_id
                            #(#writes)*
                        }
                    });
                }
                Ok(quote! {
                    match self {
                        #(#arms)*
                    }
                    Ok(())
                })
            }
        }
    }

    fn decode_body(&self, ty: &Ident) -> TokenStream {
        match self {
            Self::Struct(fields) => {
                let reads = read_fields(fields);
                let idents = fields.iter().map(|field| &field.ident);
                quote! {
                    #reads
                    Ok(Self { #(#idents),* })
                }
            }
            Self::Enum {
                discriminant,
                variants,
            } => {
                let read_id = discriminant.read();
                let arms = variants.iter().map(|variant| {
                    let Variant { ident, id, fields } = variant;
                    let reads = read_fields(fields);
                    let idents = fields.iter().map(|field| &field.ident);
                    quote! {
                        #id => {
                            #reads
                            Ok(Self::#ident { #(#idents),* })
                        }
                    }
                });
                let type_name = ty.to_string();
                quote! {
                    let discriminant = #read_id;
                    match discriminant {
                        #(#arms)*
                        _ => Err(crate::protocol::DecodeError::InvalidDiscriminant {
                            ty: #type_name,
                            value: discriminant,
                        }),
                    }
                }
            }
        }
    }
}

pub fn derive_encode_on(input: &DeriveInput) -> syn::Result<TokenStream> {
    let ident = &input.ident;
    let body = Input::parse(input)?.encode_body()?;
    Ok(quote! {
        impl crate::protocol::Encode for #ident {
            fn encode(
                &self,
                encoder: &mut crate::protocol::Encoder,
            ) -> ::std::result::Result<(), crate::protocol::EncodeError> {
                #body
            }
        }
    })
}

pub fn derive_decode_on(input: &DeriveInput) -> syn::Result<TokenStream> {
    let ident = &input.ident;
    let body = Input::parse(input)?.decode_body(ident);
    Ok(quote! {
        impl crate::protocol::Decode for #ident {
            fn decode(
                decoder: &mut crate::protocol::Decoder,
            ) -> ::std::result::Result<Self, crate::protocol::DecodeError> {
                #body
            }
        }
    })
}
