//! Implements derives for packet identity metadata.

use darling::{FromDeriveInput, FromMeta};
use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::{Data, DeriveInput, Field, Fields, Ident};

#[derive(Debug, Copy, Clone, FromMeta)]
enum Phase {
    #[darling(rename = "handshake")]
    Handshake,
    #[darling(rename = "status")]
    Status,
    #[darling(rename = "login")]
    Login,
    #[darling(rename = "play")]
    Play,
}

impl Phase {
    fn variant(self) -> Ident {
        let name = match self {
            Phase::Handshake => "Handshake",
            Phase::Status => "Status",
            Phase::Login => "Login",
            Phase::Play => "Play",
        };
        Ident::new(name, Span::call_site())
    }
}

#[derive(Debug, Copy, Clone, FromMeta)]
enum Direction {
    #[darling(rename = "clientbound")]
    Clientbound,
    #[darling(rename = "serverbound")]
    Serverbound,
}

impl Direction {
    fn variant(self) -> Ident {
        let name = match self {
            Direction::Clientbound => "Clientbound",
            Direction::Serverbound => "Serverbound",
        };
        Ident::new(name, Span::call_site())
    }
}

/// Options for a single packet type.
#[derive(Debug, FromDeriveInput)]
#[darling(attributes(packet), forward_attrs(allow, doc, cfg))]
struct PacketOptions {
    /// Numeric id within the phase and direction.
    id: i32,
    phase: Phase,
    direction: Direction,
    /// Whether the packet may cross the login boundary before
    /// authentication completes. Defaults to the phase rule.
    #[darling(default)]
    before_authentication: Option<bool>,
    /// Diagnostic name. Defaults to the type name.
    #[darling(default)]
    name: Option<String>,
}

/// Options for an enum grouping every packet of one phase and direction.
#[derive(Debug, FromDeriveInput)]
#[darling(attributes(packet_set), forward_attrs(allow, doc, cfg))]
struct PacketSetOptions {
    direction: Direction,
}

pub fn derive_packet_on(input: &DeriveInput) -> syn::Result<TokenStream> {
    let options = PacketOptions::from_derive_input(input)?;
    let ident = &input.ident;

    let id = options.id;
    let name = options.name.unwrap_or_else(|| ident.to_string());
    let phase = options.phase.variant();
    let direction = options.direction.variant();
    let before_authentication = options.before_authentication.map(|allowed| {
        quote! {
            const ALLOWED_BEFORE_AUTHENTICATION: bool = #allowed;
        }
    });

    Ok(quote! {
        impl crate::protocol::packet::Packet for #ident {
            const ID: i32 = #id;
            const NAME: &'static str = #name;
            const PHASE: crate::protocol::ProtocolPhase = crate::protocol::ProtocolPhase::#phase;
            const DIRECTION: crate::protocol::Direction = crate::protocol::Direction::#direction;
            #before_authentication
        }
    })
}

pub fn derive_packet_set_on(input: &DeriveInput) -> syn::Result<TokenStream> {
    let Data::Enum(en) = &input.data else {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "only enums are supported",
        ));
    };
    let options = PacketSetOptions::from_derive_input(input)?;
    let enum_ident = &input.ident;

    let mut variants = Vec::new();
    let mut types = Vec::new();
    for variant in &en.variants {
        let Fields::Unnamed(fields) = &variant.fields else {
            return Err(syn::Error::new_spanned(
                variant,
                "packet set variants must wrap exactly one packet",
            ));
        };
        if fields.unnamed.len() != 1 {
            return Err(syn::Error::new_spanned(
                variant,
                "packet set variants must wrap exactly one packet",
            ));
        }
        let Field { ty, .. } = &fields.unnamed[0];
        variants.push(&variant.ident);
        types.push(ty);
    }

    let (register, encode) = match options.direction {
        Direction::Serverbound => (
            quote! {
                #(registry.register_serverbound::<#types, Self>();)*
            },
            quote! {},
        ),
        Direction::Clientbound => (
            quote! {
                #(registry.register_clientbound::<#types>();)*
            },
            quote! {
                impl crate::protocol::Encode for #enum_ident {
                    fn encode(
                        &self,
                        encoder: &mut crate::protocol::Encoder,
                    ) -> ::std::result::Result<(), crate::protocol::EncodeError> {
                        match self {
                            #(Self::#variants(packet) => crate::protocol::Encode::encode(packet, encoder),)*
                        }
                    }
                }
            },
        ),
    };

    Ok(quote! {
        impl #enum_ident {
            /// Numeric id of the wrapped packet.
            pub fn id(&self) -> i32 {
                match self {
                    #(Self::#variants(_) => <#types as crate::protocol::packet::Packet>::ID,)*
                }
            }

            /// Diagnostic name of the wrapped packet.
            pub fn name(&self) -> &'static str {
                match self {
                    #(Self::#variants(_) => <#types as crate::protocol::packet::Packet>::NAME,)*
                }
            }

            pub fn phase(&self) -> crate::protocol::ProtocolPhase {
                match self {
                    #(Self::#variants(_) => <#types as crate::protocol::packet::Packet>::PHASE,)*
                }
            }

            pub fn direction(&self) -> crate::protocol::Direction {
                match self {
                    #(Self::#variants(_) => <#types as crate::protocol::packet::Packet>::DIRECTION,)*
                }
            }

            pub fn is_allowed_before_authentication(&self) -> bool {
                match self {
                    #(Self::#variants(_) => <#types as crate::protocol::packet::Packet>::ALLOWED_BEFORE_AUTHENTICATION,)*
                }
            }

            /// Type id of the wrapped packet, used for registry lookups.
            pub fn packet_type(&self) -> ::std::any::TypeId {
                match self {
                    #(Self::#variants(_) => ::std::any::TypeId::of::<#types>(),)*
                }
            }

            /// Adds every packet of this set to the registry.
            pub(crate) fn register_all(registry: &mut crate::protocol::registry::PacketRegistry) {
                #register
            }
        }

        #encode
    })
}
