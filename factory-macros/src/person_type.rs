//! `#[person_type]` expansion.

use proc_macro2::TokenStream;
use quote::quote;
use syn::parse::{Parse, ParseStream};
use syn::punctuated::Punctuated;
use syn::{ItemStruct, LitStr, Path, Token};

enum Arg {
    Key(LitStr),
    Name(LitStr),
    Constructor(Path),
}

impl Parse for Arg {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        if input.peek(LitStr) {
            return Ok(Self::Key(input.parse()?));
        }

        let ident: syn::Ident = input.parse()?;
        input.parse::<Token![=]>()?;
        if ident == "name" {
            Ok(Self::Name(input.parse()?))
        } else if ident == "constructor" {
            Ok(Self::Constructor(input.parse()?))
        } else {
            Err(syn::Error::new(
                ident.span(),
                "unknown person_type argument, expected `name` or `constructor`",
            ))
        }
    }
}

#[derive(Default)]
struct Args {
    keys: Vec<LitStr>,
    name: Option<LitStr>,
    constructor: Option<Path>,
}

impl Parse for Args {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut args = Args::default();
        for arg in Punctuated::<Arg, Token![,]>::parse_terminated(input)? {
            match arg {
                Arg::Key(key) => {
                    if key.value().is_empty() {
                        return Err(syn::Error::new(key.span(), "key cannot be empty"));
                    }
                    if args.keys.iter().any(|known| known.value() == key.value()) {
                        return Err(syn::Error::new(key.span(), "key declared more than once"));
                    }
                    args.keys.push(key);
                }
                Arg::Name(name) => {
                    if name.value().trim().is_empty() {
                        return Err(syn::Error::new(name.span(), "name cannot be blank"));
                    }
                    if args.name.replace(name.clone()).is_some() {
                        return Err(syn::Error::new(name.span(), "`name` given more than once"));
                    }
                }
                Arg::Constructor(path) => {
                    if args.constructor.is_some() {
                        return Err(syn::Error::new_spanned(
                            path,
                            "`constructor` given more than once",
                        ));
                    }
                    args.constructor = Some(path);
                }
            }
        }
        Ok(args)
    }
}

pub fn expand(attr: TokenStream, item: TokenStream) -> syn::Result<TokenStream> {
    let args: Args = syn::parse2(attr)?;
    let item: ItemStruct = syn::parse2(item)?;

    if !item.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &item.generics,
            "person_type cannot be applied to generic structs",
        ));
    }

    if args.keys.is_empty() && args.name.is_some() {
        return Err(syn::Error::new_spanned(
            &item.ident,
            "person_type with a `name` must declare at least one key",
        ));
    }

    let ident = &item.ident;
    let type_name = ident.to_string();

    let declaration = if args.keys.is_empty() {
        quote! { ::core::option::Option::None }
    } else {
        let keys = &args.keys;
        let name = match &args.name {
            Some(name) => quote! { ::core::option::Option::Some(#name) },
            None => quote! { ::core::option::Option::None },
        };
        quote! {
            ::core::option::Option::Some(::persons::plugin::Declaration {
                name: #name,
                keys: &[#(#keys),*],
            })
        }
    };

    let construct = match &args.constructor {
        Some(path) => quote! {
            #path().map(|person: #ident| {
                ::std::boxed::Box::new(person) as ::std::boxed::Box<dyn ::persons::Person>
            })
        },
        None => quote! {
            ::core::result::Result::Ok(::std::boxed::Box::new(
                <#ident as ::core::default::Default>::default(),
            ))
        },
    };

    Ok(quote! {
        #item

        const _: () = {
            fn __construct() -> ::core::result::Result<
                ::std::boxed::Box<dyn ::persons::Person>,
                ::persons::ConstructionError,
            > {
                #construct
            }

            ::persons::__private::inventory::submit! {
                ::persons::plugin::PersonPlugin {
                    type_path: ::core::concat!(::core::module_path!(), "::", #type_name),
                    declaration: #declaration,
                    constructor: __construct,
                }
            }
        };
    })
}
