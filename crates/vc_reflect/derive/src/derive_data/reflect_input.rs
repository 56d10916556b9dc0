use syn::spanned::Spanned;
use syn::{Data, DeriveInput, Fields, Index, LitStr, Member, Type};

use super::{FieldAttributes, ReflectMeta, TypeAttributes, TypeParser};
use crate::REFLECT_ATTRIBUTE_NAME;

/// A struct field as seen by `#[derive(Reflected)]`.
pub(crate) struct StructField<'a> {
    /// `self.#member` accesses the field.
    pub member: Member,
    pub ty: &'a Type,
    pub attrs: FieldAttributes,
}

impl StructField<'_> {
    /// The member name: `#[reflect(name = "..")]`, the field name or its index.
    pub fn name(&self) -> LitStr {
        if let Some(name) = &self.attrs.name {
            return name.clone();
        }
        match &self.member {
            Member::Named(ident) => LitStr::new(&ident.to_string(), ident.span()),
            Member::Unnamed(index) => LitStr::new(&index.index.to_string(), index.span),
        }
    }
}

/// A parsed `#[derive(Reflected)]` input.
///
/// Enums only carry type level information, their fields are not members.
pub(crate) struct ReflectInput<'a> {
    pub meta: ReflectMeta<'a>,
    pub fields: Vec<StructField<'a>>,
}

impl<'a> ReflectInput<'a> {
    pub fn from_derive_input(input: &'a DeriveInput) -> syn::Result<Self> {
        let attrs = TypeAttributes::parse_attrs(&input.attrs)?;
        let parser = TypeParser::new(&input.ident, attrs.type_path.clone(), &input.generics);
        parser.check_lifetimes()?;

        let fields = match &input.data {
            Data::Struct(data) => Self::struct_fields(&data.fields)?,
            Data::Enum(data) => {
                let tagged = data
                    .variants
                    .iter()
                    .flat_map(|variant| variant.fields.iter())
                    .flat_map(|field| field.attrs.iter())
                    .find(|attr| attr.path().is_ident(REFLECT_ATTRIBUTE_NAME));
                if let Some(attr) = tagged {
                    return Err(syn::Error::new(
                        attr.span(),
                        "enum fields are not members, `#[reflect(..)]` has no effect here",
                    ));
                }
                Vec::new()
            }
            Data::Union(data) => {
                return Err(syn::Error::new(
                    data.union_token.span(),
                    "`Reflected` cannot be derived for unions",
                ));
            }
        };

        Ok(Self {
            meta: ReflectMeta::new(attrs, parser),
            fields,
        })
    }

    fn struct_fields(fields: &'a Fields) -> syn::Result<Vec<StructField<'a>>> {
        let mut parsed = Vec::with_capacity(fields.len());
        let mut errors = Vec::new();

        for (index, field) in fields.iter().enumerate() {
            let attrs = match FieldAttributes::parse_attrs(&field.attrs) {
                Ok(attrs) => attrs,
                Err(err) => {
                    errors.push(err);
                    continue;
                }
            };
            let member = match &field.ident {
                Some(ident) => Member::Named(ident.clone()),
                None => Member::Unnamed(Index {
                    index: index as u32,
                    span: field.ty.span(),
                }),
            };
            parsed.push(StructField {
                member,
                ty: &field.ty,
                attrs,
            });
        }

        match crate::utils::combine_errors(errors) {
            Some(err) => Err(err),
            None => Ok(parsed),
        }
    }

    /// Fields that become variable members, in declaration order.
    pub fn variables(&self) -> impl Iterator<Item = &StructField<'a>> {
        self.fields
            .iter()
            .filter(|field| !field.attrs.ignore && !field.attrs.base)
    }

    /// Fields that are embedded bases, in declaration order.
    pub fn embedded_bases(&self) -> impl Iterator<Item = &StructField<'a>> {
        self.fields.iter().filter(|field| field.attrs.base)
    }
}
