//! Attribute parsing for the Record derive macro.
//!
//! Parses the `#[record(...)]` field attributes.

use proc_macro2::Span;
use syn::{
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    spanned::Spanned,
    Attribute, Error, Lit, Meta, Result, Token,
};

/// How a field is exposed to queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldKind {
    /// Converted with `ToValue`.
    #[default]
    Value,
    /// A record that dotted paths descend into: `#[record(nested)]`
    Nested,
    /// A collection of records that dotted paths fan out over:
    /// `#[record(nested_list)]`
    NestedList,
}

/// Field-level attributes from `#[record(...)]`.
#[derive(Debug, Clone)]
pub struct RecordAttr {
    /// How the field is converted.
    pub kind: FieldKind,
    /// Hide this field from queries.
    pub skip: bool,
    /// Custom field name for queries (default: field name).
    pub rename: Option<String>,
    /// The span for error reporting.
    pub span: Span,
}

impl Default for RecordAttr {
    fn default() -> Self {
        RecordAttr {
            kind: FieldKind::Value,
            skip: false,
            rename: None,
            span: Span::call_site(),
        }
    }
}

impl RecordAttr {
    fn set_kind(&mut self, kind: FieldKind, span: Span) -> Result<()> {
        if self.kind != FieldKind::Value && self.kind != kind {
            return Err(Error::new(
                span,
                "nested and nested_list cannot be combined",
            ));
        }
        self.kind = kind;
        self.span = span;
        Ok(())
    }
}

impl Parse for RecordAttr {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut attr = RecordAttr::default();

        let content: Punctuated<Meta, Token![,]> = Punctuated::parse_terminated(input)?;

        for meta in content {
            match &meta {
                Meta::Path(p) if p.is_ident("skip") => attr.skip = true,
                Meta::Path(p) if p.is_ident("nested") => attr.set_kind(FieldKind::Nested, p.span())?,
                Meta::Path(p) if p.is_ident("nested_list") => {
                    attr.set_kind(FieldKind::NestedList, p.span())?
                }

                // rename = "customName"
                Meta::NameValue(nv) if nv.path.is_ident("rename") => {
                    if let syn::Expr::Lit(syn::ExprLit {
                        lit: Lit::Str(s), ..
                    }) = &nv.value
                    {
                        attr.rename = Some(s.value());
                    } else {
                        return Err(Error::new(
                            nv.value.span(),
                            "rename must be a string literal",
                        ));
                    }
                }

                _ => {
                    return Err(Error::new(
                        meta.span(),
                        "unknown record attribute. Expected: skip, nested, nested_list, or rename = \"...\"",
                    ));
                }
            }
        }

        Ok(attr)
    }
}

/// Extract `#[record(...)]` attributes from a field's attributes.
pub fn parse_record_attrs(attrs: &[Attribute]) -> Result<RecordAttr> {
    for attr in attrs {
        if attr.path().is_ident("record") {
            return attr.parse_args::<RecordAttr>();
        }
    }
    Ok(RecordAttr::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_record(tokens: &str) -> Result<RecordAttr> {
        syn::parse_str::<RecordAttr>(tokens)
    }

    #[test]
    fn test_record_empty() {
        let attr = parse_record("").unwrap();
        assert_eq!(attr.kind, FieldKind::Value);
        assert!(!attr.skip);
        assert_eq!(attr.rename, None);
    }

    #[test]
    fn test_record_skip() {
        let attr = parse_record("skip").unwrap();
        assert!(attr.skip);
    }

    #[test]
    fn test_record_nested() {
        assert_eq!(parse_record("nested").unwrap().kind, FieldKind::Nested);
        assert_eq!(
            parse_record("nested_list").unwrap().kind,
            FieldKind::NestedList
        );
    }

    #[test]
    fn test_record_rename() {
        let attr = parse_record(r#"nested, rename = "sellerProfile""#).unwrap();
        assert_eq!(attr.kind, FieldKind::Nested);
        assert_eq!(attr.rename, Some("sellerProfile".to_string()));
    }

    #[test]
    fn test_record_conflicting_kinds() {
        let result = parse_record("nested, nested_list");
        assert!(result.is_err());
    }

    #[test]
    fn test_record_rename_requires_string() {
        assert!(parse_record("rename = 3").is_err());
    }

    #[test]
    fn test_record_unknown() {
        let result = parse_record("String");
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("unknown record attribute"));
    }
}
