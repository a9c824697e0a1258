//! Canonical forms used for equality checks.
//!
//! Normalization never changes what is reported: differences always carry
//! the records as parsed. It only decides whether two records count as equal
//! under the active [`CompareOptions`].

use crate::comparison::types::CompareOptions;
use crate::signature::{
    Attribute, Block, Constant, Include, InstanceVariable, MethodDefinition, Overload, Param,
    ParameterSet, ProcType, RecordField, TypeExpr,
};

pub trait Normalize {
    fn normalized(&self, options: &CompareOptions) -> Self;
}

impl Normalize for TypeExpr {
    fn normalized(&self, options: &CompareOptions) -> Self {
        match self {
            TypeExpr::Named { name, args } => TypeExpr::Named {
                name: name.clone(),
                args: normalize_all(args, options),
            },
            TypeExpr::Literal(_) | TypeExpr::Singleton(_) => self.clone(),
            TypeExpr::Union(members) => {
                TypeExpr::Union(normalize_operands(members, options))
            }
            TypeExpr::Intersection(members) => {
                TypeExpr::Intersection(normalize_operands(members, options))
            }
            TypeExpr::Optional(inner) => TypeExpr::Optional(Box::new(inner.normalized(options))),
            TypeExpr::Tuple(members) => TypeExpr::Tuple(normalize_all(members, options)),
            TypeExpr::Record(fields) => TypeExpr::Record(
                fields
                    .iter()
                    .map(|field| RecordField {
                        key: field.key.clone(),
                        optional: field.optional,
                        ty: field.ty.normalized(options),
                    })
                    .collect(),
            ),
            TypeExpr::Proc(proc_type) => TypeExpr::Proc(Box::new(proc_type.normalized(options))),
        }
    }
}

fn normalize_all<T: Normalize>(items: &[T], options: &CompareOptions) -> Vec<T> {
    items.iter().map(|item| item.normalized(options)).collect()
}

/// Union and intersection members keep source order unless unions are
/// normalized, in which case they are sorted by canonical text.
fn normalize_operands(members: &[TypeExpr], options: &CompareOptions) -> Vec<TypeExpr> {
    let mut normalized = normalize_all(members, options);
    if options.normalize_unions {
        normalized.sort_by_cached_key(|member| member.to_string());
    }
    normalized
}

impl Normalize for Param {
    fn normalized(&self, options: &CompareOptions) -> Self {
        Param {
            ty: self.ty.normalized(options),
            name: if options.strict_param_names {
                self.name.clone()
            } else {
                None
            },
        }
    }
}

impl Normalize for ParameterSet {
    fn normalized(&self, options: &CompareOptions) -> Self {
        let param = |p: &Param| p.normalized(options);
        ParameterSet {
            required_positionals: self.required_positionals.iter().map(param).collect(),
            optional_positionals: self.optional_positionals.iter().map(param).collect(),
            rest_positional: self.rest_positional.as_ref().map(param),
            trailing_positionals: self.trailing_positionals.iter().map(param).collect(),
            required_keywords: self
                .required_keywords
                .iter()
                .map(|(key, p)| (key.clone(), param(p)))
                .collect(),
            optional_keywords: self
                .optional_keywords
                .iter()
                .map(|(key, p)| (key.clone(), param(p)))
                .collect(),
            rest_keywords: self.rest_keywords.as_ref().map(param),
        }
    }
}

impl Normalize for Block {
    fn normalized(&self, options: &CompareOptions) -> Self {
        Block {
            required: self.required,
            params: self.params.normalized(options),
            self_type: self.self_type.as_ref().map(|ty| ty.normalized(options)),
            return_type: self.return_type.normalized(options),
        }
    }
}

impl Normalize for ProcType {
    fn normalized(&self, options: &CompareOptions) -> Self {
        ProcType {
            params: self.params.normalized(options),
            block: self.block.as_ref().map(|block| block.normalized(options)),
            self_type: self.self_type.as_ref().map(|ty| ty.normalized(options)),
            return_type: self.return_type.normalized(options),
        }
    }
}

impl Normalize for Overload {
    fn normalized(&self, options: &CompareOptions) -> Self {
        Overload {
            type_params: self.type_params.clone(),
            params: self.params.normalized(options),
            block: self.block.as_ref().map(|block| block.normalized(options)),
            return_type: self.return_type.normalized(options),
        }
    }
}

impl Normalize for MethodDefinition {
    fn normalized(&self, options: &CompareOptions) -> Self {
        MethodDefinition {
            name: self.name.clone(),
            kind: self.kind,
            visibility: self.visibility,
            overloads: normalize_all(&self.overloads, options),
            overloading: self.overloading,
        }
    }
}

impl Normalize for Include {
    fn normalized(&self, options: &CompareOptions) -> Self {
        Include {
            kind: self.kind,
            module: self.module.normalized(options),
        }
    }
}

impl Normalize for Constant {
    fn normalized(&self, options: &CompareOptions) -> Self {
        Constant {
            name: self.name.clone(),
            ty: self.ty.normalized(options),
        }
    }
}

impl Normalize for Attribute {
    fn normalized(&self, options: &CompareOptions) -> Self {
        Attribute {
            name: self.name.clone(),
            ty: self.ty.normalized(options),
            kind: self.kind,
        }
    }
}

impl Normalize for InstanceVariable {
    fn normalized(&self, options: &CompareOptions) -> Self {
        InstanceVariable {
            name: self.name.clone(),
            ty: self.ty.normalized(options),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signature::MethodKind;

    const LOOSE: CompareOptions = CompareOptions {
        strict_param_names: false,
        normalize_unions: false,
    };

    fn union(names: &[&str]) -> TypeExpr {
        TypeExpr::union(names.iter().map(|n| TypeExpr::named(*n)).collect())
    }

    #[test]
    fn test_loose_mode_drops_parameter_names() {
        let mut params = ParameterSet::default();
        params
            .required_positionals
            .push(Param::named(TypeExpr::named("Integer"), "value"));
        params.rest_keywords = Some(Param::named(TypeExpr::named("untyped"), "opts"));

        let loose = params.normalized(&LOOSE);
        assert_eq!(loose.required_positionals[0].name, None);
        assert_eq!(loose.rest_keywords.unwrap().name, None);

        let strict = params.normalized(&CompareOptions {
            strict_param_names: true,
            ..LOOSE
        });
        assert_eq!(strict, params);
    }

    #[test]
    fn test_loose_mode_reaches_into_proc_types() {
        let mut proc_params = ParameterSet::default();
        proc_params
            .required_positionals
            .push(Param::named(TypeExpr::named("String"), "line"));
        let ty = TypeExpr::Proc(Box::new(ProcType {
            params: proc_params,
            block: None,
            self_type: None,
            return_type: TypeExpr::named("void"),
        }));
        assert_eq!(ty.normalized(&LOOSE).to_string(), "^(String) -> void");
    }

    #[test]
    fn test_union_order_kept_by_default() {
        let ty = union(&["String", "Integer"]);
        assert_eq!(ty.normalized(&LOOSE), ty);
    }

    #[test]
    fn test_union_order_sorted_when_requested() {
        let options = CompareOptions {
            normalize_unions: true,
            ..LOOSE
        };
        assert_eq!(
            union(&["String", "Integer"]).normalized(&options),
            union(&["Integer", "String"]).normalized(&options)
        );
        let nested = TypeExpr::Named {
            name: "Array".to_string(),
            args: vec![union(&["Symbol", "String"])],
        };
        assert_eq!(nested.normalized(&options).to_string(), "Array[String | Symbol]");
    }

    #[test]
    fn test_method_overload_order_survives_normalization() {
        let overload = |ret: &str| Overload {
            type_params: vec![],
            params: ParameterSet::default(),
            block: None,
            return_type: TypeExpr::named(ret),
        };
        let method = MethodDefinition {
            name: "to_s".to_string(),
            kind: MethodKind::Instance,
            visibility: Default::default(),
            overloads: vec![overload("String"), overload("Symbol")],
            overloading: false,
        };
        let normalized = method.normalized(&CompareOptions {
            strict_param_names: false,
            normalize_unions: true,
        });
        assert_eq!(normalized.overloads[0].return_type, TypeExpr::named("String"));
        assert_eq!(normalized.overloads[1].return_type, TypeExpr::named("Symbol"));
    }
}
