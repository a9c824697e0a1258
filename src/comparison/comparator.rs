use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Display;

use tracing::trace;

use crate::comparison::normalize::Normalize;
use crate::comparison::types::*;
use crate::signature::{Declaration, Member, MethodDefinition};

/// Structural diff of two declaration sets.
pub struct Comparator<'a> {
    original: &'a [Declaration],
    generated: &'a [Declaration],
    options: CompareOptions,
}

impl<'a> Comparator<'a> {
    pub fn new(
        original: &'a [Declaration],
        generated: &'a [Declaration],
        options: CompareOptions,
    ) -> Self {
        Self {
            original,
            generated,
            options,
        }
    }

    /// Perform full comparison.
    ///
    /// Declarations come out sorted by name; within a declaration the
    /// categories are includes, constants, methods, attributes, ivars.
    pub fn compare(&self) -> Vec<Difference> {
        let original = index(self.original);
        let generated = index(self.generated);
        let names: BTreeSet<&str> = original.keys().chain(generated.keys()).copied().collect();

        let mut differences = Vec::new();
        for name in names {
            match (original.get(name), generated.get(name)) {
                (Some(_), None) => differences.push(Difference::declaration(
                    DifferenceKind::MissingInGenerated,
                    name,
                )),
                (None, Some(_)) => differences.push(Difference::declaration(
                    DifferenceKind::MissingInOriginal,
                    name,
                )),
                (Some(before), Some(after)) => {
                    self.compare_declaration(before, after, &mut differences)
                }
                (None, None) => {}
            }
        }
        differences
    }

    fn compare_declaration(
        &self,
        original: &Declaration,
        generated: &Declaration,
        out: &mut Vec<Difference>,
    ) {
        let before = out.len();
        let name = original.name.as_str();

        self.compare_items(name, MemberType::Include, original, generated, out, |m| {
            match m {
                Member::Include(include) => Some(include),
                _ => None,
            }
        });
        self.compare_items(name, MemberType::Constant, original, generated, out, |m| {
            match m {
                Member::Constant(constant) => Some(constant),
                _ => None,
            }
        });
        self.compare_methods(name, original, generated, out);
        self.compare_items(name, MemberType::Attribute, original, generated, out, |m| {
            match m {
                Member::Attribute(attribute) => Some(attribute),
                _ => None,
            }
        });
        self.compare_items(
            name,
            MemberType::InstanceVariable,
            original,
            generated,
            out,
            |m| match m {
                Member::InstanceVariable(ivar) => Some(ivar),
                _ => None,
            },
        );

        trace!(declaration = name, differences = out.len() - before, "compared declaration");
    }

    /// Set difference of one member category in both directions.
    fn compare_items<'d, T, F>(
        &self,
        name: &str,
        member_type: MemberType,
        original: &'d Declaration,
        generated: &'d Declaration,
        out: &mut Vec<Difference>,
        select: F,
    ) where
        T: Normalize + Display + 'd,
        F: Fn(&'d Member) -> Option<&'d T>,
    {
        let before = self.canonical_items(original, &select);
        let after = self.canonical_items(generated, &select);

        for (key, item) in &before {
            if !after.contains_key(key) {
                out.push(Difference::member(
                    DifferenceKind::MissingInGenerated,
                    name,
                    member_type,
                    item.clone(),
                ));
            }
        }
        for (key, item) in &after {
            if !before.contains_key(key) {
                out.push(Difference::member(
                    DifferenceKind::MissingInOriginal,
                    name,
                    member_type,
                    item.clone(),
                ));
            }
        }
    }

    /// Normalized canonical string to the string as written.
    fn canonical_items<'d, T, F>(&self, decl: &'d Declaration, select: &F) -> BTreeMap<String, String>
    where
        T: Normalize + Display + 'd,
        F: Fn(&'d Member) -> Option<&'d T>,
    {
        decl.members
            .iter()
            .filter_map(select)
            .map(|item| (item.normalized(&self.options).to_string(), item.to_string()))
            .collect()
    }

    /// Methods are matched by name. Definitions of one name are then paired
    /// by kind, so `def build` and `def self.build` can coexist. When each
    /// side has exactly one unpaired definition of a name, the kind changed
    /// and the pair is reported as a single mismatch.
    fn compare_methods(
        &self,
        name: &str,
        original: &Declaration,
        generated: &Declaration,
        out: &mut Vec<Difference>,
    ) {
        let before = methods_by_name(original);
        let after = methods_by_name(generated);
        let method_names: BTreeSet<&str> = before.keys().chain(after.keys()).copied().collect();
        let none = BTreeMap::new();

        for method_name in method_names {
            let defs_before = before.get(method_name).unwrap_or(&none);
            let defs_after = after.get(method_name).unwrap_or(&none);

            let only_before: Vec<_> = defs_before
                .iter()
                .filter(|(k, _)| !defs_after.contains_key(*k))
                .collect();
            let only_after: Vec<_> = defs_after
                .iter()
                .filter(|(k, _)| !defs_before.contains_key(*k))
                .collect();
            let kind_changed = only_before.len() == 1 && only_after.len() == 1;
            if let ([(_, a)], [(_, b)]) = (only_before.as_slice(), only_after.as_slice()) {
                out.push(Difference::method_mismatch(
                    name,
                    method_name,
                    (**a).clone(),
                    (**b).clone(),
                ));
            }

            let keys: BTreeSet<&String> = defs_before.keys().chain(defs_after.keys()).collect();
            for key in keys {
                match (defs_before.get(key), defs_after.get(key)) {
                    (Some(a), Some(b)) => {
                        if a.normalized(&self.options) != b.normalized(&self.options) {
                            out.push(Difference::method_mismatch(
                                name,
                                key,
                                (*a).clone(),
                                (*b).clone(),
                            ));
                        }
                    }
                    _ if kind_changed => {}
                    (Some(method), None) => out.push(Difference::missing_method(
                        name,
                        key,
                        Some((*method).clone()),
                        None,
                    )),
                    (None, Some(method)) => out.push(Difference::missing_method(
                        name,
                        key,
                        None,
                        Some((*method).clone()),
                    )),
                    (None, None) => {}
                }
            }
        }
    }
}

/// Compare two declaration sets with the given options.
pub fn compare(
    original: &[Declaration],
    generated: &[Declaration],
    options: CompareOptions,
) -> Vec<Difference> {
    Comparator::new(original, generated, options).compare()
}

/// Index declarations by name. Repeated names are merged in order, the way
/// the parser merges reopened classes.
fn index(declarations: &[Declaration]) -> BTreeMap<&str, Cow<'_, Declaration>> {
    let mut index: BTreeMap<&str, Cow<'_, Declaration>> = BTreeMap::new();
    for decl in declarations {
        match index.get_mut(decl.name.as_str()) {
            Some(existing) => {
                let merged = existing.to_mut();
                for member in &decl.members {
                    merged.push_member(member.clone());
                }
            }
            None => {
                index.insert(decl.name.as_str(), Cow::Borrowed(decl));
            }
        }
    }
    index
}

/// Method name to its definitions, keyed by `name`, `self.name` or
/// `self?.name`.
fn methods_by_name(decl: &Declaration) -> BTreeMap<&str, BTreeMap<String, &MethodDefinition>> {
    let mut methods: BTreeMap<&str, BTreeMap<String, &MethodDefinition>> = BTreeMap::new();
    for method in decl.methods() {
        methods
            .entry(method.name.as_str())
            .or_default()
            .insert(method.key(), method);
    }
    methods
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signature::{parse, MethodKind};
    use pretty_assertions::assert_eq;

    fn diff(original: &str, generated: &str, options: CompareOptions) -> Vec<Difference> {
        let original = parse(original).unwrap();
        let generated = parse(generated).unwrap();
        compare(&original, &generated, options)
    }

    fn strict() -> CompareOptions {
        CompareOptions {
            strict_param_names: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_identical_documents_have_no_differences() {
        let doc = "class User\n  attr_reader name: String\n  def valid?: () -> bool\nend\n";
        assert!(diff(doc, doc, CompareOptions::default()).is_empty());
    }

    #[test]
    fn test_method_only_in_original_is_missing_in_original() {
        let diffs = diff(
            "class User\n  def valid?: () -> bool\nend\n",
            "class User\nend\n",
            CompareOptions::default(),
        );
        assert_eq!(diffs.len(), 1);
        let d = &diffs[0];
        assert_eq!(d.kind, DifferenceKind::MissingInOriginal);
        assert_eq!(d.declaration, "User");
        assert_eq!(d.member_type, Some(MemberType::Method));
        assert_eq!(d.method.as_deref(), Some("valid?"));
        assert!(d.original.is_some());
        assert!(d.generated.is_none());
    }

    #[test]
    fn test_return_type_change_is_a_mismatch() {
        let diffs = diff(
            "class User\n  def full_name: () -> String\nend\n",
            "class User\n  def full_name: () -> (String | nil)\nend\n",
            CompareOptions::default(),
        );
        assert_eq!(diffs.len(), 1);
        assert_eq!(diffs[0].kind, DifferenceKind::MethodMismatch);
        assert_eq!(
            diffs[0].original.as_ref().unwrap().to_string(),
            "def full_name: () -> String"
        );
        assert_eq!(
            diffs[0].generated.as_ref().unwrap().to_string(),
            "def full_name: () -> (String | nil)"
        );
    }

    #[test]
    fn test_parameter_names_only_matter_when_strict() {
        let original = "class Counter\n  def add: (Integer value) -> void\nend\n";
        let generated = "class Counter\n  def add: (Integer) -> void\nend\n";
        assert!(diff(original, generated, CompareOptions::default()).is_empty());

        let diffs = diff(original, generated, strict());
        assert_eq!(diffs.len(), 1);
        assert_eq!(diffs[0].kind, DifferenceKind::MethodMismatch);
    }

    #[test]
    fn test_whole_declarations_missing_each_way() {
        let diffs = diff("class A\nend\n", "module B\nend\n", CompareOptions::default());
        assert_eq!(
            diffs,
            vec![
                Difference::declaration(DifferenceKind::MissingInGenerated, "A"),
                Difference::declaration(DifferenceKind::MissingInOriginal, "B"),
            ]
        );
    }

    #[test]
    fn test_category_order_within_declaration() {
        let original = indoc::indoc! {"
            class Widget
              @size: Integer
              attr_reader label: String
              def render: () -> String
              VERSION: String
              include Comparable
            end
        "};
        let diffs = diff(original, "class Widget\nend\n", CompareOptions::default());
        let types: Vec<_> = diffs.iter().filter_map(|d| d.member_type).collect();
        assert_eq!(
            types,
            vec![
                MemberType::Include,
                MemberType::Constant,
                MemberType::Method,
                MemberType::Attribute,
                MemberType::InstanceVariable,
            ]
        );
        assert_eq!(diffs[0].item.as_deref(), Some("include Comparable"));
        assert_eq!(diffs[1].item.as_deref(), Some("VERSION: String"));
        assert_eq!(diffs[3].item.as_deref(), Some("attr_reader label: String"));
        assert_eq!(diffs[4].item.as_deref(), Some("@size: Integer"));
    }

    #[test]
    fn test_attribute_type_change_reports_both_sides() {
        let diffs = diff(
            "class User\n  attr_reader id: Integer\nend\n",
            "class User\n  attr_reader id: String\nend\n",
            CompareOptions::default(),
        );
        assert_eq!(diffs.len(), 2);
        assert_eq!(diffs[0].kind, DifferenceKind::MissingInGenerated);
        assert_eq!(diffs[0].item.as_deref(), Some("attr_reader id: Integer"));
        assert_eq!(diffs[1].kind, DifferenceKind::MissingInOriginal);
        assert_eq!(diffs[1].item.as_deref(), Some("attr_reader id: String"));
    }

    #[test]
    fn test_member_order_does_not_matter() {
        let a = "class A\n  def x: () -> void\n  def y: () -> void\n  include Foo\nend\n";
        let b = "class A\n  include Foo\n  def y: () -> void\n  def x: () -> void\nend\n";
        assert!(diff(a, b, CompareOptions::default()).is_empty());
    }

    #[test]
    fn test_overload_order_matters() {
        let a = "class A\n  def to: (Integer) -> String | (String) -> Integer\nend\n";
        let b = "class A\n  def to: (String) -> Integer | (Integer) -> String\nend\n";
        let diffs = diff(a, b, CompareOptions::default());
        assert_eq!(diffs.len(), 1);
        assert_eq!(diffs[0].kind, DifferenceKind::MethodMismatch);
    }

    #[test]
    fn test_union_order_is_significant_unless_normalized() {
        let a = "class A\n  def v: () -> (String | Integer)\nend\n";
        let b = "class A\n  def v: () -> (Integer | String)\nend\n";
        assert_eq!(diff(a, b, CompareOptions::default()).len(), 1);

        let options = CompareOptions {
            normalize_unions: true,
            ..Default::default()
        };
        assert!(diff(a, b, options).is_empty());
    }

    #[test]
    fn test_kind_change_is_one_mismatch() {
        let diffs = diff(
            "class A\n  def build: () -> A\nend\n",
            "class A\n  def self.build: () -> A\nend\n",
            CompareOptions::default(),
        );
        assert_eq!(diffs.len(), 1);
        let d = &diffs[0];
        assert_eq!(d.kind, DifferenceKind::MethodMismatch);
        assert_eq!(d.method.as_deref(), Some("build"));
        assert_eq!(d.original.as_ref().unwrap().kind, MethodKind::Instance);
        assert_eq!(d.generated.as_ref().unwrap().kind, MethodKind::Singleton);
    }

    #[test]
    fn test_instance_and_singleton_methods_of_one_name_coexist() {
        let both = "class A\n  def build: () -> A\n  def self.build: () -> A\nend\n";
        assert!(diff(both, both, CompareOptions::default()).is_empty());

        let diffs = diff(
            both,
            "class A\n  def build: () -> A\nend\n",
            CompareOptions::default(),
        );
        assert_eq!(diffs.len(), 1);
        assert_eq!(diffs[0].kind, DifferenceKind::MissingInOriginal);
        assert_eq!(diffs[0].method.as_deref(), Some("self.build"));
    }

    #[test]
    fn test_ambiguous_kind_change_reports_each_definition() {
        let diffs = diff(
            "class A\n  def build: () -> A\n  def self?.build: () -> A\nend\n",
            "class A\n  def self.build: () -> A\nend\n",
            CompareOptions::default(),
        );
        let methods: Vec<_> = diffs
            .iter()
            .map(|d| (d.kind, d.method.as_deref().unwrap()))
            .collect();
        assert_eq!(
            methods,
            vec![
                (DifferenceKind::MissingInOriginal, "build"),
                (DifferenceKind::MissingInGenerated, "self.build"),
                (DifferenceKind::MissingInOriginal, "self?.build"),
            ]
        );
    }

    #[test]
    fn test_visibility_change_is_a_mismatch() {
        let diffs = diff(
            "class A\n  def helper: () -> void\nend\n",
            "class A\n  private def helper: () -> void\nend\n",
            CompareOptions::default(),
        );
        assert_eq!(diffs.len(), 1);
        assert_eq!(diffs[0].kind, DifferenceKind::MethodMismatch);
    }

    #[test]
    fn test_empty_sets_compare_clean() {
        assert!(compare(&[], &[], CompareOptions::default()).is_empty());
    }

    #[test]
    fn test_unmerged_duplicate_declarations_are_merged() {
        let mut first = parse("class A\n  def x: () -> void\nend\n").unwrap();
        first.extend(parse("class A\n  def y: () -> void\nend\n").unwrap());
        let merged = parse("class A\n  def x: () -> void\n  def y: () -> void\nend\n").unwrap();
        assert_eq!(first.len(), 2);
        assert!(compare(&first, &merged, CompareOptions::default()).is_empty());
    }
}
