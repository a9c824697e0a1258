use crate::signature::MethodDefinition;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Equivalence rules applied while comparing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompareOptions {
    /// Parameter names are significant, not just their types.
    pub strict_param_names: bool,
    /// Sort union and intersection members before comparing, so
    /// `String | Integer` matches `Integer | String`.
    pub normalize_unions: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DifferenceKind {
    /// The generated side lacks a declaration or member. A method with
    /// this label is defined only on the generated side.
    MissingInGenerated,
    /// The original lacks a declaration or member. A method with this
    /// label is defined only in the original.
    MissingInOriginal,
    /// Same method on both sides with different signatures.
    MethodMismatch,
}

impl DifferenceKind {
    /// The label seen from the other side of the comparison.
    pub fn mirrored(self) -> Self {
        match self {
            Self::MissingInGenerated => Self::MissingInOriginal,
            Self::MissingInOriginal => Self::MissingInGenerated,
            Self::MethodMismatch => Self::MethodMismatch,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberType {
    Include,
    Constant,
    Method,
    Attribute,
    #[serde(rename = "ivar")]
    InstanceVariable,
}

impl fmt::Display for MemberType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Include => "include",
            Self::Constant => "constant",
            Self::Method => "method",
            Self::Attribute => "attribute",
            Self::InstanceVariable => "ivar",
        };
        f.write_str(label)
    }
}

/// One structural difference between two declaration sets.
///
/// A whole-declaration difference has no `member_type`. Set-valued members
/// carry `item`; methods carry `method` and the method record of each side
/// that has one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Difference {
    #[serde(rename = "type")]
    pub kind: DifferenceKind,
    #[serde(rename = "class")]
    pub declaration: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member_type: Option<MemberType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original: Option<MethodDefinition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generated: Option<MethodDefinition>,
}

impl Difference {
    pub fn declaration(kind: DifferenceKind, name: &str) -> Self {
        Self {
            kind,
            declaration: name.to_string(),
            member_type: None,
            item: None,
            method: None,
            original: None,
            generated: None,
        }
    }

    pub fn member(
        kind: DifferenceKind,
        declaration: &str,
        member_type: MemberType,
        item: String,
    ) -> Self {
        Self {
            member_type: Some(member_type),
            item: Some(item),
            ..Self::declaration(kind, declaration)
        }
    }

    /// Method present on one side only. Exactly one of the records is set.
    ///
    /// Methods are labelled by the side that defines them: a method only the
    /// original defines is `missing_in_original`. Declarations and set-valued
    /// members are labelled by the side that lacks them.
    pub fn missing_method(
        declaration: &str,
        key: &str,
        original: Option<MethodDefinition>,
        generated: Option<MethodDefinition>,
    ) -> Self {
        let kind = if original.is_some() {
            DifferenceKind::MissingInOriginal
        } else {
            DifferenceKind::MissingInGenerated
        };
        Self {
            member_type: Some(MemberType::Method),
            method: Some(key.to_string()),
            original,
            generated,
            ..Self::declaration(kind, declaration)
        }
    }

    pub fn method_mismatch(
        declaration: &str,
        key: &str,
        original: MethodDefinition,
        generated: MethodDefinition,
    ) -> Self {
        Self {
            member_type: Some(MemberType::Method),
            method: Some(key.to_string()),
            original: Some(original),
            generated: Some(generated),
            ..Self::declaration(DifferenceKind::MethodMismatch, declaration)
        }
    }

    /// The same difference as reported by comparing the sides the other
    /// way round.
    pub fn mirrored(&self) -> Self {
        Self {
            kind: self.kind.mirrored(),
            original: self.generated.clone(),
            generated: self.original.clone(),
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileStatus {
    /// Parsed cleanly, no differences.
    Ok,
    /// Parsed cleanly, structural differences found.
    Different,
    /// A file of the pair does not exist.
    Missing,
    /// A file of the pair could not be read or parsed.
    Error,
}

impl fmt::Display for FileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Ok => "ok",
            Self::Different => "different",
            Self::Missing => "missing",
            Self::Error => "error",
        };
        f.write_str(label)
    }
}

/// Outcome of comparing one file pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileResult {
    pub file: String,
    pub status: FileStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub differences: Vec<Difference>,
}

impl FileResult {
    pub fn from_differences(file: impl Into<String>, differences: Vec<Difference>) -> Self {
        let status = if differences.is_empty() {
            FileStatus::Ok
        } else {
            FileStatus::Different
        };
        Self {
            file: file.into(),
            status,
            message: None,
            differences,
        }
    }

    pub fn missing(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            status: FileStatus::Missing,
            message: Some(message.into()),
            differences: Vec::new(),
        }
    }

    pub fn error(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            status: FileStatus::Error,
            message: Some(message.into()),
            differences: Vec::new(),
        }
    }

    pub fn passed(&self) -> bool {
        self.status == FileStatus::Ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_member_difference_json_shape() {
        let diff = Difference::member(
            DifferenceKind::MissingInGenerated,
            "User",
            MemberType::InstanceVariable,
            "@name: String".to_string(),
        );
        assert_eq!(
            serde_json::to_value(&diff).unwrap(),
            json!({
                "type": "missing_in_generated",
                "class": "User",
                "member_type": "ivar",
                "item": "@name: String"
            })
        );
    }

    #[test]
    fn test_declaration_difference_has_no_member_type() {
        let diff = Difference::declaration(DifferenceKind::MissingInOriginal, "Admin");
        assert_eq!(
            serde_json::to_value(&diff).unwrap(),
            json!({ "type": "missing_in_original", "class": "Admin" })
        );
    }

    #[test]
    fn test_mirrored_swaps_labels() {
        let diff = Difference::member(
            DifferenceKind::MissingInOriginal,
            "A",
            MemberType::Include,
            "include Comparable".to_string(),
        );
        let mirrored = diff.mirrored();
        assert_eq!(mirrored.kind, DifferenceKind::MissingInGenerated);
        assert_eq!(mirrored.mirrored(), diff);
    }

    #[test]
    fn test_missing_method_is_labelled_by_defining_side() {
        let method = crate::signature::parse("class User\n  def valid?: () -> bool\nend\n")
            .unwrap()
            .remove(0)
            .methods()
            .next()
            .cloned()
            .unwrap();

        let only_original = Difference::missing_method("User", "valid?", Some(method.clone()), None);
        assert_eq!(only_original.kind, DifferenceKind::MissingInOriginal);
        let only_generated = Difference::missing_method("User", "valid?", None, Some(method));
        assert_eq!(only_generated.kind, DifferenceKind::MissingInGenerated);
        assert_eq!(only_original.mirrored(), only_generated);
    }

    #[test]
    fn test_file_result_status() {
        assert_eq!(FileResult::from_differences("a.rbs", vec![]).status, FileStatus::Ok);
        assert!(FileResult::from_differences("a.rbs", vec![]).passed());
        let missing = FileResult::missing("b.rbs", "generated file not found");
        assert!(!missing.passed());
        assert_eq!(
            serde_json::to_value(&missing).unwrap(),
            json!({ "file": "b.rbs", "status": "missing", "message": "generated file not found" })
        );
    }
}
