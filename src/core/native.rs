//! Native function descriptors.
//!
//! These types describe a native function the way a natives database does:
//! a name, a stable hash, a C-ABI signature and free-form documentation.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A C-ABI type: a base type name plus pointer indirection and constness.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct TypeSpec {
    /// Base type name (e.g. `int`, `Entity`, `unsigned long long`)
    pub base_type: String,

    /// Number of pointer levels
    pub pointers: usize,

    /// Whether the pointee is const
    pub is_const: bool,
}

impl TypeSpec {
    /// Create a plain, non-pointer type.
    pub fn new(base_type: impl Into<String>) -> Self {
        TypeSpec {
            base_type: base_type.into(),
            pointers: 0,
            is_const: false,
        }
    }

    /// Add one level of pointer indirection.
    pub fn pointer(mut self) -> Self {
        self.pointers += 1;
        self
    }

    /// Mark the type as const.
    pub fn constant(mut self) -> Self {
        self.is_const = true;
        self
    }

    /// Parse a C type spelling such as `const char*` or `Any**`.
    ///
    /// Never fails: anything that isn't a pointer marker or a `const`
    /// qualifier is taken as the base type. An empty string is `void`.
    pub fn parse(s: &str) -> Self {
        let mut rest = s.trim();

        let mut pointers = 0;
        while let Some(inner) = rest.strip_suffix('*') {
            pointers += 1;
            rest = inner.trim_end();
        }

        let (is_const, rest) = match rest.strip_prefix("const ") {
            Some(stripped) => (true, stripped.trim_start()),
            None => (false, rest),
        };

        let base_type = if rest.is_empty() { "void" } else { rest };

        TypeSpec {
            base_type: base_type.to_string(),
            pointers,
            is_const,
        }
    }

    /// Check if this is a pointer type.
    pub fn is_pointer(&self) -> bool {
        self.pointers > 0
    }
}

impl From<String> for TypeSpec {
    fn from(s: String) -> Self {
        TypeSpec::parse(&s)
    }
}

impl From<TypeSpec> for String {
    fn from(ty: TypeSpec) -> Self {
        ty.to_string()
    }
}

impl fmt::Display for TypeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_const {
            write!(f, "const ")?;
        }
        write!(f, "{}{}", self.base_type, "*".repeat(self.pointers))
    }
}

/// A native function parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeParam {
    /// Parameter name
    pub name: String,

    /// Parameter type
    #[serde(rename = "type")]
    pub ty: TypeSpec,
}

impl NativeParam {
    /// Create a new parameter.
    pub fn new(name: impl Into<String>, ty: TypeSpec) -> Self {
        NativeParam {
            name: name.into(),
            ty,
        }
    }
}

/// A native function as supplied by a natives database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeDescriptor {
    /// Raw native name (e.g. `GET_ENTITY_COORDS`, `_0x1A2B3C4D`)
    pub name: String,

    /// Stable hash used to invoke the native
    pub hash: String,

    /// Secondary (legacy) hash
    #[serde(default)]
    pub jhash: String,

    /// Game build the native first appeared in
    #[serde(default)]
    pub build: Option<String>,

    /// Return type
    pub return_type: TypeSpec,

    /// Parameters in call order
    #[serde(default)]
    pub params: Vec<NativeParam>,

    /// Documentation, may span several lines
    #[serde(default)]
    pub comment: String,
}

impl NativeDescriptor {
    /// Create a descriptor with no parameters and no documentation.
    pub fn new(name: impl Into<String>, hash: impl Into<String>, return_type: TypeSpec) -> Self {
        NativeDescriptor {
            name: name.into(),
            hash: hash.into(),
            jhash: String::new(),
            build: None,
            return_type,
            params: Vec::new(),
            comment: String::new(),
        }
    }

    /// Add a parameter.
    pub fn with_param(mut self, param: NativeParam) -> Self {
        self.params.push(param);
        self
    }

    /// Set the secondary hash.
    pub fn with_jhash(mut self, jhash: impl Into<String>) -> Self {
        self.jhash = jhash.into();
        self
    }

    /// Set the build tag.
    pub fn with_build(mut self, build: impl Into<String>) -> Self {
        self.build = Some(build.into());
        self
    }

    /// Set the documentation comment.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    /// Check the fields a generator relies on.
    pub fn validate(&self) -> Result<(), DescriptorError> {
        if self.name.trim().is_empty() {
            return Err(DescriptorError::EmptyName {
                hash: self.hash.clone(),
            });
        }

        if self.hash.trim().is_empty() {
            return Err(DescriptorError::EmptyHash {
                name: self.name.clone(),
            });
        }

        if self.return_type.base_type.trim().is_empty() {
            return Err(DescriptorError::EmptyReturnType {
                name: self.name.clone(),
            });
        }

        for (index, param) in self.params.iter().enumerate() {
            if param.name.trim().is_empty() {
                return Err(DescriptorError::EmptyParamName {
                    name: self.name.clone(),
                    index,
                });
            }
            if param.ty.base_type.trim().is_empty() {
                return Err(DescriptorError::EmptyParamType {
                    name: self.name.clone(),
                    param: param.name.clone(),
                });
            }
        }

        Ok(())
    }
}

/// A descriptor that a generator cannot render.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DescriptorError {
    #[error("native `{hash}` has an empty name")]
    EmptyName { hash: String },

    #[error("native `{name}` has an empty hash")]
    EmptyHash { name: String },

    #[error("native `{name}` has an empty return type")]
    EmptyReturnType { name: String },

    #[error("parameter #{index} of native `{name}` has an empty name")]
    EmptyParamName { name: String, index: usize },

    #[error("parameter `{param}` of native `{name}` has an empty type")]
    EmptyParamType { name: String, param: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_spec_parse() {
        assert_eq!(TypeSpec::parse("int"), TypeSpec::new("int"));
        assert_eq!(
            TypeSpec::parse("unsigned long long"),
            TypeSpec::new("unsigned long long")
        );
        assert_eq!(TypeSpec::parse("Any*"), TypeSpec::new("Any").pointer());
        assert_eq!(
            TypeSpec::parse("const char*"),
            TypeSpec::new("char").pointer().constant()
        );
        assert_eq!(
            TypeSpec::parse("const char **"),
            TypeSpec::new("char").pointer().pointer().constant()
        );
    }

    #[test]
    fn test_type_spec_parse_empty_is_void() {
        assert_eq!(TypeSpec::parse(""), TypeSpec::new("void"));
        assert_eq!(TypeSpec::parse("   "), TypeSpec::new("void"));
    }

    #[test]
    fn test_type_spec_display() {
        assert_eq!(TypeSpec::new("Vector3").to_string(), "Vector3");
        assert_eq!(
            TypeSpec::new("char").pointer().constant().to_string(),
            "const char*"
        );
        assert_eq!(TypeSpec::new("int").pointer().pointer().to_string(), "int**");
    }

    #[test]
    fn test_type_spec_serde_uses_c_spelling() {
        let ty: TypeSpec = serde_json::from_str("\"const char*\"").unwrap();
        assert_eq!(ty, TypeSpec::new("char").pointer().constant());
        assert_eq!(serde_json::to_string(&ty).unwrap(), "\"const char*\"");
    }

    #[test]
    fn test_descriptor_validate_ok() {
        let native = NativeDescriptor::new("WAIT", "0x4EDE34FBADD967A6", TypeSpec::new("void"))
            .with_param(NativeParam::new("ms", TypeSpec::new("int")));
        assert!(native.validate().is_ok());
    }

    #[test]
    fn test_descriptor_validate_empty_name() {
        let native = NativeDescriptor::new("", "0x1", TypeSpec::new("void"));
        assert_eq!(
            native.validate(),
            Err(DescriptorError::EmptyName {
                hash: "0x1".to_string()
            })
        );
    }

    #[test]
    fn test_descriptor_validate_empty_hash() {
        let native = NativeDescriptor::new("WAIT", " ", TypeSpec::new("void"));
        assert!(matches!(
            native.validate(),
            Err(DescriptorError::EmptyHash { .. })
        ));
    }

    #[test]
    fn test_descriptor_validate_empty_param_name() {
        let native = NativeDescriptor::new("WAIT", "0x1", TypeSpec::new("void"))
            .with_param(NativeParam::new("ms", TypeSpec::new("int")))
            .with_param(NativeParam::new("", TypeSpec::new("int")));
        let err = native.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "parameter #1 of native `WAIT` has an empty name"
        );
    }
}
