//! Diagnostic records as captured by validation.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use beanfix_dom::ResourceRef;
use thiserror::Error;

/// Marker key holding the error identifier.
pub const ERROR_ID_KEY: &str = "errorId";
pub const CLASS_KEY: &str = "CLASS";
pub const BEAN_KEY: &str = "BEAN";
pub const BEAN_NAME_KEY: &str = "BEAN_NAME";
pub const PROPERTY_KEY: &str = "PROPERTY";
pub const METHOD_KEY: &str = "METHOD";
pub const NUM_ARGUMENT_KEY: &str = "NUM_ARGUMENT";
/// Prefix of the numbered `MISSING_PROPERTIES1`, `MISSING_PROPERTIES2`, ... keys.
pub const MISSING_PROPERTIES_PREFIX: &str = "MISSING_PROPERTIES";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ErrorId {
    ClassNotFound,
    UndefinedReferencedBean,
    NoSetter,
    NoGetter,
    UndefinedInitMethod,
    UndefinedDestroyMethod,
    UndefinedFactoryBeanMethod,
    RequiredPropertyMissing,
    NoConstructor,
}

impl ErrorId {
    pub const ALL: [ErrorId; 9] = [
        ErrorId::ClassNotFound,
        ErrorId::UndefinedReferencedBean,
        ErrorId::NoSetter,
        ErrorId::NoGetter,
        ErrorId::UndefinedInitMethod,
        ErrorId::UndefinedDestroyMethod,
        ErrorId::UndefinedFactoryBeanMethod,
        ErrorId::RequiredPropertyMissing,
        ErrorId::NoConstructor,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ErrorId::ClassNotFound => "CLASS_NOT_FOUND",
            ErrorId::UndefinedReferencedBean => "UNDEFINED_REFERENCED_BEAN",
            ErrorId::NoSetter => "NO_SETTER",
            ErrorId::NoGetter => "NO_GETTER",
            ErrorId::UndefinedInitMethod => "UNDEFINED_INIT_METHOD",
            ErrorId::UndefinedDestroyMethod => "UNDEFINED_DESTROY_METHOD",
            ErrorId::UndefinedFactoryBeanMethod => "UNDEFINED_FACTORY_BEAN_METHOD",
            ErrorId::RequiredPropertyMissing => "REQUIRED_PROPERTY_MISSING",
            ErrorId::NoConstructor => "NO_CONSTRUCTOR",
        }
    }

    /// Marker attributes that must be present before any proposal is computed.
    ///
    /// For [`ErrorId::RequiredPropertyMissing`] the first numbered key stands
    /// in for the whole sequence.
    pub fn required_attributes(self) -> &'static [&'static str] {
        match self {
            ErrorId::ClassNotFound => &[CLASS_KEY],
            ErrorId::UndefinedReferencedBean => &[BEAN_KEY],
            ErrorId::NoSetter | ErrorId::NoGetter => &[CLASS_KEY, PROPERTY_KEY],
            ErrorId::UndefinedInitMethod
            | ErrorId::UndefinedDestroyMethod
            | ErrorId::UndefinedFactoryBeanMethod => &[CLASS_KEY, METHOD_KEY],
            ErrorId::RequiredPropertyMissing => &[CLASS_KEY, "MISSING_PROPERTIES1"],
            ErrorId::NoConstructor => &[CLASS_KEY, NUM_ARGUMENT_KEY],
        }
    }

    /// Document attributes holding the diagnosed token, in the order they are
    /// tried.
    pub fn anchor_attributes(self) -> &'static [&'static str] {
        match self {
            ErrorId::ClassNotFound
            | ErrorId::RequiredPropertyMissing
            | ErrorId::NoConstructor => &["class"],
            ErrorId::UndefinedReferencedBean => &["ref", "parent", "factory-bean", "bean"],
            ErrorId::NoSetter | ErrorId::NoGetter => &["name"],
            ErrorId::UndefinedInitMethod => &["init-method"],
            ErrorId::UndefinedDestroyMethod => &["destroy-method"],
            ErrorId::UndefinedFactoryBeanMethod => &["factory-method"],
        }
    }

    /// Element the anchor attribute must sit on, if any.
    pub fn anchor_element(self) -> Option<&'static str> {
        match self {
            ErrorId::NoSetter | ErrorId::NoGetter => Some("property"),
            _ => None,
        }
    }

    /// Marker attribute whose value is the diagnosed token.
    pub fn token_key(self) -> &'static str {
        match self {
            ErrorId::ClassNotFound | ErrorId::RequiredPropertyMissing | ErrorId::NoConstructor => {
                CLASS_KEY
            }
            ErrorId::UndefinedReferencedBean => BEAN_KEY,
            ErrorId::NoSetter | ErrorId::NoGetter => PROPERTY_KEY,
            ErrorId::UndefinedInitMethod
            | ErrorId::UndefinedDestroyMethod
            | ErrorId::UndefinedFactoryBeanMethod => METHOD_KEY,
        }
    }

    /// Whether the fix concerns the element as a whole rather than the
    /// anchor attribute's value.
    pub fn is_node_scoped(self) -> bool {
        matches!(
            self,
            ErrorId::RequiredPropertyMissing | ErrorId::NoConstructor
        )
    }
}

impl fmt::Display for ErrorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ErrorId {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ErrorId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| RecordError::UnknownErrorId(s.to_owned()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("marker has no `errorId` attribute")]
    MissingErrorId,
    #[error("unknown error id `{0}`")]
    UnknownErrorId(String),
}

/// One problem raised by validation: an error id, the marker's string
/// attributes and the line it was reported on (1-based, `0` if unknown).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticRecord {
    error_id: ErrorId,
    attributes: BTreeMap<String, String>,
    line: u32,
    resource: ResourceRef,
}

impl DiagnosticRecord {
    pub fn new(error_id: ErrorId, resource: ResourceRef, line: u32) -> Self {
        Self {
            error_id,
            attributes: BTreeMap::new(),
            line,
            resource,
        }
    }

    /// Build a record from a flat marker attribute map.
    ///
    /// The `errorId` entry selects the [`ErrorId`]; every other entry is kept
    /// as an attribute.
    pub fn from_marker<K, V>(
        resource: ResourceRef,
        line: u32,
        marker: impl IntoIterator<Item = (K, V)>,
    ) -> Result<Self, RecordError>
    where
        K: Into<String>,
        V: Into<String>,
    {
        let mut attributes: BTreeMap<String, String> = marker
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        let error_id = attributes
            .remove(ERROR_ID_KEY)
            .ok_or(RecordError::MissingErrorId)?
            .parse()?;
        Ok(Self {
            error_id,
            attributes,
            line,
            resource,
        })
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn error_id(&self) -> ErrorId {
        self.error_id
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn resource(&self) -> &ResourceRef {
        &self.resource
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Values of `{prefix}1`, `{prefix}2`, ... up to the first missing index.
    pub fn numbered(&self, prefix: &str) -> Vec<&str> {
        (1..)
            .map_while(|n| self.attribute(&format!("{prefix}{n}")))
            .collect()
    }

    /// The diagnosed token (class, bean, property or method name).
    pub fn token(&self) -> Option<&str> {
        self.attribute(self.error_id.token_key())
    }

    /// Name of the first required attribute that is absent.
    pub fn missing_required(&self) -> Option<&'static str> {
        self.error_id
            .required_attributes()
            .iter()
            .copied()
            .find(|key| self.attribute(key).is_none())
    }
}
