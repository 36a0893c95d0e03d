//! Type oracle: what the Java side knows about bean classes.

use std::collections::HashMap;

use parking_lot::RwLock;
use thiserror::Error;

/// Method name the oracle uses for constructors.
pub const CONSTRUCTOR_NAME: &str = "<init>";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeInfo {
    /// Binary name (`a.b.Outer$Inner`).
    pub name: String,
    /// Compiled type without source; members cannot be added to it.
    pub is_binary: bool,
    pub is_interface: bool,
}

impl TypeInfo {
    pub fn source(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_binary: false,
            is_interface: false,
        }
    }

    pub fn binary(name: impl Into<String>) -> Self {
        Self {
            is_binary: true,
            ..Self::source(name)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Visibility {
    Private,
    Package,
    Protected,
    Public,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodInfo {
    pub name: String,
    pub arity: usize,
    pub is_static: bool,
    pub visibility: Visibility,
    /// `None` for `void` methods and constructors.
    pub return_type: Option<String>,
}

impl MethodInfo {
    pub fn new(name: impl Into<String>, arity: usize) -> Self {
        Self {
            name: name.into(),
            arity,
            is_static: false,
            visibility: Visibility::Public,
            return_type: None,
        }
    }

    pub fn constructor(arity: usize) -> Self {
        Self::new(CONSTRUCTOR_NAME, arity)
    }

    pub fn with_static(mut self, is_static: bool) -> Self {
        self.is_static = is_static;
        self
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn returning(mut self, ty: impl Into<String>) -> Self {
        self.return_type = Some(ty.into());
        self
    }

    pub fn is_constructor(&self) -> bool {
        self.name == CONSTRUCTOR_NAME
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OracleError {
    #[error("type `{0}` not found")]
    NotFound(String),
    #[error("`{0}` resolves to more than one type")]
    Ambiguous(String),
    #[error("type lookup failed: {0}")]
    Failed(String),
}

/// Resolution of class and member names against the user's project.
pub trait TypeOracle: Send + Sync {
    fn resolve_type(&self, qualified_name: &str) -> Result<TypeInfo, OracleError>;

    /// Declared and inherited methods of `ty`, constructors included.
    fn methods(&self, ty: &TypeInfo) -> Result<Vec<MethodInfo>, OracleError>;

    /// First method called `name` with at least `min_visibility`, and exactly
    /// `arity` parameters when given.
    fn find_method(
        &self,
        ty: &TypeInfo,
        name: &str,
        arity: Option<usize>,
        min_visibility: Visibility,
    ) -> Result<MethodInfo, OracleError> {
        self.methods(ty)?
            .into_iter()
            .find(|m| {
                m.name == name
                    && arity.map_or(true, |arity| m.arity == arity)
                    && m.visibility >= min_visibility
            })
            .ok_or_else(|| OracleError::NotFound(format!("{}.{name}", ty.name)))
    }

    fn find_constructor(&self, ty: &TypeInfo, arity: usize) -> Result<MethodInfo, OracleError> {
        self.find_method(ty, CONSTRUCTOR_NAME, Some(arity), Visibility::Private)
    }
}

/// In-memory oracle for tests and hosts that index classes themselves.
#[derive(Debug, Default)]
pub struct MemoryTypeOracle {
    types: RwLock<HashMap<String, (TypeInfo, Vec<MethodInfo>)>>,
    failure: RwLock<Option<String>>,
}

impl MemoryTypeOracle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_type(&self, ty: TypeInfo) {
        self.types
            .write()
            .entry(ty.name.clone())
            .or_insert_with(|| (ty, Vec::new()));
    }

    /// Add `method` to `type_name`, registering a source type if needed.
    pub fn add_method(&self, type_name: &str, method: MethodInfo) {
        self.types
            .write()
            .entry(type_name.to_owned())
            .or_insert_with(|| (TypeInfo::source(type_name), Vec::new()))
            .1
            .push(method);
    }

    /// Fail every query with `message` (`None` clears).
    pub fn set_failure(&self, message: Option<&str>) {
        *self.failure.write() = message.map(str::to_owned);
    }

    fn check_failure(&self) -> Result<(), OracleError> {
        match &*self.failure.read() {
            Some(message) => Err(OracleError::Failed(message.clone())),
            None => Ok(()),
        }
    }
}

impl TypeOracle for MemoryTypeOracle {
    fn resolve_type(&self, qualified_name: &str) -> Result<TypeInfo, OracleError> {
        self.check_failure()?;
        self.types
            .read()
            .get(qualified_name)
            .map(|(ty, _)| ty.clone())
            .ok_or_else(|| OracleError::NotFound(qualified_name.to_owned()))
    }

    fn methods(&self, ty: &TypeInfo) -> Result<Vec<MethodInfo>, OracleError> {
        self.check_failure()?;
        self.types
            .read()
            .get(&ty.name)
            .map(|(_, methods)| methods.clone())
            .ok_or_else(|| OracleError::NotFound(ty.name.clone()))
    }
}
