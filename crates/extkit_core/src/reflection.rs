//! Explicit type registry and inherited method lookup.
//!
//! # Responsibility
//! - Record types, their single parent, and the methods each type declares.
//! - Find a method by name and binding flags on a type or its ancestors.
//!
//! # Invariants
//! - A parent is registered before its children, so ancestor chains are
//!   finite and acyclic.
//! - Every method declares exactly one of `INSTANCE|STATIC` and exactly one
//!   of `PUBLIC|NON_PUBLIC`.
//! - Lookup stops at the first level with a match; more than one match on
//!   that level is reported as ambiguous, never resolved.

use crate::error::{ExtError, ExtResult};
use log::{debug, warn};
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::ops::{BitOr, BitOrAssign};

/// Criteria selecting which methods a lookup may return.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct BindingFlags(u8);

impl BindingFlags {
    pub const INSTANCE: Self = Self(1);
    pub const STATIC: Self = Self(1 << 1);
    pub const PUBLIC: Self = Self(1 << 2);
    pub const NON_PUBLIC: Self = Self(1 << 3);
    /// Lookup-only: compare method names ASCII case-insensitively.
    pub const IGNORE_CASE: Self = Self(1 << 4);

    pub const fn empty() -> Self {
        Self(0)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    const fn without(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }
}

impl BitOr for BindingFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl BitOrAssign for BindingFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = self.union(rhs);
    }
}

impl Display for BindingFlags {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let names = [
            (Self::INSTANCE, "instance"),
            (Self::STATIC, "static"),
            (Self::PUBLIC, "public"),
            (Self::NON_PUBLIC, "non_public"),
            (Self::IGNORE_CASE, "ignore_case"),
        ];
        let set: Vec<&str> = names
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect();
        if set.is_empty() {
            f.write_str("none")
        } else {
            f.write_str(&set.join("|"))
        }
    }
}

/// One registered method and its caller-supplied callable.
#[derive(Debug, Clone)]
pub struct MethodInfo<F> {
    name: String,
    declaring_type: String,
    signature: String,
    flags: BindingFlags,
    callable: F,
}

impl<F> MethodInfo<F> {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Type that declared this method, which may be an ancestor of the
    /// type the lookup started from.
    pub fn declaring_type(&self) -> &str {
        &self.declaring_type
    }

    /// Free-form overload label, e.g. `(i32, &str)`.
    pub fn signature(&self) -> &str {
        &self.signature
    }

    pub fn flags(&self) -> BindingFlags {
        self.flags
    }

    pub fn callable(&self) -> &F {
        &self.callable
    }

    fn matches(&self, method_name: &str, criteria: BindingFlags) -> bool {
        let name_matches = if criteria.contains(BindingFlags::IGNORE_CASE) {
            self.name.eq_ignore_ascii_case(method_name)
        } else {
            self.name == method_name
        };
        name_matches && criteria.contains(self.flags)
    }
}

#[derive(Debug, Clone)]
struct TypeEntry<F> {
    parent: Option<String>,
    methods: Vec<MethodInfo<F>>,
}

/// In-process registry standing in for runtime type metadata.
#[derive(Debug, Clone)]
pub struct TypeRegistry<F> {
    types: BTreeMap<String, TypeEntry<F>>,
}

impl<F> Default for TypeRegistry<F> {
    fn default() -> Self {
        Self {
            types: BTreeMap::new(),
        }
    }
}

impl<F> TypeRegistry<F> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn contains_type(&self, type_name: &str) -> bool {
        self.types.contains_key(type_name)
    }

    /// Registers `type_name` with an optional, already registered parent.
    pub fn register_type(&mut self, type_name: &str, parent: Option<&str>) -> ExtResult<()> {
        validate_identifier("type_name", type_name)?;
        if self.types.contains_key(type_name) {
            return Err(ExtError::invalid_argument(
                "type_name",
                format!("type already registered: {type_name}"),
            ));
        }
        if let Some(parent) = parent {
            if !self.types.contains_key(parent) {
                return Err(ExtError::invalid_argument(
                    "parent",
                    format!("parent type is not registered: {parent}"),
                ));
            }
        }

        self.types.insert(
            type_name.to_string(),
            TypeEntry {
                parent: parent.map(str::to_string),
                methods: Vec::new(),
            },
        );
        debug!(
            "event=type_registered module=reflection status=ok type={} has_parent={}",
            type_name,
            parent.is_some()
        );
        Ok(())
    }

    /// Declares a method on a registered type.
    ///
    /// Several methods may share a name (overloads) as long as their
    /// `signature` labels differ.
    pub fn register_method(
        &mut self,
        type_name: &str,
        method_name: &str,
        signature: &str,
        flags: BindingFlags,
        callable: F,
    ) -> ExtResult<()> {
        validate_identifier("method_name", method_name)?;
        validate_declaration_flags(flags)?;
        let entry = self.types.get_mut(type_name).ok_or_else(|| {
            ExtError::invalid_argument("type_name", format!("type is not registered: {type_name}"))
        })?;
        if entry
            .methods
            .iter()
            .any(|method| method.name == method_name && method.signature == signature)
        {
            return Err(ExtError::invalid_argument(
                "signature",
                format!("method already registered: {type_name}::{method_name}{signature}"),
            ));
        }

        entry.methods.push(MethodInfo {
            name: method_name.to_string(),
            declaring_type: type_name.to_string(),
            signature: signature.to_string(),
            flags,
            callable,
        });
        debug!(
            "event=method_registered module=reflection status=ok type={} method={} flags={}",
            type_name, method_name, flags
        );
        Ok(())
    }

    /// Returns the immediate parent of `type_name`.
    pub fn parent_of(&self, type_name: &str) -> Option<&str> {
        self.types.get(type_name)?.parent.as_deref()
    }

    /// Returns the ancestors of `type_name`, nearest first.
    pub fn ancestors(&self, type_name: &str) -> Vec<&str> {
        let mut chain = Vec::new();
        let mut current = self.parent_of(type_name);
        while let Some(name) = current {
            chain.push(name);
            current = self.parent_of(name);
        }
        chain
    }

    /// Looks up a method declared directly on `type_name`.
    ///
    /// # Errors
    /// - `InvalidArgument` for an empty method name or an unregistered type.
    /// - `Ambiguous` when more than one declared method matches.
    pub fn find_method_on(
        &self,
        type_name: &str,
        method_name: &str,
        criteria: BindingFlags,
    ) -> ExtResult<Option<&MethodInfo<F>>> {
        require_lookup_name("method_name", method_name)?;
        let entry = self.types.get(type_name).ok_or_else(|| {
            ExtError::invalid_argument("type_name", format!("type is not registered: {type_name}"))
        })?;
        let mut matches = entry
            .methods
            .iter()
            .filter(|method| method.matches(method_name, criteria));
        let Some(first) = matches.next() else {
            return Ok(None);
        };
        let extra = matches.count();
        if extra > 0 {
            warn!(
                "event=method_lookup module=reflection status=ambiguous type={} method={} matches={}",
                type_name,
                method_name,
                extra + 1
            );
            return Err(ExtError::Ambiguous {
                type_name: type_name.to_string(),
                method_name: method_name.to_string(),
                matches: extra + 1,
            });
        }
        Ok(Some(first))
    }

    /// Searches `type_name`, then each ancestor, for a matching method.
    ///
    /// Returns `Ok(None)` once the root of the hierarchy is passed without a
    /// match.
    ///
    /// # Errors
    /// - `InvalidArgument` for an empty name or an unregistered start type.
    /// - `Ambiguous` from the first level that has more than one match.
    pub fn try_find_method(
        &self,
        type_name: &str,
        method_name: &str,
        criteria: BindingFlags,
    ) -> ExtResult<Option<&MethodInfo<F>>> {
        require_lookup_name("type_name", type_name)?;
        require_lookup_name("method_name", method_name)?;

        let mut owner = Some(type_name);
        while let Some(current) = owner {
            if let Some(found) = self.find_method_on(current, method_name, criteria)? {
                return Ok(Some(found));
            }
            owner = self.parent_of(current);
        }
        Ok(None)
    }
}

fn require_lookup_name(name: &'static str, value: &str) -> ExtResult<()> {
    if value.is_empty() {
        return Err(ExtError::invalid_argument(name, "lookup name cannot be empty"));
    }
    Ok(())
}

fn validate_identifier(name: &'static str, value: &str) -> ExtResult<()> {
    if value.is_empty() {
        return Err(ExtError::invalid_argument(name, "identifier cannot be empty"));
    }
    if value.chars().any(char::is_whitespace) {
        return Err(ExtError::invalid_argument(
            name,
            format!("identifier must not contain whitespace: `{value}`"),
        ));
    }
    Ok(())
}

fn validate_declaration_flags(flags: BindingFlags) -> ExtResult<()> {
    let binding = flags.without(BindingFlags::PUBLIC.union(BindingFlags::NON_PUBLIC));
    let visibility = flags.without(BindingFlags::INSTANCE.union(BindingFlags::STATIC));
    let valid = (binding == BindingFlags::INSTANCE || binding == BindingFlags::STATIC)
        && (visibility == BindingFlags::PUBLIC || visibility == BindingFlags::NON_PUBLIC);
    if !valid {
        return Err(ExtError::invalid_argument(
            "flags",
            format!(
                "method must declare one of instance|static and one of public|non_public, got {flags}"
            ),
        ));
    }
    Ok(())
}
