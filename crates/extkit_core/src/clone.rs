//! Shallow and deep container copies.
//!
//! # Responsibility
//! - Define the self-copy capability deep copies are built from.
//! - Offer shallow/deep copies of sequences and maps, optionally under a
//!   caller-supplied lock token.
//!
//! # Invariants
//! - A deep copy shares no heap allocation with its source, recursively.
//! - A failed element copy fails the whole copy; no partial result escapes.
//! - Locked variants release the token on every exit path.

use crate::error::ExtResult;
use crate::lock::acquire;
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::hash::{BuildHasher, Hash};
use std::rc::Rc;
use std::sync::{Arc, Mutex};

/// Produces an independent copy of `self`, applying the same contract to
/// every owned sub-object.
///
/// Smart pointers are re-allocated rather than shared, so a deep copy of an
/// `Arc<T>` is never pointer-equal to its source.
pub trait DeepClone: Sized {
    fn deep_clone(&self) -> ExtResult<Self>;
}

macro_rules! deep_clone_by_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl DeepClone for $ty {
                fn deep_clone(&self) -> ExtResult<Self> {
                    Ok(self.clone())
                }
            }
        )*
    };
}

deep_clone_by_value!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64,
    String,
);

impl<T: DeepClone> DeepClone for Option<T> {
    fn deep_clone(&self) -> ExtResult<Self> {
        self.as_ref().map(DeepClone::deep_clone).transpose()
    }
}

impl<T: DeepClone> DeepClone for Box<T> {
    fn deep_clone(&self) -> ExtResult<Self> {
        Ok(Box::new((**self).deep_clone()?))
    }
}

impl<T: DeepClone> DeepClone for Rc<T> {
    fn deep_clone(&self) -> ExtResult<Self> {
        Ok(Rc::new((**self).deep_clone()?))
    }
}

impl<T: DeepClone> DeepClone for Arc<T> {
    fn deep_clone(&self) -> ExtResult<Self> {
        Ok(Arc::new((**self).deep_clone()?))
    }
}

impl<T: DeepClone> DeepClone for Vec<T> {
    fn deep_clone(&self) -> ExtResult<Self> {
        self.iter().map(DeepClone::deep_clone).collect()
    }
}

impl<T: DeepClone> DeepClone for VecDeque<T> {
    fn deep_clone(&self) -> ExtResult<Self> {
        self.iter().map(DeepClone::deep_clone).collect()
    }
}

impl<K, V, S> DeepClone for HashMap<K, V, S>
where
    K: Clone + Eq + Hash,
    V: DeepClone,
    S: BuildHasher + Clone,
{
    fn deep_clone(&self) -> ExtResult<Self> {
        let mut copy = HashMap::with_capacity_and_hasher(self.len(), self.hasher().clone());
        for (key, value) in self {
            copy.insert(key.clone(), value.deep_clone()?);
        }
        Ok(copy)
    }
}

impl<K, V> DeepClone for BTreeMap<K, V>
where
    K: Clone + Ord,
    V: DeepClone,
{
    fn deep_clone(&self) -> ExtResult<Self> {
        self.iter()
            .map(|(key, value)| -> ExtResult<(K, V)> { Ok((key.clone(), value.deep_clone()?)) })
            .collect()
    }
}

/// Copy helpers for sequence and map containers.
pub trait CloneExt: Clone {
    /// New container holding the same elements, each copied with its own
    /// `Clone`. Handle elements such as `Arc<T>` stay shared with the source.
    fn shallow_clone(&self) -> Self {
        self.clone()
    }

    /// [`CloneExt::shallow_clone`] while holding `lock`.
    fn shallow_clone_locked<L>(&self, lock: &Mutex<L>) -> ExtResult<Self> {
        let _guard = acquire(lock, "shallow_clone")?;
        Ok(self.clone())
    }

    /// [`DeepClone::deep_clone`] while holding `lock`.
    fn deep_clone_locked<L>(&self, lock: &Mutex<L>) -> ExtResult<Self>
    where
        Self: DeepClone,
    {
        let _guard = acquire(lock, "deep_clone")?;
        self.deep_clone()
    }
}

impl<T: Clone> CloneExt for Vec<T> {}
impl<T: Clone> CloneExt for VecDeque<T> {}
impl<K: Clone, V: Clone, S: Clone> CloneExt for HashMap<K, V, S> {}
impl<K: Clone, V: Clone> CloneExt for BTreeMap<K, V> {}

#[cfg(test)]
mod tests {
    use super::{CloneExt, DeepClone};
    use crate::error::{ExtError, ExtResult};
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Clone, PartialEq)]
    struct Node {
        label: String,
        children: Vec<Arc<Node>>,
    }

    impl DeepClone for Node {
        fn deep_clone(&self) -> ExtResult<Self> {
            Ok(Self {
                label: self.label.deep_clone()?,
                children: self.children.deep_clone()?,
            })
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    struct Sealed;

    impl DeepClone for Sealed {
        fn deep_clone(&self) -> ExtResult<Self> {
            Err(ExtError::InvalidOperation("sealed value cannot be copied".into()))
        }
    }

    fn sample() -> Vec<Arc<Node>> {
        let leaf = Arc::new(Node {
            label: "leaf".to_string(),
            children: vec![],
        });
        vec![
            Arc::new(Node {
                label: "root".to_string(),
                children: vec![leaf],
            }),
            Arc::new(Node {
                label: "other".to_string(),
                children: vec![],
            }),
        ]
    }

    #[test]
    fn shallow_clone_shares_elements() {
        let source = sample();
        let copy = source.shallow_clone();
        assert_eq!(copy, source);
        assert!(copy.iter().zip(&source).all(|(a, b)| Arc::ptr_eq(a, b)));
    }

    #[test]
    fn deep_clone_copies_every_level() {
        let source = sample();
        let copy = source.deep_clone().expect("nodes are copyable");
        assert_eq!(copy, source);
        assert!(copy.iter().zip(&source).all(|(a, b)| !Arc::ptr_eq(a, b)));
        assert!(!Arc::ptr_eq(&copy[0].children[0], &source[0].children[0]));
    }

    #[test]
    fn deep_clone_of_map_copies_values() {
        let mut source = HashMap::new();
        source.insert("a", Arc::new(1_u32));
        let copy = source.deep_clone().expect("integers are copyable");
        assert_eq!(copy, source);
        assert!(!Arc::ptr_eq(&copy["a"], &source["a"]));
    }

    #[test]
    fn failing_element_fails_whole_copy() {
        let source = vec![Sealed, Sealed];
        assert!(matches!(
            source.deep_clone(),
            Err(ExtError::InvalidOperation(_))
        ));
    }

    #[test]
    fn locked_variants_release_token_on_success_and_failure() {
        let lock = Mutex::new(());

        let copy = sample()
            .shallow_clone_locked(&lock)
            .expect("free lock");
        assert_eq!(copy.len(), 2);
        assert!(lock.try_lock().is_ok());

        let err = vec![Sealed]
            .deep_clone_locked(&lock)
            .expect_err("sealed element must fail");
        assert!(matches!(err, ExtError::InvalidOperation(_)));
        assert!(lock.try_lock().is_ok());
    }
}
