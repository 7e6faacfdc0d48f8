//! Generic name-keyed resource pool with reference bookkeeping.

use std::sync::Arc;

use hashbrown::HashMap;
use thiserror::Error;

use crate::handle::{Handle, Slot};

/// One resource that still has references at teardown.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Leak {
    pub name: String,
    pub count: usize,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResourceError {
    #[error("{kind} '{name}' is already registered")]
    Duplicate { kind: &'static str, name: String },
    #[error("{kind} '{name}' is not registered")]
    NotFound { kind: &'static str, name: String },
    #[error("{kind} '{name}' still has {count} outstanding reference(s)")]
    InUse {
        kind: &'static str,
        name: String,
        count: usize,
    },
    #[error("{} {kind} resource(s) still referenced at teardown", .leaks.len())]
    Leaked { kind: &'static str, leaks: Vec<Leak> },
}

/// Owns named resources of one kind and hands out counted [`Handle`]s.
pub struct ResourceManager<T> {
    kind: &'static str,
    slots: HashMap<String, Arc<Slot<T>>>,
}

impl<T> ResourceManager<T> {
    /// `kind` names the resource in diagnostics ("texture", "material", ...).
    pub fn new(kind: &'static str) -> Self {
        ResourceManager {
            kind,
            slots: HashMap::new(),
        }
    }

    pub fn kind(&self) -> &'static str {
        self.kind
    }

    /// Register `value` under `name`. An existing entry is never replaced.
    pub fn create_and_register(
        &mut self,
        name: impl Into<String>,
        value: T,
    ) -> Result<(), ResourceError> {
        let name = name.into();
        if self.slots.contains_key(&name) {
            return Err(ResourceError::Duplicate {
                kind: self.kind,
                name,
            });
        }
        log::debug!("registering {} '{}'", self.kind, name);
        self.slots
            .insert(name.clone(), Arc::new(Slot::new(name, value)));
        Ok(())
    }

    /// Look up `name`, acquiring a reference when found.
    pub fn find_by_name(&self, name: &str) -> Option<Handle<T>> {
        self.slots.get(name).map(Handle::acquire)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.slots.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.slots.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn ref_count(&self, name: &str) -> Option<usize> {
        self.slots.get(name).map(|slot| slot.refs())
    }

    /// Remove an unreferenced resource and hand it back.
    pub fn unregister(&mut self, name: &str) -> Result<T, ResourceError> {
        let refs = match self.slots.get(name) {
            Some(slot) => slot.refs(),
            None => {
                return Err(ResourceError::NotFound {
                    kind: self.kind,
                    name: name.to_string(),
                })
            }
        };
        if refs > 0 {
            return Err(ResourceError::InUse {
                kind: self.kind,
                name: name.to_string(),
                count: refs,
            });
        }
        let slot = self
            .slots
            .remove(name)
            .ok_or_else(|| ResourceError::NotFound {
                kind: self.kind,
                name: name.to_string(),
            })?;
        match Arc::try_unwrap(slot) {
            Ok(slot) => Ok(slot.value),
            Err(slot) => {
                let count = Arc::strong_count(&slot) - 1;
                self.slots.insert(name.to_string(), slot);
                Err(ResourceError::InUse {
                    kind: self.kind,
                    name: name.to_string(),
                    count,
                })
            }
        }
    }

    /// Every resource with outstanding references, sorted by name.
    pub fn leaks(&self) -> Vec<Leak> {
        let mut leaks: Vec<Leak> = self
            .slots
            .values()
            .filter(|slot| slot.refs() > 0)
            .map(|slot| Leak {
                name: slot.name.clone(),
                count: slot.refs(),
            })
            .collect();
        leaks.sort_by(|a, b| a.name.cmp(&b.name));
        leaks
    }

    pub fn check_leaks(&self) -> Result<(), ResourceError> {
        let leaks = self.leaks();
        if leaks.is_empty() {
            Ok(())
        } else {
            Err(ResourceError::Leaked {
                kind: self.kind,
                leaks,
            })
        }
    }

    /// Tear the pool down.
    ///
    /// # Panics
    ///
    /// Panics after logging every leaked resource when any handle is still
    /// alive. Outstanding references at this point mean an ownership bug and
    /// rendering must not continue.
    pub fn shutdown(mut self) {
        if let Err(err) = self.check_leaks() {
            if let ResourceError::Leaked { kind, leaks } = &err {
                for leak in leaks {
                    let (is_are, noun) = if leak.count > 1 {
                        ("are", "references")
                    } else {
                        ("is", "reference")
                    };
                    log::error!(
                        "There {} still {} {} pointing to {} \"{}\".",
                        is_are,
                        leak.count,
                        noun,
                        kind,
                        leak.name
                    );
                }
            }
            panic!("{err}");
        }
        self.slots.clear();
    }
}

impl<T> Default for ResourceManager<T> {
    fn default() -> Self {
        ResourceManager::new("resource")
    }
}

impl<T> Drop for ResourceManager<T> {
    fn drop(&mut self) {
        if std::thread::panicking() {
            return;
        }
        for leak in self.leaks() {
            log::error!(
                "{} '{}' dropped with {} outstanding reference(s)",
                self.kind,
                leak.name,
                leak.count
            );
        }
    }
}

impl<T> std::fmt::Debug for ResourceManager<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceManager")
            .field("kind", &self.kind)
            .field("names", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool() -> ResourceManager<u32> {
        let mut pool = ResourceManager::new("texture");
        pool.create_and_register("a", 1).unwrap();
        pool.create_and_register("b", 2).unwrap();
        pool
    }

    #[test]
    fn it_should_reject_duplicate_names() {
        let mut pool = pool();
        let err = pool.create_and_register("a", 9).unwrap_err();
        assert_eq!(
            err,
            ResourceError::Duplicate {
                kind: "texture",
                name: "a".into()
            }
        );
        let handle = pool.find_by_name("a").unwrap();
        assert_eq!(*handle, 1);
    }

    #[test]
    fn it_should_count_acquire_and_release() {
        let pool = pool();
        assert_eq!(pool.ref_count("a"), Some(0));
        let h1 = pool.find_by_name("a").unwrap();
        let h2 = h1.clone();
        assert_eq!(pool.ref_count("a"), Some(2));
        assert_eq!(h2.ref_count(), 2);
        h1.release();
        assert_eq!(pool.ref_count("a"), Some(1));
        drop(h2);
        assert_eq!(pool.ref_count("a"), Some(0));
        assert!(pool.find_by_name("missing").is_none());
        pool.shutdown();
    }

    #[test]
    fn it_should_report_every_leak_sorted() {
        let pool = pool();
        let hb = pool.find_by_name("b").unwrap();
        let ha1 = pool.find_by_name("a").unwrap();
        let ha2 = pool.find_by_name("a").unwrap();
        let err = pool.check_leaks().unwrap_err();
        match err {
            ResourceError::Leaked { kind, leaks } => {
                assert_eq!(kind, "texture");
                assert_eq!(
                    leaks,
                    vec![
                        Leak {
                            name: "a".into(),
                            count: 2
                        },
                        Leak {
                            name: "b".into(),
                            count: 1
                        }
                    ]
                );
            }
            other => panic!("unexpected error {other:?}"),
        }
        drop((hb, ha1, ha2));
        assert!(pool.check_leaks().is_ok());
    }

    #[test]
    #[should_panic(expected = "still referenced at teardown")]
    fn it_should_panic_on_shutdown_with_live_handles() {
        let pool = pool();
        let handle = pool.find_by_name("a").unwrap();
        std::mem::forget(handle);
        pool.shutdown();
    }

    #[test]
    fn it_should_unregister_only_unreferenced_entries() {
        let mut pool = pool();
        let handle = pool.find_by_name("a").unwrap();
        assert!(matches!(
            pool.unregister("a"),
            Err(ResourceError::InUse { count: 1, .. })
        ));
        drop(handle);
        assert_eq!(pool.unregister("a"), Ok(1));
        assert!(!pool.contains("a"));
        assert!(matches!(
            pool.unregister("a"),
            Err(ResourceError::NotFound { .. })
        ));
        assert_eq!(pool.names(), vec!["b".to_string()]);
    }
}
